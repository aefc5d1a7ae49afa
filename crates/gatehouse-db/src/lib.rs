//! Gatehouse Database — SurrealDB connection management, schema
//! migrations, permission-catalog seeding, and repository
//! implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Permission catalog seeding ([`seed_permission_catalog`])
//! - Error types ([`DbError`])
//! - Implementations of the `gatehouse-core` repository traits

mod connection;
mod error;
mod schema;
mod seed;

pub mod repository;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::run_migrations;
pub use seed::{PERMISSION_CATALOG, seed_permission_catalog};
