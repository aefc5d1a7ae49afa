//! Domain models for Gatehouse.
//!
//! These are the core types shared across all crates.

pub mod membership;
pub mod permission;
pub mod project;
pub mod role;
pub mod user;
