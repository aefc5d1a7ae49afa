//! Gatehouse Core — domain models, error taxonomy, repository trait
//! definitions, and the default role grant policy.

pub mod error;
pub mod models;
pub mod provision;
pub mod repository;

pub use error::{GatehouseError, GatehouseResult};
