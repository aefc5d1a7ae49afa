//! Gatehouse Auth — tenant authentication, user registration/login
//! orchestration, and project provisioning.

pub mod config;
pub mod error;
pub mod password;
pub mod provision;
pub mod service;
pub mod validate;

pub use config::AuthConfig;
pub use error::AuthError;
pub use provision::{CreateProjectInput, CreateProjectOutput, ProjectService};
pub use service::{AuthService, LoginInput, LoginOutput, RegisterInput, RegisterOutput};
