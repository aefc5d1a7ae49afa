//! Authentication error types.

use gatehouse_core::error::GatehouseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid client secret")]
    InvalidClientSecret,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Project is not active")]
    ProjectInactive,

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for GatehouseError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidClientSecret | AuthError::InvalidCredentials => {
                GatehouseError::Unauthorized {
                    reason: err.to_string(),
                }
            }
            AuthError::ProjectInactive => GatehouseError::InvalidState {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => GatehouseError::Internal(msg),
        }
    }
}
