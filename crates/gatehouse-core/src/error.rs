//! Error types for the Gatehouse system.
//!
//! Every failure in the core is expressed as one [`GatehouseError`]
//! variant. Each variant carries a human-readable message and maps to
//! a stable machine code plus an HTTP-like status, so the (external)
//! transport layer never has to inspect message text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatehouseError {
    /// Malformed or missing input, detected before any store access.
    #[error("{message}")]
    Validation { message: String },

    /// A referenced project, user, or membership does not exist.
    #[error("{entity} not found")]
    NotFound { entity: String, key: String },

    /// The entity exists but is in a state that disallows the
    /// operation (e.g. a deactivated project).
    #[error("{reason}")]
    InvalidState { reason: String },

    /// Credential verification (client secret or password) failed.
    #[error("{reason}")]
    Unauthorized { reason: String },

    /// The operation would violate a uniqueness or idempotence
    /// invariant.
    #[error("{reason}")]
    Conflict { reason: String },

    /// The actor is in a state that disallows the action
    /// (e.g. a suspended membership).
    #[error("{reason}")]
    Forbidden { reason: String },

    /// Storage-layer failure. The raw text is kept for logs but is
    /// never exposed through [`GatehouseError::public_message`].
    #[error("database error: {0}")]
    Database(String),

    /// An invariant the system itself should guarantee was violated.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type GatehouseResult<T> = Result<T, GatehouseError>;

impl GatehouseError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }

    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal(reason.into())
    }

    /// Stable machine-readable code for the error category.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::NotFound { .. } => "not_found",
            Self::InvalidState { .. } => "invalid_state",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Conflict { .. } => "conflict",
            Self::Forbidden { .. } => "forbidden",
            Self::Database(_) | Self::Internal(_) => "internal",
        }
    }

    /// HTTP-like status for the error category.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } | Self::InvalidState { .. } => 400,
            Self::Unauthorized { .. } => 401,
            Self::Forbidden { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Message safe to return to clients. Store and invariant failures
    /// collapse to a generic message so internal text never leaks.
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "internal error".into(),
            other => other.to_string(),
        }
    }
}
