//! User domain model.
//!
//! Users are global, not tenant-scoped: one identity keyed by
//! normalized email may hold memberships in many projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A global user identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Normalized (trimmed, lowercased) email — the unique identity key.
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new user.
///
/// The email must already be normalized and the password already
/// hashed by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
