//! Project domain model.
//!
//! A project is an isolated tenant scope. External applications
//! authenticate as a project with a client id/secret pair; every
//! role and membership in the system is scoped to one project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant of the identity layer.
///
/// Projects are never deleted by this core; deactivation
/// (`is_active = false`) is an external admin action and blocks all
/// tenant authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    /// Globally unique, human-readable name.
    pub name: String,
    /// Public credential identifier presented by client applications.
    pub client_id: String,
    /// Digest of the client secret. The raw secret is shown exactly
    /// once, at provisioning time.
    pub client_secret_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new project record.
///
/// Credential generation and secret hashing happen in the service
/// layer; the repository only ever sees the digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub client_id: String,
    pub client_secret_hash: String,
}
