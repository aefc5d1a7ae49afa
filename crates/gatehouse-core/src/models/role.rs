//! Role domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A project-scoped role. System roles are created at provisioning
/// time and are immutable through this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub is_system: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The three system roles provisioned for every project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultRole {
    Owner,
    Admin,
    Member,
}

impl DefaultRole {
    pub const ALL: [DefaultRole; 3] = [DefaultRole::Owner, DefaultRole::Admin, DefaultRole::Member];

    /// The role name as stored in the `role` table.
    pub const fn as_str(self) -> &'static str {
        match self {
            DefaultRole::Owner => "OWNER",
            DefaultRole::Admin => "ADMIN",
            DefaultRole::Member => "MEMBER",
        }
    }
}
