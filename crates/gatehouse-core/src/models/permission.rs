//! Permission domain model.
//!
//! Permissions form a fixed global catalog shared by all projects —
//! they are seeded once and never tenant-scoped. Grants attach
//! catalog entries to project roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single catalog entry, e.g. `project:read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    pub id: Uuid,
    /// Globally unique `domain:action` key.
    pub key: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
