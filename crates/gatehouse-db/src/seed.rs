//! Seed data for the global permission catalog.
//!
//! The catalog is shared by every project and seeded once; roles are
//! granted subsets of it at provisioning time. Seeding is idempotent
//! (upsert-by-key) so it can run on every boot.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;
use uuid::Uuid;

use crate::error::DbError;

/// The fixed permission catalog: `(key, description)` pairs.
pub const PERMISSION_CATALOG: &[(&str, &str)] = &[
    // Project
    ("project:read", "Read project details"),
    ("project:update", "Update project settings"),
    ("project:delete", "Delete project"),
    // Tasks
    ("task:create", "Create tasks"),
    ("task:read", "Read tasks"),
    ("task:update", "Update tasks"),
    ("task:delete", "Delete tasks"),
    // Users
    ("user:invite", "Invite users to project"),
    ("user:suspend", "Suspend project user"),
    ("user:remove", "Remove user from project"),
    // Roles & permissions
    ("role:create", "Create roles"),
    ("role:update", "Update roles"),
    ("role:assign", "Assign roles to users"),
    // Auth / config
    ("auth:configure", "Configure authentication settings"),
];

#[derive(Debug, SurrealValue)]
struct IdRow {
    #[allow(dead_code)]
    record_id: String,
}

/// Insert any catalog entries that do not exist yet.
///
/// Existing entries are left untouched, so descriptions edited out of
/// band survive a reseed.
pub async fn seed_permission_catalog<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    let mut created = 0usize;

    for (key, description) in PERMISSION_CATALOG {
        let mut result = db
            .query("SELECT meta::id(id) AS record_id FROM permission WHERE key = $key")
            .bind(("key", key.to_string()))
            .await?;
        let rows: Vec<IdRow> = result.take(0)?;

        if rows.is_empty() {
            db.query(
                "CREATE type::record('permission', $id) SET \
                 key = $key, description = $description",
            )
            .bind(("id", Uuid::new_v4().to_string()))
            .bind(("key", key.to_string()))
            .bind(("description", description.to_string()))
            .await?
            .check()
            .map_err(|e| DbError::Migration(format!("permission seed failed for {key}: {e}")))?;
            created += 1;
        }
    }

    info!(
        total = PERMISSION_CATALOG.len(),
        created, "Permission catalog seeded"
    );

    Ok(())
}
