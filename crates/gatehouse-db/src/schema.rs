//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation. Unique indexes are the final
//! arbiter of the core invariants (one user per email, one membership
//! per project/user pair, one role name per project) under
//! concurrent writers.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Projects (tenants, global scope)
-- =======================================================================
DEFINE TABLE project SCHEMAFULL;
DEFINE FIELD name ON TABLE project TYPE string;
DEFINE FIELD client_id ON TABLE project TYPE string;
DEFINE FIELD client_secret_hash ON TABLE project TYPE string;
DEFINE FIELD is_active ON TABLE project TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE project TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE project TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_project_name ON TABLE project COLUMNS name UNIQUE;
DEFINE INDEX idx_project_client_id ON TABLE project \
    COLUMNS client_id UNIQUE;

-- =======================================================================
-- Users (global scope, keyed by normalized email)
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Memberships (project scope, one row per project/user pair)
-- =======================================================================
DEFINE TABLE membership SCHEMAFULL;
DEFINE FIELD project_id ON TABLE membership TYPE string;
DEFINE FIELD user_id ON TABLE membership TYPE string;
DEFINE FIELD status ON TABLE membership TYPE string \
    ASSERT $value IN ['Invited', 'Active', 'Suspended'];
DEFINE FIELD joined_at ON TABLE membership TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE membership TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE membership TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_membership_project_user ON TABLE membership \
    COLUMNS project_id, user_id UNIQUE;

-- =======================================================================
-- Roles (project scope)
-- =======================================================================
DEFINE TABLE role SCHEMAFULL;
DEFINE FIELD project_id ON TABLE role TYPE string;
DEFINE FIELD name ON TABLE role TYPE string;
DEFINE FIELD is_system ON TABLE role TYPE bool DEFAULT false;
DEFINE FIELD created_at ON TABLE role TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE role TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_role_project_name ON TABLE role \
    COLUMNS project_id, name UNIQUE;

-- =======================================================================
-- Permissions (global catalog, seeded once)
-- =======================================================================
DEFINE TABLE permission SCHEMAFULL;
DEFINE FIELD key ON TABLE permission TYPE string;
DEFINE FIELD description ON TABLE permission TYPE string;
DEFINE FIELD created_at ON TABLE permission TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_permission_key ON TABLE permission COLUMNS key UNIQUE;

-- =======================================================================
-- Role -> Permission grants
-- =======================================================================
DEFINE TABLE role_permission SCHEMAFULL;
DEFINE FIELD role_id ON TABLE role_permission TYPE string;
DEFINE FIELD permission_id ON TABLE role_permission TYPE string;
DEFINE FIELD created_at ON TABLE role_permission TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_role_permission_pair ON TABLE role_permission \
    COLUMNS role_id, permission_id UNIQUE;

-- =======================================================================
-- Membership -> Role assignments
-- =======================================================================
DEFINE TABLE user_role SCHEMAFULL;
DEFINE FIELD membership_id ON TABLE user_role TYPE string;
DEFINE FIELD role_id ON TABLE user_role TYPE string;
DEFINE FIELD created_at ON TABLE user_role TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_role_pair ON TABLE user_role \
    COLUMNS membership_id, role_id UNIQUE;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}
