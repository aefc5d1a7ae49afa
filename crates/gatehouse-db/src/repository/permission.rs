//! SurrealDB implementation of [`PermissionRepository`].
//!
//! The catalog is global and read-only at runtime; creation happens
//! through seeding only.

use chrono::{DateTime, Utc};
use gatehouse_core::error::GatehouseResult;
use gatehouse_core::models::permission::Permission;
use gatehouse_core::repository::PermissionRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct PermissionRowWithId {
    record_id: String,
    key: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl PermissionRowWithId {
    fn try_into_permission(self) -> Result<Permission, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(Permission {
            id,
            key: self.key,
            description: self.description,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Permission repository.
#[derive(Clone)]
pub struct SurrealPermissionRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPermissionRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PermissionRepository for SurrealPermissionRepository<C> {
    async fn list(&self) -> GatehouseResult<Vec<Permission>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM permission \
                 ORDER BY key ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PermissionRowWithId> = result.take(0).map_err(DbError::from)?;

        let permissions = rows
            .into_iter()
            .map(|row| row.try_into_permission())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(permissions)
    }

    async fn list_for_role(&self, role_id: Uuid) -> GatehouseResult<Vec<Permission>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM permission \
                 WHERE meta::id(id) IN (\
                     SELECT VALUE permission_id FROM role_permission \
                     WHERE role_id = $role_id) \
                 ORDER BY key ASC",
            )
            .bind(("role_id", role_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PermissionRowWithId> = result.take(0).map_err(DbError::from)?;

        let permissions = rows
            .into_iter()
            .map(|row| row.try_into_permission())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(permissions)
    }
}
