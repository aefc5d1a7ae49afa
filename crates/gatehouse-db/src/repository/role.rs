//! SurrealDB implementation of [`RoleRepository`].
//!
//! Roles are only ever created through project provisioning; this
//! repository is read-only.

use chrono::{DateTime, Utc};
use gatehouse_core::error::GatehouseResult;
use gatehouse_core::models::role::Role;
use gatehouse_core::repository::RoleRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct RoleRowWithId {
    record_id: String,
    project_id: String,
    name: String,
    is_system: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RoleRowWithId {
    fn try_into_role(self) -> Result<Role, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let project_id = Uuid::parse_str(&self.project_id)
            .map_err(|e| DbError::Decode(format!("invalid project UUID: {e}")))?;
        Ok(Role {
            id,
            project_id,
            name: self.name,
            is_system: self.is_system,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Role repository.
#[derive(Clone)]
pub struct SurrealRoleRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealRoleRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> RoleRepository for SurrealRoleRepository<C> {
    async fn get_by_name(&self, project_id: Uuid, name: &str) -> GatehouseResult<Role> {
        let name_owned = name.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM role \
                 WHERE project_id = $project_id AND name = $name",
            )
            .bind(("project_id", project_id.to_string()))
            .bind(("name", name_owned))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RoleRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "Role".into(),
            key: format!("project={project_id},name={name}"),
        })?;

        Ok(row.try_into_role()?)
    }

    async fn list_by_project(&self, project_id: Uuid) -> GatehouseResult<Vec<Role>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM role \
                 WHERE project_id = $project_id \
                 ORDER BY name ASC",
            )
            .bind(("project_id", project_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<RoleRowWithId> = result.take(0).map_err(DbError::from)?;

        let roles = rows
            .into_iter()
            .map(|row| row.try_into_role())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(roles)
    }
}
