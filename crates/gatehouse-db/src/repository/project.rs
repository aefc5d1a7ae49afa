//! SurrealDB implementation of [`ProjectRepository`].
//!
//! Project creation runs as one SurrealQL transaction covering the
//! project row, the three default roles, every permission grant, and
//! (optionally) the owner's membership — either all of it commits or
//! none of it does, so partial provisioning is never observable.

use chrono::{DateTime, Utc};
use gatehouse_core::error::GatehouseResult;
use gatehouse_core::models::project::{CreateProject, Project};
use gatehouse_core::provision::DefaultGrants;
use gatehouse_core::repository::ProjectRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::{DbError, script_error};

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct ProjectRow {
    name: String,
    client_id: String,
    client_secret_hash: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProjectRow {
    fn into_project(self, id: Uuid) -> Project {
        Project {
            id,
            name: self.name,
            client_id: self.client_id,
            client_secret_hash: self.client_secret_hash,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ProjectRowWithId {
    record_id: String,
    name: String,
    client_id: String,
    client_secret_hash: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProjectRowWithId {
    fn try_into_project(self) -> Result<Project, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(Project {
            id,
            name: self.name,
            client_id: self.client_id,
            client_secret_hash: self.client_secret_hash,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Transaction script for provisioning a project.
///
/// Re-selecting the roles after creation is a defensive consistency
/// check; if any of the three is missing the transaction cancels via
/// THROW and nothing commits. Grant id sets are computed by the
/// caller from the permission catalog, which is read-only seeded
/// data, so reading it outside the transaction is safe.
const PROVISION_SCRIPT: &str = "\
BEGIN TRANSACTION;

CREATE type::record('project', $project_id) SET
    name = $name,
    client_id = $client_id,
    client_secret_hash = $client_secret_hash,
    is_active = true;

CREATE type::record('role', $owner_role_id) SET
    project_id = $project_id, name = 'OWNER', is_system = true;
CREATE type::record('role', $admin_role_id) SET
    project_id = $project_id, name = 'ADMIN', is_system = true;
CREATE type::record('role', $member_role_id) SET
    project_id = $project_id, name = 'MEMBER', is_system = true;

LET $owner = (SELECT meta::id(id) AS record_id FROM role
    WHERE project_id = $project_id AND name = 'OWNER');
LET $admin = (SELECT meta::id(id) AS record_id FROM role
    WHERE project_id = $project_id AND name = 'ADMIN');
LET $member = (SELECT meta::id(id) AS record_id FROM role
    WHERE project_id = $project_id AND name = 'MEMBER');
IF array::len($owner) == 0 OR array::len($admin) == 0 OR array::len($member) == 0 {
    THROW 'gh:internal:Default roles not found';
};

FOR $pid IN $owner_grants {
    CREATE role_permission SET
        role_id = $owner_role_id, permission_id = $pid;
};
FOR $pid IN $admin_grants {
    CREATE role_permission SET
        role_id = $admin_role_id, permission_id = $pid;
};
FOR $pid IN $member_grants {
    CREATE role_permission SET
        role_id = $member_role_id, permission_id = $pid;
};

IF $owner_user_id != NONE {
    CREATE type::record('membership', $owner_membership_id) SET
        project_id = $project_id,
        user_id = $owner_user_id,
        status = 'Active',
        joined_at = time::now();
    CREATE type::record('user_role', $owner_user_role_id) SET
        membership_id = $owner_membership_id,
        role_id = $owner_role_id;
};

COMMIT TRANSACTION;
";

/// SurrealDB implementation of the Project repository.
#[derive(Clone)]
pub struct SurrealProjectRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealProjectRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ProjectRepository for SurrealProjectRepository<C> {
    async fn create_provisioned(
        &self,
        input: CreateProject,
        grants: DefaultGrants,
        owner_user_id: Option<Uuid>,
    ) -> GatehouseResult<Project> {
        let project_id = Uuid::new_v4();

        let to_strings = |ids: Vec<Uuid>| -> Vec<String> {
            ids.into_iter().map(|id| id.to_string()).collect()
        };

        let mut response = self
            .db
            .query(PROVISION_SCRIPT)
            .bind(("project_id", project_id.to_string()))
            .bind(("name", input.name))
            .bind(("client_id", input.client_id))
            .bind(("client_secret_hash", input.client_secret_hash))
            .bind(("owner_role_id", Uuid::new_v4().to_string()))
            .bind(("admin_role_id", Uuid::new_v4().to_string()))
            .bind(("member_role_id", Uuid::new_v4().to_string()))
            .bind(("owner_grants", to_strings(grants.owner)))
            .bind(("admin_grants", to_strings(grants.admin)))
            .bind(("member_grants", to_strings(grants.member)))
            .bind(("owner_user_id", owner_user_id.map(|id| id.to_string())))
            .bind(("owner_membership_id", Uuid::new_v4().to_string()))
            .bind(("owner_user_role_id", Uuid::new_v4().to_string()))
            .await
            .map_err(DbError::from)?;

        let errors = response.take_errors();
        if !errors.is_empty() {
            return Err(script_error(errors));
        }

        self.get_by_id(project_id).await
    }

    async fn get_by_id(&self, id: Uuid) -> GatehouseResult<Project> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('project', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProjectRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "Project".into(),
            key: id_str,
        })?;

        Ok(row.into_project(id))
    }

    async fn get_by_client_id(&self, client_id: &str) -> GatehouseResult<Project> {
        let client_id_owned = client_id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM project \
                 WHERE client_id = $client_id",
            )
            .bind(("client_id", client_id_owned))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProjectRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "Project".into(),
            key: client_id.to_string(),
        })?;

        Ok(row.try_into_project()?)
    }

    async fn get_by_name(&self, name: &str) -> GatehouseResult<Project> {
        let name_owned = name.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM project \
                 WHERE name = $name",
            )
            .bind(("name", name_owned))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ProjectRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "Project".into(),
            key: name.to_string(),
        })?;

        Ok(row.try_into_project()?)
    }
}
