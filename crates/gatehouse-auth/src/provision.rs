//! Project provisioning service.
//!
//! Creates a tenant: generates its client credentials, computes the
//! default role grant sets from the permission catalog, and hands the
//! whole batch to the repository's single provisioning transaction.

use gatehouse_core::error::{GatehouseError, GatehouseResult};
use gatehouse_core::models::project::{CreateProject, Project};
use gatehouse_core::models::role::{DefaultRole, Role};
use gatehouse_core::provision::default_grants;
use gatehouse_core::repository::{PermissionRepository, ProjectRepository, RoleRepository};
use tracing::info;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::password;

/// Input for project creation.
#[derive(Debug)]
pub struct CreateProjectInput {
    pub name: String,
    /// When given, the user receives an Active membership and the
    /// OWNER role inside the provisioning transaction.
    pub owner_user_id: Option<Uuid>,
}

/// Successful provisioning result.
///
/// `client_id` and `client_secret` are the raw credentials — the
/// secret is shown exactly once here and only its digest is stored.
#[derive(Debug)]
pub struct CreateProjectOutput {
    pub project: Project,
    pub client_id: String,
    pub client_secret: String,
}

/// Project provisioning service.
pub struct ProjectService<P, R, Perm>
where
    P: ProjectRepository,
    R: RoleRepository,
    Perm: PermissionRepository,
{
    projects: P,
    roles: R,
    permissions: Perm,
    config: AuthConfig,
}

impl<P, R, Perm> ProjectService<P, R, Perm>
where
    P: ProjectRepository,
    R: RoleRepository,
    Perm: PermissionRepository,
{
    pub fn new(projects: P, roles: R, permissions: Perm, config: AuthConfig) -> Self {
        Self {
            projects,
            roles,
            permissions,
            config,
        }
    }

    /// Create and provision a project.
    ///
    /// The name pre-check gives a clean Conflict message in the
    /// common case; the store's unique index is the final arbiter
    /// under concurrent creation.
    pub async fn create_project(
        &self,
        input: CreateProjectInput,
    ) -> GatehouseResult<CreateProjectOutput> {
        let name = input.name.trim().to_string();

        if name.is_empty() {
            return Err(GatehouseError::validation("Project name is required"));
        }
        if name.chars().count() < self.config.min_project_name_length {
            return Err(GatehouseError::validation(format!(
                "Project name must be at least {} characters long",
                self.config.min_project_name_length
            )));
        }

        match self.projects.get_by_name(&name).await {
            Ok(_) => {
                return Err(GatehouseError::conflict("Project name already exists"));
            }
            Err(GatehouseError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let client_id = Uuid::new_v4().to_string();
        let client_secret = Uuid::new_v4().to_string();
        // Hash outside the provisioning transaction.
        let client_secret_hash =
            password::hash_password(&client_secret, self.config.pepper.as_deref())?;

        let catalog = self.permissions.list().await?;
        let grants = default_grants(&catalog);

        let project = self
            .projects
            .create_provisioned(
                CreateProject {
                    name,
                    client_id: client_id.clone(),
                    client_secret_hash,
                },
                grants,
                input.owner_user_id,
            )
            .await?;

        info!(project_id = %project.id, name = %project.name, "Project provisioned");

        Ok(CreateProjectOutput {
            project,
            client_id,
            client_secret,
        })
    }

    /// Assert that a default role exists for a project.
    ///
    /// A missing default role means the project was created before
    /// provisioning existed or through a bypassing path — that is a
    /// configuration error, not a client error.
    pub async fn require_default_role(
        &self,
        project_id: Uuid,
        role: DefaultRole,
    ) -> GatehouseResult<Role> {
        match self.roles.get_by_name(project_id, role.as_str()).await {
            Ok(r) => Ok(r),
            Err(GatehouseError::NotFound { .. }) => Err(GatehouseError::internal(format!(
                "Default role {} is not provisioned for project {project_id}",
                role.as_str()
            ))),
            Err(e) => Err(e),
        }
    }
}
