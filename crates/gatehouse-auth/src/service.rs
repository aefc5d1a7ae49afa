//! Authentication service — registration and login orchestration.

use gatehouse_core::error::{GatehouseError, GatehouseResult};
use gatehouse_core::models::membership::MembershipStatus;
use gatehouse_core::models::project::Project;
use gatehouse_core::repository::{
    Enrollment, EnrollmentRepository, MembershipRepository, ProjectRepository, UserRepository,
};
use tracing::info;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::validate;

/// Input for the registration flow.
#[derive(Debug)]
pub struct RegisterInput {
    pub client_id: String,
    pub client_secret: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Successful registration result.
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: Uuid,
    pub name: String,
    /// The normalized email the identity was stored under.
    pub email: String,
    pub project_id: Uuid,
    pub membership_status: MembershipStatus,
}

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub client_id: String,
    pub client_secret: String,
    pub email: String,
    pub password: String,
}

/// Successful login result.
///
/// Session issuance is not implemented yet; this carries the verified
/// identity a session would be minted for.
#[derive(Debug)]
pub struct LoginOutput {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub project_id: Uuid,
}

/// Authentication service.
///
/// Generic over repository implementations so that this layer has no
/// dependency on the database crate.
pub struct AuthService<P, U, M, E>
where
    P: ProjectRepository,
    U: UserRepository,
    M: MembershipRepository,
    E: EnrollmentRepository,
{
    projects: P,
    users: U,
    memberships: M,
    enrollments: E,
    config: AuthConfig,
}

impl<P, U, M, E> AuthService<P, U, M, E>
where
    P: ProjectRepository,
    U: UserRepository,
    M: MembershipRepository,
    E: EnrollmentRepository,
{
    pub fn new(projects: P, users: U, memberships: M, enrollments: E, config: AuthConfig) -> Self {
        Self {
            projects,
            users,
            memberships,
            enrollments,
            config,
        }
    }

    /// Register a user into the authenticated project.
    ///
    /// Validation runs before any store access; the write path
    /// (user resolve-or-create, membership state machine, default
    /// role assignment) is one atomic store transaction.
    pub async fn register(&self, input: RegisterInput) -> GatehouseResult<RegisterOutput> {
        // 1. Input shape, before touching the store.
        validate::validate_registration(
            &input.name,
            &input.email,
            &input.password,
            self.config.min_password_length,
        )?;
        let email = validate::normalize_email(&input.email);

        // 2. Authenticate the tenant.
        let project = self
            .authenticate_project(&input.client_id, &input.client_secret)
            .await?;

        // 3. Hash before the transaction — Argon2 is CPU-bound and
        //    must not hold it open.
        let password_hash =
            password::hash_password(&input.password, self.config.pepper.as_deref())?;

        // 4. The atomic write path.
        let record = self
            .enrollments
            .enroll(Enrollment {
                project_id: project.id,
                name: input.name,
                email,
                password_hash,
            })
            .await?;

        info!(
            user_id = %record.user.id,
            project_id = %project.id,
            status = ?record.membership.status,
            "User registered"
        );

        Ok(RegisterOutput {
            user_id: record.user.id,
            name: record.user.name,
            email: record.user.email,
            project_id: project.id,
            membership_status: record.membership.status,
        })
    }

    /// Authenticate a user against the authenticated project.
    ///
    /// Membership standing is enforced: only an `Active` membership
    /// may log in — absent, invited, and suspended memberships are
    /// all rejected before any session would be issued.
    pub async fn login(&self, input: LoginInput) -> GatehouseResult<LoginOutput> {
        validate::validate_login(&input.email, &input.password)?;
        let email = validate::normalize_email(&input.email);

        let project = self
            .authenticate_project(&input.client_id, &input.client_secret)
            .await?;

        let user = self.users.get_by_email(&email).await?;

        let valid =
            password::verify_password(&input.password, &user.password_hash, self.config.pepper.as_deref())?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        let membership = match self.memberships.get(project.id, user.id).await {
            Ok(m) => m,
            Err(GatehouseError::NotFound { .. }) => {
                return Err(GatehouseError::forbidden(
                    "User is not a member of the project",
                ));
            }
            Err(e) => return Err(e),
        };

        match membership.status {
            MembershipStatus::Active => {}
            MembershipStatus::Suspended => {
                return Err(GatehouseError::forbidden(
                    "User is suspended in the project",
                ));
            }
            MembershipStatus::Invited => {
                return Err(GatehouseError::forbidden(
                    "User has not accepted the project invitation",
                ));
            }
        }

        info!(user_id = %user.id, project_id = %project.id, "User logged in");

        Ok(LoginOutput {
            user_id: user.id,
            name: user.name,
            email: user.email,
            project_id: project.id,
        })
    }

    /// Contract placeholder — rotates a session once session issuance
    /// is implemented.
    pub async fn refresh_session(&self, _refresh_token: &str) -> GatehouseResult<()> {
        Err(GatehouseError::internal(
            "session issuance is not implemented",
        ))
    }

    /// Contract placeholder — invalidates a session once session
    /// issuance is implemented.
    pub async fn logout_user(&self, _session_id: Uuid) -> GatehouseResult<()> {
        Err(GatehouseError::internal(
            "session issuance is not implemented",
        ))
    }

    /// Resolve a project by client id and verify its credentials.
    ///
    /// Checks run in order: existence, active flag, secret. Read-only.
    async fn authenticate_project(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> GatehouseResult<Project> {
        let project = self.projects.get_by_client_id(client_id).await?;

        if !project.is_active {
            return Err(AuthError::ProjectInactive.into());
        }

        let valid = password::verify_password(
            client_secret,
            &project.client_secret_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            return Err(AuthError::InvalidClientSecret.into());
        }

        Ok(project)
    }
}
