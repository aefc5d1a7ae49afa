//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Implementations live in the
//! database crate; services depend only on these traits so tests can
//! substitute any store without touching global state.

use uuid::Uuid;

use crate::error::GatehouseResult;
use crate::models::{
    membership::{CreateMembership, Membership},
    permission::Permission,
    project::{CreateProject, Project},
    role::Role,
    user::{CreateUser, User},
};
use crate::provision::DefaultGrants;

// ---------------------------------------------------------------------------
// Projects (tenant directory + provisioning)
// ---------------------------------------------------------------------------

pub trait ProjectRepository: Send + Sync {
    /// Create a project together with its three default roles, all
    /// permission grants, and (when `owner_user_id` is given) the
    /// owner's active membership and OWNER role assignment — in one
    /// atomic transaction. Partial provisioning is never observable.
    fn create_provisioned(
        &self,
        input: CreateProject,
        grants: DefaultGrants,
        owner_user_id: Option<Uuid>,
    ) -> impl Future<Output = GatehouseResult<Project>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = GatehouseResult<Project>> + Send;

    /// Resolve a project by its public client id. Read-only; used by
    /// tenant authentication.
    fn get_by_client_id(
        &self,
        client_id: &str,
    ) -> impl Future<Output = GatehouseResult<Project>> + Send;

    fn get_by_name(&self, name: &str) -> impl Future<Output = GatehouseResult<Project>> + Send;
}

// ---------------------------------------------------------------------------
// Users (global identity store)
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = GatehouseResult<User>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = GatehouseResult<User>> + Send;

    /// Look up a user by normalized email. Callers are responsible
    /// for normalization — the repository matches exactly.
    fn get_by_email(&self, email: &str) -> impl Future<Output = GatehouseResult<User>> + Send;
}

// ---------------------------------------------------------------------------
// Memberships
// ---------------------------------------------------------------------------

pub trait MembershipRepository: Send + Sync {
    /// Create a membership row with an explicit status. Used by the
    /// (external) invitation and suspension flows and by tests;
    /// `joined_at` is set only when the status is `Active`.
    fn create(
        &self,
        input: CreateMembership,
    ) -> impl Future<Output = GatehouseResult<Membership>> + Send;

    fn get(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = GatehouseResult<Membership>> + Send;
}

// ---------------------------------------------------------------------------
// Roles & permissions
// ---------------------------------------------------------------------------

pub trait RoleRepository: Send + Sync {
    fn get_by_name(
        &self,
        project_id: Uuid,
        name: &str,
    ) -> impl Future<Output = GatehouseResult<Role>> + Send;

    fn list_by_project(
        &self,
        project_id: Uuid,
    ) -> impl Future<Output = GatehouseResult<Vec<Role>>> + Send;
}

pub trait PermissionRepository: Send + Sync {
    /// The full global permission catalog, ordered by key.
    fn list(&self) -> impl Future<Output = GatehouseResult<Vec<Permission>>> + Send;

    /// All permissions granted to a role.
    fn list_for_role(
        &self,
        role_id: Uuid,
    ) -> impl Future<Output = GatehouseResult<Vec<Permission>>> + Send;
}

// ---------------------------------------------------------------------------
// Enrollment (the registration write path)
// ---------------------------------------------------------------------------

/// Input to the enrollment transaction. The email must be normalized
/// and the password hashed before this is built — hashing is CPU-bound
/// and must not hold the store transaction open.
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub project_id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Result of a successful enrollment.
#[derive(Debug, Clone)]
pub struct EnrollmentRecord {
    pub user: User,
    pub membership: Membership,
}

pub trait EnrollmentRepository: Send + Sync {
    /// Run the registration write path in one atomic transaction:
    /// resolve or create the user, apply the membership state machine
    /// (absent → Active; Invited → Active; Active → Conflict;
    /// Suspended → Forbidden), confirm the MEMBER default role exists,
    /// and assign it to the membership. Any failure aborts everything.
    fn enroll(
        &self,
        input: Enrollment,
    ) -> impl Future<Output = GatehouseResult<EnrollmentRecord>> + Send;
}
