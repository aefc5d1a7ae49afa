//! SurrealDB repository implementations.

mod enrollment;
mod membership;
mod permission;
mod project;
mod role;
mod user;

pub use enrollment::SurrealEnrollmentRepository;
pub use membership::SurrealMembershipRepository;
pub use permission::SurrealPermissionRepository;
pub use project::SurrealProjectRepository;
pub use role::SurrealRoleRepository;
pub use user::SurrealUserRepository;
