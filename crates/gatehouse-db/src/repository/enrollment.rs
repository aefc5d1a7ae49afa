//! SurrealDB implementation of [`EnrollmentRepository`] — the
//! transactional write path of user registration.
//!
//! The whole flow (user resolve-or-create, membership state machine,
//! default-role check and assignment) runs as one SurrealQL
//! transaction; a THROW anywhere cancels all of it, so two concurrent
//! registrations for the same (project, email) can never produce
//! duplicate users or conflicting membership rows — the unique
//! indexes on `user.email` and `(project_id, user_id)` are the final
//! arbiter.

use gatehouse_core::error::GatehouseResult;
use gatehouse_core::repository::{
    Enrollment, EnrollmentRecord, EnrollmentRepository, MembershipRepository, UserRepository,
};
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::{DbError, script_error};
use crate::repository::membership::SurrealMembershipRepository;
use crate::repository::user::SurrealUserRepository;

/// The registration transaction.
///
/// State machine over the membership row:
/// - no row        → create with status Active, joined_at now
/// - Active        → THROW Conflict (not idempotent by design)
/// - Suspended     → THROW Forbidden
/// - Invited       → transition to Active, set joined_at
///
/// An existing user is returned unchanged — first registration wins,
/// name and password are never updated here. The MEMBER default role
/// must exist (a project created through a bypassing path fails as a
/// configuration error) and is assigned to the membership unless the
/// invitation flow already did so.
const ENROLL_SCRIPT: &str = "\
BEGIN TRANSACTION;

LET $existing_user = (SELECT meta::id(id) AS record_id FROM user
    WHERE email = $email);
IF array::len($existing_user) == 0 {
    CREATE type::record('user', $user_id) SET
        name = $name,
        email = $email,
        password_hash = $password_hash;
};
LET $uid = IF array::len($existing_user) > 0 {
    $existing_user[0].record_id
} ELSE {
    $user_id
};

LET $membership = (SELECT meta::id(id) AS record_id, status FROM membership
    WHERE project_id = $project_id AND user_id = $uid);

IF array::len($membership) > 0 AND $membership[0].status == 'Active' {
    THROW 'gh:conflict:User is already registered in the project';
};
IF array::len($membership) > 0 AND $membership[0].status == 'Suspended' {
    THROW 'gh:forbidden:User is suspended in the project';
};

LET $member_role = (SELECT meta::id(id) AS record_id FROM role
    WHERE project_id = $project_id AND name = 'MEMBER' AND is_system = true);
IF array::len($member_role) == 0 {
    THROW 'gh:internal:Default role MEMBER is not provisioned for the project';
};

IF array::len($membership) > 0 {
    UPDATE type::record('membership', $membership[0].record_id) SET
        status = 'Active',
        joined_at = time::now(),
        updated_at = time::now();
} ELSE {
    CREATE type::record('membership', $membership_id) SET
        project_id = $project_id,
        user_id = $uid,
        status = 'Active',
        joined_at = time::now();
};
LET $mid = IF array::len($membership) > 0 {
    $membership[0].record_id
} ELSE {
    $membership_id
};

LET $assigned = (SELECT meta::id(id) AS record_id FROM user_role
    WHERE membership_id = $mid AND role_id = $member_role[0].record_id);
IF array::len($assigned) == 0 {
    CREATE type::record('user_role', $user_role_id) SET
        membership_id = $mid,
        role_id = $member_role[0].record_id;
};

COMMIT TRANSACTION;
";

/// SurrealDB implementation of the Enrollment repository.
#[derive(Clone)]
pub struct SurrealEnrollmentRepository<C: Connection> {
    db: Surreal<C>,
    users: SurrealUserRepository<C>,
    memberships: SurrealMembershipRepository<C>,
}

impl<C: Connection> SurrealEnrollmentRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            users: SurrealUserRepository::new(db.clone()),
            memberships: SurrealMembershipRepository::new(db.clone()),
            db,
        }
    }
}

impl<C: Connection> EnrollmentRepository for SurrealEnrollmentRepository<C> {
    async fn enroll(&self, input: Enrollment) -> GatehouseResult<EnrollmentRecord> {
        let mut response = self
            .db
            .query(ENROLL_SCRIPT)
            .bind(("project_id", input.project_id.to_string()))
            .bind(("name", input.name))
            .bind(("email", input.email.clone()))
            .bind(("password_hash", input.password_hash))
            .bind(("user_id", Uuid::new_v4().to_string()))
            .bind(("membership_id", Uuid::new_v4().to_string()))
            .bind(("user_role_id", Uuid::new_v4().to_string()))
            .await
            .map_err(DbError::from)?;

        let errors = response.take_errors();
        if !errors.is_empty() {
            return Err(script_error(errors));
        }

        // The transaction committed; read back the result rows.
        // This read runs outside the transaction, so a status change
        // racing in right after commit shows up in the returned
        // record. The enrollment itself is already durable either
        // way, and callers treat the record as a snapshot.
        let user = self.users.get_by_email(&input.email).await?;
        let membership = self.memberships.get(input.project_id, user.id).await?;

        Ok(EnrollmentRecord { user, membership })
    }
}
