//! Membership domain model.
//!
//! A membership binds a global [`crate::models::user::User`] to a
//! project, with a status lifecycle. At most one membership exists
//! per (project, user) pair — the store's unique index is the final
//! arbiter under concurrency.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a project membership.
///
/// `Invited` rows are pre-seeded by the (external) invitation flow.
/// Registration transitions `Invited` into `Active`; `Suspended`
/// members cannot re-register their way back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipStatus {
    Invited,
    Active,
    Suspended,
}

/// The project⇄user join record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub status: MembershipStatus,
    /// Set only on the transition into `Active`.
    pub joined_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a membership row directly.
///
/// Used by the invitation/suspension flows (external to this core);
/// self-serve registration goes through the enrollment transaction
/// instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMembership {
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub status: MembershipStatus,
}
