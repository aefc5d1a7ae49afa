//! SurrealDB implementation of [`MembershipRepository`].

use chrono::{DateTime, Utc};
use gatehouse_core::error::GatehouseResult;
use gatehouse_core::models::membership::{CreateMembership, Membership, MembershipStatus};
use gatehouse_core::repository::MembershipRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::{DbError, check_error};

pub(crate) fn parse_status(s: &str) -> Result<MembershipStatus, DbError> {
    match s {
        "Invited" => Ok(MembershipStatus::Invited),
        "Active" => Ok(MembershipStatus::Active),
        "Suspended" => Ok(MembershipStatus::Suspended),
        other => Err(DbError::Decode(format!(
            "unknown membership status: {other}"
        ))),
    }
}

pub(crate) fn status_to_string(s: MembershipStatus) -> &'static str {
    match s {
        MembershipStatus::Invited => "Invited",
        MembershipStatus::Active => "Active",
        MembershipStatus::Suspended => "Suspended",
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
pub(crate) struct MembershipRowWithId {
    record_id: String,
    project_id: String,
    user_id: String,
    status: String,
    joined_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MembershipRowWithId {
    pub(crate) fn try_into_membership(self) -> Result<Membership, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let project_id = Uuid::parse_str(&self.project_id)
            .map_err(|e| DbError::Decode(format!("invalid project UUID: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;
        Ok(Membership {
            id,
            project_id,
            user_id,
            status: parse_status(&self.status)?,
            joined_at: self.joined_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Membership repository.
#[derive(Clone)]
pub struct SurrealMembershipRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealMembershipRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> MembershipRepository for SurrealMembershipRepository<C> {
    async fn create(&self, input: CreateMembership) -> GatehouseResult<Membership> {
        let id = Uuid::new_v4();

        // joined_at is only ever set on the transition into Active.
        let query = if matches!(input.status, MembershipStatus::Active) {
            "CREATE type::record('membership', $id) SET \
             project_id = $project_id, user_id = $user_id, \
             status = $status, joined_at = time::now()"
        } else {
            "CREATE type::record('membership', $id) SET \
             project_id = $project_id, user_id = $user_id, \
             status = $status"
        };

        self.db
            .query(query)
            .bind(("id", id.to_string()))
            .bind(("project_id", input.project_id.to_string()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("status", status_to_string(input.status)))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(check_error)?;

        self.get(input.project_id, input.user_id).await
    }

    async fn get(&self, project_id: Uuid, user_id: Uuid) -> GatehouseResult<Membership> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM membership \
                 WHERE project_id = $project_id AND user_id = $user_id",
            )
            .bind(("project_id", project_id.to_string()))
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MembershipRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "Membership".into(),
            key: format!("project={project_id},user={user_id}"),
        })?;

        Ok(row.try_into_membership()?)
    }
}
