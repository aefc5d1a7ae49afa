//! Integration tests for the user, membership, and project
//! repositories using in-memory SurrealDB.

use gatehouse_core::error::GatehouseError;
use gatehouse_core::models::membership::{CreateMembership, MembershipStatus};
use gatehouse_core::models::user::CreateUser;
use gatehouse_core::repository::{MembershipRepository, ProjectRepository, UserRepository};
use gatehouse_db::repository::{
    SurrealMembershipRepository, SurrealProjectRepository, SurrealUserRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    gatehouse_db::run_migrations(&db).await.unwrap();
    db
}

#[tokio::test]
async fn create_and_get_user() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo
        .create(CreateUser {
            name: "Ann".into(),
            email: "ann@ex.com".into(),
            password_hash: "$argon2id$fake".into(),
        })
        .await
        .unwrap();

    assert_eq!(user.name, "Ann");
    assert_eq!(user.email, "ann@ex.com");

    let by_id = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(by_id.id, user.id);

    let by_email = repo.get_by_email("ann@ex.com").await.unwrap();
    assert_eq!(by_email.id, user.id);
    assert_eq!(by_email.password_hash, "$argon2id$fake");
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    let err = repo.get_by_email("ghost@ex.com").await.unwrap_err();
    assert!(matches!(err, GatehouseError::NotFound { .. }));
    assert_eq!(err.to_string(), "User not found");

    let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, GatehouseError::NotFound { .. }));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let db = setup().await;
    let repo = SurrealUserRepository::new(db);

    repo.create(CreateUser {
        name: "Ann".into(),
        email: "ann@ex.com".into(),
        password_hash: "h1".into(),
    })
    .await
    .unwrap();

    let err = repo
        .create(CreateUser {
            name: "Other Ann".into(),
            email: "ann@ex.com".into(),
            password_hash: "h2".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, GatehouseError::Conflict { .. }));
}

#[tokio::test]
async fn membership_lifecycle_fields() {
    let db = setup().await;
    let users = SurrealUserRepository::new(db.clone());
    let memberships = SurrealMembershipRepository::new(db);

    let user = users
        .create(CreateUser {
            name: "Bob".into(),
            email: "bob@ex.com".into(),
            password_hash: "h".into(),
        })
        .await
        .unwrap();
    let project_id = Uuid::new_v4();

    // Invited rows carry no joined_at.
    let invited = memberships
        .create(CreateMembership {
            project_id,
            user_id: user.id,
            status: MembershipStatus::Invited,
        })
        .await
        .unwrap();
    assert_eq!(invited.status, MembershipStatus::Invited);
    assert!(invited.joined_at.is_none());

    // Active rows in a different project get joined_at stamped.
    let other_project = Uuid::new_v4();
    let active = memberships
        .create(CreateMembership {
            project_id: other_project,
            user_id: user.id,
            status: MembershipStatus::Active,
        })
        .await
        .unwrap();
    assert_eq!(active.status, MembershipStatus::Active);
    assert!(active.joined_at.is_some());

    let fetched = memberships.get(project_id, user.id).await.unwrap();
    assert_eq!(fetched.id, invited.id);
}

#[tokio::test]
async fn duplicate_membership_pair_is_rejected() {
    let db = setup().await;
    let memberships = SurrealMembershipRepository::new(db);

    let project_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    memberships
        .create(CreateMembership {
            project_id,
            user_id,
            status: MembershipStatus::Invited,
        })
        .await
        .unwrap();

    let err = memberships
        .create(CreateMembership {
            project_id,
            user_id,
            status: MembershipStatus::Active,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, GatehouseError::Conflict { .. }));
}

#[tokio::test]
async fn missing_membership_is_not_found() {
    let db = setup().await;
    let memberships = SurrealMembershipRepository::new(db);

    let err = memberships
        .get(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, GatehouseError::NotFound { .. }));
    assert_eq!(err.to_string(), "Membership not found");
}

#[tokio::test]
async fn project_lookups() {
    let db = setup().await;
    let projects = SurrealProjectRepository::new(db);

    let err = projects.get_by_client_id("no-such-client").await.unwrap_err();
    assert!(matches!(err, GatehouseError::NotFound { .. }));
    assert_eq!(err.to_string(), "Project not found");

    let err = projects.get_by_name("no-such-project").await.unwrap_err();
    assert!(matches!(err, GatehouseError::NotFound { .. }));

    let err = projects.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, GatehouseError::NotFound { .. }));
}
