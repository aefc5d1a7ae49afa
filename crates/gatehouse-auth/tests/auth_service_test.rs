//! End-to-end tests for the authentication service against in-memory
//! SurrealDB.

use gatehouse_auth::config::AuthConfig;
use gatehouse_auth::provision::{CreateProjectInput, ProjectService};
use gatehouse_auth::service::{AuthService, LoginInput, RegisterInput};
use gatehouse_core::error::GatehouseError;
use gatehouse_core::models::membership::{CreateMembership, MembershipStatus};
use gatehouse_core::repository::MembershipRepository;
use gatehouse_db::repository::{
    SurrealEnrollmentRepository, SurrealMembershipRepository, SurrealPermissionRepository,
    SurrealProjectRepository, SurrealRoleRepository, SurrealUserRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

type Db = surrealdb::engine::local::Db;

type TestAuthService = AuthService<
    SurrealProjectRepository<Db>,
    SurrealUserRepository<Db>,
    SurrealMembershipRepository<Db>,
    SurrealEnrollmentRepository<Db>,
>;

/// Helper: in-memory DB, migrations, seeded catalog, one provisioned
/// project, and a wired-up auth service. Returns the raw tenant
/// credentials alongside.
async fn setup() -> (Surreal<Db>, TestAuthService, String, String) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    gatehouse_db::run_migrations(&db).await.unwrap();
    gatehouse_db::seed_permission_catalog(&db).await.unwrap();

    let projects = ProjectService::new(
        SurrealProjectRepository::new(db.clone()),
        SurrealRoleRepository::new(db.clone()),
        SurrealPermissionRepository::new(db.clone()),
        AuthConfig::default(),
    );
    let created = projects
        .create_project(CreateProjectInput {
            name: "Acme".into(),
            owner_user_id: None,
        })
        .await
        .unwrap();

    let auth = AuthService::new(
        SurrealProjectRepository::new(db.clone()),
        SurrealUserRepository::new(db.clone()),
        SurrealMembershipRepository::new(db.clone()),
        SurrealEnrollmentRepository::new(db.clone()),
        AuthConfig::default(),
    );

    (db, auth, created.client_id, created.client_secret)
}

fn register_input(client_id: &str, client_secret: &str, email: &str) -> RegisterInput {
    RegisterInput {
        client_id: client_id.into(),
        client_secret: client_secret.into(),
        name: "Ann".into(),
        email: email.into(),
        password: "correct horse".into(),
    }
}

#[tokio::test]
async fn register_normalizes_email_and_activates_membership() {
    let (_db, auth, client_id, client_secret) = setup().await;

    let out = auth
        .register(register_input(&client_id, &client_secret, "  ANN@EX.com "))
        .await
        .unwrap();

    assert_eq!(out.email, "ann@ex.com");
    assert_eq!(out.membership_status, MembershipStatus::Active);
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let (_db, auth, client_id, client_secret) = setup().await;

    auth.register(register_input(&client_id, &client_secret, "ann@ex.com"))
        .await
        .unwrap();

    // Same identity in a different casing.
    let err = auth
        .register(register_input(&client_id, &client_secret, "ANN@EX.COM"))
        .await
        .unwrap_err();

    assert!(matches!(err, GatehouseError::Conflict { .. }));
    assert_eq!(
        err.to_string(),
        "User is already registered in the project"
    );
}

#[tokio::test]
async fn validation_runs_before_any_store_access() {
    let (_db, auth, client_id, _) = setup().await;

    // The client secret is wrong, but the empty name fails first.
    let mut input = register_input(&client_id, "wrong-secret", "ann@ex.com");
    input.name = "".into();
    let err = auth.register(input).await.unwrap_err();
    assert!(matches!(err, GatehouseError::Validation { .. }));
    assert_eq!(err.to_string(), "All fields are required");

    let err = auth
        .register(register_input(&client_id, "wrong-secret", "not-an-email"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid email format");

    let mut input = register_input(&client_id, "wrong-secret", "ann@ex.com");
    input.password = "short".into();
    let err = auth.register(input).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Password must be at least 8 characters long"
    );
}

#[tokio::test]
async fn unknown_client_id_is_not_found() {
    let (_db, auth, _, client_secret) = setup().await;

    let err = auth
        .register(register_input("no-such-client", &client_secret, "a@ex.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, GatehouseError::NotFound { .. }));
    assert_eq!(err.to_string(), "Project not found");
}

#[tokio::test]
async fn wrong_client_secret_is_unauthorized() {
    let (_db, auth, client_id, _) = setup().await;

    let err = auth
        .register(register_input(&client_id, "wrong-secret", "a@ex.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, GatehouseError::Unauthorized { .. }));
    assert_eq!(err.to_string(), "Invalid client secret");
}

#[tokio::test]
async fn inactive_project_rejects_all_authentication() {
    let (db, auth, client_id, client_secret) = setup().await;

    db.query("UPDATE project SET is_active = false")
        .await
        .unwrap()
        .check()
        .unwrap();

    let err = auth
        .register(register_input(&client_id, &client_secret, "a@ex.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, GatehouseError::InvalidState { .. }));
    assert_eq!(err.to_string(), "Project is not active");
}

#[tokio::test]
async fn login_round_trip() {
    let (_db, auth, client_id, client_secret) = setup().await;

    let registered = auth
        .register(register_input(&client_id, &client_secret, "ann@ex.com"))
        .await
        .unwrap();

    let out = auth
        .login(LoginInput {
            client_id: client_id.clone(),
            client_secret: client_secret.clone(),
            email: "ANN@EX.com".into(),
            password: "correct horse".into(),
        })
        .await
        .unwrap();

    assert_eq!(out.user_id, registered.user_id);
    assert_eq!(out.email, "ann@ex.com");
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let (_db, auth, client_id, client_secret) = setup().await;

    auth.register(register_input(&client_id, &client_secret, "ann@ex.com"))
        .await
        .unwrap();

    let err = auth
        .login(LoginInput {
            client_id,
            client_secret,
            email: "ann@ex.com".into(),
            password: "wrong horse".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, GatehouseError::Unauthorized { .. }));
}

#[tokio::test]
async fn login_rejects_unknown_email() {
    let (_db, auth, client_id, client_secret) = setup().await;

    let err = auth
        .login(LoginInput {
            client_id,
            client_secret,
            email: "ghost@ex.com".into(),
            password: "correct horse".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, GatehouseError::NotFound { .. }));
}

#[tokio::test]
async fn login_rejects_suspended_membership() {
    let (db, auth, client_id, client_secret) = setup().await;

    auth.register(register_input(&client_id, &client_secret, "ann@ex.com"))
        .await
        .unwrap();

    db.query("UPDATE membership SET status = 'Suspended'")
        .await
        .unwrap()
        .check()
        .unwrap();

    let err = auth
        .login(LoginInput {
            client_id,
            client_secret,
            email: "ann@ex.com".into(),
            password: "correct horse".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, GatehouseError::Forbidden { .. }));
    assert_eq!(err.to_string(), "User is suspended in the project");
}

#[tokio::test]
async fn login_rejects_invited_membership() {
    let (db, auth, client_id, client_secret) = setup().await;

    // Register to create the global identity, then invite it into a
    // second project without accepting.
    let registered = auth
        .register(register_input(&client_id, &client_secret, "ann@ex.com"))
        .await
        .unwrap();

    let projects = ProjectService::new(
        SurrealProjectRepository::new(db.clone()),
        SurrealRoleRepository::new(db.clone()),
        SurrealPermissionRepository::new(db.clone()),
        AuthConfig::default(),
    );
    let other = projects
        .create_project(CreateProjectInput {
            name: "Globex".into(),
            owner_user_id: None,
        })
        .await
        .unwrap();

    let memberships = SurrealMembershipRepository::new(db.clone());
    memberships
        .create(CreateMembership {
            project_id: other.project.id,
            user_id: registered.user_id,
            status: MembershipStatus::Invited,
        })
        .await
        .unwrap();

    let err = auth
        .login(LoginInput {
            client_id: other.client_id,
            client_secret: other.client_secret,
            email: "ann@ex.com".into(),
            password: "correct horse".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, GatehouseError::Forbidden { .. }));
    assert_eq!(
        err.to_string(),
        "User has not accepted the project invitation"
    );
}

#[tokio::test]
async fn login_requires_a_membership_in_the_project() {
    let (db, auth, client_id, client_secret) = setup().await;

    auth.register(register_input(&client_id, &client_secret, "ann@ex.com"))
        .await
        .unwrap();

    // The identity exists globally but has no membership here.
    let projects = ProjectService::new(
        SurrealProjectRepository::new(db.clone()),
        SurrealRoleRepository::new(db.clone()),
        SurrealPermissionRepository::new(db.clone()),
        AuthConfig::default(),
    );
    let other = projects
        .create_project(CreateProjectInput {
            name: "Globex".into(),
            owner_user_id: None,
        })
        .await
        .unwrap();

    let err = auth
        .login(LoginInput {
            client_id: other.client_id,
            client_secret: other.client_secret,
            email: "ann@ex.com".into(),
            password: "correct horse".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, GatehouseError::Forbidden { .. }));
    assert_eq!(err.to_string(), "User is not a member of the project");
}

#[tokio::test]
async fn session_operations_are_not_implemented() {
    let (_db, auth, _, _) = setup().await;

    let err = auth.refresh_session("some-token").await.unwrap_err();
    assert!(matches!(err, GatehouseError::Internal(_)));

    let err = auth.logout_user(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, GatehouseError::Internal(_)));
}
