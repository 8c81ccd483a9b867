mod test_utils;

use std::sync::Arc;

use chrono::Duration;
use test_utils::TestDb;

use photowall_backend::{
    auth::session::SessionStore,
    entities::admin::Credentials,
    errors::AppError,
    repositories::sqlx_repo::SqlxAdminRepo,
    use_cases::auth::SessionAuthority,
};

fn authority(db: &TestDb) -> SessionAuthority<SqlxAdminRepo> {
    SessionAuthority::new(
        SqlxAdminRepo::new(db.pool.clone()),
        Arc::new(SessionStore::new(Duration::minutes(30), Duration::hours(12))),
    )
}

fn credentials(username: &str, password: &str) -> Credentials {
    Credentials {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[actix_rt::test]
async fn login_issues_a_token_that_authorizes() {
    let db = TestDb::spawn().await;
    let admin_id = db.create_admin("alice", "hunter2hunter2").await;
    let auth = authority(&db);

    let token = auth.login(credentials("alice", "hunter2hunter2")).await.unwrap();
    assert_eq!(token.len(), 48);
    assert_eq!(auth.authorize(&token).unwrap(), admin_id);
}

#[actix_rt::test]
async fn wrong_password_and_unknown_user_fail_identically() {
    let db = TestDb::spawn().await;
    db.create_admin("alice", "hunter2hunter2").await;
    let auth = authority(&db);

    let wrong_password = auth
        .login(credentials("alice", "wrong"))
        .await
        .unwrap_err();
    let unknown_user = auth
        .login(credentials("nobody", "hunter2hunter2"))
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(unknown_user, AppError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[actix_rt::test]
async fn logout_invalidates_the_token() {
    let db = TestDb::spawn().await;
    db.create_admin("alice", "hunter2hunter2").await;
    let auth = authority(&db);

    let token = auth.login(credentials("alice", "hunter2hunter2")).await.unwrap();
    auth.logout(&token);

    let err = auth.authorize(&token).unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    // Logging out again is a no-op, not an error.
    auth.logout(&token);
}

#[actix_rt::test]
async fn unknown_token_is_unauthorized() {
    let db = TestDb::spawn().await;
    let auth = authority(&db);

    let err = auth.authorize("not-a-real-token").unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
}

#[actix_rt::test]
async fn each_login_gets_a_distinct_token() {
    let db = TestDb::spawn().await;
    db.create_admin("alice", "hunter2hunter2").await;
    let auth = authority(&db);

    let first = auth.login(credentials("alice", "hunter2hunter2")).await.unwrap();
    let second = auth.login(credentials("alice", "hunter2hunter2")).await.unwrap();
    assert_ne!(first, second);

    // Both sessions stay valid independently.
    auth.logout(&first);
    assert!(auth.authorize(&second).is_ok());
}

#[actix_rt::test]
async fn duplicate_username_is_a_conflict() {
    let db = TestDb::spawn().await;
    db.create_admin("alice", "hunter2hunter2").await;

    use photowall_backend::repositories::admin::AdminRepository;
    let repo = SqlxAdminRepo::new(db.pool.clone());
    let err = repo.create_admin("alice", "another-hash").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}
