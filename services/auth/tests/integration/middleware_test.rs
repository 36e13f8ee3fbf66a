use axum::{Json, Router, middleware, routing::get};
use axum_test::TestServer;
use jsonwebtoken::{EncodingKey, Header, encode};

use equiptrack_auth::handlers::middleware::{ADMIN_ONLY, require_auth, require_role};
use equiptrack_auth::usecase::token::issue_access_token;
use equiptrack_auth_types::identity::Identity;
use equiptrack_auth_types::token::JwtClaims;
use equiptrack_domain::user::UserRole;

use crate::helpers::{TEST_ACCESS_SECRET, test_state, test_user};

async fn whoami(Identity(info): Identity) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "userId": info.user_id,
        "role": info.role.as_str(),
    }))
}

/// Routes layered exactly as the production router layers them, but with
/// handlers that never touch the database.
fn test_router() -> Router {
    let state = test_state();
    let admin = Router::new()
        .route("/admin/ping", get(whoami))
        .layer(middleware::from_fn(|req, next| {
            require_role(ADMIN_ONLY, req, next)
        }))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));
    Router::new()
        .route("/protected", get(whoami))
        .layer(middleware::from_fn_with_state(state, require_auth))
        .merge(admin)
}

fn expired_token() -> String {
    let claims = JwtClaims {
        sub: "1".to_owned(),
        email: "user1@example.com".to_owned(),
        role: "user".to_owned(),
        exp: 1_000_000,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_ACCESS_SECRET.as_bytes()),
    )
    .unwrap()
}

#[tokio::test]
async fn should_401_without_bearer_token() {
    let server = TestServer::new(test_router()).unwrap();

    let response = server.get("/protected").await;
    response.assert_status_unauthorized();
    assert_eq!(response.json::<serde_json::Value>()["kind"], "TOKEN_REQUIRED");
}

#[tokio::test]
async fn should_403_with_garbage_token() {
    let server = TestServer::new(test_router()).unwrap();

    let response = server
        .get("/protected")
        .authorization_bearer("not-a-jwt")
        .await;
    response.assert_status_forbidden();
    assert_eq!(response.json::<serde_json::Value>()["kind"], "INVALID_TOKEN");
}

#[tokio::test]
async fn should_403_with_expired_token() {
    let server = TestServer::new(test_router()).unwrap();

    let response = server
        .get("/protected")
        .authorization_bearer(expired_token())
        .await;
    response.assert_status_forbidden();
}

#[tokio::test]
async fn should_pass_identity_through_to_the_handler() {
    let user = test_user(7).await;
    let (token, _) = issue_access_token(&user, TEST_ACCESS_SECRET).unwrap();
    let server = TestServer::new(test_router()).unwrap();

    let response = server.get("/protected").authorization_bearer(token).await;
    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["userId"], 7);
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn should_403_non_admin_on_admin_routes() {
    let user = test_user(7).await;
    let (token, _) = issue_access_token(&user, TEST_ACCESS_SECRET).unwrap();
    let server = TestServer::new(test_router()).unwrap();

    let response = server.get("/admin/ping").authorization_bearer(token).await;
    response.assert_status_forbidden();
    assert_eq!(response.json::<serde_json::Value>()["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_admit_admin_on_admin_routes() {
    let mut admin = test_user(8).await;
    admin.role = UserRole::Admin;
    let (token, _) = issue_access_token(&admin, TEST_ACCESS_SECRET).unwrap();
    let server = TestServer::new(test_router()).unwrap();

    let response = server.get("/admin/ping").authorization_bearer(token).await;
    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["role"], "admin");
}
