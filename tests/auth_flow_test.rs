//! Router-level tests for the register/login/session flow.
//!
//! These need Postgres. Run them with
//! `COINHUB_TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.

mod helpers;

use axum::http::StatusCode;

use helpers::{TestApp, peer, unique_username};

const PASSWORD: &str = "hunter2";

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_register_taken_username_is_conflict() {
    let app = TestApp::with_database().await;
    let username = unique_username("taken");
    let credentials = [("Username", username.as_str()), ("Password", PASSWORD)];

    let response = app.send("POST", "/api/client/register", &credentials).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app.send("POST", "/api/client/register", &credentials).await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_token_from_other_address_is_rejected_and_destroyed() {
    let app = TestApp::with_database().await;
    let username = unique_username("roamer");
    let token = app.login(&username, PASSWORD, peer(1)).await;
    let headers = [("Token", token.as_str()), ("Username", username.as_str())];

    let response = app
        .request("POST", "/api/group/create", &headers, Some(peer(2)))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // The failed check destroyed the session, so the owner is locked out too.
    let response = app
        .request("POST", "/api/group/create", &headers, Some(peer(1)))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(app.state.sessions.is_empty().await);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_token_presented_for_other_user_is_rejected() {
    let app = TestApp::with_database().await;
    let owner = unique_username("owner");
    let other = unique_username("other");
    let token = app.login(&owner, PASSWORD, peer(1)).await;
    app.login(&other, PASSWORD, peer(1)).await;

    let response = app
        .send(
            "POST",
            "/api/client/logout",
            &[("Token", token.as_str()), ("Username", other.as_str())],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .send(
            "POST",
            "/api/client/logout",
            &[("Token", token.as_str()), ("Username", owner.as_str())],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
