//! Shared test helpers for router-level tests.
//!
//! [`TestApp::new`] connects the pool lazily, so paths that stop before
//! the database (rate limiting, header and charset checks) run without
//! Postgres. [`TestApp::with_database`] needs a live server.

#![allow(dead_code)]

use std::net::{IpAddr, SocketAddr};

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use coinhub_api::{AppState, build_router};
use coinhub_core::config::AppConfig;
use coinhub_database::DatabasePool;
use coinhub_database::migration::run_migrations;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for inspecting the in-memory stores
    pub state: AppState,
}

/// Response captured by [`TestApp::request`]
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// JSON body, or `Value::Null` when empty
    pub body: Value,
}

impl TestApp {
    /// Create a test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with the given configuration
    pub fn with_config(config: AppConfig) -> Self {
        let pool = DatabasePool::connect_lazy(&config.database)
            .expect("Failed to build lazy pool")
            .into_pool();
        let state = AppState::new(config, pool);
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Create a test application backed by a migrated Postgres database
    ///
    /// Reads the URL from `COINHUB_TEST_DATABASE_URL`, falling back to the
    /// default configuration. Rate limiting is off so a test can make as
    /// many calls as it needs from one address.
    pub async fn with_database() -> Self {
        let mut config = AppConfig::default();
        if let Ok(url) = std::env::var("COINHUB_TEST_DATABASE_URL") {
            config.database.url = url;
        }
        config.rate_limit.enabled = false;

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let state = AppState::new(config, db.into_pool());
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Register `username` and log in from `peer`, returning the token
    pub async fn login(&self, username: &str, password: &str, peer: IpAddr) -> String {
        let credentials = [("Username", username), ("Password", password)];

        let response = self
            .request("POST", "/api/client/register", &credentials, Some(peer))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "register {username}");

        let response = self
            .request("POST", "/api/client/login", &credentials, Some(peer))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "login {username}");

        response.body["data"]["token"]
            .as_str()
            .expect("Login response has no token")
            .to_string()
    }

    /// Send a request from `peer`, or with no peer address at all
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        headers: &[(&str, &str)],
        peer: Option<IpAddr>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        if let Some(ip) = peer {
            builder = builder.extension(ConnectInfo(SocketAddr::new(ip, 40000)));
        }
        let request = builder.body(Body::empty()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Body is not JSON")
        };

        TestResponse { status, body }
    }

    /// Send a request from a fixed loopback peer
    pub async fn send(&self, method: &str, uri: &str, headers: &[(&str, &str)]) -> TestResponse {
        self.request(method, uri, headers, Some(peer(1))).await
    }
}

/// A username no other test run has registered
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::new_v4().simple())
}

/// A distinct client address per `last` octet
pub fn peer(last: u8) -> IpAddr {
    IpAddr::from([127, 0, 0, last])
}
