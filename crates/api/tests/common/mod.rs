#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use taxi_api::auth::password::hash_password;
use taxi_api::auth::session::{SessionConfig, SessionStore};
use taxi_api::config::ServerConfig;
use taxi_api::router::build_app_router;
use taxi_api::state::AppState;
use taxi_core::license::LicenseNumber;
use taxi_core::types::DbId;
use taxi_db::models::driver::CreateDriver;
use taxi_db::repositories::DriverRepo;

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig {
            cookie_name: "sessionid".to_string(),
            cookie_secure: false,
            ttl_hours: 1,
        },
    }
}

/// Build the full application router, with the production middleware
/// stack, around the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        sessions: Arc::new(SessionStore::new(config.session.ttl())),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

/// Unauthenticated JSON POST.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// POST without a body.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Authenticated POST with a raw body and an optional `Content-Type`.
pub async fn post_raw_auth(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
    token: &str,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"));
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a driver whose password is [`TEST_PASSWORD`].
pub async fn create_driver(pool: &PgPool, username: &str, license: &str) -> DbId {
    let input = CreateDriver {
        username: username.to_string(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        first_name: "Test".to_string(),
        last_name: "Driver".to_string(),
        email: format!("{username}@test.com"),
        license_number: LicenseNumber::parse(license).unwrap(),
    };
    DriverRepo::create(pool, &input).await.unwrap().id
}

/// Log in through the API and return the session token.
pub async fn login(app: Router, username: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(app, "/accounts/login", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
    let json = body_json(response).await;
    json["data"]["token"].as_str().unwrap().to_string()
}

/// Create a driver and log them in. Returns `(driver_id, token)`.
pub async fn logged_in_driver(app: Router, pool: &PgPool, username: &str, license: &str) -> (DbId, String) {
    let id = create_driver(pool, username, license).await;
    let token = login(app, username).await;
    (id, token)
}

/// Create a manufacturer through the API and return its id.
pub async fn create_manufacturer(app: Router, token: &str, name: &str, country: &str) -> DbId {
    let body = serde_json::json!({ "name": name, "country": country });
    let response = post_json_auth(app, "/manufacturers", body, token).await;
    assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a car through the API and return its id.
pub async fn create_car(
    app: Router,
    token: &str,
    model: &str,
    manufacturer_id: DbId,
    drivers: &[DbId],
) -> DbId {
    let body = serde_json::json!({
        "model": model,
        "manufacturer_id": manufacturer_id,
        "drivers": drivers,
    });
    let response = post_json_auth(app, "/cars", body, token).await;
    assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}
