//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, logged_in_driver};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_entities_return_json_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "alice", "ALI11111").await;

    for path in ["/manufacturers/999999", "/cars/999999", "/drivers/999999"] {
        let response = get_auth(app.clone(), path, &token).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {path}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bad_page_parameter_is_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "bob", "BOB22222").await;

    for query in ["?page=0", "?page=2", "?page=abc"] {
        let response = get_auth(app.clone(), &format!("/drivers{query}"), &token).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "query {query}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_numeric_ids_return_json_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "carl", "CAR44444").await;

    for path in ["/manufacturers/abc", "/cars/1x", "/drivers/-", "/cars/abc/toggle-driver"] {
        let method_get = !path.ends_with("toggle-driver");
        let response = if method_get {
            get_auth(app.clone(), path, &token).await
        } else {
            common::post_auth(app.clone(), path, &token).await
        };
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cors_exposes_redirect_target_to_allowed_origin(pool: PgPool) {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let app = common::build_test_app(pool);
    let request = Request::builder()
        .uri("/health")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");
    let exposed = headers
        .get("access-control-expose-headers")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(exposed.contains("location"));
    assert!(exposed.contains("x-request-id"));
}
