//! HTTP-level integration tests for the `/manufacturers` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_car, create_manufacturer, delete_auth, get_auth, location,
    logged_in_driver, post_json_auth, put_json_auth,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_redirects_to_list(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "alice", "ALI11111").await;

    let body = serde_json::json!({ "name": " Toyota ", "country": "Japan" });
    let response = post_json_auth(app.clone(), "/manufacturers", body, &token).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/manufacturers");
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Toyota");
    let id = json["data"]["id"].as_i64().unwrap();

    let json = body_json(get_auth(app, &format!("/manufacturers/{id}"), &token).await).await;
    assert_eq!(json["data"]["country"], "Japan");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_blank_fields_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "bob", "BOB22222").await;

    let body = serde_json::json!({ "name": "   " });
    let response = post_json_auth(app, "/manufacturers", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["name"][0], "This field is required.");
    assert_eq!(json["fields"]["country"][0], "This field is required.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_name_is_a_field_error(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "carol", "CAR33333").await;
    create_manufacturer(app.clone(), &token, "Honda", "Japan").await;

    let body = serde_json::json!({ "name": "Honda", "country": "USA" });
    let response = post_json_auth(app, "/manufacturers", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["fields"]["name"][0],
        "Manufacturer with this Name already exists."
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_and_missing_update(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "dave", "DAV44444").await;
    let id = create_manufacturer(app.clone(), &token, "Fiat", "Italy").await;

    let body = serde_json::json!({ "name": "Fiat", "country": "Italia" });
    let response = put_json_auth(app.clone(), &format!("/manufacturers/{id}"), body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(body_json(response).await["data"]["country"], "Italia");

    let response = put_json_auth(app, "/manufacturers/999999", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_pagination_of_six(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "erin", "ERI55555").await;
    for name in ["Audi", "BMW", "Fiat", "Kia", "Mazda", "Volvo"] {
        create_manufacturer(app.clone(), &token, name, "Somewhere").await;
    }

    let json = body_json(get_auth(app.clone(), "/manufacturers", &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 5);
    assert_eq!(json["data"][0]["name"], "Audi");
    assert_eq!(json["page"]["number"], 1);
    assert_eq!(json["page"]["num_pages"], 2);
    assert_eq!(json["page"]["count"], 6);
    assert_eq!(json["page"]["has_next"], true);

    let json = body_json(get_auth(app.clone(), "/manufacturers?page=2", &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["name"], "Volvo");
    assert_eq!(json["page"]["has_previous"], true);

    let response = get_auth(app.clone(), "/manufacturers?page=3", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(get_auth(app, "/manufacturers?page=last", &token).await).await;
    assert_eq!(json["page"]["number"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_list_is_one_empty_page(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "gina", "GIN77777").await;

    let json = body_json(get_auth(app, "/manufacturers", &token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
    assert_eq!(json["page"]["num_pages"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_cascades_to_cars(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "hank", "HAN88888").await;
    let id = create_manufacturer(app.clone(), &token, "Lada", "Russia").await;
    let car = create_car(app.clone(), &token, "Niva", id, &[]).await;

    let response = delete_auth(app.clone(), &format!("/manufacturers/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/manufacturers");

    let response = get_auth(app.clone(), &format!("/cars/{car}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &format!("/manufacturers/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
