//! HTTP-level integration tests for the `/drivers` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_car, create_driver, create_manufacturer, delete_auth, get_auth, location,
    logged_in_driver, login, post_json_auth, put_json_auth,
};
use sqlx::PgPool;
use taxi_db::repositories::DriverRepo;

fn registration(username: &str, license: &str) -> serde_json::Value {
    serde_json::json!({
        "username": username,
        "password1": "correct-horse",
        "password2": "correct-horse",
        "license_number": license,
        "first_name": "New",
        "last_name": "Driver",
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_redirects_to_detail(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "alice", "ALI11111").await;

    let response =
        post_json_auth(app.clone(), "/drivers", registration("newbie", "NEW12345"), &token).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["license_number"], "NEW12345");
    assert_eq!(json["data"]["display"], "newbie (New Driver)");
    assert!(json["data"].get("password_hash").is_none());

    let response = get_auth(app.clone(), &format!("/drivers/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The new account can log in with the registered password.
    let body = serde_json::json!({ "username": "newbie", "password": "correct-horse" });
    let response = common::post_json(app, "/accounts/login", body).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_location_is_detail_page(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "bob", "BOB22222").await;

    let response = post_json_auth(app, "/drivers", registration("zed", "ZED12345"), &token).await;
    let id = DriverRepo::find_by_username(&pool, "zed").await.unwrap().unwrap().id;
    assert_eq!(location(&response), format!("/drivers/{id}"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_mismatched_passwords(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "carol", "CAR33333").await;

    let mut body = registration("mismatch", "MIS12345");
    body["password2"] = serde_json::json!("different-horse");
    let response = post_json_auth(app, "/drivers", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["fields"]["password2"][0],
        "The two password fields didn't match."
    );
    assert!(DriverRepo::find_by_username(&pool, "mismatch").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_license_persists_nothing(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "dave", "DAV44444").await;

    let response = post_json_auth(app, "/drivers", registration("copycat", "DAV44444"), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["fields"]["license_number"][0],
        "Driver with this License number already exists."
    );
    assert_eq!(DriverRepo::count(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_username(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "erin", "ERI55555").await;

    let response = post_json_auth(app, "/drivers", registration("erin", "ERI00000"), &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["fields"]["username"][0],
        "A user with that username already exists."
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_license_format_messages(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "frank", "FRA66666").await;

    let cases = [
        ("AB12345X", "License number format must be: \"ABC12345\""),
        ("ABC1234", "Your license number must be 8 characters long."),
        (
            "ABC-1234",
            "Your license number must contain digits and upper-case latin letters.",
        ),
    ];
    for (i, (license, message)) in cases.into_iter().enumerate() {
        let body = registration(&format!("user{i}"), license);
        let response = post_json_auth(app.clone(), "/drivers", body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "license {license}");
        let json = body_json(response).await;
        assert_eq!(json["fields"]["license_number"][0], message);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_license(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (me, token) = logged_in_driver(app.clone(), &pool, "gina", "GIN77777").await;
    let url = format!("/drivers/{me}/license");

    let body = serde_json::json!({ "license_number": "GIN00001", "username": "hijack" });
    let response = put_json_auth(app.clone(), &url, body, &token).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/drivers/{me}"));
    let json = body_json(response).await;
    assert_eq!(json["data"]["license_number"], "GIN00001");
    assert_eq!(json["data"]["username"], "gina");

    let body = serde_json::json!({ "license_number": "gin00001" });
    let response = put_json_auth(app.clone(), &url, body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({ "license_number": "GIN00002" });
    let response = put_json_auth(app, "/drivers/999999/license", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_license_to_taken_number(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (me, token) = logged_in_driver(app.clone(), &pool, "hank", "HAN88888").await;
    create_driver(&pool, "ivan", "IVA99999").await;

    let body = serde_json::json!({ "license_number": "IVA99999" });
    let response = put_json_auth(app, &format!("/drivers/{me}/license"), body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let driver = DriverRepo::find_by_id(&pool, me).await.unwrap().unwrap();
    assert_eq!(driver.license_number, "HAN88888");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_detail_lists_cars_with_manufacturer(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (me, token) = logged_in_driver(app.clone(), &pool, "judy", "JUD12345").await;
    let maker = create_manufacturer(app.clone(), &token, "Nissan", "Japan").await;
    create_car(app.clone(), &token, "Leaf", maker, &[me]).await;
    create_car(app.clone(), &token, "Micra", maker, &[]).await;

    let json = body_json(get_auth(app, &format!("/drivers/{me}"), &token).await).await;
    assert_eq!(json["data"]["username"], "judy");
    let cars = json["data"]["cars"].as_array().unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["model"], "Leaf");
    assert_eq!(cars[0]["manufacturer"]["name"], "Nissan");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_paginates_by_id(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "kate", "KAT12345").await;
    for (name, license) in [
        ("lee", "LEE12345"),
        ("max", "MAX12345"),
        ("ned", "NED12345"),
        ("oli", "OLI12345"),
        ("pat", "PAT12345"),
    ] {
        create_driver(&pool, name, license).await;
    }

    let json = body_json(get_auth(app.clone(), "/drivers", &token).await).await;
    assert_eq!(json["data"][0]["username"], "kate");
    assert_eq!(json["page"]["num_pages"], 2);

    let json = body_json(get_auth(app, "/drivers?page=2", &token).await).await;
    assert_eq!(json["data"][0]["username"], "pat");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_driver_keeps_cars_and_ends_sessions(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = logged_in_driver(app.clone(), &pool, "quinn", "QUI12345").await;
    let victim = create_driver(&pool, "rita", "RIT12345").await;
    let victim_token = login(app.clone(), "rita").await;
    let maker = create_manufacturer(app.clone(), &token, "Kia", "Korea").await;
    let car = create_car(app.clone(), &token, "Rio", maker, &[victim]).await;

    let response = delete_auth(app.clone(), &format!("/drivers/{victim}"), &token).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/drivers");

    let json = body_json(get_auth(app.clone(), &format!("/cars/{car}"), &token).await).await;
    assert_eq!(json["data"]["model"], "Rio");
    assert!(json["data"]["drivers"].as_array().unwrap().is_empty());

    let response = get_auth(app.clone(), "/", &victim_token).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = get_auth(app, &format!("/drivers/{victim}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
