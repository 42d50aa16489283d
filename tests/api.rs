//! HTTP-level tests: the full router over the in-memory storage.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use restaurant_system::config::{AppConfig, Config, DatabaseConfig};
use restaurant_system::storage::MemoryStorage;
use restaurant_system::{app, AppState};

fn test_app() -> Router {
    let config = Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            rust_log: "warn".to_string(),
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            pool_size: 1,
        },
    };
    let state = Arc::new(AppState {
        storage: Arc::new(MemoryStorage::new()),
        config,
    });
    app(state)
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_table(app: &Router, name: &str, capacity: i64) -> i64 {
    let (status, body) = request(
        app,
        "POST",
        "/tables",
        Some(json!({ "data": { "table_name": name, "capacity": capacity } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["table_id"].as_i64().unwrap()
}

async fn create_reservation(app: &Router, people: i64) -> i64 {
    let (status, body) = request(
        app,
        "POST",
        "/reservations",
        Some(json!({ "data": { "people": people } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "booked");
    body["data"]["reservation_id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_works() {
    let app = test_app();
    let (status, _) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn create_table_returns_created_and_lists_it() {
    let app = test_app();
    let (status, body) = request(
        &app,
        "POST",
        "/tables",
        Some(json!({ "data": { "table_name": "Bar #1", "capacity": 4 } })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["table_name"], "Bar #1");
    assert_eq!(body["data"]["capacity"], 4);
    assert!(body["data"]["reservation_id"].is_null());

    let (status, body) = request(&app, "GET", "/tables", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_table_validation_errors_carry_status_and_message() {
    let app = test_app();

    // table_name отсутствует
    let (status, body) = request(
        &app,
        "POST",
        "/tables",
        Some(json!({ "data": { "capacity": 4 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["message"].as_str().unwrap().contains("table_name"));

    // table_name короче 2 символов
    let (status, _) = request(
        &app,
        "POST",
        "/tables",
        Some(json!({ "data": { "table_name": "A", "capacity": 4 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Дробная вместимость
    let (status, body) = request(
        &app,
        "POST",
        "/tables",
        Some(json!({ "data": { "table_name": "Bar #1", "capacity": 2.5 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("capacity"));

    // Пустой конверт
    let (status, _) = request(&app, "POST", "/tables", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn seat_requires_reservation_id_in_body() {
    let app = test_app();
    let table_id = create_table(&app, "Bar #1", 4).await;

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/tables/{}/seat", table_id),
        Some(json!({ "data": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("reservation_id"));
}

#[tokio::test]
async fn seat_unknown_reservation_or_table_is_404() {
    let app = test_app();
    let table_id = create_table(&app, "Bar #1", 4).await;

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/tables/{}/seat", table_id),
        Some(json!({ "data": { "reservation_id": 999 } })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);

    let reservation_id = create_reservation(&app, 2).await;
    let (status, _) = request(
        &app,
        "PUT",
        "/tables/999/seat",
        Some(json!({ "data": { "reservation_id": reservation_id } })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn seat_rejects_oversized_party_and_occupied_table() {
    let app = test_app();
    let table_id = create_table(&app, "Bar #1", 4).await;

    // Компания больше вместимости
    let big_party = create_reservation(&app, 5).await;
    let (status, body) = request(
        &app,
        "PUT",
        &format!("/tables/{}/seat", table_id),
        Some(json!({ "data": { "reservation_id": big_party } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("capacity"));

    // Стол уже занят второй бронью
    let first = create_reservation(&app, 2).await;
    let second = create_reservation(&app, 2).await;
    let (status, _) = request(
        &app,
        "PUT",
        &format!("/tables/{}/seat", table_id),
        Some(json!({ "data": { "reservation_id": first } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/tables/{}/seat", table_id),
        Some(json!({ "data": { "reservation_id": second } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("occupied"));
}

#[tokio::test]
async fn seat_rejects_already_seated_reservation() {
    let app = test_app();
    let first_table = create_table(&app, "Bar #1", 4).await;
    let second_table = create_table(&app, "Bar #2", 4).await;
    let reservation_id = create_reservation(&app, 2).await;

    let (status, _) = request(
        &app,
        "PUT",
        &format!("/tables/{}/seat", first_table),
        Some(json!({ "data": { "reservation_id": reservation_id } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/tables/{}/seat", second_table),
        Some(json!({ "data": { "reservation_id": reservation_id } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("seated"));
}

#[tokio::test]
async fn full_seat_finish_cycle() {
    let app = test_app();
    let table_id = create_table(&app, "Bar #1", 4).await;
    let reservation_id = create_reservation(&app, 4).await;

    // Посадка: оба объекта в одном ответе
    let (status, body) = request(
        &app,
        "PUT",
        &format!("/tables/{}/seat", table_id),
        Some(json!({ "data": { "reservation_id": reservation_id } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"]["table"]["reservation_id"].as_i64(),
        Some(reservation_id)
    );
    assert_eq!(body["data"]["reservation"]["status"], "seated");

    // Завершение
    let (status, body) = request(
        &app,
        "DELETE",
        &format!("/tables/{}/seat", table_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["table"]["reservation_id"].is_null());
    assert_eq!(body["data"]["reservation"]["status"], "finished");

    // Повторное завершение - конфликт, не тихий успех
    let (status, body) = request(
        &app,
        "DELETE",
        &format!("/tables/{}/seat", table_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("not occupied"));
}

#[tokio::test]
async fn finish_free_table_is_conflict_unknown_table_is_404() {
    let app = test_app();
    let table_id = create_table(&app, "Bar #1", 4).await;

    let (status, body) = request(
        &app,
        "DELETE",
        &format!("/tables/{}/seat", table_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, _) = request(&app, "DELETE", "/tables/999/seat", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reservations_crud() {
    let app = test_app();
    let reservation_id = create_reservation(&app, 3).await;

    let (status, body) = request(
        &app,
        "GET",
        &format!("/reservations/{}", reservation_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["people"], 3);

    let (status, _) = request(&app, "GET", "/reservations/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = request(
        &app,
        "POST",
        "/reservations",
        Some(json!({ "data": { "people": 0 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("people"));
}
