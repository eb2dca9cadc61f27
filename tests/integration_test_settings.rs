mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(res: Response) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn put_settings(app: &TestApp, business_id: &str, payload: &Value) -> Response {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/v1/{}/settings", business_id))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_first_read_materializes_defaults() {
    let app = TestApp::new().await;
    let (business_id, _slug) = app.create_business("Glow Studio").await;

    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/{}/settings", business_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["open_time"], "09:00");
    assert_eq!(body["close_time"], "17:00");
    assert_eq!(body["business_id"], business_id);

    // The defaults are persisted, not recomputed per request.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM business_settings")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_week_validation_names_the_offending_day() {
    let app = TestApp::new().await;
    let (business_id, _slug) = app.create_business("Glow Studio").await;

    let payload = json!({
        "week_hours": {
            "tuesday": {"closed": false, "open_time": "09:00", "close_time": "08:00"}
        }
    });
    let res = put_settings(&app, &business_id, &payload).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert!(body["error"].as_str().unwrap().contains("TUE"));
}

#[tokio::test]
async fn test_global_window_must_be_ordered() {
    let app = TestApp::new().await;
    let (business_id, _slug) = app.create_business("Glow Studio").await;

    let res = put_settings(
        &app,
        &business_id,
        &json!({"open_time": "18:00", "close_time": "09:00"}),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_timezone_rejected() {
    let app = TestApp::new().await;
    let (business_id, _slug) = app.create_business("Glow Studio").await;

    let res = put_settings(&app, &business_id, &json!({"timezone": "Mars/Olympus_Mons"})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_settings_update_round_trips() {
    let app = TestApp::new().await;
    let (business_id, _slug) = app.create_business("Glow Studio").await;

    let payload = json!({
        "business_name": "Glow Studio Downtown",
        "timezone": "America/Chicago",
        "open_time": "08:00",
        "close_time": "16:00",
        "notify_owner": false
    });
    let res = put_settings(&app, &business_id, &payload).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["business_name"], "Glow Studio Downtown");
    assert_eq!(body["timezone"], "America/Chicago");
    assert_eq!(body["open_time"], "08:00");
    assert_eq!(body["close_time"], "16:00");
    assert_eq!(body["notify_owner"], false);

    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/{}/settings", business_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = parse_body(res).await;
    assert_eq!(body["open_time"], "08:00");
}

#[tokio::test]
async fn test_slug_collisions_get_numeric_suffix() {
    let app = TestApp::new().await;

    let (_, first_slug) = app.create_business("Acme Nails").await;
    let (_, second_slug) = app.create_business("Acme Nails").await;

    assert_eq!(first_slug, "acme-nails");
    assert_eq!(second_slug, "acme-nails-2");
}

#[tokio::test]
async fn test_business_lookup_by_slug() {
    let app = TestApp::new().await;
    let (business_id, slug) = app.create_business("Glow Studio").await;

    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/businesses/by-slug/{}", slug))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["id"], business_id);
    assert_eq!(body["name"], "Glow Studio");
}

#[tokio::test]
async fn test_business_requires_a_name() {
    let app = TestApp::new().await;

    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/businesses")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"name": "   "}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
