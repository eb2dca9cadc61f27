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

fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn get(app: &TestApp, uri: &str) -> Response {
    app.router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_type_create_and_list() {
    let app = TestApp::new().await;
    let (business_id, _slug) = app.create_business("Glow Studio").await;

    let payload = json!({
        "name": "Consultation",
        "duration_min": 30,
        "location": "VIRTUAL",
        "description": "Intro call"
    });
    let res = app
        .router
        .clone()
        .oneshot(json_request("POST", &format!("/api/v1/{}/types", business_id), &payload))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["name"], "Consultation");
    assert_eq!(body["duration_min"], 30);
    assert_eq!(body["location"], "VIRTUAL");
    assert_eq!(body["active"], true);

    let res = get(&app, &format!("/api/v1/{}/types", business_id)).await;
    let body = parse_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_type_update_merges_fields() {
    let app = TestApp::new().await;
    let (business_id, _slug) = app.create_business("Glow Studio").await;
    let type_id = app.create_type(&business_id, "Consultation", 30).await;

    let res = app
        .router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/{}/types/{}", business_id, type_id),
            &json!({"duration_min": 60}),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["name"], "Consultation");
    assert_eq!(body["duration_min"], 60);
}

#[tokio::test]
async fn test_deactivated_type_hidden_but_kept() {
    let app = TestApp::new().await;
    let (business_id, slug) = app.create_business("Glow Studio").await;
    let type_id = app.create_type(&business_id, "Consultation", 30).await;

    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/{}/types/{}", business_id, type_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(get(&app, &format!("/api/v1/{}/types", business_id)).await).await;
    assert!(body.as_array().unwrap().is_empty());

    let body = parse_body(
        get(&app, &format!("/api/v1/{}/types?include_inactive=true", business_id)).await,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["active"], false);

    // The storefront never lists retired services.
    let body = parse_body(get(&app, &format!("/api/v1/public/{}", slug)).await).await;
    assert!(body["appointment_types"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_booking_with_inactive_type_is_not_found() {
    let app = TestApp::new().await;
    let (business_id, slug) = app.create_business("Glow Studio").await;
    let type_id = app.create_type(&business_id, "Consultation", 30).await;

    app.router
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/{}/types/{}", business_id, type_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let payload = json!({
        "type_id": type_id,
        "client_name": "Alice",
        "date": "2026-03-02",
        "time": "10:00"
    });
    let res = app
        .router
        .clone()
        .oneshot(json_request("POST", &format!("/api/v1/public/{}/book", slug), &payload))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_type_booking_inherits_duration_and_location() {
    let app = TestApp::new().await;
    let (business_id, slug) = app.create_business("Glow Studio").await;
    app.set_standard_hours(&business_id).await;
    let type_id = app.create_type(&business_id, "Deep Tissue", 90).await;

    let payload = json!({
        "type_id": type_id,
        "client_name": "Alice",
        "date": "2026-03-02",
        "time": "10:00"
    });
    let res = app
        .router
        .clone()
        .oneshot(json_request("POST", &format!("/api/v1/public/{}/book", slug), &payload))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["appointment"]["duration_min"], 90);
    assert_eq!(body["appointment"]["location"], "OFFICE");
    assert_eq!(body["appointment"]["title"], "Deep Tissue");
}

#[tokio::test]
async fn test_type_rejects_nonpositive_duration() {
    let app = TestApp::new().await;
    let (business_id, _slug) = app.create_business("Glow Studio").await;

    let payload = json!({"name": "Broken", "duration_min": 0, "location": "OFFICE"});
    let res = app
        .router
        .clone()
        .oneshot(json_request("POST", &format!("/api/v1/{}/types", business_id), &payload))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_type_rejects_unknown_location_mode() {
    let app = TestApp::new().await;
    let (business_id, _slug) = app.create_business("Glow Studio").await;

    let payload = json!({"name": "Broken", "duration_min": 30, "location": "MOON"});
    let res = app
        .router
        .clone()
        .oneshot(json_request("POST", &format!("/api/v1/{}/types", business_id), &payload))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
