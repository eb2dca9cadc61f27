use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;

use crate::api::handlers::{appointment, appointment_type, business, health, public, settings};
use crate::state::AppState;
use tower_http::{
    classify::ServerErrorsFailureClass,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Businesses
        .route("/api/v1/businesses", post(business::create_business))
        .route("/api/v1/businesses/by-slug/{slug}", get(business::get_business_by_slug))

        // Settings
        .route("/api/v1/{business_id}/settings", get(settings::get_settings).put(settings::update_settings))

        // Appointment types
        .route("/api/v1/{business_id}/types", get(appointment_type::list_types).post(appointment_type::create_type))
        .route("/api/v1/{business_id}/types/{type_id}", delete(appointment_type::deactivate_type).put(appointment_type::update_type))

        // Owner calendar
        .route("/api/v1/{business_id}/appointments", get(appointment::list_appointments).post(appointment::create_appointment))
        .route("/api/v1/{business_id}/appointments/conflict-check", get(appointment::conflict_check))
        .route("/api/v1/{business_id}/appointments/{appointment_id}", get(appointment::get_appointment).put(appointment::update_appointment).delete(appointment::delete_appointment))
        .route("/api/v1/{business_id}/appointments/{appointment_id}/status", patch(appointment::update_status))

        // Public booking flow
        .route("/api/v1/public/{slug}", get(public::get_storefront))
        .route("/api/v1/public/{slug}/slots", get(public::get_slots))
        .route("/api/v1/public/{slug}/book", post(public::create_public_booking))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        business_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
