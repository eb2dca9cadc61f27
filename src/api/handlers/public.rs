use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::dtos::requests::PublicBookingRequest;
use crate::api::dtos::responses::{BookingResponse, SlotsResponse, StorefrontResponse};
use crate::domain::models::appointment::SOURCE_PUBLIC;
use crate::domain::models::appointment_type::DEFAULT_DURATION_MIN;
use crate::domain::models::business::Business;
use crate::domain::services::availability::{calculate_slots, SLOT_INTERVAL_MIN};
use crate::domain::services::scheduler::{validate_duration, BookingRequest};
use crate::domain::services::{hours, timefmt};
use crate::error::AppError;
use crate::state::AppState;

async fn business_by_slug(state: &AppState, slug: &str) -> Result<Business, AppError> {
    state.business_repo.find_by_slug(slug).await?
        .ok_or_else(|| AppError::NotFound(format!("Business '{}' not found", slug)))
}

pub async fn get_storefront(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let business = business_by_slug(&state, &slug).await?;
    let appointment_types = state.type_repo.list(&business.id, false).await?;
    let settings = state.settings_repo.get(&business.id).await?;

    let (open_time, close_time, timezone) = match settings {
        Some(s) => (s.open_time, s.close_time, s.timezone),
        None => ("09:00".to_string(), "17:00".to_string(), business.timezone.clone()),
    };

    Ok(Json(StorefrontResponse {
        business,
        appointment_types,
        open_time,
        close_time,
        timezone,
    }))
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let business = business_by_slug(&state, &slug).await?;

    let date_str = params.get("date").ok_or(AppError::Validation("Date required".into()))?;
    let date = timefmt::parse_date(date_str)?;

    let duration_min = match params.get("type_id") {
        Some(type_id) => {
            state.type_repo.find_active(&business.id, type_id).await?
                .ok_or_else(|| AppError::NotFound("Appointment type not found or inactive".into()))?
                .duration_min
        }
        None => match params.get("duration") {
            Some(raw) => raw.parse::<i32>()
                .map_err(|_| AppError::Validation("Invalid duration".into()))?,
            None => DEFAULT_DURATION_MIN,
        },
    };
    validate_duration(duration_min)?;

    let settings = state.settings_repo.get(&business.id).await?;
    let day = hours::resolve_day_or_default(settings.as_ref(), date);

    let available_slots = if day.closed {
        Vec::new()
    } else {
        let existing = state.appointment_repo.list_for_day(&business.id, date).await?;
        calculate_slots(day.open_min, day.close_min, duration_min, &existing)?
    };

    Ok(Json(SlotsResponse {
        date: date_str.to_string(),
        duration_min,
        slot_interval_min: SLOT_INTERVAL_MIN,
        day_key: day.day_key.to_string(),
        closed: day.closed,
        open_time: timefmt::format_hm(day.open_min),
        close_time: timefmt::format_hm(day.close_min),
        available_slots,
    }))
}

pub async fn create_public_booking(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(payload): Json<PublicBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let business = business_by_slug(&state, &slug).await?;

    let outcome = state.scheduler.book(BookingRequest {
        business_id: business.id,
        type_id: payload.type_id,
        title: None,
        client_name: payload.client_name,
        client_email: payload.client_email,
        date: payload.date,
        time: payload.time,
        duration_min: None,
        location: None,
        notes: payload.notes,
        source: SOURCE_PUBLIC.to_string(),
    }).await?;

    Ok(Json(BookingResponse {
        appointment: outcome.appointment,
        notifications: outcome.notifications,
    }))
}
