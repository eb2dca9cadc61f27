use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{
    ConflictCheckQuery, CreateAppointmentRequest, UpdateAppointmentRequest, UpdateStatusRequest,
};
use crate::api::dtos::responses::{BookingResponse, ConflictCheckResponse};
use crate::domain::models::appointment::{SOURCE_OWNER, STATUSES};
use crate::domain::models::appointment_type::DEFAULT_DURATION_MIN;
use crate::domain::services::scheduler::{validate_duration, BookingRequest};
use crate::domain::services::{overlap, timefmt};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.business_repo.find_by_id(&business_id).await?
        .ok_or_else(|| AppError::NotFound("Business not found".into()))?;

    let outcome = state.scheduler.book(BookingRequest {
        business_id,
        type_id: payload.type_id,
        title: payload.title,
        client_name: payload.client_name,
        client_email: payload.client_email,
        date: payload.date,
        time: payload.time,
        duration_min: payload.duration_min,
        location: payload.location,
        notes: payload.notes,
        source: SOURCE_OWNER.to_string(),
    }).await?;

    Ok(Json(BookingResponse {
        appointment: outcome.appointment,
        notifications: outcome.notifications,
    }))
}

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let appointments = match params.get("date") {
        Some(date_str) => {
            let date = timefmt::parse_date(date_str)?;
            state.appointment_repo.list_for_day(&business_id, date).await?
        }
        None => state.appointment_repo.list_by_business(&business_id).await?,
    };
    Ok(Json(appointments))
}

pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path((business_id, appointment_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = state.appointment_repo.find_by_id(&business_id, &appointment_id).await?
        .ok_or_else(|| AppError::NotFound("Appointment not found".into()))?;
    Ok(Json(appointment))
}

pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    Path((business_id, appointment_id)): Path<(String, String)>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut appointment = state.appointment_repo.find_by_id(&business_id, &appointment_id).await?
        .ok_or_else(|| AppError::NotFound("Appointment not found".into()))?;

    if let Some(type_id) = payload.type_id {
        if type_id.is_empty() {
            appointment.type_id = None;
        } else {
            // A re-typed appointment inherits the new type's duration and
            // location unless the request overrides them explicitly.
            let new_type = state.type_repo.find_active(&business_id, &type_id).await?
                .ok_or_else(|| AppError::NotFound("Appointment type not found or inactive".into()))?;
            if payload.duration_min.is_none() {
                appointment.duration_min = new_type.duration_min;
            }
            if payload.location.is_none() {
                appointment.location = new_type.location.clone();
            }
            appointment.type_id = Some(new_type.id);
        }
    }
    if let Some(title) = payload.title {
        appointment.title = title;
    }
    if let Some(name) = payload.client_name {
        appointment.client_name = name;
    }
    if let Some(email) = payload.client_email {
        appointment.client_email = if email.is_empty() { None } else { Some(email) };
    }
    if let Some(date_str) = payload.date {
        appointment.date = timefmt::parse_date(&date_str)?;
    }
    if let Some(time) = payload.time {
        appointment.time = timefmt::format_hm(timefmt::parse_strict(&time)?);
    }
    if let Some(duration) = payload.duration_min {
        appointment.duration_min = duration;
    }
    if let Some(location) = payload.location {
        appointment.location = location;
    }
    if let Some(notes) = payload.notes {
        appointment.notes = if notes.is_empty() { None } else { Some(notes) };
    }

    let updated = state.scheduler.reschedule(&appointment).await?;
    Ok(Json(updated))
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path((business_id, appointment_id)): Path<(String, String)>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = payload.status.to_uppercase();
    if !STATUSES.contains(&status.as_str()) {
        return Err(AppError::Validation(format!("Invalid status '{}'", payload.status)));
    }

    let updated = state.appointment_repo.set_status(&business_id, &appointment_id, &status).await?;
    info!("Appointment {} status set to {}", appointment_id, status);
    Ok(Json(updated))
}

pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    Path((business_id, appointment_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.appointment_repo.delete(&business_id, &appointment_id).await?;
    info!("Appointment deleted: {}", appointment_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

/// Best-effort pre-check for the owner calendar. The authoritative check
/// still runs inside the write transaction; a clean answer here can go stale
/// before the booking lands.
pub async fn conflict_check(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Query(params): Query<ConflictCheckQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = timefmt::parse_date(&params.date)?;
    let start_min = timefmt::parse_strict(&params.time)?;
    let duration_min = params.duration_min.unwrap_or(DEFAULT_DURATION_MIN);
    validate_duration(duration_min)?;

    let existing = state.appointment_repo.list_for_day(&business_id, date).await?;
    let conflict = overlap::find_conflict(&existing, start_min, duration_min, params.exclude.as_deref());

    Ok(Json(ConflictCheckResponse {
        available: conflict.is_none(),
        conflict_window: conflict.map(|other| {
            format!(
                "{} - {}",
                timefmt::format_human(other.start_min()),
                timefmt::format_human(other.end_min())
            )
        }),
    }))
}
