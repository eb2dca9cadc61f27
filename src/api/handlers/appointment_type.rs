use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateTypeRequest, UpdateTypeRequest};
use crate::domain::models::appointment_type::{
    AppointmentType, NewTypeParams, DEFAULT_DURATION_MIN, LOCATION_OFFICE,
};
use crate::domain::services::scheduler::{validate_duration, validate_location};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_type(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Json(payload): Json<CreateTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Type name is required".into()));
    }

    let duration_min = payload.duration_min.unwrap_or(DEFAULT_DURATION_MIN);
    validate_duration(duration_min)?;

    let location = payload.location.unwrap_or_else(|| LOCATION_OFFICE.to_string());
    validate_location(&location)?;

    state.business_repo.find_by_id(&business_id).await?
        .ok_or_else(|| AppError::NotFound("Business not found".into()))?;

    let appointment_type = AppointmentType::new(NewTypeParams {
        business_id,
        name: payload.name,
        duration_min,
        price_cents: payload.price_cents.unwrap_or(0),
        location,
        color: payload.color.unwrap_or_else(|| "#1a73e8".to_string()),
    });

    let created = state.type_repo.create(&appointment_type).await?;
    info!("Appointment type created: {}", created.id);
    Ok(Json(created))
}

pub async fn list_types(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let include_inactive = params
        .get("include_inactive")
        .is_some_and(|v| v == "true" || v == "1");
    let types = state.type_repo.list(&business_id, include_inactive).await?;
    Ok(Json(types))
}

pub async fn update_type(
    State(state): State<Arc<AppState>>,
    Path((business_id, type_id)): Path<(String, String)>,
    Json(payload): Json<UpdateTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut appointment_type = state.type_repo.find_by_id(&business_id, &type_id).await?
        .ok_or_else(|| AppError::NotFound("Appointment type not found".into()))?;

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Type name cannot be empty".into()));
        }
        appointment_type.name = name;
    }
    if let Some(duration) = payload.duration_min {
        validate_duration(duration)?;
        appointment_type.duration_min = duration;
    }
    if let Some(price) = payload.price_cents {
        appointment_type.price_cents = price;
    }
    if let Some(location) = payload.location {
        validate_location(&location)?;
        appointment_type.location = location;
    }
    if let Some(color) = payload.color {
        appointment_type.color = color;
    }
    if let Some(active) = payload.active {
        appointment_type.active = active;
    }

    let updated = state.type_repo.update(&appointment_type).await?;
    info!("Appointment type updated: {}", type_id);
    Ok(Json(updated))
}

/// Soft delete: the type drops out of future selection, rows stay.
pub async fn deactivate_type(
    State(state): State<Arc<AppState>>,
    Path((business_id, type_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.type_repo.deactivate(&business_id, &type_id).await?;
    info!("Appointment type deactivated: {}", type_id);
    Ok(Json(serde_json::json!({"status": "deactivated"})))
}
