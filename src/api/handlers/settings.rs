use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::UpdateSettingsRequest;
use crate::domain::models::business::BusinessSettings;
use crate::domain::services::{hours, timefmt};
use crate::error::AppError;
use crate::state::AppState;

async fn load_or_default(
    state: &AppState,
    business_id: &str,
) -> Result<BusinessSettings, AppError> {
    if let Some(settings) = state.settings_repo.get(business_id).await? {
        return Ok(settings);
    }

    let business = state.business_repo.find_by_id(business_id).await?
        .ok_or_else(|| AppError::NotFound("Business not found".into()))?;

    // Settings rows are created lazily on first read.
    state.settings_repo.upsert(&BusinessSettings::defaults_for(&business)).await
}

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let settings = load_or_default(&state, &business_id).await?;
    Ok(Json(settings))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut settings = load_or_default(&state, &business_id).await?;

    if let Some(name) = payload.business_name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Business name cannot be empty".into()));
        }
        settings.business_name = name;
    }
    if let Some(email) = payload.owner_email {
        settings.owner_email = if email.is_empty() { None } else { Some(email) };
    }
    if let Some(tz) = payload.timezone {
        if tz.parse::<Tz>().is_err() {
            return Err(AppError::Validation("Invalid timezone".into()));
        }
        settings.timezone = tz;
    }
    if let Some(open) = payload.open_time {
        timefmt::parse_strict(&open)?;
        settings.open_time = open;
    }
    if let Some(close) = payload.close_time {
        timefmt::parse_strict(&close)?;
        settings.close_time = close;
    }

    let open_min = timefmt::parse_strict(&settings.open_time)?;
    let close_min = timefmt::parse_strict(&settings.close_time)?;
    if close_min <= open_min {
        return Err(AppError::Validation("Close time must be after open time".into()));
    }

    if let Some(week) = payload.week_hours {
        hours::validate_week(&week)?;
        settings.week_hours_json = Some(
            serde_json::to_string(&week).map_err(|_| AppError::Validation("Invalid week hours".into()))?,
        );
    }
    if let Some(notify) = payload.notify_owner {
        settings.notify_owner = notify;
    }

    settings.updated_at = Utc::now();
    let updated = state.settings_repo.upsert(&settings).await?;

    info!("Settings updated for business {}", business_id);
    Ok(Json(updated))
}
