use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreateBusinessRequest;
use crate::domain::models::business::{slugify, Business};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_business(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBusinessRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Business name is required".into()));
    }

    let timezone = payload.timezone.unwrap_or_else(|| "UTC".to_string());
    if timezone.parse::<Tz>().is_err() {
        return Err(AppError::Validation("Invalid timezone".into()));
    }

    let base = slugify(payload.slug.as_deref().unwrap_or(&payload.name));
    if base.is_empty() {
        return Err(AppError::Validation("Slug cannot be empty".into()));
    }

    // Slug collisions get a numeric suffix; the slug is immutable afterwards.
    let mut slug = base.clone();
    let mut suffix = 2;
    while state.business_repo.find_by_slug(&slug).await?.is_some() {
        slug = format!("{}-{}", base, suffix);
        suffix += 1;
        if suffix > 50 {
            return Err(AppError::Conflict("Could not allocate a unique slug".into()));
        }
    }

    let business = Business::new(payload.name, slug, payload.owner_email, timezone);
    let created = state.business_repo.create(&business).await?;

    info!("Business created: {} ({})", created.id, created.slug);
    Ok(Json(created))
}

pub async fn get_business_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let business = state.business_repo.find_by_slug(&slug).await?
        .ok_or_else(|| AppError::NotFound(format!("Business '{}' not found", slug)))?;
    Ok(Json(business))
}
