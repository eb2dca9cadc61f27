use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_DURATION_MIN: i32 = 45;

pub const LOCATION_OFFICE: &str = "OFFICE";
pub const LOCATION_VIRTUAL: &str = "VIRTUAL";
pub const LOCATION_PHONE: &str = "PHONE";
pub const LOCATION_HYBRID: &str = "HYBRID";

pub const LOCATION_MODES: [&str; 4] = [LOCATION_OFFICE, LOCATION_VIRTUAL, LOCATION_PHONE, LOCATION_HYBRID];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AppointmentType {
    pub id: String,
    pub business_id: String,
    pub name: String,
    pub duration_min: i32,
    pub price_cents: i32,
    pub location: String,
    pub color: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewTypeParams {
    pub business_id: String,
    pub name: String,
    pub duration_min: i32,
    pub price_cents: i32,
    pub location: String,
    pub color: String,
}

impl AppointmentType {
    pub fn new(params: NewTypeParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            business_id: params.business_id,
            name: params.name,
            duration_min: params.duration_min,
            price_cents: params.price_cents,
            location: params.location,
            color: params.color,
            active: true,
            created_at: Utc::now(),
        }
    }
}
