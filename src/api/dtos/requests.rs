use crate::domain::services::hours::WeekHours;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateBusinessRequest {
    pub name: String,
    pub slug: Option<String>,
    pub owner_email: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    pub business_name: Option<String>,
    pub owner_email: Option<String>,
    pub timezone: Option<String>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub week_hours: Option<WeekHours>,
    pub notify_owner: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateTypeRequest {
    pub name: String,
    pub duration_min: Option<i32>,
    pub price_cents: Option<i32>,
    pub location: Option<String>,
    pub color: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTypeRequest {
    pub name: Option<String>,
    pub duration_min: Option<i32>,
    pub price_cents: Option<i32>,
    pub location: Option<String>,
    pub color: Option<String>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    pub type_id: Option<String>,
    pub title: Option<String>,
    pub client_name: String,
    pub client_email: Option<String>,
    pub date: String,
    pub time: String,
    pub duration_min: Option<i32>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateAppointmentRequest {
    pub type_id: Option<String>,
    pub title: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub duration_min: Option<i32>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct PublicBookingRequest {
    pub type_id: Option<String>,
    pub client_name: String,
    pub client_email: Option<String>,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct ConflictCheckQuery {
    pub date: String,
    pub time: String,
    pub duration_min: Option<i32>,
    pub exclude: Option<String>,
}
