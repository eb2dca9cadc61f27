use crate::domain::models::appointment::Appointment;
use crate::domain::models::appointment_type::AppointmentType;
use crate::domain::models::business::Business;
use crate::domain::models::notification::NotificationSummary;
use serde::Serialize;

#[derive(Serialize)]
pub struct SlotsResponse {
    pub date: String,
    pub duration_min: i32,
    pub slot_interval_min: i32,
    pub day_key: String,
    pub closed: bool,
    pub open_time: String,
    pub close_time: String,
    pub available_slots: Vec<String>,
}

#[derive(Serialize)]
pub struct BookingResponse {
    pub appointment: Appointment,
    pub notifications: NotificationSummary,
}

#[derive(Serialize)]
pub struct StorefrontResponse {
    pub business: Business,
    pub appointment_types: Vec<AppointmentType>,
    pub open_time: String,
    pub close_time: String,
    pub timezone: String,
}

#[derive(Serialize)]
pub struct ConflictCheckResponse {
    pub available: bool,
    pub conflict_window: Option<String>,
}
