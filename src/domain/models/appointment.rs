use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::services::timefmt;

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_CONFIRMED: &str = "CONFIRMED";
pub const STATUS_COMPLETED: &str = "COMPLETED";
pub const STATUS_CANCELLED: &str = "CANCELLED";

pub const STATUSES: [&str; 4] = [STATUS_PENDING, STATUS_CONFIRMED, STATUS_COMPLETED, STATUS_CANCELLED];

pub const SOURCE_OWNER: &str = "OWNER";
pub const SOURCE_PUBLIC: &str = "PUBLIC";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Appointment {
    pub id: String,
    pub business_id: String,
    pub type_id: Option<String>,
    pub title: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub duration_min: i32,
    pub location: String,
    pub notes: Option<String>,
    pub status: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewAppointmentParams {
    pub business_id: String,
    pub type_id: Option<String>,
    pub title: String,
    pub client_name: String,
    pub client_email: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub duration_min: i32,
    pub location: String,
    pub notes: Option<String>,
    pub source: String,
}

impl Appointment {
    pub fn new(params: NewAppointmentParams) -> Self {
        // Owner-created rows are confirmed on the spot; public self-bookings
        // start pending until the owner acts on them.
        let status = if params.source == SOURCE_PUBLIC {
            STATUS_PENDING
        } else {
            STATUS_CONFIRMED
        };

        Self {
            id: Uuid::new_v4().to_string(),
            business_id: params.business_id,
            type_id: params.type_id,
            title: params.title,
            client_name: params.client_name,
            client_email: params.client_email,
            date: params.date,
            time: params.time,
            duration_min: params.duration_min,
            location: params.location,
            notes: params.notes,
            status: status.to_string(),
            source: params.source,
            created_at: Utc::now(),
        }
    }

    /// Start of the appointment in minutes from midnight. Stored rows with a
    /// mangled time column degrade to the default instead of failing a listing.
    pub fn start_min(&self) -> i32 {
        timefmt::parse_lenient(&self.time, timefmt::DEFAULT_START_MIN)
    }

    pub fn end_min(&self) -> i32 {
        self.start_min().saturating_add(self.duration_min)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == STATUS_CANCELLED
    }
}
