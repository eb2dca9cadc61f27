use crate::domain::models::{
    appointment::Appointment,
    appointment_type::AppointmentType,
    business::{Business, BusinessSettings},
    notification::NotifyReceipt,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait BusinessRepository: Send + Sync {
    async fn create(&self, business: &Business) -> Result<Business, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Business>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Business>, AppError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get(&self, business_id: &str) -> Result<Option<BusinessSettings>, AppError>;
    async fn upsert(&self, settings: &BusinessSettings) -> Result<BusinessSettings, AppError>;
}

#[async_trait]
pub trait AppointmentTypeRepository: Send + Sync {
    async fn create(&self, appointment_type: &AppointmentType) -> Result<AppointmentType, AppError>;
    async fn find_by_id(&self, business_id: &str, id: &str) -> Result<Option<AppointmentType>, AppError>;
    async fn find_active(&self, business_id: &str, id: &str) -> Result<Option<AppointmentType>, AppError>;
    async fn list(&self, business_id: &str, include_inactive: bool) -> Result<Vec<AppointmentType>, AppError>;
    async fn update(&self, appointment_type: &AppointmentType) -> Result<AppointmentType, AppError>;
    async fn deactivate(&self, business_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Every row for the day, all statuses, ordered by time. Filtering out
    /// cancelled rows is the scheduling core's job, not the store's.
    async fn list_for_day(&self, business_id: &str, date: NaiveDate) -> Result<Vec<Appointment>, AppError>;
    async fn list_by_business(&self, business_id: &str) -> Result<Vec<Appointment>, AppError>;
    async fn find_by_id(&self, business_id: &str, id: &str) -> Result<Option<Appointment>, AppError>;
    /// Inserts after re-checking the no-overlap invariant inside a write
    /// transaction serialized per (business, date).
    async fn create_serialized(&self, appointment: &Appointment) -> Result<Appointment, AppError>;
    /// Same as `create_serialized` for an existing row; the overlap re-check
    /// excludes the row itself.
    async fn update_serialized(&self, appointment: &Appointment) -> Result<Appointment, AppError>;
    async fn set_status(&self, business_id: &str, id: &str, status: &str) -> Result<Appointment, AppError>;
    async fn delete(&self, business_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        recipient: &str,
        kind: &str,
        appointment: &Appointment,
    ) -> Result<NotifyReceipt, AppError>;
}
