use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::models::appointment::{
    Appointment, NewAppointmentParams, SOURCE_PUBLIC, STATUS_CONFIRMED,
};
use crate::domain::models::appointment_type::{
    AppointmentType, DEFAULT_DURATION_MIN, LOCATION_MODES, LOCATION_OFFICE,
};
use crate::domain::models::business::BusinessSettings;
use crate::domain::models::notification::{
    NotificationSummary, KIND_CONFIRMATION, KIND_PENDING,
};
use crate::domain::ports::{
    AppointmentRepository, AppointmentTypeRepository, Notifier, SettingsRepository,
};
use crate::domain::services::{hours, timefmt};
use crate::error::AppError;

/// One full day; durations beyond this are nonsense for a day-scoped grid.
pub const MAX_DURATION_MIN: i32 = 1440;

pub const MAX_TITLE_LEN: usize = 500;
pub const MAX_CLIENT_NAME_LEN: usize = 200;
pub const MAX_CLIENT_EMAIL_LEN: usize = 320;
pub const MAX_NOTES_LEN: usize = 5000;

pub struct BookingRequest {
    pub business_id: String,
    pub type_id: Option<String>,
    pub title: Option<String>,
    pub client_name: String,
    pub client_email: Option<String>,
    pub date: String,
    pub time: String,
    pub duration_min: Option<i32>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub source: String,
}

pub struct BookingOutcome {
    pub appointment: Appointment,
    pub notifications: NotificationSummary,
}

/// The transactional appointment writer. Validation and type resolution run
/// up front with no storage writes; the overlap re-check and the row write
/// happen together inside the repository's serialized transaction; the
/// notification fan-out runs after commit and can only degrade the summary.
pub struct Scheduler {
    appointments: Arc<dyn AppointmentRepository>,
    types: Arc<dyn AppointmentTypeRepository>,
    settings: Arc<dyn SettingsRepository>,
    notifier: Arc<dyn Notifier>,
}

impl Scheduler {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        types: Arc<dyn AppointmentTypeRepository>,
        settings: Arc<dyn SettingsRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            appointments,
            types,
            settings,
            notifier,
        }
    }

    pub async fn book(&self, request: BookingRequest) -> Result<BookingOutcome, AppError> {
        validate_client_fields(
            &request.client_name,
            request.client_email.as_deref(),
            request.title.as_deref(),
            request.notes.as_deref(),
        )?;

        let date = timefmt::parse_date(&request.date)?;
        let start_min = timefmt::parse_strict(&request.time)?;

        let resolved_type = match &request.type_id {
            Some(type_id) => Some(
                self.types
                    .find_active(&request.business_id, type_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound("Appointment type not found or inactive".into())
                    })?,
            ),
            None => None,
        };

        let duration_min = effective_duration(request.duration_min, resolved_type.as_ref())?;
        let location = effective_location(request.location.as_deref(), resolved_type.as_ref())?;
        let title = request.title.clone().unwrap_or_else(|| {
            resolved_type
                .as_ref()
                .map(|t| t.name.clone())
                .unwrap_or_else(|| "Appointment".to_string())
        });

        let settings = self.settings.get(&request.business_id).await?;

        // Public bookings are bounded by the business-hours window; owners
        // may book outside it from their own calendar.
        if request.source == SOURCE_PUBLIC {
            let day = hours::resolve_day_or_default(settings.as_ref(), date);
            if day.closed {
                return Err(AppError::Validation(format!(
                    "Business is closed on {}",
                    day.day_key
                )));
            }
            if start_min < day.open_min || start_min + duration_min > day.close_min {
                return Err(AppError::Validation(format!(
                    "Requested time is outside business hours ({} - {})",
                    timefmt::format_hm(day.open_min),
                    timefmt::format_hm(day.close_min)
                )));
            }
        }

        let appointment = Appointment::new(NewAppointmentParams {
            business_id: request.business_id,
            type_id: request.type_id,
            title,
            client_name: request.client_name.trim().to_string(),
            client_email: request.client_email,
            date,
            time: timefmt::format_hm(start_min),
            duration_min,
            location,
            notes: request.notes,
            source: request.source,
        });

        let created = self.appointments.create_serialized(&appointment).await?;
        info!(
            appointment_id = %created.id,
            business_id = %created.business_id,
            date = %created.date,
            time = %created.time,
            "appointment booked"
        );

        let notifications = self.dispatch(&created, settings.as_ref()).await;

        Ok(BookingOutcome {
            appointment: created,
            notifications,
        })
    }

    /// Re-validates a merged row and writes it under the same serialization
    /// as a create; the overlap re-check excludes the row's own id.
    pub async fn reschedule(&self, appointment: &Appointment) -> Result<Appointment, AppError> {
        validate_client_fields(
            &appointment.client_name,
            appointment.client_email.as_deref(),
            Some(&appointment.title),
            appointment.notes.as_deref(),
        )?;
        timefmt::parse_strict(&appointment.time)?;
        validate_duration(appointment.duration_min)?;
        validate_location(&appointment.location)?;

        let updated = self.appointments.update_serialized(appointment).await?;
        info!(
            appointment_id = %updated.id,
            date = %updated.date,
            time = %updated.time,
            "appointment rescheduled"
        );
        Ok(updated)
    }

    async fn dispatch(
        &self,
        appointment: &Appointment,
        settings: Option<&BusinessSettings>,
    ) -> NotificationSummary {
        let mode = if appointment.status == STATUS_CONFIRMED {
            KIND_CONFIRMATION
        } else {
            KIND_PENDING
        };
        let mut summary = NotificationSummary::new(mode);

        let mut targets: Vec<String> = Vec::new();
        if let Some(email) = &appointment.client_email {
            if !email.is_empty() {
                targets.push(email.clone());
            }
        }
        if let Some(s) = settings {
            if s.notify_owner {
                if let Some(owner) = &s.owner_email {
                    if !owner.is_empty() && !targets.contains(owner) {
                        targets.push(owner.clone());
                    }
                }
            }
        }

        for recipient in targets {
            match self.notifier.notify(&recipient, mode, appointment).await {
                Ok(receipt) if receipt.ok => summary.sent.push(recipient),
                Ok(receipt) => {
                    warn!(recipient = %recipient, provider = %receipt.provider, "notification rejected by provider");
                }
                Err(e) => {
                    warn!(recipient = %recipient, "notification dispatch failed: {}", e);
                }
            }
        }

        summary
    }
}

fn effective_duration(
    explicit: Option<i32>,
    resolved_type: Option<&AppointmentType>,
) -> Result<i32, AppError> {
    let duration = explicit
        .or(resolved_type.map(|t| t.duration_min))
        .unwrap_or(DEFAULT_DURATION_MIN);
    validate_duration(duration)?;
    Ok(duration)
}

pub fn validate_duration(duration_min: i32) -> Result<(), AppError> {
    if duration_min <= 0 {
        return Err(AppError::Validation("Duration must be positive".into()));
    }
    if duration_min > MAX_DURATION_MIN {
        return Err(AppError::Validation(format!(
            "Duration cannot exceed {} minutes",
            MAX_DURATION_MIN
        )));
    }
    Ok(())
}

fn effective_location(
    explicit: Option<&str>,
    resolved_type: Option<&AppointmentType>,
) -> Result<String, AppError> {
    match explicit {
        Some(location) => {
            validate_location(location)?;
            Ok(location.to_string())
        }
        None => Ok(resolved_type
            .map(|t| t.location.clone())
            .unwrap_or_else(|| LOCATION_OFFICE.to_string())),
    }
}

pub fn validate_location(location: &str) -> Result<(), AppError> {
    if LOCATION_MODES.contains(&location) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Invalid location mode '{}'",
            location
        )))
    }
}

fn validate_client_fields(
    client_name: &str,
    client_email: Option<&str>,
    title: Option<&str>,
    notes: Option<&str>,
) -> Result<(), AppError> {
    if client_name.trim().is_empty() {
        return Err(AppError::Validation("Client name is required".into()));
    }
    if client_name.chars().count() > MAX_CLIENT_NAME_LEN {
        return Err(AppError::Validation(format!(
            "Client name exceeds {} characters",
            MAX_CLIENT_NAME_LEN
        )));
    }
    if let Some(email) = client_email {
        if email.chars().count() > MAX_CLIENT_EMAIL_LEN {
            return Err(AppError::Validation(format!(
                "Client email exceeds {} characters",
                MAX_CLIENT_EMAIL_LEN
            )));
        }
    }
    if let Some(title) = title {
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(AppError::Validation(format!(
                "Title exceeds {} characters",
                MAX_TITLE_LEN
            )));
        }
    }
    if let Some(notes) = notes {
        if notes.chars().count() > MAX_NOTES_LEN {
            return Err(AppError::Validation(format!(
                "Notes exceed {} characters",
                MAX_NOTES_LEN
            )));
        }
    }
    Ok(())
}
