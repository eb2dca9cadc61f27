use crate::domain::models::appointment::Appointment;
use crate::domain::services::scheduler::validate_duration;
use crate::domain::services::{overlap, timefmt};
use crate::error::AppError;

/// Candidate starts are quantized to a 15-minute grid. Presentation-layer
/// choice: any start passing the overlap check is legal, only grid-aligned
/// ones are offered publicly.
pub const SLOT_INTERVAL_MIN: i32 = 15;

/// Enumerates conflict-free start times for one day. Output is ascending
/// `HH:MM` strings and fully determined by the inputs.
pub fn calculate_slots(
    open_min: i32,
    close_min: i32,
    duration_min: i32,
    existing: &[Appointment],
) -> Result<Vec<String>, AppError> {
    validate_duration(duration_min)?;
    if close_min <= open_min {
        return Err(AppError::Validation(
            "Close time must be after open time".into(),
        ));
    }

    let mut slots = Vec::new();
    let mut cursor = open_min;
    while cursor + duration_min <= close_min {
        if overlap::find_conflict(existing, cursor, duration_min, None).is_none() {
            slots.push(timefmt::format_hm(cursor));
        }
        cursor += SLOT_INTERVAL_MIN;
    }

    Ok(slots)
}
