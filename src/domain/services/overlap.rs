use chrono::{Datelike, NaiveDate};

use crate::domain::models::appointment::Appointment;
use crate::domain::services::timefmt;
use crate::error::AppError;

/// First non-cancelled appointment whose `[start, end)` intersects the
/// candidate interval, skipping `exclude_id` so a reschedule never collides
/// with itself. Half-open semantics: touching intervals do not conflict.
/// Saturating end arithmetic: an oversized duration cannot wrap the
/// comparison negative and slip past the guard.
pub fn find_conflict<'a>(
    existing: &'a [Appointment],
    start_min: i32,
    duration_min: i32,
    exclude_id: Option<&str>,
) -> Option<&'a Appointment> {
    let end_min = start_min.saturating_add(duration_min);

    existing.iter().find(|other| {
        if other.is_cancelled() {
            return false;
        }
        if exclude_id.is_some_and(|id| id == other.id) {
            return false;
        }
        start_min < other.end_min() && end_min > other.start_min()
    })
}

/// Overlap guard: advisory when called outside a write transaction, the
/// authoritative re-check when the repositories call it under their lock.
pub fn ensure_free(
    existing: &[Appointment],
    start_min: i32,
    duration_min: i32,
    exclude_id: Option<&str>,
) -> Result<(), AppError> {
    match find_conflict(existing, start_min, duration_min, exclude_id) {
        Some(other) => Err(AppError::Overlap {
            window: format!(
                "{} - {}",
                timefmt::format_human(other.start_min()),
                timefmt::format_human(other.end_min())
            ),
        }),
        None => Ok(()),
    }
}

/// Advisory-lock key for one (business, date) write: crc32 of the business id
/// in the high 32 bits, YYYYMMDD in the low bits. Stable across processes so
/// every connection of a deployment contends on the same key.
pub fn day_lock_key(business_id: &str, date: NaiveDate) -> i64 {
    let date_int =
        date.year() as i64 * 10_000 + date.month() as i64 * 100 + date.day() as i64;
    ((crc32fast::hash(business_id.as_bytes()) as i64) << 32) | date_int
}
