use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::models::business::BusinessSettings;
use crate::domain::services::timefmt;
use crate::error::AppError;

/// Sunday-first, matching `Datelike::num_days_from_sunday`.
pub const DAY_KEYS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DayHours {
    pub closed: bool,
    pub open_time: String,
    pub close_time: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WeekHours {
    pub sunday: Option<DayHours>,
    pub monday: Option<DayHours>,
    pub tuesday: Option<DayHours>,
    pub wednesday: Option<DayHours>,
    pub thursday: Option<DayHours>,
    pub friday: Option<DayHours>,
    pub saturday: Option<DayHours>,
}

impl WeekHours {
    pub fn day(&self, weekday_index: usize) -> &Option<DayHours> {
        match weekday_index {
            0 => &self.sunday,
            1 => &self.monday,
            2 => &self.tuesday,
            3 => &self.wednesday,
            4 => &self.thursday,
            5 => &self.friday,
            _ => &self.saturday,
        }
    }
}

/// The bookable window for one calendar date.
#[derive(Debug, Clone)]
pub struct ResolvedDay {
    pub day_key: &'static str,
    pub closed: bool,
    pub open_min: i32,
    pub close_min: i32,
}

/// Resolves the per-weekday table against a date. A missing or mangled entry
/// (unparseable times) falls back to the business-wide open/close pair; only
/// an explicit `closed: true` yields an empty window.
pub fn resolve_day(settings: &BusinessSettings, date: NaiveDate) -> ResolvedDay {
    let fallback_open = timefmt::parse_lenient(&settings.open_time, timefmt::DEFAULT_START_MIN);
    let fallback_close = timefmt::parse_lenient(&settings.close_time, 17 * 60);

    let week: WeekHours = settings
        .week_hours_json
        .as_deref()
        .and_then(|json| serde_json::from_str(json).ok())
        .unwrap_or_default();

    let idx = date.weekday().num_days_from_sunday() as usize;
    let day_key = DAY_KEYS[idx];

    if let Some(day) = week.day(idx) {
        let parsed_open = timefmt::parse_strict(&day.open_time);
        let parsed_close = timefmt::parse_strict(&day.close_time);
        match (parsed_open, parsed_close) {
            (Ok(open_min), Ok(close_min)) => {
                return ResolvedDay {
                    day_key,
                    closed: day.closed,
                    open_min,
                    close_min,
                };
            }
            _ => {
                // Mangled entry: keep the closed flag, degrade the times.
                return ResolvedDay {
                    day_key,
                    closed: day.closed,
                    open_min: fallback_open,
                    close_min: fallback_close,
                };
            }
        }
    }

    ResolvedDay {
        day_key,
        closed: false,
        open_min: fallback_open,
        close_min: fallback_close,
    }
}

/// Same as `resolve_day` for businesses whose settings row does not exist
/// yet: the stock 09:00-17:00 window, no closed days.
pub fn resolve_day_or_default(settings: Option<&BusinessSettings>, date: NaiveDate) -> ResolvedDay {
    match settings {
        Some(s) => resolve_day(s, date),
        None => {
            let idx = date.weekday().num_days_from_sunday() as usize;
            ResolvedDay {
                day_key: DAY_KEYS[idx],
                closed: false,
                open_min: timefmt::DEFAULT_START_MIN,
                close_min: 17 * 60,
            }
        }
    }
}

/// Validates a caller-supplied weekday table before it is persisted: every
/// non-closed day must close strictly after it opens.
pub fn validate_week(week: &WeekHours) -> Result<(), AppError> {
    for (idx, key) in DAY_KEYS.iter().enumerate() {
        if let Some(day) = week.day(idx) {
            if day.closed {
                continue;
            }
            let open = timefmt::parse_strict(&day.open_time)?;
            let close = timefmt::parse_strict(&day.close_time)?;
            if close <= open {
                return Err(AppError::Validation(format!(
                    "{}: close time must be after open time",
                    key
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::business::{Business, BusinessSettings};

    fn settings_with(week_json: Option<&str>) -> BusinessSettings {
        let business = Business::new("Acme".into(), "acme".into(), None, "UTC".into());
        let mut s = BusinessSettings::defaults_for(&business);
        s.open_time = "09:00".into();
        s.close_time = "18:00".into();
        s.week_hours_json = week_json.map(|j| j.to_string());
        s
    }

    // 2026-03-01 is a Sunday, 2026-03-02 a Monday.
    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn test_missing_table_falls_back_to_global_window() {
        let day = resolve_day(&settings_with(None), monday());
        assert_eq!(day.day_key, "MON");
        assert!(!day.closed);
        assert_eq!(day.open_min, 540);
        assert_eq!(day.close_min, 1080);
    }

    #[test]
    fn test_per_day_entry_wins_over_fallback() {
        let json = r#"{"monday":{"closed":false,"open_time":"10:00","close_time":"14:00"}}"#;
        let day = resolve_day(&settings_with(Some(json)), monday());
        assert_eq!(day.open_min, 600);
        assert_eq!(day.close_min, 840);
    }

    #[test]
    fn test_closed_sunday_resolves_closed() {
        let json = r#"{"sunday":{"closed":true,"open_time":"09:00","close_time":"18:00"}}"#;
        let day = resolve_day(&settings_with(Some(json)), sunday());
        assert_eq!(day.day_key, "SUN");
        assert!(day.closed);
    }

    #[test]
    fn test_mangled_entry_degrades_to_fallback_times() {
        let json = r#"{"monday":{"closed":false,"open_time":"whenever","close_time":"18:00"}}"#;
        let day = resolve_day(&settings_with(Some(json)), monday());
        assert_eq!(day.open_min, 540);
        assert_eq!(day.close_min, 1080);
    }

    #[test]
    fn test_unparseable_json_degrades_to_fallback() {
        let day = resolve_day(&settings_with(Some("not json")), monday());
        assert!(!day.closed);
        assert_eq!(day.open_min, 540);
    }

    #[test]
    fn test_validate_week_names_offending_day() {
        let week = WeekHours {
            tuesday: Some(DayHours {
                closed: false,
                open_time: "17:00".into(),
                close_time: "09:00".into(),
            }),
            ..Default::default()
        };
        let err = validate_week(&week).unwrap_err();
        assert!(err.to_string().contains("TUE"));
    }

    #[test]
    fn test_validate_week_skips_closed_days() {
        let week = WeekHours {
            sunday: Some(DayHours {
                closed: true,
                open_time: "17:00".into(),
                close_time: "09:00".into(),
            }),
            ..Default::default()
        };
        assert!(validate_week(&week).is_ok());
    }
}
