use chrono::NaiveDate;

use crate::error::AppError;

/// 09:00, the fallback wherever a lenient parse has nothing better to offer.
pub const DEFAULT_START_MIN: i32 = 9 * 60;

/// Calendar-date parse for request fields; failures name the expected format.
pub fn parse_date(input: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| AppError::Format(format!("invalid date '{}': expected YYYY-MM-DD", input)))
}

/// Parses `HH:MM` or `HH:MM:SS` into minutes from midnight. Components must
/// be exactly two digits (no signs, no single-digit hours); anything outside
/// 00-23 hours / 00-59 minutes is a hard failure. Write paths go through this.
pub fn parse_strict(input: &str) -> Result<i32, AppError> {
    let bad = || AppError::Format(format!("invalid time '{}': expected HH:MM", input));

    // Exactly two ASCII digits; rejects "+9", " 9", "9".
    let two_digits = |part: &str| -> Result<i32, AppError> {
        if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        part.parse().map_err(|_| bad())
    };

    let parts: Vec<&str> = input.trim().split(':').collect();
    if parts.len() != 2 && parts.len() != 3 {
        return Err(bad());
    }

    let hour = two_digits(parts[0])?;
    let minute = two_digits(parts[1])?;
    if hour > 23 || minute > 59 {
        return Err(bad());
    }
    if parts.len() == 3 && two_digits(parts[2])? > 59 {
        return Err(bad());
    }

    Ok(hour * 60 + minute)
}

/// Never-failing variant for read paths: a mangled stored value degrades to
/// the given default instead of crashing a listing.
pub fn parse_lenient(input: &str, default_min: i32) -> i32 {
    parse_strict(input).unwrap_or(default_min)
}

/// Zero-padded `HH:MM`. Negative inputs clamp to midnight.
pub fn format_hm(minutes: i32) -> String {
    let m = minutes.max(0);
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// 12-hour display form, `h:MM AM/PM`.
pub fn format_human(minutes: i32) -> String {
    let m = minutes.max(0);
    let hour24 = (m / 60) % 24;
    let minute = m % 60;
    let suffix = if hour24 < 12 { "AM" } else { "PM" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour12, minute, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strict_accepts_valid_forms() {
        assert_eq!(parse_strict("09:00").unwrap(), 540);
        assert_eq!(parse_strict("23:59").unwrap(), 1439);
        assert_eq!(parse_strict("00:00").unwrap(), 0);
        assert_eq!(parse_strict("14:30:15").unwrap(), 870);
    }

    #[test]
    fn test_parse_strict_rejects_out_of_range() {
        assert!(parse_strict("25:00").is_err());
        assert!(parse_strict("12:60").is_err());
        assert!(parse_strict("12:30:61").is_err());
        assert!(parse_strict("noon").is_err());
        assert!(parse_strict("12").is_err());
        assert!(parse_strict("").is_err());
    }

    #[test]
    fn test_parse_strict_requires_two_digit_components() {
        assert!(parse_strict("9:30").is_err());
        assert!(parse_strict("09:5").is_err());
        assert!(parse_strict("+9:30").is_err());
        assert!(parse_strict("+09:30").is_err());
        assert!(parse_strict("09: 5").is_err());
        assert!(parse_strict("٠٩:٠٠").is_err());
    }

    #[test]
    fn test_parse_strict_error_names_expected_format() {
        let err = parse_strict("25:00").unwrap_err();
        assert!(err.to_string().contains("HH:MM"));
    }

    #[test]
    fn test_parse_lenient_degrades_to_default() {
        assert_eq!(parse_lenient("10:15", DEFAULT_START_MIN), 615);
        assert_eq!(parse_lenient("garbage", DEFAULT_START_MIN), 540);
        assert_eq!(parse_lenient("", 600), 600);
    }

    #[test]
    fn test_format_hm() {
        assert_eq!(format_hm(540), "09:00");
        assert_eq!(format_hm(1035), "17:15");
        assert_eq!(format_hm(0), "00:00");
        assert_eq!(format_hm(-30), "00:00");
    }

    #[test]
    fn test_parse_date_names_expected_format() {
        assert!(parse_date("2026-03-02").is_ok());
        let err = parse_date("03/02/2026").unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_format_human() {
        assert_eq!(format_human(0), "12:00 AM");
        assert_eq!(format_human(540), "9:00 AM");
        assert_eq!(format_human(720), "12:00 PM");
        assert_eq!(format_human(1035), "5:15 PM");
    }
}
