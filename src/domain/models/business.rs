use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_OPEN_TIME: &str = "09:00";
pub const DEFAULT_CLOSE_TIME: &str = "17:00";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub owner_email: Option<String>,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
}

impl Business {
    pub fn new(name: String, slug: String, owner_email: Option<String>, timezone: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            slug,
            owner_email,
            timezone,
            created_at: Utc::now(),
        }
    }
}

/// Lowercases, keeps alphanumerics, collapses everything else into single dashes.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_dash = true;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// One row per business, created lazily on first settings read.
/// `week_hours_json` holds the per-weekday table; the global
/// `open_time`/`close_time` pair is the fallback for missing days.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct BusinessSettings {
    pub business_id: String,
    pub business_name: String,
    pub owner_email: Option<String>,
    pub timezone: String,
    pub open_time: String,
    pub close_time: String,
    pub week_hours_json: Option<String>,
    pub notify_owner: bool,
    pub updated_at: DateTime<Utc>,
}

impl BusinessSettings {
    pub fn defaults_for(business: &Business) -> Self {
        Self {
            business_id: business.id.clone(),
            business_name: business.name.clone(),
            owner_email: business.owner_email.clone(),
            timezone: business.timezone.clone(),
            open_time: DEFAULT_OPEN_TIME.to_string(),
            close_time: DEFAULT_CLOSE_TIME.to_string(),
            week_hours_json: None,
            notify_owner: true,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Acme Hair Studio"), "acme-hair-studio");
        assert_eq!(slugify("  Büro & Co.  "), "b-ro-co");
        assert_eq!(slugify("---"), "");
    }
}
