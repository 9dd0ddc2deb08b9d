//! # Display Formatting
//!
//! Render-time formatting for list views. Records are never modified.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::api::{ArticleStatus, Record};

/// Maximum number of token characters shown in a list.
pub const TOKEN_PREVIEW_LEN: usize = 50;

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Formats a backend timestamp as `dd/mm/YYYY HH:MM`, or returns it unchanged.
#[must_use]
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(
        || raw.to_string(),
        |dt| dt.format("%d/%m/%Y %H:%M").to_string(),
    )
}

/// Formats a backend timestamp as `dd/mm/YYYY`, or returns it unchanged.
#[must_use]
pub fn format_day(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(|| raw.to_string(), |dt| dt.format("%d/%m/%Y").to_string())
}

/// Shortens a token value for display.
#[must_use]
pub fn truncate_token(token: &str) -> String {
    if token.chars().count() <= TOKEN_PREVIEW_LEN {
        return token.to_string();
    }
    let preview: String = token.chars().take(TOKEN_PREVIEW_LEN).collect();
    format!("{preview}...")
}

/// The date shown for an article: publication date, else creation date.
#[must_use]
pub fn article_date(record: &Record) -> String {
    let raw = ["publishedAt", "publishedDate", "createdDate", "createdAt"]
        .iter()
        .map(|field| record.text(field))
        .find(|value| !value.is_empty())
        .unwrap_or_default();
    format_date(&raw)
}

/// `Active` or `Inactive`, from the `active` flag.
#[must_use]
pub fn user_status(record: &Record) -> &'static str {
    if record.flag("active") {
        "Active"
    } else {
        "Inactive"
    }
}

/// Publication status label: `Published`, `Draft` or `Archived`.
#[must_use]
pub fn article_status(record: &Record) -> &'static str {
    match ArticleStatus::of(record) {
        ArticleStatus::Published => "Published",
        ArticleStatus::Draft => "Draft",
        ArticleStatus::Archived => "Archived",
    }
}

/// Revoked wins over expired; anything else is active.
#[must_use]
pub fn token_status(record: &Record) -> &'static str {
    if record.flag("revoked") {
        "Revoked"
    } else if record.flag("expired") {
        "Expired"
    } else {
        "Active"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05T14:07:31.123"), "05/03/2024 14:07");
        assert_eq!(format_date("2024-03-05T14:07:31Z"), "05/03/2024 14:07");
        assert_eq!(format_day("2024-03-05T14:07:31"), "05/03/2024");
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_day(""), "");
    }

    #[test]
    fn test_truncate_token() {
        let token = "x".repeat(80);
        let shown = truncate_token(&token);
        assert_eq!(shown.len(), TOKEN_PREVIEW_LEN + 3);
        assert!(shown.ends_with("..."));
        assert_eq!(truncate_token("short"), "short");
    }

    #[test]
    fn test_status_labels() {
        let rec: Record = serde_json::from_value(json!({
            "active": true, "published": true, "revoked": false, "expired": true
        }))
        .unwrap();

        assert_eq!(user_status(&rec), "Active");
        assert_eq!(article_status(&rec), "Published");
        assert_eq!(token_status(&rec), "Expired");
    }

    #[test]
    fn test_article_date_prefers_publication() {
        let rec: Record = serde_json::from_value(json!({
            "createdDate": "2024-01-01T00:00:00", "publishedAt": "2024-02-02T10:30:00"
        }))
        .unwrap();

        assert_eq!(article_date(&rec), "02/02/2024 10:30");
    }
}
