use crate::error::{Result, StatsError};
use chrono::NaiveDate;

/// Formats seen in the GAME DATE column, plus ISO for already-normalized input
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%b %d, %Y", "%B %d, %Y"];

/// Convert a rendered game date into `YYYY-MM-DD`
pub fn normalize_date(raw: &str) -> Result<String> {
    let trimmed = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .ok_or_else(|| StatsError::InvalidDate(raw.to_string()))
}
