//! Display formatting for API values (Vietnamese locale, UTC+7).
use chrono::{DateTime, FixedOffset, NaiveDate};

const VIETNAM_OFFSET_SECS: i32 = 7 * 3600;
const MISSING: &str = "N/A";

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let parsed = DateTime::parse_from_rfc3339(raw.trim()).ok()?;
    Some(match FixedOffset::east_opt(VIETNAM_OFFSET_SECS) {
        Some(offset) => parsed.with_timezone(&offset),
        None => parsed,
    })
}

fn format_with(raw: &str, pattern: &str) -> String {
    if raw.trim().is_empty() {
        return MISSING.to_string();
    }
    if let Some(timestamp) = parse_timestamp(raw) {
        return timestamp.format(pattern).to_string();
    }
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format(pattern).to_string(),
        Err(_) => raw.to_string(),
    }
}

/// `2024-05-01T11:30:00Z` becomes `01/05/2024`.
pub fn format_date(raw: &str) -> String {
    format_with(raw, "%d/%m/%Y")
}

/// `2024-05-01T11:30:00Z` becomes `18:30`.
pub fn format_time(raw: &str) -> String {
    if parse_timestamp(raw).is_none() {
        return if raw.trim().is_empty() {
            MISSING.to_string()
        } else {
            raw.to_string()
        };
    }
    format_with(raw, "%H:%M")
}

pub fn format_date_time(raw: &str) -> String {
    format_with(raw, "%d/%m/%Y %H:%M")
}

/// Whole minutes between two timestamps, if both parse.
pub fn minutes_between(start: &str, end: &str) -> Option<i64> {
    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;
    Some((end - start).num_minutes())
}

/// Formats an amount of đồng: no decimals, `.` as thousands separator.
pub fn format_vnd(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    if negative {
        format!("-{grouped} ₫")
    } else {
        format!("{grouped} ₫")
    }
}

/// Like [`format_vnd`] for the decimal strings the API returns.
pub fn format_vnd_str(raw: &str) -> String {
    format_vnd(raw.trim().parse().unwrap_or(0.0))
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max_chars).collect();
    shortened.push_str("...");
    shortened
}
