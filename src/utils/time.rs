//! Time utilities: parsing HH:MM / HH:MM:SS, wall-clock offsets, formatting.

use crate::errors::{AppError, AppResult};
use chrono::{Duration, NaiveTime};

/// Parse `HH:MM`, also accepting the `HH:MM:SS` form used by the workbook.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Wall-clock addition. The result wraps at midnight; the day overflow is
/// discarded on purpose (00:30 - 90min reads as 23:00).
pub fn add_minutes(t: NaiveTime, minutes: i64) -> NaiveTime {
    let (out, _days) = t.overflowing_add_signed(Duration::minutes(minutes));
    out
}

pub fn fmt_hm(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn fmt_hms(t: NaiveTime) -> String {
    t.format("%H:%M:%S").to_string()
}
