use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime, Timelike, Utc};

/// Current calendar day at the given fixed offset (JST by default config).
pub fn today(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}

/// Current wall-clock time at the given offset, truncated to the minute.
pub fn now_time(offset: FixedOffset) -> NaiveTime {
    let now = Utc::now().with_timezone(&offset).time();
    NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn fmt_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Expand `YYYY`, `YYYY-MM` or `YYYY-MM-DD` into an inclusive (first, last) range.
pub fn period_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    if let Ok(first) = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d") {
        let last = last_day_of_month(first.year(), first.month());
        return Ok((first, last));
    }

    if let Ok(year) = p.parse::<i32>()
        && let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok((first, last));
    }

    Err(format!("Invalid period: {}", p))
}

/// Accepts a single period or `start:end` where each side is a period.
pub fn range_bounds(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    match p.split_once(':') {
        Some((a, b)) => {
            let (start, _) = period_bounds(a)?;
            let (_, end) = period_bounds(b)?;
            if start > end {
                return Err(format!("Invalid range (start after end): {}", p));
            }
            Ok((start, end))
        }
        None => period_bounds(p),
    }
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_and_year_periods() {
        assert_eq!(period_bounds("2025-02").unwrap(), (d(2025, 2, 1), d(2025, 2, 28)));
        assert_eq!(period_bounds("2024").unwrap(), (d(2024, 1, 1), d(2024, 12, 31)));
        assert_eq!(period_bounds("2025-12").unwrap().1, d(2025, 12, 31));
        assert!(period_bounds("yesterday").is_err());
    }

    #[test]
    fn ranges() {
        assert_eq!(
            range_bounds("2025-01:2025-03-10").unwrap(),
            (d(2025, 1, 1), d(2025, 3, 10))
        );
        assert!(range_bounds("2025-03:2025-01").is_err());
    }
}
