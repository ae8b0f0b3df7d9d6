use super::step_state::Progress;
use super::workout::Workout;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::sheet::layout::{Layout, ROUTINE, RowData, SheetRecord};
use crate::utils::date::{fmt_date, parse_date};
use crate::utils::time::{fmt_hms, parse_time};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// User-configurable time-of-day anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchors {
    pub wake: NaiveTime,
    pub workout: NaiveTime,
    pub bed: NaiveTime,
}

impl Anchors {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            wake: cfg.wake_default(),
            workout: cfg.workout_default(),
            bed: cfg.bed_default(),
        }
    }
}

/// Everything tracked for one calendar day of the routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub anchors: Anchors,
    pub workout: Workout,
    #[serde(default)]
    pub sleep_score: u32,
    #[serde(default)]
    pub body_feeling: String,
    #[serde(default)]
    pub progress: Progress,
    #[serde(default)]
    pub diary: String,
}

impl DayRecord {
    pub fn new(date: NaiveDate, anchors: Anchors) -> Self {
        Self {
            date,
            anchors,
            workout: Workout::Rest,
            sleep_score: 0,
            body_feeling: String::new(),
            progress: Progress::default(),
            diary: String::new(),
        }
    }

    /// Rebuild a record from a stored routine row. Blank anchor cells (rows
    /// written before the column existed) take the value from `defaults`.
    pub fn from_row(row: &RowData, defaults: &Anchors) -> AppResult<Self> {
        let date_raw = row.get("Date")?;
        let date = parse_date(date_raw).ok_or_else(|| AppError::InvalidDate(date_raw.into()))?;

        let anchor = |col: &str, fallback: NaiveTime| -> AppResult<NaiveTime> {
            let raw = row.get_or_empty(col);
            if raw.trim().is_empty() {
                return Ok(fallback);
            }
            parse_time(raw).ok_or_else(|| AppError::InvalidTime(format!("{col}: {raw}")))
        };

        let anchors = Anchors {
            wake: anchor("WakeTime", defaults.wake)?,
            workout: anchor("WorkoutTime", defaults.workout)?,
            bed: anchor("BedTime", defaults.bed)?,
        };

        let score_raw = row.get_or_empty("SleepScore").trim();
        let sleep_score = if score_raw.is_empty() {
            0
        } else {
            score_raw
                .parse::<u32>()
                .or_else(|_| score_raw.parse::<f64>().map(|f| f.round().max(0.0) as u32))
                .map_err(|_| AppError::MalformedRecord(format!("SleepScore: {score_raw}")))?
        };

        Ok(Self {
            date,
            anchors,
            workout: Workout::from_label(row.get_or_empty("Workout")),
            sleep_score,
            body_feeling: row.get_or_empty("BodyFeeling").to_string(),
            progress: Progress::from_json(row.get_or_empty("Progress"))?,
            diary: row.get_or_empty("Diary").to_string(),
        })
    }
}

impl SheetRecord for DayRecord {
    const LAYOUT: &'static Layout = &ROUTINE;

    fn key(&self) -> String {
        fmt_date(self.date)
    }

    fn fields(&self) -> AppResult<Vec<(&'static str, String)>> {
        Ok(vec![
            ("Date", fmt_date(self.date)),
            ("WakeTime", fmt_hms(self.anchors.wake)),
            ("Workout", self.workout.label().to_string()),
            ("SleepScore", self.sleep_score.to_string()),
            ("BodyFeeling", self.body_feeling.clone()),
            ("WorkoutTime", fmt_hms(self.anchors.workout)),
            ("BedTime", fmt_hms(self.anchors.bed)),
            ("Progress", self.progress.to_json()?),
            ("Diary", self.diary.clone()),
        ])
    }
}
