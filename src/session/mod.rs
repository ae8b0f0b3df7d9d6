//! Per-user working state carried between invocations.
//!
//! The session holds the day being worked on, the meal notes and a sleep
//! record waiting to be saved. It is a plain JSON file; the workbook remains
//! the durable record and the session is re-seeded from it on a new day.
//!
//! A day with changes not yet written to the workbook is never dropped when
//! the session moves to another date: it is parked under its date and picked
//! up again when that date is opened.

use crate::errors::{AppError, AppResult};
use crate::models::day_record::{Anchors, DayRecord};
use crate::models::meal_record::{MealRecord, Meals};
use crate::models::sleep_record::SleepRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub record: DayRecord,
    #[serde(default)]
    pub meals: Meals,
    #[serde(default)]
    pub pending_sleep: Option<SleepRecord>,
    /// Set once the workbook has been consulted for `record.date`.
    #[serde(default)]
    pub hydrated: bool,
    /// Local changes not written to the workbook yet.
    #[serde(default)]
    pub dirty: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parked: BTreeMap<NaiveDate, ParkedDay>,
}

/// Unsynced working state of a day the session moved away from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkedDay {
    pub record: DayRecord,
    #[serde(default)]
    pub meals: Meals,
}

/// What `roll_to` did with the day it left and the day it opened.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Roll {
    pub parked: Option<NaiveDate>,
    pub resumed: bool,
}

impl Session {
    pub fn fresh(date: NaiveDate, anchors: Anchors) -> Self {
        Self {
            record: DayRecord::new(date, anchors),
            meals: Meals::default(),
            pending_sleep: None,
            hydrated: false,
            dirty: false,
            parked: BTreeMap::new(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.record.date
    }

    /// Move to another day. The pending sleep record follows; a dirty day
    /// is parked, and a day parked earlier under `date` is resumed as is.
    pub fn roll_to(&mut self, date: NaiveDate, anchors: Anchors) -> Roll {
        let mut roll = Roll::default();
        let mut parked = std::mem::take(&mut self.parked);
        let pending = self.pending_sleep.take();

        if self.dirty {
            roll.parked = Some(self.date());
            parked.insert(
                self.date(),
                ParkedDay {
                    record: self.record.clone(),
                    meals: std::mem::take(&mut self.meals),
                },
            );
        }

        *self = Session::fresh(date, anchors);
        self.pending_sleep = pending;

        if let Some(day) = parked.remove(&date) {
            self.record = day.record;
            self.meals = day.meals;
            self.hydrated = true;
            self.dirty = true;
            roll.resumed = true;
        }
        self.parked = parked;

        roll
    }

    /// Dates, other than the open one, holding unsynced changes.
    pub fn parked_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.parked.keys().copied()
    }

    pub fn meal_record(&self, supplements: &str) -> MealRecord {
        MealRecord {
            date: self.record.date,
            meals: self.meals.clone(),
            supplements: supplements.to_string(),
        }
    }
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when no session was saved yet. A corrupt file is reported
    /// as `MalformedRecord` so the caller can start over.
    pub fn load(&self) -> AppResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let session = serde_json::from_str(&raw).map_err(|e| {
            AppError::MalformedRecord(format!("session file {}: {e}", self.path.display()))
        })?;
        Ok(Some(session))
    }

    /// Write via a temp file + rename so an interrupted write never leaves
    /// half a session behind.
    pub fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(session)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::step::Step;
    use crate::models::step_state::StepState;
    use chrono::NaiveTime;
    use std::env;

    fn anchors() -> Anchors {
        Anchors {
            wake: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            workout: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            bed: NaiveTime::from_hms_opt(23, 30, 0).unwrap(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn save_then_load() {
        let mut path = env::temp_dir();
        path.push("session_roundtrip_dayboard.json");
        std::fs::remove_file(&path).ok();

        let store = SessionStore::new(&path);
        assert!(store.load().unwrap().is_none());

        let mut s = Session::fresh(day(1), anchors());
        s.record
            .progress
            .set(Step::Lunch, StepState::Done(NaiveTime::from_hms_opt(12, 5, 0).unwrap()));
        s.record.progress.set(Step::MorningWalk, StepState::Skipped);
        s.meals.lunch = "soba".into();
        store.save(&s).unwrap();

        let back = store.load().unwrap().unwrap();
        assert_eq!(back, s);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn corrupt_file_is_malformed() {
        let mut path = env::temp_dir();
        path.push("session_corrupt_dayboard.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = SessionStore::new(&path).load().unwrap_err();
        assert!(err.is_malformed_data());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn rolling_away_from_a_clean_day_starts_fresh() {
        let mut s = Session::fresh(day(1), anchors());
        s.meals.dinner = "curry".into();
        s.hydrated = true;
        let roll = s.roll_to(day(2), anchors());
        assert_eq!(roll, Roll::default());
        assert_eq!(s.date(), day(2));
        assert!(s.meals.is_empty());
        assert!(!s.hydrated);
        assert_eq!(s.parked_dates().count(), 0);
    }

    #[test]
    fn unsynced_day_is_parked_and_resumed() {
        let noon = NaiveTime::from_hms_opt(12, 30, 0).unwrap();
        let mut s = Session::fresh(day(10), anchors());
        s.record.progress.set(Step::Lunch, StepState::Done(noon));
        s.meals.lunch = "ramen".into();
        s.dirty = true;

        let away = s.roll_to(day(9), anchors());
        assert_eq!(away.parked, Some(day(10)));
        assert!(!away.resumed);
        assert!(!s.dirty);
        assert!(s.record.progress.is_empty());
        assert_eq!(s.parked_dates().collect::<Vec<_>>(), vec![day(10)]);

        let back = s.roll_to(day(10), anchors());
        assert_eq!(back.parked, None);
        assert!(back.resumed);
        assert!(s.dirty && s.hydrated);
        assert_eq!(s.record.progress.get(Step::Lunch), StepState::Done(noon));
        assert_eq!(s.meals.lunch, "ramen");
        assert_eq!(s.parked_dates().count(), 0);
    }

    #[test]
    fn parked_days_survive_a_save() {
        let mut path = env::temp_dir();
        path.push("session_parked_dayboard.json");
        std::fs::remove_file(&path).ok();
        let store = SessionStore::new(&path);

        let mut s = Session::fresh(day(3), anchors());
        s.record.diary = "kept".into();
        s.dirty = true;
        s.roll_to(day(4), anchors());
        store.save(&s).unwrap();

        let mut back = store.load().unwrap().unwrap();
        assert!(back.roll_to(day(3), anchors()).resumed);
        assert_eq!(back.record.diary, "kept");
        std::fs::remove_file(&path).ok();
    }
}
