//! Opening the working day: load the session, move it to the requested date
//! and seed it from the workbook the first time that date is touched.

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::day_record::{Anchors, DayRecord};
use crate::models::meal_record::MealRecord;
use crate::session::{Session, SessionStore};
use crate::sheet::find_record_row;
use crate::sheet::layout::{MEALS, ROUTINE, Tab};
use crate::sheet::sqlite::SqliteSheet;
use crate::ui::messages::{info, warning};
use crate::utils::date::fmt_date;
use chrono::NaiveDate;

/// What hydration found in the workbook.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Hydration {
    pub routine: bool,
    pub meals: bool,
}

pub struct DayLogic;

impl DayLogic {
    pub fn open(
        cfg: &Config,
        store: &SessionStore,
        pool: &DbPool,
        date: NaiveDate,
    ) -> AppResult<Session> {
        let anchors = Anchors::from_config(cfg);

        let mut session = match store.load() {
            Ok(Some(s)) => s,
            Ok(None) => Session::fresh(date, anchors),
            Err(e) if e.is_malformed_data() => {
                warning(format!("{e}; starting a new session"));
                Session::fresh(date, anchors)
            }
            Err(e) => return Err(e),
        };

        if session.date() != date {
            let roll = session.roll_to(date, anchors);
            if let Some(left) = roll.parked {
                info(format!(
                    "Unsynced changes for {left} are kept; run `dayboard --date {left} sync` to write them"
                ));
            }
            if roll.resumed {
                info(format!("Resuming unsynced changes for {date}"));
            }
        }

        if !session.hydrated {
            if let Err(e) = Self::hydrate(&mut session, pool, &anchors) {
                warning(format!("Could not read the workbook: {e}; using defaults"));
            }
            session.hydrated = true;
        }

        Ok(session)
    }

    /// Replace the session's record and meals with the stored rows for its
    /// date. A malformed row is reported and the defaults are kept.
    pub fn hydrate(
        session: &mut Session,
        pool: &DbPool,
        defaults: &Anchors,
    ) -> AppResult<Hydration> {
        let key = fmt_date(session.date());
        let mut found = Hydration::default();

        let routine = SqliteSheet::open(&pool.conn, Tab::Routine);
        if let Some(row) = find_record_row(&routine, &ROUTINE, &key)? {
            match DayRecord::from_row(&row, defaults) {
                Ok(rec) => {
                    let unknown: Vec<&str> = rec.progress.unknown_ids().collect();
                    if !unknown.is_empty() {
                        warning(format!(
                            "Stored routine row {} has unknown steps ({}); they are kept as is",
                            row.row_no,
                            unknown.join(", ")
                        ));
                    }
                    session.record = rec;
                    found.routine = true;
                }
                Err(e) if e.is_malformed_data() => {
                    warning(format!("Stored routine row {} is malformed: {e}", row.row_no));
                }
                Err(e) => return Err(e),
            }
        }

        let meals = SqliteSheet::open(&pool.conn, Tab::Meals);
        if let Some(row) = find_record_row(&meals, &MEALS, &key)? {
            match MealRecord::from_row(&row) {
                Ok(rec) => {
                    session.meals = rec.meals;
                    found.meals = true;
                }
                Err(e) if e.is_malformed_data() => {
                    warning(format!("Stored meals row {} is malformed: {e}", row.row_no));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(found)
    }

    pub fn save(store: &SessionStore, session: &Session) -> AppResult<()> {
        store.save(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::step::Step;
    use crate::models::step_state::StepState;
    use crate::models::workout::Workout;
    use crate::sheet::{Worksheet, upsert_record};
    use chrono::NaiveTime;
    use std::env;

    fn store(name: &str) -> SessionStore {
        let path = env::temp_dir().join(format!("dayboard_day_{}_{}.json", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        SessionStore::new(path)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn new_day_is_seeded_from_the_workbook() {
        let cfg = Config::default();
        let pool = DbPool::in_memory().unwrap();

        let mut stored = DayRecord::new(date(2), Anchors::from_config(&cfg));
        stored.workout = Workout::from_label("Sauna");
        stored.diary = "good day".into();
        stored
            .progress
            .set(Step::MorningWalk, StepState::Done(NaiveTime::from_hms_opt(8, 5, 0).unwrap()));
        let mut ws = SqliteSheet::open(&pool.conn, Tab::Routine);
        upsert_record(&mut ws, &stored).unwrap();

        let store = store("seed");
        let session = DayLogic::open(&cfg, &store, &pool, date(2)).unwrap();
        assert!(session.hydrated);
        assert_eq!(session.record, stored);
    }

    #[test]
    fn malformed_row_keeps_defaults() {
        let cfg = Config::default();
        let pool = DbPool::in_memory().unwrap();
        let mut ws = SqliteSheet::open(&pool.conn, Tab::Routine);
        let row: Vec<String> = vec![
            "2025-01-03".into(),
            "07:00:00".into(),
            "none".into(),
            "0".into(),
            "".into(),
            "18:00:00".into(),
            "23:30:00".into(),
            "{not json".into(),
            "".into(),
        ];
        ws.append_row(&row).unwrap();

        let store = store("malformed");
        let session = DayLogic::open(&cfg, &store, &pool, date(3)).unwrap();
        assert!(session.record.progress.is_empty());
        assert_eq!(session.record.date, date(3));
    }

    #[test]
    fn same_day_session_is_not_reseeded() {
        let cfg = Config::default();
        let pool = DbPool::in_memory().unwrap();
        let store = store("same_day");

        let mut s = DayLogic::open(&cfg, &store, &pool, date(4)).unwrap();
        s.record.diary = "local edit".into();
        DayLogic::save(&store, &s).unwrap();

        let again = DayLogic::open(&cfg, &store, &pool, date(4)).unwrap();
        assert_eq!(again.record.diary, "local edit");

        let next = DayLogic::open(&cfg, &store, &pool, date(5)).unwrap();
        assert!(next.record.diary.is_empty());
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn dirty_day_is_not_replaced_by_the_stored_row() {
        let cfg = Config::default();
        let pool = DbPool::in_memory().unwrap();
        let store = store("dirty_day");
        let noon = NaiveTime::from_hms_opt(12, 30, 0).unwrap();

        // an older copy of the day already in the workbook
        let stored = DayRecord::new(date(10), Anchors::from_config(&cfg));
        let mut ws = SqliteSheet::open(&pool.conn, Tab::Routine);
        upsert_record(&mut ws, &stored).unwrap();

        let mut s = DayLogic::open(&cfg, &store, &pool, date(10)).unwrap();
        s.record.progress.set(Step::Lunch, StepState::Done(noon));
        s.dirty = true;
        DayLogic::save(&store, &s).unwrap();

        let other = DayLogic::open(&cfg, &store, &pool, date(9)).unwrap();
        DayLogic::save(&store, &other).unwrap();

        let back = DayLogic::open(&cfg, &store, &pool, date(10)).unwrap();
        assert_eq!(back.record.progress.get(Step::Lunch), StepState::Done(noon));
        assert!(back.dirty);
        let _ = std::fs::remove_file(store.path());
    }
}
