use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::day_record::DayRecord;
use crate::models::meal_record::MealRecord;
use crate::sheet::layout::{SheetRecord, Tab};
use crate::sheet::sqlite::SqliteSheet;
use crate::sheet::{UpsertOutcome, upsert_record};
use rusqlite::TransactionBehavior;

pub struct SyncLogic;

impl SyncLogic {
    pub fn sync_day(pool: &mut DbPool, record: &DayRecord) -> AppResult<UpsertOutcome> {
        Self::upsert(pool, Tab::Routine, record)
    }

    pub fn sync_meals(pool: &mut DbPool, record: &MealRecord) -> AppResult<UpsertOutcome> {
        Self::upsert(pool, Tab::Meals, record)
    }

    /// Scan-then-write under an immediate transaction: two invocations
    /// syncing the same date serialize on the write lock and the later one
    /// updates the row the earlier one appended.
    fn upsert<R: SheetRecord>(
        pool: &mut DbPool,
        tab: Tab,
        record: &R,
    ) -> AppResult<UpsertOutcome> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let outcome = {
            let mut ws = SqliteSheet::open(&tx, tab);
            upsert_record(&mut ws, record)?
        };

        let verb = match outcome {
            UpsertOutcome::Updated(_) => "updated",
            UpsertOutcome::Appended(_) => "appended",
        };
        ttlog(
            &tx,
            "sync",
            &record.key(),
            &format!("{} row {} {}", tab.name(), outcome.row(), verb),
        )?;

        tx.commit()?;
        Ok(outcome)
    }
}
