//! Sleep import in two steps: `analyze` extracts a record from screenshots
//! and keeps it pending in the session, `save` appends it to the sleep tab.

use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::extract::{Extractor, ImageInput, recover_object, sleep_prompt};
use crate::models::sleep_record::SleepRecord;
use crate::sheet::append_record;
use crate::sheet::layout::Tab;
use crate::sheet::sqlite::SqliteSheet;
use rusqlite::TransactionBehavior;

pub struct SleepLogic;

impl SleepLogic {
    pub fn analyze(
        extractor: &dyn Extractor,
        images: &[ImageInput],
        allow_missing: bool,
    ) -> AppResult<SleepRecord> {
        if images.is_empty() {
            return Err(AppError::Extraction("no screenshots given".into()));
        }
        let text = extractor.extract(&sleep_prompt(), images)?;
        let obj = recover_object(&text)?;
        SleepRecord::from_object(&obj, allow_missing)
    }

    /// Append `record` as a new row; nights are never merged.
    pub fn save(pool: &mut DbPool, record: &SleepRecord) -> AppResult<usize> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let row = {
            let mut ws = SqliteSheet::open(&tx, Tab::Sleep);
            append_record(&mut ws, record)?
        };

        ttlog(
            &tx,
            "sleep_save",
            &record.date().unwrap_or_default(),
            &format!("sleep_log row {row} appended"),
        )?;

        tx.commit()?;
        Ok(row)
    }
}
