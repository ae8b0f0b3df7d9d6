use crate::cli::commands::DayContext;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::sync::SyncLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::sheet::UpsertOutcome;
use crate::ui::messages::{error, success, warning};

/// Print and log a failed write; the error still ends the command and the
/// session keeps its unsynced changes.
pub(crate) fn report(
    pool: &DbPool,
    what: &str,
    result: AppResult<UpsertOutcome>,
) -> AppResult<UpsertOutcome> {
    if let Err(e) = &result {
        error(format!("Could not write the {what} row: {e}"));
        if let Err(log_err) = ttlog(&pool.conn, "sync_failed", what, &e.to_string()) {
            warning(format!("Could not log the failed {what} sync: {log_err}"));
        }
    }
    result
}

fn describe(outcome: UpsertOutcome) -> String {
    match outcome {
        UpsertOutcome::Updated(r) => format!("updated row {r}"),
        UpsertOutcome::Appended(r) => format!("appended row {r}"),
    }
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let mut ctx = DayContext::open(cli, cfg)?;
    ctx.save()?;

    let record = ctx.session.record.clone();
    let result = SyncLogic::sync_day(&mut ctx.pool, &record);
    let outcome = report(&ctx.pool, "routine", result)?;
    success(format!("Routine for {}: {}", record.date, describe(outcome)));

    if !ctx.session.meals.is_empty() {
        let meals = ctx.session.meal_record(&cfg.supplements_text);
        let result = SyncLogic::sync_meals(&mut ctx.pool, &meals);
        let outcome = report(&ctx.pool, "meals", result)?;
        success(format!("Meals for {}: {}", meals.date, describe(outcome)));
    }

    ctx.session.dirty = false;
    ctx.save()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn failed() -> AppResult<UpsertOutcome> {
        Err(AppError::MissingColumn {
            tab: "routine".into(),
            column: "Date".into(),
        })
    }

    fn log_lines(pool: &DbPool, operation: &str) -> i64 {
        pool.conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = ?1",
                [operation],
                |r| r.get(0),
            )
            .unwrap()
    }

    #[test]
    fn failed_write_is_logged_and_returned() {
        let pool = DbPool::in_memory().unwrap();
        let result = report(&pool, "routine", failed());
        assert!(matches!(result, Err(AppError::MissingColumn { .. })));
        assert_eq!(log_lines(&pool, "sync_failed"), 1);
    }

    #[test]
    fn unloggable_failure_still_returns_the_write_error() {
        let pool = DbPool::in_memory().unwrap();
        pool.conn.execute_batch("DROP TABLE log").unwrap();
        let result = report(&pool, "meals", failed());
        assert!(matches!(result, Err(AppError::MissingColumn { .. })));
    }

    #[test]
    fn successful_write_is_not_logged_as_failed() {
        let pool = DbPool::in_memory().unwrap();
        let result = report(&pool, "routine", Ok(UpsertOutcome::Appended(2)));
        assert_eq!(result.unwrap(), UpsertOutcome::Appended(2));
        assert_eq!(log_lines(&pool, "sync_failed"), 0);
    }
}
