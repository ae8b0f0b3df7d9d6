use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::range_bounds;
use crate::utils::table::Table;

const MAX_COLUMN_WIDTH: usize = 28;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { tab, period } = cmd {
        let bounds = match period.as_deref() {
            None | Some("all") => None,
            Some(p) => Some(range_bounds(p).map_err(AppError::InvalidDate)?),
        };

        let pool = DbPool::open(&cfg.database)?;
        let view = ListLogic::load(&pool.conn, *tab, bounds)?;

        if view.is_empty() {
            println!("No rows in '{}'.", tab.name());
            return Ok(());
        }

        let count = view.rows.len();
        let table = Table::fitted(&view.header, view.rows, MAX_COLUMN_WIDTH);
        print!("{}", table.render());
        println!("\n{} row(s) in '{}'", count, tab.name());
    }
    Ok(())
}
