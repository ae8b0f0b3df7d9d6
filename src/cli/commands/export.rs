use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::range_bounds;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        tab,
        format,
        file,
        range,
        force,
    } = cmd
    {
        let bounds = match range.as_deref() {
            None | Some("all") => None,
            Some(r) => Some(range_bounds(r).map_err(AppError::InvalidDate)?),
        };

        let mut pool = DbPool::open(&cfg.database)?;
        ExportLogic::export(&mut pool, *tab, *format, file, bounds, *force)?;
    }
    Ok(())
}
