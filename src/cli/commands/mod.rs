pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod mark;
pub mod meals;
pub mod set;
pub mod sleep;
pub mod status;
pub mod sync;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::day::DayLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::session::{Session, SessionStore};

/// Everything a day-level command works on.
pub(crate) struct DayContext {
    pub pool: DbPool,
    pub store: SessionStore,
    pub session: Session,
}

impl DayContext {
    pub fn open(cli: &Cli, cfg: &Config) -> AppResult<Self> {
        let date = cli.day(cfg)?;
        let pool = DbPool::open(&cfg.database)?;
        let store = SessionStore::new(&cfg.session_file);
        let session = DayLogic::open(cfg, &store, &pool, date)?;
        Ok(Self {
            pool,
            store,
            session,
        })
    }

    pub fn save(&self) -> AppResult<()> {
        DayLogic::save(&self.store, &self.session)
    }
}
