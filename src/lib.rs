//! dayboard library root.
//! Exposes the CLI parser, the high-level run() function and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod extract;
pub mod models;
pub mod session;
pub mod sheet;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use utils::path::expand_tilde;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use cli::commands as c;

    match &cli.command {
        Commands::Init => c::init::handle(cli),
        Commands::Config { .. } => c::config::handle(&cli.command, cfg),
        Commands::Db { .. } => c::db::handle(&cli.command, cfg),
        Commands::Log { .. } => c::log::handle(&cli.command, cfg),
        Commands::Status => c::status::handle(cli, cfg),
        Commands::Done { .. } | Commands::Skip { .. } | Commands::Undo { .. } => {
            c::mark::handle(cli, cfg)
        }
        Commands::Set { .. } => c::set::handle(cli, cfg),
        Commands::Meals { .. } => c::meals::handle(cli, cfg),
        Commands::Sync => c::sync::handle(cli, cfg),
        Commands::List { .. } => c::list::handle(&cli.command, cfg),
        Commands::Sleep { .. } => c::sleep::handle(cli, cfg),
        Commands::Backup { .. } => c::backup::handle(&cli.command, cfg),
        Commands::Export { .. } => c::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `init` writes the config file itself
    if matches!(cli.command, Commands::Init) {
        return dispatch(&cli, &Config::default());
    }

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(session) = &cli.session {
        cfg.session_file = session.clone();
    }
    cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
    cfg.session_file = expand_tilde(&cfg.session_file)
        .to_string_lossy()
        .to_string();

    dispatch(&cli, &cfg)
}
