use crate::cli::commands::DayContext;
use crate::cli::parser::{Cli, Commands, SleepCommand};
use crate::config::Config;
use crate::core::sleep::SleepLogic;
use crate::errors::{AppError, AppResult};
use crate::extract::{GeminiExtractor, ImageInput};
use crate::models::sleep_record::SleepRecord;
use crate::ui::messages::{info, success};
use crate::utils::colors::{CYAN, RESET};
use crate::utils::formatting::pad_right;
use std::path::Path;

fn print_record(rec: &SleepRecord) {
    for (name, value) in rec.cells() {
        let shown = if value.is_empty() { "--" } else { value.as_str() };
        println!("  {CYAN}{}{RESET} {}", pad_right(name, 12), shown);
    }
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Sleep { action } = &cli.command else {
        return Ok(());
    };

    let mut ctx = DayContext::open(cli, cfg)?;

    match action {
        SleepCommand::Analyze {
            files,
            save,
            allow_missing,
        } => {
            let images = files
                .iter()
                .map(|f| ImageInput::load(Path::new(f)))
                .collect::<AppResult<Vec<_>>>()?;

            let extractor = GeminiExtractor::from_config(cfg)?;
            info(format!("Analyzing {} screenshot(s)…", images.len()));
            let rec = SleepLogic::analyze(&extractor, &images, *allow_missing)?;
            print_record(&rec);

            if *save {
                let row = SleepLogic::save(&mut ctx.pool, &rec)?;
                success(format!("Sleep record appended at row {row}"));
            } else {
                ctx.session.pending_sleep = Some(rec);
                ctx.save()?;
                info("Record kept as pending: `dayboard sleep save` to append it.");
            }
        }
        SleepCommand::Save => {
            let rec = ctx
                .session
                .pending_sleep
                .clone()
                .ok_or(AppError::NoPendingSleep)?;
            let row = SleepLogic::save(&mut ctx.pool, &rec)?;
            ctx.session.pending_sleep = None;
            ctx.save()?;
            success(format!("Sleep record appended at row {row}"));
        }
        SleepCommand::Show => match &ctx.session.pending_sleep {
            Some(rec) => print_record(rec),
            None => info("No pending sleep record."),
        },
        SleepCommand::Discard => {
            if ctx.session.pending_sleep.take().is_some() {
                ctx.save()?;
                success("Pending sleep record discarded.");
            } else {
                info("No pending sleep record.");
            }
        }
    }

    Ok(())
}
