use crate::cli::commands::DayContext;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::mark::{MarkAction, MarkLogic, describe};
use crate::errors::{AppError, AppResult};
use crate::models::step::Step;
use crate::ui::messages::{info, success, warning};
use crate::utils::time::parse_optional_time;

/// `done`, `skip` and `undo`.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let (raw_step, action) = match &cli.command {
        Commands::Done { step, at } => (step, MarkAction::Complete(parse_optional_time(at.as_ref())?)),
        Commands::Skip { step } => (step, MarkAction::Skip),
        Commands::Undo { step } => (step, MarkAction::Undo),
        _ => return Ok(()),
    };

    let step = Step::parse(raw_step).ok_or_else(|| AppError::UnknownStep(raw_step.clone()))?;

    let mut ctx = DayContext::open(cli, cfg)?;

    if step.requires_workout() && !ctx.session.record.workout.is_workout_day() {
        warning(format!(
            "{} is hidden on rest days (set a workout with `dayboard set --workout`)",
            step
        ));
    }

    let transitions = MarkLogic::apply(&ctx.pool, cfg, &mut ctx.session.record, step, action)?;
    if !transitions.is_empty() {
        ctx.session.dirty = true;
    }
    ctx.save()?;

    if transitions.is_empty() {
        info(format!("{} is already {}", step, describe(ctx.session.record.progress.get(step))));
        return Ok(());
    }

    for t in transitions {
        success(format!("{} → {}", t.step, describe(t.to)));
    }
    Ok(())
}
