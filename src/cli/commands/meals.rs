use crate::cli::commands::DayContext;
use crate::cli::commands::sync::report;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::sync::SyncLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Meals {
        breakfast,
        lunch,
        dinner,
        sync,
    } = &cli.command
    else {
        return Ok(());
    };

    let mut ctx = DayContext::open(cli, cfg)?;
    let meals = &mut ctx.session.meals;

    if let Some(b) = breakfast {
        meals.breakfast = b.clone();
    }
    if let Some(l) = lunch {
        meals.lunch = l.clone();
    }
    if let Some(d) = dinner {
        meals.dinner = d.clone();
    }
    let noted = breakfast.is_some() || lunch.is_some() || dinner.is_some();
    if noted {
        ctx.session.dirty = true;
    }
    ctx.save()?;

    if noted {
        success(format!("Meals noted for {}", ctx.session.date()));
    }

    if *sync {
        let record = ctx.session.meal_record(&cfg.supplements_text);
        let result = SyncLogic::sync_meals(&mut ctx.pool, &record);
        let outcome = report(&ctx.pool, "meals", result)?;
        success(format!("Meals row {} written", outcome.row()));
    }

    Ok(())
}
