use crate::cli::commands::DayContext;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::models::workout::Workout;
use crate::ui::messages::{info, success, warning};
use crate::utils::time::parse_optional_time;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Set {
        wake,
        workout_time,
        bed,
        workout,
        sleep_score,
        feeling,
        diary,
    } = &cli.command
    else {
        return Ok(());
    };

    // validate everything before touching the session
    let wake = parse_optional_time(wake.as_ref())?;
    let workout_time = parse_optional_time(workout_time.as_ref())?;
    let bed = parse_optional_time(bed.as_ref())?;

    let mut ctx = DayContext::open(cli, cfg)?;
    let rec = &mut ctx.session.record;
    let mut changed = Vec::new();

    if let Some(t) = wake {
        rec.anchors.wake = t;
        changed.push("wake");
    }
    if let Some(t) = workout_time {
        rec.anchors.workout = t;
        changed.push("workout time");
    }
    if let Some(t) = bed {
        rec.anchors.bed = t;
        changed.push("bed");
    }
    if let Some(label) = workout {
        let w = Workout::from_label(label);
        if w.is_workout_day() && !cfg.workout_options.iter().any(|o| o == label) {
            warning(format!("'{label}' is not one of the configured workout options"));
        }
        rec.workout = w;
        changed.push("workout");
    }
    if let Some(score) = sleep_score {
        rec.sleep_score = *score;
        changed.push("sleep score");
    }
    if let Some(f) = feeling {
        rec.body_feeling = f.clone();
        changed.push("feeling");
    }
    if let Some(d) = diary {
        rec.diary = d.clone();
        changed.push("diary");
    }

    if changed.is_empty() {
        info("Nothing to set.");
        return Ok(());
    }

    let date = rec.date;
    ctx.session.dirty = true;
    ctx.save()?;
    ttlog(&ctx.pool.conn, "set", &date.to_string(), &changed.join(", "))?;
    success(format!("Updated {} for {}", changed.join(", "), date));
    Ok(())
}
