use crate::cli::commands::DayContext;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::schedule::build_plan;
use crate::errors::AppResult;
use crate::ui::render::render_status;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let ctx = DayContext::open(cli, cfg)?;
    // keep the hydrated session so the next call does not re-read the row
    ctx.save()?;

    let plan = build_plan(&ctx.session.record);
    print!("{}", render_status(&ctx.session, &plan));
    Ok(())
}
