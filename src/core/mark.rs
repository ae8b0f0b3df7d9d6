use crate::config::Config;
use crate::core::routine::{self, Transition};
use crate::core::schedule::build_plan;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::day_record::DayRecord;
use crate::models::step::Step;
use crate::models::step_state::StepState;
use crate::utils::date::now_time;
use crate::utils::time::fmt_hm;
use chrono::NaiveTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkAction {
    /// Done at the given time, or at the default time when `None`.
    Complete(Option<NaiveTime>),
    Skip,
    Undo,
}

impl MarkAction {
    fn operation(&self) -> &'static str {
        match self {
            MarkAction::Complete(_) => "done",
            MarkAction::Skip => "skip",
            MarkAction::Undo => "undo",
        }
    }
}

pub struct MarkLogic;

impl MarkLogic {
    /// Apply `action` to the record's progress and log every transition.
    pub fn apply(
        pool: &DbPool,
        cfg: &Config,
        record: &mut DayRecord,
        step: Step,
        action: MarkAction,
    ) -> AppResult<Vec<Transition>> {
        let transitions = match action {
            MarkAction::Complete(at) => {
                let at = at.unwrap_or_else(|| Self::default_time(cfg, record, step));
                routine::complete(&mut record.progress, step, at)
            }
            MarkAction::Skip => routine::skip(&mut record.progress, step),
            MarkAction::Undo => routine::undo(&mut record.progress, step),
        };

        for t in &transitions {
            ttlog(
                &pool.conn,
                action.operation(),
                t.step.id(),
                &format!("{}: {} → {}", record.date, describe(t.from), describe(t.to)),
            )?;
        }

        Ok(transitions)
    }

    /// The step's target when `default_to_target` is set, else the current
    /// time at the configured offset.
    pub fn default_time(cfg: &Config, record: &DayRecord, step: Step) -> NaiveTime {
        if cfg.default_to_target
            && let Some(p) = build_plan(record).get(step)
        {
            return p.default_time;
        }
        now_time(cfg.offset())
    }
}

pub fn describe(state: StepState) -> String {
    match state {
        StepState::Pending => "pending".to_string(),
        StepState::Done(t) => format!("done at {}", fmt_hm(t)),
        StepState::Skipped => "skipped".to_string(),
    }
}
