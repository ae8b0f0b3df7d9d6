//! Step state machine.
//!
//! ```text
//! Pending ──complete(t)──▶ Done(t) ──undo──▶ Pending
//! Pending ──skip────────▶ Skipped ──undo──▶ Pending
//! ```
//!
//! Skipping the workout also skips the pre-workout step. The cascade only
//! goes that way and undo never cascades.

use crate::models::step::Step;
use crate::models::step_state::{Progress, StepState};
use chrono::NaiveTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub step: Step,
    pub from: StepState,
    pub to: StepState,
}

fn apply(progress: &mut Progress, step: Step, to: StepState, out: &mut Vec<Transition>) {
    let from = progress.get(step);
    if from == to {
        return;
    }
    progress.set(step, to);
    out.push(Transition { step, from, to });
}

/// Mark `step` done at `at`, replacing any earlier time.
pub fn complete(progress: &mut Progress, step: Step, at: NaiveTime) -> Vec<Transition> {
    let mut out = Vec::new();
    apply(progress, step, StepState::Done(at), &mut out);
    out
}

pub fn skip(progress: &mut Progress, step: Step) -> Vec<Transition> {
    let mut out = Vec::new();
    apply(progress, step, StepState::Skipped, &mut out);
    if step == Step::EveningWorkout {
        apply(progress, Step::EveningPreWorkout, StepState::Skipped, &mut out);
    }
    out
}

pub fn undo(progress: &mut Progress, step: Step) -> Vec<Transition> {
    let mut out = Vec::new();
    apply(progress, step, StepState::Pending, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn complete_overwrites_previous_time() {
        let mut p = Progress::default();
        complete(&mut p, Step::Lunch, t(12, 0));
        let tr = complete(&mut p, Step::Lunch, t(12, 40));
        assert_eq!(tr[0].from, StepState::Done(t(12, 0)));
        assert_eq!(p.get(Step::Lunch), StepState::Done(t(12, 40)));
    }

    #[test]
    fn skipping_workout_cascades_to_pre_workout() {
        let mut p = Progress::default();
        let tr = skip(&mut p, Step::EveningWorkout);
        assert_eq!(tr.len(), 2);
        assert_eq!(p.get(Step::EveningWorkout), StepState::Skipped);
        assert_eq!(p.get(Step::EveningPreWorkout), StepState::Skipped);
    }

    #[test]
    fn cascade_overrides_a_done_pre_workout() {
        let mut p = Progress::default();
        complete(&mut p, Step::EveningPreWorkout, t(17, 30));
        skip(&mut p, Step::EveningWorkout);
        assert_eq!(p.get(Step::EveningPreWorkout), StepState::Skipped);
    }

    #[test]
    fn cascade_is_one_directional() {
        let mut p = Progress::default();
        skip(&mut p, Step::EveningWorkout);

        undo(&mut p, Step::EveningPreWorkout);
        assert_eq!(p.get(Step::EveningPreWorkout), StepState::Pending);
        assert_eq!(p.get(Step::EveningWorkout), StepState::Skipped);

        let mut p = Progress::default();
        skip(&mut p, Step::EveningPreWorkout);
        assert_eq!(p.get(Step::EveningWorkout), StepState::Pending);
    }

    #[test]
    fn undo_reverts_done_and_skipped() {
        let mut p = Progress::default();
        complete(&mut p, Step::MorningWalk, t(8, 5));
        skip(&mut p, Step::Lunch);
        undo(&mut p, Step::MorningWalk);
        undo(&mut p, Step::Lunch);
        assert!(p.is_empty());
        assert!(undo(&mut p, Step::Lunch).is_empty());
    }
}
