//! Target times of the routine steps.
//!
//! A few steps derive their target from an anchor: the actual completion
//! time of an earlier step, or one of the configured wake / workout / bed
//! times. The graph is tiny and acyclic and is evaluated front to back on
//! every render:
//!
//! - muscle wake-up  = ignition done-time + 30 min
//! - pre-workout     = workout time − 30 min
//! - workout         = workout time
//! - recovery set    = bed time − 90 min (bath), bed time − 50 min (supplements)

use crate::models::day_record::DayRecord;
use crate::models::step::Step;
use crate::models::step_state::StepState;
use crate::utils::time::{add_minutes, fmt_hm};
use chrono::{NaiveDate, NaiveTime};

pub const MUSCLE_AFTER_IGNITION: i64 = 30;
pub const PRE_WORKOUT_BEFORE_WORKOUT: i64 = -30;
pub const BATH_BEFORE_BED: i64 = -90;
pub const SUPPLEMENTS_BEFORE_BED: i64 = -50;

const UNKNOWN: &str = "--:--";

/// A derived time-of-day and how to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub caption: &'static str,
    pub time: NaiveTime,
    /// False when the anchor was missing and `time` is the fallback.
    pub known: bool,
}

impl Target {
    pub fn label(&self) -> String {
        let t = if self.known {
            fmt_hm(self.time)
        } else {
            UNKNOWN.to_string()
        };
        format!("{}{}", self.caption, t)
    }
}

/// `anchor + offset` on the wall clock, or `fallback` without an anchor.
pub fn derive(anchor: Option<NaiveTime>, offset_minutes: i64, fallback: NaiveTime) -> Target {
    match anchor {
        Some(a) => Target {
            caption: "",
            time: add_minutes(a, offset_minutes),
            known: true,
        },
        None => Target {
            caption: "",
            time: fallback,
            known: false,
        },
    }
}

fn captioned(mut t: Target, caption: &'static str) -> Target {
    t.caption = caption;
    t
}

#[derive(Debug, Clone)]
pub struct PlannedStep {
    pub step: Step,
    pub title: String,
    pub state: StepState,
    pub targets: Vec<Target>,
    /// Time proposed when the step is completed without an explicit time.
    pub default_time: NaiveTime,
    pub items: Vec<&'static str>,
    pub visible: bool,
}

impl PlannedStep {
    pub fn target_label(&self) -> Option<String> {
        if self.targets.is_empty() {
            return None;
        }
        Some(
            self.targets
                .iter()
                .map(Target::label)
                .collect::<Vec<_>>()
                .join(" / "),
        )
    }
}

#[derive(Debug, Clone)]
pub struct Plan {
    pub date: NaiveDate,
    pub steps: Vec<PlannedStep>,
}

impl Plan {
    pub fn get(&self, step: Step) -> Option<&PlannedStep> {
        self.steps.iter().find(|p| p.step == step)
    }

    pub fn visible(&self) -> impl Iterator<Item = &PlannedStep> {
        self.steps.iter().filter(|p| p.visible)
    }
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

fn base(step: Step) -> NaiveTime {
    step.base_default().unwrap_or(NaiveTime::MIN)
}

/// Evaluate every step of the day, in routine order.
pub fn build_plan(record: &DayRecord) -> Plan {
    let anchors = &record.anchors;
    let progress = &record.progress;
    let workout_day = record.workout.is_workout_day();
    let label = record.workout.label();

    let mut steps = Vec::with_capacity(Step::ALL.len());

    for step in Step::ALL {
        let state = progress.get(step);
        let mut items: Vec<&'static str> = step.items().to_vec();
        let mut title = step.title().to_string();

        let (targets, default_time) = match step {
            Step::MorningMuscle => {
                // a pending ignition still anchors on its planned time
                let anchor = match progress.get(Step::MorningIgnition) {
                    StepState::Done(t) => Some(t),
                    StepState::Pending => Some(base(Step::MorningIgnition)),
                    StepState::Skipped => None,
                };
                let t = derive(anchor, MUSCLE_AFTER_IGNITION, hm(7, 45));
                let time = t.time;
                (vec![captioned(t, "start ")], time)
            }
            Step::EveningPreWorkout => {
                title = format!("{} ({})", title, label);
                let t = derive(Some(anchors.workout), PRE_WORKOUT_BEFORE_WORKOUT, anchors.workout);
                let time = t.time;
                (vec![t], time)
            }
            Step::EveningWorkout => {
                title = format!("{} ({})", title, label);
                let t = derive(Some(anchors.workout), 0, anchors.workout);
                let time = t.time;
                (vec![t], time)
            }
            Step::BedtimeRoutine => {
                if !workout_day {
                    items.push("Carnitine x2 (moved from the evening)");
                }
                let bath = captioned(
                    derive(Some(anchors.bed), BATH_BEFORE_BED, anchors.bed),
                    "bath ",
                );
                let supplements = captioned(
                    derive(Some(anchors.bed), SUPPLEMENTS_BEFORE_BED, anchors.bed),
                    "supplements ",
                );
                let time = bath.time;
                (vec![bath, supplements], time)
            }
            other => (Vec::new(), base(other)),
        };

        steps.push(PlannedStep {
            step,
            title,
            state,
            targets,
            default_time,
            items,
            visible: workout_day || !step.requires_workout(),
        });
    }

    Plan {
        date: record.date,
        steps,
    }
}
