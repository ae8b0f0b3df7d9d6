//! Terminal rendering of the day board.

use crate::core::schedule::{Plan, PlannedStep};
use crate::models::step::Section;
use crate::models::step_state::StepState;
use crate::session::Session;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW, colorize_optional};
use crate::utils::formatting::{bold, dim, pad_right, strike};
use crate::utils::time::fmt_hm;
use std::fmt::Write;

const CARD_WIDTH: usize = 34;
const WRAP_WIDTH: usize = 72;

fn card(p: &PlannedStep) -> String {
    let title = format!("{}. {}", p.step.number(), p.title);
    let mut out = String::new();

    match p.state {
        StepState::Done(t) => {
            let _ = writeln!(
                out,
                "  {GREEN}[✔]{RESET} {} {GREEN}Completed at {}{RESET}",
                pad_right(&strike(&title), CARD_WIDTH + strike("").len()),
                fmt_hm(t)
            );
        }
        StepState::Skipped => {
            let _ = writeln!(
                out,
                "  {GREY}[–]{RESET} {} {GREY}Skipped{RESET}",
                pad_right(&dim(&title), CARD_WIDTH + dim("").len())
            );
        }
        StepState::Pending => {
            let target = p
                .target_label()
                .map(|l| format!("{CYAN}target {}{RESET}", colorize_optional(&l)))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  [ ] {} {}",
                pad_right(&bold(&title), CARD_WIDTH + bold("").len()),
                target
            );
            for item in &p.items {
                let _ = writeln!(out, "        · {item}");
            }
        }
    }

    out
}

/// Visible steps grouped under their section headings.
pub fn render_plan(plan: &Plan) -> String {
    let mut out = String::new();
    let mut current: Option<Section> = None;

    for p in plan.visible() {
        let section = p.step.section();
        if current != Some(section) {
            let _ = writeln!(out, "\n{}", bold(section.heading()));
            current = Some(section);
        }
        out.push_str(&card(p));
    }

    out
}

fn field(label: &str, value: &str) -> String {
    let shown = if value.trim().is_empty() { "--" } else { value };
    format!("{CYAN}{label}:{RESET} {}", colorize_optional(shown))
}

pub fn render_status(session: &Session, plan: &Plan) -> String {
    let rec = &session.record;
    let mut out = String::new();

    let visible: Vec<&PlannedStep> = plan.visible().collect();
    let done = visible
        .iter()
        .filter(|p| matches!(p.state, StepState::Done(_)))
        .count();
    let skipped = visible
        .iter()
        .filter(|p| p.state == StepState::Skipped)
        .count();

    let _ = writeln!(out, "{}", bold(&format!("📋 {}", rec.date.format("%Y-%m-%d (%a)"))));
    let _ = writeln!(
        out,
        "{}   {}   {}   {}",
        field("Wake", &fmt_hm(rec.anchors.wake)),
        field("Workout", &format!("{} {}", fmt_hm(rec.anchors.workout), rec.workout.label())),
        field("Bed", &fmt_hm(rec.anchors.bed)),
        field("Sleep score", &rec.sleep_score.to_string()),
    );
    let _ = writeln!(
        out,
        "{YELLOW}{done}/{} done{RESET}, {skipped} skipped",
        visible.len()
    );

    out.push_str(&render_plan(plan));

    let meals = &session.meals;
    let _ = writeln!(out, "\n{}", bold("🍽  Meals"));
    let _ = writeln!(out, "  {}", field("Breakfast", &meals.breakfast));
    let _ = writeln!(out, "  {}", field("Lunch", &meals.lunch));
    let _ = writeln!(out, "  {}", field("Dinner", &meals.dinner));

    if !rec.body_feeling.trim().is_empty() {
        let _ = writeln!(out, "\n{}", field("Feeling", &rec.body_feeling));
    }

    if !rec.diary.trim().is_empty() {
        let _ = writeln!(out, "\n{}", bold("📝 Diary"));
        let opts = textwrap::Options::new(WRAP_WIDTH)
            .initial_indent("  ")
            .subsequent_indent("  ");
        let _ = writeln!(out, "{}", textwrap::fill(&rec.diary, opts));
    }

    if session.dirty {
        let _ = writeln!(out, "\n{YELLOW}Not synced yet: run `dayboard sync`{RESET}");
    }

    let parked: Vec<String> = session.parked_dates().map(|d| d.to_string()).collect();
    if !parked.is_empty() {
        let _ = writeln!(
            out,
            "{YELLOW}Other days with unsynced changes: {}{RESET}",
            parked.join(", ")
        );
    }

    if let Some(p) = &session.pending_sleep {
        let _ = writeln!(
            out,
            "\n{YELLOW}🛌 Sleep record for {} is waiting: run `dayboard sleep save`{RESET}",
            p.date().unwrap_or_else(|| "?".into())
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schedule::build_plan;
    use crate::models::day_record::Anchors;
    use crate::models::step::Step;
    use crate::models::workout::Workout;
    use chrono::{NaiveDate, NaiveTime};

    fn session() -> Session {
        Session::fresh(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            Anchors {
                wake: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
                workout: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                bed: NaiveTime::from_hms_opt(23, 30, 0).unwrap(),
            },
        )
    }

    #[test]
    fn done_cards_collapse_and_pending_cards_show_targets() {
        let mut s = session();
        s.record.progress.set(
            Step::MorningIgnition,
            StepState::Done(NaiveTime::from_hms_opt(7, 15, 0).unwrap()),
        );
        let out = render_status(&s, &build_plan(&s.record));

        assert!(out.contains("Completed at 07:15"));
        assert!(out.contains("start 07:45"));
        assert!(out.contains("bath 22:00 / supplements 22:40"));
        assert!(out.contains("1/7 done"));
        assert!(!out.contains("Pre-workout"));
    }

    #[test]
    fn workout_day_shows_evening_cards_and_wrapped_diary() {
        let mut s = session();
        s.record.workout = Workout::from_label("Sauna");
        s.record.diary = "word ".repeat(40);
        let out = render_status(&s, &build_plan(&s.record));

        assert!(out.contains("Sauna"));
        assert!(out.contains("0/9 done"));
        assert!(out.contains("Diary"));
        assert!(out.lines().all(|l| l.chars().count() < 200));
    }

    #[test]
    fn unsynced_days_are_listed() {
        let mut s = session();
        assert!(!render_status(&s, &build_plan(&s.record)).contains("Not synced"));

        s.dirty = true;
        let next = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let anchors = s.record.anchors;
        s.roll_to(next, anchors);
        s.dirty = true;
        let out = render_status(&s, &build_plan(&s.record));
        assert!(out.contains("Not synced yet"));
        assert!(out.contains("Other days with unsynced changes: 2025-01-01"));
    }
}
