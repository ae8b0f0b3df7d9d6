use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// The nine fixed routine steps, in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    MorningIgnition,
    MorningMuscle,
    MorningWalk,
    MorningBreakfast,
    Lunch,
    EveningPreWorkout,
    EveningWorkout,
    DinnerAfter,
    BedtimeRoutine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Morning,
    Lunch,
    Evening,
    Night,
}

impl Section {
    pub fn heading(&self) -> &'static str {
        match self {
            Section::Morning => "🌅 Morning",
            Section::Lunch => "☀️  Lunch",
            Section::Evening => "🌆 Evening (extra burn)",
            Section::Night => "🌙 Night & recovery",
        }
    }
}

impl Step {
    pub const ALL: [Step; 9] = [
        Step::MorningIgnition,
        Step::MorningMuscle,
        Step::MorningWalk,
        Step::MorningBreakfast,
        Step::Lunch,
        Step::EveningPreWorkout,
        Step::EveningWorkout,
        Step::DinnerAfter,
        Step::BedtimeRoutine,
    ];

    /// Stable identifier, used as key in the persisted progress map.
    pub fn id(&self) -> &'static str {
        match self {
            Step::MorningIgnition => "morning_ignition",
            Step::MorningMuscle => "morning_muscle",
            Step::MorningWalk => "morning_walk",
            Step::MorningBreakfast => "morning_breakfast",
            Step::Lunch => "lunch",
            Step::EveningPreWorkout => "evening_pre_workout",
            Step::EveningWorkout => "evening_workout",
            Step::DinnerAfter => "dinner_after",
            Step::BedtimeRoutine => "bedtime_routine",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        Step::ALL.into_iter().find(|st| st.id() == s)
    }

    /// 1-based position in the routine.
    pub fn number(&self) -> usize {
        Step::ALL
            .iter()
            .position(|s| s == self)
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    /// Accept either the id (case-insensitive, `-` allowed for `_`) or the number.
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        if let Ok(n) = s.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Step::ALL.get(i).copied());
        }
        Step::from_id(&s.to_lowercase().replace('-', "_"))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::MorningIgnition => "Ignition phase",
            Step::MorningMuscle => "Muscle wake-up & contrast shower",
            Step::MorningWalk => "Morning walk (light and air)",
            Step::MorningBreakfast => "Breakfast & supplements",
            Step::Lunch => "Lunch (keep metabolism up)",
            Step::EveningPreWorkout => "Pre-workout",
            Step::EveningWorkout => "Workout",
            Step::DinnerAfter => "After dinner",
            Step::BedtimeRoutine => "Recovery set (90 min before bed)",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Step::MorningIgnition
            | Step::MorningMuscle
            | Step::MorningWalk
            | Step::MorningBreakfast => Section::Morning,
            Step::Lunch => Section::Lunch,
            Step::EveningPreWorkout | Step::EveningWorkout => Section::Evening,
            Step::DinnerAfter | Step::BedtimeRoutine => Section::Night,
        }
    }

    pub fn items(&self) -> &'static [&'static str] {
        match self {
            Step::MorningIgnition => &[
                "MCT oil 7g",
                "Carnitine x2",
                "Vitamin C x3",
                "QP Kowa alpha x1",
                "Vitamin D x1",
            ],
            Step::MorningMuscle => &[
                "Yoga, plank 2 min, squats x10",
                "Hot shower 3 min → cold 1 min",
            ],
            Step::MorningWalk => &["Outdoor walk 15-20 min", "(bike 20 min if you can't go out)"],
            Step::MorningBreakfast => &[
                "Base Bread x1",
                "Ebios x10",
                "Bio-Three x2",
                "Stress B x1",
                "Biotin x2",
            ],
            Step::Lunch => &["Base Bread x1-2", "Ebios x10", "Bio-Three x2", "Vitamin C x2"],
            Step::EveningPreWorkout => &["Carnitine x2 (30 min before)", "Light warm-up"],
            Step::EveningWorkout => &["Watch heart rate", "Hydrate"],
            Step::DinnerAfter => &["Rice max 120g", "Ebios x10", "Bio-Three x2", "Stress B x1"],
            Step::BedtimeRoutine => &[
                "Bath 40°C 15 min, unwind after",
                "QP Kowa Healing x2",
                "Magnesium x2",
                "Theanine x1",
                "Vitamin C x2",
            ],
        }
    }

    /// Fixed default completion time for steps without a derived target.
    pub fn base_default(&self) -> Option<NaiveTime> {
        let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0);
        match self {
            Step::MorningIgnition => hm(7, 15),
            Step::MorningMuscle => hm(7, 45),
            Step::MorningWalk => hm(8, 0),
            Step::MorningBreakfast => hm(8, 30),
            Step::Lunch => hm(12, 0),
            Step::DinnerAfter => hm(19, 0),
            Step::EveningPreWorkout | Step::EveningWorkout | Step::BedtimeRoutine => None,
        }
    }

    /// Only shown on days with a planned workout.
    pub fn requires_workout(&self) -> bool {
        matches!(self, Step::EveningPreWorkout | Step::EveningWorkout)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}
