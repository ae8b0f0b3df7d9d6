use serde::{Deserialize, Serialize};

/// Labels read back as "no workout today". The Japanese one comes from
/// rows written by earlier versions of the sheet.
const REST_LABELS: &[&str] = &["none", "なし", "rest", "-"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Workout {
    #[default]
    Rest,
    Activity(String),
}

impl Workout {
    pub fn from_label(label: &str) -> Self {
        let l = label.trim();
        if l.is_empty() || REST_LABELS.iter().any(|r| r.eq_ignore_ascii_case(l)) {
            Workout::Rest
        } else {
            Workout::Activity(l.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Workout::Rest => "none",
            Workout::Activity(a) => a,
        }
    }

    pub fn is_workout_day(&self) -> bool {
        matches!(self, Workout::Activity(_))
    }
}

impl From<String> for Workout {
    fn from(s: String) -> Self {
        Workout::from_label(&s)
    }
}

impl From<Workout> for String {
    fn from(w: Workout) -> Self {
        w.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_sentinels() {
        assert_eq!(Workout::from_label("none"), Workout::Rest);
        assert_eq!(Workout::from_label("なし"), Workout::Rest);
        assert_eq!(Workout::from_label(""), Workout::Rest);
        assert!(Workout::from_label("Sauna").is_workout_day());
        assert_eq!(Workout::Rest.label(), "none");
    }
}
