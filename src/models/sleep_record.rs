use crate::errors::{AppError, AppResult};
use crate::sheet::layout::{Layout, SLEEP, SheetRecord};
use crate::utils::date::parse_date;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Field names expected from the extraction service, in column order.
pub const SLEEP_FIELDS: [&str; 12] = [
    "date",
    "sleep_score",
    "total_sleep",
    "fall_asleep",
    "wake_up",
    "rem",
    "light",
    "deep",
    "avg_hr",
    "min_hr",
    "max_hr",
    "resting_hr",
];

/// A single cell value reported by the extraction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    fn from_json(v: &Value) -> Option<Self> {
        match v {
            Value::Number(n) => n
                .as_i64()
                .map(Scalar::Int)
                .or_else(|| n.as_f64().map(Scalar::Float)),
            Value::String(s) => Some(Scalar::Text(s.clone())),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// One night of sleep as read from the tracker screenshots.
/// Values are kept in the order of `SLEEP_FIELDS`; `None` = not reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    values: Vec<Option<Scalar>>,
}

impl SleepRecord {
    /// Validate an extracted JSON object.
    ///
    /// Every field must be present and scalar unless `allow_missing` is set,
    /// in which case absent or null fields become blank cells. Nested values
    /// and a `date` that is not `YYYY-MM-DD` are always rejected.
    pub fn from_object(obj: &Map<String, Value>, allow_missing: bool) -> AppResult<Self> {
        let mut values = Vec::with_capacity(SLEEP_FIELDS.len());
        let mut missing = Vec::new();

        for name in SLEEP_FIELDS {
            match obj.get(name) {
                None | Some(Value::Null) => {
                    missing.push(name.to_string());
                    values.push(None);
                }
                Some(v) => {
                    let scalar = Scalar::from_json(v).ok_or_else(|| {
                        AppError::MalformedExtraction(format!("{name} is not a scalar value"))
                    })?;
                    values.push(Some(scalar));
                }
            }
        }

        if !missing.is_empty() && !allow_missing {
            return Err(AppError::MissingFields(missing));
        }

        if let Some(Some(d)) = values.first() {
            let text = d.to_string();
            if parse_date(&text).is_none() {
                return Err(AppError::MalformedExtraction(format!(
                    "date is not YYYY-MM-DD: {text}"
                )));
            }
        }

        Ok(Self { values })
    }

    pub fn get(&self, field: &str) -> Option<&Scalar> {
        SLEEP_FIELDS
            .iter()
            .position(|f| *f == field)
            .and_then(|i| self.values.get(i))
            .and_then(Option::as_ref)
    }

    pub fn date(&self) -> Option<String> {
        self.get("date").map(Scalar::to_string)
    }

    /// (field, display value) pairs, blanks for absent values.
    pub fn cells(&self) -> Vec<(&'static str, String)> {
        SLEEP_FIELDS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let v = self
                    .values
                    .get(i)
                    .and_then(Option::as_ref)
                    .map(Scalar::to_string)
                    .unwrap_or_default();
                (*name, v)
            })
            .collect()
    }
}

impl SheetRecord for SleepRecord {
    const LAYOUT: &'static Layout = &SLEEP;

    fn key(&self) -> String {
        self.date().unwrap_or_default()
    }

    fn fields(&self) -> AppResult<Vec<(&'static str, String)>> {
        Ok(self.cells())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full() -> Map<String, Value> {
        let v = json!({
            "date": "2025-01-01", "sleep_score": 84, "total_sleep": "7h 12m",
            "fall_asleep": "23:48", "wake_up": "07:00", "rem": "1h 40m",
            "light": "4h 2m", "deep": "1h 30m", "avg_hr": 58.5, "min_hr": 49,
            "max_hr": 77, "resting_hr": 52
        });
        v.as_object().unwrap().clone()
    }

    #[test]
    fn complete_object_is_accepted() {
        let rec = SleepRecord::from_object(&full(), false).unwrap();
        assert_eq!(rec.date().as_deref(), Some("2025-01-01"));
        assert_eq!(rec.get("sleep_score"), Some(&Scalar::Int(84)));
        assert_eq!(rec.get("avg_hr"), Some(&Scalar::Float(58.5)));
        let cells = rec.cells();
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[2], ("total_sleep", "7h 12m".to_string()));
    }

    #[test]
    fn missing_fields_fail_loudly_unless_allowed() {
        let mut obj = full();
        obj.remove("rem");
        obj.insert("deep".into(), Value::Null);

        match SleepRecord::from_object(&obj, false) {
            Err(AppError::MissingFields(f)) => assert_eq!(f, vec!["rem", "deep"]),
            other => panic!("unexpected: {other:?}"),
        }

        let rec = SleepRecord::from_object(&obj, true).unwrap();
        assert_eq!(rec.get("rem"), None);
        assert_eq!(rec.cells()[5].1, "");
    }

    #[test]
    fn nested_values_and_bad_dates_are_rejected() {
        let mut obj = full();
        obj.insert("avg_hr".into(), json!({"value": 58}));
        assert!(matches!(
            SleepRecord::from_object(&obj, true),
            Err(AppError::MalformedExtraction(_))
        ));

        let mut obj = full();
        obj.insert("date".into(), json!("Jan 1"));
        assert!(matches!(
            SleepRecord::from_object(&obj, false),
            Err(AppError::MalformedExtraction(_))
        ));
    }

    #[test]
    fn pending_record_survives_session_serialization() {
        let rec = SleepRecord::from_object(&full(), false).unwrap();
        let raw = serde_json::to_string(&rec).unwrap();
        let back: SleepRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.get("min_hr"), Some(&Scalar::Int(49)));
        assert_eq!(back.get("total_sleep"), Some(&Scalar::Text("7h 12m".into())));
    }
}
