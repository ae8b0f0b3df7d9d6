use super::step::Step;
use crate::errors::{AppError, AppResult};
use crate::utils::time::{fmt_hm, parse_time};
use chrono::NaiveTime;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted marker for a step deliberately not performed.
pub const SKIPPED: &str = "SKIPPED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Pending,
    Done(NaiveTime),
    Skipped,
}

impl StepState {
    /// Value stored in the progress map; `None` for pending steps.
    pub fn to_cell(&self) -> Option<String> {
        match self {
            StepState::Pending => None,
            StepState::Done(t) => Some(fmt_hm(*t)),
            StepState::Skipped => Some(SKIPPED.to_string()),
        }
    }

    pub fn from_cell(value: &str) -> AppResult<Self> {
        let v = value.trim();
        if v.eq_ignore_ascii_case(SKIPPED) {
            return Ok(StepState::Skipped);
        }
        parse_time(v)
            .map(StepState::Done)
            .ok_or_else(|| AppError::InvalidTime(v.to_string()))
    }
}

/// Per-step state for one day. Pending steps are simply absent.
///
/// Entries whose id is not a known step (rows written by a different step
/// set) are carried through untouched and written back after the known ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    states: BTreeMap<Step, StepState>,
    unknown: BTreeMap<String, String>,
}

impl Progress {
    pub fn get(&self, step: Step) -> StepState {
        self.states
            .get(&step)
            .copied()
            .unwrap_or(StepState::Pending)
    }

    pub fn set(&mut self, step: Step, state: StepState) {
        match state {
            StepState::Pending => {
                self.states.remove(&step);
            }
            other => {
                self.states.insert(step, other);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Step, StepState)> + '_ {
        self.states.iter().map(|(s, st)| (*s, *st))
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn unknown_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.unknown.keys().map(String::as_str)
    }

    /// Compact JSON object, keys in routine order.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the persisted progress blob. An empty cell means no progress.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Progress::default());
        }
        let map: BTreeMap<String, String> = serde_json::from_str(raw)
            .map_err(|e| AppError::MalformedRecord(format!("progress is not a JSON map: {e}")))?;
        Self::from_map(map)
    }

    fn from_map(map: BTreeMap<String, String>) -> AppResult<Self> {
        let mut progress = Progress::default();
        for (k, v) in map {
            let Some(step) = Step::from_id(&k) else {
                progress.unknown.insert(k, v);
                continue;
            };
            let state = StepState::from_cell(&v)
                .map_err(|_| AppError::MalformedRecord(format!("{k}: invalid value '{v}'")))?;
            progress.set(step, state);
        }
        Ok(progress)
    }
}

impl Serialize for Progress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.states.len() + self.unknown.len()))?;
        for (step, state) in &self.states {
            if let Some(cell) = state.to_cell() {
                map.serialize_entry(step.id(), &cell)?;
            }
        }
        for (id, cell) in &self.unknown {
            map.serialize_entry(id, cell)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Progress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, String>::deserialize(deserializer)?;
        Progress::from_map(map).map_err(serde::de::Error::custom)
    }
}
