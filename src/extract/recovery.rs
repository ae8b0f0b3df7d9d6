//! Recover a JSON object from a model answer that may be wrapped in prose
//! or code fences.
//!
//! This is a heuristic, not a parser: several JSON-looking fragments in the
//! surrounding text, or stray braces, can defeat it.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z]*").expect("fence pattern is valid"));

/// Remove ```` ```json ```` / ```` ``` ```` markers and surrounding blanks.
pub fn strip_fences(text: &str) -> String {
    FENCE.replace_all(text, "").trim().to_string()
}

fn as_object(v: Value) -> AppResult<Map<String, Value>> {
    match v {
        Value::Object(m) => Ok(m),
        other => Err(AppError::MalformedExtraction(format!(
            "expected a JSON object, got {}",
            kind(&other)
        ))),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// 1. strip code fences and parse;
/// 2. otherwise parse the slice from the first `{` to the last `}`.
pub fn recover_object(text: &str) -> AppResult<Map<String, Value>> {
    let stripped = strip_fences(text);
    if let Ok(v) = serde_json::from_str::<Value>(&stripped) {
        return as_object(v);
    }

    let start = text.find('{').ok_or(AppError::NoJsonFound)?;
    let end = text.rfind('}').ok_or(AppError::NoJsonFound)?;
    if end < start {
        return Err(AppError::NoJsonFound);
    }

    let slice = &text[start..=end];
    let v: Value = serde_json::from_str(slice)
        .map_err(|e| AppError::MalformedExtraction(format!("{e} in {slice:?}")))?;
    as_object(v)
}
