//! Configuration file upgrades: detect keys missing from an older
//! `dayboard.conf` and write them back with their default values.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys renamed since the first release: (old, new).
const RENAMED_KEYS: &[(&str, &str)] = &[
    ("wake_time", "default_wake_time"),
    ("bed_time", "default_bed_time"),
    ("gemini_model", "extract_model"),
];

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} does not contain a YAML mapping",
            path.display()
        ))),
    }
}

/// Return the names of the known keys absent from the file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    let missing = defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect();

    Ok(missing)
}

/// Rename legacy keys and add missing ones. Existing values are never
/// overwritten. Returns the list of actions performed (empty = no change).
pub fn migrate_config_file(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;
    let mut actions = Vec::new();

    for (old, new) in RENAMED_KEYS {
        let old_key = Value::String((*old).to_string());
        let new_key = Value::String((*new).to_string());
        if let Some(v) = current.remove(&old_key) {
            if !current.contains_key(&new_key) {
                current.insert(new_key, v);
                actions.push(format!("renamed '{old}' → '{new}'"));
            } else {
                actions.push(format!("dropped legacy key '{old}'"));
            }
        }
    }

    for (k, v) in defaults {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                actions.push(format!("added '{name}'"));
            }
            current.insert(k, v);
        }
    }

    if actions.is_empty() {
        info("Configuration already up to date.");
        return Ok(actions);
    }

    let serialized = serde_yaml::to_string(&Value::Mapping(current))?;
    fs::write(path, serialized)?;

    success(format!(
        "Configuration migrated ({} change(s)): {}",
        actions.len(),
        path.display()
    ));

    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_conf(name: &str, content: &str) -> std::path::PathBuf {
        let mut p = env::temp_dir();
        p.push(format!("{name}_dayboard.conf"));
        fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn reports_keys_missing_from_old_file() {
        let p = temp_conf("cfg_missing", "database: /tmp/db.sqlite\n");
        let missing = missing_keys(&p).unwrap();
        assert!(missing.contains(&"extract_model".to_string()));
        assert!(!missing.contains(&"database".to_string()));
        fs::remove_file(p).ok();
    }

    #[test]
    fn migration_renames_and_fills_without_overwriting() {
        let p = temp_conf(
            "cfg_migrate",
            "database: /tmp/db.sqlite\nbed_time: \"00:15\"\nutc_offset_hours: 1\n",
        );
        let actions = migrate_config_file(&p).unwrap();
        assert!(actions.iter().any(|a| a.contains("default_bed_time")));

        let cfg = Config::load_from(&p).unwrap();
        assert_eq!(cfg.default_bed_time, "00:15");
        assert_eq!(cfg.utc_offset_hours, 1);
        assert!(missing_keys(&p).unwrap().is_empty());

        // second run is a no-op
        assert!(migrate_config_file(&p).unwrap().is_empty());
        fs::remove_file(p).ok();
    }
}
