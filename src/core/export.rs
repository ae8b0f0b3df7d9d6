use crate::core::list::{ListLogic, TabView};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::sheet::layout::Tab;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Export one tab.
    ///
    /// - `file`: absolute path of the output file
    /// - `bounds`: inclusive date range on the tab's key column, `None` = all rows
    /// - `force`: overwrite an existing file without asking
    pub fn export(
        pool: &mut DbPool,
        tab: Tab,
        format: ExportFormat,
        file: &str,
        bounds: Option<(NaiveDate, NaiveDate)>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        let view = ListLogic::load(&pool.conn, tab, bounds)?;
        if view.is_empty() {
            println!("⚠️  No rows found in '{}' for the selected range. Nothing to export.", tab.name());
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(&view, path)?,
            ExportFormat::Json => export_json(&view, path)?,
        }

        println!("✅ Exported {} rows to {}", view.rows.len(), path.display());
        Ok(view.rows.len())
    }
}

/// Ask before overwriting an existing file.
fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    eprint!(
        "⚠️  File '{}' already exists. Overwrite? [y/N]: ",
        path.display()
    );
    io::stderr().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        Ok(())
    } else {
        Err(AppError::Export(
            "Export cancelled: existing file not overwritten".into(),
        ))
    }
}

/// One JSON object per row, keyed by the tab's header.
fn export_json(view: &TabView, path: &Path) -> AppResult<()> {
    let items: Vec<Value> = view
        .records()
        .into_iter()
        .map(|rec| {
            let obj: Map<String, Value> = rec
                .into_iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect();
            Value::Object(obj)
        })
        .collect();

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&items)?.as_bytes())?;
    Ok(())
}

fn export_csv(view: &TabView, path: &Path) -> AppResult<()> {
    let csv_err = |e: csv::Error| AppError::Export(format!("CSV write error: {e}"));

    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
    wtr.write_record(&view.header).map_err(csv_err)?;
    for row in &view.rows {
        let mut padded = row.clone();
        padded.resize(view.header.len(), String::new());
        wtr.write_record(&padded).map_err(csv_err)?;
    }
    wtr.flush()?;
    Ok(())
}
