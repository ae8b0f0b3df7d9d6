//! Column layouts of the three workbook tabs and header-resolved row access.
//!
//! Rows are read and written by column *name*: the position of a column is
//! looked up in the tab's own header row, so a sheet whose columns were
//! appended in a different order (older workbooks) keeps working.

use crate::errors::{AppError, AppResult};
use clap::ValueEnum;

pub struct Layout {
    pub tab: &'static str,
    /// Column holding the natural key (the date).
    pub key: &'static str,
    pub columns: &'static [&'static str],
}

pub const ROUTINE: Layout = Layout {
    tab: "routine",
    key: "Date",
    columns: &[
        "Date",
        "WakeTime",
        "Workout",
        "SleepScore",
        "BodyFeeling",
        "WorkoutTime",
        "BedTime",
        "Progress",
        "Diary",
    ],
};

pub const MEALS: Layout = Layout {
    tab: "meals",
    key: "DATE",
    columns: &["DATE", "BREAKFAST", "LUNCH", "DINNER", "SUPPLEMENTS"],
};

pub const SLEEP: Layout = Layout {
    tab: "sleep_log",
    key: "date",
    columns: &[
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
    ],
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Tab {
    Routine,
    Meals,
    Sleep,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Routine, Tab::Meals, Tab::Sleep];

    pub fn layout(&self) -> &'static Layout {
        match self {
            Tab::Routine => &ROUTINE,
            Tab::Meals => &MEALS,
            Tab::Sleep => &SLEEP,
        }
    }

    pub fn name(&self) -> &'static str {
        self.layout().tab
    }
}

/// A record that can be written as one row of a tab.
pub trait SheetRecord {
    const LAYOUT: &'static Layout;

    /// Value of the key column.
    fn key(&self) -> String;

    /// (column, cell) pairs; every column of `LAYOUT` should be present.
    fn fields(&self) -> AppResult<Vec<(&'static str, String)>>;
}

/// Place `fields` in the order of the tab's actual header.
/// Header columns the record does not know about are left blank.
pub fn arrange(
    header: &[String],
    layout: &Layout,
    fields: &[(&'static str, String)],
) -> AppResult<Vec<String>> {
    let mut row = vec![String::new(); header.len()];
    for (name, value) in fields {
        let idx = header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| AppError::MissingColumn {
                tab: layout.tab.to_string(),
                column: (*name).to_string(),
            })?;
        row[idx] = value.clone();
    }
    Ok(row)
}

/// One stored row together with the header it was read under.
#[derive(Debug, Clone)]
pub struct RowData {
    pub tab: &'static str,
    pub row_no: usize,
    pub header: Vec<String>,
    pub cells: Vec<String>,
}

impl RowData {
    /// Cell under `column`. Short rows read as empty cells.
    pub fn get(&self, column: &str) -> AppResult<&str> {
        let idx = self
            .header
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| AppError::MissingColumn {
                tab: self.tab.to_string(),
                column: column.to_string(),
            })?;
        Ok(self.cells.get(idx).map(String::as_str).unwrap_or(""))
    }

    /// Like `get`, but a missing column reads as an empty cell.
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }
}
