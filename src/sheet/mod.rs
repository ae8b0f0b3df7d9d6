//! Spreadsheet-like storage: tabs made of rows of text cells.
//!
//! Row and column numbers are 1-based and row 1 is the header, the way a
//! spreadsheet API exposes them. The generic helpers here (header upkeep,
//! date-keyed upsert, append) only rely on the `Worksheet` trait.

pub mod layout;
pub mod sqlite;

use crate::errors::{AppError, AppResult};
use layout::{Layout, RowData, SheetRecord, arrange};

pub use sqlite::SqliteSheet;

pub trait Worksheet {
    /// Number of stored rows, header included.
    fn row_count(&self) -> AppResult<usize>;

    /// Cells of `row`; empty when the row does not exist.
    fn row_values(&self, row: usize) -> AppResult<Vec<String>>;

    /// Every cell of column `col` from row 1 down, blanks for short rows.
    fn col_values(&self, col: usize) -> AppResult<Vec<String>>;

    /// Replace the whole row.
    fn update_row(&mut self, row: usize, values: &[String]) -> AppResult<()>;

    /// Add a row after the last one and return its number.
    fn append_row(&mut self, values: &[String]) -> AppResult<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Updated(usize),
    Appended(usize),
}

impl UpsertOutcome {
    pub fn row(&self) -> usize {
        match self {
            UpsertOutcome::Updated(r) | UpsertOutcome::Appended(r) => *r,
        }
    }
}

/// Make sure row 1 holds every column of `layout`. A blank tab gets the full
/// header; an older header gets the missing columns appended at its end.
/// Returns the columns that were added.
pub fn ensure_header<W: Worksheet + ?Sized>(
    ws: &mut W,
    layout: &Layout,
) -> AppResult<Vec<&'static str>> {
    if ws.row_count()? == 0 {
        let header: Vec<String> = layout.columns.iter().map(|c| c.to_string()).collect();
        ws.append_row(&header)?;
        return Ok(layout.columns.to_vec());
    }

    let mut header = ws.row_values(1)?;
    let missing: Vec<&'static str> = layout
        .columns
        .iter()
        .copied()
        .filter(|c| !header.iter().any(|h| h == c))
        .collect();

    if !missing.is_empty() {
        header.extend(missing.iter().map(|c| c.to_string()));
        ws.update_row(1, &header)?;
    }

    Ok(missing)
}

pub fn header<W: Worksheet + ?Sized>(ws: &W) -> AppResult<Vec<String>> {
    ws.row_values(1)
}

fn key_column(header: &[String], layout: &Layout) -> AppResult<usize> {
    header
        .iter()
        .position(|h| h == layout.key)
        .map(|i| i + 1)
        .ok_or_else(|| AppError::MissingColumn {
            tab: layout.tab.to_string(),
            column: layout.key.to_string(),
        })
}

/// First data row whose key column equals `key` exactly.
pub fn find_row<W: Worksheet + ?Sized>(
    ws: &W,
    layout: &Layout,
    key: &str,
) -> AppResult<Option<usize>> {
    let header = header(ws)?;
    let col = key_column(&header, layout)?;
    let found = ws
        .col_values(col)?
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, v)| v.as_str() == key)
        .map(|(i, _)| i + 1);
    Ok(found)
}

/// Read the row stored under `key`, if any.
pub fn find_record_row<W: Worksheet + ?Sized>(
    ws: &W,
    layout: &'static Layout,
    key: &str,
) -> AppResult<Option<RowData>> {
    let Some(row_no) = find_row(ws, layout, key)? else {
        return Ok(None);
    };
    Ok(Some(RowData {
        tab: layout.tab,
        row_no,
        header: header(ws)?,
        cells: ws.row_values(row_no)?,
    }))
}

/// Update-if-exists-else-append, keyed on the layout's key column.
/// Existing rows are replaced as a whole, never patched field by field.
pub fn upsert_record<W, R>(ws: &mut W, record: &R) -> AppResult<UpsertOutcome>
where
    W: Worksheet + ?Sized,
    R: SheetRecord,
{
    ensure_header(ws, R::LAYOUT)?;
    let header = header(ws)?;
    let row = arrange(&header, R::LAYOUT, &record.fields()?)?;

    match find_row(ws, R::LAYOUT, &record.key())? {
        Some(n) => {
            ws.update_row(n, &row)?;
            Ok(UpsertOutcome::Updated(n))
        }
        None => Ok(UpsertOutcome::Appended(ws.append_row(&row)?)),
    }
}

/// Always add a new row, no deduplication.
pub fn append_record<W, R>(ws: &mut W, record: &R) -> AppResult<usize>
where
    W: Worksheet + ?Sized,
    R: SheetRecord,
{
    ensure_header(ws, R::LAYOUT)?;
    let header = header(ws)?;
    let row = arrange(&header, R::LAYOUT, &record.fields()?)?;
    ws.append_row(&row)
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;

    /// Vec-backed worksheet for unit tests.
    #[derive(Default)]
    pub struct MemorySheet {
        pub rows: Vec<Vec<String>>,
    }

    impl MemorySheet {
        pub fn with_rows(rows: &[&[&str]]) -> Self {
            Self {
                rows: rows
                    .iter()
                    .map(|r| r.iter().map(|c| c.to_string()).collect())
                    .collect(),
            }
        }
    }

    impl Worksheet for MemorySheet {
        fn row_count(&self) -> AppResult<usize> {
            Ok(self.rows.len())
        }
        fn row_values(&self, row: usize) -> AppResult<Vec<String>> {
            Ok(self.rows.get(row - 1).cloned().unwrap_or_default())
        }
        fn col_values(&self, col: usize) -> AppResult<Vec<String>> {
            Ok(self
                .rows
                .iter()
                .map(|r| r.get(col - 1).cloned().unwrap_or_default())
                .collect())
        }
        fn update_row(&mut self, row: usize, values: &[String]) -> AppResult<()> {
            self.rows[row - 1] = values.to_vec();
            Ok(())
        }
        fn append_row(&mut self, values: &[String]) -> AppResult<usize> {
            self.rows.push(values.to_vec());
            Ok(self.rows.len())
        }
    }
}
