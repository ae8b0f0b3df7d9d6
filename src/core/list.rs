//! Reading a tab back for display or export.

use crate::errors::AppResult;
use crate::sheet::layout::Tab;
use crate::sheet::sqlite::SqliteSheet;
use crate::sheet::{Worksheet, header};
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Header plus data rows of one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub tab: Tab,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Data rows as (column, cell) pairs, padded to the header width.
    pub fn records(&self) -> Vec<Vec<(&str, &str)>> {
        self.rows
            .iter()
            .map(|r| {
                self.header
                    .iter()
                    .enumerate()
                    .map(|(i, h)| (h.as_str(), r.get(i).map(String::as_str).unwrap_or("")))
                    .collect()
            })
            .collect()
    }
}

pub struct ListLogic;

impl ListLogic {
    /// Rows of `tab` in stored order. With `bounds`, only rows whose key
    /// date falls in the inclusive range; rows with an unreadable date are
    /// then left out.
    pub fn load(
        conn: &Connection,
        tab: Tab,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<TabView> {
        let ws = SqliteSheet::open(conn, tab);
        let head = header(&ws)?;
        let key = head.iter().position(|h| h == tab.layout().key);

        let mut rows = Vec::new();
        for r in 2..=ws.row_count()? {
            let cells = ws.row_values(r)?;
            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }
            if let Some((start, end)) = bounds {
                let date = key
                    .and_then(|i| cells.get(i))
                    .and_then(|c| parse_date(c));
                match date {
                    Some(d) if d >= start && d <= end => {}
                    _ => continue,
                }
            }
            rows.push(cells);
        }

        Ok(TabView {
            tab,
            header: head,
            rows,
        })
    }
}
