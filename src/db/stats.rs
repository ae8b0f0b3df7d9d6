use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::sheet::layout::Tab;
use crate::sheet::sqlite::SqliteSheet;
use crate::sheet::{Worksheet, header};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use std::fs;

/// Data rows and key-date span of one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabStats {
    pub tab: Tab,
    pub rows: usize,
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
}

pub fn tab_stats(pool: &DbPool, tab: Tab) -> AppResult<TabStats> {
    let ws = SqliteSheet::open(&pool.conn, tab);
    let count = ws.row_count()?;
    let head = header(&ws)?;

    let dates: Vec<NaiveDate> = match head.iter().position(|h| h == tab.layout().key) {
        Some(i) => ws
            .col_values(i + 1)?
            .iter()
            .skip(1)
            .filter_map(|v| parse_date(v))
            .collect(),
        None => Vec::new(),
    };

    Ok(TabStats {
        tab,
        rows: count.saturating_sub(1),
        first: dates.iter().min().copied(),
        last: dates.iter().max().copied(),
    })
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    for tab in Tab::ALL {
        let s = tab_stats(pool, tab)?;
        let span = match (s.first, s.last) {
            (Some(f), Some(l)) => format!("{f} → {l}"),
            _ => format!("{GREY}--{RESET}"),
        };
        println!(
            "{}• {:<10}{} {}{:>5}{} rows   {}",
            CYAN,
            tab.name(),
            RESET,
            GREEN,
            s.rows,
            RESET,
            span
        );
    }

    let log_lines: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))?;
    println!("{}• Log lines:{} {}", CYAN, RESET, log_lines);

    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_skip_header_and_ignore_bad_dates() {
        let pool = DbPool::in_memory().unwrap();
        let mut ws = SqliteSheet::open(&pool.conn, Tab::Meals);
        ws.append_row(&["2025-01-03".into()]).unwrap();
        ws.append_row(&["2025-01-01".into()]).unwrap();
        ws.append_row(&["not a date".into()]).unwrap();

        let s = tab_stats(&pool, Tab::Meals).unwrap();
        assert_eq!(s.rows, 3);
        assert_eq!(s.first, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(s.last, NaiveDate::from_ymd_opt(2025, 1, 3));

        let empty = tab_stats(&pool, Tab::Sleep).unwrap();
        assert_eq!(empty.rows, 0);
        assert_eq!(empty.first, None);
    }
}
