//! Worksheet backed by the local SQLite workbook (`sheet_rows` table).
//! Each row is stored as a JSON array of text cells.

use super::Worksheet;
use super::layout::Tab;
use crate::errors::{AppError, AppResult};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

pub struct SqliteSheet<'c> {
    conn: &'c Connection,
    tab: String,
}

impl<'c> SqliteSheet<'c> {
    pub fn new(conn: &'c Connection, tab: &str) -> Self {
        Self {
            conn,
            tab: tab.to_string(),
        }
    }

    pub fn open(conn: &'c Connection, tab: Tab) -> Self {
        Self::new(conn, tab.name())
    }

    fn write(&self, row: usize, values: &[String]) -> AppResult<()> {
        let cells = serde_json::to_string(values)?;
        self.conn.execute(
            "INSERT INTO sheet_rows (tab, row_no, cells, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(tab, row_no) DO UPDATE
                SET cells = excluded.cells,
                    updated_at = excluded.updated_at",
            params![self.tab, row as i64, cells, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

fn decode(raw: &str) -> AppResult<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::MalformedRecord(format!("row cells are not a JSON array: {e}")))
}

impl Worksheet for SqliteSheet<'_> {
    fn row_count(&self) -> AppResult<usize> {
        let n: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(row_no), 0) FROM sheet_rows WHERE tab = ?1",
            [&self.tab],
            |row| row.get(0),
        )?;
        Ok(n.max(0) as usize)
    }

    fn row_values(&self, row: usize) -> AppResult<Vec<String>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT cells FROM sheet_rows WHERE tab = ?1 AND row_no = ?2",
                params![self.tab, row as i64],
                |r| r.get(0),
            )
            .optional()?;

        match raw {
            Some(cells) => decode(&cells),
            None => Ok(Vec::new()),
        }
    }

    fn col_values(&self, col: usize) -> AppResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT row_no, cells FROM sheet_rows WHERE tab = ?1 ORDER BY row_no")?;

        let rows = stmt.query_map([&self.tab], |r| {
            Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?))
        })?;

        let mut out: Vec<String> = Vec::new();
        for r in rows {
            let (row_no, raw) = r?;
            let idx = (row_no.max(1) - 1) as usize;
            if out.len() < idx {
                out.resize(idx, String::new());
            }
            let cell = decode(&raw)?
                .into_iter()
                .nth(col.saturating_sub(1))
                .unwrap_or_default();
            out.push(cell);
        }

        Ok(out)
    }

    fn update_row(&mut self, row: usize, values: &[String]) -> AppResult<()> {
        if row == 0 {
            return Err(AppError::Other("row numbers start at 1".into()));
        }
        self.write(row, values)
    }

    fn append_row(&mut self, values: &[String]) -> AppResult<usize> {
        let next = self.row_count()? + 1;
        self.write(next, values)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::sheet::layout::ROUTINE;
    use crate::sheet::{find_row, header};

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn
    }

    #[test]
    fn tabs_start_with_their_header() {
        let conn = conn();
        let ws = SqliteSheet::open(&conn, Tab::Routine);
        assert_eq!(ws.row_count().unwrap(), 1);
        assert_eq!(header(&ws).unwrap(), ROUTINE.columns.to_vec());
    }

    #[test]
    fn append_update_and_scan() {
        let conn = conn();
        let mut ws = SqliteSheet::new(&conn, "scratch");
        assert_eq!(ws.row_count().unwrap(), 0);
        assert!(ws.row_values(1).unwrap().is_empty());

        ws.append_row(&["Date".into(), "X".into()]).unwrap();
        let r = ws.append_row(&["2025-01-01".into(), "a".into()]).unwrap();
        assert_eq!(r, 2);
        ws.update_row(2, &["2025-01-01".into(), "b".into()]).unwrap();

        assert_eq!(ws.row_values(2).unwrap(), vec!["2025-01-01", "b"]);
        assert_eq!(ws.col_values(2).unwrap(), vec!["X", "b"]);
        assert_eq!(ws.row_count().unwrap(), 2);
        assert_eq!(find_row(&ws, &ROUTINE, "2025-01-01").unwrap(), Some(2));
    }

    #[test]
    fn tabs_are_isolated() {
        let conn = conn();
        let mut a = SqliteSheet::new(&conn, "a");
        a.append_row(&["1".into()]).unwrap();
        let b = SqliteSheet::new(&conn, "b");
        assert_eq!(b.row_count().unwrap(), 0);
    }
}
