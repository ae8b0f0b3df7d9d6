//! Versioned schema upgrades.
//!
//! Every migration runs at most once; applied versions are recorded in the
//! `log` table as `migration_applied` lines.

use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::sheet::ensure_header;
use crate::sheet::layout::Tab;
use crate::sheet::sqlite::SqliteSheet;
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};

type MigrationFn = fn(&Connection) -> AppResult<()>;

struct Migration {
    version: &'static str,
    description: &'static str,
    apply: MigrationFn,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250101_0001_create_sheet_rows",
        description: "Created sheet_rows table",
        apply: create_sheet_rows,
    },
    Migration {
        version: "20250101_0002_seed_tab_headers",
        description: "Seeded routine, meals and sleep_log headers",
        apply: seed_tab_headers,
    },
    Migration {
        version: "20250301_0003_extend_routine_header",
        description: "Added BedTime and Diary columns to routine",
        apply: extend_routine_header,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_sheet_rows(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sheet_rows (
            tab        TEXT    NOT NULL,
            row_no     INTEGER NOT NULL CHECK(row_no >= 1),
            cells      TEXT    NOT NULL,
            updated_at TEXT    NOT NULL,
            PRIMARY KEY (tab, row_no)
        );

        CREATE INDEX IF NOT EXISTS idx_sheet_rows_tab ON sheet_rows(tab);
        "#,
    )?;
    Ok(())
}

fn seed_tab_headers(conn: &Connection) -> AppResult<()> {
    for tab in Tab::ALL {
        let mut ws = SqliteSheet::open(conn, tab);
        ensure_header(&mut ws, tab.layout())?;
    }
    Ok(())
}

/// Workbooks created before the bed time and diary fields existed keep
/// their rows; the two columns are appended to the header.
fn extend_routine_header(conn: &Connection) -> AppResult<()> {
    let mut ws = SqliteSheet::open(conn, Tab::Routine);
    ensure_header(&mut ws, Tab::Routine.layout())?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Public entry point: run all pending migrations.
///
/// Called by `db::init_db()` on every workbook open.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        (m.apply)(conn).map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;
        ttlog(conn, "migration_applied", m.version, m.description)?;

        success(format!("Migration applied: {} → {}", m.version, m.description));
    }

    Ok(())
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
