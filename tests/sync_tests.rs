use predicates::str::contains;
use rusqlite::Connection;

mod common;
use common::Env;

const DAY: &str = "2025-02-01";

#[test]
fn test_sync_twice_keeps_one_row() {
    let env = Env::init("sync_twice");

    env.cmd(DAY)
        .args(["done", "1", "--at", "07:05"])
        .assert()
        .success();
    env.cmd(DAY)
        .arg("sync")
        .assert()
        .success()
        .stdout(contains("appended row 2"));

    env.cmd(DAY)
        .args(["done", "2", "--at", "07:40"])
        .assert()
        .success();
    env.cmd(DAY)
        .arg("sync")
        .assert()
        .success()
        .stdout(contains("updated row 2"));

    env.cmd(DAY)
        .args(["list", "--tab", "routine"])
        .assert()
        .success()
        .stdout(contains("1 row(s) in 'routine'"))
        .stdout(contains("2025-02-01"));
}

#[test]
fn test_stored_row_seeds_a_new_session() {
    let env = Env::init("seed_session");

    env.cmd(DAY)
        .args(["done", "lunch", "--at", "12:10"])
        .assert()
        .success();
    env.cmd(DAY).arg("sync").assert().success();

    // another machine: same workbook, no session file
    std::fs::remove_file(&env.session).ok();

    env.cmd(DAY)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Completed at 12:10"));
}

#[test]
fn test_meals_sync_and_list() {
    let env = Env::init("meals_sync");

    env.cmd(DAY)
        .args(["meals", "--breakfast", "toast", "--dinner", "soup", "--sync"])
        .assert()
        .success()
        .stdout(contains("Meals row 2 written"));

    env.cmd(DAY)
        .args(["meals", "--lunch", "noodles", "--sync"])
        .assert()
        .success()
        .stdout(contains("Meals row 2 written"));

    env.cmd(DAY)
        .args(["list", "--tab", "meals", "--period", "2025-02"])
        .assert()
        .success()
        .stdout(contains("toast"))
        .stdout(contains("noodles"))
        .stdout(contains("1 row(s) in 'meals'"));
}

#[test]
fn test_period_filter_excludes_other_months() {
    let env = Env::init("period_filter");

    env.cmd(DAY).arg("sync").assert().success();
    env.cmd("2025-03-05").arg("sync").assert().success();

    env.cmd(DAY)
        .args(["list", "--period", "2025-03"])
        .assert()
        .success()
        .stdout(contains("2025-03-05"))
        .stdout(contains("1 row(s)"));
}

#[test]
fn test_sync_is_logged() {
    let env = Env::init("sync_logged");

    env.cmd(DAY).arg("sync").assert().success();

    env.cmd(DAY)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("routine row 2 appended"));
}

#[test]
fn test_failed_sync_keeps_local_progress() {
    let env = Env::init("sync_failed");

    env.cmd(DAY)
        .args(["done", "lunch", "--at", "12:20"])
        .assert()
        .success();

    let conn = Connection::open(&env.db).unwrap();
    conn.execute(
        "UPDATE sheet_rows SET cells = '{broken' WHERE tab = 'routine' AND row_no = 1",
        [],
    )
    .unwrap();
    drop(conn);

    env.cmd(DAY)
        .arg("sync")
        .assert()
        .failure()
        .stderr(contains("Could not write the routine row"));

    env.cmd(DAY)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("sync_failed"));

    env.cmd(DAY)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Completed at 12:20"))
        .stdout(contains("Not synced yet"));
}
