use predicates::str::contains;
use std::fs;

mod common;
use common::{Env, temp_out};

const DAY: &str = "2025-04-01";

#[test]
fn test_export_routine_json() {
    let env = Env::init("export_json");
    let out = temp_out("export_json", "json");

    env.cmd(DAY)
        .args(["set", "--sleep-score", "82"])
        .assert()
        .success();
    env.cmd(DAY).arg("sync").assert().success();

    env.cmd(DAY)
        .args(["export", "--tab", "routine", "--format", "json", "--file", &out, "--force"])
        .assert()
        .success()
        .stdout(contains("Exported 1 rows"));

    let content = fs::read_to_string(&out).unwrap();
    let v: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(v[0]["Date"], "2025-04-01");
    assert_eq!(v[0]["SleepScore"], "82");
    fs::remove_file(out).ok();
}

#[test]
fn test_export_empty_tab_writes_nothing() {
    let env = Env::init("export_empty");
    let out = temp_out("export_empty", "csv");

    env.cmd(DAY)
        .args(["export", "--tab", "sleep", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Nothing to export"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_db_info_and_check() {
    let env = Env::init("db_info");
    env.cmd(DAY).arg("sync").assert().success();

    env.cmd(DAY)
        .args(["db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("routine"))
        .stdout(contains("sleep_log"))
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_backup_compressed() {
    let env = Env::init("backup_zip");
    let dest = temp_out("backup_zip", "sqlite");
    let zip = dest.replace(".sqlite", ".zip");
    fs::remove_file(&zip).ok();

    env.cmd(DAY)
        .args(["backup", "--file", &dest, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed"));

    assert!(std::path::Path::new(&zip).exists());
    fs::remove_file(zip).ok();
}

#[test]
fn test_invalid_date_override() {
    let env = Env::init("bad_date");
    env.cmd("2025-13-01")
        .arg("status")
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}
