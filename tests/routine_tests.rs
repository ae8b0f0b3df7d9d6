use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::Env;

const DAY: &str = "2025-01-10";

#[test]
fn test_init_creates_workbook() {
    let env = Env::new("init_creates");
    common::dbd()
        .args(["--db", &env.db, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Workbook initialized"));

    assert!(std::path::Path::new(&env.db).exists());
}

#[test]
fn test_done_moves_dependent_target() {
    let env = Env::init("done_target");

    env.cmd(DAY)
        .args(["done", "morning_ignition", "--at", "06:50"])
        .assert()
        .success()
        .stdout(contains("done at 06:50"));

    env.cmd(DAY)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Completed at 06:50"))
        .stdout(contains("start 07:20"))
        .stdout(contains("bath 22:00 / supplements 22:40"));
}

#[test]
fn test_steps_by_number_and_unknown_step() {
    let env = Env::init("steps_by_number");

    env.cmd(DAY)
        .args(["done", "3", "--at", "08:10"])
        .assert()
        .success()
        .stdout(contains("Morning walk"));

    env.cmd(DAY)
        .args(["done", "brunch"])
        .assert()
        .failure()
        .stderr(contains("Unknown step"));

    env.cmd(DAY)
        .args(["done", "lunch", "--at", "25:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid time"));
}

#[test]
fn test_skip_cascade_is_one_directional() {
    let env = Env::init("skip_cascade");

    env.cmd(DAY)
        .args(["set", "--workout", "Sauna"])
        .assert()
        .success();

    env.cmd(DAY)
        .args(["skip", "evening_workout"])
        .assert()
        .success()
        .stdout(contains("7. Workout → skipped"))
        .stdout(contains("6. Pre-workout → skipped"));

    env.cmd(DAY)
        .args(["undo", "6"])
        .assert()
        .success()
        .stdout(contains("6. Pre-workout → pending"))
        .stdout(contains("7. Workout").not());

    env.cmd(DAY)
        .args(["undo", "6"])
        .assert()
        .success()
        .stdout(contains("already pending"));
}

#[test]
fn test_rest_day_hides_workout_steps() {
    let env = Env::init("rest_day");

    env.cmd(DAY)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("0/7 done"))
        .stdout(contains("moved from the evening"));

    env.cmd(DAY)
        .args(["set", "--workout", "Walking (5km)", "--workout-time", "19:00"])
        .assert()
        .success();

    env.cmd(DAY)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("0/9 done"))
        .stdout(contains("18:30"));
}

#[test]
fn test_new_date_starts_fresh() {
    let env = Env::init("new_date");

    env.cmd(DAY)
        .args(["done", "lunch", "--at", "12:30"])
        .assert()
        .success();

    env.cmd("2025-01-11")
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Completed at").not());
}

#[test]
fn test_unsynced_day_survives_a_date_change() {
    let env = Env::init("unsynced_day");

    env.cmd(DAY)
        .args(["done", "lunch", "--at", "12:30"])
        .assert()
        .success();
    env.cmd(DAY)
        .args(["meals", "--lunch", "ramen"])
        .assert()
        .success();

    env.cmd("2025-01-09")
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Unsynced changes for 2025-01-10 are kept"))
        .stdout(contains("Other days with unsynced changes: 2025-01-10"))
        .stdout(contains("Completed at").not());

    env.cmd(DAY)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Resuming unsynced changes for 2025-01-10"))
        .stdout(contains("Completed at 12:30"))
        .stdout(contains("ramen"))
        .stdout(contains("Not synced yet"));
}

#[test]
fn test_synced_day_is_reread_after_a_date_change() {
    let env = Env::init("synced_day");

    env.cmd(DAY)
        .args(["done", "lunch", "--at", "12:30"])
        .assert()
        .success();
    env.cmd(DAY).arg("sync").assert().success();

    env.cmd("2025-01-09")
        .arg("status")
        .assert()
        .success()
        .stdout(contains("unsynced").not());

    env.cmd(DAY)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Completed at 12:30"))
        .stdout(contains("Not synced yet").not());
}

#[test]
fn test_diary_is_shown() {
    let env = Env::init("diary");

    env.cmd(DAY)
        .args(["set", "--diary", "Felt light after the walk", "--feeling", "good"])
        .assert()
        .success()
        .stdout(contains("diary"));

    env.cmd(DAY)
        .arg("status")
        .assert()
        .success()
        .stdout(contains("Felt light after the walk"))
        .stdout(contains("good"));
}
