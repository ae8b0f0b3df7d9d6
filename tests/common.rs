#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn dbd() -> Command {
    cargo_bin_cmd!("dayboard")
}

fn temp_path(name: &str, suffix: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_{}", name, suffix));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Per-test workbook and session file, both removed if left over.
pub struct Env {
    pub db: String,
    pub session: String,
}

impl Env {
    pub fn new(name: &str) -> Self {
        Self {
            db: temp_path(name, "dayboard.sqlite"),
            session: temp_path(name, "session.json"),
        }
    }

    /// Initialized workbook.
    pub fn init(name: &str) -> Self {
        let env = Self::new(name);
        dbd()
            .args(["--db", &env.db, "--test", "init"])
            .assert()
            .success();
        env
    }

    /// A command on `date` against this workbook and session.
    pub fn cmd(&self, date: &str) -> Command {
        let mut c = dbd();
        c.args(["--db", &self.db, "--session", &self.session, "--date", date]);
        c
    }
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    temp_path(name, &format!("out.{ext}"))
}
