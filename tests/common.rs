#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn js() -> Command {
    cargo_bin_cmd!("jobsheet")
}

/// Unique test DB path inside the system temp dir; any old file is removed
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_jobsheet.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Write `content` to a temp file and return its path
pub fn temp_file(name: &str, ext: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_jobsheet.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::write(&p, content).expect("write temp file");
    p
}

/// Temp path for a file the command will create
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Config file for tests: two staff members, default pay items
pub fn test_config(name: &str, db_path: &str) -> String {
    let yaml = format!(
        r#"database: "{db}"
cache_ttl_ms: 300000
default_rate: "Ord"
pay_items:
  - multiplier: 1.5
    id: "pi-15"
    name: "Overtime 1.5"
  - multiplier: 2.0
    id: "pi-20"
    name: "Double Time"
staff:
  - id: "s-anna"
    name: "Anna"
    wage_rate: 32.0
  - id: "s-ben"
    name: "Ben"
    wage_rate: 28.5
current_staff: "s-ben"
"#,
        db = db_path.replace('\\', "\\\\")
    );
    temp_file(name, "conf", &yaml)
}

/// Init a fresh DB in test mode (no config file written)
pub fn init_db(db_path: &str, config_path: &str) {
    js().args(["--db", db_path, "--config", config_path, "--test", "init"])
        .assert()
        .success();
}
