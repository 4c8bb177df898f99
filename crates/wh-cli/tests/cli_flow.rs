//! End-to-end tests running the `wh` binary against a temporary database.
//!
//! Tests the full pipeline: add → list → summary → export → import.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn wh_binary() -> String {
    env!("CARGO_BIN_EXE_wh").to_string()
}

/// Writes a config file pointing the database into `temp`.
fn write_config(temp: &Path) -> PathBuf {
    let config_path = temp.join("config.toml");
    let db_path = temp.join("data/wh.db");
    std::fs::write(
        &config_path,
        format!("database_path = {:?}\n", db_path.display().to_string()),
    )
    .unwrap();
    config_path
}

fn wh(temp: &Path, args: &[&str]) -> Output {
    Command::new(wh_binary())
        .env("HOME", temp)
        .env("XDG_CONFIG_HOME", temp.join("xdg-config"))
        .env("XDG_DATA_HOME", temp.join("xdg-data"))
        .env_remove("RUST_LOG")
        .env_remove("WH_DATABASE_PATH")
        .env_remove("WH_EXPORT_DIR")
        .arg("--config")
        .arg(write_config(temp))
        .args(args)
        .output()
        .expect("failed to run wh")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "wh should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_no_subcommand_prints_help() {
    let temp = TempDir::new().unwrap();
    let output = Command::new(wh_binary())
        .env("HOME", temp.path())
        .output()
        .unwrap();
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Usage: wh"));
}

#[test]
fn test_add_list_and_summary() {
    let temp = TempDir::new().unwrap();

    stdout_of(&wh(
        temp.path(),
        &[
            "add", "--date", "2025-01-06", "--start", "08:00", "--end", "16:00",
        ],
    ));
    stdout_of(&wh(
        temp.path(),
        &[
            "add",
            "--date",
            "2025-01-31",
            "--start",
            "22:00",
            "--end",
            "06:00",
            "--end-date",
            "2025-02-01",
            "--type",
            "night",
            "--notes",
            "inventory",
        ],
    ));
    stdout_of(&wh(
        temp.path(),
        &["add", "--date", "2025-02-03", "--type", "leave"],
    ));

    let list = stdout_of(&wh(temp.path(), &["list", "--month", "2025-02", "--json"]));
    let entries: serde_json::Value = serde_json::from_str(&list).unwrap();
    let entries = entries.as_array().unwrap();
    // The overnight entry ends in February and so belongs to both months.
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["type"], "leave");
    assert_eq!(entries[1]["endDate"], "2025-02-01");

    let summary = stdout_of(&wh(
        temp.path(),
        &["summary", "--month", "2025-01", "--json"],
    ));
    let summary: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert_eq!(summary["period"], "2025-01");
    assert_eq!(summary["normal_hours"], 8.0);
    assert_eq!(summary["overtime_hours"], 8.0);
    assert_eq!(summary["days_worked"], 3);

    let day = stdout_of(&wh(temp.path(), &["day", "2025-02-03"]));
    assert!(day.contains("Leave  leave"));
}

#[test]
fn test_invalid_entry_is_rejected_and_not_saved() {
    let temp = TempDir::new().unwrap();

    let output = wh(
        temp.path(),
        &[
            "add", "--date", "2025-01-06", "--start", "16:00", "--end", "08:00",
        ],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("duration must be positive"));

    let status = stdout_of(&wh(temp.path(), &["status"]));
    assert!(status.contains("Entries: 0"));
}

#[test]
fn test_export_then_import_round_trip() {
    let source = TempDir::new().unwrap();
    stdout_of(&wh(
        source.path(),
        &[
            "add", "--date", "2025-03-03", "--start", "09:00", "--end", "17:30",
        ],
    ));
    stdout_of(&wh(
        source.path(),
        &["add", "--date", "2025-03-04", "--type", "leave"],
    ));

    let export_path = source.path().join("backup.json");
    let exported = stdout_of(&wh(
        source.path(),
        &["export", "--output", export_path.to_str().unwrap()],
    ));
    assert!(exported.starts_with("Exported 2 entries"));

    let target = TempDir::new().unwrap();
    let imported = stdout_of(&wh(
        target.path(),
        &["import", export_path.to_str().unwrap()],
    ));
    assert!(imported.starts_with("Merged 2 new entries"));

    // Merging the same file again adds nothing.
    let again = stdout_of(&wh(
        target.path(),
        &["import", export_path.to_str().unwrap()],
    ));
    assert!(again.starts_with("Merged 0 new entries"));

    let original = stdout_of(&wh(source.path(), &["export", "--stdout"]));
    let copy = stdout_of(&wh(target.path(), &["export", "--stdout"]));
    assert_eq!(original, copy);
}

#[test]
fn test_bad_import_leaves_collection_unchanged() {
    let temp = TempDir::new().unwrap();
    stdout_of(&wh(
        temp.path(),
        &[
            "add", "--date", "2025-03-03", "--start", "09:00", "--end", "17:00",
        ],
    ));

    let bad = temp.path().join("bad.json");
    std::fs::write(&bad, r#"[{"id":"x","date":"2025-03-05"}]"#).unwrap();
    let output = wh(temp.path(), &["import", "--replace", bad.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing required field"));

    let status = stdout_of(&wh(temp.path(), &["status"]));
    assert!(status.contains("Entries: 1"));
}

#[test]
fn test_delete_day_and_clear() {
    let temp = TempDir::new().unwrap();
    stdout_of(&wh(
        temp.path(),
        &[
            "add",
            "--date",
            "2025-04-01",
            "--start",
            "20:00",
            "--end",
            "04:00",
            "--end-date",
            "2025-04-02",
        ],
    ));
    for (date, start, end) in [("2025-04-02", "20:00", "23:00"), ("2025-04-03", "08:00", "12:00")] {
        stdout_of(&wh(
            temp.path(),
            &["add", "--date", date, "--start", start, "--end", end],
        ));
    }

    let deleted = stdout_of(&wh(temp.path(), &["delete-day", "2025-04-02"]));
    assert_eq!(deleted.trim(), "Deleted 2 entries on 2025-04-02.");

    let refused = wh(temp.path(), &["clear"]);
    assert!(!refused.status.success());

    let cleared = stdout_of(&wh(temp.path(), &["clear", "--yes"]));
    assert_eq!(cleared.trim(), "Deleted all 1 entries.");
}
