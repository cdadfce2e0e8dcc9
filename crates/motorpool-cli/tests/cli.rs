use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(temp: &TempDir, db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("motorpool").expect("binary");
    cmd.env("XDG_CONFIG_HOME", temp.path().join("config"))
        .args(["--db-path", db_path.to_str().expect("db path")]);
    cmd
}

fn run(temp: &TempDir, db_path: &Path, args: &[&str]) -> String {
    let output = cmd(temp, db_path).args(args).output().expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_json(temp: &TempDir, db_path: &Path, args: &[&str]) -> Value {
    let output = cmd(temp, db_path)
        .arg("--json")
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

#[test]
fn cli_import_list_export_flow() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("motorpool.sqlite3");

    let csv_path = temp.path().join("roster.csv");
    fs::write(
        &csv_path,
        "Plate,ID,Driver Name,Mobile,Supervisor,Schedule,RD\n\
         ABC 123,E-01,Juan Cruz,09171234567,Reyes,Day,Mon\n\
         XYZ 999,E-02,Maria Santos,09998887766,Reyes,Night,Tue\n\
         ,E-03,No Plate,,Reyes,,\n",
    )
    .expect("write csv");
    let csv = csv_path.to_str().expect("csv path");

    // Dry run applies nothing.
    let preview = run_json(&temp, &db_path, &["import", csv, "--dry-run"]);
    assert_eq!(preview["total_rows"], 3);
    assert_eq!(preview["valid"], 2);
    assert_eq!(preview["invalid"], 1);
    let empty = run_json(&temp, &db_path, &["list"]);
    assert_eq!(empty.as_array().expect("array").len(), 0);

    let report = run_json(&temp, &db_path, &["import", csv, "--actor", "dispatch"]);
    assert_eq!(report["records_applied"], 2);
    assert_eq!(report["invalid_rows"], 1);

    let list = run_json(&temp, &db_path, &["list"]);
    let items = list.as_array().expect("array");
    assert_eq!(items.len(), 2);

    let filtered = run_json(&temp, &db_path, &["list", "--search", "maria"]);
    let filtered = filtered.as_array().expect("array");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["plate"], "XYZ 999");

    let detail = run(&temp, &db_path, &["show", "ABC 123"]);
    assert!(detail.contains("phone: +63 917 123 4567"));
    assert!(detail.contains("tel: tel:+639171234567"));

    let uploads = run_json(&temp, &db_path, &["uploads"]);
    let uploads = uploads.as_array().expect("array");
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0]["actor"], "dispatch");
    assert_eq!(uploads[0]["records_count"], 2);

    let out_path = temp.path().join("roster-out.csv");
    run(
        &temp,
        &db_path,
        &[
            "export",
            "--format",
            "csv",
            "--columns",
            "plate,name,phone",
            "--out",
            out_path.to_str().expect("out path"),
        ],
    );
    let exported = fs::read_to_string(&out_path).expect("read export");
    let mut lines = exported.lines();
    assert_eq!(lines.next(), Some("Plate,Name,Phone"));
    assert!(exported.contains("+63 917 123 4567"));

    run(&temp, &db_path, &["delete", "ABC 123"]);
    let remaining = run_json(&temp, &db_path, &["list"]);
    assert_eq!(remaining.as_array().expect("array").len(), 1);
}

#[test]
fn cli_add_edit_and_sort() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("motorpool.sqlite3");

    for (plate, name) in [("CAB 2", "Beta"), ("CAB 10", "Gamma"), ("CAB 1", "Alpha")] {
        run(
            &temp,
            &db_path,
            &[
                "add",
                "--plate",
                plate,
                "--employee-id",
                plate,
                "--name",
                name,
                "--captain",
                "Reyes",
            ],
        );
    }

    // Numeric-aware ordering by plate.
    let sorted = run_json(&temp, &db_path, &["list", "--sort", "plate"]);
    let plates: Vec<&str> = sorted
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["plate"].as_str().expect("plate"))
        .collect();
    assert_eq!(plates, vec!["CAB 1", "CAB 2", "CAB 10"]);

    run(
        &temp,
        &db_path,
        &["edit", "CAB 1", "--status", "inactive"],
    );
    let inactive = run_json(&temp, &db_path, &["list", "--status", "inactive"]);
    let inactive = inactive.as_array().expect("array");
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0]["name"], "Alpha");
}

#[test]
fn cli_exit_codes() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("motorpool.sqlite3");

    let missing = cmd(&temp, &db_path)
        .args(["show", "NOPE 404"])
        .output()
        .expect("run command");
    assert_eq!(missing.status.code(), Some(2));

    run(
        &temp,
        &db_path,
        &[
            "add", "--plate", "DUP 1", "--employee-id", "E-1", "--name", "Juan", "--captain",
            "Reyes",
        ],
    );
    let duplicate = cmd(&temp, &db_path)
        .args([
            "add", "--plate", "DUP 1", "--employee-id", "E-2", "--name", "Pedro", "--captain",
            "Reyes",
        ])
        .output()
        .expect("run command");
    assert_eq!(duplicate.status.code(), Some(3));

    let bad_mode = cmd(&temp, &db_path)
        .args(["import", "whatever.csv", "--mode", "merge"])
        .output()
        .expect("run command");
    assert_eq!(bad_mode.status.code(), Some(3));
}

#[test]
fn cli_columns_prefs_roundtrip() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("motorpool.sqlite3");

    let defaults = run_json(&temp, &db_path, &["columns", "show"]);
    assert_eq!(
        defaults["export_columns"].as_array().expect("array").len(),
        9
    );

    run(&temp, &db_path, &["columns", "set", "plate,name"]);
    let saved = run_json(&temp, &db_path, &["columns", "show"]);
    let keys: Vec<&str> = saved["export_columns"]
        .as_array()
        .expect("array")
        .iter()
        .map(|key| key.as_str().expect("key"))
        .collect();
    assert_eq!(keys, vec!["plate", "name"]);

    run(&temp, &db_path, &["columns", "reset"]);
    let reset = run_json(&temp, &db_path, &["columns", "show"]);
    assert_eq!(reset["export_columns"].as_array().expect("array").len(), 9);
}
