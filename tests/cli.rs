use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn inkboard_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("inkboard").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("RUST_LOG");
    cmd
}

fn write_script(dir: &Path, json: &str) -> std::path::PathBuf {
    let path = dir.join("script.json");
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn inkboard_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    inkboard_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Freehand whiteboard engine with snapshot undo/redo",
        ));
}

#[test]
fn no_flags_prints_usage() {
    let temp = TempDir::new().unwrap();
    inkboard_cmd(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("inkboard --script <FILE>"));
}

#[test]
fn replay_reports_session_summary() {
    let temp = TempDir::new().unwrap();
    let script = write_script(
        temp.path(),
        r#"[
            {"type": "pointer-down", "x": 30, "y": 30},
            {"type": "pointer-move", "x": 120, "y": 30},
            {"type": "pointer-up"},
            {"type": "clear"},
            {"type": "undo"},
            {"type": "zoom-in"},
            {"type": "select-tool", "tool": "eraser"}
        ]"#,
    );

    inkboard_cmd(temp.path())
        .args(["--yes", "--container", "440x240", "--script"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Replayed 7 events"))
        .stdout(predicate::str::contains("Surface: 400x200"))
        .stdout(predicate::str::contains("History: entry 2 of 3"))
        .stdout(predicate::str::contains("Zoom: 110%"))
        .stdout(predicate::str::contains("Tool: eraser"));
}

#[test]
fn declined_clear_prompt_keeps_history() {
    let temp = TempDir::new().unwrap();
    let script = write_script(
        temp.path(),
        r#"[
            {"type": "pointer-down", "x": 30, "y": 30},
            {"type": "pointer-move", "x": 120, "y": 30},
            {"type": "pointer-up"},
            {"type": "clear"}
        ]"#,
    );

    inkboard_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("History: entry 2 of 2"))
        .stderr(predicate::str::contains(
            "Are you sure you want to clear the entire canvas? [y/N]",
        ));
}

#[test]
fn save_export_and_list_saved() {
    let temp = TempDir::new().unwrap();
    let boards = temp.path().join("boards");
    let exports = temp.path().join("exports");
    let script = write_script(
        temp.path(),
        r#"[
            {"type": "pointer-down", "x": 30, "y": 30},
            {"type": "pointer-move", "x": 120, "y": 30},
            {"type": "pointer-up"},
            {"type": "save"},
            {"type": "set-board-name", "value": "Retro"},
            {"type": "export"}
        ]"#,
    );

    inkboard_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--storage-dir")
        .arg(&boards)
        .arg("--export-dir")
        .arg(&exports)
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: Saved successfully!"))
        .stdout(predicate::str::contains("Board: Retro"));

    assert!(exports.join("Retro.png").exists());

    inkboard_cmd(temp.path())
        .arg("--list-saved")
        .arg("--storage-dir")
        .arg(&boards)
        .assert()
        .success()
        .stdout(predicate::str::contains("whiteboard_"))
        .stdout(predicate::str::contains("Untitled Board"));
}

#[test]
fn list_saved_with_empty_store() {
    let temp = TempDir::new().unwrap();
    inkboard_cmd(temp.path())
        .arg("--list-saved")
        .arg("--storage-dir")
        .arg(temp.path().join("none"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved boards"));
}

#[test]
fn missing_script_fails() {
    let temp = TempDir::new().unwrap();
    inkboard_cmd(temp.path())
        .arg("--script")
        .arg(temp.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read event script"));
}

#[test]
fn malformed_container_is_rejected() {
    let temp = TempDir::new().unwrap();
    inkboard_cmd(temp.path())
        .args(["--container", "wide", "--list-saved"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected WIDTHxHEIGHT"));
}

#[test]
fn dump_config_schema_prints_sections() {
    Command::cargo_bin("dump_config_schema")
        .expect("binary exists")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"drawing\""))
        .stdout(predicate::str::contains("\"viewport\""));
}
