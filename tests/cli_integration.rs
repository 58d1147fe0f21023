//! CLI integration tests for the kanban binary
//!
//! These tests drive the binary end to end: create a board, add columns and
//! tasks, replay drag gestures, and check what lands in `.kanban/board.json`.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command instance for the kanban binary
fn kanban_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("kanban"))
}

/// Create a temporary directory and initialize a board in it
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    kanban_cmd().arg("init").arg(dir.path()).assert().success();
    dir
}

/// Runs a command with `--format json` and parses stdout
fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let output = kanban_cmd()
        .current_dir(dir)
        .args(args)
        .args(["--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    serde_json::from_str(&stdout).unwrap()
}

fn add_column(dir: &Path, title: &str) -> String {
    let json = run_json(dir, &["column", "add", title]);
    json["id"].as_str().unwrap().to_string()
}

fn add_task(dir: &Path, column: &str, title: &str) -> String {
    let json = run_json(dir, &["task", "add", column, title]);
    json["id"].as_str().unwrap().to_string()
}

fn board_file(dir: &Path) -> String {
    fs::read_to_string(dir.join(".kanban/board.json")).unwrap()
}

fn stored_board(dir: &Path) -> serde_json::Value {
    serde_json::from_str(&board_file(dir)).unwrap()
}

fn column_order(board: &serde_json::Value, id: &str) -> u64 {
    board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == id)
        .and_then(|c| c["order"].as_u64())
        .unwrap()
}

/// Returns (column id, order) for a task
fn task_slot(board: &serde_json::Value, id: &str) -> (String, u64) {
    for column in board["columns"].as_array().unwrap() {
        for task in column["tasks"].as_array().unwrap() {
            if task["id"] == id {
                return (
                    column["id"].as_str().unwrap().to_string(),
                    task["order"].as_u64().unwrap(),
                );
            }
        }
    }
    panic!("task {} not on the board", id);
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    kanban_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized kanban board"));

    assert!(dir.path().join(".kanban").is_dir());
    assert!(dir.path().join(".kanban/config.toml").is_file());
    assert!(dir.path().join(".kanban/board.json").is_file());

    let board = stored_board(dir.path());
    assert!(board["id"].as_str().unwrap().starts_with("b-"));
    assert_eq!(board["columns"].as_array().unwrap().len(), 0);
}

#[test]
fn test_init_is_idempotent() {
    let dir = setup_project();
    let column = add_column(dir.path(), "Todo");

    kanban_cmd().arg("init").arg(dir.path()).assert().success();

    // The existing board survives a second init
    let board = stored_board(dir.path());
    assert_eq!(column_order(&board, &column), 0);
}

// =============================================================================
// Column and Task Tests
// =============================================================================

#[test]
fn test_column_add_appends_in_order() {
    let dir = setup_project();

    let todo = add_column(dir.path(), "Todo");
    let doing = add_column(dir.path(), "Doing");
    let done = add_column(dir.path(), "Done");

    let board = stored_board(dir.path());
    assert_eq!(column_order(&board, &todo), 0);
    assert_eq!(column_order(&board, &doing), 1);
    assert_eq!(column_order(&board, &done), 2);

    kanban_cmd()
        .current_dir(dir.path())
        .args(["column", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Todo"))
        .stdout(predicate::str::contains("Done"));
}

#[test]
fn test_task_add_appends_to_column() {
    let dir = setup_project();
    let todo = add_column(dir.path(), "Todo");

    let first = add_task(dir.path(), &todo, "Write docs");

    kanban_cmd()
        .current_dir(dir.path())
        .args(["task", "add", &todo, "Ship it", "--assignee", "u-7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task"))
        .stdout(predicate::str::contains("order 1"));

    let board = stored_board(dir.path());
    assert_eq!(task_slot(&board, &first), (todo.clone(), 0));

    let tasks = board["columns"][0]["tasks"].as_array().unwrap();
    let shipped = tasks.iter().find(|t| t["title"] == "Ship it").unwrap();
    assert_eq!(shipped["userId"], "u-7");
    assert_eq!(shipped["order"], 1);
}

#[test]
fn test_task_add_unknown_column_fails() {
    let dir = setup_project();

    kanban_cmd()
        .current_dir(dir.path())
        .args(["task", "add", "c-missing", "Orphan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Column not found"));
}

#[test]
fn test_show_lists_columns_and_tasks() {
    let dir = setup_project();
    let todo = add_column(dir.path(), "Todo");
    add_task(dir.path(), &todo, "Write docs");

    kanban_cmd()
        .current_dir(dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Todo"))
        .stdout(predicate::str::contains("Write docs"));

    let json = run_json(dir.path(), &["show"]);
    assert_eq!(json["columns"][0]["tasks"][0]["title"], "Write docs");
}

// =============================================================================
// Drag Tests
// =============================================================================

#[test]
fn test_drag_column_commits_new_order() {
    let dir = setup_project();
    let a = add_column(dir.path(), "A");
    let b = add_column(dir.path(), "B");
    let c = add_column(dir.path(), "C");

    kanban_cmd()
        .current_dir(dir.path())
        .args(["drag", "column", &c, "--over", &b, "--over", &a])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved new order (2 of 2"));

    let board = stored_board(dir.path());
    assert_eq!(column_order(&board, &c), 0);
    assert_eq!(column_order(&board, &a), 1);
    assert_eq!(column_order(&board, &b), 2);
}

#[test]
fn test_drag_task_across_columns() {
    let dir = setup_project();
    let todo = add_column(dir.path(), "Todo");
    let done = add_column(dir.path(), "Done");
    let t1 = add_task(dir.path(), &todo, "One");
    let t2 = add_task(dir.path(), &todo, "Two");
    let t3 = add_task(dir.path(), &done, "Three");

    let report = run_json(
        dir.path(),
        &["drag", "task", &t1, "--over", &format!("column:{}", done)],
    );
    assert_eq!(report["outcome"], "committed");
    assert_eq!(report["changed"], 1);

    // The source column closes the gap; the task lands at the end
    let board = stored_board(dir.path());
    assert_eq!(task_slot(&board, &t2), (todo.clone(), 0));
    assert_eq!(task_slot(&board, &t3), (done.clone(), 0));
    assert_eq!(task_slot(&board, &t1), (done.clone(), 1));
}

#[test]
fn test_drag_task_move_then_reorder() {
    let dir = setup_project();
    let todo = add_column(dir.path(), "Todo");
    let done = add_column(dir.path(), "Done");
    let t1 = add_task(dir.path(), &todo, "One");
    let t3 = add_task(dir.path(), &done, "Three");

    kanban_cmd()
        .current_dir(dir.path())
        .args([
            "drag",
            "task",
            &t1,
            "--over",
            &format!("column:{}", done),
            "--over",
            &format!("task:{}", t3),
        ])
        .assert()
        .success();

    let board = stored_board(dir.path());
    assert_eq!(task_slot(&board, &t1), (done.clone(), 0));
    assert_eq!(task_slot(&board, &t3), (done.clone(), 1));
    let source = board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == todo)
        .unwrap();
    assert!(source["tasks"].as_array().unwrap().is_empty());
}

#[test]
fn test_drag_hover_on_other_column_task_is_ignored() {
    let dir = setup_project();
    let todo = add_column(dir.path(), "Todo");
    let done = add_column(dir.path(), "Done");
    let t1 = add_task(dir.path(), &todo, "One");
    let t3 = add_task(dir.path(), &done, "Three");
    let before = board_file(dir.path());

    let report = run_json(
        dir.path(),
        &["drag", "task", &t1, "--over", &format!("task:{}", t3)],
    );
    assert_eq!(report["outcome"], "unchanged");
    assert_eq!(report["changed"], 0);
    assert_eq!(board_file(dir.path()), before);
}

#[test]
fn test_drag_cancel_leaves_board_untouched() {
    let dir = setup_project();
    let a = add_column(dir.path(), "A");
    let b = add_column(dir.path(), "B");
    let before = board_file(dir.path());

    kanban_cmd()
        .current_dir(dir.path())
        .args(["drag", "column", &b, "--over", &a, "--cancel"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Drag cancelled"));

    assert_eq!(board_file(dir.path()), before);
}

#[test]
fn test_drag_without_hover_saves_nothing() {
    let dir = setup_project();
    let a = add_column(dir.path(), "A");
    let before = board_file(dir.path());

    kanban_cmd()
        .current_dir(dir.path())
        .args(["drag", "column", &a])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing saved"));

    assert_eq!(board_file(dir.path()), before);
}

#[test]
fn test_drag_unknown_entity_fails() {
    let dir = setup_project();
    add_column(dir.path(), "A");

    kanban_cmd()
        .current_dir(dir.path())
        .args(["drag", "column", "c-missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Column not found: c-missing"));

    kanban_cmd()
        .current_dir(dir.path())
        .args(["drag", "task", "t-missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Task not found: t-missing"));
}

#[test]
fn test_drag_bad_hover_target_is_rejected() {
    let dir = setup_project();
    add_column(dir.path(), "A");

    kanban_cmd()
        .current_dir(dir.path())
        .args(["drag", "task", "t-1", "--over", "lane:x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid hover target"));
}

// =============================================================================
// Consistency Tests
// =============================================================================

const GAPPED_BOARD: &str = r#"{
  "id": "b-fixture",
  "columns": [
    { "id": "c-a", "title": "A", "order": 0, "tasks": [] },
    { "id": "c-b", "title": "B", "order": 2, "tasks": [
      { "id": "t-1", "title": "One", "order": 0, "userId": "" }
    ] }
  ]
}"#;

#[test]
fn test_check_reports_consistent_board() {
    let dir = setup_project();
    add_column(dir.path(), "A");

    kanban_cmd()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Board is consistent"));
}

#[test]
fn test_check_reports_position_gap() {
    let dir = setup_project();
    fs::write(dir.path().join(".kanban/board.json"), GAPPED_BOARD).unwrap();

    kanban_cmd()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Board is inconsistent"));
}

#[test]
fn test_show_reranks_gapped_board() {
    let dir = setup_project();
    fs::write(dir.path().join(".kanban/board.json"), GAPPED_BOARD).unwrap();

    let output = kanban_cmd()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["show", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let board: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(column_order(&board, "c-a"), 0);
    assert_eq!(column_order(&board, "c-b"), 1);

    let stderr = String::from_utf8_lossy(&output.get_output().stderr);
    assert!(stderr.contains("re-ranking"));

    // Showing does not rewrite the file
    assert_eq!(board_file(dir.path()), GAPPED_BOARD);
}

#[test]
fn test_drag_repairs_gapped_board() {
    let dir = setup_project();
    fs::write(dir.path().join(".kanban/board.json"), GAPPED_BOARD).unwrap();

    kanban_cmd()
        .current_dir(dir.path())
        .args(["drag", "column", "c-b", "--over", "c-a"])
        .assert()
        .success();

    let board = stored_board(dir.path());
    assert_eq!(column_order(&board, "c-b"), 0);
    assert_eq!(column_order(&board, "c-a"), 1);

    // Empty userId is read as unassigned and not written back
    assert!(board_file(dir.path()).contains("\"t-1\""));
    assert!(!board_file(dir.path()).contains("userId"));

    kanban_cmd()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .success();
}

#[test]
fn test_strict_load_refuses_gapped_board() {
    let dir = setup_project();
    fs::write(dir.path().join(".kanban/board.json"), GAPPED_BOARD).unwrap();
    fs::write(
        dir.path().join(".kanban/config.toml"),
        "[board]\nnormalize_on_load = false\n",
    )
    .unwrap();

    kanban_cmd()
        .current_dir(dir.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Stored board is inconsistent"));
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_not_in_project_error() {
    let dir = TempDir::new().unwrap();

    kanban_cmd()
        .current_dir(dir.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a kanban project"));
}

#[test]
fn test_verbose_flag_logs_to_stderr() {
    let dir = setup_project();

    let output = kanban_cmd()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["--verbose", "column", "add", "Todo"])
        .assert()
        .success();

    let stderr = String::from_utf8_lossy(&output.get_output().stderr);
    assert!(stderr.contains("column created"));
}
