//! Board-level commands: show and check

use anyhow::Result;

use crate::domain::Board;
use crate::storage::Project;

use super::output::Output;

/// Prints the board with columns and tasks in position order
pub fn show(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let board = project.load_board()?;

    if output.is_json() {
        output.data(&board);
    } else {
        print_board(&board);
    }

    Ok(())
}

/// Prints columns and tasks by position (shared with the drag commands)
pub fn print_board(board: &Board) {
    let title = board.title.as_deref().unwrap_or("Board");
    println!("{} ({})", title, board.id);

    if board.columns.is_empty() {
        println!("No columns");
        return;
    }

    for column in board.columns_in_order() {
        println!();
        println!(
            "[{}] {} ({}, {} tasks)",
            column.position,
            column.title,
            column.id,
            column.tasks.len()
        );
        println!("{}", "-".repeat(50));

        for task in column.tasks_in_order() {
            match &task.assignee {
                Some(user) => println!(
                    "  {:>2}. {:<30} {} @{}",
                    task.position, task.title, task.id, user
                ),
                None => println!("  {:>2}. {:<30} {}", task.position, task.title, task.id),
            }
        }
    }
}

/// Validates the stored board's positions
///
/// Reads the file directly, bypassing the normalize-on-load setting.
pub fn check(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let board = project.board_store().read()?;

    match board.validate() {
        Ok(()) => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "consistent": true,
                    "columns": board.columns.len(),
                    "tasks": board.task_count(),
                }));
            } else {
                output.success(&format!(
                    "Board is consistent: {} columns, {} tasks",
                    board.columns.len(),
                    board.task_count()
                ));
            }
            Ok(())
        }
        Err(problem) => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "consistent": false,
                    "problem": problem.to_string(),
                }));
            }
            anyhow::bail!("Board is inconsistent: {}", problem)
        }
    }
}
