//! Task CLI commands

use anyhow::Result;
use clap::Subcommand;

use crate::domain::{ColumnId, UserId};
use crate::engine::{DiscardCommitter, LayoutStore};
use crate::storage::Project;

use super::output::Output;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Append a task to the end of a column
    ///
    /// Examples:
    ///   kanban task add c-1234567 "Fix typo"
    ///   kanban task add c-1234567 "Build API" --description "REST first" --assignee u-42
    Add {
        /// Column ID
        column: ColumnId,

        /// Task title
        title: String,

        /// Free-text description
        #[arg(long, short, default_value = "")]
        description: String,

        /// Assigned user ID
        #[arg(long, short)]
        assignee: Option<UserId>,
    },
}

pub fn run(cmd: TaskCommands, output: &Output) -> Result<()> {
    match cmd {
        TaskCommands::Add {
            column,
            title,
            description,
            assignee,
        } => add_task(output, &column, &title, &description, assignee),
    }
}

fn add_task(
    output: &Output,
    column: &ColumnId,
    title: &str,
    description: &str,
    assignee: Option<UserId>,
) -> Result<()> {
    let project = Project::open_current()?;
    let board_store = project.board_store();

    let layout = LayoutStore::new(project.load_board()?, DiscardCommitter);
    let request = layout
        .new_task_request(column, title, description, assignee)
        .ok_or_else(|| anyhow::anyhow!("Column not found: {}", column))?;
    let task = board_store.create_task(&request)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": task.id,
            "column": column,
            "title": task.title,
            "order": task.position,
        }));
    } else {
        output.success(&format!(
            "Created task: {} - {} (order {} in {})",
            task.id, task.title, task.position, column
        ));
    }

    Ok(())
}
