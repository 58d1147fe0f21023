//! Column CLI commands

use anyhow::Result;
use clap::Subcommand;

use crate::engine::{DiscardCommitter, LayoutStore};
use crate::storage::Project;

use super::output::Output;

#[derive(Subcommand)]
pub enum ColumnCommands {
    /// Append a column to the end of the board
    Add {
        /// Column title
        title: String,
    },

    /// List columns in position order
    List,
}

pub fn run(cmd: ColumnCommands, output: &Output) -> Result<()> {
    match cmd {
        ColumnCommands::Add { title } => add_column(output, &title),
        ColumnCommands::List => list_columns(output),
    }
}

fn add_column(output: &Output, title: &str) -> Result<()> {
    let project = Project::open_current()?;
    let board_store = project.board_store();

    // Only the create request is needed here; nothing is committed
    let layout = LayoutStore::new(project.load_board()?, DiscardCommitter);
    let request = layout.new_column_request(title);
    let column = board_store.create_column(&request)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": column.id,
            "title": column.title,
            "order": column.position,
        }));
    } else {
        output.success(&format!(
            "Created column: {} - {} (order {})",
            column.id, column.title, column.position
        ));
    }

    Ok(())
}

fn list_columns(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let board = project.load_board()?;
    let columns = board.columns_in_order();

    if output.is_json() {
        let items: Vec<_> = columns
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "title": c.title,
                    "order": c.position,
                    "tasks": c.tasks.len(),
                })
            })
            .collect();
        output.data(&items);
    } else if columns.is_empty() {
        println!("No columns");
    } else {
        println!("{:<6} {:<12} {:<6} TITLE", "ORDER", "ID", "TASKS");
        println!("{}", "-".repeat(50));
        for column in columns {
            println!(
                "{:<6} {:<12} {:<6} {}",
                column.position,
                column.id,
                column.tasks.len(),
                column.title
            );
        }
    }

    Ok(())
}
