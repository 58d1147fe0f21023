//! Drag CLI commands
//!
//! Replays one drag gesture against the stored board: begin, a hover per
//! `--over` target, then drop (commit to the board file) or `--cancel`.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use crate::domain::{ColumnId, IdError, TaskId};
use crate::engine::{CommitOutcome, DragController, LayoutOrder, LayoutStore};
use crate::storage::{BoardStore, Project};

use super::board::print_board;
use super::output::Output;

#[derive(Subcommand)]
pub enum DragCommands {
    /// Drag a column over other columns
    ///
    /// Example:
    ///   kanban drag column c-3333333 --over c-2222222 --over c-1111111
    Column {
        /// Column being dragged
        id: ColumnId,

        /// Columns hovered over, in order
        #[arg(long = "over", value_name = "COLUMN")]
        over: Vec<ColumnId>,

        /// Abort instead of dropping (nothing is saved)
        #[arg(long)]
        cancel: bool,
    },

    /// Drag a task over columns and tasks
    ///
    /// Targets are `column:<id>` (move into that column) or `task:<id>`
    /// (take that task's slot within the current column).
    ///
    /// Example:
    ///   kanban drag task t-1111111 --over column:c-2222222 --over task:t-3333333
    Task {
        /// Task being dragged
        id: TaskId,

        /// Drop targets hovered over, in order
        #[arg(long = "over", value_name = "TARGET")]
        over: Vec<HoverTarget>,

        /// Abort instead of dropping (nothing is saved)
        #[arg(long)]
        cancel: bool,
    },
}

/// A drop target the dragged task passes over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverTarget {
    Column(ColumnId),
    Task(TaskId),
}

impl FromStr for HoverTarget {
    type Err = HoverTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("column", id)) => Ok(HoverTarget::Column(id.parse()?)),
            Some(("task", id)) => Ok(HoverTarget::Task(id.parse()?)),
            _ => Err(HoverTargetError::Format(s.to_string())),
        }
    }
}

impl fmt::Display for HoverTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoverTarget::Column(id) => write!(f, "column:{}", id),
            HoverTarget::Task(id) => write!(f, "task:{}", id),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum HoverTargetError {
    #[error("Invalid hover target '{0}': expected 'column:<id>' or 'task:<id>'")]
    Format(String),

    #[error(transparent)]
    Id(#[from] IdError),
}

/// How a replayed gesture ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum GestureOutcome {
    Committed,
    Unchanged,
    Cancelled,
}

/// Summary printed after a gesture
#[derive(Serialize)]
struct GestureReport {
    outcome: GestureOutcome,
    hovers: usize,
    changed: usize,
    layout: LayoutOrder,
}

pub fn run(cmd: DragCommands, output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let board = project.load_board()?;
    let mut drag = DragController::new(LayoutStore::new(board, project.board_store()));

    let mut changed = 0;
    let (hovers, cancel) = match cmd {
        DragCommands::Column { id, over, cancel } => {
            drag.begin_column(&id)?;
            for column in &over {
                if drag.hover_column(column) {
                    changed += 1;
                }
            }
            (over.len(), cancel)
        }
        DragCommands::Task { id, over, cancel } => {
            drag.begin_task(&id)?;
            for hover in &over {
                tracing::debug!(%hover, "hover");
                let moved = match hover {
                    HoverTarget::Column(column) => drag.hover_column(column),
                    HoverTarget::Task(task) => drag.hover_task(task),
                };
                if moved {
                    changed += 1;
                }
            }
            (over.len(), cancel)
        }
    };

    let outcome = if cancel {
        drag.cancel();
        GestureOutcome::Cancelled
    } else {
        match drag.drop().context("Failed to save the new order")? {
            CommitOutcome::Committed => GestureOutcome::Committed,
            CommitOutcome::Unchanged => GestureOutcome::Unchanged,
        }
    };

    let report = GestureReport {
        outcome,
        hovers,
        changed,
        layout: LayoutOrder::from(drag.snapshot()),
    };
    print_report(output, &report, &drag);
    Ok(())
}

fn print_report(output: &Output, report: &GestureReport, drag: &DragController<BoardStore>) {
    if output.is_json() {
        output.data(report);
        return;
    }

    match report.outcome {
        GestureOutcome::Committed => output.success(&format!(
            "Saved new order ({} of {} hovers changed the layout)",
            report.changed, report.hovers
        )),
        GestureOutcome::Unchanged => output.success("Dropped without changes; nothing saved"),
        GestureOutcome::Cancelled => output.success("Drag cancelled; board unchanged"),
    }
    println!();
    print_board(drag.snapshot());
}
