//! Layout transitions
//!
//! Each transition takes a snapshot and returns a new one. They are total:
//! a hover that cannot apply (stale ID, cross-column swap, hovering over
//! itself) yields a snapshot equal to the input. The `try_*` variants
//! expose the reason so callers can log it; nothing surfaces it to a user.

use thiserror::Error;

use super::board::Board;
use super::id::{ColumnId, TaskId};
use super::position::{locate_column, locate_task, locate_task_in};
use super::renumber::renumber;

/// Why a transition left the snapshot unchanged
#[derive(Debug, Error, PartialEq)]
pub enum TransitionError {
    #[error("Column not found: {0}")]
    ColumnNotFound(ColumnId),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Task {task} is not in column {column}")]
    TaskNotInColumn { task: TaskId, column: ColumnId },

    #[error("Cannot reorder {dragged} against {hovered}: they are in different columns")]
    InvalidCrossContainerSwap { dragged: TaskId, hovered: TaskId },

    #[error("Entity dragged over itself")]
    SameEntity,

    #[error("Task {0} is already in the target column")]
    SameColumn(TaskId),
}

impl TransitionError {
    /// True for stale or unknown IDs
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TransitionError::ColumnNotFound(_)
                | TransitionError::TaskNotFound(_)
                | TransitionError::TaskNotInColumn { .. }
        )
    }
}

/// Moves the dragged column into the hovered column's slot
pub fn reorder_columns(board: &Board, dragged: &ColumnId, hovered: &ColumnId) -> Board {
    try_reorder_columns(board, dragged, hovered).unwrap_or_else(|reason| {
        tracing::debug!(%dragged, %hovered, %reason, "column reorder skipped");
        board.clone()
    })
}

pub fn try_reorder_columns(
    board: &Board,
    dragged: &ColumnId,
    hovered: &ColumnId,
) -> Result<Board, TransitionError> {
    if dragged == hovered {
        return Err(TransitionError::SameEntity);
    }

    let from = locate_column(board, dragged)
        .ok_or_else(|| TransitionError::ColumnNotFound(dragged.clone()))?;
    let to = locate_column(board, hovered)
        .ok_or_else(|| TransitionError::ColumnNotFound(hovered.clone()))?;

    Ok(Board {
        columns: renumber(&board.columns, from, to),
        ..board.clone()
    })
}

/// Moves the dragged task into the hovered task's slot within one column
///
/// Tasks in different columns are left alone: crossing columns is
/// [`move_task`]'s job.
pub fn reorder_tasks(board: &Board, dragged: &TaskId, hovered: &TaskId) -> Board {
    try_reorder_tasks(board, dragged, hovered).unwrap_or_else(|reason| {
        tracing::debug!(%dragged, %hovered, %reason, "task reorder skipped");
        board.clone()
    })
}

pub fn try_reorder_tasks(
    board: &Board,
    dragged: &TaskId,
    hovered: &TaskId,
) -> Result<Board, TransitionError> {
    if dragged == hovered {
        return Err(TransitionError::SameEntity);
    }

    let from =
        locate_task(board, dragged).ok_or_else(|| TransitionError::TaskNotFound(dragged.clone()))?;
    let to =
        locate_task(board, hovered).ok_or_else(|| TransitionError::TaskNotFound(hovered.clone()))?;

    if from.column != to.column {
        return Err(TransitionError::InvalidCrossContainerSwap {
            dragged: dragged.clone(),
            hovered: hovered.clone(),
        });
    }

    let mut next = board.clone();
    for column in next.columns.iter_mut().filter(|c| c.id == from.column) {
        column.tasks = renumber(&column.tasks, from.position, to.position);
    }
    Ok(next)
}

/// Moves a task from one column to the end of another
///
/// The source column closes the gap; the task keeps every attribute but
/// its position, which becomes the destination's task count.
pub fn move_task(board: &Board, task: &TaskId, from: &ColumnId, to: &ColumnId) -> Board {
    try_move_task(board, task, from, to).unwrap_or_else(|reason| {
        tracing::debug!(%task, %from, %to, %reason, "task move skipped");
        board.clone()
    })
}

pub fn try_move_task(
    board: &Board,
    task: &TaskId,
    from: &ColumnId,
    to: &ColumnId,
) -> Result<Board, TransitionError> {
    let old_position =
        locate_task_in(board, from, task).ok_or_else(|| TransitionError::TaskNotInColumn {
            task: task.clone(),
            column: from.clone(),
        })?;

    if from == to {
        return Err(TransitionError::SameColumn(task.clone()));
    }
    if board.column(to).is_none() {
        return Err(TransitionError::ColumnNotFound(to.clone()));
    }

    let mut next = board.clone();

    let source = next
        .columns
        .iter_mut()
        .find(|c| &c.id == from)
        .ok_or_else(|| TransitionError::ColumnNotFound(from.clone()))?;
    let index = source
        .tasks
        .iter()
        .position(|t| &t.id == task)
        .ok_or_else(|| TransitionError::TaskNotFound(task.clone()))?;
    let mut moved = source.tasks.remove(index);
    for sibling in source.tasks.iter_mut().filter(|t| t.position > old_position) {
        sibling.position -= 1;
    }

    let destination = next
        .columns
        .iter_mut()
        .find(|c| &c.id == to)
        .ok_or_else(|| TransitionError::ColumnNotFound(to.clone()))?;
    moved.position = destination.next_task_order();
    destination.tasks.push(moved);

    Ok(next)
}
