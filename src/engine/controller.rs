//! Drag session controller
//!
//! Turns the pointer-level event stream of one drag gesture into calls on
//! the [`LayoutStore`]. It remembers which entity is being dragged and
//! nothing else; all reordering happens in the store's transitions.

use thiserror::Error;

use crate::domain::{self, Board, ColumnId, TaskId};

use super::collaborator::{CommitError, Committer};
use super::store::{CommitOutcome, LayoutStore};

#[derive(Debug, Error, PartialEq)]
pub enum DragError {
    #[error("A drag is already in progress")]
    SessionActive,

    #[error("Column not found: {0}")]
    ColumnNotFound(ColumnId),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),
}

/// What is being dragged right now
///
/// A task session also records the column the task currently sits in; it
/// follows the task as hover events move it between columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    DraggingColumn(ColumnId),
    DraggingTask { task: TaskId, column: ColumnId },
}

impl DragSession {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragSession::Idle)
    }
}

/// Routes drag events of one board view into its layout store
#[derive(Debug)]
pub struct DragController<C> {
    store: LayoutStore<C>,
    session: DragSession,
}

impl<C: Committer> DragController<C> {
    pub fn new(store: LayoutStore<C>) -> Self {
        Self {
            store,
            session: DragSession::Idle,
        }
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn store(&self) -> &LayoutStore<C> {
        &self.store
    }

    /// The snapshot to render
    pub fn snapshot(&self) -> &Board {
        self.store.snapshot()
    }

    pub fn into_store(self) -> LayoutStore<C> {
        self.store
    }

    /// Starts dragging a column
    pub fn begin_column(&mut self, id: &ColumnId) -> Result<(), DragError> {
        self.ensure_idle()?;
        if self.store.snapshot().column(id).is_none() {
            return Err(DragError::ColumnNotFound(id.clone()));
        }

        tracing::debug!(column = %id, "column drag started");
        self.session = DragSession::DraggingColumn(id.clone());
        Ok(())
    }

    /// Starts dragging a task
    pub fn begin_task(&mut self, id: &TaskId) -> Result<(), DragError> {
        self.ensure_idle()?;
        let found = domain::locate_task(self.store.snapshot(), id)
            .ok_or_else(|| DragError::TaskNotFound(id.clone()))?;

        tracing::debug!(task = %id, column = %found.column, "task drag started");
        self.session = DragSession::DraggingTask {
            task: id.clone(),
            column: found.column,
        };
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), DragError> {
        if self.session.is_idle() {
            Ok(())
        } else {
            Err(DragError::SessionActive)
        }
    }

    /// The dragged entity is over a column's drop target
    ///
    /// Reorders columns during a column drag; moves the task into that
    /// column during a task drag. Returns true if the layout changed.
    pub fn hover_column(&mut self, hovered: &ColumnId) -> bool {
        match &mut self.session {
            DragSession::Idle => false,
            DragSession::DraggingColumn(dragged) => self.store.apply_column_swap(dragged, hovered),
            DragSession::DraggingTask { task, column } => {
                let moved = self.store.apply_task_move(task, column, hovered);
                if moved {
                    tracing::debug!(%task, from = %column, to = %hovered, "task moved live");
                    *column = hovered.clone();
                }
                moved
            }
        }
    }

    /// The dragged entity is over another task
    ///
    /// Only meaningful during a task drag, and only within the task's
    /// current column. Returns true if the layout changed.
    pub fn hover_task(&mut self, hovered: &TaskId) -> bool {
        match &self.session {
            DragSession::DraggingTask { task, .. } => self.store.apply_task_swap(task, hovered),
            DragSession::Idle | DragSession::DraggingColumn(_) => false,
        }
    }

    /// Ends the gesture on a valid drop target and commits the result
    pub fn drop(&mut self) -> Result<CommitOutcome, CommitError> {
        if std::mem::take(&mut self.session).is_idle() {
            return Ok(CommitOutcome::Unchanged);
        }
        self.store.commit()
    }

    /// Aborts the gesture and restores the settled layout
    ///
    /// Returns true if hover changes were discarded.
    pub fn cancel(&mut self) -> bool {
        if std::mem::take(&mut self.session).is_idle() {
            return false;
        }
        self.store.cancel()
    }

    /// Takes a fresh layout from the collaborator
    ///
    /// An active session follows its entity into the new layout, or ends
    /// if the entity is gone.
    pub fn reload(&mut self, board: Board) {
        self.store.reload(board);

        let snapshot = self.store.snapshot();
        self.session = match std::mem::take(&mut self.session) {
            DragSession::DraggingColumn(id) if snapshot.column(&id).is_some() => {
                DragSession::DraggingColumn(id)
            }
            DragSession::DraggingTask { task, .. } => match domain::locate_task(snapshot, &task) {
                Some(found) => DragSession::DraggingTask {
                    task,
                    column: found.column,
                },
                None => DragSession::Idle,
            },
            _ => DragSession::Idle,
        };
    }
}
