//! Boundary to the external collaborator (the backend)
//!
//! The engine never talks to a server itself. It hands a [`LayoutOrder`]
//! to a [`Committer`] when a drop settles, builds the create-item requests
//! with the right `order`, and reports commit results through
//! [`CommitHooks`] so the host can show notifications.

use serde::Serialize;
use thiserror::Error;

use crate::domain::{Board, BoardId, ColumnId, TaskId, UserId};

/// Why persisting a settled layout failed
#[derive(Debug, Error)]
pub enum CommitError {
    #[error("Backend rejected the layout: {0}")]
    Rejected(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Position of one task in the committed layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOrder {
    pub id: TaskId,
    pub order: usize,
}

/// Position of one column and its tasks in the committed layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnOrder {
    pub id: ColumnId,
    pub order: usize,
    pub tasks: Vec<TaskOrder>,
}

/// Commit payload: every column's and every task's position
///
/// Columns and tasks are listed by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOrder {
    pub board_id: BoardId,
    pub columns: Vec<ColumnOrder>,
}

impl From<&Board> for LayoutOrder {
    fn from(board: &Board) -> Self {
        let columns = board
            .columns_in_order()
            .into_iter()
            .map(|column| ColumnOrder {
                id: column.id.clone(),
                order: column.position,
                tasks: column
                    .tasks_in_order()
                    .into_iter()
                    .map(|task| TaskOrder {
                        id: task.id.clone(),
                        order: task.position,
                    })
                    .collect(),
            })
            .collect();

        Self {
            board_id: board.id.clone(),
            columns,
        }
    }
}

/// Request to append a column to a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateColumnRequest {
    pub title: String,
    pub order: usize,
}

/// Request to append a task to a column
///
/// `column` identifies the resource path, it is not part of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(skip)]
    pub column: ColumnId,
    pub title: String,
    pub order: usize,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Receives settled layouts for persistence
pub trait Committer {
    fn commit(&mut self, layout: &LayoutOrder) -> Result<(), CommitError>;
}

impl<C: Committer + ?Sized> Committer for &mut C {
    fn commit(&mut self, layout: &LayoutOrder) -> Result<(), CommitError> {
        (**self).commit(layout)
    }
}

impl<C: Committer + ?Sized> Committer for Box<C> {
    fn commit(&mut self, layout: &LayoutOrder) -> Result<(), CommitError> {
        (**self).commit(layout)
    }
}

/// Committer that accepts everything and persists nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardCommitter;

impl Committer for DiscardCommitter {
    fn commit(&mut self, _layout: &LayoutOrder) -> Result<(), CommitError> {
        Ok(())
    }
}

type SuccessHook = Box<dyn FnMut(&LayoutOrder)>;
type FailureHook = Box<dyn FnMut(&CommitError)>;

/// Callbacks fired after a commit attempt
#[derive(Default)]
pub struct CommitHooks {
    on_success: Option<SuccessHook>,
    on_failure: Option<FailureHook>,
}

impl CommitHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_success(mut self, hook: impl FnMut(&LayoutOrder) + 'static) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    pub fn on_failure(mut self, hook: impl FnMut(&CommitError) + 'static) -> Self {
        self.on_failure = Some(Box::new(hook));
        self
    }

    pub(crate) fn succeeded(&mut self, layout: &LayoutOrder) {
        if let Some(hook) = self.on_success.as_mut() {
            hook(layout);
        }
    }

    pub(crate) fn failed(&mut self, error: &CommitError) {
        if let Some(hook) = self.on_failure.as_mut() {
            hook(error);
        }
    }
}

impl std::fmt::Debug for CommitHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitHooks")
            .field("on_success", &self.on_success.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}
