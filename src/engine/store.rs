//! Layout store
//!
//! Holds the snapshot the view renders from, plus the settled snapshot a
//! cancelled gesture falls back to. Hover transitions replace the current
//! snapshot eagerly; `commit` hands the already-consistent result to the
//! collaborator without recomputing anything.

use crate::domain::{self, Board, ColumnId, TaskId, UserId};

use super::collaborator::{
    CommitError, CommitHooks, Committer, CreateColumnRequest, CreateTaskRequest, LayoutOrder,
};

/// Result of a successful [`LayoutStore::commit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing changed since the last settled snapshot; the collaborator was not called
    Unchanged,
    /// The collaborator accepted the layout
    Committed,
}

/// In-memory owner of the board layout
#[derive(Debug)]
pub struct LayoutStore<C> {
    settled: Board,
    current: Board,
    unconfirmed: bool,
    committer: C,
    hooks: CommitHooks,
}

impl<C: Committer> LayoutStore<C> {
    /// Seeds the store from a layout supplied by the collaborator
    pub fn new(board: Board, committer: C) -> Self {
        let board = seed(board);
        Self {
            settled: board.clone(),
            current: board,
            unconfirmed: false,
            committer,
            hooks: CommitHooks::default(),
        }
    }

    pub fn with_hooks(mut self, hooks: CommitHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// The snapshot to render
    pub fn snapshot(&self) -> &Board {
        &self.current
    }

    /// The snapshot a cancel reverts to
    pub fn settled(&self) -> &Board {
        &self.settled
    }

    pub fn committer(&self) -> &C {
        &self.committer
    }

    pub fn committer_mut(&mut self) -> &mut C {
        &mut self.committer
    }

    /// True when hover transitions have changed the layout since it settled
    pub fn has_pending_changes(&self) -> bool {
        self.current != self.settled
    }

    /// True when the last commit failed and the shown layout is optimistic
    pub fn is_unconfirmed(&self) -> bool {
        self.unconfirmed
    }

    /// Applies a column drag; returns true if the layout changed
    pub fn apply_column_swap(&mut self, dragged: &ColumnId, hovered: &ColumnId) -> bool {
        let next = domain::reorder_columns(&self.current, dragged, hovered);
        self.replace(next)
    }

    /// Applies a within-column task drag; returns true if the layout changed
    pub fn apply_task_swap(&mut self, dragged: &TaskId, hovered: &TaskId) -> bool {
        let next = domain::reorder_tasks(&self.current, dragged, hovered);
        self.replace(next)
    }

    /// Applies a cross-column task move; returns true if the layout changed
    pub fn apply_task_move(&mut self, task: &TaskId, from: &ColumnId, to: &ColumnId) -> bool {
        let next = domain::move_task(&self.current, task, from, to);
        self.replace(next)
    }

    fn replace(&mut self, next: Board) -> bool {
        if next == self.current {
            return false;
        }
        self.current = next;
        true
    }

    /// Hands the current layout to the collaborator
    ///
    /// A failed commit keeps the local positions: the layout still becomes
    /// the settled snapshot and the store is flagged unconfirmed until the
    /// next successful commit or reload.
    pub fn commit(&mut self) -> Result<CommitOutcome, CommitError> {
        if !self.has_pending_changes() {
            tracing::debug!(board = %self.current.id, "nothing to commit");
            return Ok(CommitOutcome::Unchanged);
        }

        let layout = LayoutOrder::from(&self.current);
        self.settled = self.current.clone();

        match self.committer.commit(&layout) {
            Ok(()) => {
                tracing::info!(
                    board = %layout.board_id,
                    columns = layout.columns.len(),
                    "layout committed"
                );
                self.unconfirmed = false;
                self.hooks.succeeded(&layout);
                Ok(CommitOutcome::Committed)
            }
            Err(err) => {
                tracing::warn!(
                    board = %layout.board_id,
                    error = %err,
                    "layout commit failed, keeping local order"
                );
                self.unconfirmed = true;
                self.hooks.failed(&err);
                Err(err)
            }
        }
    }

    /// Discards every change since the layout last settled
    ///
    /// Returns true if anything was discarded.
    pub fn cancel(&mut self) -> bool {
        if !self.has_pending_changes() {
            return false;
        }
        tracing::debug!(board = %self.current.id, "discarding uncommitted layout");
        self.current = self.settled.clone();
        true
    }

    /// Replaces the layout with a fresh one from the collaborator
    pub fn reload(&mut self, board: Board) {
        let board = seed(board);
        self.settled = board.clone();
        self.current = board;
        self.unconfirmed = false;
    }

    /// Builds the request to append a column at the end of the board
    pub fn new_column_request(&self, title: impl Into<String>) -> CreateColumnRequest {
        CreateColumnRequest {
            title: title.into(),
            order: self.current.next_column_order(),
        }
    }

    /// Builds the request to append a task at the end of a column
    ///
    /// Returns `None` if the column is not on the board.
    pub fn new_task_request(
        &self,
        column: &ColumnId,
        title: impl Into<String>,
        description: impl Into<String>,
        assignee: Option<UserId>,
    ) -> Option<CreateTaskRequest> {
        let target = self.current.column(column)?;
        Some(CreateTaskRequest {
            column: column.clone(),
            title: title.into(),
            order: target.next_task_order(),
            description: description.into(),
            user_id: assignee,
        })
    }
}

/// Re-ranks an inbound layout that breaks the contiguity invariant
fn seed(board: Board) -> Board {
    match board.validate() {
        Ok(()) => board,
        Err(problem) => {
            tracing::warn!(
                board = %board.id,
                %problem,
                "inbound layout is not contiguous, re-ranking"
            );
            board.normalized()
        }
    }
}
