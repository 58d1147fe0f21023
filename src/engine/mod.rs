//! # Drag Engine
//!
//! Stateful layer on top of the pure domain transitions.
//!
//! ## Pieces
//!
//! | Type | Role |
//! |------|------|
//! | [`LayoutStore`] | Owns the current and settled snapshots, applies transitions, commits |
//! | [`DragController`] | Tracks the active [`DragSession`] and routes hover/drop/cancel |
//! | [`Committer`] | Collaborator that persists a settled [`LayoutOrder`] |
//! | [`CommitHooks`] | Host callbacks for commit success and failure |
//!
//! ## Gesture Lifecycle
//!
//! ```text
//! Idle ──begin──▶ Dragging ──hover*──▶ Dragging ──drop──▶ commit ──▶ Idle
//!                                          │
//!                                          └──cancel──▶ revert ──▶ Idle
//! ```
//!
//! Every hover produces a consistent snapshot, so a drop commits exactly
//! what the user sees and a cancel returns to the last settled layout.

mod collaborator;
mod controller;
mod store;

pub use collaborator::{
    ColumnOrder, CommitError, CommitHooks, Committer, CreateColumnRequest, CreateTaskRequest,
    DiscardCommitter, LayoutOrder, TaskOrder,
};
pub use controller::{DragController, DragError, DragSession};
pub use store::{CommitOutcome, LayoutStore};
