//! Kanban Order - drag-and-drop ordering engine for kanban boards
//!
//! The engine keeps the positions of columns and tasks contiguous while a
//! user drags them around, and hands the settled layout to a backend when
//! the drag ends. A file-backed backend and a CLI are included for local
//! use.

pub mod cli;
pub mod domain;
pub mod engine;
pub mod storage;

pub use domain::{Board, BoardId, Column, ColumnId, Task, TaskId, UserId};
pub use engine::{CommitOutcome, Committer, DragController, DragSession, LayoutStore};
