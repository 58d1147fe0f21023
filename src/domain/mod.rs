//! Domain models for the board layout
//!
//! Contains the layout snapshot and the pure transitions over it, without
//! any I/O concerns.

mod board;
mod id;
mod position;
mod renumber;
mod transition;

pub use board::{Board, Column, LayoutError, Scope, Task};
pub use id::{BoardId, ColumnId, IdError, TaskId, UserId};
pub use position::{
    locate, locate_column, locate_task, locate_task_in, Container, EntityKind, EntityRef,
    Location, TaskLocation,
};
pub use renumber::{renumber, shifted, Ordered};
pub use transition::{
    move_task, reorder_columns, reorder_tasks, try_move_task, try_reorder_columns,
    try_reorder_tasks, TransitionError,
};
