//! Position lookup within a layout snapshot

use super::board::Board;
use super::id::{BoardId, ColumnId, TaskId};

/// Kind of entity being looked up or dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Column,
    Task,
}

/// Reference to an entity on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef<'a> {
    Column(&'a ColumnId),
    Task(&'a TaskId),
}

impl EntityRef<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Column(_) => EntityKind::Column,
            EntityRef::Task(_) => EntityKind::Task,
        }
    }
}

/// What holds an entity: the board for columns, a column for tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    Board(BoardId),
    Column(ColumnId),
}

/// Where an entity sits in a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub container: Container,
    pub position: usize,
}

/// A task's owning column and its position there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLocation {
    pub column: ColumnId,
    pub position: usize,
}

/// Finds any entity. `None` means the ID is not on the board.
pub fn locate(board: &Board, entity: EntityRef<'_>) -> Option<Location> {
    match entity {
        EntityRef::Column(id) => locate_column(board, id).map(|position| Location {
            container: Container::Board(board.id.clone()),
            position,
        }),
        EntityRef::Task(id) => locate_task(board, id).map(|found| Location {
            container: Container::Column(found.column),
            position: found.position,
        }),
    }
}

/// Position of a column among the board's columns
pub fn locate_column(board: &Board, id: &ColumnId) -> Option<usize> {
    board.columns.iter().find(|c| &c.id == id).map(|c| c.position)
}

/// Finds a task when its column is not known (scans every column)
pub fn locate_task(board: &Board, id: &TaskId) -> Option<TaskLocation> {
    board.columns.iter().find_map(|column| {
        column.task(id).map(|task| TaskLocation {
            column: column.id.clone(),
            position: task.position,
        })
    })
}

/// Position of a task within a known column
pub fn locate_task_in(board: &Board, column: &ColumnId, id: &TaskId) -> Option<usize> {
    board
        .column(column)
        .and_then(|c| c.task(id))
        .map(|t| t.position)
}
