//! Board layout model
//!
//! A [`Board`] value is the layout snapshot the engine works on: the board,
//! all of its columns and all of their tasks at one instant. Snapshots are
//! plain values; every transition returns a new one.
//!
//! Positions are stored separately from vector order. The vectors keep the
//! order in which the backend (or a move) delivered the items, and
//! `position` alone decides display order. Use [`Board::columns_in_order`]
//! and [`Column::tasks_in_order`] to walk siblings by rank.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::id::{BoardId, ColumnId, TaskId, UserId};
use super::renumber::Ordered;

/// Which sibling set a layout problem was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// The board's columns
    Columns,
    /// The tasks of one column
    Tasks(ColumnId),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Columns => write!(f, "columns"),
            Scope::Tasks(column) => write!(f, "tasks of column {}", column),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("Duplicate position {position} among {scope}")]
    DuplicatePosition { scope: Scope, position: usize },

    #[error("Position {missing} is missing among {scope}")]
    PositionGap { scope: Scope, missing: usize },

    #[error("Column {0} appears more than once")]
    DuplicateColumn(ColumnId),

    #[error("Task {0} appears more than once")]
    DuplicateTask(TaskId),
}

/// A single work item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Assigned user, if any. The backend sends an empty string for "nobody".
    #[serde(
        rename = "userId",
        default,
        deserialize_with = "deserialize_assignee",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignee: Option<UserId>,

    /// Rank among the tasks of the owning column
    #[serde(rename = "order")]
    pub position: usize,
}

impl Task {
    /// Creates a task with an empty description and no assignee
    pub fn new(id: TaskId, title: impl Into<String>, position: usize) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            assignee: None,
            position,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }
}

fn deserialize_assignee<'de, D>(deserializer: D) -> Result<Option<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) if !s.trim().is_empty() => UserId::try_from(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// An ordered list of tasks within a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,

    pub title: String,

    /// Rank among the board's columns
    #[serde(rename = "order")]
    pub position: usize,

    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    /// Creates an empty column
    pub fn new(id: ColumnId, title: impl Into<String>, position: usize) -> Self {
        Self {
            id,
            title: title.into(),
            position,
            tasks: Vec::new(),
        }
    }

    /// Adds a task as-is (its position is not touched)
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Looks up a task of this column by ID
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Tasks sorted by position
    pub fn tasks_in_order(&self) -> Vec<&Task> {
        let mut tasks: Vec<_> = self.tasks.iter().collect();
        tasks.sort_by_key(|t| t.position);
        tasks
    }

    /// Position a task appended to this column must take
    pub fn next_task_order(&self) -> usize {
        self.tasks.len()
    }
}

/// The layout snapshot: a board with all of its columns and tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Board {
    /// Creates an empty board
    pub fn new(id: BoardId) -> Self {
        Self {
            id,
            title: None,
            columns: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Looks up a column by ID
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// Columns sorted by position
    pub fn columns_in_order(&self) -> Vec<&Column> {
        let mut columns: Vec<_> = self.columns.iter().collect();
        columns.sort_by_key(|c| c.position);
        columns
    }

    /// Total number of tasks across all columns
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// Position a column appended to this board must take
    pub fn next_column_order(&self) -> usize {
        self.columns.len()
    }

    /// Checks that every sibling set is ranked `0..N-1` and that no ID repeats
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut column_ids = HashSet::new();
        let mut task_ids = HashSet::new();

        for column in &self.columns {
            if !column_ids.insert(&column.id) {
                return Err(LayoutError::DuplicateColumn(column.id.clone()));
            }
            for task in &column.tasks {
                if !task_ids.insert(&task.id) {
                    return Err(LayoutError::DuplicateTask(task.id.clone()));
                }
            }
        }

        check_contiguous(Scope::Columns, self.columns.iter().map(|c| c.position))?;
        for column in &self.columns {
            check_contiguous(
                Scope::Tasks(column.id.clone()),
                column.tasks.iter().map(|t| t.position),
            )?;
        }

        Ok(())
    }

    /// Returns true if [`Board::validate`] passes
    pub fn is_consistent(&self) -> bool {
        self.validate().is_ok()
    }

    /// Re-ranks every sibling set to `0..N-1`
    ///
    /// Relative order is kept; equal positions are broken by the order the
    /// items appear in.
    pub fn normalized(&self) -> Board {
        let mut board = self.clone();
        rerank(&mut board.columns);
        for column in &mut board.columns {
            rerank(&mut column.tasks);
        }
        board
    }
}

fn check_contiguous(
    scope: Scope,
    positions: impl Iterator<Item = usize>,
) -> Result<(), LayoutError> {
    let mut positions: Vec<usize> = positions.collect();
    positions.sort_unstable();

    for (expected, &position) in positions.iter().enumerate() {
        if expected > 0 && positions[expected - 1] == position {
            return Err(LayoutError::DuplicatePosition { scope, position });
        }
        if position != expected {
            return Err(LayoutError::PositionGap {
                scope,
                missing: expected,
            });
        }
    }

    Ok(())
}

fn rerank<T: Ordered>(siblings: &mut [T]) {
    let mut ranks: Vec<usize> = (0..siblings.len()).collect();
    ranks.sort_by_key(|&i| (siblings[i].order(), i));

    for (rank, index) in ranks.into_iter().enumerate() {
        siblings[index].set_order(rank);
    }
}

impl Ordered for Column {
    fn order(&self) -> usize {
        self.position
    }

    fn set_order(&mut self, order: usize) {
        self.position = order;
    }
}

impl Ordered for Task {
    fn order(&self) -> usize {
        self.position
    }

    fn set_order(&mut self, order: usize) {
        self.position = order;
    }
}
