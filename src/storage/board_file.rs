//! JSON storage for the board layout
//!
//! The board is stored in `.kanban/board.json` in the same shape the
//! backend payload uses. Read-modify-write cycles hold an exclusive lock on
//! `.kanban/board.lock`; writes go through a temp file and a rename.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use fs2::FileExt;

use crate::domain::{Board, Column, ColumnId, Task, TaskId};
use crate::engine::{CommitError, Committer, CreateColumnRequest, CreateTaskRequest, LayoutOrder};

use super::config::PROJECT_DIR;

/// File-backed collaborator for a single board
#[derive(Debug, Clone)]
pub struct BoardStore {
    path: PathBuf,
}

impl BoardStore {
    /// Creates a store for the board file at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(PROJECT_DIR).join("board.json"))
    }

    /// Returns the path to the board file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    /// Reads the stored board
    pub fn read(&self) -> Result<Board> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open board file: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on board file")?;

        serde_json::from_reader(BufReader::new(&file))
            .with_context(|| format!("Failed to parse board file: {}", self.path.display()))
    }

    /// Writes the board (full rewrite)
    pub fn write(&self, board: &Board) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, board).context("Failed to serialize board")?;
            writeln!(writer).context("Failed to write board")?;
            writer.flush().context("Failed to flush board file")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        tracing::debug!(path = %self.path.display(), "board written");
        Ok(())
    }

    /// Reads, modifies and writes the board while holding the lock
    pub fn update<T>(&self, change: impl FnOnce(&mut Board) -> Result<T>) -> Result<T> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let lock = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path())
            .context("Failed to open board lock file")?;
        lock.lock_exclusive()
            .context("Failed to acquire write lock on board")?;

        let mut board = self.read()?;
        let result = change(&mut board)?;
        self.write(&board)?;

        // Lock is released when the lock file is dropped
        Ok(result)
    }

    /// Appends a column as requested and returns it
    ///
    /// The append position is re-read under the lock. If another process
    /// added a column since the request was built, the column takes the
    /// next free slot instead of `request.order`.
    pub fn create_column(&self, request: &CreateColumnRequest) -> Result<Column> {
        let id = ColumnId::generate(&request.title, Utc::now());

        let column = self.update(|board| {
            let order = board.next_column_order();
            if order != request.order {
                tracing::debug!(
                    requested = request.order,
                    order,
                    "column order taken, appending at end"
                );
            }
            let column = Column::new(id, request.title.clone(), order);
            board.columns.push(column.clone());
            Ok(column)
        })?;

        tracing::info!(column = %column.id, order = column.position, "column created");
        Ok(column)
    }

    /// Appends a task as requested and returns it
    ///
    /// Like [`BoardStore::create_column`], the position is the column's
    /// task count at write time.
    pub fn create_task(&self, request: &CreateTaskRequest) -> Result<Task> {
        let id = TaskId::generate(&request.title, Utc::now());

        let task = self.update(|board| {
            let column = board
                .columns
                .iter_mut()
                .find(|c| c.id == request.column)
                .ok_or_else(|| anyhow::anyhow!("Column not found: {}", request.column))?;

            let order = column.next_task_order();
            if order != request.order {
                tracing::debug!(
                    requested = request.order,
                    order,
                    "task order taken, appending at end"
                );
            }
            let mut task = Task::new(id, request.title.clone(), order)
                .with_description(request.description.clone());
            task.assignee = request.user_id.clone();
            column.tasks.push(task.clone());
            Ok(task)
        })?;

        tracing::info!(
            task = %task.id,
            column = %request.column,
            order = task.position,
            "task created"
        );
        Ok(task)
    }
}

impl Committer for BoardStore {
    fn commit(&mut self, layout: &LayoutOrder) -> Result<(), CommitError> {
        let outcome = self.update(|board| {
            if board.id != layout.board_id {
                return Ok(Err(CommitError::Rejected(format!(
                    "layout is for board {}, file holds board {}",
                    layout.board_id, board.id
                ))));
            }
            apply_layout(board, layout);
            Ok(Ok(()))
        });

        match outcome {
            Ok(result) => result,
            Err(err) => Err(CommitError::Other(err)),
        }
    }
}

/// Applies committed positions to the stored board
///
/// Tasks follow the layout into their new columns. Columns and tasks the
/// layout does not mention (created since the layout was loaded) keep their
/// place after the mentioned ones.
fn apply_layout(board: &mut Board, layout: &LayoutOrder) {
    let mut pool: HashMap<TaskId, Task> = HashMap::new();
    let mut homes: Vec<(ColumnId, TaskId)> = Vec::new();

    for column in &mut board.columns {
        for task in column.tasks.drain(..) {
            homes.push((column.id.clone(), task.id.clone()));
            pool.insert(task.id.clone(), task);
        }
    }

    let orders: HashMap<&ColumnId, _> = layout.columns.iter().map(|c| (&c.id, c)).collect();
    let mentioned = orders.len();

    for column in &mut board.columns {
        match orders.get(&column.id) {
            Some(order) => {
                column.position = order.order;
                for placed in &order.tasks {
                    if let Some(mut task) = pool.remove(&placed.id) {
                        task.position = placed.order;
                        column.tasks.push(task);
                    }
                }
            }
            None => column.position = mentioned + column.position,
        }
    }

    for (home, id) in homes {
        if let Some(mut task) = pool.remove(&id) {
            if let Some(column) = board.columns.iter_mut().find(|c| c.id == home) {
                task.position = column.tasks.len();
                column.tasks.push(task);
            }
        }
    }

    *board = board.normalized();
}
