//! Project management
//!
//! Handles project initialization and provides access to the board store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use thiserror::Error;

use crate::domain::{Board, BoardId};

use super::config::PROJECT_DIR;
use super::{BoardStore, Config};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a kanban project. Run 'kanban init' first.")]
    NotInProject,

    #[error("Stored board is inconsistent: {0}. Run 'kanban check' for details.")]
    Inconsistent(crate::domain::LayoutError),
}

/// A directory holding a `.kanban/` board
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(PROJECT_DIR).is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    ///
    /// An existing board is left alone, so running it twice is harmless.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let kanban_dir = root.join(PROJECT_DIR);

        fs::create_dir_all(&kanban_dir).with_context(|| {
            format!("Failed to create {} directory: {}", PROJECT_DIR, kanban_dir.display())
        })?;

        let config_path = kanban_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# Kanban board configuration

[board]
# Re-rank a stored board whose positions have gaps or duplicates
normalize_on_load = true

[log]
# Log filter used when RUST_LOG is not set (error, warn, info, debug, trace)
level = "warn"
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let store = BoardStore::for_project(&root);
        if !store.path().exists() {
            let title = root
                .canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .unwrap_or_else(|| "board".to_string());
            let board = Board::new(BoardId::generate(&title, Utc::now())).with_title(title);
            store.write(&board)?;
        }

        Self::open(root)
    }

    /// Returns the project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `.kanban` directory
    pub fn kanban_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Returns the project configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the board store
    pub fn board_store(&self) -> BoardStore {
        BoardStore::for_project(&self.root)
    }

    /// Reads the board
    ///
    /// A board whose positions have gaps or duplicates is re-ranked when
    /// `normalize_on_load` is set and refused otherwise. The file itself is
    /// left alone until the next write.
    pub fn load_board(&self) -> Result<Board> {
        let board = self.board_store().read()?;

        match board.validate() {
            Ok(()) => Ok(board),
            Err(problem) if self.config.project.board.normalize_on_load => {
                tracing::warn!(
                    %problem,
                    "stored board is inconsistent, re-ranking; run 'kanban check' for details"
                );
                Ok(board.normalized())
            }
            Err(problem) => Err(ProjectError::Inconsistent(problem).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Column, ColumnId};
    use tempfile::TempDir;

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert!(project.kanban_dir().is_dir());
        assert!(project.kanban_dir().join("config.toml").is_file());
        assert!(project.board_store().path().is_file());

        let board = project.load_board().unwrap();
        assert!(board.columns.is_empty());
        assert!(board.id.as_str().starts_with("b-"));
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let first = Project::init(dir.path()).unwrap().load_board().unwrap();
        let second = Project::init(dir.path()).unwrap().load_board().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn open_without_project_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Project::open(dir.path()).is_err());
    }

    #[test]
    fn strict_load_refuses_inconsistent_board() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        let id: ColumnId = "c1".parse().unwrap();
        project
            .board_store()
            .update(|board| {
                board.columns.push(Column::new(id, "Gap", 4));
                Ok(())
            })
            .unwrap();

        // default config re-ranks on load; the file keeps the gap
        let loaded = project.load_board().unwrap();
        assert!(loaded.is_consistent());
        assert_eq!(loaded.columns[0].position, 0);
        assert!(!project.board_store().read().unwrap().is_consistent());

        let mut config = project.config().clone();
        config.project.board.normalize_on_load = false;
        config.save_project().unwrap();

        let strict = Project::open(dir.path()).unwrap();
        let err = strict.load_board().unwrap_err();
        assert!(err.downcast_ref::<ProjectError>().is_some());
    }
}
