//! # Storage Layer
//!
//! File-backed stand-in for the backend the engine talks to.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Board layout | JSON (backend payload shape) | `.kanban/board.json` |
//! | Config | TOML | `.kanban/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`BoardStore`] holds an `fs2` lock on `.kanban/board.lock` for every
//!   read-modify-write
//! - All writes are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for accessing a board directory
//! - [`BoardStore`] - Reads/writes the board; implements [`crate::engine::Committer`]
//! - [`Config`] - Project and global configuration

mod board_file;
mod config;
mod project;

pub use board_file::BoardStore;
pub use config::{
    BoardSettings, Config, ConfigError, GlobalConfig, LogSettings, ProjectConfig, PROJECT_DIR,
};
pub use project::{Project, ProjectError};
