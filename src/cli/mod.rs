//! # Command-Line Interface
//!
//! User-facing commands for the `kanban` binary.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project setup and inspection | `init`, `show`, `check` |
//! | Column | Column creation and listing | `column add`, `column list` |
//! | Task | Task creation | `task add` |
//! | Drag | Replay a drag gesture and save it | `drag column`, `drag task` |
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Logging
//!
//! Diagnostics go to stderr through `tracing`. `--verbose` (or `-v`) turns
//! on debug output; `RUST_LOG` overrides both the flag and the config:
//! ```bash
//! RUST_LOG=kanban_order=trace kanban drag column c-1 --over c-2
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod board;
mod column;
mod drag;
mod logging;
mod output;
mod task;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
