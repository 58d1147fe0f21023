//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::storage::{Config, Project};

use super::output::{Output, OutputFormat};
use super::{board, column, drag, logging, task};

#[derive(Parser)]
#[command(name = "kanban")]
#[command(author, version, about = "Drag-reorder columns and tasks on a local kanban board")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new board
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Show the board with columns and tasks in order
    Show,

    /// Check that stored positions are contiguous and unique
    Check,

    /// Manage columns
    #[command(subcommand)]
    Column(column::ColumnCommands),

    /// Manage tasks
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Replay a drag gesture and save the resulting order
    #[command(subcommand)]
    Drag(drag::DragCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format);

    let config = load_config();
    logging::init_logging(cli.verbose, config.log_level());
    tracing::debug!(project_root = ?config.project_root, "kanban starting");

    match cli.command {
        Commands::Init { path } => {
            tracing::debug!(%path, "initializing project");
            let project = Project::init(&path)?;
            let board = project.load_board()?;

            if output.is_json() {
                output.data(&serde_json::json!({
                    "root": project.root().display().to_string(),
                    "board": board.id,
                }));
            } else {
                output.success(&format!(
                    "Initialized kanban board at {}",
                    project.root().display()
                ));
            }
        }

        Commands::Show => board::show(&output)?,
        Commands::Check => board::check(&output)?,
        Commands::Column(cmd) => column::run(cmd, &output)?,
        Commands::Task(cmd) => task::run(cmd, &output)?,
        Commands::Drag(cmd) => drag::run(cmd, &output)?,
    }

    tracing::debug!("command completed");
    Ok(())
}

/// Config used for logging before any command runs
///
/// A broken config file is reported by the command that opens the project,
/// so here it only falls back to defaults.
fn load_config() -> Config {
    let loaded = match Config::find_project_root() {
        Some(root) => Config::for_project(&root),
        None => Config::global_only(),
    };

    loaded.unwrap_or_default()
}
