//! kanban - drag-reorder columns and tasks on a local board

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = kanban_order::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
