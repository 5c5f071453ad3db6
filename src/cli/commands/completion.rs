//! completion command

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::args::Cli;
use crate::engine::ExitCode;

/// Generate a completion script for the given shell on stdout.
pub fn run(shell: Shell) -> Result<ExitCode> {
    let mut command = Cli::command();
    generate(shell, &mut command, "gog", &mut std::io::stdout());
    Ok(ExitCode::Ok)
}
