//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. Destructive operations must
//! either be confirmed, forced with `--force`, or fail with a clear error
//! in non-interactive mode.

use std::io::{self, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("aborted by user")]
    Declined,

    #[error("confirmation required; re-run with --force or in an interactive terminal")]
    NotInteractive,

    #[error("prompt I/O failed: {0}")]
    Io(String),
}

/// Confirm a destructive action.
///
/// Returns `Ok(())` when `force` is set or the user answers yes.
/// In non-interactive mode without `force` this fails immediately so
/// scripts cannot hang on a hidden prompt.
pub fn confirm(message: &str, interactive: bool, force: bool) -> Result<(), PromptError> {
    if force {
        return Ok(());
    }
    if !interactive {
        return Err(PromptError::NotInteractive);
    }

    print!("{} [y/N] ", message);
    io::stdout()
        .flush()
        .map_err(|e| PromptError::Io(e.to_string()))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| PromptError::Io(e.to_string()))?;

    if input.trim().eq_ignore_ascii_case("y") {
        Ok(())
    } else {
        Err(PromptError::Declined)
    }
}
