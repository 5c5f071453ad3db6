//! cli
//!
//! Command-line interface layer for gogcli.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve the execution [`Context`] from flags and environment
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, resolves the
//! request-scoped context once, and dispatches to [`commands`]. All remote
//! calls flow through the workspace session opened by the handlers.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::io::IsTerminal;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::core::types::Account;
use crate::engine::exit::{ConfigError, UsageError};
use crate::engine::{Context, ExitCode, Gate};
use crate::ui::output::OutputMode;

/// Environment variable overriding the account name.
pub const ACCOUNT_ENV: &str = "GOG_ACCOUNT";

/// Environment variable selecting the credential store backend.
///
/// Only the file backend exists; the variable is honored so scripts that
/// set it fail loudly instead of silently using the wrong store.
pub const KEYRING_ENV: &str = "GOG_KEYRING_BACKEND";

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let ctx = resolve_context(&cli)?;
    commands::dispatch(cli.command, &ctx).await
}

/// Build the execution context from parsed flags and the environment.
fn resolve_context(cli: &Cli) -> Result<Context> {
    if let Ok(backend) = std::env::var(KEYRING_ENV) {
        if !backend.is_empty() && backend != "file" {
            return Err(ConfigError(format!(
                "unsupported keyring backend '{}'; only 'file' is available",
                backend
            ))
            .into());
        }
    }

    let account = match cli
        .account
        .clone()
        .or_else(|| std::env::var(ACCOUNT_ENV).ok().filter(|v| !v.is_empty()))
    {
        Some(name) => Account::new(name).map_err(|e| UsageError(e.to_string()))?,
        None => Account::default_account(),
    };

    let allow = merge_list(cli.enable_commands.as_deref(), "GOG_ENABLE_COMMANDS");
    let deny = merge_list(cli.disable_commands.as_deref(), "GOG_DISABLE_COMMANDS");

    Ok(Context {
        account,
        output: OutputMode::resolve(cli.json, cli.plain),
        dry_run: cli.dry_run,
        force: cli.force,
        interactive: !cli.no_interactive && !cli.quiet && std::io::stdin().is_terminal(),
        quiet: cli.quiet,
        debug: cli.debug,
        gate: Gate::new(&allow, &deny),
        config_root: cli.config_root.clone(),
    })
}

/// Join a flag-provided list with the matching environment variable.
fn merge_list(flag: Option<&str>, env: &str) -> String {
    let from_env = std::env::var(env).unwrap_or_default();
    match flag {
        Some(value) if !from_env.is_empty() => format!("{},{}", value, from_env),
        Some(value) => value.to_string(),
        None => from_env,
    }
}

/// Initialize tracing to stderr; `--debug` raises the filter.
fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
