//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Every handler composes the same envelope, in order: the gate has already
//! admitted the command path by the time a handler runs; the handler then
//! checks dry-run (before any credential access), confirms destructive
//! actions, opens a session, performs one sequential chain of API calls,
//! and formats the result in the resolved output mode.
//!
//! Handlers return an [`ExitCode`]; errors propagate as `anyhow::Error` and
//! are mapped to exit codes in `main`.

mod agent;
mod auth_cmd;
mod calendar;
mod completion;
mod drive;
mod gmail;
mod groups;
mod sheets;
mod slides;
mod tasks;
mod time_cmd;

use anyhow::Result;
use serde_json::{json, Value};

use crate::cli::args::Command;
use crate::engine::{Context, ExitCode};
use crate::ui::output;
use crate::workspace::ApiError;

/// Dispatch a command to its handler.
///
/// The gate check happens here, before any handler code runs, so a denied
/// command performs no work at all.
pub async fn dispatch(command: Command, ctx: &Context) -> Result<ExitCode> {
    ctx.gate.check(&command.path())?;

    match command {
        Command::Gmail { command } => gmail::run(ctx, command).await,
        Command::Calendar { command } => calendar::run(ctx, command).await,
        Command::Drive { command } => drive::run(ctx, command).await,
        Command::Sheets { command } => sheets::run(ctx, command).await,
        Command::Slides { command } => slides::run(ctx, command).await,
        Command::Tasks { command } => tasks::run(ctx, command).await,
        Command::Groups { command } => groups::run(ctx, command).await,
        Command::Auth { command } => auth_cmd::run(ctx, command),
        Command::Time { command } => time_cmd::run(ctx, command),
        Command::Agent { command } => agent::run(ctx, command),
        Command::Completion { shell } => completion::run(shell),
    }
}

/// Render a listing and pick the exit code.
///
/// Empty listings exit with `empty_results` so scripts can branch without
/// parsing output. In human mode a continuation token is surfaced as a
/// trailing hint line.
pub(crate) fn finish_listing(
    ctx: &Context,
    headers: &[&str],
    rows: Vec<Vec<String>>,
    items: Vec<Value>,
    next: Option<String>,
) -> ExitCode {
    let empty = items.is_empty();
    let value = json!({ "items": items, "next_page": next });
    output::emit_table(ctx.output, headers, &rows, &value);
    if let (output::OutputMode::Human, Some(token)) = (ctx.output, &next) {
        output::print(format!("next page: --page {}", token), ctx.quiet);
    }
    if empty {
        ExitCode::EmptyResults
    } else {
        ExitCode::Ok
    }
}

/// Render a listing with no header row (ragged data such as sheet ranges).
///
/// JSON mode emits the untransformed response value.
pub(crate) fn finish_listing_headerless(
    ctx: &Context,
    rows: Vec<Vec<String>>,
    items: Vec<Value>,
    value: &Value,
) -> ExitCode {
    match ctx.output {
        output::OutputMode::Json => output::emit_json(value),
        _ => {
            for row in &rows {
                println!("{}", row.join("\t"));
            }
        }
    }
    if items.is_empty() {
        ExitCode::EmptyResults
    } else {
        ExitCode::Ok
    }
}

/// Render a single record.
pub(crate) fn finish_record(ctx: &Context, pairs: Vec<(String, String)>, value: &Value) -> ExitCode {
    output::emit_record(ctx.output, &pairs, value);
    ExitCode::Ok
}

/// Treat a remote delete as idempotent.
///
/// A missing resource reports a successful `not_found` record with its own
/// exit code rather than a hard error, so retried scripts converge.
pub(crate) fn finish_delete(
    ctx: &Context,
    id: &str,
    result: Result<(), ApiError>,
) -> Result<ExitCode> {
    match result {
        Ok(()) => {
            let value = json!({ "id": id, "status": "deleted" });
            let pairs = vec![
                ("id".to_string(), id.to_string()),
                ("status".to_string(), "deleted".to_string()),
            ];
            output::emit_record(ctx.output, &pairs, &value);
            Ok(ExitCode::Ok)
        }
        Err(ApiError::NotFound(_)) => {
            let value = json!({ "id": id, "status": "not_found" });
            let pairs = vec![
                ("id".to_string(), id.to_string()),
                ("status".to_string(), "not_found".to_string()),
            ];
            output::emit_record(ctx.output, &pairs, &value);
            Ok(ExitCode::NotFound)
        }
        Err(err) => Err(err.into()),
    }
}

/// Shorthand for a string cell pulled off a JSON object.
pub(crate) fn cell(value: &Value, key: &str) -> String {
    crate::workspace::common::str_field(value, key)
}
