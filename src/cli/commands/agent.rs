//! agent commands
//!
//! Machine-readable metadata for scripts and agents driving gog.

use anyhow::Result;
use serde_json::json;

use crate::cli::args::{AgentCommand, COMMAND_CATALOG};
use crate::core::types::CommandPath;
use crate::engine::{Context, ExitCode};
use crate::ui::output;

pub fn run(ctx: &Context, command: AgentCommand) -> Result<ExitCode> {
    match command {
        AgentCommand::ExitCodes => exit_codes(),
        AgentCommand::Commands => commands(ctx),
    }
}

/// Print the exit-code table.
///
/// Always compact JSON, whatever the output mode, so the bytes are stable
/// for scripts that parse them.
fn exit_codes() -> Result<ExitCode> {
    output::emit_json(&json!({ "exit_codes": ExitCode::table() }));
    Ok(ExitCode::Ok)
}

/// List every command path and whether the active gate permits it.
fn commands(ctx: &Context) -> Result<ExitCode> {
    let entries: Vec<_> = COMMAND_CATALOG
        .iter()
        .map(|path| {
            let enabled = ctx.gate.permits(&CommandPath::new(path));
            (path, enabled)
        })
        .collect();

    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|(path, enabled)| vec![path.to_string(), enabled.to_string()])
        .collect();
    let value = json!({
        "commands": entries
            .iter()
            .map(|(path, enabled)| json!({ "path": path, "enabled": enabled }))
            .collect::<Vec<_>>(),
    });

    output::emit_table(ctx.output, &["PATH", "ENABLED"], &rows, &value);
    Ok(ExitCode::Ok)
}
