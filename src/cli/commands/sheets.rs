//! sheets commands

use anyhow::Result;
use serde_json::Value;

use crate::cli::args::{SheetsCommand, SheetsSpreadsheets, SheetsValues};
use crate::engine::exit::UsageError;
use crate::engine::{Context, DryRun, ExitCode};
use crate::workspace::Session;

use super::{cell, finish_record};

pub async fn run(ctx: &Context, command: SheetsCommand) -> Result<ExitCode> {
    match command {
        SheetsCommand::Spreadsheets { command: SheetsSpreadsheets::Get { id } } => {
            get_spreadsheet(ctx, &id).await
        }
        SheetsCommand::Values { command } => match command {
            SheetsValues::Get { id, range } => get_values(ctx, &id, &range).await,
            SheetsValues::Update { id, range, values } => {
                write_values(ctx, &id, &range, &values, WriteMode::Update).await
            }
            SheetsValues::Append { id, range, values } => {
                write_values(ctx, &id, &range, &values, WriteMode::Append).await
            }
        },
    }
}

#[derive(Clone, Copy)]
enum WriteMode {
    Update,
    Append,
}

async fn get_spreadsheet(ctx: &Context, id: &str) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let spreadsheet = session.sheets().get_spreadsheet(id).await?;

    let title = spreadsheet
        .get("properties")
        .map(|p| cell(p, "title"))
        .unwrap_or_default();
    let sheets = spreadsheet
        .get("sheets")
        .and_then(Value::as_array)
        .map(|s| {
            s.iter()
                .filter_map(|sheet| sheet.get("properties"))
                .map(|p| cell(p, "title"))
                .collect::<Vec<_>>()
                .join(",")
        })
        .unwrap_or_default();

    let pairs = vec![
        ("id".to_string(), cell(&spreadsheet, "spreadsheetId")),
        ("title".to_string(), title),
        ("sheets".to_string(), sheets),
    ];
    Ok(finish_record(ctx, pairs, &spreadsheet))
}

async fn get_values(ctx: &Context, id: &str, range: &str) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let response = session.sheets().get_values(id, range).await?;

    let items: Vec<Value> = response
        .get("values")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let rows = items
        .iter()
        .map(|row| {
            row.as_array()
                .map(|cells| {
                    cells
                        .iter()
                        .map(crate::ui::output::scalar_to_string)
                        .collect()
                })
                .unwrap_or_default()
        })
        .collect();

    // Ranges are ragged; header alignment is meaningless here.
    Ok(super::finish_listing_headerless(ctx, rows, items, &response))
}

async fn write_values(
    ctx: &Context,
    id: &str,
    range: &str,
    raw_values: &str,
    mode: WriteMode,
) -> Result<ExitCode> {
    let values: Value = serde_json::from_str(raw_values)
        .map_err(|e| UsageError(format!("--values is not valid JSON: {}", e)))?;
    if !values.is_array() {
        return Err(UsageError("--values must be a JSON array of row arrays".into()).into());
    }
    let row_count = values.as_array().map(Vec::len).unwrap_or(0);

    let action = match mode {
        WriteMode::Update => "sheets.values.update",
        WriteMode::Append => "sheets.values.append",
    };
    if ctx.dry_run {
        DryRun::new(action)
            .param("id", id)
            .param("range", range)
            .param("rows", row_count)
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }

    let session = Session::connect(ctx)?;
    let sheets = session.sheets();
    let response = match mode {
        WriteMode::Update => sheets.update_values(id, range, &values).await?,
        WriteMode::Append => sheets.append_values(id, range, &values).await?,
    };

    let updated = response
        .get("updatedCells")
        .or_else(|| response.get("updates").and_then(|u| u.get("updatedCells")))
        .and_then(Value::as_u64)
        .unwrap_or(0);
    let pairs = vec![
        ("range".to_string(), range.to_string()),
        ("updated_cells".to_string(), updated.to_string()),
    ];
    Ok(finish_record(ctx, pairs, &response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::exit::ExitCode;

    fn dry_ctx() -> Context {
        Context {
            dry_run: true,
            ..Context::default()
        }
    }

    #[test]
    fn update_rejects_malformed_values() {
        let err = tokio_test::block_on(write_values(
            &dry_ctx(),
            "s1",
            "Sheet1!A1",
            "not json",
            WriteMode::Update,
        ))
        .unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn update_rejects_non_array_values() {
        let err = tokio_test::block_on(write_values(
            &dry_ctx(),
            "s1",
            "Sheet1!A1",
            r#"{"a": 1}"#,
            WriteMode::Update,
        ))
        .unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn dry_run_short_circuits_before_session() {
        // No credentials are configured in tests; reaching the session
        // would fail with auth_required.
        let code = tokio_test::block_on(write_values(
            &dry_ctx(),
            "s1",
            "Sheet1!A1:B1",
            r#"[["a","b"]]"#,
            WriteMode::Append,
        ))
        .unwrap();
        assert_eq!(code, ExitCode::Ok);
    }
}
