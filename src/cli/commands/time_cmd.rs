//! time commands

use anyhow::Result;
use chrono::{Local, NaiveDate, SecondsFormat, Utc};
use serde_json::json;

use crate::cli::args::TimeCommand;
use crate::core::tz::offset_to_zone;
use crate::engine::exit::UsageError;
use crate::engine::{Context, ExitCode};

use super::finish_record;

pub fn run(ctx: &Context, command: TimeCommand) -> Result<ExitCode> {
    match command {
        TimeCommand::Now => now(ctx),
        TimeCommand::Zone { offset, date } => zone(ctx, &offset, date),
    }
}

fn now(ctx: &Context) -> Result<ExitCode> {
    let local = Local::now();
    let utc = Utc::now();

    let local_str = local.to_rfc3339_opts(SecondsFormat::Secs, true);
    let utc_str = utc.to_rfc3339_opts(SecondsFormat::Secs, true);
    let pairs = vec![
        ("local".to_string(), local_str.clone()),
        ("utc".to_string(), utc_str.clone()),
        ("unix".to_string(), utc.timestamp().to_string()),
    ];
    Ok(finish_record(
        ctx,
        pairs,
        &json!({ "local": local_str, "utc": utc_str, "unix": utc.timestamp() }),
    ))
}

fn zone(ctx: &Context, offset: &str, date: Option<String>) -> Result<ExitCode> {
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| UsageError(format!("invalid --date '{}', expected YYYY-MM-DD", raw)))?,
        None => Utc::now().date_naive(),
    };

    let zone = offset_to_zone(offset, date);
    let pairs = vec![
        ("offset".to_string(), offset.to_string()),
        ("zone".to_string(), zone.clone()),
    ];
    Ok(finish_record(
        ctx,
        pairs,
        &json!({ "offset": offset, "zone": zone }),
    ))
}
