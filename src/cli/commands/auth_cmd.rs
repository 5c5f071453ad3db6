//! auth commands
//!
//! Local credential configuration: the per-account service-account key
//! file and the tracking pixel base URL. Nothing here talks to Google.

use anyhow::Result;
use serde_json::json;

use crate::cli::args::{AuthCommand, AuthKey, AuthTracking};
use crate::engine::{Context, DryRun, ExitCode};
use crate::store::tracking::TrackingConfig;
use crate::store::{KeyStore, TrackingStore};
use crate::ui::prompts;

use super::finish_record;

pub fn run(ctx: &Context, command: AuthCommand) -> Result<ExitCode> {
    match command {
        AuthCommand::Key { command } => match command {
            AuthKey::Set { path, subject } => key_set(ctx, path, subject),
            AuthKey::Status => key_status(ctx),
            AuthKey::Unset => key_unset(ctx),
        },
        AuthCommand::Tracking { command } => match command {
            AuthTracking::Set { base_url } => tracking_set(ctx, base_url),
            AuthTracking::Status => tracking_status(ctx),
            AuthTracking::Unset => tracking_unset(ctx),
        },
    }
}

fn key_set(ctx: &Context, path: std::path::PathBuf, subject: Option<String>) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("auth.key.set")
            .param("path", path.display().to_string())
            .param_opt("subject", subject.as_deref())
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }

    let status = KeyStore::open(ctx)?.install(&path, subject)?;
    let pairs = vec![
        ("account".to_string(), ctx.account.to_string()),
        (
            "client_email".to_string(),
            status.client_email.clone().unwrap_or_default(),
        ),
        (
            "subject".to_string(),
            status.subject.clone().unwrap_or_default(),
        ),
    ];
    Ok(finish_record(ctx, pairs, &serde_json::to_value(&status)?))
}

fn key_status(ctx: &Context) -> Result<ExitCode> {
    let status = KeyStore::open(ctx)?.status()?;
    let pairs = vec![
        ("account".to_string(), ctx.account.to_string()),
        ("present".to_string(), status.present.to_string()),
        (
            "client_email".to_string(),
            status.client_email.clone().unwrap_or_default(),
        ),
        (
            "subject".to_string(),
            status.subject.clone().unwrap_or_default(),
        ),
    ];
    Ok(finish_record(ctx, pairs, &serde_json::to_value(&status)?))
}

fn key_unset(ctx: &Context) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("auth.key.unset")
            .param("account", ctx.account.as_str())
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }
    prompts::confirm(
        &format!("Remove the service-account key for '{}'?", ctx.account),
        ctx.interactive,
        ctx.force,
    )?;

    let existed = KeyStore::open(ctx)?.unset()?;
    let status = if existed { "removed" } else { "absent" };
    let pairs = vec![
        ("account".to_string(), ctx.account.to_string()),
        ("status".to_string(), status.to_string()),
    ];
    Ok(finish_record(
        ctx,
        pairs,
        &json!({ "account": ctx.account.as_str(), "status": status }),
    ))
}

fn tracking_set(ctx: &Context, base_url: String) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("auth.tracking.set")
            .param("base_url", base_url.as_str())
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }

    TrackingStore::open(ctx)?.save(&TrackingConfig {
        base_url: base_url.clone(),
    })?;
    let pairs = vec![
        ("account".to_string(), ctx.account.to_string()),
        ("base_url".to_string(), base_url.clone()),
    ];
    Ok(finish_record(
        ctx,
        pairs,
        &json!({ "account": ctx.account.as_str(), "base_url": base_url }),
    ))
}

fn tracking_status(ctx: &Context) -> Result<ExitCode> {
    let config = TrackingStore::open(ctx)?.load()?;
    let base_url = config.map(|c| c.base_url).unwrap_or_default();
    let configured = !base_url.is_empty();
    let pairs = vec![
        ("account".to_string(), ctx.account.to_string()),
        ("configured".to_string(), configured.to_string()),
        ("base_url".to_string(), base_url.clone()),
    ];
    Ok(finish_record(
        ctx,
        pairs,
        &json!({
            "account": ctx.account.as_str(),
            "configured": configured,
            "base_url": base_url,
        }),
    ))
}

fn tracking_unset(ctx: &Context) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("auth.tracking.unset")
            .param("account", ctx.account.as_str())
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }
    prompts::confirm(
        &format!("Remove the tracking configuration for '{}'?", ctx.account),
        ctx.interactive,
        ctx.force,
    )?;

    let existed = TrackingStore::open(ctx)?.clear()?;
    let status = if existed { "removed" } else { "absent" };
    let pairs = vec![
        ("account".to_string(), ctx.account.to_string()),
        ("status".to_string(), status.to_string()),
    ];
    Ok(finish_record(
        ctx,
        pairs,
        &json!({ "account": ctx.account.as_str(), "status": status }),
    ))
}
