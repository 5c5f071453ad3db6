//! drive commands

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use serde_json::{json, Value};

use crate::cli::args::{DriveCommand, DriveFiles, PageArgs};
use crate::core::bytesize::format_size;
use crate::engine::{collect_all, Context, DryRun, ExitCode};
use crate::ui::prompts;
use crate::workspace::Session;

use super::{cell, finish_delete, finish_listing, finish_record};

pub async fn run(ctx: &Context, command: DriveCommand) -> Result<ExitCode> {
    match command {
        DriveCommand::Files { command } => match command {
            DriveFiles::List { query, page } => list(ctx, query, page).await,
            DriveFiles::Get { id, open } => get(ctx, &id, open).await,
            DriveFiles::Download { id, out } => download(ctx, &id, out).await,
            DriveFiles::Delete { id } => delete(ctx, &id).await,
        },
        DriveCommand::About => about(ctx).await,
    }
}

async fn list(ctx: &Context, query: Option<String>, page: PageArgs) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let drive = session.drive();

    let query = query.as_deref();
    let (items, next) = if page.all {
        let items = collect_all(|token| {
            let drive = &drive;
            async move { drive.list_files(query, page.max, token.as_deref()).await }
        })
        .await?;
        (items, None)
    } else {
        let fetched = drive
            .list_files(query, page.max, page.page.as_deref())
            .await?;
        (fetched.items, fetched.next)
    };

    let rows = items
        .iter()
        .map(|f| {
            vec![
                cell(f, "id"),
                cell(f, "name"),
                file_size(f),
                cell(f, "modifiedTime"),
            ]
        })
        .collect();
    Ok(finish_listing(
        ctx,
        &["ID", "NAME", "SIZE", "MODIFIED"],
        rows,
        items,
        next,
    ))
}

async fn get(ctx: &Context, id: &str, open_in_browser: bool) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let file = session.drive().get_file(id).await?;

    if open_in_browser {
        if let Some(link) = file.get("webViewLink").and_then(Value::as_str) {
            open::that(link).with_context(|| format!("cannot open {}", link))?;
        }
    }

    let pairs = vec![
        ("id".to_string(), cell(&file, "id")),
        ("name".to_string(), cell(&file, "name")),
        ("type".to_string(), cell(&file, "mimeType")),
        ("size".to_string(), file_size(&file)),
        ("modified".to_string(), cell(&file, "modifiedTime")),
        ("link".to_string(), cell(&file, "webViewLink")),
    ];
    Ok(finish_record(ctx, pairs, &file))
}

async fn download(ctx: &Context, id: &str, out: Option<PathBuf>) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("drive.files.download")
            .param("id", id)
            .param_opt("out", out.as_ref().map(|p| p.display().to_string()))
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }

    let session = Session::connect(ctx)?;
    let drive = session.drive();

    // The remote name is the default output path, so metadata comes first.
    let out = match out {
        Some(path) => path,
        None => {
            let file = drive.get_file(id).await?;
            let name = cell(&file, "name");
            PathBuf::from(if name.is_empty() { id.to_string() } else { name })
        }
    };

    if out.exists() {
        let pairs = vec![
            ("path".to_string(), out.display().to_string()),
            ("status".to_string(), "exists".to_string()),
        ];
        let value = json!({ "path": out.display().to_string(), "status": "exists" });
        return Ok(finish_record(ctx, pairs, &value));
    }

    let bytes = drive.download(id).await?;
    fs::write(&out, &bytes).with_context(|| format!("cannot write {}", out.display()))?;

    let pairs = vec![
        ("path".to_string(), out.display().to_string()),
        ("size".to_string(), format_size(bytes.len() as u64)),
        ("status".to_string(), "downloaded".to_string()),
    ];
    let value = json!({
        "path": out.display().to_string(),
        "bytes": bytes.len(),
        "status": "downloaded",
    });
    Ok(finish_record(ctx, pairs, &value))
}

async fn delete(ctx: &Context, id: &str) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("drive.files.delete").param("id", id).emit(ctx);
        return Ok(ExitCode::Ok);
    }
    prompts::confirm(
        &format!("Permanently delete file {}?", id),
        ctx.interactive,
        ctx.force,
    )?;

    let session = Session::connect(ctx)?;
    finish_delete(ctx, id, session.drive().delete_file(id).await)
}

async fn about(ctx: &Context) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let info = session.drive().about().await?;

    let quota = info.get("storageQuota").cloned().unwrap_or(Value::Null);
    let pairs = vec![
        (
            "user".to_string(),
            info.get("user")
                .map(|u| cell(u, "emailAddress"))
                .unwrap_or_default(),
        ),
        ("usage".to_string(), quota_size(&quota, "usage")),
        ("limit".to_string(), quota_size(&quota, "limit")),
    ];
    Ok(finish_record(ctx, pairs, &info))
}

/// Drive reports sizes as decimal strings.
fn file_size(file: &Value) -> String {
    parse_size(file, "size")
}

fn quota_size(quota: &Value, key: &str) -> String {
    parse_size(quota, key)
}

fn parse_size(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<u64>().ok())
        .map(format_size)
        .unwrap_or_default()
}
