//! slides commands

use anyhow::Result;
use serde_json::Value;

use crate::cli::args::{SlidesCommand, SlidesPages, SlidesPresentations};
use crate::engine::{Context, ExitCode};
use crate::workspace::Session;

use super::{cell, finish_listing, finish_record};

pub async fn run(ctx: &Context, command: SlidesCommand) -> Result<ExitCode> {
    match command {
        SlidesCommand::Presentations { command: SlidesPresentations::Get { id } } => {
            get(ctx, &id).await
        }
        SlidesCommand::Pages { command: SlidesPages::List { id } } => pages(ctx, &id).await,
    }
}

async fn get(ctx: &Context, id: &str) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let presentation = session.slides().get_presentation(id).await?;

    let slide_count = presentation
        .get("slides")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    let pairs = vec![
        ("id".to_string(), cell(&presentation, "presentationId")),
        ("title".to_string(), cell(&presentation, "title")),
        ("slides".to_string(), slide_count.to_string()),
        ("revision".to_string(), cell(&presentation, "revisionId")),
    ];
    Ok(finish_record(ctx, pairs, &presentation))
}

async fn pages(ctx: &Context, id: &str) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let items = session.slides().pages(id).await?;

    let rows = items
        .iter()
        .enumerate()
        .map(|(i, page)| vec![(i + 1).to_string(), cell(page, "objectId")])
        .collect();
    Ok(finish_listing(ctx, &["#", "OBJECT"], rows, items, None))
}
