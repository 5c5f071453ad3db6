//! tasks commands

use anyhow::Result;

use crate::cli::args::{PageArgs, TasksCommand, TasksLists, TasksTasks};
use crate::engine::{collect_all, Context, DryRun, ExitCode};
use crate::ui::prompts;
use crate::workspace::Session;

use super::{cell, finish_delete, finish_listing, finish_record};

pub async fn run(ctx: &Context, command: TasksCommand) -> Result<ExitCode> {
    match command {
        TasksCommand::Lists { command: TasksLists::List { page } } => list_lists(ctx, page).await,
        TasksCommand::Tasks { command } => match command {
            TasksTasks::List { tasklist, completed, page } => {
                list_tasks(ctx, &tasklist, completed, page).await
            }
            TasksTasks::Insert { title, tasklist, notes, due } => {
                insert(ctx, &tasklist, &title, notes, due).await
            }
            TasksTasks::Complete { id, tasklist } => complete(ctx, &tasklist, &id).await,
            TasksTasks::Delete { id, tasklist } => delete(ctx, &tasklist, &id).await,
        },
    }
}

async fn list_lists(ctx: &Context, page: PageArgs) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let tasks = session.tasks();

    let (items, next) = if page.all {
        let items = collect_all(|token| {
            let tasks = &tasks;
            async move { tasks.list_tasklists(page.max, token.as_deref()).await }
        })
        .await?;
        (items, None)
    } else {
        let fetched = tasks.list_tasklists(page.max, page.page.as_deref()).await?;
        (fetched.items, fetched.next)
    };

    let rows = items
        .iter()
        .map(|l| vec![cell(l, "id"), cell(l, "title")])
        .collect();
    Ok(finish_listing(ctx, &["ID", "TITLE"], rows, items, next))
}

async fn list_tasks(
    ctx: &Context,
    tasklist: &str,
    completed: bool,
    page: PageArgs,
) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let tasks = session.tasks();

    let (items, next) = if page.all {
        let items = collect_all(|token| {
            let tasks = &tasks;
            async move {
                tasks
                    .list_tasks(tasklist, completed, page.max, token.as_deref())
                    .await
            }
        })
        .await?;
        (items, None)
    } else {
        let fetched = tasks
            .list_tasks(tasklist, completed, page.max, page.page.as_deref())
            .await?;
        (fetched.items, fetched.next)
    };

    let rows = items
        .iter()
        .map(|t| {
            vec![
                cell(t, "id"),
                cell(t, "title"),
                cell(t, "status"),
                cell(t, "due"),
            ]
        })
        .collect();
    Ok(finish_listing(
        ctx,
        &["ID", "TITLE", "STATUS", "DUE"],
        rows,
        items,
        next,
    ))
}

async fn insert(
    ctx: &Context,
    tasklist: &str,
    title: &str,
    notes: Option<String>,
    due: Option<String>,
) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("tasks.tasks.insert")
            .param("tasklist", tasklist)
            .param("title", title)
            .param_opt("due", due.as_deref())
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }

    let session = Session::connect(ctx)?;
    let created = session
        .tasks()
        .insert_task(tasklist, title, notes.as_deref(), due.as_deref())
        .await?;
    let pairs = vec![
        ("id".to_string(), cell(&created, "id")),
        ("title".to_string(), cell(&created, "title")),
    ];
    Ok(finish_record(ctx, pairs, &created))
}

async fn complete(ctx: &Context, tasklist: &str, id: &str) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("tasks.tasks.complete")
            .param("tasklist", tasklist)
            .param("id", id)
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }

    let session = Session::connect(ctx)?;
    let updated = session.tasks().complete_task(tasklist, id).await?;
    let pairs = vec![
        ("id".to_string(), cell(&updated, "id")),
        ("status".to_string(), cell(&updated, "status")),
    ];
    Ok(finish_record(ctx, pairs, &updated))
}

async fn delete(ctx: &Context, tasklist: &str, id: &str) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("tasks.tasks.delete")
            .param("tasklist", tasklist)
            .param("id", id)
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }
    prompts::confirm(&format!("Delete task {}?", id), ctx.interactive, ctx.force)?;

    let session = Session::connect(ctx)?;
    finish_delete(ctx, id, session.tasks().delete_task(tasklist, id).await)
}
