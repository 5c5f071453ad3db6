//! groups commands
//!
//! Directory group membership. These need a token with admin directory
//! scopes; without one the API answers 403 and the process exits with the
//! permission_denied code.

use anyhow::Result;

use crate::cli::args::{GroupsCommand, GroupsMembers, PageArgs};
use crate::engine::{collect_all, Context, DryRun, ExitCode};
use crate::ui::prompts;
use crate::workspace::Session;

use super::{cell, finish_delete, finish_listing, finish_record};

pub async fn run(ctx: &Context, command: GroupsCommand) -> Result<ExitCode> {
    match command {
        GroupsCommand::List { member, page } => list(ctx, member, page).await,
        GroupsCommand::Members { command } => match command {
            GroupsMembers::List { group, page } => members(ctx, &group, page).await,
            GroupsMembers::Insert { group, email, role } => {
                insert(ctx, &group, &email, &role).await
            }
            GroupsMembers::Delete { group, member } => delete(ctx, &group, &member).await,
        },
    }
}

async fn list(ctx: &Context, member: Option<String>, page: PageArgs) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let groups = session.groups();

    let member = member.as_deref();
    let (items, next) = if page.all {
        let items = collect_all(|token| {
            let groups = &groups;
            async move { groups.list_groups(member, page.max, token.as_deref()).await }
        })
        .await?;
        (items, None)
    } else {
        let fetched = groups
            .list_groups(member, page.max, page.page.as_deref())
            .await?;
        (fetched.items, fetched.next)
    };

    let rows = items
        .iter()
        .map(|g| vec![cell(g, "email"), cell(g, "name")])
        .collect();
    Ok(finish_listing(ctx, &["EMAIL", "NAME"], rows, items, next))
}

async fn members(ctx: &Context, group: &str, page: PageArgs) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let groups = session.groups();

    let (items, next) = if page.all {
        let items = collect_all(|token| {
            let groups = &groups;
            async move { groups.list_members(group, page.max, token.as_deref()).await }
        })
        .await?;
        (items, None)
    } else {
        let fetched = groups
            .list_members(group, page.max, page.page.as_deref())
            .await?;
        (fetched.items, fetched.next)
    };

    let rows = items
        .iter()
        .map(|m| vec![cell(m, "email"), cell(m, "role"), cell(m, "status")])
        .collect();
    Ok(finish_listing(ctx, &["EMAIL", "ROLE", "STATUS"], rows, items, next))
}

async fn insert(ctx: &Context, group: &str, email: &str, role: &str) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("groups.members.insert")
            .param("group", group)
            .param("email", email)
            .param("role", role)
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }

    let session = Session::connect(ctx)?;
    let added = session.groups().insert_member(group, email, role).await?;
    let pairs = vec![
        ("email".to_string(), cell(&added, "email")),
        ("role".to_string(), cell(&added, "role")),
    ];
    Ok(finish_record(ctx, pairs, &added))
}

async fn delete(ctx: &Context, group: &str, member: &str) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("groups.members.delete")
            .param("group", group)
            .param("member", member)
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }
    prompts::confirm(
        &format!("Remove {} from {}?", member, group),
        ctx.interactive,
        ctx.force,
    )?;

    let session = Session::connect(ctx)?;
    finish_delete(ctx, member, session.groups().delete_member(group, member).await)
}
