//! calendar commands

use anyhow::Result;
use serde_json::{json, Value};

use crate::cli::args::{CalendarCalendars, CalendarCommand, CalendarEvents, PageArgs};
use crate::engine::{collect_all, Context, DryRun, ExitCode};
use crate::ui::prompts;
use crate::workspace::Session;

use super::{cell, finish_delete, finish_listing, finish_record};

pub async fn run(ctx: &Context, command: CalendarCommand) -> Result<ExitCode> {
    match command {
        CalendarCommand::Calendars { command: CalendarCalendars::List { page } } => {
            list_calendars(ctx, page).await
        }
        CalendarCommand::Events { command } => match command {
            CalendarEvents::List { calendar, from, to, query, page } => {
                list_events(ctx, &calendar, from, to, query, page).await
            }
            CalendarEvents::Get { id, calendar } => get_event(ctx, &calendar, &id).await,
            CalendarEvents::Create {
                summary,
                start,
                end,
                calendar,
                description,
                location,
                attendees,
            } => {
                create_event(
                    ctx, &calendar, &summary, &start, &end, description, location, attendees,
                )
                .await
            }
            CalendarEvents::Delete { id, calendar } => delete_event(ctx, &calendar, &id).await,
        },
    }
}

async fn list_calendars(ctx: &Context, page: PageArgs) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let calendar = session.calendar();

    let (items, next) = if page.all {
        let items = collect_all(|token| {
            let calendar = &calendar;
            async move { calendar.list_calendars(page.max, token.as_deref()).await }
        })
        .await?;
        (items, None)
    } else {
        let fetched = calendar
            .list_calendars(page.max, page.page.as_deref())
            .await?;
        (fetched.items, fetched.next)
    };

    let rows = items
        .iter()
        .map(|c| {
            vec![
                cell(c, "id"),
                cell(c, "summary"),
                c.get("primary")
                    .and_then(Value::as_bool)
                    .unwrap_or(false)
                    .to_string(),
            ]
        })
        .collect();
    Ok(finish_listing(ctx, &["ID", "SUMMARY", "PRIMARY"], rows, items, next))
}

async fn list_events(
    ctx: &Context,
    calendar_id: &str,
    from: Option<String>,
    to: Option<String>,
    query: Option<String>,
    page: PageArgs,
) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let calendar = session.calendar();

    let from = from.as_deref();
    let to = to.as_deref();
    let query = query.as_deref();
    let (items, next) = if page.all {
        let items = collect_all(|token| {
            let calendar = &calendar;
            async move {
                calendar
                    .list_events(calendar_id, from, to, query, page.max, token.as_deref())
                    .await
            }
        })
        .await?;
        (items, None)
    } else {
        let fetched = calendar
            .list_events(calendar_id, from, to, query, page.max, page.page.as_deref())
            .await?;
        (fetched.items, fetched.next)
    };

    let rows = items
        .iter()
        .map(|e| vec![cell(e, "id"), event_start(e), cell(e, "summary")])
        .collect();
    Ok(finish_listing(ctx, &["ID", "START", "SUMMARY"], rows, items, next))
}

async fn get_event(ctx: &Context, calendar_id: &str, id: &str) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let event = session.calendar().get_event(calendar_id, id).await?;

    let pairs = vec![
        ("id".to_string(), cell(&event, "id")),
        ("summary".to_string(), cell(&event, "summary")),
        ("start".to_string(), event_start(&event)),
        ("end".to_string(), event_end(&event)),
        ("location".to_string(), cell(&event, "location")),
        ("status".to_string(), cell(&event, "status")),
    ];
    Ok(finish_record(ctx, pairs, &event))
}

#[allow(clippy::too_many_arguments)]
async fn create_event(
    ctx: &Context,
    calendar_id: &str,
    summary: &str,
    start: &str,
    end: &str,
    description: Option<String>,
    location: Option<String>,
    attendees: Vec<String>,
) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("calendar.events.create")
            .param("calendar", calendar_id)
            .param("summary", summary)
            .param("start", start)
            .param("end", end)
            .param("attendees", attendees.len())
            .param_opt("location", location.as_deref())
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }

    let mut event = json!({
        "summary": summary,
        "start": {"dateTime": start},
        "end": {"dateTime": end},
    });
    if let Some(description) = description {
        event["description"] = json!(description);
    }
    if let Some(location) = location {
        event["location"] = json!(location);
    }
    if !attendees.is_empty() {
        event["attendees"] = json!(attendees
            .iter()
            .map(|email| json!({"email": email}))
            .collect::<Vec<_>>());
    }

    let session = Session::connect(ctx)?;
    let created = session.calendar().create_event(calendar_id, &event).await?;
    let pairs = vec![
        ("id".to_string(), cell(&created, "id")),
        ("link".to_string(), cell(&created, "htmlLink")),
    ];
    Ok(finish_record(ctx, pairs, &created))
}

async fn delete_event(ctx: &Context, calendar_id: &str, id: &str) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("calendar.events.delete")
            .param("calendar", calendar_id)
            .param("id", id)
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }
    prompts::confirm(
        &format!("Delete event {}?", id),
        ctx.interactive,
        ctx.force,
    )?;

    let session = Session::connect(ctx)?;
    finish_delete(ctx, id, session.calendar().delete_event(calendar_id, id).await)
}

/// Start time of an event, whole-day or timed.
fn event_start(event: &Value) -> String {
    event_time(event, "start")
}

fn event_end(event: &Value) -> String {
    event_time(event, "end")
}

fn event_time(event: &Value, key: &str) -> String {
    event
        .get(key)
        .and_then(|t| {
            t.get("dateTime")
                .or_else(|| t.get("date"))
                .and_then(Value::as_str)
        })
        .unwrap_or_default()
        .to_string()
}
