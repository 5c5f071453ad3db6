//! gmail commands
//!
//! Message listing/reading, sending, labels, drafts, attachments.
//!
//! # Envelope
//!
//! Mutating subcommands emit their dry-run payload before the session is
//! opened; `messages delete` additionally confirms unless forced. Deletes
//! are idempotent: a missing message reports `not_found` instead of
//! failing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{json, Value};

use crate::cli::args::{
    ComposeArgs, GmailAttachments, GmailCommand, GmailDrafts, GmailLabels, GmailMessages,
    GmailSendAs, PageArgs,
};
use crate::core::bytesize::format_size;
use crate::engine::exit::{ConfigError, UsageError};
use crate::engine::{collect_all, Context, DryRun, ExitCode};
use crate::mail::{strip_html, Attachment, MessageBuilder};
use crate::store::tracking::{pixel_html, pixel_url};
use crate::store::TrackingStore;
use crate::ui::{output, prompts};
use crate::workspace::Session;

use super::{cell, finish_delete, finish_listing, finish_record};

pub async fn run(ctx: &Context, command: GmailCommand) -> Result<ExitCode> {
    match command {
        GmailCommand::Messages { command } => match command {
            GmailMessages::List { query, labels, page } => list(ctx, query, labels, page).await,
            GmailMessages::Get { id, format } => get(ctx, &id, format).await,
            GmailMessages::Send(args) => send(ctx, args).await,
            GmailMessages::Trash { id } => trash(ctx, &id).await,
            GmailMessages::Delete { id } => delete(ctx, &id).await,
            GmailMessages::Modify { id, add, remove } => modify(ctx, &id, add, remove).await,
        },
        GmailCommand::Labels { command: GmailLabels::List } => labels(ctx).await,
        GmailCommand::Attachments {
            command: GmailAttachments::Get { message_id, attachment_id, out },
        } => attachment(ctx, &message_id, &attachment_id, out).await,
        GmailCommand::Drafts { command: GmailDrafts::Create(args) } => draft(ctx, args).await,
        GmailCommand::SendAs { command: GmailSendAs::List } => send_as(ctx).await,
    }
}

async fn list(
    ctx: &Context,
    query: Option<String>,
    labels: Vec<String>,
    page: PageArgs,
) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let gmail = session.gmail();

    let query = query.as_deref();
    let labels = labels.as_slice();
    let (items, next) = if page.all {
        let items = collect_all(|token| {
            let gmail = &gmail;
            async move {
                gmail
                    .list_messages(query, labels, page.max, token.as_deref())
                    .await
            }
        })
        .await?;
        (items, None)
    } else {
        let fetched = gmail
            .list_messages(query, labels, page.max, page.page.as_deref())
            .await?;
        (fetched.items, fetched.next)
    };

    let rows = items
        .iter()
        .map(|m| vec![cell(m, "id"), cell(m, "threadId")])
        .collect();
    Ok(finish_listing(ctx, &["ID", "THREAD"], rows, items, next))
}

async fn get(ctx: &Context, id: &str, format: crate::cli::args::FormatArg) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let message = session.gmail().get_message(id, format.into()).await?;

    let mut pairs = vec![("id".to_string(), cell(&message, "id"))];
    for header in ["From", "To", "Subject", "Date"] {
        if let Some(value) = header_value(&message, header) {
            pairs.push((header.to_lowercase(), value));
        }
    }
    if let Some(body) = message_body(&message) {
        pairs.push(("body".to_string(), body));
    }
    Ok(finish_record(ctx, pairs, &message))
}

async fn send(ctx: &Context, args: ComposeArgs) -> Result<ExitCode> {
    if ctx.dry_run {
        compose_dry_run("gmail.messages.send", &args).emit(ctx);
        return Ok(ExitCode::Ok);
    }

    let raw = compose_raw(ctx, &args)?;
    let session = Session::connect(ctx)?;
    let sent = session.gmail().send_raw(&raw).await?;

    let pairs = vec![
        ("id".to_string(), cell(&sent, "id")),
        ("thread".to_string(), cell(&sent, "threadId")),
    ];
    Ok(finish_record(ctx, pairs, &sent))
}

async fn trash(ctx: &Context, id: &str) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("gmail.messages.trash").param("id", id).emit(ctx);
        return Ok(ExitCode::Ok);
    }

    let session = Session::connect(ctx)?;
    let message = session.gmail().trash_message(id).await?;
    let pairs = vec![
        ("id".to_string(), cell(&message, "id")),
        ("status".to_string(), "trashed".to_string()),
    ];
    Ok(finish_record(ctx, pairs, &message))
}

async fn delete(ctx: &Context, id: &str) -> Result<ExitCode> {
    if ctx.dry_run {
        DryRun::new("gmail.messages.delete")
            .param("id", id)
            .param("permanent", true)
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }
    prompts::confirm(
        &format!("Permanently delete message {}?", id),
        ctx.interactive,
        ctx.force,
    )?;

    let session = Session::connect(ctx)?;
    finish_delete(ctx, id, session.gmail().delete_message(id).await)
}

async fn modify(ctx: &Context, id: &str, add: Vec<String>, remove: Vec<String>) -> Result<ExitCode> {
    if add.is_empty() && remove.is_empty() {
        return Err(UsageError("nothing to modify: pass --add-label or --remove-label".into()).into());
    }
    if ctx.dry_run {
        DryRun::new("gmail.messages.modify")
            .param("id", id)
            .param("add", json!(add))
            .param("remove", json!(remove))
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }

    let session = Session::connect(ctx)?;
    let message = session.gmail().modify_message(id, &add, &remove).await?;
    let pairs = vec![
        ("id".to_string(), cell(&message, "id")),
        (
            "labels".to_string(),
            label_ids(&message).join(","),
        ),
    ];
    Ok(finish_record(ctx, pairs, &message))
}

async fn labels(ctx: &Context) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let items = session.gmail().list_labels().await?;
    let rows = items
        .iter()
        .map(|l| vec![cell(l, "id"), cell(l, "name"), cell(l, "type")])
        .collect();
    Ok(finish_listing(ctx, &["ID", "NAME", "TYPE"], rows, items, None))
}

async fn attachment(
    ctx: &Context,
    message_id: &str,
    attachment_id: &str,
    out: Option<PathBuf>,
) -> Result<ExitCode> {
    let out = out.unwrap_or_else(|| PathBuf::from(format!("{}.attachment", message_id)));

    if ctx.dry_run {
        DryRun::new("gmail.attachments.get")
            .param("message_id", message_id)
            .param("out", out.display().to_string())
            .emit(ctx);
        return Ok(ExitCode::Ok);
    }

    // Skip-if-exists caching: an existing file is never re-downloaded.
    if out.exists() {
        let pairs = vec![
            ("path".to_string(), out.display().to_string()),
            ("status".to_string(), "exists".to_string()),
        ];
        let value = json!({ "path": out.display().to_string(), "status": "exists" });
        return Ok(finish_record(ctx, pairs, &value));
    }

    let session = Session::connect(ctx)?;
    let body = session
        .gmail()
        .get_attachment(message_id, attachment_id)
        .await?;
    let data = body
        .get("data")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("attachment response has no data field"))?;
    let bytes = decode_base64url(data).context("cannot decode attachment data")?;

    fs::write(&out, &bytes)
        .with_context(|| format!("cannot write {}", out.display()))?;

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

async fn draft(ctx: &Context, args: ComposeArgs) -> Result<ExitCode> {
    if ctx.dry_run {
        compose_dry_run("gmail.drafts.create", &args).emit(ctx);
        return Ok(ExitCode::Ok);
    }

    let raw = compose_raw(ctx, &args)?;
    let session = Session::connect(ctx)?;
    let created = session.gmail().create_draft(&raw).await?;
    let pairs = vec![("id".to_string(), cell(&created, "id"))];
    Ok(finish_record(ctx, pairs, &created))
}

async fn send_as(ctx: &Context) -> Result<ExitCode> {
    let session = Session::connect(ctx)?;
    let items = session.gmail().list_send_as().await?;
    let rows = items
        .iter()
        .map(|a| {
            vec![
                cell(a, "sendAsEmail"),
                cell(a, "displayName"),
                a.get("isDefault")
                    .and_then(Value::as_bool)
                    .unwrap_or(false)
                    .to_string(),
            ]
        })
        .collect();
    Ok(finish_listing(
        ctx,
        &["EMAIL", "NAME", "DEFAULT"],
        rows,
        items,
        None,
    ))
}

fn compose_dry_run(action: &str, args: &ComposeArgs) -> DryRun {
    DryRun::new(action)
        .param("to", json!(args.to))
        .param("subject", args.subject.as_str())
        .param("attachments", args.attach.len())
        .param("track", args.track)
        .param_opt("from", args.from.as_deref())
}

/// Assemble and encode the outgoing message from compose flags.
///
/// Tracking requires an HTML body (the pixel is an `<img>` element) and a
/// configured base URL for the account.
fn compose_raw(ctx: &Context, args: &ComposeArgs) -> Result<String> {
    let mut builder = MessageBuilder::new().subject(&args.subject);
    if let Some(from) = &args.from {
        builder = builder.from(from);
    }
    for address in &args.to {
        builder = builder.to(address);
    }
    for address in &args.cc {
        builder = builder.cc(address);
    }
    for address in &args.bcc {
        builder = builder.bcc(address);
    }
    if let Some(body) = &args.body {
        builder = builder.text(body);
    }

    let mut html = args.html.clone();
    if args.track {
        let html_body = html.as_mut().ok_or_else(|| {
            UsageError("--track requires an --html body to carry the pixel".into())
        })?;
        let config = TrackingStore::open(ctx)?.load()?.ok_or_else(|| {
            ConfigError("no tracking base URL configured; run 'gog auth tracking set'".into())
        })?;
        let (url, id) = pixel_url(&config.base_url);
        html_body.push_str(&pixel_html(&url));
        output::print(format!("tracking id: {}", id), ctx.quiet);
    }
    if let Some(html) = html {
        builder = builder.html(html);
    }

    for path in &args.attach {
        let data = fs::read(path)
            .with_context(|| format!("cannot read attachment {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        builder = builder.attachment(Attachment {
            mime_type: guess_mime(path).to_string(),
            filename,
            data,
        });
    }

    Ok(crate::mail::encode_raw(&builder.build()))
}

/// Look up a header value in a `full`/`metadata` format message.
fn header_value(message: &Value, name: &str) -> Option<String> {
    message
        .get("payload")?
        .get("headers")?
        .as_array()?
        .iter()
        .find(|h| {
            h.get("name")
                .and_then(Value::as_str)
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
        .and_then(|h| h.get("value").and_then(Value::as_str))
        .map(String::from)
}

/// Extract a readable body from a message payload.
///
/// Prefers a `text/plain` part; falls back to stripping a `text/html` part.
fn message_body(message: &Value) -> Option<String> {
    let payload = message.get("payload")?;
    if let Some(text) = part_body(payload, "text/plain") {
        return Some(text);
    }
    part_body(payload, "text/html").map(|html| strip_html(&html))
}

/// Depth-first search of the MIME tree for a part of the given type.
fn part_body(part: &Value, mime_type: &str) -> Option<String> {
    if part.get("mimeType").and_then(Value::as_str) == Some(mime_type) {
        if let Some(data) = part.get("body").and_then(|b| b.get("data")).and_then(Value::as_str) {
            if let Ok(bytes) = decode_base64url(data) {
                return Some(String::from_utf8_lossy(&bytes).into_owned());
            }
        }
    }
    part.get("parts")?
        .as_array()?
        .iter()
        .find_map(|child| part_body(child, mime_type))
}

fn label_ids(message: &Value) -> Vec<String> {
    message
        .get("labelIds")
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Decode Gmail's base64url payloads, padded or not.
fn decode_base64url(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(data.trim_end_matches('='))
}

/// Content type from the file extension, octet-stream otherwise.
fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("txt") => "text/plain",
        Some("html") | Some("htm") => "text/html",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_message() -> Value {
        json!({
            "id": "m1",
            "payload": {
                "mimeType": "multipart/alternative",
                "headers": [
                    {"name": "From", "value": "alice@example.com"},
                    {"name": "Subject", "value": "Hi"},
                ],
                "parts": [
                    {
                        "mimeType": "text/plain",
                        "body": {"data": URL_SAFE_NO_PAD.encode("hello world")},
                    },
                    {
                        "mimeType": "text/html",
                        "body": {"data": URL_SAFE_NO_PAD.encode("<p>hello world</p>")},
                    },
                ],
            },
        })
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let message = full_message();
        assert_eq!(
            header_value(&message, "from").as_deref(),
            Some("alice@example.com")
        );
        assert!(header_value(&message, "To").is_none());
    }

    #[test]
    fn body_prefers_text_plain() {
        assert_eq!(message_body(&full_message()).as_deref(), Some("hello world"));
    }

    #[test]
    fn body_falls_back_to_stripped_html() {
        let message = json!({
            "payload": {
                "mimeType": "text/html",
                "body": {"data": URL_SAFE_NO_PAD.encode("<b>bold</b> text")},
            },
        });
        assert_eq!(message_body(&message).as_deref(), Some("bold text"));
    }

    #[test]
    fn decode_accepts_padded_input() {
        let padded = "aGVsbG8=";
        assert_eq!(decode_base64url(padded).unwrap(), b"hello");
    }

    #[test]
    fn mime_guess_by_extension() {
        assert_eq!(guess_mime(Path::new("report.pdf")), "application/pdf");
        assert_eq!(guess_mime(Path::new("pic.JPG")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("blob")), "application/octet-stream");
    }
}
