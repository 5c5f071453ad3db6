//! mail::rfc822
//!
//! RFC822 message construction.
//!
//! # Design
//!
//! The builder assembles exactly the shapes Gmail accepts:
//!
//! - text only: a single `text/plain` part
//! - text + html: `multipart/alternative`, text first
//! - with attachments: `multipart/mixed` wrapping the body part(s)
//!
//! Lines are CRLF-terminated throughout. Non-ASCII header values use
//! RFC 2047 encoded words.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use uuid::Uuid;

const CRLF: &str = "\r\n";

/// A file attached to an outgoing message.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Builder for outgoing RFC822 messages.
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    from: Option<String>,
    to: Vec<String>,
    cc: Vec<String>,
    bcc: Vec<String>,
    subject: String,
    text: Option<String>,
    html: Option<String>,
    attachments: Vec<Attachment>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.from = Some(address.into());
        self
    }

    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to.push(address.into());
        self
    }

    pub fn cc(mut self, address: impl Into<String>) -> Self {
        self.cc.push(address.into());
        self
    }

    pub fn bcc(mut self, address: impl Into<String>) -> Self {
        self.bcc.push(address.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.text = Some(body.into());
        self
    }

    pub fn html(mut self, body: impl Into<String>) -> Self {
        self.html = Some(body.into());
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Assemble the full RFC822 message.
    pub fn build(&self) -> String {
        let mut headers = String::new();
        if let Some(from) = &self.from {
            push_header(&mut headers, "From", from);
        }
        if !self.to.is_empty() {
            push_header(&mut headers, "To", &self.to.join(", "));
        }
        if !self.cc.is_empty() {
            push_header(&mut headers, "Cc", &self.cc.join(", "));
        }
        if !self.bcc.is_empty() {
            push_header(&mut headers, "Bcc", &self.bcc.join(", "));
        }
        push_header(&mut headers, "Subject", &encode_header_value(&self.subject));
        push_header(&mut headers, "MIME-Version", "1.0");

        let body_part = self.body_part();

        if self.attachments.is_empty() {
            return format!("{}{}", headers, body_part);
        }

        let boundary = boundary();
        push_header(
            &mut headers,
            "Content-Type",
            &format!("multipart/mixed; boundary=\"{}\"", boundary),
        );

        let mut message = headers;
        message.push_str(CRLF);
        message.push_str(&format!("--{}{}", boundary, CRLF));
        message.push_str(&body_part);
        for attachment in &self.attachments {
            message.push_str(&format!("--{}{}", boundary, CRLF));
            message.push_str(&attachment_part(attachment));
        }
        message.push_str(&format!("--{}--{}", boundary, CRLF));
        message
    }

    /// The message body as a complete MIME part (headers plus content).
    fn body_part(&self) -> String {
        match (&self.text, &self.html) {
            (Some(text), Some(html)) => alternative_part(text, html),
            (None, Some(html)) => single_part("text/html", html),
            (text, None) => single_part("text/plain", text.as_deref().unwrap_or("")),
        }
    }
}

/// Base64url-encode a built message for the Gmail `raw` field.
pub fn encode_raw(message: &str) -> String {
    URL_SAFE_NO_PAD.encode(message.as_bytes())
}

fn push_header(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str(": ");
    out.push_str(value);
    out.push_str(CRLF);
}

/// RFC 2047 encoded word for non-ASCII header values.
fn encode_header_value(value: &str) -> String {
    if value.is_ascii() {
        return value.to_string();
    }
    format!("=?utf-8?B?{}?=", STANDARD.encode(value.as_bytes()))
}

fn boundary() -> String {
    format!("b_{}", Uuid::new_v4().simple())
}

fn single_part(mime_type: &str, content: &str) -> String {
    let mut part = String::new();
    push_header(
        &mut part,
        "Content-Type",
        &format!("{}; charset=\"UTF-8\"", mime_type),
    );
    push_header(&mut part, "Content-Transfer-Encoding", "7bit");
    part.push_str(CRLF);
    part.push_str(&normalize_newlines(content));
    part.push_str(CRLF);
    part
}

fn alternative_part(text: &str, html: &str) -> String {
    let boundary = boundary();
    let mut part = String::new();
    push_header(
        &mut part,
        "Content-Type",
        &format!("multipart/alternative; boundary=\"{}\"", boundary),
    );
    part.push_str(CRLF);
    part.push_str(&format!("--{}{}", boundary, CRLF));
    part.push_str(&single_part("text/plain", text));
    part.push_str(&format!("--{}{}", boundary, CRLF));
    part.push_str(&single_part("text/html", html));
    part.push_str(&format!("--{}--{}", boundary, CRLF));
    part
}

fn attachment_part(attachment: &Attachment) -> String {
    let mut part = String::new();
    push_header(
        &mut part,
        "Content-Type",
        &format!("{}; name=\"{}\"", attachment.mime_type, attachment.filename),
    );
    push_header(&mut part, "Content-Transfer-Encoding", "base64");
    push_header(
        &mut part,
        "Content-Disposition",
        &format!("attachment; filename=\"{}\"", attachment.filename),
    );
    part.push_str(CRLF);

    // RFC 2045 caps encoded lines at 76 characters.
    let encoded = STANDARD.encode(&attachment.data);
    for chunk in encoded.as_bytes().chunks(76) {
        part.push_str(std::str::from_utf8(chunk).unwrap_or_default());
        part.push_str(CRLF);
    }
    part
}

/// Rewrite bare LF line endings as CRLF.
fn normalize_newlines(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\n', "\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_message() {
        let message = MessageBuilder::new()
            .from("me@example.com")
            .to("you@example.com")
            .subject("Hello")
            .text("Line one\nLine two")
            .build();

        assert!(message.starts_with("From: me@example.com\r\n"));
        assert!(message.contains("To: you@example.com\r\n"));
        assert!(message.contains("Subject: Hello\r\n"));
        assert!(message.contains("Content-Type: text/plain; charset=\"UTF-8\"\r\n"));
        assert!(message.contains("Line one\r\nLine two"));
        assert!(!message.contains("multipart"));
    }

    #[test]
    fn text_and_html_is_alternative() {
        let message = MessageBuilder::new()
            .to("you@example.com")
            .subject("Hi")
            .text("plain")
            .html("<b>rich</b>")
            .build();

        assert!(message.contains("multipart/alternative"));
        // Plain text part must come before the HTML part.
        let text_pos = message.find("text/plain").unwrap();
        let html_pos = message.find("text/html").unwrap();
        assert!(text_pos < html_pos);
    }

    #[test]
    fn attachments_wrap_in_mixed() {
        let message = MessageBuilder::new()
            .to("you@example.com")
            .subject("Report")
            .text("see attached")
            .attachment(Attachment {
                filename: "data.csv".into(),
                mime_type: "text/csv".into(),
                data: b"a,b\n1,2\n".to_vec(),
            })
            .build();

        assert!(message.contains("multipart/mixed"));
        assert!(message.contains("Content-Disposition: attachment; filename=\"data.csv\""));
        assert!(message.contains("Content-Transfer-Encoding: base64"));
    }

    #[test]
    fn multiple_recipients_join_with_commas() {
        let message = MessageBuilder::new()
            .to("a@example.com")
            .to("b@example.com")
            .cc("c@example.com")
            .subject("x")
            .text("y")
            .build();

        assert!(message.contains("To: a@example.com, b@example.com\r\n"));
        assert!(message.contains("Cc: c@example.com\r\n"));
    }

    #[test]
    fn non_ascii_subject_uses_encoded_word() {
        let message = MessageBuilder::new()
            .to("you@example.com")
            .subject("Réunion")
            .text("x")
            .build();

        assert!(message.contains("Subject: =?utf-8?B?"));
    }

    #[test]
    fn encode_raw_is_base64url_without_padding() {
        let raw = encode_raw("To: you@example.com\r\n\r\nhi");
        assert!(!raw.contains('+'));
        assert!(!raw.contains('/'));
        assert!(!raw.contains('='));
    }
}
