//! mail::html
//!
//! HTML-to-text rendering for message bodies.
//!
//! Regex-based, not a real HTML parser: good enough for the fragments
//! Gmail returns, with script/style content dropped entirely and block
//! elements mapped to line breaks.

use regex::Regex;

/// Strip HTML tags and decode common entities, yielding readable text.
pub fn strip_html(html: &str) -> String {
    // Case-insensitive; (?s) lets `.` span the element content.
    let script = Regex::new(r"(?is)<(script|style|head)[^>]*>.*?</(script|style|head)>")
        .expect("static regex");
    let breaks =
        Regex::new(r"(?i)<(br|/p|/div|/tr|/li|/h[1-6])[^>]*>").expect("static regex");
    let tags = Regex::new(r"(?s)<[^>]+>").expect("static regex");
    let spaces = Regex::new(r"[ \t]+").expect("static regex");
    let blank_lines = Regex::new(r"\n{3,}").expect("static regex");

    let text = script.replace_all(html, "");
    let text = breaks.replace_all(&text, "\n");
    let text = tags.replace_all(&text, "");
    let text = decode_entities(&text);
    let text = spaces.replace_all(&text, " ");
    let text = blank_lines.replace_all(&text, "\n\n");

    text.lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#34;", "\"")
        .replace("&amp;", "&")
}
