//! ui::output
//!
//! Output-mode resolution and rendering.
//!
//! # Design
//!
//! The mode is resolved once per process from merged global flags and the
//! `GOG_OUTPUT_JSON` environment variable, then threaded through the
//! context. JSON mode serializes the exact result structure with no
//! transformation. Plain mode renders tab-separated `key<TAB>value` lines
//! for scalar records and tab-separated rows for lists. Human mode renders
//! aligned tables with a header row.

use std::fmt::Display;

use serde_json::Value;

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Aligned tables and labeled fields for people.
    Human,
    /// Tab-separated values for shell pipelines.
    Plain,
    /// Exact result structures as JSON.
    Json,
}

impl OutputMode {
    /// Resolve the mode from global flags and the environment.
    ///
    /// `--json` wins over `--plain`; `GOG_OUTPUT_JSON=1` turns JSON on when
    /// neither flag is given.
    pub fn resolve(json: bool, plain: bool) -> Self {
        Self::resolve_with_env(json, plain, std::env::var("GOG_OUTPUT_JSON").ok().as_deref())
    }

    /// Resolution with the env value injected, for tests.
    pub fn resolve_with_env(json: bool, plain: bool, env_json: Option<&str>) -> Self {
        if json {
            OutputMode::Json
        } else if plain {
            OutputMode::Plain
        } else if matches!(env_json, Some("1") | Some("true")) {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }

    pub fn is_json(self) -> bool {
        self == OutputMode::Json
    }
}

/// Print a JSON value exactly as serialized.
pub fn emit_json(value: &Value) {
    println!("{}", value);
}

/// Render a JSON scalar without surrounding quotes; non-scalars serialize.
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Print one record of key/value pairs as `key<TAB>value` lines.
pub fn emit_plain_record(pairs: &[(String, String)]) {
    for (key, value) in pairs {
        println!("{}\t{}", key, value);
    }
}

/// Render a record in the given mode.
///
/// `value` is the untransformed structure used verbatim in JSON mode.
pub fn emit_record(mode: OutputMode, pairs: &[(String, String)], value: &Value) {
    match mode {
        OutputMode::Json => emit_json(value),
        OutputMode::Plain => emit_plain_record(pairs),
        OutputMode::Human => {
            let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
            for (key, val) in pairs {
                println!("{:<width$}  {}", key, val, width = width);
            }
        }
    }
}

/// Render a listing in the given mode.
///
/// In JSON mode the exact `value` is printed (typically the items array
/// plus any `next_page` token). Plain mode prints one tab-separated row per
/// item; human mode prints an aligned table with a header row.
pub fn emit_table(mode: OutputMode, headers: &[&str], rows: &[Vec<String>], value: &Value) {
    match mode {
        OutputMode::Json => emit_json(value),
        OutputMode::Plain => {
            for row in rows {
                println!("{}", row.join("\t"));
            }
        }
        OutputMode::Human => {
            let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
            for row in rows {
                for (i, cell) in row.iter().enumerate() {
                    if i < widths.len() && cell.len() > widths[i] {
                        widths[i] = cell.len();
                    }
                }
            }
            println!("{}", format_row(headers.iter().map(|h| h.to_string()), &widths));
            for row in rows {
                println!("{}", format_row(row.iter().cloned(), &widths));
            }
        }
    }
}

fn format_row(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    cells
        .enumerate()
        .map(|(i, cell)| {
            let width = widths.get(i).copied().unwrap_or(0);
            format!("{:<width$}", cell, width = width)
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, quiet: bool) {
    if !quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, quiet: bool) {
    if !quiet {
        eprintln!("warning: {}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_flag_wins() {
        assert_eq!(
            OutputMode::resolve_with_env(true, true, None),
            OutputMode::Json
        );
    }

    #[test]
    fn plain_flag() {
        assert_eq!(
            OutputMode::resolve_with_env(false, true, None),
            OutputMode::Plain
        );
    }

    #[test]
    fn env_enables_json_when_flags_absent() {
        assert_eq!(
            OutputMode::resolve_with_env(false, false, Some("1")),
            OutputMode::Json
        );
        assert_eq!(
            OutputMode::resolve_with_env(false, false, Some("true")),
            OutputMode::Json
        );
    }

    #[test]
    fn plain_flag_overrides_env() {
        assert_eq!(
            OutputMode::resolve_with_env(false, true, Some("1")),
            OutputMode::Plain
        );
    }

    #[test]
    fn default_is_human() {
        assert_eq!(
            OutputMode::resolve_with_env(false, false, None),
            OutputMode::Human
        );
        assert_eq!(
            OutputMode::resolve_with_env(false, false, Some("0")),
            OutputMode::Human
        );
    }

    #[test]
    fn scalar_rendering() {
        assert_eq!(scalar_to_string(&json!("plain")), "plain");
        assert_eq!(scalar_to_string(&json!(42)), "42");
        assert_eq!(scalar_to_string(&json!(true)), "true");
        assert_eq!(scalar_to_string(&Value::Null), "");
    }

    #[test]
    fn row_formatting_pads_and_trims() {
        let widths = vec![5, 3];
        let row = format_row(vec!["ab".to_string(), "c".to_string()].into_iter(), &widths);
        assert_eq!(row, "ab     c");
    }
}
