//! engine::gate
//!
//! Command enable/disable gating.
//!
//! # Design
//!
//! Operators can restrict which commands an agent or script may run via
//! comma-separated allow/deny lists (`--enable-commands`,
//! `--disable-commands`, or the matching `GOG_*` environment variables).
//! Both lists are parsed independently; an empty or whitespace-only list
//! imposes no restriction.
//!
//! Deny matching walks every dot-separated prefix of the invoked command
//! path from most-specific to least-specific and blocks on the first match,
//! so denying `gmail` blocks `gmail.messages.list`. Allow matching is
//! satisfied by an exact top-level match or the wildcard tokens `*`/`all`.
//! Matching is case-insensitive.

use thiserror::Error;

use crate::core::types::CommandPath;

/// Error returned when the gate refuses a command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("command '{path}' is disabled (matched '{entry}')")]
    Denied { path: String, entry: String },

    #[error("command '{path}' is not in the enabled command list")]
    NotAllowed { path: String },
}

/// Allow/deny lists for command paths.
#[derive(Debug, Clone, Default)]
pub struct Gate {
    allow: Vec<String>,
    deny: Vec<String>,
}

impl Gate {
    /// Build a gate from raw comma-separated lists.
    ///
    /// Entries are trimmed and lowercased; empty entries are dropped.
    pub fn new(allow: &str, deny: &str) -> Self {
        Self {
            allow: parse_list(allow),
            deny: parse_list(deny),
        }
    }

    /// A gate that permits everything.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Decide whether a command path may execute.
    ///
    /// Deny wins over allow: a deny entry at any prefix level blocks the
    /// command even when the allow list would otherwise admit it.
    pub fn check(&self, path: &CommandPath) -> Result<(), GateError> {
        for prefix in path.prefixes() {
            if let Some(entry) = self.deny.iter().find(|e| e.as_str() == prefix) {
                return Err(GateError::Denied {
                    path: path.as_str().to_string(),
                    entry: entry.clone(),
                });
            }
        }

        if self.allow.is_empty() {
            return Ok(());
        }
        let allowed = self
            .allow
            .iter()
            .any(|entry| entry == "*" || entry == "all" || entry.as_str() == path.top_level());
        if allowed {
            Ok(())
        } else {
            Err(GateError::NotAllowed {
                path: path.as_str().to_string(),
            })
        }
    }

    /// Whether a path would be permitted (convenience for listings).
    pub fn permits(&self, path: &CommandPath) -> bool {
        self.check(path).is_ok()
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|entry| entry.trim().to_ascii_lowercase())
        .filter(|entry| !entry.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> CommandPath {
        CommandPath::new(p)
    }

    #[test]
    fn empty_lists_impose_nothing() {
        let gate = Gate::new("", "   ");
        assert!(gate.check(&path("gmail.messages.list")).is_ok());
        assert!(gate.check(&path("drive.files.delete")).is_ok());
    }

    #[test]
    fn deny_blocks_exact_path() {
        let gate = Gate::new("", "gmail.messages.list");
        assert!(gate.check(&path("gmail.messages.list")).is_err());
        assert!(gate.check(&path("gmail.messages.get")).is_ok());
    }

    #[test]
    fn deny_prefix_blocks_deeper_paths() {
        let gate = Gate::new("", "gmail");
        assert!(gate.check(&path("gmail.messages.list")).is_err());
        assert!(gate.check(&path("gmail.labels.list")).is_err());
        assert!(gate.check(&path("calendar.events.list")).is_ok());
    }

    #[test]
    fn deny_intermediate_prefix() {
        let gate = Gate::new("", "gmail.messages");
        assert!(gate.check(&path("gmail.messages.delete")).is_err());
        assert!(gate.check(&path("gmail.labels.list")).is_ok());
    }

    #[test]
    fn deny_is_case_insensitive() {
        let gate = Gate::new("", "GMAIL.Messages");
        assert!(gate.check(&path("gmail.messages.list")).is_err());
    }

    #[test]
    fn deny_reports_matched_entry() {
        let gate = Gate::new("", "gmail");
        let err = gate.check(&path("gmail.messages.list")).unwrap_err();
        assert_eq!(
            err,
            GateError::Denied {
                path: "gmail.messages.list".into(),
                entry: "gmail".into(),
            }
        );
    }

    #[test]
    fn allow_requires_top_level_match() {
        let gate = Gate::new("gmail,calendar", "");
        assert!(gate.check(&path("gmail.messages.list")).is_ok());
        assert!(gate.check(&path("calendar.events.list")).is_ok());
        assert!(gate.check(&path("drive.files.list")).is_err());
    }

    #[test]
    fn allow_wildcards() {
        let star = Gate::new("*", "");
        assert!(star.check(&path("drive.files.list")).is_ok());

        let all = Gate::new("all", "");
        assert!(all.check(&path("drive.files.list")).is_ok());
    }

    #[test]
    fn deny_wins_over_allow() {
        let gate = Gate::new("gmail", "gmail.messages");
        assert!(gate.check(&path("gmail.labels.list")).is_ok());
        assert!(gate.check(&path("gmail.messages.list")).is_err());
    }

    #[test]
    fn whitespace_entries_are_dropped() {
        let gate = Gate::new(" , ,", ", ,");
        assert!(gate.check(&path("gmail.messages.list")).is_ok());
    }
}
