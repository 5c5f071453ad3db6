//! Gating matrix tests.
//!
//! The gate decides whether a resolved command path may execute, from
//! independent allow/deny lists. The unit tests in `engine::gate` pin the
//! hand-picked cases; this suite checks the rules hold across the whole
//! command catalog and, via property tests, across arbitrary paths.

use proptest::prelude::*;

use gogcli::cli::args::COMMAND_CATALOG;
use gogcli::core::types::CommandPath;
use gogcli::engine::gate::{Gate, GateError};

fn path(p: &str) -> CommandPath {
    CommandPath::new(p)
}

// =============================================================================
// Catalog-wide matrix
// =============================================================================

#[test]
fn unrestricted_gate_admits_the_whole_catalog() {
    let gate = Gate::unrestricted();
    for entry in COMMAND_CATALOG {
        assert!(gate.permits(&path(entry)), "blocked: {entry}");
    }
}

#[test]
fn wildcard_allow_admits_the_whole_catalog() {
    for wildcard in ["*", "all", "ALL"] {
        let gate = Gate::new(wildcard, "");
        for entry in COMMAND_CATALOG {
            assert!(gate.permits(&path(entry)), "{wildcard} blocked {entry}");
        }
    }
}

#[test]
fn denying_a_service_blocks_exactly_that_service() {
    let gate = Gate::new("", "gmail");
    for entry in COMMAND_CATALOG {
        let expected = !entry.starts_with("gmail");
        assert_eq!(gate.permits(&path(entry)), expected, "entry: {entry}");
    }
}

#[test]
fn allowing_one_service_blocks_the_rest() {
    let gate = Gate::new("drive", "");
    for entry in COMMAND_CATALOG {
        let expected = entry.starts_with("drive");
        assert_eq!(gate.permits(&path(entry)), expected, "entry: {entry}");
    }
}

#[test]
fn deny_mid_prefix_blocks_only_that_subtree() {
    let gate = Gate::new("", "gmail.messages");
    assert!(!gate.permits(&path("gmail.messages.list")));
    assert!(!gate.permits(&path("gmail.messages.send")));
    assert!(gate.permits(&path("gmail.labels.list")));
    assert!(gate.permits(&path("gmail.drafts.create")));
}

#[test]
fn flag_and_env_lists_merge_as_one_comma_list() {
    // resolve_context joins the flag value and env value with a comma,
    // so a single Gate sees both sources.
    let gate = Gate::new("gmail,calendar", "gmail.messages.delete,calendar.events.delete");
    assert!(gate.permits(&path("gmail.messages.list")));
    assert!(!gate.permits(&path("gmail.messages.delete")));
    assert!(!gate.permits(&path("calendar.events.delete")));
    assert!(!gate.permits(&path("drive.files.list")));
}

#[test]
fn denied_error_names_path_and_entry() {
    let gate = Gate::new("", "drive, gmail.messages");
    match gate.check(&path("gmail.messages.list")) {
        Err(GateError::Denied { path, entry }) => {
            assert_eq!(path, "gmail.messages.list");
            assert_eq!(entry, "gmail.messages");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn not_allowed_error_names_the_path() {
    let gate = Gate::new("gmail", "");
    match gate.check(&path("drive.files.list")) {
        Err(GateError::NotAllowed { path }) => assert_eq!(path, "drive.files.list"),
        other => panic!("unexpected: {other:?}"),
    }
}

// =============================================================================
// Properties
// =============================================================================

/// Path segments: lowercase words like the real catalog uses.
fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z-]{0,8}".prop_map(|s| s.trim_end_matches('-').to_string())
}

fn command_path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..4).prop_map(|segments| segments.join("."))
}

proptest! {
    /// Denying any prefix of a path blocks the path itself.
    #[test]
    fn denying_a_prefix_blocks_the_path(raw in command_path(), cut in 0usize..3) {
        let full = CommandPath::new(&raw);
        let prefixes: Vec<String> = full.prefixes().map(str::to_string).collect();
        let entry = &prefixes[cut.min(prefixes.len() - 1)];

        let gate = Gate::new("", entry);
        prop_assert!(gate.check(&full).is_err());
    }

    /// A deny entry for a different top-level group never blocks the path.
    #[test]
    fn deny_does_not_leak_across_services(raw in command_path()) {
        let full = CommandPath::new(&raw);
        let gate = Gate::new("", &format!("zzz-not-{}", full.top_level()));
        prop_assert!(gate.check(&full).is_ok());
    }

    /// Case differences in the list spelling never change the outcome.
    #[test]
    fn gate_is_case_insensitive(raw in command_path()) {
        let full = CommandPath::new(&raw);
        let upper = raw.to_ascii_uppercase();

        let deny_lower = Gate::new("", &raw).check(&full).is_err();
        let deny_upper = Gate::new("", &upper).check(&full).is_err();
        prop_assert_eq!(deny_lower, deny_upper);

        let allow_lower = Gate::new(&raw, "").check(&full).is_ok();
        let allow_upper = Gate::new(&upper, "").check(&full).is_ok();
        prop_assert_eq!(allow_lower, allow_upper);
    }

    /// Allowing the path's own top level always admits it (absent denies).
    #[test]
    fn allowing_the_top_level_admits_the_path(raw in command_path()) {
        let full = CommandPath::new(&raw);
        let gate = Gate::new(full.top_level(), "");
        prop_assert!(gate.check(&full).is_ok());
    }

    /// An unrestricted gate admits every path.
    #[test]
    fn unrestricted_admits_everything(raw in command_path()) {
        prop_assert!(Gate::unrestricted().check(&CommandPath::new(&raw)).is_ok());
    }
}
