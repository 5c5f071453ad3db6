//! engine
//!
//! The command execution envelope shared by every gogcli command.
//!
//! # Architecture
//!
//! Each command handler composes the same envelope, in order:
//!
//! 1. **Gate**: the resolved command path is checked against the
//!    enable/disable lists before anything else runs
//! 2. **Dry-run**: mutating commands short-circuit before any network call
//!    or credential access
//! 3. **Confirm**: destructive commands prompt unless forced
//! 4. **Call**: a single sequential chain of API calls, optionally driven
//!    by the pagination collector
//! 5. **Format**: the result is rendered in the resolved output mode
//!
//! The envelope holds no state across invocations; everything request-scoped
//! lives in [`Context`].
//!
//! # Invariants
//!
//! - Dry-run is decided strictly before network or credential access
//! - Pagination preserves server order and halts on the first error
//! - Exit codes come only from the table in [`exit`]

pub mod dryrun;
pub mod exit;
pub mod gate;
pub mod paginate;

pub use dryrun::DryRun;
pub use exit::ExitCode;
pub use gate::{Gate, GateError};
pub use paginate::{collect_all, Page};

use std::path::PathBuf;

use crate::core::types::Account;
use crate::ui::output::OutputMode;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags and environment
/// variables that affect command behavior. Resolved once per process.
#[derive(Debug, Clone)]
pub struct Context {
    /// Account selecting the per-account config directory.
    pub account: Account,
    /// Resolved output mode.
    pub output: OutputMode,
    /// Report intended side effects without performing them.
    pub dry_run: bool,
    /// Skip confirmation prompts.
    pub force: bool,
    /// Interactive mode enabled.
    pub interactive: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Debug logging enabled.
    pub debug: bool,
    /// Command enable/disable gate.
    pub gate: Gate,
    /// Config directory override (defaults to `~/.gogcli`).
    pub config_root: Option<PathBuf>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            account: Account::default_account(),
            output: OutputMode::Human,
            dry_run: false,
            force: false,
            interactive: true,
            quiet: false,
            debug: false,
            gate: Gate::unrestricted(),
            config_root: None,
        }
    }
}
