//! engine::exit
//!
//! Machine-readable exit codes.
//!
//! # Design
//!
//! Scripts and agents branch on exit codes rather than parsing stderr, so
//! the table below is stable: codes are never renumbered, only appended.
//! `gog agent exit-codes` prints the table as JSON regardless of output
//! mode so the listing itself stays byte-stable.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::ui::prompts::PromptError;
use crate::workspace::ApiError;

use super::gate::GateError;

/// Process exit codes, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Ok = 0,
    /// Generic failure.
    Error = 1,
    /// Invalid arguments, detected before any remote call.
    Usage = 2,
    /// The command succeeded but the listing was empty.
    EmptyResults = 3,
    /// No credentials available.
    AuthRequired = 4,
    /// The remote resource does not exist.
    NotFound = 5,
    /// The credential lacks permission.
    PermissionDenied = 6,
    /// The API rate limit was hit.
    RateLimited = 7,
    /// A transient failure; the caller may retry.
    Retryable = 8,
    /// Local configuration problem (including gated commands).
    Config = 9,
    /// The user declined a confirmation prompt.
    Cancelled = 10,
}

impl ExitCode {
    /// The numeric process exit code.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// The stable snake_case name used in JSON output.
    pub fn name(self) -> &'static str {
        match self {
            ExitCode::Ok => "ok",
            ExitCode::Error => "error",
            ExitCode::Usage => "usage",
            ExitCode::EmptyResults => "empty_results",
            ExitCode::AuthRequired => "auth_required",
            ExitCode::NotFound => "not_found",
            ExitCode::PermissionDenied => "permission_denied",
            ExitCode::RateLimited => "rate_limited",
            ExitCode::Retryable => "retryable",
            ExitCode::Config => "config",
            ExitCode::Cancelled => "cancelled",
        }
    }

    /// Every code, in numeric order.
    pub fn all() -> [ExitCode; 11] {
        [
            ExitCode::Ok,
            ExitCode::Error,
            ExitCode::Usage,
            ExitCode::EmptyResults,
            ExitCode::AuthRequired,
            ExitCode::NotFound,
            ExitCode::PermissionDenied,
            ExitCode::RateLimited,
            ExitCode::Retryable,
            ExitCode::Config,
            ExitCode::Cancelled,
        ]
    }

    /// The name→code table emitted by `agent exit-codes`.
    ///
    /// A `BTreeMap` keeps serialization order deterministic.
    pub fn table() -> BTreeMap<&'static str, i32> {
        Self::all()
            .into_iter()
            .map(|code| (code.name(), code.as_i32()))
            .collect()
    }

    /// Map a command error onto an exit code.
    ///
    /// Typed errors from the API layer, the gate, and prompts map to their
    /// dedicated codes; anything else is a generic failure.
    pub fn for_error(err: &anyhow::Error) -> ExitCode {
        if let Some(api) = err.downcast_ref::<ApiError>() {
            return match api {
                ApiError::AuthRequired => ExitCode::AuthRequired,
                ApiError::AuthFailed(_) => ExitCode::AuthRequired,
                ApiError::NotFound(_) => ExitCode::NotFound,
                ApiError::PermissionDenied(_) => ExitCode::PermissionDenied,
                ApiError::RateLimited => ExitCode::RateLimited,
                ApiError::Retryable { .. } => ExitCode::Retryable,
                ApiError::Api { .. } | ApiError::Network(_) => ExitCode::Error,
            };
        }
        if err.downcast_ref::<GateError>().is_some() {
            return ExitCode::Config;
        }
        if let Some(prompt) = err.downcast_ref::<PromptError>() {
            return match prompt {
                PromptError::Declined | PromptError::NotInteractive => ExitCode::Cancelled,
                PromptError::Io(_) => ExitCode::Error,
            };
        }
        if err.downcast_ref::<UsageError>().is_some() {
            return ExitCode::Usage;
        }
        if err.downcast_ref::<ConfigError>().is_some() {
            return ExitCode::Config;
        }
        if err.downcast_ref::<crate::store::StoreError>().is_some() {
            return ExitCode::Config;
        }
        ExitCode::Error
    }
}

/// A usage mistake caught before any remote call.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UsageError(pub String);

/// A local configuration problem.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ConfigError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ExitCode::Ok.as_i32(), 0);
        assert_eq!(ExitCode::Error.as_i32(), 1);
        assert_eq!(ExitCode::Usage.as_i32(), 2);
        assert_eq!(ExitCode::EmptyResults.as_i32(), 3);
        assert_eq!(ExitCode::AuthRequired.as_i32(), 4);
        assert_eq!(ExitCode::NotFound.as_i32(), 5);
        assert_eq!(ExitCode::PermissionDenied.as_i32(), 6);
        assert_eq!(ExitCode::RateLimited.as_i32(), 7);
        assert_eq!(ExitCode::Retryable.as_i32(), 8);
        assert_eq!(ExitCode::Config.as_i32(), 9);
        assert_eq!(ExitCode::Cancelled.as_i32(), 10);
    }

    #[test]
    fn table_contains_every_code() {
        let table = ExitCode::table();
        assert_eq!(table.len(), ExitCode::all().len());
        assert_eq!(table["empty_results"], 3);
        assert_eq!(table["cancelled"], 10);
    }

    #[test]
    fn api_errors_map_to_specific_codes() {
        let err = anyhow::Error::new(ApiError::NotFound("message abc".into()));
        assert_eq!(ExitCode::for_error(&err), ExitCode::NotFound);

        let err = anyhow::Error::new(ApiError::RateLimited);
        assert_eq!(ExitCode::for_error(&err), ExitCode::RateLimited);

        let err = anyhow::Error::new(ApiError::Retryable {
            status: 503,
            message: "unavailable".into(),
        });
        assert_eq!(ExitCode::for_error(&err), ExitCode::Retryable);
    }

    #[test]
    fn gate_errors_map_to_config() {
        let err = anyhow::Error::new(GateError::NotAllowed {
            path: "gmail.messages.list".into(),
        });
        assert_eq!(ExitCode::for_error(&err), ExitCode::Config);
    }

    #[test]
    fn declined_prompt_maps_to_cancelled() {
        let err = anyhow::Error::new(PromptError::Declined);
        assert_eq!(ExitCode::for_error(&err), ExitCode::Cancelled);
    }

    #[test]
    fn usage_error_maps_to_usage() {
        let err = anyhow::Error::new(UsageError("missing --to".into()));
        assert_eq!(ExitCode::for_error(&err), ExitCode::Usage);
    }

    #[test]
    fn unknown_errors_are_generic() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(ExitCode::for_error(&err), ExitCode::Error);
    }
}
