//! auth
//!
//! Credential resolution.
//!
//! # Architecture
//!
//! The only way a command obtains a credential is [`bearer_token`], which
//! reads the `GOG_TOKEN` environment variable. Service-account key files
//! are installed and inspected via the store layer (`gog auth key ...`)
//! but tokens are never minted here; an external broker is expected to
//! exchange the key for an access token and export `GOG_TOKEN`.
//!
//! # Security
//!
//! Tokens must never appear in logs, JSON output, or error messages.
//! Nothing in this module formats a token into a string.

use crate::engine::Context;
use crate::workspace::ApiError;

/// Environment variable holding the OAuth bearer token.
pub const TOKEN_ENV: &str = "GOG_TOKEN";

/// Resolve the bearer token for the context's account.
///
/// Missing or empty tokens map to [`ApiError::AuthRequired`] so the
/// process exits with the auth-required code.
pub fn bearer_token(_ctx: &Context) -> Result<String, ApiError> {
    token_from(std::env::var(TOKEN_ENV).ok())
}

fn token_from(value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(ApiError::AuthRequired),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_is_auth_required() {
        assert!(matches!(token_from(None), Err(ApiError::AuthRequired)));
    }

    #[test]
    fn blank_token_is_auth_required() {
        assert!(matches!(
            token_from(Some("  ".into())),
            Err(ApiError::AuthRequired)
        ));
    }

    #[test]
    fn present_token_passes_through() {
        assert_eq!(token_from(Some("ya29.abc".into())).unwrap(), "ya29.abc");
    }
}
