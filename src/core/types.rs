//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Account`] - Validated account identifier (names a config directory)
//! - [`CommandPath`] - Normalized dot-separated command path
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use gogcli::core::types::{Account, CommandPath};
//!
//! let account = Account::new("work").unwrap();
//! assert_eq!(account.as_str(), "work");
//!
//! let path = CommandPath::new("Gmail.Messages.List");
//! assert_eq!(path.as_str(), "gmail.messages.list");
//!
//! assert!(Account::new("../escape").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid account name: {0}")]
    InvalidAccount(String),
}

/// A validated account identifier.
///
/// Account names select a per-account config directory under `~/.gogcli`,
/// so they must be safe as a single path component:
/// - Cannot be empty
/// - Cannot start with `.` or `-`
/// - Only ASCII alphanumerics, `.`, `_`, `-`, and `@`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Account(String);

impl Account {
    /// Create a new validated account name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidAccount` if the name is empty or contains
    /// characters that are unsafe in a path component.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// The default account used when no `--account` flag or env override is set.
    pub fn default_account() -> Self {
        Self("default".to_string())
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidAccount(
                "account name cannot be empty".into(),
            ));
        }
        if name.starts_with('.') || name.starts_with('-') {
            return Err(TypeError::InvalidAccount(
                "account name cannot start with '.' or '-'".into(),
            ));
        }
        for c in name.chars() {
            if !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '@')) {
                return Err(TypeError::InvalidAccount(format!(
                    "account name cannot contain '{c}'"
                )));
            }
        }
        Ok(())
    }

    /// Get the account name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Account {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Account> for String {
    fn from(account: Account) -> Self {
        account.0
    }
}

impl AsRef<str> for Account {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A normalized command path such as `gmail.messages.list`.
///
/// Paths are lowercased at construction so gate matching is
/// case-insensitive by representation rather than by comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandPath(String);

impl CommandPath {
    /// Create a normalized command path.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(path.as_ref().trim().to_ascii_lowercase())
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The top-level segment (service group), e.g. `gmail`.
    pub fn top_level(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// Iterate every prefix from most-specific to least-specific.
    ///
    /// For `gmail.messages.list` this yields `gmail.messages.list`,
    /// `gmail.messages`, then `gmail`.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        let path = self.0.as_str();
        let mut ends: Vec<usize> = path
            .match_indices('.')
            .map(|(i, _)| i)
            .chain(std::iter::once(path.len()))
            .collect();
        ends.reverse();
        ends.into_iter().map(move |end| &path[..end])
    }
}

impl std::fmt::Display for CommandPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_valid_names() {
        assert!(Account::new("work").is_ok());
        assert!(Account::new("me@example.com").is_ok());
        assert!(Account::new("team_2").is_ok());
    }

    #[test]
    fn account_invalid_names() {
        assert!(Account::new("").is_err());
        assert!(Account::new(".hidden").is_err());
        assert!(Account::new("-flag").is_err());
        assert!(Account::new("a/b").is_err());
        assert!(Account::new("a b").is_err());
    }

    #[test]
    fn account_default() {
        assert_eq!(Account::default_account().as_str(), "default");
    }

    #[test]
    fn command_path_normalizes_case() {
        let path = CommandPath::new(" Gmail.Messages.List ");
        assert_eq!(path.as_str(), "gmail.messages.list");
        assert_eq!(path.top_level(), "gmail");
    }

    #[test]
    fn command_path_prefixes_most_specific_first() {
        let path = CommandPath::new("gmail.messages.list");
        let prefixes: Vec<&str> = path.prefixes().collect();
        assert_eq!(
            prefixes,
            vec!["gmail.messages.list", "gmail.messages", "gmail"]
        );
    }

    #[test]
    fn command_path_single_segment() {
        let path = CommandPath::new("time");
        let prefixes: Vec<&str> = path.prefixes().collect();
        assert_eq!(prefixes, vec!["time"]);
    }
}
