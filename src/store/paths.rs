//! store::paths
//!
//! Config directory resolution.

use std::path::PathBuf;

use crate::engine::Context;

use super::StoreError;

/// The root config directory, `~/.gogcli` unless overridden.
pub fn config_root(ctx: &Context) -> Result<PathBuf, StoreError> {
    if let Some(root) = &ctx.config_root {
        return Ok(root.clone());
    }
    let home = dirs::home_dir()
        .ok_or_else(|| StoreError::Read("cannot determine home directory".into()))?;
    Ok(home.join(".gogcli"))
}

/// The per-account directory under the config root.
pub fn account_dir(ctx: &Context) -> Result<PathBuf, StoreError> {
    Ok(config_root(ctx)?.join(ctx.account.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let ctx = Context {
            config_root: Some(PathBuf::from("/tmp/gog-test")),
            ..Context::default()
        };
        assert_eq!(config_root(&ctx).unwrap(), PathBuf::from("/tmp/gog-test"));
        assert_eq!(
            account_dir(&ctx).unwrap(),
            PathBuf::from("/tmp/gog-test/default")
        );
    }
}
