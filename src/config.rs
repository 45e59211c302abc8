use std::path::Path;

use crate::error::{Lookup, Result};

/// Key holding the URL of the `[remote "origin"]` section.
pub const ORIGIN_URL_KEY: &str = "remote.origin.url";

/// Read `<git_dir>/config` and return the origin remote URL.
///
/// Only this one file is consulted; global and system configuration are
/// ignored. `Ok(None)` when the file or the key is absent.
///
/// # Errors
/// Returns [`crate::Error::Config`] if the file cannot be parsed.
pub fn read_origin_url(git_dir: &Path) -> Result<Option<String>> {
    let path = git_dir.join("config");
    if !path.exists() {
        return Ok(None);
    }

    let config = git2::Config::open(&path)?;
    match config.get_string(ORIGIN_URL_KEY) {
        Ok(url) => Ok(Some(url)),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The origin remote URL as a [`Lookup`].
pub fn origin_url(git_dir: &Path) -> Lookup<String> {
    read_origin_url(git_dir).into()
}
