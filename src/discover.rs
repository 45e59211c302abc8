//! Locating the repository metadata directory.
//!
//! Walks upward from a starting directory until `<dir>/<git_dir_name>`
//! exists. A directory is used as is; a file is read as a `gitdir: <path>`
//! pointer (linked worktrees and submodules) and followed relative to the
//! directory holding it.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Lookup, Result};
use crate::paths;

static GITDIR_POINTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"gitdir: (.*)").expect("valid gitdir pattern"));

/// Find the metadata directory for `start_dir`, or for the current working
/// directory when `start_dir` is `None`.
///
/// Returns [`Lookup::NotFound`] once the walk reaches the filesystem root
/// without a match, and [`Lookup::Failed`] when a pointer file is found but
/// cannot be read or parsed.
pub fn find_git_dir(start_dir: Option<&Path>, git_dir_name: &str) -> Lookup<PathBuf> {
    try_find_git_dir(start_dir, git_dir_name).into()
}

fn try_find_git_dir(start_dir: Option<&Path>, git_dir_name: &str) -> Result<Option<PathBuf>> {
    let mut current = match start_dir {
        Some(dir) => paths::absolute(dir)?,
        None => {
            let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
            paths::normalize(&cwd)
        }
    };

    loop {
        let candidate = current.join(git_dir_name);
        if candidate.exists() {
            log::debug!("found {} at {}", git_dir_name, candidate.display());
            return resolve_git_dir(&candidate).map(Some);
        }

        let parent = paths::parent_or_self(&current);
        if parent == current {
            log::debug!("no {} above the starting directory", git_dir_name);
            return Ok(None);
        }
        current = parent;
    }
}

/// Resolve a found `.git` entry to the real metadata directory.
///
/// # Errors
/// * [`Error::Io`] if the entry cannot be stat'ed or read.
/// * [`Error::Malformed`] if a pointer file has no `gitdir:` line.
pub fn resolve_git_dir(path: &Path) -> Result<PathBuf> {
    let meta = std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
    if meta.is_dir() {
        return Ok(paths::normalize(path));
    }

    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let target = parse_gitdir_pointer(&content).ok_or_else(|| {
        Error::malformed(format!("{}: no gitdir line", path.display()))
    })?;
    let base = paths::parent_or_self(path);
    let resolved = paths::resolve(&base, Path::new(target));
    log::debug!("{} points to {}", path.display(), resolved.display());
    Ok(resolved)
}

/// Extract the target of a `gitdir: <path>` pointer.
pub fn parse_gitdir_pointer(content: &str) -> Option<&str> {
    GITDIR_POINTER
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim_end_matches('\r'))
}
