use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Lexically normalize a path: drop `.` segments and let `..` pop the
/// previous segment. `..` never climbs above the root.
///
/// No filesystem access and no symlink resolution, so `a/link/..` becomes
/// `a` even if `link` points elsewhere.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // only pop real segments; keep leading `..` of a relative path
                let poppable = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if poppable {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(seg) => out.push(seg),
        }
    }
    out
}

/// Resolve `path` against `base` (unless already absolute) and normalize.
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Make `path` absolute against the current working directory.
///
/// # Errors
/// Returns [`Error::Io`] if the working directory cannot be determined.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    let cwd = std::env::current_dir().map_err(|e| Error::io(path, e))?;
    Ok(resolve(&cwd, path))
}

/// True when joining `rel` onto a directory stays inside it: only plain
/// segments and `.`, no root, drive prefix or `..`.
pub fn is_contained(rel: &Path) -> bool {
    rel.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Parent of `path`, or `path` itself at the filesystem root.
pub fn parent_or_self(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}
