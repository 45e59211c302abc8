//! HEAD and loose ref reading.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Lookup, Result};
use crate::packed;
use crate::paths;
use crate::types::{HeadPointer, RefSource, ResolvedRef};

static HEAD_BRANCH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"refs/heads/(\S+)$").expect("valid branch pattern"));

/// Read the raw contents of `<git_dir>/HEAD`. `Ok(None)` if absent.
pub fn read_head(git_dir: &Path) -> Result<Option<String>> {
    read_optional(&git_dir.join("HEAD"))
}

/// Parse raw HEAD contents.
///
/// A second space-separated token (`ref: refs/heads/main`) makes HEAD
/// symbolic. Otherwise HEAD holds a hash: everything after the second `/`
/// is taken if present, else the last `/` segment, so legacy slash-delimited
/// forms still yield the hash. Returns `None` when nothing usable remains.
pub fn parse_head(raw: &str) -> Option<HeadPointer> {
    if let Some(ref_path) = raw.split(' ').nth(1).map(str::trim) {
        if ref_path.is_empty() {
            return None;
        }
        return Some(HeadPointer::Symbolic(ref_path.to_string()));
    }

    let segments: Vec<&str> = raw.split('/').collect();
    let mut sha = segments.iter().skip(2).copied().collect::<Vec<_>>().join("/");
    if sha.trim().is_empty() {
        sha = segments.last().copied().unwrap_or_default().to_string();
    }
    let sha = sha.trim();
    if sha.is_empty() {
        None
    } else {
        Some(HeadPointer::Detached(sha.to_string()))
    }
}

/// Branch name from HEAD contents, including any `/` inside the name.
/// `None` for a detached HEAD.
pub fn branch_from_head(raw: &str) -> Option<String> {
    HEAD_BRANCH
        .captures(raw.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Read a loose ref file `<git_dir>/<ref_path>`. `Ok(None)` if absent.
///
/// A ref path that would leave `git_dir` (absolute, or climbing with `..`)
/// is treated as absent.
pub fn read_loose_ref(git_dir: &Path, ref_path: &str) -> Result<Option<String>> {
    if !paths::is_contained(Path::new(ref_path)) {
        log::warn!("ignoring ref path outside the metadata directory: {}", ref_path);
        return Ok(None);
    }
    read_optional(&git_dir.join(ref_path))
}

/// Resolve `ref_path` to a commit hash, preferring the loose ref file over
/// `packed-refs`.
pub fn resolve_ref(git_dir: &Path, ref_path: &str) -> Result<Option<ResolvedRef>> {
    if let Some(hash) = read_loose_ref(git_dir, ref_path)? {
        log::debug!("{} resolved from loose ref", ref_path);
        return Ok(Some(ResolvedRef {
            name: ref_path.to_string(),
            hash,
            source: RefSource::Loose,
        }));
    }

    packed::find_packed_commit(git_dir, ref_path)
}

/// The current branch. [`Lookup::NotFound`] when HEAD is detached or missing.
pub fn branch(git_dir: &Path) -> Lookup<String> {
    read_head(git_dir)
        .map(|head| head.and_then(|raw| branch_from_head(&raw)))
        .into()
}

/// The parsed HEAD pointer.
pub fn head(git_dir: &Path) -> Lookup<HeadPointer> {
    read_head(git_dir)
        .map(|head| head.and_then(|raw| parse_head(&raw)))
        .into()
}

/// The commit hash HEAD currently resolves to.
pub fn sha(git_dir: &Path) -> Lookup<String> {
    try_sha(git_dir).into()
}

fn try_sha(git_dir: &Path) -> Result<Option<String>> {
    let raw = match read_head(git_dir)? {
        Some(raw) => raw,
        None => return Ok(None),
    };

    match parse_head(&raw) {
        Some(HeadPointer::Symbolic(ref_path)) => {
            Ok(resolve_ref(git_dir, &ref_path)?.map(|r| r.hash).filter(|h| !h.is_empty()))
        }
        Some(HeadPointer::Detached(hash)) => Ok(Some(hash)),
        None => Ok(None),
    }
}

/// Read a file's trimmed contents, treating absence as `Ok(None)`.
fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(Some(content.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA: &str = "9dac893d5a83c02344d91e79dad8904889aeacb1";

    #[test]
    fn parse_symbolic() {
        assert_eq!(
            parse_head("ref: refs/heads/main\n"),
            Some(HeadPointer::Symbolic("refs/heads/main".into())),
        );
    }

    #[test]
    fn parse_detached() {
        assert_eq!(
            parse_head(&format!("{}\n", SHA)),
            Some(HeadPointer::Detached(SHA.into())),
        );
    }

    #[test]
    fn parse_legacy_slash_form() {
        assert_eq!(
            parse_head(&format!("refs/heads/{}\n", SHA)),
            Some(HeadPointer::Detached(SHA.into())),
        );
    }

    #[test]
    fn parse_trailing_slash_falls_back_to_last_segment() {
        // nothing after the second `/` survives trimming
        assert_eq!(parse_head("a/b/ \n"), None);
        assert_eq!(
            parse_head(&format!("x/{}\n", SHA)),
            Some(HeadPointer::Detached(SHA.into())),
        );
    }

    #[test]
    fn parse_empty() {
        assert_eq!(parse_head(""), None);
        assert_eq!(parse_head("ref: \n"), None);
    }

    #[test]
    fn branch_with_slashes() {
        assert_eq!(
            branch_from_head("ref: refs/heads/feature/branch/with/slashes\n").as_deref(),
            Some("feature/branch/with/slashes"),
        );
    }

    #[test]
    fn branch_detached_is_none() {
        assert_eq!(branch_from_head(SHA), None);
    }

    #[test]
    fn loose_ref_wins_over_packed() {
        let dir = tempfile::tempdir().unwrap();
        let git = dir.path();
        std::fs::create_dir_all(git.join("refs/heads")).unwrap();
        std::fs::write(git.join("refs/heads/main"), format!("{}\n", SHA)).unwrap();
        std::fs::write(
            git.join("packed-refs"),
            "1111111111111111111111111111111111111111 refs/heads/main\n",
        )
        .unwrap();

        let resolved = resolve_ref(git, "refs/heads/main").unwrap().unwrap();
        assert_eq!(resolved.hash, SHA);
        assert_eq!(resolved.source, RefSource::Loose);
    }

    #[test]
    fn absolute_ref_path_is_not_read() {
        let dir = tempfile::tempdir().unwrap();
        let git = dir.path().join(".git");
        std::fs::create_dir_all(&git).unwrap();
        let outside = dir.path().join("outside-ref");
        std::fs::write(&outside, format!("{}\n", SHA)).unwrap();
        std::fs::write(git.join("HEAD"), format!("ref: {}\n", outside.display())).unwrap();

        assert_eq!(read_loose_ref(&git, &outside.display().to_string()).unwrap(), None);
        assert!(sha(&git).is_not_found());
    }

    #[test]
    fn dotdot_ref_path_is_not_read() {
        let dir = tempfile::tempdir().unwrap();
        let git = dir.path().join(".git");
        std::fs::create_dir_all(&git).unwrap();
        std::fs::write(dir.path().join("outside-ref"), format!("{}\n", SHA)).unwrap();
        std::fs::write(git.join("HEAD"), "ref: ../outside-ref\n").unwrap();

        assert!(sha(&git).is_not_found());
    }

    #[test]
    fn missing_head_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(branch(dir.path()).is_not_found());
        assert!(sha(dir.path()).is_not_found());
        assert!(head(dir.path()).is_not_found());
    }
}
