use std::path::{Path, PathBuf};

use crate::config;
use crate::discover;
use crate::error::Lookup;
use crate::object;
use crate::packed;
use crate::paths;
use crate::refs;
use crate::types::{DecodedCommit, HeadPointer, OpenOptions, RefKind, RepositoryMetadata, ResolvedRef};

/// Read-only view of one repository's metadata directory.
///
/// The metadata directory is located once, in [`GitInfo::open`]. Every query
/// reads the files again, so results track the repository as it changes.
/// Queries come in two forms: `lookup_*` returns a [`Lookup`] that keeps
/// failures inspectable, and the plain form swallows them into an absent
/// value.
#[derive(Debug)]
pub struct GitInfo {
    discovery: Lookup<PathBuf>,
}

impl GitInfo {
    /// Locate the repository for `options`.
    ///
    /// Never fails. A missing repository, or a `.git` pointer file that
    /// cannot be read, leaves the instance without a metadata directory and
    /// every query answers with an absent value; [`GitInfo::discovery`] tells
    /// the two apart.
    pub fn open(options: OpenOptions) -> Self {
        let discovery = discover::find_git_dir(options.start_dir.as_deref(), &options.git_dir_name);
        if let Lookup::Failed(ref e) = discovery {
            log::warn!("cannot resolve {}: {}", options.git_dir_name, e);
        }
        GitInfo { discovery }
    }

    /// Locate the repository above the current working directory.
    pub fn discover() -> Self {
        Self::open(OpenOptions::default())
    }

    /// Outcome of locating the metadata directory.
    pub fn discovery(&self) -> &Lookup<PathBuf> {
        &self.discovery
    }

    /// The resolved metadata directory, if one was found.
    pub fn git_dir(&self) -> Option<&Path> {
        match &self.discovery {
            Lookup::Found(p) => Some(p),
            _ => None,
        }
    }

    /// Parent of the metadata directory; empty when there is none.
    pub fn root_dir(&self) -> PathBuf {
        self.git_dir()
            .map(paths::parent_or_self)
            .unwrap_or_default()
    }

    fn with_git_dir<T>(&self, f: impl FnOnce(&Path) -> Lookup<T>) -> Lookup<T> {
        match self.git_dir() {
            Some(dir) => f(dir),
            None => Lookup::NotFound,
        }
    }

    // -- HEAD / refs --------------------------------------------------------

    /// Parsed HEAD pointer, keeping why it may be missing.
    pub fn lookup_head(&self) -> Lookup<HeadPointer> {
        self.with_git_dir(refs::head)
    }

    /// Parsed HEAD pointer.
    pub fn head(&self) -> Option<HeadPointer> {
        swallow("HEAD", self.lookup_head())
    }

    /// Current branch, keeping why it may be missing.
    pub fn lookup_branch(&self) -> Lookup<String> {
        self.with_git_dir(refs::branch)
    }

    /// Current branch name; `None` when HEAD is detached.
    pub fn branch(&self) -> Option<String> {
        swallow("branch", self.lookup_branch())
    }

    /// Commit hash HEAD resolves to, keeping why it may be missing.
    pub fn lookup_sha(&self) -> Lookup<String> {
        self.with_git_dir(refs::sha)
    }

    /// Commit hash HEAD resolves to; empty when unresolvable.
    pub fn sha(&self) -> String {
        swallow("sha", self.lookup_sha()).unwrap_or_default()
    }

    /// Entries in `packed-refs` answering `ref_path`, first match first.
    pub fn packed_refs(&self, ref_path: &str, kind: RefKind) -> Vec<ResolvedRef> {
        let lookup = self.with_git_dir(|dir| {
            Lookup::from(packed::find_packed_refs(dir, ref_path, kind).map(Some))
        });
        swallow("packed-refs", lookup).unwrap_or_default()
    }

    // -- objects ------------------------------------------------------------

    /// Decoded HEAD commit, keeping why it may be missing.
    pub fn lookup_commit(&self) -> Lookup<DecodedCommit> {
        match self.lookup_sha() {
            Lookup::Found(sha) => self.with_git_dir(|dir| object::commit(dir, &sha)),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::Failed(e) => Lookup::Failed(e),
        }
    }

    /// Decoded HEAD commit; `None` when the object is not available.
    pub fn commit(&self) -> Option<DecodedCommit> {
        swallow("commit", self.lookup_commit())
    }

    // -- config -------------------------------------------------------------

    /// URL of the `origin` remote, keeping why it may be missing.
    pub fn lookup_repository(&self) -> Lookup<String> {
        self.with_git_dir(config::origin_url)
    }

    /// URL of the `origin` remote.
    pub fn repository(&self) -> Option<String> {
        swallow("repository", self.lookup_repository())
    }

    // -- aggregate ----------------------------------------------------------

    /// Assemble every field. Never fails; unavailable fields are empty.
    pub fn metadata(&self) -> RepositoryMetadata {
        RepositoryMetadata {
            branch: self.branch(),
            repository: self.repository(),
            sha: self.sha(),
            commit: self.commit(),
            root_dir: self.root_dir(),
        }
    }
}

/// Collapse a lookup to an option, logging failures.
fn swallow<T>(what: &str, lookup: Lookup<T>) -> Option<T> {
    match lookup {
        Lookup::Found(v) => Some(v),
        Lookup::NotFound => None,
        Lookup::Failed(e) => {
            log::warn!("{} unavailable: {}", what, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_repository_yields_empty_record() {
        let dir = tempfile::tempdir().unwrap();
        let info = GitInfo::open(
            OpenOptions::new()
                .start_dir(dir.path())
                .git_dir_name("no-such-metadata-dir-name"),
        );
        assert!(info.discovery().is_not_found());
        assert_eq!(info.metadata(), RepositoryMetadata::default());
    }

    #[test]
    fn malformed_pointer_degrades() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".git"), "nonsense").unwrap();
        let info = GitInfo::open(OpenOptions::new().start_dir(dir.path()));
        assert!(info.discovery().is_failed());
        assert_eq!(info.git_dir(), None);
        assert_eq!(info.metadata(), RepositoryMetadata::default());
    }
}
