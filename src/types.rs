use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Conventional name of the repository metadata directory.
pub const DEFAULT_GIT_DIR_NAME: &str = ".git";

// ---------------------------------------------------------------------------
// OpenOptions
// ---------------------------------------------------------------------------

/// Options for locating a repository.
#[derive(Debug, Clone)]
pub struct OpenOptions {
    /// Directory to start the upward search from. `None` means the
    /// process's current working directory.
    pub start_dir: Option<PathBuf>,
    /// Name of the metadata directory (or pointer file) to look for.
    pub git_dir_name: String,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            start_dir: None,
            git_dir_name: DEFAULT_GIT_DIR_NAME.to_string(),
        }
    }
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    pub fn git_dir_name(mut self, name: impl Into<String>) -> Self {
        self.git_dir_name = name.into();
        self
    }
}

// ---------------------------------------------------------------------------
// HeadPointer
// ---------------------------------------------------------------------------

/// Parsed contents of the `HEAD` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadPointer {
    /// `ref: refs/heads/<name>`; holds the ref path (`refs/heads/<name>`).
    Symbolic(String),
    /// HEAD holds a commit hash directly.
    Detached(String),
}

impl HeadPointer {
    /// The ref path for a symbolic HEAD.
    pub fn ref_path(&self) -> Option<&str> {
        match self {
            Self::Symbolic(r) => Some(r),
            Self::Detached(_) => None,
        }
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, Self::Detached(_))
    }
}

// ---------------------------------------------------------------------------
// RefKind
// ---------------------------------------------------------------------------

/// Which kind of packed ref a lookup is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    /// Resolve to a commit hash: branch entries and peeled tag entries.
    Commit,
    /// Resolve to the tag object itself.
    Tag,
}

impl RefKind {
    /// The ref namespace entries of this kind live under.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Commit => "refs/heads",
            Self::Tag => "refs/tags",
        }
    }
}

// ---------------------------------------------------------------------------
// PackedRefEntry / ResolvedRef
// ---------------------------------------------------------------------------

/// One logical line of a `packed-refs` file.
///
/// A peel line (`^<hash>`) has no ref path of its own; it is reported with
/// the ref path of the tag line it follows and `is_peel` set. Its `hash`
/// is the commit that tag points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRefEntry {
    pub hash: String,
    pub name: String,
    pub is_peel: bool,
}

/// Source a ref was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefSource {
    Loose,
    Packed,
}

/// A ref name paired with the hash it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRef {
    pub name: String,
    pub hash: String,
    pub source: RefSource,
}

// ---------------------------------------------------------------------------
// DecodedCommit
// ---------------------------------------------------------------------------

/// Fields recovered from a stored commit object.
///
/// Either field may be absent when the object does not contain a line
/// the decoder recognises.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DecodedCommit {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub committer: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub commit_message: Option<String>,
}

// ---------------------------------------------------------------------------
// RepositoryMetadata
// ---------------------------------------------------------------------------

/// Everything [`crate::GitInfo::metadata`] reports about a checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RepositoryMetadata {
    /// Current branch; `None` when HEAD is detached.
    pub branch: Option<String>,
    /// `remote "origin"` URL; `None` when no origin is configured.
    pub repository: Option<String>,
    /// Current commit hash; empty when it cannot be resolved.
    pub sha: String,
    /// Decoded HEAD commit; `None` when the object is unavailable.
    pub commit: Option<DecodedCommit>,
    /// Parent of the resolved metadata directory; empty when no repository
    /// was found.
    pub root_dir: PathBuf,
}
