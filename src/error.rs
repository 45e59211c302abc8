use std::path::PathBuf;

/// All errors produced while reading repository metadata.
///
/// None of these ever reach the caller of [`crate::GitInfo::metadata`];
/// they surface only through the [`Lookup`] returned by the `lookup_*`
/// queries so a failure can be told apart from a value that is simply
/// not there.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed: {0}")]
    Malformed(String),

    #[error("config error: {0}")]
    Config(#[from] git2::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

impl Error {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io(std::io::Error::new(
            err.kind(),
            format!("{}: {}", path.into().display(), err),
        ))
    }

    /// True for an I/O error whose kind is `NotFound`, e.g. a file removed
    /// between the existence check and the read.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Outcome of a single metadata query.
///
/// `NotFound` means the repository simply does not hold the value (no
/// HEAD, no packed-refs entry, no object file). `Failed` means something
/// was there but could not be read or parsed.
#[derive(Debug)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    Failed(Error),
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The found value, discarding why it might be missing.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(v) => Some(v),
            Self::NotFound | Self::Failed(_) => None,
        }
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl<T> From<Result<Option<T>>> for Lookup<T> {
    fn from(result: Result<Option<T>>) -> Self {
        match result {
            Ok(Some(v)) => Self::Found(v),
            Ok(None) => Self::NotFound,
            Err(e) if e.is_not_found() => Self::NotFound,
            Err(e) => Self::Failed(e),
        }
    }
}
