//! Repository provenance read straight from disk.
//!
//! `git_repo_info` reports the current branch, commit hash, `origin` URL and
//! HEAD commit details of a checkout by reading its metadata directory
//! directly: no `git` binary, no libgit2 repository handle. It is meant for
//! build tooling that stamps artifacts with where they came from.
//!
//! # Key types
//!
//! - [`GitInfo`] locates the metadata directory (following `gitdir:`
//!   pointers of linked worktrees and submodules) and answers queries.
//! - [`RepositoryMetadata`] is the aggregate record returned by
//!   [`GitInfo::metadata`].
//! - [`Lookup`] keeps "not there" apart from "could not read it" for
//!   callers that care.
//!
//! # Quick example
//!
//! ```rust,no_run
//! use git_repo_info::{GitInfo, OpenOptions};
//!
//! let info = GitInfo::open(OpenOptions::new().start_dir("."));
//! let meta = info.metadata();
//! println!("{} @ {}", meta.branch.as_deref().unwrap_or("(detached)"), meta.sha);
//! ```

pub mod config;
pub mod discover;
pub mod error;
pub mod info;
pub mod object;
pub mod packed;
pub mod paths;
pub mod refs;
pub mod types;

// Re-export primary public types at crate root.
pub use error::{Error, Lookup, Result};
pub use info::GitInfo;
pub use types::*;
