//! `packed-refs` parsing and lookup.
//!
//! The file holds one `<hash> <ref path>` per line. An annotated tag line
//! may be followed by a peel line `^<hash>` naming the commit the tag
//! points at. Lines starting with `#` are comments.
//!
//! ```text
//! # pack-refs with: peeled fully-peeled sorted
//! d670460b4b4aece5915caf5c68d12f560a9fe3e4 refs/heads/develop
//! 6b1b2b3f0c8d5c0d6b0c3e2fa8f1a3f0e2d1c4b5 refs/tags/v1.0.0
//! ^5359aabd3872d9ffd160712e9615c5592dfe6745
//! ```

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{PackedRefEntry, RefKind, RefSource, ResolvedRef};

/// Scanner state while pairing peel lines with the ref line before them.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    /// No ref line is waiting for a peel.
    Scanning,
    /// The previous line was a ref line; a peel line here belongs to it.
    SawCandidateTagLine { name: String },
    /// The previous ref line already received its peel.
    ConsumedAsPeelTarget,
}

/// Parse `packed-refs` text into entries, in file order.
///
/// Each peel line becomes its own entry carrying the ref path of the line
/// before it. A peel line with no ref line directly before it is dropped.
pub fn parse_packed_refs(content: &str) -> Vec<PackedRefEntry> {
    let mut entries = Vec::new();
    let mut state = ScanState::Scanning;

    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(peeled) = line.strip_prefix('^') {
            state = match state {
                ScanState::SawCandidateTagLine { name } => {
                    entries.push(PackedRefEntry {
                        hash: peeled.trim().to_string(),
                        name,
                        is_peel: true,
                    });
                    ScanState::ConsumedAsPeelTarget
                }
                other => {
                    log::debug!("ignoring stray peel line: {}", line);
                    other
                }
            };
            continue;
        }

        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some(hash), Some(name)) => {
                entries.push(PackedRefEntry {
                    hash: hash.to_string(),
                    name: name.to_string(),
                    is_peel: false,
                });
                state = ScanState::SawCandidateTagLine {
                    name: name.to_string(),
                };
            }
            _ => {
                log::debug!("ignoring malformed packed-refs line: {}", line);
                state = ScanState::Scanning;
            }
        }
    }

    entries
}

/// Whether `entry` answers a `kind` lookup for `ref_path`.
///
/// The ref path is matched as a substring. For [`RefKind::Commit`] both
/// branch entries and peel entries are eligible, so an annotated tag
/// resolves to its peeled commit rather than to the tag object. For
/// [`RefKind::Tag`] only the tag line itself is eligible.
fn matches(entry: &PackedRefEntry, ref_path: &str, kind: RefKind) -> bool {
    if !entry.name.contains(ref_path) {
        return false;
    }
    match kind {
        RefKind::Commit => entry.is_peel || entry.name.contains(kind.prefix()),
        RefKind::Tag => !entry.is_peel && entry.name.contains(kind.prefix()),
    }
}

/// Candidate hashes for `ref_path` in `packed-refs` text, first match first.
///
/// For [`RefKind::Tag`] the `name` of each result is the tag name (the part
/// after `tags/`) and the hash is the tag object's own hash.
pub fn lookup_in(content: &str, ref_path: &str, kind: RefKind) -> Vec<ResolvedRef> {
    parse_packed_refs(content)
        .into_iter()
        .filter(|entry| matches(entry, ref_path, kind))
        .map(|entry| {
            let name = match kind {
                RefKind::Commit => entry.name,
                RefKind::Tag => entry
                    .name
                    .split_once("tags/")
                    .map(|(_, tag)| tag.to_string())
                    .unwrap_or(entry.name),
            };
            ResolvedRef {
                name,
                hash: entry.hash,
                source: RefSource::Packed,
            }
        })
        .collect()
}

/// Read `<git_dir>/packed-refs` and look up `ref_path`.
///
/// Returns an empty vec when the file does not exist.
pub fn find_packed_refs(git_dir: &Path, ref_path: &str, kind: RefKind) -> Result<Vec<ResolvedRef>> {
    let path = git_dir.join("packed-refs");
    if !path.exists() {
        return Ok(vec![]);
    }
    let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    Ok(lookup_in(&content, ref_path, kind))
}

/// First commit entry `packed-refs` holds for `ref_path`.
pub fn find_packed_commit(git_dir: &Path, ref_path: &str) -> Result<Option<ResolvedRef>> {
    let first = find_packed_refs(git_dir, ref_path, RefKind::Commit)?
        .into_iter()
        .next();
    if first.is_some() {
        log::debug!("{} resolved from packed-refs", ref_path);
    }
    Ok(first)
}
