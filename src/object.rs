//! Loose object loading and commit decoding.

use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Lookup, Result};
use crate::types::DecodedCommit;

static SIGNATURE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:author|committer)\s(.+)\s(\d+\s(?:\+|-)\d{4})$").expect("valid signature pattern")
});

/// Path of the loose object for `hash`: `objects/<2 hex>/<rest>`.
///
/// Returns `None` for a hash too short to split or not purely hex.
pub fn object_path(git_dir: &Path, hash: &str) -> Option<PathBuf> {
    if hash.len() < 3 || !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let (dir, file) = hash.split_at(2);
    Some(git_dir.join("objects").join(dir).join(file))
}

/// Inflate a zlib-wrapped DEFLATE stream.
pub fn inflate(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    ZlibDecoder::new(compressed)
        .read_to_end(&mut out)
        .map_err(|e| Error::malformed(format!("cannot inflate object: {}", e)))?;
    Ok(out)
}

/// Read and inflate the loose object for `hash`. `Ok(None)` if absent.
pub fn read_object(git_dir: &Path, hash: &str) -> Result<Option<Vec<u8>>> {
    let path = match object_path(git_dir, hash) {
        Some(p) => p,
        None => return Ok(None),
    };
    if !path.exists() {
        log::debug!("object {} not stored loose", hash);
        return Ok(None);
    }
    let compressed = std::fs::read(&path).map_err(|e| Error::io(&path, e))?;
    inflate(&compressed).map(Some)
}

/// Decode the fields of an inflated commit object.
///
/// The text is split on NUL and line breaks into non-empty sections, each
/// classified by its first space-delimited token. Header tags are skipped,
/// `committer` fills [`DecodedCommit::committer`] when the signature matches,
/// and any other section becomes the message. Later message sections replace
/// earlier ones, and a message line that starts with a header tag (`tree`,
/// `parent`, ...) is skipped like the header it resembles.
pub fn parse_commit(text: &str) -> DecodedCommit {
    let mut commit = DecodedCommit::default();

    let sections = text
        .split(|c| c == '\0' || c == '\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .filter(|s| !s.is_empty());

    for section in sections {
        let tag = section.split(' ').next().unwrap_or_default().trim();
        match tag {
            "commit" | "tag" | "object" | "type" | "author" | "parent" | "tree" => {}
            "committer" => {
                if let Some(identity) = SIGNATURE_LINE.captures(section).and_then(|c| c.get(1)) {
                    commit.committer = Some(identity.as_str().to_string());
                }
            }
            _ => commit.commit_message = Some(section.to_string()),
        }
    }

    commit
}

/// Load and decode the commit object `hash`.
///
/// [`Lookup::NotFound`] when the object is not stored loose; [`Lookup::Failed`]
/// when it cannot be read or inflated.
pub fn commit(git_dir: &Path, hash: &str) -> Lookup<DecodedCommit> {
    read_object(git_dir, hash)
        .map(|bytes| bytes.map(|b| parse_commit(&String::from_utf8_lossy(&b))))
        .into()
}
