use std::io::Write;
use std::path::{Path, PathBuf};

use git_repo_info::*;

pub const GIT_DIR: &str = "dot-git";

/// A hand-built repository layout under a temporary directory.
///
/// The metadata directory is named `dot-git` so the fixture can never be
/// mistaken for a real checkout by anything walking the tree.
pub struct Fixture {
    _dir: tempfile::TempDir,
    pub root: PathBuf,
    pub git: PathBuf,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = paths::normalize(&dir.path().join("project"));
        let git = root.join(GIT_DIR);
        std::fs::create_dir_all(git.join("refs/heads")).unwrap();
        Fixture { _dir: dir, root, git }
    }

    pub fn head(&self, content: &str) -> &Self {
        write(&self.git.join("HEAD"), content.as_bytes());
        self
    }

    pub fn loose_ref(&self, ref_path: &str, hash: &str) -> &Self {
        write(&self.git.join(ref_path), format!("{}\n", hash).as_bytes());
        self
    }

    pub fn packed_refs(&self, content: &str) -> &Self {
        write(&self.git.join("packed-refs"), content.as_bytes());
        self
    }

    pub fn origin(&self, url: &str) -> &Self {
        let config = format!(
            "[core]\n\trepositoryformatversion = 0\n[remote \"origin\"]\n\turl = {}\n\tfetch = +refs/heads/*:refs/remotes/origin/*\n",
            url,
        );
        write(&self.git.join("config"), config.as_bytes());
        self
    }

    /// Store `raw` (header included) as the zlib-compressed loose object `hash`.
    pub fn object(&self, hash: &str, raw: &str) -> &Self {
        let path = object::object_path(&self.git, hash).unwrap();
        write(&path, &deflate(raw.as_bytes()));
        self
    }

    pub fn open(&self) -> GitInfo {
        GitInfo::open(OpenOptions::new().start_dir(&self.root).git_dir_name(GIT_DIR))
    }
}

/// A commit object as `git` stores it, header included.
#[allow(dead_code)]
pub fn commit_object(committer: &str, message: &str) -> String {
    let body = format!(
        "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\
         author {committer} 1600000000 +0000\n\
         committer {committer} 1600000000 +0000\n\
         \n\
         {message}\n"
    );
    format!("commit {}\0{}", body.len(), body)
}

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut enc = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    enc.write_all(data).unwrap();
    enc.finish().unwrap()
}

pub fn write(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, data).unwrap();
}
