//! On-disk fixtures for git metadata tests.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// A temporary checkout root with hand-written `.git` contents.
///
/// Builder methods panic on I/O failure; this is test-only code.
#[derive(Debug)]
pub struct GitFixture {
    dir: TempDir,
}

impl GitFixture {
    /// An empty directory with no `.git` entry.
    pub fn new() -> Self {
        GitFixture {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Root of the checkout.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dirs");
        }
        fs::write(&path, contents).expect("write fixture file");
    }

    /// Create `.git` as a directory.
    pub fn with_git_dir(self) -> Self {
        fs::create_dir_all(self.root().join(".git")).expect("create .git");
        self
    }

    /// Create `.git` as a file pointing at `target`.
    pub fn with_gitdir_file(self, target: &str) -> Self {
        self.write(".git", &format!("gitdir: {}\n", target));
        self
    }

    /// Write `.git/HEAD`.
    pub fn with_head(self, head: &str) -> Self {
        self.write(".git/HEAD", &format!("{}\n", head));
        self
    }

    /// Write a loose ref such as `refs/heads/main`.
    pub fn with_ref(self, refpath: &str, contents: &str) -> Self {
        self.write(&format!(".git/{}", refpath), &format!("{}\n", contents));
        self
    }

    /// Write `.git/packed-refs` verbatim.
    pub fn with_packed_refs(self, contents: &str) -> Self {
        self.write(".git/packed-refs", contents);
        self
    }
}

impl Default for GitFixture {
    fn default() -> Self {
        Self::new()
    }
}
