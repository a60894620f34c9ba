//! Commit hash resolution straight from `.git` metadata.
//!
//! No git binary or library is involved: the resolver follows the same
//! pointer chain git itself does for the common cases.
//!
//! 1. `.git` is a directory, or a file whose first line is `gitdir: <path>`
//!    (worktrees and submodules).
//! 2. `<gitdir>/HEAD` holds either a literal hash (detached HEAD) or
//!    `ref: <refpath>`.
//! 3. A ref is read from the loose file `<gitdir>/<refpath>`, falling back
//!    to the `packed-refs` table.
//!
//! Only one level of `ref:` indirection is followed. Any missing file ends
//! resolution with an empty hash rather than an error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;

const GITDIR_PREFIX: &str = "gitdir: ";
const REF_PREFIX: &str = "ref: ";

/// Outcome of walking the git pointer chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum HashResolution {
    /// A commit hash was found.
    Resolved(String),
    /// There is no `.git` entry under the root.
    NoCheckout,
    /// The git folder has no readable `HEAD`.
    MissingHead,
    /// `HEAD` points at a ref that is neither a loose file nor packed.
    MissingRef(String),
}

impl HashResolution {
    /// The hash, or an empty string for every failure.
    pub fn into_hash(self) -> String {
        match self {
            HashResolution::Resolved(hash) => hash,
            _ => String::new(),
        }
    }
}

/// Read the first line of a file with surrounding whitespace trimmed.
///
/// Returns `None` when the file can't be opened or read.
pub fn read_first_line(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut line = String::new();
    BufReader::new(file).read_line(&mut line).ok()?;
    Some(line.trim().to_string())
}

/// Locate the git metadata folder for a checkout rooted at `root`.
///
/// Relative `gitdir:` targets resolve against `root`. A `.git` file without
/// the prefix is treated like a plain `.git` folder.
pub fn get_git_folder(root: &Path) -> PathBuf {
    let dot_git = root.join(".git");
    if dot_git.is_file() {
        if let Some(target) = read_first_line(&dot_git)
            .as_deref()
            .and_then(|line| line.strip_prefix(GITDIR_PREFIX))
        {
            return root.join(target.trim());
        }
    }
    dot_git
}

/// Look up `refpath` in `<git_folder>/packed-refs`.
fn read_packed_ref(git_folder: &Path, refpath: &str) -> Option<String> {
    let file = File::open(git_folder.join("packed-refs")).ok()?;
    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .filter(|line| !line.starts_with('#') && !line.starts_with('^'))
        .find_map(|line| {
            let (hash, name) = line.trim().split_once(' ')?;
            (name == refpath).then(|| hash.to_string())
        })
}

/// Walk the pointer chain under `root`, recording where it stopped.
pub fn resolve_version_hash(root: &Path) -> HashResolution {
    if !root.join(".git").exists() {
        tracing::debug!("no .git entry under {}", root.display());
        return HashResolution::NoCheckout;
    }

    let git_folder = get_git_folder(root);
    let Some(head) = read_first_line(&git_folder.join("HEAD")) else {
        tracing::debug!("no HEAD in {}", git_folder.display());
        return HashResolution::MissingHead;
    };

    let Some(refpath) = head.strip_prefix(REF_PREFIX) else {
        return HashResolution::Resolved(head);
    };

    let refpath = refpath.trim();
    match read_first_line(&git_folder.join(refpath))
        .or_else(|| read_packed_ref(&git_folder, refpath))
    {
        Some(hash) => HashResolution::Resolved(hash),
        None => {
            tracing::debug!("ref {} not found in {}", refpath, git_folder.display());
            HashResolution::MissingRef(refpath.to_string())
        }
    }
}

/// Commit hash of the checkout at `root`, or `""` if it can't be resolved.
pub fn get_version_hash(root: &Path) -> String {
    resolve_version_hash(root).into_hash()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::GitFixture;

    const HASH: &str = "4f1c2a9e8b7d6c5a4f3e2d1c0b9a8f7e6d5c4b3a";

    #[test]
    fn test_no_git_yields_empty_hash() {
        let repo = GitFixture::new();
        assert_eq!(get_version_hash(repo.root()), "");
        assert_eq!(resolve_version_hash(repo.root()), HashResolution::NoCheckout);
    }

    #[test]
    fn test_detached_head_hash() {
        let repo = GitFixture::new().with_git_dir().with_head(HASH);
        assert_eq!(get_version_hash(repo.root()), HASH);
    }

    #[test]
    fn test_head_ref_follows_loose_ref() {
        let repo = GitFixture::new()
            .with_git_dir()
            .with_head("ref: refs/heads/master")
            .with_ref("refs/heads/master", HASH);
        assert_eq!(get_version_hash(repo.root()), HASH);
    }

    #[test]
    fn test_missing_ref_yields_empty_hash() {
        let repo = GitFixture::new()
            .with_git_dir()
            .with_head("ref: refs/heads/gone");
        assert_eq!(get_version_hash(repo.root()), "");
        assert_eq!(
            resolve_version_hash(repo.root()),
            HashResolution::MissingRef("refs/heads/gone".to_string())
        );
    }

    #[test]
    fn test_missing_head_yields_empty_hash() {
        let repo = GitFixture::new().with_git_dir();
        assert_eq!(get_version_hash(repo.root()), "");
        assert_eq!(resolve_version_hash(repo.root()), HashResolution::MissingHead);
    }

    #[test]
    fn test_packed_ref_fallback() {
        let repo = GitFixture::new()
            .with_git_dir()
            .with_head("ref: refs/heads/release")
            .with_packed_refs(&format!(
                "# pack-refs with: peeled fully-peeled sorted\n\
                 0000000000000000000000000000000000000000 refs/heads/main\n\
                 {HASH} refs/heads/release\n\
                 ^1111111111111111111111111111111111111111\n"
            ));
        assert_eq!(get_version_hash(repo.root()), HASH);
    }

    #[test]
    fn test_only_one_level_of_indirection() {
        let repo = GitFixture::new()
            .with_git_dir()
            .with_head("ref: refs/heads/alias")
            .with_ref("refs/heads/alias", "ref: refs/heads/master")
            .with_ref("refs/heads/master", HASH);
        assert_eq!(get_version_hash(repo.root()), "ref: refs/heads/master");
    }

    #[test]
    fn test_git_folder_is_dot_git_directory() {
        let repo = GitFixture::new().with_git_dir();
        assert_eq!(get_git_folder(repo.root()), repo.root().join(".git"));
    }

    #[test]
    fn test_git_folder_follows_gitdir_file() {
        let repo = GitFixture::new().with_gitdir_file("../main/.git/worktrees/feature");
        assert_eq!(
            get_git_folder(repo.root()),
            repo.root().join("../main/.git/worktrees/feature")
        );
    }

    #[test]
    fn test_worktree_hash_resolves_through_gitdir_file() {
        let repo = GitFixture::new().with_gitdir_file("elsewhere");
        repo.write("elsewhere/HEAD", "ref: refs/heads/topic\n");
        repo.write("elsewhere/refs/heads/topic", &format!("{HASH}\n"));
        assert_eq!(get_version_hash(repo.root()), HASH);
    }

    #[test]
    fn test_read_first_line_trims_and_handles_missing() {
        let repo = GitFixture::new();
        repo.write("notes.txt", "  first line  \nsecond line\n");
        assert_eq!(
            read_first_line(&repo.root().join("notes.txt")).as_deref(),
            Some("first line")
        );
        assert_eq!(read_first_line(&repo.root().join("absent.txt")), None);
    }
}
