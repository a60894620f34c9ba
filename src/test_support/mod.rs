//! Test doubles for the environment capabilities.
//!
//! [`MockEnv`] implements [`FlagStore`], [`PathResolver`] and
//! [`ObjectFactory`] with plain in-memory state, so helpers can be tested
//! without a real build environment.
//!
//! # Example
//!
//! ```rust,ignore
//! use buildenv::test_support::{GitFixture, MockEnv};
//!
//! let env = MockEnv::new("/project").with("CC", "clang");
//! let repo = GitFixture::new().with_git_dir().with_head("ref: refs/heads/main");
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::env::{BuildObject, EnvValue, FlagStore, ObjectFactory, PathResolver};
use crate::util::fs::clean_path;

pub use fixtures::*;

/// In-memory environment. Objects always use the `.o` extension.
#[derive(Debug, Clone, Default)]
pub struct MockEnv {
    root: PathBuf,
    build_dir: PathBuf,
    vars: HashMap<String, EnvValue>,
}

impl MockEnv {
    /// Create a mock rooted at `root`, building in the root itself.
    pub fn new(root: impl AsRef<Path>) -> Self {
        MockEnv {
            root: root.as_ref().to_path_buf(),
            build_dir: root.as_ref().to_path_buf(),
            vars: HashMap::new(),
        }
    }

    /// Build in `dir`, relative to the root.
    pub fn with_build_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.build_dir = clean_path(&self.root.join(dir));
        self
    }

    /// Set a value, builder style.
    pub fn with(mut self, key: &str, value: impl Into<EnvValue>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }
}

impl FlagStore for MockEnv {
    fn get(&self, key: &str) -> Option<&EnvValue> {
        self.vars.get(key)
    }

    fn set(&mut self, key: &str, value: EnvValue) {
        self.vars.insert(key.to_string(), value);
    }

    fn list_mut(&mut self, key: &str) -> &mut Vec<String> {
        self.vars
            .entry(key.to_string())
            .or_insert_with(|| EnvValue::List(Vec::new()))
            .make_list()
    }
}

impl PathResolver for MockEnv {
    fn project_root(&self) -> &Path {
        &self.root
    }

    fn build_dir(&self) -> &Path {
        &self.build_dir
    }
}

impl ObjectFactory for MockEnv {
    fn object(&self, source: &Path) -> BuildObject {
        BuildObject::new(source, source.with_extension("o"))
    }
}
