//! Build environment and the capability interfaces the helpers operate on.
//!
//! The helpers in [`crate::methods`] never touch a concrete environment type.
//! Each one asks for the narrow capability it needs:
//!
//! - [`FlagStore`] - key-value access to compiler ids, flag lists and toggles
//! - [`PathResolver`] - turning project-relative strings into absolute paths
//! - [`ObjectFactory`] - producing comparable [`BuildObject`] handles
//!
//! [`BuildEnv`] implements all three for real use; tests use the
//! `MockEnv` double from `test_support`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::util::fs::clean_path;

/// Flag-list keys touched by warning suppression.
pub const FLAG_LIST_KEYS: [&str; 3] = ["CCFLAGS", "CFLAGS", "CXXFLAGS"];

/// A value stored in the build environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    /// Feature toggle (e.g. `msvc`)
    Bool(bool),
    /// Scalar string (e.g. `CC`)
    Str(String),
    /// Flag list (e.g. `CCFLAGS`)
    List(Vec<String>),
}

impl EnvValue {
    /// View the value as a flag list.
    ///
    /// Strings are split on whitespace the way a command line would be;
    /// booleans have no list form.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            EnvValue::Bool(_) => Vec::new(),
            EnvValue::Str(s) => s.split_whitespace().map(str::to_string).collect(),
            EnvValue::List(items) => items.clone(),
        }
    }

    /// Convert this value into a list in place and borrow it mutably.
    pub fn make_list(&mut self) -> &mut Vec<String> {
        if !matches!(self, EnvValue::List(_)) {
            *self = EnvValue::List(self.to_list());
        }
        match self {
            EnvValue::List(items) => items,
            _ => unreachable!("value was converted to a list above"),
        }
    }
}

impl From<bool> for EnvValue {
    fn from(value: bool) -> Self {
        EnvValue::Bool(value)
    }
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        EnvValue::Str(value.to_string())
    }
}

impl From<String> for EnvValue {
    fn from(value: String) -> Self {
        EnvValue::Str(value)
    }
}

impl From<Vec<String>> for EnvValue {
    fn from(value: Vec<String>) -> Self {
        EnvValue::List(value)
    }
}

impl From<Vec<&str>> for EnvValue {
    fn from(value: Vec<&str>) -> Self {
        EnvValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for EnvValue {
    fn from(value: &[&str]) -> Self {
        EnvValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Key-value access to build configuration.
pub trait FlagStore {
    /// Look up a raw value.
    fn get(&self, key: &str) -> Option<&EnvValue>;

    /// Insert or replace a value.
    fn set(&mut self, key: &str, value: EnvValue);

    /// Borrow the list stored under `key`, creating an empty one if absent.
    fn list_mut(&mut self, key: &str) -> &mut Vec<String>;

    /// Whether a key is present.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Scalar string under `key`, if it is one.
    fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(EnvValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Boolean toggle under `key`; absent or non-boolean values are false.
    fn get_bool(&self, key: &str) -> bool {
        matches!(self.get(key), Some(EnvValue::Bool(true)))
    }

    /// Flag list under `key` (empty when absent).
    fn get_list(&self, key: &str) -> Vec<String> {
        self.get(key).map(EnvValue::to_list).unwrap_or_default()
    }

    /// Whether the environment targets the MSVC toolchain.
    fn is_msvc(&self) -> bool {
        self.get_bool("msvc")
    }
}

/// Path resolution relative to the build tree.
///
/// Paths starting with `#` are project-absolute: they resolve against the
/// project root no matter which directory the build script runs in. All
/// other relative paths resolve against the current build directory.
pub trait PathResolver {
    /// Root of the project (target of `#`-prefixed paths).
    fn project_root(&self) -> &Path;

    /// Directory the current build script is configuring.
    fn build_dir(&self) -> &Path;

    /// Resolve a build path string to a normalized absolute path.
    fn abspath(&self, path: &str) -> PathBuf {
        let joined = match path.strip_prefix('#') {
            Some(rest) => self
                .project_root()
                .join(rest.trim_start_matches(['/', '\\'])),
            None => self.build_dir().join(path),
        };
        clean_path(&joined)
    }
}

/// Factory for build-object handles.
pub trait ObjectFactory {
    /// Create the object handle that compiles `source` (an absolute path).
    fn object(&self, source: &Path) -> BuildObject;
}

/// Handle for a compiled object derived from a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildObject {
    source: PathBuf,
    target: PathBuf,
}

impl BuildObject {
    /// Create a handle from a source path and its object-file path.
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        BuildObject {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Source file compiled by this object.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Object file produced.
    pub fn target(&self) -> &Path {
        &self.target
    }
}

impl fmt::Display for BuildObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target.display())
    }
}

/// The concrete build environment.
#[derive(Debug, Clone, Default)]
pub struct BuildEnv {
    project_root: PathBuf,
    build_dir: PathBuf,
    vars: BTreeMap<String, EnvValue>,
}

impl BuildEnv {
    /// Create an environment rooted at `project_root`, configuring the root
    /// directory itself.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = clean_path(&project_root.into());
        BuildEnv {
            build_dir: project_root.clone(),
            project_root,
            vars: BTreeMap::new(),
        }
    }

    /// Switch the build directory. Relative paths are taken from the
    /// project root.
    pub fn with_build_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.build_dir = clean_path(&self.project_root.join(dir.as_ref()));
        self
    }

    /// Set a value, builder style.
    pub fn with(mut self, key: &str, value: impl Into<EnvValue>) -> Self {
        self.set(key, value.into());
        self
    }

    /// Seed values from a map (e.g. the `[env]` table of `buildenv.toml`).
    pub fn with_vars(mut self, vars: &BTreeMap<String, EnvValue>) -> Self {
        for (key, value) in vars {
            self.vars.insert(key.clone(), value.clone());
        }
        self
    }

    /// Pick up toolchain settings from the process environment.
    ///
    /// `CC` and `CXX` are scalars; `CCFLAGS`, `CFLAGS` and `CXXFLAGS` are
    /// split into flag lists.
    pub fn with_process_env(mut self) -> Self {
        for key in ["CC", "CXX"] {
            if let Ok(value) = std::env::var(key) {
                self.set(key, EnvValue::Str(value));
            }
        }
        for key in FLAG_LIST_KEYS {
            if let Ok(value) = std::env::var(key) {
                self.set(key, EnvValue::List(EnvValue::Str(value).to_list()));
            }
        }
        self
    }

    /// All values, ordered by key.
    pub fn vars(&self) -> &BTreeMap<String, EnvValue> {
        &self.vars
    }

    /// Object-file extension for the active toolchain.
    pub fn object_extension(&self) -> &'static str {
        if self.is_msvc() {
            "obj"
        } else {
            "o"
        }
    }
}

impl FlagStore for BuildEnv {
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

impl PathResolver for BuildEnv {
    fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn build_dir(&self) -> &Path {
        &self.build_dir
    }
}

impl ObjectFactory for BuildEnv {
    fn object(&self, source: &Path) -> BuildObject {
        BuildObject::new(source, source.with_extension(self.object_extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abspath_resolves_project_absolute_marker() {
        let env = BuildEnv::new("/work/engine").with_build_dir("modules/audio");

        assert_eq!(env.abspath("#core/os.cpp"), PathBuf::from("/work/engine/core/os.cpp"));
        assert_eq!(env.abspath("#/core/os.cpp"), PathBuf::from("/work/engine/core/os.cpp"));
        assert_eq!(
            env.abspath("mixer.cpp"),
            PathBuf::from("/work/engine/modules/audio/mixer.cpp")
        );
        assert_eq!(
            env.abspath("../video/./decoder.cpp"),
            PathBuf::from("/work/engine/modules/video/decoder.cpp")
        );
    }

    #[test]
    fn test_object_extension_follows_msvc_toggle() {
        let gcc = BuildEnv::new("/work");
        let msvc = BuildEnv::new("/work").with("msvc", true);

        let source = Path::new("/work/main.cpp");
        assert_eq!(gcc.object(source).target(), Path::new("/work/main.o"));
        assert_eq!(msvc.object(source).target(), Path::new("/work/main.obj"));
    }

    #[test]
    fn test_list_mut_converts_scalar_flags() {
        let mut env = BuildEnv::new("/work").with("CFLAGS", "-O2 -g");

        env.list_mut("CFLAGS").push("-w".to_string());
        assert_eq!(env.get_list("CFLAGS"), vec!["-O2", "-g", "-w"]);

        env.list_mut("CXXFLAGS").push("-w".to_string());
        assert_eq!(env.get("CXXFLAGS"), Some(&EnvValue::List(vec!["-w".to_string()])));
    }

    #[test]
    fn test_flag_store_defaults() {
        let env = BuildEnv::new("/work").with("CC", "clang").with("msvc", false);

        assert_eq!(env.get_str("CC"), Some("clang"));
        assert_eq!(env.get_str("CXX"), None);
        assert!(!env.is_msvc());
        assert!(env.get_list("CCFLAGS").is_empty());
    }

    #[test]
    fn test_env_value_deserializes_untagged() {
        let table: BTreeMap<String, EnvValue> =
            toml::from_str("CC = \"gcc\"\nmsvc = false\nCCFLAGS = [\"-O2\"]\n").unwrap();

        assert_eq!(table["CC"], EnvValue::Str("gcc".to_string()));
        assert_eq!(table["msvc"], EnvValue::Bool(false));
        assert_eq!(table["CCFLAGS"], EnvValue::List(vec!["-O2".to_string()]));
    }
}
