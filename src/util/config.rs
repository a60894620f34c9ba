//! Configuration file support.
//!
//! A project describes its version metadata and initial environment in
//! `buildenv.toml` at the project root:
//!
//! ```toml
//! [version]
//! name = "Engine"
//! major = 4
//!
//! [output]
//! dir = "core"
//!
//! [env]
//! CC = "clang"
//! msvc = false
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::env::EnvValue;
use crate::core::version::VersionInfo;
use crate::util::fs::read_to_string;

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "buildenv.toml";

/// Project configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Static version metadata
    pub version: VersionInfo,

    /// Where generated headers go
    pub output: OutputConfig,

    /// Initial build environment values
    pub env: BTreeMap<String, EnvValue>,
}

/// Output settings for generated files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for generated headers, relative to the project root
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: PathBuf::from("core"),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path).context("failed to read config")?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't
    /// exist or can't be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize config")?;

        crate::util::fs::write_string(path, &contents)
    }
}

/// Path of the project config for a given root.
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_full_config() {
        let tmp = TempDir::new().unwrap();
        let path = project_config_path(tmp.path());
        std::fs::write(
            &path,
            r#"
[version]
short_name = "demo"
name = "Demo Engine"
major = 4
minor = 1
status = "beta"
module_config = ".mono"

[output]
dir = "generated"

[env]
CC = "clang"
msvc = false
CCFLAGS = ["-O2"]
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.version.short_name, "demo");
        assert_eq!(config.version.minor, 1);
        assert_eq!(config.version.module_config, ".mono");
        assert_eq!(config.output.dir, PathBuf::from("generated"));
        assert_eq!(config.env["CC"], EnvValue::Str("clang".to_string()));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_or_default(&project_config_path(tmp.path()));
        assert_eq!(config, Config::default());
        assert_eq!(config.output.dir, PathBuf::from("core"));
    }

    #[test]
    fn test_invalid_file_errors_with_path() {
        let tmp = TempDir::new().unwrap();
        let path = project_config_path(tmp.path());
        std::fs::write(&path, "[version\nname = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse config"));
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.toml");

        let message = format!("{:#}", Config::load(&path).unwrap_err());
        assert!(message.starts_with("failed to read config"));
        assert!(message.contains("failed to read file"));
        assert!(message.contains("absent.toml"));
    }

    #[test]
    fn test_save_round_trips_env_table() {
        let tmp = TempDir::new().unwrap();
        let path = project_config_path(tmp.path());

        let mut config = Config::default();
        config.env.insert("msvc".to_string(), EnvValue::Bool(true));
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
