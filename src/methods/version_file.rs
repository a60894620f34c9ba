//! Generated version headers.
//!
//! Two headers are produced under the output directory (`core/` unless
//! configured otherwise):
//!
//! - `version_generated.gen.h` - static [`VersionInfo`] fields plus the
//!   build name and module configuration
//! - `version_hash.gen.h` - the commit hash of the checkout
//!
//! Both are rewritten wholesale on every call.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::env::{EnvValue, FlagStore};
use crate::core::version::VersionInfo;
use crate::methods::git::get_version_hash;
use crate::util::fs::write_string;

/// Build name used when `BUILD_NAME` is unset.
pub const DEFAULT_BUILD_NAME: &str = "custom_build";

/// Environment variable overriding the build name.
pub const BUILD_NAME_VAR: &str = "BUILD_NAME";

pub const VERSION_HASH_FILE: &str = "version_hash.gen.h";
pub const VERSION_GENERATED_FILE: &str = "version_generated.gen.h";

const GENERATED_BANNER: &str = "/* THIS FILE IS GENERATED DO NOT EDIT */";

/// Resolve the build name from an optional override.
pub fn build_name_from(value: Option<String>) -> String {
    match value {
        Some(name) => {
            tracing::info!("Using custom build name: '{}'.", name);
            name
        }
        None => DEFAULT_BUILD_NAME.to_string(),
    }
}

/// The build name: `BUILD_NAME` verbatim when set, else `custom_build`.
pub fn get_build_name() -> String {
    build_name_from(std::env::var(BUILD_NAME_VAR).ok())
}

/// Append `.<module>` to the environment's `module_version_string`.
pub fn add_module_version_string<E: FlagStore + ?Sized>(env: &mut E, module: &str) {
    let current = env.get_str("module_version_string").unwrap_or_default();
    let updated = format!("{}.{}", current, module);
    env.set("module_version_string", EnvValue::Str(updated));
}

/// Text of `version_hash.gen.h`.
pub fn version_hash_header(hash: &str) -> String {
    [
        GENERATED_BANNER.to_string(),
        "#ifndef VERSION_HASH_GEN_H".to_string(),
        "#define VERSION_HASH_GEN_H".to_string(),
        format!("#define VERSION_HASH \"{}\"", hash),
        "#endif // VERSION_HASH_GEN_H".to_string(),
    ]
    .iter()
    .map(|line| format!("{}\n", line))
    .collect()
}

/// Text of `version_generated.gen.h`.
pub fn version_header(info: &VersionInfo, build_name: &str, module_config_suffix: &str) -> String {
    let lines = [
        GENERATED_BANNER.to_string(),
        "#ifndef VERSION_GENERATED_GEN_H".to_string(),
        "#define VERSION_GENERATED_GEN_H".to_string(),
        format!("#define VERSION_SHORT_NAME \"{}\"", info.short_name),
        format!("#define VERSION_NAME \"{}\"", info.name),
        format!("#define VERSION_MAJOR {}", info.major),
        format!("#define VERSION_MINOR {}", info.minor),
        format!("#define VERSION_PATCH {}", info.patch),
        format!("#define VERSION_STATUS \"{}\"", info.status),
        format!("#define VERSION_BUILD \"{}\"", build_name),
        format!(
            "#define VERSION_MODULE_CONFIG \"{}{}\"",
            info.module_config, module_config_suffix
        ),
        format!("#define VERSION_YEAR {}", info.year),
        format!("#define VERSION_WEBSITE \"{}\"", info.website),
        format!("#define VERSION_DOCS_BRANCH \"{}\"", info.docs_branch),
        "#endif // VERSION_GENERATED_GEN_H".to_string(),
    ];
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

/// Writes the version headers for one checkout.
#[derive(Debug, Clone)]
pub struct VersionFileWriter {
    root: PathBuf,
    output_dir: PathBuf,
    info: VersionInfo,
    build_name: Option<String>,
}

impl VersionFileWriter {
    /// Writer for the checkout at `root`, emitting into `<root>/core`.
    pub fn new(root: impl Into<PathBuf>, info: VersionInfo) -> Self {
        VersionFileWriter {
            root: root.into(),
            output_dir: PathBuf::from("core"),
            info,
            build_name: None,
        }
    }

    /// Emit into `dir` (relative to the root) instead of `core/`.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Use a fixed build name rather than consulting `BUILD_NAME`.
    pub fn with_build_name(mut self, name: impl Into<String>) -> Self {
        self.build_name = Some(name.into());
        self
    }

    fn output_path(&self, file_name: &str) -> PathBuf {
        self.root.join(&self.output_dir).join(file_name)
    }

    /// Write `version_hash.gen.h`, resolving the hash now.
    pub fn write_version_hash_file(&self) -> Result<PathBuf> {
        let path = self.output_path(VERSION_HASH_FILE);
        let hash = get_version_hash(&self.root);
        write_string(&path, &version_hash_header(&hash))?;
        tracing::debug!("wrote {} (hash: {:?})", path.display(), hash);
        Ok(path)
    }

    /// Write `version_generated.gen.h` with `module_config_suffix` appended
    /// to the static module configuration.
    pub fn write_version_file(&self, module_config_suffix: &str) -> Result<PathBuf> {
        let path = self.output_path(VERSION_GENERATED_FILE);
        let build_name = match &self.build_name {
            Some(name) => name.clone(),
            None => get_build_name(),
        };
        write_string(
            &path,
            &version_header(&self.info, &build_name, module_config_suffix),
        )?;
        tracing::debug!("wrote {}", path.display());
        Ok(path)
    }

    /// Write both headers, taking the module suffix from the environment's
    /// `module_version_string`.
    pub fn update_version<E: FlagStore + ?Sized>(&self, env: &E) -> Result<[PathBuf; 2]> {
        let suffix = env.get_str("module_version_string").unwrap_or_default();
        Ok([
            self.write_version_file(suffix)?,
            self.write_version_hash_file()?,
        ])
    }
}

/// Write `<root>/core/version_hash.gen.h`.
pub fn write_version_hash_file(root: &Path) -> Result<PathBuf> {
    VersionFileWriter::new(root, VersionInfo::default()).write_version_hash_file()
}

/// Write `<root>/core/version_generated.gen.h` for `info`.
pub fn write_version_file(
    root: &Path,
    info: &VersionInfo,
    module_config_suffix: &str,
) -> Result<PathBuf> {
    VersionFileWriter::new(root, info.clone()).write_version_file(module_config_suffix)
}
