//! Command implementations

pub mod build_name;
pub mod compiler;
pub mod flags;
pub mod generate;
pub mod hash;
pub mod sources;

use std::path::Path;

use buildenv::util::config::{project_config_path, Config};
use buildenv::BuildEnv;

/// Environment for `root`: the config's `[env]` table, then the process
/// environment on top.
pub(crate) fn load_env(root: &Path) -> BuildEnv {
    let config = Config::load_or_default(&project_config_path(root));
    BuildEnv::new(absolute_root(root))
        .with_vars(&config.env)
        .with_process_env()
}

/// Make `root` absolute against the current directory.
pub(crate) fn absolute_root(root: &Path) -> std::path::PathBuf {
    if root.is_absolute() {
        root.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(root))
            .unwrap_or_else(|_| root.to_path_buf())
    }
}
