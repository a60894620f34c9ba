//! `buildenv generate` command

use std::path::Path;

use anyhow::Result;

use crate::cli::GenerateArgs;
use buildenv::methods::{add_module_version_string, VersionFileWriter};
use buildenv::util::config::{project_config_path, Config};
use buildenv::util::diagnostic::{emit, suggestions, Diagnostic};

pub fn execute(root: &Path, args: GenerateArgs, color: bool) -> Result<()> {
    let config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => {
            let path = project_config_path(root);
            if !path.exists() {
                let diag = Diagnostic::note("no buildenv.toml found, using default version info")
                    .with_location(&path)
                    .with_suggestion(suggestions::NO_CONFIG);
                emit(&diag, color);
            }
            Config::load_or_default(&path)
        }
    };

    let mut env = super::load_env(root);
    for module in &args.modules {
        add_module_version_string(&mut env, module);
    }

    let output_dir = args.output_dir.unwrap_or(config.output.dir);
    let writer = VersionFileWriter::new(root, config.version).with_output_dir(output_dir);

    for path in writer.update_version(&env)? {
        tracing::info!("Generated {}", path.display());
    }

    Ok(())
}
