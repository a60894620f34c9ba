//! `buildenv sources` command

use std::path::Path;

use anyhow::Result;

use crate::cli::SourcesArgs;
use buildenv::methods::{add_source_files, SourceFiles};
use buildenv::util::diagnostic::emit;
use buildenv::util::fs::relative_path;
use buildenv::PathResolver;

pub fn execute(root: &Path, args: SourcesArgs, color: bool) -> Result<()> {
    let mut env = super::load_env(root);
    if let Some(ref dir) = args.build_dir {
        env = env.with_build_dir(dir);
    }

    let files = match <[String; 1]>::try_from(args.files) {
        Ok([single]) => SourceFiles::Single(single),
        Err(many) => SourceFiles::Many(many),
    };

    let mut sources = Vec::new();
    let report = match add_source_files(&env, &mut sources, files) {
        Ok(report) => report,
        Err(e) => {
            emit(&e.to_diagnostic(), color);
            anyhow::bail!("no sources were added");
        }
    };

    for diag in report.diagnostics(env.project_root()) {
        emit(&diag, color);
    }

    for obj in &sources {
        println!(
            "{} -> {}",
            relative_path(env.project_root(), obj.source()).display(),
            relative_path(env.project_root(), obj.target()).display()
        );
    }

    Ok(())
}
