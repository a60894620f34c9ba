//! `buildenv compiler` command

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::cli::CompilerArgs;
use buildenv::methods::{detect_compiler_family, get_compiler_version, CompilerFamily, CompilerVersion};
use buildenv::util::process::find_executable;
use buildenv::FlagStore;

#[derive(Serialize)]
struct CompilerReport {
    cc: Option<String>,
    family: CompilerFamily,
    path: Option<PathBuf>,
    version: Option<CompilerVersion>,
}

pub fn execute(root: &Path, args: CompilerArgs) -> Result<()> {
    let env = super::load_env(root);
    let cc = env.get_str("CC").map(str::to_string);

    let path = cc.as_deref().and_then(find_executable);
    let version = match (&path, args.no_probe) {
        (Some(program), false) => get_compiler_version(program).unwrap_or_else(|e| {
            tracing::warn!("could not query compiler version: {:#}", e);
            None
        }),
        _ => None,
    };

    let report = CompilerReport {
        family: detect_compiler_family(&env),
        cc,
        path,
        version,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Compiler:");
    println!("  CC:      {}", report.cc.as_deref().unwrap_or("not set"));
    println!("  Family:  {}", report.family);
    match report.path {
        Some(ref path) => println!("  Path:    {}", path.display()),
        None => println!("  Path:    not found"),
    }
    if let Some(version) = report.version {
        println!("  Version: {}", version);
    }

    Ok(())
}
