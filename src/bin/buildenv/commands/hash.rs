//! `buildenv hash` command

use std::path::Path;

use anyhow::Result;

use crate::cli::HashArgs;
use buildenv::methods::git::resolve_version_hash;

pub fn execute(root: &Path, args: HashArgs) -> Result<()> {
    let resolution = resolve_version_hash(root);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        println!("{}", resolution.into_hash());
    }

    Ok(())
}
