//! `buildenv flags` command

use std::path::Path;

use anyhow::Result;

use crate::cli::FlagsArgs;
use buildenv::core::env::FLAG_LIST_KEYS;
use buildenv::methods::disable_warnings;
use buildenv::{EnvValue, FlagStore};

pub fn execute(root: &Path, args: FlagsArgs) -> Result<()> {
    let mut env = super::load_env(root);
    if args.msvc {
        env.set("msvc", EnvValue::Bool(true));
    }
    if args.disable_warnings {
        disable_warnings(&mut env);
    }

    for key in FLAG_LIST_KEYS {
        println!("{}={}", key, env.get_list(key).join(" "));
    }

    Ok(())
}
