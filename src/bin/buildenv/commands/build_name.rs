//! `buildenv build-name` command

use anyhow::Result;

use buildenv::methods::get_build_name;

pub fn execute() -> Result<()> {
    println!("{}", get_build_name());
    Ok(())
}
