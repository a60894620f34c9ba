//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// buildenv - build-environment helpers for C/C++ projects
#[derive(Parser)]
#[command(name = "buildenv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Project root (checkout containing `.git` and `buildenv.toml`)
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the commit hash of the checkout
    Hash(HashArgs),

    /// Write the generated version headers
    Generate(GenerateArgs),

    /// Print the effective build name
    BuildName,

    /// Show the compiler family selected by the environment
    Compiler(CompilerArgs),

    /// Register source files and list the resulting objects
    Sources(SourcesArgs),

    /// Show the compiler flag lists of the environment
    Flags(FlagsArgs),
}

#[derive(Args)]
pub struct HashArgs {
    /// Print the resolution outcome as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Config file (defaults to `<root>/buildenv.toml`)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Module appended to the module configuration (repeatable)
    #[arg(long = "module")]
    pub modules: Vec<String>,

    /// Output directory relative to the root (overrides the config)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompilerArgs {
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip running the compiler to query its version
    #[arg(long)]
    pub no_probe: bool,
}

#[derive(Args)]
pub struct SourcesArgs {
    /// Build directory relative to the root
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Files to add; a single argument may be a wildcard pattern
    #[arg(required = true)]
    pub files: Vec<String>,
}

#[derive(Args)]
pub struct FlagsArgs {
    /// Apply warning suppression before printing
    #[arg(long)]
    pub disable_warnings: bool,

    /// Treat the toolchain as MSVC
    #[arg(long)]
    pub msvc: bool,
}
