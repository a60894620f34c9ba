//! buildenv CLI - build-environment helpers for C/C++ projects

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = EnvFilter::try_from_env("BUILDENV_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("buildenv=debug")
        } else {
            EnvFilter::new("buildenv=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color && std::io::stdout().is_terminal())
        .without_time()
        .init();

    let color = !cli.no_color && std::io::stderr().is_terminal();
    let root = cli.root;

    // Execute command
    match cli.command {
        Commands::Hash(args) => commands::hash::execute(&root, args),
        Commands::Generate(args) => commands::generate::execute(&root, args, color),
        Commands::BuildName => commands::build_name::execute(),
        Commands::Compiler(args) => commands::compiler::execute(&root, args),
        Commands::Sources(args) => commands::sources::execute(&root, args, color),
        Commands::Flags(args) => commands::flags::execute(&root, args),
    }
}
