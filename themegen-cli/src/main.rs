// themegen-cli/src/main.rs
//
// Entry point for the themegen command-line tool. Parses arguments, sets up
// logging, and dispatches to the command implementations.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use owo_colors::OwoColorize;
use std::process;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run_generate(args),
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "Error:".red().bold());
        process::exit(1);
    }
}
