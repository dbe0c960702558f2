mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    compose, export, init, serve, ComposeArgs, ExportArgs, InitArgs, ServeArgs,
};

/// Swatch CLI - preview, edit and export UI snippets
#[derive(Parser, Debug)]
#[command(name = "swatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a config and an example catalog
    Init(InitArgs),

    /// Serve previews, edit views and gated downloads over HTTP
    Serve(ServeArgs),

    /// Compose fragments into a single document
    Compose(ComposeArgs),

    /// Export a template for a caller, subject to entitlement
    Export(ExportArgs),
}

fn main() {
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Serve(args) => serve(args, &cwd),
        Command::Compose(args) => compose(args, &cwd),
        Command::Export(args) => export(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
