//! Kompare CLI
//!
//! Command-line interface for comparing exported record collections

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "kompare")]
#[command(about = "Kompare - Compare two exported Kubernetes resource collections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two collections and print their differences
    Diff(commands::diff::DiffArgs),
    /// List the known resource kinds, their aliases and default criteria
    Kinds(commands::kinds::KindsArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Kinds(args) => commands::kinds::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
