//! # vivo
//!
//! Command-line front end: render templates against JSON data.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vivo")]
#[command(about = "Reactive view-binding engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Log binding activity to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mount a template against JSON data and print the rendered HTML
    Render(commands::render::RenderArgs),

    /// Print the JSON Schema for vivo.config.json
    Schema(commands::schema::SchemaArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Schema(args) => commands::schema::run(args),
    }
}
