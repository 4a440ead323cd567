//! Schema command - print the JSON Schema for vivo.config.json

use clap::Args;
use std::path::PathBuf;

use crate::config::VIVO_CONFIG_SCHEMA;

#[derive(Args)]
pub struct SchemaArgs {
    /// Write the schema to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: SchemaArgs) {
    match args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, VIVO_CONFIG_SCHEMA) {
                eprintln!("\x1b[31mError:\x1b[0m Failed to write {}: {}", path.display(), e);
                std::process::exit(1);
            }
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", VIVO_CONFIG_SCHEMA),
    }
}
