//! Render command - mount a template against JSON data and print the result

use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use vivo::{parse_assignment, render_template, RenderOptions, VivoError};

use crate::config::load_config;

#[derive(Args)]
pub struct RenderArgs {
    /// Template file
    pub template: PathBuf,

    /// JSON file holding the data root
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Write applied after mounting, as key=value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,

    /// Mount target selector (overrides the config file)
    #[arg(long)]
    pub el: Option<String>,

    /// Treat unknown directives as errors
    #[arg(long)]
    pub strict: bool,

    /// Directory containing vivo.config.json
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the rendered HTML to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: RenderArgs) {
    if let Err(e) = execute(&args) {
        eprintln!("\x1b[31mError:\x1b[0m {}", e);
        std::process::exit(1);
    }
}

fn read(path: &Path) -> Result<String, VivoError> {
    fs::read_to_string(path).map_err(|source| VivoError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn execute(args: &RenderArgs) -> Result<(), VivoError> {
    let config = load_config(args.config.as_deref());

    let template = read(&args.template)?;
    let data = match &args.data {
        Some(path) => serde_json::from_str(&read(path)?).map_err(|source| VivoError::Json {
            path: path.clone(),
            source,
        })?,
        None => serde_json::Value::Object(serde_json::Map::new()),
    };

    let mut options = RenderOptions {
        strict: args.strict || config.mount.strict,
        ..RenderOptions::default()
    };
    if let Some(el) = args.el.clone().or(config.mount.el) {
        options.el = el;
    }
    for assignment in &args.assignments {
        options.assignments.push(parse_assignment(assignment)?);
    }

    let rendered = render_template(&template, data, &options)?;

    for error in &rendered.parse_errors {
        let at = error
            .position
            .map(|p| format!(" at {}:{}", p.line, p.column))
            .unwrap_or_default();
        eprintln!(
            "\x1b[33mWarning:\x1b[0m {}{}: {}",
            args.template.display(),
            at,
            error
        );
    }
    for warning in &rendered.warnings {
        eprintln!("\x1b[33mWarning:\x1b[0m {}", warning);
    }

    match &args.output {
        Some(path) => fs::write(path, &rendered.html).map_err(|source| VivoError::Io {
            path: path.clone(),
            source,
        })?,
        None => println!("{}", rendered.html),
    }
    Ok(())
}
