//! Errors surfaced by the application layer and the CLI.

use std::path::PathBuf;

use thiserror::Error;
use vivo_relief::CompilerError;

#[derive(Debug, Error)]
pub enum VivoError {
    #[error(transparent)]
    Compile(#[from] CompilerError),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Data root must be a JSON object")]
    DataNotObject,

    #[error("Invalid assignment `{0}`, expected key=value")]
    InvalidAssignment(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
