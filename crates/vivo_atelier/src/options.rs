//! Compiler options.

use serde::{Deserialize, Serialize};

/// Options for compiling bindings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerOptions {
    /// Treat unknown directives as errors instead of warnings
    pub strict: bool,
}

impl CompilerOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}
