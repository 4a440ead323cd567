//! Configuration file loading for vivo.
//!
//! Reads `vivo.config.json` from the current working directory.
//! Also provides the JSON Schema for editor autocompletion.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up in the config directory
pub const CONFIG_FILE: &str = "vivo.config.json";

/// Top-level vivo configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VivoConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Mount configuration.
    #[serde(default)]
    pub mount: MountConfig,
}

/// Configuration for mounting templates.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MountConfig {
    /// Selector of the mount target (`#id`, `.class` or a tag name).
    ///
    /// When omitted, `#app` is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub el: Option<String>,

    /// Treat unknown directives as errors.
    #[serde(default)]
    pub strict: bool,
}

/// Load `vivo.config.json` from the given directory (or CWD if None).
///
/// A missing file yields the defaults. An unreadable or malformed file is
/// reported as a warning and also yields the defaults.
pub fn load_config(dir: Option<&Path>) -> VivoConfig {
    let base = dir
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let config_path = base.join(CONFIG_FILE);

    if !config_path.exists() {
        return VivoConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
                VivoConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", config_path.display(), e);
            VivoConfig::default()
        }
    }
}

/// JSON Schema for `vivo.config.json`.
pub const VIVO_CONFIG_SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Vivo Configuration",
  "description": "Configuration file for vivo - a small reactive view-binding engine",
  "type": "object",
  "properties": {
    "$schema": {
      "type": "string",
      "description": "JSON Schema reference for editor autocompletion"
    },
    "mount": {
      "type": "object",
      "description": "Mount configuration",
      "properties": {
        "el": {
          "type": "string",
          "description": "Selector of the mount target: #id, .class or a tag name",
          "pattern": "^[#.]?[A-Za-z0-9_-]+$",
          "examples": ["#app", ".root", "main"]
        },
        "strict": {
          "type": "boolean",
          "description": "Treat unknown directives as errors instead of warnings",
          "default": false
        }
      },
      "additionalProperties": false
    }
  },
  "additionalProperties": false
}"##;
