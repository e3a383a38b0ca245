use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// Output settings for generated change documents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeConfig {
    /// Value of the `generator` attribute on `<osmChange>`.
    pub generator: String,
    /// osmChange format version.
    pub version: String,
    /// Spaces per nesting level; `0` writes compact single-line XML.
    pub indent: usize,
    /// Drop whitespace-only lines from serialized fragments.
    pub strip_blank_lines: bool,
}

impl Default for ChangeConfig {
    fn default() -> Self {
        Self {
            generator: concat!("osm-way/", env!("CARGO_PKG_VERSION")).to_string(),
            version: "0.6".to_string(),
            indent: 2,
            strip_blank_lines: true,
        }
    }
}

impl ChangeConfig {
    /// Compact output: no indentation, suited to upload payloads.
    pub fn compact() -> Self {
        Self {
            indent: 0,
            ..Default::default()
        }
    }

    /// Parse a TOML document. Missing keys take their default values.
    pub fn from_toml_str(s: &str) -> DiffResult<Self> {
        toml::from_str(s).map_err(|e| DiffError::Config(e.to_string()))
    }

    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> DiffResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| DiffError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}
