//! Processor configuration
//!
//! Every field has a default matching the conventions of component-based
//! front-end projects, so an empty YAML document is a valid configuration:
//!
//! ```yaml
//! marker: Component
//! fragment-suffix: component.html
//! heuristic:
//!   file-suffixes: [".component.ts"]
//!   required-tokens: ["@Component", "@angular/core"]
//! relocation:
//!   rebase-first-line-columns: false
//!   fix-range-unit: bytes
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a [`Processor`](crate::Processor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProcessorConfig {
    /// Decorator callee identifying declarations of interest
    pub marker: String,
    /// Extension given to synthetic fragment names, without the leading dot
    pub fragment_suffix: String,
    pub heuristic: HeuristicConfig,
    pub relocation: RelocationConfig,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            marker: "Component".to_string(),
            fragment_suffix: "component.html".to_string(),
            heuristic: HeuristicConfig::default(),
            relocation: RelocationConfig::default(),
        }
    }
}

impl ProcessorConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Path::new("<inline>"))
    }

    /// Read and parse a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Lists driving the cheap pre-parse check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HeuristicConfig {
    /// Filenames ending with any of these are always parsed
    pub file_suffixes: Vec<String>,
    /// Otherwise the text must contain every one of these tokens
    pub required_tokens: Vec<String>,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            file_suffixes: vec![".component.ts".to_string()],
            required_tokens: vec!["@Component".to_string(), "@angular/core".to_string()],
        }
    }
}

/// Options for mapping fragment diagnostics back to the host file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RelocationConfig {
    /// Also shift columns of diagnostics on the first line of a fragment.
    ///
    /// Off by default: prior consumers only ever saw line numbers shifted.
    pub rebase_first_line_columns: bool,
    /// Unit of `fix.range` offsets reported by the lint engine
    pub fix_range_unit: OffsetUnit,
}

/// How character offsets into a document are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OffsetUnit {
    /// UTF-8 bytes
    #[default]
    Bytes,
    /// UTF-16 code units, as in JavaScript string indices
    Utf16,
}
