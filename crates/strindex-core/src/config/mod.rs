//! Configuration for strindex
//!
//! Settings are few and all optional:
//!
//! ```toml
//! [resolver]
//! maxDepth = 64
//! maxLength = 1048576
//!
//! [display]
//! compactSingleLine = false
//! ```
//!
//! The same layout is accepted as JSON. When no explicit path is given the
//! loader walks up from a start directory looking for `.strindexrc.toml`,
//! `.strindexrc.json` or `strindex.toml`.

mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::StrIndexError;
use crate::result::Result;

/// Default bound on nested reference and initializer lookups
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default bound on the UTF-16 length of a resolved string value
pub const DEFAULT_MAX_LENGTH: usize = 1 << 20;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrIndexConfig {
    #[serde(default)]
    pub resolver: ResolverConfiguration,

    #[serde(default)]
    pub display: DisplayConfiguration,
}

/// Constant value resolution settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfiguration {
    /// How many references/initializers may be followed before giving up
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Longest string value, in UTF-16 units, the resolver builds
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

/// Status text settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfiguration {
    /// Render `String index N` for positions on the first line
    #[serde(default)]
    pub compact_single_line: bool,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

impl Default for ResolverConfiguration {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl StrIndexConfig {
    /// Load configuration from a file
    ///
    /// Supports TOML (.toml) and JSON (.json) formats
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| StrIndexError::io_error(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(StrIndexError::config_error(format!(
                "Unsupported file extension for '{}' (expected .toml or .json)",
                path.display()
            ))),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| StrIndexError::config_error(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| StrIndexError::config_error(e.to_string()))
    }
}
