// Rule file loaders

use crate::errors::{ConfigResult, ConfigurationError};
use crate::rules::RuleSet;
use rulegate_log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Supported rule file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    Json,
    Toml,
}

impl RuleFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(RuleFormat::Json),
            "toml" => Some(RuleFormat::Toml),
            _ => None,
        }
    }
}

/// Loads a [`RuleSet`] from a JSON or TOML document.
///
/// The document is a table of attribute names to rule specifications,
/// either joined strings or arrays of tokens:
///
/// ```toml
/// name = "required|alpha|max:20"
/// email = ["required", "email"]
/// ```
///
/// Attributes keep the order they appear in the document.
pub struct RuleLoader {
    format: RuleFormat,
}

impl RuleLoader {
    pub fn new(format: RuleFormat) -> Self {
        Self { format }
    }

    /// Detect the format from the file extension
    pub fn auto(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigurationError::Load(format!("no file extension: {}", path.display())))?;

        let format = RuleFormat::from_extension(ext)
            .ok_or_else(|| ConfigurationError::Load(format!("unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    /// Read and parse a rule file
    pub fn load_file(&self, path: impl AsRef<Path>) -> ConfigResult<RuleSet> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigurationError::Load(format!("{}: {}", path.display(), e)))?;

        debug!("Loading rules from {}", path.display());
        self.parse(&content)
    }

    /// Parse a rule document
    pub fn parse(&self, content: &str) -> ConfigResult<RuleSet> {
        let document = match self.format {
            RuleFormat::Json => serde_json::from_str::<Value>(content)
                .map_err(|e| ConfigurationError::Parse(format!("JSON parse error: {}", e)))?,
            RuleFormat::Toml => toml::from_str::<Value>(content)
                .map_err(|e| ConfigurationError::Parse(format!("TOML parse error: {}", e)))?,
        };

        RuleSet::from_json(&document)
    }
}
