//! Compile options (mandala.toml)

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MandalaError, Result};

/// Options controlling normalization and compilation
///
/// ```toml
/// strict = true
/// round_alpha = false
/// extra_attributes = ["data-id", "pointer-events"]
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CompileOptions {
    /// Reject descriptors whose required geometry is missing or not finite
    #[serde(default)]
    pub strict: bool,
    /// Round the alpha channel of paint strings to an integer
    #[serde(default = "default_true")]
    pub round_alpha: bool,
    /// Attribute names passed to the backend on top of the built-in list
    #[serde(default)]
    pub extra_attributes: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            strict: false,
            round_alpha: true,
            extra_attributes: Vec::new(),
        }
    }
}

impl CompileOptions {
    /// Permissive defaults with strict validation switched on
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load options from a file (or `mandala.toml` inside a directory)
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("mandala.toml")
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path).map_err(|source| MandalaError::Io {
            path: config_path.clone(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
