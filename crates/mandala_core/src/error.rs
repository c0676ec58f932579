//! Error types

use std::path::PathBuf;

use mandala_paint::ColorResolutionError;
use thiserror::Error;

use crate::shape::ShapeKind;

/// Errors raised while building, decoding or compiling descriptors
#[derive(Error, Debug)]
pub enum MandalaError {
    /// A shape kind name outside the supported set
    #[error("Parse Error: Unknown Shape `{0}`")]
    UnknownShape(String),

    /// A color string the resolver could not turn into channels
    #[error(transparent)]
    ColorResolution(#[from] ColorResolutionError),

    /// Geometry rejected by strict validation
    #[error("invalid `{attribute}` on {kind}: {reason}")]
    InvalidAttribute {
        kind: ShapeKind,
        attribute: String,
        reason: String,
    },

    /// Malformed JSON scene
    #[error("scene decoding failed: {0}")]
    Scene(#[from] serde_json::Error),

    /// Malformed TOML options
    #[error("config parsing failed: {0}")]
    Config(#[from] toml::de::Error),

    /// Options could not be written as TOML
    #[error("config serialization failed: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// Options file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for descriptor operations
pub type Result<T> = std::result::Result<T, MandalaError>;
