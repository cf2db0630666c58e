//! Error types for interlattice operations
//!
//! The numeric core never fails: degenerate geometry degrades to empty
//! results. Errors only arise at the edges, when parsing axes, validating a
//! configuration or loading one from disk.

use thiserror::Error;

/// Result type alias for interlattice operations
pub type Result<T> = std::result::Result<T, LatticeError>;

/// Errors raised while preparing an analysis
#[derive(Debug, Error)]
pub enum LatticeError {
    /// Axis text is neither `x`/`y`/`z` nor three numbers
    #[error("Invalid rotation axis '{0}': expected x, y, z or three comma-separated numbers")]
    InvalidAxis(String),

    /// Custom axis too short to normalize
    #[error("Rotation axis has (near-)zero length")]
    DegenerateAxis,

    /// A configuration value is out of range
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Configuration file could not be read
    #[error("Failed to read config '{path}': {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for an `AnalysisConfig`
    #[error("Failed to parse config '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LatticeError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            LatticeError::InvalidAxis(_) => "INVALID_AXIS",
            LatticeError::DegenerateAxis => "DEGENERATE_AXIS",
            LatticeError::InvalidParameter { .. } => "INVALID_PARAMETER",
            LatticeError::ConfigIo { .. } => "CONFIG_IO",
            LatticeError::ConfigParse { .. } => "CONFIG_PARSE",
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        LatticeError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
