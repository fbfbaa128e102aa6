//! Error types for mesh generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh generation.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors that can occur while generating skyline geometry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeometryError {
    /// A configuration value is out of range.
    #[error("invalid {parameter}: {value} ({reason})")]
    InvalidConfig {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
        /// What the value must satisfy.
        reason: &'static str,
    },

    /// A box was requested with a non-positive or non-finite dimension.
    #[error("degenerate cuboid: {width} x {depth} x {height} at ({x}, {y}, {z})")]
    DegenerateCuboid {
        /// Origin X.
        x: f64,
        /// Origin Y.
        y: f64,
        /// Origin Z.
        z: f64,
        /// Extent along X.
        width: f64,
        /// Extent along Y.
        depth: f64,
        /// Extent along Z.
        height: f64,
    },

    /// No font could be loaded for text extrusion, even after falling back
    /// to the system fonts.
    #[error("no usable font: {message}")]
    Font {
        /// What was tried.
        message: String,
    },

    /// The image data could not be decoded.
    #[error("failed to decode image {path}: {source}")]
    ImageDecode {
        /// Image path.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: image::ImageError,
    },

    /// An input file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl GeometryError {
    /// Create an `InvalidConfig` error.
    #[must_use]
    pub const fn invalid_config(parameter: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidConfig {
            parameter,
            value,
            reason,
        }
    }

    /// True for configuration errors.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

/// Reject values that are not finite and strictly positive.
pub(crate) fn require_positive(parameter: &'static str, value: f64) -> GeometryResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid_config(
            parameter,
            value,
            "must be positive and finite",
        ))
    }
}

/// Reject values that are negative or not finite.
pub(crate) fn require_non_negative(parameter: &'static str, value: f64) -> GeometryResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::invalid_config(
            parameter,
            value,
            "must be non-negative and finite",
        ))
    }
}
