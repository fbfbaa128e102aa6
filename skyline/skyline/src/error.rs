//! Top-level error type.

use skyline_geometry::GeometryError;
use skyline_io::IoError;
use thiserror::Error;

/// Result type for the skyline pipeline.
pub type SkylineResult<T> = Result<T, SkylineError>;

/// Errors that can abort a skyline run.
///
/// Generator and serializer errors pass through unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SkylineError {
    /// A generator failed or was misconfigured.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The model could not be written.
    #[error(transparent)]
    Io(#[from] IoError),

    /// A year range could not be parsed or is out of bounds.
    #[error("invalid year range {input:?}: {reason}")]
    InvalidYearRange {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A calendar date is not a valid `YYYY-MM-DD` or the span is reversed.
    #[error("invalid date {input:?}: {reason}")]
    InvalidDate {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl SkylineError {
    /// True for configuration errors, including bad year ranges and dates.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        match self {
            Self::Geometry(err) => err.is_config(),
            Self::InvalidYearRange { .. } | Self::InvalidDate { .. } => true,
            Self::Io(_) => false,
        }
    }
}
