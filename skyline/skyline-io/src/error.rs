//! Error types for mesh I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading or writing STL data.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Binary STL header shorter than 80 bytes plus the triangle count.
    #[error("invalid STL header: expected {expected} bytes, got {got}")]
    InvalidHeader {
        /// Expected header size.
        expected: usize,
        /// Actual header size.
        got: usize,
    },

    /// File ended before every announced triangle record was read.
    #[error("invalid face count: expected {expected}, got {got}")]
    InvalidFaceCount {
        /// Number of triangles announced in the header.
        expected: u32,
        /// Number of complete records actually present.
        got: u32,
    },

    /// Mesh has more triangles than the u32 count field can express.
    #[error("mesh has {count} triangles, more than binary STL can store")]
    TooManyTriangles {
        /// Triangle count of the rejected mesh.
        count: usize,
    },

    /// The temporary file could not be moved over the destination.
    #[error("failed to finalize {path}: {source}")]
    Persist {
        /// Destination path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
