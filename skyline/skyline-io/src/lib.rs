//! Mesh file output for skyline models.
//!
//! Writes [`TriangleMesh`](skyline_types::TriangleMesh) values as **binary
//! STL**, the de-facto interchange format for 3D printing, and reads them back
//! for verification.
//!
//! Saving is atomic: a crash or I/O error part-way through never leaves a
//! correctly-sized but truncated STL at the destination.
//!
//! # Example
//!
//! ```no_run
//! use skyline_io::{load_stl, save_stl};
//! use skyline_types::TriangleMesh;
//!
//! let mesh = TriangleMesh::new();
//! save_stl(&mesh, "output.stl").unwrap();
//! let loaded = load_stl("output.stl").unwrap();
//! assert_eq!(loaded.len(), 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod stl;

pub use error::{IoError, IoResult};
pub use stl::{
    binary_stl_size, load_stl, read_stl, save_stl, save_stl_with_header, write_stl,
    write_stl_with_header, DEFAULT_HEADER, HEADER_SIZE, TRIANGLE_SIZE,
};

use std::path::{Path, PathBuf};

/// File extension of the output format.
pub const STL_EXTENSION: &str = "stl";

/// Check whether a path carries the `.stl` extension (case-insensitive).
///
/// ```
/// assert!(skyline_io::has_stl_extension("model.STL"));
/// assert!(!skyline_io::has_stl_extension("model.obj"));
/// assert!(!skyline_io::has_stl_extension("model"));
/// ```
#[must_use]
pub fn has_stl_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(STL_EXTENSION))
}

/// Append `.stl` to a path unless it already ends with it.
///
/// An existing different extension is kept, so `model.v2` becomes
/// `model.v2.stl`.
///
/// ```
/// use std::path::PathBuf;
///
/// assert_eq!(skyline_io::with_stl_extension("out"), PathBuf::from("out.stl"));
/// assert_eq!(skyline_io::with_stl_extension("out.Stl"), PathBuf::from("out.Stl"));
/// assert_eq!(skyline_io::with_stl_extension("out.v2"), PathBuf::from("out.v2.stl"));
/// ```
#[must_use]
pub fn with_stl_extension<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if has_stl_extension(path) {
        return path.to_path_buf();
    }
    let mut os = path.as_os_str().to_os_string();
    os.push(".");
    os.push(STL_EXTENSION);
    PathBuf::from(os)
}
