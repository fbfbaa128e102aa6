//! Activity data model and height quantization for skyline models.
//!
//! - [`ActivityCell`] / [`ActivityGrid`] - per-day counts arranged in weekly columns
//! - [`HeightLevel`] - the discrete intensity scale
//! - [`quantize`] / [`quantize_cell`] - the pure count-to-level mapping
//!
//! This crate has no geometry dependencies so that a text preview of the same
//! data can import the quantizer without pulling in the mesh pipeline.
//!
//! # Example
//!
//! ```
//! use skyline_activity::{quantize_cell, ActivityGrid, HeightLevel};
//!
//! let grid = ActivityGrid::from_counts(vec![vec![0, 5, 10]]);
//! let max = grid.max_count();
//! let levels: Vec<_> = grid.cells().map(|c| quantize_cell(c, max)).collect();
//! assert_eq!(levels, [HeightLevel::None, HeightLevel::Medium, HeightLevel::Top]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod grid;
mod level;

pub use grid::{ActivityCell, ActivityGrid, DAYS_PER_WEEK};
pub use level::{quantize, quantize_cell, HeightLevel, LOW_THRESHOLD, MEDIUM_THRESHOLD};
