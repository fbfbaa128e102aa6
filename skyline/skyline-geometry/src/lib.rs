//! Solid generators for skyline models.
//!
//! Everything here emits axis-aligned boxes into a
//! [`TriangleMesh`](skyline_types::TriangleMesh):
//!
//! - [`build_grid`] - one period's activity grid as a stepped skyline on a
//!   base platform
//! - [`build_text`] - text and a secondary label extruded pixel by pixel
//! - [`build_relief`] / [`relief_from_image`] - an image as a brightness relief
//! - [`compose`] - periods side by side, the text and relief strip in front
//!
//! All generators take an explicit parameter value ([`GridLayout`],
//! [`TextRenderConfig`], [`ReliefConfig`], [`ComposeLayout`]) that is
//! validated before any geometry is produced.
//!
//! # Example
//!
//! ```
//! use skyline_activity::ActivityGrid;
//! use skyline_geometry::{build_grid, compose, ComposeLayout, GridLayout};
//! use skyline_types::TriangleMesh;
//!
//! let layout = GridLayout::default();
//! let years = [
//!     ActivityGrid::from_counts(vec![vec![1, 2, 3], vec![4, 0, 0]]),
//!     ActivityGrid::from_counts(vec![vec![0, 0, 9]]),
//! ];
//! let periods = years
//!     .iter()
//!     .map(|g| build_grid(g, g.max_count(), &layout))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! let model = compose(periods, TriangleMesh::new(), None, &ComposeLayout::default()).unwrap();
//! assert_eq!(model.len(), 12 * (5 + 2));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bitmap;
mod compose;
mod cuboid;
mod error;
mod grid;
mod params;
mod relief;
mod text;

pub use bitmap::{extrude_bitmap, CoverageBitmap};
pub use compose::{compose, period_offsets};
pub use cuboid::{cuboid, push_cuboid, CUBOID_TRIANGLES};
pub use error::{GeometryError, GeometryResult};
pub use grid::{build_grid, grid_footprint, stacked_levels};
pub use params::{
    ComposeLayout, FontSource, GridLayout, LevelHeights, ReliefConfig, TextRenderConfig,
    VoxelParams,
};
pub use relief::{build_relief, pixel_intensity, relief_from_image};
pub use text::{build_text, TextRasterizer};
