//! Turn a contribution calendar into a 3D-printable skyline.
//!
//! This umbrella crate re-exports the `skyline-*` crates and adds the
//! pipeline that ties them together: one stepped grid per period, the user
//! name and year range extruded as text, an optional image relief, all laid
//! out side by side and written as a binary STL.
//!
//! # Quick Start
//!
//! ```no_run
//! use skyline::prelude::*;
//!
//! let periods = vec![
//!     Period::new(ActivityGrid::from_counts(vec![vec![0, 2, 5, 1, 0, 0, 3]; 52]), "2023"),
//!     Period::new(ActivityGrid::from_counts(vec![vec![4, 4, 0, 1, 9, 0, 0]; 52]), "2024"),
//! ];
//!
//! let config = SkylineConfig::default().with_relief_image("avatar.png");
//! let report = generate_skyline("octocat", 2023, 2024, &periods, &config).unwrap();
//! println!("wrote {} triangles to {}", report.triangles, report.path.display());
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - `Triangle`, `TriangleMesh`, `Aabb`
//! - [`activity`] - `ActivityGrid` and the shared height-level quantizer
//! - [`geometry`] - Grid, text and relief generators and the composer
//! - [`io`] - Binary STL writer and reader
//!
//! # Logging
//!
//! Progress is reported through `tracing`. Install a subscriber (for example
//! `tracing-subscriber`) in the binary to see it.
//!
//! # Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` for grids, periods and configs

#![warn(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod pipeline;
mod years;

// =============================================================================
// Re-exports
// =============================================================================

/// Triangle, mesh and bounding-box types.
pub use skyline_types as types;

/// Activity grid and height-level quantizer.
pub use skyline_activity as activity;

/// Solid generators and the composer.
pub use skyline_geometry as geometry;

/// Binary STL output.
pub use skyline_io as io;

pub use error::{SkylineError, SkylineResult};
pub use pipeline::{build_model, generate_skyline, Period, SkylineConfig, SkylineReport};
pub use years::{
    format_year_range, output_filename, parse_year_range, span_output_filename, DateSpan,
    GITHUB_LAUNCH_YEAR,
};

pub use skyline_activity::{quantize, ActivityCell, ActivityGrid, HeightLevel};
pub use skyline_geometry::{
    ComposeLayout, FontSource, GridLayout, LevelHeights, ReliefConfig, TextRenderConfig,
};

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for building skylines.
///
/// ```
/// use skyline::prelude::*;
/// ```
pub mod prelude {
    pub use skyline_activity::{quantize, quantize_cell, ActivityCell, ActivityGrid, HeightLevel};
    pub use skyline_geometry::{
        ComposeLayout, FontSource, GridLayout, LevelHeights, ReliefConfig, TextRenderConfig,
    };
    pub use skyline_io::{load_stl, save_stl};
    pub use skyline_types::{Aabb, MeshBounds, Point3, Triangle, TriangleMesh};

    pub use crate::{
        build_model, format_year_range, generate_skyline, Period, SkylineConfig, SkylineError,
        SkylineReport,
    };
}

// =============================================================================
// Tests
// =============================================================================
