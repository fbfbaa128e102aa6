//! Generator parameters.
//!
//! Every generator takes an explicit parameter value. Defaults are in
//! millimetres and produce a model that prints on a typical desktop printer
//! at one period per year.

use std::path::PathBuf;

use skyline_activity::{HeightLevel, DAYS_PER_WEEK};
use skyline_types::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_positive, GeometryError, GeometryResult};

/// Placement and resolution shared by the raster generators.
///
/// One raster pixel becomes one `voxel_scale × voxel_scale` column of
/// material; `depth` is the full extrusion height along +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VoxelParams {
    /// Minimum corner of the generated solid.
    pub origin: Point3<f64>,
    /// Edge length of one pixel in mm.
    pub voxel_scale: f64,
    /// Extrusion height in mm.
    pub depth: f64,
}

impl Default for VoxelParams {
    fn default() -> Self {
        Self {
            origin: Point3::origin(),
            voxel_scale: 0.25,
            depth: 1.0,
        }
    }
}

impl VoxelParams {
    /// Parameters with the given pixel size and extrusion height at the origin.
    #[must_use]
    pub fn new(voxel_scale: f64, depth: f64) -> Self {
        Self {
            origin: Point3::origin(),
            voxel_scale,
            depth,
        }
    }

    /// Sets the origin.
    #[must_use]
    pub const fn with_origin(mut self, origin: Point3<f64>) -> Self {
        self.origin = origin;
        self
    }

    /// Checks scale, depth and origin.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidConfig`] for a non-positive or
    /// non-finite scale or depth, or a non-finite origin.
    pub fn validate(&self) -> GeometryResult<()> {
        require_positive("voxel_scale", self.voxel_scale)?;
        require_positive("depth", self.depth)?;
        validate_origin(&self.origin)
    }
}

pub(crate) fn validate_origin(origin: &Point3<f64>) -> GeometryResult<()> {
    for value in origin.iter() {
        if !value.is_finite() {
            return Err(GeometryError::invalid_config(
                "origin",
                *value,
                "must be finite",
            ));
        }
    }
    Ok(())
}

/// Box height for each solid [`HeightLevel`], in mm above the base platform.
///
/// Heights must be positive and strictly increasing from `low` to `top`, so
/// that a higher level always yields a taller box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelHeights {
    /// Height for [`HeightLevel::Low`].
    pub low: f64,
    /// Height for [`HeightLevel::Medium`].
    pub medium: f64,
    /// Height for [`HeightLevel::High`].
    pub high: f64,
    /// Height for [`HeightLevel::Top`].
    pub top: f64,
}

impl Default for LevelHeights {
    fn default() -> Self {
        Self {
            low: 3.0,
            medium: 7.0,
            high: 12.0,
            top: 18.0,
        }
    }
}

impl LevelHeights {
    /// Heights for the four solid levels.
    #[must_use]
    pub const fn new(low: f64, medium: f64, high: f64, top: f64) -> Self {
        Self {
            low,
            medium,
            high,
            top,
        }
    }

    /// Height for a level; `0.0` for `Future` and `None`.
    ///
    /// ```
    /// use skyline_activity::HeightLevel;
    /// use skyline_geometry::LevelHeights;
    ///
    /// let heights = LevelHeights::default();
    /// assert_eq!(heights.height_for(HeightLevel::None), 0.0);
    /// assert!(heights.height_for(HeightLevel::Top) > heights.height_for(HeightLevel::High));
    /// ```
    #[must_use]
    pub const fn height_for(&self, level: HeightLevel) -> f64 {
        match level {
            HeightLevel::Future | HeightLevel::None => 0.0,
            HeightLevel::Low => self.low,
            HeightLevel::Medium => self.medium,
            HeightLevel::High => self.high,
            HeightLevel::Top => self.top,
        }
    }

    /// Checks positivity and strict ordering.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidConfig`] naming the first offending level.
    pub fn validate(&self) -> GeometryResult<()> {
        require_positive("low height", self.low)?;
        require_positive("medium height", self.medium)?;
        require_positive("high height", self.high)?;
        require_positive("top height", self.top)?;
        if self.medium <= self.low {
            return Err(GeometryError::invalid_config(
                "medium height",
                self.medium,
                "must exceed the low height",
            ));
        }
        if self.high <= self.medium {
            return Err(GeometryError::invalid_config(
                "high height",
                self.high,
                "must exceed the medium height",
            ));
        }
        if self.top <= self.high {
            return Err(GeometryError::invalid_config(
                "top height",
                self.top,
                "must exceed the high height",
            ));
        }
        Ok(())
    }
}

/// Layout of one period's grid: cell footprint, spacing and base platform.
///
/// # Examples
///
/// ```
/// use skyline_geometry::{GridLayout, LevelHeights};
///
/// let layout = GridLayout::default()
///     .with_cell_size(2.0)
///     .with_column_gap(0.5)
///     .with_heights(LevelHeights::new(1.0, 2.0, 3.0, 4.0));
/// assert!(layout.validate().is_ok());
/// assert_eq!(layout.pitch(), 2.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridLayout {
    /// Minimum corner of the platform.
    pub origin: Point3<f64>,
    /// Edge length of one cell's square footprint in mm.
    pub cell_size: f64,
    /// Empty space between adjacent columns in mm.
    pub column_gap: f64,
    /// Thickness of the base platform in mm.
    pub base_height: f64,
    /// Platform border around the cells in mm.
    pub margin: f64,
    /// Row slots reserved per column.
    ///
    /// Columns longer than this widen the platform to fit.
    pub rows_per_column: usize,
    /// Box height per level.
    pub heights: LevelHeights,
    /// Merge vertically adjacent boxes of equal height within a column.
    ///
    /// Off by default: one box per active cell.
    pub merge_runs: bool,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            origin: Point3::origin(),
            cell_size: 2.5,
            column_gap: 0.0,
            base_height: 5.0,
            margin: 2.5,
            rows_per_column: DAYS_PER_WEEK,
            heights: LevelHeights::default(),
            merge_runs: false,
        }
    }
}

impl GridLayout {
    /// Creates a layout with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the origin.
    #[must_use]
    pub const fn with_origin(mut self, origin: Point3<f64>) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the cell size.
    #[must_use]
    pub const fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Sets the gap between columns.
    #[must_use]
    pub const fn with_column_gap(mut self, gap: f64) -> Self {
        self.column_gap = gap;
        self
    }

    /// Sets the base platform thickness.
    #[must_use]
    pub const fn with_base_height(mut self, height: f64) -> Self {
        self.base_height = height;
        self
    }

    /// Sets the platform border.
    #[must_use]
    pub const fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the number of row slots per column.
    #[must_use]
    pub const fn with_rows_per_column(mut self, rows: usize) -> Self {
        self.rows_per_column = rows;
        self
    }

    /// Sets the level heights.
    #[must_use]
    pub const fn with_heights(mut self, heights: LevelHeights) -> Self {
        self.heights = heights;
        self
    }

    /// Enables or disables merging of equal-height runs.
    #[must_use]
    pub const fn with_merge_runs(mut self, merge: bool) -> Self {
        self.merge_runs = merge;
        self
    }

    /// Distance between the left edges of adjacent columns.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.cell_size + self.column_gap
    }

    /// Validates the layout.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidConfig`] if any dimension is out of
    /// range or the level heights are not strictly increasing.
    pub fn validate(&self) -> GeometryResult<()> {
        validate_origin(&self.origin)?;
        require_positive("cell_size", self.cell_size)?;
        require_non_negative("column_gap", self.column_gap)?;
        require_positive("base_height", self.base_height)?;
        require_non_negative("margin", self.margin)?;
        if self.rows_per_column == 0 {
            return Err(GeometryError::invalid_config(
                "rows_per_column",
                0.0,
                "must be at least 1",
            ));
        }
        self.heights.validate()
    }
}

/// Where to find the font used for text extrusion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FontSource {
    /// The platform's installed fonts, sans-serif family.
    #[default]
    System,
    /// A TrueType/OpenType file; system fonts are used if it cannot be loaded.
    File(PathBuf),
}

/// Parameters for [`build_text`](crate::build_text).
///
/// # Examples
///
/// ```
/// use skyline_geometry::{FontSource, TextRenderConfig};
///
/// let config = TextRenderConfig::default()
///     .with_voxel_scale(0.2)
///     .with_font_size(24.0)
///     .with_font(FontSource::File("fonts/Inter.ttf".into()));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextRenderConfig {
    /// Placement, pixel size and extrusion height.
    pub voxel: VoxelParams,
    /// Main text size in pixels.
    pub font_size: f32,
    /// Label size relative to `font_size`.
    pub label_scale: f32,
    /// Horizontal space between text and label, in multiples of `font_size`.
    pub label_spacing: f32,
    /// Pixels with coverage above this fraction become solid.
    pub coverage_threshold: f32,
    /// Font lookup.
    pub font: FontSource,
}

impl Default for TextRenderConfig {
    fn default() -> Self {
        Self {
            voxel: VoxelParams::default(),
            font_size: 32.0,
            label_scale: 0.6,
            label_spacing: 0.5,
            coverage_threshold: 0.5,
            font: FontSource::System,
        }
    }
}

impl TextRenderConfig {
    /// Creates a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the origin.
    #[must_use]
    pub const fn with_origin(mut self, origin: Point3<f64>) -> Self {
        self.voxel.origin = origin;
        self
    }

    /// Sets the pixel size in mm.
    #[must_use]
    pub const fn with_voxel_scale(mut self, scale: f64) -> Self {
        self.voxel.voxel_scale = scale;
        self
    }

    /// Sets the extrusion height in mm.
    #[must_use]
    pub const fn with_depth(mut self, depth: f64) -> Self {
        self.voxel.depth = depth;
        self
    }

    /// Sets the main text size in pixels.
    #[must_use]
    pub const fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Sets the label size relative to the main text.
    #[must_use]
    pub const fn with_label_scale(mut self, scale: f32) -> Self {
        self.label_scale = scale;
        self
    }

    /// Sets the coverage threshold.
    #[must_use]
    pub const fn with_coverage_threshold(mut self, threshold: f32) -> Self {
        self.coverage_threshold = threshold;
        self
    }

    /// Sets the font source.
    #[must_use]
    pub fn with_font(mut self, font: FontSource) -> Self {
        self.font = font;
        self
    }

    /// Validates the config.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidConfig`] for a bad scale, depth, font
    /// size, label scale, spacing or threshold.
    pub fn validate(&self) -> GeometryResult<()> {
        self.voxel.validate()?;
        require_positive("font_size", f64::from(self.font_size))?;
        require_positive("label_scale", f64::from(self.label_scale))?;
        require_non_negative("label_spacing", f64::from(self.label_spacing))?;
        if !(0.0..1.0).contains(&self.coverage_threshold) {
            return Err(GeometryError::invalid_config(
                "coverage_threshold",
                f64::from(self.coverage_threshold),
                "must be in [0, 1)",
            ));
        }
        Ok(())
    }
}

/// Parameters for [`build_relief`](crate::build_relief).
///
/// # Examples
///
/// ```
/// use skyline_geometry::ReliefConfig;
///
/// let config = ReliefConfig::default().with_depth(2.0).with_downsample(64);
/// assert_eq!(config.effective_min_height(), 0.002);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReliefConfig {
    /// Placement, pixel size and maximum height.
    pub voxel: VoxelParams,
    /// Pixels shorter than this are skipped; `None` means `depth / 1000`.
    pub min_height: Option<f64>,
    /// Resize so the longer edge is at most this many pixels.
    pub downsample: Option<u32>,
}

impl ReliefConfig {
    /// Creates a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the origin.
    #[must_use]
    pub const fn with_origin(mut self, origin: Point3<f64>) -> Self {
        self.voxel.origin = origin;
        self
    }

    /// Sets the pixel size in mm.
    #[must_use]
    pub const fn with_voxel_scale(mut self, scale: f64) -> Self {
        self.voxel.voxel_scale = scale;
        self
    }

    /// Sets the height of a fully bright pixel in mm.
    #[must_use]
    pub const fn with_depth(mut self, depth: f64) -> Self {
        self.voxel.depth = depth;
        self
    }

    /// Sets the skip threshold.
    #[must_use]
    pub const fn with_min_height(mut self, height: f64) -> Self {
        self.min_height = Some(height);
        self
    }

    /// Limits the longer image edge to `max_edge` pixels.
    #[must_use]
    pub const fn with_downsample(mut self, max_edge: u32) -> Self {
        self.downsample = Some(max_edge);
        self
    }

    /// The skip threshold actually applied.
    #[must_use]
    pub fn effective_min_height(&self) -> f64 {
        self.min_height.unwrap_or(self.voxel.depth / 1000.0)
    }

    /// Validates the config.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidConfig`] for a bad scale, depth,
    /// minimum height or a zero downsample edge.
    pub fn validate(&self) -> GeometryResult<()> {
        self.voxel.validate()?;
        if let Some(min_height) = self.min_height {
            require_non_negative("min_height", min_height)?;
        }
        if self.downsample == Some(0) {
            return Err(GeometryError::invalid_config(
                "downsample",
                0.0,
                "must be at least 1 pixel",
            ));
        }
        Ok(())
    }
}

/// Spacing used by [`compose`](crate::compose).
///
/// The defaults leave no gaps between periods or in front of them, so the
/// platforms and the front strip touch and print as one piece.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComposeLayout {
    /// Space between adjacent periods along X in mm.
    pub period_gap: f64,
    /// Space between the grids and the front strip along Y in mm.
    pub label_gap: f64,
    /// Space between the relief and the label along X in mm.
    pub strip_gap: f64,
}

impl Default for ComposeLayout {
    fn default() -> Self {
        Self {
            period_gap: 0.0,
            label_gap: 0.0,
            strip_gap: 2.0,
        }
    }
}

impl ComposeLayout {
    /// Creates a layout with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the gap between periods.
    #[must_use]
    pub const fn with_period_gap(mut self, gap: f64) -> Self {
        self.period_gap = gap;
        self
    }

    /// Sets the gap in front of the grids.
    #[must_use]
    pub const fn with_label_gap(mut self, gap: f64) -> Self {
        self.label_gap = gap;
        self
    }

    /// Sets the gap between relief and label.
    #[must_use]
    pub const fn with_strip_gap(mut self, gap: f64) -> Self {
        self.strip_gap = gap;
        self
    }

    /// Validates the layout.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidConfig`] for a negative or non-finite gap.
    pub fn validate(&self) -> GeometryResult<()> {
        require_non_negative("period_gap", self.period_gap)?;
        require_non_negative("label_gap", self.label_gap)?;
        require_non_negative("strip_gap", self.strip_gap)
    }
}
