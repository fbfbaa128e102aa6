//! End-to-end model generation.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use skyline_activity::ActivityGrid;
use skyline_geometry::{
    build_grid, build_relief, build_text, compose, ComposeLayout, GeometryError, GridLayout,
    ReliefConfig, TextRenderConfig,
};
use skyline_types::{MeshBounds, TriangleMesh};
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SkylineResult;
use crate::years::{format_year_range, output_filename};

/// One time bucket of activity, normally a calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Period {
    /// The period's activity.
    pub grid: ActivityGrid,
    /// Human-readable name, used in logs.
    pub label: String,
    /// Count that maps to the top level; the grid's own maximum if unset.
    #[cfg_attr(feature = "serde", serde(default))]
    pub context_max: Option<u32>,
}

impl Period {
    /// A period normalized against its own maximum.
    #[must_use]
    pub fn new(grid: ActivityGrid, label: impl Into<String>) -> Self {
        Self {
            grid,
            label: label.into(),
            context_max: None,
        }
    }

    /// Normalize against `max` instead of the grid's own maximum.
    #[must_use]
    pub const fn with_context_max(mut self, max: u32) -> Self {
        self.context_max = Some(max);
        self
    }

    /// The quantization context actually used.
    #[must_use]
    pub fn effective_context_max(&self) -> u32 {
        self.context_max.unwrap_or_else(|| self.grid.max_count())
    }
}

/// Everything that shapes a run.
///
/// # Examples
///
/// ```
/// use skyline::{GridLayout, SkylineConfig};
///
/// let config = SkylineConfig::default()
///     .with_grid(GridLayout::default().with_cell_size(3.0))
///     .with_relief_image("avatar.png")
///     .with_output("models/skyline");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkylineConfig {
    /// Layout of each period's grid.
    pub grid: GridLayout,
    /// Text extrusion for the user name and year label.
    pub text: TextRenderConfig,
    /// Relief extrusion for the optional image.
    pub relief: ReliefConfig,
    /// Placement of periods and the front strip.
    pub compose: ComposeLayout,
    /// Image to print as a relief next to the label.
    pub relief_image: Option<PathBuf>,
    /// Explicit output path; derived from user and years if unset.
    pub output: Option<PathBuf>,
}

impl SkylineConfig {
    /// Creates a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the grid layout.
    #[must_use]
    pub const fn with_grid(mut self, grid: GridLayout) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the text config.
    #[must_use]
    pub fn with_text(mut self, text: TextRenderConfig) -> Self {
        self.text = text;
        self
    }

    /// Sets the relief config.
    #[must_use]
    pub const fn with_relief(mut self, relief: ReliefConfig) -> Self {
        self.relief = relief;
        self
    }

    /// Sets the composition layout.
    #[must_use]
    pub const fn with_compose(mut self, compose: ComposeLayout) -> Self {
        self.compose = compose;
        self
    }

    /// Adds a relief image.
    #[must_use]
    pub fn with_relief_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.relief_image = Some(path.into());
        self
    }

    /// Sets the output path.
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Validates every part.
    ///
    /// # Errors
    ///
    /// Returns the first [`GeometryError::InvalidConfig`] found.
    pub fn validate(&self) -> SkylineResult<()> {
        self.grid.validate()?;
        self.text.validate()?;
        self.relief.validate()?;
        self.compose.validate()?;
        Ok(())
    }
}

/// Outcome of [`generate_skyline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkylineReport {
    /// Where the model was written.
    pub path: PathBuf,
    /// Triangles in the model.
    pub triangles: usize,
    /// File size in bytes.
    pub bytes: usize,
}

/// Build the complete model in memory.
///
/// Period grids are generated in parallel; their placement depends only on
/// their index and width, so the result is identical to a sequential build.
/// `user` is extruded as the main text and `year_label` as the secondary
/// label. A relief image that cannot be loaded is logged and left out.
///
/// # Errors
///
/// Any configuration, font or grid error aborts the run.
///
/// # Example
///
/// ```
/// use skyline::{build_model, ActivityGrid, Period, SkylineConfig};
///
/// let periods = vec![
///     Period::new(ActivityGrid::from_counts(vec![vec![0, 5, 10]]), "2023"),
///     Period::new(ActivityGrid::from_counts(vec![vec![1]]), "2024"),
/// ];
/// // Blank text skips font loading.
/// let model = build_model("", "", &periods, &SkylineConfig::default()).unwrap();
/// assert_eq!(model.len(), 12 * (3 + 2));
/// ```
pub fn build_model(
    user: &str,
    year_label: &str,
    periods: &[Period],
    config: &SkylineConfig,
) -> SkylineResult<TriangleMesh> {
    config.validate()?;

    let grids = periods
        .par_iter()
        .map(|period| {
            let mesh = build_grid(&period.grid, period.effective_context_max(), &config.grid)?;
            debug!(
                period = %period.label,
                context_max = period.effective_context_max(),
                triangles = mesh.len(),
                "Generated period"
            );
            Ok(mesh)
        })
        .collect::<Result<Vec<_>, GeometryError>>()?;

    let label = build_text(user, year_label, &config.text)?;
    let relief = config
        .relief_image
        .as_deref()
        .and_then(|path| load_relief(path, &config.relief));

    let model = compose(grids, label, relief, &config.compose)?;
    if let Some(b) = model.bounds_opt() {
        info!(
            periods = periods.len(),
            triangles = model.len(),
            width = b.width(),
            depth = b.depth(),
            height = b.height(),
            "Built skyline model"
        );
    }
    Ok(model)
}

/// Build the model for `user` over `start_year..=end_year` and write it.
///
/// The label printed on the model is [`format_year_range`] of the years; the
/// file goes to [`SkylineConfig::output`] or the default name from
/// [`output_filename`]. Nothing is written if generation fails.
///
/// # Errors
///
/// Returns generation errors from [`build_model`] and write errors from the
/// serializer.
pub fn generate_skyline(
    user: &str,
    start_year: i32,
    end_year: i32,
    periods: &[Period],
    config: &SkylineConfig,
) -> SkylineResult<SkylineReport> {
    let year_label = format_year_range(start_year, end_year);
    let model = build_model(user, &year_label, periods, config)?;

    let path = output_filename(user, start_year, end_year, config.output.as_deref());
    skyline_io::save_stl(&model, &path)?;

    let report = SkylineReport {
        bytes: skyline_io::binary_stl_size(model.len()),
        triangles: model.len(),
        path,
    };
    info!(
        user,
        years = %year_label,
        path = %report.path.display(),
        bytes = report.bytes,
        "Wrote skyline"
    );
    Ok(report)
}

fn load_relief(path: &Path, config: &ReliefConfig) -> Option<TriangleMesh> {
    match build_relief(path, config) {
        Ok(mesh) => Some(mesh),
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "Skipping relief image"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_defaults_to_grid_maximum() {
        let period = Period::new(ActivityGrid::from_counts(vec![vec![3, 8]]), "2024");
        assert_eq!(period.effective_context_max(), 8);
        assert_eq!(period.with_context_max(20).effective_context_max(), 20);
    }

    #[test]
    fn invalid_config_fails_before_work() {
        let config = SkylineConfig::default().with_grid(GridLayout::default().with_cell_size(0.0));
        let err = build_model("", "", &[], &config).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn unreadable_relief_is_skipped() {
        let config = SkylineConfig::default().with_relief_image("/no/such/image.png");
        let periods = [Period::new(ActivityGrid::from_counts(vec![vec![1]]), "2024")];
        let model = build_model("", "", &periods, &config).unwrap();
        assert_eq!(model.len(), 24);
    }

    #[test]
    fn no_periods_no_text_is_empty() {
        let model = build_model("", "", &[], &SkylineConfig::default()).unwrap();
        assert!(model.is_empty());
    }
}
