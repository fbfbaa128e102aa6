//! Activity grid to stepped-box solid.
//!
//! Each period becomes a base platform with one box per active day standing
//! on it. Columns run along +X in chronological order; within a column the
//! active days are packed toward the front (low Y) in calendar order, so
//! empty days leave no holes between boxes.

use skyline_activity::{quantize_cell, ActivityCell, ActivityGrid, HeightLevel};
use skyline_types::{Point3, TriangleMesh};
use tracing::debug;

use crate::cuboid::{push_cuboid, CUBOID_TRIANGLES};
use crate::error::GeometryResult;
use crate::params::GridLayout;

/// Solid levels of a column in display order.
///
/// `None` and `Future` cells are dropped; the remaining levels keep their
/// relative order and occupy row slots `0..k`.
///
/// ```
/// use skyline_activity::{ActivityCell, HeightLevel};
/// use skyline_geometry::stacked_levels;
///
/// let column = [ActivityCell::new(0), ActivityCell::new(5), ActivityCell::new(10)];
/// assert_eq!(
///     stacked_levels(&column, 10),
///     vec![HeightLevel::Medium, HeightLevel::Top]
/// );
/// ```
#[must_use]
pub fn stacked_levels(column: &[ActivityCell], context_max: u32) -> Vec<HeightLevel> {
    column
        .iter()
        .map(|cell| quantize_cell(cell, context_max))
        .filter(|level| level.is_solid())
        .collect()
}

/// Platform width and depth for a grid under a layout.
///
/// The depth covers `rows_per_column` slots, or the longest column if that is
/// longer.
#[must_use]
pub fn grid_footprint(grid: &ActivityGrid, layout: &GridLayout) -> (f64, f64) {
    let columns = grid.column_count().max(1);
    let rows = layout.rows_per_column.max(grid.max_column_len());
    let width = 2.0 * layout.margin + count_to_f64(columns) * layout.pitch() - layout.column_gap;
    let depth = 2.0 * layout.margin + count_to_f64(rows) * layout.cell_size;
    (width, depth)
}

/// Build the solid for one period.
///
/// `context_max` is the count that maps to the top level, normally
/// [`ActivityGrid::max_count`]. The mesh is the base platform followed by one
/// box per retained cell (or per run of equal levels when
/// [`GridLayout::merge_runs`] is set), so it has `12 * (boxes + 1)` triangles.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidConfig`](crate::GeometryError::InvalidConfig)
/// if the layout does not validate.
///
/// # Example
///
/// ```
/// use skyline_activity::ActivityGrid;
/// use skyline_geometry::{build_grid, GridLayout};
///
/// let grid = ActivityGrid::from_counts(vec![vec![0, 5, 10]]);
/// let mesh = build_grid(&grid, grid.max_count(), &GridLayout::default()).unwrap();
/// // Platform plus two boxes.
/// assert_eq!(mesh.len(), 36);
/// ```
pub fn build_grid(
    grid: &ActivityGrid,
    context_max: u32,
    layout: &GridLayout,
) -> GeometryResult<TriangleMesh> {
    layout.validate()?;

    let (width, depth) = grid_footprint(grid, layout);
    let mut mesh = TriangleMesh::with_capacity(CUBOID_TRIANGLES * (grid.cells().count() + 1));
    push_cuboid(&mut mesh, layout.origin, width, depth, layout.base_height)?;

    let top = layout.origin.z + layout.base_height;
    let mut boxes = 0usize;
    for (index, column) in grid.columns().iter().enumerate() {
        let x = layout.origin.x + layout.margin + count_to_f64(index) * layout.pitch();
        let levels = stacked_levels(column, context_max);
        for run in runs(&levels, layout.merge_runs) {
            let y = layout.origin.y + layout.margin + count_to_f64(run.slot) * layout.cell_size;
            push_cuboid(
                &mut mesh,
                Point3::new(x, y, top),
                layout.cell_size,
                count_to_f64(run.len) * layout.cell_size,
                layout.heights.height_for(run.level),
            )?;
            boxes += 1;
        }
    }

    debug!(
        columns = grid.column_count(),
        context_max,
        boxes,
        triangles = mesh.len(),
        "Built grid mesh"
    );
    Ok(mesh)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    slot: usize,
    len: usize,
    level: HeightLevel,
}

fn runs(levels: &[HeightLevel], merge: bool) -> Vec<Run> {
    let mut out: Vec<Run> = Vec::with_capacity(levels.len());
    for (slot, &level) in levels.iter().enumerate() {
        match out.last_mut() {
            Some(last) if merge && last.level == level => last.len += 1,
            _ => out.push(Run {
                slot,
                len: 1,
                level,
            }),
        }
    }
    out
}

#[allow(clippy::cast_precision_loss)]
fn count_to_f64(n: usize) -> f64 {
    n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::LevelHeights;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use skyline_types::MeshBounds;

    fn layout() -> GridLayout {
        GridLayout::default()
            .with_cell_size(1.0)
            .with_margin(0.5)
            .with_base_height(2.0)
            .with_heights(LevelHeights::new(1.0, 2.0, 3.0, 4.0))
    }

    /// Split a grid mesh into per-box chunks, platform first.
    fn boxes(mesh: &TriangleMesh) -> Vec<TriangleMesh> {
        mesh.triangles
            .chunks(CUBOID_TRIANGLES)
            .map(|c| TriangleMesh::from_triangles(c.to_vec()))
            .collect()
    }

    #[test]
    fn empty_grid_is_platform_only() {
        let mesh = build_grid(&ActivityGrid::new(), 0, &layout()).unwrap();
        assert_eq!(mesh.len(), CUBOID_TRIANGLES);
        let b = mesh.bounds();
        assert_relative_eq!(b.width(), 2.0);
        assert_relative_eq!(b.depth(), 1.0 + 7.0);
        assert_relative_eq!(b.height(), 2.0);
    }

    #[test]
    fn increasing_column_keeps_order() {
        let grid = ActivityGrid::from_counts(vec![vec![0, 5, 10]]);
        let mesh = build_grid(&grid, 10, &layout()).unwrap();
        let chunks = boxes(&mesh);
        assert_eq!(chunks.len(), 3);

        let first = chunks[1].bounds();
        let second = chunks[2].bounds();
        assert_relative_eq!(first.min.y, 0.5);
        assert_relative_eq!(second.min.y, 1.5);
        assert_relative_eq!(first.min.z, 2.0);
        assert_relative_eq!(first.height(), 2.0);
        assert_relative_eq!(second.height(), 4.0);
        assert!(second.height() > first.height());
    }

    #[test]
    fn empty_cells_are_packed_out() {
        let grid = ActivityGrid::from_counts(vec![vec![3, 0, 0, 3, 0, 3, 0]]);
        let mesh = build_grid(&grid, 3, &layout()).unwrap();
        let ys: Vec<f64> = boxes(&mesh)[1..].iter().map(|m| m.bounds().min.y).collect();
        assert_eq!(ys.len(), 3);
        assert_relative_eq!(ys[0], 0.5);
        assert_relative_eq!(ys[1], 1.5);
        assert_relative_eq!(ys[2], 2.5);
    }

    #[test]
    fn triangle_count_tracks_boxes() {
        let grid = ActivityGrid::from_counts(vec![
            vec![1, 2, 3, 4, 5, 6, 7],
            vec![0, 0, 0, 0, 0, 0, 0],
            vec![7, 0, 7],
        ]);
        let mesh = build_grid(&grid, grid.max_count(), &layout()).unwrap();
        assert_eq!(mesh.len(), CUBOID_TRIANGLES * (9 + 1));
        assert_eq!(mesh.degenerate_count(1e-12), 0);
    }

    #[test]
    fn every_box_is_closed_and_outward() {
        let grid = ActivityGrid::from_counts(vec![vec![4, 1, 9], vec![2, 2, 0, 8]]);
        let mesh = build_grid(&grid, 9, &layout()).unwrap();
        for chunk in boxes(&mesh) {
            assert!(chunk.signed_volume() > 0.0);
            let center = chunk.bounds().center();
            for tri in chunk.iter() {
                assert_relative_eq!(tri.normal.norm(), 1.0, epsilon = 1e-12);
                assert!(tri.normal.dot(&(tri.centroid() - center)) > 0.0);
            }
        }
    }

    #[test]
    fn future_columns_widen_platform_only() {
        let future = vec![ActivityCell::future(); 7];
        let grid = ActivityGrid::from_columns(vec![future.clone(), future]);
        let mesh = build_grid(&grid, 0, &layout()).unwrap();
        assert_eq!(mesh.len(), CUBOID_TRIANGLES);
        assert_relative_eq!(mesh.bounds().width(), 3.0);
    }

    #[test]
    fn columns_step_by_pitch() {
        let grid = ActivityGrid::from_counts(vec![vec![1], vec![1], vec![1]]);
        let layout = layout().with_column_gap(0.25);
        let mesh = build_grid(&grid, 1, &layout).unwrap();
        let xs: Vec<f64> = boxes(&mesh)[1..].iter().map(|m| m.bounds().min.x).collect();
        assert_relative_eq!(xs[0], 0.5);
        assert_relative_eq!(xs[1], 1.75);
        assert_relative_eq!(xs[2], 3.0);
        assert_relative_eq!(mesh.bounds().width(), 1.0 + 3.0 * 1.25 - 0.25);
    }

    #[test]
    fn origin_offsets_everything() {
        let grid = ActivityGrid::from_counts(vec![vec![1]]);
        let origin = Point3::new(10.0, -4.0, 1.0);
        let mesh = build_grid(&grid, 1, &layout().with_origin(origin)).unwrap();
        let b = mesh.bounds();
        assert_relative_eq!(b.min, origin);
        assert_relative_eq!(b.max.z, 1.0 + 2.0 + 4.0);
    }

    #[test]
    fn long_columns_deepen_platform() {
        let grid = ActivityGrid::from_counts(vec![vec![1; 10]]);
        let (_, depth) = grid_footprint(&grid, &layout());
        assert_relative_eq!(depth, 1.0 + 10.0);
    }

    #[test]
    fn larger_context_lowers_levels() {
        let grid = ActivityGrid::from_counts(vec![vec![10]]);
        let own = build_grid(&grid, 10, &layout()).unwrap();
        let shared = build_grid(&grid, 40, &layout()).unwrap();
        assert!(shared.bounds().max.z < own.bounds().max.z);
    }

    #[test]
    fn merged_runs_share_one_box() {
        let grid = ActivityGrid::from_counts(vec![vec![5, 5, 5, 0, 10]]);
        let plain = build_grid(&grid, 10, &layout()).unwrap();
        let merged = build_grid(&grid, 10, &layout().with_merge_runs(true)).unwrap();
        assert_eq!(plain.len(), CUBOID_TRIANGLES * 5);
        assert_eq!(merged.len(), CUBOID_TRIANGLES * 3);

        let run = boxes(&merged)[1].bounds();
        assert_relative_eq!(run.depth(), 3.0);
        assert_relative_eq!(plain.signed_volume(), merged.signed_volume(), epsilon = 1e-9);
    }

    #[test]
    fn invalid_layout_is_rejected() {
        let grid = ActivityGrid::from_counts(vec![vec![1]]);
        let err = build_grid(&grid, 1, &layout().with_cell_size(-1.0)).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn runs_split_on_level_change() {
        use HeightLevel::{Low, Top};
        let merged = runs(&[Low, Low, Top, Low], true);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].len, 2);
        assert_eq!(merged[1].slot, 2);
        assert_eq!(runs(&[Low, Low], false).len(), 2);
    }

    proptest! {
        #[test]
        fn any_grid_is_platform_plus_active_boxes(
            counts in prop::collection::vec(prop::collection::vec(0u32..50, 0..8), 0..12),
        ) {
            let active = counts.iter().flatten().filter(|&&c| c > 0).count();
            let grid = ActivityGrid::from_counts(counts);
            let mesh = build_grid(&grid, grid.max_count(), &layout()).unwrap();

            prop_assert_eq!(mesh.len(), CUBOID_TRIANGLES * (active + 1));
            prop_assert_eq!(mesh.degenerate_count(1e-12), 0);
            for tri in &mesh.triangles {
                prop_assert!(tri.has_consistent_normal(1e-9));
            }
        }
    }
}
