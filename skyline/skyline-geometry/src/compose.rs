//! Placement of period solids and the front strip into one model.

use skyline_types::{MeshBounds, TriangleMesh, Vector3};
use tracing::debug;

use crate::error::GeometryResult;
use crate::params::ComposeLayout;

/// Left edge of each period along X.
///
/// Period `i` starts at `sum(widths[..i]) + i * gap`; the result depends only
/// on the widths and their order.
///
/// ```
/// use skyline_geometry::period_offsets;
///
/// assert_eq!(period_offsets(&[10.0, 20.0, 5.0], 2.0), vec![0.0, 12.0, 34.0]);
/// assert!(period_offsets(&[], 2.0).is_empty());
/// ```
#[must_use]
pub fn period_offsets(widths: &[f64], gap: f64) -> Vec<f64> {
    let mut offsets = Vec::with_capacity(widths.len());
    let mut cursor = 0.0;
    for width in widths {
        offsets.push(cursor);
        cursor += width + gap;
    }
    offsets
}

/// Assemble the final model.
///
/// Periods are laid out left to right along +X in the given order, each
/// moved so its bounding box starts at its [`period_offsets`] entry with
/// `min.y` and `min.z` at zero. The front strip (relief first, then the
/// label) sits in front of them: it starts at `x = 0`, rests on `z = 0`, and
/// its back edge is `label_gap` in front of `y = 0`.
///
/// Meshes are only translated and concatenated; nothing is welded. An empty
/// period counts as zero width; an empty strip part is skipped.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidConfig`](crate::GeometryError::InvalidConfig)
/// if `layout` does not validate.
pub fn compose(
    periods: Vec<TriangleMesh>,
    label: TriangleMesh,
    relief: Option<TriangleMesh>,
    layout: &ComposeLayout,
) -> GeometryResult<TriangleMesh> {
    layout.validate()?;

    let bounds: Vec<_> = periods.iter().map(MeshBounds::bounds_opt).collect();
    let widths: Vec<f64> = bounds
        .iter()
        .map(|b| b.as_ref().map_or(0.0, |b| b.width()))
        .collect();
    let offsets = period_offsets(&widths, layout.period_gap);

    let total = periods.iter().map(TriangleMesh::len).sum::<usize>()
        + label.len()
        + relief.as_ref().map_or(0, TriangleMesh::len);
    let mut model = TriangleMesh::with_capacity(total);
    let period_count = periods.len();

    for ((mut mesh, bounds), start) in periods.into_iter().zip(bounds).zip(offsets) {
        if let Some(b) = bounds {
            mesh.translate(Vector3::new(start - b.min.x, -b.min.y, -b.min.z));
            model.append(&mut mesh);
        }
    }

    let mut cursor = 0.0;
    for mut mesh in relief.into_iter().chain(std::iter::once(label)) {
        let Some(b) = mesh.bounds_opt() else {
            continue;
        };
        mesh.translate(Vector3::new(
            cursor - b.min.x,
            -layout.label_gap - b.max.y,
            -b.min.z,
        ));
        cursor += b.width() + layout.strip_gap;
        model.append(&mut mesh);
    }

    debug!(
        periods = period_count,
        triangles = model.len(),
        "Composed model"
    );
    Ok(model)
}
