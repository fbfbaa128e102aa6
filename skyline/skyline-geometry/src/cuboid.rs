//! Axis-aligned boxes, the only primitive the generators emit.

use skyline_types::{Point3, Triangle, TriangleMesh, Vector3};

use crate::error::{GeometryError, GeometryResult};

/// Triangles in one box.
pub const CUBOID_TRIANGLES: usize = 12;

// Corner indices: bit 0 selects max X, bit 1 max Y, bit 2 max Z.
// Each face lists two triangles counter-clockwise seen from outside.
const FACES: [([usize; 3], [usize; 3], [f64; 3]); 6] = [
    ([0, 2, 3], [0, 3, 1], [0.0, 0.0, -1.0]),
    ([4, 5, 7], [4, 7, 6], [0.0, 0.0, 1.0]),
    ([0, 1, 5], [0, 5, 4], [0.0, -1.0, 0.0]),
    ([2, 6, 7], [2, 7, 3], [0.0, 1.0, 0.0]),
    ([0, 4, 6], [0, 6, 2], [-1.0, 0.0, 0.0]),
    ([1, 3, 7], [1, 7, 5], [1.0, 0.0, 0.0]),
];

/// Build a closed box with its minimum corner at `origin`.
///
/// The result has exactly [`CUBOID_TRIANGLES`] triangles, two per face, each
/// wound counter-clockwise from outside and carrying the exact outward axis
/// normal.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateCuboid`] if any dimension is not
/// strictly positive or any value is not finite. Callers skip zero-height
/// cells before getting here.
///
/// # Example
///
/// ```
/// use skyline_geometry::cuboid;
/// use skyline_types::Point3;
///
/// let mesh = cuboid(Point3::origin(), 2.0, 3.0, 4.0).unwrap();
/// assert_eq!(mesh.len(), 12);
/// assert!((mesh.signed_volume() - 24.0).abs() < 1e-9);
/// ```
pub fn cuboid(
    origin: Point3<f64>,
    width: f64,
    depth: f64,
    height: f64,
) -> GeometryResult<TriangleMesh> {
    let mut mesh = TriangleMesh::with_capacity(CUBOID_TRIANGLES);
    push_cuboid(&mut mesh, origin, width, depth, height)?;
    Ok(mesh)
}

/// Append a box to an existing mesh. See [`cuboid`].
///
/// On error nothing is appended.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateCuboid`] for non-positive or non-finite
/// input.
pub fn push_cuboid(
    mesh: &mut TriangleMesh,
    origin: Point3<f64>,
    width: f64,
    depth: f64,
    height: f64,
) -> GeometryResult<()> {
    let finite = origin.iter().all(|v| v.is_finite());
    let positive = [width, depth, height]
        .iter()
        .all(|d| d.is_finite() && *d > 0.0);
    if !finite || !positive {
        return Err(GeometryError::DegenerateCuboid {
            x: origin.x,
            y: origin.y,
            z: origin.z,
            width,
            depth,
            height,
        });
    }

    let corner = |i: usize| {
        Point3::new(
            if i & 1 == 0 { origin.x } else { origin.x + width },
            if i & 2 == 0 { origin.y } else { origin.y + depth },
            if i & 4 == 0 { origin.z } else { origin.z + height },
        )
    };

    for (first, second, normal) in &FACES {
        let normal = Vector3::new(normal[0], normal[1], normal[2]);
        for [a, b, c] in [first, second] {
            mesh.push(Triangle::with_normal(
                normal,
                corner(*a),
                corner(*b),
                corner(*c),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use skyline_types::MeshBounds;

    #[test]
    fn twelve_triangles() {
        let mesh = cuboid(Point3::origin(), 1.0, 1.0, 1.0).unwrap();
        assert_eq!(mesh.len(), CUBOID_TRIANGLES);
        assert_eq!(mesh.degenerate_count(1e-12), 0);
    }

    #[test]
    fn stored_normals_match_winding() {
        let mesh = cuboid(Point3::new(-3.0, 2.0, 7.5), 0.5, 4.0, 2.0).unwrap();
        for tri in mesh.iter() {
            assert!(tri.has_consistent_normal(1e-9), "{tri:?}");
            assert_relative_eq!(tri.normal.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn normals_point_away_from_center() {
        let mesh = cuboid(Point3::new(1.0, 1.0, 1.0), 2.0, 3.0, 4.0).unwrap();
        let center = mesh.bounds().center();
        for tri in mesh.iter() {
            let outward = tri.centroid() - center;
            assert!(tri.normal.dot(&outward) > 0.0);
        }
    }

    #[test]
    fn volume_and_area() {
        let mesh = cuboid(Point3::new(5.0, -5.0, 0.0), 2.0, 3.0, 4.0).unwrap();
        assert_relative_eq!(mesh.signed_volume(), 24.0, epsilon = 1e-9);
        assert_relative_eq!(mesh.surface_area(), 2.0 * (6.0 + 8.0 + 12.0), epsilon = 1e-9);
    }

    #[test]
    fn bounds_span_box() {
        let mesh = cuboid(Point3::new(1.0, 2.0, 3.0), 4.0, 5.0, 6.0).unwrap();
        let b = mesh.bounds();
        assert_relative_eq!(b.min, Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(b.max, Point3::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        for (w, d, h) in [
            (0.0, 1.0, 1.0),
            (1.0, -1.0, 1.0),
            (1.0, 1.0, 0.0),
            (f64::NAN, 1.0, 1.0),
            (1.0, f64::INFINITY, 1.0),
        ] {
            let result = cuboid(Point3::origin(), w, d, h);
            assert!(matches!(
                result,
                Err(GeometryError::DegenerateCuboid { .. })
            ));
        }
    }

    #[test]
    fn failed_push_leaves_mesh_untouched() {
        let mut mesh = cuboid(Point3::origin(), 1.0, 1.0, 1.0).unwrap();
        assert!(push_cuboid(&mut mesh, Point3::new(f64::NAN, 0.0, 0.0), 1.0, 1.0, 1.0).is_err());
        assert_eq!(mesh.len(), CUBOID_TRIANGLES);
    }
}
