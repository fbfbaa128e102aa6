//! Triangle soup mesh.

use crate::{Aabb, MeshBounds, Triangle};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered list of independent triangles.
///
/// This is the mesh type every generator in the workspace produces and the
/// serializer consumes. There is no vertex sharing: coincident vertices at
/// seams are duplicated, which matches the binary STL record layout.
///
/// Insertion order is preserved so identical inputs serialize to identical
/// bytes.
///
/// # Example
///
/// ```
/// use skyline_types::{TriangleMesh, Triangle, Point3};
///
/// let mut mesh = TriangleMesh::new();
/// mesh.push(Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ));
///
/// assert_eq!(mesh.len(), 1);
/// assert!(!mesh.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleMesh {
    /// Triangles in emission order.
    pub triangles: Vec<Triangle>,
}

impl TriangleMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    /// Create a mesh with room for `triangle_count` triangles.
    #[inline]
    #[must_use]
    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Create a mesh from an existing triangle list.
    #[inline]
    #[must_use]
    pub const fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True when the mesh holds no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append one triangle.
    #[inline]
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Iterate over the triangles.
    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    /// Move every triangle of `other` to the end of this mesh.
    pub fn append(&mut self, other: &mut Self) {
        self.triangles.append(&mut other.triangles);
    }

    /// Copy every triangle of `other` to the end of this mesh.
    pub fn extend_from(&mut self, other: &Self) {
        self.triangles.extend_from_slice(&other.triangles);
    }

    /// Translate every vertex by `offset`. Normals are unaffected.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for tri in &mut self.triangles {
            *tri = tri.translated(offset);
        }
    }

    /// Consume the mesh and return it translated by `offset`.
    #[must_use]
    pub fn translated(mut self, offset: Vector3<f64>) -> Self {
        self.translate(offset);
        self
    }

    /// Compute the signed volume via the divergence theorem.
    ///
    /// For a closed soup of outward-wound solids this is the total enclosed
    /// volume (positive). Inside-out solids contribute negatively.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let volume: f64 = self
            .triangles
            .iter()
            .map(|t| t.v0.coords.dot(&t.v1.coords.cross(&t.v2.coords)))
            .sum();
        volume / 6.0
    }

    /// Compute the total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }

    /// Count triangles whose area is below `epsilon`.
    #[must_use]
    pub fn degenerate_count(&self, epsilon: f64) -> usize {
        self.triangles
            .iter()
            .filter(|t| t.is_degenerate(epsilon))
            .count()
    }
}

impl MeshBounds for TriangleMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.triangles.iter().flat_map(|t| [&t.v0, &t.v1, &t.v2]))
    }
}

impl FromIterator<Triangle> for TriangleMesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

impl Extend<Triangle> for TriangleMesh {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        self.triangles.extend(iter);
    }
}

impl<'a> IntoIterator for &'a TriangleMesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}
