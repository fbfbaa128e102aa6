//! Triangle facet with an explicit normal.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle facet: three vertex positions plus a stored face normal.
///
/// Winding is **counter-clockwise (CCW) when viewed from outside**, and
/// `normal` is the unit vector that winding implies by the right-hand rule.
/// The normal is stored rather than derived on demand because the STL record
/// carries it verbatim; [`Triangle::new`] computes it from the winding, while
/// [`Triangle::with_normal`] keeps whatever the caller (or a file) supplied.
///
/// # Example
///
/// ```
/// use skyline_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// assert!((tri.normal.z - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// Unit face normal.
    pub normal: Vector3<f64>,
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a triangle whose normal follows from the vertex winding.
    ///
    /// Degenerate (zero-area) input gets a zero normal; generators in this
    /// workspace never emit such triangles.
    #[must_use]
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        let normal = winding_normal(&v0, &v1, &v2).unwrap_or_else(Vector3::zeros);
        Self { normal, v0, v1, v2 }
    }

    /// Create a triangle with a caller-supplied normal, stored unchanged.
    #[inline]
    #[must_use]
    pub const fn with_normal(
        normal: Vector3<f64>,
        v0: Point3<f64>,
        v1: Point3<f64>,
        v2: Point3<f64>,
    ) -> Self {
        Self { normal, v0, v1, v2 }
    }

    /// Compute the (unnormalized) winding normal via cross product.
    ///
    /// The magnitude equals twice the triangle's area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit normal implied by the winding, ignoring the stored one.
    ///
    /// Returns `None` for degenerate triangles.
    #[must_use]
    pub fn geometric_normal(&self) -> Option<Vector3<f64>> {
        winding_normal(&self.v0, &self.v1, &self.v2)
    }

    /// Check that the stored normal is unit length and agrees with the
    /// winding to within `tolerance`.
    ///
    /// ```
    /// use skyline_types::{Triangle, Point3, Vector3};
    ///
    /// let tri = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// );
    /// assert!(tri.has_consistent_normal(1e-9));
    ///
    /// let flipped = Triangle::with_normal(-Vector3::z(), tri.v0, tri.v1, tri.v2);
    /// assert!(!flipped.has_consistent_normal(1e-9));
    /// ```
    #[must_use]
    pub fn has_consistent_normal(&self, tolerance: f64) -> bool {
        self.geometric_normal().is_some_and(|n| {
            (self.normal.norm() - 1.0).abs() <= tolerance && (n - self.normal).norm() <= tolerance
        })
    }

    /// Compute the area of the triangle.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Compute the centroid.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// Check if the triangle is degenerate (area below `epsilon`).
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.area() < epsilon
    }

    /// Get vertices as an array.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Return a copy moved by `offset`. The normal is unaffected.
    #[inline]
    #[must_use]
    pub fn translated(&self, offset: Vector3<f64>) -> Self {
        Self {
            normal: self.normal,
            v0: self.v0 + offset,
            v1: self.v1 + offset,
            v2: self.v2 + offset,
        }
    }
}

fn winding_normal(v0: &Point3<f64>, v1: &Point3<f64>, v2: &Point3<f64>) -> Option<Vector3<f64>> {
    let n = (v1 - v0).cross(&(v2 - v0));
    let len_sq = n.norm_squared();
    if len_sq > f64::EPSILON * f64::EPSILON {
        Some(n / len_sq.sqrt())
    } else {
        None
    }
}
