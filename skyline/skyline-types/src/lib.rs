//! Core mesh types for the skyline workspace.
//!
//! This crate provides the foundational types shared by every generator:
//!
//! - [`Triangle`] - Three vertex positions plus a stored face normal
//! - [`TriangleMesh`] - An ordered triangle soup
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Units
//!
//! All coordinates are `f64` millimeters. The serializer narrows them to
//! `f32` only when writing STL records.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**:
//! - X: width (time runs left to right)
//! - Y: depth (front/back)
//! - Z: height (up)
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use skyline_types::{MeshBounds, Point3, Triangle, TriangleMesh};
//!
//! let mut mesh = TriangleMesh::new();
//! mesh.push(Triangle::new(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ));
//!
//! assert_eq!(mesh.len(), 1);
//! assert!((mesh.bounds().width() - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod traits;
mod triangle;

pub use bounds::Aabb;
pub use mesh::TriangleMesh;
pub use traits::MeshBounds;
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
