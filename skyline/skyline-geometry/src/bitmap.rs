//! Monochrome coverage rasters and their extrusion into boxes.

use skyline_types::{Point3, TriangleMesh};
use tracing::debug;

use crate::cuboid::{push_cuboid, CUBOID_TRIANGLES};
use crate::error::GeometryResult;
use crate::params::VoxelParams;

/// An 8-bit coverage raster, row 0 at the top.
///
/// Writes outside the raster are ignored, which lets glyph rasterizers draw
/// overhanging pixels without bounds checks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoverageBitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CoverageBitmap {
    /// A blank raster.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// A raster filled by `f(x, y)`.
    ///
    /// ```
    /// use skyline_geometry::CoverageBitmap;
    ///
    /// let checker = CoverageBitmap::from_fn(4, 4, |x, y| if (x + y) % 2 == 0 { 255 } else { 0 });
    /// assert_eq!(checker.count_above(0.5), 8);
    /// ```
    #[must_use]
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// True when the raster has no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw coverage at a pixel, `0` outside the raster.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        if x < self.width && y < self.height {
            self.data[self.index(x, y)]
        } else {
            0
        }
    }

    /// Coverage at a pixel as a fraction in `[0, 1]`.
    #[must_use]
    pub fn coverage(&self, x: u32, y: u32) -> f32 {
        f32::from(self.get(x, y)) / 255.0
    }

    /// Raise the coverage at a pixel to at least `alpha`.
    ///
    /// Overlapping glyphs keep the stronger coverage.
    pub fn blend(&mut self, x: i64, y: i64, alpha: u8) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.data[index] = self.data[index].max(alpha);
        }
    }

    /// Number of pixels whose coverage exceeds `threshold`.
    #[must_use]
    pub fn count_above(&self, threshold: f32) -> usize {
        self.data
            .iter()
            .filter(|&&v| f32::from(v) / 255.0 > threshold)
            .count()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Extrude every pixel whose coverage exceeds `threshold` into one box.
///
/// Each box is `voxel_scale × voxel_scale × depth`. Pixel column `x` maps to
/// `origin.x + x * voxel_scale`; rows are inverted so that row 0 (the top of
/// the raster) lands at the largest Y and the text reads correctly from
/// above.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidConfig`](crate::GeometryError::InvalidConfig)
/// if `params` does not validate.
///
/// # Example
///
/// ```
/// use skyline_geometry::{extrude_bitmap, CoverageBitmap, VoxelParams};
///
/// let bar = CoverageBitmap::from_fn(3, 1, |_, _| 255);
/// let mesh = extrude_bitmap(&bar, 0.5, &VoxelParams::new(1.0, 2.0)).unwrap();
/// assert_eq!(mesh.len(), 3 * 12);
/// ```
pub fn extrude_bitmap(
    bitmap: &CoverageBitmap,
    threshold: f32,
    params: &VoxelParams,
) -> GeometryResult<TriangleMesh> {
    params.validate()?;

    let solid = bitmap.count_above(threshold);
    let mut mesh = TriangleMesh::with_capacity(solid * CUBOID_TRIANGLES);
    let scale = params.voxel_scale;
    for y in 0..bitmap.height() {
        let row = f64::from(bitmap.height() - 1 - y);
        for x in 0..bitmap.width() {
            if bitmap.coverage(x, y) > threshold {
                let corner = Point3::new(
                    params.origin.x + f64::from(x) * scale,
                    params.origin.y + row * scale,
                    params.origin.z,
                );
                push_cuboid(&mut mesh, corner, scale, scale, params.depth)?;
            }
        }
    }

    debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        boxes = solid,
        "Extruded bitmap"
    );
    Ok(mesh)
}
