//! Image to relief solid.
//!
//! Every pixel becomes a box whose height is proportional to the pixel's
//! brightness, so a logo or avatar prints as a relief plate.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Rgba};
use skyline_types::{Point3, TriangleMesh};
use tracing::{debug, info};

use crate::cuboid::{push_cuboid, CUBOID_TRIANGLES};
use crate::error::{GeometryError, GeometryResult};
use crate::params::ReliefConfig;

/// Rec. 601 luma weights.
const LUMA: [f64; 3] = [0.299, 0.587, 0.114];

/// Brightness of a pixel in `[0, 1]`: Rec. 601 luma scaled by alpha.
///
/// Fully transparent pixels read as black.
///
/// ```
/// use image::Rgba;
/// use skyline_geometry::pixel_intensity;
///
/// assert_eq!(pixel_intensity(Rgba([0, 0, 0, 255])), 0.0);
/// assert!((pixel_intensity(Rgba([255, 255, 255, 255])) - 1.0).abs() < 1e-9);
/// assert_eq!(pixel_intensity(Rgba([255, 255, 255, 0])), 0.0);
/// ```
#[must_use]
pub fn pixel_intensity(pixel: Rgba<u8>) -> f64 {
    let [r, g, b, a] = pixel.0;
    let luma = LUMA[0] * f64::from(r) + LUMA[1] * f64::from(g) + LUMA[2] * f64::from(b);
    (luma / 255.0 * (f64::from(a) / 255.0)).clamp(0.0, 1.0)
}

/// Load an image file and build its relief.
///
/// # Errors
///
/// - [`GeometryError::InvalidConfig`] if `config` does not validate.
/// - [`GeometryError::Io`] if the file cannot be read.
/// - [`GeometryError::ImageDecode`] if the contents are not a supported image.
pub fn build_relief<P: AsRef<Path>>(path: P, config: &ReliefConfig) -> GeometryResult<TriangleMesh> {
    let path = path.as_ref();
    config.validate()?;

    let bytes = std::fs::read(path).map_err(|source| GeometryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| GeometryError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Decoded relief image"
    );

    relief_from_image(&image, config)
}

/// Build a relief from an already decoded image.
///
/// Box height is `intensity * depth`; pixels shorter than
/// [`ReliefConfig::effective_min_height`] are skipped. Rows are inverted so
/// the picture reads correctly from above. With
/// [`ReliefConfig::downsample`] set, images whose longer edge exceeds the
/// limit are resized first, keeping their aspect ratio.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidConfig`] if `config` does not validate.
///
/// # Example
///
/// ```
/// use image::{DynamicImage, Rgba, RgbaImage};
/// use skyline_geometry::{relief_from_image, ReliefConfig};
///
/// let img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
/// let mesh = relief_from_image(&DynamicImage::ImageRgba8(img), &ReliefConfig::default()).unwrap();
/// assert_eq!(mesh.len(), 4 * 12);
/// ```
pub fn relief_from_image(
    image: &DynamicImage,
    config: &ReliefConfig,
) -> GeometryResult<TriangleMesh> {
    config.validate()?;

    let resized;
    let image = match config.downsample {
        Some(max_edge) if image.width().max(image.height()) > max_edge => {
            resized = image.resize(max_edge, max_edge, FilterType::Triangle);
            debug!(
                from_width = image.width(),
                from_height = image.height(),
                to_width = resized.width(),
                to_height = resized.height(),
                "Downsampled relief image"
            );
            &resized
        }
        _ => image,
    };

    let (width, height) = image.dimensions();
    let params = &config.voxel;
    let min_height = config.effective_min_height();
    let mut mesh = TriangleMesh::with_capacity(width as usize * height as usize * CUBOID_TRIANGLES);
    let mut skipped = 0usize;

    for (x, y, pixel) in image.pixels() {
        let box_height = pixel_intensity(pixel) * params.depth;
        if box_height < min_height || box_height <= 0.0 {
            skipped += 1;
            continue;
        }
        let corner = Point3::new(
            params.origin.x + f64::from(x) * params.voxel_scale,
            params.origin.y + f64::from(height - 1 - y) * params.voxel_scale,
            params.origin.z,
        );
        push_cuboid(
            &mut mesh,
            corner,
            params.voxel_scale,
            params.voxel_scale,
            box_height,
        )?;
    }

    debug!(
        width,
        height,
        skipped,
        triangles = mesh.len(),
        "Built relief mesh"
    );
    Ok(mesh)
}
