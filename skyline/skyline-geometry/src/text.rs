//! Text to extruded solid.
//!
//! Text is shaped and rasterized with `cosmic-text`, thresholded into a
//! [`CoverageBitmap`] and extruded one box per pixel. The main text and a
//! smaller secondary label share one raster; the label follows the text on
//! the same bottom line.

use cosmic_text::{
    fontdb, Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache,
};
use skyline_types::TriangleMesh;
use tracing::{debug, warn};

use crate::bitmap::{extrude_bitmap, CoverageBitmap};
use crate::error::{GeometryError, GeometryResult};
use crate::params::{FontSource, TextRenderConfig};

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.2;

const LOCALE: &str = "en-US";

/// Shapes and rasterizes text with a resolved font.
///
/// Font discovery is the expensive part; reuse one rasterizer for several
/// strings.
pub struct TextRasterizer {
    font_system: FontSystem,
    cache: SwashCache,
    family: Option<String>,
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer")
            .field("faces", &self.face_count())
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl TextRasterizer {
    /// Resolve fonts for `source`.
    ///
    /// A [`FontSource::File`] that cannot be read or holds no faces is
    /// reported with a warning and replaced by the system fonts.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Font`] if no font face is available at all.
    pub fn new(source: &FontSource) -> GeometryResult<Self> {
        let (db, family) = load_fonts(source)?;
        Ok(Self {
            font_system: FontSystem::new_with_locale_and_db(LOCALE.to_string(), db),
            cache: SwashCache::new(),
            family,
        })
    }

    /// Number of loaded font faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.font_system.db().len()
    }

    /// Family name taken from an explicit font file, if one was loaded.
    #[must_use]
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// Rasterize `text` followed by `label` at the sizes in `config`.
    ///
    /// Either string may be empty. The raster is just large enough to hold
    /// both; two empty strings give an empty raster.
    pub fn rasterize(
        &mut self,
        text: &str,
        label: &str,
        config: &TextRenderConfig,
    ) -> CoverageBitmap {
        let main = self.shape(text, config.font_size);
        let label_size = config.font_size * config.label_scale;
        let secondary = (!label.is_empty()).then(|| self.shape(label, label_size));

        let (main_w, main_h) = extent(&main);
        let (label_w, label_h) = secondary.as_ref().map_or((0.0, 0.0), extent);
        let spacing = if main_w > 0.0 && label_w > 0.0 {
            config.label_spacing * config.font_size
        } else {
            0.0
        };
        let label_x = main_w + spacing;
        let height = main_h.max(label_h);

        let mut bitmap = CoverageBitmap::new(pixels(label_x + label_w), pixels(height));
        self.draw(&main, 0, offset(height - main_h), &mut bitmap);
        if let Some(buffer) = &secondary {
            self.draw(buffer, offset(label_x), offset(height - label_h), &mut bitmap);
        }
        bitmap
    }

    fn shape(&mut self, text: &str, font_size: f32) -> Buffer {
        let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        let family = self.family.as_deref().map_or(Family::SansSerif, Family::Name);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(
            &mut self.font_system,
            text,
            Attrs::new().family(family),
            Shaping::Advanced,
        );
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    fn draw(&mut self, buffer: &Buffer, dx: i32, dy: i32, bitmap: &mut CoverageBitmap) {
        let ink = Color::rgb(0xFF, 0xFF, 0xFF);
        buffer.draw(
            &mut self.font_system,
            &mut self.cache,
            ink,
            |x, y, w, h, color| {
                let left = i64::from(x) + i64::from(dx);
                let top = i64::from(y) + i64::from(dy);
                for row in 0..i64::from(h) {
                    for col in 0..i64::from(w) {
                        bitmap.blend(left + col, top + row, color.a());
                    }
                }
            },
        );
    }
}

/// Extrude `text` and `label` into a solid.
///
/// Each raster pixel with coverage above `config.coverage_threshold` becomes
/// one `voxel_scale × voxel_scale × depth` box; rows are inverted so the text
/// reads correctly from above. If both strings are blank the result is an
/// empty mesh and no font is loaded.
///
/// # Errors
///
/// - [`GeometryError::InvalidConfig`] if `config` does not validate.
/// - [`GeometryError::Font`] if no font face can be found.
pub fn build_text(
    text: &str,
    label: &str,
    config: &TextRenderConfig,
) -> GeometryResult<TriangleMesh> {
    config.validate()?;
    if text.trim().is_empty() && label.trim().is_empty() {
        debug!("No text to extrude");
        return Ok(TriangleMesh::new());
    }

    let mut rasterizer = TextRasterizer::new(&config.font)?;
    let bitmap = rasterizer.rasterize(text, label, config);
    let mesh = extrude_bitmap(&bitmap, config.coverage_threshold, &config.voxel)?;

    debug!(
        text,
        label,
        width = bitmap.width(),
        height = bitmap.height(),
        triangles = mesh.len(),
        "Built text mesh"
    );
    Ok(mesh)
}

fn load_fonts(source: &FontSource) -> GeometryResult<(fontdb::Database, Option<String>)> {
    let mut db = fontdb::Database::new();
    let mut family = None;

    if let FontSource::File(path) = source {
        match db.load_font_file(path) {
            Ok(()) if !db.is_empty() => {
                family = db
                    .faces()
                    .find_map(|face| face.families.first().map(|(name, _)| name.clone()));
                debug!(path = %path.display(), family = ?family, "Loaded font file");
            }
            Ok(()) => warn!(
                path = %path.display(),
                "Font file contains no usable faces, falling back to system fonts"
            ),
            Err(err) => warn!(
                path = %path.display(),
                error = %err,
                "Failed to read font file, falling back to system fonts"
            ),
        }
    }

    if family.is_none() {
        db.load_system_fonts();
        debug!(faces = db.len(), "Loaded system fonts");
    }

    if db.is_empty() {
        let message = match source {
            FontSource::System => "no system fonts installed".to_string(),
            FontSource::File(path) => format!(
                "{} is unusable and no system fonts are installed",
                path.display()
            ),
        };
        return Err(GeometryError::Font { message });
    }
    Ok((db, family))
}

/// Width of the widest line and total height of a shaped buffer.
fn extent(buffer: &Buffer) -> (f32, f32) {
    buffer.layout_runs().fold((0.0_f32, 0.0_f32), |(w, h), run| {
        (w.max(run.line_w), h.max(run.line_top + run.line_height))
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixels(extent: f32) -> u32 {
    extent.max(0.0).ceil() as u32
}

#[allow(clippy::cast_possible_truncation)]
fn offset(position: f32) -> i32 {
    position.round() as i32
}
