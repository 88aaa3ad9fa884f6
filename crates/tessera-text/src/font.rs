//! Font loading.
//!
//! Rasterization is delegated to an external font engine behind
//! [`FontFaceLoader`] and [`GlyphRasterizer`]. This module turns the engine's
//! bitmaps into a packed [`GlyphAtlas`], uploads it through a
//! [`FontTextureSink`] and keeps the per-glyph metrics layout needs.

use crate::atlas::GlyphAtlas;
use crate::{TextError, TextResult};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::Arc;
use tessera_core::TextureHandle;
use tessera_core::alloc::HashMap;
use tessera_core::math::Vec2;
use tessera_core::profiling::profile_function;

/// Receiver of font atlas textures, implemented by the GPU backend.
pub trait FontTextureSink {
    /// Create an empty single channel texture for a font atlas.
    fn create_font_texture(&mut self, width: u32, height: u32) -> TextureHandle;

    /// Copy one glyph bitmap into the most recently created font texture.
    fn buffer_font_texture_atlas(
        &mut self,
        width: u32,
        height: u32,
        offset_x: u32,
        offset_y: u32,
        data: &[u8],
    );

    /// Called before any texture work so the backend can stash the host's state.
    fn save_api_state(&mut self) {}

    /// Called after texture work, pairs with [`FontTextureSink::save_api_state`].
    fn restore_api_state(&mut self) {}
}

/// Font engine entry point.
pub trait FontFaceLoader {
    /// Parse a font file.
    fn load_face(&mut self, bytes: &[u8]) -> TextResult<Box<dyn GlyphRasterizer>>;
}

/// Vertical metrics of a face at a given pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceMetrics {
    /// Distance between two baselines.
    pub line_height: f32,
    /// Baseline to top of the tallest glyph.
    pub ascent: f32,
    /// Baseline to bottom of the lowest glyph, usually negative.
    pub descent: f32,
}

/// A glyph bitmap as produced by the font engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedGlyph {
    pub width: u32,
    pub height: u32,
    /// Offset from the pen position to the bitmap's top-left, y up.
    pub bearing: Vec2,
    /// Horizontal pen advance in pixels.
    pub advance: f32,
    /// `width * height` coverage (or distance field) bytes.
    pub bitmap: Vec<u8>,
}

/// A loaded face that can produce glyph bitmaps.
pub trait GlyphRasterizer {
    fn face_metrics(&self, pixel_size: u32) -> FaceMetrics;

    /// Rasterize one codepoint, `None` when the face has no glyph for it.
    fn rasterize(&mut self, codepoint: char, pixel_size: u32, sdf: bool) -> Option<RasterizedGlyph>;

    fn has_kerning(&self) -> bool {
        false
    }

    /// Horizontal adjustment between `left` and `right` in pixels.
    fn kerning(&self, _left: char, _right: char, _pixel_size: u32) -> f32 {
        0.0
    }
}

/// Where font bytes come from.
#[derive(Debug, Clone)]
pub enum FontSource {
    File(PathBuf),
    Memory(Arc<[u8]>),
}

impl FontSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn memory(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Memory(bytes.into())
    }

    /// Read the font bytes.
    pub fn bytes(&self) -> TextResult<Arc<[u8]>> {
        match self {
            FontSource::Memory(bytes) => Ok(bytes.clone()),
            FontSource::File(path) => match std::fs::read(path) {
                Ok(bytes) => Ok(bytes.into()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    Err(TextError::FontFileNotFound(path.clone()))
                }
                Err(err) => Err(err.into()),
            },
        }
    }
}

/// Parameters for loading a font.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Rasterization size in pixels.
    pub pixel_size: u32,
    /// Rasterize signed distance fields instead of coverage.
    pub sdf: bool,
    /// Codepoint ranges to rasterize.
    pub ranges: Vec<RangeInclusive<u32>>,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            pixel_size: 48,
            sdf: false,
            ranges: vec![32..=126],
        }
    }
}

impl FontDescriptor {
    pub fn new(pixel_size: u32) -> Self {
        Self {
            pixel_size,
            ..Default::default()
        }
    }

    pub fn with_sdf(mut self, sdf: bool) -> Self {
        self.sdf = sdf;
        self
    }

    pub fn with_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.ranges.push(range);
        self
    }

    fn codepoints(&self) -> impl Iterator<Item = char> + '_ {
        self.ranges
            .iter()
            .flat_map(|range| range.clone())
            .filter_map(char::from_u32)
    }
}

/// Metrics and atlas placement of one glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Bitmap size in pixels.
    pub size: Vec2,
    /// Offset from the pen to the bitmap's top-left, y up.
    pub bearing: Vec2,
    pub advance: f32,
    pub uv_min: Vec2,
    pub uv_max: Vec2,
}

impl Glyph {
    /// Whitespace glyphs have no bitmap and only advance the pen.
    pub fn has_bitmap(&self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0
    }
}

/// A font ready for layout: glyph metrics plus the uploaded atlas.
#[derive(Debug, Clone)]
pub struct Font {
    pixel_size: u32,
    sdf: bool,
    line_height: f32,
    ascent: f32,
    glyphs: HashMap<char, Glyph>,
    kerning: Option<HashMap<(char, char), f32>>,
    atlas_texture: TextureHandle,
}

impl Font {
    /// Assemble a font from precomputed parts.
    pub fn from_parts(
        metrics: FaceMetrics,
        pixel_size: u32,
        sdf: bool,
        glyphs: HashMap<char, Glyph>,
        kerning: Option<HashMap<(char, char), f32>>,
        atlas_texture: TextureHandle,
    ) -> Self {
        Self {
            pixel_size,
            sdf,
            line_height: metrics.line_height,
            ascent: metrics.ascent,
            glyphs,
            kerning,
            atlas_texture,
        }
    }

    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    pub fn is_sdf(&self) -> bool {
        self.sdf
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    pub fn atlas_texture(&self) -> TextureHandle {
        self.atlas_texture
    }

    pub fn glyph(&self, codepoint: char) -> Option<&Glyph> {
        self.glyphs.get(&codepoint)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn supports_kerning(&self) -> bool {
        self.kerning.is_some()
    }

    /// Kerning between two codepoints, zero for unknown pairs.
    pub fn kerning(&self, left: char, right: char) -> f32 {
        self.kerning
            .as_ref()
            .and_then(|table| table.get(&(left, right)))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Load a font, pack its glyphs and upload the atlas.
///
/// The atlas is `max_atlas_size` pixels square. Codepoints the face cannot
/// rasterize are skipped; a face yielding no glyph at all is an error.
pub fn load_font(
    loader: &mut dyn FontFaceLoader,
    sink: &mut dyn FontTextureSink,
    source: &FontSource,
    descriptor: &FontDescriptor,
    max_atlas_size: u32,
) -> TextResult<Font> {
    profile_function!();

    if descriptor.pixel_size == 0 {
        return Err(TextError::FontLoadError("pixel size must be non-zero".into()));
    }

    let bytes = source.bytes()?;
    let mut face = loader.load_face(&bytes)?;
    let metrics = face.face_metrics(descriptor.pixel_size);

    let mut atlas = GlyphAtlas::new(max_atlas_size);
    let mut rasterized = Vec::new();
    for codepoint in descriptor.codepoints() {
        let Some(glyph) = face.rasterize(codepoint, descriptor.pixel_size, descriptor.sdf) else {
            continue;
        };
        let rect = atlas.insert(codepoint, &glyph.bitmap, glyph.width, glyph.height)?;
        rasterized.push((codepoint, rect, glyph));
    }

    if rasterized.is_empty() {
        return Err(TextError::FontLoadError(
            "face produced no glyphs for the requested ranges".into(),
        ));
    }

    let atlas_texture = atlas.upload(sink);

    let glyphs: HashMap<char, Glyph> = rasterized
        .into_iter()
        .map(|(codepoint, rect, glyph)| {
            let (uv_min, uv_max) = rect.uv(atlas.size());
            (
                codepoint,
                Glyph {
                    size: Vec2::new(glyph.width as f32, glyph.height as f32),
                    bearing: glyph.bearing,
                    advance: glyph.advance,
                    uv_min,
                    uv_max,
                },
            )
        })
        .collect();

    let kerning = face.has_kerning().then(|| {
        let mut table = HashMap::default();
        for &left in glyphs.keys() {
            for &right in glyphs.keys() {
                let amount = face.kerning(left, right, descriptor.pixel_size);
                if amount != 0.0 {
                    table.insert((left, right), amount);
                }
            }
        }
        table
    });

    tracing::debug!(
        "Loaded font: {} glyphs at {}px (sdf: {}, kerning pairs: {})",
        glyphs.len(),
        descriptor.pixel_size,
        descriptor.sdf,
        kerning.as_ref().map_or(0, |table| table.len())
    );

    Ok(Font::from_parts(
        metrics,
        descriptor.pixel_size,
        descriptor.sdf,
        glyphs,
        kerning,
        atlas_texture,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullSink;

    impl FontTextureSink for NullSink {
        fn create_font_texture(&mut self, _width: u32, _height: u32) -> TextureHandle {
            TextureHandle::new(7)
        }

        fn buffer_font_texture_atlas(&mut self, _: u32, _: u32, _: u32, _: u32, _: &[u8]) {}
    }

    /// Every glyph is a `pixel_size / 2` square, only 'A' and 'V' kern.
    struct SquareFace;

    impl GlyphRasterizer for SquareFace {
        fn face_metrics(&self, pixel_size: u32) -> FaceMetrics {
            FaceMetrics {
                line_height: pixel_size as f32,
                ascent: pixel_size as f32 * 0.8,
                descent: -(pixel_size as f32) * 0.2,
            }
        }

        fn rasterize(&mut self, codepoint: char, pixel_size: u32, _sdf: bool) -> Option<RasterizedGlyph> {
            if !codepoint.is_ascii_graphic() {
                return None;
            }
            let side = pixel_size / 2;
            Some(RasterizedGlyph {
                width: side,
                height: side,
                bearing: Vec2::new(0.0, side as f32),
                advance: side as f32,
                bitmap: vec![255; (side * side) as usize],
            })
        }

        fn has_kerning(&self) -> bool {
            true
        }

        fn kerning(&self, left: char, right: char, _pixel_size: u32) -> f32 {
            if left == 'A' && right == 'V' { -2.0 } else { 0.0 }
        }
    }

    struct SquareLoader;

    impl FontFaceLoader for SquareLoader {
        fn load_face(&mut self, bytes: &[u8]) -> TextResult<Box<dyn GlyphRasterizer>> {
            if bytes.is_empty() {
                return Err(TextError::InvalidFontData("empty font".into()));
            }
            Ok(Box::new(SquareFace))
        }
    }

    fn source() -> FontSource {
        FontSource::memory(vec![1u8, 2, 3])
    }

    #[test]
    fn test_load_font_builds_glyphs_and_kerning() {
        let font = load_font(
            &mut SquareLoader,
            &mut NullSink,
            &source(),
            &FontDescriptor::new(16),
            256,
        )
        .unwrap();

        // printable ASCII minus the space, which SquareFace refuses
        assert_eq!(font.glyph_count(), 94);
        assert_eq!(font.atlas_texture(), TextureHandle::new(7));
        assert!(font.supports_kerning());
        assert_eq!(font.kerning('A', 'V'), -2.0);
        assert_eq!(font.kerning('V', 'A'), 0.0);

        let glyph = font.glyph('A').unwrap();
        assert_eq!(glyph.size, Vec2::new(8.0, 8.0));
        assert!(glyph.uv_max.x > glyph.uv_min.x);
    }

    #[test]
    fn test_missing_file() {
        let err = load_font(
            &mut SquareLoader,
            &mut NullSink,
            &FontSource::file("/definitely/not/here.ttf"),
            &FontDescriptor::default(),
            256,
        )
        .unwrap_err();
        assert!(matches!(err, TextError::FontFileNotFound(_)));
    }

    #[test]
    fn test_loader_error_propagates() {
        let err = load_font(
            &mut SquareLoader,
            &mut NullSink,
            &FontSource::memory(Vec::<u8>::new()),
            &FontDescriptor::default(),
            256,
        )
        .unwrap_err();
        assert!(matches!(err, TextError::InvalidFontData(_)));
    }

    #[test]
    fn test_atlas_too_small() {
        let err = load_font(
            &mut SquareLoader,
            &mut NullSink,
            &source(),
            &FontDescriptor::new(64),
            64,
        )
        .unwrap_err();
        assert!(matches!(err, TextError::AtlasFull { .. }));
    }
}
