//! A deterministic font engine.
//!
//! Every printable glyph is a box of `pixel_size / 2` by `pixel_size * 3 / 4`
//! pixels resting on the baseline, the space is empty, and every glyph
//! advances by `pixel_size / 2 + 1`. That makes layout results easy to predict
//! in tests.

use tessera_core::alloc::HashMap;
use tessera_core::math::Vec2;
use tessera_text::{FaceMetrics, FontFaceLoader, GlyphRasterizer, RasterizedGlyph, TextError, TextResult};

/// Font engine handing out [`MonospaceFace`]s.
///
/// Empty font bytes are rejected with [`TextError::InvalidFontData`], any other
/// bytes load.
#[derive(Debug, Clone, Default)]
pub struct MonospaceFontLoader {
    kerning: HashMap<(char, char), f32>,
    loaded: usize,
}

impl MonospaceFontLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Faces loaded from now on report kerning and adjust `left` -> `right`
    /// by `amount` pixels.
    pub fn with_kerning_pair(mut self, left: char, right: char, amount: f32) -> Self {
        self.kerning.insert((left, right), amount);
        self
    }

    /// Number of faces loaded so far.
    pub fn loaded(&self) -> usize {
        self.loaded
    }
}

impl FontFaceLoader for MonospaceFontLoader {
    fn load_face(&mut self, bytes: &[u8]) -> TextResult<Box<dyn GlyphRasterizer>> {
        if bytes.is_empty() {
            return Err(TextError::InvalidFontData("empty font data".into()));
        }
        self.loaded += 1;
        Ok(Box::new(MonospaceFace {
            kerning: self.kerning.clone(),
        }))
    }
}

/// Face produced by [`MonospaceFontLoader`].
#[derive(Debug, Clone, Default)]
pub struct MonospaceFace {
    kerning: HashMap<(char, char), f32>,
}

impl MonospaceFace {
    /// Bitmap width of every printable glyph.
    pub fn glyph_width(pixel_size: u32) -> u32 {
        pixel_size / 2
    }

    /// Bitmap height of every printable glyph.
    pub fn glyph_height(pixel_size: u32) -> u32 {
        pixel_size * 3 / 4
    }

    /// Pen advance of every glyph, space included.
    pub fn advance(pixel_size: u32) -> f32 {
        (pixel_size / 2 + 1) as f32
    }
}

impl GlyphRasterizer for MonospaceFace {
    fn face_metrics(&self, pixel_size: u32) -> FaceMetrics {
        let size = pixel_size as f32;
        FaceMetrics {
            line_height: size * 1.25,
            ascent: size,
            descent: -size * 0.25,
        }
    }

    fn rasterize(&mut self, codepoint: char, pixel_size: u32, sdf: bool) -> Option<RasterizedGlyph> {
        let advance = Self::advance(pixel_size);
        if codepoint == ' ' {
            return Some(RasterizedGlyph {
                width: 0,
                height: 0,
                bearing: Vec2::ZERO,
                advance,
                bitmap: Vec::new(),
            });
        }
        if !codepoint.is_ascii_graphic() {
            return None;
        }

        let width = Self::glyph_width(pixel_size);
        let height = Self::glyph_height(pixel_size);
        let fill = if sdf { 128 } else { 255 };
        Some(RasterizedGlyph {
            width,
            height,
            bearing: Vec2::new(0.0, height as f32),
            advance,
            bitmap: vec![fill; (width * height) as usize],
        })
    }

    fn has_kerning(&self) -> bool {
        !self.kerning.is_empty()
    }

    fn kerning(&self, left: char, right: char, _pixel_size: u32) -> f32 {
        self.kerning.get(&(left, right)).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_is_empty() {
        let mut face = MonospaceFace::default();
        let space = face.rasterize(' ', 16, false).unwrap();
        assert_eq!((space.width, space.height), (0, 0));
        assert_eq!(space.advance, 9.0);
        assert!(face.rasterize('\u{7f}', 16, false).is_none());
    }

    #[test]
    fn test_glyph_boxes() {
        let mut face = MonospaceFace::default();
        let glyph = face.rasterize('A', 16, false).unwrap();
        assert_eq!((glyph.width, glyph.height), (8, 12));
        assert_eq!(glyph.bitmap.len(), 96);
        assert_eq!(glyph.bearing, Vec2::new(0.0, 12.0));
    }

    #[test]
    fn test_loader_kerning() {
        let mut loader = MonospaceFontLoader::new().with_kerning_pair('A', 'V', -3.0);
        let face = loader.load_face(&[1]).unwrap();
        assert!(face.has_kerning());
        assert_eq!(face.kerning('A', 'V', 16), -3.0);
        assert_eq!(face.kerning('V', 'A', 16), 0.0);
        assert!(loader.load_face(&[]).is_err());
        assert_eq!(loader.loaded(), 1);
    }
}
