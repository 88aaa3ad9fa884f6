//! Glyph atlas with non-uniform rectangle packing.
//!
//! Glyph bitmaps are packed into a single square, single channel atlas. The
//! atlas keeps the bitmaps queued until [`GlyphAtlas::upload`] hands them to the
//! backend through a [`FontTextureSink`].

use crate::font::FontTextureSink;
use crate::{TextError, TextResult};
use tessera_core::TextureHandle;
use tessera_core::alloc::HashMap;
use tessera_core::math::Vec2;

/// Empty pixels kept between neighbouring glyphs to avoid sampling bleed.
const GLYPH_PADDING: u32 = 1;

/// Pixel rectangle inside the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AtlasRect {
    /// Normalized UV corners of this rectangle for an atlas of `size` pixels.
    pub fn uv(&self, size: u32) -> (Vec2, Vec2) {
        let size = size as f32;
        (
            Vec2::new(self.x as f32 / size, self.y as f32 / size),
            Vec2::new(
                (self.x + self.width) as f32 / size,
                (self.y + self.height) as f32 / size,
            ),
        )
    }
}

/// Rectangle packing node.
#[derive(Debug, Clone)]
enum PackerNode {
    /// Empty node that can be split.
    Empty { rect: AtlasRect },
    /// Filled node.
    Filled,
    /// Split node with two children.
    Split {
        left: Box<PackerNode>,
        right: Box<PackerNode>,
    },
}

impl PackerNode {
    fn new(rect: AtlasRect) -> Self {
        Self::Empty { rect }
    }

    /// Try to insert a rectangle into this node.
    fn insert(&mut self, width: u32, height: u32) -> Option<AtlasRect> {
        match self {
            PackerNode::Empty { rect } => {
                if width > rect.width || height > rect.height {
                    return None;
                }

                if width == rect.width && height == rect.height {
                    let result = *rect;
                    *self = PackerNode::Filled;
                    return Some(result);
                }

                // Split along the axis that leaves the larger free area
                let rect = *rect;
                let horizontal_waste = rect.width - width;
                let vertical_waste = rect.height - height;

                let (left_rect, right_rect) = if horizontal_waste > vertical_waste {
                    (
                        AtlasRect {
                            width,
                            ..rect
                        },
                        AtlasRect {
                            x: rect.x + width,
                            width: rect.width - width,
                            ..rect
                        },
                    )
                } else {
                    (
                        AtlasRect {
                            height,
                            ..rect
                        },
                        AtlasRect {
                            y: rect.y + height,
                            height: rect.height - height,
                            ..rect
                        },
                    )
                };

                let mut left = Box::new(PackerNode::new(left_rect));
                let right = Box::new(PackerNode::new(right_rect));
                let result = left.insert(width, height);

                *self = PackerNode::Split { left, right };
                result
            }
            PackerNode::Filled => None,
            PackerNode::Split { left, right } => left
                .insert(width, height)
                .or_else(|| right.insert(width, height)),
        }
    }
}

/// Square single channel atlas holding the glyphs of one font.
pub struct GlyphAtlas {
    size: u32,
    packer: PackerNode,
    entries: HashMap<char, AtlasRect>,
    /// Bitmaps waiting for upload
    pending_uploads: Vec<(AtlasRect, Vec<u8>)>,
}

impl GlyphAtlas {
    /// Create an empty atlas of `size x size` pixels.
    pub fn new(size: u32) -> Self {
        Self {
            size,
            packer: PackerNode::new(AtlasRect {
                x: 0,
                y: 0,
                width: size,
                height: size,
            }),
            entries: HashMap::default(),
            pending_uploads: Vec::new(),
        }
    }

    /// Edge length in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Insert a glyph bitmap (`width * height` bytes, row major).
    pub fn insert(
        &mut self,
        codepoint: char,
        bitmap: &[u8],
        width: u32,
        height: u32,
    ) -> TextResult<AtlasRect> {
        if let Some(rect) = self.entries.get(&codepoint) {
            return Ok(*rect);
        }

        if bitmap.len() != (width * height) as usize {
            return Err(TextError::InvalidFontData(format!(
                "glyph {:?} bitmap has {} bytes, expected {}x{}",
                codepoint,
                bitmap.len(),
                width,
                height
            )));
        }

        let slot = self
            .packer
            .insert(width + GLYPH_PADDING, height + GLYPH_PADDING)
            .ok_or(TextError::AtlasFull {
                requested_width: width,
                requested_height: height,
                atlas_width: self.size,
                atlas_height: self.size,
            })?;

        let rect = AtlasRect {
            width,
            height,
            ..slot
        };
        self.entries.insert(codepoint, rect);
        self.pending_uploads.push((rect, bitmap.to_vec()));
        Ok(rect)
    }

    /// Get the rectangle of a packed glyph.
    pub fn get(&self, codepoint: char) -> Option<AtlasRect> {
        self.entries.get(&codepoint).copied()
    }

    /// Number of packed glyphs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Create the atlas texture and upload every queued bitmap.
    ///
    /// The sink's API state is saved before and restored after, so the host's
    /// pipeline state survives the upload.
    pub fn upload(&mut self, sink: &mut dyn FontTextureSink) -> TextureHandle {
        sink.save_api_state();
        let texture = sink.create_font_texture(self.size, self.size);
        for (rect, data) in self.pending_uploads.drain(..) {
            if rect.width == 0 || rect.height == 0 {
                continue;
            }
            sink.buffer_font_texture_atlas(rect.width, rect.height, rect.x, rect.y, &data);
        }
        sink.restore_api_state();
        texture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<String>,
    }

    impl FontTextureSink for RecordingSink {
        fn create_font_texture(&mut self, width: u32, height: u32) -> TextureHandle {
            self.calls.push(format!("create {}x{}", width, height));
            TextureHandle::new(1)
        }

        fn buffer_font_texture_atlas(
            &mut self,
            width: u32,
            height: u32,
            offset_x: u32,
            offset_y: u32,
            _data: &[u8],
        ) {
            self.calls
                .push(format!("buffer {}x{} at {},{}", width, height, offset_x, offset_y));
        }

        fn save_api_state(&mut self) {
            self.calls.push("save".into());
        }

        fn restore_api_state(&mut self) {
            self.calls.push("restore".into());
        }
    }

    #[test]
    fn test_insert_does_not_overlap() {
        let mut atlas = GlyphAtlas::new(64);
        let a = atlas.insert('a', &[255; 100], 10, 10).unwrap();
        let b = atlas.insert('b', &[255; 100], 10, 10).unwrap();

        let overlap_x = a.x < b.x + b.width && b.x < a.x + a.width;
        let overlap_y = a.y < b.y + b.height && b.y < a.y + a.height;
        assert!(!(overlap_x && overlap_y));
        assert_eq!(atlas.len(), 2);
    }

    #[test]
    fn test_insert_same_glyph_twice() {
        let mut atlas = GlyphAtlas::new(64);
        let first = atlas.insert('a', &[0; 4], 2, 2).unwrap();
        let second = atlas.insert('a', &[0; 4], 2, 2).unwrap();
        assert_eq!(first, second);
        assert_eq!(atlas.len(), 1);
    }

    #[test]
    fn test_atlas_full() {
        let mut atlas = GlyphAtlas::new(16);
        let err = atlas.insert('a', &[0; 400], 20, 20).unwrap_err();
        assert!(matches!(err, TextError::AtlasFull { atlas_width: 16, .. }));
    }

    #[test]
    fn test_bitmap_size_mismatch() {
        let mut atlas = GlyphAtlas::new(16);
        let err = atlas.insert('a', &[0; 3], 2, 2).unwrap_err();
        assert!(matches!(err, TextError::InvalidFontData(_)));
    }

    #[test]
    fn test_upload_brackets_api_state() {
        let mut atlas = GlyphAtlas::new(32);
        atlas.insert('a', &[0; 4], 2, 2).unwrap();
        let mut sink = RecordingSink::default();
        atlas.upload(&mut sink);

        assert_eq!(sink.calls.first().map(String::as_str), Some("save"));
        assert_eq!(sink.calls.get(1).map(String::as_str), Some("create 32x32"));
        assert_eq!(sink.calls.last().map(String::as_str), Some("restore"));
        assert_eq!(sink.calls.len(), 4);
    }

    #[test]
    fn test_uv_rect() {
        let rect = AtlasRect {
            x: 16,
            y: 32,
            width: 16,
            height: 32,
        };
        let (min, max) = rect.uv(64);
        assert_eq!(min, Vec2::new(0.25, 0.5));
        assert_eq!(max, Vec2::new(0.5, 1.0));
    }
}
