//! Tessera Text - fonts, glyph atlases and text layout
//!
//! This crate covers everything text needs before it becomes triangles:
//! - Font loading through an external [`FontFaceLoader`] / [`GlyphRasterizer`]
//! - Packing rasterized glyphs into a [`GlyphAtlas`] and uploading it through a
//!   [`FontTextureSink`]
//! - Line breaking, kerning and alignment in [`layout_text`]
//!
//! Quad emission, colors and batching live in `tessera-geometry`.
//!
//! ```rust,ignore
//! use tessera_text::*;
//!
//! let font = load_font(&mut loader, &mut backend, &FontSource::file("Roboto.ttf"),
//!     &FontDescriptor::default(), 1024)?;
//! let size = measure_text(&font, "Hello", &LayoutOptions::default())?;
//! ```

pub mod atlas;
pub mod error;
pub mod font;
pub mod layout;

pub use atlas::{AtlasRect, GlyphAtlas};
pub use error::{TextError, TextResult};
pub use font::{
    FaceMetrics, Font, FontDescriptor, FontFaceLoader, FontSource, FontTextureSink, Glyph,
    GlyphRasterizer, RasterizedGlyph, load_font,
};
pub use layout::{LayoutOptions, PositionedGlyph, TextAlignment, TextLayout, layout_text, measure_text};

// Re-export math types from tessera-core
pub use tessera_core::math::Vec2;
