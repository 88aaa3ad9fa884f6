//! Tessera Geometry - immediate-mode 2D shape tessellation and batching
//!
//! This crate provides:
//! - A [`RenderContext`] with per-frame draw calls for rects, triangles,
//!   polygons, circles and arcs, polylines, beziers, images and text
//! - Tessellation into [`Vertex`] / [`Index`] triangle lists with rounded
//!   corners, gradients, line joints and caps
//! - Outlines and antialiasing fringes generated from the tessellated edges
//! - Batching of the result into [`DrawBuffer`]s keyed by draw order, phase
//!   and render state, flushed to a [`Backend`]
//!
//! # Example
//!
//! ```ignore
//! use tessera_geometry::*;
//!
//! let mut ctx = RenderContext::new(Config::default());
//!
//! let style = StyleOptions::filled(ColorGrad::vertical(Color::RED, Color::BLUE))
//!     .with_rounding(0.5)
//!     .with_aa(true);
//! ctx.draw_rect(Vec2::new(10.0, 10.0), Vec2::new(110.0, 60.0), &style, 0.0, 0);
//!
//! let line = StyleOptions::stroked(Color::WHITE, 3.0);
//! ctx.draw_lines(&points, &line, LineCaps::BOTH, LineJoint::BevelRound, 1);
//!
//! ctx.flush_buffers(&mut backend);
//! ctx.reset_frame();
//! ```

pub mod backend;
pub mod batcher;
pub mod buffer;
pub mod config;
pub mod context;
pub mod error;
pub mod outline;
pub mod style;
pub mod tessellator;
pub mod text_cache;
pub mod vertex;

pub use backend::Backend;
pub use batcher::{BufferId, DrawBufferStore, FrameStats};
pub use buffer::{BatchKey, ClipRect, DrawBuffer, GradientParams, SdfParams, ShapeType};
pub use config::{Config, MessageCallback};
pub use context::{FontId, RenderContext};
pub use error::{DrawError, DrawResult};
pub use outline::{OutlineCallType, Ring};
pub use style::{
    ColorGrad, GradientType, ImageOptions, LineCaps, LineJoint, OutlineDrawDirection, OutlineOptions,
    SdfTextOptions, StyleOptions, TextOptions, ThicknessGrad,
};
pub use tessellator::{LineRings, ShapeLayout, ShapeRange};
pub use text_cache::{TextCache, TextCacheKey};
pub use vertex::{Index, Vertex};

// Re-export the shared types used throughout the API
pub use tessera_core::math::Vec2;
pub use tessera_core::{Color, TextureHandle, UserData};
pub use tessera_text::{LayoutOptions, TextAlignment};
