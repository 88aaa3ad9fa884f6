//! The public drawing API.
//!
//! A [`RenderContext`] owns all per-frame state: the draw buffers, the loaded
//! fonts, the text cache and the current clip rect. A frame looks like this:
//!
//! ```rust,ignore
//! let mut ctx = RenderContext::new(Config::default());
//! loop {
//!     ctx.draw_rect(Vec2::ZERO, Vec2::new(100.0, 50.0), &StyleOptions::filled(Color::RED), 0.0, 0);
//!     ctx.draw_text("Hello", Vec2::new(10.0, 30.0), &TextOptions::new(Color::WHITE), 0.0, 1);
//!     ctx.flush_buffers(&mut backend);
//!     ctx.reset_frame();
//! }
//! ```
//!
//! Draw calls never fail loudly. Invalid arguments are reported through
//! [`Config::error_callback`] and `tracing`, and the call draws nothing.

use crate::backend::Backend;
use crate::batcher::{DrawBufferStore, FrameStats};
use crate::buffer::{BatchKey, ClipRect, GradientParams, SdfParams, ShapeType};
use crate::config::Config;
use crate::error::{DrawError, DrawResult};
use crate::outline::decorate_shape;
use crate::style::{ImageOptions, LineCaps, LineJoint, StyleOptions, TextOptions};
use crate::tessellator::{RangeStart, ShapeLayout, ShapeRange, bezier, circle, line, polygon, rect, text as glyphs};
use crate::text_cache::{TextCache, TextCacheKey};
use tessera_core::TextureHandle;
use tessera_core::math::Vec2;
use tessera_core::profiling::{self, profile_function};
use tessera_text::{
    Font, FontDescriptor, FontFaceLoader, FontSource, FontTextureSink, TextLayout, TextResult, layout_text,
    measure_text,
};

/// Identifies a font loaded into a [`RenderContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FontId(pub u32);

/// Immediate-mode renderer state.
pub struct RenderContext {
    config: Config,
    store: DrawBufferStore,
    fonts: Vec<Font>,
    text_cache: TextCache,
    clip_rect: ClipRect,
}

impl RenderContext {
    pub fn new(config: Config) -> Self {
        let store = DrawBufferStore::new(&config);
        Self {
            config,
            store,
            fonts: Vec::new(),
            text_cache: TextCache::new(),
            clip_rect: ClipRect::NONE,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The draw buffers recorded so far this frame.
    pub fn buffers(&self) -> &DrawBufferStore {
        &self.store
    }

    pub fn text_cache(&self) -> &TextCache {
        &self.text_cache
    }

    pub fn font(&self, id: FontId) -> Option<&Font> {
        self.fonts.get(id.0 as usize)
    }

    /// Clip every following draw call to `rect`; [`ClipRect::NONE`] disables clipping.
    pub fn set_clip_rect(&mut self, rect: ClipRect) {
        self.clip_rect = rect;
    }

    pub fn clip_rect(&self) -> ClipRect {
        self.clip_rect
    }

    /// Axis aligned rectangle from its top-left to its bottom-right corner.
    pub fn draw_rect(&mut self, min: Vec2, max: Vec2, style: &StyleOptions, rotation: f32, draw_order: i32) -> Option<ShapeRange> {
        profile_function!();
        let key = self.shape_key(style, draw_order);
        let id = self.store.buffer_for(&key);
        let range = rect::rect(id, self.store.get_mut(id), min, max, style, rotation);
        Some(self.decorate(range, &key, style))
    }

    pub fn draw_triangle(
        &mut self,
        top: Vec2,
        right: Vec2,
        left: Vec2,
        style: &StyleOptions,
        rotation: f32,
        draw_order: i32,
    ) -> Option<ShapeRange> {
        profile_function!();
        let key = self.shape_key(style, draw_order);
        let id = self.store.buffer_for(&key);
        let range = polygon::triangle(id, self.store.get_mut(id), top, right, left, style, rotation);
        Some(self.decorate(range, &key, style))
    }

    /// Regular polygon with `sides` corners, the first one straight above `center`.
    pub fn draw_ngon(
        &mut self,
        center: Vec2,
        radius: f32,
        sides: u32,
        style: &StyleOptions,
        rotation: f32,
        draw_order: i32,
    ) -> Option<ShapeRange> {
        profile_function!();
        let corners = self.report(polygon::ngon_corners(center, radius, sides))?;
        let key = self.shape_key(style, draw_order);
        let id = self.store.buffer_for(&key);
        let range = polygon::ngon(id, self.store.get_mut(id), center, &corners, style, rotation);
        Some(self.decorate(range, &key, style))
    }

    /// Circle, pie or arc.
    ///
    /// Angles are in degrees, clockwise on screen from the positive x axis. A
    /// sweep of 360 degrees or more draws the full circle.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        style: &StyleOptions,
        segments: u32,
        rotation: f32,
        start_angle: f32,
        end_angle: f32,
        draw_order: i32,
    ) -> Option<ShapeRange> {
        profile_function!();
        let (points, closed) = self.report(circle::circle_points(center, radius, segments, start_angle, end_angle))?;
        let key = self.shape_key(style, draw_order);
        let id = self.store.buffer_for(&key);
        let range = circle::circle(id, self.store.get_mut(id), center, &points, closed, style, rotation);
        Some(self.decorate(range, &key, style))
    }

    /// Convex polygon through `points`, in either winding.
    pub fn draw_convex(&mut self, points: &[Vec2], style: &StyleOptions, rotation: f32, draw_order: i32) -> Option<ShapeRange> {
        profile_function!();
        self.report(polygon::check_convex(points))?;
        let key = self.shape_key(style, draw_order);
        let id = self.store.buffer_for(&key);
        let range = polygon::convex(id, self.store.get_mut(id), points, style, rotation);
        Some(self.decorate(range, &key, style))
    }

    /// Single segment line.
    pub fn draw_line(&mut self, p1: Vec2, p2: Vec2, style: &StyleOptions, caps: LineCaps, draw_order: i32) -> Option<ShapeRange> {
        profile_function!();
        Some(self.push_lines(&[p1, p2], style, caps, LineJoint::Miter, draw_order))
    }

    /// Polyline through at least three points.
    pub fn draw_lines(
        &mut self,
        points: &[Vec2],
        style: &StyleOptions,
        caps: LineCaps,
        joint: LineJoint,
        draw_order: i32,
    ) -> Option<ShapeRange> {
        profile_function!();
        if points.len() < 3 {
            return self.report(Err(DrawError::invalid(
                "draw_lines",
                format!("need at least 3 points, got {}; use draw_line for a single segment", points.len()),
            )));
        }
        Some(self.push_lines(points, style, caps, joint, draw_order))
    }

    /// Cubic bezier curve from `p0` to `p3`; `segments` in `0..=100` sets
    /// the sampling density.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_bezier(
        &mut self,
        p0: Vec2,
        p1: Vec2,
        p2: Vec2,
        p3: Vec2,
        style: &StyleOptions,
        caps: LineCaps,
        joint: LineJoint,
        segments: u32,
        draw_order: i32,
    ) -> Option<ShapeRange> {
        profile_function!();
        let points = bezier::sample_bezier(p0, p1, p2, p3, segments);
        Some(self.push_lines(&points, style, caps, joint, draw_order))
    }

    /// Textured quad of `size` centered on `pos`.
    pub fn draw_image(
        &mut self,
        texture: TextureHandle,
        pos: Vec2,
        size: Vec2,
        options: &ImageOptions,
        draw_order: i32,
    ) -> Option<ShapeRange> {
        profile_function!();
        let key = BatchKey {
            user_data: options.user_data,
            uid: options.unique_id,
            texture: Some(texture),
            texture_uv: [options.uv_tiling.x, options.uv_tiling.y, options.uv_offset.x, options.uv_offset.y],
            clip_rect: self.clip_rect,
            ..BatchKey::new(ShapeType::Shape, draw_order)
        };
        let id = self.store.buffer_for(&key);
        Some(rect::image(id, self.store.get_mut(id), pos, size, options))
    }

    /// Text with its first baseline starting at `pos`.
    pub fn draw_text(&mut self, text: &str, pos: Vec2, options: &TextOptions, rotation: f32, draw_order: i32) -> Option<ShapeRange> {
        profile_function!();
        let result = self.push_text(text, pos, options, rotation, draw_order, false);
        self.report(result)
    }

    /// Text from a signed distance field font.
    pub fn draw_text_sdf(&mut self, text: &str, pos: Vec2, options: &TextOptions, rotation: f32, draw_order: i32) -> Option<ShapeRange> {
        profile_function!();
        let result = self.push_text(text, pos, options, rotation, draw_order, true);
        self.report(result)
    }

    /// Size of the glyph quads `draw_text` would emit for `text`.
    pub fn calculate_text_size(&mut self, text: &str, options: &TextOptions) -> Option<Vec2> {
        let result = self
            .resolve_font(options)
            .and_then(|font| measure_text(font, text, &options.layout).map_err(DrawError::from));
        self.report(result)
    }

    /// Load a font and register it. The first loaded font is the default.
    pub fn load_font(
        &mut self,
        loader: &mut dyn FontFaceLoader,
        sink: &mut dyn FontTextureSink,
        source: &FontSource,
        descriptor: &FontDescriptor,
    ) -> TextResult<FontId> {
        let font = tessera_text::load_font(loader, sink, source, descriptor, self.config.max_font_atlas_size)?;
        let id = FontId(self.fonts.len() as u32);
        self.log(&format!(
            "Loaded font {} with {} glyphs at {}px",
            id.0,
            font.glyph_count(),
            font.pixel_size()
        ));
        self.fonts.push(font);
        self.text_cache.clear();
        Ok(id)
    }

    /// Submit every recorded buffer to `backend`.
    pub fn flush_buffers(&self, backend: &mut dyn Backend) -> FrameStats {
        self.store.flush(backend)
    }

    /// End the frame: clear or purge the buffers and age the text cache.
    pub fn reset_frame(&mut self) {
        if self.store.reset_frame() {
            self.log("Purged all draw buffers");
        }
        if self.config.text_caching_enabled {
            let evicted = self.text_cache.end_frame(self.config.text_cache_expire_interval);
            if evicted > 0 {
                tracing::debug!("Evicted {} cached text entries", evicted);
            }
        }
        profiling::new_frame();
    }

    fn shape_key(&self, style: &StyleOptions, draw_order: i32) -> BatchKey {
        BatchKey {
            user_data: style.user_data,
            uid: style.unique_id,
            texture: style.texture,
            texture_uv: [
                style.texture_uv_tiling.x,
                style.texture_uv_tiling.y,
                style.texture_uv_offset.x,
                style.texture_uv_offset.y,
            ],
            clip_rect: self.clip_rect,
            gradient: GradientParams::from_grad(&style.color),
            ..BatchKey::new(ShapeType::Shape, draw_order)
        }
    }

    fn decorate(&mut self, range: ShapeRange, key: &BatchKey, style: &StyleOptions) -> ShapeRange {
        decorate_shape(&mut self.store, &self.config, &range, key, style);
        range
    }

    fn push_lines(&mut self, points: &[Vec2], style: &StyleOptions, caps: LineCaps, joint: LineJoint, draw_order: i32) -> ShapeRange {
        let key = self.shape_key(style, draw_order);
        let id = self.store.buffer_for(&key);
        let range = line::lines(id, self.store.get_mut(id), points, style, caps, joint, self.config.miter_limit);
        self.decorate(range, &key, style)
    }

    fn resolve_font(&self, options: &TextOptions) -> DrawResult<&Font> {
        let id = options.font.unwrap_or_default();
        self.font(id).ok_or(DrawError::UnknownFont(id.0))
    }

    fn push_text(
        &mut self,
        text: &str,
        pos: Vec2,
        options: &TextOptions,
        rotation: f32,
        draw_order: i32,
        sdf: bool,
    ) -> DrawResult<ShapeRange> {
        let font_id = options.font.unwrap_or_default();
        let font = self
            .fonts
            .get(font_id.0 as usize)
            .ok_or(DrawError::UnknownFont(font_id.0))?;
        if sdf && !font.is_sdf() {
            return Err(DrawError::invalid("draw_text_sdf", format!("font {} was not loaded as SDF", font_id.0)));
        }

        let key = BatchKey {
            user_data: options.user_data,
            uid: options.unique_id,
            texture: Some(font.atlas_texture()),
            clip_rect: self.clip_rect,
            sdf: sdf.then(|| SdfParams::from(&options.sdf)),
            ..BatchKey::new(if sdf { ShapeType::SdfText } else { ShapeType::Text }, draw_order)
        };

        let cache_key = self
            .config
            .text_caching_enabled
            .then(|| TextCacheKey::new(text, font_id, options, sdf, pos, rotation, draw_order, self.clip_rect));

        if let Some(cache_key) = &cache_key {
            if let Some(cached) = self.text_cache.get(cache_key) {
                let id = self.store.buffer_for(&key);
                let buffer = self.store.get_mut(id);
                let range = RangeStart::of(buffer);
                buffer.append(&cached.vertices, &cached.indices);
                return Ok(range.finish(id, buffer, ShapeLayout::Text));
            }
        }

        let layout = layout_text(font, text, pos, &options.layout)?;
        let shadow: Option<TextLayout> = if options.has_drop_shadow() {
            Some(layout_text(font, text, pos + options.drop_shadow_offset, &options.layout)?)
        } else {
            None
        };

        let id = self.store.buffer_for(&key);
        let buffer = self.store.get_mut(id);
        let range = glyphs::text(
            id,
            buffer,
            &layout,
            shadow.as_ref().map(|shadow| (shadow, options.drop_shadow_color)),
            &options.color,
            rotation,
        );

        if let Some(cache_key) = cache_key {
            let buffer = self.store.buffer(id);
            self.text_cache.insert(
                cache_key,
                &buffer.vertices()[range.start as usize..range.end as usize],
                &buffer.indices()[range.index_start..range.index_end],
                range.start,
            );
        }
        Ok(range)
    }

    fn report<T>(&mut self, result: DrawResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                let message = err.to_string();
                tracing::warn!("{}", message);
                if let Some(callback) = self.config.error_callback.as_mut() {
                    callback(&message);
                }
                None
            }
        }
    }

    fn log(&mut self, message: &str) {
        tracing::debug!("{}", message);
        if let Some(callback) = self.config.log_callback.as_mut() {
            callback(message);
        }
    }
}
