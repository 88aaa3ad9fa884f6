//! Geometry cache for repeated text draws.
//!
//! UI frames tend to redraw the same labels at the same place every frame.
//! With caching enabled, the render context hashes everything that affects a
//! text draw and reuses the vertices produced the first time.

use crate::FontId;
use crate::buffer::ClipRect;
use crate::style::{ColorGrad, TextOptions};
use crate::vertex::{Index, Vertex};
use fxhash::FxHasher64;
use std::hash::{Hash, Hasher};
use tessera_core::Color;
use tessera_core::alloc::HashMap;
use tessera_core::math::Vec2;

/// Hash of one text draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextCacheKey(u64);

impl TextCacheKey {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        text: &str,
        font: FontId,
        options: &TextOptions,
        sdf: bool,
        pos: Vec2,
        rotation: f32,
        draw_order: i32,
        clip_rect: ClipRect,
    ) -> Self {
        let mut hasher = FxHasher64::default();
        text.hash(&mut hasher);
        font.hash(&mut hasher);
        sdf.hash(&mut hasher);
        hash_vec2(&mut hasher, pos);
        hasher.write_u32(rotation.to_bits());
        draw_order.hash(&mut hasher);
        clip_rect.hash(&mut hasher);

        hash_grad(&mut hasher, &options.color);
        let layout = &options.layout;
        for value in [layout.scale, layout.wrap_width, layout.spacing, layout.new_line_spacing] {
            hasher.write_u32(value.to_bits());
        }
        layout.word_wrap.hash(&mut hasher);
        (layout.alignment as u8).hash(&mut hasher);
        hash_vec2(&mut hasher, options.drop_shadow_offset);
        hash_color(&mut hasher, options.drop_shadow_color);
        if sdf {
            let params = &options.sdf;
            for value in [params.thickness, params.softness, params.outline_thickness] {
                hasher.write_u32(value.to_bits());
            }
            hash_color(&mut hasher, params.outline_color);
            params.flip_alpha.hash(&mut hasher);
        }
        options.user_data.hash(&mut hasher);
        options.unique_id.hash(&mut hasher);

        Self(hasher.finish())
    }
}

fn hash_vec2(hasher: &mut impl Hasher, v: Vec2) {
    hasher.write_u32(v.x.to_bits());
    hasher.write_u32(v.y.to_bits());
}

fn hash_color(hasher: &mut impl Hasher, color: Color) {
    for channel in color.to_array() {
        hasher.write_u32(channel.to_bits());
    }
}

fn hash_grad(hasher: &mut impl Hasher, grad: &ColorGrad) {
    hash_color(hasher, grad.start);
    hash_color(hasher, grad.end);
    grad.gradient_type.hash(hasher);
    hasher.write_u32(grad.radial_size.to_bits());
}

/// Geometry of one cached draw, indices relative to the first vertex.
#[derive(Debug, Clone)]
pub struct CachedText {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<Index>,
    last_used_frame: u64,
}

/// Cached text geometry keyed by [`TextCacheKey`].
#[derive(Debug, Default)]
pub struct TextCache {
    entries: HashMap<TextCacheKey, CachedText>,
    frame: u64,
    /// Statistics for monitoring cache performance
    pub hits: u64,
    pub misses: u64,
}

impl TextCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a draw, counting the hit or miss.
    pub fn get(&mut self, key: &TextCacheKey) -> Option<&CachedText> {
        let frame = self.frame;
        match self.entries.get_mut(key) {
            Some(entry) => {
                self.hits += 1;
                entry.last_used_frame = frame;
                Some(entry)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store geometry; `indices` are absolute and rebased onto `base_vertex`.
    pub fn insert(&mut self, key: TextCacheKey, vertices: &[Vertex], indices: &[Index], base_vertex: Index) {
        self.entries.insert(
            key,
            CachedText {
                vertices: vertices.to_vec(),
                indices: indices.iter().map(|index| index - base_vertex).collect(),
                last_used_frame: self.frame,
            },
        );
    }

    /// Advance to the next frame and drop entries unused for more than
    /// `expire_interval` frames. Returns the number of evicted entries.
    pub fn end_frame(&mut self, expire_interval: u32) -> usize {
        self.frame += 1;
        let frame = self.frame;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| frame - entry.last_used_frame <= expire_interval as u64);
        before - self.entries.len()
    }

    pub fn hit_rate(&self) -> f32 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f32 / total as f32
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry, e.g. when fonts change.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
