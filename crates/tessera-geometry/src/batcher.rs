//! Per-frame draw buffer store.
//!
//! Geometry is grouped by [`BatchKey`]. A buffer is created the first time a
//! key is requested in a frame and reused by every later request with an
//! equal key. Lookup is a linear scan, which stays cheap for the few hundred
//! distinct keys a UI frame produces.

use crate::backend::Backend;
use crate::buffer::{BatchKey, DrawBuffer, ShapeType};
use crate::config::Config;
use tessera_core::profiling::{profile_function, profile_scope};

/// Position of a buffer in the store, valid until the next purge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(usize);

impl BufferId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Statistics of one flush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of backend draw calls issued.
    pub draw_calls: u32,
    /// Total vertices submitted.
    pub vertex_count: u32,
    /// Total indices submitted.
    pub index_count: u32,
    /// Calls routed to `draw_textured`.
    pub textured_calls: u32,
    /// Calls routed to `draw_gradient`.
    pub gradient_calls: u32,
    /// Calls routed to either text path.
    pub text_calls: u32,
}

/// Owns every draw buffer of the frame.
#[derive(Debug)]
pub struct DrawBufferStore {
    buffers: Vec<DrawBuffer>,
    /// Sorted, deduplicated draw orders of all live buffers.
    draw_orders: Vec<i32>,
    gc_counter: u32,
    gc_collect_interval: u32,
    vertex_reserve: usize,
    index_reserve: usize,
}

impl DrawBufferStore {
    pub fn new(config: &Config) -> Self {
        Self {
            buffers: Vec::with_capacity(config.default_buffer_reserve),
            draw_orders: Vec::new(),
            gc_counter: 0,
            gc_collect_interval: config.gc_collect_interval,
            vertex_reserve: config.default_vtx_buffer_reserve,
            index_reserve: config.default_idx_buffer_reserve,
        }
    }

    /// Buffer for `key`, created on first use.
    pub fn buffer_for(&mut self, key: &BatchKey) -> BufferId {
        if let Some(index) = self.buffers.iter().position(|buffer| buffer.key() == key) {
            return BufferId(index);
        }

        if let Err(pos) = self.draw_orders.binary_search(&key.draw_order) {
            self.draw_orders.insert(pos, key.draw_order);
        }
        self.buffers
            .push(DrawBuffer::new(*key, self.vertex_reserve, self.index_reserve));
        BufferId(self.buffers.len() - 1)
    }

    /// Buffer behind `id`, `None` once a purge has dropped it.
    pub fn get(&self, id: BufferId) -> Option<&DrawBuffer> {
        self.buffers.get(id.0)
    }

    /// For ids returned by [`buffer_for`](Self::buffer_for) during the current call.
    pub(crate) fn buffer(&self, id: BufferId) -> &DrawBuffer {
        &self.buffers[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: BufferId) -> &mut DrawBuffer {
        &mut self.buffers[id.0]
    }

    pub fn buffers(&self) -> &[DrawBuffer] {
        &self.buffers
    }

    /// Live buffers of one phase, in creation order.
    pub fn buffers_of(&self, shape_type: ShapeType) -> impl Iterator<Item = &DrawBuffer> {
        self.buffers
            .iter()
            .filter(move |buffer| buffer.shape_type() == shape_type)
    }

    pub fn draw_orders(&self) -> &[i32] {
        &self.draw_orders
    }

    /// End the frame. Returns `true` when the buffers were purged.
    pub fn reset_frame(&mut self) -> bool {
        self.gc_counter += 1;
        if self.gc_counter > self.gc_collect_interval {
            self.gc_counter = 0;
            self.buffers.clear();
            self.buffers.shrink_to_fit();
            self.draw_orders.clear();
            tracing::debug!("Purged all draw buffers");
            true
        } else {
            for buffer in &mut self.buffers {
                buffer.clear();
            }
            false
        }
    }

    /// Submit every non-empty buffer by draw order, then phase.
    pub fn flush(&self, backend: &mut dyn Backend) -> FrameStats {
        profile_function!();

        let mut stats = FrameStats::default();
        for &draw_order in &self.draw_orders {
            for phase in ShapeType::FLUSH_ORDER {
                profile_scope!("flush_phase");
                for buffer in self.buffers.iter().filter(|buffer| {
                    buffer.key().draw_order == draw_order
                        && buffer.shape_type() == phase
                        && !buffer.is_empty()
                }) {
                    Self::submit(buffer, backend, &mut stats);
                }
            }
        }

        tracing::trace!(
            "Flushed {} draw calls ({} vertices, {} indices)",
            stats.draw_calls,
            stats.vertex_count,
            stats.index_count
        );
        stats
    }

    fn submit(buffer: &DrawBuffer, backend: &mut dyn Backend, stats: &mut FrameStats) {
        let key = buffer.key();
        match key.shape_type {
            ShapeType::Text => {
                stats.text_calls += 1;
                backend.draw_simple_text(buffer);
            }
            ShapeType::SdfText => {
                stats.text_calls += 1;
                backend.draw_sdf_text(buffer);
            }
            _ if key.texture.is_some() => {
                stats.textured_calls += 1;
                backend.draw_textured(buffer);
            }
            _ if key.gradient.is_some() => {
                stats.gradient_calls += 1;
                backend.draw_gradient(buffer);
            }
            _ => backend.draw_default(buffer),
        }
        stats.draw_calls += 1;
        stats.vertex_count += buffer.vertices().len() as u32;
        stats.index_count += buffer.indices().len() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::Vertex;
    use tessera_core::Color;
    use tessera_core::math::Vec2;

    fn store(gc_collect_interval: u32) -> DrawBufferStore {
        DrawBufferStore::new(&Config::default().with_gc_collect_interval(gc_collect_interval))
    }

    fn fill(store: &mut DrawBufferStore, id: BufferId) {
        let buffer = store.get_mut(id);
        let a = buffer.push_vertex(Vertex::new(Vec2::ZERO, Color::WHITE));
        buffer.push_triangle(a, a, a);
    }

    #[test]
    fn test_same_key_same_buffer() {
        let mut store = store(600);
        let key = BatchKey::new(ShapeType::Shape, 0);
        let a = store.buffer_for(&key);
        let b = store.buffer_for(&key);
        assert_eq!(a, b);
        assert_eq!(store.buffers().len(), 1);

        let other = store.buffer_for(&key.with_shape_type(ShapeType::Outline));
        assert_ne!(a, other);
    }

    #[test]
    fn test_draw_orders_sorted_unique() {
        let mut store = store(600);
        for order in [5, 1, 3, 1, 5, -2] {
            store.buffer_for(&BatchKey::new(ShapeType::Shape, order));
        }
        assert_eq!(store.draw_orders(), &[-2, 1, 3, 5]);
    }

    #[test]
    fn test_reset_clears_then_purges() {
        let mut store = store(1);
        let id = store.buffer_for(&BatchKey::new(ShapeType::Shape, 0));
        fill(&mut store, id);

        assert!(!store.reset_frame());
        assert_eq!(store.buffers().len(), 1);
        assert!(store.get(id).is_some_and(DrawBuffer::is_empty));

        assert!(store.reset_frame());
        assert!(store.buffers().is_empty());
        assert!(store.get(id).is_none());
        assert!(store.draw_orders().is_empty());
    }

    #[test]
    fn test_zero_interval_purges_every_frame() {
        let mut store = store(0);
        store.buffer_for(&BatchKey::new(ShapeType::Shape, 0));
        assert!(store.reset_frame());
        store.buffer_for(&BatchKey::new(ShapeType::Shape, 0));
        assert!(store.reset_frame());
    }
}
