//! Recording implementation of [`Backend`].

use parking_lot::Mutex;
use tessera_core::TextureHandle;
use tessera_geometry::{Backend, DrawBuffer, ShapeType};
use tessera_text::FontTextureSink;

/// Which backend draw entry point a buffer was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPath {
    Default,
    Gradient,
    Textured,
    SimpleText,
    SdfText,
}

/// Records a backend call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    CreateFontTexture {
        width: u32,
        height: u32,
    },
    BufferFontTextureAtlas {
        width: u32,
        height: u32,
        offset_x: u32,
        offset_y: u32,
        size: usize,
    },
    SaveApiState,
    RestoreApiState,
    Draw {
        path: DrawPath,
        draw_order: i32,
        shape_type: ShapeType,
        texture: Option<TextureHandle>,
        vertex_count: usize,
        index_count: usize,
    },
}

/// Backend that records calls instead of rendering.
///
/// Submitted buffers are cloned so tests can inspect the exact geometry that
/// reached the backend.
///
/// # Example
///
/// ```rust
/// use tessera_test_utils::MockBackend;
/// use tessera_text::FontTextureSink;
///
/// let mut backend = MockBackend::new();
/// let texture = backend.create_font_texture(256, 256);
/// assert_eq!(texture.id(), 1);
/// assert_eq!(backend.count_texture_creates(), 1);
/// ```
pub struct MockBackend {
    /// Recorded calls for verification
    calls: Mutex<Vec<BackendCall>>,
    /// Copies of every flushed buffer, in submission order
    submitted: Mutex<Vec<DrawBuffer>>,
    next_texture_id: Mutex<u64>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
            next_texture_id: Mutex::new(1),
        }
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().clone()
    }

    /// Get a copy of every submitted buffer.
    pub fn submitted(&self) -> Vec<DrawBuffer> {
        self.submitted.lock().clone()
    }

    /// Draw calls only, in submission order.
    pub fn draws(&self) -> Vec<BackendCall> {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, BackendCall::Draw { .. }))
            .cloned()
            .collect()
    }

    pub fn count_draws(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, BackendCall::Draw { .. }))
            .count()
    }

    /// Count draws routed to one entry point.
    pub fn count_path(&self, path: DrawPath) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, BackendCall::Draw { path: p, .. } if *p == path))
            .count()
    }

    pub fn count_texture_creates(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, BackendCall::CreateFontTexture { .. }))
            .count()
    }

    pub fn count_atlas_uploads(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, BackendCall::BufferFontTextureAtlas { .. }))
            .count()
    }

    /// Clear recorded calls (useful between frames).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
        self.submitted.lock().clear();
    }

    /// Get total number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn record_draw(&self, path: DrawPath, buffer: &DrawBuffer) {
        let key = buffer.key();
        self.calls.lock().push(BackendCall::Draw {
            path,
            draw_order: key.draw_order,
            shape_type: key.shape_type,
            texture: key.texture,
            vertex_count: buffer.vertices().len(),
            index_count: buffer.indices().len(),
        });
        self.submitted.lock().push(buffer.clone());
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FontTextureSink for MockBackend {
    fn create_font_texture(&mut self, width: u32, height: u32) -> TextureHandle {
        let mut next = self.next_texture_id.lock();
        let handle = TextureHandle::new(*next);
        *next += 1;

        self.calls
            .lock()
            .push(BackendCall::CreateFontTexture { width, height });
        handle
    }

    fn buffer_font_texture_atlas(&mut self, width: u32, height: u32, offset_x: u32, offset_y: u32, data: &[u8]) {
        self.calls.lock().push(BackendCall::BufferFontTextureAtlas {
            width,
            height,
            offset_x,
            offset_y,
            size: data.len(),
        });
    }

    fn save_api_state(&mut self) {
        self.calls.lock().push(BackendCall::SaveApiState);
    }

    fn restore_api_state(&mut self) {
        self.calls.lock().push(BackendCall::RestoreApiState);
    }
}

impl Backend for MockBackend {
    fn draw_default(&mut self, buffer: &DrawBuffer) {
        self.record_draw(DrawPath::Default, buffer);
    }

    fn draw_gradient(&mut self, buffer: &DrawBuffer) {
        self.record_draw(DrawPath::Gradient, buffer);
    }

    fn draw_textured(&mut self, buffer: &DrawBuffer) {
        self.record_draw(DrawPath::Textured, buffer);
    }

    fn draw_simple_text(&mut self, buffer: &DrawBuffer) {
        self.record_draw(DrawPath::SimpleText, buffer);
    }

    fn draw_sdf_text(&mut self, buffer: &DrawBuffer) {
        self.record_draw(DrawPath::SdfText, buffer);
    }
}
