//! Interface to the GPU backend.

use crate::buffer::DrawBuffer;
use tessera_text::FontTextureSink;

/// Renders flushed draw buffers.
///
/// Tessera decides which call a buffer goes to:
///
/// | buffer | call |
/// |---|---|
/// | `Text` phase | [`Backend::draw_simple_text`] |
/// | `SdfText` phase | [`Backend::draw_sdf_text`] |
/// | texture set | [`Backend::draw_textured`] |
/// | radial gradient set | [`Backend::draw_gradient`] |
/// | anything else | [`Backend::draw_default`] |
///
/// Buffers are only borrowed for the duration of the call; a backend uploads
/// [`DrawBuffer::vertex_bytes`] and [`DrawBuffer::index_bytes`] and applies the
/// key's clip rect and texture state itself.
pub trait Backend: FontTextureSink {
    fn draw_default(&mut self, buffer: &DrawBuffer);
    fn draw_gradient(&mut self, buffer: &DrawBuffer);
    fn draw_textured(&mut self, buffer: &DrawBuffer);
    fn draw_simple_text(&mut self, buffer: &DrawBuffer);
    fn draw_sdf_text(&mut self, buffer: &DrawBuffer);
}
