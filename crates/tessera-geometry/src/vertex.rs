//! Vertex format produced by the tessellator.

use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;
use tessera_core::Color;
use tessera_core::math::Vec2;

/// Index into the vertex list of the owning [`DrawBuffer`](crate::DrawBuffer).
pub type Index = u32;

/// Vertex for all tessellated geometry.
///
/// Position in screen pixels, UV in `0..1` over the shape's bounding box (or
/// the atlas rect for text), straight alpha RGBA color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub col: [f32; 4],
}

const_assert_eq!(std::mem::size_of::<Vertex>(), 32);

impl Vertex {
    /// Create a vertex with zero UV.
    pub fn new(pos: Vec2, col: Color) -> Self {
        Self {
            pos: pos.to_array(),
            uv: [0.0; 2],
            col: col.to_array(),
        }
    }

    pub fn with_uv(mut self, uv: Vec2) -> Self {
        self.uv = uv.to_array();
        self
    }

    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.pos)
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos.to_array();
    }

    pub fn uv(&self) -> Vec2 {
        Vec2::from_array(self.uv)
    }

    pub fn color(&self) -> Color {
        Color::from(self.col)
    }
}
