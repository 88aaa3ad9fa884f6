//! Draw buffers and the key they are batched by.

use crate::style::{ColorGrad, GradientType, SdfTextOptions};
use crate::vertex::{Index, Vertex};
use tessera_core::{Color, TextureHandle, UserData};

/// Flush phase of a draw buffer, also selects the backend draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeType {
    Shape,
    Outline,
    AA,
    Text,
    SdfText,
}

impl ShapeType {
    /// Order in which phases are flushed within one draw order.
    pub const FLUSH_ORDER: [ShapeType; 5] = [
        ShapeType::Shape,
        ShapeType::Outline,
        ShapeType::AA,
        ShapeType::Text,
        ShapeType::SdfText,
    ];
}

/// Scissor rectangle in pixels. All zero disables clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ClipRect {
    pub const NONE: ClipRect = ClipRect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_enabled(&self) -> bool {
        *self != Self::NONE
    }
}

/// Radial gradient a backend can evaluate per pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientParams {
    pub start: Color,
    pub end: Color,
    /// `true` measures from the top-left corner instead of the center.
    pub corner: bool,
    pub radial_size: f32,
}

impl GradientParams {
    /// Parameters for radial gradients, `None` for the ones baked into vertex colors.
    pub fn from_grad(grad: &ColorGrad) -> Option<Self> {
        let corner = match grad.gradient_type {
            GradientType::Radial => false,
            GradientType::RadialCorner => true,
            _ => return None,
        };
        Some(Self {
            start: grad.start,
            end: grad.end,
            corner,
            radial_size: grad.radial_size,
        })
    }
}

/// Shader parameters of a signed distance field text buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SdfParams {
    pub thickness: f32,
    pub softness: f32,
    pub outline_thickness: f32,
    pub outline_color: Color,
    pub flip_alpha: bool,
}

impl From<&SdfTextOptions> for SdfParams {
    fn from(options: &SdfTextOptions) -> Self {
        Self {
            thickness: options.thickness,
            softness: options.softness,
            outline_thickness: options.outline_thickness,
            outline_color: options.outline_color,
            flip_alpha: options.flip_alpha,
        }
    }
}

/// Everything that forces geometry into a separate draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchKey {
    pub user_data: UserData,
    pub uid: u64,
    pub draw_order: i32,
    pub shape_type: ShapeType,
    pub texture: Option<TextureHandle>,
    /// Tiling xy followed by offset xy.
    pub texture_uv: [f32; 4],
    pub clip_rect: ClipRect,
    pub gradient: Option<GradientParams>,
    pub sdf: Option<SdfParams>,
}

impl BatchKey {
    /// Untextured key with default tiling.
    pub fn new(shape_type: ShapeType, draw_order: i32) -> Self {
        Self {
            user_data: UserData::NONE,
            uid: 0,
            draw_order,
            shape_type,
            texture: None,
            texture_uv: [1.0, 1.0, 0.0, 0.0],
            clip_rect: ClipRect::NONE,
            gradient: None,
            sdf: None,
        }
    }

    /// Same key in another phase.
    pub fn with_shape_type(mut self, shape_type: ShapeType) -> Self {
        self.shape_type = shape_type;
        self
    }
}

/// Geometry sharing one [`BatchKey`], submitted to the backend in one call.
#[derive(Debug, Clone)]
pub struct DrawBuffer {
    key: BatchKey,
    vertices: Vec<Vertex>,
    indices: Vec<Index>,
}

impl DrawBuffer {
    pub fn new(key: BatchKey, vertex_reserve: usize, index_reserve: usize) -> Self {
        Self {
            key,
            vertices: Vec::with_capacity(vertex_reserve),
            indices: Vec::with_capacity(index_reserve),
        }
    }

    pub fn key(&self) -> &BatchKey {
        &self.key
    }

    pub fn shape_type(&self) -> ShapeType {
        self.key.shape_type
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[Index] {
        &self.indices
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    /// Index the next pushed vertex will get.
    pub fn next_index(&self) -> Index {
        self.vertices.len() as Index
    }

    pub fn push_vertex(&mut self, vertex: Vertex) -> Index {
        let index = self.next_index();
        self.vertices.push(vertex);
        index
    }

    pub fn push_triangle(&mut self, a: Index, b: Index, c: Index) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Append geometry whose indices are relative to its first vertex.
    pub fn append(&mut self, vertices: &[Vertex], indices: &[Index]) {
        let base = self.next_index();
        self.vertices.extend_from_slice(vertices);
        self.indices.extend(indices.iter().map(|index| index + base));
    }

    /// Nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Drop the geometry, keep the allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Vertex data ready for a GPU upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data ready for a GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
