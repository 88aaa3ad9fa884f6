//! Shape tessellation.
//!
//! Every function appends vertices and indices to a draw buffer and returns a
//! [`ShapeRange`] describing what it produced. Positions are generated first,
//! then UVs and colors over the range's bounding box, then the rotation.
//!
//! Vertex layouts inside a range:
//!
//! - filled with center: the center at offset 0, the boundary after it;
//! - filled without center: the boundary only;
//! - stroked: the inner ring followed by the outer ring, offset `i` and
//!   `i + n` lie on the same ray;
//! - lines: explicit upper, lower and cap index lists.

pub mod bezier;
pub mod circle;
pub mod extrude;
pub mod line;
pub mod polygon;
pub mod rect;
pub mod text;

use crate::batcher::BufferId;
use crate::buffer::DrawBuffer;
use crate::outline::Ring;
use crate::style::{ColorGrad, OutlineDrawDirection};
use crate::vertex::{Index, Vertex};
use tessera_core::math::{Aabb, Vec2, remap, rotate_around};

/// How the vertices of a [`ShapeRange`] are arranged.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeLayout {
    /// Center vertex first, then the boundary. Open boundaries (pie slices)
    /// are not fanned between their last and first vertex.
    FilledCenter { closed: bool },
    /// Boundary only, closed.
    Filled,
    /// Inner ring of `ring_len` vertices followed by the outer ring.
    Stroked { ring_len: u32, closed: bool },
    Line(LineRings),
    /// Glyph quads, never outlined.
    Text,
}

/// Vertex indices along the edges of a tessellated line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineRings {
    /// Upper edge, first to last point.
    pub upper: Vec<Index>,
    /// Lower edge, first to last point.
    pub lower: Vec<Index>,
    /// Start cap interior, lower edge to upper edge.
    pub start_cap: Vec<Index>,
    /// End cap interior, upper edge to lower edge.
    pub end_cap: Vec<Index>,
}

impl LineRings {
    /// The closed loop around the line.
    pub fn loop_indices(&self) -> impl Iterator<Item = Index> + '_ {
        self.upper
            .iter()
            .chain(&self.end_cap)
            .chain(self.lower.iter().rev())
            .chain(&self.start_cap)
            .copied()
    }
}

/// Geometry appended by one tessellation call.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRange {
    pub buffer: BufferId,
    /// First vertex.
    pub start: Index,
    /// One past the last vertex.
    pub end: Index,
    /// First index entry.
    pub index_start: usize,
    /// One past the last index entry.
    pub index_end: usize,
    pub layout: ShapeLayout,
}

impl ShapeRange {
    pub fn vertex_count(&self) -> usize {
        (self.end - self.start) as usize
    }

    /// Edges to outline or antialias.
    ///
    /// `direction` picks the edges of stroked closed shapes; `None` selects
    /// both, which is what antialiasing wants.
    pub fn rings(&self, buffer: &DrawBuffer, direction: Option<OutlineDrawDirection>) -> Vec<Ring> {
        let vertices = buffer.vertices();
        let slice = |from: Index, to: Index| vertices[from as usize..to as usize].to_vec();

        match &self.layout {
            ShapeLayout::FilledCenter { closed: true } => {
                vec![Ring::outwards(slice(self.start + 1, self.end), true)]
            }
            ShapeLayout::FilledCenter { closed: false } | ShapeLayout::Filled => {
                vec![Ring::outwards(slice(self.start, self.end), true)]
            }
            ShapeLayout::Stroked {
                ring_len,
                closed: true,
            } => {
                let split = self.start + ring_len;
                let inner = Ring::inwards(slice(self.start, split), true);
                let outer = Ring::outwards(slice(split, split + ring_len), true);
                match direction {
                    Some(OutlineDrawDirection::Outwards) => vec![outer],
                    Some(OutlineDrawDirection::Inwards) => vec![inner],
                    Some(OutlineDrawDirection::Both) | None => vec![outer, inner],
                }
            }
            ShapeLayout::Stroked {
                ring_len,
                closed: false,
            } => {
                let split = self.start + ring_len;
                let mut band = slice(self.start, split);
                band.extend(slice(split, split + ring_len).into_iter().rev());
                vec![Ring::outwards(band, true)]
            }
            ShapeLayout::Line(rings) => {
                let band = rings
                    .loop_indices()
                    .map(|index| vertices[index as usize])
                    .collect();
                vec![Ring::outwards(band, true)]
            }
            ShapeLayout::Text => Vec::new(),
        }
    }
}

/// Angular step in degrees used for arcs, finer as rounding grows.
pub fn angle_increase(rounding: f32) -> f32 {
    remap(rounding.clamp(0.0, 1.0), 0.0, 1.0, 20.0, 5.0)
}

/// Where a tessellation call starts writing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RangeStart {
    vertex: Index,
    index: usize,
}

impl RangeStart {
    pub(crate) fn of(buffer: &DrawBuffer) -> Self {
        Self {
            vertex: buffer.next_index(),
            index: buffer.indices().len(),
        }
    }

    pub(crate) fn vertex(&self) -> Index {
        self.vertex
    }

    pub(crate) fn finish(self, id: BufferId, buffer: &DrawBuffer, layout: ShapeLayout) -> ShapeRange {
        ShapeRange {
            buffer: id,
            start: self.vertex,
            end: buffer.next_index(),
            index_start: self.index,
            index_end: buffer.indices().len(),
            layout,
        }
    }
}

/// Bounding box of a vertex range.
pub(crate) fn range_bounds(buffer: &DrawBuffer, start: Index, end: Index) -> Option<Aabb> {
    Aabb::from_points(
        buffer.vertices()[start as usize..end as usize]
            .iter()
            .map(Vertex::position),
    )
}

/// Assign bounding box UVs and gradient colors to a vertex range.
pub(crate) fn paint_range(buffer: &mut DrawBuffer, start: Index, end: Index, color: &ColorGrad) {
    let Some(bounds) = range_bounds(buffer, start, end) else {
        return;
    };
    for vertex in &mut buffer.vertices_mut()[start as usize..end as usize] {
        let uv = bounds.uv_of(vertex.position());
        vertex.uv = uv.to_array();
        vertex.col = color.color_at(uv).to_array();
    }
}

/// Rotate a vertex range around `center` by `degrees`.
pub(crate) fn rotate_range(buffer: &mut DrawBuffer, start: Index, end: Index, center: Vec2, degrees: f32) {
    if degrees == 0.0 {
        return;
    }
    for vertex in &mut buffer.vertices_mut()[start as usize..end as usize] {
        vertex.set_position(rotate_around(vertex.position(), center, degrees));
    }
}

/// Push `point` unless it repeats the previous one.
pub(crate) fn push_unique(points: &mut Vec<Vec2>, point: Vec2) {
    if points
        .last()
        .is_none_or(|last| last.distance_squared(point) > 1e-8)
    {
        points.push(point);
    }
}

/// Append a center fan.
pub(crate) fn fill_center_fan(buffer: &mut DrawBuffer, center: Vec2, boundary: &[Vec2], closed: bool, color: &ColorGrad) -> ShapeLayout {
    let center_index = buffer.push_vertex(Vertex::new(center, color.start));
    for point in boundary {
        buffer.push_vertex(Vertex::new(*point, color.start));
    }
    let n = boundary.len() as Index;
    for i in 1..n {
        buffer.push_triangle(center_index, center_index + i, center_index + i + 1);
    }
    if closed && n > 2 {
        buffer.push_triangle(center_index, center_index + n, center_index + 1);
    }
    ShapeLayout::FilledCenter { closed }
}
