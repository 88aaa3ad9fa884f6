//! Ring extrusion shared by stroked shapes, outlines and antialiasing.

use super::ShapeLayout;
use crate::buffer::DrawBuffer;
use crate::vertex::{Index, Vertex};
use tessera_core::Color;
use tessera_core::math::{EPSILON, Vec2, normalized, signed_area};

/// Smallest cosine between an averaged normal and its edge normal, caps
/// spikes at very sharp corners.
const MIN_MITER_COS: f32 = 0.25;

/// Outward offset of every ring point, scaled so both adjacent edges move by
/// one unit.
///
/// Outward is taken from the ring's winding, so either orientation works.
/// Open rings use the single adjacent edge at both ends.
pub fn ring_offsets(points: &[Vec2], closed: bool) -> Vec<Vec2> {
    let n = points.len();
    if n < 2 {
        return vec![Vec2::ZERO; n];
    }

    let winding = if signed_area(points) < 0.0 { -1.0 } else { 1.0 };
    let edge_normal = |a: Vec2, b: Vec2| {
        let d = normalized(b - a);
        Vec2::new(d.y, -d.x) * winding
    };

    (0..n)
        .map(|i| {
            let prev = if i > 0 {
                Some(edge_normal(points[i - 1], points[i]))
            } else if closed {
                Some(edge_normal(points[n - 1], points[0]))
            } else {
                None
            };
            let next = if i + 1 < n {
                Some(edge_normal(points[i], points[i + 1]))
            } else if closed {
                Some(edge_normal(points[n - 1], points[0]))
            } else {
                None
            };

            match (prev, next) {
                (Some(prev), Some(next)) => {
                    let next = if next == Vec2::ZERO { prev } else { next };
                    let sum = prev + next;
                    if sum.length_squared() < EPSILON {
                        // edges fold back onto each other
                        return next;
                    }
                    let average = sum.normalize();
                    average / average.dot(next).max(MIN_MITER_COS)
                }
                (Some(normal), None) | (None, Some(normal)) => normal,
                (None, None) => Vec2::ZERO,
            }
        })
        .collect()
}

/// Append `ring` followed by its copy pushed out by `distance`, stitched into
/// a quad strip. Returns the index of the first ring vertex.
pub fn push_extruded_strip(
    buffer: &mut DrawBuffer,
    ring: &[Vertex],
    closed: bool,
    distance: f32,
    mut map_outer: impl FnMut(Vertex) -> Vertex,
) -> Index {
    let points: Vec<Vec2> = ring.iter().map(Vertex::position).collect();
    let offsets = ring_offsets(&points, closed);

    let start = buffer.next_index();
    for vertex in ring {
        buffer.push_vertex(*vertex);
    }
    for (vertex, offset) in ring.iter().zip(&offsets) {
        let mut outer = *vertex;
        outer.set_position(vertex.position() + *offset * distance);
        buffer.push_vertex(map_outer(outer));
    }

    let n = ring.len() as Index;
    let edges = if closed { n } else { n.saturating_sub(1) };
    for i in 0..edges {
        let a_in = start + i;
        let b_in = start + (i + 1) % n;
        let a_out = a_in + n;
        let b_out = b_in + n;
        buffer.push_triangle(a_in, b_in, b_out);
        buffer.push_triangle(a_in, b_out, a_out);
    }
    start
}

/// Stroke a boundary: the boundary becomes the inner ring and is pushed
/// outwards by `thickness` to form the outer ring.
pub fn extrude_convex(buffer: &mut DrawBuffer, boundary: &[Vec2], thickness: f32, closed: bool, color: Color) -> ShapeLayout {
    let ring: Vec<Vertex> = boundary.iter().map(|p| Vertex::new(*p, color)).collect();
    push_extruded_strip(buffer, &ring, closed, thickness, |vertex| vertex);
    ShapeLayout::Stroked {
        ring_len: boundary.len() as Index,
        closed,
    }
}
