//! Rectangles and image quads.

use super::{RangeStart, ShapeLayout, ShapeRange, polygon::polygon, rotate_range};
use crate::batcher::BufferId;
use crate::buffer::DrawBuffer;
use crate::style::{ImageOptions, StyleOptions};
use crate::vertex::Vertex;
use tessera_core::math::Vec2;

/// Axis aligned rectangle from `min` (top-left) to `max` (bottom-right).
///
/// Corners are numbered clockwise from the top-left for
/// `only_round_these_corners`.
pub fn rect(id: BufferId, buffer: &mut DrawBuffer, min: Vec2, max: Vec2, style: &StyleOptions, rotation: f32) -> ShapeRange {
    let corners = [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)];
    polygon(id, buffer, &corners, (min + max) * 0.5, style, rotation, true)
}

/// Textured quad of `size` centered on `pos`.
pub fn image(id: BufferId, buffer: &mut DrawBuffer, pos: Vec2, size: Vec2, options: &ImageOptions) -> ShapeRange {
    let range = RangeStart::of(buffer);
    let half = size * 0.5;
    let (tl, br) = (options.uv_tl, options.uv_br);
    let corners = [
        (pos - half, tl),
        (Vec2::new(pos.x + half.x, pos.y - half.y), Vec2::new(br.x, tl.y)),
        (pos + half, br),
        (Vec2::new(pos.x - half.x, pos.y + half.y), Vec2::new(tl.x, br.y)),
    ];

    let start = range.vertex();
    for (position, uv) in corners {
        buffer.push_vertex(Vertex::new(position, options.tint).with_uv(uv));
    }
    buffer.push_triangle(start, start + 1, start + 2);
    buffer.push_triangle(start, start + 2, start + 3);

    rotate_range(buffer, start, buffer.next_index(), pos, options.rotation);
    range.finish(id, buffer, ShapeLayout::Filled)
}
