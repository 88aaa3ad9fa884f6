//! Circles, arcs and pie slices.

use super::{RangeStart, ShapeRange, extrude, fill_center_fan, paint_range, rotate_range};
use crate::batcher::BufferId;
use crate::buffer::DrawBuffer;
use crate::error::{DrawError, DrawResult};
use crate::style::StyleOptions;
use tessera_core::math::{EPSILON, Vec2, normalize_angle, point_on_circle};

pub const MIN_SEGMENTS: u32 = 6;
pub const MAX_SEGMENTS: u32 = 180;

/// Boundary samples of a circle or arc, and whether it is closed.
///
/// A span of at least 360 degrees is a full circle without a duplicated seam
/// vertex. Anything shorter is normalized into `[0, 360)`, ordered so that
/// `end > start` and sampled including both ends.
pub fn circle_points(center: Vec2, radius: f32, segments: u32, start_angle: f32, end_angle: f32) -> DrawResult<(Vec<Vec2>, bool)> {
    let segments = segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS);

    if (end_angle - start_angle).abs() >= 360.0 {
        let step = 360.0 / segments as f32;
        let points = (0..segments)
            .map(|i| point_on_circle(center, radius, start_angle + step * i as f32))
            .collect();
        return Ok((points, true));
    }

    let mut start = normalize_angle(start_angle);
    let mut end = normalize_angle(end_angle);
    if (end - start).abs() < EPSILON {
        return Err(DrawError::invalid(
            "draw_circle",
            format!("arc from {} to {} degrees is empty", start_angle, end_angle),
        ));
    }
    if end < start {
        std::mem::swap(&mut start, &mut end);
    }

    let step = (end - start) / segments as f32;
    let points = (0..=segments)
        .map(|i| point_on_circle(center, radius, start + step * i as f32))
        .collect();
    Ok((points, false))
}

/// Filled pie or full disc, or a stroked ring or arc band, through the
/// boundary produced by [`circle_points`].
pub fn circle(
    id: BufferId,
    buffer: &mut DrawBuffer,
    center: Vec2,
    points: &[Vec2],
    closed: bool,
    style: &StyleOptions,
    rotation: f32,
) -> ShapeRange {
    let range = RangeStart::of(buffer);
    let layout = if style.is_filled {
        fill_center_fan(buffer, center, points, closed, &style.color)
    } else {
        extrude::extrude_convex(buffer, points, style.thickness.start, closed, style.color.start)
    };

    let end = buffer.next_index();
    paint_range(buffer, range.vertex(), end, &style.color);
    rotate_range(buffer, range.vertex(), end, center, rotation);
    range.finish(id, buffer, layout)
}
