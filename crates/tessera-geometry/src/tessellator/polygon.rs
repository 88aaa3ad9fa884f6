//! Triangles, regular polygons, convex polygons and corner rounding.

use super::{RangeStart, ShapeLayout, ShapeRange, angle_increase, extrude, fill_center_fan, paint_range, push_unique, rotate_range};
use crate::batcher::BufferId;
use crate::buffer::DrawBuffer;
use crate::error::{DrawError, DrawResult};
use crate::style::StyleOptions;
use crate::vertex::Vertex;
use tessera_core::math::{Vec2, centroid, normalized, point_on_circle, rotate_around, signed_angle};

/// Tessellate a closed polygon given by its corners.
///
/// `plain` allows the center-less triangulation for unrounded triangles and
/// quads; everything else is fanned around `center`.
pub(crate) fn polygon(
    id: BufferId,
    buffer: &mut DrawBuffer,
    corners: &[Vec2],
    center: Vec2,
    style: &StyleOptions,
    rotation: f32,
    plain: bool,
) -> ShapeRange {
    let range = RangeStart::of(buffer);
    let rounded = (0..corners.len()).any(|i| style.rounds_corner(i));
    let boundary = if rounded {
        rounded_boundary(corners, style)
    } else {
        corners.to_vec()
    };

    let layout = if !style.is_filled {
        extrude::extrude_convex(buffer, &boundary, style.thickness.start, true, style.color.start)
    } else if plain && !rounded && boundary.len() <= 4 {
        fill_plain(buffer, &boundary, style)
    } else {
        fill_center_fan(buffer, center, &boundary, true, &style.color)
    };

    let end = buffer.next_index();
    paint_range(buffer, range.vertex(), end, &style.color);
    rotate_range(buffer, range.vertex(), end, center, rotation);
    range.finish(id, buffer, layout)
}

/// Single triangle or two-triangle quad.
fn fill_plain(buffer: &mut DrawBuffer, boundary: &[Vec2], style: &StyleOptions) -> ShapeLayout {
    let start = buffer.next_index();
    for point in boundary {
        buffer.push_vertex(Vertex::new(*point, style.color.start));
    }
    buffer.push_triangle(start, start + 1, start + 2);
    if boundary.len() == 4 {
        buffer.push_triangle(start, start + 2, start + 3);
    }
    ShapeLayout::Filled
}

/// Replace every rounded corner by an arc between its tangent points.
///
/// The radius is `rounding` times half the shortest side, shrunk where the
/// tangent points would pass the middle of an adjacent edge.
pub(crate) fn rounded_boundary(corners: &[Vec2], style: &StyleOptions) -> Vec<Vec2> {
    let n = corners.len();
    let shortest = (0..n)
        .map(|i| corners[i].distance(corners[(i + 1) % n]))
        .fold(f32::MAX, f32::min);
    let radius = style.rounding * shortest * 0.5;
    let step = angle_increase(style.rounding);

    let mut points = Vec::with_capacity(n * (90.0 / step) as usize);
    for (i, &corner) in corners.iter().enumerate() {
        if !style.rounds_corner(i) || radius <= 0.0 {
            push_unique(&mut points, corner);
            continue;
        }

        let to_prev = corners[(i + n - 1) % n] - corner;
        let to_next = corners[(i + 1) % n] - corner;
        let (dir_prev, dir_next) = (normalized(to_prev), normalized(to_next));
        let half_angle = signed_angle(dir_prev, dir_next).abs().to_radians() * 0.5;
        if half_angle < 1e-3 || half_angle > std::f32::consts::FRAC_PI_2 - 1e-3 {
            push_unique(&mut points, corner);
            continue;
        }

        let tangent = (radius / half_angle.tan()).min(to_prev.length().min(to_next.length()) * 0.5);
        let arc_radius = tangent * half_angle.tan();
        let from = corner + dir_prev * tangent;
        let to = corner + dir_next * tangent;
        let arc_center = corner + normalized(dir_prev + dir_next) * (arc_radius / half_angle.sin());

        let sweep = signed_angle(from - arc_center, to - arc_center);
        let steps = (sweep.abs() / step - 1e-3).ceil().max(1.0) as usize;
        for k in 0..=steps {
            let angle = sweep * k as f32 / steps as f32;
            push_unique(&mut points, rotate_around(from, arc_center, angle));
        }
    }

    if points.len() > 1
        && let (Some(first), Some(last)) = (points.first(), points.last())
        && first.distance_squared(*last) <= 1e-8
    {
        points.pop();
    }
    points
}

/// Triangle given by its top, right and left corners.
pub fn triangle(id: BufferId, buffer: &mut DrawBuffer, top: Vec2, right: Vec2, left: Vec2, style: &StyleOptions, rotation: f32) -> ShapeRange {
    let corners = [top, right, left];
    polygon(id, buffer, &corners, centroid(&corners), style, rotation, true)
}

/// Corners of a regular polygon, the first one straight above the center.
pub fn ngon_corners(center: Vec2, radius: f32, sides: u32) -> DrawResult<Vec<Vec2>> {
    if sides < 3 {
        return Err(DrawError::invalid("draw_ngon", format!("need at least 3 sides, got {}", sides)));
    }
    let step = 360.0 / sides as f32;
    Ok((0..sides)
        .map(|i| point_on_circle(center, radius, -90.0 + step * i as f32))
        .collect())
}

/// Regular polygon fanned around `center`, corners from [`ngon_corners`].
pub fn ngon(id: BufferId, buffer: &mut DrawBuffer, center: Vec2, corners: &[Vec2], style: &StyleOptions, rotation: f32) -> ShapeRange {
    polygon(id, buffer, corners, center, style, rotation, false)
}

pub fn check_convex(points: &[Vec2]) -> DrawResult<()> {
    if points.len() < 3 {
        return Err(DrawError::invalid("draw_convex", format!("need at least 3 points, got {}", points.len())));
    }
    Ok(())
}

/// Convex polygon, fanned around the average of its points. Callers run
/// [`check_convex`] first.
pub fn convex(id: BufferId, buffer: &mut DrawBuffer, points: &[Vec2], style: &StyleOptions, rotation: f32) -> ShapeRange {
    polygon(id, buffer, points, centroid(points), style, rotation, false)
}
