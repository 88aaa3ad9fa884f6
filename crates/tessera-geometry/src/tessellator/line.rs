//! Thick polylines with joints and rounded caps.
//!
//! Every segment is a quad offset by half the thickness to either side. The
//! "upper" side is the one on the left of the travel direction on screen.
//! Neighbouring segments share or connect their end vertices according to the
//! resolved [`LineJoint`].

use super::{LineRings, RangeStart, ShapeLayout, ShapeRange, angle_increase, paint_range};
use crate::batcher::BufferId;
use crate::buffer::DrawBuffer;
use crate::style::{LineCaps, LineJoint, StyleOptions};
use crate::vertex::{Index, Vertex};
use tessera_core::Color;
use tessera_core::math::{Vec2, are_parallel, line_intersection, normalized, rotate_around, sample_parabola, signed_angle};

/// Turns sharper than this many degrees use the requested joint, gentler
/// turns average their vertices.
pub const AVERAGE_JOINT_THRESHOLD: f32 = 15.0;

/// Joint actually emitted at one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedJoint {
    /// Segments continue in the same direction and share their vertices.
    Merge,
    Average,
    Miter,
    Bevel,
    BevelRound,
}

/// Pick the joint for a turn from direction `from` to direction `to`.
pub fn resolve_joint(requested: LineJoint, from: Vec2, to: Vec2, rounding: f32, miter_limit: f32) -> ResolvedJoint {
    if are_parallel(from, to) {
        return ResolvedJoint::Merge;
    }
    let turn = signed_angle(from, to).abs();
    if turn < AVERAGE_JOINT_THRESHOLD {
        return ResolvedJoint::Average;
    }

    let joint = match requested {
        LineJoint::Miter if turn > miter_limit => LineJoint::BevelRound,
        other => other,
    };
    match joint {
        LineJoint::VtxAverage => ResolvedJoint::Average,
        LineJoint::Miter => ResolvedJoint::Miter,
        LineJoint::BevelRound if rounding <= 0.0 => ResolvedJoint::Bevel,
        LineJoint::BevelRound => ResolvedJoint::BevelRound,
        LineJoint::Bevel => ResolvedJoint::Bevel,
    }
}

/// Left of the travel direction on screen.
fn upper_normal(direction: Vec2) -> Vec2 {
    Vec2::new(direction.y, -direction.x)
}

/// Upper and lower vertex of one end of a segment.
#[derive(Debug, Clone, Copy)]
struct EdgePair {
    upper: Index,
    lower: Index,
}

struct LineBuilder<'a> {
    buffer: &'a mut DrawBuffer,
    color: Color,
    rings: LineRings,
}

impl LineBuilder<'_> {
    fn push(&mut self, position: Vec2) -> Index {
        self.buffer.push_vertex(Vertex::new(position, self.color))
    }

    fn position(&self, index: Index) -> Vec2 {
        self.buffer.vertices()[index as usize].position()
    }

    /// Push a shared pair and record it on both edges.
    fn pair(&mut self, upper: Vec2, lower: Vec2) -> EdgePair {
        let pair = EdgePair {
            upper: self.push(upper),
            lower: self.push(lower),
        };
        self.rings.upper.push(pair.upper);
        self.rings.lower.push(pair.lower);
        pair
    }

    fn quad(&mut self, from: EdgePair, to: EdgePair) {
        self.buffer.push_triangle(from.upper, to.upper, to.lower);
        self.buffer.push_triangle(from.upper, to.lower, from.lower);
    }

    /// Fan from `pivot` over consecutive vertices.
    fn fan(&mut self, pivot: Index, rim: &[Index]) {
        for pair in rim.windows(2) {
            self.buffer.push_triangle(pivot, pair[0], pair[1]);
        }
    }

    /// Bevel joint: the inner edges meet at their intersection, the outer gap
    /// is closed by a triangle or an arc fanned from the inner vertex.
    ///
    /// Returns the end pair of the incoming and the start pair of the
    /// outgoing segment.
    fn bevel(&mut self, point: Vec2, from: Vec2, to: Vec2, half: f32, round: bool, step: f32) -> (EdgePair, EdgePair) {
        let outer_is_upper = from.perp_dot(to) > 0.0;
        let side = if outer_is_upper { 1.0 } else { -1.0 };
        let outer_from = upper_normal(from) * half * side;
        let outer_to = upper_normal(to) * half * side;

        let inner_from = point - outer_from;
        let inner_to = point - outer_to;
        let inner = line_intersection(inner_from - from, inner_from, inner_to, inner_to + to)
            .unwrap_or((inner_from + inner_to) * 0.5);

        let inner_index = self.push(inner);
        let mut rim = vec![self.push(point + outer_from)];
        if round {
            let sweep = signed_angle(outer_from, outer_to);
            let steps = (sweep.abs() / step - 1e-3).ceil().max(1.0) as usize;
            for k in 1..steps {
                let angle = sweep * k as f32 / steps as f32;
                rim.push(self.push(rotate_around(point + outer_from, point, angle)));
            }
        }
        rim.push(self.push(point + outer_to));
        self.fan(inner_index, &rim);

        let (first, last) = (rim[0], rim[rim.len() - 1]);
        if outer_is_upper {
            self.rings.upper.extend_from_slice(&rim);
            self.rings.lower.push(inner_index);
            (
                EdgePair {
                    upper: first,
                    lower: inner_index,
                },
                EdgePair {
                    upper: last,
                    lower: inner_index,
                },
            )
        } else {
            self.rings.upper.push(inner_index);
            self.rings.lower.extend_from_slice(&rim);
            (
                EdgePair {
                    upper: inner_index,
                    lower: first,
                },
                EdgePair {
                    upper: inner_index,
                    lower: last,
                },
            )
        }
    }

    /// Rounded cap bulging from `from` to `to` toward `outwards`, returns the
    /// interior cap vertices in order.
    fn cap(&mut self, from: Index, to: Index, outwards: Vec2, height: f32, segments: usize) -> Vec<Index> {
        let (start, end) = (self.position(from), self.position(to));
        let interior: Vec<Index> = (1..segments)
            .map(|k| {
                let t = k as f32 / segments as f32;
                self.push(sample_parabola(start, end, outwards, height, t))
            })
            .collect();

        let mut rim = interior.clone();
        rim.push(to);
        self.fan(from, &rim);
        interior
    }
}

/// Tessellate a polyline of at least two points.
///
/// Thickness is interpolated per point from `style.thickness.start` at the
/// first point to `style.thickness.end` at the last.
pub fn lines(
    id: BufferId,
    buffer: &mut DrawBuffer,
    points: &[Vec2],
    style: &StyleOptions,
    caps: LineCaps,
    joint: LineJoint,
    miter_limit: f32,
) -> ShapeRange {
    let range = RangeStart::of(buffer);
    let segments = points.len().saturating_sub(1);
    if segments == 0 {
        return range.finish(id, buffer, ShapeLayout::Line(LineRings::default()));
    }

    let directions: Vec<Vec2> = points.windows(2).map(|w| normalized(w[1] - w[0])).collect();
    let half_width = |i: usize| style.thickness.at(i as f32 / segments as f32) * 0.5;
    let step = angle_increase(style.rounding);

    let mut builder = LineBuilder {
        buffer: &mut *buffer,
        color: style.color.start,
        rings: LineRings::default(),
    };

    let first_offset = upper_normal(directions[0]) * half_width(0);
    let first = builder.pair(points[0] + first_offset, points[0] - first_offset);

    let mut segment_start = first;
    for i in 1..segments {
        let (point, from, to) = (points[i], directions[i - 1], directions[i]);
        let half = half_width(i);
        let upper_from = upper_normal(from) * half;
        let upper_to = upper_normal(to) * half;

        let (segment_end, next_start) = match resolve_joint(joint, from, to, style.rounding, miter_limit) {
            ResolvedJoint::Merge => {
                let pair = builder.pair(point + upper_from, point - upper_from);
                (pair, pair)
            }
            ResolvedJoint::Average => {
                let offset = (upper_from + upper_to) * 0.5;
                let pair = builder.pair(point + offset, point - offset);
                (pair, pair)
            }
            ResolvedJoint::Miter => {
                let average = (upper_from + upper_to) * 0.5;
                let upper = line_intersection(point + upper_from - from, point + upper_from, point + upper_to, point + upper_to + to)
                    .unwrap_or(point + average);
                let lower = line_intersection(point - upper_from - from, point - upper_from, point - upper_to, point - upper_to + to)
                    .unwrap_or(point - average);
                let pair = builder.pair(upper, lower);
                (pair, pair)
            }
            ResolvedJoint::Bevel => builder.bevel(point, from, to, half, false, step),
            ResolvedJoint::BevelRound => builder.bevel(point, from, to, half, true, step),
        };

        builder.quad(segment_start, segment_end);
        segment_start = next_start;
    }

    let last_point = points[segments];
    let last_direction = directions[segments - 1];
    let last_offset = upper_normal(last_direction) * half_width(segments);
    let last = builder.pair(last_point + last_offset, last_point - last_offset);
    builder.quad(segment_start, last);

    if !caps.is_empty() {
        let cap_segments = (180.0 / step).ceil() as usize;
        if caps.contains(LineCaps::START) {
            let height = half_width(0);
            builder.rings.start_cap = builder.cap(first.lower, first.upper, -directions[0], height, cap_segments);
        }
        if caps.contains(LineCaps::END) {
            let height = half_width(segments);
            builder.rings.end_cap = builder.cap(last.upper, last.lower, last_direction, height, cap_segments);
        }
    }

    let rings = std::mem::take(&mut builder.rings);
    let end = buffer.next_index();
    paint_range(buffer, range.vertex(), end, &style.color);
    range.finish(id, buffer, ShapeLayout::Line(rings))
}
