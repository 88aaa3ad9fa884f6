//! Vector, angle and interpolation helpers used by the tessellator.
//!
//! Vector types come from [`glam`]; everything here works in screen space with
//! the y axis pointing down, so increasing angles run clockwise on screen.
//!
//! ```
//! use tessera_core::math::{Vec2, point_on_circle, remap};
//!
//! let p = point_on_circle(Vec2::ZERO, 10.0, 90.0);
//! assert!((p.y - 10.0).abs() < 1e-4);
//! assert!((remap(50.0, 0.0, 100.0, 0.15, 0.01) - 0.08).abs() < 1e-6);
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{Mat2, Vec2, Vec4, vec2};

/// Tolerance for direction comparisons (parallel tests, degenerate normals).
pub const EPSILON: f32 = 1e-4;

/// Normalize a vector, zero-length input yields zero instead of NaN.
#[inline]
pub fn normalized(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Rotate `point` around `center` by `degrees` (clockwise on screen).
pub fn rotate_around(point: Vec2, center: Vec2, degrees: f32) -> Vec2 {
    let rotation = Vec2::from_angle(degrees.to_radians());
    center + rotation.rotate(point - center)
}

/// Linear interpolation between two scalars.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Map `value` from `[from_min, from_max]` onto `[to_min, to_max]`.
///
/// An empty source range maps everything onto `to_min`.
pub fn remap(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    let span = from_max - from_min;
    if span.abs() < f32::EPSILON {
        return to_min;
    }
    to_min + (value - from_min) * (to_max - to_min) / span
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_angle(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}

/// Point on a circle at `degrees`, measured from the positive x axis.
#[inline]
pub fn point_on_circle(center: Vec2, radius: f32, degrees: f32) -> Vec2 {
    center + Vec2::from_angle(degrees.to_radians()) * radius
}

/// Intersection of the infinite lines `a0-a1` and `b0-b1`.
///
/// Returns `None` when the lines are parallel.
pub fn line_intersection(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> Option<Vec2> {
    let r = a1 - a0;
    let s = b1 - b0;
    let denom = r.perp_dot(s);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (b0 - a0).perp_dot(s) / denom;
    Some(a0 + r * t)
}

/// Whether two directions point the same way within [`EPSILON`].
///
/// Opposite directions are not considered parallel: a path that folds back on
/// itself needs a joint.
pub fn are_parallel(a: Vec2, b: Vec2) -> bool {
    let a = normalized(a);
    let b = normalized(b);
    a.perp_dot(b).abs() < EPSILON && a.dot(b) > 0.0
}

/// Signed angle in degrees from `from` to `to`, in `(-180, 180]`.
///
/// Positive values turn clockwise on screen.
pub fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    from.perp_dot(to).atan2(from.dot(to)).to_degrees()
}

/// Signed area of a polygon (shoelace formula).
///
/// Positive for rings that run clockwise on screen.
pub fn signed_area(points: &[Vec2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        sum += p.perp_dot(q);
    }
    sum * 0.5
}

/// Sample a cubic bezier curve at `t`.
pub fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Sample a parabola spanning `start..end` that bulges by `height` at `t = 0.5`.
///
/// The bulge side is the perpendicular of the chord that agrees with
/// `direction_hint`.
pub fn sample_parabola(start: Vec2, end: Vec2, direction_hint: Vec2, height: f32, t: f32) -> Vec2 {
    let mut normal = normalized((end - start).perp());
    if normal.dot(direction_hint) < 0.0 {
        normal = -normal;
    }
    start.lerp(end, t) + normal * (4.0 * height * t * (1.0 - t))
}

/// Unweighted average of the points.
///
/// This is not the area centroid; irregular polygons get a center pulled
/// toward their densest vertices.
pub fn centroid(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    points.iter().copied().sum::<Vec2>() / points.len() as f32
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Bounding box of the given points, `None` when empty.
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.min = bounds.min.min(p);
            bounds.max = bounds.max.max(p);
        }
        Some(bounds)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Position of `point` inside the box, `(0, 0)` top-left to `(1, 1)` bottom-right.
    ///
    /// Degenerate axes map to `0`.
    pub fn uv_of(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            remap(point.x, self.min.x, self.max.x, 0.0, 1.0),
            remap(point.y, self.min.y, self.max.y, 0.0, 1.0),
        )
    }
}
