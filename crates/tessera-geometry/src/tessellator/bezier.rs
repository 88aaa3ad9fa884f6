//! Cubic bezier sampling.

use tessera_core::math::{Vec2, cubic_bezier, remap};

/// Parametric step for a segment count in `0..=100`: `0.15` at zero, `0.01` at 100.
pub fn bezier_step(segments: u32) -> f32 {
    remap(segments.min(100) as f32, 0.0, 100.0, 0.15, 0.01)
}

/// Number of steps covering `0..=1`. Steps that divide 1 exactly up to float
/// error round, so the last interior sample never lands on the end point.
fn step_count(step: f32) -> usize {
    let exact = 1.0 / step;
    let count = if (exact - exact.round()).abs() < 1e-3 {
        exact.round()
    } else {
        exact.ceil()
    };
    count.max(1.0) as usize
}

/// Sample the curve from `p0` to `p3`, both ends included.
pub fn sample_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, segments: u32) -> Vec<Vec2> {
    let step = bezier_step(segments);
    let count = step_count(step);
    let mut points = Vec::with_capacity(count + 1);
    points.push(p0);
    for i in 1..count {
        points.push(cubic_bezier(p0, p1, p2, p3, i as f32 * step));
    }
    points.push(p3);
    points
}
