//! Outlines and antialiasing fringes.
//!
//! Both are produced by [`extrude_ring`]: a copy of a shape edge plus the same
//! edge pushed outwards, stitched into a quad strip in a separate buffer.
//! Outlines are painted with the outline gradient; antialiasing fringes keep
//! the source colors and fade the extruded edge to zero alpha.

use crate::batcher::DrawBufferStore;
use crate::buffer::{BatchKey, DrawBuffer, GradientParams, ShapeType};
use crate::config::Config;
use crate::style::{ColorGrad, OutlineOptions, StyleOptions};
use crate::tessellator::extrude::push_extruded_strip;
use crate::tessellator::{ShapeRange, paint_range};
use crate::vertex::{Index, Vertex};
use tessera_core::profiling::profile_function;

/// What an outline pass is drawing, bounds the recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineCallType {
    /// The outline itself; may recurse once for its antialiasing.
    Normal,
    /// Antialiasing around a shape.
    Aa,
    /// Antialiasing around an outline.
    OutlineAa,
}

/// A shape edge copied out of its buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub vertices: Vec<Vertex>,
    pub closed: bool,
    /// `1.0` extrudes away from the ring's interior, `-1.0` into it.
    pub direction: f32,
}

impl Ring {
    pub fn outwards(vertices: Vec<Vertex>, closed: bool) -> Self {
        Self {
            vertices,
            closed,
            direction: 1.0,
        }
    }

    pub fn inwards(vertices: Vec<Vertex>, closed: bool) -> Self {
        Self {
            vertices,
            closed,
            direction: -1.0,
        }
    }
}

/// Append the strip for one ring and return the ring of its extruded edge.
pub fn extrude_ring(target: &mut DrawBuffer, ring: &Ring, distance: f32, call: OutlineCallType, color: &ColorGrad) -> Ring {
    let fade = call != OutlineCallType::Normal;
    let start = push_extruded_strip(
        target,
        &ring.vertices,
        ring.closed,
        distance * ring.direction,
        |mut vertex| {
            if fade {
                vertex.col = vertex.color().with_alpha(0.0).to_array();
            }
            vertex
        },
    );

    let n = ring.vertices.len() as Index;
    if !fade {
        paint_range(target, start, start + 2 * n, color);
    }

    Ring {
        vertices: target.vertices()[(start + n) as usize..(start + 2 * n) as usize].to_vec(),
        closed: ring.closed,
        direction: ring.direction,
    }
}

/// Key of the outline buffer for a shape drawn with `source`.
pub fn outline_key(source: &BatchKey, outline: &OutlineOptions) -> BatchKey {
    BatchKey {
        shape_type: ShapeType::Outline,
        texture: outline.texture,
        texture_uv: [
            outline.texture_uv_tiling.x,
            outline.texture_uv_tiling.y,
            outline.texture_uv_offset.x,
            outline.texture_uv_offset.y,
        ],
        gradient: GradientParams::from_grad(&outline.color),
        sdf: None,
        ..*source
    }
}

/// Key of the antialiasing buffer around geometry drawn with `source`.
///
/// Fringe colors are baked into the vertices, so the fringe always goes
/// through the backend's default pass.
pub fn aa_key(source: &BatchKey) -> BatchKey {
    BatchKey {
        shape_type: ShapeType::AA,
        texture: None,
        texture_uv: BatchKey::new(ShapeType::AA, source.draw_order).texture_uv,
        gradient: None,
        sdf: None,
        ..*source
    }
}

/// Draw the outline or antialiasing requested by `style` around `range`.
pub fn decorate_shape(store: &mut DrawBufferStore, config: &Config, range: &ShapeRange, key: &BatchKey, style: &StyleOptions) {
    if style.has_outline() {
        let rings = range.rings(store.buffer(range.buffer), Some(style.outline.draw_direction));
        draw_outline(store, config, &rings, key, style, OutlineCallType::Normal);
    } else if style.aa_enabled {
        let rings = range.rings(store.buffer(range.buffer), None);
        draw_outline(store, config, &rings, key, style, OutlineCallType::Aa);
    }
}

/// Extrude every ring. A normal outline with antialiasing enabled recurses
/// once around its own extruded edges; antialiasing passes never recurse.
pub fn draw_outline(store: &mut DrawBufferStore, config: &Config, rings: &[Ring], key: &BatchKey, style: &StyleOptions, call: OutlineCallType) {
    profile_function!();
    if rings.is_empty() {
        return;
    }

    match call {
        OutlineCallType::Normal => {
            let key = outline_key(key, &style.outline);
            let id = store.buffer_for(&key);
            let extruded: Vec<Ring> = rings
                .iter()
                .map(|ring| extrude_ring(store.get_mut(id), ring, style.outline.thickness, call, &style.outline.color))
                .collect();

            if style.aa_enabled {
                draw_outline(store, config, &extruded, &key, style, OutlineCallType::OutlineAa);
            }
        }
        OutlineCallType::Aa | OutlineCallType::OutlineAa => {
            let key = aa_key(key);
            let id = store.buffer_for(&key);
            let distance = style.aa_multiplier * config.global_aa_multiplier;
            for ring in rings {
                extrude_ring(store.get_mut(id), ring, distance, call, &style.color);
            }
        }
    }
}
