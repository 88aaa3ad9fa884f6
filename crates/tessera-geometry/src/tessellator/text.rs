//! Glyph quad emission.

use super::{RangeStart, ShapeLayout, ShapeRange, rotate_range};
use crate::batcher::BufferId;
use crate::buffer::DrawBuffer;
use crate::style::{ColorGrad, GradientType};
use crate::vertex::Vertex;
use tessera_core::Color;
use tessera_core::math::{Vec2, centroid};
use tessera_text::TextLayout;

/// How glyph vertices are colored.
#[derive(Debug, Clone, Copy)]
pub enum GlyphPaint<'a> {
    Gradient(&'a ColorGrad),
    Solid(Color),
}

/// Append one textured quad per glyph.
pub fn push_glyph_quads(buffer: &mut DrawBuffer, layout: &TextLayout, paint: GlyphPaint<'_>) {
    let last_index = layout.glyphs.len().saturating_sub(1).max(1) as f32;
    for glyph in &layout.glyphs {
        let corners = [
            (glyph.min, glyph.uv_min),
            (Vec2::new(glyph.max.x, glyph.min.y), Vec2::new(glyph.uv_max.x, glyph.uv_min.y)),
            (glyph.max, glyph.uv_max),
            (Vec2::new(glyph.min.x, glyph.max.y), Vec2::new(glyph.uv_min.x, glyph.uv_max.y)),
        ];

        let start = buffer.next_index();
        for (corner, (position, uv)) in corners.into_iter().enumerate() {
            let color = match paint {
                GlyphPaint::Solid(color) => color,
                GlyphPaint::Gradient(grad) => match grad.gradient_type {
                    GradientType::None => grad.start,
                    GradientType::Horizontal => grad.start.lerp(grad.end, glyph.index as f32 / last_index),
                    GradientType::Vertical if corner < 2 => grad.start,
                    GradientType::Vertical => grad.end,
                    GradientType::Radial | GradientType::RadialCorner => match layout.bounds {
                        Some(bounds) => grad.color_at(bounds.uv_of(position)),
                        None => grad.start,
                    },
                },
            };
            buffer.push_vertex(Vertex::new(position, color).with_uv(uv));
        }
        buffer.push_triangle(start, start + 1, start + 2);
        buffer.push_triangle(start, start + 2, start + 3);
    }
}

/// Emit laid out text, optionally preceded by a drop shadow layout, and rotate
/// everything around the center of the main text.
pub fn text(
    id: BufferId,
    buffer: &mut DrawBuffer,
    layout: &TextLayout,
    shadow: Option<(&TextLayout, Color)>,
    color: &ColorGrad,
    rotation: f32,
) -> ShapeRange {
    let range = RangeStart::of(buffer);
    if let Some((shadow_layout, shadow_color)) = shadow {
        push_glyph_quads(buffer, shadow_layout, GlyphPaint::Solid(shadow_color));
    }

    let main_start = buffer.next_index();
    push_glyph_quads(buffer, layout, GlyphPaint::Gradient(color));
    let end = buffer.next_index();

    if rotation != 0.0 && end > main_start {
        let positions: Vec<Vec2> = buffer.vertices()[main_start as usize..end as usize]
            .iter()
            .map(Vertex::position)
            .collect();
        rotate_range(buffer, range.vertex(), end, centroid(&positions), rotation);
    }
    range.finish(id, buffer, ShapeLayout::Text)
}
