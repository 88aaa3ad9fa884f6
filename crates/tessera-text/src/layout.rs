//! Line breaking and glyph placement.
//!
//! Layout works on a loaded [`Font`] and produces one quad per visible glyph.
//! The draw position is the baseline of the first line; each following line
//! moves down by the font's line height. Explicit `'\n'` always breaks.

use crate::font::{Font, Glyph};
use crate::{TextError, TextResult};
use tessera_core::math::{Aabb, Vec2};
use tessera_core::profiling::profile_function;

/// Horizontal alignment of each line relative to the draw position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Layout parameters shared by measuring and drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Multiplier applied to every glyph metric.
    pub scale: f32,
    /// Maximum line width in pixels, `0` disables wrapping.
    pub wrap_width: f32,
    /// Break between words (`true`) or between any two glyphs (`false`).
    pub word_wrap: bool,
    pub alignment: TextAlignment,
    /// Extra advance added after every glyph.
    pub spacing: f32,
    /// Extra distance added between lines.
    pub new_line_spacing: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            wrap_width: 0.0,
            word_wrap: true,
            alignment: TextAlignment::Left,
            spacing: 0.0,
            new_line_spacing: 0.0,
        }
    }
}

impl LayoutOptions {
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_wrap_width(mut self, wrap_width: f32) -> Self {
        self.wrap_width = wrap_width;
        self
    }

    pub fn with_word_wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_new_line_spacing(mut self, new_line_spacing: f32) -> Self {
        self.new_line_spacing = new_line_spacing;
        self
    }
}

/// A glyph quad in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    pub codepoint: char,
    /// Position among the emitted quads, used for per-glyph gradients.
    pub index: usize,
    pub min: Vec2,
    pub max: Vec2,
    pub uv_min: Vec2,
    pub uv_max: Vec2,
}

/// Result of laying out a string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    pub glyphs: Vec<PositionedGlyph>,
    pub line_count: usize,
    /// Bounding box of all glyph quads, `None` when nothing is visible.
    pub bounds: Option<Aabb>,
}

impl TextLayout {
    pub fn size(&self) -> Vec2 {
        self.bounds.map(|bounds| bounds.size()).unwrap_or(Vec2::ZERO)
    }
}

/// Lay out `text` with its first baseline starting at `origin`.
pub fn layout_text(font: &Font, text: &str, origin: Vec2, options: &LayoutOptions) -> TextResult<TextLayout> {
    profile_function!();

    let lines = break_lines(font, text, options)?;
    let line_advance = font.line_height() * options.scale + options.new_line_spacing;

    let mut glyphs = Vec::with_capacity(text.len());
    for (line_index, line) in lines.iter().enumerate() {
        let width = line_width(font, line, options);
        let offset_x = match options.alignment {
            TextAlignment::Left => 0.0,
            TextAlignment::Center => -width * 0.5,
            TextAlignment::Right => -width,
        };

        let mut pen = origin + Vec2::new(offset_x, line_index as f32 * line_advance);
        let mut previous = None;
        for ch in line.chars() {
            let Some((codepoint, glyph)) = resolve_glyph(font, ch) else {
                continue;
            };
            pen.x += kerning(font, previous, codepoint, options);

            if glyph.has_bitmap() {
                let min = pen + Vec2::new(glyph.bearing.x, -glyph.bearing.y) * options.scale;
                glyphs.push(PositionedGlyph {
                    codepoint,
                    index: glyphs.len(),
                    min,
                    max: min + glyph.size * options.scale,
                    uv_min: glyph.uv_min,
                    uv_max: glyph.uv_max,
                });
            }

            pen.x += glyph.advance * options.scale + options.spacing;
            previous = Some(codepoint);
        }
    }

    let bounds = Aabb::from_points(glyphs.iter().flat_map(|glyph| [glyph.min, glyph.max]));
    Ok(TextLayout {
        glyphs,
        line_count: lines.len(),
        bounds,
    })
}

/// Size of the box `layout_text` would fill for the same arguments.
pub fn measure_text(font: &Font, text: &str, options: &LayoutOptions) -> TextResult<Vec2> {
    Ok(layout_text(font, text, Vec2::ZERO, options)?.size())
}

/// Glyph for `ch`, falling back to `'?'` for codepoints the font lacks.
fn resolve_glyph(font: &Font, ch: char) -> Option<(char, &Glyph)> {
    font.glyph(ch)
        .map(|glyph| (ch, glyph))
        .or_else(|| font.glyph('?').map(|glyph| ('?', glyph)))
}

fn kerning(font: &Font, previous: Option<char>, current: char, options: &LayoutOptions) -> f32 {
    match previous {
        Some(previous) if font.supports_kerning() => font.kerning(previous, current) * options.scale,
        _ => 0.0,
    }
}

/// Pen advance of one glyph including kerning against `previous`.
fn glyph_advance(font: &Font, previous: Option<char>, ch: char, options: &LayoutOptions) -> Option<f32> {
    let (codepoint, glyph) = resolve_glyph(font, ch)?;
    Some(kerning(font, previous, codepoint, options) + glyph.advance * options.scale + options.spacing)
}

/// Total pen advance of a line.
fn line_width(font: &Font, line: &str, options: &LayoutOptions) -> f32 {
    extend_width(font, line, options, 0.0, None).0
}

/// Continue a measured run over `text`, kerning against `previous`.
fn extend_width(
    font: &Font,
    text: &str,
    options: &LayoutOptions,
    mut width: f32,
    mut previous: Option<char>,
) -> (f32, Option<char>) {
    for ch in text.chars() {
        if let Some(advance) = glyph_advance(font, previous, ch, options) {
            width += advance;
            previous = resolve_glyph(font, ch).map(|(codepoint, _)| codepoint);
        }
    }
    (width, previous)
}

fn break_lines<'a>(font: &Font, text: &'a str, options: &LayoutOptions) -> TextResult<Vec<std::borrow::Cow<'a, str>>> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if options.wrap_width <= 0.0 || line_width(font, paragraph, options) <= options.wrap_width {
            lines.push(paragraph.into());
        } else if options.word_wrap {
            lines.extend(wrap_words(font, paragraph, options).into_iter().map(Into::into));
        } else {
            lines.extend(wrap_chars(font, paragraph, options)?.into_iter().map(Into::into));
        }
    }
    Ok(lines)
}

/// Words accumulate until the next one would overflow; a word wider than the
/// wrap width gets a line of its own.
fn wrap_words(font: &Font, paragraph: &str, options: &LayoutOptions) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;
    let mut previous = None;
    for word in paragraph.split(' ') {
        if current.is_empty() {
            current.push_str(word);
            (width, previous) = extend_width(font, word, options, 0.0, None);
            continue;
        }
        let (spaced, after_space) = extend_width(font, " ", options, width, previous);
        let (candidate, last) = extend_width(font, word, options, spaced, after_space);
        if candidate > options.wrap_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            (width, previous) = extend_width(font, word, options, 0.0, None);
        } else {
            current.push(' ');
            current.push_str(word);
            width = candidate;
            previous = last;
        }
    }
    lines.push(current);
    lines
}

fn wrap_chars(font: &Font, paragraph: &str, options: &LayoutOptions) -> TextResult<Vec<String>> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;
    let mut previous = None;
    for ch in paragraph.chars() {
        let Some(single) = glyph_advance(font, None, ch, options) else {
            continue;
        };
        if single > options.wrap_width {
            return Err(TextError::WrapWidthTooSmall {
                wrap_width: options.wrap_width,
                required: single,
            });
        }

        let advance = glyph_advance(font, previous, ch, options).unwrap_or(single);
        if !current.is_empty() && width + advance > options.wrap_width {
            lines.push(std::mem::take(&mut current));
            width = single;
        } else {
            width += advance;
        }
        current.push(ch);
        previous = resolve_glyph(font, ch).map(|(codepoint, _)| codepoint);
    }
    lines.push(current);
    Ok(lines)
}
