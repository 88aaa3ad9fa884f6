//! Style options for shapes, lines, text and images.
//!
//! All option structs are plain data with `Default` and fluent `with_*`
//! builders:
//!
//! ```
//! use tessera_core::Color;
//! use tessera_geometry::{ColorGrad, OutlineOptions, StyleOptions};
//!
//! let style = StyleOptions::filled(ColorGrad::horizontal(Color::RED, Color::BLUE))
//!     .with_rounding(0.25)
//!     .with_outline(OutlineOptions::new(2.0, Color::BLACK))
//!     .with_aa(true);
//! assert!(style.has_outline());
//! ```

use crate::FontId;
use bitflags::bitflags;
use tessera_core::math::Vec2;
use tessera_core::{Color, TextureHandle, UserData};
use tessera_text::LayoutOptions;

/// How vertex colors vary across a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GradientType {
    /// Solid `start` color.
    #[default]
    None,
    /// `start` on the left edge of the bounding box, `end` on the right.
    Horizontal,
    /// `start` on the top edge, `end` on the bottom.
    Vertical,
    /// `start` at the center, `end` at `radial_size` half extents away.
    Radial,
    /// `start` at the top-left corner, `end` toward the bottom-right.
    RadialCorner,
}

/// Two-color gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorGrad {
    pub start: Color,
    pub end: Color,
    pub gradient_type: GradientType,
    /// Radius of radial gradients relative to the shape, `1.0` reaches the edge.
    pub radial_size: f32,
}

impl ColorGrad {
    pub const fn solid(color: Color) -> Self {
        Self {
            start: color,
            end: color,
            gradient_type: GradientType::None,
            radial_size: 1.0,
        }
    }

    pub const fn horizontal(start: Color, end: Color) -> Self {
        Self {
            start,
            end,
            gradient_type: GradientType::Horizontal,
            radial_size: 1.0,
        }
    }

    pub const fn vertical(start: Color, end: Color) -> Self {
        Self {
            start,
            end,
            gradient_type: GradientType::Vertical,
            radial_size: 1.0,
        }
    }

    pub const fn radial(start: Color, end: Color, radial_size: f32) -> Self {
        Self {
            start,
            end,
            gradient_type: GradientType::Radial,
            radial_size,
        }
    }

    pub const fn radial_corner(start: Color, end: Color, radial_size: f32) -> Self {
        Self {
            start,
            end,
            gradient_type: GradientType::RadialCorner,
            radial_size,
        }
    }

    pub fn is_radial(&self) -> bool {
        matches!(
            self.gradient_type,
            GradientType::Radial | GradientType::RadialCorner
        )
    }

    /// Gradient parameter for a point with bounding box UV `uv`, in `[0, 1]`.
    pub fn factor(&self, uv: Vec2) -> f32 {
        let radial_size = if self.radial_size > 0.0 { self.radial_size } else { 1.0 };
        let t = match self.gradient_type {
            GradientType::None => 0.0,
            GradientType::Horizontal => uv.x,
            GradientType::Vertical => uv.y,
            GradientType::Radial => (uv - Vec2::splat(0.5)).length() * 2.0 / radial_size,
            GradientType::RadialCorner => uv.length() / (std::f32::consts::SQRT_2 * radial_size),
        };
        t.clamp(0.0, 1.0)
    }

    /// Color at bounding box UV `uv`.
    pub fn color_at(&self, uv: Vec2) -> Color {
        match self.gradient_type {
            GradientType::None => self.start,
            _ => self.start.lerp(self.end, self.factor(uv)),
        }
    }
}

impl Default for ColorGrad {
    fn default() -> Self {
        Self::solid(Color::WHITE)
    }
}

impl From<Color> for ColorGrad {
    fn from(color: Color) -> Self {
        Self::solid(color)
    }
}

/// Thickness that varies linearly along a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThicknessGrad {
    pub start: f32,
    pub end: f32,
}

impl ThicknessGrad {
    pub const fn uniform(thickness: f32) -> Self {
        Self {
            start: thickness,
            end: thickness,
        }
    }

    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Thickness at path parameter `t`.
    pub fn at(&self, t: f32) -> f32 {
        tessera_core::math::lerp(self.start, self.end, t)
    }
}

impl Default for ThicknessGrad {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Which edges of a stroked shape receive an outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutlineDrawDirection {
    #[default]
    Outwards,
    Inwards,
    Both,
}

/// Outline drawn around a shape. A zero thickness disables it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineOptions {
    pub thickness: f32,
    /// Only used by stroked closed shapes, filled shapes always grow outwards.
    pub draw_direction: OutlineDrawDirection,
    pub color: ColorGrad,
    pub texture: Option<TextureHandle>,
    pub texture_uv_tiling: Vec2,
    pub texture_uv_offset: Vec2,
}

impl OutlineOptions {
    pub fn new(thickness: f32, color: impl Into<ColorGrad>) -> Self {
        Self {
            thickness,
            color: color.into(),
            ..Default::default()
        }
    }

    pub fn with_direction(mut self, direction: OutlineDrawDirection) -> Self {
        self.draw_direction = direction;
        self
    }

    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_texture_uv(mut self, tiling: Vec2, offset: Vec2) -> Self {
        self.texture_uv_tiling = tiling;
        self.texture_uv_offset = offset;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            thickness: 0.0,
            draw_direction: OutlineDrawDirection::Outwards,
            color: ColorGrad::solid(Color::BLACK),
            texture: None,
            texture_uv_tiling: Vec2::ONE,
            texture_uv_offset: Vec2::ZERO,
        }
    }
}

/// Style of shapes and lines.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOptions {
    pub color: ColorGrad,
    /// Stroke thickness; lines interpolate from `start` to `end` along the path.
    pub thickness: ThicknessGrad,
    /// Corner rounding in `0..1`, relative to half the shortest side.
    pub rounding: f32,
    /// Corner indices to round, empty rounds all of them.
    pub only_round_these_corners: Vec<usize>,
    pub outline: OutlineOptions,
    pub texture: Option<TextureHandle>,
    pub texture_uv_tiling: Vec2,
    pub texture_uv_offset: Vec2,
    pub is_filled: bool,
    pub aa_enabled: bool,
    /// Antialiasing band width in pixels before the global multiplier.
    pub aa_multiplier: f32,
    pub user_data: UserData,
    /// Geometry with different ids never shares a draw buffer.
    pub unique_id: u64,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            color: ColorGrad::default(),
            thickness: ThicknessGrad::default(),
            rounding: 0.0,
            only_round_these_corners: Vec::new(),
            outline: OutlineOptions::default(),
            texture: None,
            texture_uv_tiling: Vec2::ONE,
            texture_uv_offset: Vec2::ZERO,
            is_filled: true,
            aa_enabled: false,
            aa_multiplier: 1.0,
            user_data: UserData::NONE,
            unique_id: 0,
        }
    }
}

impl StyleOptions {
    /// Filled shape style.
    pub fn filled(color: impl Into<ColorGrad>) -> Self {
        Self {
            color: color.into(),
            ..Default::default()
        }
    }

    /// Stroked shape or line style.
    pub fn stroked(color: impl Into<ColorGrad>, thickness: f32) -> Self {
        Self {
            color: color.into(),
            thickness: ThicknessGrad::uniform(thickness),
            is_filled: false,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<ColorGrad>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = ThicknessGrad::uniform(thickness);
        self
    }

    pub fn with_thickness_grad(mut self, start: f32, end: f32) -> Self {
        self.thickness = ThicknessGrad::new(start, end);
        self
    }

    pub fn with_rounding(mut self, rounding: f32) -> Self {
        self.rounding = rounding.clamp(0.0, 1.0);
        self
    }

    pub fn with_rounded_corners(mut self, corners: impl IntoIterator<Item = usize>) -> Self {
        self.only_round_these_corners = corners.into_iter().collect();
        self
    }

    pub fn with_outline(mut self, outline: OutlineOptions) -> Self {
        self.outline = outline;
        self
    }

    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_texture_uv(mut self, tiling: Vec2, offset: Vec2) -> Self {
        self.texture_uv_tiling = tiling;
        self.texture_uv_offset = offset;
        self
    }

    pub fn with_filled(mut self, is_filled: bool) -> Self {
        self.is_filled = is_filled;
        self
    }

    pub fn with_aa(mut self, enabled: bool) -> Self {
        self.aa_enabled = enabled;
        self
    }

    pub fn with_aa_multiplier(mut self, multiplier: f32) -> Self {
        self.aa_multiplier = multiplier;
        self
    }

    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.user_data = user_data;
        self
    }

    pub fn with_unique_id(mut self, unique_id: u64) -> Self {
        self.unique_id = unique_id;
        self
    }

    pub fn has_outline(&self) -> bool {
        self.outline.thickness > 0.0
    }

    /// Whether corner `index` should be rounded.
    pub fn rounds_corner(&self, index: usize) -> bool {
        self.rounding > 0.0
            && (self.only_round_these_corners.is_empty()
                || self.only_round_these_corners.contains(&index))
    }
}

bitflags! {
    /// Rounded caps at the ends of a line.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LineCaps: u8 {
        const NONE = 0;
        const START = 1 << 0;
        const END = 1 << 1;
        const BOTH = Self::START.bits() | Self::END.bits();
    }
}

/// How consecutive line segments are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineJoint {
    /// Extend both edges to their intersections.
    #[default]
    Miter,
    /// Fill the outer gap with a single triangle.
    Bevel,
    /// Fill the outer gap with an arc.
    BevelRound,
    /// Average the two segments' end vertices.
    VtxAverage,
}

/// Parameters for signed distance field text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SdfTextOptions {
    /// Distance threshold of the glyph edge, `0.5` is the nominal outline.
    pub thickness: f32,
    pub softness: f32,
    pub outline_thickness: f32,
    pub outline_color: Color,
    pub flip_alpha: bool,
}

impl Default for SdfTextOptions {
    fn default() -> Self {
        Self {
            thickness: 0.5,
            softness: 0.02,
            outline_thickness: 0.0,
            outline_color: Color::BLACK,
            flip_alpha: false,
        }
    }
}

/// Style of a text draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOptions {
    /// Font to draw with, `None` uses the first loaded font.
    pub font: Option<FontId>,
    pub color: ColorGrad,
    pub layout: LayoutOptions,
    /// Shadow offset in pixels, zero disables the shadow.
    pub drop_shadow_offset: Vec2,
    pub drop_shadow_color: Color,
    pub sdf: SdfTextOptions,
    pub user_data: UserData,
    pub unique_id: u64,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font: None,
            color: ColorGrad::default(),
            layout: LayoutOptions::default(),
            drop_shadow_offset: Vec2::ZERO,
            drop_shadow_color: Color::BLACK,
            sdf: SdfTextOptions::default(),
            user_data: UserData::NONE,
            unique_id: 0,
        }
    }
}

impl TextOptions {
    pub fn new(color: impl Into<ColorGrad>) -> Self {
        Self {
            color: color.into(),
            ..Default::default()
        }
    }

    pub fn with_font(mut self, font: FontId) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_drop_shadow(mut self, offset: Vec2, color: Color) -> Self {
        self.drop_shadow_offset = offset;
        self.drop_shadow_color = color;
        self
    }

    pub fn with_sdf(mut self, sdf: SdfTextOptions) -> Self {
        self.sdf = sdf;
        self
    }

    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.user_data = user_data;
        self
    }

    pub fn has_drop_shadow(&self) -> bool {
        self.drop_shadow_offset != Vec2::ZERO
    }
}

/// Style of an image quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageOptions {
    pub tint: Color,
    /// Rotation in degrees around the image center.
    pub rotation: f32,
    pub uv_tiling: Vec2,
    pub uv_offset: Vec2,
    /// Texture coordinate of the top-left corner.
    pub uv_tl: Vec2,
    /// Texture coordinate of the bottom-right corner.
    pub uv_br: Vec2,
    pub user_data: UserData,
    pub unique_id: u64,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            tint: Color::WHITE,
            rotation: 0.0,
            uv_tiling: Vec2::ONE,
            uv_offset: Vec2::ZERO,
            uv_tl: Vec2::ZERO,
            uv_br: Vec2::ONE,
            user_data: UserData::NONE,
            unique_id: 0,
        }
    }
}

impl ImageOptions {
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_uv_rect(mut self, top_left: Vec2, bottom_right: Vec2) -> Self {
        self.uv_tl = top_left;
        self.uv_br = bottom_right;
        self
    }

    pub fn with_tiling(mut self, tiling: Vec2, offset: Vec2) -> Self {
        self.uv_tiling = tiling;
        self.uv_offset = offset;
        self
    }
}
