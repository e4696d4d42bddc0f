//! Graphics state that can be saved and restored.

use crate::backend::Pattern;
use crate::color::Color;
use crate::font::Font;
use crate::geometry::Size;
use crate::style::{StrokeStyle, TextDrawingMode};

/// Shadow cast by fills and strokes.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    /// Device-space offset of the shadow from the shape.
    pub offset: Size,
    /// Blur radius. Only pads the offscreen mask; the shadow edge stays hard.
    pub radius: f64,
    pub color: Color,
}

impl Shadow {
    /// Color used by [`GraphicsContext::set_shadow`](crate::GraphicsContext::set_shadow).
    pub const DEFAULT_COLOR: Color = Color::gray(0.0, 0.3);

    /// Solid pattern of the shadow color. Global alpha reaches the shadow
    /// through the mask, which is taken from already painted content.
    pub fn pattern<S>(&self) -> Pattern<S> {
        Pattern::Solid(self.color)
    }
}

/// Non-geometric drawing attributes captured by `save` and reinstated by `restore`.
///
/// Transform and clip live in the backend's own state stack, which is saved
/// and restored in lockstep with this one.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsState {
    /// Current fill color.
    pub fill_color: Color,
    /// Current stroke color.
    pub stroke_color: Color,
    /// Global alpha multiplied into every paint.
    pub alpha: f64,
    /// Shadow, if any.
    pub shadow: Option<Shadow>,
    /// Selected font.
    pub font: Option<Font>,
    /// Font size in text space units.
    pub font_size: f64,
    /// Extra advance added after every glyph.
    pub character_spacing: f64,
    /// How glyphs are painted.
    pub text_mode: TextDrawingMode,
    /// Stroke parameters.
    pub stroke: StrokeStyle,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            alpha: 1.0,
            shadow: None,
            font: None,
            font_size: 0.0,
            character_spacing: 0.0,
            text_mode: TextDrawingMode::default(),
            stroke: StrokeStyle::default(),
        }
    }
}

impl GraphicsState {
    /// Fill pattern derived from the fill color and global alpha.
    pub fn fill_pattern<S>(&self) -> Pattern<S> {
        Pattern::solid(self.fill_color, self.alpha)
    }

    /// Stroke pattern derived from the stroke color and global alpha.
    pub fn stroke_pattern<S>(&self) -> Pattern<S> {
        Pattern::solid(self.stroke_color, self.alpha)
    }
}
