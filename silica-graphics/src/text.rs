//! Single-line text frames.

use crate::font::Font;
use crate::geometry::{AffineTransform, Point, Rect, Size};

/// Horizontal placement of a line inside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Frame of `text` drawn on one line inside `bounds`.
///
/// The frame is as wide as the text and as tall as `font_size`. Center and
/// right alignment position it relative to the width of `bounds`.
pub fn content_frame(
    text: &str,
    bounds: Rect,
    font: &Font,
    font_size: f64,
    text_matrix: &AffineTransform,
    alignment: TextAlignment,
) -> Rect {
    let width = font.single_line_width(text, font_size, text_matrix);
    let mut frame = Rect::new(bounds.origin.x, bounds.origin.y, width, font_size);
    // Center and right offsets are measured from zero, not from bounds.origin.x.
    match alignment {
        TextAlignment::Left => {}
        TextAlignment::Center => frame.origin.x = (bounds.width() - width) / 2.0,
        TextAlignment::Right => frame.origin.x = bounds.width() - width,
    }
    frame
}

/// Size of `text` on one line laid out from the origin of a box of `size`,
/// with the height extended below the baseline by the font's descender.
pub fn bounding_rect(
    text: &str,
    size: Size,
    font: &Font,
    font_size: f64,
    text_matrix: &AffineTransform,
    alignment: TextAlignment,
) -> Rect {
    let bounds = Rect {
        origin: Point::ZERO,
        size,
    };
    let mut frame = content_frame(text, bounds, font, font_size, text_matrix, alignment);
    frame.size.height -= font.descender(font_size);
    frame
}
