//! Text state and glyph rendering for GraphicsContext.

use super::GraphicsContext;
use crate::backend::Backend;
use crate::error::{GraphicsResult, StateError};
use crate::font::{self, Font, GlyphId, OutlineSink};
use crate::geometry::{AffineTransform, Point, Rect, Size};
use crate::path::quad_to_cubic;
use crate::style::{FillRule, TextDrawingMode};
use crate::text::{content_frame, TextAlignment};

/// Feeds glyph outlines into the backend path, mapped by `transform`.
struct GlyphPathSink<'a, B: Backend> {
    backend: &'a mut B,
    transform: AffineTransform,
    start: Point,
    current: Point,
}

impl<'a, B: Backend> GlyphPathSink<'a, B> {
    fn new(backend: &'a mut B, transform: AffineTransform) -> Self {
        Self {
            backend,
            transform,
            start: Point::ZERO,
            current: Point::ZERO,
        }
    }

    fn map(&self, x: f64, y: f64) -> Point {
        Point::new(x, y).applying(&self.transform)
    }
}

impl<B: Backend> OutlineSink for GlyphPathSink<'_, B> {
    fn move_to(&mut self, x: f64, y: f64) {
        let point = self.map(x, y);
        self.backend.move_to(point);
        self.start = point;
        self.current = point;
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let point = self.map(x, y);
        self.backend.line_to(point);
        self.current = point;
    }

    fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64) {
        let control = self.map(x1, y1);
        let end = self.map(x, y);
        let (control1, control2) = quad_to_cubic(self.current, control, end);
        self.backend.curve_to(control1, control2, end);
        self.current = end;
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        let control1 = self.map(x1, y1);
        let control2 = self.map(x2, y2);
        let end = self.map(x, y);
        self.backend.curve_to(control1, control2, end);
        self.current = end;
    }

    fn close(&mut self) {
        self.backend.close_path();
        self.current = self.start;
    }
}

impl<B: Backend> GraphicsContext<B> {
    pub fn font(&self) -> Option<&Font> {
        self.state.font.as_ref()
    }

    pub fn set_font(&mut self, font: Option<Font>) {
        self.state.font = font;
    }

    pub fn font_size(&self) -> f64 {
        self.state.font_size
    }

    pub fn set_font_size(&mut self, size: f64) {
        if size.is_finite() {
            self.state.font_size = size;
        }
    }

    pub fn character_spacing(&self) -> f64 {
        self.state.character_spacing
    }

    /// Extra advance, in text space, added after every glyph.
    pub fn set_character_spacing(&mut self, spacing: f64) {
        if spacing.is_finite() {
            self.state.character_spacing = spacing;
        }
    }

    pub fn text_drawing_mode(&self) -> TextDrawingMode {
        self.state.text_mode
    }

    pub fn set_text_drawing_mode(&mut self, mode: TextDrawingMode) {
        self.state.text_mode = mode;
    }

    /// Text space to user space. Not part of the saved graphics state.
    pub fn text_matrix(&self) -> AffineTransform {
        self.text_matrix
    }

    pub fn set_text_matrix(&mut self, matrix: AffineTransform) {
        self.text_matrix = matrix;
    }

    /// Top-left of the next glyph run in user space.
    pub fn text_position(&self) -> Point {
        self.text_position
    }

    pub fn set_text_position(&mut self, position: Point) {
        self.text_position = position;
    }

    /// Show `text` at the text position with the current font.
    pub fn show_text(&mut self, text: &str) -> GraphicsResult<()> {
        let font = self.state.font.as_ref().ok_or(StateError::NoFont)?;
        let glyphs = font.glyphs(text);
        self.show_glyphs(&glyphs)
    }

    /// Show `glyphs` laid out by their advances, then move the text position
    /// past the run.
    pub fn show_glyphs(&mut self, glyphs: &[GlyphId]) -> GraphicsResult<()> {
        let font = self.state.font.as_ref().ok_or(StateError::NoFont)?;
        let advances = font.advances(
            glyphs,
            self.state.font_size,
            &self.text_matrix,
            self.state.character_spacing,
        );
        // Advances already carry the text matrix.
        let positions = font::positions(&advances, &AffineTransform::IDENTITY);
        self.draw_glyphs(glyphs, &positions)?;

        let total = advances.iter().fold(Size::ZERO, |sum, advance| sum + *advance);
        self.text_position = self.text_position + total;
        Ok(())
    }

    /// Show `text` on one line inside `rect`.
    pub fn draw_text(
        &mut self,
        text: &str,
        rect: Rect,
        alignment: TextAlignment,
    ) -> GraphicsResult<()> {
        let font = self.state.font.as_ref().ok_or(StateError::NoFont)?;
        let frame = content_frame(
            text,
            rect,
            font,
            self.state.font_size,
            &self.text_matrix,
            alignment,
        );
        let previous = std::mem::replace(&mut self.text_position, frame.origin);
        let shown = self.show_text(text);
        if shown.is_err() {
            self.text_position = previous;
        }
        shown
    }

    /// Paint glyph outlines at `positions` (relative to the text position)
    /// according to the text drawing mode. The current path is left as it was.
    pub fn draw_glyphs(&mut self, glyphs: &[GlyphId], positions: &[Point]) -> GraphicsResult<()> {
        let font = self.state.font.clone().ok_or(StateError::NoFont)?;
        let mode = self.state.text_mode;
        log::debug!(
            target: "silica",
            "draw_glyphs count={} font={} mode={mode:?}",
            glyphs.len(),
            font.name()
        );
        if mode == TextDrawingMode::Invisible {
            return Ok(());
        }

        let saved_path = self.backend.copy_path();
        self.backend.new_path();

        // Font units are y-up; user space is y-down.
        let size = self.state.font_size;
        let units_per_em = font.face().units_per_em() as f64;
        let font_matrix = AffineTransform::scale(size / units_per_em, -size / units_per_em)
            .concatenating(&self.text_matrix);
        // Text position marks the top of the line; move down to the baseline.
        let ascender = font.ascender(size);

        for (glyph, position) in glyphs.iter().zip(positions) {
            let origin = Point::new(
                self.text_position.x + position.x,
                self.text_position.y + position.y + ascender,
            );
            let transform =
                font_matrix.concatenating(&AffineTransform::translation(origin.x, origin.y));
            let mut sink = GlyphPathSink::new(&mut self.backend, transform);
            font.face().outline(*glyph, &mut sink);
        }

        let painted = self.paint_glyph_path(mode);
        self.backend.new_path();
        self.add_path(&saved_path);
        painted
    }

    fn paint_glyph_path(&mut self, mode: TextDrawingMode) -> GraphicsResult<()> {
        let fill = mode.fills().then(|| self.state.fill_pattern());
        let stroke = mode
            .strokes()
            .then(|| (self.state.stroke_pattern(), self.state.stroke.clone()));

        if fill.is_some() || stroke.is_some() {
            self.paint_with_shadow(|backend| {
                if let Some(pattern) = &fill {
                    backend.fill(pattern, FillRule::Winding, true)?;
                }
                if let Some((pattern, style)) = &stroke {
                    backend.stroke(pattern, style, true)?;
                }
                Ok(())
            })?;
        }
        if mode.clips() {
            self.backend.clip(FillRule::Winding)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::BackendStatus;
    use crate::color::Color;
    use crate::context::GraphicsContext;
    use crate::error::{GraphicsError, StateError};
    use crate::font::tests::TestFace;
    use crate::font::Font;
    use crate::geometry::{AffineTransform, Point, Rect, Size};
    use crate::path::PathElement;
    use crate::recording::{Command, RecordingBackend};
    use crate::style::TextDrawingMode;
    use crate::text::TextAlignment;
    use rstest::rstest;
    use std::sync::Arc;

    fn context() -> GraphicsContext<RecordingBackend> {
        GraphicsContext::new(RecordingBackend::new(), Size::new(100.0, 100.0))
    }

    fn test_font(advances: Vec<u16>) -> Font {
        Font::from_face("Test", Arc::new(TestFace { advances }))
    }

    #[test]
    fn test_show_glyphs_advances_cursor() {
        let mut ctx = context();
        // Glyphs 1, 2, 3 advance 2, 3 and 4 at size 1.
        ctx.set_font(Some(test_font(vec![0, 2000, 3000, 4000])));
        ctx.set_font_size(1.0);
        ctx.show_glyphs(&[1, 2, 3]).unwrap();
        assert_eq!(ctx.text_position(), Point::new(9.0, 0.0));

        ctx.show_text("a").unwrap();
        assert_eq!(ctx.text_position(), Point::new(11.0, 0.0));
    }

    #[test]
    fn test_show_text_without_font() {
        let mut ctx = context();
        let err = ctx.show_text("abc").unwrap_err();
        assert!(matches!(err, GraphicsError::State(StateError::NoFont)));
        assert_eq!(ctx.text_position(), Point::ZERO);
        assert!(ctx.backend().commands().is_empty());
    }

    #[test]
    fn test_glyph_outline_placement() {
        let mut ctx = context();
        ctx.set_font(Some(test_font(vec![])));
        ctx.set_font_size(10.0);
        ctx.set_text_position(Point::new(20.0, 30.0));
        ctx.show_text("a").unwrap();

        match &ctx.backend().commands()[0] {
            Command::Fill { path, .. } => {
                // Ascender 8 moves the baseline to y = 38; outline y is flipped.
                assert_eq!(path.elements()[0], PathElement::MoveTo(Point::new(20.0, 38.0)));
                assert_eq!(path.elements()[1], PathElement::LineTo(Point::new(25.0, 38.0)));
                assert_eq!(path.elements()[2], PathElement::LineTo(Point::new(25.0, 33.0)));
                assert_eq!(path.elements()[3], PathElement::ClosePath);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(ctx.text_position(), Point::new(25.0, 30.0));
    }

    #[test]
    fn test_text_keeps_current_path() {
        let mut ctx = context();
        ctx.set_font(Some(test_font(vec![])));
        ctx.set_font_size(12.0);
        ctx.move_to(Point::new(1.0, 2.0));
        ctx.add_line(Point::new(3.0, 4.0));
        let before = ctx.path();
        ctx.show_text("ab").unwrap();
        assert_eq!(ctx.path(), before);
    }

    #[rstest]
    #[case(TextDrawingMode::Fill, 1, false)]
    #[case(TextDrawingMode::Stroke, 1, false)]
    #[case(TextDrawingMode::FillStroke, 2, false)]
    #[case(TextDrawingMode::Invisible, 0, false)]
    #[case(TextDrawingMode::FillClip, 1, true)]
    #[case(TextDrawingMode::StrokeClip, 1, true)]
    #[case(TextDrawingMode::FillStrokeClip, 2, true)]
    #[case(TextDrawingMode::Clip, 0, true)]
    fn test_text_drawing_modes(
        #[case] mode: TextDrawingMode,
        #[case] paints: usize,
        #[case] clips: bool,
    ) {
        let mut ctx = context();
        ctx.set_font(Some(test_font(vec![])));
        ctx.set_font_size(10.0);
        ctx.set_text_drawing_mode(mode);
        ctx.show_text("ab").unwrap();

        let commands = ctx.backend().commands();
        let painted = commands
            .iter()
            .filter(|c| matches!(c, Command::Fill { .. } | Command::Stroke { .. }))
            .count();
        let clipped = commands.iter().any(|c| matches!(c, Command::Clip { .. }));
        assert_eq!(painted, paints);
        assert_eq!(clipped, clips);
        assert_eq!(ctx.text_position(), Point::new(10.0, 0.0));
    }

    #[test]
    fn test_text_matrix_scales_advances() {
        let mut ctx = context();
        ctx.set_font(Some(test_font(vec![])));
        ctx.set_font_size(10.0);
        ctx.set_text_matrix(AffineTransform::scale(2.0, 1.0));
        ctx.show_text("abc").unwrap();
        assert_eq!(ctx.text_position(), Point::new(30.0, 0.0));
    }

    #[test]
    fn test_draw_text_centers_line() {
        let mut ctx = context();
        ctx.set_font(Some(test_font(vec![])));
        ctx.set_font_size(20.0);
        ctx.set_fill_color(Color::BLUE);
        ctx.draw_text("ab", Rect::new(0.0, 10.0, 100.0, 30.0), TextAlignment::Center)
            .unwrap();
        // "ab" is 20 wide: frame starts at 40, cursor ends at 60.
        assert_eq!(ctx.text_position(), Point::new(60.0, 10.0));
        assert_eq!(ctx.backend().commands().len(), 1);
    }

    #[test]
    fn test_failed_draw_text_keeps_position() {
        let mut ctx = context();
        ctx.set_font(Some(test_font(vec![])));
        ctx.set_font_size(20.0);
        ctx.set_text_position(Point::new(3.0, 4.0));
        ctx.backend_mut().fail_next("fill", BackendStatus::NoMemory);
        assert!(ctx
            .draw_text("ab", Rect::new(0.0, 10.0, 100.0, 30.0), TextAlignment::Right)
            .is_err());
        assert_eq!(ctx.text_position(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_character_spacing() {
        let mut ctx = context();
        ctx.set_font(Some(test_font(vec![])));
        ctx.set_font_size(10.0);
        ctx.set_character_spacing(1.5);
        ctx.show_text("ab").unwrap();
        assert_eq!(ctx.text_position(), Point::new(13.0, 0.0));
    }
}
