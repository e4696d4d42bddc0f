//! Painting and stroking enums.

/// Rule that decides which regions a path encloses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Non-zero winding number.
    #[default]
    Winding,
    /// Even-odd crossing count.
    EvenOdd,
}

/// How `draw_path` paints the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingMode {
    Fill,
    EvenOddFill,
    Stroke,
    FillStroke,
    EvenOddFillStroke,
}

impl DrawingMode {
    pub(crate) fn fill_rule(self) -> Option<FillRule> {
        match self {
            DrawingMode::Fill | DrawingMode::FillStroke => Some(FillRule::Winding),
            DrawingMode::EvenOddFill | DrawingMode::EvenOddFillStroke => Some(FillRule::EvenOdd),
            DrawingMode::Stroke => None,
        }
    }

    pub(crate) fn strokes(self) -> bool {
        matches!(
            self,
            DrawingMode::Stroke | DrawingMode::FillStroke | DrawingMode::EvenOddFillStroke
        )
    }
}

/// How glyph outlines are painted when showing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDrawingMode {
    #[default]
    Fill,
    Stroke,
    FillStroke,
    Invisible,
    FillClip,
    StrokeClip,
    FillStrokeClip,
    Clip,
}

impl TextDrawingMode {
    pub fn fills(self) -> bool {
        matches!(
            self,
            TextDrawingMode::Fill
                | TextDrawingMode::FillStroke
                | TextDrawingMode::FillClip
                | TextDrawingMode::FillStrokeClip
        )
    }

    pub fn strokes(self) -> bool {
        matches!(
            self,
            TextDrawingMode::Stroke
                | TextDrawingMode::FillStroke
                | TextDrawingMode::StrokeClip
                | TextDrawingMode::FillStrokeClip
        )
    }

    pub fn clips(self) -> bool {
        matches!(
            self,
            TextDrawingMode::FillClip
                | TextDrawingMode::StrokeClip
                | TextDrawingMode::FillStrokeClip
                | TextDrawingMode::Clip
        )
    }
}

/// Line cap style for stroke operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Flat edge at the endpoint.
    #[default]
    Butt,
    /// Rounded edge extending past the endpoint.
    Round,
    /// Square edge extending past the endpoint.
    Square,
}

/// Line join style for stroke operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Sharp corner.
    #[default]
    Miter,
    /// Rounded corner.
    Round,
    /// Beveled corner.
    Bevel,
}

/// Dash pattern: alternating on/off lengths starting `phase` units in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineDash {
    pub phase: f64,
    pub lengths: Vec<f64>,
}

impl LineDash {
    pub fn new(phase: f64, lengths: Vec<f64>) -> Self {
        Self { phase, lengths }
    }

    pub fn is_solid(&self) -> bool {
        self.lengths.is_empty()
    }
}

/// Stroke parameters handed to the backend, in user-space units.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
    pub dash: LineDash,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            dash: LineDash::default(),
        }
    }
}
