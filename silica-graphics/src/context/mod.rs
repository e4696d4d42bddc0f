//! Graphics context implementation.

mod drawing;
mod layers;
mod path_ops;
mod text_rendering;
mod transform;

use crate::backend::Backend;
use crate::color::Color;
use crate::error::{GraphicsResult, StateError};
use crate::geometry::{AffineTransform, Point, Size};
use crate::graphics_state::GraphicsState;
use crate::style::{LineCap, LineDash, LineJoin};

/// A stateful drawing context over one backend rendering session.
///
/// The attribute stack and the backend's own state stack always have the
/// same depth: `save` only pushes after the backend saved successfully and
/// `restore` only pops after the backend restored.
pub struct GraphicsContext<B: Backend> {
    /// Rendering session.
    pub(crate) backend: B,
    /// Size of the target surface.
    size: Size,
    /// Current graphics state.
    pub(crate) state: GraphicsState,
    /// Stack of saved graphics states.
    state_stack: Vec<GraphicsState>,
    /// Attribute stack depth at each open transparency layer.
    layer_stack: Vec<usize>,
    /// Text space to user space, applied to glyph outlines and advances.
    pub(crate) text_matrix: AffineTransform,
    /// Where the next glyph run starts. Independent of the path's current point.
    pub(crate) text_position: Point,
}

impl<B: Backend> GraphicsContext<B> {
    /// Create a context drawing to `backend`, whose target is `size` in device units.
    pub fn new(backend: B, size: Size) -> Self {
        Self {
            backend,
            size,
            state: GraphicsState::default(),
            state_stack: Vec::new(),
            layer_stack: Vec::new(),
            text_matrix: AffineTransform::IDENTITY,
            text_position: Point::ZERO,
        }
    }

    /// Size of the target surface.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// End the session and hand back the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Current graphics state.
    pub fn state(&self) -> &GraphicsState {
        &self.state
    }

    /// Number of saved states.
    pub fn save_depth(&self) -> usize {
        self.state_stack.len()
    }

    /// Save the current graphics state.
    pub fn save(&mut self) -> GraphicsResult<()> {
        log::debug!(target: "silica", "save depth={}", self.state_stack.len());
        self.backend.save()?;
        self.state_stack.push(self.state.clone());
        Ok(())
    }

    /// Restore the most recently saved graphics state.
    ///
    /// Fails with [`StateError::UnbalancedRestore`] when nothing was saved, or
    /// when the save belongs to an open transparency layer.
    pub fn restore(&mut self) -> GraphicsResult<()> {
        log::debug!(target: "silica", "restore depth={}", self.state_stack.len());
        let floor = self.layer_stack.last().copied().unwrap_or(0);
        if self.state_stack.len() <= floor {
            return Err(StateError::UnbalancedRestore.into());
        }
        self.restore_unchecked()
    }

    fn restore_unchecked(&mut self) -> GraphicsResult<()> {
        self.backend.restore()?;
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
        Ok(())
    }

    // --- Attribute setters ---

    pub fn fill_color(&self) -> Color {
        self.state.fill_color
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = color;
    }

    pub fn stroke_color(&self) -> Color {
        self.state.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke_color = color;
    }

    pub fn alpha(&self) -> f64 {
        self.state.alpha
    }

    /// Set the global alpha, clamped to `0.0..=1.0`. Non-finite values are ignored.
    ///
    /// Fill and stroke patterns are derived from their colors and this value
    /// at paint time.
    pub fn set_alpha(&mut self, alpha: f64) {
        if alpha.is_finite() {
            self.state.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    pub fn line_width(&self) -> f64 {
        self.state.stroke.line_width
    }

    /// Set the line width. Negative and non-finite values are ignored.
    pub fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width >= 0.0 {
            self.state.stroke.line_width = width;
        }
    }

    pub fn line_cap(&self) -> LineCap {
        self.state.stroke.line_cap
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.stroke.line_cap = cap;
    }

    pub fn line_join(&self) -> LineJoin {
        self.state.stroke.line_join
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.stroke.line_join = join;
    }

    pub fn miter_limit(&self) -> f64 {
        self.state.stroke.miter_limit
    }

    pub fn set_miter_limit(&mut self, limit: f64) {
        if limit.is_finite() && limit > 0.0 {
            self.state.stroke.miter_limit = limit;
        }
    }

    pub fn line_dash(&self) -> &LineDash {
        &self.state.stroke.dash
    }

    /// Set the dash pattern. A pattern with a negative or non-finite length,
    /// or with all lengths zero, is ignored.
    pub fn set_line_dash(&mut self, phase: f64, lengths: &[f64]) {
        if lengths.iter().any(|l| !l.is_finite() || *l < 0.0) || !phase.is_finite() {
            return;
        }
        if !lengths.is_empty() && lengths.iter().all(|l| *l == 0.0) {
            return;
        }
        self.state.stroke.dash = LineDash::new(phase, lengths.to_vec());
    }
}
