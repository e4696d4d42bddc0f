//! Rasterization backend interface.
//!
//! A backend owns one rendering session: a target surface, its own graphics
//! state stack (transform and clip), the current path, and an offscreen group
//! stack. Paths are authored in user space; the backend applies its current
//! transform when painting, and [`Backend::copy_path`] hands the path back in
//! user space.

use crate::arc;
use crate::color::Color;
use crate::geometry::{AffineTransform, Point, Rect, Size};
use crate::image::Image;
use crate::path::Path;
use crate::style::{FillRule, StrokeStyle};
use thiserror::Error;

/// Result type alias for backend calls.
pub type BackendResult<T> = Result<T, BackendError>;

/// Non-success status reported by a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendStatus {
    /// The transform is singular or not finite.
    InvalidMatrix,
    /// `restore` without a matching `save`.
    InvalidRestore,
    /// `pop_group` without a matching `push_group`.
    InvalidPopGroup,
    /// A surface of the requested size cannot exist.
    InvalidSize,
    /// An allocation failed.
    NoMemory,
    /// The operation needs a current point.
    NoCurrentPoint,
}

impl std::fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            BackendStatus::InvalidMatrix => "invalid matrix",
            BackendStatus::InvalidRestore => "restore without matching save",
            BackendStatus::InvalidPopGroup => "no group to pop",
            BackendStatus::InvalidSize => "invalid surface size",
            BackendStatus::NoMemory => "out of memory",
            BackendStatus::NoCurrentPoint => "no current point",
        };
        f.write_str(text)
    }
}

/// A backend call that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {status}")]
pub struct BackendError {
    pub operation: &'static str,
    pub status: BackendStatus,
}

impl BackendError {
    pub fn new(operation: &'static str, status: BackendStatus) -> Self {
        Self { operation, status }
    }
}

/// Paint source: a solid color or an offscreen surface.
///
/// Solid patterns are derived from `(color, alpha)` whenever they are needed,
/// so they never go stale when either input changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern<S> {
    Solid(Color),
    Surface(S),
}

impl<S> Pattern<S> {
    /// Solid pattern for `color` with `alpha` multiplied into its own alpha.
    pub fn solid(color: Color, alpha: f64) -> Self {
        Pattern::Solid(color.multiplying_alpha(alpha))
    }
}

/// Rendering session consumed by [`GraphicsContext`](crate::GraphicsContext).
pub trait Backend {
    /// Offscreen surface produced by [`Backend::pop_group`].
    type Surface;
    /// Alpha-only surface produced by [`Backend::alpha_mask`].
    type Mask;

    /// Push a copy of the backend graphics state (transform and clip).
    fn save(&mut self) -> BackendResult<()>;

    /// Pop the backend graphics state.
    fn restore(&mut self) -> BackendResult<()>;

    /// Current user-to-device transform.
    fn transform(&self) -> AffineTransform;

    /// Prepend `transform` to the current transform, so that it applies to
    /// user-space coordinates first. A singular transform is rejected and
    /// leaves the current transform unchanged.
    fn concat_transform(&mut self, transform: &AffineTransform) -> BackendResult<()>;

    /// Discard the current path.
    fn new_path(&mut self);

    fn move_to(&mut self, point: Point);

    fn line_to(&mut self, point: Point);

    fn curve_to(&mut self, control1: Point, control2: Point, end: Point);

    fn close_path(&mut self);

    /// Current point in user space.
    fn current_point(&self) -> Option<Point>;

    /// Current path in user space.
    fn copy_path(&self) -> Path;

    /// Circular arc around `center` from `start` to `end` radians.
    ///
    /// Angles increase unless `negative` is set. A line joins the current
    /// point to the start of the arc.
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64, negative: bool) {
        if radius <= 0.0 {
            if self.current_point().is_some() {
                self.line_to(center);
            } else {
                self.move_to(center);
            }
            return;
        }
        let arc = arc::bezier_arc(center, radius, start, end, negative);
        if self.current_point().is_some() {
            self.line_to(arc.start);
        } else {
            self.move_to(arc.start);
        }
        for [control1, control2, end] in arc.curves {
            self.curve_to(control1, control2, end);
        }
    }

    /// Fill the current path. The path is cleared unless `preserve` is set.
    fn fill(
        &mut self,
        pattern: &Pattern<Self::Surface>,
        rule: FillRule,
        preserve: bool,
    ) -> BackendResult<()>;

    /// Stroke the current path. The path is cleared unless `preserve` is set.
    fn stroke(
        &mut self,
        pattern: &Pattern<Self::Surface>,
        style: &StrokeStyle,
        preserve: bool,
    ) -> BackendResult<()>;

    /// Intersect the clip with the current path and clear the path.
    fn clip(&mut self, rule: FillRule) -> BackendResult<()>;

    /// Set the pixels under `rect` to transparent, honoring the clip.
    fn clear(&mut self, rect: Rect) -> BackendResult<()>;

    /// Paint `pattern` everywhere inside the clip with an extra `alpha`.
    fn paint(&mut self, pattern: &Pattern<Self::Surface>, alpha: f64) -> BackendResult<()>;

    /// Redirect drawing into a new transparent offscreen group.
    fn push_group(&mut self) -> BackendResult<()>;

    /// End the innermost group and return its content.
    fn pop_group(&mut self) -> BackendResult<Self::Surface>;

    /// Alpha channel of `surface`, padded by `padding` on every side.
    fn alpha_mask(&mut self, surface: &Self::Surface, padding: f64) -> BackendResult<Self::Mask>;

    /// Paint `pattern` through `mask`, with the mask's unpadded origin placed
    /// at `offset` in device space.
    fn mask(
        &mut self,
        pattern: &Pattern<Self::Surface>,
        mask: &Self::Mask,
        offset: Size,
    ) -> BackendResult<()>;

    /// Draw `image` scaled into `rect` (user space) with an extra `alpha`.
    fn draw_image(&mut self, image: &Image, rect: Rect, alpha: f64) -> BackendResult<()>;
}
