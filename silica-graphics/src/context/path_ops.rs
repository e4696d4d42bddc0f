//! Path building operations for GraphicsContext.

use super::GraphicsContext;
use crate::arc::{tangent_arc, TangentArc};
use crate::backend::Backend;
use crate::geometry::{Point, Rect};
use crate::path::{quad_to_cubic, Path, PathElement};

impl<B: Backend> GraphicsContext<B> {
    /// Discard the current path.
    pub fn begin_path(&mut self) {
        log::debug!(target: "silica", "begin_path");
        self.backend.new_path();
    }

    /// Start a new subpath at `point`.
    pub fn move_to(&mut self, point: Point) {
        self.backend.move_to(point);
    }

    /// Straight line from the current point to `point`.
    pub fn add_line(&mut self, point: Point) {
        self.backend.line_to(point);
    }

    /// Cubic Bézier from the current point.
    pub fn add_curve(&mut self, control1: Point, control2: Point, end: Point) {
        self.backend.curve_to(control1, control2, end);
    }

    /// Quadratic Bézier from the current point, appended as the equivalent cubic.
    ///
    /// Without a current point the curve starts at `control`.
    pub fn add_quad_curve(&mut self, control: Point, end: Point) {
        let start = match self.backend.current_point() {
            Some(point) => point,
            None => {
                self.backend.move_to(control);
                control
            }
        };
        let (control1, control2) = quad_to_cubic(start, control, end);
        self.backend.curve_to(control1, control2, end);
    }

    /// Close the current subpath with a line back to its start.
    pub fn close_path(&mut self) {
        self.backend.close_path();
    }

    /// Closed rectangle subpath.
    pub fn add_rect(&mut self, rect: Rect) {
        let mut path = Path::new();
        path.add_rect(rect);
        self.add_path(&path);
    }

    /// Ellipse inscribed in `rect`.
    pub fn add_ellipse(&mut self, rect: Rect) {
        let mut path = Path::new();
        path.add_ellipse(rect);
        self.add_path(&path);
    }

    /// Circular arc around `center` between two angles in radians.
    ///
    /// Angles increase unless `negative` is set. A line joins the current point
    /// to the start of the arc.
    pub fn add_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        negative: bool,
    ) {
        self.backend
            .arc(center, radius, start_angle, end_angle, negative);
    }

    /// Arc of `radius` tangent to the line from the current point to
    /// `tangent1` and to the line from `tangent1` to `tangent2`.
    ///
    /// Collinear points produce a straight line to `tangent1`. Without a
    /// current point this starts a subpath at `tangent1`.
    pub fn add_arc_to(&mut self, tangent1: Point, tangent2: Point, radius: f64) {
        let Some(current) = self.backend.current_point() else {
            self.backend.move_to(tangent1);
            return;
        };
        match tangent_arc(current, tangent1, tangent2, radius) {
            TangentArc::None => {}
            TangentArc::Line(point) => self.backend.line_to(point),
            TangentArc::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                negative,
            } => self
                .backend
                .arc(center, radius, start_angle, end_angle, negative),
        }
    }

    /// Append every element of `path` (user space).
    pub fn add_path(&mut self, path: &Path) {
        for element in path.elements() {
            self.append_element(*element);
        }
    }

    pub(crate) fn append_element(&mut self, element: PathElement) {
        match element {
            PathElement::MoveTo(p) => self.backend.move_to(p),
            PathElement::LineTo(p) => self.backend.line_to(p),
            PathElement::QuadCurveTo(control, end) => self.add_quad_curve(control, end),
            PathElement::CurveTo(control1, control2, end) => {
                self.backend.curve_to(control1, control2, end)
            }
            PathElement::ClosePath => self.backend.close_path(),
        }
    }

    /// Current path in user space.
    pub fn path(&self) -> Path {
        self.backend.copy_path()
    }

    /// Current point in user space.
    pub fn current_point(&self) -> Option<Point> {
        self.backend.current_point()
    }

    pub fn is_path_empty(&self) -> bool {
        self.backend.copy_path().is_empty()
    }

    /// Box around the current path, control points included.
    pub fn path_bounding_box(&self) -> Rect {
        self.backend.copy_path().bounding_box()
    }
}
