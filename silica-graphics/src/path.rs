//! Path model: an ordered sequence of subpath-forming elements.

use crate::geometry::{AffineTransform, Point, Rect};

/// Quarter-circle cubic Bézier control point offset, `4·(√2 − 1)/3`.
pub const KAPPA: f64 = 0.5522847498;

/// A single path element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo(Point),
    LineTo(Point),
    /// Control point, end point.
    QuadCurveTo(Point, Point),
    /// First control point, second control point, end point.
    CurveTo(Point, Point, Point),
    ClosePath,
}

impl PathElement {
    /// Map every point of the element through `t`.
    pub fn applying(&self, t: &AffineTransform) -> PathElement {
        match *self {
            PathElement::MoveTo(p) => PathElement::MoveTo(p.applying(t)),
            PathElement::LineTo(p) => PathElement::LineTo(p.applying(t)),
            PathElement::QuadCurveTo(c, p) => PathElement::QuadCurveTo(c.applying(t), p.applying(t)),
            PathElement::CurveTo(c1, c2, p) => {
                PathElement::CurveTo(c1.applying(t), c2.applying(t), p.applying(t))
            }
            PathElement::ClosePath => PathElement::ClosePath,
        }
    }
}

/// Cubic control points equivalent to the quadratic curve `start → control → end`.
///
/// The control point is interpolated at 2/3 from each end, i.e. the cubic
/// controls sit at the 1/3 and 2/3 fractions of the degree-elevated hull.
pub fn quad_to_cubic(start: Point, control: Point, end: Point) -> (Point, Point) {
    const ONE_THIRD: f64 = 1.0 / 3.0;
    const TWO_THIRDS: f64 = 2.0 / 3.0;
    let control1 = Point::new(
        ONE_THIRD * start.x + TWO_THIRDS * control.x,
        ONE_THIRD * start.y + TWO_THIRDS * control.y,
    );
    let control2 = Point::new(
        TWO_THIRDS * control.x + ONE_THIRD * end.x,
        TWO_THIRDS * control.y + ONE_THIRD * end.y,
    );
    (control1, control2)
}

/// An append-only sequence of path elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn push(&mut self, element: PathElement) {
        self.elements.push(element);
    }

    pub fn move_to(&mut self, point: Point) {
        self.elements.push(PathElement::MoveTo(point));
    }

    pub fn add_line(&mut self, point: Point) {
        self.elements.push(PathElement::LineTo(point));
    }

    pub fn add_lines(&mut self, points: &[Point]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.move_to(*first);
        for point in rest {
            self.add_line(*point);
        }
    }

    pub fn add_quad_curve(&mut self, control: Point, end: Point) {
        self.elements.push(PathElement::QuadCurveTo(control, end));
    }

    pub fn add_curve(&mut self, control1: Point, control2: Point, end: Point) {
        self.elements.push(PathElement::CurveTo(control1, control2, end));
    }

    pub fn close_subpath(&mut self) {
        self.elements.push(PathElement::ClosePath);
    }

    /// Closed rectangle starting at the minimum corner and running clockwise
    /// in a y-down space.
    pub fn add_rect(&mut self, rect: Rect) {
        self.move_to(Point::new(rect.min_x(), rect.min_y()));
        self.add_line(Point::new(rect.max_x(), rect.min_y()));
        self.add_line(Point::new(rect.max_x(), rect.max_y()));
        self.add_line(Point::new(rect.min_x(), rect.max_y()));
        self.close_subpath();
    }

    /// Ellipse inscribed in `rect` as four cubic segments, starting and
    /// ending at the bottom midpoint.
    pub fn add_ellipse(&mut self, rect: Rect) {
        let x = rect.origin.x;
        let y = rect.origin.y;
        let w = rect.size.width;
        let h = rect.size.height;
        let hdiff = w / 2.0 * KAPPA;
        let vdiff = h / 2.0 * KAPPA;

        self.move_to(Point::new(x + w / 2.0, y + h));
        self.add_curve(
            Point::new(x + w / 2.0 - hdiff, y + h),
            Point::new(x, y + h / 2.0 + vdiff),
            Point::new(x, y + h / 2.0),
        );
        self.add_curve(
            Point::new(x, y + h / 2.0 - vdiff),
            Point::new(x + w / 2.0 - hdiff, y),
            Point::new(x + w / 2.0, y),
        );
        self.add_curve(
            Point::new(x + w / 2.0 + hdiff, y),
            Point::new(x + w, y + h / 2.0 - vdiff),
            Point::new(x + w, y + h / 2.0),
        );
        self.add_curve(
            Point::new(x + w, y + h / 2.0 + vdiff),
            Point::new(x + w / 2.0 + hdiff, y + h),
            Point::new(x + w / 2.0, y + h),
        );
    }

    pub fn add_path(&mut self, other: &Path) {
        self.elements.extend_from_slice(&other.elements);
    }

    /// End point of the last element, or the start of the subpath after a close.
    pub fn current_point(&self) -> Option<Point> {
        let mut current = None;
        let mut subpath_start = None;
        for element in &self.elements {
            match *element {
                PathElement::MoveTo(p) => {
                    subpath_start = Some(p);
                    current = Some(p);
                }
                PathElement::LineTo(p)
                | PathElement::QuadCurveTo(_, p)
                | PathElement::CurveTo(_, _, p) => current = Some(p),
                PathElement::ClosePath => current = subpath_start,
            }
        }
        current
    }

    /// Box around every point, control points included. `Rect::NULL` when empty.
    pub fn bounding_box(&self) -> Rect {
        let mut bounds = Rect::NULL;
        let mut include = |p: Point| {
            bounds = bounds.union(&Rect::new(p.x, p.y, 0.0, 0.0));
        };
        for element in &self.elements {
            match *element {
                PathElement::MoveTo(p) | PathElement::LineTo(p) => include(p),
                PathElement::QuadCurveTo(c, p) => {
                    include(c);
                    include(p);
                }
                PathElement::CurveTo(c1, c2, p) => {
                    include(c1);
                    include(c2);
                    include(p);
                }
                PathElement::ClosePath => {}
            }
        }
        bounds
    }

    pub fn applying(&self, t: &AffineTransform) -> Path {
        Path {
            elements: self.elements.iter().map(|e| e.applying(t)).collect(),
        }
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<I: IntoIterator<Item = PathElement>>(iter: I) -> Self {
        Path {
            elements: iter.into_iter().collect(),
        }
    }
}
