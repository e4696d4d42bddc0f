//! Geometry value types: points, sizes, rectangles and affine transforms.

use std::ops::{Add, Sub};

/// A point in a two-dimensional coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Map this point through `t`: `x' = a·x + c·y + tx`, `y' = b·x + d·y + ty`.
    pub fn applying(self, t: &AffineTransform) -> Point {
        Point {
            x: t.a * self.x + t.c * self.y + t.tx,
            y: t.b * self.x + t.d * self.y + t.ty,
        }
    }

    /// Linear interpolation toward `other` by `fraction`.
    pub fn lerp(self, other: Point, fraction: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * fraction,
            y: self.y + (other.y - self.y) * fraction,
        }
    }
}

impl Add<Size> for Point {
    type Output = Point;

    fn add(self, rhs: Size) -> Point {
        Point::new(self.x + rhs.width, self.y + rhs.height)
    }
}

impl Sub for Point {
    type Output = Size;

    fn sub(self, rhs: Point) -> Size {
        Size::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A width and height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Map this size through the linear part of `t`.
    ///
    /// Both resulting dimensions are made non-negative.
    pub fn applying(self, t: &AffineTransform) -> Size {
        Size {
            width: (t.a * self.width + t.c * self.height).abs(),
            height: (t.b * self.width + t.d * self.height).abs(),
        }
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}

/// A rectangle given by an origin and a size. The size may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// The null rectangle: the result of combining nothing.
    pub const NULL: Rect = Rect {
        origin: Point {
            x: f64::INFINITY,
            y: f64::INFINITY,
        },
        size: Size::ZERO,
    };

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn min_x(&self) -> f64 {
        if self.size.width < 0.0 {
            self.origin.x + self.size.width
        } else {
            self.origin.x
        }
    }

    pub fn mid_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    pub fn max_x(&self) -> f64 {
        if self.size.width < 0.0 {
            self.origin.x
        } else {
            self.origin.x + self.size.width
        }
    }

    pub fn min_y(&self) -> f64 {
        if self.size.height < 0.0 {
            self.origin.y + self.size.height
        } else {
            self.origin.y
        }
    }

    pub fn mid_y(&self) -> f64 {
        self.origin.y + self.size.height / 2.0
    }

    pub fn max_y(&self) -> f64 {
        if self.size.height < 0.0 {
            self.origin.y
        } else {
            self.origin.y + self.size.height
        }
    }

    /// Returns an equivalent rectangle with non-negative width and height.
    pub fn standardized(&self) -> Rect {
        let mut rect = *self;
        if rect.size.width < 0.0 {
            rect.origin.x += rect.size.width;
            rect.size.width = -rect.size.width;
        }
        if rect.size.height < 0.0 {
            rect.origin.y += rect.size.height;
            rect.size.height = -rect.size.height;
        }
        rect
    }

    /// Returns the smallest rectangle with integer bounds that contains this one.
    pub fn integral(&self) -> Rect {
        let rect = self.standardized();
        let max_x = (rect.origin.x + rect.size.width).ceil();
        let max_y = (rect.origin.y + rect.size.height).ceil();
        let x = rect.origin.x.floor();
        let y = rect.origin.y.floor();
        Rect::new(x, y, max_x - x, max_y - y)
    }

    /// Whether the rectangle has zero width or height, or is null.
    pub fn is_empty(&self) -> bool {
        self.size.width == 0.0 || self.size.height == 0.0 || self.is_null()
    }

    pub fn is_null(&self) -> bool {
        self.origin.x.is_infinite() || self.origin.y.is_infinite()
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    pub fn offset_by(&self, dx: f64, dy: f64) -> Rect {
        let mut rect = self.standardized();
        rect.origin.x += dx;
        rect.origin.y += dy;
        rect
    }

    /// Shrinks (or with negative values grows) the rectangle on every side.
    pub fn inset_by(&self, dx: f64, dy: f64) -> Rect {
        let rect = self.standardized();
        let width = rect.size.width - 2.0 * dx;
        let height = rect.size.height - 2.0 * dy;
        if width < 0.0 || height < 0.0 {
            return Rect::NULL;
        }
        Rect::new(rect.origin.x + dx, rect.origin.y + dy, width, height)
    }

    /// Smallest rectangle containing both rectangles. Null rectangles are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_null() {
            return other.standardized();
        }
        if other.is_null() {
            return self.standardized();
        }
        let min_x = self.min_x().min(other.min_x());
        let min_y = self.min_y().min(other.min_y());
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Overlapping region of two rectangles, or `None` when they are disjoint.
    ///
    /// An empty operand yields the other rectangle unchanged. Rectangles that
    /// only share an edge are disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if self.is_empty() {
            return Some(*other);
        }
        if other.is_empty() {
            return Some(*self);
        }

        let r1 = self.standardized();
        let r2 = other.standardized();

        if r1.origin.x + r1.size.width <= r2.origin.x
            || r2.origin.x + r2.size.width <= r1.origin.x
            || r1.origin.y + r1.size.height <= r2.origin.y
            || r2.origin.y + r2.size.height <= r1.origin.y
        {
            return None;
        }

        let x = r1.origin.x.max(r2.origin.x);
        let y = r1.origin.y.max(r2.origin.y);
        let max_x = (r1.origin.x + r1.size.width).min(r2.origin.x + r2.size.width);
        let max_y = (r1.origin.y + r1.size.height).min(r2.origin.y + r2.size.height);
        Some(Rect::new(x, y, max_x - x, max_y - y))
    }

    /// Bounding box of this rectangle's four corners after applying `t`.
    pub fn applying(&self, t: &AffineTransform) -> Rect {
        let rect = self.standardized();
        let corners = [
            Point::new(rect.min_x(), rect.min_y()),
            Point::new(rect.max_x(), rect.min_y()),
            Point::new(rect.max_x(), rect.max_y()),
            Point::new(rect.min_x(), rect.max_y()),
        ];
        corners
            .iter()
            .map(|p| p.applying(t))
            .fold(Rect::NULL, |acc, p| acc.union(&Rect::from_origin_size(p, Size::ZERO)))
    }
}

/// How content of a given size is placed into a bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentMode {
    #[default]
    ScaleToFill,
    ScaleAspectFit,
    ScaleAspectFill,
    Redraw,
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Rect {
    /// Frame for content of `size` placed into `bounds` according to `mode`.
    ///
    /// Aspect modes round the scaled size up to whole units.
    pub fn fitting(mode: ContentMode, bounds: Rect, size: Size) -> Rect {
        let b = bounds.size;
        let placed = |x: f64, y: f64| Rect::from_origin_size(Point::new(x, y), size);

        match mode {
            ContentMode::ScaleToFill | ContentMode::Redraw => {
                Rect::from_origin_size(Point::ZERO, b)
            }
            ContentMode::ScaleAspectFit => {
                let width_ratio = b.width / size.width;
                let height_ratio = b.height / size.height;
                let mut new_size = b;
                if width_ratio < height_ratio {
                    new_size.height = b.width / size.width * size.height;
                } else if height_ratio < width_ratio {
                    new_size.width = b.height / size.height * size.width;
                }
                let new_size = Size::new(new_size.width.ceil(), new_size.height.ceil());
                Rect::new(
                    bounds.origin.x + (b.width - new_size.width) / 2.0,
                    bounds.origin.y + (b.height - new_size.height) / 2.0,
                    new_size.width,
                    new_size.height,
                )
            }
            ContentMode::ScaleAspectFill => {
                let width_ratio = b.width / size.width;
                let height_ratio = b.height / size.height;
                let mut new_size = b;
                if width_ratio > height_ratio {
                    new_size.height = b.width / size.width * size.height;
                } else if height_ratio > width_ratio {
                    new_size.width = b.height / size.height * size.width;
                }
                let new_size = Size::new(new_size.width.ceil(), new_size.height.ceil());
                Rect::new(
                    (b.width - new_size.width) / 2.0,
                    (b.height - new_size.height) / 2.0,
                    new_size.width,
                    new_size.height,
                )
            }
            ContentMode::Center => placed(
                (b.width - size.width) / 2.0,
                (b.height - size.height) / 2.0,
            ),
            ContentMode::Top => placed((b.width - size.width) / 2.0, 0.0),
            ContentMode::Bottom => placed((b.width - size.width) / 2.0, b.height - size.height),
            ContentMode::Left => placed(0.0, (b.height - size.height) / 2.0),
            ContentMode::Right => placed(b.width - size.width, (b.height - size.height) / 2.0),
            ContentMode::TopLeft => placed(0.0, 0.0),
            ContentMode::TopRight => placed(b.width - size.width, 0.0),
            ContentMode::BottomLeft => placed(0.0, b.height - size.height),
            ContentMode::BottomRight => placed(b.width - size.width, b.height - size.height),
        }
    }
}

/// A 2D affine transform `[a b c d tx ty]`.
///
/// Points map as `x' = a·x + c·y + tx`, `y' = b·x + d·y + ty`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation by `angle` radians.
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Transform equivalent to applying `self` first and then `other`.
    pub fn concatenating(&self, other: &AffineTransform) -> AffineTransform {
        let t1 = self;
        let t2 = other;
        AffineTransform {
            a: t1.a * t2.a + t1.b * t2.c,
            b: t1.a * t2.b + t1.b * t2.d,
            c: t1.c * t2.a + t1.d * t2.c,
            d: t1.c * t2.b + t1.d * t2.d,
            tx: t1.tx * t2.a + t1.ty * t2.c + t2.tx,
            ty: t1.tx * t2.b + t1.ty * t2.d + t2.ty,
        }
    }

    /// Inverse transform, or `None` if this transform is singular.
    pub fn inverted(&self) -> Option<AffineTransform> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Some(AffineTransform {
            a,
            b,
            c,
            d,
            tx: -(a * self.tx + c * self.ty),
            ty: -(b * self.tx + d * self.ty),
        })
    }

    /// Prepends a translation: user-space coordinates are shifted before `self` applies.
    pub fn translated_by(&self, tx: f64, ty: f64) -> AffineTransform {
        AffineTransform::translation(tx, ty).concatenating(self)
    }

    pub fn scaled_by(&self, sx: f64, sy: f64) -> AffineTransform {
        AffineTransform::scale(sx, sy).concatenating(self)
    }

    pub fn rotated_by(&self, angle: f64) -> AffineTransform {
        AffineTransform::rotation(angle).concatenating(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn assert_point_eq(p: Point, q: Point) {
        assert!((p.x - q.x).abs() < 1e-9, "{p:?} != {q:?}");
        assert!((p.y - q.y).abs() < 1e-9, "{p:?} != {q:?}");
    }

    #[rstest]
    #[case(AffineTransform::IDENTITY)]
    #[case(AffineTransform::translation(3.0, -7.5))]
    #[case(AffineTransform::scale(2.0, -0.5))]
    #[case(AffineTransform::rotation(0.7))]
    #[case(AffineTransform::new(1.5, 0.2, -0.3, 0.9, 12.0, -4.0))]
    fn test_identity_is_neutral(#[case] t: AffineTransform) {
        assert_eq!(AffineTransform::IDENTITY.concatenating(&t), t);
        assert_eq!(t.concatenating(&AffineTransform::IDENTITY), t);
    }

    #[rstest]
    #[case(AffineTransform::translation(3.0, 4.0), AffineTransform::scale(2.0, 3.0))]
    #[case(AffineTransform::scale(2.0, 3.0), AffineTransform::translation(3.0, 4.0))]
    #[case(AffineTransform::rotation(1.1), AffineTransform::translation(-2.0, 8.0))]
    #[case(
        AffineTransform::new(1.5, 0.2, -0.3, 0.9, 12.0, -4.0),
        AffineTransform::new(0.4, -1.2, 2.0, 0.1, -3.0, 5.0)
    )]
    fn test_concatenation_applies_in_order(
        #[case] t1: AffineTransform,
        #[case] t2: AffineTransform,
    ) {
        for p in [
            Point::new(0.0, 0.0),
            Point::new(1.0, -2.0),
            Point::new(-13.5, 42.25),
        ] {
            let composed = p.applying(&t1.concatenating(&t2));
            let sequential = p.applying(&t1).applying(&t2);
            assert_point_eq(composed, sequential);
        }
    }

    #[test]
    fn test_concatenation_is_not_commutative() {
        let t = AffineTransform::translation(10.0, 0.0);
        let s = AffineTransform::scale(2.0, 2.0);
        let p = Point::new(1.0, 1.0);
        assert_eq!(p.applying(&t.concatenating(&s)), Point::new(22.0, 2.0));
        assert_eq!(p.applying(&s.concatenating(&t)), Point::new(12.0, 2.0));
    }

    #[test]
    fn test_translated_by_prepends() {
        let t = AffineTransform::scale(2.0, 2.0).translated_by(5.0, 5.0);
        assert_eq!(Point::ZERO.applying(&t), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_inverted() {
        let t = AffineTransform::new(1.5, 0.2, -0.3, 0.9, 12.0, -4.0);
        let inv = t.inverted().unwrap();
        let p = Point::new(3.0, -8.0);
        assert_point_eq(p.applying(&t).applying(&inv), p);
        assert!(AffineTransform::scale(0.0, 1.0).inverted().is_none());
    }

    #[test]
    fn test_size_applying_is_absolute() {
        let size = Size::new(2.0, 3.0).applying(&AffineTransform::scale(-2.0, -1.0));
        assert_eq!(size, Size::new(4.0, 3.0));
        let rotated = Size::new(10.0, 0.0).applying(&AffineTransform::rotation(std::f64::consts::PI));
        assert!((rotated.width - 10.0).abs() < 1e-9);
        assert!(rotated.width >= 0.0 && rotated.height >= 0.0);
    }

    #[test]
    fn test_rect_edges_with_negative_size() {
        let rect = Rect::new(10.0, 10.0, -4.0, -6.0);
        assert_eq!(rect.min_x(), 6.0);
        assert_eq!(rect.max_x(), 10.0);
        assert_eq!(rect.min_y(), 4.0);
        assert_eq!(rect.max_y(), 10.0);
        assert_eq!(rect.mid_x(), 8.0);
        assert_eq!(rect.mid_y(), 7.0);
    }

    #[rstest]
    #[case(Rect::new(0.0, 0.0, 10.0, 10.0))]
    #[case(Rect::new(5.0, 5.0, -3.0, 2.0))]
    #[case(Rect::new(-1.0, 4.0, 2.5, -9.0))]
    #[case(Rect::new(0.0, 0.0, -0.0, -1.0))]
    fn test_standardized_is_idempotent(#[case] rect: Rect) {
        let once = rect.standardized();
        assert!(once.size.width >= 0.0);
        assert!(once.size.height >= 0.0);
        assert_eq!(once.standardized(), once);
    }

    #[test]
    fn test_integral_rounds_outward() {
        let rect = Rect::new(1.2, 2.7, 3.1, 1.1).integral();
        assert_eq!(rect, Rect::new(1.0, 2.0, 4.0, 2.0));

        let negative = Rect::new(5.5, 5.5, -2.0, -2.0).integral();
        assert_eq!(negative, Rect::new(3.0, 3.0, 3.0, 3.0));
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersection(&Rect::new(20.0, 20.0, 5.0, 5.0)), None);
        assert_eq!(
            a.intersection(&Rect::new(5.0, 5.0, 10.0, 10.0)),
            Some(Rect::new(5.0, 5.0, 5.0, 5.0))
        );
        // Touching edges do not overlap.
        assert_eq!(a.intersection(&Rect::new(10.0, 0.0, 5.0, 5.0)), None);
        // Negative sizes are standardized first.
        assert_eq!(
            a.intersection(&Rect::new(15.0, 15.0, -10.0, -10.0)),
            Some(Rect::new(5.0, 5.0, 5.0, 5.0))
        );
    }

    #[test]
    fn test_intersection_with_empty_returns_other() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let empty = Rect::new(3.0, 3.0, 0.0, 4.0);
        assert_eq!(a.intersection(&empty), Some(empty));
        assert_eq!(empty.intersection(&a), Some(a));
    }

    #[test]
    fn test_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, -5.0, 10.0, 4.0);
        assert_eq!(a.union(&b), Rect::new(0.0, -5.0, 15.0, 15.0));
        assert_eq!(Rect::NULL.union(&a), a);
        assert_eq!(a.union(&Rect::NULL), a);
        assert!(Rect::NULL.is_null());
        assert!(Rect::NULL.is_empty());
    }

    #[test]
    fn test_contains_and_inset() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(10.0, 0.0)));
        assert!(!rect.contains(Point::new(10.1, 0.0)));
        assert_eq!(rect.inset_by(2.0, 3.0), Rect::new(2.0, 3.0, 6.0, 4.0));
        assert!(rect.inset_by(6.0, 0.0).is_null());
        assert_eq!(rect.offset_by(1.0, -1.0), Rect::new(1.0, -1.0, 10.0, 10.0));
    }

    #[test]
    fn test_rect_applying_transform() {
        let rect = Rect::new(0.0, 0.0, 10.0, 5.0);
        let rotated = rect.applying(&AffineTransform::rotation(std::f64::consts::FRAC_PI_2));
        assert!((rotated.min_x() + 5.0).abs() < 1e-9);
        assert!((rotated.width() - 5.0).abs() < 1e-9);
        assert!((rotated.height() - 10.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(ContentMode::ScaleToFill, Rect::new(0.0, 0.0, 100.0, 50.0))]
    #[case(ContentMode::ScaleAspectFit, Rect::new(25.0, 0.0, 50.0, 50.0))]
    #[case(ContentMode::ScaleAspectFill, Rect::new(0.0, -25.0, 100.0, 100.0))]
    #[case(ContentMode::Center, Rect::new(40.0, 15.0, 20.0, 20.0))]
    #[case(ContentMode::Top, Rect::new(40.0, 0.0, 20.0, 20.0))]
    #[case(ContentMode::Bottom, Rect::new(40.0, 30.0, 20.0, 20.0))]
    #[case(ContentMode::Left, Rect::new(0.0, 15.0, 20.0, 20.0))]
    #[case(ContentMode::Right, Rect::new(80.0, 15.0, 20.0, 20.0))]
    #[case(ContentMode::TopLeft, Rect::new(0.0, 0.0, 20.0, 20.0))]
    #[case(ContentMode::TopRight, Rect::new(80.0, 0.0, 20.0, 20.0))]
    #[case(ContentMode::BottomLeft, Rect::new(0.0, 30.0, 20.0, 20.0))]
    #[case(ContentMode::BottomRight, Rect::new(80.0, 30.0, 20.0, 20.0))]
    fn test_content_mode_fitting(#[case] mode: ContentMode, #[case] expected: Rect) {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        let size = Size::new(20.0, 20.0);
        assert_eq!(Rect::fitting(mode, bounds, size), expected);
    }
}
