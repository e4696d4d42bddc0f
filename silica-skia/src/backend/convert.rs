//! Conversions from silica-graphics value types to tiny-skia.

use silica_graphics::{
    AffineTransform, Color, FillRule, LineCap, LineJoin, Path, PathElement, Point, StrokeStyle,
};

pub(crate) fn transform(t: &AffineTransform) -> tiny_skia::Transform {
    tiny_skia::Transform::from_row(
        t.a as f32,
        t.b as f32,
        t.c as f32,
        t.d as f32,
        t.tx as f32,
        t.ty as f32,
    )
}

pub(crate) fn fill_rule(rule: FillRule) -> tiny_skia::FillRule {
    match rule {
        FillRule::Winding => tiny_skia::FillRule::Winding,
        FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
    }
}

pub(crate) fn line_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

pub(crate) fn line_join(join: LineJoin) -> tiny_skia::LineJoin {
    match join {
        LineJoin::Miter => tiny_skia::LineJoin::Miter,
        LineJoin::Round => tiny_skia::LineJoin::Round,
        LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
    }
}

pub(crate) fn color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(
        color.red.clamp(0.0, 1.0) as f32,
        color.green.clamp(0.0, 1.0) as f32,
        color.blue.clamp(0.0, 1.0) as f32,
        color.alpha.clamp(0.0, 1.0) as f32,
    )
    .unwrap_or(tiny_skia::Color::BLACK)
}

/// Stroke for a device-space path.
///
/// Widths are in user space, so line width and dashes are scaled by the
/// average axis scale of the CTM.
pub(crate) fn stroke(style: &StrokeStyle, ctm: &AffineTransform) -> tiny_skia::Stroke {
    let scale = ((ctm.a * ctm.a + ctm.b * ctm.b).sqrt() + (ctm.c * ctm.c + ctm.d * ctm.d).sqrt())
        / 2.0;
    let dash = if style.dash.is_solid() {
        None
    } else {
        // tiny-skia wants an even number of intervals.
        let mut lengths: Vec<f32> = style
            .dash
            .lengths
            .iter()
            .map(|length| (length * scale) as f32)
            .collect();
        if lengths.len() % 2 == 1 {
            lengths.extend_from_within(..);
        }
        tiny_skia::StrokeDash::new(lengths, (style.dash.phase * scale) as f32)
    };
    tiny_skia::Stroke {
        width: (style.line_width * scale) as f32,
        line_cap: line_cap(style.line_cap),
        line_join: line_join(style.line_join),
        miter_limit: style.miter_limit as f32,
        dash,
    }
}

fn point(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

/// Build a tiny-skia path from device-space elements. `None` when the path
/// has nothing to paint.
pub(crate) fn path(path: &Path) -> Option<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::with_capacity(path.len(), path.len() * 3);
    for element in path.elements() {
        match *element {
            PathElement::MoveTo(p) => {
                let (x, y) = point(p);
                builder.move_to(x, y);
            }
            PathElement::LineTo(p) => {
                let (x, y) = point(p);
                builder.line_to(x, y);
            }
            PathElement::QuadCurveTo(c, p) => {
                let (x1, y1) = point(c);
                let (x, y) = point(p);
                builder.quad_to(x1, y1, x, y);
            }
            PathElement::CurveTo(c1, c2, p) => {
                let (x1, y1) = point(c1);
                let (x2, y2) = point(c2);
                let (x, y) = point(p);
                builder.cubic_to(x1, y1, x2, y2, x, y);
            }
            PathElement::ClosePath => builder.close(),
        }
    }
    builder.finish()
}
