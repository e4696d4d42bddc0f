//! Fill, stroke, clip and compositing operations for SkiaBackend.

use super::{convert, AlphaMask, SkiaBackend, MAX_DIMENSION};
use silica_graphics::{
    BackendError, BackendResult, BackendStatus, FillRule, Image, Path, Pattern, Point, Rect,
    Size, StrokeStyle,
};
use std::sync::Arc;
use tiny_skia::{Pixmap, Transform};

/// Paint for `pattern`. Surface patterns are sampled 1:1 in device space.
fn paint_for(pattern: &Pattern<Pixmap>) -> tiny_skia::Paint<'_> {
    let mut paint = tiny_skia::Paint {
        anti_alias: true,
        ..Default::default()
    };
    match pattern {
        Pattern::Solid(color) => paint.set_color(convert::color(*color)),
        Pattern::Surface(surface) => {
            paint.shader = tiny_skia::Pattern::new(
                surface.as_ref(),
                tiny_skia::SpreadMode::Pad,
                tiny_skia::FilterQuality::Nearest,
                1.0,
                Transform::identity(),
            );
        }
    }
    paint
}

fn opacity(alpha: f64) -> f32 {
    if alpha.is_nan() {
        return 0.0;
    }
    alpha.clamp(0.0, 1.0) as f32
}

impl SkiaBackend {
    fn bounds(&self, operation: &'static str) -> BackendResult<tiny_skia::Rect> {
        tiny_skia::Rect::from_xywh(0.0, 0.0, self.width as f32, self.height as f32)
            .ok_or(BackendError::new(operation, BackendStatus::InvalidSize))
    }

    pub(crate) fn fill_device_path(&mut self, path: &Path, pattern: &Pattern<Pixmap>, rule: FillRule) {
        let Some(path) = convert::path(path) else {
            return;
        };
        let paint = paint_for(pattern);
        let clip = self.state.clip.as_deref();
        if let Some(target) = self.layers.last_mut() {
            target.fill_path(
                &path,
                &paint,
                convert::fill_rule(rule),
                Transform::identity(),
                clip,
            );
        }
    }

    pub(crate) fn stroke_device_path(
        &mut self,
        path: &Path,
        pattern: &Pattern<Pixmap>,
        style: &StrokeStyle,
    ) {
        let Some(path) = convert::path(path) else {
            return;
        };
        let paint = paint_for(pattern);
        let stroke = convert::stroke(style, &self.state.transform);
        let clip = self.state.clip.as_deref();
        if let Some(target) = self.layers.last_mut() {
            target.stroke_path(&path, &paint, &stroke, Transform::identity(), clip);
        }
    }

    /// Intersect the clip with a device-space path. An empty path clips
    /// everything away.
    pub(crate) fn clip_device_path(&mut self, path: &Path, rule: FillRule) -> BackendResult<()> {
        let no_memory = || BackendError::new("clip", BackendStatus::NoMemory);
        let rule = convert::fill_rule(rule);
        let mask = match (convert::path(path), self.state.clip.as_deref()) {
            (None, _) => tiny_skia::Mask::new(self.width, self.height).ok_or_else(no_memory)?,
            (Some(path), None) => {
                let mut mask =
                    tiny_skia::Mask::new(self.width, self.height).ok_or_else(no_memory)?;
                mask.fill_path(&path, rule, true, Transform::identity());
                mask
            }
            (Some(path), Some(current)) => {
                let mut mask = current.clone();
                mask.intersect_path(&path, rule, true, Transform::identity());
                mask
            }
        };
        log::trace!(target: "silica::skia", "clip");
        self.state.clip = Some(Arc::new(mask));
        Ok(())
    }

    pub(crate) fn clear_rect(&mut self, rect: Rect) {
        let ctm = self.state.transform;
        let corner = |x: f64, y: f64| {
            let p = Point::new(x, y).applying(&ctm);
            (p.x as f32, p.y as f32)
        };
        let (x0, y0) = corner(rect.min_x(), rect.min_y());
        let (x1, y1) = corner(rect.max_x(), rect.min_y());
        let (x2, y2) = corner(rect.max_x(), rect.max_y());
        let (x3, y3) = corner(rect.min_x(), rect.max_y());

        let mut pb = tiny_skia::PathBuilder::new();
        pb.move_to(x0, y0);
        pb.line_to(x1, y1);
        pb.line_to(x2, y2);
        pb.line_to(x3, y3);
        pb.close();

        if let Some(path) = pb.finish() {
            let paint = tiny_skia::Paint {
                blend_mode: tiny_skia::BlendMode::Clear,
                ..Default::default()
            };
            let clip = self.state.clip.as_deref();
            if let Some(target) = self.layers.last_mut() {
                target.fill_path(
                    &path,
                    &paint,
                    tiny_skia::FillRule::Winding,
                    Transform::identity(),
                    clip,
                );
            }
        }
    }

    pub(crate) fn paint_everywhere(&mut self, pattern: &Pattern<Pixmap>, alpha: f64) -> BackendResult<()> {
        let bounds = self.bounds("paint")?;
        let clip = self.state.clip.as_deref();
        let Some(target) = self.layers.last_mut() else {
            return Ok(());
        };
        match pattern {
            Pattern::Surface(surface) => {
                let paint = tiny_skia::PixmapPaint {
                    opacity: opacity(alpha),
                    blend_mode: tiny_skia::BlendMode::SourceOver,
                    quality: tiny_skia::FilterQuality::Nearest,
                };
                target.draw_pixmap(0, 0, surface.as_ref(), &paint, Transform::identity(), clip);
            }
            Pattern::Solid(color) => {
                let solid = Pattern::Solid(color.multiplying_alpha(alpha));
                let paint = paint_for(&solid);
                target.fill_rect(bounds, &paint, Transform::identity(), clip);
            }
        }
        Ok(())
    }

    pub(crate) fn padded_alpha(&mut self, surface: &Pixmap, padding: f64) -> BackendResult<AlphaMask> {
        let padding = if padding.is_nan() {
            0
        } else {
            padding.clamp(0.0, MAX_DIMENSION as f64).ceil() as u32
        };
        let width = surface.width() + 2 * padding;
        let height = surface.height() + 2 * padding;
        let mut pixmap = Pixmap::new(width, height)
            .ok_or(BackendError::new("alpha_mask", BackendStatus::InvalidSize))?;
        pixmap.draw_pixmap(
            padding as i32,
            padding as i32,
            surface.as_ref(),
            &tiny_skia::PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(AlphaMask { pixmap, padding })
    }

    pub(crate) fn paint_through_mask(
        &mut self,
        pattern: &Pattern<Pixmap>,
        mask: &AlphaMask,
        offset: Size,
    ) -> BackendResult<()> {
        // Place the mask on a target-sized surface, then fold in the clip.
        let mut placed = self.new_pixmap("mask")?;
        let dx = offset.width as f32 - mask.padding as f32;
        let dy = offset.height as f32 - mask.padding as f32;
        placed.draw_pixmap(
            0,
            0,
            mask.pixmap.as_ref(),
            &tiny_skia::PixmapPaint::default(),
            Transform::from_translate(dx, dy),
            None,
        );
        if let Some(clip) = self.state.clip.as_deref() {
            placed.apply_mask(clip);
        }
        let coverage = tiny_skia::Mask::from_pixmap(placed.as_ref(), tiny_skia::MaskType::Alpha);

        let bounds = self.bounds("mask")?;
        let paint = paint_for(pattern);
        if let Some(target) = self.layers.last_mut() {
            target.fill_rect(bounds, &paint, Transform::identity(), Some(&coverage));
        }
        Ok(())
    }

    /// Draw `image` stretched over the user-space `rect`.
    pub(crate) fn draw_image_in_rect(&mut self, image: &Image, rect: Rect, alpha: f64) {
        if rect.is_empty() {
            return;
        }
        let Some(pixmap) =
            tiny_skia::PixmapRef::from_bytes(image.data(), image.width(), image.height())
        else {
            return;
        };
        let paint = tiny_skia::PixmapPaint {
            opacity: opacity(alpha),
            blend_mode: tiny_skia::BlendMode::SourceOver,
            quality: tiny_skia::FilterQuality::Bilinear,
        };

        let scale_x = rect.width() / image.width() as f64;
        let scale_y = rect.height() / image.height() as f64;

        // Translate to destination position, then scale
        let transform = convert::transform(&self.state.transform)
            .pre_translate(rect.origin.x as f32, rect.origin.y as f32)
            .pre_scale(scale_x as f32, scale_y as f32);

        let clip = self.state.clip.as_deref();
        if let Some(target) = self.layers.last_mut() {
            target.draw_pixmap(0, 0, pixmap, &paint, transform, clip);
        }
    }
}
