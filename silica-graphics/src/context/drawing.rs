//! Fill, stroke, clip and image drawing for GraphicsContext.

use super::GraphicsContext;
use crate::backend::{Backend, BackendResult, Pattern};
use crate::error::GraphicsResult;
use crate::geometry::Rect;
use crate::image::Image;
use crate::style::{DrawingMode, FillRule};

impl<B: Backend> GraphicsContext<B> {
    /// Fill the current path and clear it.
    pub fn fill_path(&mut self, rule: FillRule) -> GraphicsResult<()> {
        log::debug!(target: "silica", "fill_path {rule:?}");
        let pattern = self.state.fill_pattern();
        self.paint_with_shadow(|backend| backend.fill(&pattern, rule, false))
    }

    /// Stroke the current path with the current stroke attributes and clear it.
    pub fn stroke_path(&mut self) -> GraphicsResult<()> {
        log::debug!(target: "silica", "stroke_path");
        let pattern = self.state.stroke_pattern();
        let style = self.state.stroke.clone();
        self.paint_with_shadow(|backend| backend.stroke(&pattern, &style, false))
    }

    /// Paint the current path according to `mode` and clear it.
    ///
    /// Combined modes fill first (keeping the path) and then stroke, and cast
    /// a single shadow for both.
    pub fn draw_path(&mut self, mode: DrawingMode) -> GraphicsResult<()> {
        log::debug!(target: "silica", "draw_path {mode:?}");
        let fill = mode
            .fill_rule()
            .map(|rule| (self.state.fill_pattern(), rule));
        let stroke = mode
            .strokes()
            .then(|| (self.state.stroke_pattern(), self.state.stroke.clone()));

        self.paint_with_shadow(|backend| {
            if let Some((pattern, rule)) = &fill {
                backend.fill(pattern, *rule, stroke.is_some())?;
            }
            if let Some((pattern, style)) = &stroke {
                backend.stroke(pattern, style, false)?;
            }
            Ok(())
        })
    }

    /// Fill `rect`. Replaces the current path.
    pub fn fill_rect(&mut self, rect: Rect) -> GraphicsResult<()> {
        self.begin_path();
        self.add_rect(rect);
        self.fill_path(FillRule::Winding)
    }

    /// Stroke `rect`. Replaces the current path.
    pub fn stroke_rect(&mut self, rect: Rect) -> GraphicsResult<()> {
        self.begin_path();
        self.add_rect(rect);
        self.stroke_path()
    }

    /// Fill the ellipse inscribed in `rect`. Replaces the current path.
    pub fn fill_ellipse(&mut self, rect: Rect) -> GraphicsResult<()> {
        self.begin_path();
        self.add_ellipse(rect);
        self.fill_path(FillRule::Winding)
    }

    /// Stroke the ellipse inscribed in `rect`. Replaces the current path.
    pub fn stroke_ellipse(&mut self, rect: Rect) -> GraphicsResult<()> {
        self.begin_path();
        self.add_ellipse(rect);
        self.stroke_path()
    }

    /// Make the pixels under `rect` transparent.
    pub fn clear(&mut self, rect: Rect) -> GraphicsResult<()> {
        log::debug!(target: "silica", "clear {rect:?}");
        self.backend.clear(rect)?;
        Ok(())
    }

    /// Intersect the clip with the current path and clear the path.
    pub fn clip(&mut self, rule: FillRule) -> GraphicsResult<()> {
        log::debug!(target: "silica", "clip {rule:?}");
        self.backend.clip(rule)?;
        Ok(())
    }

    /// Intersect the clip with `rect`. Replaces the current path.
    pub fn clip_to_rect(&mut self, rect: Rect) -> GraphicsResult<()> {
        self.begin_path();
        self.add_rect(rect);
        self.clip(FillRule::Winding)
    }

    /// Draw `image` scaled into `rect`.
    pub fn draw_image(&mut self, image: &Image, rect: Rect) -> GraphicsResult<()> {
        log::debug!(
            target: "silica",
            "draw_image {}x{} into {rect:?}",
            image.width(),
            image.height()
        );
        let alpha = self.state.alpha;
        self.paint_with_shadow(|backend| backend.draw_image(image, rect, alpha))
    }

    /// Run `paint` against the backend, casting the current shadow if one is set.
    ///
    /// With a shadow the paint goes into an offscreen group. The group's alpha,
    /// padded by the shadow radius on every side, masks the shadow color at
    /// the shadow offset; the group content is then composited on top.
    pub(crate) fn paint_with_shadow<F>(&mut self, paint: F) -> GraphicsResult<()>
    where
        F: FnOnce(&mut B) -> BackendResult<()>,
    {
        let Some(shadow) = self.state.shadow.clone() else {
            paint(&mut self.backend)?;
            return Ok(());
        };

        self.backend.push_group()?;
        let painted = paint(&mut self.backend);
        let group = self.backend.pop_group()?;
        painted?;

        let mask = self.backend.alpha_mask(&group, shadow.radius)?;
        self.backend.mask(&shadow.pattern(), &mask, shadow.offset)?;
        self.backend.paint(&Pattern::Surface(group), 1.0)?;
        Ok(())
    }
}
