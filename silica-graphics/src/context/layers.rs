//! Shadows and transparency layers for GraphicsContext.

use super::GraphicsContext;
use crate::backend::{Backend, Pattern};
use crate::color::Color;
use crate::error::{GraphicsResult, StateError};
use crate::geometry::{Rect, Size};
use crate::graphics_state::Shadow;

impl<B: Backend> GraphicsContext<B> {
    /// Cast shadows of `radius` at `offset` in translucent black.
    pub fn set_shadow(&mut self, offset: Size, radius: f64) {
        self.set_shadow_with_color(offset, radius, Shadow::DEFAULT_COLOR);
    }

    /// Cast shadows of `color` and `radius` at `offset` (device space).
    ///
    /// Only the offscreen padding depends on `radius`; shadow edges are hard.
    pub fn set_shadow_with_color(&mut self, offset: Size, radius: f64, color: Color) {
        self.state.shadow = Some(Shadow {
            offset,
            radius: radius.max(0.0),
            color,
        });
    }

    pub fn clear_shadow(&mut self) {
        self.state.shadow = None;
    }

    pub fn shadow(&self) -> Option<&Shadow> {
        self.state.shadow.as_ref()
    }

    /// Start collecting drawing into an offscreen layer.
    ///
    /// When `rect` is given the clip is intersected with it until the layer
    /// ends; the current path is kept. Inside the layer alpha is 1 and no
    /// shadow is set. On failure the context is left as it was.
    pub fn begin_transparency_layer(&mut self, rect: Option<Rect>) -> GraphicsResult<()> {
        log::debug!(target: "silica", "begin_transparency_layer {rect:?}");
        self.save()?;
        if let Err(err) = self.enter_layer(rect) {
            self.restore_unchecked()?;
            return Err(err);
        }
        self.layer_stack.push(self.state_stack.len());
        Ok(())
    }

    fn enter_layer(&mut self, rect: Option<Rect>) -> GraphicsResult<()> {
        if let Some(rect) = rect {
            let path = self.path();
            let clipped = self.clip_to_rect(rect);
            self.begin_path();
            self.add_path(&path);
            clipped?;
        }
        self.state.alpha = 1.0;
        self.state.shadow = None;
        self.backend.push_group()?;
        Ok(())
    }

    /// Close the innermost layer and composite it with the alpha and shadow
    /// that were in effect when it began.
    pub fn end_transparency_layer(&mut self) -> GraphicsResult<()> {
        log::debug!(target: "silica", "end_transparency_layer depth={}", self.layer_stack.len());
        let Some(depth) = self.layer_stack.last().copied() else {
            return Err(StateError::UnbalancedTransparencyLayer.into());
        };
        let group = self.backend.pop_group()?;
        self.layer_stack.pop();
        // Saves left open inside the layer are discarded with it.
        while self.state_stack.len() >= depth {
            self.restore_unchecked()?;
        }

        let alpha = self.state.alpha;
        self.paint_with_shadow(|backend| backend.paint(&Pattern::Surface(group), alpha))
    }

    /// Number of open transparency layers.
    pub fn transparency_layer_depth(&self) -> usize {
        self.layer_stack.len()
    }
}
