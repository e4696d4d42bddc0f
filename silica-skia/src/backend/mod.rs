//! tiny-skia raster backend.

mod convert;
mod export;
mod paint;

use silica_graphics::{
    AffineTransform, Backend, BackendError, BackendResult, BackendStatus, FillRule,
    GraphicsContext, Image, Path, Pattern, Point, Rect, Size, StrokeStyle,
};
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Maximum surface dimension (same as Chrome's canvas limit).
pub const MAX_DIMENSION: u32 = 32767;

/// Transform and clip saved by [`Backend::save`].
#[derive(Debug, Clone)]
pub(crate) struct SkiaState {
    pub(crate) transform: AffineTransform,
    /// Device-space coverage; `None` means unclipped. Shared between saved
    /// states until a clip changes it.
    pub(crate) clip: Option<Arc<tiny_skia::Mask>>,
}

impl Default for SkiaState {
    fn default() -> Self {
        Self {
            transform: AffineTransform::IDENTITY,
            clip: None,
        }
    }
}

/// Alpha coverage of a group, padded on every side.
#[derive(Debug, Clone)]
pub struct AlphaMask {
    pub(crate) pixmap: Pixmap,
    pub(crate) padding: u32,
}

impl AlphaMask {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }
}

/// Rasterizing backend drawing into a premultiplied RGBA pixmap.
pub struct SkiaBackend {
    /// Width of the surface in pixels.
    pub(crate) width: u32,
    /// Height of the surface in pixels.
    pub(crate) height: u32,
    /// Root surface followed by the open groups; drawing targets the last.
    pub(crate) layers: Vec<Pixmap>,
    /// Current transform and clip.
    pub(crate) state: SkiaState,
    /// Stack of saved states.
    state_stack: Vec<SkiaState>,
    /// Current path in device space.
    pub(crate) path: Path,
}

impl std::fmt::Debug for SkiaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkiaBackend")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("groups", &(self.layers.len() - 1))
            .field("saved_states", &self.state_stack.len())
            .finish()
    }
}

impl SkiaBackend {
    /// Create a transparent surface of `width × height` pixels.
    pub fn new(width: u32, height: u32) -> BackendResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(BackendError::new("new", BackendStatus::InvalidSize));
        }
        let pixmap =
            Pixmap::new(width, height).ok_or(BackendError::new("new", BackendStatus::NoMemory))?;
        log::debug!(target: "silica::skia", "new surface {width}x{height}");
        Ok(Self {
            width,
            height,
            layers: vec![pixmap],
            state: SkiaState::default(),
            state_stack: Vec::new(),
            path: Path::new(),
        })
    }

    /// Graphics context drawing into a new `width × height` surface.
    pub fn new_context(width: u32, height: u32) -> BackendResult<GraphicsContext<Self>> {
        let backend = Self::new(width, height)?;
        Ok(GraphicsContext::new(
            backend,
            Size::new(width as f64, height as f64),
        ))
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The root surface. Open groups are not included.
    pub fn pixmap(&self) -> &Pixmap {
        &self.layers[0]
    }

    /// Number of groups currently open.
    pub fn group_depth(&self) -> usize {
        self.layers.len() - 1
    }

    fn device(&self, point: Point) -> Point {
        point.applying(&self.state.transform)
    }

    pub(crate) fn new_pixmap(&self, operation: &'static str) -> BackendResult<Pixmap> {
        Pixmap::new(self.width, self.height)
            .ok_or(BackendError::new(operation, BackendStatus::NoMemory))
    }

    /// Take the current path, or clone it when `preserve` is set.
    pub(crate) fn take_path(&mut self, preserve: bool) -> Path {
        if preserve {
            self.path.clone()
        } else {
            std::mem::take(&mut self.path)
        }
    }
}

impl Backend for SkiaBackend {
    type Surface = Pixmap;
    type Mask = AlphaMask;

    fn save(&mut self) -> BackendResult<()> {
        log::trace!(target: "silica::skia", "save");
        self.state_stack.push(self.state.clone());
        Ok(())
    }

    fn restore(&mut self) -> BackendResult<()> {
        log::trace!(target: "silica::skia", "restore");
        self.state = self
            .state_stack
            .pop()
            .ok_or(BackendError::new("restore", BackendStatus::InvalidRestore))?;
        Ok(())
    }

    fn transform(&self) -> AffineTransform {
        self.state.transform
    }

    fn concat_transform(&mut self, transform: &AffineTransform) -> BackendResult<()> {
        let combined = transform.concatenating(&self.state.transform);
        let finite = [
            combined.a,
            combined.b,
            combined.c,
            combined.d,
            combined.tx,
            combined.ty,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite || combined.inverted().is_none() {
            return Err(BackendError::new(
                "concat_transform",
                BackendStatus::InvalidMatrix,
            ));
        }
        self.state.transform = combined;
        Ok(())
    }

    fn new_path(&mut self) {
        self.path = Path::new();
    }

    fn move_to(&mut self, point: Point) {
        let point = self.device(point);
        self.path.move_to(point);
    }

    fn line_to(&mut self, point: Point) {
        let point = self.device(point);
        if self.path.current_point().is_none() {
            self.path.move_to(point);
        } else {
            self.path.add_line(point);
        }
    }

    fn curve_to(&mut self, control1: Point, control2: Point, end: Point) {
        let control1 = self.device(control1);
        let control2 = self.device(control2);
        let end = self.device(end);
        if self.path.current_point().is_none() {
            self.path.move_to(control1);
        }
        self.path.add_curve(control1, control2, end);
    }

    fn close_path(&mut self) {
        if self.path.current_point().is_some() {
            self.path.close_subpath();
        }
    }

    fn current_point(&self) -> Option<Point> {
        let inverse = self.state.transform.inverted()?;
        self.path.current_point().map(|p| p.applying(&inverse))
    }

    fn copy_path(&self) -> Path {
        match self.state.transform.inverted() {
            Some(inverse) => self.path.applying(&inverse),
            None => Path::new(),
        }
    }

    fn fill(&mut self, pattern: &Pattern<Pixmap>, rule: FillRule, preserve: bool) -> BackendResult<()> {
        let path = self.take_path(preserve);
        self.fill_device_path(&path, pattern, rule);
        Ok(())
    }

    fn stroke(
        &mut self,
        pattern: &Pattern<Pixmap>,
        style: &StrokeStyle,
        preserve: bool,
    ) -> BackendResult<()> {
        let path = self.take_path(preserve);
        self.stroke_device_path(&path, pattern, style);
        Ok(())
    }

    fn clip(&mut self, rule: FillRule) -> BackendResult<()> {
        let path = std::mem::take(&mut self.path);
        self.clip_device_path(&path, rule)
    }

    fn clear(&mut self, rect: Rect) -> BackendResult<()> {
        self.clear_rect(rect);
        Ok(())
    }

    fn paint(&mut self, pattern: &Pattern<Pixmap>, alpha: f64) -> BackendResult<()> {
        self.paint_everywhere(pattern, alpha)
    }

    fn push_group(&mut self) -> BackendResult<()> {
        let group = self.new_pixmap("push_group")?;
        self.layers.push(group);
        log::trace!(target: "silica::skia", "push_group depth={}", self.group_depth());
        Ok(())
    }

    fn pop_group(&mut self) -> BackendResult<Pixmap> {
        // The root surface is never popped.
        let group = match self.layers.len() {
            0 | 1 => None,
            _ => self.layers.pop(),
        }
        .ok_or(BackendError::new("pop_group", BackendStatus::InvalidPopGroup))?;
        log::trace!(target: "silica::skia", "pop_group depth={}", self.group_depth());
        Ok(group)
    }

    fn alpha_mask(&mut self, surface: &Pixmap, padding: f64) -> BackendResult<AlphaMask> {
        self.padded_alpha(surface, padding)
    }

    fn mask(&mut self, pattern: &Pattern<Pixmap>, mask: &AlphaMask, offset: Size) -> BackendResult<()> {
        self.paint_through_mask(pattern, mask, offset)
    }

    fn draw_image(&mut self, image: &Image, rect: Rect, alpha: f64) -> BackendResult<()> {
        self.draw_image_in_rect(image, rect, alpha);
        Ok(())
    }
}
