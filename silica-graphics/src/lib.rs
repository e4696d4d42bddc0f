//! CoreGraphics-style 2D drawing context over a pluggable rasterization backend.
//!
//! The context owns the path-building geometry (tangent arcs, quadratic to
//! cubic conversion, ellipses), the save/restore attribute stack, text layout,
//! and the offscreen compositing used for shadows and transparency layers.
//! Pixels are produced by a [`Backend`]; `silica-skia` provides one on top of
//! `tiny-skia`, and [`recording::RecordingBackend`] records calls for tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use silica_graphics::{Color, GraphicsContext, Rect, Size};
//! use silica_skia::SkiaBackend;
//!
//! let mut ctx = GraphicsContext::new(SkiaBackend::new(200, 100)?, Size::new(200.0, 100.0));
//! ctx.set_fill_color(Color::RED);
//! ctx.fill_rect(Rect::new(10.0, 10.0, 100.0, 50.0))?;
//! let png_data = ctx.backend().to_png(None)?;
//! ```

pub mod arc;
mod backend;
mod color;
mod context;
mod error;
pub mod font;
mod geometry;
mod graphics_state;
mod image;
mod path;
pub mod recording;
mod style;
mod text;

// Re-export public API
pub use backend::{Backend, BackendError, BackendResult, BackendStatus, Pattern};
pub use color::Color;
pub use context::GraphicsContext;
pub use error::{GraphicsError, GraphicsResult, StateError};
pub use font::{
    Font, FontCache, FontDescriptor, FontFace, FontLoader, FontSlant, FontWeight, FontWidth,
    GlyphId, OutlineSink,
};
pub use geometry::{AffineTransform, ContentMode, Point, Rect, Size};
pub use graphics_state::{GraphicsState, Shadow};
pub use image::{DecodeError, Image};
pub use path::{quad_to_cubic, Path, PathElement, KAPPA};
pub use style::{
    DrawingMode, FillRule, LineCap, LineDash, LineJoin, StrokeStyle, TextDrawingMode,
};
pub use text::{bounding_rect, content_frame, TextAlignment};
