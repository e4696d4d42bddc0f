//! tiny-skia raster backend for `silica-graphics`.
//!
//! This crate supplies the pieces a [`GraphicsContext`](silica_graphics::GraphicsContext)
//! needs to produce pixels:
//! - [`SkiaBackend`], a `tiny-skia` rasterizer implementing [`silica_graphics::Backend`]
//! - [`FontConfig`] and [`FontdbLoader`], resolving font names through `fontdb`
//!   and reading outlines with `ttf-parser`
//! - [`decode_image`] for PNG and JPEG data, and PNG export of the rendered surface
//!
//! # Example
//!
//! ```rust,ignore
//! use silica_graphics::{Color, Font, FontCache, Rect};
//! use silica_skia::{FontConfig, SkiaBackend};
//!
//! let fonts = FontCache::new(FontConfig::default().resolve());
//! let mut ctx = SkiaBackend::new_context(400, 300)?;
//! ctx.set_fill_color(Color::RED);
//! ctx.fill_rect(Rect::new(10.0, 10.0, 100.0, 50.0))?;
//! ctx.set_font(Some(fonts.get("Helvetica-Bold")?));
//! ctx.set_font_size(24.0);
//! ctx.show_text("Hello")?;
//! let png_data = ctx.backend().to_png(None)?;
//! ```

mod backend;
mod codec;
mod error;
mod font;
mod font_config;

// Re-export public API
pub use backend::{AlphaMask, SkiaBackend, MAX_DIMENSION};
pub use codec::{decode_image, sniff_format};
pub use error::{SkiaError, SkiaResult};
pub use font::{FontdbLoader, TtfFontFace};
pub use font_config::{font_config_to_fontdb, CustomFont, FontConfig, GenericFamilyMap};
