//! Decoded raster images.

use crate::geometry::Size;
use thiserror::Error;

/// Image bytes that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The leading bytes match no supported format.
    #[error("unrecognized image signature")]
    BadSignature,

    /// The format was recognized but the data is corrupt or truncated.
    #[error("malformed image data: {0}")]
    Malformed(String),

    /// The data is valid but uses a pixel layout that cannot be represented.
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),
}

/// An 8-bit RGBA image with premultiplied alpha, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Wrap premultiplied RGBA8 pixels. Fails if `data` does not hold exactly
    /// `width × height` pixels or either dimension is zero.
    pub fn from_premultiplied_rgba(
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> Result<Self, DecodeError> {
        let expected = (width as usize) * (height as usize) * 4;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(DecodeError::Malformed(format!(
                "expected {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_rgba(width: u32, height: u32, mut data: Vec<u8>) -> Result<Self, DecodeError> {
        for pixel in data.chunks_exact_mut(4) {
            let a = pixel[3] as u32;
            if a < 255 {
                pixel[0] = ((pixel[0] as u32 * a + 127) / 255) as u8;
                pixel[1] = ((pixel[1] as u32 * a + 127) / 255) as u8;
                pixel[2] = ((pixel[2] as u32 * a + 127) / 255) as u8;
            }
        }
        Self::from_premultiplied_rgba(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// Premultiplied RGBA8 pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
