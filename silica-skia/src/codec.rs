//! PNG and JPEG decoding into [`Image`].

use image::{ImageError, ImageFormat};
use silica_graphics::{DecodeError, Image};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Format named by the leading bytes of `bytes`.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    if bytes.starts_with(&PNG_SIGNATURE) {
        Some(ImageFormat::Png)
    } else if bytes.starts_with(&JPEG_SIGNATURE) {
        Some(ImageFormat::Jpeg)
    } else {
        None
    }
}

/// Decode PNG or JPEG bytes into a premultiplied RGBA image.
pub fn decode_image(bytes: &[u8]) -> Result<Image, DecodeError> {
    let format = sniff_format(bytes).ok_or(DecodeError::BadSignature)?;
    let decoded = image::load_from_memory_with_format(bytes, format).map_err(|err| match err {
        ImageError::Unsupported(err) => DecodeError::UnsupportedFormat(err.to_string()),
        err => DecodeError::Malformed(err.to_string()),
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!(target: "silica::skia", "decoded {format:?} image {width}x{height}");
    Image::from_rgba(width, height, rgba.into_raw())
}
