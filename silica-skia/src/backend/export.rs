//! Pixel readback and PNG export for SkiaBackend.

use super::SkiaBackend;
use crate::error::SkiaResult;
use std::path::Path;

impl SkiaBackend {
    /// Root surface pixels as straight-alpha RGBA, rows top to bottom.
    pub fn image_data(&self) -> Vec<u8> {
        let mut data = self.pixmap().data().to_vec();
        for pixel in data.chunks_exact_mut(4) {
            // Convert from premultiplied alpha to straight alpha
            let a = pixel[3];
            if a == 0 {
                pixel.copy_from_slice(&[0, 0, 0, 0]);
            } else if a < 255 {
                let alpha_f = a as f32 / 255.0;
                pixel[0] = (pixel[0] as f32 / alpha_f).round().min(255.0) as u8;
                pixel[1] = (pixel[1] as f32 / alpha_f).round().min(255.0) as u8;
                pixel[2] = (pixel[2] as f32 / alpha_f).round().min(255.0) as u8;
            }
        }
        data
    }

    /// Straight-alpha RGBA of the pixel at (`x`, `y`), or `None` outside the
    /// surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap().pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Export the root surface as PNG data.
    ///
    /// # Arguments
    /// * `ppi` - Optional pixels per inch for PNG metadata. Defaults to 72 if not specified.
    pub fn to_png(&self, ppi: Option<f32>) -> SkiaResult<Vec<u8>> {
        let ppi = ppi.unwrap_or(72.0);

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            // Set pixel density metadata (pixels per meter)
            let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.image_data())?;
        }
        log::debug!(target: "silica::skia", "encoded {} byte PNG", buf.len());
        Ok(buf)
    }

    /// Encode the root surface as PNG and write it to `path`.
    pub fn write_png(&self, path: impl AsRef<Path>, ppi: Option<f32>) -> SkiaResult<()> {
        let data = self.to_png(ppi)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}
