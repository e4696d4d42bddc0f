//! Transform operations for GraphicsContext.

use super::GraphicsContext;
use crate::backend::Backend;
use crate::error::GraphicsResult;
use crate::geometry::AffineTransform;

impl<B: Backend> GraphicsContext<B> {
    /// Current transformation matrix (user space to device space).
    pub fn current_transform(&self) -> AffineTransform {
        self.backend.transform()
    }

    /// Prepend `transform` to the current transform.
    ///
    /// A transform that would make the current transform singular is
    /// rejected and leaves it unchanged.
    pub fn concatenate(&mut self, transform: &AffineTransform) -> GraphicsResult<()> {
        log::debug!(target: "silica", "concatenate {transform:?}");
        self.backend.concat_transform(transform)?;
        Ok(())
    }

    pub fn translate(&mut self, tx: f64, ty: f64) -> GraphicsResult<()> {
        self.concatenate(&AffineTransform::translation(tx, ty))
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> GraphicsResult<()> {
        self.concatenate(&AffineTransform::scale(sx, sy))
    }

    /// Rotate by `angle` radians.
    pub fn rotate(&mut self, angle: f64) -> GraphicsResult<()> {
        self.concatenate(&AffineTransform::rotation(angle))
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::BackendStatus;
    use crate::context::GraphicsContext;
    use crate::error::GraphicsError;
    use crate::geometry::{AffineTransform, Point, Size};
    use crate::recording::RecordingBackend;
    use std::f64::consts::FRAC_PI_2;

    fn context() -> GraphicsContext<RecordingBackend> {
        GraphicsContext::new(RecordingBackend::new(), Size::new(100.0, 100.0))
    }

    #[test]
    fn test_translate_then_scale() {
        let mut ctx = context();
        ctx.translate(10.0, 20.0).unwrap();
        ctx.scale(2.0, 2.0).unwrap();
        // Scale applies to user coordinates first.
        let p = Point::new(1.0, 1.0).applying(&ctx.current_transform());
        assert_eq!(p, Point::new(12.0, 22.0));
    }

    #[test]
    fn test_rotate() {
        let mut ctx = context();
        ctx.rotate(FRAC_PI_2).unwrap();
        let p = Point::new(1.0, 0.0).applying(&ctx.current_transform());
        assert!(p.x.abs() < 1e-12 && (p.y - 1.0).abs() < 1e-12, "{p:?}");
    }

    #[test]
    fn test_singular_transform_rejected() {
        let mut ctx = context();
        ctx.translate(5.0, 5.0).unwrap();
        let before = ctx.current_transform();
        let err = ctx.scale(0.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            GraphicsError::Backend(ref e) if e.status == BackendStatus::InvalidMatrix
        ));
        assert_eq!(ctx.current_transform(), before);
    }

    #[test]
    fn test_transform_restored() {
        let mut ctx = context();
        ctx.save().unwrap();
        ctx.concatenate(&AffineTransform::new(1.0, 0.5, 0.0, 1.0, 3.0, 4.0))
            .unwrap();
        assert!(!ctx.current_transform().is_identity());
        ctx.restore().unwrap();
        assert!(ctx.current_transform().is_identity());
    }
}
