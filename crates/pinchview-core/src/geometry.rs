use std::ops::Mul;

use crate::error::{PreviewError, Result};

/// Width/height pair in host layout units.
///
/// Used both for the viewport the host offers on each layout pass and for
/// the fitted or zoomed content box handed back.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    fn validate_viewport(&self) -> Result<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(PreviewError::InvalidGeometry(format!(
                "viewport must have a positive finite area, got {}x{}",
                self.width, self.height
            )))
        }
    }
}

impl Mul<f64> for Size {
    type Output = Size;

    fn mul(self, rhs: f64) -> Size {
        Size::new(self.width * rhs, self.height * rhs)
    }
}

/// What is being shown, as far as layout is concerned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContentDescriptor {
    /// A decoded raster image with its intrinsic pixel size.
    Raster { width: u32, height: u32 },
    /// Opaque host content with an explicit width/height ratio.
    AspectRatio(f64),
}

impl ContentDescriptor {
    pub fn from_image(image: &image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::Raster { width, height }
    }

    /// Width/height ratio of the content, rejected when not positive and finite.
    pub fn aspect_ratio(&self) -> Result<f64> {
        match *self {
            Self::Raster { width, height } => {
                if width == 0 || height == 0 {
                    return Err(PreviewError::InvalidGeometry(format!(
                        "raster image has zero dimension: {width}x{height}"
                    )));
                }
                Ok(width as f64 / height as f64)
            }
            Self::AspectRatio(ratio) => {
                validate_ratio(ratio)?;
                Ok(ratio)
            }
        }
    }
}

fn validate_ratio(ratio: f64) -> Result<()> {
    if ratio.is_finite() && ratio > 0.0 {
        Ok(())
    } else {
        Err(PreviewError::InvalidGeometry(format!(
            "aspect ratio must be positive and finite, got {ratio}"
        )))
    }
}

/// Largest box with the given aspect ratio that fits inside `viewport`.
///
/// The result touches at least one viewport edge and never exceeds either.
pub fn fit(aspect_ratio: f64, viewport: Size) -> Result<Size> {
    validate_ratio(aspect_ratio)?;
    viewport.validate_viewport()?;

    if aspect_ratio < viewport.aspect_ratio() {
        let height = viewport.height;
        Ok(Size::new(height * aspect_ratio, height))
    } else {
        let width = viewport.width;
        Ok(Size::new(width, width / aspect_ratio))
    }
}

/// Fit any content descriptor into `viewport`.
pub fn fit_content(content: &ContentDescriptor, viewport: Size) -> Result<Size> {
    match *content {
        ContentDescriptor::Raster { width, height } => {
            content.aspect_ratio()?;
            viewport.validate_viewport()?;
            let intrinsic = Size::new(width as f64, height as f64);
            let h_zoom = viewport.width / intrinsic.width;
            let v_zoom = viewport.height / intrinsic.height;
            Ok(intrinsic * h_zoom.min(v_zoom))
        }
        ContentDescriptor::AspectRatio(ratio) => fit(ratio, viewport),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mul() {
        let size = Size::new(10.0, 15.0);
        assert_eq!(size * 2.0, Size::new(20.0, 30.0));
        assert_eq!(size * 3.0, Size::new(30.0, 45.0));
    }

    #[test]
    fn test_zero_height_viewport_rejected() {
        let err = fit(1.0, Size::new(300.0, 0.0)).unwrap_err();
        assert!(matches!(err, PreviewError::InvalidGeometry(_)));
    }

    #[test]
    fn test_nan_ratio_rejected() {
        assert!(fit(f64::NAN, Size::new(300.0, 600.0)).is_err());
        assert!(fit(f64::INFINITY, Size::new(300.0, 600.0)).is_err());
        assert!(fit(-1.0, Size::new(300.0, 600.0)).is_err());
    }

    #[test]
    fn test_zero_raster_rejected() {
        let content = ContentDescriptor::Raster {
            width: 0,
            height: 10,
        };
        assert!(content.aspect_ratio().is_err());
        assert!(fit_content(&content, Size::new(100.0, 100.0)).is_err());
    }
}
