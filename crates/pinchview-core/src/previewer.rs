use std::sync::Arc;

use image::RgbaImage;
use tracing::warn;

use crate::animation::{AnimatedImageDriver, PlaybackHandle};
use crate::config::PreviewConfig;
use crate::error::Result;
use crate::geometry::{ContentDescriptor, Size};
use crate::haptics::HapticsSink;
use crate::io::decode::image_dimensions;
use crate::io::resource::{Bundle, ResourceLoader};
use crate::viewport::{ContentLayout, ZoomableViewport};

/// What a previewer displays.
pub enum PreviewSource {
    /// Nothing could be loaded.
    Empty,
    Image(Arc<RgbaImage>),
    Animated(AnimatedImageDriver),
    /// Host-rendered content; only its aspect ratio is known here.
    View,
}

/// Full-screen zoomable preview of a still image, a GIF, or host content.
pub struct Previewer {
    source: PreviewSource,
    viewport: Option<ZoomableViewport>,
}

impl Previewer {
    pub fn empty() -> Self {
        Self {
            source: PreviewSource::Empty,
            viewport: None,
        }
    }

    pub fn image(image: RgbaImage, config: &PreviewConfig) -> Result<Self> {
        let viewport = ZoomableViewport::new(ContentDescriptor::from_image(&image), &config.zoom)?;
        Ok(Self {
            source: PreviewSource::Image(Arc::new(image)),
            viewport: Some(viewport),
        })
    }

    pub fn view(aspect_ratio: f64, config: &PreviewConfig) -> Result<Self> {
        let viewport =
            ZoomableViewport::new(ContentDescriptor::AspectRatio(aspect_ratio), &config.zoom)?;
        Ok(Self {
            source: PreviewSource::View,
            viewport: Some(viewport),
        })
    }

    /// Preview GIF bytes. Undecodable bytes still produce a viewport with a
    /// square aspect ratio and a driver that never plays.
    pub fn gif(bytes: &[u8], config: &PreviewConfig) -> Result<Self> {
        config.animation.validate()?;

        let aspect_ratio = match image_dimensions(bytes) {
            Ok((w, h)) if w > 0 && h > 0 => w as f64 / h as f64,
            Ok(_) => 1.0,
            Err(e) => {
                warn!(error = %e, "Could not read GIF dimensions, assuming square");
                1.0
            }
        };

        let driver = AnimatedImageDriver::new(Some(bytes), &config.animation);
        let viewport =
            ZoomableViewport::new(ContentDescriptor::AspectRatio(aspect_ratio), &config.zoom)?;
        Ok(Self {
            source: PreviewSource::Animated(driver),
            viewport: Some(viewport),
        })
    }

    /// Preview a GIF resource looked up by name. A missing resource gives an
    /// empty previewer; only an invalid config is an error.
    pub fn named_gif(
        loader: &dyn ResourceLoader,
        name: &str,
        bundle: &Bundle,
        config: &PreviewConfig,
    ) -> Result<Self> {
        config.validate()?;
        match loader.load_bytes(name, bundle) {
            Ok(bytes) => Self::gif(&bytes, config),
            Err(e) => {
                warn!(name, bundle = %bundle, error = %e, "Failed to load GIF resource");
                Ok(Self::empty())
            }
        }
    }

    pub fn with_haptics(mut self, haptics: Arc<dyn HapticsSink>) -> Self {
        self.viewport = self.viewport.map(|v| v.with_haptics(haptics));
        self
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.source, PreviewSource::Empty)
    }

    pub fn source(&self) -> &PreviewSource {
        &self.source
    }

    pub fn viewport(&self) -> Option<&ZoomableViewport> {
        self.viewport.as_ref()
    }

    /// Gesture ports live on the viewport.
    pub fn viewport_mut(&mut self) -> Option<&mut ZoomableViewport> {
        self.viewport.as_mut()
    }

    pub fn animation(&self) -> Option<&AnimatedImageDriver> {
        match &self.source {
            PreviewSource::Animated(driver) => Some(driver),
            _ => None,
        }
    }

    pub fn animation_mut(&mut self) -> Option<&mut AnimatedImageDriver> {
        match &mut self.source {
            PreviewSource::Animated(driver) => Some(driver),
            _ => None,
        }
    }

    /// Raster currently on screen, if this previewer owns one.
    pub fn displayed_image(&self) -> Option<Arc<RgbaImage>> {
        match &self.source {
            PreviewSource::Image(image) => Some(Arc::clone(image)),
            PreviewSource::Animated(driver) => driver.current_frame().map(|f| Arc::clone(&f.image)),
            PreviewSource::Empty | PreviewSource::View => None,
        }
    }

    pub fn layout(&self, viewport: Size) -> Option<ContentLayout> {
        self.viewport.as_ref()?.layout_or_empty(viewport)
    }

    /// View came on screen. Returns the playback handle for the host frame
    /// timer when an animation started.
    pub fn appear(&mut self) -> Option<PlaybackHandle> {
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.appear();
        }
        self.animation_mut()?.start()
    }

    pub fn disappear(&mut self) {
        if let Some(driver) = self.animation_mut() {
            driver.stop();
        }
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.disappear();
        }
    }
}
