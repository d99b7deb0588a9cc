use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ZoomConfig;
use crate::error::Result;
use crate::geometry::{fit_content, ContentDescriptor, Size};
use crate::haptics::{HapticsSink, ImpactStrength, NoHaptics};
use crate::zoom::{ClampSignal, ZoomScaleController};

/// Where the host attaches a gesture recognizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureTarget {
    /// The zoomed content itself.
    Content,
    /// The scrollable container wrapping the content.
    ScrollContainer,
}

/// Required gesture attachment points.
///
/// Pinch must go on the outer scroll container: attached to the inner
/// content it gets stuck on some devices once the content is resized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureBindings {
    pub double_tap: GestureTarget,
    pub pinch: GestureTarget,
}

pub const GESTURE_BINDINGS: GestureBindings = GestureBindings {
    double_tap: GestureTarget::Content,
    pinch: GestureTarget::ScrollContainer,
};

/// Result of one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentLayout {
    /// Content size at scale 1.
    pub fitted_size: Size,
    /// Fitted size multiplied by the current zoom scale.
    pub content_size: Size,
    /// Inset that centers the content on axes where it is smaller than the viewport.
    pub offset: Size,
    pub scale: f64,
    pub scrollable_x: bool,
    pub scrollable_y: bool,
}

/// Zoomable full-screen host for one piece of content.
pub struct ZoomableViewport {
    content: ContentDescriptor,
    zoom: ZoomScaleController,
    haptics: Arc<dyn HapticsSink>,
    visible: bool,
}

impl ZoomableViewport {
    pub fn new(content: ContentDescriptor, config: &ZoomConfig) -> Result<Self> {
        Ok(Self {
            content,
            zoom: ZoomScaleController::new(config)?,
            haptics: Arc::new(NoHaptics),
            visible: false,
        })
    }

    pub fn with_haptics(mut self, haptics: Arc<dyn HapticsSink>) -> Self {
        self.haptics = haptics;
        self
    }

    pub fn content(&self) -> &ContentDescriptor {
        &self.content
    }

    pub fn zoom(&self) -> &ZoomScaleController {
        &self.zoom
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn layout(&self, viewport: Size) -> Result<ContentLayout> {
        let fitted_size = fit_content(&self.content, viewport)?;
        let scale = self.zoom.current_scale();
        let content_size = fitted_size * scale;

        Ok(ContentLayout {
            fitted_size,
            content_size,
            offset: Size::new(
                (viewport.width - content_size.width).max(0.0) / 2.0,
                (viewport.height - content_size.height).max(0.0) / 2.0,
            ),
            scale,
            scrollable_x: content_size.width > viewport.width,
            scrollable_y: content_size.height > viewport.height,
        })
    }

    /// Like [`layout`](Self::layout), but an unusable viewport or content
    /// ratio yields an empty display instead of an error.
    pub fn layout_or_empty(&self, viewport: Size) -> Option<ContentLayout> {
        match self.layout(viewport) {
            Ok(layout) => Some(layout),
            Err(e) => {
                warn!(error = %e, "Layout skipped, showing empty content");
                None
            }
        }
    }

    pub fn pinch_changed(&mut self, factor: f64) {
        self.zoom.on_gesture_update(factor);
    }

    pub fn pinch_ended(&mut self, factor: f64) -> Option<ClampSignal> {
        let signal = self.zoom.on_gesture_end(factor);
        if signal.is_some() {
            self.haptics.impact(ImpactStrength::Light);
        }
        signal
    }

    pub fn pinch_cancelled(&mut self) {
        self.zoom.on_gesture_cancel();
    }

    pub fn double_tap(&mut self) -> f64 {
        self.zoom.on_double_tap()
    }

    pub fn appear(&mut self) {
        self.visible = true;
    }

    pub fn disappear(&mut self) {
        self.visible = false;
        self.zoom.on_disappear();
        debug!(scale = self.zoom.current_scale(), "Viewport disappeared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinch_bound_to_container() {
        assert_eq!(GESTURE_BINDINGS.pinch, GestureTarget::ScrollContainer);
        assert_eq!(GESTURE_BINDINGS.double_tap, GestureTarget::Content);
    }
}
