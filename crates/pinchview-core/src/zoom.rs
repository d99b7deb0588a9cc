use tracing::{debug, warn};

use crate::config::ZoomConfig;
use crate::consts::MIN_SCALE;
use crate::error::Result;

/// Raised when a committed scale had to be forced back into range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClampSignal {
    /// Scale fell below 1 and was raised to 1.
    Low,
    /// Scale exceeded the maximum and was lowered to it.
    High,
}

/// Pinch and double-tap zoom state for one displayed view.
///
/// The steady scale is what the user settled on between gestures; the live
/// scale is the multiplier of the pinch currently in progress. The reported
/// scale is their product.
#[derive(Clone, Debug)]
pub struct ZoomScaleController {
    steady_scale: f64,
    live_scale: f64,
    gesture_active: bool,
    max_scale: f64,
    double_tap_scale: f64,
    reset_on_disappear: bool,
}

impl Default for ZoomScaleController {
    fn default() -> Self {
        let config = ZoomConfig::default();
        Self {
            steady_scale: MIN_SCALE,
            live_scale: 1.0,
            gesture_active: false,
            max_scale: config.max_scale,
            double_tap_scale: config.double_tap_scale,
            reset_on_disappear: config.reset_on_disappear,
        }
    }
}

impl ZoomScaleController {
    /// Build a controller from a validated config.
    ///
    /// The double-tap target is clamped into `[1, max_scale]` so that every
    /// transition leaves the steady scale inside the bounds.
    pub fn new(config: &ZoomConfig) -> Result<Self> {
        config.validate()?;

        let double_tap_scale = config.double_tap_scale.clamp(MIN_SCALE, config.max_scale);
        if double_tap_scale != config.double_tap_scale {
            warn!(
                requested = config.double_tap_scale,
                applied = double_tap_scale,
                max_scale = config.max_scale,
                "Double-tap scale outside zoom bounds, clamped"
            );
        }

        Ok(Self {
            steady_scale: MIN_SCALE,
            live_scale: 1.0,
            gesture_active: false,
            max_scale: config.max_scale,
            double_tap_scale,
            reset_on_disappear: config.reset_on_disappear,
        })
    }

    pub fn current_scale(&self) -> f64 {
        self.steady_scale * self.live_scale
    }

    pub fn steady_scale(&self) -> f64 {
        self.steady_scale
    }

    pub fn live_scale(&self) -> f64 {
        self.live_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    pub fn double_tap_scale(&self) -> f64 {
        self.double_tap_scale
    }

    pub fn is_zoomed(&self) -> bool {
        self.current_scale() > MIN_SCALE
    }

    /// A pinch has reported at least one update and has not ended yet.
    pub fn is_gesture_active(&self) -> bool {
        self.gesture_active
    }

    /// Track an in-progress pinch. The newest factor replaces the previous one.
    pub fn on_gesture_update(&mut self, factor: f64) {
        if !is_valid_factor(factor) {
            debug!(factor, "Ignoring invalid pinch factor");
            return;
        }
        self.live_scale = factor;
        self.gesture_active = true;
    }

    /// Commit a finished pinch and clamp the result.
    pub fn on_gesture_end(&mut self, factor: f64) -> Option<ClampSignal> {
        self.end_gesture();
        if !is_valid_factor(factor) {
            debug!(factor, "Ignoring invalid pinch factor");
            return None;
        }

        self.steady_scale *= factor;
        let signal = self.clamp_steady_scale();
        debug!(scale = self.steady_scale, clamped = ?signal, "Pinch committed");
        signal
    }

    /// Drop the in-progress pinch without committing it.
    pub fn on_gesture_cancel(&mut self) {
        self.end_gesture();
    }

    /// Toggle between fitted and the double-tap target. Returns the new steady scale.
    pub fn on_double_tap(&mut self) -> f64 {
        self.steady_scale = if self.is_zoomed() {
            MIN_SCALE
        } else {
            self.double_tap_scale
        };
        debug!(scale = self.steady_scale, "Double tap");
        self.steady_scale
    }

    pub fn reset(&mut self) {
        self.steady_scale = MIN_SCALE;
        self.end_gesture();
    }

    /// Lifecycle hook for the view going off screen.
    pub fn on_disappear(&mut self) {
        if self.reset_on_disappear {
            self.reset();
        }
    }

    fn end_gesture(&mut self) {
        self.live_scale = 1.0;
        self.gesture_active = false;
    }

    fn clamp_steady_scale(&mut self) -> Option<ClampSignal> {
        if self.steady_scale < MIN_SCALE {
            self.steady_scale = MIN_SCALE;
            Some(ClampSignal::Low)
        } else if self.steady_scale > self.max_scale {
            self.steady_scale = self.max_scale;
            Some(ClampSignal::High)
        } else {
            None
        }
    }
}

fn is_valid_factor(factor: f64) -> bool {
    factor.is_finite() && factor > 0.0
}
