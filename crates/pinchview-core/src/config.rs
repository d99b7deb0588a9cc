use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DOUBLE_TAP_SCALE, DEFAULT_FRAME_DELAY_MS, DEFAULT_MAX_SCALE, MIN_FRAME_DELAY_MS,
    MIN_SCALE,
};
use crate::error::{PreviewError, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl PreviewConfig {
    pub fn validate(&self) -> Result<()> {
        self.zoom.validate()?;
        self.animation.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Upper bound for the committed zoom scale.
    pub max_scale: f64,
    /// Scale jumped to when double-tapping unzoomed content.
    pub double_tap_scale: f64,
    /// Return to scale 1 when the view disappears.
    pub reset_on_disappear: bool,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            max_scale: DEFAULT_MAX_SCALE,
            double_tap_scale: DEFAULT_DOUBLE_TAP_SCALE,
            reset_on_disappear: true,
        }
    }
}

impl ZoomConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.max_scale.is_finite() || self.max_scale < MIN_SCALE {
            return Err(PreviewError::InvalidConfig(format!(
                "max_scale must be finite and >= {MIN_SCALE}, got {}",
                self.max_scale
            )));
        }
        if !self.double_tap_scale.is_finite() || self.double_tap_scale <= 0.0 {
            return Err(PreviewError::InvalidConfig(format!(
                "double_tap_scale must be finite and positive, got {}",
                self.double_tap_scale
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Frames declaring a shorter delay fall back to `default_frame_delay_ms`.
    pub min_frame_delay_ms: u64,
    pub default_frame_delay_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            min_frame_delay_ms: MIN_FRAME_DELAY_MS,
            default_frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.default_frame_delay_ms == 0 {
            return Err(PreviewError::InvalidConfig(
                "default_frame_delay_ms must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Display duration for a frame declaring `declared`.
    pub fn effective_delay(&self, declared: Duration) -> Duration {
        if declared < Duration::from_millis(self.min_frame_delay_ms) || declared.is_zero() {
            Duration::from_millis(self.default_frame_delay_ms)
        } else {
            declared
        }
    }
}
