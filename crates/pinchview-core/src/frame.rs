use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;

/// One decoded frame of an animated (or still) image.
/// Cloning is cheap: the pixel buffer is shared.
#[derive(Clone, Debug)]
pub struct AnimationFrame {
    pub image: Arc<RgbaImage>,
    /// How long the frame stays on screen, after delay normalization.
    pub delay: Duration,
    pub index: usize,
}

impl AnimationFrame {
    pub fn new(image: RgbaImage, delay: Duration, index: usize) -> Self {
        Self {
            image: Arc::new(image),
            delay,
            index,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

impl PartialEq for AnimationFrame {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.delay == other.delay && self.image == other.image
    }
}

/// Shared stop flag checked by decode and playback callbacks when they fire.
///
/// Once raised it never goes back down; a new playback run gets a new flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// How many times an animation plays through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopCount {
    Infinite,
    /// Total number of plays, at least 1.
    Finite(u32),
}

impl Default for LoopCount {
    fn default() -> Self {
        Self::Finite(1)
    }
}

impl std::fmt::Display for LoopCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Infinite => write!(f, "infinite"),
            Self::Finite(1) => write!(f, "once"),
            Self::Finite(n) => write!(f, "{n} times"),
        }
    }
}
