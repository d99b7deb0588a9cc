use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::AnimationConfig;
use crate::frame::{AnimationFrame, CancellationFlag, LoopCount};
use crate::io::decode::{decode_animation, is_gif};
use crate::io::gif_probe::probe_gif;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stopped => write!(f, "Stopped"),
            Self::Playing => write!(f, "Playing"),
        }
    }
}

/// Notified whenever the displayed frame changes.
///
/// All methods have default no-op implementations.
pub trait FrameObserver: Send + Sync {
    fn frame_changed(&self, _frame: &AnimationFrame) {}
}

/// Token for one playback run, held by the host frame timer.
///
/// Callbacks carrying a handle from a stopped run are rejected.
#[derive(Clone, Debug)]
pub struct PlaybackHandle {
    flag: CancellationFlag,
    generation: u64,
}

impl PlaybackHandle {
    pub fn is_cancelled(&self) -> bool {
        self.flag.is_cancelled()
    }

    /// Flag to hand to a streaming decoder so it can exit early.
    pub fn cancellation_flag(&self) -> &CancellationFlag {
        &self.flag
    }
}

/// Start/stop playback loop over a decoded animation.
///
/// The driver never waits on its own: the host calls [`advance`] (or
/// [`on_frame_decoded`] with frames from its own decoder) from a periodic
/// callback while playing.
///
/// [`advance`]: AnimatedImageDriver::advance
/// [`on_frame_decoded`]: AnimatedImageDriver::on_frame_decoded
pub struct AnimatedImageDriver {
    frames: Vec<AnimationFrame>,
    loop_count: LoopCount,
    current: Option<AnimationFrame>,
    /// Timeline cursor into `frames`, independent of the displayed frame.
    position: usize,
    state: PlaybackState,
    session: Option<PlaybackHandle>,
    generation: u64,
    elapsed_in_frame: Duration,
    plays_completed: u32,
    observers: Vec<Arc<dyn FrameObserver>>,
}

impl AnimatedImageDriver {
    /// Decode `source` up front. Undecodable or absent bytes leave the
    /// driver without frames; it then never starts.
    pub fn new(source: Option<&[u8]>, config: &AnimationConfig) -> Self {
        let Some(bytes) = source else {
            return Self::from_frames(Vec::new(), LoopCount::default(), config);
        };

        let frames = match decode_animation(bytes, config) {
            Ok(frames) => frames,
            Err(e) => {
                warn!(error = %e, bytes = bytes.len(), "Failed to decode animated image");
                Vec::new()
            }
        };

        let loop_count = if is_gif(bytes) {
            probe_gif(bytes)
                .map(|info| info.loop_count)
                .unwrap_or_default()
        } else {
            LoopCount::default()
        };

        debug!(frames = frames.len(), loops = %loop_count, "Animated image decoded");
        Self::from_frames(frames, loop_count, config)
    }

    /// Build a driver over frames decoded elsewhere. Zero delays become
    /// `config.default_frame_delay_ms`.
    pub fn from_frames(
        mut frames: Vec<AnimationFrame>,
        loop_count: LoopCount,
        config: &AnimationConfig,
    ) -> Self {
        for (index, frame) in frames.iter_mut().enumerate() {
            frame.index = index;
            if frame.delay.is_zero() {
                frame.delay = Duration::from_millis(config.default_frame_delay_ms);
            }
        }
        let current = frames.first().cloned();
        Self {
            frames,
            loop_count,
            current,
            position: 0,
            state: PlaybackState::Stopped,
            session: None,
            generation: 0,
            elapsed_in_frame: Duration::ZERO,
            plays_completed: 0,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Arc<dyn FrameObserver>) {
        self.observers.push(observer);
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_frame(&self) -> Option<&AnimationFrame> {
        self.current.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current.as_ref().map(|f| f.index)
    }

    /// The static frame shown while stopped.
    pub fn first_frame(&self) -> Option<&AnimationFrame> {
        self.frames.first()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn loop_count(&self) -> LoopCount {
        self.loop_count
    }

    /// Length of one pass through all frames.
    pub fn total_duration(&self) -> Duration {
        self.frames.iter().map(|f| f.delay).sum()
    }

    /// Handle of the active run, if playing.
    pub fn handle(&self) -> Option<&PlaybackHandle> {
        self.session.as_ref()
    }

    /// Begin playback from the first frame. Returns `None` when already
    /// playing or when there is nothing to play.
    pub fn start(&mut self) -> Option<PlaybackHandle> {
        if self.is_playing() {
            debug!("Playback already running");
            return None;
        }
        if self.frames.is_empty() {
            debug!("No frames to play");
            return None;
        }

        self.generation += 1;
        let handle = PlaybackHandle {
            flag: CancellationFlag::new(),
            generation: self.generation,
        };
        self.session = Some(handle.clone());
        self.state = PlaybackState::Playing;
        self.elapsed_in_frame = Duration::ZERO;
        self.plays_completed = 0;
        self.show_first_frame();
        debug!(generation = self.generation, "Playback started");
        Some(handle)
    }

    /// Stop playback and show the first frame again. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            session.flag.cancel();
            debug!(generation = session.generation, "Playback stopped");
        }
        self.state = PlaybackState::Stopped;
        self.elapsed_in_frame = Duration::ZERO;
        self.plays_completed = 0;
        self.show_first_frame();
    }

    /// Accept a frame from the host's decode callback.
    ///
    /// Returns `false` without touching state when the run behind `handle`
    /// has been stopped. A frame whose index names one of the driver's own
    /// frames also moves the timeline there; other indices leave it alone.
    pub fn on_frame_decoded(&mut self, handle: &PlaybackHandle, frame: AnimationFrame) -> bool {
        if !self.accepts(handle) {
            debug!(generation = handle.generation, "Dropping late frame callback");
            return false;
        }
        if frame.index < self.frames.len() {
            self.position = frame.index;
        }
        self.display(frame);
        true
    }

    /// Move the timeline forward by `elapsed`. Returns `true` when the
    /// displayed frame changed.
    ///
    /// A finite animation stops on its last frame once all plays are done.
    pub fn advance(&mut self, handle: &PlaybackHandle, elapsed: Duration) -> bool {
        if !self.accepts(handle) || self.frames.len() < 2 {
            return false;
        }
        let total = self.total_duration();
        if total.is_zero() {
            return false;
        }

        let start = self.position;
        let mut index = start;
        let mut finished = false;
        self.elapsed_in_frame = self.elapsed_in_frame.saturating_add(elapsed);

        // Whole passes of a looping animation land back on the same frame.
        if self.loop_count == LoopCount::Infinite && self.elapsed_in_frame >= total {
            let rem = self.elapsed_in_frame.as_nanos() % total.as_nanos();
            self.elapsed_in_frame = Duration::from_nanos(u64::try_from(rem).unwrap_or(u64::MAX));
        }

        while self.elapsed_in_frame >= self.frames[index].delay {
            self.elapsed_in_frame -= self.frames[index].delay;
            if index + 1 < self.frames.len() {
                index += 1;
                continue;
            }
            self.plays_completed += 1;
            if let LoopCount::Finite(plays) = self.loop_count {
                if self.plays_completed >= plays {
                    finished = true;
                    break;
                }
            }
            index = 0;
        }

        self.position = index;
        let changed = index != start;
        if changed {
            let frame = self.frames[index].clone();
            self.display(frame);
        }

        if finished {
            debug!(plays = self.plays_completed, "Animation finished");
            if let Some(session) = self.session.take() {
                session.flag.cancel();
            }
            self.state = PlaybackState::Stopped;
            self.elapsed_in_frame = Duration::ZERO;
        }
        changed
    }

    fn accepts(&self, handle: &PlaybackHandle) -> bool {
        self.is_playing()
            && !handle.is_cancelled()
            && self
                .session
                .as_ref()
                .is_some_and(|s| s.generation == handle.generation)
    }

    fn display(&mut self, frame: AnimationFrame) {
        self.current = Some(frame);
        self.notify();
    }

    fn show_first_frame(&mut self) {
        self.position = 0;
        let first = self.frames.first().cloned();
        if self.current != first {
            self.current = first;
            self.notify();
        }
    }

    fn notify(&self) {
        if let Some(frame) = self.current.as_ref() {
            for observer in &self.observers {
                observer.frame_changed(frame);
            }
        }
    }
}

impl Drop for AnimatedImageDriver {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            session.flag.cancel();
        }
    }
}
