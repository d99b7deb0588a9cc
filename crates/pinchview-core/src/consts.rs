/// Largest zoom scale a pinch gesture may settle on.
pub const DEFAULT_MAX_SCALE: f64 = 16.0;

/// Scale applied when double-tapping unzoomed content.
pub const DEFAULT_DOUBLE_TAP_SCALE: f64 = 3.0;

/// Smallest steady-state zoom scale (content fits the viewport).
pub const MIN_SCALE: f64 = 1.0;

/// GIF frames with a shorter delay than this are treated as "as fast as
/// possible" and shown for [`DEFAULT_FRAME_DELAY_MS`] instead.
pub const MIN_FRAME_DELAY_MS: u64 = 20;

/// Delay used for frames that declare zero or sub-minimum delay.
pub const DEFAULT_FRAME_DELAY_MS: u64 = 100;

/// File extension appended when looking up a named GIF resource.
pub const GIF_EXTENSION: &str = "gif";
