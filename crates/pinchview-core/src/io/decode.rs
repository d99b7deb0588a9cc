use std::io::Cursor;
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageFormat, ImageReader, RgbaImage};
use tracing::{debug, warn};

use crate::config::AnimationConfig;
use crate::error::{PreviewError, Result};
use crate::frame::{AnimationFrame, CancellationFlag};

/// Decode the first (or only) frame of any supported image format.
pub fn decode_still(bytes: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Read image dimensions from the header without decoding pixels.
pub fn image_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    Ok(reader.into_dimensions()?)
}

pub fn image_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

pub fn is_gif(bytes: &[u8]) -> bool {
    image_format(bytes) == Some(ImageFormat::Gif)
}

/// Decode frames one by one, handing each to `on_frame`.
///
/// Decoding stops early once `cancel` is raised. Non-GIF input yields a
/// single frame. A stream that breaks after at least one good frame keeps
/// the frames decoded so far. Returns the number of frames delivered.
pub fn decode_frames<F>(
    bytes: &[u8],
    config: &AnimationConfig,
    cancel: &CancellationFlag,
    mut on_frame: F,
) -> Result<usize>
where
    F: FnMut(AnimationFrame),
{
    if !is_gif(bytes) {
        let still = decode_still(bytes)?;
        if cancel.is_cancelled() {
            return Ok(0);
        }
        on_frame(AnimationFrame::new(
            still,
            Duration::from_millis(config.default_frame_delay_ms),
            0,
        ));
        return Ok(1);
    }

    let decoder = GifDecoder::new(Cursor::new(bytes))?;
    let mut delivered = 0;

    for result in decoder.into_frames() {
        if cancel.is_cancelled() {
            debug!(delivered, "Frame decoding cancelled");
            break;
        }
        let frame = match result {
            Ok(frame) => frame,
            Err(e) if delivered > 0 => {
                warn!(delivered, error = %e, "GIF stream broken, keeping decoded frames");
                break;
            }
            Err(e) => return Err(e.into()),
        };

        let (numer, denom) = frame.delay().numer_denom_ms();
        let declared = if denom == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(u64::from(numer) / u64::from(denom))
        };
        let delay = config.effective_delay(declared);

        on_frame(AnimationFrame::new(frame.into_buffer(), delay, delivered));
        delivered += 1;
    }

    if delivered == 0 && !cancel.is_cancelled() {
        return Err(PreviewError::Decode("GIF contains no frames".into()));
    }
    Ok(delivered)
}

/// Decode a whole animation into memory.
pub fn decode_animation(bytes: &[u8], config: &AnimationConfig) -> Result<Vec<AnimationFrame>> {
    let mut frames = Vec::new();
    decode_frames(bytes, config, &CancellationFlag::new(), |frame| {
        frames.push(frame)
    })?;
    Ok(frames)
}
