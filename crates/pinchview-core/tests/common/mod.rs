#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageFormat, Rgba, RgbaImage};

use pinchview_core::animation::FrameObserver;
use pinchview_core::frame::AnimationFrame;
use pinchview_core::haptics::{HapticsSink, ImpactStrength};

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const GREEN: [u8; 4] = [0, 255, 0, 255];
pub const BLUE: [u8; 4] = [0, 0, 255, 255];

/// Encode a GIF with one solid-color frame per entry in `colors`.
pub fn build_gif(
    width: u32,
    height: u32,
    colors: &[[u8; 4]],
    delay_ms: u32,
    repeat: Option<Repeat>,
) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        if let Some(repeat) = repeat {
            encoder.set_repeat(repeat).expect("set repeat");
        }
        let frames = colors.iter().map(|color| {
            Frame::from_parts(
                RgbaImage::from_pixel(width, height, Rgba(*color)),
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms, 1),
            )
        });
        encoder.encode_frames(frames).expect("encode frames");
    }
    buf
}

/// Looping three-frame GIF (red, green, blue) at 100 ms per frame.
pub fn build_rgb_loop_gif(width: u32, height: u32) -> Vec<u8> {
    build_gif(width, height, &[RED, GREEN, BLUE], 100, Some(Repeat::Infinite))
}

pub fn build_png(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    RgbaImage::from_pixel(width, height, Rgba(RED))
        .write_to(&mut buf, ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

pub fn solid_frame(color: [u8; 4], delay_ms: u64) -> AnimationFrame {
    AnimationFrame::new(
        RgbaImage::from_pixel(2, 2, Rgba(color)),
        std::time::Duration::from_millis(delay_ms),
        0,
    )
}

#[derive(Default)]
pub struct CountingObserver {
    pub calls: AtomicUsize,
}

impl CountingObserver {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FrameObserver for CountingObserver {
    fn frame_changed(&self, _frame: &AnimationFrame) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingHaptics {
    pub impacts: Mutex<Vec<ImpactStrength>>,
}

impl RecordingHaptics {
    pub fn impacts(&self) -> Vec<ImpactStrength> {
        self.impacts.lock().unwrap().clone()
    }
}

impl HapticsSink for RecordingHaptics {
    fn impact(&self, strength: ImpactStrength) {
        self.impacts.lock().unwrap().push(strength);
    }
}
