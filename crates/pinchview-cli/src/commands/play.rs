use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use pinchview_core::animation::{AnimatedImageDriver, FrameObserver};
use pinchview_core::frame::AnimationFrame;

use super::load_config;

#[derive(Args)]
pub struct PlayArgs {
    /// Input GIF file
    pub file: PathBuf,

    /// Simulated wall-clock time to play for
    #[arg(long, default_value = "3000")]
    pub duration_ms: u64,

    /// Frame timer interval
    #[arg(long, default_value = "16")]
    pub tick_ms: u64,

    /// TOML preview config
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Default)]
struct FrameTally {
    changes: AtomicUsize,
    per_frame: std::sync::Mutex<Vec<usize>>,
}

impl FrameObserver for FrameTally {
    fn frame_changed(&self, frame: &AnimationFrame) {
        self.changes.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut counts) = self.per_frame.lock() {
            if counts.len() <= frame.index {
                counts.resize(frame.index + 1, 0);
            }
            counts[frame.index] += 1;
        }
    }
}

pub fn run(args: &PlayArgs) -> Result<()> {
    if args.tick_ms == 0 {
        bail!("--tick-ms must be positive");
    }
    let config = load_config(args.config.as_deref())?;
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let mut driver = AnimatedImageDriver::new(Some(&bytes), &config.animation);
    let tally = Arc::new(FrameTally::default());
    driver.add_observer(tally.clone());

    let Some(handle) = driver.start() else {
        bail!("{} has no playable frames", args.file.display());
    };

    let ticks = args.duration_ms / args.tick_ms;
    let tick = Duration::from_millis(args.tick_ms);

    let pb = ProgressBar::new(ticks);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Playing");

    for i in 0..ticks {
        driver.advance(&handle, tick);
        pb.set_position(i + 1);
        if !driver.is_playing() {
            break;
        }
    }
    let finished = !driver.is_playing();
    pb.finish_with_message(if finished { "Finished" } else { "Stopped" });

    println!();
    println!("Frames:         {}", driver.frame_count());
    println!("Loops:          {}", driver.loop_count());
    println!("One pass:       {} ms", driver.total_duration().as_millis());
    println!("Frame changes:  {}", tally.changes.load(Ordering::Relaxed));
    if finished {
        println!("Animation reached its final frame before the time ran out");
    }
    if let Ok(counts) = tally.per_frame.lock() {
        for (index, count) in counts.iter().enumerate() {
            println!("  frame {:>4}  shown {:>5}x", index, count);
        }
    }

    driver.stop();
    Ok(())
}
