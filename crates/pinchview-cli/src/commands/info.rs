use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pinchview_core::animation::AnimatedImageDriver;
use pinchview_core::config::AnimationConfig;
use pinchview_core::io::decode::{image_dimensions, image_format, is_gif};
use pinchview_core::io::gif_probe::probe_gif;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image or GIF file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let (width, height) = image_dimensions(&bytes)?;
    let format = image_format(&bytes)
        .map(|f| format!("{f:?}"))
        .unwrap_or_else(|| "unknown".into());

    println!("File:          {}", args.file.display());
    println!("Format:        {}", format);
    println!("Dimensions:    {}x{}", width, height);
    if height > 0 {
        println!("Aspect ratio:  {:.4}", width as f64 / height as f64);
    }

    if is_gif(&bytes) {
        let probe = probe_gif(&bytes)?;
        let driver = AnimatedImageDriver::new(Some(&bytes), &AnimationConfig::default());

        println!("Frames:        {}", probe.frame_count);
        println!("Loops:         {}", probe.loop_count);
        println!("Duration:      {} ms", driver.total_duration().as_millis());
        if probe.truncated {
            println!("Warning:       block stream is truncated");
        }
        if driver.frame_count() != probe.frame_count {
            println!(
                "Decoded:       {} of {} frames",
                driver.frame_count(),
                probe.frame_count
            );
        }
    }

    let size_kb = bytes.len() as f64 / 1024.0;
    println!("File size:     {:.1} KB", size_kb);

    Ok(())
}
