use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use pinchview_core::geometry::{fit_content, ContentDescriptor, Size};
use pinchview_core::io::decode::image_dimensions;

use super::parse_viewport;

#[derive(Args)]
pub struct FitArgs {
    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Size,

    /// Content aspect ratio (width / height)
    #[arg(long, conflicts_with = "image", required_unless_present = "image")]
    pub ratio: Option<f64>,

    /// Read the aspect ratio from an image file
    #[arg(long)]
    pub image: Option<PathBuf>,
}

pub fn run(args: &FitArgs) -> Result<()> {
    let content = match (&args.image, args.ratio) {
        (Some(path), _) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let (width, height) = image_dimensions(&bytes)?;
            ContentDescriptor::Raster { width, height }
        }
        (None, Some(ratio)) => ContentDescriptor::AspectRatio(ratio),
        (None, None) => bail!("Either --ratio or --image is required"),
    };

    let fitted = fit_content(&content, args.viewport)?;
    println!("Viewport:  {}x{}", args.viewport.width, args.viewport.height);
    println!("Ratio:     {:.4}", content.aspect_ratio()?);
    println!("Fitted:    {:.2}x{:.2}", fitted.width, fitted.height);
    Ok(())
}
