pub mod config;
pub mod fit;
pub mod info;
pub mod play;
pub mod zoom;

use std::path::Path;

use anyhow::{bail, Context, Result};
use pinchview_core::config::PreviewConfig;
use pinchview_core::geometry::Size;
use tracing::debug;

/// Parse a `WIDTHxHEIGHT` viewport argument.
pub fn parse_viewport(s: &str) -> std::result::Result<Size, String> {
    let (w, h) = s
        .split_once(|c: char| c == 'x' || c == 'X')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width: f64 = w.trim().parse().map_err(|_| format!("invalid width '{w}'"))?;
    let height: f64 = h.trim().parse().map_err(|_| format!("invalid height '{h}'"))?;
    Ok(Size::new(width, height))
}

/// Load a TOML preview config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<PreviewConfig> {
    let Some(path) = path else {
        return Ok(PreviewConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: PreviewConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    if let Err(e) = config.validate() {
        bail!("{}: {e}", path.display());
    }
    debug!(path = %path.display(), "Loaded preview config");
    Ok(config)
}
