use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Args;
use pinchview_core::geometry::{ContentDescriptor, Size};
use pinchview_core::haptics::{HapticsSink, ImpactStrength};
use pinchview_core::viewport::ZoomableViewport;

use super::{load_config, parse_viewport};
use crate::summary::{print_layout_header, print_layout_row, print_zoom_summary};

/// One step of a gesture script.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEvent {
    Pinch(f64),
    End(f64),
    Cancel,
    Tap,
    Show,
    Hide,
}

impl FromStr for GestureEvent {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, value) = match s.split_once(':') {
            Some((name, value)) => (name, Some(value)),
            None => (s, None),
        };
        let factor = || -> std::result::Result<f64, String> {
            value
                .ok_or_else(|| format!("'{name}' needs a factor, e.g. {name}:1.5"))?
                .parse()
                .map_err(|_| format!("invalid factor in '{s}'"))
        };
        match name.trim() {
            "pinch" => Ok(Self::Pinch(factor()?)),
            "end" => Ok(Self::End(factor()?)),
            "cancel" => Ok(Self::Cancel),
            "tap" => Ok(Self::Tap),
            "show" => Ok(Self::Show),
            "hide" => Ok(Self::Hide),
            other => Err(format!("unknown gesture '{other}'")),
        }
    }
}

impl std::fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pinch(factor) => write!(f, "pinch {factor}"),
            Self::End(factor) => write!(f, "end {factor}"),
            Self::Cancel => write!(f, "cancel"),
            Self::Tap => write!(f, "double tap"),
            Self::Show => write!(f, "appear"),
            Self::Hide => write!(f, "disappear"),
        }
    }
}

#[derive(Args)]
pub struct ZoomArgs {
    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Size,

    /// Content aspect ratio (width / height)
    #[arg(long, default_value = "1.0")]
    pub ratio: f64,

    /// TOML preview config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Gesture events: pinch:F, end:F, cancel, tap, show, hide
    #[arg(required = true, value_delimiter = ',')]
    pub events: Vec<GestureEvent>,
}

/// Prints a marker line for every clamp impact.
struct ConsoleHaptics;

impl HapticsSink for ConsoleHaptics {
    fn impact(&self, strength: ImpactStrength) {
        println!("        ~ haptic impact ({strength})");
    }
}

pub fn run(args: &ZoomArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    print_zoom_summary(&config.zoom, args.viewport, args.ratio);

    let mut viewport =
        ZoomableViewport::new(ContentDescriptor::AspectRatio(args.ratio), &config.zoom)?
            .with_haptics(Arc::new(ConsoleHaptics));
    viewport.appear();

    let initial = viewport
        .layout(args.viewport)
        .map_err(|e| anyhow!("Cannot lay out content: {e}"))?;
    print_layout_header();
    print_layout_row("start", &initial, None);

    for event in &args.events {
        let mut signal = None;
        match *event {
            GestureEvent::Pinch(factor) => viewport.pinch_changed(factor),
            GestureEvent::End(factor) => signal = viewport.pinch_ended(factor),
            GestureEvent::Cancel => viewport.pinch_cancelled(),
            GestureEvent::Tap => {
                viewport.double_tap();
            }
            GestureEvent::Show => viewport.appear(),
            GestureEvent::Hide => viewport.disappear(),
        }
        let layout = viewport.layout(args.viewport)?;
        print_layout_row(&event.to_string(), &layout, signal);
    }

    Ok(())
}
