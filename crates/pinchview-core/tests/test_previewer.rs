mod common;

use std::sync::Arc;
use std::time::Duration;

use approx::assert_relative_eq;
use image::{Rgba, RgbaImage};

use pinchview_core::animation::PlaybackState;
use pinchview_core::config::PreviewConfig;
use pinchview_core::error::PreviewError;
use pinchview_core::geometry::{ContentDescriptor, Size};
use pinchview_core::io::resource::{Bundle, FsLoader, ResourceLoader};
use pinchview_core::previewer::{PreviewSource, Previewer};

use common::*;

const PHONE: Size = Size {
    width: 300.0,
    height: 600.0,
};

#[test]
fn test_image_previewer() {
    let image = RgbaImage::from_pixel(40, 20, Rgba(RED));
    let mut previewer = Previewer::image(image, &PreviewConfig::default()).unwrap();

    assert!(!previewer.is_empty());
    assert!(previewer.animation().is_none());
    assert_eq!(
        previewer.viewport().unwrap().content(),
        &ContentDescriptor::Raster {
            width: 40,
            height: 20
        }
    );
    assert_eq!(previewer.displayed_image().unwrap().dimensions(), (40, 20));

    // Still images have nothing to play.
    assert!(previewer.appear().is_none());
    let layout = previewer.layout(PHONE).unwrap();
    assert_eq!(layout.content_size, Size::new(300.0, 150.0));
}

#[test]
fn test_view_previewer() {
    let previewer = Previewer::view(0.25, &PreviewConfig::default()).unwrap();
    assert!(matches!(previewer.source(), PreviewSource::View));
    assert!(previewer.displayed_image().is_none());
    assert_eq!(previewer.layout(PHONE).unwrap().content_size, Size::new(150.0, 600.0));
}

#[test]
fn test_gif_previewer_lifecycle() {
    let bytes = build_rgb_loop_gif(8, 4);
    let mut previewer = Previewer::gif(&bytes, &PreviewConfig::default()).unwrap();

    let layout = previewer.layout(PHONE).unwrap();
    assert_relative_eq!(layout.fitted_size.height, 150.0);

    let handle = previewer.appear().expect("animation starts on appear");
    let viewport = previewer.viewport_mut().unwrap();
    viewport.double_tap();
    assert_eq!(viewport.zoom().current_scale(), 3.0);

    let driver = previewer.animation_mut().unwrap();
    assert!(driver.advance(&handle, Duration::from_millis(100)));
    assert_eq!(driver.current_index(), Some(1));

    previewer.disappear();
    let driver = previewer.animation().unwrap();
    assert_eq!(driver.state(), PlaybackState::Stopped);
    assert_eq!(driver.current_index(), Some(0));
    assert!(handle.is_cancelled());
    assert_eq!(previewer.viewport().unwrap().zoom().current_scale(), 1.0);
}

#[test]
fn test_malformed_gif_previewer_degrades() {
    let mut previewer = Previewer::gif(b"not a gif", &PreviewConfig::default()).unwrap();

    assert!(!previewer.is_empty());
    assert!(previewer.appear().is_none());
    assert!(previewer.displayed_image().is_none());
    assert_eq!(previewer.animation().unwrap().frame_count(), 0);

    // Falls back to a square box.
    let layout = previewer.layout(PHONE).unwrap();
    assert_eq!(layout.content_size, Size::new(300.0, 300.0));
}

#[test]
fn test_named_gif_loaded_from_bundle() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("spin.gif"), build_rgb_loop_gif(4, 4)).unwrap();
    let bundle = Bundle::new(dir.path());

    let previewer =
        Previewer::named_gif(&FsLoader::gif(), "spin", &bundle, &PreviewConfig::default())
            .unwrap();
    assert_eq!(previewer.animation().unwrap().frame_count(), 3);
}

#[test]
fn test_missing_named_gif_gives_empty_previewer() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = Bundle::new(dir.path());

    let mut previewer =
        Previewer::named_gif(&FsLoader::gif(), "absent", &bundle, &PreviewConfig::default())
            .unwrap();
    assert!(previewer.is_empty());
    assert!(previewer.layout(PHONE).is_none());
    assert!(previewer.appear().is_none());
    previewer.disappear();
}

#[test]
fn test_loader_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = Bundle::new(dir.path());
    let err = FsLoader::gif().load_bytes("absent", &bundle).unwrap_err();

    match err {
        PreviewError::ResourceNotFound { name, location } => {
            assert_eq!(name, "absent.gif");
            assert_eq!(location, dir.path().display().to_string());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_previewer_haptics_forwarded() {
    let haptics = Arc::new(RecordingHaptics::default());
    let mut previewer = Previewer::view(1.0, &PreviewConfig::default())
        .unwrap()
        .with_haptics(haptics.clone());

    previewer.viewport_mut().unwrap().pinch_ended(100.0);
    assert_eq!(haptics.impacts().len(), 1);
}
