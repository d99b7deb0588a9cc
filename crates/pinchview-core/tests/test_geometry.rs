use approx::assert_relative_eq;

use pinchview_core::error::PreviewError;
use pinchview_core::geometry::{fit, fit_content, ContentDescriptor, Size};

#[test]
fn test_fit_wide_content_in_tall_viewport() {
    let fitted = fit(2.0, Size::new(300.0, 600.0)).unwrap();
    assert_relative_eq!(fitted.width, 300.0);
    assert_relative_eq!(fitted.height, 150.0);
}

#[test]
fn test_fit_tall_content_in_tall_viewport() {
    let fitted = fit(0.25, Size::new(300.0, 600.0)).unwrap();
    assert_relative_eq!(fitted.width, 150.0);
    assert_relative_eq!(fitted.height, 600.0);
}

#[test]
fn test_fit_matching_ratio_fills_viewport() {
    let fitted = fit(0.5, Size::new(300.0, 600.0)).unwrap();
    assert_relative_eq!(fitted.width, 300.0);
    assert_relative_eq!(fitted.height, 600.0);
}

#[test]
fn test_fit_stays_inside_and_touches_an_edge() {
    let ratios = [0.01, 0.1, 0.333, 0.75, 1.0, 1.5, 2.39, 10.0, 250.0];
    let viewports = [
        Size::new(1.0, 1.0),
        Size::new(320.0, 568.0),
        Size::new(1920.0, 1080.0),
        Size::new(0.5, 900.0),
    ];

    for &ratio in &ratios {
        for &viewport in &viewports {
            let fitted = fit(ratio, viewport).unwrap();
            let tol = 1e-9 * viewport.width.max(viewport.height);

            assert!(fitted.width <= viewport.width + tol, "{ratio} in {viewport:?}");
            assert!(fitted.height <= viewport.height + tol, "{ratio} in {viewport:?}");

            let touches_w = (fitted.width - viewport.width).abs() <= tol;
            let touches_h = (fitted.height - viewport.height).abs() <= tol;
            assert!(touches_w || touches_h, "{ratio} in {viewport:?} -> {fitted:?}");

            assert_relative_eq!(fitted.width / fitted.height, ratio, max_relative = 1e-9);
        }
    }
}

#[test]
fn test_fit_rejects_degenerate_viewport() {
    for viewport in [
        Size::new(300.0, 0.0),
        Size::new(0.0, 600.0),
        Size::new(-10.0, 600.0),
        Size::new(f64::NAN, 600.0),
    ] {
        let err = fit(1.0, viewport).unwrap_err();
        assert!(matches!(err, PreviewError::InvalidGeometry(_)), "{viewport:?}");
    }
}

#[test]
fn test_fit_rejects_non_positive_ratio() {
    assert!(matches!(
        fit(0.0, Size::new(300.0, 600.0)),
        Err(PreviewError::InvalidGeometry(_))
    ));
}

#[test]
fn test_raster_and_ratio_agree() {
    let viewport = Size::new(390.0, 844.0);
    let raster = ContentDescriptor::Raster {
        width: 4032,
        height: 3024,
    };
    let ratio = ContentDescriptor::AspectRatio(4032.0 / 3024.0);

    let a = fit_content(&raster, viewport).unwrap();
    let b = fit_content(&ratio, viewport).unwrap();
    assert_relative_eq!(a.width, b.width, max_relative = 1e-12);
    assert_relative_eq!(a.height, b.height, max_relative = 1e-12);
    assert_relative_eq!(a.width, 390.0);
}

#[test]
fn test_raster_upscales_small_image() {
    let raster = ContentDescriptor::Raster {
        width: 10,
        height: 20,
    };
    let fitted = fit_content(&raster, Size::new(300.0, 300.0)).unwrap();
    assert_relative_eq!(fitted.width, 150.0);
    assert_relative_eq!(fitted.height, 300.0);
}

#[test]
fn test_descriptor_aspect_ratio() {
    let raster = ContentDescriptor::Raster {
        width: 200,
        height: 100,
    };
    assert_relative_eq!(raster.aspect_ratio().unwrap(), 2.0);
    assert!(ContentDescriptor::AspectRatio(f64::INFINITY)
        .aspect_ratio()
        .is_err());
}
