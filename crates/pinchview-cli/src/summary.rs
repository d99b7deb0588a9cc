use console::Style;
use pinchview_core::config::ZoomConfig;
use pinchview_core::geometry::Size;
use pinchview_core::viewport::ContentLayout;
use pinchview_core::zoom::ClampSignal;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    clamp: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            clamp: Style::new().yellow().bold(),
            disabled: Style::new().dim().yellow(),
        }
    }
}

pub fn print_zoom_summary(config: &ZoomConfig, viewport: Size, ratio: f64) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Zoom Session"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(12)));
    println!();
    println!(
        "  {:<20}{}",
        s.label.apply_to("Viewport"),
        s.value
            .apply_to(format!("{}x{}", viewport.width, viewport.height))
    );
    println!(
        "  {:<20}{}",
        s.label.apply_to("Aspect ratio"),
        s.value.apply_to(format!("{ratio:.4}"))
    );
    println!(
        "  {:<20}{}",
        s.label.apply_to("Max scale"),
        s.value.apply_to(config.max_scale)
    );
    println!(
        "  {:<20}{}",
        s.label.apply_to("Double-tap scale"),
        s.value.apply_to(config.double_tap_scale)
    );
    if config.reset_on_disappear {
        println!(
            "  {:<20}{}",
            s.label.apply_to("Reset on hide"),
            s.value.apply_to("yes")
        );
    } else {
        println!(
            "  {:<20}{}",
            s.label.apply_to("Reset on hide"),
            s.disabled.apply_to("no")
        );
    }
    println!();
}

pub fn print_layout_header() {
    let s = Styles::new();
    println!(
        "  {}",
        s.label.apply_to(format!(
            "{:<14} {:>8} {:>20} {:>20}",
            "Event", "Scale", "Content", "Offset"
        ))
    );
    println!("  {}", "-".repeat(65));
}

pub fn print_layout_row(event: &str, layout: &ContentLayout, signal: Option<ClampSignal>) {
    let s = Styles::new();
    let content = format!(
        "{:.1}x{:.1}",
        layout.content_size.width, layout.content_size.height
    );
    let offset = format!("{:.1},{:.1}", layout.offset.width, layout.offset.height);
    let clamp = match signal {
        Some(ClampSignal::Low) => s.clamp.apply_to(" clamped low").to_string(),
        Some(ClampSignal::High) => s.clamp.apply_to(" clamped high").to_string(),
        None => String::new(),
    };
    println!(
        "  {:<14} {:>8.3} {:>20} {:>20}{}",
        event, layout.scale, content, offset, clamp
    );
}
