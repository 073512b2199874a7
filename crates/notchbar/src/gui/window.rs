use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, Layer, LayerShell};

pub const WINDOW_CLASS: &str = "notchbar-window";
pub const DRAWING_AREA_CLASS: &str = "notchbar-drawing-area";

/// Anchors the window as a full-width bar along the bottom edge.
pub fn init_layer_shell(window: &gtk::ApplicationWindow, height: u32) {
    let height = i32::try_from(height).unwrap_or(i32::MAX);

    window.init_layer_shell();
    window.set_layer(Layer::Top);
    window.set_namespace(Some("notchbar"));
    window.set_exclusive_zone(height);
    for edge in [Edge::Left, Edge::Right, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    window.set_anchor(Edge::Top, false);
    window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::None);
    window.set_default_size(-1, height);
}

/// Clears the window and drawing area backgrounds so only the outline paints.
pub fn install_transparent_css() {
    let Some(display) = gdk::Display::default() else {
        log::warn!("No display, skipping window CSS");
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_data(&transparent_css());
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn transparent_css() -> String {
    format!(
        ".{WINDOW_CLASS}, .{DRAWING_AREA_CLASS} {{ background: none; background-color: transparent; }}"
    )
}
