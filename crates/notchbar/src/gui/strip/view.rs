use super::State;
use super::surface::{Frame, LayerState};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use notchkit::geometry::{NotchPath, PathSegment, Winding};
use notchkit::surface::LayerRef;
use palette::Srgba;
use std::time::Instant;

const BORDER_WIDTH: f64 = 1.0;
const GLYPH_SIZE: f64 = 18.0;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Replays `path` onto the current cairo path.
fn trace(cr: &Context, path: &NotchPath) {
    cr.new_path();
    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(p) => cr.move_to(p.x, p.y),
            PathSegment::LineTo(p) => cr.line_to(p.x, p.y),
            // cairo measures angles the same way (y down), so clockwise is
            // its positive direction
            PathSegment::Arc(arc) => match arc.winding {
                Winding::Clockwise => cr.arc(
                    arc.center.x,
                    arc.center.y,
                    arc.radius,
                    arc.start_angle,
                    arc.end_angle,
                ),
                Winding::CounterClockwise => cr.arc_negative(
                    arc.center.x,
                    arc.center.y,
                    arc.radius,
                    arc.start_angle,
                    arc.end_angle,
                ),
            },
            PathSegment::Close => cr.close_path(),
        }
    }
}

fn draw_outline(
    cr: &Context,
    layer: &LayerState,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    if layer.path.is_empty() {
        return Ok(());
    }
    trace(cr, &layer.path);
    set_source(cr, colors.background);
    cr.fill_preserve()?;
    set_source(cr, colors.border);
    cr.set_line_width(BORDER_WIDTH);
    cr.stroke()
}

fn draw_indicator(
    cr: &Context,
    layer: &LayerState,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    if layer.path.is_empty() {
        return Ok(());
    }
    cr.save()?;
    cr.translate(layer.position.x, layer.position.y);
    cr.scale(layer.scale, layer.scale);
    trace(cr, &layer.path);
    set_source(cr, colors.indicator);
    cr.fill()?;
    cr.restore()
}

struct GlyphRenderer<'a> {
    glyph: &'a str,
    layer: &'a LayerState,
    selected: bool,
}

impl<'a> GlyphRenderer<'a> {
    fn new(glyph: &'a str, layer: &'a LayerState, selected: bool) -> Self {
        Self {
            glyph,
            layer,
            selected,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let color = if self.selected {
            colors.selected_glyph
        } else {
            colors.glyph
        };

        cr.save()?;
        cr.translate(
            self.layer.position.x,
            self.layer.position.y + self.layer.translation_y,
        );
        cr.scale(self.layer.scale, self.layer.scale);
        set_source(cr, color);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(GLYPH_SIZE);
        if let Ok(ext) = cr.text_extents(self.glyph) {
            // center on the ink box, not the baseline
            cr.move_to(
                -ext.x_bearing() - ext.width() / 2.0,
                -ext.y_bearing() - ext.height() / 2.0,
            );
            cr.show_text(self.glyph)?;
        }
        cr.restore()
    }
}

fn draw_glyphs(
    cr: &Context,
    state: &State,
    frame: &Frame,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let selected = state.selected();
    for (i, tab) in state.tabs.iter().enumerate() {
        if let Some(layer) = frame.get(LayerRef::Icon(i)) {
            GlyphRenderer::new(&tab.glyph(), layer, i == selected).draw(cr, colors)?;
        }
    }
    Ok(())
}

pub fn draw(
    cr: &Context,
    state: &State,
    colors: &ThemeColors,
    now: Instant,
) -> Result<(), cairo::Error> {
    let frame = state.surface.frame(now);

    if let Some(outline) = frame.get(LayerRef::Outline) {
        draw_outline(cr, outline, colors)?;
    }
    if let Some(indicator) = frame.get(LayerRef::Indicator) {
        draw_indicator(cr, indicator, colors)?;
    }
    draw_glyphs(cr, state, &frame, colors)
}
