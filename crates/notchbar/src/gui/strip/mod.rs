pub mod surface;
pub mod view;

pub use surface::{CairoSurface, Frame, LayerState};
pub use view::draw;

use crate::config::{Config, TabConfig};
use notchkit::{Phase, StripStyle, TabStrip};
use std::time::Instant;

pub struct State {
    pub strip: TabStrip,
    pub surface: CairoSurface,
    pub tabs: Vec<TabConfig>,
    size: (f64, f64),
}

impl State {
    pub fn new(config: &Config) -> Self {
        Self {
            strip: TabStrip::new(config.style.clone()),
            surface: CairoSurface::default(),
            tabs: config.tabs.clone(),
            size: (0.0, 0.0),
        }
    }

    pub fn segment_count(&self) -> usize {
        self.tabs.len().max(1)
    }

    pub fn selected(&self) -> usize {
        self.strip.selection().current()
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.strip.phase(), Phase::Transitioning(_)) || self.surface.is_animating()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = (width, height);
        let count = self.segment_count();
        self.strip.on_layout(&mut self.surface, width, height, count);
    }

    /// Returns true when a transition was started.
    pub fn select(&mut self, index: usize) -> bool {
        self.strip
            .on_selection_requested(&mut self.surface, index)
            .is_some()
    }

    /// Moves the selection by `delta` segments, wrapping at either end.
    pub fn step(&mut self, delta: isize) -> bool {
        let count = self.segment_count() as isize;
        let target = (self.selected() as isize + delta).rem_euclid(count);
        self.select(target as usize)
    }

    /// Segment under strip-local `x`, if any.
    pub fn segment_at(&self, x: f64) -> Option<usize> {
        let geometry = self.strip.geometry();
        if geometry.is_degenerate() || !(0.0..=geometry.width).contains(&x) {
            return None;
        }
        // sections span the full width, insets only trim the frame
        let index = (x / geometry.section_width()).floor() as usize;
        Some(index.min(geometry.segment_count - 1))
    }

    /// Advances the surface clock and feeds finished animations back into
    /// the strip. Returns true while a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let tokens = self.surface.tick(now);
        let finished = !tokens.is_empty();
        for token in tokens {
            if let Some(settled) = self.strip.on_animation_complete(&mut self.surface, token) {
                log::debug!("Strip settled on '{}'", self.label(settled.index));
            }
        }
        finished || self.surface.is_animating()
    }

    pub fn apply_config(&mut self, config: &Config) {
        let style: StripStyle = config.style.clone();
        self.tabs = config.tabs.clone();
        self.strip.restyle(&mut self.surface, style);
        let (width, height) = self.size;
        self.resize(width, height);
    }

    fn label(&self, index: usize) -> &str {
        self.tabs.get(index).map(|t| t.label.as_str()).unwrap_or("?")
    }
}
