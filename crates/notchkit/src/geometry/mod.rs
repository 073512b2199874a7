pub mod kernel;
pub mod path;

pub use kernel::{
    DipMetrics, icon_rest_position, indicator_hop, indicator_rest_position, indicator_shape,
    indicator_travel_curve, notch_path,
};
pub use path::{Arc, NotchPath, PathSegment, QuadCurve, Winding};

use crate::style::StripStyle;

/// Strip-local point. Origin is the top-left corner, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, other: Point, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Strip dimensions plus the visual constants of the rounded frame.
///
/// A geometry with no area (before the first layout, or with insets eating
/// the whole box) is *degenerate*: every kernel query on it returns an empty
/// or zero result instead of failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripGeometry {
    pub width: f64,
    pub height: f64,
    pub segment_count: usize,
    pub horizontal_inset: f64,
    pub top_inset: f64,
    pub bottom_inset: f64,
    pub corner_radius: f64,
    pub indicator_radius: f64,
    pub hop_height_factor: f64,
}

impl StripGeometry {
    pub fn new(width: f64, height: f64, segment_count: usize, style: &StripStyle) -> Self {
        Self {
            width,
            height,
            segment_count: segment_count.max(1),
            horizontal_inset: style.horizontal_inset,
            top_inset: style.top_inset,
            bottom_inset: style.bottom_inset,
            corner_radius: style.corner_radius,
            indicator_radius: style.indicator_radius,
            hop_height_factor: style.hop_height_factor,
        }
    }

    /// Zero-sized geometry used before the host has reported a size.
    pub fn unlaid(style: &StripStyle) -> Self {
        Self::new(0.0, 0.0, 1, style)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0
            || self.height <= 0.0
            || self.frame_width() <= 0.0
            || self.frame_height() <= 0.0
    }

    pub fn section_width(&self) -> f64 {
        self.width.max(0.0) / self.segment_count.max(1) as f64
    }

    pub fn section_start(&self, index: usize) -> f64 {
        index as f64 * self.section_width()
    }

    pub fn section_center(&self, index: usize) -> f64 {
        self.section_start(index) + self.section_width() * 0.5
    }

    pub fn frame_left(&self) -> f64 {
        self.horizontal_inset
    }

    pub fn frame_right(&self) -> f64 {
        self.width - self.horizontal_inset
    }

    pub fn frame_top(&self) -> f64 {
        self.top_inset
    }

    pub fn frame_bottom(&self) -> f64 {
        self.height - self.bottom_inset
    }

    pub fn frame_width(&self) -> f64 {
        (self.frame_right() - self.frame_left()).max(0.0)
    }

    pub fn frame_height(&self) -> f64 {
        (self.frame_bottom() - self.frame_top()).max(0.0)
    }

    /// Outer corner radius, clamped so opposite corners never cross.
    pub fn outer_corner_radius(&self) -> f64 {
        self.corner_radius
            .min(self.frame_width() / 2.0)
            .min(self.frame_height() / 2.0)
            .max(0.0)
    }
}
