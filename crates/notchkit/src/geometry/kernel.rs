//! Pure functions turning a [`StripGeometry`] and a segment index into
//! outlines, rest positions and travel curves.

use super::path::{Arc, NotchPath, QuadCurve, Winding};
use super::{Point, StripGeometry};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Horizontal placement and radii of the dip under one segment.
///
/// The dip is three tangent arcs: a small arc rolling over the top edge, a
/// wide trough and the mirrored small arc climbing back out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DipMetrics {
    pub center_x: f64,
    pub small_radius: f64,
    pub wide_radius: f64,
}

impl DipMetrics {
    /// Dip sized for the section alone, ignoring the outer corners.
    ///
    /// Narrow sections shrink the small arcs to `section / 8` so that the
    /// trough keeps at least their radius; short frames cap both radii so the
    /// trough never reaches the bottom edge.
    pub fn nominal(geometry: &StripGeometry, index: usize) -> Option<Self> {
        if geometry.is_degenerate() {
            return None;
        }
        let section = geometry.section_width();
        let frame_height = geometry.frame_height();

        let small = (geometry.outer_corner_radius() / 2.0)
            .min(section / 8.0)
            .min(frame_height / 4.0);
        let wide = (section / 2.0 - 3.0 * small).min(frame_height / 2.0 - small);

        Some(Self {
            center_x: geometry.section_center(index),
            small_radius: small,
            wide_radius: wide,
        })
    }

    /// Nominal dip pulled inside the straight part of the top edge.
    ///
    /// Sections whose dip would run into an outer corner get both radii
    /// scaled by the same factor; a center inside the corner collapses the
    /// dip to zero size at the corner boundary, keeping the segment layout of
    /// the outline identical for every index.
    pub fn fitted(geometry: &StripGeometry, index: usize) -> Option<Self> {
        let nominal = Self::nominal(geometry, index)?;
        let corner = geometry.outer_corner_radius();
        let (lo, hi) = (
            geometry.frame_left() + corner,
            geometry.frame_right() - corner,
        );

        let center_x = nominal.center_x.clamp(lo, hi);
        let room = (center_x - lo).min(hi - center_x);
        let span = nominal.half_span();
        let scale = if span > room { room / span } else { 1.0 };

        Some(Self {
            center_x,
            small_radius: nominal.small_radius * scale,
            wide_radius: nominal.wide_radius * scale,
        })
    }

    fn half_span(&self) -> f64 {
        self.small_radius + self.wide_radius
    }

    /// x of the descending small arc's center (where the dip leaves the top edge)
    pub fn entry(&self) -> f64 {
        self.center_x - self.half_span()
    }

    /// x of the ascending small arc's center
    pub fn exit(&self) -> f64 {
        self.center_x + self.half_span()
    }

    /// Distance from the top edge to the bottom of the trough.
    pub fn depth(&self) -> f64 {
        self.small_radius + self.wide_radius
    }
}

/// Closed outline of the rounded frame with a dip under `selected`.
///
/// Degenerate geometry yields an empty path.
pub fn notch_path(geometry: &StripGeometry, selected: usize) -> NotchPath {
    let Some(dip) = DipMetrics::fitted(geometry, selected) else {
        return NotchPath::default();
    };

    let corner = geometry.outer_corner_radius();
    let (left, right) = (geometry.frame_left(), geometry.frame_right());
    let (top, bottom) = (geometry.frame_top(), geometry.frame_bottom());
    let small = dip.small_radius;

    let descent = Arc::new(
        Point::new(dip.entry(), top + small),
        small,
        -FRAC_PI_2,
        0.0,
        Winding::Clockwise,
    );
    let trough = Arc::new(
        Point::new(dip.center_x, top + small),
        dip.wide_radius,
        PI,
        0.0,
        Winding::CounterClockwise,
    );
    let ascent = descent.mirrored(dip.center_x).reversed();

    NotchPath::new()
        .move_to(Point::new(left + corner, top))
        .line_to(Point::new(dip.entry(), top))
        .arc(descent)
        .arc(trough)
        .arc(ascent)
        .line_to(Point::new(right - corner, top))
        .arc(corner_arc(right - corner, top + corner, corner, -FRAC_PI_2))
        .line_to(Point::new(right, bottom - corner))
        .arc(corner_arc(right - corner, bottom - corner, corner, 0.0))
        .line_to(Point::new(left + corner, bottom))
        .arc(corner_arc(left + corner, bottom - corner, corner, FRAC_PI_2))
        .line_to(Point::new(left, top + corner))
        .arc(corner_arc(left + corner, top + corner, corner, PI))
        .close()
}

fn corner_arc(cx: f64, cy: f64, radius: f64, start: f64) -> Arc {
    Arc::new(
        Point::new(cx, cy),
        radius,
        start,
        start + FRAC_PI_2,
        Winding::Clockwise,
    )
}

/// Indicator center when resting on segment `index`.
///
/// Sits on the section center with its bottom touching the nominal trough,
/// so the vertical offset is the same for every segment. Edge sections whose
/// fitted dip collapses into an outer corner still rest the indicator on the
/// section center, which keeps `x` strictly increasing in `index`.
pub fn indicator_rest_position(geometry: &StripGeometry, index: usize) -> Point {
    DipMetrics::nominal(geometry, index)
        .map(|dip| {
            Point::new(
                dip.center_x,
                geometry.frame_top() + dip.depth() - geometry.indicator_radius,
            )
        })
        .unwrap_or_default()
}

/// Hop from one rest position to another, bowed above the strip.
pub fn indicator_travel_curve(geometry: &StripGeometry, from: usize, to: usize) -> QuadCurve {
    indicator_hop(
        geometry,
        indicator_rest_position(geometry, from),
        indicator_rest_position(geometry, to),
    )
}

/// Hop between arbitrary indicator positions. The control point sits midway
/// in x and one strip height (times the hop factor) above the higher end.
pub fn indicator_hop(geometry: &StripGeometry, start: Point, end: Point) -> QuadCurve {
    let control = Point::new(
        (start.x + end.x) / 2.0,
        start.y.min(end.y) - geometry.height * geometry.hop_height_factor,
    );
    QuadCurve::new(start, control, end)
}

/// Icon anchor for segment `index`: section center on the frame's midline.
pub fn icon_rest_position(geometry: &StripGeometry, index: usize) -> Point {
    if geometry.is_degenerate() {
        return Point::default();
    }
    Point::new(
        geometry.section_center(index),
        (geometry.frame_top() + geometry.frame_bottom()) / 2.0,
    )
}

/// Indicator circle in layer-local coordinates (centered on the origin).
pub fn indicator_shape(radius: f64) -> NotchPath {
    let radius = radius.max(0.0);
    NotchPath::new()
        .move_to(Point::new(radius, 0.0))
        .arc(Arc::new(Point::default(), radius, 0.0, TAU, Winding::Clockwise))
        .close()
}
