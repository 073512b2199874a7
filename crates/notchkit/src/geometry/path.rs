use super::Point;
use std::f64::consts::{PI, TAU};

/// Direction an arc is traversed in.
///
/// `Clockwise` means increasing angle, which is visually clockwise on a
/// surface whose `y` axis points down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Winding {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Winding {
    pub fn flipped(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub winding: Winding,
}

impl Arc {
    pub fn new(
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        winding: Winding,
    ) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            winding,
        }
    }

    pub fn point_at_angle(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at_angle(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at_angle(self.end_angle)
    }

    /// Signed angular travel: positive when clockwise, negative otherwise.
    /// Follows the usual surface rule of wrapping the end angle by a full
    /// turn until it lies on the winding side of the start angle.
    pub fn sweep(&self) -> f64 {
        let raw = self.end_angle - self.start_angle;
        match self.winding {
            Winding::Clockwise if raw >= 0.0 => raw,
            Winding::Clockwise => raw.rem_euclid(TAU),
            Winding::CounterClockwise if raw <= 0.0 => raw,
            Winding::CounterClockwise => -(-raw).rem_euclid(TAU),
        }
    }

    /// Unit tangent at the start, pointing along the direction of travel.
    pub fn start_tangent(&self) -> Point {
        self.tangent_at(self.start_angle)
    }

    /// Unit tangent at the end, pointing along the direction of travel.
    pub fn end_tangent(&self) -> Point {
        self.tangent_at(self.end_angle)
    }

    fn tangent_at(&self, angle: f64) -> Point {
        match self.winding {
            Winding::Clockwise => Point::new(-angle.sin(), angle.cos()),
            Winding::CounterClockwise => Point::new(angle.sin(), -angle.cos()),
        }
    }

    fn covers_angle(&self, angle: f64) -> bool {
        let sweep = self.sweep();
        if sweep >= 0.0 {
            (angle - self.start_angle).rem_euclid(TAU) <= sweep
        } else {
            (self.start_angle - angle).rem_euclid(TAU) <= -sweep
        }
    }

    /// Horizontal range actually swept by the arc, as `(min_x, max_x)`.
    pub fn x_extent(&self) -> (f64, f64) {
        let (start, end) = (self.start_point().x, self.end_point().x);
        let (mut min, mut max) = (start.min(end), start.max(end));
        if self.covers_angle(0.0) {
            max = max.max(self.center.x + self.radius);
        }
        if self.covers_angle(PI) {
            min = min.min(self.center.x - self.radius);
        }
        (min, max)
    }

    /// Reflection across the vertical line `x = axis_x`. The reflected arc
    /// keeps its radius, has its center x-offset mirrored and winds the
    /// other way.
    pub fn mirrored(&self, axis_x: f64) -> Self {
        Self {
            center: Point::new(2.0 * axis_x - self.center.x, self.center.y),
            radius: self.radius,
            start_angle: PI - self.start_angle,
            end_angle: PI - self.end_angle,
            winding: self.winding.flipped(),
        }
    }

    /// Same curve traversed from end to start.
    pub fn reversed(&self) -> Self {
        Self {
            start_angle: self.end_angle,
            end_angle: self.start_angle,
            winding: self.winding.flipped(),
            ..*self
        }
    }

    pub fn lerp(&self, other: &Arc, t: f64) -> Option<Self> {
        (self.winding == other.winding).then(|| Self {
            center: self.center.lerp(other.center, t),
            radius: lerp(self.radius, other.radius, t),
            start_angle: lerp(self.start_angle, other.start_angle, t),
            end_angle: lerp(self.end_angle, other.end_angle, t),
            winding: self.winding,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    Arc(Arc),
    Close,
}

impl PathSegment {
    fn lerp(&self, other: &PathSegment, t: f64) -> Option<Self> {
        match (self, other) {
            (Self::MoveTo(a), Self::MoveTo(b)) => Some(Self::MoveTo(a.lerp(*b, t))),
            (Self::LineTo(a), Self::LineTo(b)) => Some(Self::LineTo(a.lerp(*b, t))),
            (Self::Arc(a), Self::Arc(b)) => a.lerp(b, t).map(Self::Arc),
            (Self::Close, Self::Close) => Some(Self::Close),
            _ => None,
        }
    }
}

/// Immutable vector outline. Built once per index and replaced wholesale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NotchPath {
    segments: Vec<PathSegment>,
}

impl NotchPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, point: Point) -> Self {
        self.segments.push(PathSegment::MoveTo(point));
        self
    }

    pub fn line_to(mut self, point: Point) -> Self {
        self.segments.push(PathSegment::LineTo(point));
        self
    }

    pub fn arc(mut self, arc: Arc) -> Self {
        self.segments.push(PathSegment::Arc(arc));
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn arcs(&self) -> impl Iterator<Item = &Arc> {
        self.segments.iter().filter_map(|s| match s {
            PathSegment::Arc(arc) => Some(arc),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.segments.last(), Some(PathSegment::Close))
    }

    /// Element-wise interpolation towards `target`. Only defined when both
    /// paths share the same segment structure; `None` otherwise, in which
    /// case the caller should jump straight to the target.
    pub fn lerp(&self, target: &NotchPath, t: f64) -> Option<NotchPath> {
        if self.segments.len() != target.segments.len() {
            return None;
        }
        self.segments
            .iter()
            .zip(&target.segments)
            .map(|(a, b)| a.lerp(b, t))
            .collect::<Option<Vec<_>>>()
            .map(|segments| NotchPath { segments })
    }
}

/// Single quadratic Bézier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadCurve {
    pub start: Point,
    pub control: Point,
    pub end: Point,
}

impl QuadCurve {
    pub fn new(start: Point, control: Point, end: Point) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    pub fn point_at(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        Point::new(
            mt * mt * self.start.x + 2.0 * mt * t * self.control.x + t * t * self.end.x,
            mt * mt * self.start.y + 2.0 * mt * t * self.control.y + t * t * self.end.y,
        )
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < EPS
    }

    #[test]
    fn test_sweep_wraps_like_surface() {
        let cw = Arc::new(Point::default(), 1.0, -FRAC_PI_2, 0.0, Winding::Clockwise);
        assert!((cw.sweep() - FRAC_PI_2).abs() < EPS);

        let ccw = Arc::new(Point::default(), 1.0, PI, 0.0, Winding::CounterClockwise);
        assert!((ccw.sweep() + PI).abs() < EPS);

        // clockwise arc whose end angle is numerically smaller wraps around
        let wrapped = Arc::new(Point::default(), 1.0, PI, FRAC_PI_2, Winding::Clockwise);
        assert!((wrapped.sweep() - 3.0 * FRAC_PI_2).abs() < EPS);

        let full = Arc::new(Point::default(), 1.0, 0.0, TAU, Winding::Clockwise);
        assert!((full.sweep() - TAU).abs() < EPS);
    }

    #[test]
    fn test_mirrored_arc() {
        let arc = Arc::new(
            Point::new(10.0, 5.0),
            4.0,
            -FRAC_PI_2,
            0.0,
            Winding::Clockwise,
        );
        let mirror = arc.mirrored(20.0);
        assert_eq!(mirror.center, Point::new(30.0, 5.0));
        assert_eq!(mirror.radius, arc.radius);
        assert_eq!(mirror.winding, Winding::CounterClockwise);
        // start point reflects onto start point
        let p = arc.start_point();
        assert!(close(mirror.start_point(), Point::new(40.0 - p.x, p.y)));
        let q = arc.end_point();
        assert!(close(mirror.end_point(), Point::new(40.0 - q.x, q.y)));
    }

    #[test]
    fn test_reversed_arc_swaps_endpoints() {
        let arc = Arc::new(Point::default(), 2.0, 0.0, FRAC_PI_2, Winding::Clockwise);
        let rev = arc.reversed();
        assert!(close(rev.start_point(), arc.end_point()));
        assert!(close(rev.end_point(), arc.start_point()));
        assert!((rev.sweep() + arc.sweep()).abs() < EPS);
    }

    #[test]
    fn test_x_extent_includes_extremes() {
        // lower half circle, left to right through the bottom
        let trough = Arc::new(Point::new(0.0, 0.0), 3.0, PI, 0.0, Winding::CounterClockwise);
        let (min, max) = trough.x_extent();
        assert!((min + 3.0).abs() < EPS);
        assert!((max - 3.0).abs() < EPS);

        let quarter = Arc::new(Point::new(0.0, 0.0), 3.0, -FRAC_PI_2, 0.0, Winding::Clockwise);
        let (min, max) = quarter.x_extent();
        assert!(min.abs() < EPS);
        assert!((max - 3.0).abs() < EPS);
    }

    #[test]
    fn test_path_lerp_requires_same_structure() {
        let a = NotchPath::new()
            .move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(10.0, 0.0))
            .close();
        let b = NotchPath::new()
            .move_to(Point::new(0.0, 10.0))
            .line_to(Point::new(20.0, 10.0))
            .close();
        let mid = a.lerp(&b, 0.5).unwrap();
        assert_eq!(mid.segments()[1], PathSegment::LineTo(Point::new(15.0, 5.0)));
        assert_eq!(a.lerp(&b, 1.0).unwrap(), b);

        let c = NotchPath::new().move_to(Point::new(0.0, 0.0)).close();
        assert!(a.lerp(&c, 0.5).is_none());
        assert!(NotchPath::new().lerp(&a, 0.5).is_none());
    }

    #[test]
    fn test_quad_curve_endpoints() {
        let curve = QuadCurve::new(
            Point::new(0.0, 10.0),
            Point::new(50.0, -50.0),
            Point::new(100.0, 10.0),
        );
        assert_eq!(curve.point_at(0.0), curve.start);
        assert_eq!(curve.point_at(1.0), curve.end);
        let apex = curve.point_at(0.5);
        assert_eq!(apex.x, 50.0);
        assert!(apex.y < curve.start.y);
    }
}
