//! Pacing curves used when sampling an animation.
//!
//! Surfaces evaluate these on their own clock; the orchestrator only picks
//! one per request.

/// Maps linear progress `t` in `[0, 1]` to eased progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimingFunction {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// CSS-style cubic bezier (x1, y1, x2, y2)
    CubicBezier(f64, f64, f64, f64),
}

impl TimingFunction {
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
        }
    }
}

// Newton-Raphson on x(t), assumes x1, x2 in [0, 1]
fn cubic_bezier(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let mut u = t;
    for _ in 0..8 {
        let slope = bezier_slope(u, x1, x2);
        if slope.abs() < 1e-9 {
            break;
        }
        u -= (bezier(u, x1, x2) - t) / slope;
    }
    bezier(u, y1, y2)
}

fn bezier(t: f64, p1: f64, p2: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// Evenly spaced scalar keyframes, sampled with Catmull-Rom interpolation so
/// the curve passes through every value without corners.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Keyframes {
    values: Vec<f64>,
}

impl Keyframes {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn sample(&self, t: f64) -> f64 {
        let n = self.values.len();
        match n {
            0 => 0.0,
            1 => self.values[0],
            _ => {
                let pos = t.clamp(0.0, 1.0) * (n - 1) as f64;
                let i = (pos.floor() as usize).min(n - 2);
                let local = pos - i as f64;

                let p1 = self.values[i];
                let p2 = self.values[i + 1];
                let p0 = if i > 0 { self.values[i - 1] } else { p1 };
                let p3 = self.values.get(i + 2).copied().unwrap_or(p2);
                catmull_rom(p0, p1, p2, p3, local)
            }
        }
    }
}

fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        assert_eq!(TimingFunction::Linear.evaluate(0.0), 0.0);
        assert_eq!(TimingFunction::Linear.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::Linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_easing_shapes() {
        assert!(TimingFunction::EaseIn.evaluate(0.5) < 0.5);
        assert!(TimingFunction::EaseOut.evaluate(0.5) > 0.5);
        assert_eq!(TimingFunction::EaseInOut.evaluate(0.5), 0.5);
        assert_eq!(TimingFunction::EaseInOut.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_cubic_bezier_endpoints() {
        let ease = TimingFunction::CubicBezier(0.25, 0.1, 0.25, 1.0);
        assert!(ease.evaluate(0.0).abs() < 1e-6);
        assert!((ease.evaluate(1.0) - 1.0).abs() < 1e-6);
        assert!(ease.evaluate(0.5) > 0.5);
    }

    #[test]
    fn test_keyframes_pass_through_values() {
        let pulse = Keyframes::new([1.0, 1.4, 0.9, 1.02, 1.0]);
        assert_eq!(pulse.sample(0.0), 1.0);
        assert!((pulse.sample(0.25) - 1.4).abs() < 1e-12);
        assert!((pulse.sample(0.5) - 0.9).abs() < 1e-12);
        assert!((pulse.sample(0.75) - 1.02).abs() < 1e-12);
        assert!((pulse.sample(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_keyframes_degenerate() {
        assert_eq!(Keyframes::default().sample(0.3), 0.0);
        assert_eq!(Keyframes::new([2.0]).sample(0.3), 2.0);
    }
}
