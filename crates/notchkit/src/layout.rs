use crate::geometry::StripGeometry;
use crate::style::StripStyle;

/// Last reported strip size and segment count, plus the derived geometry.
#[derive(Debug)]
pub struct LayoutState {
    style: StripStyle,
    geometry: StripGeometry,
}

impl LayoutState {
    pub fn new(style: StripStyle) -> Self {
        let geometry = StripGeometry::unlaid(&style);
        Self { style, geometry }
    }

    /// Degenerate until the first non-empty [`update`](Self::update).
    pub fn current(&self) -> StripGeometry {
        self.geometry
    }

    pub fn style(&self) -> &StripStyle {
        &self.style
    }

    /// Returns whether anything changed. Repeating the same values is a no-op.
    pub fn update(&mut self, width: f64, height: f64, segment_count: usize) -> bool {
        let width = sanitize(width);
        let height = sanitize(height);
        let segment_count = if segment_count == 0 {
            log::warn!("Segment count of zero clamped to one");
            1
        } else {
            segment_count
        };

        let g = &self.geometry;
        if g.width == width && g.height == height && g.segment_count == segment_count {
            return false;
        }
        self.geometry = StripGeometry::new(width, height, segment_count, &self.style);
        true
    }

    pub fn set_style(&mut self, style: StripStyle) -> bool {
        if style == self.style {
            return false;
        }
        let g = self.geometry;
        self.geometry = StripGeometry::new(g.width, g.height, g.segment_count, &style);
        self.style = style;
        true
    }
}

fn sanitize(length: f64) -> f64 {
    if length.is_finite() { length.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlaid_geometry_is_degenerate() {
        let layout = LayoutState::new(StripStyle::default());
        assert!(layout.current().is_degenerate());
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut layout = LayoutState::new(StripStyle::default());
        assert!(layout.update(320.0, 60.0, 4));
        let before = layout.current();
        assert!(!layout.update(320.0, 60.0, 4));
        assert_eq!(layout.current(), before);
        assert!(layout.update(320.0, 60.0, 5));
        assert_eq!(layout.current().segment_count, 5);
    }

    #[test]
    fn test_invalid_input_is_sanitized() {
        let mut layout = LayoutState::new(StripStyle::default());
        assert!(layout.update(f64::NAN, -3.0, 0));
        let g = layout.current();
        assert_eq!((g.width, g.height, g.segment_count), (0.0, 0.0, 1));
        assert!(g.is_degenerate());
    }

    #[test]
    fn test_set_style_reports_changes_only() {
        let mut layout = LayoutState::new(StripStyle::default());
        layout.update(320.0, 60.0, 4);
        assert!(!layout.set_style(StripStyle::default()));
        let style = StripStyle {
            corner_radius: 8.0,
            ..StripStyle::default()
        };
        assert!(layout.set_style(style));
        assert_eq!(layout.current().corner_radius, 8.0);
        assert_eq!(layout.current().width, 320.0);
    }
}
