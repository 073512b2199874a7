use gtk4 as gtk;
use palette::Srgba;
use strum::IntoStaticStr;

/// Colors the strip paints with, each resolved from a named theme color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum ColorRole {
    #[strum(serialize = "theme_base_color")]
    Background,
    #[strum(serialize = "borders")]
    Border,
    #[strum(serialize = "accent_bg_color")]
    Indicator,
    #[strum(serialize = "theme_unfocused_fg_color")]
    Glyph,
    #[strum(serialize = "accent_fg_color")]
    SelectedGlyph,
}

impl ColorRole {
    fn fallback(self) -> Srgba<f64> {
        match self {
            Self::Background => Srgba::new(1.0, 1.0, 1.0, 1.0),
            Self::Border => Srgba::new(0.75, 0.75, 0.75, 1.0),
            Self::Indicator => Srgba::new(0.93, 0.29, 0.55, 1.0),
            Self::Glyph => Srgba::new(0.4, 0.4, 0.4, 0.8),
            Self::SelectedGlyph => Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }

    /// Alpha pinned regardless of the theme.
    fn forced_alpha(self) -> Option<f64> {
        match self {
            Self::Indicator => Some(1.0),
            Self::Glyph => Some(0.8),
            Self::Background | Self::Border | Self::SelectedGlyph => None,
        }
    }

    fn resolve(self, themed: Option<Srgba<f64>>) -> Srgba<f64> {
        let color = themed.unwrap_or_else(|| self.fallback());
        match self.forced_alpha() {
            Some(alpha) => Srgba::new(color.red, color.green, color.blue, alpha),
            None => color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub border: Srgba<f64>,
    pub indicator: Srgba<f64>,
    pub glyph: Srgba<f64>,
    pub selected_glyph: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self::from_lookup(|name| {
            context.lookup_color(name).map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
        })
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<Srgba<f64>>) -> Self {
        let [background, border, indicator, glyph, selected_glyph] = [
            ColorRole::Background,
            ColorRole::Border,
            ColorRole::Indicator,
            ColorRole::Glyph,
            ColorRole::SelectedGlyph,
        ]
        .map(|role| role.resolve(lookup(<&'static str>::from(role))));

        Self {
            background,
            border,
            indicator,
            glyph,
            selected_glyph,
        }
    }
}
