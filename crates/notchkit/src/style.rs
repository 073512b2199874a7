use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;
use thiserror::Error;

/// Visual constants of the strip. Everything the kernel and orchestrator
/// would otherwise hardcode lives here so variants are just configuration.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StripStyle {
    pub horizontal_inset: f64,
    /// Room above the frame for the indicator to sit astride the top edge.
    pub top_inset: f64,
    pub bottom_inset: f64,
    pub corner_radius: f64,
    pub indicator_radius: f64,
    /// Travel control point rises by `height * hop_height_factor`.
    pub hop_height_factor: f64,
    /// How far the selected icon floats up.
    pub icon_float_offset: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub morph_duration: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub travel_duration: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub bounce_duration: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub float_duration: Duration,
}

impl Default for StripStyle {
    fn default() -> Self {
        Self {
            horizontal_inset: 0.0,
            top_inset: 24.0,
            bottom_inset: 0.0,
            corner_radius: 16.0,
            indicator_radius: 20.0,
            hop_height_factor: 1.0,
            icon_float_offset: 8.0,
            morph_duration: Duration::from_millis(300),
            travel_duration: Duration::from_millis(200),
            bounce_duration: Duration::from_millis(300),
            float_duration: Duration::from_millis(300),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidLength { field: &'static str, value: f64 },
    #[error("{0} must be longer than zero")]
    ZeroDuration(&'static str),
}

impl StripStyle {
    pub fn validate(&self) -> Result<(), StyleError> {
        let lengths = [
            ("horizontal_inset", self.horizontal_inset),
            ("top_inset", self.top_inset),
            ("bottom_inset", self.bottom_inset),
            ("corner_radius", self.corner_radius),
            ("indicator_radius", self.indicator_radius),
            ("hop_height_factor", self.hop_height_factor),
            ("icon_float_offset", self.icon_float_offset),
        ];
        if let Some((field, value)) = lengths
            .into_iter()
            .find(|(_, v)| !v.is_finite() || *v < 0.0)
        {
            return Err(StyleError::InvalidLength { field, value });
        }

        let durations = [
            ("morph_duration", self.morph_duration),
            ("travel_duration", self.travel_duration),
            ("bounce_duration", self.bounce_duration),
            ("float_duration", self.float_duration),
        ];
        match durations.into_iter().find(|(_, d)| d.is_zero()) {
            Some((field, _)) => Err(StyleError::ZeroDuration(field)),
            None => Ok(()),
        }
    }

    /// Returns `self` when valid, the defaults otherwise.
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Invalid strip style, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
