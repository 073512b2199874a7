//! The capability the strip drives: a retained set of layers that can draw a
//! path, take a property value immediately, or animate it over time.

use crate::geometry::{NotchPath, Point, QuadCurve};
use crate::orchestrator::CompletionToken;
use crate::timing::{Keyframes, TimingFunction};
use derive_more::Display;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum LayerRef {
    #[display("outline")]
    Outline,
    #[display("indicator")]
    Indicator,
    #[display("icon[{_0}]")]
    Icon(usize),
}

/// Animatable properties, keyed the way layer-based surfaces name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString, IntoStaticStr)]
pub enum AnimatedProperty {
    #[strum(serialize = "path")]
    Path,
    #[strum(serialize = "position")]
    Position,
    #[strum(serialize = "transform.scale")]
    Scale,
    #[strum(serialize = "transform.translation.y")]
    TranslationY,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Point(Point),
    Scalar(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Animation {
    /// Morph the layer path from its current value to this one.
    Morph(NotchPath),
    /// Move the layer position along the curve.
    FollowCurve(QuadCurve),
    /// Scalar keyframes, evenly spaced over the duration.
    Keyframes(Keyframes),
    /// Scalar from the current value to this one.
    Tween(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationRequest {
    pub layer: LayerRef,
    pub property: AnimatedProperty,
    pub animation: Animation,
    pub duration: Duration,
    pub timing: TimingFunction,
    /// Keep the final value once finished instead of reverting.
    pub hold_final: bool,
    /// Handed back to the strip when the animation finishes. `None` for
    /// fire-and-forget requests.
    pub completion: Option<CompletionToken>,
}

impl AnimationRequest {
    pub fn new(
        layer: LayerRef,
        property: AnimatedProperty,
        animation: Animation,
        duration: Duration,
    ) -> Self {
        Self {
            layer,
            property,
            animation,
            duration,
            timing: TimingFunction::Linear,
            hold_final: false,
            completion: None,
        }
    }

    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    pub fn hold_final(mut self) -> Self {
        self.hold_final = true;
        self
    }

    pub fn on_complete(mut self, token: CompletionToken) -> Self {
        self.completion = Some(token);
        self
    }
}

/// Rendering surface contract.
///
/// Completion is reported by the host calling
/// [`TabStrip::on_animation_complete`](crate::strip::TabStrip::on_animation_complete)
/// with the request's token. Cancelling must be synchronous and leave the
/// property at its last set value; a cancelled request never reports
/// completion.
pub trait RenderSurface {
    fn draw_path(&mut self, layer: LayerRef, path: &NotchPath);
    fn set_property(&mut self, layer: LayerRef, property: AnimatedProperty, value: PropertyValue);
    fn animate_property(&mut self, request: AnimationRequest);
    fn cancel_animation(&mut self, layer: LayerRef, property: AnimatedProperty);
}
