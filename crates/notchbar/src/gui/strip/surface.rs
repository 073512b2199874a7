//! Retained layer store that plays back strip animations on the frame clock.

use notchkit::geometry::{NotchPath, Point};
use notchkit::surface::{
    AnimatedProperty, Animation, AnimationRequest, LayerRef, PropertyValue, RenderSurface,
};
use notchkit::CompletionToken;
use std::collections::HashMap;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub struct LayerState {
    pub path: NotchPath,
    pub position: Point,
    pub scale: f64,
    pub translation_y: f64,
}

impl Default for LayerState {
    fn default() -> Self {
        Self {
            path: NotchPath::default(),
            position: Point::default(),
            scale: 1.0,
            translation_y: 0.0,
        }
    }
}

impl LayerState {
    fn scalar(&self, property: AnimatedProperty) -> Option<f64> {
        match property {
            AnimatedProperty::Scale => Some(self.scale),
            AnimatedProperty::TranslationY => Some(self.translation_y),
            AnimatedProperty::Path | AnimatedProperty::Position => None,
        }
    }

    fn scalar_mut(&mut self, property: AnimatedProperty) -> Option<&mut f64> {
        match property {
            AnimatedProperty::Scale => Some(&mut self.scale),
            AnimatedProperty::TranslationY => Some(&mut self.translation_y),
            AnimatedProperty::Path | AnimatedProperty::Position => None,
        }
    }
}

#[derive(Debug)]
struct Running {
    request: AnimationRequest,
    started: Instant,
    from: LayerState,
}

impl Running {
    fn progress(&self, now: Instant) -> f64 {
        let total = self.request.duration.as_secs_f64();
        if total <= 0.0 {
            return 1.0;
        }
        (now.saturating_duration_since(self.started).as_secs_f64() / total).min(1.0)
    }

    /// Writes the value at linear `progress` into `layer`.
    fn apply(&self, layer: &mut LayerState, progress: f64) {
        let t = self.request.timing.evaluate(progress);
        let property = self.request.property;
        match &self.request.animation {
            Animation::Morph(target) => {
                layer.path = if progress >= 1.0 {
                    target.clone()
                } else {
                    self.from
                        .path
                        .lerp(target, t)
                        .unwrap_or_else(|| target.clone())
                };
            }
            Animation::FollowCurve(curve) => layer.position = curve.point_at(t),
            Animation::Keyframes(frames) => {
                if let Some(value) = layer.scalar_mut(property) {
                    *value = frames.sample(t);
                }
            }
            Animation::Tween(to) => {
                let from = self.from.scalar(property).unwrap_or(*to);
                if let Some(value) = layer.scalar_mut(property) {
                    *value = from + (to - from) * t;
                }
            }
        }
    }
}

/// Layer values as they should appear at one instant.
#[derive(Debug, Default)]
pub struct Frame {
    layers: HashMap<LayerRef, LayerState>,
}

impl Frame {
    pub fn get(&self, layer: LayerRef) -> Option<&LayerState> {
        self.layers.get(&layer)
    }
}

#[derive(Debug, Default)]
pub struct CairoSurface {
    layers: HashMap<LayerRef, LayerState>,
    running: Vec<Running>,
}

impl CairoSurface {
    pub fn is_animating(&self) -> bool {
        !self.running.is_empty()
    }

    /// Retires finished animations and returns their completion tokens.
    pub fn tick(&mut self, now: Instant) -> Vec<CompletionToken> {
        let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.running)
            .into_iter()
            .partition(|r| r.progress(now) >= 1.0);
        self.running = running;

        finished
            .into_iter()
            .filter_map(|r| {
                if r.request.hold_final {
                    r.apply(self.layers.entry(r.request.layer).or_default(), 1.0);
                }
                r.request.completion
            })
            .collect()
    }

    /// Resting values with every running animation sampled at `now`.
    pub fn frame(&self, now: Instant) -> Frame {
        let mut layers = self.layers.clone();
        for r in &self.running {
            r.apply(layers.entry(r.request.layer).or_default(), r.progress(now));
        }
        Frame { layers }
    }
}

impl RenderSurface for CairoSurface {
    fn draw_path(&mut self, layer: LayerRef, path: &NotchPath) {
        self.layers.entry(layer).or_default().path = path.clone();
    }

    fn set_property(&mut self, layer: LayerRef, property: AnimatedProperty, value: PropertyValue) {
        let state = self.layers.entry(layer).or_default();
        match (property, value) {
            (AnimatedProperty::Position, PropertyValue::Point(p)) => state.position = p,
            (property, PropertyValue::Scalar(v)) if state.scalar(property).is_some() => {
                if let Some(slot) = state.scalar_mut(property) {
                    *slot = v;
                }
            }
            (property, value) => {
                log::warn!("Cannot set {} of {} to {:?}", property, layer, value)
            }
        }
    }

    fn animate_property(&mut self, request: AnimationRequest) {
        self.cancel_animation(request.layer, request.property);
        let from = self.layers.get(&request.layer).cloned().unwrap_or_default();
        self.running.push(Running {
            request,
            started: Instant::now(),
            from,
        });
    }

    fn cancel_animation(&mut self, layer: LayerRef, property: AnimatedProperty) {
        self.running
            .retain(|r| !(r.request.layer == layer && r.request.property == property));
    }
}
