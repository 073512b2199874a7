//! Runs one [`TransitionPlan`] at a time against a [`RenderSurface`].
//!
//! Each submitted plan gets a fresh [`PlanId`]; completion tokens carry it so
//! that a callback from a superseded plan can be recognised and dropped.

use crate::planner::TransitionPlan;
use crate::style::StripStyle;
use crate::surface::{AnimatedProperty, Animation, AnimationRequest, LayerRef, RenderSurface};
use crate::timing::{Keyframes, TimingFunction};
use derive_more::{Display, From, Into};
use strum::Display as StrumDisplay;

pub const BOUNCE_KEYFRAMES: [f64; 5] = [1.0, 1.4, 0.9, 1.02, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
pub struct PlanId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum Directive {
    NotchMorph,
    IndicatorTravel,
    Bounce,
    IconFloatOut,
    IconFloatIn,
}

impl Directive {
    /// Gating directives must all report before a plan settles.
    pub fn is_gating(self) -> bool {
        !matches!(self, Self::Bounce)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletionToken {
    pub plan: PlanId,
    pub directive: Directive,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Token belongs to a plan that is no longer in flight.
    Stale,
    /// Plan still waits on this many gating directives.
    Pending(usize),
    /// Last gating directive reported; the plan is done.
    Settled(TransitionPlan),
}

#[derive(Debug)]
struct InFlight {
    id: PlanId,
    plan: TransitionPlan,
    pending: Vec<Directive>,
    touched: Vec<(LayerRef, AnimatedProperty)>,
}

#[derive(Debug, Default)]
pub struct Orchestrator {
    last_id: u64,
    in_flight: Option<InFlight>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> Option<PlanId> {
        self.in_flight.as_ref().map(|f| f.id)
    }

    pub fn in_flight_plan(&self) -> Option<&TransitionPlan> {
        self.in_flight.as_ref().map(|f| &f.plan)
    }

    /// Cancels whatever is in flight, then issues every request of `plan`.
    pub fn submit<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        plan: TransitionPlan,
        style: &StripStyle,
    ) -> PlanId {
        self.cancel(surface);

        self.last_id += 1;
        let id = PlanId(self.last_id);

        let requests = requests_for(&plan, id, style);
        let pending = requests
            .iter()
            .filter_map(|r| r.completion.map(|t| t.directive))
            .filter(|d| d.is_gating())
            .collect();
        let touched = requests.iter().map(|r| (r.layer, r.property)).collect();

        log::debug!(
            "Plan {} submitted: {:?} -> {} ({} requests)",
            id,
            plan.from,
            plan.to,
            requests.len()
        );
        for request in requests {
            surface.animate_property(request);
        }

        self.in_flight = Some(InFlight {
            id,
            plan,
            pending,
            touched,
        });
        id
    }

    /// Synchronously cancels every request of the in-flight plan.
    pub fn cancel<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> Option<TransitionPlan> {
        let in_flight = self.in_flight.take()?;
        for (layer, property) in &in_flight.touched {
            surface.cancel_animation(*layer, *property);
        }
        log::debug!("Plan {} cancelled", in_flight.id);
        Some(in_flight.plan)
    }

    pub fn complete(&mut self, token: CompletionToken) -> Completion {
        let Some(in_flight) = self.in_flight.as_mut().filter(|f| f.id == token.plan) else {
            log::debug!(
                "Discarding stale completion of {} from plan {}",
                token.directive,
                token.plan
            );
            return Completion::Stale;
        };

        in_flight.pending.retain(|d| *d != token.directive);
        if !in_flight.pending.is_empty() {
            return Completion::Pending(in_flight.pending.len());
        }

        match self.in_flight.take() {
            Some(done) => Completion::Settled(done.plan),
            None => Completion::Stale,
        }
    }
}

/// One request per directive of `plan`, in submission order.
fn requests_for(plan: &TransitionPlan, id: PlanId, style: &StripStyle) -> Vec<AnimationRequest> {
    let token = |directive| CompletionToken {
        plan: id,
        directive,
    };
    let mut requests = vec![
        AnimationRequest::new(
            LayerRef::Outline,
            AnimatedProperty::Path,
            Animation::Morph(plan.notch_morph.clone()),
            style.morph_duration,
        )
        .hold_final()
        .on_complete(token(Directive::NotchMorph)),
    ];

    if let Some(curve) = plan.indicator_travel {
        requests.push(
            AnimationRequest::new(
                LayerRef::Indicator,
                AnimatedProperty::Position,
                Animation::FollowCurve(curve),
                style.travel_duration,
            )
            .hold_final()
            .on_complete(token(Directive::IndicatorTravel)),
        );
    }

    requests.push(
        AnimationRequest::new(
            plan.bounce_target,
            AnimatedProperty::Scale,
            Animation::Keyframes(Keyframes::new(BOUNCE_KEYFRAMES)),
            style.bounce_duration,
        )
        .timing(TimingFunction::EaseInOut),
    );

    if let Some(from) = plan.icon_float.from {
        requests.push(
            AnimationRequest::new(
                from,
                AnimatedProperty::TranslationY,
                Animation::Tween(0.0),
                style.float_duration,
            )
            .hold_final()
            .on_complete(token(Directive::IconFloatOut)),
        );
    }
    for &icon in &plan.icon_float.stranded {
        requests.push(
            AnimationRequest::new(
                icon,
                AnimatedProperty::TranslationY,
                Animation::Tween(0.0),
                style.float_duration,
            )
            .hold_final(),
        );
    }
    requests.push(
        AnimationRequest::new(
            plan.icon_float.to,
            AnimatedProperty::TranslationY,
            Animation::Tween(-style.icon_float_offset),
            style.float_duration,
        )
        .hold_final()
        .on_complete(token(Directive::IconFloatIn)),
    );

    requests
}
