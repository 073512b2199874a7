//! The widget core: owns layout, selection and resting geometry, and turns
//! host events into render commands.

use crate::geometry::{
    NotchPath, Point, StripGeometry, icon_rest_position, indicator_rest_position,
    indicator_shape, notch_path,
};
use crate::layout::LayoutState;
use crate::orchestrator::{Completion, CompletionToken, Directive, Orchestrator, PlanId};
use crate::planner::{Decision, Phase, Planner, TransitionPlan};
use crate::selection::SelectionState;
use crate::style::StripStyle;
use crate::surface::{AnimatedProperty, LayerRef, PropertyValue, RenderSurface};
use std::collections::BTreeSet;

/// Values in effect while nothing is animating. Only replaced when a plan
/// settles or the layout changes.
#[derive(Debug, Clone, PartialEq)]
pub struct RestingState {
    pub index: usize,
    pub outline: NotchPath,
    pub indicator: Point,
}

/// A transition finished and the strip is idle on `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub index: usize,
}

/// Hold-final values the surface has already landed. Each gating animation
/// commits on its own, ahead of the plan settling.
#[derive(Debug, Clone, Default)]
struct Landed {
    indicator: Point,
    raised: BTreeSet<usize>,
}

impl Landed {
    fn at_rest(indicator: Point, index: usize) -> Self {
        Self {
            indicator,
            raised: BTreeSet::from([index]),
        }
    }

    fn record(&mut self, plan: &TransitionPlan, directive: Directive) {
        match directive {
            Directive::IndicatorTravel => {
                if let Some(curve) = plan.indicator_travel {
                    self.indicator = curve.end;
                }
            }
            Directive::IconFloatIn => {
                self.raised.insert(plan.to);
            }
            Directive::IconFloatOut => {
                if let Some(LayerRef::Icon(i)) = plan.icon_float.from {
                    self.raised.remove(&i);
                }
            }
            Directive::NotchMorph | Directive::Bounce => {}
        }
    }
}

#[derive(Debug)]
pub struct TabStrip {
    layout: LayoutState,
    selection: SelectionState,
    planner: Planner,
    orchestrator: Orchestrator,
    resting: Option<RestingState>,
    landed: Landed,
}

impl TabStrip {
    pub fn new(style: StripStyle) -> Self {
        Self {
            layout: LayoutState::new(style.or_default()),
            selection: SelectionState::default(),
            planner: Planner::default(),
            orchestrator: Orchestrator::new(),
            resting: None,
            landed: Landed::default(),
        }
    }

    pub fn geometry(&self) -> StripGeometry {
        self.layout.current()
    }

    pub fn style(&self) -> &StripStyle {
        self.layout.style()
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn resting(&self) -> Option<&RestingState> {
        self.resting.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.planner.phase()
    }

    pub fn on_layout<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        width: f64,
        height: f64,
        segment_count: usize,
    ) {
        if self.layout.update(width, height, segment_count) {
            self.relayout(surface);
        }
    }

    pub fn restyle<S: RenderSurface + ?Sized>(&mut self, surface: &mut S, style: StripStyle) {
        if self.layout.set_style(style.or_default()) {
            self.relayout(surface);
        }
    }

    /// Starts (or supersedes) a transition to `index`. Out-of-range indices
    /// and the current index are ignored.
    pub fn on_selection_requested<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        index: usize,
    ) -> Option<PlanId> {
        let geometry = self.layout.current();
        if index >= geometry.segment_count {
            log::debug!(
                "Ignoring selection of segment {} (have {})",
                index,
                geometry.segment_count
            );
            return None;
        }

        let resting = self.resting.as_ref().map(|r| r.index);
        let plan = match self
            .planner
            .decide(&geometry, self.selection.current(), resting, index)
        {
            Decision::Ignore => return None,
            Decision::Start(plan) => plan,
            Decision::Supersede { superseded, plan } => {
                log::debug!("Selection of {} supersedes plan {}", index, superseded);
                plan
            }
        };
        self.selection.select(index);

        if geometry.is_degenerate() {
            // nothing visible to animate yet
            self.orchestrator.cancel(surface);
            self.planner.reset();
            return None;
        }

        let plan = plan.resume_from(&geometry, self.landed.indicator, &self.landed.raised);
        let id = self.orchestrator.submit(surface, plan, self.layout.style());
        self.planner.begin(id);
        Some(id)
    }

    /// Feeds a finished animation back in. Returns [`Settled`] when this was
    /// the last gating animation of the plan in flight.
    pub fn on_animation_complete<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        token: CompletionToken,
    ) -> Option<Settled> {
        if self.orchestrator.in_flight() == Some(token.plan)
            && let Some(plan) = self.orchestrator.in_flight_plan()
        {
            self.landed.record(plan, token.directive);
        }

        let plan = match self.orchestrator.complete(token) {
            Completion::Settled(plan) => plan,
            Completion::Stale | Completion::Pending(_) => return None,
        };
        if !self.planner.settle(token.plan) {
            log::warn!("Plan {} settled while planner was {:?}", token.plan, self.phase());
            self.planner.reset();
        }

        let geometry = self.layout.current();
        let resting = RestingState {
            index: plan.to,
            outline: plan.notch_morph,
            indicator: indicator_rest_position(&geometry, plan.to),
        };
        surface.draw_path(LayerRef::Outline, &resting.outline);
        surface.set_property(
            LayerRef::Indicator,
            AnimatedProperty::Position,
            PropertyValue::Point(resting.indicator),
        );
        self.landed = Landed::at_rest(resting.indicator, plan.to);
        self.resting = Some(resting);

        log::info!("Settled on segment {}", plan.to);
        Some(Settled { index: plan.to })
    }

    /// Drops any transition and snaps the current selection into place under
    /// the new geometry.
    fn relayout<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(plan) = self.orchestrator.cancel(surface) {
            log::debug!("Layout changed mid-transition to {}, snapping", plan.to);
        }
        self.planner.reset();

        let geometry = self.layout.current();
        self.selection.clamp(geometry.segment_count);

        if geometry.is_degenerate() {
            surface.draw_path(LayerRef::Outline, &NotchPath::default());
            self.resting = None;
            self.landed = Landed::default();
            return;
        }
        self.rest_at(surface, &geometry, self.selection.current());
    }

    fn rest_at<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        geometry: &StripGeometry,
        index: usize,
    ) {
        let style = self.layout.style();
        let resting = RestingState {
            index,
            outline: notch_path(geometry, index),
            indicator: indicator_rest_position(geometry, index),
        };

        surface.draw_path(LayerRef::Outline, &resting.outline);
        surface.draw_path(LayerRef::Indicator, &indicator_shape(style.indicator_radius));
        surface.set_property(
            LayerRef::Indicator,
            AnimatedProperty::Position,
            PropertyValue::Point(resting.indicator),
        );
        for i in 0..geometry.segment_count {
            let icon = LayerRef::Icon(i);
            let lift = if i == index { -style.icon_float_offset } else { 0.0 };
            surface.set_property(
                icon,
                AnimatedProperty::Position,
                PropertyValue::Point(icon_rest_position(geometry, i)),
            );
            surface.set_property(icon, AnimatedProperty::Scale, PropertyValue::Scalar(1.0));
            surface.set_property(icon, AnimatedProperty::TranslationY, PropertyValue::Scalar(lift));
        }

        self.landed = Landed::at_rest(resting.indicator, index);
        self.resting = Some(resting);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::QuadCurve;
    use crate::orchestrator::Directive;
    use crate::surface::Animation;
    use crate::surface::recording::{Call, RecordingSurface};

    fn laid_out() -> (TabStrip, RecordingSurface) {
        let mut strip = TabStrip::new(StripStyle::default());
        let mut surface = RecordingSurface::default();
        strip.on_layout(&mut surface, 320.0, 60.0, 4);
        surface.clear();
        (strip, surface)
    }

    fn settle(strip: &mut TabStrip, surface: &mut RecordingSurface) -> Vec<Settled> {
        surface
            .finish_all()
            .into_iter()
            .filter_map(|token| strip.on_animation_complete(surface, token))
            .collect()
    }

    #[test]
    fn test_layout_establishes_resting_state() {
        let mut strip = TabStrip::new(StripStyle::default());
        let mut surface = RecordingSurface::default();
        assert!(strip.resting().is_none());

        strip.on_layout(&mut surface, 320.0, 60.0, 4);
        let g = strip.geometry();
        let resting = strip.resting().unwrap();
        assert_eq!(resting.index, 0);
        assert_eq!(resting.outline, notch_path(&g, 0));
        assert_eq!(
            surface.calls[0],
            Call::Draw(LayerRef::Outline, notch_path(&g, 0))
        );
        assert!(surface.calls.contains(&Call::Set(
            LayerRef::Icon(0),
            AnimatedProperty::TranslationY,
            PropertyValue::Scalar(-8.0)
        )));

        // same size again: nothing recomputed, nothing drawn
        surface.clear();
        strip.on_layout(&mut surface, 320.0, 60.0, 4);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_reselecting_current_is_noop() {
        let (mut strip, mut surface) = laid_out();
        let before = strip.selection();
        assert_eq!(strip.on_selection_requested(&mut surface, 0), None);
        assert_eq!(strip.selection(), before);
        assert!(surface.calls.is_empty());
        assert_eq!(strip.phase(), Phase::Idle);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let (mut strip, mut surface) = laid_out();
        assert_eq!(strip.on_selection_requested(&mut surface, 4), None);
        assert_eq!(strip.selection().current(), 0);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_end_to_end_zero_to_two() {
        let (mut strip, mut surface) = laid_out();
        let g = strip.geometry();

        let id = strip.on_selection_requested(&mut surface, 2).unwrap();
        assert_eq!(strip.phase(), Phase::Transitioning(id));

        let requests = surface.requests();
        assert_eq!(
            requests[0].animation,
            Animation::Morph(notch_path(&g, 2))
        );
        let Animation::FollowCurve(QuadCurve { start, end, .. }) = requests[1].animation else {
            panic!("expected indicator travel");
        };
        assert_eq!(start.x, g.section_width() * 0.5);
        assert_eq!(end.x, g.section_width() * 2.5);
        assert_eq!(requests[2].layer, LayerRef::Icon(2));
        assert_eq!(requests[2].property, AnimatedProperty::Scale);
        assert_eq!(requests[3].layer, LayerRef::Icon(0));
        assert_eq!(requests[4].layer, LayerRef::Icon(2));

        let settled = settle(&mut strip, &mut surface);
        assert_eq!(settled, vec![Settled { index: 2 }]);
        assert_eq!(strip.phase(), Phase::Idle);
        assert_eq!(strip.selection().previous(), Some(0));
        assert_eq!(strip.selection().current(), 2);
    }

    #[test]
    fn test_resting_outline_matches_kernel_after_settle() {
        let (mut strip, mut surface) = laid_out();
        strip.on_selection_requested(&mut surface, 1);
        strip.on_selection_requested(&mut surface, 3);
        settle(&mut strip, &mut surface);

        let g = strip.geometry();
        let resting = strip.resting().unwrap();
        assert_eq!(resting.index, 3);
        assert_eq!(resting.outline, notch_path(&g, 3));
        assert_eq!(resting.indicator, indicator_rest_position(&g, 3));
    }

    #[test]
    fn test_rapid_selection_settles_once() {
        let (mut strip, mut surface) = laid_out();

        let mut sources = Vec::new();
        for i in 1..=3 {
            strip.on_selection_requested(&mut surface, i).unwrap();
            let travel = surface
                .running()
                .iter()
                .find_map(|r| match r.animation {
                    Animation::FollowCurve(curve) => Some(curve),
                    _ => None,
                })
                .unwrap();
            sources.push(travel.start);
        }
        // every plan starts from the committed resting position, not a
        // cancelled target
        let g = strip.geometry();
        assert!(sources.iter().all(|p| *p == indicator_rest_position(&g, 0)));
        assert_eq!(surface.cancels().len(), 10);

        let settled = settle(&mut strip, &mut surface);
        assert_eq!(settled, vec![Settled { index: 3 }]);
        assert_eq!(strip.selection().current(), 3);
        assert_eq!(strip.selection().previous(), Some(2));
        assert_eq!(strip.resting().unwrap().index, 3);
    }

    fn travel(surface: &RecordingSurface) -> Option<QuadCurve> {
        surface.requests().iter().find_map(|r| match r.animation {
            Animation::FollowCurve(curve) => Some(curve),
            _ => None,
        })
    }

    #[test]
    fn test_superseding_plan_starts_from_landed_indicator() {
        let (mut strip, mut surface) = laid_out();
        let g = strip.geometry();
        strip.on_selection_requested(&mut surface, 1).unwrap();

        // travel and float-in land before the morph does
        for (layer, property) in [
            (LayerRef::Indicator, AnimatedProperty::Position),
            (LayerRef::Icon(1), AnimatedProperty::TranslationY),
        ] {
            let token = surface.finish(layer, property).unwrap();
            assert_eq!(strip.on_animation_complete(&mut surface, token), None);
        }
        surface.clear();

        strip.on_selection_requested(&mut surface, 2).unwrap();
        let hop = travel(&surface).unwrap();
        assert_eq!(hop.start, indicator_rest_position(&g, 1));
        assert_eq!(hop.end, indicator_rest_position(&g, 2));

        // icon 1 was left raised and floats back down
        assert!(surface.requests().iter().any(|r| r.layer == LayerRef::Icon(1)
            && r.animation == Animation::Tween(0.0)
            && r.completion.is_none()));

        let settled = settle(&mut strip, &mut surface);
        assert_eq!(settled, vec![Settled { index: 2 }]);
        assert_eq!(strip.resting().unwrap().indicator, indicator_rest_position(&g, 2));
    }

    #[test]
    fn test_returning_to_resting_segment_hops_back() {
        let (mut strip, mut surface) = laid_out();
        let g = strip.geometry();
        strip.on_selection_requested(&mut surface, 1).unwrap();
        let token = surface
            .finish(LayerRef::Indicator, AnimatedProperty::Position)
            .unwrap();
        strip.on_animation_complete(&mut surface, token);
        surface.clear();

        strip.on_selection_requested(&mut surface, 0).unwrap();
        let hop = travel(&surface).unwrap();
        assert_eq!(hop.start, indicator_rest_position(&g, 1));
        assert_eq!(hop.end, indicator_rest_position(&g, 0));
    }

    #[test]
    fn test_stale_completion_does_not_corrupt_resting_state() {
        let (mut strip, mut surface) = laid_out();
        let first = strip.on_selection_requested(&mut surface, 1).unwrap();
        strip.on_selection_requested(&mut surface, 2).unwrap();

        let stale = CompletionToken {
            plan: first,
            directive: Directive::NotchMorph,
        };
        assert_eq!(strip.on_animation_complete(&mut surface, stale), None);
        assert_eq!(strip.resting().unwrap().index, 0);
        assert!(matches!(strip.phase(), Phase::Transitioning(id) if id != first));
    }

    #[test]
    fn test_partial_completion_keeps_transitioning() {
        let (mut strip, mut surface) = laid_out();
        let id = strip.on_selection_requested(&mut surface, 1).unwrap();
        let token = surface
            .finish(LayerRef::Outline, AnimatedProperty::Path)
            .unwrap();
        assert_eq!(strip.on_animation_complete(&mut surface, token), None);
        assert_eq!(strip.phase(), Phase::Transitioning(id));
        assert_eq!(strip.resting().unwrap().index, 0);
    }

    #[test]
    fn test_layout_change_mid_transition_snaps() {
        let (mut strip, mut surface) = laid_out();
        strip.on_selection_requested(&mut surface, 3).unwrap();
        strip.on_layout(&mut surface, 300.0, 60.0, 3);

        assert_eq!(strip.phase(), Phase::Idle);
        assert!(surface.running().is_empty());
        let g = strip.geometry();
        let resting = strip.resting().unwrap();
        assert_eq!(resting.index, 2);
        assert_eq!(resting.outline, notch_path(&g, 2));
        assert_eq!(strip.selection().current(), 2);
    }

    #[test]
    fn test_selection_before_layout_commits_directly() {
        let mut strip = TabStrip::new(StripStyle::default());
        let mut surface = RecordingSurface::default();
        strip.on_layout(&mut surface, 0.0, 0.0, 4);
        assert_eq!(strip.on_selection_requested(&mut surface, 2), None);
        assert_eq!(strip.selection().current(), 2);
        assert!(surface.requests().is_empty());

        strip.on_layout(&mut surface, 320.0, 60.0, 4);
        assert_eq!(strip.resting().unwrap().index, 2);
    }

    #[test]
    fn test_restyle_relayouts() {
        let (mut strip, mut surface) = laid_out();
        let style = StripStyle {
            corner_radius: 8.0,
            ..StripStyle::default()
        };
        strip.restyle(&mut surface, style);
        let g = strip.geometry();
        assert_eq!(g.corner_radius, 8.0);
        assert_eq!(strip.resting().unwrap().outline, notch_path(&g, 0));
    }
}
