use crate::geometry::{
    NotchPath, Point, QuadCurve, StripGeometry, indicator_hop, indicator_rest_position,
    indicator_travel_curve, notch_path,
};
use crate::orchestrator::PlanId;
use crate::surface::LayerRef;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Transitioning(PlanId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IconFloat {
    pub from: Option<LayerRef>,
    pub to: LayerRef,
    /// Icons a superseded plan left raised. They float back down without
    /// holding up the settle.
    pub stranded: Vec<LayerRef>,
}

/// Everything one selection change animates.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    /// Resting index the transition starts from, if the strip has one.
    pub from: Option<usize>,
    pub to: usize,
    pub notch_morph: NotchPath,
    pub indicator_travel: Option<QuadCurve>,
    pub bounce_target: LayerRef,
    pub icon_float: IconFloat,
}

impl TransitionPlan {
    pub fn build(geometry: &StripGeometry, from: Option<usize>, to: usize) -> Self {
        let source = from.filter(|&f| f != to);
        Self {
            from,
            to,
            notch_morph: notch_path(geometry, to),
            indicator_travel: source.map(|f| indicator_travel_curve(geometry, f, to)),
            bounce_target: LayerRef::Icon(to),
            icon_float: IconFloat {
                from: source.map(LayerRef::Icon),
                to: LayerRef::Icon(to),
                stranded: Vec::new(),
            },
        }
    }

    /// Re-anchors the plan on values the surface already holds: the
    /// indicator hops from where it last landed and every raised icon other
    /// than the target floats back down.
    pub fn resume_from(
        mut self,
        geometry: &StripGeometry,
        indicator: Point,
        raised: &BTreeSet<usize>,
    ) -> Self {
        let end = indicator_rest_position(geometry, self.to);
        self.indicator_travel = (indicator != end).then(|| indicator_hop(geometry, indicator, end));

        let from = self.icon_float.from;
        self.icon_float.stranded = raised
            .iter()
            .filter(|&&i| i != self.to)
            .map(|&i| LayerRef::Icon(i))
            .filter(|&icon| Some(icon) != from)
            .collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Selection did not change.
    Ignore,
    Start(TransitionPlan),
    /// A plan is already in flight and must be cancelled first.
    Supersede {
        superseded: PlanId,
        plan: TransitionPlan,
    },
}

/// Idle/Transitioning state machine. At most one transition is in flight and
/// later input always wins.
#[derive(Debug, Default)]
pub struct Planner {
    phase: Phase,
}

impl Planner {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Plans the move to `requested`. The source is the committed `resting`
    /// index, never the target of a plan still in flight, so a superseding
    /// plan starts from where the visuals actually rest.
    pub fn decide(
        &self,
        geometry: &StripGeometry,
        current: usize,
        resting: Option<usize>,
        requested: usize,
    ) -> Decision {
        if requested == current {
            return Decision::Ignore;
        }
        let plan = TransitionPlan::build(geometry, resting, requested);
        match self.phase {
            Phase::Idle => Decision::Start(plan),
            Phase::Transitioning(superseded) => Decision::Supersede { superseded, plan },
        }
    }

    pub fn begin(&mut self, id: PlanId) {
        self.phase = Phase::Transitioning(id);
    }

    /// Returns to `Idle` if `id` is the plan in flight.
    pub fn settle(&mut self, id: PlanId) -> bool {
        let matches = self.phase == Phase::Transitioning(id);
        if matches {
            self.phase = Phase::Idle;
        }
        matches
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::indicator_rest_position;
    use crate::style::StripStyle;

    fn geometry() -> StripGeometry {
        StripGeometry::new(320.0, 60.0, 4, &StripStyle::default())
    }

    #[test]
    fn test_plan_contents() {
        let g = geometry();
        let plan = TransitionPlan::build(&g, Some(0), 2);
        assert_eq!(plan.notch_morph, notch_path(&g, 2));
        let travel = plan.indicator_travel.unwrap();
        assert_eq!(travel.start.x, g.section_width() * 0.5);
        assert_eq!(travel.end.x, g.section_width() * 2.5);
        assert_eq!(travel.end, indicator_rest_position(&g, 2));
        assert_eq!(plan.bounce_target, LayerRef::Icon(2));
        assert_eq!(
            plan.icon_float,
            IconFloat {
                from: Some(LayerRef::Icon(0)),
                to: LayerRef::Icon(2),
                stranded: Vec::new(),
            }
        );
    }

    #[test]
    fn test_resume_from_resting_values_changes_nothing() {
        let g = geometry();
        let plan = TransitionPlan::build(&g, Some(0), 2);
        let resumed = plan
            .clone()
            .resume_from(&g, indicator_rest_position(&g, 0), &BTreeSet::from([0]));
        assert_eq!(resumed, plan);
    }

    #[test]
    fn test_resume_from_landed_values() {
        let g = geometry();
        let landed = indicator_rest_position(&g, 1);
        let plan =
            TransitionPlan::build(&g, Some(0), 2).resume_from(&g, landed, &BTreeSet::from([0, 1]));

        let travel = plan.indicator_travel.unwrap();
        assert_eq!(travel.start, landed);
        assert_eq!(travel.end, indicator_rest_position(&g, 2));
        assert_eq!(plan.icon_float.from, Some(LayerRef::Icon(0)));
        assert_eq!(plan.icon_float.stranded, vec![LayerRef::Icon(1)]);

        // back to the resting segment after the indicator already left it
        let back = TransitionPlan::build(&g, Some(0), 0).resume_from(&g, landed, &BTreeSet::new());
        assert_eq!(back.indicator_travel.unwrap().end, indicator_rest_position(&g, 0));
    }

    #[test]
    fn test_plan_without_distinct_source() {
        let g = geometry();
        for from in [None, Some(3)] {
            let plan = TransitionPlan::build(&g, from, 3);
            assert!(plan.indicator_travel.is_none());
            assert!(plan.icon_float.from.is_none());
        }
    }

    #[test]
    fn test_state_machine() {
        let g = geometry();
        let mut planner = Planner::default();
        assert_eq!(planner.decide(&g, 1, Some(1), 1), Decision::Ignore);

        let Decision::Start(plan) = planner.decide(&g, 1, Some(1), 2) else {
            panic!("expected a new transition");
        };
        assert_eq!(plan.from, Some(1));

        let id = PlanId::from(7);
        planner.begin(id);
        assert_eq!(planner.phase(), Phase::Transitioning(id));
        // re-selecting the in-flight target is still a no-op
        assert_eq!(planner.decide(&g, 2, Some(1), 2), Decision::Ignore);

        match planner.decide(&g, 2, Some(1), 3) {
            Decision::Supersede { superseded, plan } => {
                assert_eq!(superseded, id);
                assert_eq!(plan.from, Some(1));
            }
            other => panic!("unexpected decision {other:?}"),
        }

        assert!(!planner.settle(PlanId::from(6)));
        assert!(planner.settle(id));
        assert_eq!(planner.phase(), Phase::Idle);
    }
}
