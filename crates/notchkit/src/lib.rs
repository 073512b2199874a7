pub mod geometry;
pub mod layout;
pub mod orchestrator;
pub mod planner;
pub mod selection;
pub mod strip;
pub mod style;
pub mod surface;
pub mod timing;

pub use geometry::{NotchPath, Point, QuadCurve, StripGeometry};
pub use orchestrator::{CompletionToken, PlanId};
pub use planner::{Phase, TransitionPlan};
pub use strip::{RestingState, Settled, TabStrip};
pub use style::StripStyle;
pub use surface::{
    AnimatedProperty, Animation, AnimationRequest, LayerRef, PropertyValue, RenderSurface,
};
