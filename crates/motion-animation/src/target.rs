use motion_core::{AnimationValue, ResolvedTransition};

/// Something controls can drive, typically one rendered element.
///
/// The engine behind the target owns interpolation and physics; controls only
/// tell it what to animate and how.
pub trait AnimationTarget {
    /// Start animating `key` with a fully resolved transition.
    fn animate(&self, key: &str, transition: &ResolvedTransition);

    /// Jump `key` to `value` without animating.
    fn set_value(&self, key: &str, value: &AnimationValue);

    /// Stop every running animation on this target.
    fn stop(&self);
}
