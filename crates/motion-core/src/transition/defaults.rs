//! Default transitions per property.
//!
//! Position and rotation get a snappy spring that may overshoot, scale gets a
//! critically damped spring so it never passes its target, and opacity and
//! colours fade linearly. Explicit keyframe lists always tween.

use once_cell::sync::Lazy;

use super::{KeyframesTransition, SpringTransition, TransitionKind, TransitionSpec};
use crate::collections::map::HashMap;
use crate::{AnimationValue, EasingDescriptor};

const CRITICAL_STIFFNESS: f64 = 550.0;
const LINEAR_TWEEN_DURATION: f64 = 0.3;
const KEYFRAMES_DURATION: f64 = 0.8;

/// The motion families a property can default to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Archetype {
    UnderDampedSpring,
    CriticallyDampedSpring,
    LinearTween,
}

impl Archetype {
    /// Builds the archetype's parameters for a value heading to `to`.
    pub fn build(self, to: &AnimationValue) -> TransitionKind {
        match self {
            Archetype::UnderDampedSpring => under_damped_spring(),
            Archetype::CriticallyDampedSpring => critically_damped_spring(to),
            Archetype::LinearTween => linear_tween(),
        }
    }
}

static DEFAULT_TRANSITIONS: Lazy<HashMap<&'static str, Archetype>> = Lazy::new(|| {
    use Archetype::*;
    [
        ("x", UnderDampedSpring),
        ("y", UnderDampedSpring),
        ("z", UnderDampedSpring),
        ("rotate", UnderDampedSpring),
        ("rotateX", UnderDampedSpring),
        ("rotateY", UnderDampedSpring),
        ("rotateZ", UnderDampedSpring),
        ("scaleX", CriticallyDampedSpring),
        ("scaleY", CriticallyDampedSpring),
        ("scale", CriticallyDampedSpring),
        ("opacity", LinearTween),
        ("backgroundColor", LinearTween),
        ("color", LinearTween),
    ]
    .into_iter()
    .collect()
});

/// Archetype a property animates with when nothing else is known.
pub fn default_archetype(key: &str) -> Archetype {
    DEFAULT_TRANSITIONS
        .get(key)
        .copied()
        .unwrap_or(Archetype::CriticallyDampedSpring)
}

pub fn under_damped_spring() -> TransitionKind {
    TransitionKind::Spring(SpringTransition {
        stiffness: 500.0,
        damping: 25.0,
        rest_delta: 0.5,
        rest_speed: 10.0,
    })
}

/// Critically damped for a target of exactly zero, slightly under-damped
/// otherwise.
pub fn critically_damped_spring(to: &AnimationValue) -> TransitionKind {
    TransitionKind::Spring(critical_spring(to))
}

pub(super) fn critical_spring(to: &AnimationValue) -> SpringTransition {
    let damping = if to.is_zero() {
        2.0 * CRITICAL_STIFFNESS.sqrt()
    } else {
        30.0
    };
    SpringTransition {
        stiffness: CRITICAL_STIFFNESS,
        damping,
        rest_delta: 0.01,
        rest_speed: 10.0,
    }
}

pub fn linear_tween() -> TransitionKind {
    TransitionKind::Keyframes(KeyframesTransition {
        duration: LINEAR_TWEEN_DURATION,
        ease: Some(EasingDescriptor::named("linear")),
        values: None,
    })
}

pub fn keyframes(values: &[AnimationValue]) -> TransitionKind {
    TransitionKind::Keyframes(KeyframesTransition {
        duration: KEYFRAMES_DURATION,
        ease: None,
        values: Some(values.to_vec()),
    })
}

/// Default transition for animating `key` to `to`.
///
/// Explicit keyframe targets override the per-property table.
pub fn get_default_transition(key: &str, to: &AnimationValue) -> TransitionSpec {
    let kind = match to {
        AnimationValue::Keyframes(values) => keyframes(values),
        _ => default_archetype(key).build(to),
    };
    log::trace!("default {} transition for `{key}`", kind.type_name());
    TransitionSpec::new(to.clone(), kind)
}

pub(super) const DEFAULT_TWEEN_DURATION: f64 = LINEAR_TWEEN_DURATION;

#[cfg(test)]
#[path = "tests/defaults_tests.rs"]
mod tests;
