//! Core rules for Motion-RS
//!
//! This crate decides how a value animates when the caller does not say so:
//! which default transition a property gets, how easing definitions turn into
//! callable curves, and whether a value can be interpolated at all.

pub mod animatable;
pub mod collections;
pub mod easing;
pub mod error;
pub mod transition;
pub mod value;

pub use animatable::{is_animatable, is_complex_value};
pub use easing::{
    cubic_bezier, easing_definition_to_function, is_easing_array, named_easing, EasingDescriptor,
    EasingFn, ResolvedEasing, EASING_NAMES,
};
pub use error::MotionError;
pub use transition::{
    critically_damped_spring, default_archetype, get_default_transition, keyframes, linear_tween,
    resolve_transition, under_damped_spring, Archetype, KeyframesTransition, ResolvedTransition,
    SpringTransition, TransitionKind, TransitionOptions, TransitionSpec, TransitionType,
};
pub use value::AnimationValue;

pub mod prelude {
    pub use crate::animatable::is_animatable;
    pub use crate::easing::{easing_definition_to_function, EasingDescriptor, EasingFn};
    pub use crate::transition::{get_default_transition, resolve_transition, TransitionSpec};
    pub use crate::value::AnimationValue;
}
