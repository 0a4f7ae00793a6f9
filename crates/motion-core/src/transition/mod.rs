//! Transition descriptions.
//!
//! A [`TransitionSpec`] tells the animation engine how one value travels to
//! its target: either as a spring or as a fixed-duration keyframes tween. The
//! kind is a tagged union so spring parameters can only be read from springs.

mod defaults;
mod resolve;

use serde::Serialize;

use crate::{AnimationValue, EasingDescriptor};

pub use defaults::{
    critically_damped_spring, default_archetype, get_default_transition, keyframes, linear_tween,
    under_damped_spring, Archetype,
};
pub use resolve::{resolve_transition, ResolvedTransition, TransitionOptions, TransitionType};

/// Spring parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringTransition {
    pub stiffness: f64,
    pub damping: f64,
    /// Distance from the target below which the spring counts as settled.
    pub rest_delta: f64,
    /// Speed below which the spring counts as settled.
    pub rest_speed: f64,
}

/// Fixed-duration tween through one or more keyframes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KeyframesTransition {
    /// Seconds.
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease: Option<EasingDescriptor>,
    /// Only set when the target was an explicit keyframe list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<AnimationValue>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransitionKind {
    Spring(SpringTransition),
    Keyframes(KeyframesTransition),
}

impl TransitionKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            TransitionKind::Spring(_) => "spring",
            TransitionKind::Keyframes(_) => "keyframes",
        }
    }
}

/// How a single value animates towards `to`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransitionSpec {
    pub to: AnimationValue,
    #[serde(flatten)]
    pub kind: TransitionKind,
}

impl TransitionSpec {
    pub fn new(to: AnimationValue, kind: TransitionKind) -> Self {
        Self { to, kind }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn as_spring(&self) -> Option<&SpringTransition> {
        match &self.kind {
            TransitionKind::Spring(spring) => Some(spring),
            TransitionKind::Keyframes(_) => None,
        }
    }

    pub fn as_keyframes(&self) -> Option<&KeyframesTransition> {
        match &self.kind {
            TransitionKind::Keyframes(keyframes) => Some(keyframes),
            TransitionKind::Spring(_) => None,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, crate::MotionError> {
        Ok(serde_json::to_value(self)?)
    }
}
