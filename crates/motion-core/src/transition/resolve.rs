//! Merging a caller's transition with the defaults.

use serde::{Deserialize, Serialize};

use super::defaults::{critical_spring, DEFAULT_TWEEN_DURATION};
use super::{
    get_default_transition, KeyframesTransition, SpringTransition, TransitionKind, TransitionSpec,
};
use crate::{easing_definition_to_function, AnimationValue, EasingDescriptor, ResolvedEasing};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionType {
    Spring,
    #[serde(alias = "tween")]
    Keyframes,
    /// A type this crate cannot build (`inertia`, `just`, ...). Resolves as if
    /// no type was given.
    #[serde(other)]
    Unknown,
}

/// A transition as written by the caller. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransitionOptions {
    #[serde(rename = "type")]
    pub kind: Option<TransitionType>,
    /// Seconds.
    pub duration: Option<f64>,
    /// Seconds.
    pub delay: Option<f64>,
    pub ease: Option<EasingDescriptor>,
    pub stiffness: Option<f64>,
    pub damping: Option<f64>,
    pub rest_delta: Option<f64>,
    pub rest_speed: Option<f64>,
}

impl TransitionOptions {
    pub fn spring() -> Self {
        Self {
            kind: Some(TransitionType::Spring),
            ..Self::default()
        }
    }

    pub fn tween(duration: f64) -> Self {
        Self {
            kind: Some(TransitionType::Keyframes),
            duration: Some(duration),
            ..Self::default()
        }
    }

    pub fn with_ease(mut self, ease: impl Into<EasingDescriptor>) -> Self {
        self.ease = Some(ease.into());
        self
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = Some(stiffness);
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = Some(damping);
        self
    }

    /// True when the options say anything about the motion itself. A bare
    /// delay keeps the default transition.
    pub fn is_defined(&self) -> bool {
        self.known_kind().is_some()
            || self.duration.is_some()
            || self.ease.is_some()
            || self.has_spring_params()
    }

    fn has_spring_params(&self) -> bool {
        self.stiffness.is_some()
            || self.damping.is_some()
            || self.rest_delta.is_some()
            || self.rest_speed.is_some()
    }

    fn known_kind(&self) -> Option<TransitionType> {
        self.kind.filter(|kind| *kind != TransitionType::Unknown)
    }

    fn wants_keyframes(&self, default: &TransitionKind) -> bool {
        match self.known_kind() {
            Some(TransitionType::Keyframes) => true,
            Some(TransitionType::Spring) => false,
            _ if self.duration.is_some() || self.ease.is_some() => true,
            _ if self.has_spring_params() => false,
            _ => matches!(default, TransitionKind::Keyframes(_)),
        }
    }
}

/// A transition ready to hand to the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTransition {
    pub spec: TransitionSpec,
    /// Seconds before the animation starts.
    pub delay: f64,
    /// `None` for springs and for tweens that use the engine's default easing.
    pub easing: Option<ResolvedEasing>,
}

/// Resolves the transition for animating `key` to `to`.
///
/// Without options (or with options that only set a delay) this is the
/// default transition. Otherwise the options override the default field by
/// field; an ease that does not resolve keeps the default's ease.
pub fn resolve_transition(
    key: &str,
    to: &AnimationValue,
    options: Option<&TransitionOptions>,
) -> ResolvedTransition {
    let default = get_default_transition(key, to);
    let delay = options.and_then(|options| options.delay).unwrap_or(0.0);
    if options.and_then(|options| options.kind) == Some(TransitionType::Unknown) {
        log::warn!("unsupported transition type for `{key}`; using the default");
    }

    let spec = match options.filter(|options| options.is_defined()) {
        None => default,
        Some(options) if options.wants_keyframes(&default.kind) => {
            TransitionSpec::new(to.clone(), merge_keyframes(options, default.kind, to))
        }
        Some(options) => TransitionSpec::new(to.clone(), merge_spring(options, default.kind, to)),
    };

    let easing = spec
        .as_keyframes()
        .and_then(|keyframes| keyframes.ease.as_ref())
        .and_then(easing_definition_to_function);

    ResolvedTransition {
        spec,
        delay,
        easing,
    }
}

fn merge_keyframes(
    options: &TransitionOptions,
    default: TransitionKind,
    to: &AnimationValue,
) -> TransitionKind {
    let mut keyframes = match default {
        TransitionKind::Keyframes(keyframes) => keyframes,
        TransitionKind::Spring(_) => KeyframesTransition {
            duration: DEFAULT_TWEEN_DURATION,
            ease: None,
            values: match to {
                AnimationValue::Keyframes(values) => Some(values.clone()),
                _ => None,
            },
        },
    };
    if let Some(duration) = options.duration {
        keyframes.duration = duration;
    }
    if let Some(ease) = &options.ease {
        if easing_definition_to_function(ease).is_some() {
            keyframes.ease = Some(ease.clone());
        } else {
            log::warn!("falling back to default easing");
        }
    }
    TransitionKind::Keyframes(keyframes)
}

fn merge_spring(
    options: &TransitionOptions,
    default: TransitionKind,
    to: &AnimationValue,
) -> TransitionKind {
    let base = match default {
        TransitionKind::Spring(spring) => spring,
        TransitionKind::Keyframes(_) => critical_spring(to),
    };
    TransitionKind::Spring(SpringTransition {
        stiffness: options.stiffness.unwrap_or(base.stiffness),
        damping: options.damping.unwrap_or(base.damping),
        rest_delta: options.rest_delta.unwrap_or(base.rest_delta),
        rest_speed: options.rest_speed.unwrap_or(base.rest_speed),
    })
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;
