//! Easing definitions and their resolution into callable curves.
//!
//! Callers describe easing as a curve name (`"easeOut"`), four cubic bezier
//! control values (`[0.42, 0, 0.58, 1]`), a list of either (one easing per
//! keyframe segment) or an already resolved function. Raw shapes are sorted
//! into [`EasingDescriptor`] variants once, when the descriptor is built, so
//! resolution never has to re-inspect them.

mod bezier;
pub mod curves;

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::collections::map::HashMap;
use crate::MotionError;

pub use bezier::cubic_bezier;

/// A shared, stateless easing curve.
///
/// Two handles are equal when they point at the same curve.
#[derive(Clone)]
pub struct EasingFn(Arc<dyn Fn(f64) -> f64 + Send + Sync>);

impl EasingFn {
    pub fn new(curve: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(curve))
    }

    /// Apply the easing to a linear progress value.
    #[inline]
    pub fn ease(&self, progress: f64) -> f64 {
        (self.0)(progress)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl PartialEq for EasingFn {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for EasingFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EasingFn({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

/// How an animation request describes its easing.
#[derive(Clone, Debug, PartialEq)]
pub enum EasingDescriptor {
    /// A curve from the named table. Unknown names are kept and fail to resolve.
    Named(String),
    /// Control points `(x1, y1, x2, y2)`.
    CubicBezier([f64; 4]),
    /// One easing per keyframe segment.
    Sequence(Vec<EasingDescriptor>),
    Resolved(EasingFn),
}

impl EasingDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        EasingDescriptor::Named(name.into())
    }

    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        EasingDescriptor::CubicBezier([x1, y1, x2, y2])
    }

    pub fn from_json(json: &str) -> Result<Self, MotionError> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        Self::try_from(raw)
    }
}

impl From<&str> for EasingDescriptor {
    fn from(name: &str) -> Self {
        EasingDescriptor::named(name)
    }
}

impl From<[f64; 4]> for EasingDescriptor {
    fn from(points: [f64; 4]) -> Self {
        EasingDescriptor::CubicBezier(points)
    }
}

impl From<EasingFn> for EasingDescriptor {
    fn from(curve: EasingFn) -> Self {
        EasingDescriptor::Resolved(curve)
    }
}

impl TryFrom<serde_json::Value> for EasingDescriptor {
    type Error = MotionError;

    /// A list whose first element is a number is a bezier tuple; any other
    /// list, the empty one included, is a sequence.
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::String(name) => Ok(EasingDescriptor::Named(name)),
            serde_json::Value::Array(items) => {
                if matches!(items.first(), Some(serde_json::Value::Number(_))) {
                    bezier_points(&items).map(EasingDescriptor::CubicBezier)
                } else {
                    items
                        .into_iter()
                        .map(EasingDescriptor::try_from)
                        .collect::<Result<Vec<_>, _>>()
                        .map(EasingDescriptor::Sequence)
                }
            }
            other => Err(MotionError::InvalidEasing(other.to_string())),
        }
    }
}

fn bezier_points(items: &[serde_json::Value]) -> Result<[f64; 4], MotionError> {
    if items.len() != 4 {
        return Err(MotionError::InvalidCubicBezier { len: items.len() });
    }
    let mut points = [0.0; 4];
    for (point, item) in points.iter_mut().zip(items) {
        *point = item
            .as_f64()
            .ok_or_else(|| MotionError::InvalidEasing(item.to_string()))?;
    }
    Ok(points)
}

impl<'de> Deserialize<'de> for EasingDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        EasingDescriptor::try_from(raw).map_err(D::Error::custom)
    }
}

impl Serialize for EasingDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EasingDescriptor::Named(name) => serializer.serialize_str(name),
            EasingDescriptor::CubicBezier(points) => points.serialize(serializer),
            EasingDescriptor::Sequence(items) => items.serialize(serializer),
            EasingDescriptor::Resolved(_) => Err(S::Error::custom(
                "resolved easing functions have no serialized form",
            )),
        }
    }
}

/// The executable form of an [`EasingDescriptor`].
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedEasing {
    Single(EasingFn),
    Sequence(Vec<EasingFn>),
}

impl ResolvedEasing {
    pub fn as_single(&self) -> Option<&EasingFn> {
        match self {
            ResolvedEasing::Single(curve) => Some(curve),
            ResolvedEasing::Sequence(_) => None,
        }
    }

    /// Easing for keyframe segment `index`. A single easing covers every segment.
    pub fn for_segment(&self, index: usize) -> Option<&EasingFn> {
        match self {
            ResolvedEasing::Single(curve) => Some(curve),
            ResolvedEasing::Sequence(curves) => curves.get(index),
        }
    }
}

/// Every name the named table understands.
pub const EASING_NAMES: [&str; 14] = [
    "linear",
    "easeIn",
    "easeInOut",
    "easeOut",
    "circIn",
    "circInOut",
    "circOut",
    "backIn",
    "backInOut",
    "backOut",
    "anticipate",
    "bounceIn",
    "bounceInOut",
    "bounceOut",
];

static EASING_LOOKUP: Lazy<HashMap<&'static str, EasingFn>> = Lazy::new(|| {
    let table: [(&'static str, fn(f64) -> f64); 14] = [
        ("linear", curves::linear),
        ("easeIn", curves::ease_in),
        ("easeInOut", curves::ease_in_out),
        ("easeOut", curves::ease_out),
        ("circIn", curves::circ_in),
        ("circInOut", curves::circ_in_out),
        ("circOut", curves::circ_out),
        ("backIn", curves::back_in),
        ("backInOut", curves::back_in_out),
        ("backOut", curves::back_out),
        ("anticipate", curves::anticipate),
        ("bounceIn", curves::bounce_in),
        ("bounceInOut", curves::bounce_in_out),
        ("bounceOut", curves::bounce_out),
    ];
    table
        .into_iter()
        .map(|(name, curve)| (name, EasingFn::new(curve)))
        .collect()
});

/// Looks up a named curve. Repeated lookups return the same [`EasingFn`].
pub fn named_easing(name: &str) -> Option<EasingFn> {
    EASING_LOOKUP.get(name).cloned()
}

/// Resolves a descriptor into callable easing.
///
/// Returns `None` for unknown names and for sequences containing anything that
/// does not resolve to a single curve; callers fall back to their default
/// easing in that case.
pub fn easing_definition_to_function(definition: &EasingDescriptor) -> Option<ResolvedEasing> {
    match definition {
        EasingDescriptor::Sequence(items) if items.is_empty() => {
            log::warn!("empty easing sequence ignored");
            None
        }
        EasingDescriptor::Sequence(items) => items
            .iter()
            .map(resolve_single)
            .collect::<Option<Vec<_>>>()
            .map(ResolvedEasing::Sequence),
        single => resolve_single(single).map(ResolvedEasing::Single),
    }
}

fn resolve_single(definition: &EasingDescriptor) -> Option<EasingFn> {
    match definition {
        EasingDescriptor::CubicBezier([x1, y1, x2, y2]) => Some(cubic_bezier(*x1, *y1, *x2, *y2)),
        EasingDescriptor::Named(name) => {
            let curve = named_easing(name);
            if curve.is_none() {
                log::warn!("invalid easing type '{name}'");
            }
            curve
        }
        EasingDescriptor::Resolved(curve) => Some(curve.clone()),
        EasingDescriptor::Sequence(_) => {
            log::warn!("nested easing sequences are not supported");
            None
        }
    }
}

/// Returns true when the descriptor holds one easing per keyframe segment
/// rather than a single curve. Empty sequences are not easing arrays.
pub fn is_easing_array(definition: &EasingDescriptor) -> bool {
    matches!(definition, EasingDescriptor::Sequence(items) if !items.is_empty())
}

#[cfg(test)]
#[path = "tests/easing_tests.rs"]
mod tests;
