//! Values an animation can target.

use serde::{Deserialize, Serialize};

use crate::MotionError;

/// A target value as it arrives from an animation request.
///
/// JSON numbers, strings and arrays map onto the three variants; an array is an
/// explicit keyframe target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnimationValue {
    Number(f64),
    Text(String),
    Keyframes(Vec<AnimationValue>),
}

impl AnimationValue {
    /// Returns true when the value lists keyframes rather than a single target.
    pub fn is_keyframes_target(&self) -> bool {
        matches!(self, AnimationValue::Keyframes(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnimationValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnimationValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Strict numeric zero check. `-0.0` counts, the text `"0"` does not.
    pub fn is_zero(&self) -> bool {
        matches!(self, AnimationValue::Number(value) if *value == 0.0)
    }

    pub fn from_json(json: &str) -> Result<Self, MotionError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TryFrom<serde_json::Value> for AnimationValue {
    type Error = MotionError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Number(number) => number
                .as_f64()
                .map(AnimationValue::Number)
                .ok_or_else(|| MotionError::InvalidValue(number.to_string())),
            serde_json::Value::String(text) => Ok(AnimationValue::Text(text)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(AnimationValue::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(AnimationValue::Keyframes),
            other => Err(MotionError::InvalidValue(other.to_string())),
        }
    }
}

impl From<f64> for AnimationValue {
    fn from(value: f64) -> Self {
        AnimationValue::Number(value)
    }
}

impl From<f32> for AnimationValue {
    fn from(value: f32) -> Self {
        AnimationValue::Number(value as f64)
    }
}

impl From<i32> for AnimationValue {
    fn from(value: i32) -> Self {
        AnimationValue::Number(value as f64)
    }
}

impl From<&str> for AnimationValue {
    fn from(value: &str) -> Self {
        AnimationValue::Text(value.to_owned())
    }
}

impl From<String> for AnimationValue {
    fn from(value: String) -> Self {
        AnimationValue::Text(value)
    }
}

impl<T: Into<AnimationValue>> From<Vec<T>> for AnimationValue {
    fn from(values: Vec<T>) -> Self {
        AnimationValue::Keyframes(values.into_iter().map(Into::into).collect())
    }
}
