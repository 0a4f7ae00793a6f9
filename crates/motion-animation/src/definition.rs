//! What a `start` or `set` call asks for.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use motion_core::{AnimationValue, MotionError, TransitionOptions};

const TRANSITION_KEY: &str = "transition";

/// Target values keyed by property, plus an optional transition that applies
/// to all of them.
///
/// From JSON: `{"x": 100, "opacity": [0, 1], "transition": {"duration": 0.5}}`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationDefinition {
    values: Vec<(String, AnimationValue)>,
    transition: Option<TransitionOptions>,
}

impl AnimationDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the target for `key`.
    pub fn value(mut self, key: impl Into<String>, value: impl Into<AnimationValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.values.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((key, value)),
        }
        self
    }

    pub fn with_transition(mut self, transition: TransitionOptions) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn transition(&self) -> Option<&TransitionOptions> {
        self.transition.as_ref()
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &AnimationValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn get(&self, key: &str) -> Option<&AnimationValue> {
        self.values
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self, MotionError> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        Self::try_from(raw)
    }
}

impl TryFrom<serde_json::Value> for AnimationDefinition {
    type Error = MotionError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let entries = match value {
            serde_json::Value::Object(entries) => entries,
            other => return Err(MotionError::InvalidValue(other.to_string())),
        };
        let mut definition = AnimationDefinition::new();
        for (key, value) in entries {
            if key == TRANSITION_KEY {
                definition.transition = Some(serde_json::from_value(value)?);
            } else {
                definition.values.push((key, AnimationValue::try_from(value)?));
            }
        }
        Ok(definition)
    }
}

impl<'de> Deserialize<'de> for AnimationDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        AnimationDefinition::try_from(raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
#[path = "tests/definition_tests.rs"]
mod tests;
