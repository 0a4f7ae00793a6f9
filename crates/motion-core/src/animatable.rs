//! Decides whether a value can be interpolated or has to be switched instantly.

use crate::AnimationValue;

/// Stacking order is always a discrete switch.
const Z_INDEX_KEY: &str = "zIndex";
const URL_PREFIX: &str = "url(";

/// Check if a value is animatable.
///
/// Animatable: `100`, `"100px"`, `"#fff"`, `[0, 1]`.
/// Not animatable: `"block"`, `"url(2.jpg)"`, anything keyed `zIndex`.
///
/// Keyframe lists are trusted without looking at their elements.
pub fn is_animatable(key: &str, value: &AnimationValue) -> bool {
    if key == Z_INDEX_KEY {
        return false;
    }
    match value {
        AnimationValue::Number(_) | AnimationValue::Keyframes(_) => true,
        AnimationValue::Text(text) => is_complex_value(text) && !text.starts_with(URL_PREFIX),
    }
}

/// Returns true when `text` mixes numbers and/or colours with other content,
/// e.g. `"10px 20px"`, `"#fff"` or `"rgba(0, 0, 0, 0.5)"`.
///
/// A string that is itself a plain number is not a complex value.
pub fn is_complex_value(text: &str) -> bool {
    if is_plain_number(text) {
        return false;
    }
    contains_number(text) || contains_hex_color(text)
}

fn is_plain_number(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.parse::<f64>().is_ok()
}

// Functional colours (`rgb(...)`, `hsla(...)`) always carry digits, so they are
// covered here.
fn contains_number(text: &str) -> bool {
    text.bytes().any(|byte| byte.is_ascii_digit())
}

fn contains_hex_color(text: &str) -> bool {
    text.match_indices('#').any(|(index, _)| {
        text[index + 1..]
            .bytes()
            .take_while(u8::is_ascii_hexdigit)
            .count()
            >= 3
    })
}

#[cfg(test)]
#[path = "tests/animatable_tests.rs"]
mod tests;
