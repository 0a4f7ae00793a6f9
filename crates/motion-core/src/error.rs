use thiserror::Error;

/// Errors raised while building animation inputs or driving controls.
///
/// Classification, default transitions and easing lookup never fail; only the
/// conversion of raw shapes and the use of unmounted controls do.
#[derive(Debug, Error)]
pub enum MotionError {
    #[error("cubic bezier easing needs four control values, got {len}")]
    InvalidCubicBezier { len: usize },
    #[error("unsupported easing definition: {0}")]
    InvalidEasing(String),
    #[error("unsupported animation value: {0}")]
    InvalidValue(String),
    #[error("controls.{operation}() should only be called after the controls have mounted")]
    NotMounted { operation: &'static str },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
