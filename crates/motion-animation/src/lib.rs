//! Animation controls for Motion-RS
//!
//! [`AnimationControls`] drive every subscribed [`AnimationTarget`] at once.
//! [`use_animation`] binds a set of controls to a runtime so they mount only
//! after the flush in which their first target appeared.

pub mod controls;
pub mod definition;
pub mod target;
pub mod use_animation;

pub use controls::{AnimationControls, Cleanup, StartStatus, Subscription, WeakAnimationControls};
pub use definition::AnimationDefinition;
pub use target::AnimationTarget;
pub use use_animation::{use_animation, LifecyclePhase, UseAnimation};

pub mod prelude {
    pub use crate::controls::{AnimationControls, StartStatus};
    pub use crate::definition::AnimationDefinition;
    pub use crate::target::AnimationTarget;
    pub use crate::use_animation::{use_animation, LifecyclePhase};
    pub use motion_core::prelude::*;
}
