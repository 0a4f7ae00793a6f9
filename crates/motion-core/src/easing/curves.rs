//! Named easing curves.
//!
//! Every curve maps progress in `[0, 1]` to eased progress. Back and anticipate
//! curves leave that range on purpose.

/// Overshoot used by the back and anticipate families.
pub const BACK_OVERSHOOT: f64 = 1.525;

const BOUNCE_FIRST_THRESHOLD: f64 = 4.0 / 11.0;
const BOUNCE_SECOND_THRESHOLD: f64 = 8.0 / 11.0;
const BOUNCE_THIRD_THRESHOLD: f64 = 9.0 / 10.0;
const BOUNCE_CA: f64 = 4356.0 / 361.0;
const BOUNCE_CB: f64 = 35442.0 / 1805.0;
const BOUNCE_CC: f64 = 16061.0 / 1805.0;

/// Turns an ease-in curve into the matching ease-out curve.
#[inline]
fn reverse(curve: fn(f64) -> f64, progress: f64) -> f64 {
    1.0 - curve(1.0 - progress)
}

/// Plays an ease-in curve for the first half and its reverse for the second.
#[inline]
fn mirror(curve: fn(f64) -> f64, progress: f64) -> f64 {
    if progress <= 0.5 {
        curve(2.0 * progress) / 2.0
    } else {
        (2.0 - curve(2.0 * (1.0 - progress))) / 2.0
    }
}

pub fn linear(progress: f64) -> f64 {
    progress
}

pub fn ease_in(progress: f64) -> f64 {
    progress.powi(2)
}

pub fn ease_out(progress: f64) -> f64 {
    reverse(ease_in, progress)
}

pub fn ease_in_out(progress: f64) -> f64 {
    mirror(ease_in, progress)
}

pub fn circ_in(progress: f64) -> f64 {
    1.0 - progress.acos().sin()
}

pub fn circ_out(progress: f64) -> f64 {
    reverse(circ_in, progress)
}

pub fn circ_in_out(progress: f64) -> f64 {
    mirror(circ_in, progress)
}

pub fn back_in(progress: f64) -> f64 {
    progress * progress * ((BACK_OVERSHOOT + 1.0) * progress - BACK_OVERSHOOT)
}

pub fn back_out(progress: f64) -> f64 {
    reverse(back_in, progress)
}

pub fn back_in_out(progress: f64) -> f64 {
    mirror(back_in, progress)
}

/// Pulls back like `back_in` for the first half, then settles exponentially.
pub fn anticipate(progress: f64) -> f64 {
    let doubled = progress * 2.0;
    if doubled < 1.0 {
        0.5 * back_in(doubled)
    } else {
        0.5 * (2.0 - 2f64.powf(-10.0 * (doubled - 1.0)))
    }
}

pub fn bounce_out(progress: f64) -> f64 {
    if progress == 0.0 || progress == 1.0 {
        return progress;
    }
    let squared = progress * progress;
    if progress < BOUNCE_FIRST_THRESHOLD {
        7.5625 * squared
    } else if progress < BOUNCE_SECOND_THRESHOLD {
        9.075 * squared - 9.9 * progress + 3.4
    } else if progress < BOUNCE_THIRD_THRESHOLD {
        BOUNCE_CA * squared - BOUNCE_CB * progress + BOUNCE_CC
    } else {
        10.8 * squared - 20.52 * progress + 10.72
    }
}

pub fn bounce_in(progress: f64) -> f64 {
    reverse(bounce_out, progress)
}

pub fn bounce_in_out(progress: f64) -> f64 {
    if progress < 0.5 {
        0.5 * (1.0 - bounce_out(1.0 - progress * 2.0))
    } else {
        0.5 * bounce_out(progress * 2.0 - 1.0) + 0.5
    }
}
