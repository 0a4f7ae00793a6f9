//! Cubic bezier easing.
//!
//! The curve runs from `(0, 0)` to `(1, 1)` through the control points
//! `(x1, y1)` and `(x2, y2)`. Easing a progress value means finding the curve
//! parameter whose x equals the progress, then returning the y at that
//! parameter. The parameter is found from a coarse sample table refined with
//! Newton-Raphson, or by binary subdivision where the slope is too flat.

use super::{curves, EasingFn};

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f64 = 0.001;
const SUBDIVISION_PRECISION: f64 = 0.000_000_1;
const SUBDIVISION_MAX_ITERATIONS: usize = 10;
const SPLINE_TABLE_SIZE: usize = 11;
const SAMPLE_STEP_SIZE: f64 = 1.0 / (SPLINE_TABLE_SIZE as f64 - 1.0);

/// Builds an easing function from cubic bezier control points.
///
/// Coordinates are not validated; x values outside `[0, 1]` produce a
/// non-monotonic curve and the solver returns whatever it converges to.
pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> EasingFn {
    if x1 == y1 && x2 == y2 {
        return EasingFn::new(curves::linear);
    }
    let curve = BezierCurve::new(x1, y1, x2, y2);
    EasingFn::new(move |progress| curve.ease(progress))
}

#[derive(Clone, Debug)]
struct BezierCurve {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    samples: [f64; SPLINE_TABLE_SIZE],
}

impl BezierCurve {
    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let mut samples = [0.0; SPLINE_TABLE_SIZE];
        for (index, sample) in samples.iter_mut().enumerate() {
            *sample = calc_bezier(index as f64 * SAMPLE_STEP_SIZE, x1, x2);
        }
        Self {
            x1,
            y1,
            x2,
            y2,
            samples,
        }
    }

    fn ease(&self, progress: f64) -> f64 {
        if progress == 0.0 || progress == 1.0 {
            return progress;
        }
        calc_bezier(self.t_for_x(progress), self.y1, self.y2)
    }

    fn t_for_x(&self, x: f64) -> f64 {
        let last_sample = SPLINE_TABLE_SIZE - 1;
        let mut interval_start = 0.0;
        let mut current_sample = 1;
        while current_sample != last_sample && self.samples[current_sample] <= x {
            interval_start += SAMPLE_STEP_SIZE;
            current_sample += 1;
        }
        current_sample -= 1;

        let span = self.samples[current_sample + 1] - self.samples[current_sample];
        let distance = (x - self.samples[current_sample]) / span;
        let guess = interval_start + distance * SAMPLE_STEP_SIZE;

        let initial_slope = slope(guess, self.x1, self.x2);
        if initial_slope >= NEWTON_MIN_SLOPE {
            self.newton_raphson(x, guess)
        } else if initial_slope == 0.0 {
            guess
        } else {
            self.binary_subdivide(x, interval_start, interval_start + SAMPLE_STEP_SIZE)
        }
    }

    fn newton_raphson(&self, x: f64, mut guess: f64) -> f64 {
        for _ in 0..NEWTON_ITERATIONS {
            let current_slope = slope(guess, self.x1, self.x2);
            if current_slope == 0.0 {
                return guess;
            }
            let current_x = calc_bezier(guess, self.x1, self.x2) - x;
            guess -= current_x / current_slope;
        }
        guess
    }

    fn binary_subdivide(&self, x: f64, mut lower: f64, mut upper: f64) -> f64 {
        let mut current_t = lower;
        for _ in 0..SUBDIVISION_MAX_ITERATIONS {
            current_t = lower + (upper - lower) / 2.0;
            let current_x = calc_bezier(current_t, self.x1, self.x2) - x;
            if current_x > 0.0 {
                upper = current_t;
            } else {
                lower = current_t;
            }
            if current_x.abs() <= SUBDIVISION_PRECISION {
                break;
            }
        }
        current_t
    }
}

// Polynomial coefficients of one bezier axis with endpoints 0 and 1.
#[inline]
fn coeff_a(a1: f64, a2: f64) -> f64 {
    1.0 - 3.0 * a2 + 3.0 * a1
}

#[inline]
fn coeff_b(a1: f64, a2: f64) -> f64 {
    3.0 * a2 - 6.0 * a1
}

#[inline]
fn coeff_c(a1: f64) -> f64 {
    3.0 * a1
}

/// Value of one bezier axis at parameter `t`.
#[inline]
fn calc_bezier(t: f64, a1: f64, a2: f64) -> f64 {
    ((coeff_a(a1, a2) * t + coeff_b(a1, a2)) * t + coeff_c(a1)) * t
}

/// Derivative of one bezier axis at parameter `t`.
#[inline]
fn slope(t: f64, a1: f64, a2: f64) -> f64 {
    3.0 * coeff_a(a1, a2) * t * t + 2.0 * coeff_b(a1, a2) * t + coeff_c(a1)
}
