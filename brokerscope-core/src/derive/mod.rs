//! Derivations over a filtered view: rolling smoothing, cross-signal mean
//! and min-max normalized reference series.
//!
//! Every function here is pure and length-preserving. Missing values are
//! `None` on the way in and on the way out; an empty input yields an empty
//! output.

pub mod cross_mean;
pub mod normalize;
pub mod rolling;
pub mod window;

pub use cross_mean::{cross_signal_mean, row_mean};
pub use normalize::min_max_normalize;
pub use rolling::rolling_mean;
pub use window::{SmoothingWindow, WindowError};

/// Assert two optional values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx_opt(actual: Option<f64>, expected: Option<f64>, epsilon: f64) {
    match (actual, expected) {
        (Some(a), Some(e)) => assert!(
            (a - e).abs() < epsilon,
            "assert_approx failed: actual={a}, expected={e}, diff={}, epsilon={epsilon}",
            (a - e).abs()
        ),
        (None, None) => {}
        _ => panic!("assert_approx failed: actual={actual:?}, expected={expected:?}"),
    }
}

/// Default epsilon for derivation tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
