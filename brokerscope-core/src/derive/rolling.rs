//! Trailing simple moving average with a minimum period of one.
//!
//! `out[i]` is the mean of the available values in
//! `values[max(0, i-w+1)..=i]`. Early points use however many values exist
//! instead of going undefined, and a window whose values are all missing
//! yields `None`.

use super::window::SmoothingWindow;

pub fn rolling_mean(values: &[Option<f64>], window: SmoothingWindow) -> Vec<Option<f64>> {
    let w = window.get();
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(w);
            let (sum, count) = values[start..=i]
                .iter()
                .flatten()
                .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
            (count > 0).then(|| sum / count as f64)
        })
        .collect()
}
