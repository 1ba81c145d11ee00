//! Row-wise mean across several signal columns, then smoothed.

use super::rolling::rolling_mean;
use super::window::SmoothingWindow;

/// Mean of the available values on each row. A row with every column
/// missing yields `None`. Columns must share a length.
pub fn row_mean(columns: &[Vec<Option<f64>>]) -> Vec<Option<f64>> {
    let rows = columns.first().map_or(0, Vec::len);
    debug_assert!(columns.iter().all(|c| c.len() == rows));
    (0..rows)
        .map(|i| {
            let (sum, count) = columns
                .iter()
                .filter_map(|c| c[i])
                .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
            (count > 0).then(|| sum / count as f64)
        })
        .collect()
}

/// Smoothed row-wise mean, or `None` when fewer than two columns are given.
pub fn cross_signal_mean(
    columns: &[Vec<Option<f64>>],
    window: SmoothingWindow,
) -> Option<Vec<Option<f64>>> {
    if columns.len() < 2 {
        return None;
    }
    Some(rolling_mean(&row_mean(columns), window))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_mean_uses_available_columns() {
        let a = vec![Some(1.0), Some(2.0), None];
        let b = vec![Some(3.0), None, None];
        assert_eq!(row_mean(&[a, b]), vec![Some(2.0), Some(2.0), None]);
    }

    #[test]
    fn fewer_than_two_columns_is_skipped() {
        let w = SmoothingWindow::new(3).unwrap();
        assert!(cross_signal_mean(&[], w).is_none());
        assert!(cross_signal_mean(&[vec![Some(1.0)]], w).is_none());
    }

    #[test]
    fn mean_is_smoothed_after_averaging() {
        let w = SmoothingWindow::new(2).unwrap();
        let a = vec![Some(0.0), Some(2.0), Some(4.0)];
        let b = vec![Some(2.0), Some(4.0), Some(6.0)];
        // row means: 1, 3, 5 -> smoothed: 1, 2, 4
        let out = cross_signal_mean(&[a, b], w).unwrap();
        assert_eq!(out, vec![Some(1.0), Some(2.0), Some(4.0)]);
    }

    #[test]
    fn empty_view_gives_empty_mean() {
        let w = SmoothingWindow::default();
        let out = cross_signal_mean(&[vec![], vec![]], w).unwrap();
        assert!(out.is_empty());
    }
}
