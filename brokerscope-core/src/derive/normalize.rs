//! Min-max normalization onto `[0, 1]`.
//!
//! The range is taken over the values actually present. A constant series
//! maps to all zeros instead of dividing by zero. Missing inputs stay
//! missing.

pub fn min_max_normalize(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let (min, max) = values
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;

    values
        .iter()
        .map(|v| {
            v.map(|x| {
                if range > 0.0 {
                    ((x - min) / range).clamp(0.0, 1.0)
                } else {
                    0.0
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_onto_unit_interval() {
        let out = min_max_normalize(&[Some(10.0), Some(20.0), Some(15.0)]);
        assert_eq!(out, vec![Some(0.0), Some(1.0), Some(0.5)]);
    }

    #[test]
    fn constant_series_is_all_zero() {
        let out = min_max_normalize(&[Some(50.0), Some(50.0), Some(50.0)]);
        assert_eq!(out, vec![Some(0.0), Some(0.0), Some(0.0)]);
    }

    #[test]
    fn single_point_is_zero() {
        assert_eq!(min_max_normalize(&[Some(7.0)]), vec![Some(0.0)]);
    }

    #[test]
    fn missing_values_stay_missing() {
        let out = min_max_normalize(&[Some(0.0), None, Some(4.0)]);
        assert_eq!(out, vec![Some(0.0), None, Some(1.0)]);
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(min_max_normalize(&[]).is_empty());
    }
}
