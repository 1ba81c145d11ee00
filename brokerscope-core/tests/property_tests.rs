//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Filtering is idempotent
//! 2. Smoothing preserves length and averages the available prefix early on
//! 3. Normalization stays in [0, 1] and maps constants to zero
//! 4. The correlation matrix is symmetric with a unit diagonal

use brokerscope_core::correlation::correlate;
use brokerscope_core::derive::{min_max_normalize, rolling_mean, SmoothingWindow};
use brokerscope_core::domain::{Action, Observation, Side, SignalColumn, SignalValues};
use brokerscope_core::{FilterSet, RecordStore};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_value() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        4 => (-1000.0..1000.0_f64).prop_map(Some),
    ]
}

fn arb_series() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(arb_value(), 0..60)
}

fn arb_window() -> impl Strategy<Value = SmoothingWindow> {
    (SmoothingWindow::MIN..=SmoothingWindow::MAX)
        .prop_map(|w| SmoothingWindow::new(w).unwrap())
}

fn arb_observation() -> impl Strategy<Value = Observation> {
    (
        0i64..900,
        prop::sample::select(vec!["A", "B", "C"]),
        prop::sample::select(vec!["C1", "C2"]),
        any::<bool>(),
        prop::sample::select(Action::ALL.to_vec()),
        prop::collection::vec(arb_value(), 4),
    )
        .prop_map(|(day, broker, contract, long, action, signals)| {
            let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
            let mut values = SignalValues::default();
            for (col, v) in [
                SignalColumn::DualMa,
                SignalColumn::Cci,
                SignalColumn::Trix,
                SignalColumn::Chaikin,
            ]
            .into_iter()
            .zip(signals)
            {
                values.set(col, v);
            }
            Observation {
                date: start + Duration::days(day),
                broker: broker.to_string(),
                contract: contract.to_string(),
                side: if long { Side::Long } else { Side::Short },
                action,
                position: 100.0,
                position_change_rate: 0.0,
                price: 3000.0,
                price_change_rate: None,
                signals: values,
            }
        })
}

fn arb_filters() -> impl Strategy<Value = FilterSet> {
    (
        prop::collection::vec(prop::sample::select(vec!["A", "B", "C"]), 0..3),
        prop::collection::vec(2022i32..2025, 0..3),
        prop::collection::vec(prop::sample::select(Side::ALL.to_vec()), 0..2),
        prop::collection::vec(prop::sample::select(vec!["C1", "C2"]), 0..2),
    )
        .prop_map(|(brokers, years, sides, contracts)| {
            FilterSet::new()
                .brokers(brokers)
                .years(years)
                .sides(sides)
                .contracts(contracts)
        })
}

// ── 1. Filter idempotence ────────────────────────────────────────────

proptest! {
    /// Applying the same filters to an already-filtered view changes nothing.
    #[test]
    fn filtering_is_idempotent(
        rows in prop::collection::vec(arb_observation(), 0..80),
        filters in arb_filters(),
    ) {
        let store = RecordStore::from_observations(rows);
        let once = store.filter(&filters);
        let twice = once.refine(&filters);
        prop_assert_eq!(once.rows(), twice.rows());
        prop_assert!(once.iter().all(|o| filters.matches(o)));
    }
}

// ── 2. Rolling mean ──────────────────────────────────────────────────

proptest! {
    /// Output length equals input length.
    #[test]
    fn rolling_preserves_length(values in arb_series(), window in arb_window()) {
        prop_assert_eq!(rolling_mean(&values, window).len(), values.len());
    }

    /// Before the window fills, each point is the mean of the prefix.
    #[test]
    fn rolling_early_points_average_the_prefix(
        values in arb_series(),
        window in arb_window(),
    ) {
        let out = rolling_mean(&values, window);
        for i in 0..values.len().min(window.get()) {
            let present: Vec<f64> = values[..=i].iter().flatten().copied().collect();
            match out[i] {
                None => prop_assert!(present.is_empty()),
                Some(v) => {
                    let expected = present.iter().sum::<f64>() / present.len() as f64;
                    prop_assert!((v - expected).abs() < 1e-9);
                }
            }
        }
    }
}

// ── 3. Normalization ─────────────────────────────────────────────────

proptest! {
    /// Every present value lands in [0, 1]; missing stays missing.
    #[test]
    fn normalize_stays_in_unit_range(values in arb_series()) {
        let out = min_max_normalize(&values);
        prop_assert_eq!(out.len(), values.len());
        for (v, n) in values.iter().zip(&out) {
            prop_assert_eq!(v.is_some(), n.is_some());
            if let Some(n) = n {
                prop_assert!((0.0..=1.0).contains(n));
            }
        }
    }

    /// A constant series normalizes to zeros.
    #[test]
    fn normalize_constant_is_zero(c in -1e6..1e6_f64, n in 1usize..40) {
        let out = min_max_normalize(&vec![Some(c); n]);
        prop_assert!(out.iter().all(|v| *v == Some(0.0)));
    }
}

// ── 4. Correlation ───────────────────────────────────────────────────

proptest! {
    /// Symmetric, bounded, and 1 on the diagonal of every observed column.
    #[test]
    fn correlation_is_symmetric_with_unit_diagonal(
        rows in prop::collection::vec(arb_observation(), 1..60),
    ) {
        let store = RecordStore::from_observations(rows);
        let columns = [
            SignalColumn::DualMa,
            SignalColumn::Cci,
            SignalColumn::Trix,
            SignalColumn::Chaikin,
        ];
        if let Some(m) = correlate(&store.view(), &columns) {
            for i in 0..columns.len() {
                let observed = store.rows().iter().any(|o| o.signal(columns[i]).is_some());
                prop_assert_eq!(m.values[i][i], observed.then_some(1.0));
                for j in 0..columns.len() {
                    prop_assert_eq!(m.values[i][j], m.values[j][i]);
                    if let Some(r) = m.values[i][j] {
                        prop_assert!((-1.0..=1.0).contains(&r));
                    }
                }
            }
        }
    }
}
