//! Deterministic synthetic dataset for demos, benches and tests.
//!
//! Produces a few brokers reporting daily on a rolling set of quarterly
//! contracts, with a random-walk price, a drifting position and noisy
//! signal columns. About one signal value in ten is left missing so the
//! missing-value paths get exercised.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::store::RecordStore;
use crate::domain::{Action, Observation, Side, SignalColumn, SignalValues};

/// Shape of the generated dataset.
#[derive(Debug, Clone)]
pub struct SampleSpec {
    pub seed: u64,
    pub brokers: Vec<String>,
    pub start: NaiveDate,
    /// Number of weekdays to generate.
    pub days: usize,
    /// Trading days each contract stays active before the next one rolls in.
    pub contract_span: usize,
}

impl Default for SampleSpec {
    fn default() -> Self {
        Self {
            seed: 42,
            brokers: vec!["Citic".into(), "Yongan".into(), "Guotai".into()],
            start: NaiveDate::from_ymd_opt(2022, 1, 3).unwrap_or_default(),
            days: 500,
            contract_span: 120,
        }
    }
}

/// Generate a store according to `spec`.
pub fn sample_store(spec: &SampleSpec) -> RecordStore {
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let dates = weekdays(spec.start, spec.days);

    let mut price = 3000.0_f64;
    let prices: Vec<(f64, f64)> = dates
        .iter()
        .map(|_| {
            let ret: f64 = rng.gen_range(-0.02..0.02);
            let prev = price;
            price *= 1.0 + ret;
            (price, price / prev - 1.0)
        })
        .collect();

    let mut rows = Vec::with_capacity(dates.len() * spec.brokers.len());
    for (b, broker) in spec.brokers.iter().enumerate() {
        let side = if b % 2 == 0 { Side::Long } else { Side::Short };
        let mut position = 10_000.0 + 2_500.0 * b as f64;
        let mut signal_state = [0.0_f64; SignalColumn::COUNT];

        for (i, date) in dates.iter().enumerate() {
            let (px, px_change) = prices[i];
            let delta: f64 = rng.gen_range(-0.05..0.05);
            let action = if delta > 0.01 {
                Action::Increase
            } else if delta < -0.01 {
                Action::Decrease
            } else {
                Action::Unchanged
            };
            let prev_position = position;
            position = (position * (1.0 + delta)).max(1.0);

            let mut signals = SignalValues::default();
            for col in SignalColumn::ALL {
                let state = &mut signal_state[col.index()];
                *state = 0.9 * *state + rng.gen_range(-1.0..1.0) + 0.1 * px_change * 100.0;
                let missing = rng.gen_bool(0.1);
                signals.set(col, (!missing).then_some(*state));
            }

            rows.push(Observation {
                date: *date,
                broker: broker.clone(),
                contract: contract_for(spec.start, i, spec.contract_span),
                side,
                action,
                position: position.round(),
                position_change_rate: position / prev_position - 1.0,
                price: (px * 100.0).round() / 100.0,
                price_change_rate: (i > 0).then_some(px_change),
                signals,
            });
        }
    }

    RecordStore::from_observations(rows)
}

fn weekdays(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut day = start;
    while dates.len() < count {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(day);
        }
        day += Duration::days(1);
    }
    dates
}

/// Contract code `M{yy}{mm}` for the contract active on trading day `i`.
fn contract_for(start: NaiveDate, i: usize, span: usize) -> String {
    let roll = i / span.max(1);
    let months = start.month0() as usize + 4 * (roll + 1);
    let year = start.year() as usize + months / 12;
    let month = months % 12 + 1;
    format!("M{:02}{:02}", year % 100, month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_deterministic() {
        let spec = SampleSpec {
            days: 30,
            ..SampleSpec::default()
        };
        let a = sample_store(&spec);
        let b = sample_store(&spec);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.len(), 30 * spec.brokers.len());
    }

    #[test]
    fn sample_skips_weekends() {
        let store = sample_store(&SampleSpec {
            days: 20,
            ..SampleSpec::default()
        });
        assert!(store
            .rows()
            .iter()
            .all(|o| !matches!(o.date.weekday(), Weekday::Sat | Weekday::Sun)));
    }

    #[test]
    fn contracts_roll_forward() {
        let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
        assert_eq!(contract_for(start, 0, 100), "M2205");
        assert_eq!(contract_for(start, 100, 100), "M2209");
        assert_eq!(contract_for(start, 200, 100), "M2301");
    }
}
