//! The immutable in-memory record store.
//!
//! Rows are cleaned exactly once, on the way in: an observation missing
//! `position`, `position_change_rate`, `price`, side or action never enters
//! the store.
//! After construction the store is never mutated; every downstream view
//! borrows from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Action, Observation, Side, SignalColumn, SignalValues};
use crate::filter::{FilterSet, View};

/// An observation as read from the source, before cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub date: NaiveDate,
    pub broker: String,
    pub contract: String,
    /// `None` when the source cell was blank.
    pub side: Option<Side>,
    pub action: Option<Action>,
    pub position: Option<f64>,
    pub position_change_rate: Option<f64>,
    pub price: Option<f64>,
    pub price_change_rate: Option<f64>,
    pub signals: SignalValues,
}

impl RawObservation {
    /// Promote to an [`Observation`] if every required field is present.
    pub fn into_observation(self) -> Option<Observation> {
        Some(Observation {
            position: finite(self.position)?,
            position_change_rate: finite(self.position_change_rate)?,
            price: finite(self.price)?,
            date: self.date,
            broker: self.broker,
            contract: self.contract,
            side: self.side?,
            action: self.action?,
            price_change_rate: finite(self.price_change_rate),
            signals: self.signals,
        })
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Outcome of cleaning a batch of raw observations.
#[derive(Debug)]
pub struct CleanedStore {
    pub store: RecordStore,
    /// Rows rejected for missing a required field or a side/action code.
    pub dropped: usize,
}

/// Immutable table of observations in source order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    rows: Vec<Observation>,
}

impl RecordStore {
    /// Build a store from already-clean observations.
    pub fn from_observations(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    /// Build a store from raw rows, dropping those missing a required field.
    pub fn from_raw(raw: impl IntoIterator<Item = RawObservation>) -> CleanedStore {
        let mut rows = Vec::new();
        let mut dropped = 0;
        for record in raw {
            match record.into_observation() {
                Some(obs) => rows.push(obs),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            tracing::debug!(
                dropped,
                "dropped rows missing position, change rate, price, side or action"
            );
        }
        CleanedStore {
            store: Self { rows },
            dropped,
        }
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Unfiltered view over every row.
    pub fn view(&self) -> View<'_> {
        View::new(self.rows.iter().collect())
    }

    /// Apply a predicate set to the whole store.
    pub fn filter(&self, filters: &FilterSet) -> View<'_> {
        View::new(self.rows.iter().filter(|obs| filters.matches(obs)).collect())
    }

    /// Deterministic BLAKE3 fingerprint over every row, in store order.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for obs in &self.rows {
            hasher.update(obs.date.to_string().as_bytes());
            hasher.update(obs.broker.as_bytes());
            hasher.update(&[0]);
            hasher.update(obs.contract.as_bytes());
            hasher.update(&[0]);
            hasher.update(obs.side.code().as_bytes());
            hasher.update(&obs.action.code().to_le_bytes());
            hasher.update(&obs.position.to_le_bytes());
            hasher.update(&obs.position_change_rate.to_le_bytes());
            hasher.update(&obs.price.to_le_bytes());
            update_optional(&mut hasher, obs.price_change_rate);
            for column in SignalColumn::ALL {
                update_optional(&mut hasher, obs.signal(column));
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}

fn update_optional(hasher: &mut blake3::Hasher, value: Option<f64>) {
    match value {
        Some(v) => {
            hasher.update(&[1]);
            hasher.update(&v.to_le_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
}
