//! A single row of the record store.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::categorical::{Action, Side};
use super::signal::SignalColumn;

/// Per-row values of the fixed signal columns. Each may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalValues([Option<f64>; SignalColumn::COUNT]);

impl SignalValues {
    pub fn new(values: [Option<f64>; SignalColumn::COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, column: SignalColumn) -> Option<f64> {
        self.0[column.index()]
    }

    pub fn set(&mut self, column: SignalColumn, value: Option<f64>) {
        self.0[column.index()] = value;
    }

    /// True when every signal column is missing on this row.
    pub fn all_missing(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

/// One broker position report on one date.
///
/// Required numeric fields are plain `f64`: rows missing them never make it
/// past the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub broker: String,
    pub contract: String,
    pub side: Side,
    pub action: Action,
    pub position: f64,
    pub position_change_rate: f64,
    pub price: f64,
    pub price_change_rate: Option<f64>,
    pub signals: SignalValues,
}

impl Observation {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn signal(&self, column: SignalColumn) -> Option<f64> {
        self.signals.get(column)
    }
}

/// A numeric column of [`Observation`] that derivations can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Position,
    PositionChangeRate,
    Price,
    PriceChangeRate,
    Signal(SignalColumn),
}

impl NumericField {
    pub fn value(self, obs: &Observation) -> Option<f64> {
        match self {
            NumericField::Position => Some(obs.position),
            NumericField::PositionChangeRate => Some(obs.position_change_rate),
            NumericField::Price => Some(obs.price),
            NumericField::PriceChangeRate => obs.price_change_rate,
            NumericField::Signal(column) => obs.signal(column),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NumericField::Position => "Position",
            NumericField::PositionChangeRate => "Position change rate",
            NumericField::Price => "Price",
            NumericField::PriceChangeRate => "Price change rate",
            NumericField::Signal(column) => column.label(),
        }
    }
}

impl From<SignalColumn> for NumericField {
    fn from(column: SignalColumn) -> Self {
        NumericField::Signal(column)
    }
}
