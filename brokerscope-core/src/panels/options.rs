//! Display-option sets offered by each panel.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::{IndicatorGroup, SignalColumn};

/// Series toggles of the absolute price/position panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsoluteOption {
    Holding,
    Price,
}

impl AbsoluteOption {
    pub const ALL: [AbsoluteOption; 2] = [AbsoluteOption::Holding, AbsoluteOption::Price];
}

/// Series toggles of the change-rate panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOption {
    HoldingChange,
    PriceChange,
}

impl ChangeOption {
    pub const ALL: [ChangeOption; 2] = [ChangeOption::HoldingChange, ChangeOption::PriceChange];
}

/// Normalized reference overlays available on indicator panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceOption {
    Holding,
    Price,
}

/// Choices for one indicator-group panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorOptions {
    pub signals: Vec<SignalColumn>,
    pub show_average: bool,
    pub references: BTreeSet<ReferenceOption>,
}

impl IndicatorOptions {
    /// Every column of `group`, no average, no references.
    pub fn all_signals(group: IndicatorGroup) -> Self {
        Self {
            signals: group.columns().to_vec(),
            ..Self::default()
        }
    }

    /// The chosen columns that belong to `group`, in group order, without
    /// duplicates.
    pub fn chosen(&self, group: IndicatorGroup) -> Vec<SignalColumn> {
        group
            .columns()
            .iter()
            .copied()
            .filter(|c| self.signals.contains(c))
            .collect()
    }
}
