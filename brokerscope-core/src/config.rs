//! Dashboard defaults, loadable from TOML.
//!
//! ```toml
//! window = 7
//! absolute = ["holding", "price"]
//! change_rate = ["holding_change", "price_change"]
//!
//! [indicators.trend]
//! signals = ["dual_ma", "trix"]
//! show_average = true
//! references = ["price"]
//! ```
//!
//! Every key is optional. A group missing from `[indicators]` offers all of
//! its signals with no average and no references. A group table that is
//! present but has no `signals` key starts with none chosen.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

use crate::derive::SmoothingWindow;
use crate::domain::IndicatorGroup;
use crate::panels::{AbsoluteOption, ChangeOption, IndicatorOptions};

/// Options for each of the four indicator-group panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorPanels {
    #[serde(default = "fundamental")]
    pub fundamental: IndicatorOptions,
    #[serde(default = "trend")]
    pub trend: IndicatorOptions,
    #[serde(default = "oscillator")]
    pub oscillator: IndicatorOptions,
    #[serde(default = "volume")]
    pub volume: IndicatorOptions,
}

fn fundamental() -> IndicatorOptions {
    IndicatorOptions::all_signals(IndicatorGroup::Fundamental)
}

fn trend() -> IndicatorOptions {
    IndicatorOptions::all_signals(IndicatorGroup::Trend)
}

fn oscillator() -> IndicatorOptions {
    IndicatorOptions::all_signals(IndicatorGroup::Oscillator)
}

fn volume() -> IndicatorOptions {
    IndicatorOptions::all_signals(IndicatorGroup::Volume)
}

impl Default for IndicatorPanels {
    fn default() -> Self {
        Self {
            fundamental: fundamental(),
            trend: trend(),
            oscillator: oscillator(),
            volume: volume(),
        }
    }
}

impl IndicatorPanels {
    pub fn get(&self, group: IndicatorGroup) -> &IndicatorOptions {
        match group {
            IndicatorGroup::Fundamental => &self.fundamental,
            IndicatorGroup::Trend => &self.trend,
            IndicatorGroup::Oscillator => &self.oscillator,
            IndicatorGroup::Volume => &self.volume,
        }
    }

    pub fn get_mut(&mut self, group: IndicatorGroup) -> &mut IndicatorOptions {
        match group {
            IndicatorGroup::Fundamental => &mut self.fundamental,
            IndicatorGroup::Trend => &mut self.trend,
            IndicatorGroup::Oscillator => &mut self.oscillator,
            IndicatorGroup::Volume => &mut self.volume,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub window: SmoothingWindow,
    pub absolute: BTreeSet<AbsoluteOption>,
    pub change_rate: BTreeSet<ChangeOption>,
    pub indicators: IndicatorPanels,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window: SmoothingWindow::default(),
            absolute: AbsoluteOption::ALL.into_iter().collect(),
            change_rate: ChangeOption::ALL.into_iter().collect(),
            indicators: IndicatorPanels::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Default options for one indicator panel.
    pub fn indicator(&self, group: IndicatorGroup) -> &IndicatorOptions {
        self.indicators.get(group)
    }
}
