//! BrokerScope Core: broker position records, filtering, derived series and
//! chart-ready panels.
//!
//! The pipeline is read-only and stateless per request:
//! - Record store and catalog built once at load time
//! - Filter layer producing borrowed views of the store
//! - Derivations (rolling mean, cross-signal mean, min-max normalization)
//! - Panel projections and the correlation heatmap
//! - A [`dashboard::Dashboard`] facade applying the selection policy

pub mod config;
pub mod correlation;
pub mod dashboard;
pub mod data;
pub mod derive;
pub mod domain;
pub mod filter;
pub mod panels;

pub use config::{ConfigError, DashboardConfig, IndicatorPanels};
pub use dashboard::{Dashboard, DashboardOutput, DashboardRequest};
pub use data::{Dataset, LoadError, RecordStore};
pub use filter::{FilterSet, Selection, View};
