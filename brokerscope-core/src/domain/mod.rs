//! Domain types for BrokerScope

pub mod categorical;
pub mod observation;
pub mod signal;

pub use categorical::{Action, Side, UnknownCode};
pub use observation::{NumericField, Observation, SignalValues};
pub use signal::{IndicatorGroup, SignalColumn};

/// Broker identifier alias
pub type Broker = String;

/// Contract identifier alias
pub type Contract = String;
