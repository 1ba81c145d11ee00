//! Panel projection: turn a filtered view into the named series each chart
//! needs.
//!
//! Projections are pure functions of a [`View`](crate::filter::View) and a
//! display-option set. The required-selection policy (brokers, years and
//! contracts must be chosen) is applied one level up, in
//! [`Dashboard`](crate::dashboard::Dashboard).

pub mod absolute;
pub mod change_rate;
pub mod indicator;
pub mod options;
pub mod series;

pub use absolute::project_absolute;
pub use change_rate::project_change_rate;
pub use indicator::project_indicator;
pub use options::{AbsoluteOption, ChangeOption, IndicatorOptions, ReferenceOption};
pub use series::{
    Axis, AxisSide, AxisSpec, Emphasis, Panel, PanelKind, PanelOutput, Point, Series, ValueFormat,
};
