//! Absolute panel: raw position on the left axis, raw price on the right.

use std::collections::BTreeSet;

use super::options::AbsoluteOption;
use super::series::{Axis, AxisSide, AxisSpec, Emphasis, Panel, PanelKind, Series, ValueFormat};
use crate::domain::NumericField;
use crate::filter::View;

pub const TITLE: &str = "Price / Position";

pub fn project_absolute(view: &View<'_>, options: &BTreeSet<AbsoluteOption>) -> Panel {
    let mut panel = Panel::new(
        PanelKind::Absolute,
        TITLE,
        vec![
            AxisSpec::new(Axis::Primary, "Position", AxisSide::Left, ValueFormat::Plain),
            AxisSpec::new(Axis::Secondary, "Price", AxisSide::Right, ValueFormat::Plain),
        ],
    );
    let dates = view.dates();

    if options.contains(&AbsoluteOption::Holding) {
        panel.series.push(Series::new(
            "Position",
            Axis::Primary,
            Emphasis::Standard,
            &dates,
            view.column(NumericField::Position),
        ));
    }
    if options.contains(&AbsoluteOption::Price) {
        panel.series.push(Series::new(
            "Price",
            Axis::Secondary,
            Emphasis::Standard,
            &dates,
            view.column(NumericField::Price),
        ));
    }
    panel
}
