//! Indicator-group panel: muted smoothed signal lines, an optional
//! highlighted cross-signal average and optional normalized reference
//! overlays on their own axis.

use super::options::{IndicatorOptions, ReferenceOption};
use super::series::{Axis, AxisSide, AxisSpec, Emphasis, Panel, PanelKind, Series, ValueFormat};
use crate::derive::{cross_signal_mean, min_max_normalize, rolling_mean, SmoothingWindow};
use crate::domain::{IndicatorGroup, NumericField};
use crate::filter::View;

pub const AVERAGE: &str = "Average";
pub const POSITION_REFERENCE: &str = "Position reference";
pub const PRICE_REFERENCE: &str = "Price reference";

pub fn project_indicator(
    view: &View<'_>,
    group: IndicatorGroup,
    options: &IndicatorOptions,
    window: SmoothingWindow,
) -> Panel {
    let mut panel = Panel::new(
        PanelKind::Indicator(group),
        group.title(),
        vec![
            AxisSpec::new(Axis::Primary, "Indicator", AxisSide::Left, ValueFormat::Plain),
            AxisSpec::new(Axis::Reference, "Reference", AxisSide::Right, ValueFormat::Fixed2),
        ],
    );
    let dates = view.dates();
    let chosen = options.chosen(group);

    let raw: Vec<Vec<Option<f64>>> = chosen
        .iter()
        .map(|&col| view.column(NumericField::Signal(col)))
        .collect();

    for (col, values) in chosen.iter().zip(&raw) {
        panel.series.push(Series::new(
            col.label(),
            Axis::Primary,
            Emphasis::Muted,
            &dates,
            rolling_mean(values, window),
        ));
    }

    if options.show_average {
        if let Some(mean) = cross_signal_mean(&raw, window) {
            panel.series.push(Series::new(
                AVERAGE,
                Axis::Primary,
                Emphasis::Highlighted,
                &dates,
                mean,
            ));
        }
    }

    for (option, field, name) in [
        (ReferenceOption::Holding, NumericField::Position, POSITION_REFERENCE),
        (ReferenceOption::Price, NumericField::Price, PRICE_REFERENCE),
    ] {
        if options.references.contains(&option) {
            panel.series.push(Series::new(
                name,
                Axis::Reference,
                Emphasis::Reference,
                &dates,
                min_max_normalize(&view.column(field)),
            ));
        }
    }

    panel
}
