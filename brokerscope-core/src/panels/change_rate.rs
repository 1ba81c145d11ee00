//! Change-rate panel: smoothed position and price change rates, both as
//! percentages.

use std::collections::BTreeSet;

use super::options::ChangeOption;
use super::series::{Axis, AxisSide, AxisSpec, Emphasis, Panel, PanelKind, Series, ValueFormat};
use crate::derive::{rolling_mean, SmoothingWindow};
use crate::domain::NumericField;
use crate::filter::View;

pub const TITLE: &str = "Change rate";

pub fn project_change_rate(
    view: &View<'_>,
    options: &BTreeSet<ChangeOption>,
    window: SmoothingWindow,
) -> Panel {
    let mut panel = Panel::new(
        PanelKind::ChangeRate,
        TITLE,
        vec![
            AxisSpec::new(
                Axis::Primary,
                "Position change rate",
                AxisSide::Left,
                ValueFormat::Percent,
            ),
            AxisSpec::new(
                Axis::Secondary,
                "Price change rate",
                AxisSide::Right,
                ValueFormat::Percent,
            ),
        ],
    );
    let dates = view.dates();

    if options.contains(&ChangeOption::HoldingChange) {
        panel.series.push(Series::new(
            "Position change rate",
            Axis::Primary,
            Emphasis::Standard,
            &dates,
            rolling_mean(&view.column(NumericField::PositionChangeRate), window),
        ));
    }
    if options.contains(&ChangeOption::PriceChange) {
        panel.series.push(Series::new(
            "Price change rate",
            Axis::Secondary,
            Emphasis::Standard,
            &dates,
            rolling_mean(&view.column(NumericField::PriceChangeRate), window),
        ));
    }
    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::{assert_approx_opt, DEFAULT_EPSILON};
    use crate::panels::test_support::rows;

    #[test]
    fn rates_are_smoothed() {
        // position_change_rate = 0.00, 0.01, 0.02; price_change_rate = None, 0.02, 0.02
        let rows = rows(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]);
        let view = View::new(rows.iter().collect());
        let window = SmoothingWindow::new(2).unwrap();
        let panel = project_change_rate(&view, &BTreeSet::from(ChangeOption::ALL), window);

        let pos = panel.series("Position change rate").unwrap().values();
        assert_approx_opt(pos[0], Some(0.0), DEFAULT_EPSILON);
        assert_approx_opt(pos[1], Some(0.005), DEFAULT_EPSILON);
        assert_approx_opt(pos[2], Some(0.015), DEFAULT_EPSILON);

        let price = panel.series("Price change rate").unwrap().values();
        assert_eq!(price[0], None);
        assert_approx_opt(price[1], Some(0.02), DEFAULT_EPSILON);
        assert_approx_opt(price[2], Some(0.02), DEFAULT_EPSILON);
    }

    #[test]
    fn both_axes_are_percent() {
        let view = View::default();
        let panel = project_change_rate(&view, &BTreeSet::new(), SmoothingWindow::default());
        assert!(panel.axes.iter().all(|a| a.format == ValueFormat::Percent));
    }

    #[test]
    fn empty_view_gives_empty_series() {
        let view = View::default();
        let panel = project_change_rate(
            &view,
            &BTreeSet::from(ChangeOption::ALL),
            SmoothingWindow::default(),
        );
        assert_eq!(panel.series.len(), 2);
        assert!(panel.series.iter().all(Series::is_empty));
    }
}
