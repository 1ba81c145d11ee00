//! Plot-ready series and panel metadata handed to the rendering layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::IndicatorGroup;

/// Which of up to three value axes a series is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Primary,
    Secondary,
    Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSide {
    Left,
    Right,
}

/// How tick labels on an axis are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    Plain,
    /// Values are fractions, shown as percentages with two decimals.
    Percent,
    /// Two fixed decimals.
    Fixed2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub axis: Axis,
    pub title: String,
    pub side: AxisSide,
    pub format: ValueFormat,
}

impl AxisSpec {
    pub fn new(axis: Axis, title: &str, side: AxisSide, format: ValueFormat) -> Self {
        Self {
            axis,
            title: title.to_string(),
            side,
            format,
        }
    }
}

/// Visual weight of a line.
///
/// Every individual signal line in an indicator panel is `Muted` so the
/// `Highlighted` average stands out against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Standard,
    Muted,
    Highlighted,
    Reference,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: NaiveDate,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub axis: Axis,
    pub emphasis: Emphasis,
    pub points: Vec<Point>,
}

impl Series {
    /// Zip a date axis with row-aligned values.
    pub fn new(
        name: impl Into<String>,
        axis: Axis,
        emphasis: Emphasis,
        dates: &[NaiveDate],
        values: Vec<Option<f64>>,
    ) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self {
            name: name.into(),
            axis,
            emphasis,
            points: dates
                .iter()
                .zip(values)
                .map(|(&x, y)| Point { x, y })
                .collect(),
        }
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.y).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "group")]
pub enum PanelKind {
    Absolute,
    ChangeRate,
    Indicator(IndicatorGroup),
}

/// One chart's worth of series plus axis and display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub kind: PanelKind,
    pub title: String,
    pub unified_hover: bool,
    pub axes: Vec<AxisSpec>,
    pub series: Vec<Series>,
}

impl Panel {
    pub fn new(kind: PanelKind, title: &str, axes: Vec<AxisSpec>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            unified_hover: true,
            axes,
            series: Vec::new(),
        }
    }

    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    pub fn series_names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }
}

/// A panel, or the explicit "nothing to draw" result when a required
/// selection is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "panel")]
pub enum PanelOutput {
    Empty,
    Chart(Panel),
}

impl PanelOutput {
    pub fn is_empty(&self) -> bool {
        matches!(self, PanelOutput::Empty)
    }

    pub fn panel(&self) -> Option<&Panel> {
        match self {
            PanelOutput::Chart(panel) => Some(panel),
            PanelOutput::Empty => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_zips_dates_and_values() {
        let d0 = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
        let s = Series::new(
            "Position",
            Axis::Primary,
            Emphasis::Standard,
            &[d0, d1],
            vec![Some(1.0), None],
        );
        assert_eq!(s.len(), 2);
        assert_eq!(s.points[1], Point { x: d1, y: None });
        assert_eq!(s.values(), vec![Some(1.0), None]);
    }

    #[test]
    fn empty_output_serializes_with_status_tag() {
        let json = serde_json::to_value(PanelOutput::Empty).unwrap();
        assert_eq!(json["status"], "empty");
    }

    #[test]
    fn indicator_kind_carries_group() {
        let json = serde_json::to_value(PanelKind::Indicator(IndicatorGroup::Trend)).unwrap();
        assert_eq!(json["type"], "indicator");
        assert_eq!(json["group"], "trend");
    }
}
