//! The dashboard facade: `render(request) -> output`, nothing held between
//! calls.
//!
//! This is where the query policy lives. Every panel requires a broker, a
//! year and a contract selection; indicator panels also need at least one
//! chosen signal from their group. When a requirement is not met the panel
//! is [`PanelOutput::Empty`] rather than a render of the unfiltered store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::{DashboardConfig, IndicatorPanels};
use crate::correlation::{correlation_matrix, Heatmap};
use crate::data::Dataset;
use crate::derive::SmoothingWindow;
use crate::domain::IndicatorGroup;
use crate::filter::{FilterSet, View};
use crate::panels::{
    project_absolute, project_change_rate, project_indicator, AbsoluteOption, ChangeOption,
    IndicatorOptions, Panel, PanelOutput,
};

/// Everything one UI interaction supplies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardRequest {
    pub filters: FilterSet,
    pub window: SmoothingWindow,
    pub absolute: BTreeSet<AbsoluteOption>,
    pub change_rate: BTreeSet<ChangeOption>,
    pub indicators: IndicatorPanels,
}

impl DashboardRequest {
    /// A request that uses the configured defaults for every panel option.
    pub fn from_config(config: &DashboardConfig, filters: FilterSet) -> Self {
        Self {
            filters,
            window: config.window,
            absolute: config.absolute.clone(),
            change_rate: config.change_rate.clone(),
            indicators: config.indicators.clone(),
        }
    }
}

impl Default for DashboardRequest {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default(), FilterSet::default())
    }
}

/// Every panel for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardOutput {
    /// Contract choices for the current broker/year/side/action selection.
    pub contract_choices: Vec<String>,
    pub absolute: PanelOutput,
    pub change_rate: PanelOutput,
    pub fundamental: PanelOutput,
    pub trend: PanelOutput,
    pub oscillator: PanelOutput,
    pub volume: PanelOutput,
    pub heatmap: Option<Heatmap>,
}

impl DashboardOutput {
    pub fn indicator(&self, group: IndicatorGroup) -> &PanelOutput {
        match group {
            IndicatorGroup::Fundamental => &self.fundamental,
            IndicatorGroup::Trend => &self.trend,
            IndicatorGroup::Oscillator => &self.oscillator,
            IndicatorGroup::Volume => &self.volume,
        }
    }
}

/// Read-only pipeline over a loaded dataset.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
}

impl Dashboard {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Contracts offered for the current selection, in contract order.
    pub fn contract_choices(&self, filters: &FilterSet) -> Vec<String> {
        self.dataset
            .catalog()
            .contract_choices(self.dataset.store(), filters)
    }

    /// The filtered view a panel draws from, or `None` when a required
    /// selection is missing.
    pub fn panel_view(&self, filters: &FilterSet) -> Option<View<'_>> {
        if !filters.is_renderable() {
            tracing::debug!("broker, year or contract selection empty; panel left blank");
            return None;
        }
        Some(self.dataset.store().filter(filters))
    }

    pub fn render_absolute(
        &self,
        filters: &FilterSet,
        options: &BTreeSet<AbsoluteOption>,
    ) -> PanelOutput {
        chart(self.panel_view(filters).as_ref(), |view| {
            project_absolute(view, options)
        })
    }

    pub fn render_change_rate(
        &self,
        filters: &FilterSet,
        options: &BTreeSet<ChangeOption>,
        window: SmoothingWindow,
    ) -> PanelOutput {
        chart(self.panel_view(filters).as_ref(), |view| {
            project_change_rate(view, options, window)
        })
    }

    pub fn render_indicator(
        &self,
        filters: &FilterSet,
        group: IndicatorGroup,
        options: &IndicatorOptions,
        window: SmoothingWindow,
    ) -> PanelOutput {
        if !has_signals(group, options) {
            return PanelOutput::Empty;
        }
        indicator_chart(self.panel_view(filters).as_ref(), group, options, window)
    }

    pub fn render_heatmap(&self, filters: &FilterSet) -> Option<Heatmap> {
        heatmap(self.panel_view(filters).as_ref())
    }

    /// Render every panel for one request from a single filtered view.
    pub fn render(&self, request: &DashboardRequest) -> DashboardOutput {
        let filters = &request.filters;
        let window = request.window;
        let view = self.panel_view(filters);
        let view = view.as_ref();
        let indicator = |group| {
            let options = request.indicators.get(group);
            if has_signals(group, options) {
                indicator_chart(view, group, options, window)
            } else {
                PanelOutput::Empty
            }
        };

        let output = DashboardOutput {
            contract_choices: self.contract_choices(filters),
            absolute: chart(view, |v| project_absolute(v, &request.absolute)),
            change_rate: chart(view, |v| project_change_rate(v, &request.change_rate, window)),
            fundamental: indicator(IndicatorGroup::Fundamental),
            trend: indicator(IndicatorGroup::Trend),
            oscillator: indicator(IndicatorGroup::Oscillator),
            volume: indicator(IndicatorGroup::Volume),
            heatmap: heatmap(view),
        };
        tracing::debug!(
            window = window.get(),
            rows = view.map_or(0, View::len),
            contracts = output.contract_choices.len(),
            "rendered dashboard"
        );
        output
    }
}

fn chart(view: Option<&View<'_>>, project: impl FnOnce(&View<'_>) -> Panel) -> PanelOutput {
    match view {
        Some(view) => PanelOutput::Chart(project(view)),
        None => PanelOutput::Empty,
    }
}

fn has_signals(group: IndicatorGroup, options: &IndicatorOptions) -> bool {
    let any = !options.chosen(group).is_empty();
    if !any {
        tracing::debug!(group = group.key(), "no signals chosen; panel left blank");
    }
    any
}

fn indicator_chart(
    view: Option<&View<'_>>,
    group: IndicatorGroup,
    options: &IndicatorOptions,
    window: SmoothingWindow,
) -> PanelOutput {
    chart(view, |v| project_indicator(v, group, options, window))
}

fn heatmap(view: Option<&View<'_>>) -> Option<Heatmap> {
    view.and_then(|v| correlation_matrix(v)).map(Heatmap::new)
}
