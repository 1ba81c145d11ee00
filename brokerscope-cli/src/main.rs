//! BrokerScope CLI: inspect the dataset and emit dashboard panels as JSON.
//!
//! Commands:
//! - `options`: brokers, years, contract order and signal groups in the data
//! - `contracts`: contract choices for a broker/year/side/action selection
//! - `panel`: one chart panel for a selection
//! - `render`: every panel plus the correlation heatmap
//! - `heatmap`: the correlation heatmap alone
//! - `sample`: write the synthetic dataset to CSV
//!
//! JSON goes to stdout; logs go to stderr (`RUST_LOG` controls the level).

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use brokerscope_core::data::{sample_store, write_csv, SampleSpec};
use brokerscope_core::derive::SmoothingWindow;
use brokerscope_core::domain::{Action, IndicatorGroup, Side, SignalColumn};
use brokerscope_core::panels::{AbsoluteOption, ChangeOption, ReferenceOption};
use brokerscope_core::{Dashboard, DashboardConfig, DashboardRequest, Dataset, FilterSet};

#[derive(Parser)]
#[command(
    name = "brokerscope",
    about = "BrokerScope CLI: broker position and signal dashboard panels"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List brokers, years, contracts and signal groups in the dataset.
    Options {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Contract choices for the current broker/year/side/action selection.
    Contracts {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Render one panel.
    Panel {
        /// Which panel to render.
        #[arg(value_enum)]
        panel: PanelChoice,
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Render every panel and the correlation heatmap.
    Render {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Render the correlation heatmap.
    Heatmap {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Write the synthetic sample dataset to a CSV file.
    Sample {
        /// Output CSV path.
        #[arg(long)]
        out: PathBuf,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Number of weekdays to generate.
        #[arg(long, default_value_t = 500)]
        days: usize,

        /// First date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,
    },
}

/// Where the records come from.
#[derive(Args)]
struct SourceArgs {
    /// Path to a CSV file of broker position records.
    #[arg(long, conflicts_with = "sample")]
    data: Option<PathBuf>,

    /// Use the built-in synthetic dataset.
    #[arg(long, default_value_t = false)]
    sample: bool,
}

/// Filter predicates. Each flag may be repeated; omitted means unconstrained.
#[derive(Args)]
struct FilterArgs {
    /// Broker name.
    #[arg(long = "broker")]
    brokers: Vec<String>,

    /// Calendar year.
    #[arg(long = "year")]
    years: Vec<i32>,

    /// Side: long/short, l/s.
    #[arg(long = "side")]
    sides: Vec<Side>,

    /// Action: increase/decrease/unchanged, or 1/-1/0.
    #[arg(long = "action", allow_hyphen_values = true)]
    actions: Vec<Action>,

    /// Contract code.
    #[arg(long = "contract")]
    contracts: Vec<String>,
}

/// Display options. Anything not given falls back to the config file, which
/// is also the only place to set indicator references per panel.
#[derive(Args)]
struct DisplayArgs {
    /// TOML file with dashboard defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Smoothing window (1..=30).
    #[arg(long)]
    window: Option<usize>,

    /// Series on the absolute panel.
    #[arg(long = "absolute", value_enum)]
    absolute: Vec<SeriesChoice>,

    /// Series on the change-rate panel.
    #[arg(long = "change", value_enum)]
    change: Vec<SeriesChoice>,

    /// Signal column (key, label or source header). Replaces the chosen
    /// signals of that column's group only; other groups keep their defaults.
    #[arg(long = "signal")]
    signals: Vec<SignalColumn>,

    /// Indicator group whose panel shows the cross-signal average.
    #[arg(long = "average")]
    averages: Vec<IndicatorGroup>,

    /// Normalized reference overlay, added to all four indicator panels.
    #[arg(long = "reference", value_enum)]
    references: Vec<SeriesChoice>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SeriesChoice {
    Holding,
    Price,
}

#[derive(Clone, Copy, ValueEnum)]
enum PanelChoice {
    Absolute,
    ChangeRate,
    Fundamental,
    Trend,
    Oscillator,
    Volume,
}

impl PanelChoice {
    fn group(self) -> Option<IndicatorGroup> {
        match self {
            PanelChoice::Absolute | PanelChoice::ChangeRate => None,
            PanelChoice::Fundamental => Some(IndicatorGroup::Fundamental),
            PanelChoice::Trend => Some(IndicatorGroup::Trend),
            PanelChoice::Oscillator => Some(IndicatorGroup::Oscillator),
            PanelChoice::Volume => Some(IndicatorGroup::Volume),
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Options { source } => run_options(&source),
        Commands::Contracts { source, filters } => {
            let dashboard = load_dashboard(&source)?;
            print_json(&dashboard.contract_choices(&filters.to_filter_set()))
        }
        Commands::Panel {
            panel,
            source,
            filters,
            display,
        } => run_panel(panel, &source, &filters, &display),
        Commands::Render {
            source,
            filters,
            display,
        } => {
            let dashboard = load_dashboard(&source)?;
            let request = build_request(&filters, &display)?;
            print_json(&dashboard.render(&request))
        }
        Commands::Heatmap { source, filters } => {
            let dashboard = load_dashboard(&source)?;
            print_json(&dashboard.render_heatmap(&filters.to_filter_set()))
        }
        Commands::Sample {
            out,
            seed,
            days,
            start,
        } => run_sample(out, seed, days, start),
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(cfg!(debug_assertions))
        .init()
}

fn load_dashboard(source: &SourceArgs) -> Result<Dashboard> {
    let dataset = match (&source.data, source.sample) {
        (Some(path), _) => Dataset::from_csv(path)
            .with_context(|| format!("loading {}", path.display()))?,
        (None, true) => Dataset::new(sample_store(&SampleSpec::default())),
        (None, false) => bail!("one of --data or --sample is required"),
    };
    Ok(Dashboard::new(dataset))
}

impl FilterArgs {
    fn to_filter_set(&self) -> FilterSet {
        FilterSet::new()
            .brokers(self.brokers.iter().cloned())
            .years(self.years.iter().copied())
            .sides(self.sides.iter().copied())
            .actions(self.actions.iter().copied())
            .contracts(self.contracts.iter().cloned())
    }
}

/// Start from the config (or its defaults) and override with any flags given.
fn build_request(filters: &FilterArgs, display: &DisplayArgs) -> Result<DashboardRequest> {
    let config = match &display.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    let mut request = DashboardRequest::from_config(&config, filters.to_filter_set());

    if let Some(size) = display.window {
        request.window = SmoothingWindow::new(size)?;
    }

    if !display.absolute.is_empty() {
        request.absolute = display
            .absolute
            .iter()
            .map(|s| match s {
                SeriesChoice::Holding => AbsoluteOption::Holding,
                SeriesChoice::Price => AbsoluteOption::Price,
            })
            .collect();
    }
    if !display.change.is_empty() {
        request.change_rate = display
            .change
            .iter()
            .map(|s| match s {
                SeriesChoice::Holding => ChangeOption::HoldingChange,
                SeriesChoice::Price => ChangeOption::PriceChange,
            })
            .collect();
    }

    let references: BTreeSet<ReferenceOption> = display
        .references
        .iter()
        .map(|r| match r {
            SeriesChoice::Holding => ReferenceOption::Holding,
            SeriesChoice::Price => ReferenceOption::Price,
        })
        .collect();
    for group in IndicatorGroup::ALL {
        let options = request.indicators.get_mut(group);
        let signals: Vec<SignalColumn> = display
            .signals
            .iter()
            .copied()
            .filter(|c| c.group() == group)
            .collect();
        if !signals.is_empty() {
            options.signals = signals;
        }
        options.show_average |= display.averages.contains(&group);
        options.references.extend(references.iter().copied());
    }

    Ok(request)
}

fn run_options(source: &SourceArgs) -> Result<()> {
    let dashboard = load_dashboard(source)?;
    let catalog = dashboard.dataset().catalog();
    let groups: Vec<_> = IndicatorGroup::ALL
        .into_iter()
        .map(|g| {
            json!({
                "group": g.key(),
                "title": g.title(),
                "signals": g.columns().iter().map(|c| c.key()).collect::<Vec<_>>(),
            })
        })
        .collect();

    print_json(&json!({
        "rows": dashboard.dataset().store().len(),
        "brokers": catalog.brokers(),
        "years": catalog.years(),
        "contracts": catalog.contract_order().contracts(),
        "sides": Side::ALL.iter().map(|s| s.label()).collect::<Vec<_>>(),
        "actions": Action::ALL.iter().map(|a| a.label()).collect::<Vec<_>>(),
        "window": {"min": SmoothingWindow::MIN, "max": SmoothingWindow::MAX},
        "indicator_groups": groups,
    }))
}

fn run_panel(
    panel: PanelChoice,
    source: &SourceArgs,
    filters: &FilterArgs,
    display: &DisplayArgs,
) -> Result<()> {
    let dashboard = load_dashboard(source)?;
    let request = build_request(filters, display)?;
    let filters = &request.filters;

    let output = match panel.group() {
        Some(group) => dashboard.render_indicator(
            filters,
            group,
            request.indicators.get(group),
            request.window,
        ),
        None if matches!(panel, PanelChoice::Absolute) => {
            dashboard.render_absolute(filters, &request.absolute)
        }
        None => dashboard.render_change_rate(filters, &request.change_rate, request.window),
    };
    if let Some(hint) = blank_panel_hint(panel, &request) {
        tracing::warn!("panel is empty; {hint}");
    }
    print_json(&output)
}

/// Why `panel` renders blank for `request`, if it does.
fn blank_panel_hint(panel: PanelChoice, request: &DashboardRequest) -> Option<String> {
    if let Some(group) = panel.group() {
        if request.indicators.get(group).chosen(group).is_empty() {
            return Some(format!(
                "no {} signal chosen; pass --signal or set [indicators.{}] signals",
                group.key(),
                group.key()
            ));
        }
    }
    (!request.filters.is_renderable())
        .then(|| "--broker, --year and --contract are all required".to_string())
}

fn run_sample(out: PathBuf, seed: u64, days: usize, start: Option<String>) -> Result<()> {
    let mut spec = SampleSpec {
        seed,
        days,
        ..SampleSpec::default()
    };
    if let Some(start) = start {
        spec.start = NaiveDate::parse_from_str(&start, "%Y-%m-%d")
            .with_context(|| format!("invalid --start '{start}'"))?;
    }

    let store = sample_store(&spec);
    let file = std::fs::File::create(&out)
        .with_context(|| format!("creating {}", out.display()))?;
    write_csv(&store, file)?;
    tracing::info!(rows = store.len(), path = %out.display(), "sample written");
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display() -> DisplayArgs {
        DisplayArgs {
            config: None,
            window: None,
            absolute: Vec::new(),
            change: Vec::new(),
            signals: Vec::new(),
            averages: Vec::new(),
            references: Vec::new(),
        }
    }

    fn filters() -> FilterArgs {
        FilterArgs {
            brokers: vec!["Citic".into()],
            years: vec![2022],
            sides: Vec::new(),
            actions: Vec::new(),
            contracts: vec!["M2205".into()],
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_come_from_config() {
        let request = build_request(&filters(), &display()).unwrap();
        let defaults = DashboardRequest::from_config(
            &DashboardConfig::default(),
            filters().to_filter_set(),
        );
        assert_eq!(request, defaults);
        assert!(request.filters.is_renderable());
    }

    #[test]
    fn flags_override_config() {
        let args = DisplayArgs {
            window: Some(3),
            absolute: vec![SeriesChoice::Price],
            change: vec![SeriesChoice::Holding],
            signals: vec![SignalColumn::Cci],
            averages: vec![IndicatorGroup::Oscillator],
            references: vec![SeriesChoice::Holding],
            ..display()
        };
        let request = build_request(&filters(), &args).unwrap();
        assert_eq!(request.window.get(), 3);
        assert_eq!(request.absolute, BTreeSet::from([AbsoluteOption::Price]));
        assert_eq!(request.change_rate, BTreeSet::from([ChangeOption::HoldingChange]));
        let osc = request.indicators.get(IndicatorGroup::Oscillator);
        assert_eq!(osc.signals, vec![SignalColumn::Cci]);
        assert!(osc.show_average);
        assert!(osc.references.contains(&ReferenceOption::Holding));
    }

    #[test]
    fn signal_and_average_flags_only_touch_their_group() {
        let args = DisplayArgs {
            signals: vec![SignalColumn::Cci, SignalColumn::DualMa],
            averages: vec![IndicatorGroup::Trend],
            ..display()
        };
        let request = build_request(&filters(), &args).unwrap();
        let defaults = DashboardConfig::default();

        let trend = request.indicators.get(IndicatorGroup::Trend);
        assert_eq!(trend.signals, vec![SignalColumn::DualMa]);
        assert!(trend.show_average);

        let osc = request.indicators.get(IndicatorGroup::Oscillator);
        assert_eq!(osc.signals, vec![SignalColumn::Cci]);
        assert!(!osc.show_average);

        for group in [IndicatorGroup::Fundamental, IndicatorGroup::Volume] {
            assert_eq!(request.indicators.get(group), defaults.indicator(group));
        }
    }

    #[test]
    fn blank_panel_hint_names_the_missing_input() {
        let mut request = build_request(&filters(), &display()).unwrap();
        assert_eq!(blank_panel_hint(PanelChoice::Trend, &request), None);

        request.indicators.trend.signals.clear();
        let hint = blank_panel_hint(PanelChoice::Trend, &request).unwrap();
        assert!(hint.contains("no trend signal chosen"));
        assert_eq!(blank_panel_hint(PanelChoice::Absolute, &request), None);

        request.filters.years = Default::default();
        let hint = blank_panel_hint(PanelChoice::Absolute, &request).unwrap();
        assert!(hint.contains("--year"));
    }

    #[test]
    fn window_out_of_range_is_an_error() {
        let args = DisplayArgs {
            window: Some(0),
            ..display()
        };
        assert!(build_request(&filters(), &args).is_err());
    }

    #[test]
    fn parses_repeated_filters() {
        let cli = Cli::try_parse_from([
            "brokerscope",
            "contracts",
            "--sample",
            "--broker",
            "Citic",
            "--broker",
            "Yongan",
            "--year",
            "2022",
            "--side",
            "long",
            "--action",
            "-1",
        ])
        .unwrap();
        match cli.command {
            Commands::Contracts { filters, .. } => {
                let set = filters.to_filter_set();
                assert_eq!(set.brokers.len(), 2);
                assert!(set.sides.contains(&Side::Long));
                assert!(set.actions.contains(&Action::Decrease));
            }
            _ => panic!("expected contracts command"),
        }
    }
}
