//! Criterion benchmarks for BrokerScope hot paths.
//!
//! Benchmarks:
//! 1. Filtering the store
//! 2. Rolling mean over growing series
//! 3. Full dashboard render for one selection
//! 4. Correlation matrix

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use brokerscope_core::correlation::correlation_matrix;
use brokerscope_core::data::{sample_store, SampleSpec};
use brokerscope_core::derive::{rolling_mean, SmoothingWindow};
use brokerscope_core::{Dashboard, DashboardRequest, Dataset, FilterSet};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_dashboard(days: usize) -> Dashboard {
    let store = sample_store(&SampleSpec {
        days,
        ..SampleSpec::default()
    });
    Dashboard::new(Dataset::new(store))
}

fn first_selection(dashboard: &Dashboard) -> FilterSet {
    let catalog = dashboard.dataset().catalog();
    let scoped = FilterSet::new()
        .brokers(catalog.brokers().iter().take(1).cloned())
        .years(catalog.years().iter().take(1).copied());
    let contracts = dashboard.contract_choices(&scoped);
    scoped.contracts(contracts.into_iter().take(1))
}

// ── 1. Filter ────────────────────────────────────────────────────────

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let dashboard = make_dashboard(1260);
    let filters = first_selection(&dashboard);
    let store = dashboard.dataset().store();

    group.bench_function("one_contract_3780_rows", |b| {
        b.iter(|| store.filter(black_box(&filters)).len());
    });
    group.bench_function("contract_choices", |b| {
        let scoped = filters.without_contracts();
        b.iter(|| dashboard.contract_choices(black_box(&scoped)));
    });

    group.finish();
}

// ── 2. Rolling Mean ──────────────────────────────────────────────────

fn bench_rolling(c: &mut Criterion) {
    let mut group = c.benchmark_group("rolling_mean");
    let window = SmoothingWindow::new(30).unwrap();

    for len in [250usize, 1260, 5000] {
        let values: Vec<Option<f64>> = (0..len)
            .map(|i| (i % 11 != 0).then(|| (i as f64 * 0.1).sin()))
            .collect();
        group.bench_with_input(BenchmarkId::new("w30", len), &values, |b, values| {
            b.iter(|| rolling_mean(black_box(values), window));
        });
    }

    group.finish();
}

// ── 3. Dashboard Render ──────────────────────────────────────────────

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard_render");

    for days in [250usize, 1260] {
        let dashboard = make_dashboard(days);
        let request = DashboardRequest {
            filters: first_selection(&dashboard),
            ..DashboardRequest::default()
        };
        group.bench_with_input(BenchmarkId::new("all_panels", days), &request, |b, request| {
            b.iter(|| dashboard.render(black_box(request)));
        });
    }

    group.finish();
}

// ── 4. Correlation ───────────────────────────────────────────────────

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation");
    let dashboard = make_dashboard(1260);
    let view = dashboard.dataset().store().view();

    group.bench_function("full_store_18_columns", |b| {
        b.iter(|| correlation_matrix(black_box(&view)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_filter,
    bench_rolling,
    bench_render,
    bench_correlation,
);
criterion_main!(benches);
