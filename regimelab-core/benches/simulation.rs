//! Criterion benchmarks for pipeline hot paths.
//!
//! Benchmarks:
//! 1. Panel simulation (parameter draws, regime chain, series)
//! 2. Windowing (group, sort, assemble, label)
//! 3. Feature engineering (per-window statistics)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use regimelab_core::config::{Mode, SimulationConfig};
use regimelab_core::features::{engineer_features, FeatureConfig};
use regimelab_core::sim::simulate_panel;
use regimelab_core::windows::{make_windows, make_windows_multi, WindowColumns};

fn bench_panel_simulation(c: &mut Criterion) {
    let config = SimulationConfig::default();
    let mut group = c.benchmark_group("simulate_panel");
    for n_markets in [10usize, 50, 200] {
        group.bench_with_input(
            BenchmarkId::from_parameter(n_markets),
            &n_markets,
            |b, &n| {
                b.iter(|| simulate_panel(black_box(&config), n, 0, Mode::Baseline).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_windowing(c: &mut Criterion) {
    let config = SimulationConfig::default();
    let panel = simulate_panel(&config, 50, 0, Mode::Baseline).unwrap();
    let df = panel.to_dataframe().unwrap();
    let columns = WindowColumns::default();

    c.bench_function("make_windows_L18", |b| {
        b.iter(|| make_windows(black_box(&df), 18, &columns).unwrap());
    });
    c.bench_function("make_windows_multi_18_24_36", |b| {
        b.iter(|| make_windows_multi(black_box(&df), &[18, 24, 36], &columns).unwrap());
    });
}

fn bench_feature_engineering(c: &mut Criterion) {
    let config = SimulationConfig::default();
    let panel = simulate_panel(&config, 50, 0, Mode::Baseline).unwrap();
    let df = panel.to_dataframe().unwrap();
    let windows = make_windows(&df, 18, &WindowColumns::default()).unwrap();
    let feature_config = FeatureConfig::default();

    c.bench_function("engineer_features_L18", |b| {
        b.iter(|| engineer_features(black_box(&windows), &feature_config));
    });
}

criterion_group!(
    benches,
    bench_panel_simulation,
    bench_windowing,
    bench_feature_engineering
);
criterion_main!(benches);
