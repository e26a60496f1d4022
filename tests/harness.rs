//! End-to-end runs of the benchmark harness with a deterministic clock

use spmv_bench::bench::{
    run_all, BenchConfig, BenchProfile, BenchmarkHarness, Clock, NullProbe, SweepKind,
};
use spmv_bench::{write_coordinate_file, MatrixGenerator, Strategy};
use std::cell::Cell;
use std::time::Duration;

/// Every timed run takes exactly one millisecond
#[derive(Default)]
struct FixedClock {
    calls: Cell<usize>,
}

impl Clock for FixedClock {
    fn time<F: FnOnce()>(&self, f: F) -> Duration {
        f();
        self.calls.set(self.calls.get() + 1);
        Duration::from_millis(1)
    }
}

fn quick_config(dir: &std::path::Path) -> BenchConfig {
    let mut config = BenchConfig::for_profile(BenchProfile::Quick);
    config.system_params.n_threads = 2;
    config.warmup_iterations = 1;
    config.iterations = 2;
    config.sparsity_sweep_size = 40;
    config.size_sweep = vec![10, 20, 30];
    config.output_dir = dir.join("results");
    config.matrix_file = Some(dir.join("input.mtx"));
    config
}

#[test]
fn test_full_run_writes_reports() {
    let dir = tempfile::tempdir().unwrap();
    let config = quick_config(dir.path());
    let m = MatrixGenerator::new(9).generate_sparse(50, 50, 0.9);
    write_coordinate_file(dir.path().join("input.mtx"), &m).unwrap();

    let harness = BenchmarkHarness::with_capabilities(&config, FixedClock::default(), NullProbe).unwrap();
    let summary = run_all(&config, &harness).unwrap();

    assert_eq!(summary.sparsity.kind, SweepKind::Sparsity);
    assert_eq!(summary.sparsity.points.len(), config.sparsity_levels.len());
    assert_eq!(summary.size.points.len(), 3);
    assert_eq!(summary.failed_cross_checks(), 0);

    let csv = std::fs::read_to_string(&summary.sparsity_csv).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "sparsity,strategy_time_naive,strategy_time_optimized,strategy_time_sparse,strategy_time_sparse_parallel"
    );
    assert_eq!(lines.len(), 1 + config.sparsity_levels.len());
    assert_eq!(lines[1], "0,0.001,0.001,0.001,0.001");

    let csv = std::fs::read_to_string(&summary.size_csv).unwrap();
    assert!(csv.lines().nth(1).unwrap().starts_with("10,"));

    let file = summary.file.expect("file experiment should run");
    assert_eq!(file.result.nnz, m.nnz());
    assert!(file.result.measurement(Strategy::DenseNaive).is_none());
    assert_eq!(file.speedup(), Some(1.0));
}

#[test]
fn test_clock_sees_only_timed_runs() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = quick_config(dir.path());
    config.sparsity_levels = vec![0.5];
    config.size_sweep = vec![8];
    config.matrix_file = None;

    let clock = FixedClock::default();
    let harness = BenchmarkHarness::with_capabilities(&config, clock, NullProbe).unwrap();
    let summary = run_all(&config, &harness).unwrap();

    // Two configurations, four strategies each, two timed runs per strategy
    let timed: usize = [&summary.sparsity, &summary.size]
        .iter()
        .flat_map(|s| &s.points)
        .flat_map(|p| &p.result.measurements)
        .map(|m| m.stats.samples)
        .sum();
    assert_eq!(timed, 2 * 4 * 2);
    assert!(summary.file.is_none());
}
