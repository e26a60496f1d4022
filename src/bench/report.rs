//! CSV export and console summaries

use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::bench::experiments::SweepReport;
use crate::bench::harness::ConfigurationResult;
use crate::error::Result;
use crate::kernel::Strategy;

/// Writes one row per sweep point with the mean time of each strategy in seconds
///
/// The parallel column is only present when some point measured it. A
/// strategy missing from a point leaves its field empty.
pub fn write_sweep_csv<W: Write>(writer: W, sweep: &SweepReport) -> Result<()> {
    let parallel_measured = sweep
        .points
        .iter()
        .any(|p| p.result.measurement(Strategy::SparseParallel).is_some());
    let columns: Vec<Strategy> = Strategy::ALL
        .iter()
        .copied()
        .filter(|&s| s != Strategy::SparseParallel || parallel_measured)
        .collect();

    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec![sweep.kind.key_column().to_string()];
    header.extend(columns.iter().map(|s| s.csv_column()));
    csv.write_record(&header)?;

    for point in &sweep.points {
        let mut record = vec![point.key.to_string()];
        record.extend(columns.iter().map(|&s| {
            point
                .result
                .mean_time(s)
                .map(|d| d.as_secs_f64().to_string())
                .unwrap_or_default()
        }));
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Writes a sweep to its CSV file under `dir`, creating the directory if needed
pub fn export_sweep_csv(dir: &Path, sweep: &SweepReport) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(sweep.kind.file_name());
    write_sweep_csv(fs::File::create(&path)?, sweep)?;
    info!(path = %path.display(), rows = sweep.points.len(), "wrote sweep report");
    Ok(path)
}

fn format_bytes(bytes: u64) -> String {
    const MIB: f64 = 1024.0 * 1024.0;
    format!("{:.1} MiB", bytes as f64 / MIB)
}

/// Human-readable block describing one configuration
pub fn format_summary(title: &str, result: &ConfigurationResult) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}: {}x{}, nnz={}, sparsity={:.4}",
        title,
        result.n_rows,
        result.n_cols,
        result.nnz,
        result.sparsity
    );
    let _ = writeln!(
        out,
        "  {:<16} {:>12} {:>12} {:>12} {:>10}",
        "strategy", "min (ms)", "mean (ms)", "max (ms)", "GFLOP/s"
    );
    for m in &result.measurements {
        let _ = writeln!(
            out,
            "  {:<16} {:>12.4} {:>12.4} {:>12.4} {:>10.3}",
            m.strategy.label(),
            m.stats.min.as_secs_f64() * 1e3,
            m.stats.mean.as_secs_f64() * 1e3,
            m.stats.max.as_secs_f64() * 1e3,
            m.gflops()
        );
    }

    if let Some(s) = result.speedup(Strategy::DenseNaive, Strategy::SparseSequential) {
        let _ = writeln!(out, "  sparse vs naive speedup: {:.2}x", s);
    }
    if let Some(s) = result.speedup(Strategy::SparseSequential, Strategy::SparseParallel) {
        let _ = writeln!(out, "  parallel vs sequential speedup: {:.2}x", s);
    }
    if let Some(bytes) = result.resident_bytes {
        let _ = writeln!(out, "  resident memory: {}", format_bytes(bytes));
    }

    let check = &result.cross_check;
    let verdict = if check.passed { "ok" } else { "FAILED" };
    match check.dense_max_relative_error {
        Some(err) => {
            let _ = writeln!(out, "  cross-check: {} (max relative error {:.3e})", verdict, err);
        }
        None => {
            let _ = writeln!(out, "  cross-check: {}", verdict);
        }
    }

    out
}

/// Prints [`format_summary`] to stdout
pub fn print_summary(title: &str, result: &ConfigurationResult) {
    print!("{}", format_summary(title, result));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::experiments::{SweepKind, SweepPoint};
    use crate::bench::harness::{CrossCheck, Measurement};
    use crate::bench::stats::TimingStats;
    use std::time::Duration;

    fn measurement(strategy: Strategy, mean_ms: u64) -> Measurement {
        let d = Duration::from_millis(mean_ms);
        Measurement {
            strategy,
            stats: TimingStats::from_samples(&[d]).unwrap(),
            flops: 2_000_000,
            output: Vec::new(),
        }
    }

    fn result(strategies: &[(Strategy, u64)]) -> ConfigurationResult {
        ConfigurationResult {
            n_rows: 1000,
            n_cols: 1000,
            nnz: 100_000,
            sparsity: 0.9,
            measurements: strategies.iter().map(|&(s, ms)| measurement(s, ms)).collect(),
            cross_check: CrossCheck {
                dense_max_relative_error: Some(0.0),
                parallel_mismatch_row: None,
                passed: true,
            },
            resident_bytes: Some(3 * 1024 * 1024),
        }
    }

    fn csv_string(sweep: &SweepReport) -> String {
        let mut buf = Vec::new();
        write_sweep_csv(&mut buf, sweep).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_csv_with_parallel_column() {
        let sweep = SweepReport {
            kind: SweepKind::Sparsity,
            points: vec![SweepPoint {
                key: 0.9,
                result: result(&[
                    (Strategy::DenseNaive, 500),
                    (Strategy::DenseUnrolled, 250),
                    (Strategy::SparseSequential, 125),
                    (Strategy::SparseParallel, 100),
                ]),
            }],
        };

        let text = csv_string(&sweep);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("sparsity,strategy_time_naive,strategy_time_optimized,strategy_time_sparse,strategy_time_sparse_parallel")
        );
        assert_eq!(lines.next(), Some("0.9,0.5,0.25,0.125,0.1"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_without_parallel_column() {
        let sweep = SweepReport {
            kind: SweepKind::Size,
            points: vec![SweepPoint {
                key: 1000.0,
                result: result(&[(Strategy::DenseNaive, 500), (Strategy::SparseSequential, 125)]),
            }],
        };

        let text = csv_string(&sweep);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("matrix_size,strategy_time_naive,strategy_time_optimized,strategy_time_sparse")
        );
        assert_eq!(lines.next(), Some("1000,0.5,,0.125"));
    }

    #[test]
    fn test_export_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("csv");
        let sweep = SweepReport {
            kind: SweepKind::Size,
            points: Vec::new(),
        };

        let path = export_sweep_csv(&nested, &sweep).unwrap();
        assert_eq!(path, nested.join("results_size.csv"));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("matrix_size,"));
    }

    #[test]
    fn test_summary_mentions_every_strategy() {
        let text = format_summary(
            "sparsity 0.9",
            &result(&[(Strategy::DenseNaive, 500), (Strategy::SparseSequential, 125)]),
        );
        assert!(text.starts_with("sparsity 0.9: 1000x1000, nnz=100000"));
        assert!(text.contains("naive"));
        assert!(text.contains("sparse"));
        assert!(text.contains("sparse vs naive speedup: 4.00x"));
        assert!(text.contains("resident memory: 3.0 MiB"));
        assert!(text.contains("cross-check: ok"));
    }
}
