//! The three experiments: sparsity sweep, size sweep and file-backed matrix

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::bench::clock::Clock;
use crate::bench::config::BenchConfig;
use crate::bench::harness::{BenchmarkHarness, ConfigurationResult, Workload};
use crate::bench::memory::MemoryProbe;
use crate::bench::report::export_sweep_csv;
use crate::coordinate::parse_coordinate_file;
use crate::error::Result;
use crate::kernel::Strategy;
use crate::matrix::MatrixGenerator;

/// Which parameter a sweep varies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepKind {
    Sparsity,
    Size,
}

impl SweepKind {
    /// Name of the CSV key column
    pub fn key_column(&self) -> &'static str {
        match self {
            SweepKind::Sparsity => "sparsity",
            SweepKind::Size => "matrix_size",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            SweepKind::Sparsity => "results_sparsity.csv",
            SweepKind::Size => "results_size.csv",
        }
    }
}

/// One configuration of a sweep
#[derive(Debug, Clone)]
pub struct SweepPoint {
    /// Sparsity level or matrix dimension
    pub key: f64,
    pub result: ConfigurationResult,
}

/// All configurations of one sweep, in visiting order
#[derive(Debug, Clone)]
pub struct SweepReport {
    pub kind: SweepKind,
    pub points: Vec<SweepPoint>,
}

impl SweepReport {
    /// Number of configurations whose cross-check failed
    pub fn failed_cross_checks(&self) -> usize {
        self.points
            .iter()
            .filter(|p| !p.result.cross_check.passed)
            .count()
    }
}

/// Outcome of the file-backed experiment
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub declared_nnz: usize,
    pub dropped: usize,
    pub result: ConfigurationResult,
}

impl FileReport {
    /// Parallel over sequential CSR speedup
    pub fn speedup(&self) -> Option<f64> {
        self.result
            .speedup(Strategy::SparseSequential, Strategy::SparseParallel)
    }
}

/// Everything produced by [`run_all`]
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub sparsity: SweepReport,
    pub sparsity_csv: PathBuf,
    pub size: SweepReport,
    pub size_csv: PathBuf,
    /// `None` when no file was configured or it could not be loaded
    pub file: Option<FileReport>,
}

impl RunSummary {
    pub fn failed_cross_checks(&self) -> usize {
        let file_failed = self
            .file
            .as_ref()
            .map_or(0, |f| usize::from(!f.result.cross_check.passed));
        self.sparsity.failed_cross_checks() + self.size.failed_cross_checks() + file_failed
    }
}

fn run_synthetic<C: Clock, M: MemoryProbe>(
    harness: &BenchmarkHarness<C, M>,
    generator: &mut MatrixGenerator,
    n: usize,
    sparsity: f64,
) -> ConfigurationResult {
    let (dense, sparse) = generator.generate_pair(n, n, sparsity);
    let x = vec![1.0; n];
    harness.run_workload(&Workload::new(dense, sparse), &x)
}

fn log_point(kind: SweepKind, key: f64, result: &ConfigurationResult) {
    let mean = |s: Strategy| result.mean_time(s).map_or(f64::NAN, |d| d.as_secs_f64());
    info!(
        sweep = kind.key_column(),
        key,
        nnz = result.nnz,
        naive_s = mean(Strategy::DenseNaive),
        optimized_s = mean(Strategy::DenseUnrolled),
        sparse_s = mean(Strategy::SparseSequential),
        sparse_parallel_s = mean(Strategy::SparseParallel),
        "configuration done"
    );
}

/// Square matrices of a fixed size over the configured sparsity levels
pub fn run_sparsity_sweep<C: Clock, M: MemoryProbe>(
    config: &BenchConfig,
    harness: &BenchmarkHarness<C, M>,
) -> SweepReport {
    let n = config.sparsity_sweep_size;
    info!(size = n, levels = config.sparsity_levels.len(), "starting sparsity sweep");

    let mut generator = MatrixGenerator::new(config.seed);
    let points = config
        .sparsity_levels
        .iter()
        .map(|&sparsity| {
            let result = run_synthetic(harness, &mut generator, n, sparsity);
            log_point(SweepKind::Sparsity, sparsity, &result);
            SweepPoint {
                key: sparsity,
                result,
            }
        })
        .collect();

    SweepReport {
        kind: SweepKind::Sparsity,
        points,
    }
}

/// Square matrices of a fixed sparsity over the configured sizes
pub fn run_size_sweep<C: Clock, M: MemoryProbe>(
    config: &BenchConfig,
    harness: &BenchmarkHarness<C, M>,
) -> SweepReport {
    let sparsity = config.size_sweep_sparsity;
    info!(sparsity, sizes = config.size_sweep.len(), "starting size sweep");

    let mut generator = MatrixGenerator::new(config.seed);
    let points = config
        .size_sweep
        .iter()
        .map(|&n| {
            let result = run_synthetic(harness, &mut generator, n, sparsity);
            log_point(SweepKind::Size, n as f64, &result);
            SweepPoint {
                key: n as f64,
                result,
            }
        })
        .collect();

    SweepReport {
        kind: SweepKind::Size,
        points,
    }
}

/// Loads a coordinate file and times the CSR strategies on it
pub fn run_file<C: Clock, M: MemoryProbe>(
    harness: &BenchmarkHarness<C, M>,
    path: &Path,
) -> Result<FileReport> {
    info!(path = %path.display(), "starting file experiment");

    let coo = parse_coordinate_file(path)?;
    let declared_nnz = coo.declared_nnz;
    let dropped = coo.dropped;
    let sparse = coo.into_csr();

    let x = vec![1.0; sparse.n_cols];
    let result = harness.run_workload(&Workload::sparse_only(sparse), &x);

    if let Some(speedup) = result.speedup(Strategy::SparseSequential, Strategy::SparseParallel) {
        info!(speedup, threads = harness.threads(), "file experiment done");
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        declared_nnz,
        dropped,
        result,
    })
}

/// Runs both sweeps, writes their CSV reports, then runs the file experiment
///
/// A file that cannot be loaded is skipped with a warning unless the
/// config requires it.
pub fn run_all<C: Clock, M: MemoryProbe>(
    config: &BenchConfig,
    harness: &BenchmarkHarness<C, M>,
) -> Result<RunSummary> {
    let sparsity = run_sparsity_sweep(config, harness);
    let sparsity_csv = export_sweep_csv(&config.output_dir, &sparsity)?;

    let size = run_size_sweep(config, harness);
    let size_csv = export_sweep_csv(&config.output_dir, &size)?;

    let file = match config.matrix_file.as_deref() {
        None => None,
        Some(path) => match run_file(harness, path) {
            Ok(report) => Some(report),
            Err(e) if !config.require_matrix_file => {
                warn!(error = %e, "skipping file experiment");
                None
            }
            Err(e) => return Err(e),
        },
    };

    Ok(RunSummary {
        sparsity,
        sparsity_csv,
        size,
        size_csv,
        file,
    })
}
