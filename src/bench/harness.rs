//! Timing and cross-checking of the multiplication strategies
//!
//! The harness owns a fixed-size rayon pool for the parallel kernel; every
//! other strategy runs on the calling thread.

use std::time::Duration;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, error};

use crate::bench::clock::{Clock, MonotonicClock};
use crate::bench::config::BenchConfig;
use crate::bench::memory::{MemoryProbe, ProcStatusProbe};
use crate::bench::stats::{dense_flops, sparse_flops, TimingStats};
use crate::error::{BenchError, Result};
use crate::kernel::{
    dense_matvec_naive, dense_matvec_unrolled, spmv_parallel, spmv_sequential, Strategy,
};
use crate::matrix::{DenseMatrix, SparseMatrixCSR};
use crate::verify::{first_bitwise_mismatch, max_relative_error};

/// A matrix prepared for measurement
///
/// File-backed matrices have no dense form and only run the CSR strategies.
#[derive(Debug, Clone)]
pub struct Workload {
    pub dense: Option<DenseMatrix<f64>>,
    pub sparse: SparseMatrixCSR<f64>,
}

impl Workload {
    /// Dense and CSR forms of the same matrix
    ///
    /// # Panics
    ///
    /// Panics if the two forms disagree on shape.
    pub fn new(dense: DenseMatrix<f64>, sparse: SparseMatrixCSR<f64>) -> Self {
        assert_eq!(
            (dense.n_rows, dense.n_cols),
            (sparse.n_rows, sparse.n_cols),
            "dimension mismatch between dense and sparse forms"
        );
        Self {
            dense: Some(dense),
            sparse,
        }
    }

    /// A workload measured only through the CSR kernels
    pub fn sparse_only(sparse: SparseMatrixCSR<f64>) -> Self {
        Self { dense: None, sparse }
    }

    pub fn n_rows(&self) -> usize {
        self.sparse.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.sparse.n_cols
    }

    /// Whether `strategy` can run on this workload
    pub fn supports(&self, strategy: Strategy) -> bool {
        !strategy.is_dense() || self.dense.is_some()
    }

    /// Strategies this workload can run, in report order
    pub fn strategies(&self) -> Vec<Strategy> {
        Strategy::ALL
            .iter()
            .copied()
            .filter(|&s| self.supports(s))
            .collect()
    }

    /// Work done by one call of `strategy`
    pub fn flops(&self, strategy: Strategy) -> u64 {
        if strategy.is_dense() {
            dense_flops(self.n_rows(), self.n_cols())
        } else {
            sparse_flops(self.sparse.nnz())
        }
    }
}

/// Timings and final output of one strategy on one workload
#[derive(Debug, Clone)]
pub struct Measurement {
    pub strategy: Strategy,
    pub stats: TimingStats,
    pub flops: u64,
    /// Output vector of the last timed run
    pub output: Vec<f64>,
}

impl Measurement {
    pub fn gflops(&self) -> f64 {
        self.stats.gflops(self.flops)
    }
}

/// Agreement between the strategies' outputs
#[derive(Debug, Clone, PartialEq)]
pub struct CrossCheck {
    /// Largest relative error of any dense output against the sequential CSR output
    pub dense_max_relative_error: Option<f64>,
    /// First row where parallel and sequential CSR outputs differ in bits
    pub parallel_mismatch_row: Option<usize>,
    pub passed: bool,
}

/// Everything measured for one matrix
#[derive(Debug, Clone)]
pub struct ConfigurationResult {
    pub n_rows: usize,
    pub n_cols: usize,
    pub nnz: usize,
    /// Fraction of entries not stored
    pub sparsity: f64,
    pub measurements: Vec<Measurement>,
    pub cross_check: CrossCheck,
    /// Resident memory after measuring, if the host reports it
    pub resident_bytes: Option<u64>,
}

impl ConfigurationResult {
    pub fn measurement(&self, strategy: Strategy) -> Option<&Measurement> {
        self.measurements.iter().find(|m| m.strategy == strategy)
    }

    /// Mean time of `strategy`, if it ran
    pub fn mean_time(&self, strategy: Strategy) -> Option<Duration> {
        self.measurement(strategy).map(|m| m.stats.mean)
    }

    /// How many times faster `candidate` is than `baseline` on mean time
    pub fn speedup(&self, baseline: Strategy, candidate: Strategy) -> Option<f64> {
        let base = self.mean_time(baseline)?.as_secs_f64();
        let cand = self.mean_time(candidate)?.as_secs_f64();
        (cand > 0.0).then(|| base / cand)
    }
}

/// Runs strategies with warm-up, repeated timing and output verification
pub struct BenchmarkHarness<C = MonotonicClock, M = ProcStatusProbe> {
    warmup_iterations: usize,
    iterations: usize,
    tolerance: f64,
    pool: ThreadPool,
    clock: C,
    probe: M,
}

impl BenchmarkHarness {
    /// Harness with the wall clock and `/proc` memory probe
    pub fn new(config: &BenchConfig) -> Result<Self> {
        Self::with_capabilities(config, MonotonicClock, ProcStatusProbe)
    }
}

impl<C: Clock, M: MemoryProbe> BenchmarkHarness<C, M> {
    /// Harness with caller-supplied timing and memory capabilities
    pub fn with_capabilities(config: &BenchConfig, clock: C, probe: M) -> Result<Self> {
        config.validate()?;

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.system_params.n_threads)
            .build()
            .map_err(|e| BenchError::InvalidConfig(format!("cannot build thread pool: {}", e)))?;

        Ok(Self {
            warmup_iterations: config.warmup_iterations,
            iterations: config.iterations,
            tolerance: config.cross_check_tolerance,
            pool,
            clock,
            probe,
        })
    }

    /// Threads available to the parallel kernel
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Warms up and times one strategy, `None` if the workload cannot run it
    pub fn measure(&self, strategy: Strategy, workload: &Workload, x: &[f64]) -> Option<Measurement> {
        if !workload.supports(strategy) {
            return None;
        }

        let mut y = vec![0.0; workload.n_rows()];

        for _ in 0..self.warmup_iterations {
            self.execute(strategy, workload, x, &mut y);
        }

        let samples: Vec<Duration> = (0..self.iterations)
            .map(|_| self.clock.time(|| self.execute(strategy, workload, x, &mut y)))
            .collect();
        let stats = TimingStats::from_samples(&samples)?;

        debug!(
            strategy = strategy.label(),
            mean_s = stats.mean.as_secs_f64(),
            "measured strategy"
        );

        Some(Measurement {
            strategy,
            stats,
            flops: workload.flops(strategy),
            output: y,
        })
    }

    /// Measures every strategy the workload supports and cross-checks them
    pub fn run_workload(&self, workload: &Workload, x: &[f64]) -> ConfigurationResult {
        let measurements: Vec<Measurement> = workload
            .strategies()
            .into_iter()
            .filter_map(|s| self.measure(s, workload, x))
            .collect();

        let cross_check = self.cross_check(&measurements);

        ConfigurationResult {
            n_rows: workload.n_rows(),
            n_cols: workload.n_cols(),
            nnz: workload.sparse.nnz(),
            sparsity: workload.sparse.sparsity(),
            measurements,
            cross_check,
            resident_bytes: self.probe.resident_bytes(),
        }
    }

    fn execute(&self, strategy: Strategy, workload: &Workload, x: &[f64], y: &mut [f64]) {
        match (strategy, workload.dense.as_ref()) {
            (Strategy::DenseNaive, Some(dense)) => dense_matvec_naive(dense, x, y),
            (Strategy::DenseUnrolled, Some(dense)) => dense_matvec_unrolled(dense, x, y),
            (Strategy::SparseSequential, _) => spmv_sequential(&workload.sparse, x, y),
            (Strategy::SparseParallel, _) => {
                self.pool.install(|| spmv_parallel(&workload.sparse, x, y))
            }
            (Strategy::DenseNaive | Strategy::DenseUnrolled, None) => {
                panic!("{} needs the dense form of the matrix", strategy.label())
            }
        }
    }

    fn cross_check(&self, measurements: &[Measurement]) -> CrossCheck {
        let output = |s: Strategy| {
            measurements
                .iter()
                .find(|m| m.strategy == s)
                .map(|m| m.output.as_slice())
        };

        let sequential = output(Strategy::SparseSequential);

        let dense_max_relative_error = sequential.and_then(|seq| {
            [Strategy::DenseNaive, Strategy::DenseUnrolled]
                .into_iter()
                .filter_map(output)
                .map(|dense| max_relative_error(dense, seq))
                .reduce(f64::max)
        });

        let parallel_mismatch_row = match (sequential, output(Strategy::SparseParallel)) {
            (Some(seq), Some(par)) => first_bitwise_mismatch(seq, par),
            _ => None,
        };

        let dense_ok = dense_max_relative_error.map_or(true, |e| e <= self.tolerance);
        if !dense_ok {
            error!(
                max_relative_error = dense_max_relative_error,
                tolerance = self.tolerance,
                "dense and sparse outputs disagree"
            );
        }
        if let Some(row) = parallel_mismatch_row {
            error!(row, "parallel SpMV differs from sequential SpMV");
        }

        CrossCheck {
            dense_max_relative_error,
            parallel_mismatch_row,
            passed: dense_ok && parallel_mismatch_row.is_none(),
        }
    }
}
