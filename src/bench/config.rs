//! Configuration and system parameters for benchmark runs

use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::*;
use crate::error::{BenchError, Result};

/// System parameters for the parallel kernel
#[derive(Debug, Clone)]
pub struct SystemParameters {
    /// Number of worker threads in the SpMV pool
    pub n_threads: usize,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(), // Use all available cores
        }
    }
}

/// Size of the experiment set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchProfile {
    /// Small matrices, a handful of iterations. Seconds, not minutes.
    Quick,
    /// The full sweeps
    Full,
}

impl BenchProfile {
    /// Profile from the `SPMV_PROFILE` environment variable, `Full` if unset
    pub fn from_env() -> Self {
        std::env::var("SPMV_PROFILE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(BenchProfile::Full)
    }
}

impl FromStr for BenchProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quick" => Ok(BenchProfile::Quick),
            "full" => Ok(BenchProfile::Full),
            other => Err(format!("unknown profile {:?} (expected quick or full)", other)),
        }
    }
}

/// Configuration for a benchmark run
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// System parameters for the parallel kernel
    pub system_params: SystemParameters,

    /// Untimed runs before each measurement
    pub warmup_iterations: usize,

    /// Timed runs per strategy
    pub iterations: usize,

    /// Square matrix dimension of the sparsity sweep
    pub sparsity_sweep_size: usize,

    /// Sparsity levels of the sparsity sweep
    pub sparsity_levels: Vec<f64>,

    /// Sparsity of every matrix in the size sweep
    pub size_sweep_sparsity: f64,

    /// Square matrix dimensions of the size sweep
    pub size_sweep: Vec<usize>,

    /// Coordinate file for the file-backed experiment
    /// If None, that experiment is skipped
    pub matrix_file: Option<PathBuf>,

    /// Abort the run instead of skipping when the matrix file cannot be loaded
    pub require_matrix_file: bool,

    /// Where CSV reports are written
    pub output_dir: PathBuf,

    /// Seed for synthetic matrices
    pub seed: u64,

    /// Relative tolerance for the dense vs sparse cross-check
    pub cross_check_tolerance: f64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::for_profile(BenchProfile::Full)
    }
}

impl BenchConfig {
    /// Create a config for a specific profile
    pub fn for_profile(profile: BenchProfile) -> Self {
        let (sparsity_sweep_size, size_sweep, iterations) = match profile {
            BenchProfile::Full => (
                SPARSITY_SWEEP_SIZE,
                (SIZE_SWEEP_START..=SIZE_SWEEP_END).step_by(SIZE_SWEEP_STEP).collect(),
                DEFAULT_MEASURED_ITERATIONS,
            ),
            BenchProfile::Quick => (
                QUICK_SPARSITY_SWEEP_SIZE,
                QUICK_SIZE_SWEEP.to_vec(),
                QUICK_MEASURED_ITERATIONS,
            ),
        };

        Self {
            system_params: SystemParameters::default(),
            warmup_iterations: DEFAULT_WARMUP_ITERATIONS,
            iterations,
            sparsity_sweep_size,
            sparsity_levels: SPARSITY_SWEEP_LEVELS.to_vec(),
            size_sweep_sparsity: SIZE_SWEEP_SPARSITY,
            size_sweep,
            matrix_file: Some(PathBuf::from(DEFAULT_MATRIX_FILE)),
            require_matrix_file: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            seed: DEFAULT_SEED,
            cross_check_tolerance: CROSS_CHECK_RELATIVE_TOLERANCE,
        }
    }

    /// Rejects settings the harness cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.system_params.n_threads == 0 {
            return Err(BenchError::InvalidConfig("n_threads must be at least 1".to_string()));
        }
        if self.iterations == 0 {
            return Err(BenchError::InvalidConfig("iterations must be at least 1".to_string()));
        }
        let sparsities = self.sparsity_levels.iter().chain(std::iter::once(&self.size_sweep_sparsity));
        for &s in sparsities {
            if !(0.0..=1.0).contains(&s) {
                return Err(BenchError::InvalidConfig(format!("sparsity {} outside [0, 1]", s)));
            }
        }
        if !(self.cross_check_tolerance >= 0.0) {
            return Err(BenchError::InvalidConfig(format!(
                "cross-check tolerance {} must be non-negative",
                self.cross_check_tolerance
            )));
        }
        Ok(())
    }
}
