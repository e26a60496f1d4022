//! Centralized constants for the SpMV benchmark suite
//!
//! Experiment defaults, kernel tuning values and file-format markers live
//! here rather than scattered throughout the code.

// ============================================================================
// EXPERIMENT DEFAULTS
// ============================================================================

/// Matrix dimension used by the sparsity sweep
pub const SPARSITY_SWEEP_SIZE: usize = 3000;

/// Sparsity levels visited by the sparsity sweep
pub const SPARSITY_SWEEP_LEVELS: [f64; 7] = [0.0, 0.25, 0.50, 0.75, 0.90, 0.95, 0.99];

/// Sparsity used by the size sweep
pub const SIZE_SWEEP_SPARSITY: f64 = 0.90;

/// First matrix dimension of the size sweep
pub const SIZE_SWEEP_START: usize = 1000;

/// Last matrix dimension of the size sweep (inclusive)
pub const SIZE_SWEEP_END: usize = 10_000;

/// Step between size sweep dimensions
pub const SIZE_SWEEP_STEP: usize = 1000;

/// Coordinate file used by the file-backed experiment
pub const DEFAULT_MATRIX_FILE: &str = "data/mc2depi.mtx";

/// Directory receiving the CSV reports
pub const DEFAULT_OUTPUT_DIR: &str = "results";

/// Seed for the synthetic generator
pub const DEFAULT_SEED: u64 = 42;

/// Untimed runs before measurement starts
pub const DEFAULT_WARMUP_ITERATIONS: usize = 2;

/// Timed runs per strategy
pub const DEFAULT_MEASURED_ITERATIONS: usize = 5;

// ============================================================================
// QUICK PROFILE
// ============================================================================

/// Matrix dimension used by the quick sparsity sweep
pub const QUICK_SPARSITY_SWEEP_SIZE: usize = 300;

/// Dimensions visited by the quick size sweep
pub const QUICK_SIZE_SWEEP: [usize; 4] = [100, 200, 300, 400];

/// Timed runs per strategy in the quick profile
pub const QUICK_MEASURED_ITERATIONS: usize = 3;

// ============================================================================
// KERNELS AND VERIFICATION
// ============================================================================

/// Minimum number of rows a parallel SpMV task processes
///
/// Rayon splits below this length only through work stealing.
pub const PARALLEL_MIN_ROWS_PER_TASK: usize = 64;

/// Byte alignment of dense matrix storage
pub const DENSE_ALIGNMENT: usize = 64;

/// Relative tolerance for dense vs sparse output comparison
pub const CROSS_CHECK_RELATIVE_TOLERANCE: f64 = 1e-9;

// ============================================================================
// COORDINATE FORMAT
// ============================================================================

/// Leading character of comment lines
pub const COMMENT_MARKER: char = '%';

/// Upper bound on the triplet reservation taken from a declared nonzero count
pub const MAX_TRIPLET_PREALLOCATION: usize = 1 << 24;

/// Largest row or column count accepted from a coordinate header
pub const MAX_COORDINATE_DIMENSION: usize = 1 << 28;

/// Banner written at the top of generated coordinate files
pub const COORDINATE_BANNER: &str = "%%MatrixMarket matrix coordinate real general";
