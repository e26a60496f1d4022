//! # spmv-bench: dense vs compressed-row matrix × vector benchmarks
//!
//! This library measures how much data layout, loop structure and
//! parallelism matter for matrix × vector multiplication.
//!
//! ## Overview
//!
//! The pipeline has four stages:
//!
//! 1. **Ingestion**: a coordinate-format text file is read into triplets
//!    ([`coordinate`]), or a dense matrix and its CSR form are generated
//!    together ([`matrix::MatrixGenerator`]).
//! 2. **Compression**: triplets are sorted into a [`SparseMatrixCSR`]
//!    ([`build_csr`]).
//! 3. **Kernels**: the same product is computed by a naive dense loop, a
//!    dense loop unrolled by four, and sequential and parallel CSR kernels
//!    ([`kernel`]).
//! 4. **Harness**: each strategy is warmed up, timed and cross-checked, and
//!    the sweeps are exported as CSV ([`bench`]).
//!
//! ## Usage
//!
//! ```
//! use spmv_bench::{build_csr, Triplet};
//!
//! let a = build_csr(
//!     3,
//!     3,
//!     vec![
//!         Triplet::new(0, 0, 2.0),
//!         Triplet::new(1, 1, 3.0),
//!         Triplet::new(2, 0, 1.0),
//!         Triplet::new(2, 2, 4.0),
//!     ],
//! );
//!
//! let mut y = vec![0.0; 3];
//! spmv_bench::spmv_sequential(&a, &[1.0, 1.0, 1.0], &mut y);
//! assert_eq!(y, vec![2.0, 3.0, 5.0]);
//! ```

pub mod bench;
pub mod constants;
pub mod coordinate;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod utils;
pub mod verify;

// Re-export primary components
pub use bench::{BenchConfig, BenchProfile, BenchmarkHarness, SystemParameters};
pub use coordinate::{load_csr, parse_coordinate, parse_coordinate_file, write_coordinate_file, CoordinateMatrix};
pub use error::{BenchError, Result};
pub use kernel::{
    dense_matvec_naive, dense_matvec_unrolled, spmv_parallel, spmv_sequential, Strategy,
};
pub use matrix::{build_csr, DenseMatrix, MatrixGenerator, SparseMatrixCSR, Triplet};
pub use utils::{from_sprs_csr, to_sprs_csr};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
