//! Matrix × vector kernels
//!
//! Every kernel overwrites its whole output slice and checks shapes before
//! touching memory. A shape mismatch is a caller bug, so it panics instead
//! of returning an error.

pub mod dense;
pub mod sparse;

pub use dense::{dense_matvec_naive, dense_matvec_unrolled};
pub use sparse::{row_dot, spmv_parallel, spmv_parallel_with_min_len, spmv_sequential};

/// The multiplication strategies being compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Dense row dot-product loop
    DenseNaive,
    /// Dense loop unrolled by four
    DenseUnrolled,
    /// CSR, single thread
    SparseSequential,
    /// CSR, rows spread over a thread pool
    SparseParallel,
}

impl Strategy {
    /// Every strategy in report column order
    pub const ALL: [Strategy; 4] = [
        Strategy::DenseNaive,
        Strategy::DenseUnrolled,
        Strategy::SparseSequential,
        Strategy::SparseParallel,
    ];

    /// Short name used in console output and CSV headers
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::DenseNaive => "naive",
            Strategy::DenseUnrolled => "optimized",
            Strategy::SparseSequential => "sparse",
            Strategy::SparseParallel => "sparse_parallel",
        }
    }

    /// CSV column holding this strategy's mean time
    pub fn csv_column(&self) -> String {
        format!("strategy_time_{}", self.label())
    }

    /// Whether the strategy needs the dense form of the matrix
    pub fn is_dense(&self) -> bool {
        matches!(self, Strategy::DenseNaive | Strategy::DenseUnrolled)
    }
}

#[track_caller]
pub(crate) fn assert_shape(kernel: &str, n_rows: usize, n_cols: usize, x_len: usize, y_len: usize) {
    assert_eq!(
        x_len, n_cols,
        "dimension mismatch in {}: input has {} elements, matrix has {} columns",
        kernel, x_len, n_cols
    );
    assert_eq!(
        y_len, n_rows,
        "dimension mismatch in {}: output has {} elements, matrix has {} rows",
        kernel, y_len, n_rows
    );
}
