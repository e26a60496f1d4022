//! Triplet to CSR conversion
//!
//! Every row without entries, wherever it sits, gets a zero-length range in
//! the row pointer.

use num_traits::Num;
use tracing::{debug, warn};

use crate::matrix::SparseMatrixCSR;

/// A single (row, col, value) entry, 0-based
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triplet<T> {
    pub row: usize,
    pub col: usize,
    pub value: T,
}

impl<T> Triplet<T> {
    pub fn new(row: usize, col: usize, value: T) -> Self {
        Self { row, col, value }
    }
}

/// Sorts triplets by (row, col) and packs them into CSR
///
/// Repeated coordinates are kept as separate adjacent entries. They are
/// reported but not merged, and their relative order is unspecified.
///
/// # Panics
///
/// Panics if any triplet lies outside `n_rows × n_cols`.
pub fn build_csr<T>(n_rows: usize, n_cols: usize, mut triplets: Vec<Triplet<T>>) -> SparseMatrixCSR<T>
where
    T: Copy + Num,
{
    for t in &triplets {
        assert!(
            t.row < n_rows && t.col < n_cols,
            "triplet ({}, {}) outside {}×{} matrix",
            t.row,
            t.col,
            n_rows,
            n_cols
        );
    }

    triplets.sort_unstable_by(|a, b| a.row.cmp(&b.row).then(a.col.cmp(&b.col)));

    let nnz = triplets.len();
    let mut row_ptr = vec![0usize; n_rows + 1];
    let mut col_idx = Vec::with_capacity(nnz);
    let mut values = Vec::with_capacity(nnz);
    let mut duplicates = 0usize;

    let mut current_row = 0usize;
    for (count, t) in triplets.iter().enumerate() {
        // Rows between the previous entry and this one are empty
        while current_row < t.row {
            current_row += 1;
            row_ptr[current_row] = count;
        }

        if count > 0 && triplets[count - 1].row == t.row && triplets[count - 1].col == t.col {
            duplicates += 1;
        }

        col_idx.push(t.col);
        values.push(t.value);
    }

    while current_row < n_rows {
        current_row += 1;
        row_ptr[current_row] = nnz;
    }

    if duplicates > 0 {
        warn!(duplicates, "duplicate coordinates kept as separate entries");
    }
    debug!(n_rows, n_cols, nnz, "built CSR matrix");

    SparseMatrixCSR::new(n_rows, n_cols, row_ptr, col_idx, values)
}
