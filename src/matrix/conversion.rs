//! Conversion functions between dense and CSR storage

use num_traits::Num;

use crate::matrix::{DenseMatrix, SparseMatrixCSR};
use crate::utils::exclusive_scan;

impl<T: Copy + Num> SparseMatrixCSR<T> {
    /// Compresses a dense matrix, omitting zero entries
    pub fn from_dense(dense: &DenseMatrix<T>) -> Self {
        let (n_rows, n_cols) = (dense.n_rows, dense.n_cols);

        // Count non-zeros per row
        let row_counts: Vec<usize> = (0..n_rows)
            .map(|i| dense.row(i).iter().filter(|v| !v.is_zero()).count())
            .collect();

        // Compute row pointers via prefix sum
        let row_ptr = exclusive_scan(&row_counts);
        let nnz = row_ptr[n_rows];

        let mut col_idx = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        for i in 0..n_rows {
            for (j, &v) in dense.row(i).iter().enumerate() {
                if !v.is_zero() {
                    col_idx.push(j);
                    values.push(v);
                }
            }
        }

        SparseMatrixCSR::new(n_rows, n_cols, row_ptr, col_idx, values)
    }

    /// Expands to a dense matrix
    ///
    /// Repeated coordinates are summed, which is what SpMV sees for them.
    pub fn to_dense(&self) -> DenseMatrix<T> {
        let mut dense = DenseMatrix::zeros(self.n_rows, self.n_cols);

        for i in 0..self.n_rows {
            for (j, &v) in self.row_iter(i) {
                dense.set(i, j, dense.get(i, j) + v);
            }
        }

        dense
    }
}
