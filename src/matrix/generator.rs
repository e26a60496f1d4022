//! Seeded synthetic matrices for the sweeps
//!
//! Matrices are drawn straight into CSR form; the dense form, when a
//! configuration needs it, is scattered from those same draws.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::matrix::{DenseMatrix, SparseMatrixCSR};

/// Reproducible generator of benchmark matrices and vectors
pub struct MatrixGenerator {
    rng: ChaCha8Rng,
}

impl MatrixGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generates a random matrix in CSR form only
    ///
    /// Each entry is kept when a uniform draw in [0, 1) is at least
    /// `sparsity`, so `0.0` yields a full matrix and `1.0` an empty one.
    /// Kept values are multiples of 0.1 in [0, 9.9]; a kept zero is still
    /// stored.
    ///
    /// # Panics
    ///
    /// Panics if `sparsity` is outside [0, 1].
    pub fn generate_sparse(&mut self, n_rows: usize, n_cols: usize, sparsity: f64) -> SparseMatrixCSR<f64> {
        assert!(
            (0.0..=1.0).contains(&sparsity),
            "sparsity {} outside [0, 1]",
            sparsity
        );

        let expected_nnz = (n_rows as f64 * n_cols as f64 * (1.0 - sparsity)).ceil() as usize;

        let mut row_ptr = Vec::with_capacity(n_rows + 1);
        let mut col_idx = Vec::with_capacity(expected_nnz);
        let mut values = Vec::with_capacity(expected_nnz);
        row_ptr.push(0);

        for _ in 0..n_rows {
            for j in 0..n_cols {
                if self.rng.gen::<f64>() >= sparsity {
                    col_idx.push(j);
                    values.push(self.rng.gen_range(0..100) as f64 / 10.0);
                }
            }
            row_ptr.push(col_idx.len());
        }

        SparseMatrixCSR::new(n_rows, n_cols, row_ptr, col_idx, values)
    }

    /// Generates a random matrix in both dense and CSR form
    ///
    /// Draws exactly what [`generate_sparse`](Self::generate_sparse) draws
    /// and scatters it into a dense matrix.
    ///
    /// # Panics
    ///
    /// Panics if `sparsity` is outside [0, 1].
    pub fn generate_pair(
        &mut self,
        n_rows: usize,
        n_cols: usize,
        sparsity: f64,
    ) -> (DenseMatrix<f64>, SparseMatrixCSR<f64>) {
        let sparse = self.generate_sparse(n_rows, n_cols, sparsity);
        (sparse.to_dense(), sparse)
    }

    /// Generates a vector with entries uniform in [-1, 1)
    pub fn generate_vector(&mut self, len: usize) -> Vec<f64> {
        (0..len).map(|_| self.rng.gen_range(-1.0..1.0)).collect()
    }
}
