//! CSR matrix × vector kernels
//!
//! Rows are independent: each output cell depends only on the read-only
//! matrix and input vector. Both kernels reduce a row through
//! [`row_dot`], which always visits the row's entries in stored order, so
//! the parallel kernel reproduces the sequential one bit for bit no matter
//! how rows are distributed across workers.

use num_traits::Num;
use rayon::prelude::*;
use std::ops::AddAssign;

use super::assert_shape;
use crate::constants::PARALLEL_MIN_ROWS_PER_TASK;
use crate::matrix::SparseMatrixCSR;

/// Dot product of row `i` with `x`, accumulated in stored order
#[inline]
pub fn row_dot<T>(a: &SparseMatrixCSR<T>, i: usize, x: &[T]) -> T
where
    T: Copy + Num + AddAssign,
{
    let start = a.row_ptr[i];
    let end = a.row_ptr[i + 1];

    let mut sum = T::zero();
    for (&col, &val) in a.col_idx[start..end].iter().zip(&a.values[start..end]) {
        sum += val * x[col];
    }
    sum
}

/// Sequential CSR SpMV: `y = A x`
///
/// # Panics
///
/// Panics if `x.len() != a.n_cols` or `y.len() != a.n_rows`.
pub fn spmv_sequential<T>(a: &SparseMatrixCSR<T>, x: &[T], y: &mut [T])
where
    T: Copy + Num + AddAssign,
{
    assert_shape("spmv_sequential", a.n_rows, a.n_cols, x.len(), y.len());

    for (i, yi) in y.iter_mut().enumerate() {
        *yi = row_dot(a, i, x);
    }
}

/// Parallel CSR SpMV on the current rayon pool: `y = A x`
///
/// # Panics
///
/// Panics if `x.len() != a.n_cols` or `y.len() != a.n_rows`.
pub fn spmv_parallel<T>(a: &SparseMatrixCSR<T>, x: &[T], y: &mut [T])
where
    T: Copy + Num + AddAssign + Send + Sync,
{
    spmv_parallel_with_min_len(a, x, y, PARALLEL_MIN_ROWS_PER_TASK);
}

/// Parallel CSR SpMV with an explicit minimum number of rows per task
///
/// Each row is written by exactly one task; rayon's work stealing decides
/// which one.
pub fn spmv_parallel_with_min_len<T>(a: &SparseMatrixCSR<T>, x: &[T], y: &mut [T], min_len: usize)
where
    T: Copy + Num + AddAssign + Send + Sync,
{
    assert_shape("spmv_parallel", a.n_rows, a.n_cols, x.len(), y.len());

    y.par_iter_mut()
        .enumerate()
        .with_min_len(min_len.max(1))
        .for_each(|(i, yi)| {
            *yi = row_dot(a, i, x);
        });
}

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num + AddAssign + Send + Sync,
{
    /// Returns `A x` computed sequentially
    pub fn mul_vec(&self, x: &[T]) -> Vec<T> {
        let mut y = vec![T::zero(); self.n_rows];
        spmv_sequential(self, x, &mut y);
        y
    }

    /// Returns `A x` computed on the current rayon pool
    pub fn mul_vec_parallel(&self, x: &[T]) -> Vec<T> {
        let mut y = vec![T::zero(); self.n_rows];
        spmv_parallel(self, x, &mut y);
        y
    }
}
