//! Dense matrix × vector kernels
//!
//! Both kernels walk the row-major buffer one row at a time. The unrolled
//! variant feeds four products per step into the same accumulator, so its
//! results are compared against the naive kernel with a tolerance rather
//! than bit for bit.

use num_traits::Num;
use std::ops::AddAssign;

use super::assert_shape;
use crate::matrix::DenseMatrix;

/// Straightforward row dot-product loop: `y = A x`
///
/// # Panics
///
/// Panics if `x.len() != a.n_cols` or `y.len() != a.n_rows`.
pub fn dense_matvec_naive<T>(a: &DenseMatrix<T>, x: &[T], y: &mut [T])
where
    T: Copy + Num + AddAssign,
{
    assert_shape("dense_matvec_naive", a.n_rows, a.n_cols, x.len(), y.len());

    for (i, yi) in y.iter_mut().enumerate() {
        let row = a.row(i);
        let mut sum = T::zero();
        for j in 0..a.n_cols {
            sum += row[j] * x[j];
        }
        *yi = sum;
    }
}

/// Row dot-product loop unrolled by four with a scalar tail: `y = A x`
///
/// # Panics
///
/// Panics if `x.len() != a.n_cols` or `y.len() != a.n_rows`.
pub fn dense_matvec_unrolled<T>(a: &DenseMatrix<T>, x: &[T], y: &mut [T])
where
    T: Copy + Num + AddAssign,
{
    assert_shape("dense_matvec_unrolled", a.n_rows, a.n_cols, x.len(), y.len());

    for (i, yi) in y.iter_mut().enumerate() {
        let row = a.row(i);
        let row_blocks = row.chunks_exact(4);
        let x_blocks = x.chunks_exact(4);
        let (row_tail, x_tail) = (row_blocks.remainder(), x_blocks.remainder());

        let mut sum = T::zero();
        for (r, v) in row_blocks.zip(x_blocks) {
            sum += r[0] * v[0];
            sum += r[1] * v[1];
            sum += r[2] * v[2];
            sum += r[3] * v[3];
        }
        for (&r, &v) in row_tail.iter().zip(x_tail) {
            sum += r * v;
        }
        *yi = sum;
    }
}
