//! Row-major dense matrix used by the dense comparison path

use aligned_vec::AVec;
use ndarray::ArrayView2;
use num_traits::Num;

use crate::constants::DENSE_ALIGNMENT;
use crate::error::{BenchError, Result};
use crate::matrix::Triplet;

/// A dense matrix stored as one flat, cache-line aligned, row-major buffer
///
/// Element (i, j) lives at `i * n_cols + j`.
#[derive(Clone, Debug)]
pub struct DenseMatrix<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    data: AVec<T>,
}

impl<T> DenseMatrix<T>
where
    T: Copy + Num,
{
    /// Creates a matrix filled with zeros
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            data: AVec::from_iter(DENSE_ALIGNMENT, (0..n_rows * n_cols).map(|_| T::zero())),
        }
    }

    /// Wraps row-major data, checking that its length matches the shape
    pub fn from_vec(n_rows: usize, n_cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != n_rows * n_cols {
            return Err(BenchError::DimensionMismatch(format!(
                "dense data has {} elements, expected {}×{} = {}",
                data.len(),
                n_rows,
                n_cols,
                n_rows * n_cols
            )));
        }
        Ok(Self {
            n_rows,
            n_cols,
            data: AVec::from_slice(DENSE_ALIGNMENT, &data),
        })
    }

    /// Scatters triplets into a zero matrix
    ///
    /// Repeated coordinates overwrite each other, so this is only a faithful
    /// reference for duplicate-free input.
    pub fn from_triplets(n_rows: usize, n_cols: usize, triplets: &[Triplet<T>]) -> Self {
        let mut matrix = Self::zeros(n_rows, n_cols);
        for t in triplets {
            matrix.set(t.row, t.col, t.value);
        }
        matrix
    }

    /// Reads element (i, j)
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[i * self.n_cols + j]
    }

    /// Writes element (i, j)
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        assert!(i < self.n_rows && j < self.n_cols, "({}, {}) outside {}×{}", i, j, self.n_rows, self.n_cols);
        self.data[i * self.n_cols + j] = value;
    }

    /// Row i as a contiguous slice
    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// The whole row-major buffer
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Number of entries that are not zero
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|v| !v.is_zero()).count()
    }

    /// Borrows the buffer as an ndarray view
    pub fn view(&self) -> Result<ArrayView2<'_, T>> {
        ArrayView2::from_shape((self.n_rows, self.n_cols), &self.data[..])
            .map_err(|e| BenchError::DimensionMismatch(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let m = DenseMatrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.get(0, 2), 3.0);
        assert_eq!(m.get(1, 0), 4.0);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(m.as_slice().as_ptr() as usize % DENSE_ALIGNMENT, 0);
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        let err = DenseMatrix::from_vec(2, 2, vec![1.0; 3]).unwrap_err();
        assert!(matches!(err, BenchError::DimensionMismatch(_)));
    }

    #[test]
    fn test_from_triplets_and_view() {
        let triplets = vec![Triplet::new(0, 1, 2.0), Triplet::new(1, 0, 3.0)];
        let m = DenseMatrix::from_triplets(2, 2, &triplets);
        assert_eq!(m.as_slice(), &[0.0, 2.0, 3.0, 0.0]);
        assert_eq!(m.count_nonzero(), 2);

        let view = m.view().unwrap();
        assert_eq!(view[[1, 0]], 3.0);
        assert_eq!(view.shape(), &[2, 2]);
    }

    #[test]
    fn test_empty_shapes() {
        let m = DenseMatrix::<f64>::zeros(0, 4);
        assert!(m.as_slice().is_empty());
        let m = DenseMatrix::<f64>::zeros(3, 0);
        assert!(m.row(2).is_empty());
    }
}
