//! Conversion between our CSR matrix and `sprs`

use num_traits::Num;
use sprs::CsMat;

use crate::matrix::SparseMatrixCSR;

/// Converts our CSR matrix to a `sprs` CSR matrix
///
/// # Panics
///
/// `sprs` only accepts strictly increasing column indices within a row, so
/// this panics on matrices holding duplicate coordinates.
pub fn to_sprs_csr<T>(matrix: &SparseMatrixCSR<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    CsMat::new(
        (matrix.n_rows, matrix.n_cols),
        matrix.row_ptr.clone(),
        matrix.col_idx.clone(),
        matrix.values.clone(),
    )
}

/// Converts any `sprs` matrix to our CSR matrix
pub fn from_sprs_csr<T>(matrix: CsMat<T>) -> SparseMatrixCSR<T>
where
    T: Copy + Num + Default,
{
    let matrix = if matrix.is_csr() { matrix } else { matrix.to_csr() };

    let (n_rows, n_cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSR::new(n_rows, n_cols, indptr, indices, data)
}
