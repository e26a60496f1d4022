//! Compressed Sparse Row (CSR) matrix format implementation

use num_traits::Num;
use std::fmt;

/// Read-only sparse matrix in Compressed Sparse Row layout
///
/// Row `i` owns the slots `row_ptr[i]..row_ptr[i + 1]` of `col_idx` and
/// `values`. Slots are grouped by row and, within a row, ordered by column.
#[derive(Clone)]
pub struct SparseMatrixCSR<T> {
    pub n_rows: usize,
    pub n_cols: usize,

    /// `n_rows + 1` offsets, starting at 0 and ending at `nnz`
    pub row_ptr: Vec<usize>,

    /// Column of each stored entry
    pub col_idx: Vec<usize>,

    /// Value of each stored entry
    pub values: Vec<T>,
}

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num,
{
    /// Creates a new CSR matrix with the given dimensions and data
    ///
    /// # Panics
    ///
    /// Panics if the input arrays are inconsistent:
    /// - row_ptr.len() must be n_rows + 1
    /// - col_idx.len() must equal values.len()
    /// - row_ptr[n_rows] must equal col_idx.len()
    /// - every column index must be below n_cols
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(row_ptr.len(), n_rows + 1, "row_ptr.len() must be n_rows + 1");
        assert_eq!(col_idx.len(), values.len(), "col_idx.len() must equal values.len()");
        assert_eq!(
            row_ptr[n_rows],
            col_idx.len(),
            "row_ptr[n_rows] must equal col_idx.len()"
        );

        for &col in &col_idx {
            assert!(col < n_cols, "Column index {} out of bounds (n_cols = {})", col, n_cols);
        }

        Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Number of stored entries in row i
    pub fn row_nnz(&self, i: usize) -> usize {
        self.row_ptr[i + 1] - self.row_ptr[i]
    }

    /// Fraction of entries that are not stored
    pub fn sparsity(&self) -> f64 {
        let total = self.n_rows as f64 * self.n_cols as f64;
        if total == 0.0 {
            return 1.0;
        }
        1.0 - self.nnz() as f64 / total
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (col_idx, value) representing a non-zero element
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(i < self.n_rows, "Row index out of bounds");

        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];

        self.col_idx[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&col, val)| (col, val))
    }

    /// Checks the ordering invariants the builder guarantees for
    /// duplicate-free input.
    ///
    /// `row_ptr` starts at zero, never decreases, ends at nnz, and column
    /// indices strictly increase within every row.
    pub fn is_canonical(&self) -> bool {
        if self.row_ptr.first() != Some(&0) || self.row_ptr[self.n_rows] != self.nnz() {
            return false;
        }
        if self.row_ptr.windows(2).any(|w| w[0] > w[1]) {
            return false;
        }
        (0..self.n_rows).all(|i| {
            self.col_idx[self.row_ptr[i]..self.row_ptr[i + 1]]
                .windows(2)
                .all(|w| w[0] < w[1])
        })
    }

    /// Number of entries that repeat the (row, col) of their predecessor
    pub fn duplicate_count(&self) -> usize {
        (0..self.n_rows)
            .map(|i| {
                self.col_idx[self.row_ptr[i]..self.row_ptr[i + 1]]
                    .windows(2)
                    .filter(|w| w[0] == w[1])
                    .count()
            })
            .sum()
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_ptr: vec![0; n_rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self {
            n_rows: n,
            n_cols: n,
            row_ptr: (0..=n).collect(),
            col_idx: (0..n).collect(),
            values: vec![T::one(); n],
        }
    }
}

/// Rows and entries per row shown by `Debug`
const DEBUG_PREVIEW: usize = 4;

impl<T: fmt::Debug> fmt::Debug for SparseMatrixCSR<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("SparseMatrixCSR");
        out.field("shape", &(self.n_rows, self.n_cols))
            .field("nnz", &self.values.len())
            .field("rows", &RowPreview(self));
        if self.n_rows > DEBUG_PREVIEW {
            out.finish_non_exhaustive()
        } else {
            out.finish()
        }
    }
}

/// Leading rows as `row: [(col, value), ..]`
struct RowPreview<'a, T>(&'a SparseMatrixCSR<T>);

impl<T: fmt::Debug> fmt::Debug for RowPreview<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        let mut rows = f.debug_map();
        for i in 0..m.n_rows.min(DEBUG_PREVIEW) {
            let span = m.row_ptr[i]..m.row_ptr[i + 1];
            let entries: Vec<(usize, &T)> = m.col_idx[span.clone()]
                .iter()
                .copied()
                .zip(&m.values[span])
                .take(DEBUG_PREVIEW)
                .collect();
            rows.entry(&i, &entries);
        }
        rows.finish()
    }
}
