//! Properties of triplet-to-CSR compression

use proptest::prelude::*;
use spmv_bench::{build_csr, DenseMatrix, SparseMatrixCSR, Triplet};
use std::collections::BTreeMap;

/// Unique coordinates with values in a small range, shuffled
fn unique_triplets(max_dim: usize) -> impl Strategy<Value = (usize, usize, Vec<Triplet<f64>>)> {
    (1..=max_dim, 1..=max_dim).prop_flat_map(|(rows, cols)| {
        let entries = prop::collection::btree_map((0..rows, 0..cols), -100.0f64..100.0, 0..=rows * cols);
        entries.prop_map(move |map: BTreeMap<(usize, usize), f64>| {
            let triplets = map
                .into_iter()
                .rev()
                .map(|((r, c), v)| Triplet::new(r, c, v))
                .collect();
            (rows, cols, triplets)
        })
    })
}

proptest! {
    #[test]
    fn round_trip_matches_dense((rows, cols, triplets) in unique_triplets(12)) {
        let dense = DenseMatrix::from_triplets(rows, cols, &triplets);
        let csr = build_csr(rows, cols, triplets.clone());

        prop_assert_eq!(csr.nnz(), triplets.len());
        let back = csr.to_dense();
        for i in 0..rows {
            prop_assert_eq!(back.row(i), dense.row(i));
        }
    }

    #[test]
    fn row_ptr_is_well_formed((rows, cols, triplets) in unique_triplets(12)) {
        let csr = build_csr(rows, cols, triplets);

        prop_assert_eq!(csr.row_ptr.len(), rows + 1);
        prop_assert_eq!(csr.row_ptr[0], 0);
        prop_assert_eq!(csr.row_ptr[rows], csr.nnz());
        prop_assert!(csr.row_ptr.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(csr.col_idx.iter().all(|&c| c < cols));
        prop_assert!(csr.is_canonical());
    }

    #[test]
    fn from_dense_agrees_with_builder((rows, cols, triplets) in unique_triplets(10)) {
        let nonzero: Vec<_> = triplets.iter().copied().filter(|t| t.value != 0.0).collect();
        let dense = DenseMatrix::from_triplets(rows, cols, &nonzero);

        let from_dense = SparseMatrixCSR::from_dense(&dense);
        let built = build_csr(rows, cols, nonzero);

        prop_assert_eq!(from_dense.row_ptr, built.row_ptr);
        prop_assert_eq!(from_dense.col_idx, built.col_idx);
        prop_assert_eq!(from_dense.values, built.values);
    }
}

#[test]
fn test_empty_rows_between_populated_ones() {
    // Rows 0 and 3 of 5 populated: two entries in row 0, one in row 3
    let triplets = vec![
        Triplet::new(3, 1, 7.0),
        Triplet::new(0, 4, 2.0),
        Triplet::new(0, 0, 1.0),
    ];
    let csr = build_csr(5, 5, triplets);

    assert_eq!(csr.row_ptr, vec![0, 2, 2, 2, 3, 3]);
    assert_eq!(csr.col_idx, vec![0, 4, 1]);
    assert_eq!(csr.values, vec![1.0, 2.0, 7.0]);
}

#[test]
fn test_single_entry_in_last_row() {
    let csr = build_csr(4, 2, vec![Triplet::new(3, 1, 5.0)]);
    assert_eq!(csr.row_ptr, vec![0, 0, 0, 0, 1]);
}

#[test]
fn test_duplicates_survive() {
    let csr = build_csr(
        2,
        2,
        vec![Triplet::new(1, 1, 1.0), Triplet::new(1, 1, 2.0), Triplet::new(0, 0, 4.0)],
    );

    assert_eq!(csr.nnz(), 3);
    assert_eq!(csr.row_ptr, vec![0, 1, 3]);
    assert_eq!(csr.duplicate_count(), 1);
    assert_eq!(csr.to_dense().get(1, 1), 3.0);
}
