//! Dense kernels, CSR kernels and external references agree within tolerance

use approx::assert_relative_eq;
use ndarray::Array1;
use spmv_bench::constants::CROSS_CHECK_RELATIVE_TOLERANCE;
use spmv_bench::verify::max_relative_error;
use spmv_bench::{
    dense_matvec_naive, dense_matvec_unrolled, spmv_parallel, spmv_sequential, to_sprs_csr,
    MatrixGenerator,
};

const SIZES: [(usize, usize); 6] = [(1, 1), (2, 3), (7, 5), (64, 64), (129, 257), (500, 500)];
const SPARSITIES: [f64; 3] = [0.0, 0.5, 0.99];

#[test]
fn test_all_strategies_agree() {
    for (case, &(rows, cols)) in SIZES.iter().enumerate() {
        for &sparsity in &SPARSITIES {
            let mut gen = MatrixGenerator::new(case as u64);
            let (dense, sparse) = gen.generate_pair(rows, cols, sparsity);
            let x = gen.generate_vector(cols);

            let mut naive = vec![0.0; rows];
            let mut unrolled = vec![0.0; rows];
            let mut seq = vec![0.0; rows];
            let mut par = vec![0.0; rows];
            dense_matvec_naive(&dense, &x, &mut naive);
            dense_matvec_unrolled(&dense, &x, &mut unrolled);
            spmv_sequential(&sparse, &x, &mut seq);
            spmv_parallel(&sparse, &x, &mut par);

            for (name, out) in [("naive", &naive), ("optimized", &unrolled), ("sparse_parallel", &par)] {
                let err = max_relative_error(&seq, out);
                assert!(
                    err <= CROSS_CHECK_RELATIVE_TOLERANCE,
                    "{} differs from sparse at {}x{} sparsity {}: {}",
                    name,
                    rows,
                    cols,
                    sparsity,
                    err
                );
            }
        }
    }
}

#[test]
fn test_matches_ndarray_dot() {
    let mut gen = MatrixGenerator::new(21);
    let (dense, sparse) = gen.generate_pair(150, 90, 0.5);
    let x = gen.generate_vector(90);

    let expected = dense.view().unwrap().dot(&Array1::from(x.clone()));
    let actual = sparse.mul_vec(&x);

    for (e, a) in expected.iter().zip(&actual) {
        assert_relative_eq!(*e, *a, max_relative = 1e-9, epsilon = 1e-12);
    }
}

#[test]
fn test_matches_sprs() {
    let mut gen = MatrixGenerator::new(22);
    let sparse = gen.generate_sparse(300, 200, 0.95);
    let x = gen.generate_vector(200);

    let expected = &to_sprs_csr(&sparse) * &Array1::from(x.clone());
    let actual = sparse.mul_vec_parallel(&x);

    for (e, a) in expected.iter().zip(&actual) {
        assert_relative_eq!(*e, *a, max_relative = 1e-9, epsilon = 1e-12);
    }
}

#[test]
#[should_panic(expected = "dimension mismatch")]
fn test_shape_mismatch_panics() {
    let (dense, _) = MatrixGenerator::new(1).generate_pair(4, 4, 0.0);
    let mut y = vec![0.0; 4];
    dense_matvec_unrolled(&dense, &[1.0; 3], &mut y);
}
