// Matrix data structures and conversions

pub mod builder;
pub mod conversion;
pub mod csr;
pub mod dense;
pub mod generator;

pub use builder::{build_csr, Triplet};
pub use csr::SparseMatrixCSR;
pub use dense::DenseMatrix;
pub use generator::MatrixGenerator;
