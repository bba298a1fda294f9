//! Coefficient matrices in dense or sparse form.

use nalgebra::DMatrix;
use sprs::{CsMat, TriMat};

/// A constraint coefficient matrix, dense or sparse per the caller's choice
/// at compilation time. External backends match on the variant they can
/// consume.
#[derive(Debug, Clone)]
pub enum CoefficientMatrix {
    Dense(DMatrix<f64>),
    Sparse(CsMat<f64>),
}

impl CoefficientMatrix {
    /// Build from `(row, col, value)` triplets. Rows and columns outside the
    /// triplet set stay structurally zero.
    pub fn from_triplets(
        nrows: usize,
        ncols: usize,
        triplets: &[(usize, usize, f64)],
        is_sparse: bool,
    ) -> Self {
        if is_sparse {
            let mut tri = TriMat::new((nrows, ncols));
            for &(row, col, value) in triplets {
                tri.add_triplet(row, col, value);
            }
            CoefficientMatrix::Sparse(tri.to_csr())
        } else {
            let mut dense = DMatrix::zeros(nrows, ncols);
            for &(row, col, value) in triplets {
                dense[(row, col)] = value;
            }
            CoefficientMatrix::Dense(dense)
        }
    }

    pub fn nrows(&self) -> usize {
        match self {
            CoefficientMatrix::Dense(matrix) => matrix.nrows(),
            CoefficientMatrix::Sparse(matrix) => matrix.rows(),
        }
    }

    pub fn ncols(&self) -> usize {
        match self {
            CoefficientMatrix::Dense(matrix) => matrix.ncols(),
            CoefficientMatrix::Sparse(matrix) => matrix.cols(),
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, CoefficientMatrix::Sparse(_))
    }

    /// The coefficient at `(row, col)`; structural zeros read as 0.0.
    /// Panics if the position is outside the matrix shape.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        match self {
            CoefficientMatrix::Dense(matrix) => matrix[(row, col)],
            CoefficientMatrix::Sparse(matrix) => {
                assert!(row < matrix.rows() && col < matrix.cols());
                matrix.get(row, col).copied().unwrap_or(0.0)
            }
        }
    }

    /// Densify; used by the equality-system path and by tests.
    pub fn to_dense(&self) -> DMatrix<f64> {
        match self {
            CoefficientMatrix::Dense(matrix) => matrix.clone(),
            CoefficientMatrix::Sparse(matrix) => {
                let mut dense = DMatrix::zeros(matrix.rows(), matrix.cols());
                for (value, (row, col)) in matrix.iter() {
                    dense[(row, col)] = *value;
                }
                dense
            }
        }
    }
}
