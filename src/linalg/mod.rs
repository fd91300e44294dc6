pub(crate) mod cholesky;
pub(crate) mod eigen;
pub(crate) mod lu;
pub(crate) mod qr;
pub(crate) mod svd;

pub use cholesky::CholeskyDecomposition;
pub use eigen::EigenDecomposition;
pub use lu::LuDecomposition;
pub use qr::QrDecomposition;
pub use svd::SvdDecomposition;

/// Errors from matrix and linear-algebra operations.
///
/// Shape violations (`IndexOutOfBounds`, `ShapeMismatch`) are reported
/// immediately by the offending call. Numerical invalidity is deferred:
/// decomposition constructors always run to completion and set a status
/// flag, and only the consuming `solve`/`det` call returns `Singular`,
/// `NotPositiveDefinite`, or `RankDeficient`.
///
/// ```
/// use numat::{LinalgError, Matrix};
///
/// let singular = Matrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 4.0]);
/// let lu = singular.lu();
/// assert!(!lu.is_nonsingular());
/// assert_eq!(
///     lu.solve(&Matrix::eye(2)).unwrap_err(),
///     LinalgError::Singular,
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LinalgError {
    /// Element access outside `[0, nrows) × [0, ncols)`.
    #[error("index ({row}, {col}) out of bounds for {nrows}x{ncols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },
    /// Operand shapes violate the operation's contract.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Actual `(rows, cols)`.
        got: (usize, usize),
    },
    /// LU solve on a matrix with an exactly-zero U diagonal entry.
    #[error("matrix is singular")]
    Singular,
    /// Cholesky solve after a non-positive pivot was encountered.
    #[error("matrix is not symmetric positive definite")]
    NotPositiveDefinite,
    /// QR least-squares solve on a rank-deficient system.
    #[error("matrix is rank deficient")]
    RankDeficient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = LinalgError::IndexOutOfBounds {
            row: 2,
            col: 0,
            nrows: 2,
            ncols: 2,
        };
        assert_eq!(e.to_string(), "index (2, 0) out of bounds for 2x2 matrix");

        let e = LinalgError::ShapeMismatch {
            expected: (3, 3),
            got: (2, 1),
        };
        assert_eq!(e.to_string(), "dimension mismatch: expected (3, 3), got (2, 1)");

        assert_eq!(LinalgError::Singular.to_string(), "matrix is singular");
    }
}
