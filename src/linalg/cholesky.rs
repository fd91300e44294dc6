use crate::linalg::LinalgError;
use crate::matrix::Matrix;

/// Cholesky decomposition of a symmetric positive-definite matrix
/// (`A = L·Lᵀ`), by row-wise Cholesky–Banachiewicz elimination.
///
/// The constructor never fails: when a diagonal pivot comes out
/// negative, the decomposition keeps going with the raw value stored in
/// that diagonal slot and [`is_spd`](CholeskyDecomposition::is_spd)
/// cleared, so the partially formed factor remains available for
/// diagnostics. Only [`solve`](CholeskyDecomposition::solve) reports
/// [`LinalgError::NotPositiveDefinite`].
///
/// # Example
///
/// ```
/// use numat::Matrix;
///
/// let a = Matrix::from_rows(3, 3, &[
///     4.0, 12.0, -16.0,
///     12.0, 37.0, -43.0,
///     -16.0, -43.0, 98.0,
/// ]);
/// let chol = a.cholesky();
/// assert!(chol.is_spd());
/// let l = chol.l();
/// assert!((l[(1, 0)] - 6.0).abs() < 1e-12);
/// assert!((l[(2, 2)] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct CholeskyDecomposition {
    l: Matrix,
    spd: bool,
}

impl CholeskyDecomposition {
    /// Decompose a square matrix.
    ///
    /// Panics if the matrix is not square (a programming error, unlike
    /// non-positive-definiteness which is a data property and deferred).
    pub fn new(a: &Matrix) -> Self {
        assert!(
            a.is_square(),
            "Cholesky decomposition requires a square matrix"
        );
        let n = a.nrows();
        let mut l = Matrix::zeros(n, n);
        let mut spd = true;

        for i in 0..n {
            for j in i..n {
                let mut sum = a[(j, i)];
                for k in 0..i {
                    sum -= l[(i, k)] * l[(j, k)];
                }
                if i == j {
                    if sum >= 0.0 {
                        l[(i, i)] = sum.sqrt();
                    } else {
                        // Keep the raw value for inspection; no abort
                        spd = false;
                        l[(i, i)] = sum;
                    }
                } else if l[(i, i)] != 0.0 {
                    l[(j, i)] = sum / l[(i, i)];
                }
            }
        }

        Self { l, spd }
    }

    /// The lower triangular factor L. The strict upper triangle is zero.
    #[inline]
    pub fn l(&self) -> &Matrix {
        &self.l
    }

    /// Whether every diagonal pivot came out positive (i.e. the input
    /// was symmetric positive definite as far as the elimination saw).
    #[inline]
    pub fn is_spd(&self) -> bool {
        self.spd
    }

    /// Solve `A·X = B` where `A = L·Lᵀ`: forward-substitute `L·Y = B`,
    /// then back-substitute `Lᵀ·X = Y`.
    ///
    /// Fails with [`LinalgError::ShapeMismatch`] when `b.nrows()` differs
    /// from the factored dimension, and with
    /// [`LinalgError::NotPositiveDefinite`] when
    /// [`is_spd`](CholeskyDecomposition::is_spd) is false.
    pub fn solve(&self, b: &Matrix) -> Result<Matrix, LinalgError> {
        let n = self.l.nrows();
        if b.nrows() != n {
            return Err(LinalgError::ShapeMismatch {
                expected: (n, b.ncols()),
                got: (b.nrows(), b.ncols()),
            });
        }
        if !self.spd {
            return Err(LinalgError::NotPositiveDefinite);
        }

        let nx = b.ncols();
        let mut x = b.clone();

        // Forward substitution: L·Y = B
        for k in 0..n {
            for j in 0..nx {
                for i in 0..k {
                    let t = x[(i, j)] * self.l[(k, i)];
                    x[(k, j)] -= t;
                }
                x[(k, j)] /= self.l[(k, k)];
            }
        }

        // Back substitution: Lᵀ·X = Y
        for k in (0..n).rev() {
            for j in 0..nx {
                for i in (k + 1)..n {
                    let t = x[(i, j)] * self.l[(i, k)];
                    x[(k, j)] -= t;
                }
                x[(k, j)] /= self.l[(k, k)];
            }
        }

        Ok(x)
    }
}
