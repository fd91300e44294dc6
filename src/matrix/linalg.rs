//! Linear-algebra entry points on `Matrix`: the `solve`/`inverse`/`det`
//! dispatchers and convenience constructors for the decomposition objects.

use crate::linalg::{
    CholeskyDecomposition, EigenDecomposition, LinalgError, LuDecomposition, QrDecomposition,
    SvdDecomposition,
};

use super::vector::Vector;
use super::Matrix;

impl Matrix {
    /// Solve `A·X = B` for `X`.
    ///
    /// Square systems go through [`LuDecomposition`]; rectangular ones
    /// through [`QrDecomposition`], which yields the least-squares
    /// solution when the system is overdetermined.
    ///
    /// Fails with [`LinalgError::ShapeMismatch`] when `b.nrows() !=
    /// self.nrows()`, and with [`LinalgError::Singular`] /
    /// [`LinalgError::RankDeficient`] when the chosen factorization
    /// cannot solve.
    ///
    /// ```
    /// use numat::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[2.0, 1.0, 5.0, 3.0]);
    /// let b = Matrix::from_rows(2, 1, &[4.0, 11.0]);
    /// let x = a.solve(&b).unwrap();
    /// assert!((x[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!((x[(1, 0)] - 2.0).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &Matrix) -> Result<Matrix, LinalgError> {
        if self.is_square() {
            LuDecomposition::new(self).solve(b)
        } else {
            QrDecomposition::new(self).solve(b)
        }
    }

    /// Solve `A·x = b` for a single right-hand-side vector.
    pub fn solve_vec(&self, b: &Vector) -> Result<Vector, LinalgError> {
        let x = self.solve(b.as_matrix())?;
        Vector::try_from(x)
    }

    /// Matrix inverse: `solve` against the identity.
    ///
    /// ```
    /// use numat::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let inv = a.inverse().unwrap();
    /// assert!((inv[(0, 0)] - (-2.0)).abs() < 1e-12);
    /// assert!((inv[(1, 1)] - (-0.5)).abs() < 1e-12);
    /// ```
    pub fn inverse(&self) -> Result<Matrix, LinalgError> {
        self.solve(&Matrix::eye(self.nrows))
    }

    /// Determinant, always via [`LuDecomposition`].
    ///
    /// Fails with [`LinalgError::ShapeMismatch`] when the matrix is not
    /// square.
    ///
    /// ```
    /// use numat::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert!((a.det().unwrap() - (-2.0)).abs() < 1e-12);
    /// ```
    pub fn det(&self) -> Result<f64, LinalgError> {
        LuDecomposition::new(self).det()
    }

    /// LU decomposition with partial pivoting.
    pub fn lu(&self) -> LuDecomposition {
        LuDecomposition::new(self)
    }

    /// QR decomposition by Householder reflections.
    pub fn qr(&self) -> QrDecomposition {
        QrDecomposition::new(self)
    }

    /// Cholesky decomposition (`A = L·Lᵀ`). Panics if not square.
    pub fn cholesky(&self) -> CholeskyDecomposition {
        CholeskyDecomposition::new(self)
    }

    /// Singular value decomposition.
    pub fn svd(&self) -> SvdDecomposition {
        SvdDecomposition::new(self)
    }

    /// Eigenvalue decomposition. Panics if not square.
    pub fn eig(&self) -> EigenDecomposition {
        EigenDecomposition::new(self)
    }
}
