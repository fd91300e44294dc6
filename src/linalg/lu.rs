use crate::linalg::LinalgError;
use crate::matrix::Matrix;

/// LU decomposition with partial pivoting (Crout's method).
///
/// Factors a row permutation of the input as `P·A = L·U` with L unit
/// lower triangular and U upper triangular, packed into a single m×n
/// buffer (L strictly below the diagonal, U on and above it).
///
/// The constructor always completes: a zero pivot marks the matrix
/// singular instead of failing, and the partially formed factors stay
/// inspectable. Check [`is_nonsingular`](LuDecomposition::is_nonsingular)
/// before trusting [`solve`](LuDecomposition::solve) or
/// [`det`](LuDecomposition::det).
///
/// # Example
///
/// ```
/// use numat::Matrix;
///
/// let a = Matrix::from_rows(2, 2, &[2.0, 1.0, 5.0, 3.0]);
/// let lu = a.lu();
/// assert!(lu.is_nonsingular());
/// assert!((lu.det().unwrap() - 1.0).abs() < 1e-12);
///
/// let b = Matrix::from_rows(2, 1, &[4.0, 11.0]);
/// let x = lu.solve(&b).unwrap();
/// assert!((x[(0, 0)] - 1.0).abs() < 1e-12);
/// assert!((x[(1, 0)] - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    lu: Matrix,
    piv: Vec<usize>,
    piv_sign: f64,
}

impl LuDecomposition {
    /// Decompose a matrix. The whole factorization runs here; the result
    /// is immutable afterwards.
    pub fn new(a: &Matrix) -> Self {
        let mut lu = a.clone();
        let (m, n) = (lu.nrows(), lu.ncols());
        let mut piv: Vec<usize> = (0..m).collect();
        let mut piv_sign = 1.0;
        let mut col_j = vec![0.0; m];

        for j in 0..n {
            for (i, c) in col_j.iter_mut().enumerate() {
                *c = lu[(i, j)];
            }

            // Dot-product update against the already-factored prefix
            for i in 0..m {
                let kmax = i.min(j);
                let mut s = 0.0;
                for k in 0..kmax {
                    s += lu[(i, k)] * col_j[k];
                }
                col_j[i] -= s;
                lu[(i, j)] = col_j[i];
            }

            // Partial pivoting: largest magnitude in rows j..m
            let mut p = j;
            for i in (j + 1)..m {
                if col_j[i].abs() > col_j[p].abs() {
                    p = i;
                }
            }
            if p != j {
                lu.swap_rows(p, j);
                piv.swap(p, j);
                piv_sign = -piv_sign;
            }

            // Normalize below the pivot; a zero pivot is left alone and
            // surfaces later through is_nonsingular()
            if j < m && lu[(j, j)] != 0.0 {
                let d = lu[(j, j)];
                for i in (j + 1)..m {
                    lu[(i, j)] /= d;
                }
            }
        }

        Self { lu, piv, piv_sign }
    }

    /// The unit lower triangular factor L (m×n).
    pub fn l(&self) -> Matrix {
        let (m, n) = (self.lu.nrows(), self.lu.ncols());
        Matrix::from_fn(m, n, |i, j| {
            if i > j {
                self.lu[(i, j)]
            } else if i == j {
                1.0
            } else {
                0.0
            }
        })
    }

    /// The upper triangular factor U (n×n).
    pub fn u(&self) -> Matrix {
        let n = self.lu.ncols();
        Matrix::from_fn(n, n, |i, j| if i <= j { self.lu[(i, j)] } else { 0.0 })
    }

    /// The row permutation: `pivot()[i]` is the source row of row `i`
    /// in the factored form.
    #[inline]
    pub fn pivot(&self) -> &[usize] {
        &self.piv
    }

    /// Whether U has no exactly-zero diagonal entry.
    pub fn is_nonsingular(&self) -> bool {
        let k = self.lu.nrows().min(self.lu.ncols());
        (0..k).all(|j| self.lu[(j, j)] != 0.0)
    }

    /// Determinant: `piv_sign · Π U[j][j]`.
    ///
    /// Fails with [`LinalgError::ShapeMismatch`] when the factored matrix
    /// is not square.
    pub fn det(&self) -> Result<f64, LinalgError> {
        let (m, n) = (self.lu.nrows(), self.lu.ncols());
        if m != n {
            return Err(LinalgError::ShapeMismatch {
                expected: (m, m),
                got: (m, n),
            });
        }
        let mut d = self.piv_sign;
        for j in 0..n {
            d *= self.lu[(j, j)];
        }
        Ok(d)
    }

    /// Solve `A·X = B` for `X` (n×k).
    ///
    /// Fails with [`LinalgError::ShapeMismatch`] when `b.nrows()` differs
    /// from the factored row count, and with [`LinalgError::Singular`]
    /// when [`is_nonsingular`](LuDecomposition::is_nonsingular) is false.
    pub fn solve(&self, b: &Matrix) -> Result<Matrix, LinalgError> {
        let (m, n) = (self.lu.nrows(), self.lu.ncols());
        if b.nrows() != m {
            return Err(LinalgError::ShapeMismatch {
                expected: (m, b.ncols()),
                got: (b.nrows(), b.ncols()),
            });
        }
        if !self.is_nonsingular() {
            return Err(LinalgError::Singular);
        }

        let nx = b.ncols();
        let mut x = Matrix::from_fn(m, nx, |i, j| b[(self.piv[i], j)]);

        // Forward substitution through unit-lower L
        for k in 0..n {
            for i in (k + 1)..n {
                let f = self.lu[(i, k)];
                if f != 0.0 {
                    for j in 0..nx {
                        let t = x[(k, j)] * f;
                        x[(i, j)] -= t;
                    }
                }
            }
        }

        // Back substitution through U
        for k in (0..n).rev() {
            let d = self.lu[(k, k)];
            for j in 0..nx {
                x[(k, j)] /= d;
            }
            for i in 0..k {
                let f = self.lu[(i, k)];
                if f != 0.0 {
                    for j in 0..nx {
                        let t = x[(k, j)] * f;
                        x[(i, j)] -= t;
                    }
                }
            }
        }

        if m == n {
            Ok(x)
        } else {
            Ok(x.block(0, 0, n, nx))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_reproduce_permuted_input() {
        let a = Matrix::from_rows(3, 3, &[2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
        let lu = a.lu();
        let product = lu.l() * lu.u();
        let permuted = a.select_rows(lu.pivot()).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert!(
                    (product[(i, j)] - permuted[(i, j)]).abs() < 1e-12,
                    "LU[({},{})]",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn solve_3x3() {
        let a = Matrix::from_rows(3, 3, &[2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
        let b = Matrix::from_rows(3, 1, &[8.0, -11.0, -3.0]);
        let x = a.lu().solve(&b).unwrap();
        assert!((x[(0, 0)] - 2.0).abs() < 1e-12);
        assert!((x[(1, 0)] - 3.0).abs() < 1e-12);
        assert!((x[(2, 0)] - (-1.0)).abs() < 1e-12);
    }

    #[test]
    fn solve_multiple_rhs() {
        let a = Matrix::from_rows(2, 2, &[4.0, 7.0, 2.0, 6.0]);
        let b = Matrix::from_rows(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let x = a.lu().solve(&b).unwrap();
        let id = &a * &x;
        for i in 0..2 {
            for j in 0..2 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((id[(i, j)] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn det_2x2() {
        let a = Matrix::from_rows(2, 2, &[3.0, 8.0, 4.0, 6.0]);
        assert!((a.lu().det().unwrap() - (-14.0)).abs() < 1e-12);
    }

    #[test]
    fn singular_is_flagged_not_thrown() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let lu = a.lu();
        assert!(!lu.is_nonsingular());
        // Determinant of a singular matrix is still well-defined (zero)
        assert_eq!(lu.det().unwrap(), 0.0);
        assert_eq!(
            lu.solve(&Matrix::eye(2)).unwrap_err(),
            LinalgError::Singular
        );
    }

    #[test]
    fn zero_leading_pivot_swaps() {
        // [[0,1],[1,0]] needs a row swap but is perfectly invertible
        let a = Matrix::from_rows(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let lu = a.lu();
        assert!(lu.is_nonsingular());
        let inv = lu.solve(&Matrix::eye(2)).unwrap();
        assert_eq!(inv, a.inverse().unwrap());
        assert!((lu.det().unwrap() - (-1.0)).abs() < 1e-12);
    }

    #[test]
    fn rhs_height_mismatch() {
        let a = Matrix::eye(3);
        let b = Matrix::zeros(2, 1);
        assert!(matches!(
            a.lu().solve(&b),
            Err(LinalgError::ShapeMismatch {
                expected: (3, 1),
                got: (2, 1),
            })
        ));
    }

    #[test]
    fn solve_verify_residual() {
        let a = Matrix::from_rows(
            4,
            4,
            &[
                1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 2.0, 6.0, 4.0, 1.0, 3.0, 1.0, 9.0, 2.0,
            ],
        );
        let b = Matrix::from_rows(4, 1, &[10.0, 26.0, 13.0, 15.0]);
        let x = a.lu().solve(&b).unwrap();

        for i in 0..4 {
            let mut row_sum = 0.0;
            for j in 0..4 {
                row_sum += a[(i, j)] * x[(j, 0)];
            }
            assert!(
                (row_sum - b[(i, 0)]).abs() < 1e-10,
                "residual[{}] = {}",
                i,
                row_sum - b[(i, 0)]
            );
        }
    }

    #[test]
    fn tall_factorization() {
        let a = Matrix::from_rows(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let lu = a.lu();
        let product = lu.l() * lu.u();
        let permuted = a.select_rows(lu.pivot()).unwrap();
        for i in 0..3 {
            for j in 0..2 {
                assert!((product[(i, j)] - permuted[(i, j)]).abs() < 1e-12);
            }
        }
        assert!(matches!(lu.det(), Err(LinalgError::ShapeMismatch { .. })));
    }
}
