use crate::linalg::LinalgError;
use crate::matrix::Matrix;

/// QR decomposition by Householder reflections.
///
/// Factors `A = Q·R` with Q orthonormal (m×n) and R upper triangular
/// (n×n). The Householder vectors are packed below the diagonal of the
/// working buffer; the sign-adjusted column norms that form R's diagonal
/// live in a separate array. Subcolumn norms are accumulated with
/// `f64::hypot`, which stays stable where `sqrt(a² + b²)` would overflow
/// or underflow.
///
/// Any m×n shape is accepted. Columns beyond the row count can never be
/// reduced and simply leave zero diagonal entries, so
/// [`is_full_rank`](QrDecomposition::is_full_rank) is always false for
/// m < n.
///
/// # Example
///
/// ```
/// use numat::Matrix;
///
/// // Least-squares fit y = c0 + c1*x to (0,1), (1,2), (2,4)
/// let a = Matrix::from_rows(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
/// let b = Matrix::from_rows(3, 1, &[1.0, 2.0, 4.0]);
/// let x = a.qr().solve(&b).unwrap();
/// assert!((x[(0, 0)] - 5.0 / 6.0).abs() < 1e-10);
/// assert!((x[(1, 0)] - 3.0 / 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct QrDecomposition {
    qr: Matrix,
    r_diag: Vec<f64>,
}

impl QrDecomposition {
    /// Decompose a matrix. The whole factorization runs here; the result
    /// is immutable afterwards.
    pub fn new(a: &Matrix) -> Self {
        let mut qr = a.clone();
        let (m, n) = (qr.nrows(), qr.ncols());
        let mut r_diag = vec![0.0; n];

        for k in 0..n {
            let mut nrm = 0.0_f64;
            for i in k..m {
                nrm = nrm.hypot(qr[(i, k)]);
            }

            if nrm != 0.0 {
                // Sign opposite the pivot avoids cancellation in v[k]
                if qr[(k, k)] < 0.0 {
                    nrm = -nrm;
                }
                for i in k..m {
                    qr[(i, k)] /= nrm;
                }
                qr[(k, k)] += 1.0;

                // Apply the reflection to the remaining columns
                for j in (k + 1)..n {
                    let mut s = 0.0;
                    for i in k..m {
                        s += qr[(i, k)] * qr[(i, j)];
                    }
                    s = -s / qr[(k, k)];
                    for i in k..m {
                        let t = s * qr[(i, k)];
                        qr[(i, j)] += t;
                    }
                }
            }

            r_diag[k] = -nrm;
        }

        Self { qr, r_diag }
    }

    /// Whether every diagonal entry of R is meaningfully non-zero
    /// (`|r_diag[j]| > f64::EPSILON` for all j).
    pub fn is_full_rank(&self) -> bool {
        self.r_diag.iter().all(|&d| d.abs() > f64::EPSILON)
    }

    /// The orthonormal factor Q (m×n), rebuilt from the packed
    /// Householder vectors on each call.
    pub fn q(&self) -> Matrix {
        let (m, n) = (self.qr.nrows(), self.qr.ncols());
        let mut q = Matrix::zeros(m, n);

        // Apply the reflections in reverse to the thin identity
        for k in (0..n.min(m)).rev() {
            q[(k, k)] = 1.0;
            for j in k..n {
                if self.qr[(k, k)] != 0.0 {
                    let mut s = 0.0;
                    for i in k..m {
                        s += self.qr[(i, k)] * q[(i, j)];
                    }
                    s = -s / self.qr[(k, k)];
                    for i in k..m {
                        let t = s * self.qr[(i, k)];
                        q[(i, j)] += t;
                    }
                }
            }
        }

        q
    }

    /// The upper triangular factor R (n×n).
    pub fn r(&self) -> Matrix {
        let n = self.qr.ncols();
        Matrix::from_fn(n, n, |i, j| {
            if i < j {
                self.qr[(i, j)]
            } else if i == j {
                self.r_diag[i]
            } else {
                0.0
            }
        })
    }

    /// The packed Householder vectors (lower trapezoid of the working
    /// buffer, m×n).
    pub fn h(&self) -> Matrix {
        let (m, n) = (self.qr.nrows(), self.qr.ncols());
        Matrix::from_fn(m, n, |i, j| if i >= j { self.qr[(i, j)] } else { 0.0 })
    }

    /// Solve `A·X = B` in the least-squares sense: minimize `‖A·X − B‖`
    /// column by column, returning the n×k solution (the first n rows of
    /// the transformed system).
    ///
    /// Fails with [`LinalgError::ShapeMismatch`] when `b.nrows()` differs
    /// from the factored row count, and with
    /// [`LinalgError::RankDeficient`] when
    /// [`is_full_rank`](QrDecomposition::is_full_rank) is false.
    pub fn solve(&self, b: &Matrix) -> Result<Matrix, LinalgError> {
        let (m, n) = (self.qr.nrows(), self.qr.ncols());
        if b.nrows() != m {
            return Err(LinalgError::ShapeMismatch {
                expected: (m, b.ncols()),
                got: (b.nrows(), b.ncols()),
            });
        }
        if !self.is_full_rank() {
            return Err(LinalgError::RankDeficient);
        }

        let nx = b.ncols();
        let mut x = b.clone();

        // Apply Qᵀ to B via the stored Householder vectors
        for k in 0..n {
            for j in 0..nx {
                let mut s = 0.0;
                for i in k..m {
                    s += self.qr[(i, k)] * x[(i, j)];
                }
                s = -s / self.qr[(k, k)];
                for i in k..m {
                    let t = s * self.qr[(i, k)];
                    x[(i, j)] += t;
                }
            }
        }

        // Back substitution through R
        for k in (0..n).rev() {
            for j in 0..nx {
                x[(k, j)] /= self.r_diag[k];
            }
            for i in 0..k {
                let f = self.qr[(i, k)];
                for j in 0..nx {
                    let t = x[(k, j)] * f;
                    x[(i, j)] -= t;
                }
            }
        }

        Ok(x.block(0, 0, n, nx))
    }
}
