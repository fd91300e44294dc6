use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::linalg::LinalgError;

use super::Matrix;

// ── Checked arithmetic ──────────────────────────────────────────────

impl Matrix {
    /// Element-wise sum, failing with [`LinalgError::ShapeMismatch`]
    /// instead of panicking when the operands differ in shape.
    ///
    /// ```
    /// use numat::Matrix;
    /// let a = Matrix::eye(2);
    /// assert!(a.try_add(&Matrix::zeros(2, 3)).is_err());
    /// ```
    pub fn try_add(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        self.check_same_shape(rhs)?;
        Ok(self + rhs)
    }

    /// Element-wise difference; see [`try_add`](Matrix::try_add).
    pub fn try_sub(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        self.check_same_shape(rhs)?;
        Ok(self - rhs)
    }

    /// Matrix product, failing with [`LinalgError::ShapeMismatch`] when
    /// `self.ncols() != rhs.nrows()`.
    pub fn try_mul(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        if self.ncols != rhs.nrows {
            return Err(LinalgError::ShapeMismatch {
                expected: (self.ncols, rhs.ncols),
                got: (rhs.nrows, rhs.ncols),
            });
        }
        Ok(self * rhs)
    }

    fn check_same_shape(&self, rhs: &Matrix) -> Result<(), LinalgError> {
        if (self.nrows, self.ncols) != (rhs.nrows, rhs.ncols) {
            return Err(LinalgError::ShapeMismatch {
                expected: (self.nrows, self.ncols),
                got: (rhs.nrows, rhs.ncols),
            });
        }
        Ok(())
    }
}

// ── Element-wise addition ───────────────────────────────────────────

impl Add<&Matrix> for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: &Matrix) -> Matrix {
        assert_eq!(
            (self.nrows, self.ncols),
            (rhs.nrows, rhs.ncols),
            "dimension mismatch: {}x{} + {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        Matrix {
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| a + b)
                .collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl Add for Matrix {
    type Output = Matrix;
    fn add(self, rhs: Matrix) -> Matrix {
        &self + &rhs
    }
}

impl Add<&Matrix> for Matrix {
    type Output = Matrix;
    fn add(self, rhs: &Matrix) -> Matrix {
        &self + rhs
    }
}

impl Add<Matrix> for &Matrix {
    type Output = Matrix;
    fn add(self, rhs: Matrix) -> Matrix {
        self + &rhs
    }
}

impl AddAssign<&Matrix> for Matrix {
    fn add_assign(&mut self, rhs: &Matrix) {
        assert_eq!(
            (self.nrows, self.ncols),
            (rhs.nrows, rhs.ncols),
            "dimension mismatch: {}x{} += {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a += b;
        }
    }
}

impl AddAssign for Matrix {
    fn add_assign(&mut self, rhs: Matrix) {
        self.add_assign(&rhs);
    }
}

// ── Element-wise subtraction ────────────────────────────────────────

impl Sub<&Matrix> for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: &Matrix) -> Matrix {
        assert_eq!(
            (self.nrows, self.ncols),
            (rhs.nrows, rhs.ncols),
            "dimension mismatch: {}x{} - {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        Matrix {
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| a - b)
                .collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl Sub for Matrix {
    type Output = Matrix;
    fn sub(self, rhs: Matrix) -> Matrix {
        &self - &rhs
    }
}

impl Sub<&Matrix> for Matrix {
    type Output = Matrix;
    fn sub(self, rhs: &Matrix) -> Matrix {
        &self - rhs
    }
}

impl Sub<Matrix> for &Matrix {
    type Output = Matrix;
    fn sub(self, rhs: Matrix) -> Matrix {
        self - &rhs
    }
}

impl SubAssign<&Matrix> for Matrix {
    fn sub_assign(&mut self, rhs: &Matrix) {
        assert_eq!(
            (self.nrows, self.ncols),
            (rhs.nrows, rhs.ncols),
            "dimension mismatch: {}x{} -= {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a -= b;
        }
    }
}

impl SubAssign for Matrix {
    fn sub_assign(&mut self, rhs: Matrix) {
        self.sub_assign(&rhs);
    }
}

// ── Negation ────────────────────────────────────────────────────────

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        Matrix {
            data: self.data.iter().map(|&x| -x).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

impl Neg for Matrix {
    type Output = Matrix;
    fn neg(self) -> Matrix {
        -&self
    }
}

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ───────────────────

impl Mul<&Matrix> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: &Matrix) -> Matrix {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut data = vec![0.0; m * p];
        for i in 0..m {
            for k in 0..n {
                let a_ik = self.data[i * n + k];
                for j in 0..p {
                    data[i * p + j] += a_ik * rhs.data[k * p + j];
                }
            }
        }
        Matrix {
            data,
            nrows: m,
            ncols: p,
        }
    }
}

impl Mul for Matrix {
    type Output = Matrix;
    fn mul(self, rhs: Matrix) -> Matrix {
        &self * &rhs
    }
}

impl Mul<&Matrix> for Matrix {
    type Output = Matrix;
    fn mul(self, rhs: &Matrix) -> Matrix {
        &self * rhs
    }
}

impl Mul<Matrix> for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: Matrix) -> Matrix {
        self * &rhs
    }
}

// ── Scalar arithmetic ───────────────────────────────────────────────

impl Add<f64> for &Matrix {
    type Output = Matrix;
    fn add(self, rhs: f64) -> Matrix {
        self.map(|x| x + rhs)
    }
}

impl Add<f64> for Matrix {
    type Output = Matrix;
    fn add(self, rhs: f64) -> Matrix {
        &self + rhs
    }
}

impl Sub<f64> for &Matrix {
    type Output = Matrix;
    fn sub(self, rhs: f64) -> Matrix {
        self.map(|x| x - rhs)
    }
}

impl Sub<f64> for Matrix {
    type Output = Matrix;
    fn sub(self, rhs: f64) -> Matrix {
        &self - rhs
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: f64) -> Matrix {
        self.map(|x| x * rhs)
    }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;
    fn mul(self, rhs: f64) -> Matrix {
        &self * rhs
    }
}

impl Mul<&Matrix> for f64 {
    type Output = Matrix;
    fn mul(self, rhs: &Matrix) -> Matrix {
        rhs * self
    }
}

impl Mul<Matrix> for f64 {
    type Output = Matrix;
    fn mul(self, rhs: Matrix) -> Matrix {
        rhs * self
    }
}

impl Div<f64> for &Matrix {
    type Output = Matrix;
    fn div(self, rhs: f64) -> Matrix {
        self.map(|x| x / rhs)
    }
}

impl Div<f64> for Matrix {
    type Output = Matrix;
    fn div(self, rhs: f64) -> Matrix {
        &self / rhs
    }
}

impl MulAssign<f64> for Matrix {
    fn mul_assign(&mut self, rhs: f64) {
        for x in self.data.iter_mut() {
            *x *= rhs;
        }
    }
}

impl DivAssign<f64> for Matrix {
    fn div_assign(&mut self, rhs: f64) {
        for x in self.data.iter_mut() {
            *x /= rhs;
        }
    }
}
