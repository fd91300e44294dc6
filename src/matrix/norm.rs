use crate::linalg::SvdDecomposition;

use super::Matrix;

impl Matrix {
    /// One norm: maximum absolute column sum.
    ///
    /// ```
    /// use numat::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, -2.0, 3.0, 4.0]);
    /// assert!((m.norm_one() - 6.0).abs() < 1e-12);
    /// ```
    pub fn norm_one(&self) -> f64 {
        let mut max = 0.0;
        for j in 0..self.ncols {
            let mut col_sum = 0.0;
            for i in 0..self.nrows {
                col_sum += self[(i, j)].abs();
            }
            if col_sum > max {
                max = col_sum;
            }
        }
        max
    }

    /// Infinity norm: maximum absolute row sum.
    ///
    /// ```
    /// use numat::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, -2.0, 3.0, 4.0]);
    /// assert!((m.norm_inf() - 7.0).abs() < 1e-12);
    /// ```
    pub fn norm_inf(&self) -> f64 {
        let mut max = 0.0;
        for i in 0..self.nrows {
            let row_sum: f64 = self.row_slice(i).iter().map(|x| x.abs()).sum();
            if row_sum > max {
                max = row_sum;
            }
        }
        max
    }

    /// Frobenius norm: square root of the sum of squared elements.
    pub fn frobenius_norm(&self) -> f64 {
        self.data.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// Two norm: the largest singular value. Runs a full SVD.
    pub fn norm_two(&self) -> f64 {
        SvdDecomposition::new(self).norm_two()
    }

    /// Condition number: ratio of largest to smallest singular value.
    /// Runs a full SVD.
    pub fn cond(&self) -> f64 {
        SvdDecomposition::new(self).cond()
    }
}
