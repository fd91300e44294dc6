use core::ops::Range;

use crate::linalg::LinalgError;

use super::Matrix;

impl Matrix {
    /// Extract a sub-matrix of size `rows x cols` starting at `(i, j)`.
    ///
    /// Panics if the block extends beyond the matrix bounds.
    ///
    /// ```
    /// use numat::Matrix;
    /// let m = Matrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
    /// let b = m.block(1, 1, 2, 2);
    /// assert_eq!(b[(0, 0)], 4.0);
    /// assert_eq!(b[(1, 1)], 8.0);
    /// ```
    pub fn block(&self, i: usize, j: usize, rows: usize, cols: usize) -> Self {
        assert!(
            i + rows <= self.nrows && j + cols <= self.ncols,
            "block ({},{}) size {}x{} out of bounds for {}x{} matrix",
            i, j, rows, cols, self.nrows, self.ncols,
        );
        Matrix::from_fn(rows, cols, |r, c| self[(i + r, j + c)])
    }

    /// Write a sub-matrix into self starting at position `(i, j)`.
    ///
    /// Panics if the block extends beyond the matrix bounds.
    pub fn set_block(&mut self, i: usize, j: usize, src: &Matrix) {
        assert!(
            i + src.nrows <= self.nrows && j + src.ncols <= self.ncols,
            "set_block ({},{}) size {}x{} out of bounds for {}x{} matrix",
            i, j, src.nrows, src.ncols, self.nrows, self.ncols,
        );
        for r in 0..src.nrows {
            for c in 0..src.ncols {
                self[(i + r, j + c)] = src[(r, c)];
            }
        }
    }

    /// Extract the sub-matrix covering the half-open row and column ranges.
    ///
    /// Checked variant of [`block`](Matrix::block): an out-of-bounds or
    /// inverted range yields [`LinalgError::ShapeMismatch`].
    ///
    /// ```
    /// use numat::Matrix;
    /// let m = Matrix::from_fn(3, 4, |i, j| (i * 4 + j) as f64);
    /// let s = m.submatrix(1..3, 0..2).unwrap();
    /// assert_eq!(s[(0, 0)], 4.0);
    /// assert_eq!(s[(1, 1)], 9.0);
    /// assert!(m.submatrix(0..4, 0..2).is_err());
    /// ```
    pub fn submatrix(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self, LinalgError> {
        if rows.end > self.nrows || cols.end > self.ncols || rows.start > rows.end
            || cols.start > cols.end
        {
            return Err(LinalgError::ShapeMismatch {
                expected: (self.nrows, self.ncols),
                got: (rows.end, cols.end),
            });
        }
        Ok(self.block(
            rows.start,
            cols.start,
            rows.end - rows.start,
            cols.end - cols.start,
        ))
    }

    /// Extract the sub-matrix formed by the given row and column indices,
    /// in the order listed (indices may repeat).
    ///
    /// ```
    /// use numat::Matrix;
    /// let m = Matrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
    /// let s = m.select(&[2, 0], &[1]).unwrap();
    /// assert_eq!((s.nrows(), s.ncols()), (2, 1));
    /// assert_eq!(s[(0, 0)], 7.0);
    /// assert_eq!(s[(1, 0)], 1.0);
    /// ```
    pub fn select(&self, rows: &[usize], cols: &[usize]) -> Result<Self, LinalgError> {
        for &r in rows {
            if r >= self.nrows {
                return Err(LinalgError::IndexOutOfBounds {
                    row: r,
                    col: 0,
                    nrows: self.nrows,
                    ncols: self.ncols,
                });
            }
        }
        for &c in cols {
            if c >= self.ncols {
                return Err(LinalgError::IndexOutOfBounds {
                    row: 0,
                    col: c,
                    nrows: self.nrows,
                    ncols: self.ncols,
                });
            }
        }
        Ok(Matrix::from_fn(rows.len(), cols.len(), |r, c| {
            self[(rows[r], cols[c])]
        }))
    }

    /// Extract whole rows by index; see [`select`](Matrix::select).
    pub fn select_rows(&self, rows: &[usize]) -> Result<Self, LinalgError> {
        let cols: Vec<usize> = (0..self.ncols).collect();
        self.select(rows, &cols)
    }

    /// Extract whole columns by index; see [`select`](Matrix::select).
    pub fn select_cols(&self, cols: &[usize]) -> Result<Self, LinalgError> {
        let rows: Vec<usize> = (0..self.nrows).collect();
        self.select(&rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat4x5() -> Matrix {
        Matrix::from_fn(4, 5, |i, j| (i * 5 + j) as f64)
    }

    #[test]
    fn block_extract() {
        let m = mat4x5();
        let b = m.block(1, 1, 2, 3);
        assert_eq!(b[(0, 0)], 6.0);
        assert_eq!(b[(1, 2)], 13.0);
    }

    #[test]
    fn block_full() {
        let m = mat4x5();
        assert_eq!(m.block(0, 0, 4, 5), m);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn block_out_of_bounds() {
        let m = mat4x5();
        let _ = m.block(3, 3, 2, 3);
    }

    #[test]
    fn set_block_round_trip() {
        let m = mat4x5();
        let b = m.block(1, 2, 2, 3);
        let mut m2 = mat4x5();
        m2.set_block(1, 2, &b);
        assert_eq!(m, m2);
    }

    #[test]
    fn submatrix_ranges() {
        let m = mat4x5();
        let s = m.submatrix(1..3, 2..5).unwrap();
        assert_eq!((s.nrows(), s.ncols()), (2, 3));
        assert_eq!(s[(0, 0)], 7.0);
        assert!(m.submatrix(0..5, 0..2).is_err());
        assert!(m.submatrix(2..1, 0..2).is_err());
    }

    #[test]
    fn select_indices() {
        let m = mat4x5();
        let s = m.select(&[3, 1], &[0, 4]).unwrap();
        assert_eq!(s[(0, 0)], 15.0);
        assert_eq!(s[(0, 1)], 19.0);
        assert_eq!(s[(1, 0)], 5.0);
        assert_eq!(s[(1, 1)], 9.0);
        assert!(m.select(&[4], &[0]).is_err());
        assert!(m.select(&[0], &[5]).is_err());
    }

    #[test]
    fn select_rows_cols() {
        let m = mat4x5();
        let r = m.select_rows(&[2]).unwrap();
        assert_eq!((r.nrows(), r.ncols()), (1, 5));
        assert_eq!(r[(0, 3)], 13.0);

        let c = m.select_cols(&[1, 1]).unwrap();
        assert_eq!((c.nrows(), c.ncols()), (4, 2));
        assert_eq!(c[(3, 0)], 16.0);
        assert_eq!(c[(3, 1)], 16.0);
    }
}
