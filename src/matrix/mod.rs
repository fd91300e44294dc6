mod block;
mod elim;
mod linalg;
mod norm;
mod ops;
pub mod vector;

use core::ops::{Index, IndexMut};

use crate::linalg::LinalgError;

/// Dense matrix with runtime dimensions.
///
/// Row-major flat `Vec<f64>` storage: element `(i, j)` lives at
/// `data[i * ncols + j]`. Dimensions are fixed at construction and only
/// change through the explicit buffer-replacing APIs
/// ([`set_from_rows`](Matrix::set_from_rows),
/// [`set_from_nested`](Matrix::set_from_nested)).
///
/// Submatrix extraction and transposition always return new, independently
/// owned matrices; nothing aliases the source buffer.
///
/// # Examples
///
/// ```
/// use numat::Matrix;
///
/// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
///
/// let id = Matrix::eye(3);
/// assert_eq!(id[(0, 0)], 1.0);
/// assert_eq!(id[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
    pub(crate) data: Vec<f64>,
    pub(crate) nrows: usize,
    pub(crate) ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl Matrix {
    /// Create an `nrows x ncols` matrix filled with zeros.
    ///
    /// ```
    /// use numat::Matrix;
    /// let m = Matrix::zeros(2, 3);
    /// assert_eq!(m.nrows(), 2);
    /// assert_eq!(m.ncols(), 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            data: vec![0.0; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create a matrix filled with a given value.
    pub fn fill(nrows: usize, ncols: usize, value: f64) -> Self {
        Self {
            data: vec![value; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create an `n x n` identity matrix.
    ///
    /// ```
    /// use numat::Matrix;
    /// let id = Matrix::eye(3);
    /// assert_eq!(id[(1, 1)], 1.0);
    /// assert_eq!(id[(2, 1)], 0.0);
    /// ```
    pub fn eye(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Panics if `row_major.len() != nrows * ncols`.
    ///
    /// ```
    /// use numat::Matrix;
    /// let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[f64]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self {
            data: row_major.to_vec(),
            nrows,
            ncols,
        }
    }

    /// Create a matrix from an owned `Vec<f64>` in row-major order.
    ///
    /// Panics if `data.len() != nrows * ncols`.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "vec length {} does not match {}x{} matrix",
            data.len(),
            nrows,
            ncols,
        );
        Self { data, nrows, ncols }
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use numat::Matrix;
    /// let m = Matrix::from_fn(3, 3, |i, j| if i == j { 1.0 } else { 0.0 });
    /// assert_eq!(m, Matrix::eye(3));
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Create a matrix from nested rows, inferring the dimensions from the
    /// outer length and the first row's length.
    ///
    /// Returns [`LinalgError::ShapeMismatch`] if any row has a different
    /// length than the first.
    ///
    /// ```
    /// use numat::Matrix;
    /// let m = Matrix::from_nested(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m[(1, 0)], 3.0);
    ///
    /// let ragged = Matrix::from_nested(&[vec![1.0, 2.0], vec![3.0]]);
    /// assert!(ragged.is_err());
    /// ```
    pub fn from_nested(rows: &[Vec<f64>]) -> Result<Self, LinalgError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            if row.len() != ncols {
                return Err(LinalgError::ShapeMismatch {
                    expected: (nrows, ncols),
                    got: (nrows, row.len()),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, nrows, ncols })
    }
}

// ── Buffer replacement ──────────────────────────────────────────────

impl Matrix {
    /// Replace the entire buffer and dimensions with new row-major data.
    ///
    /// This is the only way (together with [`set_from_nested`]) to change
    /// the dimensions of an existing matrix. Panics on length mismatch.
    ///
    /// [`set_from_nested`]: Matrix::set_from_nested
    pub fn set_from_rows(&mut self, nrows: usize, ncols: usize, row_major: &[f64]) {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        self.data.clear();
        self.data.extend_from_slice(row_major);
        self.nrows = nrows;
        self.ncols = ncols;
    }

    /// Replace the entire buffer with nested rows, inferring dimensions.
    ///
    /// Returns [`LinalgError::ShapeMismatch`] on ragged input, leaving the
    /// matrix unchanged.
    pub fn set_from_nested(&mut self, rows: &[Vec<f64>]) -> Result<(), LinalgError> {
        let new = Self::from_nested(rows)?;
        *self = new;
        Ok(())
    }
}

// ── Accessors ───────────────────────────────────────────────────────

impl Matrix {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Bounds-checked element read.
    ///
    /// ```
    /// use numat::Matrix;
    /// let m = Matrix::eye(2);
    /// assert_eq!(m.get(0, 0).unwrap(), 1.0);
    /// assert!(m.get(2, 0).is_err());
    /// ```
    pub fn get(&self, row: usize, col: usize) -> Result<f64, LinalgError> {
        if row >= self.nrows || col >= self.ncols {
            return Err(LinalgError::IndexOutOfBounds {
                row,
                col,
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        Ok(self.data[row * self.ncols + col])
    }

    /// Bounds-checked element write.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), LinalgError> {
        if row >= self.nrows || col >= self.ncols {
            return Err(LinalgError::IndexOutOfBounds {
                row,
                col,
                nrows: self.nrows,
                ncols: self.ncols,
            });
        }
        self.data[row * self.ncols + col] = value;
        Ok(())
    }

    /// View the entire matrix as a flat slice in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// View row `i` as a slice.
    ///
    /// ```
    /// use numat::Matrix;
    /// let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m.row_slice(1), &[4.0, 5.0, 6.0]);
    /// ```
    #[inline]
    pub fn row_slice(&self, i: usize) -> &[f64] {
        let start = i * self.ncols;
        &self.data[start..start + self.ncols]
    }

    /// View row `i` as a mutable slice.
    #[inline]
    pub fn row_slice_mut(&mut self, i: usize) -> &mut [f64] {
        let start = i * self.ncols;
        let end = start + self.ncols;
        &mut self.data[start..end]
    }

    /// Copy out the matrix as a flat row-major `Vec`.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    /// Copy out the matrix as nested row vectors.
    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        (0..self.nrows).map(|i| self.row_slice(i).to_vec()).collect()
    }

    /// Iterate over all elements in row-major order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, f64> {
        self.data.iter()
    }
}

// ── Queries and element-wise transforms ─────────────────────────────

impl Matrix {
    /// Whether `a[(i, j)] == a[(j, i)]` for all `i, j`, using **exact**
    /// float equality.
    ///
    /// No tolerance is applied: a matrix that is symmetric only up to
    /// round-off fails this check. That matches the engine's historical
    /// behavior and decides which path [`EigenDecomposition`] takes, so
    /// it is kept deliberately.
    ///
    /// [`EigenDecomposition`]: crate::EigenDecomposition
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        for i in 0..self.nrows {
            for j in (i + 1)..self.ncols {
                if self[(i, j)] != self[(j, i)] {
                    return false;
                }
            }
        }
        true
    }

    /// Sum of diagonal elements.
    ///
    /// ```
    /// use numat::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(m.trace(), 5.0);
    /// ```
    pub fn trace(&self) -> f64 {
        let n = self.nrows.min(self.ncols);
        (0..n).map(|i| self[(i, i)]).sum()
    }

    /// Extract the diagonal as a [`Vector`](crate::Vector).
    pub fn diag(&self) -> vector::Vector {
        let n = self.nrows.min(self.ncols);
        vector::Vector::from_vec((0..n).map(|i| self[(i, i)]).collect())
    }

    /// Apply a function to every element, producing a new matrix.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            data: self.data.iter().map(|&x| f(x)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Element-wise absolute value.
    pub fn abs(&self) -> Self {
        self.map(f64::abs)
    }

    /// Swap two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            let n = self.ncols;
            for j in 0..n {
                self.data.swap(a * n + j, b * n + j);
            }
        }
    }

    /// Transpose: (M×N) → (N×M).
    ///
    /// ```
    /// use numat::Matrix;
    /// let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = a.transpose();
    /// assert_eq!(t.nrows(), 3);
    /// assert_eq!(t[(2, 1)], 6.0);
    /// ```
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.nrows,
            self.ncols,
        );
        &self.data[row * self.ncols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.nrows,
            self.ncols,
        );
        &mut self.data[row * self.ncols + col]
    }
}
