//! Elimination-based queries on `Matrix`: the pivot-threshold `rank`
//! and the determinant-preserving `upper_triangular` reduction.
//!
//! These are the direct Gaussian paths the engine exposes alongside the
//! decomposition objects; [`SvdDecomposition::rank`] is the
//! tolerance-based alternative.
//!
//! [`SvdDecomposition::rank`]: crate::SvdDecomposition::rank

use super::Matrix;

/// Pivot threshold for [`Matrix::rank`]: a candidate pivot at or below
/// this magnitude is treated as a dependent row.
const RANK_PIVOT_TOL: f64 = 1e-4;

impl Matrix {
    /// Number of linearly independent rows, by Gauss-Jordan elimination
    /// with partial row selection.
    ///
    /// A pivot only counts when its magnitude exceeds `1e-4`; anything
    /// smaller is treated as zero. For a well-conditioned matrix this
    /// agrees with the SVD-based numerical rank.
    ///
    /// ```
    /// use numat::Matrix;
    /// let a = Matrix::from_rows(3, 3, &[
    ///     1.0, 2.0, 3.0,
    ///     4.0, 5.0, 6.0,
    ///     1.0, 2.0, 3.0, // repeated row
    /// ]);
    /// assert_eq!(a.rank(), 2);
    /// assert_eq!(Matrix::eye(3).rank(), 3);
    /// ```
    pub fn rank(&self) -> usize {
        let mut w = self.clone();
        let (m, n) = (w.nrows, w.ncols);
        let mut row = 0;

        for col in 0..n {
            if row == m {
                break;
            }

            // Partial selection: largest magnitude in the unreduced rows
            let mut p = row;
            for i in (row + 1)..m {
                if w[(i, col)].abs() > w[(p, col)].abs() {
                    p = i;
                }
            }
            if w[(p, col)].abs() <= RANK_PIVOT_TOL {
                continue;
            }

            w.swap_rows(p, row);
            let pivot = w[(row, col)];
            for j in col..n {
                w[(row, j)] /= pivot;
            }

            // Gauss-Jordan: clear the column above and below the pivot
            for i in 0..m {
                if i == row {
                    continue;
                }
                let f = w[(i, col)];
                if f != 0.0 {
                    for j in col..n {
                        w[(i, j)] -= f * w[(row, j)];
                    }
                }
            }

            row += 1;
        }

        row
    }

    /// Reduce to upper-triangular (row echelon) form by partial-pivoting
    /// Gaussian elimination.
    ///
    /// Each row exchange negates one of the swapped rows, so for a square
    /// matrix the product of the result's diagonal equals `det(self)`.
    /// This is the engine's alternate determinant path, independent of
    /// [`LuDecomposition`](crate::LuDecomposition).
    ///
    /// ```
    /// use numat::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[0.0, 1.0, 2.0, 3.0]);
    /// let u = a.upper_triangular();
    /// assert_eq!(u[(1, 0)], 0.0);
    /// assert!((u[(0, 0)] * u[(1, 1)] - a.det().unwrap()).abs() < 1e-12);
    /// ```
    pub fn upper_triangular(&self) -> Matrix {
        let mut w = self.clone();
        let (m, n) = (w.nrows, w.ncols);

        for col in 0..m.min(n) {
            let mut p = col;
            for i in (col + 1)..m {
                if w[(i, col)].abs() > w[(p, col)].abs() {
                    p = i;
                }
            }
            if w[(p, col)] == 0.0 {
                continue;
            }

            if p != col {
                w.swap_rows(p, col);
                // Negating the row folds the swap's sign flip back in, so
                // the diagonal product stays equal to the determinant.
                for j in 0..n {
                    w[(col, j)] = -w[(col, j)];
                }
            }

            for i in (col + 1)..m {
                let f = w[(i, col)] / w[(col, col)];
                if f != 0.0 {
                    for j in col..n {
                        w[(i, j)] -= f * w[(col, j)];
                    }
                }
                w[(i, col)] = 0.0;
            }
        }

        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_rank() {
        let a = Matrix::from_rows(3, 3, &[2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
        assert_eq!(a.rank(), 3);
    }

    #[test]
    fn repeated_row_drops_rank() {
        let a = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 1.0, 2.0, 3.0]);
        assert_eq!(a.rank(), 2);
    }

    #[test]
    fn zero_matrix_rank() {
        assert_eq!(Matrix::zeros(3, 3).rank(), 0);
    }

    #[test]
    fn rectangular_rank() {
        let a = Matrix::from_rows(2, 3, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(a.rank(), 2);
        assert_eq!(a.transpose().rank(), 2);
    }

    #[test]
    fn small_pivot_below_threshold() {
        // Entries below the 1e-4 pivot threshold count as zero
        let a = Matrix::from_rows(2, 2, &[1.0, 0.0, 0.0, 1e-5]);
        assert_eq!(a.rank(), 1);
    }

    #[test]
    fn upper_triangular_structure() {
        let a = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 0.0]);
        let u = a.upper_triangular();
        assert_eq!(u[(1, 0)], 0.0);
        assert_eq!(u[(2, 0)], 0.0);
        assert_eq!(u[(2, 1)], 0.0);
    }

    #[test]
    fn upper_triangular_preserves_det() {
        let a = Matrix::from_rows(3, 3, &[6.0, 1.0, 1.0, 4.0, -2.0, 5.0, 2.0, 8.0, 7.0]);
        let u = a.upper_triangular();
        let diag_product = u[(0, 0)] * u[(1, 1)] * u[(2, 2)];
        assert!((diag_product - (-306.0)).abs() < 1e-10);
    }

    #[test]
    fn upper_triangular_with_swap() {
        // Leading zero forces a pivot swap; determinant is -2
        let a = Matrix::from_rows(2, 2, &[0.0, 1.0, 2.0, 3.0]);
        let u = a.upper_triangular();
        assert!((u[(0, 0)] * u[(1, 1)] - (-2.0)).abs() < 1e-12);
    }
}
