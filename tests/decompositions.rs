//! End-to-end checks of the decomposition contracts: factor
//! reconstruction, solver round trips, deferred-failure policies, and
//! the agreement between the elimination-based and SVD-based ranks.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use numat::{LinalgError, Matrix, Vector};

fn assert_matrix_near(a: &Matrix, b: &Matrix, eps: f64) {
    assert_eq!((a.nrows(), a.ncols()), (b.nrows(), b.ncols()));
    for i in 0..a.nrows() {
        for j in 0..a.ncols() {
            assert_abs_diff_eq!(a[(i, j)], b[(i, j)], epsilon = eps);
        }
    }
}

// ── LU ──────────────────────────────────────────────────────────────

#[test]
fn lu_factors_match_row_permuted_input() {
    let a = Matrix::from_rows(
        4,
        4,
        &[
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 2.0, 6.0, 4.0, 1.0, 3.0, 1.0, 9.0, 2.0,
        ],
    );
    let lu = a.lu();
    assert!(lu.is_nonsingular());
    let product = lu.l() * lu.u();
    let permuted = a.select_rows(lu.pivot()).unwrap();
    assert_matrix_near(&product, &permuted, 1e-9);
}

#[test]
fn det_and_inverse_of_known_2x2() {
    let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    assert_relative_eq!(a.det().unwrap(), -2.0, max_relative = 1e-12);
    assert!(a.lu().is_nonsingular());

    let inv = a.inverse().unwrap();
    let expected = Matrix::from_rows(2, 2, &[-2.0, 1.0, 1.5, -0.5]);
    assert_matrix_near(&inv, &expected, 1e-12);
}

#[test]
fn antidiagonal_round_trips_through_lu_solve() {
    // [[0,1],[1,0]] forces a pivot swap but is not singular
    let a = Matrix::from_rows(2, 2, &[0.0, 1.0, 1.0, 0.0]);
    let via_solve = a.lu().solve(&Matrix::eye(2)).unwrap();
    assert_matrix_near(&via_solve, &a.inverse().unwrap(), 1e-12);
    assert_matrix_near(&(&a * &via_solve), &Matrix::eye(2), 1e-12);
}

#[test]
fn inverse_times_original_is_identity() {
    let a = Matrix::from_rows(3, 3, &[2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
    let id = a.inverse().unwrap() * &a;
    assert_matrix_near(&id, &Matrix::eye(3), 1e-10);
}

#[test]
fn solve_round_trips_arbitrary_vector() {
    let a = Matrix::from_rows(3, 3, &[4.0, 1.0, 2.0, 1.0, 5.0, 1.0, 2.0, 1.0, 6.0]);
    let x = Vector::from_slice(&[0.5, -2.0, 3.25]);
    let b = a.try_mul(x.as_matrix()).unwrap();
    let solved = a.solve(&b).unwrap();
    for i in 0..3 {
        assert_abs_diff_eq!(solved[(i, 0)], x[i], epsilon = 1e-10);
    }
}

#[test]
fn solve_dimension_mismatch() {
    let a = Matrix::eye(3);
    let b = Matrix::zeros(2, 1);
    assert!(matches!(
        a.solve(&b),
        Err(LinalgError::ShapeMismatch {
            expected: (3, 1),
            got: (2, 1),
        })
    ));
}

// ── QR ──────────────────────────────────────────────────────────────

#[test]
fn qr_reconstruction_and_orthogonality() {
    let a = Matrix::from_rows(
        4,
        3,
        &[1.0, -1.0, 4.0, 1.0, 4.0, -2.0, 1.0, 4.0, 2.0, 1.0, -1.0, 0.0],
    );
    let qr = a.qr();
    assert!(qr.is_full_rank());

    assert_matrix_near(&(qr.q() * qr.r()), &a, 1e-10);
    assert_matrix_near(&(qr.q().transpose() * qr.q()), &Matrix::eye(3), 1e-10);
}

#[test]
fn overdetermined_least_squares() {
    // Fit y = c0 + c1*x to (0,1), (1,2), (2,4); normal equations give
    // x = [5/6, 3/2]
    let a = Matrix::from_rows(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
    let b = Matrix::from_rows(3, 1, &[1.0, 2.0, 4.0]);
    let x = a.solve(&b).unwrap();
    assert_abs_diff_eq!(x[(0, 0)], 5.0 / 6.0, epsilon = 1e-10);
    assert_abs_diff_eq!(x[(1, 0)], 3.0 / 2.0, epsilon = 1e-10);
}

// ── Cholesky ────────────────────────────────────────────────────────

#[test]
fn cholesky_known_factor() {
    let a = Matrix::from_rows(
        3,
        3,
        &[4.0, 12.0, -16.0, 12.0, 37.0, -43.0, -16.0, -43.0, 98.0],
    );
    let chol = a.cholesky();
    assert!(chol.is_spd());

    let expected = Matrix::from_rows(3, 3, &[2.0, 0.0, 0.0, 6.0, 1.0, 0.0, -8.0, 5.0, 3.0]);
    assert_matrix_near(chol.l(), &expected, 1e-12);
    assert_matrix_near(&(chol.l() * &chol.l().transpose()), &a, 1e-12);
}

#[test]
fn cholesky_rejects_indefinite_at_solve() {
    let a = Matrix::from_rows(2, 2, &[1.0, 5.0, 5.0, 1.0]);
    let chol = a.cholesky();
    assert!(!chol.is_spd());
    assert_eq!(
        chol.solve(&Matrix::zeros(2, 1)).unwrap_err(),
        LinalgError::NotPositiveDefinite
    );
}

// ── SVD ─────────────────────────────────────────────────────────────

#[test]
fn svd_reconstruction() {
    let a = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 0.0]);
    let svd = a.svd();
    // Deflation happens at the 1e-5 engine epsilon, so reconstruction is
    // good to roughly that scale, not machine precision
    let reconstructed = svd.u() * &svd.s() * &svd.v().transpose();
    assert_matrix_near(&reconstructed, &a, 1e-3);
}

#[test]
fn svd_values_non_negative_descending() {
    let a = Matrix::from_rows(
        4,
        4,
        &[
            10.0, 3.0, 0.0, 0.0, 3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 7.0, 2.0, 0.0, 0.0, 2.0, 4.0,
        ],
    );
    let sv = a.svd().singular_values().to_vec();
    assert!(sv.iter().all(|&x| x >= 0.0));
    for w in sv.windows(2) {
        assert!(w[0] >= w[1] - 1e-12);
    }
}

#[test]
fn rank_deficient_matrix_agrees_across_methods() {
    // Third row repeats the first: rank 2
    let a = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 1.0, 2.0, 3.0]);
    assert_eq!(a.svd().rank(), 2);
    assert_eq!(a.rank(), 2);
}

#[test]
fn ranks_agree_for_well_conditioned_matrix() {
    let a = Matrix::from_rows(3, 3, &[2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
    assert_eq!(a.rank(), 3);
    assert_eq!(a.svd().rank(), 3);

    let wide = Matrix::from_rows(2, 3, &[1.0, 0.0, 2.0, 0.0, 1.0, 1.0]);
    assert_eq!(wide.rank(), wide.svd().rank());
}

// ── Eigen ───────────────────────────────────────────────────────────

#[test]
fn symmetric_eigen_reconstruction() {
    let a = Matrix::from_rows(3, 3, &[4.0, 1.0, -1.0, 1.0, 3.0, 2.0, -1.0, 2.0, 5.0]);
    let eig = a.eig();
    assert!(eig.is_symmetric());
    let reconstructed = eig.v() * &eig.d() * &eig.v().transpose();
    assert_matrix_near(&reconstructed, &a, 1e-10);
}

#[test]
fn symmetry_check_is_exact() {
    // Mathematically symmetric up to round-off is NOT symmetric here:
    // the engine compares with == and no tolerance, so the general
    // (Schur) path is taken. This pins the historical behavior.
    let a = Matrix::from_rows(2, 2, &[2.0, 1.0, 1.0 + 1e-13, 2.0]);
    assert!(!a.is_symmetric());
    let eig = a.eig();
    assert!(!eig.is_symmetric());
    assert!(eig.schur_form().is_some());

    // Eigenvalues are still right to working precision
    let sum: f64 = eig.eigenvalues_re().iter().sum();
    assert_abs_diff_eq!(sum, a.trace(), epsilon = 1e-9);
}

#[test]
fn nonsymmetric_eigenvalues_via_schur() {
    let a = Matrix::from_rows(3, 3, &[0.0, 0.0, 6.0, 1.0, 0.0, -11.0, 0.0, 1.0, 6.0]);
    let eig = a.eig();
    let mut re = eig.eigenvalues_re().to_vec();
    re.sort_by(|x, y| x.partial_cmp(y).unwrap());
    assert_abs_diff_eq!(re[0], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(re[1], 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(re[2], 3.0, epsilon = 1e-9);
}

// ── Cross-cutting ───────────────────────────────────────────────────

#[test]
fn elimination_det_agrees_with_lu_det() {
    let a = Matrix::from_rows(3, 3, &[6.0, 1.0, 1.0, 4.0, -2.0, 5.0, 2.0, 8.0, 7.0]);
    let u = a.upper_triangular();
    let diag_product: f64 = (0..3).map(|i| u[(i, i)]).product();
    assert_relative_eq!(diag_product, a.det().unwrap(), max_relative = 1e-9);
}

#[test]
fn decompositions_do_not_alias_the_source() {
    let mut a = Matrix::from_rows(2, 2, &[4.0, 2.0, 2.0, 3.0]);
    let lu = a.lu();
    let chol = a.cholesky();
    let det_before = lu.det().unwrap();

    // Mutating the source must not affect already-built decompositions
    a.set(0, 0, 100.0).unwrap();
    assert_eq!(lu.det().unwrap(), det_before);
    assert!(chol.is_spd());
    assert_abs_diff_eq!(chol.l()[(0, 0)], 2.0, epsilon = 1e-12);
}

#[test]
fn norms_are_consistent() {
    let a = Matrix::from_rows(2, 2, &[3.0, 0.0, 0.0, -4.0]);
    assert_abs_diff_eq!(a.norm_two(), 4.0, epsilon = 1e-9);
    assert_abs_diff_eq!(a.norm_one(), 4.0, epsilon = 1e-12);
    assert_abs_diff_eq!(a.norm_inf(), 4.0, epsilon = 1e-12);
    assert_abs_diff_eq!(a.frobenius_norm(), 5.0, epsilon = 1e-12);
}
