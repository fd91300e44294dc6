use crate::matrix::Matrix;

/// Eigenvalue decomposition of a square matrix.
///
/// The symmetric path (decided by the exact-equality
/// [`Matrix::is_symmetric`] test) runs Householder tridiagonalization
/// followed by implicit QL iteration with hypot-based plane rotations:
/// eigenvalues land in ascending order with orthonormal eigenvectors in
/// the columns of V, so `A = V·D·Vᵀ`.
///
/// The non-symmetric path reduces to upper Hessenberg form and runs
/// Francis double-shift QR iteration to real Schur form. Real
/// eigenvalues come from the 1×1 diagonal blocks; complex conjugate
/// pairs from the 2×2 blocks, with the imaginary parts carrying
/// opposite signs. For this path `v()` holds the **Schur vectors**
/// (orthogonal, `A = V·S·Vᵀ` with S the quasi-triangular
/// [`schur_form`](EigenDecomposition::schur_form)), not eigenvectors.
///
/// [`Matrix::is_symmetric`]: crate::Matrix::is_symmetric
///
/// # Example
///
/// ```
/// use numat::Matrix;
///
/// let a = Matrix::from_rows(2, 2, &[2.0, -1.0, -1.0, 2.0]);
/// let eig = a.eig();
/// assert!(eig.is_symmetric());
/// assert!((eig.eigenvalues_re()[0] - 1.0).abs() < 1e-10);
/// assert!((eig.eigenvalues_re()[1] - 3.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    n: usize,
    symmetric: bool,
    d: Vec<f64>,
    e: Vec<f64>,
    v: Matrix,
    schur: Option<Matrix>,
}

impl EigenDecomposition {
    /// Decompose a square matrix. The whole reduction and iteration run
    /// here; the result is immutable afterwards.
    ///
    /// Panics if the matrix is not square.
    pub fn new(a: &Matrix) -> Self {
        assert!(
            a.is_square(),
            "eigenvalue decomposition requires a square matrix"
        );
        let n = a.nrows();
        let symmetric = a.is_symmetric();

        if symmetric {
            let mut v = a.clone();
            let mut d = vec![0.0; n];
            let mut e = vec![0.0; n];
            if n > 0 {
                tred2(&mut v, &mut d, &mut e);
                tql2(&mut v, &mut d, &mut e);
            }
            Self {
                n,
                symmetric,
                d,
                e: vec![0.0; n],
                v,
                schur: None,
            }
        } else {
            let mut h = a.clone();
            let mut q = Matrix::eye(n);
            if n > 1 {
                hessenberg(&mut h, &mut q);
                francis_qr(&mut h, &mut q, 30 * n);
            }
            let (d, e) = schur_eigenvalues(&h);
            Self {
                n,
                symmetric,
                d,
                e,
                v: q,
                schur: Some(h),
            }
        }
    }

    /// Whether the input passed the exact-equality symmetry test and the
    /// tridiagonal path was taken.
    #[inline]
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Real parts of the eigenvalues (ascending for symmetric input,
    /// Schur order otherwise).
    #[inline]
    pub fn eigenvalues_re(&self) -> &[f64] {
        &self.d
    }

    /// Imaginary parts of the eigenvalues. All zero for symmetric input;
    /// conjugate pairs carry opposite signs.
    #[inline]
    pub fn eigenvalues_im(&self) -> &[f64] {
        &self.e
    }

    /// Eigenvectors (symmetric input) or Schur vectors (non-symmetric
    /// input), as columns of an orthogonal matrix.
    #[inline]
    pub fn v(&self) -> &Matrix {
        &self.v
    }

    /// The quasi-upper-triangular real Schur form, present only for the
    /// non-symmetric path. Satisfies `A = V·S·Vᵀ`.
    #[inline]
    pub fn schur_form(&self) -> Option<&Matrix> {
        self.schur.as_ref()
    }

    /// The block-diagonal real eigenvalue matrix D: eigenvalues on the
    /// diagonal, each complex conjugate pair contributing an off-diagonal
    /// `[[x, y], [-y, x]]` block.
    pub fn d(&self) -> Matrix {
        let n = self.n;
        let mut x = Matrix::zeros(n, n);
        for i in 0..n {
            x[(i, i)] = self.d[i];
            if self.e[i] > 0.0 {
                x[(i, i + 1)] = self.e[i];
            } else if self.e[i] < 0.0 {
                x[(i, i - 1)] = self.e[i];
            }
        }
        x
    }
}

// ── Symmetric path: tridiagonalize + implicit QL ───────────────────

/// Householder tridiagonalization of a symmetric matrix, in place.
///
/// `v` holds the matrix on entry and the accumulated orthogonal
/// transform on exit; the tridiagonal diagonal lands in `d` and the
/// subdiagonal in `e[1..]`.
fn tred2(v: &mut Matrix, d: &mut [f64], e: &mut [f64]) {
    let n = v.nrows();
    for j in 0..n {
        d[j] = v[(n - 1, j)];
    }

    for i in (1..n).rev() {
        // Scale to avoid under/overflow in the norm
        let mut scale = 0.0;
        let mut h = 0.0;
        for item in d.iter().take(i) {
            scale += item.abs();
        }

        if scale == 0.0 {
            e[i] = d[i - 1];
            for j in 0..i {
                d[j] = v[(i - 1, j)];
                v[(i, j)] = 0.0;
                v[(j, i)] = 0.0;
            }
        } else {
            // Householder vector in d[0..i]
            for k in 0..i {
                d[k] /= scale;
                h += d[k] * d[k];
            }
            let mut f = d[i - 1];
            let mut g = h.sqrt();
            if f > 0.0 {
                g = -g;
            }
            e[i] = scale * g;
            h -= f * g;
            d[i - 1] = f - g;
            for item in e.iter_mut().take(i) {
                *item = 0.0;
            }

            // Similarity transform applied to the leading block
            for j in 0..i {
                f = d[j];
                v[(j, i)] = f;
                g = e[j] + v[(j, j)] * f;
                for k in (j + 1)..i {
                    g += v[(k, j)] * d[k];
                    e[k] += v[(k, j)] * f;
                }
                e[j] = g;
            }
            f = 0.0;
            for j in 0..i {
                e[j] /= h;
                f += e[j] * d[j];
            }
            let hh = f / (h + h);
            for j in 0..i {
                e[j] -= hh * d[j];
            }
            for j in 0..i {
                f = d[j];
                g = e[j];
                for k in j..i {
                    let t = f * e[k] + g * d[k];
                    v[(k, j)] -= t;
                }
                d[j] = v[(i - 1, j)];
                v[(i, j)] = 0.0;
            }
        }
        d[i] = h;
    }

    // Accumulate the transformations
    for i in 0..n.saturating_sub(1) {
        v[(n - 1, i)] = v[(i, i)];
        v[(i, i)] = 1.0;
        let h = d[i + 1];
        if h != 0.0 {
            for k in 0..=i {
                d[k] = v[(k, i + 1)] / h;
            }
            for j in 0..=i {
                let mut g = 0.0;
                for k in 0..=i {
                    g += v[(k, i + 1)] * v[(k, j)];
                }
                for k in 0..=i {
                    let t = g * d[k];
                    v[(k, j)] -= t;
                }
            }
        }
        for k in 0..=i {
            v[(k, i + 1)] = 0.0;
        }
    }
    for j in 0..n {
        d[j] = v[(n - 1, j)];
        v[(n - 1, j)] = 0.0;
    }
    v[(n - 1, n - 1)] = 1.0;
    e[0] = 0.0;
}

/// Implicit QL iteration on a symmetric tridiagonal matrix, with
/// hypot-based plane rotations accumulated into `v`.
///
/// On exit `d` holds the eigenvalues ascending and the columns of `v`
/// the matching eigenvectors.
fn tql2(v: &mut Matrix, d: &mut [f64], e: &mut [f64]) {
    let n = v.nrows();
    for i in 1..n {
        e[i - 1] = e[i];
    }
    e[n - 1] = 0.0;

    let mut f = 0.0;
    let mut tst1: f64 = 0.0;
    let eps = f64::EPSILON;

    for l in 0..n {
        tst1 = tst1.max(d[l].abs() + e[l].abs());
        let mut m = l;
        while m < n {
            if e[m].abs() <= eps * tst1 {
                break;
            }
            m += 1;
        }

        if m > l {
            loop {
                // Implicit shift from the leading 2×2
                let g = d[l];
                let mut p = (d[l + 1] - g) / (2.0 * e[l]);
                let mut r = p.hypot(1.0);
                if p < 0.0 {
                    r = -r;
                }
                d[l] = e[l] / (p + r);
                d[l + 1] = e[l] * (p + r);
                let dl1 = d[l + 1];
                let mut h = g - d[l];
                for item in d.iter_mut().take(n).skip(l + 2) {
                    *item -= h;
                }
                f += h;

                // QL sweep from m down to l
                p = d[m];
                let mut c = 1.0;
                let mut c2 = c;
                let mut c3 = c;
                let el1 = e[l + 1];
                let mut s = 0.0;
                let mut s2 = 0.0;
                for i in (l..m).rev() {
                    c3 = c2;
                    c2 = c;
                    s2 = s;
                    let g2 = c * e[i];
                    h = c * p;
                    r = p.hypot(e[i]);
                    e[i + 1] = s * r;
                    s = e[i] / r;
                    c = p / r;
                    p = c * d[i] - s * g2;
                    d[i + 1] = h + s * (c * g2 + s * d[i]);

                    for k in 0..n {
                        h = v[(k, i + 1)];
                        v[(k, i + 1)] = s * v[(k, i)] + c * h;
                        v[(k, i)] = c * v[(k, i)] - s * h;
                    }
                }
                p = -s * s2 * c3 * el1 * e[l] / dl1;
                e[l] = s * p;
                d[l] = c * p;

                if e[l].abs() <= eps * tst1 {
                    break;
                }
            }
            d[l] += f;
            e[l] = 0.0;
        }
    }

    // Sort eigenvalues ascending, carrying eigenvector columns along
    for i in 0..n.saturating_sub(1) {
        let mut k = i;
        let mut p = d[i];
        for j in (i + 1)..n {
            if d[j] < p {
                k = j;
                p = d[j];
            }
        }
        if k != i {
            d[k] = d[i];
            d[i] = p;
            for j in 0..n {
                let t = v[(j, i)];
                v[(j, i)] = v[(j, k)];
                v[(j, k)] = t;
            }
        }
    }
}

// ── Non-symmetric path: Hessenberg + Francis QR ────────────────────

/// Reduce a square matrix to upper Hessenberg form via Householder
/// similarity transforms, accumulating the orthogonal Q.
fn hessenberg(a: &mut Matrix, q: &mut Matrix) {
    let n = a.nrows();

    for k in 0..n.saturating_sub(2) {
        let mut norm_sq = 0.0;
        for i in (k + 1)..n {
            norm_sq += a[(i, k)] * a[(i, k)];
        }
        if norm_sq <= f64::EPSILON * f64::EPSILON {
            continue;
        }

        let norm = norm_sq.sqrt();
        let ak1k = a[(k + 1, k)];
        // Sign matches the pivot so v0 avoids cancellation
        let sigma = if ak1k >= 0.0 { norm } else { -norm };
        let v0 = ak1k + sigma;

        // Normalized Householder vector stored in a[k+2.., k], v[0] = 1
        for i in (k + 2)..n {
            a[(i, k)] /= v0;
        }
        let tau = v0 / sigma;

        // Left: A[k+1.., k+1..] = (I - tau v vᵀ) A[k+1.., k+1..]
        for j in (k + 1)..n {
            let mut dot = a[(k + 1, j)];
            for i in (k + 2)..n {
                dot += a[(i, k)] * a[(i, j)];
            }
            dot *= tau;
            a[(k + 1, j)] -= dot;
            for i in (k + 2)..n {
                let t = dot * a[(i, k)];
                a[(i, j)] -= t;
            }
        }

        // Right: A[0.., k+1..] = A[0.., k+1..] (I - tau v vᵀ)
        for i in 0..n {
            let mut dot = a[(i, k + 1)];
            for jj in (k + 2)..n {
                dot += a[(i, jj)] * a[(jj, k)];
            }
            dot *= tau;
            a[(i, k + 1)] -= dot;
            for jj in (k + 2)..n {
                let t = dot * a[(jj, k)];
                a[(i, jj)] -= t;
            }
        }

        // Accumulate Q = Q (I - tau v vᵀ)
        for i in 0..n {
            let mut dot = q[(i, k + 1)];
            for jj in (k + 2)..n {
                dot += q[(i, jj)] * a[(jj, k)];
            }
            dot *= tau;
            q[(i, k + 1)] -= dot;
            for jj in (k + 2)..n {
                let t = dot * a[(jj, k)];
                q[(i, jj)] -= t;
            }
        }

        a[(k + 1, k)] = -sigma;
        for i in (k + 2)..n {
            a[(i, k)] = 0.0;
        }
    }
}

/// Francis double-shift QR iteration on an upper Hessenberg matrix,
/// driving it to real Schur form in place and accumulating the
/// orthogonal similarity into `q`.
///
/// Real eigenvalues end as 1×1 diagonal blocks; complex conjugate pairs
/// as 2×2 blocks. The iteration budget is a safety stop; the exceptional
/// shifts make running into it pathological.
fn francis_qr(h: &mut Matrix, q: &mut Matrix, max_iter: usize) {
    let n = h.nrows();
    let eps = f64::EPSILON;
    let mut iter = 0usize;
    let mut p = n;

    while p > 2 {
        // Deflate a converged 1×1 block
        let tol = eps * (h[(p - 2, p - 2)].abs() + h[(p - 1, p - 1)].abs());
        if h[(p - 1, p - 2)].abs() <= tol {
            h[(p - 1, p - 2)] = 0.0;
            p -= 1;
            continue;
        }

        // Deflate a converged 2×2 block
        let tol2 = eps * (h[(p - 3, p - 3)].abs() + h[(p - 2, p - 2)].abs());
        if h[(p - 2, p - 3)].abs() <= tol2 {
            h[(p - 2, p - 3)] = 0.0;
            p -= 2;
            continue;
        }

        iter += 1;
        if iter > max_iter {
            break;
        }

        // Start of the active unreduced block
        let mut lo = p - 1;
        while lo > 0 {
            let tol_lo = eps * (h[(lo - 1, lo - 1)].abs() + h[(lo, lo)].abs());
            if h[(lo, lo - 1)].abs() <= tol_lo {
                h[(lo, lo - 1)] = 0.0;
                break;
            }
            lo -= 1;
        }

        // Exceptional shift every 10 iterations
        let (s, t) = if iter % 10 == 0 {
            let w = h[(p - 1, p - 2)].abs() + h[(p - 2, p - 3)].abs();
            (w + w, w * w)
        } else {
            // Francis double shift from the bottom-right 2×2 block
            let a11 = h[(p - 2, p - 2)];
            let a12 = h[(p - 2, p - 1)];
            let a21 = h[(p - 1, p - 2)];
            let a22 = h[(p - 1, p - 1)];
            (a11 + a22, a11 * a22 - a12 * a21)
        };

        // First column of H² - s·H + t·I
        let h00 = h[(lo, lo)];
        let h10 = h[(lo + 1, lo)];
        let h01 = h[(lo, lo + 1)];
        let h11 = h[(lo + 1, lo + 1)];

        let mut x = h00 * h00 + h01 * h10 - s * h00 + t;
        let mut y = h10 * (h00 + h11 - s);
        let mut z = if lo + 2 < p {
            h10 * h[(lo + 2, lo + 1)]
        } else {
            0.0
        };

        // Chase the bulge down the diagonal
        for k in lo..(p - 1) {
            let use3 = k + 2 < p;
            let (v0, v1, v2, tau) = if use3 {
                householder3(x, y, z)
            } else {
                let (v0h, v1h, tau_h) = householder2(x, y);
                (v0h, v1h, 0.0, tau_h)
            };

            let col_start = if k > lo { k - 1 } else { k };

            // Apply from the left
            for j in col_start..n {
                let mut dot = v0 * h[(k, j)] + v1 * h[(k + 1, j)];
                if use3 {
                    dot += v2 * h[(k + 2, j)];
                }
                dot *= tau;
                h[(k, j)] -= dot * v0;
                h[(k + 1, j)] -= dot * v1;
                if use3 {
                    h[(k + 2, j)] -= dot * v2;
                }
            }

            // Apply from the right
            let row_end = if use3 { (k + 4).min(p) } else { p };
            for i in 0..row_end {
                let mut dot = v0 * h[(i, k)] + v1 * h[(i, k + 1)];
                if use3 {
                    dot += v2 * h[(i, k + 2)];
                }
                dot *= tau;
                h[(i, k)] -= dot * v0;
                h[(i, k + 1)] -= dot * v1;
                if use3 {
                    h[(i, k + 2)] -= dot * v2;
                }
            }

            // Accumulate into Q
            for i in 0..n {
                let mut dot = v0 * q[(i, k)] + v1 * q[(i, k + 1)];
                if use3 {
                    dot += v2 * q[(i, k + 2)];
                }
                dot *= tau;
                q[(i, k)] -= dot * v0;
                q[(i, k + 1)] -= dot * v1;
                if use3 {
                    q[(i, k + 2)] -= dot * v2;
                }
            }

            // Pick up the fill-in that drives the next reflector
            if k + 2 < p - 1 {
                x = h[(k + 1, k)];
                y = h[(k + 2, k)];
                z = h[(k + 3, k)];
            } else if k + 1 < p - 1 {
                x = h[(k + 1, k)];
                y = h[(k + 2, k)];
                z = 0.0;
            }
        }

        // Clean up negligible sub-sub-diagonal fill-in
        for i in 0..n {
            for j in 0..i.saturating_sub(1) {
                if h[(i, j)].abs() < eps * (h[(i, i)].abs() + h[(j, j)].abs()) {
                    h[(i, j)] = 0.0;
                }
            }
        }
    }

    // Remaining 2×2 block at the top
    if p == 2 {
        let tol = eps * (h[(0, 0)].abs() + h[(1, 1)].abs());
        if h[(1, 0)].abs() <= tol {
            h[(1, 0)] = 0.0;
        }
    }
}

/// 3-element Householder reflector: `(v0, v1, v2, tau)` with `v0 = 1`.
#[inline]
fn householder3(x: f64, y: f64, z: f64) -> (f64, f64, f64, f64) {
    let norm = (x * x + y * y + z * z).sqrt();
    if norm <= f64::EPSILON {
        return (1.0, 0.0, 0.0, 0.0);
    }
    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let u0 = x + sign * norm;
    let v1 = y / u0;
    let v2 = z / u0;
    let tau = 2.0 / (1.0 + v1 * v1 + v2 * v2);
    (1.0, v1, v2, tau)
}

/// 2-element Householder reflector: `(v0, v1, tau)` with `v0 = 1`.
#[inline]
fn householder2(x: f64, y: f64) -> (f64, f64, f64) {
    let norm = (x * x + y * y).sqrt();
    if norm <= f64::EPSILON {
        return (1.0, 0.0, 0.0);
    }
    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let u0 = x + sign * norm;
    let v1 = y / u0;
    let tau = 2.0 / (1.0 + v1 * v1);
    (1.0, v1, tau)
}

/// Extract (real, imaginary) eigenvalue parts from a real Schur form:
/// 1×1 diagonal blocks give real eigenvalues, 2×2 blocks a conjugate
/// pair with opposite-sign imaginary parts.
fn schur_eigenvalues(s: &Matrix) -> (Vec<f64>, Vec<f64>) {
    let n = s.nrows();
    let mut re = vec![0.0; n];
    let mut im = vec![0.0; n];
    let eps = f64::EPSILON;

    let mut i = 0;
    while i < n {
        if i + 1 < n && s[(i + 1, i)].abs() > eps {
            let a = s[(i, i)];
            let b = s[(i, i + 1)];
            let c = s[(i + 1, i)];
            let d = s[(i + 1, i + 1)];

            let tr = (a + d) / 2.0;
            let det = a * d - b * c;
            let disc = tr * tr - det;

            if disc >= 0.0 {
                let sq = disc.sqrt();
                re[i] = tr + sq;
                re[i + 1] = tr - sq;
            } else {
                let sq = (-disc).sqrt();
                re[i] = tr;
                re[i + 1] = tr;
                im[i] = sq;
                im[i + 1] = -sq;
            }
            i += 2;
        } else {
            re[i] = s[(i, i)];
            i += 1;
        }
    }

    (re, im)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn assert_matrix_near(a: &Matrix, b: &Matrix, tol: f64) {
        assert_eq!((a.nrows(), a.ncols()), (b.nrows(), b.ncols()));
        for i in 0..a.nrows() {
            for j in 0..a.ncols() {
                assert!(
                    (a[(i, j)] - b[(i, j)]).abs() < tol,
                    "({},{}) = {} vs {}",
                    i,
                    j,
                    a[(i, j)],
                    b[(i, j)]
                );
            }
        }
    }

    // ── Symmetric path ──

    #[test]
    fn symmetric_2x2() {
        let a = Matrix::from_rows(2, 2, &[2.0, -1.0, -1.0, 2.0]);
        let eig = a.eig();
        assert!(eig.is_symmetric());
        assert!((eig.eigenvalues_re()[0] - 1.0).abs() < TOL);
        assert!((eig.eigenvalues_re()[1] - 3.0).abs() < TOL);
        assert!(eig.eigenvalues_im().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn symmetric_eigenpairs() {
        let a = Matrix::from_rows(3, 3, &[2.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0]);
        let eig = a.eig();
        let v = eig.v();
        for col in 0..3 {
            let lambda = eig.eigenvalues_re()[col];
            for row in 0..3 {
                let mut av = 0.0;
                for k in 0..3 {
                    av += a[(row, k)] * v[(k, col)];
                }
                assert!(
                    (av - lambda * v[(row, col)]).abs() < TOL,
                    "Av = λv at ({},{})",
                    row,
                    col
                );
            }
        }
    }

    #[test]
    fn symmetric_reconstruction() {
        let a = Matrix::from_rows(3, 3, &[4.0, 1.0, -1.0, 1.0, 3.0, 2.0, -1.0, 2.0, 5.0]);
        let eig = a.eig();
        let reconstructed = eig.v() * &eig.d() * &eig.v().transpose();
        assert_matrix_near(&reconstructed, &a, TOL);
    }

    #[test]
    fn symmetric_eigenvectors_orthogonal() {
        let a = Matrix::from_rows(3, 3, &[4.0, 1.0, -1.0, 1.0, 3.0, 2.0, -1.0, 2.0, 5.0]);
        let v = a.eig().v().clone();
        assert_matrix_near(&(v.transpose() * &v), &Matrix::eye(3), TOL);
    }

    #[test]
    fn symmetric_sorted_ascending() {
        let a = Matrix::from_rows(
            4,
            4,
            &[
                10.0, 3.0, 0.0, 0.0, 3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 7.0, 2.0, 0.0, 0.0, 2.0, 4.0,
            ],
        );
        let d = a.eig().eigenvalues_re().to_vec();
        for i in 0..3 {
            assert!(d[i] <= d[i + 1] + TOL);
        }
    }

    #[test]
    fn symmetric_negative_eigenvalue() {
        let a = Matrix::from_rows(2, 2, &[1.0, 3.0, 3.0, 1.0]);
        let eig = a.eig();
        assert!((eig.eigenvalues_re()[0] - (-2.0)).abs() < TOL);
        assert!((eig.eigenvalues_re()[1] - 4.0).abs() < TOL);
    }

    #[test]
    fn size_1x1() {
        let eig = Matrix::from_rows(1, 1, &[7.0]).eig();
        assert!((eig.eigenvalues_re()[0] - 7.0).abs() < TOL);
    }

    // ── Non-symmetric path ──

    #[test]
    fn companion_matrix_real_roots() {
        // p(x) = x³ - 6x² + 11x - 6 = (x-1)(x-2)(x-3)
        let a = Matrix::from_rows(3, 3, &[0.0, 0.0, 6.0, 1.0, 0.0, -11.0, 0.0, 1.0, 6.0]);
        let eig = a.eig();
        assert!(!eig.is_symmetric());

        let mut re = eig.eigenvalues_re().to_vec();
        re.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((re[0] - 1.0).abs() < TOL);
        assert!((re[1] - 2.0).abs() < TOL);
        assert!((re[2] - 3.0).abs() < TOL);
        assert!(eig.eigenvalues_im().iter().all(|&x| x.abs() < TOL));
    }

    #[test]
    fn rotation_gives_conjugate_pair() {
        let a = Matrix::from_rows(2, 2, &[0.0, -1.0, 1.0, 0.0]);
        let eig = a.eig();
        let (re, im) = (eig.eigenvalues_re(), eig.eigenvalues_im());
        assert!(re[0].abs() < TOL);
        assert!((im[0].abs() - 1.0).abs() < TOL);
        assert!(im[0] * im[1] < 0.0, "pair should have opposite signs");
    }

    #[test]
    fn schur_similarity() {
        let a = Matrix::from_rows(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 0.0]);
        let eig = a.eig();
        let v = eig.v();
        let s = eig.schur_form().unwrap();

        // V S Vᵀ = A
        let reconstructed = v * s * &v.transpose();
        assert_matrix_near(&reconstructed, &a, 1e-9);

        // V orthogonal
        assert_matrix_near(&(v.transpose() * v), &Matrix::eye(3), TOL);
    }

    #[test]
    fn trace_equals_eigenvalue_sum() {
        let a = Matrix::from_rows(3, 3, &[2.0, 1.0, 0.0, 0.0, 3.0, 1.0, 1.0, 0.0, 1.0]);
        let eig = a.eig();
        let sum: f64 = eig.eigenvalues_re().iter().sum();
        assert!((sum - a.trace()).abs() < 1e-9);
    }

    #[test]
    fn d_blocks_for_complex_pair() {
        let a = Matrix::from_rows(2, 2, &[0.0, -1.0, 1.0, 0.0]);
        let d = a.eig().d();
        // [[x, y], [-y, x]] block with x = 0, |y| = 1
        assert!(d[(0, 0)].abs() < TOL);
        assert!((d[(0, 1)].abs() - 1.0).abs() < TOL);
        assert!((d[(0, 1)] + d[(1, 0)]).abs() < TOL);
    }

    #[test]
    fn near_symmetric_takes_general_path() {
        // Round-off-level asymmetry fails the exact check
        let a = Matrix::from_rows(2, 2, &[2.0, 1.0, 1.0 + 1e-14, 2.0]);
        let eig = a.eig();
        assert!(!eig.is_symmetric());
        let sum: f64 = eig.eigenvalues_re().iter().sum();
        assert!((sum - 4.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "square")]
    fn non_square_panics() {
        let _ = EigenDecomposition::new(&Matrix::zeros(2, 3));
    }
}
