use crate::matrix::Matrix;

/// Negligibility threshold for the bidiagonal QR iteration, and the
/// epsilon behind [`SvdDecomposition::rank`]. A fixed engine constant,
/// scaled by neighboring magnitudes at each test site.
const EPS: f64 = 1.0e-5;

/// Singular value decomposition `A = U·S·Vᵀ` (Golub–Kahan–Reinsch).
///
/// The constructor bidiagonalizes the input with alternating column and
/// row Householder reflections (accumulating U and V), then drives the
/// superdiagonal to zero with implicit-shift QR iteration built from
/// Givens rotations. Singular values come out non-negative and sorted
/// descending, with matching column order in U and V.
///
/// Shapes: `u()` is m×min(m,n), `v()` is n×n, and the singular value
/// array has length min(m+1, n) — so for the usual m ≥ n case U is m×n
/// and there are n singular values.
///
/// # Example
///
/// ```
/// use numat::Matrix;
///
/// let a = Matrix::from_rows(2, 2, &[3.0, 2.0, 2.0, 3.0]);
/// let svd = a.svd();
/// // AᵀA has eigenvalues 25 and 1; accuracy is bounded by the engine
/// // epsilon, not machine precision
/// assert!((svd.singular_values()[0] - 5.0).abs() < 1e-3);
/// assert!((svd.singular_values()[1] - 1.0).abs() < 1e-3);
/// assert_eq!(svd.rank(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SvdDecomposition {
    u: Matrix,
    v: Matrix,
    s: Vec<f64>,
    m: usize,
    n: usize,
}

impl SvdDecomposition {
    /// Decompose a matrix. The full bidiagonalization and QR iteration
    /// run here; the result is immutable afterwards.
    pub fn new(arg: &Matrix) -> Self {
        let mut a = arg.clone();
        let m = a.nrows();
        let n = a.ncols();
        let nu = m.min(n);

        if m == 0 || n == 0 {
            return Self {
                u: Matrix::zeros(m, nu),
                v: Matrix::eye(n),
                s: Vec::new(),
                m,
                n,
            };
        }

        let mut s = vec![0.0f64; (m + 1).min(n)];
        let mut u = Matrix::zeros(m, nu);
        let mut v = Matrix::zeros(n, n);
        let mut e = vec![0.0; n];
        let mut work = vec![0.0; m];

        // ── Bidiagonalization ───────────────────────────────────────
        // Reduce A to bidiagonal form, the diagonal in s and the
        // superdiagonal in e, recording the Householder vectors for the
        // later generation of U and V.
        let nct = m.saturating_sub(1).min(n);
        let nrt = n.saturating_sub(2).min(m);

        for k in 0..nct.max(nrt) {
            if k < nct {
                // Column transformation: the k-th diagonal lands in s[k]
                s[k] = 0.0;
                for i in k..m {
                    s[k] = s[k].hypot(a[(i, k)]);
                }
                if s[k] != 0.0 {
                    if a[(k, k)] < 0.0 {
                        s[k] = -s[k];
                    }
                    for i in k..m {
                        a[(i, k)] /= s[k];
                    }
                    a[(k, k)] += 1.0;
                }
                s[k] = -s[k];
            }

            for j in (k + 1)..n {
                if k < nct && s[k] != 0.0 {
                    let mut t = 0.0;
                    for i in k..m {
                        t += a[(i, k)] * a[(i, j)];
                    }
                    t = -t / a[(k, k)];
                    for i in k..m {
                        let d = t * a[(i, k)];
                        a[(i, j)] += d;
                    }
                }
                // Stash row k for the row transformation below
                e[j] = a[(k, j)];
            }

            if k < nct {
                for i in k..m {
                    u[(i, k)] = a[(i, k)];
                }
            }

            if k < nrt {
                // Row transformation: the k-th superdiagonal lands in e[k]
                e[k] = 0.0;
                for i in (k + 1)..n {
                    e[k] = e[k].hypot(e[i]);
                }
                if e[k] != 0.0 {
                    if e[k + 1] < 0.0 {
                        e[k] = -e[k];
                    }
                    for i in (k + 1)..n {
                        e[i] /= e[k];
                    }
                    e[k + 1] += 1.0;
                }
                e[k] = -e[k];

                if k + 1 < m && e[k] != 0.0 {
                    for w in work.iter_mut().skip(k + 1) {
                        *w = 0.0;
                    }
                    for j in (k + 1)..n {
                        for i in (k + 1)..m {
                            work[i] += e[j] * a[(i, j)];
                        }
                    }
                    for j in (k + 1)..n {
                        let t = -e[j] / e[k + 1];
                        for i in (k + 1)..m {
                            let d = t * work[i];
                            a[(i, j)] += d;
                        }
                    }
                }

                for i in (k + 1)..n {
                    v[(i, k)] = e[i];
                }
            }
        }

        // Final bidiagonal matrix of order p
        let mut p = n.min(m + 1);
        if nct < n {
            s[nct] = a[(nct, nct)];
        }
        if m < p {
            s[p - 1] = 0.0;
        }
        if nrt + 1 < p {
            e[nrt] = a[(nrt, p - 1)];
        }
        if p > 0 {
            e[p - 1] = 0.0;
        }

        // ── Generate U ──────────────────────────────────────────────
        for j in nct..nu {
            for i in 0..m {
                u[(i, j)] = 0.0;
            }
            u[(j, j)] = 1.0;
        }
        for k in (0..nct).rev() {
            if s[k] != 0.0 {
                for j in (k + 1)..nu {
                    let mut t = 0.0;
                    for i in k..m {
                        t += u[(i, k)] * u[(i, j)];
                    }
                    t = -t / u[(k, k)];
                    for i in k..m {
                        let d = t * u[(i, k)];
                        u[(i, j)] += d;
                    }
                }
                for i in k..m {
                    u[(i, k)] = -u[(i, k)];
                }
                u[(k, k)] += 1.0;
                for i in 0..k.saturating_sub(1) {
                    u[(i, k)] = 0.0;
                }
            } else {
                for i in 0..m {
                    u[(i, k)] = 0.0;
                }
                u[(k, k)] = 1.0;
            }
        }

        // ── Generate V ──────────────────────────────────────────────
        for k in (0..n).rev() {
            if k < nrt && e[k] != 0.0 {
                for j in (k + 1)..nu {
                    let mut t = 0.0;
                    for i in (k + 1)..n {
                        t += v[(i, k)] * v[(i, j)];
                    }
                    t = -t / v[(k + 1, k)];
                    for i in (k + 1)..n {
                        let d = t * v[(i, k)];
                        v[(i, j)] += d;
                    }
                }
            }
            for i in 0..n {
                v[(i, k)] = 0.0;
            }
            v[(k, k)] = 1.0;
        }

        // ── Implicit-shift QR iteration on the bidiagonal form ──────
        let pp = p.saturating_sub(1);

        while p > 0 {
            // Locate the active block and classify it:
            //   case 1: s[p-1] negligible             → deflate at the bottom
            //   case 2: s[k] negligible, k < p-1      → split the block
            //   case 3: e[k-1] negligible only        → one QR sweep
            //   case 4: e[p-2] negligible             → s[p-1] converged
            let mut k = p as i64 - 2;
            while k >= 0 {
                let ku = k as usize;
                if e[ku].abs() <= EPS * (s[ku].abs() + s[ku + 1].abs()) {
                    e[ku] = 0.0;
                    break;
                }
                k -= 1;
            }

            let kase;
            if k == p as i64 - 2 {
                kase = 4;
            } else {
                let mut ks = p as i64 - 1;
                while ks > k {
                    let ksu = ks as usize;
                    let t = if ks != p as i64 { e[ksu].abs() } else { 0.0 }
                        + if ks != k + 1 { e[ksu - 1].abs() } else { 0.0 };
                    if s[ksu].abs() <= EPS * t {
                        s[ksu] = 0.0;
                        break;
                    }
                    ks -= 1;
                }
                if ks == k {
                    kase = 3;
                } else if ks == p as i64 - 1 {
                    kase = 1;
                } else {
                    kase = 2;
                    k = ks;
                }
            }
            let k = (k + 1) as usize;

            match kase {
                // Deflate negligible s[p-1]: rotate it away through e,
                // fixing V as we go
                1 => {
                    let mut f = e[p - 2];
                    e[p - 2] = 0.0;
                    for j in (k..=(p - 2)).rev() {
                        let t = s[j].hypot(f);
                        let cs = s[j] / t;
                        let sn = f / t;
                        s[j] = t;
                        if j != k {
                            f = -sn * e[j - 1];
                            e[j - 1] *= cs;
                        }
                        for i in 0..n {
                            let t = cs * v[(i, j)] + sn * v[(i, p - 1)];
                            v[(i, p - 1)] = -sn * v[(i, j)] + cs * v[(i, p - 1)];
                            v[(i, j)] = t;
                        }
                    }
                }

                // Split at negligible s[k-1]: rotate the stranded
                // superdiagonal away, fixing U
                2 => {
                    let mut f = e[k - 1];
                    e[k - 1] = 0.0;
                    for j in k..p {
                        let t = s[j].hypot(f);
                        let cs = s[j] / t;
                        let sn = f / t;
                        s[j] = t;
                        f = -sn * e[j];
                        e[j] *= cs;
                        for i in 0..m {
                            let t = cs * u[(i, j)] + sn * u[(i, k - 1)];
                            u[(i, k - 1)] = -sn * u[(i, j)] + cs * u[(i, k - 1)];
                            u[(i, j)] = t;
                        }
                    }
                }

                // One QR sweep with a Wilkinson-style shift from the
                // trailing 2×2 of BᵀB
                3 => {
                    let scale = s[p - 1]
                        .abs()
                        .max(s[p - 2].abs())
                        .max(e[p - 2].abs())
                        .max(s[k].abs())
                        .max(e[k].abs());
                    let sp = s[p - 1] / scale;
                    let spm1 = s[p - 2] / scale;
                    let epm1 = e[p - 2] / scale;
                    let sk = s[k] / scale;
                    let ek = e[k] / scale;
                    let b = ((spm1 + sp) * (spm1 - sp) + epm1 * epm1) / 2.0;
                    let c = (sp * epm1) * (sp * epm1);
                    let mut shift = 0.0;
                    if b != 0.0 || c != 0.0 {
                        shift = (b * b + c).sqrt();
                        if b < 0.0 {
                            shift = -shift;
                        }
                        shift = c / (b + shift);
                    }
                    let mut f = (sk + sp) * (sk - sp) + shift;
                    let mut g = sk * ek;

                    // Chase the bulge down the band
                    for j in k..(p - 1) {
                        let mut t = f.hypot(g);
                        let mut cs = f / t;
                        let mut sn = g / t;
                        if j != k {
                            e[j - 1] = t;
                        }
                        f = cs * s[j] + sn * e[j];
                        e[j] = cs * e[j] - sn * s[j];
                        g = sn * s[j + 1];
                        s[j + 1] *= cs;
                        for i in 0..n {
                            let t = cs * v[(i, j)] + sn * v[(i, j + 1)];
                            v[(i, j + 1)] = -sn * v[(i, j)] + cs * v[(i, j + 1)];
                            v[(i, j)] = t;
                        }

                        t = f.hypot(g);
                        cs = f / t;
                        sn = g / t;
                        s[j] = t;
                        f = cs * e[j] + sn * s[j + 1];
                        s[j + 1] = -sn * e[j] + cs * s[j + 1];
                        g = sn * e[j + 1];
                        e[j + 1] *= cs;
                        if j < m - 1 {
                            for i in 0..m {
                                let t = cs * u[(i, j)] + sn * u[(i, j + 1)];
                                u[(i, j + 1)] = -sn * u[(i, j)] + cs * u[(i, j + 1)];
                                u[(i, j)] = t;
                            }
                        }
                    }
                    e[p - 2] = f;
                }

                // Convergence: fix the sign, bubble s[k] into descending
                // position, shrink the active region
                _ => {
                    if s[k] <= 0.0 {
                        s[k] = if s[k] < 0.0 { -s[k] } else { 0.0 };
                        for i in 0..=pp {
                            v[(i, k)] = -v[(i, k)];
                        }
                    }
                    let mut k = k;
                    while k < pp {
                        if s[k] >= s[k + 1] {
                            break;
                        }
                        s.swap(k, k + 1);
                        if k < n - 1 {
                            for i in 0..n {
                                let t = v[(i, k + 1)];
                                v[(i, k + 1)] = v[(i, k)];
                                v[(i, k)] = t;
                            }
                        }
                        if k < m - 1 {
                            for i in 0..m {
                                let t = u[(i, k + 1)];
                                u[(i, k + 1)] = u[(i, k)];
                                u[(i, k)] = t;
                            }
                        }
                        k += 1;
                    }
                    p -= 1;
                }
            }
        }

        Self { u, v, s, m, n }
    }

    /// The left singular vectors U (m×min(m,n), orthonormal columns).
    #[inline]
    pub fn u(&self) -> &Matrix {
        &self.u
    }

    /// The right singular vectors V (n×n orthogonal matrix; columns are
    /// the right singular vectors).
    #[inline]
    pub fn v(&self) -> &Matrix {
        &self.v
    }

    /// The singular values, sorted descending.
    #[inline]
    pub fn singular_values(&self) -> &[f64] {
        &self.s
    }

    /// The diagonal matrix of singular values, shaped min(m,n)×n so that
    /// `u() · s() · v().transpose()` reproduces the input.
    pub fn s(&self) -> Matrix {
        let nu = self.m.min(self.n);
        let mut out = Matrix::zeros(nu, self.n);
        for i in 0..nu.min(self.s.len()) {
            out[(i, i)] = self.s[i];
        }
        out
    }

    /// Two norm: the largest singular value.
    pub fn norm_two(&self) -> f64 {
        self.s.first().copied().unwrap_or(0.0)
    }

    /// Condition number: σ_max / σ_min over the min(m,n) values.
    ///
    /// Infinity when the smallest singular value is zero.
    pub fn cond(&self) -> f64 {
        let k = self.m.min(self.n);
        if k == 0 {
            return 1.0;
        }
        let s_min = self.s[k - 1];
        if s_min == 0.0 {
            f64::INFINITY
        } else {
            self.s[0] / s_min
        }
    }

    /// Numerical rank: the number of singular values exceeding
    /// `max(m, n) · σ_max · 1e-5`.
    pub fn rank(&self) -> usize {
        let tol = self.m.max(self.n) as f64 * self.norm_two() * EPS;
        self.s.iter().filter(|&&x| x > tol).count()
    }
}
