//! # numat
//!
//! Dense numerical linear algebra over `f64`: a heap-allocated
//! [`Matrix`]/[`Vector`] pair and the classic dense decompositions
//! (LU, QR, Cholesky, SVD, eigenvalue), each computed eagerly at
//! construction and queried immutably afterwards.
//!
//! ## Quick start
//!
//! ```
//! use numat::{Matrix, Vector};
//!
//! // Solve a linear system Ax = b
//! let a = Matrix::from_rows(3, 3, &[
//!     2.0, 1.0, -1.0,
//!     -3.0, -1.0, 2.0,
//!     -2.0, 1.0, 2.0,
//! ]);
//! let b = Vector::from_slice(&[8.0, -11.0, -3.0]);
//! let x = a.solve_vec(&b).unwrap(); // x = [2, 3, -1]
//! assert!((x[0] - 2.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`] — [`Matrix`]: runtime-dimensioned, row-major `Vec<f64>`
//!   storage. Arithmetic operators, transpose, submatrix extraction,
//!   elimination-based rank, norms, and the `solve`/`inverse`/`det`
//!   entry points that dispatch to the decompositions. [`Vector`] is a
//!   single-column matrix with single-index access.
//!
//! - [`linalg`] — the decompositions: [`LuDecomposition`] (Crout with
//!   partial pivoting), [`QrDecomposition`] (Householder reflections),
//!   [`CholeskyDecomposition`] (A = L·Lᵀ), [`SvdDecomposition`]
//!   (Golub–Kahan bidiagonalization + implicit-shift QR), and
//!   [`EigenDecomposition`] (tridiagonal QL for symmetric input,
//!   Hessenberg + Francis QR otherwise). Shared [`LinalgError`] type.
//!
//! ## Element type
//!
//! Every element is an `f64`. This is a deliberate contract, not a
//! placeholder: the decompositions bake in double-precision tolerances
//! and there is no generic scalar parameter to instantiate otherwise.
//!
//! ## Error handling
//!
//! Shape violations (out-of-bounds access, mismatched operands, wrong
//! right-hand-side height) fail fast with [`LinalgError`]. Numerical
//! invalidity does not: a decomposition constructor always runs to
//! completion and records what it found (`is_nonsingular`, `is_spd`,
//! `is_full_rank`), and only the consuming `solve`/`det` call reports
//! `Singular`/`NotPositiveDefinite`/`RankDeficient`. Callers that want
//! to trust a factorization should check its status predicate first.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no      | `Serialize`/`Deserialize` for `Matrix` and `Vector` |

pub mod linalg;
pub mod matrix;

pub use linalg::{
    CholeskyDecomposition, EigenDecomposition, LinalgError, LuDecomposition, QrDecomposition,
    SvdDecomposition,
};
pub use matrix::vector::Vector;
pub use matrix::Matrix;
