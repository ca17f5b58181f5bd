//! Mahalanobis distance and metric reconstruction.
//!
//! ## Purpose
//!
//! Receptive fields measure closeness through a per-field metric `D`:
//! `q = (x-c)ᵀ D (x-c)`. This module provides that quadratic form and the
//! reconstruction `D = MᵀM` from the upper-triangular Cholesky factor the
//! adaptation rules operate on.
//!
//! ## Design notes
//!
//! * **Decoupling**: distance computation is separated from kernel
//!   evaluation, mirroring the metric/kernel split of the update rules.
//! * **Symmetry**: reconstruction explicitly symmetrizes the result so that
//!   accumulated floating-point noise can never produce an asymmetric metric.
//!
//! ## Invariants
//!
//! * The quadratic form is non-negative for any PSD `D`.
//! * `reconstruct_metric` output is exactly symmetric.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// Quadratic Form
// ============================================================================

/// Squared Mahalanobis distance `(x-c)ᵀ D (x-c)`.
///
/// `diff` receives `x - c` as a side product (reused by metric adaptation).
/// `d_metric` is row-major `n x n`.
#[inline]
pub fn mahalanobis_sq<T: Float>(x: &[T], c: &[T], d_metric: &[T], diff: &mut [T]) -> T {
    let n = x.len();
    debug_assert_eq!(c.len(), n);
    debug_assert_eq!(diff.len(), n);
    debug_assert_eq!(d_metric.len(), n * n);

    for i in 0..n {
        diff[i] = x[i] - c[i];
    }

    let mut q = T::zero();
    for i in 0..n {
        let row = &d_metric[i * n..(i + 1) * n];
        let mut acc = T::zero();
        for j in 0..n {
            acc = acc + row[j] * diff[j];
        }
        q = q + diff[i] * acc;
    }
    // Floating-point noise can push an exact zero slightly negative.
    q.max(T::zero())
}

/// Diagonal-only squared distance `Σ D_ii (x_i - c_i)²`.
#[inline]
pub fn mahalanobis_sq_diag<T: Float>(x: &[T], c: &[T], d_metric: &[T], diff: &mut [T]) -> T {
    let n = x.len();
    let mut q = T::zero();
    for i in 0..n {
        diff[i] = x[i] - c[i];
        q = q + d_metric[i * n + i] * diff[i] * diff[i];
    }
    q.max(T::zero())
}

// ============================================================================
// Metric Reconstruction
// ============================================================================

/// Rebuild `D = MᵀM` from the upper-triangular factor `M` and symmetrize.
pub fn reconstruct_metric<T: Float>(chol: &[T], d_metric: &mut [T], n: usize) {
    debug_assert_eq!(chol.len(), n * n);
    debug_assert_eq!(d_metric.len(), n * n);

    for i in 0..n {
        for j in i..n {
            // (MᵀM)_ij = Σ_k M_ki M_kj; M is upper-triangular so k <= min(i, j).
            let mut acc = T::zero();
            for k in 0..=i.min(j) {
                acc = acc + chol[k * n + i] * chol[k * n + j];
            }
            d_metric[i * n + j] = acc;
            d_metric[j * n + i] = acc;
        }
    }
}

/// Matrix-vector product `M d` for the row-major matrix `m`.
pub fn mat_vec<T: Float>(m: &[T], d: &[T], out: &mut [T]) {
    let n = d.len();
    debug_assert_eq!(m.len(), n * n);
    debug_assert_eq!(out.len(), n);
    for i in 0..n {
        let row = &m[i * n..(i + 1) * n];
        let mut acc = T::zero();
        for j in 0..n {
            acc = acc + row[j] * d[j];
        }
        out[i] = acc;
    }
}

/// Row-major matrix product `out = A B` (all `n x n`).
pub fn mat_mul<T: Float>(a: &[T], b: &[T], out: &mut Vec<T>, n: usize) {
    out.clear();
    out.resize(n * n, T::zero());
    for i in 0..n {
        for k in 0..n {
            let aik = a[i * n + k];
            if aik == T::zero() {
                continue;
            }
            for j in 0..n {
                out[i * n + j] = out[i * n + j] + aik * b[k * n + j];
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_form_identity_metric() {
        let d = [1.0, 0.0, 0.0, 1.0];
        let mut diff = [0.0; 2];
        let q = mahalanobis_sq(&[3.0, 4.0], &[0.0, 0.0], &d, &mut diff);
        assert_eq!(q, 25.0);
        assert_eq!(diff, [3.0, 4.0]);
    }

    #[test]
    fn diag_form_matches_full_form_on_diagonal_metric() {
        let d = [2.0, 0.0, 0.0, 5.0];
        let mut diff = [0.0; 2];
        let full = mahalanobis_sq(&[1.0, -2.0], &[0.5, 0.5], &d, &mut diff);
        let diag = mahalanobis_sq_diag(&[1.0, -2.0], &[0.5, 0.5], &d, &mut diff);
        assert!((full - diag).abs() < 1e-12);
    }

    #[test]
    fn reconstruction_is_symmetric_and_psd() {
        // Upper-triangular M.
        let m = [2.0, 1.0, 0.0, 3.0];
        let mut d = [0.0; 4];
        reconstruct_metric(&m, &mut d, 2);
        assert_eq!(d[1], d[2]);
        // D = MᵀM => xᵀDx = |Mx|² >= 0.
        let mut diff = [0.0; 2];
        for &(a, b) in &[(1.0, 0.0), (0.0, 1.0), (-1.5, 2.5)] {
            let q = mahalanobis_sq(&[a, b], &[0.0, 0.0], &d, &mut diff);
            assert!(q >= 0.0);
        }
    }
}
