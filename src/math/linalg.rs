//! Linear algebra backend abstraction.
//!
//! ## Purpose
//!
//! This module provides a trait-based bridge from generic `Float` code to the
//! nalgebra backend for the one factorization the model needs: a Cholesky
//! decomposition, used to (a) reject initial metrics that are not
//! positive-definite at configuration time and (b) derive the upper factor
//! `M` with `MᵀM = D` that the metric adaptation operates on.
//!
//! ## Design notes
//!
//! * Generic numeric code stays `Float`-generic; only `f32` and `f64`
//!   delegate to nalgebra, mirroring the backend-bridge pattern used for the
//!   rest of the math layer.
//! * Everything on the per-sample update path is plain vector arithmetic;
//!   the factorization here runs only at configuration and field-creation
//!   time.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// FloatLinalg Trait
// ============================================================================

/// Helper trait bridging generic `Float` types to the nalgebra backend.
pub trait FloatLinalg: Float + 'static {
    /// Upper-triangular factor `M` (row-major) with `MᵀM = a`, or `None`
    /// when `a` is not positive-definite.
    fn cholesky_upper(a: &[Self], n: usize) -> Option<Vec<Self>>;
}

impl FloatLinalg for f64 {
    #[inline]
    fn cholesky_upper(a: &[Self], n: usize) -> Option<Vec<Self>> {
        nalgebra_backend::cholesky_upper_f64(a, n)
    }
}

impl FloatLinalg for f32 {
    #[inline]
    fn cholesky_upper(a: &[Self], n: usize) -> Option<Vec<Self>> {
        nalgebra_backend::cholesky_upper_f32(a, n)
    }
}

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based factorization routines.
pub mod nalgebra_backend {
    use super::Vec;
    use nalgebra::DMatrix;

    /// Upper Cholesky factor of a row-major symmetric matrix (f64).
    pub fn cholesky_upper_f64(a: &[f64], n: usize) -> Option<Vec<f64>> {
        let matrix = DMatrix::from_row_slice(n, n, a);
        let chol = matrix.cholesky()?;
        // nalgebra returns the lower factor L with L Lᵀ = A; the upper
        // factor is M = Lᵀ, so M_ij = L_ji.
        let l = chol.l();
        let mut upper = vec![0.0; n * n];
        for i in 0..n {
            for j in i..n {
                upper[i * n + j] = l[(j, i)];
            }
        }
        Some(upper)
    }

    /// Upper Cholesky factor of a row-major symmetric matrix (f32).
    pub fn cholesky_upper_f32(a: &[f32], n: usize) -> Option<Vec<f32>> {
        let matrix = DMatrix::from_row_slice(n, n, a);
        let chol = matrix.cholesky()?;
        let l = chol.l();
        let mut upper = vec![0.0f32; n * n];
        for i in 0..n {
            for j in i..n {
                upper[i * n + j] = l[(j, i)];
            }
        }
        Some(upper)
    }
}

// ============================================================================
// Tests
// ============================================================================
