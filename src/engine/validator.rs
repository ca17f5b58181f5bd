//! Input and configuration validation.
//!
//! ## Purpose
//!
//! This module provides the validation functions for model configuration and
//! per-call inputs. Input checks run before any state mutation so a failed
//! call leaves the model exactly as it was; configuration checks run once at
//! build time so invalid settings never reach the engine.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: validation stops at the first error encountered.
//! * **Efficiency**: checks are ordered from cheap to expensive; the
//!   positive-definiteness check (a Cholesky factorization) runs last and
//!   only at build time.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not correct invalid inputs, and it does not perform
//!   any learning or prediction itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::linalg::FloatLinalg;
use crate::primitives::errors::LwprError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for configuration and per-call inputs.
///
/// All methods return `Result<(), LwprError>` (or the validated artifact)
/// and fail fast on the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Per-Call Input Validation
    // ========================================================================

    /// Validate an input vector: exact length, all components finite.
    pub fn validate_input<T: Float>(x: &[T], n_in: usize) -> Result<(), LwprError> {
        if x.len() != n_in {
            return Err(LwprError::InputDimension {
                expected: n_in,
                got: x.len(),
            });
        }
        for (i, &v) in x.iter().enumerate() {
            if !v.is_finite() {
                return Err(LwprError::NonFiniteInput { name: "x", index: i });
            }
        }
        Ok(())
    }

    /// Validate an output vector: exact length, all components finite.
    pub fn validate_output<T: Float>(y: &[T], n_out: usize) -> Result<(), LwprError> {
        if y.len() != n_out {
            return Err(LwprError::OutputDimension {
                expected: n_out,
                got: y.len(),
            });
        }
        for (i, &v) in y.iter().enumerate() {
            if !v.is_finite() {
                return Err(LwprError::NonFiniteInput { name: "y", index: i });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Configuration Validation
    // ========================================================================

    /// Validate the model shape.
    pub fn validate_shape(n_in: usize, n_out: usize) -> Result<(), LwprError> {
        if n_in == 0 || n_out == 0 {
            return Err(LwprError::InvalidModelShape { n_in, n_out });
        }
        Ok(())
    }

    /// Validate a threshold in the open-closed interval (0, 1].
    pub fn validate_unit_threshold<T: Float>(
        value: T,
        name: &'static str,
    ) -> Result<(), LwprError> {
        if !value.is_finite() || value <= T::zero() || value > T::one() {
            return Err(LwprError::InvalidThreshold {
                name,
                value: value.to_f64().unwrap_or(f64::NAN),
                range: "(0, 1]",
            });
        }
        Ok(())
    }

    /// Validate a threshold in the open interval (0, 1).
    pub fn validate_open_unit_threshold<T: Float>(
        value: T,
        name: &'static str,
    ) -> Result<(), LwprError> {
        if !value.is_finite() || value <= T::zero() || value >= T::one() {
            return Err(LwprError::InvalidThreshold {
                name,
                value: value.to_f64().unwrap_or(f64::NAN),
                range: "(0, 1)",
            });
        }
        Ok(())
    }

    /// The generation threshold must exceed the activation cutoff, so an
    /// update can never leave zero active fields.
    pub fn validate_threshold_order<T: Float>(w_gen: T, w_cutoff: T) -> Result<(), LwprError> {
        if w_gen <= w_cutoff {
            return Err(LwprError::InvalidThreshold {
                name: "w_gen",
                value: w_gen.to_f64().unwrap_or(f64::NAN),
                range: "(w_cutoff, 1]",
            });
        }
        Ok(())
    }

    /// Validate a forgetting factor in (0, 1].
    pub fn validate_forgetting<T: Float>(value: T, name: &'static str) -> Result<(), LwprError> {
        if !value.is_finite() || value <= T::zero() || value > T::one() {
            return Err(LwprError::InvalidForgetting {
                name,
                value: value.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    /// Validate the complexity penalty coefficient (finite, non-negative).
    pub fn validate_penalty<T: Float>(value: T) -> Result<(), LwprError> {
        if !value.is_finite() || value < T::zero() {
            return Err(LwprError::InvalidPenalty {
                value: value.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    /// Validate a learning-rate value (finite, strictly positive).
    pub fn validate_rate<T: Float>(value: T) -> Result<(), LwprError> {
        if !value.is_finite() || value <= T::zero() {
            return Err(LwprError::InvalidLearningRate {
                value: value.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    /// Validate a normalization vector (all components finite, positive).
    pub fn validate_normalization<T: Float>(norm: &[T]) -> Result<(), LwprError> {
        for (i, &v) in norm.iter().enumerate() {
            if !v.is_finite() || v <= T::zero() {
                return Err(LwprError::InvalidNormalization { index: i });
            }
        }
        Ok(())
    }

    /// Validate the prune cadence.
    pub fn validate_prune_interval(interval: usize) -> Result<(), LwprError> {
        if interval == 0 {
            return Err(LwprError::InvalidPruneInterval);
        }
        Ok(())
    }

    /// Validate that no builder parameter was set more than once.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), LwprError> {
        if let Some(parameter) = duplicate_param {
            return Err(LwprError::DuplicateParameter { parameter });
        }
        Ok(())
    }

    /// Validate the initial metric: finite, symmetric, positive-definite.
    /// Returns its upper Cholesky factor on success.
    pub fn validate_metric<T: FloatLinalg>(d: &[T], n: usize) -> Result<Vec<T>, LwprError> {
        if d.len() != n * n {
            return Err(LwprError::MetricNotPositiveDefinite);
        }
        for &v in d {
            if !v.is_finite() {
                return Err(LwprError::MetricNotPositiveDefinite);
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if d[i * n + j] != d[j * n + i] {
                    return Err(LwprError::MetricNotPositiveDefinite);
                }
            }
        }
        T::cholesky_upper(d, n).ok_or(LwprError::MetricNotPositiveDefinite)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_length_is_checked_before_content() {
        let err = Validator::validate_input(&[1.0, 2.0], 3).unwrap_err();
        assert_eq!(err, LwprError::InputDimension { expected: 3, got: 2 });
    }

    #[test]
    fn non_finite_components_are_rejected() {
        let err = Validator::validate_input(&[1.0, f64::NAN], 2).unwrap_err();
        assert_eq!(err, LwprError::NonFiniteInput { name: "x", index: 1 });

        let err = Validator::validate_output(&[f64::INFINITY], 1).unwrap_err();
        assert_eq!(err, LwprError::NonFiniteInput { name: "y", index: 0 });
    }

    #[test]
    fn metric_validation_rejects_indefinite_matrices() {
        // Symmetric but indefinite.
        let d = [1.0, 2.0, 2.0, 1.0];
        assert_eq!(
            Validator::validate_metric::<f64>(&d, 2).unwrap_err(),
            LwprError::MetricNotPositiveDefinite
        );

        // Asymmetric.
        let d = [1.0, 0.5, 0.0, 1.0];
        assert_eq!(
            Validator::validate_metric::<f64>(&d, 2).unwrap_err(),
            LwprError::MetricNotPositiveDefinite
        );

        // Positive-definite passes and factors.
        let d = [4.0, 0.0, 0.0, 9.0];
        let m = Validator::validate_metric::<f64>(&d, 2).expect("PD matrix");
        assert!((m[0] - 2.0).abs() < 1e-12);
        assert!((m[3] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn threshold_ranges_are_enforced() {
        assert!(Validator::validate_unit_threshold(0.5f64, "w_gen").is_ok());
        assert!(Validator::validate_unit_threshold(0.0f64, "w_gen").is_err());
        assert!(Validator::validate_unit_threshold(1.5f64, "w_gen").is_err());
        assert!(Validator::validate_threshold_order(0.1f64, 0.001).is_ok());
        assert!(Validator::validate_threshold_order(0.001f64, 0.1).is_err());
    }
}
