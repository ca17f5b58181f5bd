//! Read-only prediction blending and confidence bands.
//!
//! ## Purpose
//!
//! This module implements the inference path: the same activation
//! computation as training, but strictly read-only — no field is created,
//! no statistic moves. Active fields' local predictions are blended by
//! normalized activation weight; the confidence band combines the weighted
//! disagreement among the fields with each field's own running leave-one-out
//! error.
//!
//! ## Invariants
//!
//! * No call in this module mutates a field or a roster.
//! * Blending weights are the same (0, 1] kernel activations training uses.
//!
//! ## Non-goals
//!
//! * No extrapolation heuristics: with no field activated above the cutoff,
//!   the blend is the empty-model prior (zero) and the confidence band is
//!   infinite.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::accum::Kahan;
use crate::math::distance::{mahalanobis_sq, mahalanobis_sq_diag};
use crate::math::kernel::Kernel;
use crate::primitives::arena::RfArena;

// Module dependencies
use crate::algorithms::regression::predict_field;

// ============================================================================
// Blend Parameters
// ============================================================================

/// Read-only slice of the configuration consumed by the predictor.
#[derive(Debug, Clone, Copy)]
pub struct BlendParams<T> {
    /// Kernel shape.
    pub kernel: Kernel,
    /// Diagonal-only metric mode.
    pub diag_only: bool,
    /// Activation below which a field does not participate.
    pub w_cutoff: T,
}

// ============================================================================
// Prediction
// ============================================================================

/// Blend the active fields' predictions for input `x` (normalized space).
pub fn predict_blend<T: Float>(arena: &RfArena<T>, x: &[T], params: &BlendParams<T>) -> T {
    let mut diff = vec![T::zero(); x.len()];
    let mut z = Vec::with_capacity(x.len());

    let mut sum_wy = Kahan::new();
    let mut sum_w = Kahan::new();
    for (_, rf) in arena.iter() {
        let q = if params.diag_only {
            mahalanobis_sq_diag(x, &rf.c, &rf.d_metric, &mut diff)
        } else {
            mahalanobis_sq(x, &rf.c, &rf.d_metric, &mut diff)
        };
        let w = params.kernel.weight(q);
        if w > params.w_cutoff {
            let y = predict_field(rf, x, &mut z);
            sum_wy.add(w * y);
            sum_w.add(w);
        }
    }

    if sum_w.total() > T::zero() {
        sum_wy.total() / sum_w.total()
    } else {
        T::zero()
    }
}

/// Blend with a confidence band.
///
/// The band per output is
/// `sqrt( Σ w_k ((y_k - y)² + mse_k) / Σ w_k )`, where `mse_k` is field
/// `k`'s running leave-one-out mean squared error. With no active field the
/// band is infinite.
pub fn predict_conf_blend<T: Float>(
    arena: &RfArena<T>,
    x: &[T],
    params: &BlendParams<T>,
) -> (T, T) {
    let mut diff = vec![T::zero(); x.len()];
    let mut z = Vec::with_capacity(x.len());

    // (w, local prediction, local LOO mse) per active field.
    let mut active: Vec<(T, T, T)> = Vec::new();
    let mut sum_wy = Kahan::new();
    let mut sum_w = Kahan::new();
    for (_, rf) in arena.iter() {
        let q = if params.diag_only {
            mahalanobis_sq_diag(x, &rf.c, &rf.d_metric, &mut diff)
        } else {
            mahalanobis_sq(x, &rf.c, &rf.d_metric, &mut diff)
        };
        let w = params.kernel.weight(q);
        if w > params.w_cutoff {
            let y = predict_field(rf, x, &mut z);
            let mse = rf.loo_mse().unwrap_or_else(T::zero);
            active.push((w, y, mse));
            sum_wy.add(w * y);
            sum_w.add(w);
        }
    }

    if sum_w.total() <= T::zero() {
        return (T::zero(), T::infinity());
    }
    let blend = sum_wy.total() / sum_w.total();

    let mut var = Kahan::new();
    for &(w, y, mse) in &active {
        let dev = y - blend;
        var.add(w * (dev * dev + mse));
    }
    let conf = (var.total() / sum_w.total()).sqrt();
    (blend, conf)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::manager::{add_field, FieldTemplate};
    use crate::algorithms::regression::{update_field, PlsScratch};

    fn params() -> BlendParams<f64> {
        BlendParams {
            kernel: Kernel::Gaussian,
            diag_only: true,
            w_cutoff: 1e-3,
        }
    }

    fn template() -> FieldTemplate<f64> {
        FieldTemplate {
            init_d: vec![20.0],
            init_chol: vec![20.0f64.sqrt()],
            init_alpha: vec![40.0],
            init_s2: 1e-10,
            init_lambda: 0.999,
        }
    }

    #[test]
    fn empty_roster_predicts_prior_with_infinite_band() {
        let arena: RfArena<f64> = RfArena::new();
        let (y, conf) = predict_conf_blend(&arena, &[0.0], &params());
        assert_eq!(y, 0.0);
        assert!(conf.is_infinite());
    }

    #[test]
    fn single_trained_field_dominates_near_its_center() {
        let mut arena = RfArena::new();
        let h = add_field(&mut arena, &template(), &[1.0], 4.0);
        let mut scratch = PlsScratch::default();
        let rf = arena.get_mut(h).expect("live");
        update_field(rf, &[1.0], 4.0, 1.0, 0.9999, 0.99999, &mut scratch);

        let y = predict_blend(&arena, &[1.0], &params());
        assert!((y - 4.0).abs() < 1e-9);
    }

    #[test]
    fn prediction_does_not_mutate_fields() {
        let mut arena = RfArena::new();
        let h = add_field(&mut arena, &template(), &[0.0], 2.0);
        let mut scratch = PlsScratch::default();
        update_field(
            arena.get_mut(h).expect("live"),
            &[0.0],
            2.0,
            1.0,
            0.9999,
            0.99999,
            &mut scratch,
        );

        let before = arena.get(h).expect("live").clone();
        let _ = predict_blend(&arena, &[0.3], &params());
        let _ = predict_conf_blend(&arena, &[-0.7], &params());
        assert_eq!(*arena.get(h).expect("live"), before);
    }

    #[test]
    fn disagreement_widens_the_band() {
        let mut arena = RfArena::new();
        let mut scratch = PlsScratch::default();

        // Two fields at the same spot trained to different targets.
        for &target in &[0.0, 6.0] {
            let h = add_field(&mut arena, &template(), &[0.0], target);
            update_field(
                arena.get_mut(h).expect("live"),
                &[0.0],
                target,
                1.0,
                0.9999,
                0.99999,
                &mut scratch,
            );
        }

        let (y, conf) = predict_conf_blend(&arena, &[0.0], &params());
        assert!((y - 3.0).abs() < 1e-9, "blend should average, got {y}");
        assert!(conf > 2.0, "disagreeing fields must widen the band, got {conf}");
    }
}
