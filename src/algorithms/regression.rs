//! Incremental partial-least-squares regression inside one receptive field.
//!
//! ## Purpose
//!
//! This module implements the per-sample update of a field's local linear
//! model: forgetting-factor-weighted sufficient statistics over a short
//! sequence of orthogonal projection directions, grown one direction at a
//! time and never beyond the input dimension. Each update also produces the
//! field's leave-one-out (LOO) residual — the prediction error computed with
//! the coefficients as they stood *before* this sample was folded in — which
//! is the training signal for the distance-metric adaptation.
//!
//! ## Design notes
//!
//! * **Rank-one cost**: every coefficient refresh is a ratio of two decayed
//!   scalar sums; no matrix is ever inverted. Cost per sample is
//!   O(directions x input dimension).
//! * **Explicit residual**: the LOO residual is a return value, not shared
//!   state; the metric adapter receives it by value.
//! * **Degenerate samples**: a near-zero denominator skips that single
//!   refresh for this sample; the accumulators still decay and the stream
//!   continues.
//!
//! ## Key concepts
//!
//! * **Projection chain**: `s_r = u_r . z_r`, `z_{r+1} = z_r - s_r p_r`; the
//!   input residual shrinks as each direction explains its share.
//! * **Forgetting**: every statistic obeys `S <- lambda S + w (term)` with a
//!   per-direction `lambda` annealed toward its final value.
//!
//! ## Invariants
//!
//! * Stored directions have unit norm (or are still zero before any data).
//! * The direction count only grows, one at a time, bounded by the input
//!   dimension.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::field::ReceptiveField;

// ============================================================================
// Scratch Storage
// ============================================================================

/// Reusable scratch buffers for one regression update.
#[derive(Debug, Clone)]
pub struct PlsScratch<T> {
    /// Input residuals per direction, flattened `n_reg x n_in`.
    pub z: Vec<T>,
    /// Output residual chain, length `n_reg + 1`.
    pub res: Vec<T>,
}

impl<T> Default for PlsScratch<T> {
    fn default() -> Self {
        Self {
            z: Vec::new(),
            res: Vec::new(),
        }
    }
}

impl<T: Float> PlsScratch<T> {
    fn reset(&mut self, n_in: usize, n_reg: usize) {
        self.z.clear();
        self.z.resize(n_in * n_reg, T::zero());
        self.res.clear();
        self.res.resize(n_reg + 1, T::zero());
    }
}

// ============================================================================
// Update Outcome
// ============================================================================

/// Result of folding one sample into a field's regression state.
#[derive(Debug, Clone, Copy)]
pub struct RegressionOutcome<T> {
    /// Local prediction with the refreshed coefficients.
    pub y_pred: T,
    /// Leave-one-out residual (pre-update coefficients), the metric
    /// adaptation signal.
    pub e_cv: T,
    /// Residual against the refreshed coefficients.
    pub e: T,
}

// ============================================================================
// Regression Update
// ============================================================================

/// Fold the weighted sample `(x, y, w)` into the field's local model.
///
/// Updates the weighted means, the per-direction sufficient statistics, the
/// regression coefficients, and the projection directions, and returns the
/// prediction together with both residuals.
pub fn update_field<T: Float>(
    rf: &mut ReceptiveField<T>,
    x: &[T],
    y: T,
    w: T,
    final_lambda: T,
    tau_lambda: T,
    scratch: &mut PlsScratch<T>,
) -> RegressionOutcome<T> {
    let n_in = rf.n_in();
    let n_reg = rf.n_reg();
    let eps = T::epsilon();
    scratch.reset(n_in, n_reg);

    rf.w = w;

    // ------------------------------------------------------------------
    // 1) Weighted means (forgetting of direction 0).
    // ------------------------------------------------------------------
    let lambda0 = rf.lambda[0];
    let w_old = rf.sum_w[0];
    let w_new = lambda0 * w_old + w;

    for i in 0..n_in {
        rf.mean_x[i] = (lambda0 * w_old * rf.mean_x[i] + w * x[i]) / w_new;
    }
    rf.beta0 = (lambda0 * w_old * rf.beta0 + w * y) / w_new;
    for i in 0..n_in {
        let dx = x[i] - rf.mean_x[i];
        rf.var_x[i] = (lambda0 * w_old * rf.var_x[i] + w * dx * dx) / w_new;
    }

    // ------------------------------------------------------------------
    // 2) Projection chain with the pre-update directions.
    // ------------------------------------------------------------------
    for i in 0..n_in {
        scratch.z[i] = x[i] - rf.mean_x[i];
    }
    for r in 0..n_reg {
        let (head, tail) = scratch.z.split_at_mut((r + 1) * n_in);
        let z_r = &head[r * n_in..];
        let mut s_r = T::zero();
        for i in 0..n_in {
            s_r = s_r + rf.u[r][i] * z_r[i];
        }
        rf.s[r] = s_r;
        if r + 1 < n_reg {
            let z_next = &mut tail[..n_in];
            for i in 0..n_in {
                z_next[i] = z_r[i] - s_r * rf.p[r][i];
            }
        }
    }

    // ------------------------------------------------------------------
    // 3) LOO residual chain with the pre-update coefficients.
    // ------------------------------------------------------------------
    scratch.res[0] = y - rf.beta0;
    for r in 0..n_reg {
        scratch.res[r + 1] = scratch.res[r] - rf.beta[r] * rf.s[r];
    }
    let e_cv = scratch.res[n_reg];

    // ------------------------------------------------------------------
    // 4) Fold the sample into the sufficient statistics.
    // ------------------------------------------------------------------
    for r in 0..n_reg {
        let lam = rf.lambda[r];
        let s_r = rf.s[r];
        let res_r = scratch.res[r];
        let z_r = &scratch.z[r * n_in..(r + 1) * n_in];

        rf.sum_w[r] = lam * rf.sum_w[r] + w;
        rf.n_data[r] = lam * rf.n_data[r] + T::one();
        rf.ss_s2[r] = lam * rf.ss_s2[r] + w * s_r * s_r;
        rf.ss_sy[r] = lam * rf.ss_sy[r] + w * s_r * res_r;
        for i in 0..n_in {
            rf.ss_xz[r][i] = lam * rf.ss_xz[r][i] + w * s_r * z_r[i];
            rf.ss_zy[r][i] = lam * rf.ss_zy[r][i] + w * res_r * z_r[i];
        }

        // Rank-one refresh; skipped for this sample when degenerate.
        if rf.ss_s2[r] > eps {
            rf.beta[r] = rf.ss_sy[r] / rf.ss_s2[r];
            for i in 0..n_in {
                rf.p[r][i] = rf.ss_xz[r][i] / rf.ss_s2[r];
            }
        }

        // The unit direction is the normalized input-residual correlation.
        let mut norm_sq = T::zero();
        for i in 0..n_in {
            norm_sq = norm_sq + rf.ss_zy[r][i] * rf.ss_zy[r][i];
        }
        let norm = norm_sq.sqrt();
        if norm > eps {
            for i in 0..n_in {
                rf.u[r][i] = rf.ss_zy[r][i] / norm;
            }
        }

        rf.sum_e_cv2[r] = lam * rf.sum_e_cv2[r] + w * scratch.res[r + 1] * scratch.res[r + 1];
    }

    // ------------------------------------------------------------------
    // 5) Prediction with refreshed coefficients, lambda annealing.
    // ------------------------------------------------------------------
    let mut y_pred = rf.beta0;
    for r in 0..n_reg {
        y_pred = y_pred + rf.beta[r] * rf.s[r];
    }
    let e = y - y_pred;
    rf.sum_e2 = rf.lambda[0] * rf.sum_e2 + w * e * e;

    for r in 0..n_reg {
        rf.lambda[r] = tau_lambda * rf.lambda[r] + (T::one() - tau_lambda) * final_lambda;
    }

    RegressionOutcome { y_pred, e_cv, e }
}

// ============================================================================
// Direction Growth
// ============================================================================

/// Append a projection direction when the existing ones stop explaining the
/// residual variance well enough.
///
/// A direction is added while the roster is below the input dimension, the
/// newest direction has matured (its effective sample count has caught up
/// with the first direction's), and it still earns its keep: the LOO mean
/// squared error after the last direction is below `add_threshold` times the
/// error before it. Degenerate denominators abort the check, never the
/// stream.
///
/// Returns `true` when a direction was added.
pub fn check_add_direction<T: Float>(
    rf: &mut ReceptiveField<T>,
    add_threshold: T,
    init_s2: T,
    init_lambda: T,
) -> bool {
    let n_reg = rf.n_reg();
    if n_reg >= rf.n_in() {
        return false;
    }
    let eps = T::epsilon();

    let sw_last = rf.sum_w[n_reg - 1];
    let sw_prev = rf.sum_w[n_reg - 2];
    if sw_last <= eps || sw_prev <= eps {
        return false;
    }

    let mse_last = rf.sum_e_cv2[n_reg - 1] / sw_last;
    let mse_prev = rf.sum_e_cv2[n_reg - 2] / sw_prev;
    if mse_prev <= eps {
        return false;
    }

    let maturity = T::from(0.99).unwrap();
    if mse_last / mse_prev < add_threshold && rf.n_data[n_reg - 1] > maturity * rf.n_data[0] {
        rf.push_direction(init_s2, init_lambda);
        return true;
    }
    false
}

// ============================================================================
// Read-Only Prediction
// ============================================================================

/// Local prediction of one field for input `x`, without mutating anything.
pub fn predict_field<T: Float>(rf: &ReceptiveField<T>, x: &[T], z: &mut Vec<T>) -> T {
    let n_in = rf.n_in();
    z.clear();
    z.extend((0..n_in).map(|i| x[i] - rf.mean_x[i]));

    let mut y = rf.beta0;
    for r in 0..rf.n_reg() {
        let mut s_r = T::zero();
        for i in 0..n_in {
            s_r = s_r + rf.u[r][i] * z[i];
        }
        y = y + rf.beta[r] * s_r;
        for i in 0..n_in {
            z[i] = z[i] - s_r * rf.p[r][i];
        }
    }
    y
}

// ============================================================================
// Tests
// ============================================================================
