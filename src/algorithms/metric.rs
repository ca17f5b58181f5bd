//! Gradient-based adaptation of a field's distance metric.
//!
//! ## Purpose
//!
//! This module shrinks or widens a receptive field's footprint by stochastic
//! gradient descent on the upper-triangular Cholesky factor `M` of the
//! metric (`D = MᵀM`), so positive semi-definiteness holds by construction.
//! The training signal is the field's leave-one-out residual, propagated
//! through the kernel weight; a complexity penalty on `Σ D_ij²` keeps the
//! footprint from narrowing without bound.
//!
//! ## Design notes
//!
//! * **Per-parameter rates**: each entry of `M` carries its own learning
//!   rate, adapted with a bar-delta rule — the rate grows while consecutive
//!   gradients agree in sign with their decayed mean and halves when they
//!   oscillate.
//! * **Meta layer**: optionally, steps are additionally divided by a
//!   second-moment statistic of the field's own gradient history.
//! * **Bounded steps**: every step is clamped both by a curvature estimate
//!   from the kernel's second derivative and by a fraction of the current
//!   parameter magnitude; non-finite quantities skip that parameter for this
//!   sample.
//!
//! ## Invariants
//!
//! * After every update the reconstructed metric is symmetric PSD.
//! * In diagonal-only mode, off-diagonal entries of `M` are never touched.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::distance::{mat_mul, mat_vec, reconstruct_metric};
use crate::math::kernel::Kernel;
use crate::primitives::field::ReceptiveField;

// ============================================================================
// Tuning Constants
// ============================================================================

// Bar-delta rate multipliers and cap.
const RATE_GROW: f64 = 1.2;
const RATE_SHRINK: f64 = 0.5;
const RATE_CAP: f64 = 1.0e8;

// Decay of the bar-delta gradient mean and of the meta second moment.
const GRAD_MEAN_DECAY: f64 = 0.9;
const GRAD_SQ_DECAY: f64 = 0.999;

// A step never moves a parameter by more than this fraction of (1 + |M_kl|).
const MAX_STEP_FRAC: f64 = 0.1;

// ============================================================================
// Scratch Storage
// ============================================================================

/// Reusable scratch buffers for one metric update.
#[derive(Debug, Clone)]
pub struct MetricScratch<T> {
    /// `x - c`.
    pub diff: Vec<T>,
    /// `M (x - c)`.
    pub md: Vec<T>,
    /// `M D` (penalty gradient), full mode only.
    pub mdmat: Vec<T>,
}

impl<T> Default for MetricScratch<T> {
    fn default() -> Self {
        Self {
            diff: Vec::new(),
            md: Vec::new(),
            mdmat: Vec::new(),
        }
    }
}

// ============================================================================
// Adaptation Parameters
// ============================================================================

/// Configuration slice consumed by the metric adapter.
#[derive(Debug, Clone, Copy)]
pub struct MetricParams<T> {
    /// Kernel shape (for the weight derivatives).
    pub kernel: Kernel,
    /// Complexity penalty coefficient.
    pub penalty: T,
    /// Adapt only the diagonal of the metric.
    pub diag_only: bool,
    /// Enable the meta rate-scaling layer.
    pub meta: bool,
    /// Strength of the meta layer.
    pub meta_rate: T,
}

// ============================================================================
// Metric Update
// ============================================================================

/// Adapt the field's metric after a regression update.
///
/// `x` is the (normalized) input, `w` the activation, `q` the squared
/// distance that produced it, `e_cv` the leave-one-out residual returned by
/// the regression update, and `e` the post-update residual.
pub fn adapt_metric<T: Float>(
    rf: &mut ReceptiveField<T>,
    x: &[T],
    w: T,
    q: T,
    e_cv: T,
    e: T,
    params: &MetricParams<T>,
    scratch: &mut MetricScratch<T>,
) {
    let n = rf.n_in();
    let eps = T::epsilon();
    let one = T::one();

    let w_total = rf.sum_w[0];
    if w_total <= eps {
        return;
    }

    // ------------------------------------------------------------------
    // Leverage of this sample and the LOO cost sensitivity to the weight.
    // ------------------------------------------------------------------
    let mut leverage = T::zero();
    for r in 0..rf.n_reg() {
        if rf.ss_s2[r] > eps {
            leverage = leverage + w * rf.s[r] * rf.s[r] / rf.ss_s2[r];
        }
    }

    let mut trace_corr = T::zero();
    for r in 0..rf.n_reg() {
        if rf.ss_s2[r] > eps {
            trace_corr = trace_corr + rf.s[r] / rf.ss_s2[r] * rf.loo_trace[r];
        }
    }

    let last = rf.n_reg() - 1;
    let e_acc = rf.sum_e_cv2[last];
    let two = T::from(2.0).unwrap();
    let dj1_dw =
        (e_cv * e_cv - e_acc / w_total) / w_total - two * e / w_total * trace_corr;

    // Memory traces for the next sample's correction term. A leverage at or
    // above one marks a degenerate sample; its trace contribution is skipped.
    let retain = one - leverage;
    if retain > eps {
        for r in 0..rf.n_reg() {
            rf.loo_trace[r] =
                rf.lambda[r] * rf.loo_trace[r] + w * e_cv * rf.s[r] / retain;
        }
    }

    if !dj1_dw.is_finite() {
        return;
    }

    // ------------------------------------------------------------------
    // Kernel chain and penalty gradient.
    // ------------------------------------------------------------------
    let dw_dq = params.kernel.dweight_dq(q);
    let d2w_dq2 = params.kernel.d2weight_dq2(q);

    scratch.diff.clear();
    scratch
        .diff
        .extend((0..n).map(|i| x[i] - rf.c[i]));
    scratch.md.clear();
    scratch.md.resize(n, T::zero());
    mat_vec(&rf.chol, &scratch.diff, &mut scratch.md);

    if !params.diag_only {
        mat_mul(&rf.chol, &rf.d_metric, &mut scratch.mdmat, n);
    }

    let four = T::from(4.0).unwrap();
    let penalty_scale = w / w_total * four * params.penalty;

    let rate_grow = T::from(RATE_GROW).unwrap();
    let rate_shrink = T::from(RATE_SHRINK).unwrap();
    let rate_cap = T::from(RATE_CAP).unwrap();
    let mean_decay = T::from(GRAD_MEAN_DECAY).unwrap();
    let sq_decay = T::from(GRAD_SQ_DECAY).unwrap();
    let max_step_frac = T::from(MAX_STEP_FRAC).unwrap();

    // ------------------------------------------------------------------
    // Per-parameter descent on the upper triangle (or diagonal) of M.
    // ------------------------------------------------------------------
    for k in 0..n {
        let l_range = if params.diag_only { k..k + 1 } else { k..n };
        for l in l_range {
            let idx = k * n + l;

            let dq_dm = two * scratch.md[k] * scratch.diff[l];
            let penalty_grad = if params.diag_only {
                // D diagonal: Σ D² sees only D_kk = M_kk².
                four * params.penalty * rf.chol[idx] * rf.d_metric[idx] * w / w_total
            } else {
                penalty_scale * scratch.mdmat[idx]
            };
            let grad = dj1_dw * dw_dq * dq_dm + penalty_grad;
            if !grad.is_finite() {
                continue;
            }

            // Bar-delta: grow the rate on sign agreement with the decayed
            // gradient mean, halve it on oscillation.
            if grad * rf.grad_mean[idx] > T::zero() {
                rf.alpha[idx] = (rf.alpha[idx] * rate_grow).min(rate_cap);
            } else if grad * rf.grad_mean[idx] < T::zero() {
                rf.alpha[idx] = rf.alpha[idx] * rate_shrink;
            }
            rf.grad_mean[idx] =
                mean_decay * rf.grad_mean[idx] + (one - mean_decay) * grad;

            // Meta layer: divide by the second-moment statistic of this
            // field's gradient history.
            rf.grad_sq[idx] =
                sq_decay * rf.grad_sq[idx] + (one - sq_decay) * grad * grad;
            let rate = if params.meta {
                rf.alpha[idx] / (one + (params.meta_rate * rf.grad_sq[idx]).sqrt())
            } else {
                rf.alpha[idx]
            };

            let mut step = rate * grad;

            // Curvature bound from the kernel's second derivative.
            let curvature = (dj1_dw * d2w_dq2 * dq_dm * dq_dm).abs();
            if curvature > eps {
                let newton = one / curvature;
                if step.abs() > newton {
                    step = step.signum() * newton;
                }
            }

            // Hard clamp relative to the parameter magnitude.
            let cap = max_step_frac * (one + rf.chol[idx].abs());
            if step.abs() > cap {
                step = step.signum() * cap;
            }
            if !step.is_finite() {
                continue;
            }

            rf.chol[idx] = rf.chol[idx] - step;
        }
    }

    // PSD by construction: D = MᵀM, explicitly symmetrized.
    reconstruct_metric(&rf.chol, &mut rf.d_metric, n);
}

// ============================================================================
// Tests
// ============================================================================
