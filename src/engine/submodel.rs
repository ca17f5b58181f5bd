//! One output dimension's roster of receptive fields and its update loop.
//!
//! ## Purpose
//!
//! A submodel owns everything one scalar output needs: the field arena, the
//! sample counter, the recent-input ring that feeds prune scans, and the
//! scratch workspace. `update` composes the pieces — activation sweep,
//! field creation, regression, metric adaptation, direction growth,
//! pruning — and returns the blended prediction.
//!
//! ## Design notes
//!
//! * **Strictly sequential**: the recursive statistics are update-order
//!   dependent; one submodel's stream must never be interleaved. Distinct
//!   submodels share no state and may run in parallel across the output
//!   boundary.
//! * **Normalized space**: a submodel only ever sees normalized inputs and
//!   outputs; scaling lives one layer up.
//!
//! ## Invariants
//!
//! * Field count changes only through creation (+1) and pruning (−1 each).
//! * `n_data` increments exactly once per update.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{collections::VecDeque, vec::Vec};
#[cfg(feature = "std")]
use std::{collections::VecDeque, vec::Vec};

// External dependencies
use num_traits::Float;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::algorithms::manager;
use crate::algorithms::metric::adapt_metric;
use crate::algorithms::regression::{check_add_direction, update_field};
use crate::engine::config::LwprConfig;
use crate::engine::workspace::Workspace;
use crate::evaluation::predictor;
use crate::math::accum::Kahan;
use crate::math::distance::{mahalanobis_sq, mahalanobis_sq_diag};
use crate::primitives::arena::RfArena;

// Prune scans judge overlap on this many of the most recent inputs.
const RECENT_CAPACITY: usize = 32;

// ============================================================================
// SubModel
// ============================================================================

/// The learning state of one scalar output dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct SubModel<T> {
    arena: RfArena<T>,
    n_data: u64,
    n_pruned: u64,
    recent: VecDeque<Vec<T>>,
    #[serde(skip)]
    ws: Workspace<T>,
}

impl<T: Float> SubModel<T> {
    /// Fresh submodel with an empty roster.
    pub fn new() -> Self {
        Self {
            arena: RfArena::new(),
            n_data: 0,
            n_pruned: 0,
            recent: VecDeque::with_capacity(RECENT_CAPACITY),
            ws: Workspace::default(),
        }
    }

    /// Samples this submodel has seen.
    #[inline]
    pub fn n_data(&self) -> u64 {
        self.n_data
    }

    /// Current receptive field count.
    #[inline]
    pub fn num_rfs(&self) -> usize {
        self.arena.len()
    }

    /// Fields removed by pruning over this submodel's lifetime.
    #[inline]
    pub fn n_pruned(&self) -> u64 {
        self.n_pruned
    }

    /// Read-only access to the field roster.
    #[inline]
    pub fn fields(&self) -> &RfArena<T> {
        &self.arena
    }

    /// Train on one sample in normalized space and return the blended
    /// prediction.
    pub fn update(&mut self, x: &[T], y: T, config: &LwprConfig<T>) -> T {
        let Self {
            arena,
            n_data,
            n_pruned,
            recent,
            ws,
        } = self;
        let diag_only = config.diag_only();
        ws.reset(config.n_in);

        // Activation sweep over the existing roster.
        let mut w_max = T::zero();
        for (handle, rf) in arena.iter() {
            let q = if diag_only {
                mahalanobis_sq_diag(x, &rf.c, &rf.d_metric, &mut ws.diff)
            } else {
                mahalanobis_sq(x, &rf.c, &rf.d_metric, &mut ws.diff)
            };
            let w = config.kernel.weight(q);
            if w > w_max {
                w_max = w;
            }
            ws.activations.push((handle, q, w));
        }

        // No field claims this input strongly enough: spawn one centered on
        // it. Its activation is exactly 1, so it joins the update sweep.
        if w_max <= config.w_gen {
            let template = config.field_template();
            let handle = manager::add_field(arena, &template, x, y);
            ws.activations.push((handle, T::zero(), T::one()));
        }

        // Update every active field and blend their predictions.
        let metric_params = config.metric_params();
        let mut sum_wy = Kahan::new();
        let mut sum_w = Kahan::new();
        for &(handle, q, w) in ws.activations.iter() {
            if w <= config.w_cutoff {
                continue;
            }
            let rf = arena.get_mut(handle).expect("activation handle is live");

            let out = update_field(
                rf,
                x,
                y,
                w,
                config.final_lambda,
                config.tau_lambda,
                &mut ws.pls,
            );
            if config.update_metric {
                adapt_metric(rf, x, w, q, out.e_cv, out.e, &metric_params, &mut ws.metric);
            }
            check_add_direction(rf, config.add_threshold, config.init_s2, config.init_lambda);

            sum_wy.add(w * out.y_pred);
            sum_w.add(w);
        }

        *n_data += 1;
        recent.push_back(x.to_vec());
        if recent.len() > RECENT_CAPACITY {
            recent.pop_front();
        }
        if *n_data % config.prune_interval as u64 == 0 {
            *n_pruned += manager::prune(
                arena,
                recent.make_contiguous(),
                config.w_prune,
                config.kernel,
                diag_only,
                &mut ws.diff,
            ) as u64;
        }

        // w_gen > w_cutoff guarantees at least one active field.
        debug_assert!(sum_w.total() > T::zero());
        sum_wy.total() / sum_w.total()
    }

    /// Read-only blended prediction in normalized space.
    pub fn predict(&self, x: &[T], config: &LwprConfig<T>) -> T {
        predictor::predict_blend(&self.arena, x, &config.blend_params())
    }

    /// Read-only blended prediction with a confidence band.
    pub fn predict_conf(&self, x: &[T], config: &LwprConfig<T>) -> (T, T) {
        predictor::predict_conf_blend(&self.arena, x, &config.blend_params())
    }
}

impl<T: Float> Default for SubModel<T> {
    fn default() -> Self {
        Self::new()
    }
}
