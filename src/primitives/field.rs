//! Receptive field state.
//!
//! ## Purpose
//!
//! This module defines the [`ReceptiveField`] — the unit of local learning: a
//! center, an adaptive distance metric, and the sufficient statistics of an
//! incremental partial-least-squares regression. The field is a passive data
//! holder; the update rules that operate on it live in the `algorithms` layer.
//!
//! ## Key concepts
//!
//! * **Distance metric**: `D` determines the field's footprint in input space.
//!   It is stored together with its upper-triangular Cholesky factor `M`
//!   (`D = MᵀM`); the adaptation rules move `M`, which keeps `D` positive
//!   semi-definite by construction.
//! * **Projection directions**: the PLS regression state grows one direction
//!   at a time, never beyond the input dimension.
//!
//! ## Invariants
//!
//! * `D` is symmetric positive semi-definite at all times.
//! * `n_reg() <= n_in` and all per-direction vectors share the same length.
//! * Matrix storage is row-major with `n_in * n_in` entries.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use serde::{Deserialize, Serialize};

// ============================================================================
// Receptive Field
// ============================================================================

/// One local linear model with an adaptive Gaussian/bisquare footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct ReceptiveField<T> {
    /// Field center in (normalized) input space.
    pub c: Vec<T>,

    /// Distance metric `D` (row-major `n_in x n_in`, symmetric PSD).
    pub d_metric: Vec<T>,

    /// Upper-triangular Cholesky factor `M` with `D = MᵀM`.
    pub chol: Vec<T>,

    /// Per-parameter metric learning rates (row-major `n_in x n_in`).
    pub alpha: Vec<T>,

    /// Decayed mean of past metric gradients (bar-delta sign memory).
    pub grad_mean: Vec<T>,

    /// Decayed second moment of past metric gradients (meta statistic).
    pub grad_sq: Vec<T>,

    /// Regression offset (weighted running mean of the targets).
    pub beta0: T,

    /// Weighted running mean of the inputs.
    pub mean_x: Vec<T>,

    /// Weighted running variance of the inputs (componentwise).
    pub var_x: Vec<T>,

    /// Projection directions, one unit vector per direction (`n_reg x n_in`).
    pub u: Vec<Vec<T>>,

    /// Projection reduction vectors (`n_reg x n_in`).
    pub p: Vec<Vec<T>>,

    /// Regression coefficient per direction.
    pub beta: Vec<T>,

    /// Decayed sum of squared projections per direction.
    pub ss_s2: Vec<T>,

    /// Decayed sum of projection-residual products per direction.
    pub ss_sy: Vec<T>,

    /// Decayed sum of projection-weighted inputs per direction (`n_reg x n_in`).
    pub ss_xz: Vec<Vec<T>>,

    /// Decayed input-residual correlation per direction (`n_reg x n_in`).
    /// Its normalization is the projection direction itself.
    pub ss_zy: Vec<Vec<T>>,

    /// Decayed total activation weight per direction.
    pub sum_w: Vec<T>,

    /// Decayed leave-one-out squared error after each direction.
    pub sum_e_cv2: Vec<T>,

    /// Decayed post-update squared error of the full local model.
    pub sum_e2: T,

    /// Effective (decayed) sample count per direction.
    pub n_data: Vec<T>,

    /// Per-direction forgetting factor, annealed over time.
    pub lambda: Vec<T>,

    /// Leverage-corrected LOO memory trace per direction (metric gradient).
    pub loo_trace: Vec<T>,

    /// Projections of the most recent training sample.
    pub s: Vec<T>,

    /// Activation weight of the most recent training sample.
    pub w: T,
}

impl<T: Float> ReceptiveField<T> {
    /// Create a fresh field centered at `c`, trained on nothing but the
    /// single target `y0` it was spawned for.
    ///
    /// `init_d` and `init_chol` are the configured initial metric and its
    /// upper Cholesky factor; `init_alpha` the initial learning rates. The
    /// field starts with `n_reg` zeroed projection directions whose
    /// statistics are seeded with `init_s2` and `init_lambda`.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn(
        c: Vec<T>,
        y0: T,
        init_d: &[T],
        init_chol: &[T],
        init_alpha: &[T],
        n_reg: usize,
        init_s2: T,
        init_lambda: T,
    ) -> Self {
        let n_in = c.len();
        debug_assert_eq!(init_d.len(), n_in * n_in);
        debug_assert!(n_reg >= 1 && n_reg <= n_in.max(1));

        Self {
            mean_x: c.clone(),
            var_x: vec![T::zero(); n_in],
            c,
            d_metric: init_d.to_vec(),
            chol: init_chol.to_vec(),
            alpha: init_alpha.to_vec(),
            grad_mean: vec![T::zero(); n_in * n_in],
            grad_sq: vec![T::zero(); n_in * n_in],
            beta0: y0,
            u: vec![vec![T::zero(); n_in]; n_reg],
            p: vec![vec![T::zero(); n_in]; n_reg],
            beta: vec![T::zero(); n_reg],
            ss_s2: vec![init_s2; n_reg],
            ss_sy: vec![T::zero(); n_reg],
            ss_xz: vec![vec![T::zero(); n_in]; n_reg],
            ss_zy: vec![vec![T::zero(); n_in]; n_reg],
            sum_w: vec![T::zero(); n_reg],
            sum_e_cv2: vec![T::zero(); n_reg],
            sum_e2: T::zero(),
            n_data: vec![T::zero(); n_reg],
            lambda: vec![init_lambda; n_reg],
            loo_trace: vec![T::zero(); n_reg],
            s: vec![T::zero(); n_reg],
            w: T::zero(),
        }
    }

    /// Input dimension of this field.
    #[inline]
    pub fn n_in(&self) -> usize {
        self.c.len()
    }

    /// Current number of projection directions.
    #[inline]
    pub fn n_reg(&self) -> usize {
        self.u.len()
    }

    /// Running leave-one-out mean squared error of the full local model
    /// (final direction), or `None` while the field has seen no weight.
    pub fn loo_mse(&self) -> Option<T> {
        let last = self.n_reg() - 1;
        let w = self.sum_w[last];
        if w > T::epsilon() {
            Some(self.sum_e_cv2[last] / w)
        } else {
            None
        }
    }

    /// Trace of the distance metric. Larger trace means a narrower (finer)
    /// footprint; pruning keeps the finer of two overlapping fields.
    pub fn metric_trace(&self) -> T {
        let n = self.n_in();
        let mut tr = T::zero();
        for i in 0..n {
            tr = tr + self.d_metric[i * n + i];
        }
        tr
    }

    /// Append one zeroed projection direction with fresh statistics.
    pub fn push_direction(&mut self, init_s2: T, init_lambda: T) {
        let n_in = self.n_in();
        self.u.push(vec![T::zero(); n_in]);
        self.p.push(vec![T::zero(); n_in]);
        self.beta.push(T::zero());
        self.ss_s2.push(init_s2);
        self.ss_sy.push(T::zero());
        self.ss_xz.push(vec![T::zero(); n_in]);
        self.ss_zy.push(vec![T::zero(); n_in]);
        self.sum_w.push(T::zero());
        self.sum_e_cv2.push(T::zero());
        self.n_data.push(T::zero());
        self.lambda.push(init_lambda);
        self.loo_trace.push(T::zero());
        self.s.push(T::zero());
    }
}
