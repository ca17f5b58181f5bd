//! Validated model configuration.
//!
//! ## Purpose
//!
//! This module defines the concrete, fully-validated configuration a model
//! carries: every threshold range-checked, the initial metric verified
//! positive-definite and pre-factored, and the kernel and metric shape
//! chosen explicitly. Instances are only produced by the builder in
//! [`crate::api`]; the raw, optional-field builder state never reaches the
//! engine.
//!
//! ## Invariants
//!
//! * `init_chol` is the upper Cholesky factor of `init_d`.
//! * All thresholds, forgetting factors, and rates are inside their
//!   documented ranges; normalization factors are finite and positive.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::algorithms::manager::FieldTemplate;
use crate::algorithms::metric::MetricParams;
use crate::evaluation::predictor::BlendParams;
use crate::math::kernel::Kernel;

// ============================================================================
// Metric Shape
// ============================================================================

/// Shape of the adaptive distance metric.
///
/// There is deliberately no default: the shape must be configured explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricShape {
    /// Only diagonal metric entries exist and adapt.
    Diagonal,
    /// The full symmetric metric adapts.
    Full,
}

// ============================================================================
// Configuration
// ============================================================================

/// Fully-validated configuration shared by a model and its submodels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct LwprConfig<T> {
    /// Input dimension.
    pub n_in: usize,
    /// Output dimension.
    pub n_out: usize,

    /// Kernel shape (explicit, no default).
    pub kernel: Kernel,
    /// Metric shape (explicit, no default).
    pub metric_shape: MetricShape,

    /// Whether metric adaptation runs at all.
    pub update_metric: bool,
    /// Whether the meta rate-scaling layer is enabled.
    pub meta: bool,
    /// Strength of the meta layer.
    pub meta_rate: T,
    /// Complexity penalty coefficient.
    pub penalty: T,

    /// Initial distance metric (row-major `n_in x n_in`, positive-definite).
    pub init_d: Vec<T>,
    /// Upper Cholesky factor of `init_d`.
    pub init_chol: Vec<T>,
    /// Initial per-parameter metric learning rates.
    pub init_alpha: Vec<T>,

    /// A field is spawned when no activation exceeds this.
    pub w_gen: T,
    /// Joint activation above this marks two fields as redundant.
    pub w_prune: T,
    /// Activation below this excludes a field from updates and blends.
    pub w_cutoff: T,

    /// Initial per-direction forgetting factor.
    pub init_lambda: T,
    /// Forgetting factor the annealing converges to.
    pub final_lambda: T,
    /// Annealing time constant.
    pub tau_lambda: T,

    /// Seed value for the projection variance statistic.
    pub init_s2: T,
    /// Direction-growth threshold on the LOO error ratio.
    pub add_threshold: T,

    /// Prune scan cadence in updates.
    pub prune_interval: usize,

    /// Componentwise input normalization (all > 0).
    pub norm_in: Vec<T>,
    /// Componentwise output normalization (all > 0).
    pub norm_out: Vec<T>,
}

impl<T: Float> LwprConfig<T> {
    /// True when the metric is diagonal-only.
    #[inline]
    pub fn diag_only(&self) -> bool {
        self.metric_shape == MetricShape::Diagonal
    }

    /// Initialization template for spawned fields.
    pub fn field_template(&self) -> FieldTemplate<T> {
        FieldTemplate {
            init_d: self.init_d.clone(),
            init_chol: self.init_chol.clone(),
            init_alpha: self.init_alpha.clone(),
            init_s2: self.init_s2,
            init_lambda: self.init_lambda,
        }
    }

    /// Parameter slice for the metric adapter.
    pub fn metric_params(&self) -> MetricParams<T> {
        MetricParams {
            kernel: self.kernel,
            penalty: self.penalty,
            diag_only: self.diag_only(),
            meta: self.meta,
            meta_rate: self.meta_rate,
        }
    }

    /// Parameter slice for the predictor.
    pub fn blend_params(&self) -> BlendParams<T> {
        BlendParams {
            kernel: self.kernel,
            diag_only: self.diag_only(),
            w_cutoff: self.w_cutoff,
        }
    }
}
