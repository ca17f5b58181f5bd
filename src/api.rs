//! High-level API for building LWPR models.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point: a fluent
//! builder for configuring a model and the re-exports that make up the
//! public surface. Configuration is raw and optional here; `build()` turns
//! it into the validated [`LwprConfig`] the engine runs with, or fails with
//! a configuration error.
//!
//! ## Design notes
//!
//! * **Ergonomic**: fluent builder; every parameter has a validated default
//!   except the kernel shape and the metric shape, which must be chosen
//!   explicitly.
//! * **Validated**: nothing is range-checked while chaining; `build()`
//!   validates everything at once and fails fast, including a
//!   positive-definiteness check (and factorization) of the initial metric.
//! * **Type-Safe**: generic over `f32`/`f64` through the linalg bridge.
//!
//! ### Configuration flow
//!
//! 1. Create a builder with `Lwpr::new(n_in, n_out)`.
//! 2. Chain configuration methods (`.kernel()`, `.metric_shape()`, …).
//! 3. Call `.build()` to obtain a ready [`LwprModel`].

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::engine::config::{LwprConfig, MetricShape};
pub use crate::engine::model::LwprModel;
pub use crate::engine::submodel::SubModel;
pub use crate::math::kernel::Kernel;
pub use crate::math::linalg::FloatLinalg;
pub use crate::primitives::errors::LwprError;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for [`LwprModel`].
///
/// Defaults follow the conventions of incremental locally weighted learning:
/// spherical initial metric `25·I`, initial rates `250`, `w_gen = 0.1`,
/// `w_prune = 0.9`, `w_cutoff = 0.001`, penalty `1e-6`, forgetting annealed
/// from `0.999` to `0.9999` with time constant `0.9999`, direction-growth
/// threshold `0.5`, prune cadence `100`, unit normalization. The kernel and
/// metric shape have no defaults and must be set explicitly.
#[derive(Debug, Clone)]
pub struct LwprBuilder<T> {
    n_in: usize,
    n_out: usize,

    kernel: Option<Kernel>,
    metric_shape: Option<MetricShape>,
    update_metric: Option<bool>,
    meta: Option<bool>,
    meta_rate: Option<T>,
    penalty: Option<T>,
    init_d: Option<Vec<T>>,
    init_alpha: Option<Vec<T>>,
    w_gen: Option<T>,
    w_prune: Option<T>,
    w_cutoff: Option<T>,
    init_lambda: Option<T>,
    final_lambda: Option<T>,
    tau_lambda: Option<T>,
    init_s2: Option<T>,
    add_threshold: Option<T>,
    prune_interval: Option<usize>,
    norm_in: Option<Vec<T>>,
    norm_out: Option<Vec<T>>,

    /// Tracks if any parameter was set multiple times (checked in build).
    duplicate_param: Option<&'static str>,
}

impl<T: FloatLinalg> LwprBuilder<T> {
    /// Start configuring a model with `n_in` inputs and `n_out` outputs.
    pub fn new(n_in: usize, n_out: usize) -> Self {
        Self {
            n_in,
            n_out,
            kernel: None,
            metric_shape: None,
            update_metric: None,
            meta: None,
            meta_rate: None,
            penalty: None,
            init_d: None,
            init_alpha: None,
            w_gen: None,
            w_prune: None,
            w_cutoff: None,
            init_lambda: None,
            final_lambda: None,
            tau_lambda: None,
            init_s2: None,
            add_threshold: None,
            prune_interval: None,
            norm_in: None,
            norm_out: None,
            duplicate_param: None,
        }
    }

    /// Set the kernel shape (required).
    pub fn kernel(mut self, kernel: Kernel) -> Self {
        if self.kernel.is_some() {
            self.duplicate_param = Some("kernel");
        }
        self.kernel = Some(kernel);
        self
    }

    /// Set the metric shape (required).
    pub fn metric_shape(mut self, shape: MetricShape) -> Self {
        if self.metric_shape.is_some() {
            self.duplicate_param = Some("metric_shape");
        }
        self.metric_shape = Some(shape);
        self
    }

    /// Enable or disable distance-metric adaptation (default: enabled).
    pub fn update_metric(mut self, enabled: bool) -> Self {
        if self.update_metric.is_some() {
            self.duplicate_param = Some("update_metric");
        }
        self.update_metric = Some(enabled);
        self
    }

    /// Enable or disable the meta rate-scaling layer (default: disabled).
    pub fn meta(mut self, enabled: bool) -> Self {
        if self.meta.is_some() {
            self.duplicate_param = Some("meta");
        }
        self.meta = Some(enabled);
        self
    }

    /// Set the strength of the meta layer (default: 250).
    pub fn meta_rate(mut self, rate: T) -> Self {
        if self.meta_rate.is_some() {
            self.duplicate_param = Some("meta_rate");
        }
        self.meta_rate = Some(rate);
        self
    }

    /// Set the complexity penalty coefficient (default: 1e-6).
    pub fn penalty(mut self, penalty: T) -> Self {
        if self.penalty.is_some() {
            self.duplicate_param = Some("penalty");
        }
        self.penalty = Some(penalty);
        self
    }

    /// Set the initial metric to `value · I`.
    pub fn init_metric_spherical(mut self, value: T) -> Self {
        if self.init_d.is_some() {
            self.duplicate_param = Some("init_metric");
        }
        let n = self.n_in;
        let mut d = vec![T::zero(); n * n];
        for i in 0..n {
            d[i * n + i] = value;
        }
        self.init_d = Some(d);
        self
    }

    /// Set the initial metric from its diagonal.
    pub fn init_metric_diagonal(mut self, diag: &[T]) -> Self {
        if self.init_d.is_some() {
            self.duplicate_param = Some("init_metric");
        }
        let n = self.n_in;
        let mut d = vec![T::zero(); n * n];
        for (i, &v) in diag.iter().take(n).enumerate() {
            d[i * n + i] = v;
        }
        self.init_d = Some(d);
        self
    }

    /// Set the full initial metric (row-major `n_in x n_in`).
    pub fn init_metric(mut self, d: &[T]) -> Self {
        if self.init_d.is_some() {
            self.duplicate_param = Some("init_metric");
        }
        self.init_d = Some(d.to_vec());
        self
    }

    /// Fill all initial metric learning rates with one value.
    pub fn init_alpha(mut self, value: T) -> Self {
        if self.init_alpha.is_some() {
            self.duplicate_param = Some("init_alpha");
        }
        self.init_alpha = Some(vec![value; self.n_in * self.n_in]);
        self
    }

    /// Set the full initial learning-rate matrix (row-major `n_in x n_in`).
    pub fn init_alpha_matrix(mut self, alpha: &[T]) -> Self {
        if self.init_alpha.is_some() {
            self.duplicate_param = Some("init_alpha");
        }
        self.init_alpha = Some(alpha.to_vec());
        self
    }

    /// Set the field-generation threshold (default: 0.1).
    pub fn w_gen(mut self, value: T) -> Self {
        if self.w_gen.is_some() {
            self.duplicate_param = Some("w_gen");
        }
        self.w_gen = Some(value);
        self
    }

    /// Set the pruning overlap threshold (default: 0.9).
    pub fn w_prune(mut self, value: T) -> Self {
        if self.w_prune.is_some() {
            self.duplicate_param = Some("w_prune");
        }
        self.w_prune = Some(value);
        self
    }

    /// Set the activation cutoff (default: 0.001).
    pub fn w_cutoff(mut self, value: T) -> Self {
        if self.w_cutoff.is_some() {
            self.duplicate_param = Some("w_cutoff");
        }
        self.w_cutoff = Some(value);
        self
    }

    /// Set the initial forgetting factor (default: 0.999).
    pub fn init_lambda(mut self, value: T) -> Self {
        if self.init_lambda.is_some() {
            self.duplicate_param = Some("init_lambda");
        }
        self.init_lambda = Some(value);
        self
    }

    /// Set the final forgetting factor (default: 0.9999).
    pub fn final_lambda(mut self, value: T) -> Self {
        if self.final_lambda.is_some() {
            self.duplicate_param = Some("final_lambda");
        }
        self.final_lambda = Some(value);
        self
    }

    /// Set the forgetting annealing time constant (default: 0.9999).
    pub fn tau_lambda(mut self, value: T) -> Self {
        if self.tau_lambda.is_some() {
            self.duplicate_param = Some("tau_lambda");
        }
        self.tau_lambda = Some(value);
        self
    }

    /// Seed for the projection variance statistic (default: 1e-10).
    pub fn init_s2(mut self, value: T) -> Self {
        if self.init_s2.is_some() {
            self.duplicate_param = Some("init_s2");
        }
        self.init_s2 = Some(value);
        self
    }

    /// Direction-growth threshold on the LOO error ratio (default: 0.5).
    pub fn add_threshold(mut self, value: T) -> Self {
        if self.add_threshold.is_some() {
            self.duplicate_param = Some("add_threshold");
        }
        self.add_threshold = Some(value);
        self
    }

    /// Prune scan cadence in updates (default: 100).
    pub fn prune_interval(mut self, interval: usize) -> Self {
        if self.prune_interval.is_some() {
            self.duplicate_param = Some("prune_interval");
        }
        self.prune_interval = Some(interval);
        self
    }

    /// Componentwise input normalization (default: all ones).
    pub fn norm_in(mut self, norm: &[T]) -> Self {
        if self.norm_in.is_some() {
            self.duplicate_param = Some("norm_in");
        }
        self.norm_in = Some(norm.to_vec());
        self
    }

    /// Componentwise output normalization (default: all ones).
    pub fn norm_out(mut self, norm: &[T]) -> Self {
        if self.norm_out.is_some() {
            self.duplicate_param = Some("norm_out");
        }
        self.norm_out = Some(norm.to_vec());
        self
    }

    /// Validate the configuration and build the model.
    pub fn build(self) -> Result<LwprModel<T>, LwprError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        Validator::validate_shape(self.n_in, self.n_out)?;

        let n_in = self.n_in;
        let kernel = self.kernel.ok_or(LwprError::MissingKernel)?;
        let metric_shape = self.metric_shape.ok_or(LwprError::MissingMetricShape)?;

        let w_gen = self.w_gen.unwrap_or_else(|| T::from(0.1).unwrap());
        let w_prune = self.w_prune.unwrap_or_else(|| T::from(0.9).unwrap());
        let w_cutoff = self.w_cutoff.unwrap_or_else(|| T::from(0.001).unwrap());
        Validator::validate_unit_threshold(w_gen, "w_gen")?;
        Validator::validate_unit_threshold(w_prune, "w_prune")?;
        Validator::validate_open_unit_threshold(w_cutoff, "w_cutoff")?;
        Validator::validate_threshold_order(w_gen, w_cutoff)?;

        let init_lambda = self.init_lambda.unwrap_or_else(|| T::from(0.999).unwrap());
        let final_lambda = self.final_lambda.unwrap_or_else(|| T::from(0.9999).unwrap());
        let tau_lambda = self.tau_lambda.unwrap_or_else(|| T::from(0.9999).unwrap());
        Validator::validate_forgetting(init_lambda, "init_lambda")?;
        Validator::validate_forgetting(final_lambda, "final_lambda")?;
        Validator::validate_forgetting(tau_lambda, "tau_lambda")?;

        let penalty = self.penalty.unwrap_or_else(|| T::from(1.0e-6).unwrap());
        Validator::validate_penalty(penalty)?;

        let meta_rate = self.meta_rate.unwrap_or_else(|| T::from(250.0).unwrap());
        Validator::validate_rate(meta_rate)?;

        let init_s2 = self.init_s2.unwrap_or_else(|| T::from(1.0e-10).unwrap());
        Validator::validate_rate(init_s2)?;

        let add_threshold = self.add_threshold.unwrap_or_else(|| T::from(0.5).unwrap());
        Validator::validate_unit_threshold(add_threshold, "add_threshold")?;

        let prune_interval = self.prune_interval.unwrap_or(100);
        Validator::validate_prune_interval(prune_interval)?;

        let norm_in = self.norm_in.unwrap_or_else(|| vec![T::one(); n_in]);
        if norm_in.len() != n_in {
            return Err(LwprError::InvalidNormalization {
                index: norm_in.len().min(n_in),
            });
        }
        Validator::validate_normalization(&norm_in)?;
        let norm_out = self.norm_out.unwrap_or_else(|| vec![T::one(); self.n_out]);
        if norm_out.len() != self.n_out {
            return Err(LwprError::InvalidNormalization {
                index: norm_out.len().min(self.n_out),
            });
        }
        Validator::validate_normalization(&norm_out)?;

        let init_d = self.init_d.unwrap_or_else(|| {
            let mut d = vec![T::zero(); n_in * n_in];
            for i in 0..n_in {
                d[i * n_in + i] = T::from(25.0).unwrap();
            }
            d
        });
        let init_chol = Validator::validate_metric(&init_d, n_in)?;

        let init_alpha = self
            .init_alpha
            .unwrap_or_else(|| vec![T::from(250.0).unwrap(); n_in * n_in]);
        if init_alpha.len() != n_in * n_in {
            return Err(LwprError::InvalidLearningRate { value: f64::NAN });
        }
        for &a in &init_alpha {
            Validator::validate_rate(a)?;
        }

        let config = LwprConfig {
            n_in,
            n_out: self.n_out,
            kernel,
            metric_shape,
            update_metric: self.update_metric.unwrap_or(true),
            meta: self.meta.unwrap_or(false),
            meta_rate,
            penalty,
            init_d,
            init_chol,
            init_alpha,
            w_gen,
            w_prune,
            w_cutoff,
            init_lambda,
            final_lambda,
            tau_lambda,
            init_s2,
            add_threshold,
            prune_interval,
            norm_in,
            norm_out,
        };
        Ok(LwprModel::from_config(config))
    }
}
