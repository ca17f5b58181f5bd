//! The trained model: one submodel per output dimension.
//!
//! ## Purpose
//!
//! This module implements the learning API surface: `update`, `predict`,
//! and `predict_conf`, plus introspection. The model owns the validated
//! configuration, applies input/output normalization, keeps model-level
//! running statistics of the inputs, and fans each sample out to its
//! per-output submodels.
//!
//! ## Design notes
//!
//! * **Atomic validation**: dimension and finiteness checks run before any
//!   counter or statistic moves; a failed call leaves the model unchanged.
//! * **Normalized core**: submodels operate entirely in normalized space;
//!   predictions and confidence bands are scaled back on the way out.
//!
//! ## Invariants
//!
//! * `n_data` counts successful updates only.
//! * Submodels never observe vectors of the wrong length.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::fmt;

// External dependencies
use num_traits::Float;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::engine::config::LwprConfig;
use crate::engine::submodel::SubModel;
use crate::engine::validator::Validator;
use crate::primitives::errors::LwprError;

// ============================================================================
// Model
// ============================================================================

/// An incremental locally-weighted-projection-regression model.
///
/// Build one through the fluent builder (`Lwpr::new(n_in, n_out)` in the
/// prelude); then feed it `(input, output)` samples with
/// [`update`](Self::update) and query it at any time with
/// [`predict`](Self::predict) or [`predict_conf`](Self::predict_conf).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct LwprModel<T> {
    config: LwprConfig<T>,
    subs: Vec<SubModel<T>>,
    n_data: u64,
    mean_x: Vec<T>,
    var_x: Vec<T>,
}

impl<T: Float> LwprModel<T> {
    /// Assemble a model from a validated configuration.
    pub(crate) fn from_config(config: LwprConfig<T>) -> Self {
        let n_in = config.n_in;
        let n_out = config.n_out;
        Self {
            config,
            subs: (0..n_out).map(|_| SubModel::new()).collect(),
            n_data: 0,
            mean_x: vec![T::zero(); n_in],
            var_x: vec![T::zero(); n_in],
        }
    }

    // ========================================================================
    // Training
    // ========================================================================

    /// Train on one `(x, y)` sample and return the model's prediction for
    /// `x`, blended from the just-updated fields.
    pub fn update(&mut self, x: &[T], y: &[T]) -> Result<Vec<T>, LwprError> {
        Validator::validate_input(x, self.config.n_in)?;
        Validator::validate_output(y, self.config.n_out)?;

        let xn = self.normalize_input(x);

        let mut y_pred = Vec::with_capacity(self.config.n_out);
        for (dim, sub) in self.subs.iter_mut().enumerate() {
            let yn = y[dim] / self.config.norm_out[dim];
            let pred = sub.update(&xn, yn, &self.config);
            y_pred.push(pred * self.config.norm_out[dim]);
        }

        self.update_input_stats(x);
        self.n_data += 1;
        Ok(y_pred)
    }

    /// Scalar convenience for single-output models.
    pub fn update_scalar(&mut self, x: &[T], y: T) -> Result<T, LwprError> {
        if self.config.n_out != 1 {
            return Err(LwprError::OutputDimension {
                expected: self.config.n_out,
                got: 1,
            });
        }
        Ok(self.update(x, &[y])?[0])
    }

    // ========================================================================
    // Prediction
    // ========================================================================

    /// Read-only prediction for `x`.
    pub fn predict(&self, x: &[T]) -> Result<Vec<T>, LwprError> {
        Validator::validate_input(x, self.config.n_in)?;
        let xn = self.normalize_input(x);
        Ok(self
            .subs
            .iter()
            .enumerate()
            .map(|(dim, sub)| sub.predict(&xn, &self.config) * self.config.norm_out[dim])
            .collect())
    }

    /// Read-only prediction with one confidence band per output dimension.
    pub fn predict_conf(&self, x: &[T]) -> Result<(Vec<T>, Vec<T>), LwprError> {
        Validator::validate_input(x, self.config.n_in)?;
        let xn = self.normalize_input(x);

        let mut y_pred = Vec::with_capacity(self.config.n_out);
        let mut conf = Vec::with_capacity(self.config.n_out);
        for (dim, sub) in self.subs.iter().enumerate() {
            let (y, c) = sub.predict_conf(&xn, &self.config);
            y_pred.push(y * self.config.norm_out[dim]);
            conf.push(c * self.config.norm_out[dim]);
        }
        Ok((y_pred, conf))
    }

    /// Scalar convenience for single-output models.
    pub fn predict_scalar(&self, x: &[T]) -> Result<T, LwprError> {
        if self.config.n_out != 1 {
            return Err(LwprError::OutputDimension {
                expected: self.config.n_out,
                got: 1,
            });
        }
        Ok(self.predict(x)?[0])
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Input dimension.
    #[inline]
    pub fn n_in(&self) -> usize {
        self.config.n_in
    }

    /// Output dimension.
    #[inline]
    pub fn n_out(&self) -> usize {
        self.config.n_out
    }

    /// Total samples trained on.
    #[inline]
    pub fn n_data(&self) -> u64 {
        self.n_data
    }

    /// Receptive field count per output dimension.
    pub fn num_rfs(&self) -> Vec<usize> {
        self.subs.iter().map(SubModel::num_rfs).collect()
    }

    /// Fields pruned per output dimension over the model's lifetime.
    pub fn n_pruned(&self) -> Vec<u64> {
        self.subs.iter().map(SubModel::n_pruned).collect()
    }

    /// Running mean of the raw inputs seen so far.
    #[inline]
    pub fn mean_x(&self) -> &[T] {
        &self.mean_x
    }

    /// Running variance of the raw inputs seen so far.
    #[inline]
    pub fn var_x(&self) -> &[T] {
        &self.var_x
    }

    /// The validated configuration this model runs with.
    #[inline]
    pub fn config(&self) -> &LwprConfig<T> {
        &self.config
    }

    /// Per-output submodels (read-only).
    #[inline]
    pub fn submodels(&self) -> &[SubModel<T>] {
        &self.subs
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn normalize_input(&self, x: &[T]) -> Vec<T> {
        x.iter()
            .zip(self.config.norm_in.iter())
            .map(|(&xi, &ni)| xi / ni)
            .collect()
    }

    fn update_input_stats(&mut self, x: &[T]) {
        let n = T::from(self.n_data + 1).unwrap();
        for i in 0..x.len() {
            let delta = x[i] - self.mean_x[i];
            self.mean_x[i] = self.mean_x[i] + delta / n;
            let delta2 = x[i] - self.mean_x[i];
            self.var_x[i] = self.var_x[i] + (delta * delta2 - self.var_x[i]) / n;
        }
    }
}

// ============================================================================
// Display
// ============================================================================

impl<T: Float> fmt::Display for LwprModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "LWPR model: {} -> {} ({} samples)",
            self.config.n_in, self.config.n_out, self.n_data
        )?;
        for (dim, sub) in self.subs.iter().enumerate() {
            writeln!(
                f,
                "  output {}: {} receptive fields ({} pruned)",
                dim,
                sub.num_rfs(),
                sub.n_pruned()
            )?;
        }
        Ok(())
    }
}
