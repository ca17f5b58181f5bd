//! Reusable scratch buffers for the update path.
//!
//! ## Purpose
//!
//! Every training update touches every active field with small vector
//! computations. This module aggregates the per-submodel scratch storage so
//! the hot path reuses buffers instead of allocating per sample. The
//! workspace carries no model state and is never serialized; a deserialized
//! submodel starts with a fresh one.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::metric::MetricScratch;
use crate::algorithms::regression::PlsScratch;
use crate::primitives::arena::RfHandle;

// ============================================================================
// Workspace
// ============================================================================

/// Per-submodel scratch storage for one update.
#[derive(Debug, Clone)]
pub struct Workspace<T> {
    /// Regression scratch.
    pub pls: PlsScratch<T>,
    /// Metric adaptation scratch.
    pub metric: MetricScratch<T>,
    /// `x - c` buffer for activation computation.
    pub diff: Vec<T>,
    /// Activation sweep results: (field, squared distance, weight).
    pub activations: Vec<(RfHandle, T, T)>,
}

impl<T> Default for Workspace<T> {
    fn default() -> Self {
        Self {
            pls: PlsScratch::default(),
            metric: MetricScratch::default(),
            diff: Vec::new(),
            activations: Vec::new(),
        }
    }
}

impl<T: Float> Workspace<T> {
    /// Prepare the buffers for an update with `n_in` input components.
    pub fn reset(&mut self, n_in: usize) {
        self.diff.clear();
        self.diff.resize(n_in, T::zero());
        self.activations.clear();
    }
}
