//! Receptive field creation and pruning.
//!
//! ## Purpose
//!
//! This module decides when the roster changes: a field is created when no
//! existing field claims an input strongly enough, and redundant fields are
//! pruned when two of them keep claiming the same recent inputs. Everything
//! else — what happens *inside* a field — belongs to the regression and
//! metric modules.
//!
//! ## Design notes
//!
//! * **Arena discipline**: creation reuses freed slots through the arena;
//!   handles held by callers never dangle.
//! * **Prune evidence**: overlap is judged by recomputing activations on a
//!   bounded ring of recent inputs (the read-only path), so the decision
//!   tracks the metrics as they are now, not as they were when the samples
//!   arrived.
//! * **Coarser loses**: of two overlapping fields the one with the smaller
//!   metric trace (wider footprint) is removed; the finer field subsumes its
//!   information.
//!
//! ## Invariants
//!
//! * Roster size equals creations minus prunings at all times.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::distance::{mahalanobis_sq, mahalanobis_sq_diag};
use crate::math::kernel::Kernel;
use crate::primitives::arena::{RfArena, RfHandle};
use crate::primitives::field::ReceptiveField;

// ============================================================================
// Creation
// ============================================================================

/// Initial matrices shared by every spawned field.
#[derive(Debug, Clone)]
pub struct FieldTemplate<T> {
    /// Initial distance metric (row-major `n_in x n_in`).
    pub init_d: Vec<T>,
    /// Upper Cholesky factor of `init_d`.
    pub init_chol: Vec<T>,
    /// Initial per-parameter learning rates.
    pub init_alpha: Vec<T>,
    /// Seed for the projection variance statistic.
    pub init_s2: T,
    /// Initial forgetting factor.
    pub init_lambda: T,
}

/// Spawn a field centered at `x` for target `y` and add it to the roster.
pub fn add_field<T: Float>(
    arena: &mut RfArena<T>,
    template: &FieldTemplate<T>,
    x: &[T],
    y: T,
) -> RfHandle {
    let n_reg = 2.min(x.len());
    let field = ReceptiveField::spawn(
        x.to_vec(),
        y,
        &template.init_d,
        &template.init_chol,
        &template.init_alpha,
        n_reg,
        template.init_s2,
        template.init_lambda,
    );
    arena.insert(field)
}

// ============================================================================
// Pruning
// ============================================================================

/// Remove redundant fields based on joint activation over recent inputs.
///
/// For every recent input, all fields activated above `w_prune` are mutually
/// redundant; only the finest of them (largest metric trace) survives.
/// Returns the number of fields removed.
pub fn prune<T: Float>(
    arena: &mut RfArena<T>,
    recent: &[Vec<T>],
    w_prune: T,
    kernel: Kernel,
    diag_only: bool,
    diff: &mut Vec<T>,
) -> usize {
    let mut removed = 0;
    let mut active: Vec<RfHandle> = Vec::new();

    for x in recent {
        diff.clear();
        diff.resize(x.len(), T::zero());

        active.clear();
        for (handle, rf) in arena.iter() {
            let q = if diag_only {
                mahalanobis_sq_diag(x, &rf.c, &rf.d_metric, diff)
            } else {
                mahalanobis_sq(x, &rf.c, &rf.d_metric, diff)
            };
            if kernel.weight(q) > w_prune {
                active.push(handle);
            }
        }
        if active.len() < 2 {
            continue;
        }

        // Keep the finest field, drop the rest.
        let finest = active
            .iter()
            .copied()
            .max_by(|&a, &b| {
                let ta = arena.get(a).expect("active handle is live").metric_trace();
                let tb = arena.get(b).expect("active handle is live").metric_trace();
                ta.partial_cmp(&tb).unwrap_or(core::cmp::Ordering::Equal)
            })
            .expect("at least two active fields");
        for handle in active.drain(..) {
            if handle != finest {
                arena.remove(handle).expect("active handle is live");
                removed += 1;
            }
        }
    }
    removed
}

// ============================================================================
// Tests
// ============================================================================
