//! Arena storage for receptive fields.
//!
//! ## Purpose
//!
//! Receptive fields are created and destroyed at runtime in irregular
//! patterns. This module provides a slab arena with a free-list so that
//! handles held elsewhere (e.g. during pruning comparisons) stay valid:
//! removing a field never shifts the others, and a freed slot is only reused
//! through an explicit insert.
//!
//! ## Key concepts
//!
//! * **Handle**: a stable index into the slab. Handles are only produced by
//!   `insert` and invalidated by `remove`.
//! * **Creation order**: a separate order list preserves insertion order for
//!   deterministic iteration, independent of slot reuse.
//!
//! ## Invariants
//!
//! * `len()` equals inserts minus removes.
//! * The order list contains exactly the live handles, oldest first.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::primitives::field::ReceptiveField;

// ============================================================================
// Handle
// ============================================================================

/// Stable handle to a receptive field inside an arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RfHandle(pub(crate) usize);

impl RfHandle {
    /// Raw slot index (stable for the lifetime of the field).
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

// ============================================================================
// Arena
// ============================================================================

/// Slab arena of receptive fields with free-list slot reuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct RfArena<T> {
    slots: Vec<Option<ReceptiveField<T>>>,
    free: Vec<usize>,
    order: Vec<usize>,
}

impl<T> Default for RfArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RfArena<T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Number of live fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when the arena holds no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Insert a field, reusing a freed slot when one is available.
    pub fn insert(&mut self, field: ReceptiveField<T>) -> RfHandle {
        let idx = match self.free.pop() {
            Some(idx) => {
                debug_assert!(self.slots[idx].is_none());
                self.slots[idx] = Some(field);
                idx
            }
            None => {
                self.slots.push(Some(field));
                self.slots.len() - 1
            }
        };
        self.order.push(idx);
        RfHandle(idx)
    }

    /// Remove a field, returning it. The slot goes onto the free-list.
    pub fn remove(&mut self, handle: RfHandle) -> Option<ReceptiveField<T>> {
        let field = self.slots.get_mut(handle.0)?.take()?;
        self.free.push(handle.0);
        self.order.retain(|&idx| idx != handle.0);
        Some(field)
    }

    /// Borrow a field by handle.
    #[inline]
    pub fn get(&self, handle: RfHandle) -> Option<&ReceptiveField<T>> {
        self.slots.get(handle.0).and_then(|s| s.as_ref())
    }

    /// Mutably borrow a field by handle.
    #[inline]
    pub fn get_mut(&mut self, handle: RfHandle) -> Option<&mut ReceptiveField<T>> {
        self.slots.get_mut(handle.0).and_then(|s| s.as_mut())
    }

    /// Fields in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (RfHandle, &ReceptiveField<T>)> {
        self.order.iter().map(move |&idx| {
            let field = self.slots[idx]
                .as_ref()
                .expect("order list only holds live slots");
            (RfHandle(idx), field)
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
