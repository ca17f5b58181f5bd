//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the fundamental data structures of the model:
//! - The crate-wide error enum
//! - The receptive field (local model state)
//! - The arena that owns the fields of one output dimension
//!
//! These carry no update logic; the rules that move them live in the
//! `algorithms` layer.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Persistence
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Crate-wide error enum.
pub mod errors;

/// Receptive field state.
pub mod field;

/// Arena storage with stable handles for receptive fields.
pub mod arena;
