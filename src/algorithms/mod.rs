//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer contains the learning rules that move receptive field state:
//! - Incremental partial-least-squares regression with its leave-one-out
//!   residual signal
//! - Gradient-based distance-metric adaptation
//! - Field creation and redundancy pruning
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Incremental PLS regression inside one receptive field.
pub mod regression;

/// Gradient-based distance-metric adaptation.
pub mod metric;

/// Receptive field creation and pruning.
pub mod manager;
