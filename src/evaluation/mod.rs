//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer turns per-field local models into answers: the weighted blend
//! of active fields' predictions, and the confidence band combining blend
//! disagreement with each field's running leave-one-out error.
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Read-only prediction blending and confidence bands.
pub mod predictor;
