//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the learning loop:
//! - The validated configuration and its checked construction
//! - Input validation
//! - Reusable scratch workspace
//! - The per-output SubModel update/predict drivers
//! - The Model that fans samples out across output dimensions
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Persistence
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Validated model configuration.
pub mod config;

/// Input and configuration validation.
pub mod validator;

/// Reusable scratch buffers.
pub mod workspace;

/// Per-output-dimension learning state.
pub mod submodel;

/// The multi-output model driver.
pub mod model;
