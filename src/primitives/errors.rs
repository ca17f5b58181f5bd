//! Error types for LWPR model construction, training, and persistence.
//!
//! ## Purpose
//!
//! This module defines the crate-wide error enum. Errors fall into four
//! classes: dimension/input errors (surfaced before any state mutation),
//! configuration errors (rejected when the model is built), persistence
//! errors (fatal to a single load call), and degenerate numeric updates —
//! which are *not* represented here because they are absorbed inside the
//! update routines: a near-zero denominator skips that single direction or
//! metric parameter and the stream continues.
//!
//! ## Design notes
//!
//! * **Atomicity**: input validation errors are raised before any counter or
//!   statistic is touched, so a failed call leaves the model unchanged.
//! * **Granularity**: configuration problems carry the offending parameter
//!   name and value so callers can report them directly.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use thiserror::Error;

// ============================================================================
// Error Enum
// ============================================================================

/// Errors reported by LWPR model construction, training, and persistence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LwprError {
    // ------------------------------------------------------------------
    // Input / dimension errors (checked before any mutation)
    // ------------------------------------------------------------------
    /// Input vector length does not match the model's input dimension.
    #[error("input vector has length {got}, expected {expected}")]
    InputDimension {
        /// Expected input dimension.
        expected: usize,
        /// Actual length supplied.
        got: usize,
    },

    /// Output vector length does not match the model's output dimension.
    #[error("output vector has length {got}, expected {expected}")]
    OutputDimension {
        /// Expected output dimension.
        expected: usize,
        /// Actual length supplied.
        got: usize,
    },

    /// An input or output component is NaN or infinite.
    #[error("non-finite value in {name}[{index}]")]
    NonFiniteInput {
        /// Which vector contained the value ("x" or "y").
        name: &'static str,
        /// Component index.
        index: usize,
    },

    // ------------------------------------------------------------------
    // Configuration errors (rejected at build time)
    // ------------------------------------------------------------------
    /// The supplied initial distance metric is not positive-definite.
    #[error("initial distance metric is not positive-definite")]
    MetricNotPositiveDefinite,

    /// No kernel shape was configured; it must be chosen explicitly.
    #[error("kernel shape must be configured explicitly (Gaussian or BiSquare)")]
    MissingKernel,

    /// No metric shape was configured; it must be chosen explicitly.
    #[error("metric shape must be configured explicitly (Diagonal or Full)")]
    MissingMetricShape,

    /// A threshold parameter is outside its valid range.
    #[error("invalid {name}={value}: must lie in {range}")]
    InvalidThreshold {
        /// Parameter name (`w_gen`, `w_prune`, `w_cutoff`, `add_threshold`).
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Human-readable valid range.
        range: &'static str,
    },

    /// A forgetting-factor parameter is outside (0, 1].
    #[error("invalid forgetting factor {name}={value}: must lie in (0, 1]")]
    InvalidForgetting {
        /// Parameter name (`init_lambda`, `final_lambda`, `tau_lambda`).
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// An initial learning rate is not strictly positive and finite.
    #[error("invalid learning rate {value}: must be finite and > 0")]
    InvalidLearningRate {
        /// Offending value.
        value: f64,
    },

    /// The complexity penalty coefficient is negative or non-finite.
    #[error("invalid penalty coefficient {value}: must be finite and >= 0")]
    InvalidPenalty {
        /// Offending value.
        value: f64,
    },

    /// A normalization factor is not strictly positive and finite.
    #[error("invalid normalization factor at component {index}: must be finite and > 0")]
    InvalidNormalization {
        /// Component index of the offending factor.
        index: usize,
    },

    /// The prune cadence must be at least 1 update.
    #[error("prune interval must be at least 1")]
    InvalidPruneInterval,

    /// The model must have at least one input and one output dimension.
    #[error("model dimensions must be at least 1x1, got {n_in}x{n_out}")]
    InvalidModelShape {
        /// Configured input dimension.
        n_in: usize,
        /// Configured output dimension.
        n_out: usize,
    },

    /// A builder parameter was set more than once.
    #[error("parameter '{parameter}' was set more than once")]
    DuplicateParameter {
        /// Name of the duplicated parameter.
        parameter: &'static str,
    },

    // ------------------------------------------------------------------
    // Persistence errors (fatal to the load call only)
    // ------------------------------------------------------------------
    /// The saved state could not be parsed.
    #[error("malformed saved model state: {0}")]
    PersistenceFormat(String),

    /// The saved state uses an unsupported format version.
    #[error("saved model uses format version {found}, this build supports {supported}")]
    UnsupportedVersion {
        /// Version found in the saved state.
        found: u32,
        /// Version this build reads and writes.
        supported: u32,
    },
}
