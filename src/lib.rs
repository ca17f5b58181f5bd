//! # LWPR — Locally Weighted Projection Regression for Rust
//!
//! An online, incremental nonparametric regression engine: it learns a
//! smooth nonlinear mapping from a stream of `(input vector, output vector)`
//! samples, updating after every sample with no batch phase, and can answer
//! predictions — with confidence bands — at any point during training.
//!
//! ## What is LWPR?
//!
//! LWPR covers the input space with *receptive fields*: local linear models,
//! each with a center and an adaptive distance metric that shapes its
//! footprint. Inside every field an incremental partial-least-squares (PLS)
//! regressor fits a local hyperplane through a handful of projection
//! directions, so no matrix is ever inverted — cost per update is linear in
//! the input dimension. Each update also yields a *leave-one-out* residual
//! (the error the field would have made had the sample not been folded in),
//! which drives gradient-based adaptation of the field's distance metric.
//! Fields are created where no existing field claims an input and pruned
//! when two of them keep claiming the same inputs.
//!
//! **Key properties:**
//! - Purely online: one pass, one sample at a time, bounded per-update cost
//! - Local models come and go as the data distribution demands
//! - Distance metrics adapt, so field footprints track local curvature
//! - Confidence bands from blend disagreement plus per-field LOO error
//! - Full model state round-trips through versioned serialization
//!
//! **Typical applications:**
//! - Inverse dynamics/kinematics learning in robot control
//! - Adaptive process models that must track drift in real time
//! - Any regression problem where data arrive as an endless stream
//!
//! ## Quick Start
//!
//! ```rust
//! use lwpr_rs::prelude::*;
//!
//! // Kernel and metric shape are required; everything else has defaults.
//! let mut model = Lwpr::new(1, 1)
//!     .kernel(Gaussian)
//!     .metric_shape(Diagonal)
//!     .init_metric_spherical(20.0)
//!     .init_alpha(40.0)
//!     .build()?;
//!
//! // Train on a stream.
//! for i in 0..200 {
//!     let x = (i % 20) as f64 / 2.0;
//!     let y = (x * 0.8).sin();
//!     model.update_scalar(&[x], y)?;
//! }
//!
//! // Predict anywhere, any time.
//! let y = model.predict_scalar(&[3.3])?;
//! assert!(y.is_finite());
//!
//! // Or with a confidence band.
//! let (y_pred, conf) = model.predict_conf(&[3.3])?;
//! assert_eq!(y_pred.len(), 1);
//! assert!(conf[0] >= 0.0);
//! # Result::<(), LwprError>::Ok(())
//! ```
//!
//! ## Multi-Output Models
//!
//! A model with `n_out > 1` keeps one fully independent submodel (field
//! roster, counters, statistics) per output dimension; nothing is shared
//! across that boundary.
//!
//! ```rust
//! use lwpr_rs::prelude::*;
//!
//! let mut model = Lwpr::new(2, 2)
//!     .kernel(Gaussian)
//!     .metric_shape(Full)
//!     .init_metric_spherical(30.0)
//!     .build()?;
//!
//! let y_pred = model.update(&[0.1, -0.4], &[1.0, 2.0])?;
//! assert_eq!(y_pred.len(), 2);
//! assert_eq!(model.num_rfs(), vec![1, 1]);
//! # Result::<(), LwprError>::Ok(())
//! ```
//!
//! ## Parameters
//!
//! | Parameter            | Default    | Range      | Description                                  |
//! |----------------------|------------|------------|----------------------------------------------|
//! | **kernel**           | *required* | 2 shapes   | Activation falloff (`Gaussian`, `BiSquare`)  |
//! | **metric_shape**     | *required* | 2 shapes   | `Diagonal` or `Full` adaptive metric         |
//! | **init_metric**      | `25 · I`   | PD matrix  | Initial footprint (larger = narrower fields) |
//! | **init_alpha**       | `250`      | > 0        | Initial metric learning rates                |
//! | **update_metric**    | `true`     | bool       | Enable metric adaptation                     |
//! | **meta**             | `false`    | bool       | Second-order rate scaling layer              |
//! | **meta_rate**        | `250`      | > 0        | Strength of the meta layer                   |
//! | **penalty**          | `1e-6`     | >= 0       | Complexity penalty on metric magnitude       |
//! | **w_gen**            | `0.1`      | (0, 1]     | Spawn a field below this max activation      |
//! | **w_prune**          | `0.9`      | (0, 1]     | Joint activation marking redundancy          |
//! | **w_cutoff**         | `0.001`    | (0, 1)     | Activation below which fields sit out        |
//! | **init_lambda**      | `0.999`    | (0, 1]     | Initial forgetting factor                    |
//! | **final_lambda**     | `0.9999`   | (0, 1]     | Forgetting factor annealing target           |
//! | **tau_lambda**       | `0.9999`   | (0, 1]     | Annealing time constant                      |
//! | **init_s2**          | `1e-10`    | > 0        | Seed for projection variance statistics      |
//! | **add_threshold**    | `0.5`      | (0, 1]     | LOO-error ratio gating direction growth      |
//! | **prune_interval**   | `100`      | >= 1       | Updates between prune scans                  |
//! | **norm_in/norm_out** | all ones   | > 0        | Componentwise input/output scaling           |
//!
//! ## Error Handling
//!
//! Every fallible call returns `Result<_, LwprError>`. Dimension or
//! non-finite input errors are raised *before* any state mutates, so a
//! failed call leaves the model untouched. Invalid configuration never
//! builds. Near-zero denominators inside an update are absorbed — that one
//! direction or metric parameter skips a sample and the stream continues.
//!
//! ```rust
//! use lwpr_rs::prelude::*;
//!
//! let mut model = Lwpr::new(2, 1)
//!     .kernel(Gaussian)
//!     .metric_shape(Diagonal)
//!     .build()?;
//!
//! // Wrong input length: rejected atomically.
//! let err = model.update(&[1.0, 2.0, 3.0], &[0.0]).unwrap_err();
//! assert_eq!(err, LwprError::InputDimension { expected: 2, got: 3 });
//! assert_eq!(model.n_data(), 0);
//! # Result::<(), LwprError>::Ok(())
//! ```
//!
//! ## Persistence
//!
//! The full model state — configuration plus every field's metric,
//! directions, coefficients, sufficient statistics, and counters — saves to
//! a versioned string and loads back ready to resume training.
//!
//! ```rust
//! use lwpr_rs::prelude::*;
//!
//! let mut model = Lwpr::new(1, 1)
//!     .kernel(Gaussian)
//!     .metric_shape(Diagonal)
//!     .build()?;
//! model.update_scalar(&[0.5], 1.0)?;
//!
//! let saved = model.save_to_string()?;
//! let restored: LwprModel<f64> = LwprModel::load_from_str(&saved)?;
//! assert_eq!(restored.n_data(), 1);
//! # Result::<(), LwprError>::Ok(())
//! ```
//!
//! ## Concurrency
//!
//! A submodel's statistics are update-order dependent, so each output
//! dimension's stream is strictly sequential — that is inherent to the
//! algorithm. Submodels share nothing and may be driven in parallel across
//! the output-dimension boundary. Nothing in the update/predict path blocks
//! or performs I/O; persistence is an explicit checkpoint outside it.
//!
//! ## References
//!
//! - Vijayakumar, S., D'Souza, A. & Schaal, S. (2005). "Incremental Online
//!   Learning in High Dimensions". Neural Computation 17(12).
//! - Klanke, S., Vijayakumar, S. & Schaal, S. (2008). "A Library for
//!   Locally Weighted Projection Regression". JMLR 9.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - errors, receptive field state, arena storage.
mod primitives;

// Layer 2: Math - kernels, Mahalanobis distance, linalg bridge,
// compensated summation.
mod math;

// Layer 3: Algorithms - incremental PLS regression, metric adaptation,
// field creation and pruning.
mod algorithms;

// Layer 4: Evaluation - read-only prediction blending and confidence.
mod evaluation;

// Layer 5: Engine - configuration, validation, workspace, SubModel/Model.
mod engine;

// Layer 6: Persistence - versioned serialized model state.
#[cfg(feature = "std")]
mod persistence;

// High-level fluent API.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard LWPR prelude.
///
/// This module is intended to be wildcard-imported for convenient access to
/// the most commonly used types:
///
/// ```
/// use lwpr_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        Kernel::{self, BiSquare, Gaussian},
        LwprBuilder as Lwpr,
        LwprConfig, LwprError, LwprModel,
        MetricShape::{self, Diagonal, Full},
        SubModel,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for white-box tests. It is only
/// available with the `dev` feature enabled.
///
/// **Warning**: these are implementation details and may change without
/// notice. Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal learning rules.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal evaluation and blending.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
