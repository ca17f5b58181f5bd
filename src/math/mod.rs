//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout LWPR:
//! - Kernel functions mapping squared distances to activation weights
//! - Mahalanobis distance and metric (Cholesky) manipulation
//! - The nalgebra bridge for positive-definiteness checks and factorization
//! - Compensated (Kahan) summation for long-running accumulations
//!
//! These are reusable mathematical building blocks with no algorithm-specific
//! logic.
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
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Kernel (activation) functions and their derivatives.
pub mod kernel;

/// Mahalanobis distance and metric reconstruction.
pub mod distance;

/// Linear algebra backend bridge (Cholesky via nalgebra).
pub mod linalg;

/// Compensated summation.
pub mod accum;
