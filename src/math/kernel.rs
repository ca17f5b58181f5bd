//! Kernel functions mapping squared distances to activation weights.
//!
//! ## Purpose
//!
//! A receptive field claims an input through a kernel evaluated on the squared
//! Mahalanobis distance `q = (x-c)ᵀ D (x-c)`. This module provides the two
//! supported kernel shapes together with their first and second derivatives
//! with respect to `q`, which the metric adaptation needs for its chain rule
//! and step bounding.
//!
//! ## Invariants
//!
//! * Weights lie in [0, 1], with `weight(0) == 1`.
//! * Weights are non-increasing in `q`.
//!
//! ## Non-goals
//!
//! * This module does not compute distances; see [`crate::math::distance`].

// External dependencies
use num_traits::Float;
use serde::{Deserialize, Serialize};

// ============================================================================
// Kernel Enum
// ============================================================================

/// Kernel shape for receptive field activation.
///
/// There is deliberately no default: the shape must be configured explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kernel {
    /// Gaussian falloff: `w = exp(-q/2)`. Infinite support.
    Gaussian,

    /// Bisquare falloff: `w = (1 - q/4)²` for `q < 4`, else 0. Compact support.
    BiSquare,
}

impl Kernel {
    /// Activation weight for squared distance `q >= 0`.
    #[inline]
    pub fn weight<T: Float>(self, q: T) -> T {
        match self {
            Kernel::Gaussian => {
                let half = T::from(0.5).unwrap();
                (-half * q).exp()
            }
            Kernel::BiSquare => {
                let quarter = T::from(0.25).unwrap();
                let v = T::one() - quarter * q;
                if v > T::zero() {
                    v * v
                } else {
                    T::zero()
                }
            }
        }
    }

    /// First derivative `dw/dq`.
    #[inline]
    pub fn dweight_dq<T: Float>(self, q: T) -> T {
        let half = T::from(0.5).unwrap();
        match self {
            Kernel::Gaussian => -half * self.weight(q),
            Kernel::BiSquare => {
                let quarter = T::from(0.25).unwrap();
                let v = T::one() - quarter * q;
                if v > T::zero() {
                    -half * v
                } else {
                    T::zero()
                }
            }
        }
    }

    /// Second derivative `d²w/dq²`, used to bound adaptation steps.
    #[inline]
    pub fn d2weight_dq2<T: Float>(self, q: T) -> T {
        match self {
            Kernel::Gaussian => T::from(0.25).unwrap() * self.weight(q),
            Kernel::BiSquare => {
                let quarter = T::from(0.25).unwrap();
                if T::one() - quarter * q > T::zero() {
                    T::from(0.125).unwrap()
                } else {
                    T::zero()
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
