//! Layer 6: Persistence
//!
//! # Purpose
//!
//! Versioned serialization of full model state — configuration plus every
//! submodel's complete field roster (metrics, directions, coefficients,
//! sufficient statistics, counters) — sufficient to resume training
//! equivalently to the live model. The concrete encoding is JSON through
//! serde; the contract is the round trip, not the syntax.
//!
//! # Design notes
//!
//! * **Checkpoint, not hot path**: saving and loading are explicit
//!   operations outside the update/predict path.
//! * **Version envelope**: the payload is wrapped with a `format_version`
//!   field checked before the full parse, so a future format bump fails
//!   loudly instead of misparsing.
//! * **Isolation**: a malformed document fails that load call only; it can
//!   never corrupt an already-live model.

// External dependencies
use num_traits::Float;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::engine::model::LwprModel;
use crate::primitives::errors::LwprError;

/// Format version written by this build; loads of any other version fail.
pub const FORMAT_VERSION: u32 = 1;

// ============================================================================
// Envelope
// ============================================================================

#[derive(Serialize)]
#[serde(bound(serialize = "T: Serialize"))]
struct EnvelopeRef<'a, T> {
    format_version: u32,
    model: &'a LwprModel<T>,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    #[allow(dead_code)]
    format_version: u32,
    model: LwprModel<T>,
}

#[derive(Deserialize)]
struct VersionProbe {
    format_version: u32,
}

// ============================================================================
// Save / Load
// ============================================================================

impl<T: Float + Serialize + DeserializeOwned> LwprModel<T> {
    /// Serialize the full model state to a versioned string.
    pub fn save_to_string(&self) -> Result<String, LwprError> {
        serde_json::to_string(&EnvelopeRef {
            format_version: FORMAT_VERSION,
            model: self,
        })
        .map_err(|e| LwprError::PersistenceFormat(e.to_string()))
    }

    /// Rebuild a model from a string produced by
    /// [`save_to_string`](Self::save_to_string).
    pub fn load_from_str(saved: &str) -> Result<Self, LwprError> {
        let probe: VersionProbe = serde_json::from_str(saved)
            .map_err(|e| LwprError::PersistenceFormat(e.to_string()))?;
        if probe.format_version != FORMAT_VERSION {
            return Err(LwprError::UnsupportedVersion {
                found: probe.format_version,
                supported: FORMAT_VERSION,
            });
        }
        let envelope: Envelope<T> = serde_json::from_str(saved)
            .map_err(|e| LwprError::PersistenceFormat(e.to_string()))?;
        Ok(envelope.model)
    }
}
