//! Engine configuration
//!
//! A small knob surface for the operations whose behavior is policy rather
//! than semantics: how aggressively results are demoted back to the compact
//! encoding, and how many match offsets the single-allocation replace path
//! stages before falling back to streaming. All operations have
//! config-free variants that use [`EngineConfig::default`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{BiStrError, Result};

/// How combining operations pick the result encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EncodingPolicy {
    /// Combine operand encodings without re-scanning content: any wide
    /// operand makes the result wide, even when the surviving units are
    /// all ASCII.
    #[default]
    Preserve,
    /// Re-scan the produced units and demote to compact when every unit is
    /// ASCII. Costs one extra pass, keeps storage minimal.
    DemoteRescan,
}

/// Tunables carried by the `*_with` operation variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Result-encoding policy for combining operations
    pub encoding_policy: EncodingPolicy,
    /// Match offsets staged on the fast replace path before switching to the
    /// streaming fallback. Must be non-zero.
    pub replace_offset_cap: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            encoding_policy: EncodingPolicy::Preserve,
            replace_offset_cap: 200,
        }
    }
}

impl EngineConfig {
    /// Check the configuration for values the engine cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.replace_offset_cap == 0 {
            return Err(BiStrError::invalid_argument(
                "replace_offset_cap",
                "must be non-zero",
            ));
        }
        Ok(())
    }
}
