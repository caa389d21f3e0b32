//! Storage encoding selection
//!
//! Every [`BiStr`](crate::BiStr) instance stores its payload in one of two
//! encodings, fixed at construction: a compact one-byte-per-unit form that is
//! only valid for ASCII content, and a wide two-byte-per-unit form for
//! everything else. The functions here implement the selection policy:
//! compact is chosen iff every code unit involved fits in `0..=0x7F`, and
//! combining anything with a wide operand conservatively stays wide unless
//! the caller explicitly opts into a demotion re-scan.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest code unit representable in the compact encoding
pub const COMPACT_MAX: u16 = 0x7F;

/// Per-instance storage encoding of a string payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Encoding {
    /// One byte per code unit; every unit is ≤ 0x7F
    Compact,
    /// Two bytes per code unit; the general-purpose fallback
    Wide,
}

impl Encoding {
    /// Bytes of payload per logical code unit
    #[inline]
    pub const fn bytes_per_unit(self) -> usize {
        match self {
            Encoding::Compact => 1,
            Encoding::Wide => 2,
        }
    }

    /// Combine the encodings of two operands without re-scanning content.
    ///
    /// Compact is contagious downward: two compact operands yield a compact
    /// result; anything touching a wide operand stays wide.
    #[inline]
    pub const fn combine(self, other: Encoding) -> Encoding {
        match (self, other) {
            (Encoding::Compact, Encoding::Compact) => Encoding::Compact,
            _ => Encoding::Wide,
        }
    }
}

/// Whether a single code unit is representable in the compact encoding
#[inline]
pub const fn unit_is_compact(unit: u16) -> bool {
    unit <= COMPACT_MAX
}

/// Select the encoding for a run of code units.
///
/// Compact iff every unit is ASCII-representable.
#[inline]
pub fn select_for_units(units: &[u16]) -> Encoding {
    if units.iter().all(|&u| unit_is_compact(u)) {
        Encoding::Compact
    } else {
        Encoding::Wide
    }
}

/// Combine the encodings of an operand sequence without re-scanning.
#[inline]
pub fn combine_all<I: IntoIterator<Item = Encoding>>(encodings: I) -> Encoding {
    encodings
        .into_iter()
        .fold(Encoding::Compact, Encoding::combine)
}
