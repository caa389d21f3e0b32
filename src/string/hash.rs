//! Stable 32-bit content hash
//!
//! A deterministic dual-accumulator hash over the logical code units, fixed
//! across processes and platforms so it can be persisted or sent over the
//! wire. Both accumulators seed at 5381 and take `h = (h << 5) - h + unit`
//! steps; `h1` consumes even logical indices and `h2` odd ones, and the
//! final value is `h1 + h2 * 1566083941`, all wrapping.
//!
//! This is distinct from the `std::hash::Hash` impl, which feeds whatever
//! hasher the collection supplies and makes no stability promise.

use crate::string::fold_upper_invariant;
use crate::string::{BiStr, Units};

const SEED: u32 = 5381;
const COMBINE: u32 = 1_566_083_941;

#[inline]
fn step(h: u32, unit: u16) -> u32 {
    h.wrapping_shl(5).wrapping_sub(h).wrapping_add(unit as u32)
}

fn hash_units(units: Units<'_>, fold: bool) -> u32 {
    let mut h1 = SEED;
    let mut h2 = SEED;
    let mut even = true;
    for mut unit in units.iter() {
        if fold {
            unit = fold_upper_invariant(unit);
        }
        if even {
            h1 = step(h1, unit);
        } else {
            h2 = step(h2, unit);
        }
        even = !even;
    }
    h1.wrapping_add(h2.wrapping_mul(COMBINE))
}

impl BiStr {
    /// Stable content hash over the logical unit sequence.
    ///
    /// Equal strings hash equal regardless of storage encoding, and the
    /// value never changes between runs.
    #[inline]
    pub fn hash_code(&self) -> u32 {
        hash_units(self.units(), false)
    }

    /// Stable content hash after invariant uppercase folding.
    ///
    /// Strings equal under [`eq_ignore_case`](BiStr::eq_ignore_case) produce
    /// the same value.
    #[inline]
    pub fn hash_code_ignore_case(&self) -> u32 {
        hash_units(self.units(), true)
    }
}
