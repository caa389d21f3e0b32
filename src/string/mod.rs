//! Immutable dual-encoding string type and its engines
//!
//! [`BiStr`] is the core type; the engines live in sibling modules and hang
//! their operations off it: code-unit and substring search, mutate-as-new
//! operations, splitting, ordinal comparison and the stable content hash.
//! Everything operates on the logical unit sequence, so results never depend
//! on which physical encoding an operand happens to use.

pub(crate) mod bi_str;
pub(crate) mod compare;
mod hash;
mod ops;
mod search;
mod split;

pub use bi_str::{BiStr, UnitIter, Units};
pub use compare::{
    compare_ordinal, compare_ordinal_ignore_case, compare_ordinal_ignore_case_in,
    compare_ordinal_in, compare_ordinal_opt,
};
pub use split::SplitOptions;

// Invariant case folds over single code units. ASCII folds directly; other
// BMP units take the one-to-one simple mapping and pass through when the
// full mapping is multi-unit or leaves the BMP. Surrogate halves are never
// folded.
pub(crate) fn fold_upper_invariant(unit: u16) -> u16 {
    if unit < 0x80 {
        return (unit as u8).to_ascii_uppercase() as u16;
    }
    if (0xD800..=0xDFFF).contains(&unit) {
        return unit;
    }
    match char::from_u32(unit as u32) {
        Some(c) => {
            let mut mapped = c.to_uppercase();
            match (mapped.next(), mapped.next()) {
                (Some(up), None) if (up as u32) <= 0xFFFF => up as u16,
                _ => unit,
            }
        }
        None => unit,
    }
}

pub(crate) fn fold_lower_invariant(unit: u16) -> u16 {
    if unit < 0x80 {
        return (unit as u8).to_ascii_lowercase() as u16;
    }
    if (0xD800..=0xDFFF).contains(&unit) {
        return unit;
    }
    match char::from_u32(unit as u32) {
        Some(c) => {
            let mut mapped = c.to_lowercase();
            match (mapped.next(), mapped.next()) {
                (Some(low), None) if (low as u32) <= 0xFFFF => low as u16,
                _ => unit,
            }
        }
        None => unit,
    }
}

/// Whitespace classification over a single code unit
#[inline]
pub(crate) fn is_white_space(unit: u16) -> bool {
    char::from_u32(unit as u32).is_some_and(char::is_whitespace)
}
