//! Ordinal comparison engine
//!
//! Comparisons are ordinal over logical code units: the first differing unit
//! decides, otherwise the shorter string sorts first. Encoding never enters
//! the result. The case-insensitive variants fold through the invariant
//! mappings only when a unit pair mismatches, so the common equal-prefix
//! path pays nothing.

use std::cmp::Ordering;

use crate::error::{check_window, Result};
use crate::string::fold_lower_invariant;
use crate::string::{BiStr, Units};

fn compare_units(a: Units<'_>, b: Units<'_>, fold: bool) -> Ordering {
    let common = a.len().min(b.len());
    for i in 0..common {
        let (mut x, mut y) = match (a.get(i), b.get(i)) {
            (Some(x), Some(y)) => (x, y),
            _ => break,
        };
        if x != y && fold {
            x = fold_lower_invariant(x);
            y = fold_lower_invariant(y);
        }
        match x.cmp(&y) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// Ordinal comparison of two strings
pub fn compare_ordinal(a: &BiStr, b: &BiStr) -> Ordering {
    if a.ptr_eq(b) {
        return Ordering::Equal;
    }
    compare_units(a.units(), b.units(), false)
}

/// Ordinal comparison folding mismatching units to invariant lowercase
pub fn compare_ordinal_ignore_case(a: &BiStr, b: &BiStr) -> Ordering {
    if a.ptr_eq(b) {
        return Ordering::Equal;
    }
    compare_units(a.units(), b.units(), true)
}

/// Ordinal comparison with absent-operand rules: an absent string sorts
/// before any present one, and two absent strings are equal.
pub fn compare_ordinal_opt(a: Option<&BiStr>, b: Option<&BiStr>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_ordinal(a, b),
    }
}

fn compare_windows(
    a: &BiStr,
    a_start: usize,
    a_count: usize,
    b: &BiStr,
    b_start: usize,
    b_count: usize,
    fold: bool,
) -> Result<Ordering> {
    check_window(a_start, a_count, a.len())?;
    check_window(b_start, b_count, b.len())?;
    if a.ptr_eq(b) && a_start == b_start && a_count == b_count {
        return Ok(Ordering::Equal);
    }
    Ok(compare_units(
        a.units().slice(a_start, a_count),
        b.units().slice(b_start, b_count),
        fold,
    ))
}

/// Ordinal comparison of two string windows
pub fn compare_ordinal_in(
    a: &BiStr,
    a_start: usize,
    a_count: usize,
    b: &BiStr,
    b_start: usize,
    b_count: usize,
) -> Result<Ordering> {
    compare_windows(a, a_start, a_count, b, b_start, b_count, false)
}

/// Case-insensitive ordinal comparison of two string windows
pub fn compare_ordinal_ignore_case_in(
    a: &BiStr,
    a_start: usize,
    a_count: usize,
    b: &BiStr,
    b_start: usize,
    b_count: usize,
) -> Result<Ordering> {
    compare_windows(a, a_start, a_count, b, b_start, b_count, true)
}

impl BiStr {
    /// True if `self` and `other` are equal after invariant case folding
    #[inline]
    pub fn eq_ignore_case(&self, other: &BiStr) -> bool {
        self.len() == other.len() && compare_ordinal_ignore_case(self, other) == Ordering::Equal
    }
}
