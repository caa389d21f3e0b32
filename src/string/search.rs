//! Search engine: unit, needle-set and substring scans
//!
//! All searches run over the logical code-unit sequence, so results are
//! independent of how either operand is stored. Positions come back as
//! `Option<usize>`; the `*_in` variants take an explicit window and validate
//! it up front, returning `Err` for a bad window and `Ok(None)` for a clean
//! miss.
//!
//! Forward windows are `(start, count)` scanning upward; backward windows
//! scan downward from `start` inclusive over `count` positions.

use crate::error::{check_backward_window, check_window, Result};
use crate::string::fold_upper_invariant;
use crate::string::{BiStr, Units};

// Single-unit scan, width-specialized. The wide loop is unrolled by eight;
// one-byte payloads get the slice scan the optimizer already vectorizes.
fn scan_unit_forward(units: Units<'_>, unit: u16) -> Option<usize> {
    match units {
        Units::Compact(s) => {
            if unit > 0x7F {
                return None;
            }
            let b = unit as u8;
            s.iter().position(|&x| x == b)
        }
        Units::Wide(s) => {
            let mut i = 0;
            let end8 = s.len() & !7;
            while i < end8 {
                if s[i] == unit {
                    return Some(i);
                }
                if s[i + 1] == unit {
                    return Some(i + 1);
                }
                if s[i + 2] == unit {
                    return Some(i + 2);
                }
                if s[i + 3] == unit {
                    return Some(i + 3);
                }
                if s[i + 4] == unit {
                    return Some(i + 4);
                }
                if s[i + 5] == unit {
                    return Some(i + 5);
                }
                if s[i + 6] == unit {
                    return Some(i + 6);
                }
                if s[i + 7] == unit {
                    return Some(i + 7);
                }
                i += 8;
            }
            while i < s.len() {
                if s[i] == unit {
                    return Some(i);
                }
                i += 1;
            }
            None
        }
    }
}

fn scan_unit_backward(units: Units<'_>, unit: u16) -> Option<usize> {
    match units {
        Units::Compact(s) => {
            if unit > 0x7F {
                return None;
            }
            let b = unit as u8;
            s.iter().rposition(|&x| x == b)
        }
        Units::Wide(s) => {
            let mut i = s.len();
            while i >= 8 {
                i -= 8;
                if s[i + 7] == unit {
                    return Some(i + 7);
                }
                if s[i + 6] == unit {
                    return Some(i + 6);
                }
                if s[i + 5] == unit {
                    return Some(i + 5);
                }
                if s[i + 4] == unit {
                    return Some(i + 4);
                }
                if s[i + 3] == unit {
                    return Some(i + 3);
                }
                if s[i + 2] == unit {
                    return Some(i + 2);
                }
                if s[i + 1] == unit {
                    return Some(i + 1);
                }
                if s[i] == unit {
                    return Some(i);
                }
            }
            while i > 0 {
                i -= 1;
                if s[i] == unit {
                    return Some(i);
                }
            }
            None
        }
    }
}

// Needle-set scan with a band pre-filter: units outside the [lowest,
// highest] range of the set are rejected before the membership test.
fn scan_any(units: Units<'_>, needles: &[u16], backward: bool) -> Option<usize> {
    match needles {
        [] => None,
        [single] => {
            if backward {
                scan_unit_backward(units, *single)
            } else {
                scan_unit_forward(units, *single)
            }
        }
        _ => {
            let mut lowest = u16::MAX;
            let mut highest = 0u16;
            for &n in needles {
                lowest = lowest.min(n);
                highest = highest.max(n);
            }
            let hit = |u: u16| u >= lowest && u <= highest && needles.contains(&u);
            if backward {
                (0..units.len()).rev().find(|&i| {
                    let u = match units.get(i) {
                        Some(u) => u,
                        None => return false,
                    };
                    hit(u)
                })
            } else {
                (0..units.len()).find(|&i| {
                    let u = match units.get(i) {
                        Some(u) => u,
                        None => return false,
                    };
                    hit(u)
                })
            }
        }
    }
}

// Substring match test at one haystack position, widening both sides so
// every encoding pairing runs through the same comparison.
#[inline]
fn needle_matches_at(hay: Units<'_>, at: usize, needle: Units<'_>, fold: bool) -> bool {
    for j in 0..needle.len() {
        let (mut h, mut n) = match (hay.get(at + j), needle.get(j)) {
            (Some(h), Some(n)) => (h, n),
            _ => return false,
        };
        if fold {
            h = fold_upper_invariant(h);
            n = fold_upper_invariant(n);
        }
        if h != n {
            return false;
        }
    }
    true
}

fn scan_needle_forward(
    hay: Units<'_>,
    start: usize,
    count: usize,
    needle: Units<'_>,
    fold: bool,
) -> Option<usize> {
    let nlen = needle.len();
    if count < nlen {
        return None;
    }
    if nlen == 0 {
        return Some(start);
    }
    // Single-unit needles degrade to the unit scan.
    if nlen == 1 && !fold {
        if let Some(unit) = needle.get(0) {
            return scan_unit_forward(hay.slice(start, count), unit).map(|i| start + i);
        }
    }
    for p in start..=start + count - nlen {
        if needle_matches_at(hay, p, needle, fold) {
            return Some(p);
        }
    }
    None
}

fn scan_needle_backward(
    hay: Units<'_>,
    start: usize,
    count: usize,
    needle: Units<'_>,
    fold: bool,
) -> Option<usize> {
    let nlen = needle.len();
    if count < nlen {
        return None;
    }
    if nlen == 0 {
        return Some(start);
    }
    // The match must end at or before `start` and begin inside the window.
    if start + 1 < nlen {
        return None;
    }
    let first = start + 1 - nlen;
    let low = start + 1 - count;
    if nlen == 1 && !fold {
        if let Some(unit) = needle.get(0) {
            return scan_unit_backward(hay.slice(low, count), unit).map(|i| low + i);
        }
    }
    for p in (low..=first).rev() {
        if needle_matches_at(hay, p, needle, fold) {
            return Some(p);
        }
    }
    None
}

impl BiStr {
    /// Position of the first occurrence of `unit`
    #[inline]
    pub fn find_unit(&self, unit: u16) -> Option<usize> {
        scan_unit_forward(self.units(), unit)
    }

    /// First occurrence of `unit` in the forward window `(start, count)`
    pub fn find_unit_in(&self, unit: u16, start: usize, count: usize) -> Result<Option<usize>> {
        check_window(start, count, self.len())?;
        Ok(scan_unit_forward(self.units().slice(start, count), unit).map(|i| start + i))
    }

    /// Position of the last occurrence of `unit`
    #[inline]
    pub fn rfind_unit(&self, unit: u16) -> Option<usize> {
        scan_unit_backward(self.units(), unit)
    }

    /// Last occurrence of `unit` scanning backward from `start` over `count`
    /// positions
    pub fn rfind_unit_in(&self, unit: u16, start: usize, count: usize) -> Result<Option<usize>> {
        check_backward_window(start, count, self.len())?;
        if self.is_empty() {
            return Ok(None);
        }
        let low = start + 1 - count;
        Ok(scan_unit_backward(self.units().slice(low, count), unit).map(|i| low + i))
    }

    /// True if `unit` occurs anywhere in the string
    #[inline]
    pub fn contains_unit(&self, unit: u16) -> bool {
        self.find_unit(unit).is_some()
    }

    /// Position of the first unit that is a member of `needles`
    #[inline]
    pub fn find_any(&self, needles: &[u16]) -> Option<usize> {
        scan_any(self.units(), needles, false)
    }

    /// First member of `needles` in the forward window `(start, count)`
    pub fn find_any_in(
        &self,
        needles: &[u16],
        start: usize,
        count: usize,
    ) -> Result<Option<usize>> {
        check_window(start, count, self.len())?;
        Ok(scan_any(self.units().slice(start, count), needles, false).map(|i| start + i))
    }

    /// Position of the last unit that is a member of `needles`
    #[inline]
    pub fn rfind_any(&self, needles: &[u16]) -> Option<usize> {
        scan_any(self.units(), needles, true)
    }

    /// Last member of `needles` scanning backward from `start` over `count`
    /// positions
    pub fn rfind_any_in(
        &self,
        needles: &[u16],
        start: usize,
        count: usize,
    ) -> Result<Option<usize>> {
        check_backward_window(start, count, self.len())?;
        if self.is_empty() {
            return Ok(None);
        }
        let low = start + 1 - count;
        Ok(scan_any(self.units().slice(low, count), needles, true).map(|i| low + i))
    }

    /// Position of the first occurrence of `needle`.
    ///
    /// An empty needle matches at position zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use bistr::BiStr;
    ///
    /// let s = BiStr::from("one two two");
    /// assert_eq!(s.find(&BiStr::from("two")), Some(4));
    /// assert_eq!(s.find(&BiStr::from("three")), None);
    /// ```
    #[inline]
    pub fn find(&self, needle: &BiStr) -> Option<usize> {
        scan_needle_forward(self.units(), 0, self.len(), needle.units(), false)
    }

    /// First occurrence of `needle` in the forward window `(start, count)`
    pub fn find_in(&self, needle: &BiStr, start: usize, count: usize) -> Result<Option<usize>> {
        check_window(start, count, self.len())?;
        Ok(scan_needle_forward(
            self.units(),
            start,
            count,
            needle.units(),
            false,
        ))
    }

    /// Case-insensitive [`find`](BiStr::find), folding both sides through the
    /// invariant uppercase mapping
    #[inline]
    pub fn find_ignore_case(&self, needle: &BiStr) -> Option<usize> {
        scan_needle_forward(self.units(), 0, self.len(), needle.units(), true)
    }

    /// Case-insensitive [`find_in`](BiStr::find_in)
    pub fn find_ignore_case_in(
        &self,
        needle: &BiStr,
        start: usize,
        count: usize,
    ) -> Result<Option<usize>> {
        check_window(start, count, self.len())?;
        Ok(scan_needle_forward(
            self.units(),
            start,
            count,
            needle.units(),
            true,
        ))
    }

    /// Position of the last occurrence of `needle`
    pub fn rfind(&self, needle: &BiStr) -> Option<usize> {
        if self.is_empty() {
            return if needle.is_empty() { Some(0) } else { None };
        }
        scan_needle_backward(self.units(), self.len() - 1, self.len(), needle.units(), false)
    }

    /// Last occurrence of `needle` scanning backward from `start` over
    /// `count` positions; the match must end at or before `start`
    pub fn rfind_in(&self, needle: &BiStr, start: usize, count: usize) -> Result<Option<usize>> {
        check_backward_window(start, count, self.len())?;
        if self.is_empty() {
            return Ok(if needle.is_empty() { Some(0) } else { None });
        }
        Ok(scan_needle_backward(
            self.units(),
            start,
            count,
            needle.units(),
            false,
        ))
    }

    /// Case-insensitive [`rfind`](BiStr::rfind)
    pub fn rfind_ignore_case(&self, needle: &BiStr) -> Option<usize> {
        if self.is_empty() {
            return if needle.is_empty() { Some(0) } else { None };
        }
        scan_needle_backward(self.units(), self.len() - 1, self.len(), needle.units(), true)
    }

    /// True if `needle` occurs anywhere in the string
    #[inline]
    pub fn contains(&self, needle: &BiStr) -> bool {
        self.find(needle).is_some()
    }

    /// True if the string begins with `prefix`
    #[inline]
    pub fn starts_with(&self, prefix: &BiStr) -> bool {
        prefix.len() <= self.len() && needle_matches_at(self.units(), 0, prefix.units(), false)
    }

    /// True if the string ends with `suffix`
    #[inline]
    pub fn ends_with(&self, suffix: &BiStr) -> bool {
        suffix.len() <= self.len()
            && needle_matches_at(self.units(), self.len() - suffix.len(), suffix.units(), false)
    }

    /// Case-insensitive [`starts_with`](BiStr::starts_with)
    #[inline]
    pub fn starts_with_ignore_case(&self, prefix: &BiStr) -> bool {
        prefix.len() <= self.len() && needle_matches_at(self.units(), 0, prefix.units(), true)
    }

    /// Case-insensitive [`ends_with`](BiStr::ends_with)
    #[inline]
    pub fn ends_with_ignore_case(&self, suffix: &BiStr) -> bool {
        suffix.len() <= self.len()
            && needle_matches_at(self.units(), self.len() - suffix.len(), suffix.units(), true)
    }
}
