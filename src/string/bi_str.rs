//! Dual-encoding immutable string
//!
//! [`BiStr`] is an immutable sequence of 16-bit code units stored in one of
//! two physical encodings: a compact one-byte form when every unit is ASCII,
//! and a wide two-byte form otherwise. The encoding is an internal storage
//! detail: two strings with the same logical unit sequence are equal, order
//! the same and hash the same regardless of how either is stored.
//!
//! Payloads live behind `Arc`, so cloning and the many operations that can
//! return their input unchanged (identity substring, no-op trim, replace
//! with no match) are reference bumps, not copies.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use once_cell::sync::Lazy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::encoding::{select_for_units, unit_is_compact, Encoding, COMPACT_MAX};
use crate::error::{check_window, BiStrError, Result};

// Canonical empty instance; every zero-length construction hands out a clone
// of this payload.
static EMPTY: Lazy<BiStr> = Lazy::new(|| BiStr {
    repr: Repr::Compact(Arc::from([] as [u8; 0])),
});

/// Borrowed view of a string's code units, tagged with the storage width.
///
/// Engines match on this once and run a width-specialized loop, instead of
/// widening everything to `u16` up front.
#[derive(Debug, Clone, Copy)]
pub enum Units<'a> {
    /// One byte per unit, all ASCII
    Compact(&'a [u8]),
    /// Two bytes per unit
    Wide(&'a [u16]),
}

impl<'a> Units<'a> {
    /// Number of code units in the view
    #[inline]
    pub fn len(self) -> usize {
        match self {
            Units::Compact(s) => s.len(),
            Units::Wide(s) => s.len(),
        }
    }

    /// True if the view covers no units
    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Code unit at `index`, widened to `u16`
    #[inline]
    pub fn get(self, index: usize) -> Option<u16> {
        match self {
            Units::Compact(s) => s.get(index).map(|&b| b as u16),
            Units::Wide(s) => s.get(index).copied(),
        }
    }

    /// Sub-view of `count` units starting at `start`.
    ///
    /// Callers must have validated the window.
    #[inline]
    pub fn slice(self, start: usize, count: usize) -> Units<'a> {
        match self {
            Units::Compact(s) => Units::Compact(&s[start..start + count]),
            Units::Wide(s) => Units::Wide(&s[start..start + count]),
        }
    }

    /// Iterator over the units, widened to `u16`
    #[inline]
    pub fn iter(self) -> UnitIter<'a> {
        UnitIter {
            units: self,
            front: 0,
            back: self.len(),
        }
    }
}

/// Iterator over logical code units, produced by [`Units::iter`] and
/// [`BiStr::iter`].
#[derive(Debug, Clone)]
pub struct UnitIter<'a> {
    units: Units<'a>,
    front: usize,
    back: usize,
}

impl<'a> Iterator for UnitIter<'a> {
    type Item = u16;

    #[inline]
    fn next(&mut self) -> Option<u16> {
        if self.front == self.back {
            return None;
        }
        let unit = self.units.get(self.front);
        self.front += 1;
        unit
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a> DoubleEndedIterator for UnitIter<'a> {
    #[inline]
    fn next_back(&mut self) -> Option<u16> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        self.units.get(self.back)
    }
}

impl<'a> ExactSizeIterator for UnitIter<'a> {}

#[derive(Debug, Clone)]
enum Repr {
    Compact(Arc<[u8]>),
    Wide(Arc<[u16]>),
}

/// Immutable dual-encoding string of 16-bit code units.
///
/// # Examples
///
/// ```
/// use bistr::BiStr;
///
/// let ascii = BiStr::from("hello");
/// let wide = BiStr::from("héllo");
/// assert_eq!(ascii.len(), 5);
/// assert_ne!(ascii.encoding(), wide.encoding());
/// assert_eq!(BiStr::from("héllo"), wide);
/// ```
#[derive(Clone)]
pub struct BiStr {
    repr: Repr,
}

impl BiStr {
    /// The canonical empty string
    #[inline]
    pub fn empty() -> BiStr {
        EMPTY.clone()
    }

    /// Build a string from a slice of code units, selecting the compact
    /// encoding when every unit is ASCII.
    pub fn from_units(units: &[u16]) -> BiStr {
        if units.is_empty() {
            return BiStr::empty();
        }
        match select_for_units(units) {
            Encoding::Compact => {
                let bytes: Vec<u8> = units.iter().map(|&u| u as u8).collect();
                BiStr::from_compact_vec(bytes)
            }
            Encoding::Wide => BiStr::from_wide_vec(units.to_vec()),
        }
    }

    /// Build a compact string directly from ASCII bytes.
    ///
    /// Fails with `InvalidArgument` if any byte is above `0x7F`.
    pub fn from_ascii(bytes: &[u8]) -> Result<BiStr> {
        if bytes.iter().any(|&b| b > COMPACT_MAX as u8) {
            return Err(BiStrError::invalid_argument(
                "bytes",
                "non-ascii byte in compact construction",
            ));
        }
        if bytes.is_empty() {
            return Ok(BiStr::empty());
        }
        Ok(BiStr::from_compact_vec(bytes.to_vec()))
    }

    /// Build a string of `count` repetitions of one code unit.
    pub fn repeat_unit(unit: u16, count: usize) -> Result<BiStr> {
        if count == 0 {
            return Ok(BiStr::empty());
        }
        crate::error::checked_len_mul(count, 2)?;
        if unit_is_compact(unit) {
            Ok(BiStr::from_compact_vec(vec![unit as u8; count]))
        } else {
            Ok(BiStr::from_wide_vec(vec![unit; count]))
        }
    }

    #[inline]
    pub(crate) fn from_compact_vec(bytes: Vec<u8>) -> BiStr {
        if bytes.is_empty() {
            return BiStr::empty();
        }
        BiStr {
            repr: Repr::Compact(Arc::from(bytes)),
        }
    }

    #[inline]
    pub(crate) fn from_wide_vec(units: Vec<u16>) -> BiStr {
        if units.is_empty() {
            return BiStr::empty();
        }
        BiStr {
            repr: Repr::Wide(Arc::from(units)),
        }
    }

    /// Length in logical code units
    #[inline]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Compact(s) => s.len(),
            Repr::Wide(s) => s.len(),
        }
    }

    /// True if the string has no units
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Physical storage encoding of this instance
    #[inline]
    pub fn encoding(&self) -> Encoding {
        match &self.repr {
            Repr::Compact(_) => Encoding::Compact,
            Repr::Wide(_) => Encoding::Wide,
        }
    }

    /// Borrowed, width-tagged view of the code units
    #[inline]
    pub fn units(&self) -> Units<'_> {
        match &self.repr {
            Repr::Compact(s) => Units::Compact(s),
            Repr::Wide(s) => Units::Wide(s),
        }
    }

    /// Code unit at `index`, or `None` past the end
    #[inline]
    pub fn unit_at(&self, index: usize) -> Option<u16> {
        self.units().get(index)
    }

    /// Code unit at `index`, failing with `IndexOutOfRange` past the end
    #[inline]
    pub fn get(&self, index: usize) -> Result<u16> {
        self.unit_at(index).ok_or(BiStrError::IndexOutOfRange {
            index,
            length: self.len(),
        })
    }

    /// Iterator over the logical code units
    #[inline]
    pub fn iter(&self) -> UnitIter<'_> {
        self.units().iter()
    }

    /// The full logical unit sequence as an owned vector
    pub fn to_units(&self) -> Vec<u16> {
        self.iter().collect()
    }

    /// Copy `count` units starting at `src_start` into
    /// `dst[dst_start..dst_start + count]`, widening as needed.
    pub fn copy_units_to(
        &self,
        src_start: usize,
        dst: &mut [u16],
        dst_start: usize,
        count: usize,
    ) -> Result<()> {
        check_window(src_start, count, self.len())?;
        check_window(dst_start, count, dst.len())?;
        match self.units().slice(src_start, count) {
            Units::Compact(s) => crate::buffer::widen_into(dst, dst_start, s),
            Units::Wide(s) => dst[dst_start..dst_start + count].copy_from_slice(s),
        }
        Ok(())
    }

    /// True when `self` and `other` share the same payload allocation
    #[inline]
    pub fn ptr_eq(&self, other: &BiStr) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Compact(a), Repr::Compact(b)) => Arc::ptr_eq(a, b),
            (Repr::Wide(a), Repr::Wide(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Default for BiStr {
    #[inline]
    fn default() -> Self {
        BiStr::empty()
    }
}

impl From<&str> for BiStr {
    fn from(s: &str) -> BiStr {
        if s.is_ascii() {
            return BiStr::from_compact_vec(s.as_bytes().to_vec());
        }
        BiStr::from_wide_vec(s.encode_utf16().collect())
    }
}

impl From<&String> for BiStr {
    fn from(s: &String) -> BiStr {
        BiStr::from(s.as_str())
    }
}

impl From<String> for BiStr {
    fn from(s: String) -> BiStr {
        BiStr::from(s.as_str())
    }
}

impl From<char> for BiStr {
    fn from(c: char) -> BiStr {
        let mut buf = [0u16; 2];
        BiStr::from_units(c.encode_utf16(&mut buf))
    }
}

impl PartialEq for BiStr {
    fn eq(&self, other: &BiStr) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if self.len() != other.len() {
            return false;
        }
        match (self.units(), other.units()) {
            (Units::Compact(a), Units::Compact(b)) => a == b,
            (Units::Wide(a), Units::Wide(b)) => a == b,
            (Units::Compact(a), Units::Wide(b)) | (Units::Wide(b), Units::Compact(a)) => {
                a.iter().zip(b).all(|(&x, &y)| x as u16 == y)
            }
        }
    }
}

impl Eq for BiStr {}

impl PartialOrd for BiStr {
    #[inline]
    fn partial_cmp(&self, other: &BiStr) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BiStr {
    #[inline]
    fn cmp(&self, other: &BiStr) -> Ordering {
        crate::string::compare::compare_ordinal(self, other)
    }
}

impl Hash for BiStr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Decode-then-hash keeps the two encodings of one logical sequence
        // in the same bucket.
        state.write_usize(self.len());
        for unit in self.iter() {
            state.write_u16(unit);
        }
    }
}

impl fmt::Display for BiStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.units() {
            Units::Compact(s) => {
                // Compact payloads are ASCII-clean by construction.
                for &b in s {
                    f.write_str((b as char).encode_utf8(&mut [0u8; 4]))?;
                }
                Ok(())
            }
            Units::Wide(s) => {
                for c in char::decode_utf16(s.iter().copied()) {
                    f.write_str(
                        c.unwrap_or(char::REPLACEMENT_CHARACTER)
                            .encode_utf8(&mut [0u8; 4]),
                    )?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for BiStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.encoding() {
            Encoding::Compact => "compact",
            Encoding::Wide => "wide",
        };
        write!(f, "BiStr({tag}, {:?})", self.to_string())
    }
}

#[cfg(feature = "serde")]
impl Serialize for BiStr {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for BiStr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(BiStr::from)
    }
}
