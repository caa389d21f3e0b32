//! Staging buffers for fill-then-freeze construction
//!
//! New strings are never built in place: every mutating operation allocates a
//! [`StrBuf`] of the exact final length, fills it, and freezes it into an
//! immutable [`BiStr`](crate::BiStr). Allocation sizes are computed with
//! checked arithmetic so a pathological length request surfaces as
//! [`BiStrError::OutOfMemory`](crate::error::BiStrError) instead of a panic.
//!
//! The copy helpers here are the narrow waist every higher-level operation
//! funnels through: same-width copies, widening (compact source into a wide
//! destination) and narrowing (wide source into a compact destination, valid
//! only when every unit is ASCII).

use crate::encoding::{unit_is_compact, Encoding, COMPACT_MAX};
use crate::error::{checked_len_mul, BiStrError, Result};
use crate::string::bi_str::BiStr;
use crate::string::Units;

/// Copy `src` into `dst[at..]`, widening each byte to a 16-bit unit.
#[inline]
pub(crate) fn widen_into(dst: &mut [u16], at: usize, src: &[u8]) {
    for (d, &s) in dst[at..at + src.len()].iter_mut().zip(src) {
        *d = s as u16;
    }
}

/// Copy `src` into `dst[at..]`, narrowing each unit to a byte.
///
/// Callers must have established that every unit of `src` is compact.
#[inline]
pub(crate) fn narrow_into(dst: &mut [u8], at: usize, src: &[u16]) {
    debug_assert!(src.iter().all(|&u| u <= COMPACT_MAX));
    for (d, &s) in dst[at..at + src.len()].iter_mut().zip(src) {
        *d = s as u8;
    }
}

/// Mutable staging buffer with a fixed length and encoding.
///
/// Write units with [`set`](StrBuf::set), [`fill`](StrBuf::fill) and
/// [`copy_from`](StrBuf::copy_from), then [`freeze`](StrBuf::freeze) into an
/// immutable string. A compact buffer rejects non-ASCII units at write time,
/// so a frozen compact payload is ASCII-clean by construction.
#[derive(Debug)]
pub struct StrBuf {
    repr: BufRepr,
}

#[derive(Debug)]
enum BufRepr {
    Compact(Vec<u8>),
    Wide(Vec<u16>),
}

impl StrBuf {
    /// Allocate a zero-filled staging buffer of `len` units.
    ///
    /// The byte size is computed with checked arithmetic; an overflowing
    /// request fails with `OutOfMemory` rather than panicking.
    pub fn new(len: usize, encoding: Encoding) -> Result<Self> {
        // The unit count itself must survive conversion to a byte count.
        checked_len_mul(len, encoding.bytes_per_unit())?;
        let repr = match encoding {
            Encoding::Compact => BufRepr::Compact(vec![0u8; len]),
            Encoding::Wide => BufRepr::Wide(vec![0u16; len]),
        };
        Ok(StrBuf { repr })
    }

    /// Length of the buffer in code units
    #[inline]
    pub fn len(&self) -> usize {
        match &self.repr {
            BufRepr::Compact(v) => v.len(),
            BufRepr::Wide(v) => v.len(),
        }
    }

    /// True if the buffer holds no units
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Encoding the buffer will freeze into
    #[inline]
    pub fn encoding(&self) -> Encoding {
        match &self.repr {
            BufRepr::Compact(_) => Encoding::Compact,
            BufRepr::Wide(_) => Encoding::Wide,
        }
    }

    /// Write one code unit at `index`.
    ///
    /// Fails with `IndexOutOfRange` past the end, and with `InvalidArgument`
    /// when a non-ASCII unit is written into a compact buffer.
    pub fn set(&mut self, index: usize, unit: u16) -> Result<()> {
        let len = self.len();
        match &mut self.repr {
            BufRepr::Compact(v) => {
                if !unit_is_compact(unit) {
                    return Err(BiStrError::invalid_argument(
                        "unit",
                        "non-ascii code unit in compact buffer",
                    ));
                }
                *v.get_mut(index)
                    .ok_or(BiStrError::IndexOutOfRange { index, length: len })? = unit as u8;
            }
            BufRepr::Wide(v) => {
                *v.get_mut(index)
                    .ok_or(BiStrError::IndexOutOfRange { index, length: len })? = unit;
            }
        }
        Ok(())
    }

    /// Fill `count` units starting at `at` with `unit`.
    pub fn fill(&mut self, at: usize, count: usize, unit: u16) -> Result<()> {
        let len = self.len();
        crate::error::check_window(at, count, len)?;
        match &mut self.repr {
            BufRepr::Compact(v) => {
                if !unit_is_compact(unit) {
                    return Err(BiStrError::invalid_argument(
                        "unit",
                        "non-ascii code unit in compact buffer",
                    ));
                }
                v[at..at + count].fill(unit as u8);
            }
            BufRepr::Wide(v) => v[at..at + count].fill(unit),
        }
        Ok(())
    }

    /// Copy a view of source units into the buffer starting at `at`.
    ///
    /// Handles all four encoding pairings: same-width copies are straight
    /// slice copies, a compact source widens unit-by-unit, and a wide source
    /// narrows only after confirming it is ASCII-clean.
    pub fn copy_from(&mut self, at: usize, src: Units<'_>) -> Result<()> {
        let len = self.len();
        crate::error::check_window(at, src.len(), len)?;
        match (&mut self.repr, src) {
            (BufRepr::Compact(dst), Units::Compact(s)) => {
                dst[at..at + s.len()].copy_from_slice(s);
            }
            (BufRepr::Wide(dst), Units::Wide(s)) => {
                dst[at..at + s.len()].copy_from_slice(s);
            }
            (BufRepr::Wide(dst), Units::Compact(s)) => widen_into(dst, at, s),
            (BufRepr::Compact(dst), Units::Wide(s)) => {
                if !s.iter().all(|&u| unit_is_compact(u)) {
                    return Err(BiStrError::invalid_argument(
                        "src",
                        "non-ascii code unit in compact buffer",
                    ));
                }
                narrow_into(dst, at, s);
            }
        }
        Ok(())
    }

    /// Freeze the buffer into an immutable string.
    ///
    /// A zero-length buffer freezes to the canonical empty string regardless
    /// of the buffer's encoding.
    pub fn freeze(self) -> BiStr {
        match self.repr {
            BufRepr::Compact(v) => BiStr::from_compact_vec(v),
            BufRepr::Wide(v) => BiStr::from_wide_vec(v),
        }
    }
}
