//! Mutate-as-new operations
//!
//! Every operation here produces a new immutable string (or hands back a
//! reference-bumped clone of an input when the result would be identical).
//! Result sizes are computed with checked arithmetic before any allocation,
//! so oversized requests fail with `OutOfMemory` instead of aborting.
//!
//! Result encodings follow the `Preserve` policy by default: operand
//! encodings combine without a content re-scan, so touching a wide operand
//! yields a wide result even when the surviving units are ASCII. The
//! `*_with` variants accept an [`EngineConfig`] whose `DemoteRescan` policy
//! re-scans and demotes ASCII-clean results to compact storage.

use crate::buffer::StrBuf;
use crate::config::{EncodingPolicy, EngineConfig};
use crate::encoding::{combine_all, select_for_units, unit_is_compact, Encoding};
use crate::error::{check_window, checked_len_add, checked_len_mul, BiStrError, Result};
use crate::string::{fold_lower_invariant, fold_upper_invariant, is_white_space};
use crate::string::{BiStr, Units};

// Re-scan demotion for the DemoteRescan policy. Only wide results are
// candidates; compact ones are already minimal.
fn apply_policy(s: BiStr, policy: EncodingPolicy) -> BiStr {
    if policy == EncodingPolicy::Preserve || s.encoding() == Encoding::Compact {
        return s;
    }
    if let Units::Wide(units) = s.units() {
        if units.iter().all(|&u| unit_is_compact(u)) {
            let bytes: Vec<u8> = units.iter().map(|&u| u as u8).collect();
            return BiStr::from_compact_vec(bytes);
        }
    }
    s
}

impl BiStr {
    /// Suffix starting at `start`, keeping the source encoding
    pub fn substring(&self, start: usize) -> Result<BiStr> {
        let len = self.len();
        if start > len {
            return Err(BiStrError::out_of_range("start", "start exceeds length"));
        }
        self.substring_range(start, len - start)
    }

    /// Window of `count` units starting at `start`, keeping the source
    /// encoding.
    ///
    /// The full-range request returns the receiver itself; a zero-length
    /// request returns the canonical empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use bistr::BiStr;
    ///
    /// let s = BiStr::from("substring");
    /// assert_eq!(s.substring_range(3, 6)?.to_string(), "string");
    /// assert!(s.substring_range(0, 9)?.ptr_eq(&s));
    /// # Ok::<(), bistr::BiStrError>(())
    /// ```
    pub fn substring_range(&self, start: usize, count: usize) -> Result<BiStr> {
        check_window(start, count, self.len())?;
        Ok(self.substring_unchecked(start, count))
    }

    // Unchecked core shared with the trim scans, whose windows are in range
    // by construction. Keeps the source encoding.
    fn substring_unchecked(&self, start: usize, count: usize) -> BiStr {
        debug_assert!(start <= self.len() && count <= self.len() - start);
        if count == 0 {
            return BiStr::empty();
        }
        if start == 0 && count == self.len() {
            return self.clone();
        }
        match self.units().slice(start, count) {
            Units::Compact(s) => BiStr::from_compact_vec(s.to_vec()),
            Units::Wide(s) => BiStr::from_wide_vec(s.to_vec()),
        }
    }

    /// Concatenation of `self` and `other`.
    ///
    /// An empty operand short-circuits to a clone of the other. Two compact
    /// operands yield a compact result; anything else is wide.
    pub fn concat(&self, other: &BiStr) -> Result<BiStr> {
        self.concat_with(other, &EngineConfig::default())
    }

    /// [`concat`](BiStr::concat) under an explicit configuration
    pub fn concat_with(&self, other: &BiStr, config: &EngineConfig) -> Result<BiStr> {
        config.validate()?;
        if self.is_empty() {
            return Ok(apply_policy(other.clone(), config.encoding_policy));
        }
        if other.is_empty() {
            return Ok(apply_policy(self.clone(), config.encoding_policy));
        }
        let nlen = checked_len_add(self.len(), other.len())?;
        let mut buf = StrBuf::new(nlen, self.encoding().combine(other.encoding()))?;
        buf.copy_from(0, self.units())?;
        buf.copy_from(self.len(), other.units())?;
        Ok(apply_policy(buf.freeze(), config.encoding_policy))
    }

    /// Concatenation of three strings
    pub fn concat3(a: &BiStr, b: &BiStr, c: &BiStr) -> Result<BiStr> {
        BiStr::concat_all(&[a, b, c])
    }

    /// Concatenation of four strings
    pub fn concat4(a: &BiStr, b: &BiStr, c: &BiStr, d: &BiStr) -> Result<BiStr> {
        BiStr::concat_all(&[a, b, c, d])
    }

    /// Concatenation of an operand sequence
    pub fn concat_all(parts: &[&BiStr]) -> Result<BiStr> {
        let mut nlen = 0usize;
        for part in parts {
            nlen = checked_len_add(nlen, part.len())?;
        }
        if nlen == 0 {
            return Ok(BiStr::empty());
        }
        if parts.iter().filter(|p| !p.is_empty()).count() == 1 {
            for part in parts {
                if !part.is_empty() {
                    return Ok((*part).clone());
                }
            }
        }
        let encoding = combine_all(parts.iter().map(|p| p.encoding()));
        let mut buf = StrBuf::new(nlen, encoding)?;
        let mut at = 0;
        for part in parts {
            buf.copy_from(at, part.units())?;
            at += part.len();
        }
        Ok(buf.freeze())
    }

    /// Join `values` with `separator` between consecutive entries.
    ///
    /// Empty entries contribute nothing but still get separators around
    /// them; a zero-length total yields the canonical empty string.
    pub fn join(separator: &BiStr, values: &[BiStr]) -> Result<BiStr> {
        BiStr::join_in(separator, values, 0, values.len())
    }

    /// Join a window of `count` entries of `values` starting at `start`
    pub fn join_in(
        separator: &BiStr,
        values: &[BiStr],
        start: usize,
        count: usize,
    ) -> Result<BiStr> {
        check_window(start, count, values.len())?;
        if count == 0 {
            return Ok(BiStr::empty());
        }
        let window = &values[start..start + count];
        if count == 1 {
            return Ok(window[0].clone());
        }
        let mut nlen = checked_len_mul(separator.len(), count - 1)?;
        for value in window {
            nlen = checked_len_add(nlen, value.len())?;
        }
        if nlen == 0 {
            return Ok(BiStr::empty());
        }
        let encoding = window
            .iter()
            .map(|v| v.encoding())
            .fold(separator.encoding(), Encoding::combine);
        let mut buf = StrBuf::new(nlen, encoding)?;
        let mut at = 0;
        for (i, value) in window.iter().enumerate() {
            buf.copy_from(at, value.units())?;
            at += value.len();
            if i + 1 < count {
                buf.copy_from(at, separator.units())?;
                at += separator.len();
            }
        }
        Ok(buf.freeze())
    }

    /// Copy of the string with `value` inserted at unit position `at`
    pub fn insert(&self, at: usize, value: &BiStr) -> Result<BiStr> {
        if at > self.len() {
            return Err(BiStrError::out_of_range("at", "position exceeds length"));
        }
        if value.is_empty() {
            return Ok(self.clone());
        }
        if self.is_empty() {
            return Ok(value.clone());
        }
        let nlen = checked_len_add(self.len(), value.len())?;
        let mut buf = StrBuf::new(nlen, self.encoding().combine(value.encoding()))?;
        buf.copy_from(0, self.units().slice(0, at))?;
        buf.copy_from(at, value.units())?;
        buf.copy_from(at + value.len(), self.units().slice(at, self.len() - at))?;
        Ok(buf.freeze())
    }

    /// Copy of the string with `count` units removed starting at `start`
    pub fn remove(&self, start: usize, count: usize) -> Result<BiStr> {
        check_window(start, count, self.len())?;
        if count == 0 {
            return Ok(self.clone());
        }
        if count == self.len() {
            return Ok(BiStr::empty());
        }
        let nlen = self.len() - count;
        let mut buf = StrBuf::new(nlen, self.encoding())?;
        buf.copy_from(0, self.units().slice(0, start))?;
        let tail = start + count;
        buf.copy_from(start, self.units().slice(tail, self.len() - tail))?;
        Ok(buf.freeze())
    }

    /// Copy of the string truncated at unit position `start`
    pub fn remove_from(&self, start: usize) -> Result<BiStr> {
        let len = self.len();
        if start > len {
            return Err(BiStrError::out_of_range("start", "start exceeds length"));
        }
        self.substring_range(0, start)
    }

    /// Copy of the string repeated `n` times
    pub fn repeat(&self, n: usize) -> Result<BiStr> {
        if n == 0 || self.is_empty() {
            return Ok(BiStr::empty());
        }
        if n == 1 {
            return Ok(self.clone());
        }
        let nlen = checked_len_mul(self.len(), n)?;
        let mut buf = StrBuf::new(nlen, self.encoding())?;
        for i in 0..n {
            buf.copy_from(i * self.len(), self.units())?;
        }
        Ok(buf.freeze())
    }

    /// Right-align the string in a field of `width` units, padding with
    /// spaces on the left
    pub fn pad_left(&self, width: usize) -> Result<BiStr> {
        self.pad_left_with(width, b' ' as u16)
    }

    /// Right-align the string in a field of `width` units, padding with
    /// `unit` on the left.
    ///
    /// A width at or below the current length returns the receiver
    /// unchanged. Padded results are allocated wide.
    pub fn pad_left_with(&self, width: usize, unit: u16) -> Result<BiStr> {
        if width <= self.len() {
            return Ok(self.clone());
        }
        let pad = width - self.len();
        let mut buf = StrBuf::new(width, Encoding::Wide)?;
        buf.fill(0, pad, unit)?;
        buf.copy_from(pad, self.units())?;
        Ok(buf.freeze())
    }

    /// Left-align the string in a field of `width` units, padding with
    /// spaces on the right
    pub fn pad_right(&self, width: usize) -> Result<BiStr> {
        self.pad_right_with(width, b' ' as u16)
    }

    /// Left-align the string in a field of `width` units, padding with
    /// `unit` on the right
    pub fn pad_right_with(&self, width: usize, unit: u16) -> Result<BiStr> {
        if width <= self.len() {
            return Ok(self.clone());
        }
        let mut buf = StrBuf::new(width, Encoding::Wide)?;
        buf.copy_from(0, self.units())?;
        buf.fill(self.len(), width - self.len(), unit)?;
        Ok(buf.freeze())
    }

    /// Copy of the string with every occurrence of the unit `old` replaced
    /// by `new`.
    ///
    /// Returns the receiver unchanged when it is empty, when `old == new`,
    /// or when `old` does not occur.
    pub fn replace_unit(&self, old: u16, new: u16) -> Result<BiStr> {
        if self.is_empty() || old == new {
            return Ok(self.clone());
        }
        let first = match self.find_unit(old) {
            Some(i) => i,
            None => return Ok(self.clone()),
        };
        let unit_enc = if unit_is_compact(new) {
            Encoding::Compact
        } else {
            Encoding::Wide
        };
        let mut buf = StrBuf::new(self.len(), self.encoding().combine(unit_enc))?;
        buf.copy_from(0, self.units().slice(0, first))?;
        for i in first..self.len() {
            let u = match self.unit_at(i) {
                Some(u) => u,
                None => break,
            };
            buf.set(i, if u == old { new } else { u })?;
        }
        Ok(buf.freeze())
    }

    /// Copy of the string with every non-overlapping occurrence of `old`
    /// replaced by `new`.
    ///
    /// `old` must be non-empty. Returns the receiver unchanged when it is
    /// empty, when `old` is longer than it, or when `old` does not occur.
    ///
    /// # Examples
    ///
    /// ```
    /// use bistr::BiStr;
    ///
    /// let s = BiStr::from("one two two");
    /// let out = s.replace(&BiStr::from("two"), &BiStr::from("2"))?;
    /// assert_eq!(out.to_string(), "one 2 2");
    /// # Ok::<(), bistr::BiStrError>(())
    /// ```
    pub fn replace(&self, old: &BiStr, new: &BiStr) -> Result<BiStr> {
        self.replace_with(old, new, &EngineConfig::default())
    }

    /// [`replace`](BiStr::replace) under an explicit configuration.
    ///
    /// The fast path stages up to `config.replace_offset_cap` match offsets
    /// and assembles the result in one allocation; inputs with more matches
    /// take a streaming fallback.
    pub fn replace_with(&self, old: &BiStr, new: &BiStr, config: &EngineConfig) -> Result<BiStr> {
        config.validate()?;
        if old.is_empty() {
            return Err(BiStrError::invalid_argument("old", "pattern is empty"));
        }
        if self.is_empty() || old.len() > self.len() {
            return Ok(self.clone());
        }

        let cap = config.replace_offset_cap;
        let mut offsets: Vec<usize> = Vec::with_capacity(cap);
        let mut pos = 0;
        let mut overflowed = false;
        while let Some(found) = self.find_in(old, pos, self.len() - pos)? {
            if offsets.len() == cap {
                log::trace!(
                    "replace offset cap {} exceeded at position {}, streaming fallback",
                    cap,
                    found
                );
                overflowed = true;
                break;
            }
            offsets.push(found);
            pos = found + old.len();
        }
        if offsets.is_empty() {
            return Ok(self.clone());
        }
        if overflowed {
            return self.replace_streaming(old, new, config);
        }

        // nlen = len + (new.len - old.len) * matches, checked in unsigned
        // pieces so growth overflow surfaces as OutOfMemory.
        let count = offsets.len();
        let nlen = if new.len() >= old.len() {
            checked_len_add(self.len(), checked_len_mul(new.len() - old.len(), count)?)?
        } else {
            self.len() - (old.len() - new.len()) * count
        };
        if nlen == 0 {
            return Ok(BiStr::empty());
        }
        let encoding = self.encoding().combine(new.encoding());
        let mut buf = StrBuf::new(nlen, encoding)?;
        let mut src = 0;
        let mut dst = 0;
        for &offset in &offsets {
            let keep = offset - src;
            buf.copy_from(dst, self.units().slice(src, keep))?;
            dst += keep;
            buf.copy_from(dst, new.units())?;
            dst += new.len();
            src = offset + old.len();
        }
        buf.copy_from(dst, self.units().slice(src, self.len() - src))?;
        Ok(apply_policy(buf.freeze(), config.encoding_policy))
    }

    // Re-scans from the start, appending segments as it goes. Used when the
    // match count exceeds the staged-offset cap.
    fn replace_streaming(&self, old: &BiStr, new: &BiStr, config: &EngineConfig) -> Result<BiStr> {
        let mut out: Vec<u16> = Vec::with_capacity(self.len());
        let mut pos = 0;
        while let Some(found) = self.find_in(old, pos, self.len() - pos)? {
            out.extend((pos..found).filter_map(|i| self.unit_at(i)));
            out.extend(new.iter());
            pos = found + old.len();
        }
        out.extend((pos..self.len()).filter_map(|i| self.unit_at(i)));
        let result = match config.encoding_policy {
            EncodingPolicy::DemoteRescan => BiStr::from_units(&out),
            EncodingPolicy::Preserve => {
                match self.encoding().combine(new.encoding()) {
                    Encoding::Wide => BiStr::from_wide_vec(out),
                    Encoding::Compact => {
                        // Both operands compact, so the output is ASCII.
                        debug_assert_eq!(select_for_units(&out), Encoding::Compact);
                        BiStr::from_compact_vec(out.into_iter().map(|u| u as u8).collect())
                    }
                }
            }
        };
        Ok(result)
    }

    /// Copy with leading and trailing whitespace removed.
    ///
    /// Returns the receiver unchanged when nothing is trimmed, and the
    /// canonical empty string when everything is.
    pub fn trim(&self) -> BiStr {
        self.trim_by(|u| is_white_space(u), true, true)
    }

    /// Copy with leading whitespace removed
    pub fn trim_start(&self) -> BiStr {
        self.trim_by(|u| is_white_space(u), true, false)
    }

    /// Copy with trailing whitespace removed
    pub fn trim_end(&self) -> BiStr {
        self.trim_by(|u| is_white_space(u), false, true)
    }

    /// Copy with leading and trailing units from `set` removed
    pub fn trim_matches(&self, set: &[u16]) -> BiStr {
        self.trim_by(|u| set.contains(&u), true, true)
    }

    /// Copy with leading units from `set` removed
    pub fn trim_start_matches(&self, set: &[u16]) -> BiStr {
        self.trim_by(|u| set.contains(&u), true, false)
    }

    /// Copy with trailing units from `set` removed
    pub fn trim_end_matches(&self, set: &[u16]) -> BiStr {
        self.trim_by(|u| set.contains(&u), false, true)
    }

    fn trim_by<F: Fn(u16) -> bool>(&self, strip: F, head: bool, tail: bool) -> BiStr {
        let len = self.len();
        let mut start = 0;
        if head {
            while start < len {
                match self.unit_at(start) {
                    Some(u) if strip(u) => start += 1,
                    _ => break,
                }
            }
        }
        let mut end = len;
        if tail {
            while end > start {
                match self.unit_at(end - 1) {
                    Some(u) if strip(u) => end -= 1,
                    _ => break,
                }
            }
        }
        if start == 0 && end == len {
            return self.clone();
        }
        // start <= end <= len holds after the two scans.
        self.substring_unchecked(start, end - start)
    }

    /// Copy with every unit folded through the invariant lowercase mapping.
    ///
    /// Compact input stays compact; an unchanged string comes back as the
    /// receiver itself.
    pub fn to_lower_invariant(&self) -> Result<BiStr> {
        self.fold_invariant(fold_lower_invariant)
    }

    /// Copy with every unit folded through the invariant uppercase mapping
    pub fn to_upper_invariant(&self) -> Result<BiStr> {
        self.fold_invariant(fold_upper_invariant)
    }

    fn fold_invariant(&self, fold: fn(u16) -> u16) -> Result<BiStr> {
        let changed = self.iter().any(|u| fold(u) != u);
        if !changed {
            return Ok(self.clone());
        }
        // ASCII folds to ASCII, so the encoding is preserved.
        let mut buf = StrBuf::new(self.len(), self.encoding())?;
        for (i, u) in self.iter().enumerate() {
            buf.set(i, fold(u))?;
        }
        Ok(buf.freeze())
    }
}
