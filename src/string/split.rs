//! Split engine
//!
//! Splitting walks the string left to right, cutting at the earliest
//! separator match each round. With several separators the smallest match
//! position wins and ties go to the separator listed first. A part budget
//! caps the output: once `count - 1` parts are cut, the rest of the string
//! (separators included) becomes the final part.
//!
//! Produced parts are substrings, so they keep the source encoding and the
//! whole-string and empty cases are reference bumps.

use bitflags::bitflags;

use crate::error::Result;
use crate::string::is_white_space;
use crate::string::BiStr;

bitflags! {
    /// Behavior flags for the split operations
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SplitOptions: u32 {
        /// Drop zero-length parts instead of emitting them
        const REMOVE_EMPTY = 1;
    }
}

impl BiStr {
    /// Split on any of `separators`, unlimited parts.
    ///
    /// Empty separators are ignored. With no effective separator matching,
    /// the result is the whole string as a single part.
    ///
    /// # Examples
    ///
    /// ```
    /// use bistr::{BiStr, SplitOptions};
    ///
    /// let s = BiStr::from("a,b;;c");
    /// let seps = [BiStr::from(","), BiStr::from(";")];
    /// let parts = s.split(&seps, SplitOptions::empty())?;
    /// assert_eq!(parts.len(), 4);
    /// let parts = s.split(&seps, SplitOptions::REMOVE_EMPTY)?;
    /// assert_eq!(parts.len(), 3);
    /// # Ok::<(), bistr::BiStrError>(())
    /// ```
    pub fn split(&self, separators: &[BiStr], options: SplitOptions) -> Result<Vec<BiStr>> {
        self.split_n(separators, usize::MAX, options)
    }

    /// Split on any of `separators` into at most `count` parts
    pub fn split_n(
        &self,
        separators: &[BiStr],
        count: usize,
        options: SplitOptions,
    ) -> Result<Vec<BiStr>> {
        self.split_core(count, options, |pos| {
            let mut best: Option<(usize, usize)> = None;
            for sep in separators {
                if sep.is_empty() {
                    continue;
                }
                if let Some(found) = self.find_in(sep, pos, self.len() - pos)? {
                    let better = match best {
                        None => true,
                        Some((best_pos, _)) => found < best_pos,
                    };
                    if better {
                        best = Some((found, sep.len()));
                    }
                }
            }
            Ok(best)
        })
    }

    /// Split on any single unit of `separators`, unlimited parts.
    ///
    /// An empty separator set splits on whitespace.
    pub fn split_units(&self, separators: &[u16], options: SplitOptions) -> Result<Vec<BiStr>> {
        self.split_units_n(separators, usize::MAX, options)
    }

    /// Split on any single unit of `separators` into at most `count` parts
    pub fn split_units_n(
        &self,
        separators: &[u16],
        count: usize,
        options: SplitOptions,
    ) -> Result<Vec<BiStr>> {
        if separators.is_empty() {
            return self.split_core(count, options, |pos| {
                Ok((pos..self.len())
                    .find(|&i| self.unit_at(i).map(is_white_space).unwrap_or(false))
                    .map(|i| (i, 1)))
            });
        }
        self.split_core(count, options, |pos| {
            Ok(self
                .find_any_in(separators, pos, self.len() - pos)?
                .map(|i| (i, 1)))
        })
    }

    /// Split on whitespace, dropping empty parts
    pub fn split_whitespace(&self) -> Result<Vec<BiStr>> {
        self.split_units(&[], SplitOptions::REMOVE_EMPTY)
    }

    // Shared greedy loop. `next_match` reports the earliest separator match
    // at or after a position, as (position, separator length).
    fn split_core<F>(&self, count: usize, options: SplitOptions, mut next_match: F) -> Result<Vec<BiStr>>
    where
        F: FnMut(usize) -> Result<Option<(usize, usize)>>,
    {
        let remove_empty = options.contains(SplitOptions::REMOVE_EMPTY);
        if count == 0 {
            return Ok(Vec::new());
        }
        if remove_empty && self.is_empty() {
            return Ok(Vec::new());
        }
        if count == 1 {
            return Ok(vec![self.clone()]);
        }

        let mut parts = Vec::new();
        let mut pos = 0;
        let mut matched = false;
        while pos <= self.len() {
            let (match_pos, sep_len) = match next_match(pos)? {
                Some(m) => m,
                None => break,
            };
            matched = true;
            if !(match_pos == pos && remove_empty) {
                // Part budget reached: what remains, separators and all,
                // becomes the final part below.
                if parts.len() == count - 1 {
                    break;
                }
                parts.push(self.substring_range(pos, match_pos - pos)?);
            }
            pos = match_pos + sep_len;
        }

        if !matched {
            return Ok(vec![self.clone()]);
        }
        if remove_empty && pos == self.len() && parts.is_empty() {
            return Ok(Vec::new());
        }
        if !(remove_empty && pos == self.len()) {
            parts.push(self.substring(pos)?);
        }
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(parts: &[BiStr]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_split_single_separator() {
        let s = BiStr::from("a,b,c");
        let seps = [BiStr::from(",")];
        let parts = s.split(&seps, SplitOptions::empty()).unwrap();
        assert_eq!(render(&parts), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_keeps_and_drops_empties() {
        let s = BiStr::from(",a,,b,");
        let seps = [BiStr::from(",")];
        let kept = s.split(&seps, SplitOptions::empty()).unwrap();
        assert_eq!(render(&kept), vec!["", "a", "", "b", ""]);
        let dropped = s.split(&seps, SplitOptions::REMOVE_EMPTY).unwrap();
        assert_eq!(render(&dropped), vec!["a", "b"]);
    }

    #[test]
    fn test_split_no_match_returns_whole() {
        let s = BiStr::from("abc");
        let seps = [BiStr::from(",")];
        let parts = s.split(&seps, SplitOptions::empty()).unwrap();
        assert_eq!(parts.len(), 1);
        assert!(parts[0].ptr_eq(&s));
    }

    #[test]
    fn test_split_earliest_match_wins() {
        let s = BiStr::from("a;b,c");
        let seps = [BiStr::from(","), BiStr::from(";")];
        let parts = s.split(&seps, SplitOptions::empty()).unwrap();
        assert_eq!(render(&parts), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_tie_goes_to_first_listed() {
        // Both separators match at position 1; the longer one is listed
        // first and consumes two units.
        let s = BiStr::from("a::b");
        let seps = [BiStr::from("::"), BiStr::from(":")];
        let parts = s.split(&seps, SplitOptions::empty()).unwrap();
        assert_eq!(render(&parts), vec!["a", "b"]);
    }

    #[test]
    fn test_split_count_budget() {
        let s = BiStr::from("a,b,c,d");
        let seps = [BiStr::from(",")];
        let parts = s.split_n(&seps, 2, SplitOptions::empty()).unwrap();
        assert_eq!(render(&parts), vec!["a", "b,c,d"]);
        let parts = s.split_n(&seps, 1, SplitOptions::empty()).unwrap();
        assert_eq!(render(&parts), vec!["a,b,c,d"]);
        assert!(s.split_n(&seps, 0, SplitOptions::empty()).unwrap().is_empty());
    }

    #[test]
    fn test_split_empty_input() {
        let empty = BiStr::empty();
        let seps = [BiStr::from(",")];
        let kept = empty.split(&seps, SplitOptions::empty()).unwrap();
        assert_eq!(render(&kept), vec![""]);
        assert!(empty
            .split(&seps, SplitOptions::REMOVE_EMPTY)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_split_all_separators() {
        let s = BiStr::from(",,");
        let seps = [BiStr::from(",")];
        let kept = s.split(&seps, SplitOptions::empty()).unwrap();
        assert_eq!(render(&kept), vec!["", "", ""]);
        assert!(s.split(&seps, SplitOptions::REMOVE_EMPTY).unwrap().is_empty());
    }

    #[test]
    fn test_split_empty_separators_ignored() {
        let s = BiStr::from("a,b");
        let seps = [BiStr::empty(), BiStr::from(",")];
        let parts = s.split(&seps, SplitOptions::empty()).unwrap();
        assert_eq!(render(&parts), vec!["a", "b"]);
        // Only empty separators behaves like no separators at all.
        let parts = s.split(&[BiStr::empty()], SplitOptions::empty()).unwrap();
        assert_eq!(parts.len(), 1);
    }

    #[test]
    fn test_split_units() {
        let s = BiStr::from("a:b/c");
        let parts = s
            .split_units(&[b':' as u16, b'/' as u16], SplitOptions::empty())
            .unwrap();
        assert_eq!(render(&parts), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_units_count() {
        let s = BiStr::from("a,b,c");
        let parts = s
            .split_units_n(&[b',' as u16], 2, SplitOptions::empty())
            .unwrap();
        assert_eq!(render(&parts), vec!["a", "b,c"]);
    }

    #[test]
    fn test_split_whitespace() {
        let s = BiStr::from("  one  two\tthree ");
        let parts = s.split_whitespace().unwrap();
        assert_eq!(render(&parts), vec!["one", "two", "three"]);
        // Wide whitespace splits too.
        let wide = BiStr::from_units(&[b'a' as u16, 0x3000, b'b' as u16]);
        let parts = wide.split_whitespace().unwrap();
        assert_eq!(render(&parts), vec!["a", "b"]);
    }

    #[test]
    fn test_split_parts_keep_source_encoding() {
        let s = BiStr::from("é,x");
        let parts = s.split(&[BiStr::from(",")], SplitOptions::empty()).unwrap();
        assert_eq!(parts[0].encoding(), crate::encoding::Encoding::Wide);
        assert_eq!(parts[1].encoding(), crate::encoding::Encoding::Wide);
    }
}
