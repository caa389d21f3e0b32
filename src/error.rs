//! Error handling for the bistr library
//!
//! Argument and range validation happens in the checked public entry points,
//! which report errors through [`BiStrError`] before any result buffer is
//! allocated or published. The unchecked internal scan/copy routines never
//! validate and never fail.

use thiserror::Error;

/// Main error type for the bistr library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BiStrError {
    /// An index, count or width parameter fell outside the valid range
    #[error("argument out of range: {param}: {message}")]
    ArgumentOutOfRange {
        /// Name of the offending parameter
        param: &'static str,
        /// Reason the value was rejected
        message: &'static str,
    },

    /// A parameter had an invalid value (not a range problem)
    #[error("invalid argument: {param}: {message}")]
    InvalidArgument {
        /// Name of the offending parameter
        param: &'static str,
        /// Reason the value was rejected
        message: &'static str,
    },

    /// Direct indexed access outside `[0, length)`
    #[error("index out of range: index {index}, length {length}")]
    IndexOutOfRange {
        /// The invalid index
        index: usize,
        /// The string length in code units
        length: usize,
    },

    /// A result length overflowed or could not be allocated
    ///
    /// Checked length arithmetic normalizes overflow to this variant; a
    /// wrapped or truncated length is never produced.
    #[error("out of memory: result of {units} code units not representable")]
    OutOfMemory {
        /// Number of code units requested
        units: usize,
    },
}

impl BiStrError {
    /// Create an argument-out-of-range error naming the offending parameter
    pub fn out_of_range(param: &'static str, message: &'static str) -> Self {
        Self::ArgumentOutOfRange { param, message }
    }

    /// Create an invalid-argument error naming the offending parameter
    pub fn invalid_argument(param: &'static str, message: &'static str) -> Self {
        Self::InvalidArgument { param, message }
    }

    /// Create an index-out-of-range error
    pub fn index_out_of_range(index: usize, length: usize) -> Self {
        Self::IndexOutOfRange { index, length }
    }

    /// Create an out-of-memory error for a result of `units` code units
    pub fn out_of_memory(units: usize) -> Self {
        Self::OutOfMemory { units }
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::ArgumentOutOfRange { .. } => "range",
            Self::InvalidArgument { .. } => "argument",
            Self::IndexOutOfRange { .. } => "index",
            Self::OutOfMemory { .. } => "memory",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BiStrError>;

/// Validate a forward window `[start, start + count)` against `length`.
///
/// `start == length` with `count == 0` is a valid empty window.
#[inline]
pub fn check_window(start: usize, count: usize, length: usize) -> Result<()> {
    if start > length {
        return Err(BiStrError::out_of_range("start", "exceeds string length"));
    }
    if count > length - start {
        return Err(BiStrError::out_of_range(
            "count",
            "start + count exceeds string length",
        ));
    }
    Ok(())
}

/// Validate a backward window `(start - count, start]` against `length`.
///
/// `start` is the last position examined; the scan moves toward lower
/// indices and covers `count` positions. An empty string accepts only the
/// degenerate window at the origin (`start == 0`, `count ≤ 1`); callers
/// then report a clean miss without scanning.
#[inline]
pub fn check_backward_window(start: usize, count: usize, length: usize) -> Result<()> {
    if length == 0 {
        if start != 0 {
            return Err(BiStrError::out_of_range("start", "exceeds string length"));
        }
    } else if start >= length {
        return Err(BiStrError::out_of_range("start", "exceeds string length"));
    }
    if count > start + 1 {
        return Err(BiStrError::out_of_range(
            "count",
            "window extends before the start of the string",
        ));
    }
    Ok(())
}

/// Compute `a + b` as a result length, normalizing overflow to out-of-memory.
#[inline]
pub fn checked_len_add(a: usize, b: usize) -> Result<usize> {
    a.checked_add(b)
        .ok_or(BiStrError::OutOfMemory { units: usize::MAX })
}

/// Compute `a * b` as a result length, normalizing overflow to out-of-memory.
#[inline]
pub fn checked_len_mul(a: usize, b: usize) -> Result<usize> {
    a.checked_mul(b)
        .ok_or(BiStrError::OutOfMemory { units: usize::MAX })
}
