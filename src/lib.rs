//! # BiStr: dual-encoding immutable strings
//!
//! An immutable string engine that stores each instance in the narrowest of
//! two physical encodings: a compact one-byte-per-unit form for ASCII-only
//! content, and a wide two-byte-per-unit form for everything else. The
//! encoding is invisible at the API surface: every operation works over the
//! logical 16-bit code-unit sequence, and equality, ordering and hashing
//! agree across encodings.
//!
//! ## Features
//!
//! - **Half-size ASCII storage**: ASCII text occupies one byte per unit,
//!   selected automatically at construction
//! - **Mutate-as-new**: concat, replace, trim, pad, split and friends build
//!   new strings; no-ops hand back the input at reference-bump cost
//! - **Windowed search**: forward and backward unit, needle-set and
//!   substring scans with validated windows
//! - **Stable hashing**: a deterministic 32-bit content hash fit for
//!   persistence, plus a case-folded variant
//! - **Checked allocation**: result sizes go through checked arithmetic and
//!   oversized requests fail with a typed error
//!
//! ## Quick Start
//!
//! ```rust
//! use bistr::{BiStr, SplitOptions};
//!
//! let compact = BiStr::from("hello");
//! let wide = BiStr::from("héllo");
//! assert_ne!(compact.encoding(), wide.encoding());
//!
//! let joined = BiStr::join(&BiStr::from(", "), &[compact.clone(), wide])?;
//! assert_eq!(joined.to_string(), "hello, héllo");
//!
//! let parts = joined.split(&[BiStr::from(", ")], SplitOptions::empty())?;
//! assert_eq!(parts.len(), 2);
//! assert_eq!(parts[0], compact);
//! # Ok::<(), bistr::BiStrError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod encoding;
pub mod error;
pub mod string;

pub use buffer::StrBuf;
pub use config::{EncodingPolicy, EngineConfig};
pub use encoding::Encoding;
pub use error::{BiStrError, Result};
pub use string::{
    compare_ordinal, compare_ordinal_ignore_case, compare_ordinal_ignore_case_in,
    compare_ordinal_in, compare_ordinal_opt, BiStr, SplitOptions, UnitIter, Units,
};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library with default settings
pub fn init() {
    log::debug!("bistr version {} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_init() {
        init();
    }

    #[test]
    fn test_public_surface() {
        let s = BiStr::from("surface");
        assert_eq!(s.encoding(), Encoding::Compact);
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        let buf = StrBuf::new(0, Encoding::Compact);
        assert!(buf.is_ok());
    }
}
