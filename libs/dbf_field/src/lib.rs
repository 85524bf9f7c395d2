//! # DBF field primitives
//!
//! Byte-level helpers for reading and writing fields of dBASE (DBF) tables.
//! This crate doesn't parse or write DBF files itself. It provides the pieces
//! a reader or writer needs:
//!
//! - little-endian integer reads from a [`ByteSource`] and byte swaps
//! - fixed-width, padded text fields in any supported charset: [`text_padding`]
//! - right-aligned NUMERIC (N) fields: [`double_formatting`]
//! - LOGICAL (L) field decoding into a [`TriState`]: [`to_boolean`]
//! - a few byte and text predicates: [`strip_spaces`], [`contains`],
//!   [`is_pure_ascii`]
//!
//! Every encoder returns a buffer of exactly the requested field width.
//!
//! ```
//! use dbf_field::{ALIGN_RIGHT, TriState};
//!
//! let name = dbf_field::text_padding("ABC", "US-ASCII", 6)?;
//! assert_eq!(name, b"ABC   ");
//!
//! let code = dbf_field::text_padding_aligned("ABC", "US-ASCII", 6, ALIGN_RIGHT)?;
//! assert_eq!(code, b"   ABC");
//!
//! let price = dbf_field::double_formatting(3.14159, "US-ASCII", 8, 2)?;
//! assert_eq!(price, b"    3.14");
//!
//! assert_eq!(dbf_field::to_boolean(b'y'), TriState::True);
//! # Ok::<(), dbf_field::Error>(())
//! ```
//!
//! # Features
//!
//! - `serde`: Implements `Serialize` and `Deserialize` for [`Alignment`],
//!   [`Truncation`], [`Padding`], and [`TriState`].

// for benchmarks and tests
#[cfg(test)]
use criterion as _;
#[cfg(test)]
use serde_json as _;

pub mod byte_order;
pub mod bytes;
pub mod charset;
pub mod error;
pub mod logical;
pub mod numeric;
pub mod text;

pub use byte_order::{
    ByteSource, IoRead, read_le_i16, read_le_i32, read_le_u16, read_le_u32, swap_i16, swap_i32,
    swap_u16, swap_u32,
};
pub use bytes::{contains, is_pure_ascii, strip_spaces};
#[expect(deprecated, reason = "kept for callers of the old name")]
pub use bytes::trim_left_spaces;
pub use charset::{Charset, OemCodePage};
pub use error::{Error, Result};
pub use logical::{TriState, to_boolean};
pub use numeric::{NumericLayout, double_formatting, format_decimal};
pub use text::{
    ALIGN_LEFT, ALIGN_RIGHT, Alignment, Padding, Truncation, text_padding, text_padding_aligned,
    text_padding_with,
};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn padding_from_config() {
        let padding: Padding = serde_json::from_str(r#"{ "alignment": "right", "pad_byte": 48 }"#)
            .expect("valid padding config");
        assert_eq!(
            padding,
            Padding::new().alignment(ALIGN_RIGHT).pad_byte(b'0'),
            "missing fields must use defaults"
        );

        let field = padding
            .encode("7", "US-ASCII", 3)
            .expect("ascii is known");
        assert_eq!(field, b"007");
    }

    #[test]
    fn enum_names() {
        let json = serde_json::to_string(&(ALIGN_LEFT, Truncation::Bytes, TriState::Unknown))
            .expect("serializing must work");
        assert_eq!(json, r#"["left","bytes","unknown"]"#);
    }
}
