//! Fixed-width, padded text fields.

use crate::charset::Charset;
use crate::error::Result;

/// Where the text is placed within a padded field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Alignment {
    /// Text starts at offset 0, padding follows.
    #[default]
    Left,
    /// Padding comes first, the text ends at the end of the field.
    Right,
}

/// Left alignment. This is the default.
pub const ALIGN_LEFT: Alignment = Alignment::Left;
/// Right alignment, as used by numeric fields.
pub const ALIGN_RIGHT: Alignment = Alignment::Right;

impl Alignment {
    const LEFT_CODE: i32 = 10;
    const RIGHT_CODE: i32 = 12;

    /// Converts a legacy integer alignment tag.
    ///
    /// Any tag other than the right alignment tag is treated as [`Left`](Self::Left).
    ///
    /// ```
    /// # use dbf_field::Alignment;
    /// assert_eq!(Alignment::from_code(Alignment::Right.code()), Alignment::Right);
    /// assert_eq!(Alignment::from_code(-1), Alignment::Left);
    /// ```
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            Self::RIGHT_CODE => Self::Right,
            _ => Self::Left,
        }
    }

    /// The legacy integer tag for this alignment.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Left => Self::LEFT_CODE,
            Self::Right => Self::RIGHT_CODE,
        }
    }
}

/// How text that doesn't fit into its field is cut.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Truncation {
    /// Keep at most `length` characters, then drop more trailing characters
    /// until the encoded text fits. Never splits a character.
    ///
    /// For single-byte charsets this is the same as keeping the first `length`
    /// characters.
    #[default]
    Chars,
    /// Cut the encoded bytes at `length`, even if that splits a multi-byte
    /// sequence.
    Bytes,
}

/// Options for encoding text into a fixed-width field.
///
/// The default is left-aligned, space-padded, and truncating by characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Padding {
    pub alignment: Alignment,
    pub pad_byte: u8,
    pub truncation: Truncation,
}

impl Default for Padding {
    fn default() -> Self {
        Self::new()
    }
}

impl Padding {
    /// Creates the default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            alignment: Alignment::Left,
            pad_byte: b' ',
            truncation: Truncation::Chars,
        }
    }

    /// Sets the alignment.
    #[must_use]
    pub const fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the byte the field is padded with.
    #[must_use]
    pub const fn pad_byte(mut self, pad_byte: u8) -> Self {
        self.pad_byte = pad_byte;
        self
    }

    /// Sets how over-long text is cut.
    #[must_use]
    pub const fn truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }

    /// Encodes `text` into a field of exactly `length` bytes, resolving the
    /// `charset` label first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCharset`](crate::Error::UnknownCharset) if the
    /// charset label isn't recognized.
    pub fn encode(&self, text: &str, charset: &str, length: usize) -> Result<Vec<u8>> {
        let charset = Charset::for_label(charset)?;
        Ok(self.encode_with(text, charset, length))
    }

    /// Encodes `text` into a field of exactly `length` bytes.
    #[must_use]
    pub fn encode_with(&self, text: &str, charset: Charset, length: usize) -> Vec<u8> {
        let mut encoded = charset.encode(text);
        if encoded.len() > length {
            log::trace!(
                "truncating {} encoded bytes to field length {length}",
                encoded.len()
            );

            encoded = match self.truncation {
                Truncation::Chars => truncate_chars(text, charset, length),
                Truncation::Bytes => {
                    encoded.truncate(length);
                    encoded
                },
            };
        }

        self.pad(&encoded, length)
    }

    /// Places `data` into a buffer of `length` bytes.
    ///
    /// `data` must not be longer than `length`.
    fn pad(&self, data: &[u8], length: usize) -> Vec<u8> {
        debug_assert!(data.len() <= length, "data must fit into the field");

        if data.len() == length {
            return data.to_vec();
        }

        let offset = match self.alignment {
            Alignment::Left => 0,
            Alignment::Right => length - data.len(),
        };

        let mut buf = vec![self.pad_byte; length];
        buf[offset..][..data.len()].copy_from_slice(data);
        buf
    }
}

/// Encodes the longest prefix of at most `length` characters of `text` whose
/// encoding fits into `length` bytes.
fn truncate_chars(text: &str, charset: Charset, length: usize) -> Vec<u8> {
    let mut end = text.char_indices().nth(length).map_or(text.len(), |(i, _)| i);
    loop {
        let prefix = &text[..end];
        let encoded = charset.encode(prefix);
        if encoded.len() <= length {
            return encoded;
        }

        // this terminates: the empty prefix always fits
        end = prefix.char_indices().next_back().map_or(0, |(i, _)| i);
    }
}

/// Encodes `text` into a left-aligned, space-padded field of exactly `length`
/// bytes.
///
/// Text that doesn't fit is cut to its first `length` characters. See
/// [`Padding`] for the other options.
///
/// # Errors
///
/// Returns [`Error::UnknownCharset`](crate::Error::UnknownCharset) if the
/// charset label isn't recognized.
///
/// # Examples
///
/// ```
/// let field = dbf_field::text_padding("ABC", "US-ASCII", 6).unwrap();
/// assert_eq!(field, b"ABC   ");
/// ```
pub fn text_padding(text: &str, charset: &str, length: usize) -> Result<Vec<u8>> {
    Padding::new().encode(text, charset, length)
}

/// Like [`text_padding`], with the given alignment.
///
/// # Errors
///
/// Returns [`Error::UnknownCharset`](crate::Error::UnknownCharset) if the
/// charset label isn't recognized.
pub fn text_padding_aligned(
    text: &str,
    charset: &str,
    length: usize,
    alignment: Alignment,
) -> Result<Vec<u8>> {
    Padding::new()
        .alignment(alignment)
        .encode(text, charset, length)
}

/// Like [`text_padding`], with the given alignment and padding byte.
///
/// # Errors
///
/// Returns [`Error::UnknownCharset`](crate::Error::UnknownCharset) if the
/// charset label isn't recognized.
pub fn text_padding_with(
    text: &str,
    charset: &str,
    length: usize,
    alignment: Alignment,
    pad_byte: u8,
) -> Result<Vec<u8>> {
    Padding::new()
        .alignment(alignment)
        .pad_byte(pad_byte)
        .encode(text, charset, length)
}
