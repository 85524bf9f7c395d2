//! Right-aligned decimal text for DBF NUMERIC (N) fields.
//!
//! Values are rendered with `.` as the decimal point and without any grouping
//! separators. Rounding to the requested decimal places is round-half-even,
//! applied to the exact binary value of the [`f64`]. That means `0.125` rounds
//! to `0.12`, but `0.135` rounds to `0.14` since its binary value is slightly
//! above the tie.

use crate::charset::Charset;
use crate::error::{Error, Result};
use crate::text::{ALIGN_RIGHT, Padding};

/// Width of a NUMERIC field and how much of it is taken by the fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericLayout {
    field_length: usize,
    decimal_places: usize,
}

impl NumericLayout {
    /// Creates a layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldTooNarrow`] if `field_length` isn't greater than
    /// `decimal_places`. A field needs room for the decimal point if it has
    /// decimal places, and must not be empty otherwise.
    pub fn new(field_length: usize, decimal_places: usize) -> Result<Self> {
        if field_length <= decimal_places {
            return Err(Error::FieldTooNarrow {
                field_length,
                decimal_places,
            });
        }

        Ok(Self {
            field_length,
            decimal_places,
        })
    }

    #[must_use]
    pub fn field_length(self) -> usize {
        self.field_length
    }

    #[must_use]
    pub fn decimal_places(self) -> usize {
        self.decimal_places
    }

    /// The width left for the sign and whole part, after the decimal point and
    /// fraction digits.
    #[must_use]
    pub fn whole_part_width(self) -> usize {
        match self.decimal_places {
            0 => self.field_length,
            places => self.field_length - (places + 1),
        }
    }

    /// Formats `value` and encodes it right-aligned into a field of exactly
    /// [`field_length`](Self::field_length) bytes.
    ///
    /// If the text is wider than the field, it is cut to its first
    /// `field_length` characters, which loses the trailing digits. Size fields
    /// so this doesn't happen.
    #[must_use]
    pub fn encode(self, value: f64, charset: Charset) -> Vec<u8> {
        let text = format_decimal(value, self.decimal_places);
        if text.len() > self.field_length {
            log::debug!(
                "numeric value {value} needs {} characters, but the field is only {} wide",
                text.len(),
                self.field_length
            );
        }

        Padding::new()
            .alignment(ALIGN_RIGHT)
            .encode_with(&text, charset, self.field_length)
    }
}

/// Formats `value` with exactly `decimal_places` fraction digits.
///
/// A zero whole part is left out if there is a fraction, so `0.5` with two
/// decimal places is `.50`. Negative values that round to zero keep their sign.
/// `NaN` is `NaN` and infinities are `∞` and `-∞`.
///
/// # Examples
///
/// ```
/// # use dbf_field::format_decimal;
/// assert_eq!(format_decimal(3.14159, 2), "3.14");
/// assert_eq!(format_decimal(0.5, 2), ".50");
/// assert_eq!(format_decimal(2.5, 0), "2");
/// ```
#[must_use]
pub fn format_decimal(value: f64, decimal_places: usize) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }

    if value.is_infinite() {
        let text = if value.is_sign_negative() { "-\u{221e}" } else { "\u{221e}" };
        return text.to_owned();
    }

    // the float formatting of `core` already rounds ties to even
    let mut text = format!("{value:.decimal_places$}");
    if decimal_places > 0 {
        let digits = usize::from(text.starts_with('-'));
        if text[digits..].starts_with("0.") {
            text.remove(digits);
        }
    }

    text
}

/// Formats `value` into a right-aligned, space-padded NUMERIC field of
/// exactly `field_length` bytes with `decimal_places` fraction digits.
///
/// Accepts anything that converts losslessly into [`f64`], f.e. [`f32`],
/// [`i32`], or [`u16`].
///
/// # Errors
///
/// Returns [`Error::UnknownCharset`] if the charset label isn't recognized,
/// and [`Error::FieldTooNarrow`] if `field_length` isn't greater than
/// `decimal_places`.
///
/// # Examples
///
/// ```
/// let field = dbf_field::double_formatting(-1234.5, "US-ASCII", 8, 1).unwrap();
/// assert_eq!(field, b" -1234.5");
/// ```
pub fn double_formatting(
    value: impl Into<f64>,
    charset: &str,
    field_length: usize,
    decimal_places: usize,
) -> Result<Vec<u8>> {
    let layout = NumericLayout::new(field_length, decimal_places)?;
    let charset = Charset::for_label(charset)?;
    Ok(layout.encode(value.into(), charset))
}
