//! Character set resolution and encoding.
//!
//! Labels are resolved in this order:
//!
//! - `US-ASCII` and its aliases map to a strict 7-bit charset.
//! - `ISO-8859-1` and its aliases map to strict Latin-1, so `€` is unmappable.
//! - `UTF-16` writes a big-endian byte order mark followed by big-endian data.
//!   `UTF-16LE` and `UTF-16BE` write no byte order mark.
//! - The DOS code pages used by DBF language drivers (`IBM437`, `cp850`, `852`,
//!   ...) are encoded with the tables of [`oem_cp`].
//! - Everything else goes through [`encoding_rs`], which follows the WHATWG
//!   Encoding Standard.
//!
//! The first three exist because the WHATWG standard folds ASCII and Latin-1
//! into `windows-1252` and reads a bare `UTF-16` as little-endian, neither of
//! which matches what DBF tooling writes for those names.
//!
//! Characters a charset cannot represent are replaced with `?`.

use encoding_rs::{Encoder, EncoderResult, Encoding};

use crate::error::{Error, Result};

/// Byte written in place of characters the charset cannot represent.
const REPLACEMENT: u8 = b'?';

/// Labels that resolve to [`Charset::ASCII`].
///
/// Matched ASCII case-insensitively after trimming whitespace, like all the
/// label lists here.
const ASCII_LABELS: &[&str] = &[
    "us-ascii",
    "ascii",
    "us",
    "iso646-us",
    "iso-ir-6",
    "iso_646.irv:1983",
    "iso_646.irv:1991",
    "ansi_x3.4-1968",
    "ansi_x3.4-1986",
    "cp367",
    "ibm367",
    "csascii",
    "646",
];

/// Labels that resolve to [`Charset::LATIN_1`].
const LATIN_1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso8859_1",
    "iso_8859-1",
    "iso_8859_1",
    "iso_8859-1:1987",
    "iso88591",
    "iso-ir-100",
    "latin1",
    "l1",
    "cp819",
    "ibm819",
    "ibm-819",
    "csisolatin1",
];

/// Labels for UTF-16 with a byte order mark.
const UTF_16_LABELS: &[&str] = &["utf-16", "utf16", "unicode"];

/// Prefixes accepted in front of a DOS code page number.
const OEM_PREFIXES: &[&str] = &["csibm", "ibm-", "ibm", "cp-", "cp"];

fn matches_label(labels: &[&str], label: &str) -> bool {
    labels.iter().any(|l| l.eq_ignore_ascii_case(label))
}

/// A DOS code page with a table in [`oem_cp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OemCodePage {
    /// US, the original IBM PC code page.
    Cp437,
    /// Western European.
    Cp850,
    /// Central European.
    Cp852,
    /// Turkish.
    Cp857,
    /// Portuguese.
    Cp860,
    /// Icelandic.
    Cp861,
    /// Canadian French.
    Cp863,
    /// Nordic.
    Cp865,
}

impl OemCodePage {
    /// Looks up a code page by number.
    #[must_use]
    pub const fn from_number(number: u16) -> Option<Self> {
        Some(match number {
            437 => Self::Cp437,
            850 => Self::Cp850,
            852 => Self::Cp852,
            857 => Self::Cp857,
            860 => Self::Cp860,
            861 => Self::Cp861,
            863 => Self::Cp863,
            865 => Self::Cp865,
            _ => return None,
        })
    }

    /// Parses labels like `IBM437`, `cp850`, `ibm-852`, or `865`.
    fn from_label(label: &str) -> Option<Self> {
        let lower = label.to_ascii_lowercase();
        let number = OEM_PREFIXES
            .iter()
            .find_map(|p| lower.strip_prefix(p))
            .unwrap_or(&lower);

        // `parse` would also accept a leading `+`
        if !number.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        number.parse().ok().and_then(Self::from_number)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cp437 => "IBM437",
            Self::Cp850 => "IBM850",
            Self::Cp852 => "IBM852",
            Self::Cp857 => "IBM857",
            Self::Cp860 => "IBM860",
            Self::Cp861 => "IBM861",
            Self::Cp863 => "IBM863",
            Self::Cp865 => "IBM865",
        }
    }

    /// Encodes a single character, if the code page has it.
    fn encode_char(self, c: char) -> Option<u8> {
        use oem_cp::code_table::{
            ENCODING_TABLE_CP437, ENCODING_TABLE_CP850, ENCODING_TABLE_CP852,
            ENCODING_TABLE_CP857, ENCODING_TABLE_CP860, ENCODING_TABLE_CP861,
            ENCODING_TABLE_CP863, ENCODING_TABLE_CP865,
        };
        use oem_cp::encode_string_checked;

        // the lower half of every DOS code page is ASCII
        if c.is_ascii() {
            return u8::try_from(c).ok();
        }

        let mut buf = [0u8; 4];
        let c = &*c.encode_utf8(&mut buf);
        let encoded = match self {
            Self::Cp437 => encode_string_checked(c, &ENCODING_TABLE_CP437),
            Self::Cp850 => encode_string_checked(c, &ENCODING_TABLE_CP850),
            Self::Cp852 => encode_string_checked(c, &ENCODING_TABLE_CP852),
            Self::Cp857 => encode_string_checked(c, &ENCODING_TABLE_CP857),
            Self::Cp860 => encode_string_checked(c, &ENCODING_TABLE_CP860),
            Self::Cp861 => encode_string_checked(c, &ENCODING_TABLE_CP861),
            Self::Cp863 => encode_string_checked(c, &ENCODING_TABLE_CP863),
            Self::Cp865 => encode_string_checked(c, &ENCODING_TABLE_CP865),
        };

        encoded.and_then(|bytes| bytes.first().copied())
    }
}

/// A character set that text can be encoded to.
///
/// Obtain one with [`Charset::for_label`] or use one of the constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset(Repr);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repr {
    Ascii,
    Latin1,
    Utf16,
    Utf16Le,
    Utf16Be,
    Oem(OemCodePage),
    Encoding(&'static Encoding),
}

impl Charset {
    /// Strict 7-bit US-ASCII.
    pub const ASCII: Self = Self(Repr::Ascii);

    /// Strict ISO-8859-1, covering U+0000 to U+00FF.
    pub const LATIN_1: Self = Self(Repr::Latin1);

    /// UTF-8.
    pub const UTF_8: Self = Self(Repr::Encoding(encoding_rs::UTF_8));

    /// Resolves a charset from its label, f.e. `US-ASCII`, `IBM850`,
    /// `windows-1252`, or `UTF-8`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCharset`] if the label isn't recognized.
    pub fn for_label(label: &str) -> Result<Self> {
        let trimmed = label.trim();
        let repr = if matches_label(ASCII_LABELS, trimmed) {
            Repr::Ascii
        } else if matches_label(LATIN_1_LABELS, trimmed) {
            Repr::Latin1
        } else if matches_label(UTF_16_LABELS, trimmed) {
            Repr::Utf16
        } else if let Some(code_page) = OemCodePage::from_label(trimmed) {
            Repr::Oem(code_page)
        } else {
            let encoding = Encoding::for_label(trimmed.as_bytes())
                .ok_or_else(|| Error::UnknownCharset(label.to_owned()))?;

            if encoding == encoding_rs::UTF_16LE {
                Repr::Utf16Le
            } else if encoding == encoding_rs::UTF_16BE {
                Repr::Utf16Be
            } else if encoding == encoding_rs::REPLACEMENT {
                // this label only exists to stop decoding of dangerous encodings.
                // it cannot encode anything.
                return Err(Error::UnknownCharset(label.to_owned()));
            } else {
                Repr::Encoding(encoding)
            }
        };

        log::trace!("resolved charset label {label:?} to {}", Self(repr).name());
        Ok(Self(repr))
    }

    /// The canonical name of this charset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self.0 {
            Repr::Ascii => "US-ASCII",
            Repr::Latin1 => "ISO-8859-1",
            Repr::Utf16 => "UTF-16",
            Repr::Utf16Le => encoding_rs::UTF_16LE.name(),
            Repr::Utf16Be => encoding_rs::UTF_16BE.name(),
            Repr::Oem(code_page) => code_page.name(),
            Repr::Encoding(encoding) => encoding.name(),
        }
    }

    /// Whether every character is encoded as exactly one byte.
    ///
    /// For these charsets, truncating text by characters and by bytes is the
    /// same thing.
    #[must_use]
    pub fn is_single_byte(self) -> bool {
        match self.0 {
            Repr::Ascii | Repr::Latin1 | Repr::Oem(_) => true,
            Repr::Utf16 | Repr::Utf16Le | Repr::Utf16Be => false,
            Repr::Encoding(encoding) => encoding.is_single_byte(),
        }
    }

    /// Encodes `text`, replacing characters this charset cannot represent
    /// with `?`.
    #[must_use]
    pub fn encode(self, text: &str) -> Vec<u8> {
        let mut out = Vec::new();
        let replaced = self.encode_into(text, &mut out);
        if replaced != 0 {
            log::debug!(
                "replaced {replaced} unmappable characters while encoding to {}",
                self.name()
            );
        }

        out
    }

    /// Whether every character of `text` can be represented in this charset.
    #[must_use]
    pub fn can_encode(self, text: &str) -> bool {
        match self.0 {
            Repr::Ascii => text.is_ascii(),
            Repr::Latin1 => text.chars().all(|c| u8::try_from(c).is_ok()),
            Repr::Utf16 | Repr::Utf16Le | Repr::Utf16Be => true,
            Repr::Encoding(encoding) if encoding == encoding_rs::UTF_8 => true,
            Repr::Oem(_) | Repr::Encoding(_) => self.encode_into(text, &mut Vec::new()) == 0,
        }
    }

    /// Appends the encoded `text` to `out` and returns how many characters had
    /// to be replaced.
    fn encode_into(self, text: &str, out: &mut Vec<u8>) -> usize {
        match self.0 {
            Repr::Ascii => encode_by_char(text, out, |c| {
                u8::try_from(c).ok().filter(u8::is_ascii)
            }),
            Repr::Latin1 => encode_by_char(text, out, |c| u8::try_from(c).ok()),
            Repr::Oem(code_page) => encode_by_char(text, out, |c| code_page.encode_char(c)),
            Repr::Utf16 => {
                // no byte order mark without any data
                if !text.is_empty() {
                    out.extend([0xFE, 0xFF]);
                    out.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
                }
                0
            },
            Repr::Utf16Le => {
                out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
                0
            },
            Repr::Utf16Be => {
                out.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
                0
            },
            Repr::Encoding(encoding) => encode_with(&mut encoding.new_encoder(), text, out),
        }
    }
}

/// Encodes a single-byte charset one character at a time, writing `?` where
/// `map` has no byte. Returns the amount of replaced characters.
fn encode_by_char(text: &str, out: &mut Vec<u8>, map: impl Fn(char) -> Option<u8>) -> usize {
    out.reserve(text.len());
    let mut replaced = 0usize;
    for c in text.chars() {
        if let Some(b) = map(c) {
            out.push(b);
        } else {
            out.push(REPLACEMENT);
            replaced += 1;
        }
    }
    replaced
}

/// Drives an [`Encoder`] over all of `text`, writing `?` for every unmappable
/// character. Returns the amount of replaced characters.
fn encode_with(encoder: &mut Encoder, mut text: &str, out: &mut Vec<u8>) -> usize {
    let mut replaced = 0usize;
    loop {
        // the bound only fails to compute on overflow. if that happens, reserve
        // something reasonable and let the loop handle `OutputFull`.
        let needed = encoder
            .max_buffer_length_from_utf8_without_replacement(text.len())
            .unwrap_or(text.len());
        out.reserve(needed);

        let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(text, out, true);
        text = &text[read..];

        match result {
            EncoderResult::InputEmpty => return replaced,
            EncoderResult::OutputFull => {},
            EncoderResult::Unmappable(_) => {
                out.push(REPLACEMENT);
                replaced += 1;
            },
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn charset(label: &str) -> Charset {
        Charset::for_label(label).expect("label must be known")
    }

    #[test]
    fn ascii_labels() {
        for label in ["US-ASCII", "us-ascii", " ASCII ", "ANSI_X3.4-1968", "cp367"] {
            assert_eq!(charset(label), Charset::ASCII, "{label} must be strict ascii");
        }
    }

    #[test]
    fn whatwg_labels() {
        assert_eq!(charset("windows-1252").name(), "windows-1252");
        assert_eq!(charset("cp1252").name(), "windows-1252");
        assert_eq!(charset("utf8"), Charset::UTF_8);
        assert_eq!(charset("UTF-16LE").name(), "UTF-16LE");
        assert_eq!(charset("Shift_JIS").name(), "Shift_JIS");
    }

    #[test]
    fn unknown_labels() {
        let labels = [
            "",
            "no-such-charset",
            "replacement",
            "csiso2022kr",
            "cp",
            "ibm+437",
            "cp999",
        ];
        for label in labels {
            let err = Charset::for_label(label).expect_err("label must be unknown");
            assert!(
                matches!(&err, Error::UnknownCharset(l) if l == label),
                "wrong error for {label:?}: {err:?}"
            );
        }
    }

    #[test]
    fn ascii_replaces_non_ascii() {
        assert_eq!(Charset::ASCII.encode("h\u{e9}llo"), b"h?llo");
        assert_eq!(Charset::ASCII.encode("\u{1F600}"), b"?");
    }

    #[test]
    fn single_byte_encoding() {
        let cp1252 = charset("windows-1252");
        assert_eq!(cp1252.encode("h\u{e9}llo \u{20ac}"), b"h\xe9llo \x80");
        assert_eq!(cp1252.encode("\u{3042}"), b"?");
        assert!(cp1252.is_single_byte(), "windows-1252 is single-byte");
    }

    #[test]
    fn multi_byte_encoding() {
        assert_eq!(Charset::UTF_8.encode("\u{e9}"), [0xC3, 0xA9]);
        assert_eq!(charset("Shift_JIS").encode("\u{3042}"), [0x82, 0xA0]);
        assert_eq!(charset("utf-16le").encode("A\u{e9}"), [0x41, 0x00, 0xE9, 0x00]);
        assert_eq!(charset("utf-16be").encode("A"), [0x00, 0x41]);
        assert!(!Charset::UTF_8.is_single_byte(), "utf-8 is multi-byte");
    }

    #[test]
    fn can_encode() {
        assert!(Charset::ASCII.can_encode("hello"), "plain ascii");
        assert!(!Charset::ASCII.can_encode("h\u{e9}llo"), "e-acute isn't ascii");
        assert!(charset("windows-1252").can_encode("h\u{e9}llo"), "e-acute is in 1252");
        assert!(!charset("windows-1252").can_encode("\u{3042}"), "hiragana isn't in 1252");
        assert!(Charset::UTF_8.can_encode("\u{3042}"), "utf-8 encodes everything");
        assert!(Charset::LATIN_1.can_encode("\u{ff}"), "y-diaeresis is latin-1");
        assert!(!Charset::LATIN_1.can_encode("\u{20ac}"), "euro sign isn't latin-1");
        assert!(charset("IBM850").can_encode("\u{e9}\u{f8}"), "e-acute and o-slash are in 850");
        assert!(!charset("IBM437").can_encode("\u{20ac}"), "euro sign isn't in 437");
    }

    #[test]
    fn oem_labels() {
        for (label, name) in [
            ("IBM437", "IBM437"),
            ("cp437", "IBM437"),
            ("437", "IBM437"),
            ("csIBM437", "IBM437"),
            ("Cp850", "IBM850"),
            ("ibm-850", "IBM850"),
            ("IBM852", "IBM852"),
            ("cp-852", "IBM852"),
            ("865", "IBM865"),
        ] {
            assert_eq!(charset(label).name(), name, "wrong code page for {label}");
        }

        assert_eq!(charset("cp866").name(), "IBM866", "866 comes from encoding_rs");
    }

    #[test]
    fn oem_encoding() {
        for label in ["IBM437", "IBM850", "IBM852", "IBM865"] {
            let cp = charset(label);
            assert!(cp.is_single_byte(), "{label} is single-byte");
            assert_eq!(cp.encode("\u{e9}A"), [0x82, 0x41], "e-acute in {label}");
            assert_eq!(cp.encode("\u{3042}"), b"?", "hiragana isn't in {label}");
        }

        assert_eq!(charset("IBM437").encode("\u{f1}\u{2591}"), [0xA4, 0xB0]);
        assert_eq!(charset("IBM437").encode("\u{20ac}"), b"?");
        assert_eq!(charset("IBM850").encode("\u{f8}"), [0x9B]);
        assert_eq!(charset("IBM852").encode("\u{142}"), [0x88]);
        assert_eq!(charset("IBM865").encode("\u{f8}"), [0x9B]);
    }

    #[test]
    fn latin_1_is_strict() {
        for label in ["ISO-8859-1", "ISO8859_1", "latin1", "l1"] {
            assert_eq!(charset(label), Charset::LATIN_1, "{label} must be strict latin-1");
        }

        assert_eq!(Charset::LATIN_1.encode("caf\u{e9} \u{20ac}"), b"caf\xe9 ?");
        assert_eq!(Charset::LATIN_1.encode("\u{80}"), [0x80], "c1 controls map to themselves");
    }

    #[test]
    fn utf_16_with_bom() {
        let utf16 = charset("UTF-16");
        assert_eq!(utf16.name(), "UTF-16");
        assert_eq!(utf16.encode("\u{e9}A"), [0xFE, 0xFF, 0x00, 0xE9, 0x00, 0x41]);
        assert!(utf16.encode("").is_empty(), "empty text has no byte order mark");
        assert!(!utf16.is_single_byte(), "utf-16 is multi-byte");
    }
}
