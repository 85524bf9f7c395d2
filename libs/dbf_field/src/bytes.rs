//! Small predicates over raw field bytes and text.

use crate::charset::Charset;

/// Shared by every [`is_pure_ascii`] call. Immutable, so no locking is needed.
static ASCII: Charset = Charset::ASCII;

/// Returns a copy of `bytes` with every space (`0x20`) removed.
///
/// Order of the remaining bytes is kept.
///
/// ```
/// assert_eq!(dbf_field::strip_spaces(b" 1 2 3 "), b"123");
/// ```
#[must_use]
pub fn strip_spaces(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().filter(|&b| b != b' ').collect()
}

/// Removes every space, not only the leading ones.
#[deprecated(note = "removes all spaces, not only leading ones; use `strip_spaces`")]
#[must_use]
pub fn trim_left_spaces(bytes: &[u8]) -> Vec<u8> {
    strip_spaces(bytes)
}

/// Whether `bytes` contains `value`. Absent data contains nothing.
#[must_use]
pub fn contains(bytes: Option<&[u8]>, value: u8) -> bool {
    bytes.is_some_and(|b| b.contains(&value))
}

/// Whether every character of `text` is in the range U+0000 to U+007F.
///
/// Absent and empty text is pure ASCII.
///
/// ```
/// # use dbf_field::is_pure_ascii;
/// assert!(is_pure_ascii(Some("hello")));
/// assert!(!is_pure_ascii(Some("h\u{e9}llo")));
/// assert!(is_pure_ascii(None));
/// ```
#[must_use]
pub fn is_pure_ascii(text: Option<&str>) -> bool {
    text.is_none_or(|t| ASCII.can_encode(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip() {
        assert_eq!(strip_spaces(&[0x41, 0x20, 0x42]), [0x41, 0x42]);
        assert_eq!(strip_spaces(b"    "), b"");
        assert_eq!(strip_spaces(b""), b"");
        assert_eq!(strip_spaces(b"\t1\n"), b"\t1\n", "only 0x20 is removed");
    }

    #[test]
    fn strip_is_subsequence() {
        let input = b"  12 .5  x\x00 \xff ";
        let output = strip_spaces(input);
        assert!(!output.contains(&b' '), "no spaces may remain");

        let mut rest = input.iter();
        for b in &output {
            assert!(rest.any(|i| i == b), "output must be a subsequence of the input");
        }
    }

    #[test]
    #[expect(deprecated)]
    fn trim_left_strips_everything() {
        assert_eq!(trim_left_spaces(b" a b "), strip_spaces(b" a b "));
        assert_eq!(trim_left_spaces(b" a b "), b"ab");
    }

    #[test]
    fn contains_byte() {
        assert!(contains(Some(&[0x01, 0x02, 0x03][..]), 0x02), "0x02 is there");
        assert!(!contains(Some(&[0x01, 0x02, 0x03][..]), 0x04), "0x04 isn't there");
        assert!(!contains(Some(&[][..]), 0x00), "empty contains nothing");
        assert!(!contains(None, 0x00), "absent contains nothing");
    }

    #[test]
    fn pure_ascii() {
        assert!(is_pure_ascii(Some("hello")), "plain ascii");
        assert!(is_pure_ascii(Some("")), "empty is vacuously ascii");
        assert!(is_pure_ascii(Some("\u{0}\u{7f}")), "range bounds are ascii");
        assert!(!is_pure_ascii(Some("h\u{e9}llo")), "e-acute isn't ascii");
        assert!(!is_pure_ascii(Some("\u{80}")), "first non-ascii code point");
        assert!(is_pure_ascii(None), "absent is vacuously ascii");
    }
}
