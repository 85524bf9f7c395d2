//! DBF LOGICAL (L) fields.

/// The value of a LOGICAL field.
///
/// DBF files may leave a logical field uninitialized, usually as `?` or a
/// space, so decoding yields three states rather than a [`bool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TriState {
    True,
    False,
    Unknown,
}

impl TriState {
    /// Decodes a LOGICAL field byte.
    ///
    /// `Y`, `y`, `T`, and `t` are true. `N`, `n`, `F`, and `f` are false. Every
    /// other byte is unknown.
    #[must_use]
    pub const fn from_byte(b: u8) -> Self {
        match b {
            b'Y' | b'y' | b'T' | b't' => Self::True,
            b'N' | b'n' | b'F' | b'f' => Self::False,
            _ => Self::Unknown,
        }
    }

    /// The byte a DBF writer stores for this value.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::True => b'T',
            Self::False => b'F',
            Self::Unknown => b'?',
        }
    }

    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    #[must_use]
    pub const fn is_false(self) -> bool {
        matches!(self, Self::False)
    }

    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unknown, Self::from)
    }
}

impl From<TriState> for Option<bool> {
    fn from(value: TriState) -> Self {
        match value {
            TriState::True => Some(true),
            TriState::False => Some(false),
            TriState::Unknown => None,
        }
    }
}

/// Decodes a LOGICAL field byte. See [`TriState::from_byte`].
///
/// # Examples
///
/// ```
/// use dbf_field::{TriState, to_boolean};
///
/// assert_eq!(to_boolean(b'y'), TriState::True);
/// assert_eq!(to_boolean(b'F'), TriState::False);
/// assert_eq!(to_boolean(b'?'), TriState::Unknown);
/// ```
#[must_use]
pub const fn to_boolean(b: u8) -> TriState {
    TriState::from_byte(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_byte() {
        for b in 0..=u8::MAX {
            let expected = match b {
                b'Y' | b'y' | b'T' | b't' => TriState::True,
                b'N' | b'n' | b'F' | b'f' => TriState::False,
                _ => TriState::Unknown,
            };
            assert_eq!(to_boolean(b), expected, "wrong state for byte {b:#04x}");
        }
    }

    #[test]
    fn unknown_is_distinct() {
        assert!(to_boolean(b' ').is_unknown(), "space is unknown");
        assert!(!to_boolean(b' ').is_true(), "unknown isn't true");
        assert!(!to_boolean(b' ').is_false(), "unknown isn't false");
        assert_eq!(Option::<bool>::from(to_boolean(b'?')), None);
    }

    #[test]
    fn canonical_bytes_decode_back() {
        for state in [TriState::True, TriState::False, TriState::Unknown] {
            assert_eq!(to_boolean(state.to_byte()), state, "{state:?} must survive");
        }
    }

    #[test]
    fn conversions() {
        assert_eq!(TriState::from(true), TriState::True);
        assert_eq!(TriState::from(Some(false)), TriState::False);
        assert_eq!(TriState::from(None::<bool>), TriState::Unknown);
        assert_eq!(Option::<bool>::from(TriState::True), Some(true));
    }
}
