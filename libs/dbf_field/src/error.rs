//! Error handling types.

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Potential errors to encounter when reading or encoding DBF field data.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The error originated from the byte source, usually because it ran out
    /// of data before a value was fully read.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The character set label isn't known.
    #[error("unknown character set: {0:?}")]
    UnknownCharset(String),

    /// A numeric field cannot hold the requested amount of decimal places.
    #[error("numeric field of length {field_length} cannot hold {decimal_places} decimal places")]
    FieldTooNarrow {
        /// The total width of the field.
        field_length: usize,
        /// The requested amount of decimal places.
        decimal_places: usize,
    },
}

impl Error {
    /// Whether this error signals that the byte source was exhausted.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }
}
