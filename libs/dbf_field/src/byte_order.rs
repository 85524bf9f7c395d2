//! Little-endian reads and byte swapping.
//!
//! DBF headers store their integers little-endian. The readers here pull bytes
//! in order from a [`ByteSource`] and never look ahead.

use std::io;

use crate::error::{Error, Result};

/// Returns an [`io::Error`] with kind [`io::ErrorKind::UnexpectedEof`].
fn eof() -> Error {
    io::Error::from(io::ErrorKind::UnexpectedEof).into()
}

/// A source of bytes, delivered in file order.
///
/// By default, this is implemented for byte slices, [`IoRead`] and mutable
/// references to other sources. The slice implementation advances the slice
/// as bytes are consumed.
pub trait ByteSource {
    /// Reads the next byte.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the source is exhausted or unreadable.
    fn read_u8(&mut self) -> Result<u8>;

    /// Reads a constant size chunk of bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the source cannot deliver `N` more bytes.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        for b in &mut buf {
            *b = self.read_u8()?;
        }
        Ok(buf)
    }
}

// this implementation is required so the source can be reborrowed
impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_u8(&mut self) -> Result<u8> {
        (**self).read_u8()
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        (**self).read_array()
    }
}

impl ByteSource for &[u8] {
    fn read_u8(&mut self) -> Result<u8> {
        let (&out, rem) = self.split_first().ok_or_else(eof)?;
        *self = rem;
        Ok(out)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let (out, rem) = self.split_first_chunk::<N>().ok_or_else(eof)?;
        *self = rem;
        Ok(*out)
    }
}

/// Wraps a [`io::Read`] implementation so it can be used as a [`ByteSource`].
#[derive(Debug)]
pub struct IoRead<R> {
    inner: R,
}

impl<R> IoRead<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: io::Read> ByteSource for IoRead<R> {
    fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_array()?;
        Ok(b)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }
}

/// Reads a little-endian [`u16`], consuming 2 bytes.
///
/// # Errors
///
/// Returns [`Error::Io`] if the source cannot deliver 2 bytes.
///
/// # Examples
///
/// ```
/// let mut data: &[u8] = &[0x34, 0x12, 0xFF];
/// assert_eq!(dbf_field::read_le_u16(&mut data).unwrap(), 0x1234);
/// assert_eq!(data, &[0xFF]);
/// ```
pub fn read_le_u16<S: ByteSource>(mut src: S) -> Result<u16> {
    src.read_array().map(u16::from_le_bytes)
}

/// Reads a little-endian [`u32`], consuming 4 bytes.
///
/// # Errors
///
/// Returns [`Error::Io`] if the source cannot deliver 4 bytes.
pub fn read_le_u32<S: ByteSource>(mut src: S) -> Result<u32> {
    src.read_array().map(u32::from_le_bytes)
}

/// Reads a little-endian two's-complement [`i16`], consuming 2 bytes.
///
/// # Errors
///
/// Returns [`Error::Io`] if the source cannot deliver 2 bytes.
pub fn read_le_i16<S: ByteSource>(mut src: S) -> Result<i16> {
    src.read_array().map(i16::from_le_bytes)
}

/// Reads a little-endian two's-complement [`i32`], consuming 4 bytes.
///
/// # Errors
///
/// Returns [`Error::Io`] if the source cannot deliver 4 bytes.
pub fn read_le_i32<S: ByteSource>(mut src: S) -> Result<i32> {
    src.read_array().map(i32::from_le_bytes)
}

/// Swaps the two bytes of `x`. Converts between host and little-endian order
/// on big-endian hosts.
#[must_use]
pub const fn swap_u16(x: u16) -> u16 {
    x.swap_bytes()
}

/// Reverses the four bytes of `x`.
#[must_use]
pub const fn swap_u32(x: u32) -> u32 {
    x.swap_bytes()
}

/// Like [`swap_u16`], for the same bit pattern read as [`i16`].
#[must_use]
pub const fn swap_i16(x: i16) -> i16 {
    x.swap_bytes()
}

/// Like [`swap_u32`], for the same bit pattern read as [`i32`].
#[must_use]
pub const fn swap_i32(x: i32) -> i32 {
    x.swap_bytes()
}
