// src/buffer/core.rs
//! Core buffer structure
//!
//! This module provides the fundamental [`ByteBuffer`] type: an owned,
//! fixed-length byte sequence whose memory is securely zeroed on drop.

use crate::encoding::Encoding;
use crate::error::Result;
use std::fmt;
use zeroize::Zeroize;

/// Maximum buffer size (1GB)
pub const BUF_MAX_SIZE: usize = 1_000_000_000;

/// An owned, fixed-length, binary-safe byte sequence.
///
/// Embedded zero bytes are ordinary data. The length never changes after
/// construction; operations either mutate the bytes in place or produce a
/// new buffer.
///
/// The buffer automatically and securely zeros its memory on drop using
/// the [`zeroize`] crate.
///
/// # Examples
///
/// ```
/// use buftools::ByteBuffer;
///
/// let buf = ByteBuffer::from_slice(b"a\0b");
/// assert_eq!(buf.len(), 3);
/// assert_eq!(buf.as_slice()[1], 0);
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Zeroize)]
#[zeroize(drop)]
pub struct ByteBuffer {
    /// Internal data storage (securely erased on drop)
    pub(crate) data: Vec<u8>,
}

impl ByteBuffer {
    /// Creates a zero-filled buffer of `len` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds [`BUF_MAX_SIZE`] (1GB).
    ///
    /// # Examples
    ///
    /// ```
    /// use buftools::ByteBuffer;
    ///
    /// let buf = ByteBuffer::new(4);
    /// assert_eq!(buf.as_slice(), &[0, 0, 0, 0]);
    /// ```
    #[inline]
    pub fn new(len: usize) -> Self {
        assert!(
            len <= BUF_MAX_SIZE,
            "Buffer size {} exceeds maximum {}",
            len,
            BUF_MAX_SIZE
        );
        Self { data: vec![0; len] }
    }

    /// Takes ownership of an existing vector without copying.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Copies a slice into a new buffer.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec(),
        }
    }

    /// Transcodes `text` into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Format`](crate::BufferError::Format) if `encoding`
    /// is hex and `text` is not valid hex.
    ///
    /// # Examples
    ///
    /// ```
    /// use buftools::{ByteBuffer, Encoding};
    /// # use buftools::BufferError;
    ///
    /// let buf = ByteBuffer::from_text("0a0b", Encoding::Hex)?;
    /// assert_eq!(buf.as_slice(), &[0x0a, 0x0b]);
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn from_text(text: &str, encoding: Encoding) -> Result<Self> {
        Ok(Self {
            data: encoding.encode(text)?.into_owned(),
        })
    }

    /// Returns the number of bytes in the buffer.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no bytes.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the buffer contents.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns the buffer contents for in-place mutation.
    ///
    /// # Examples
    ///
    /// ```
    /// use buftools::ByteBuffer;
    ///
    /// let mut buf = ByteBuffer::from_slice(b"hello");
    /// buf.as_mut_slice()[0] = b'H';
    /// assert_eq!(buf.as_slice(), b"Hello");
    /// ```
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its storage without copying.
    pub fn into_vec(mut self) -> Vec<u8> {
        std::mem::take(&mut self.data)
    }

    /// Decodes the contents as text.
    pub fn to_text(&self, encoding: Encoding) -> String {
        encoding.decode(&self.data)
    }

    /// Securely zeros every byte, keeping the length.
    ///
    /// Uses compiler-resistant zeroing via the [`zeroize`] crate.
    pub fn burn(&mut self) {
        // Slice zeroize keeps the length; Vec::zeroize would clear it.
        self.data.as_mut_slice().zeroize();
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for ByteBuffer {
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self::from_vec(data)
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_slice(bytes)
    }
}

impl From<ByteBuffer> for Vec<u8> {
    fn from(buf: ByteBuffer) -> Self {
        buf.into_vec()
    }
}

impl PartialEq<[u8]> for ByteBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.data == other
    }
}

impl PartialEq<&[u8]> for ByteBuffer {
    fn eq(&self, other: &&[u8]) -> bool {
        self.data == *other
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for ByteBuffer {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.data == other[..]
    }
}

impl fmt::Debug for ByteBuffer {
    /// Formats as `<ByteBuffer 2a 2a 2a 2a>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<ByteBuffer")?;
        for byte in &self.data {
            write!(f, " {:02x}", byte)?;
        }
        f.write_str(">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let buf = ByteBuffer::new(16);
        assert_eq!(buf.len(), 16);
        assert!(buf.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_empty() {
        let buf = ByteBuffer::new(0);
        assert!(buf.is_empty());
        assert_eq!(buf, ByteBuffer::default());
    }

    #[test]
    fn test_from_vec_keeps_allocation() {
        let data = vec![1, 2, 3, 4, 5];
        let ptr = data.as_ptr();
        let buf = ByteBuffer::from_vec(data);
        assert_eq!(buf.as_slice().as_ptr(), ptr);
        assert_eq!(buf.into_vec(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_burn_keeps_length() {
        let mut buf = ByteBuffer::from_slice(b"sensitive");
        buf.burn();
        assert_eq!(buf.len(), 9);
        assert!(buf.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_debug_format() {
        let buf = ByteBuffer::from_slice(&[0x2a, 0x00, 0xff]);
        assert_eq!(format!("{:?}", buf), "<ByteBuffer 2a 00 ff>");
        assert_eq!(format!("{:?}", ByteBuffer::new(0)), "<ByteBuffer>");
    }

    #[test]
    fn test_text_round_trip() {
        let buf = ByteBuffer::from_text("Hello, world!", Encoding::Utf8).unwrap();
        assert_eq!(buf.to_text(Encoding::Utf8), "Hello, world!");
        assert_eq!(buf.to_text(Encoding::Hex), "48656c6c6f2c20776f726c6421");
    }
}
