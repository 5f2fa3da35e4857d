// src/buffer/like.rs
//! Buffer-or-text arguments
//!
//! Every operation that takes bytes also takes text. [`BufferLike`] carries
//! either form and is resolved to bytes once, at the call boundary.

use super::core::ByteBuffer;
use crate::encoding::Encoding;
use crate::error::{BufferError, Result};
use std::any::Any;
use std::borrow::Cow;

/// A byte buffer or a text value with the encoding used to transcode it.
///
/// Plain `&str` and `String` values carry no encoding. They are transcoded
/// with the default of whoever resolves them: UTF-8 for the buffer
/// operations, the configured encoding for a [`BufferSink`](crate::BufferSink).
///
/// # Examples
///
/// ```
/// use buftools::BufferLike;
/// # use buftools::BufferError;
///
/// let text = BufferLike::from("hi");
/// assert_eq!(&*text.to_bytes()?, b"hi");
///
/// let hex = BufferLike::text("6869", "hex")?;
/// assert_eq!(&*hex.to_bytes()?, b"hi");
/// # Ok::<(), BufferError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferLike<'a> {
    /// Raw bytes, used as-is
    Bytes(Cow<'a, [u8]>),
    /// Text to be transcoded with the given encoding, if any
    Text(Cow<'a, str>, Option<Encoding>),
}

impl<'a> BufferLike<'a> {
    /// Text with an encoding given by name.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Encoding`] if the name is not a supported encoding.
    pub fn text(text: impl Into<Cow<'a, str>>, encoding: &str) -> Result<Self> {
        Ok(Self::Text(text.into(), Some(encoding.parse()?)))
    }

    /// Resolves to bytes, transcoding text without an encoding as UTF-8.
    ///
    /// Borrows whenever no transcoding is needed.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Format`] if hex text is malformed.
    pub fn to_bytes(&self) -> Result<Cow<'_, [u8]>> {
        self.to_bytes_or(Encoding::default())
    }

    /// Resolves to bytes, transcoding text without an encoding with `fallback`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Format`] if hex text is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use buftools::{BufferLike, Encoding};
    /// # use buftools::BufferError;
    ///
    /// let plain = BufferLike::from("cafe");
    /// assert_eq!(&*plain.to_bytes_or(Encoding::Hex)?, &[0xca, 0xfe]);
    ///
    /// let tagged = BufferLike::text("cafe", "utf8")?;
    /// assert_eq!(&*tagged.to_bytes_or(Encoding::Hex)?, b"cafe");
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn to_bytes_or(&self, fallback: Encoding) -> Result<Cow<'_, [u8]>> {
        match self {
            Self::Bytes(bytes) => Ok(Cow::Borrowed(bytes.as_ref())),
            Self::Text(text, encoding) => encoding.unwrap_or(fallback).encode(text),
        }
    }

    /// Converts a dynamically typed value at a host boundary.
    ///
    /// Accepts `Vec<u8>`, `ByteBuffer`, `String`, `&'static str` and
    /// `&'static [u8]`. Text carries no encoding.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::TypeArgument`] for any other type.
    ///
    /// # Examples
    ///
    /// ```
    /// use buftools::{BufferError, BufferLike};
    ///
    /// let value: Box<dyn std::any::Any> = Box::new(String::from("abc"));
    /// assert!(BufferLike::from_any(&*value).is_ok());
    ///
    /// let value: Box<dyn std::any::Any> = Box::new(3.5f64);
    /// assert!(matches!(
    ///     BufferLike::from_any(&*value),
    ///     Err(BufferError::TypeArgument(_))
    /// ));
    /// ```
    pub fn from_any(value: &'a (dyn Any + 'static)) -> Result<Self> {
        if let Some(bytes) = value.downcast_ref::<Vec<u8>>() {
            Ok(Self::from(bytes))
        } else if let Some(buf) = value.downcast_ref::<ByteBuffer>() {
            Ok(Self::from(buf))
        } else if let Some(text) = value.downcast_ref::<String>() {
            Ok(Self::from(text))
        } else if let Some(text) = value.downcast_ref::<&'static str>() {
            Ok(Self::from(*text))
        } else if let Some(bytes) = value.downcast_ref::<&'static [u8]>() {
            Ok(Self::from(*bytes))
        } else {
            Err(BufferError::not_buffer_like())
        }
    }
}

impl<'a> From<&'a [u8]> for BufferLike<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(Cow::Borrowed(bytes))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for BufferLike<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(Cow::Borrowed(bytes.as_slice()))
    }
}

impl<'a> From<&'a Vec<u8>> for BufferLike<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(Cow::Borrowed(bytes.as_slice()))
    }
}

impl From<Vec<u8>> for BufferLike<'static> {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Cow::Owned(bytes))
    }
}

impl<'a> From<&'a ByteBuffer> for BufferLike<'a> {
    fn from(buf: &'a ByteBuffer) -> Self {
        Self::Bytes(Cow::Borrowed(buf.as_slice()))
    }
}

impl<'a> From<&'a mut ByteBuffer> for BufferLike<'a> {
    fn from(buf: &'a mut ByteBuffer) -> Self {
        Self::Bytes(Cow::Borrowed(buf.as_slice()))
    }
}

impl<'a> From<&'a str> for BufferLike<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(Cow::Borrowed(text), None)
    }
}

impl<'a> From<&'a String> for BufferLike<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(Cow::Borrowed(text.as_str()), None)
    }
}

impl From<String> for BufferLike<'static> {
    fn from(text: String) -> Self {
        Self::Text(Cow::Owned(text), None)
    }
}

/// The value written by [`fill`](crate::buffer::fill): one byte, or a
/// pattern tiled across the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillValue<'a> {
    /// Set every byte to this value
    Byte(u8),
    /// Repeat this pattern
    Pattern(BufferLike<'a>),
}

impl<'a> FillValue<'a> {
    /// Converts a dynamically typed value at a host boundary.
    ///
    /// Integers (`u8`, `i32`, `i64`, `u32`) are taken as a byte value; anything
    /// [`BufferLike::from_any`] accepts is taken as a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidArgument`] for an integer outside 0–255 and
    /// [`BufferError::TypeArgument`] for any other type.
    pub fn from_any(value: &'a (dyn Any + 'static)) -> Result<Self> {
        let int = if let Some(v) = value.downcast_ref::<u8>() {
            Some(i64::from(*v))
        } else if let Some(v) = value.downcast_ref::<i32>() {
            Some(i64::from(*v))
        } else if let Some(v) = value.downcast_ref::<u32>() {
            Some(i64::from(*v))
        } else {
            value.downcast_ref::<i64>().copied()
        };

        match int {
            Some(v) => u8::try_from(v).map(Self::Byte).map_err(|_| {
                BufferError::InvalidArgument(format!("fill value {} is not a byte", v))
            }),
            None => BufferLike::from_any(value)
                .map(Self::Pattern)
                .map_err(|_| {
                    BufferError::TypeArgument(
                        "fill value should be either a string, a buffer or an integer".into(),
                    )
                }),
        }
    }
}

impl From<u8> for FillValue<'_> {
    fn from(byte: u8) -> Self {
        Self::Byte(byte)
    }
}

impl<'a> From<BufferLike<'a>> for FillValue<'a> {
    fn from(pattern: BufferLike<'a>) -> Self {
        Self::Pattern(pattern)
    }
}

impl<'a> From<&'a str> for FillValue<'a> {
    fn from(text: &'a str) -> Self {
        Self::Pattern(text.into())
    }
}

impl<'a> From<&'a [u8]> for FillValue<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Pattern(bytes.into())
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for FillValue<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Pattern(bytes.into())
    }
}

impl<'a> From<&'a ByteBuffer> for FillValue<'a> {
    fn from(buf: &'a ByteBuffer) -> Self {
        Self::Pattern(buf.into())
    }
}
