// src/encoding.rs
//! Text encodings used when text crosses into a byte buffer
//!
//! Only two encodings are understood: UTF-8 (the default) and raw hex.

use crate::error::{BufferError, Result};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A named text encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// UTF-8, names `utf8` and `utf-8`
    #[default]
    Utf8,
    /// Two hex digits per byte, name `hex`
    Hex,
}

impl Encoding {
    /// Canonical name of the encoding.
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Hex => "hex",
        }
    }

    /// Transcodes `text` into bytes.
    ///
    /// UTF-8 borrows the string's own bytes; hex allocates the decoded bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Format`] if the encoding is hex and `text` is not
    /// valid hex.
    pub fn encode<'a>(self, text: &'a str) -> Result<Cow<'a, [u8]>> {
        match self {
            Self::Utf8 => Ok(Cow::Borrowed(text.as_bytes())),
            Self::Hex => Ok(Cow::Owned(hex::decode(text)?)),
        }
    }

    /// Renders `bytes` as text. Invalid UTF-8 sequences become U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Hex => hex::encode(bytes),
        }
    }
}

impl FromStr for Encoding {
    type Err = BufferError;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "hex" => Ok(Self::Hex),
            _ => Err(BufferError::Encoding(name.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
