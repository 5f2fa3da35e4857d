// src/lib.rs
//! # Binary-Safe Buffer Toolkit
//!
//! Primitive operations over byte buffers plus a write-only accumulator.
//!
//! Features:
//! - Equality, unsigned lexicographic comparison and substring search
//! - In-place fill and clear that return the same buffer for chaining
//! - Reverse, concatenation and hex encoding that always allocate fresh storage
//! - Buffer or text accepted at every boundary through [`BufferLike`]
//! - [`BufferSink`]: append chunks, close once, read the aggregate back
//! - Secure memory zeroing of every [`ByteBuffer`] using the `zeroize` crate
//!
//! # Example
//!
//! ```rust
//! use buftools::prelude::*;
//! use buftools::buffer;
//!
//! let mut buf = ByteBuffer::new(4);
//! buffer::fill(&mut buf, "ab")?;
//! assert_eq!(buffer::to_hex(&buf), "61626162");
//! assert_eq!(buffer::index_of(&buf, "ba", 0)?, Some(1));
//! # Ok::<(), BufferError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod encoding;
pub mod error;
pub mod sink;

// Re-export main types
pub use buffer::{BufferLike, ByteBuffer, FillValue};
pub use encoding::Encoding;
pub use error::{BufferError, Result, ResultExt};
pub use sink::{BufferSink, SharedSink, SinkConfig};

/// Commonly used imports.
pub mod prelude {
    pub use crate::buffer::{BufferLike, ByteBuffer, FillValue};
    pub use crate::encoding::Encoding;
    pub use crate::error::{BufferError, Result};
    pub use crate::sink::{BufferSink, SharedSink, SinkConfig};
}
