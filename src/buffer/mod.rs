// src/buffer/mod.rs
//! Byte buffers and the stateless operations over them

mod core;
mod like;
mod ops;
mod search;

pub use self::core::{BUF_MAX_SIZE, ByteBuffer};
pub use like::{BufferLike, FillValue};
pub use ops::{clear, compare, concat, equals, fill, from_hex, index_of, reverse, to_hex};

pub(crate) use ops::concat_slices;
