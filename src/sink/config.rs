// src/sink/config.rs
//! Sink configuration

use crate::buffer::BUF_MAX_SIZE;
use crate::encoding::Encoding;

/// Configuration for a [`BufferSink`](crate::sink::BufferSink).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Encoding for text appended without an explicit encoding name, and
    /// for [`render`](crate::sink::BufferSink::render)
    pub encoding: Encoding,
    /// Largest aggregate the sink accepts, in bytes
    pub max_len: usize,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            encoding: Encoding::Utf8,
            max_len: BUF_MAX_SIZE,
        }
    }
}
