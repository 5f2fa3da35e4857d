// src/sink/accumulator.rs
//! Append-then-close buffer accumulator
//!
//! A [`BufferSink`] starts Open, accepts any number of appended chunks, and
//! moves to Closed exactly once. Closing fires every registered close
//! notification. Nothing can be appended afterwards, but the aggregate stays
//! readable.
//!
//! # Growth
//!
//! Each append allocates a new aggregate of exactly `old_len + chunk_len`
//! bytes and copies the old content followed by the chunk. The previous
//! aggregate is a [`ByteBuffer`] and is zeroed as it is dropped. A failed
//! append leaves the aggregate untouched.

use super::config::SinkConfig;
use crate::buffer::{BufferLike, ByteBuffer, concat_slices};
use crate::encoding::Encoding;
use crate::error::{BufferError, Result, ResultExt};
use crossbeam::channel::{self, Receiver, Sender};
use std::fmt;
use std::io;
use tracing::{debug, trace};

type CloseCallback = Box<dyn FnOnce() + Send + 'static>;

/// Write-only accumulator collecting chunks into one contiguous buffer.
///
/// The sink is not internally synchronized. Share it across threads through
/// [`SharedSink`](crate::sink::SharedSink).
///
/// # Example
///
/// ```rust
/// use buftools::prelude::*;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let closes = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&closes);
///
/// let mut sink = BufferSink::new();
/// sink.on_close(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// sink.append("Hello,")?;
/// sink.append(" ")?;
/// sink.append("world!")?;
/// sink.close()?;
///
/// assert_eq!(sink.render(), "Hello, world!");
/// assert_eq!(closes.load(Ordering::SeqCst), 1);
/// assert_eq!(sink.append("more"), Err(BufferError::StreamClosed));
/// # Ok::<(), buftools::BufferError>(())
/// ```
pub struct BufferSink {
    writable: bool,
    /// Aggregate content; `None` until the first append
    buffer: Option<ByteBuffer>,
    config: SinkConfig,
    callbacks: Vec<CloseCallback>,
    signals: Vec<Sender<()>>,
}

impl BufferSink {
    /// Creates an open, empty sink with default configuration.
    pub fn new() -> Self {
        Self::with_config(SinkConfig::default())
    }

    /// Creates an open, empty sink with custom configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use buftools::prelude::*;
    ///
    /// let sink = BufferSink::with_config(SinkConfig {
    ///     encoding: Encoding::Hex,
    ///     max_len: 1024,
    /// });
    /// assert!(sink.is_writable());
    /// ```
    pub fn with_config(config: SinkConfig) -> Self {
        Self {
            writable: true,
            buffer: None,
            config,
            callbacks: Vec::new(),
            signals: Vec::new(),
        }
    }

    /// Returns the sink's configuration.
    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    /// Returns `true` until the sink is closed.
    #[inline]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Returns the length of the aggregate in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.as_ref().map_or(0, ByteBuffer::len)
    }

    /// Returns `true` if nothing has been appended.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a chunk of bytes or text.
    ///
    /// Text built with [`BufferLike::text`] uses its own encoding; plain
    /// `&str` and `String` chunks use the configured one. Always returns
    /// `true`: the sink never applies backpressure, so the caller may append
    /// again immediately.
    ///
    /// # Errors
    ///
    /// - [`BufferError::StreamClosed`] if the sink is closed
    /// - [`BufferError::Format`] if hex text is malformed
    /// - [`BufferError::InvalidArgument`] if the aggregate would exceed
    ///   [`SinkConfig::max_len`]
    pub fn append<'a>(&mut self, chunk: impl Into<BufferLike<'a>>) -> Result<bool> {
        if !self.writable {
            return Err(BufferError::StreamClosed);
        }
        let chunk = chunk.into();
        let bytes = chunk.to_bytes_or(self.config.encoding)?;
        self.grow(&bytes)?;
        Ok(true)
    }

    /// Appends text transcoded with the named encoding, or with the configured
    /// encoding when `encoding` is `None`.
    ///
    /// # Errors
    ///
    /// As [`append`](Self::append), plus [`BufferError::Encoding`] for an
    /// unknown encoding name.
    ///
    /// # Examples
    ///
    /// ```
    /// use buftools::prelude::*;
    ///
    /// let mut sink = BufferSink::new();
    /// sink.append_text("hi ", None)?;
    /// sink.append_text("7468657265", Some("hex"))?;
    /// assert_eq!(sink.render(), "hi there");
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn append_text(&mut self, text: &str, encoding: Option<&str>) -> Result<bool> {
        let encoding = encoding.map(str::parse::<Encoding>).transpose()?;
        self.append(BufferLike::Text(text.into(), encoding))
    }

    /// Closes the sink and fires the close notifications.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::StreamClosed`] if the sink is already closed.
    pub fn close(&mut self) -> Result<()> {
        self.finish(None)?.fire();
        Ok(())
    }

    /// Appends a final chunk, then closes the sink.
    ///
    /// If the final chunk is rejected the sink stays open.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::StreamClosed`] if the sink is already closed, or
    /// any error [`append`](Self::append) returns for the chunk.
    pub fn close_with<'a>(&mut self, chunk: impl Into<BufferLike<'a>>) -> Result<()> {
        self.finish(Some(chunk.into()))?.fire();
        Ok(())
    }

    /// Registers a handler run once when the sink closes.
    ///
    /// On an already closed sink the handler runs immediately.
    pub fn on_close<F>(&mut self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.writable {
            self.callbacks.push(Box::new(callback));
        } else {
            callback();
        }
    }

    /// Returns a one-shot receiver that gets `()` when the sink closes.
    ///
    /// On an already closed sink the signal is delivered immediately.
    ///
    /// # Examples
    ///
    /// ```
    /// use buftools::prelude::*;
    ///
    /// let mut sink = BufferSink::new();
    /// let closed = sink.close_signal();
    /// assert!(closed.try_recv().is_err());
    ///
    /// sink.close()?;
    /// assert!(closed.try_recv().is_ok());
    /// # Ok::<(), BufferError>(())
    /// ```
    pub fn close_signal(&mut self) -> Receiver<()> {
        let (tx, rx) = channel::bounded(1);
        if self.writable {
            self.signals.push(tx);
        } else {
            let _ = tx.send(());
        }
        rx
    }

    /// Returns a copy of the aggregate. An empty sink yields an empty buffer.
    pub fn snapshot(&self) -> ByteBuffer {
        self.buffer.clone().unwrap_or_default()
    }

    /// Returns a read-only view of the aggregate.
    pub fn as_slice(&self) -> &[u8] {
        self.buffer.as_ref().map_or(&[][..], ByteBuffer::as_slice)
    }

    /// Decodes the aggregate with the configured encoding.
    pub fn render(&self) -> String {
        self.config.encoding.decode(self.as_slice())
    }

    /// Closes the sink and hands back the notifications to fire.
    ///
    /// Split from firing so a caller holding a lock can release it first.
    pub(crate) fn finish(&mut self, chunk: Option<BufferLike<'_>>) -> Result<CloseNotice> {
        if !self.writable {
            return Err(BufferError::StreamClosed);
        }
        if let Some(chunk) = chunk {
            self.append(chunk)?;
        }
        self.writable = false;
        debug!(total_len = self.len(), "buffer sink closed");

        Ok(CloseNotice {
            callbacks: std::mem::take(&mut self.callbacks),
            signals: std::mem::take(&mut self.signals),
        })
    }

    fn grow(&mut self, chunk: &[u8]) -> Result<()> {
        let old_len = self.len();
        let new_len = old_len.saturating_add(chunk.len());
        if new_len > self.config.max_len {
            return Err(BufferError::InvalidArgument(format!(
                "sink length {} would exceed maximum {}",
                new_len, self.config.max_len
            )));
        }

        let next = match self.buffer.take() {
            Some(old) => concat_slices(&[old.as_slice(), chunk]),
            None => ByteBuffer::from_slice(chunk),
        };
        self.buffer = Some(next);
        trace!(chunk_len = chunk.len(), total_len = new_len, "appended chunk");
        Ok(())
    }
}

impl Default for BufferSink {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BufferSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferSink")
            .field("writable", &self.writable)
            .field("len", &self.len())
            .field("config", &self.config)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl io::Write for BufferSink {
    /// Appends `buf` in full. Fails with `BrokenPipe` once the sink is closed.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf).map(|_| buf.len()).into_io()
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Close notifications taken from a sink that has just closed.
#[must_use = "notifications only run when fired"]
pub(crate) struct CloseNotice {
    callbacks: Vec<CloseCallback>,
    signals: Vec<Sender<()>>,
}

impl CloseNotice {
    pub(crate) fn fire(self) {
        trace!(
            callbacks = self.callbacks.len(),
            signals = self.signals.len(),
            "firing close notifications"
        );
        for callback in self.callbacks {
            callback();
        }
        for signal in self.signals {
            // The receiver may already be gone.
            let _ = signal.send(());
        }
    }
}
