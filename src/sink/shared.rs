// src/sink/shared.rs
//! Mutex-guarded sink for use from several threads

use super::accumulator::BufferSink;
use super::config::SinkConfig;
use crate::buffer::{BufferLike, ByteBuffer};
use crate::error::Result;
use crossbeam::channel::Receiver;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A [`BufferSink`] behind one lock, cloneable across threads.
///
/// Every call takes the lock for its whole duration, so appends from
/// different threads never interleave within a chunk. Close notifications
/// run after the lock is released.
///
/// # Example
///
/// ```rust
/// use buftools::prelude::*;
/// use std::thread;
///
/// let sink = SharedSink::new();
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let sink = sink.clone();
///         thread::spawn(move || sink.append("ab"))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap()?;
/// }
///
/// sink.close()?;
/// assert_eq!(sink.render(), "abababab");
/// # Ok::<(), BufferError>(())
/// ```
#[derive(Clone, Default)]
pub struct SharedSink {
    inner: Arc<Mutex<BufferSink>>,
}

impl SharedSink {
    /// Creates an open, empty shared sink with default configuration.
    pub fn new() -> Self {
        Self::with_config(SinkConfig::default())
    }

    /// Creates an open, empty shared sink with custom configuration.
    pub fn with_config(config: SinkConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BufferSink::with_config(config))),
        }
    }

    // Sink operations are all-or-nothing, so a panic elsewhere while the
    // lock was held cannot leave a half-written aggregate behind.
    fn lock(&self) -> MutexGuard<'_, BufferSink> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`BufferSink::append`].
    pub fn append<'a>(&self, chunk: impl Into<BufferLike<'a>>) -> Result<bool> {
        self.lock().append(chunk)
    }

    /// See [`BufferSink::append_text`].
    pub fn append_text(&self, text: &str, encoding: Option<&str>) -> Result<bool> {
        self.lock().append_text(text, encoding)
    }

    /// See [`BufferSink::close`].
    pub fn close(&self) -> Result<()> {
        let notice = self.lock().finish(None)?;
        notice.fire();
        Ok(())
    }

    /// See [`BufferSink::close_with`].
    pub fn close_with<'a>(&self, chunk: impl Into<BufferLike<'a>>) -> Result<()> {
        let notice = self.lock().finish(Some(chunk.into()))?;
        notice.fire();
        Ok(())
    }

    /// See [`BufferSink::on_close`]. A handler registered after close runs
    /// immediately, outside the lock.
    pub fn on_close<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut sink = self.lock();
        if sink.is_writable() {
            sink.on_close(callback);
        } else {
            drop(sink);
            callback();
        }
    }

    /// See [`BufferSink::close_signal`].
    pub fn close_signal(&self) -> Receiver<()> {
        self.lock().close_signal()
    }

    /// See [`BufferSink::snapshot`].
    pub fn snapshot(&self) -> ByteBuffer {
        self.lock().snapshot()
    }

    /// See [`BufferSink::render`].
    pub fn render(&self) -> String {
        self.lock().render()
    }

    /// See [`BufferSink::len`].
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// See [`BufferSink::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// See [`BufferSink::is_writable`].
    pub fn is_writable(&self) -> bool {
        self.lock().is_writable()
    }
}

impl From<BufferSink> for SharedSink {
    fn from(sink: BufferSink) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sink)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BufferError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_concurrent_appends_do_not_interleave() {
        let sink = SharedSink::new();

        let handles: Vec<_> = (0..8u8)
            .map(|id| {
                let sink = sink.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        sink.append(&[id; 4]).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = sink.snapshot();
        assert_eq!(snap.len(), 8 * 100 * 4);
        for chunk in snap.as_slice().chunks(4) {
            assert!(chunk.iter().all(|&b| b == chunk[0]));
        }
    }

    #[test]
    fn test_callback_may_reenter() {
        let sink = SharedSink::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let probe = sink.clone();
        let seen_in_callback = Arc::clone(&seen);
        sink.on_close(move || {
            assert!(!probe.is_writable());
            seen_in_callback.store(probe.len(), Ordering::SeqCst);
        });

        sink.close_with("done").unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 4);
        assert_eq!(sink.append("x"), Err(BufferError::StreamClosed));
    }

    #[test]
    fn test_close_signal_across_threads() {
        let sink = SharedSink::new();
        let closed = sink.close_signal();

        let writer = sink.clone();
        let handle = thread::spawn(move || {
            writer.append("payload").unwrap();
            writer.close().unwrap();
        });

        closed.recv().unwrap();
        handle.join().unwrap();
        assert_eq!(sink.render(), "payload");
    }
}
