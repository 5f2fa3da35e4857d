// src/sink/mod.rs
//! Write-only buffer accumulator

mod accumulator;
mod config;
mod shared;

pub use accumulator::BufferSink;
pub use config::SinkConfig;
pub use shared::SharedSink;
