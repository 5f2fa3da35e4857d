// demos/sink_usage.rs
//! Collecting chunks with a sink, from one thread and from several

use buftools::prelude::*;
use std::thread;

fn main() -> Result<()> {
    println!("=== Single-Threaded Sink ===\n");

    let mut sink = BufferSink::new();
    sink.on_close(|| println!("close notification fired"));

    sink.append("Hello,")?;
    sink.append(" ")?;
    sink.append_text("776f726c6421", Some("hex"))?;
    sink.close()?;

    println!("rendered: {}", sink.render());
    println!("snapshot: {:?}", sink.snapshot());

    if let Err(e) = sink.append("too late") {
        println!("append after close: {}", e);
    }

    println!("\n=== Shared Sink ===\n");

    let shared = SharedSink::new();
    let closed = shared.close_signal();

    let workers: Vec<_> = (0..4)
        .map(|id| {
            let sink = shared.clone();
            thread::spawn(move || sink.append(format!("[worker {}]", id)))
        })
        .collect();

    for worker in workers {
        match worker.join() {
            Ok(result) => {
                result?;
            }
            Err(_) => println!("worker panicked"),
        }
    }

    shared.close()?;
    let _ = closed.recv();
    println!("collected {} bytes: {}", shared.len(), shared.render());

    Ok(())
}
