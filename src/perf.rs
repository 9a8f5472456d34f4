//! Lightweight performance instrumentation.
//!
//! A [`Scope`] logs its lifetime as a `debug` event on the `tedit::perf`
//! target when dropped. Enable with `RUST_LOG=tedit::perf=debug`.

use std::time::Instant;

#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(target: "tedit::perf", scope = self.name, elapsed_ms, "timing");
    }
}

/// Start timing `name`; the measurement is logged when the guard drops.
pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}
