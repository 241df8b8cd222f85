//! Logging infrastructure: structured logging via `tracing`, a single
//! stdout layer driven by `RUST_LOG` (SPEC_FULL.md simplifies away the
//! teacher's file-rotation and secret-scrubbing layers, which have no
//! counterpart in a single-process batch CLI).

pub mod logger;

pub use logger::init;
