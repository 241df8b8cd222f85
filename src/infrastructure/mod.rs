//! Adapters at the edge of the system: configuration loading, logging
//! setup, and the AMR/embedding file formats the CLI reads.

pub mod amr;
pub mod config;
pub mod embeddings;
pub mod logging;
