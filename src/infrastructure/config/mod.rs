//! Configuration management infrastructure.
//!
//! Hierarchical configuration using figment: programmatic defaults, an
//! optional YAML file, then environment variable overrides.

pub mod loader;

pub use loader::ConfigLoader;
