//! Word-vector loading (§6 Input 2).

pub mod loader;

pub use loader::load_vectors;
