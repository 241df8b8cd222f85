pub mod config;
pub mod triple;

pub use config::S2MatchConfig;
pub use triple::{Graph, Mapping, Triple};
