pub mod error;
pub mod models;

pub use error::{ConfigError, CoreError, CoreResult, GraphError};
