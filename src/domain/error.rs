//! Domain error types for the s2match engine.
//!
//! Each enum covers errors from one concern, using `thiserror` for structured
//! messages, following the same split the wider ecosystem uses between a
//! library's typed errors and a binary's `anyhow::Context` wrapping.

use thiserror::Error;

/// Configuration is rejected outright rather than coerced (§7 "Unknown
/// config value ... refuse to run").
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown similarity function: {0} (expected cosine, euclidean, or cityblock)")]
    UnknownSimilarityFunction(String),

    #[error("unknown weighting scheme: {0} (expected standard, concept, or structure)")]
    UnknownWeightingScheme(String),

    #[error("unknown multi-token concept strategy: {0} (expected split or none)")]
    UnknownMultiTokenStrategy(String),

    #[error("cutoff must be in [0, 1], got {0}")]
    InvalidCutoff(f64),

    #[error("diffsense must be in [0, 1], got {0}")]
    InvalidDiffsense(f64),
}

/// A graph block failed to parse. The corpus driver reports `NA_WRONG_AMR`
/// for the offending pair and continues (§7).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("empty graph block")]
    Empty,

    #[error("unbalanced parentheses in graph block")]
    UnbalancedParens,

    #[error("expected a root node of the form (var / concept)")]
    MissingRoot,

    #[error("malformed node reference near: {0}")]
    MalformedNode(String),
}

/// Top-level error type returned by the core's public API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Raised only when the audit flag is set and an incremental gain
    /// disagrees with a from-scratch recomputation (§7, §8 property 2).
    #[error("incremental gain {incremental} disagreed with recomputed score {recomputed} for move/swap on mapping {mapping:?}")]
    Inconsistent {
        mapping: Vec<Option<usize>>,
        incremental: f64,
        recomputed: f64,
    },
}

pub type CoreResult<T> = Result<T, CoreError>;
