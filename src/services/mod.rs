//! Core S2Match algorithm: similarity kernel, candidate pool construction,
//! mapping evaluation, incremental neighbor gains, and the hill-climbing
//! search that ties them together.

pub mod climber;
pub mod evaluator;
pub mod neighbor;
pub mod pool;
pub mod scoring;
pub mod similarity;

pub use climber::{search, SearchResult};
pub use evaluator::MatchEvaluator;
pub use neighbor::{move_gain, swap_gain};
pub use pool::{build_pool, PairId, WeightTable};
pub use scoring::{compute_f, CorpusAccumulator};
pub use similarity::{cosine_sim, cityblock_sim, euclidean_sim, strip_sense, EmbeddingTable, SimilarityCache, SimilarityEngine};
