//! s2match-core: a soft extension of the SMATCH metric for comparing two
//! rooted, directed, labeled semantic graphs by stochastic hill-climbing
//! node alignment with graded concept similarity.

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;
