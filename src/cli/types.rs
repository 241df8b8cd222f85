//! CLI type definitions: clap command structures for the `s2match` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "s2match")]
#[command(about = "Graded semantic-graph similarity (S2Match)", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two aligned AMR pair streams and report precision/recall/F
    Compare(CompareArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    /// Path to the gold-standard AMR pair stream
    pub gold: PathBuf,

    /// Path to the system-output AMR pair stream
    pub test: PathBuf,

    /// Optional word-vector file (§6 Input 2); omit for identity/sense-only similarity
    #[arg(long)]
    pub vectors: Option<PathBuf>,

    /// Optional YAML config file, layered under CLI overrides
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON instead of human-readable text
    #[arg(long)]
    pub json_logs: bool,

    /// Hill-climb restarts beyond the smart start
    #[arg(long)]
    pub restarts: Option<u32>,

    /// `cosine`, `euclidean`, or `cityblock`
    #[arg(long)]
    pub similarity_function: Option<String>,

    /// Similarities at or below this threshold are zeroed
    #[arg(long)]
    pub cutoff: Option<f64>,

    /// Multiplier applied when a sense-stripping rule fires
    #[arg(long)]
    pub diffsense: Option<f64>,

    /// `standard`, `concept`, or `structure`
    #[arg(long)]
    pub weighting_scheme: Option<String>,

    /// `split` or `none`
    #[arg(long)]
    pub multi_token_concept_strategy: Option<String>,

    /// Passed through to the parser; has no effect on the core
    #[arg(long)]
    pub do_not_mark_quotes: bool,

    /// `single-document` or `per-pair`
    #[arg(long)]
    pub mode: Option<String>,

    /// Also emit precision and recall alongside F
    #[arg(long)]
    pub report_pr: bool,

    /// Explicit RNG seed for reproducible restarts
    #[arg(long)]
    pub seed: Option<u64>,

    /// Cross-check every hill-climb step against a from-scratch recomputation
    #[arg(long)]
    pub audit: bool,
}
