//! Configuration types for the s2match engine (§6 of the design doc).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

/// Similarity function applied to concept vectors once neither string
/// equality nor a sense rule has already settled the comparison (§4.1 step 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityFunction {
    Cosine,
    Euclidean,
    Cityblock,
}

impl Default for SimilarityFunction {
    fn default() -> Self {
        Self::Cosine
    }
}

impl FromStr for SimilarityFunction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cosine" => Ok(Self::Cosine),
            "euclidean" => Ok(Self::Euclidean),
            "cityblock" => Ok(Self::Cityblock),
            other => Err(ConfigError::UnknownSimilarityFunction(other.to_string())),
        }
    }
}

/// Multiplier applied to concept-instance similarity contributions only
/// (§4.2), used to emphasize concept-level or structure-level agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingScheme {
    Standard,
    Concept,
    Structure,
}

impl Default for WeightingScheme {
    fn default() -> Self {
        Self::Standard
    }
}

impl FromStr for WeightingScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "concept" => Ok(Self::Concept),
            "structure" => Ok(Self::Structure),
            other => Err(ConfigError::UnknownWeightingScheme(other.to_string())),
        }
    }
}

impl WeightingScheme {
    /// The scalar this scheme applies to a concept-instance similarity.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::Concept => 3.0,
            Self::Structure => 0.3333,
        }
    }
}

/// How to obtain a vector for a multi-word concept absent from the
/// vocabulary (§4.1 step 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiTokenConceptStrategy {
    /// Split on `-` and sum the vectors of whichever parts are in-vocabulary.
    Split,
    /// Only ever do a direct vocabulary lookup of the raw label.
    None,
}

impl Default for MultiTokenConceptStrategy {
    fn default() -> Self {
        Self::Split
    }
}

impl FromStr for MultiTokenConceptStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "split" => Ok(Self::Split),
            "none" => Ok(Self::None),
            other => Err(ConfigError::UnknownMultiTokenStrategy(other.to_string())),
        }
    }
}

/// Corpus-level reporting mode (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    /// One aggregated F-score over the whole corpus.
    SingleDocument,
    /// A score per AMR pair.
    PerPair,
}

impl Default for ReportMode {
    fn default() -> Self {
        Self::SingleDocument
    }
}

/// Full configuration surface for one s2match run, covering every knob
/// enumerated in §6.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct S2MatchConfig {
    /// Hill-climb restarts beyond the smart start (total starts = `restarts + 1`).
    #[serde(default = "default_restarts")]
    pub restarts: u32,

    #[serde(default)]
    pub similarity_function: SimilarityFunction,

    /// Similarities at or below this threshold are zeroed (§4.1 step 8).
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,

    /// Multiplier applied when a sense-stripping rule fires (§4.1 steps 3-4, 9).
    #[serde(default = "default_diffsense")]
    pub diffsense: f64,

    #[serde(default)]
    pub weighting_scheme: WeightingScheme,

    #[serde(default)]
    pub multi_token_concept_strategy: MultiTokenConceptStrategy,

    /// Passed through to the AMR parser; has no effect on the core itself.
    #[serde(default)]
    pub do_not_mark_quotes: bool,

    #[serde(default)]
    pub mode: ReportMode,

    /// Also emit precision and recall alongside F.
    #[serde(default)]
    pub report_pr: bool,

    /// Explicit RNG seed for the hill-climber's smart/random restarts.
    /// `None` seeds from entropy, matching the reference implementation's
    /// nondeterministic default (§9).
    #[serde(default)]
    pub seed: Option<u64>,

    /// Cross-check every hill-climb step's incremental gain against a
    /// from-scratch recomputation, surfacing a [`crate::domain::error::CoreError::Inconsistent`]
    /// on mismatch instead of silently accepting it (§7 "Internal
    /// inconsistency"). Off by default: it roughly doubles search cost.
    #[serde(default)]
    pub audit: bool,
}

impl S2MatchConfig {
    /// Reject configurations outside the valid range rather than clamping
    /// them (§7 "Unknown config value ... refuse to run").
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.cutoff) {
            return Err(ConfigError::InvalidCutoff(self.cutoff));
        }
        if !(0.0..=1.0).contains(&self.diffsense) {
            return Err(ConfigError::InvalidDiffsense(self.diffsense));
        }
        Ok(())
    }
}

const fn default_restarts() -> u32 {
    4
}

const fn default_cutoff() -> f64 {
    0.5
}

const fn default_diffsense() -> f64 {
    0.5
}

impl Default for S2MatchConfig {
    fn default() -> Self {
        Self {
            restarts: default_restarts(),
            similarity_function: SimilarityFunction::default(),
            cutoff: default_cutoff(),
            diffsense: default_diffsense(),
            weighting_scheme: WeightingScheme::default(),
            multi_token_concept_strategy: MultiTokenConceptStrategy::default(),
            do_not_mark_quotes: false,
            mode: ReportMode::default(),
            report_pr: false,
            seed: None,
            audit: false,
        }
    }
}
