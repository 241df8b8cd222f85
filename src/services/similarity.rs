//! Concept similarity kernel (§4.1): a pure function from two concept labels
//! to a graded score in `[0, 1]`, with sense-stripping, multi-word handling,
//! and a result cache scoped to one graph-pair comparison.

use std::collections::HashMap;

use crate::domain::models::config::{MultiTokenConceptStrategy, SimilarityFunction};

/// Word → embedding lookup, shared read-only across all comparisons.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingTable {
    vectors: HashMap<String, Vec<f64>>,
}

impl EmbeddingTable {
    #[must_use]
    pub fn new(vectors: HashMap<String, Vec<f64>>) -> Self {
        Self { vectors }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, word: &str) -> Option<&Vec<f64>> {
        self.vectors.get(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Similarity cache, keyed by an unordered concept pair so either ordering
/// hits the cache (§4.1 "cached via the similarity cache keyed by the pair
/// (either ordering hits the cache)"). Scoped to one pair comparison.
#[derive(Debug, Default)]
pub struct SimilarityCache {
    cache: HashMap<(String, String), f64>,
}

impl SimilarityCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }
}

/// Strip a trailing predicate-sense suffix of the form `-DD` (one or more
/// trailing digits after the final hyphen). Returns `None` when no such
/// suffix exists (§4.1 step 2).
#[must_use]
pub fn strip_sense(label: &str) -> Option<String> {
    let idx = label.rfind('-')?;
    let suffix = &label[idx + 1..];
    if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
        Some(label[..idx].to_string())
    } else {
        None
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// `1 - cosine_distance`, clamped to zero on the negative tail (§4.1 step 7,
/// §9 open question: vectors of near-zero norm yield 0).
#[must_use]
pub fn cosine_sim(a: &[f64], b: &[f64]) -> f64 {
    let (na, nb) = (norm(a), norm(b));
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    (dot(a, b) / (na * nb)).max(0.0).min(1.0)
}

/// `exp(-euclidean_distance)`.
#[must_use]
pub fn euclidean_sim(a: &[f64], b: &[f64]) -> f64 {
    let dist = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt();
    (-dist).exp()
}

/// `exp(-manhattan_distance)`.
#[must_use]
pub fn cityblock_sim(a: &[f64], b: &[f64]) -> f64 {
    let dist: f64 = a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum();
    (-dist).exp()
}

fn apply_simfun(f: SimilarityFunction, a: &[f64], b: &[f64]) -> f64 {
    match f {
        SimilarityFunction::Cosine => cosine_sim(a, b),
        SimilarityFunction::Euclidean => euclidean_sim(a, b),
        SimilarityFunction::Cityblock => cityblock_sim(a, b),
    }
}

fn add_in_place(dst: &mut Vec<f64>, src: &[f64]) {
    if dst.len() < src.len() {
        dst.resize(src.len(), 0.0);
    }
    for (d, s) in dst.iter_mut().zip(src) {
        *d += s;
    }
}

/// Deterministic concept-similarity policy, parameterized by the engine
/// configuration (§4.1).
#[derive(Debug, Clone, Copy)]
pub struct SimilarityEngine<'a> {
    pub vectors: &'a EmbeddingTable,
    pub cutoff: f64,
    pub diffsense: f64,
    pub simfun: SimilarityFunction,
    pub mwp: MultiTokenConceptStrategy,
}

impl<'a> SimilarityEngine<'a> {
    #[must_use]
    pub fn new(
        vectors: &'a EmbeddingTable,
        cutoff: f64,
        diffsense: f64,
        simfun: SimilarityFunction,
        mwp: MultiTokenConceptStrategy,
    ) -> Self {
        Self { vectors, cutoff, diffsense, simfun, mwp }
    }

    /// Cached concept similarity; inserts into `cache` on a miss.
    pub fn sim(&self, cache: &mut SimilarityCache, a: &str, b: &str) -> f64 {
        let key = SimilarityCache::key(a, b);
        if let Some(&v) = cache.cache.get(&key) {
            return v;
        }
        let v = self.compute(a, b);
        cache.cache.insert(key, v);
        v
    }

    fn vector_for(&self, raw: &str, stripped: Option<&str>) -> Option<Vec<f64>> {
        if let Some(base) = stripped {
            let mut v = self.vectors.get(base).cloned();
            if let Some(vv) = v.as_mut() {
                if let Some(plural) = self.vectors.get(&format!("{base}s")) {
                    add_in_place(vv, plural);
                }
            }
            v
        } else {
            self.maybe_get_vec(raw, self.mwp)
        }
    }

    fn maybe_get_vec(&self, word: &str, mwp: MultiTokenConceptStrategy) -> Option<Vec<f64>> {
        if let Some(v) = self.vectors.get(word) {
            return Some(v.clone());
        }
        if mwp == MultiTokenConceptStrategy::Split && word.contains('-') {
            let mut sum: Option<Vec<f64>> = None;
            for part in word.split('-') {
                if let Some(pv) = self.vectors.get(part) {
                    match sum.as_mut() {
                        Some(s) => add_in_place(s, pv),
                        None => sum = Some(pv.clone()),
                    }
                }
            }
            return sum;
        }
        None
    }

    fn compute(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        let sa = strip_sense(a);
        let sb = strip_sense(b);

        if let (Some(sa), Some(sb)) = (sa.as_deref(), sb.as_deref()) {
            if sa == sb {
                return self.diffsense;
            }
        }
        if sa.as_deref() == Some(b) {
            return self.diffsense;
        }
        if sb.as_deref() == Some(a) {
            return self.diffsense;
        }

        let a_vec = self.vector_for(a, sa.as_deref());
        let b_vec = self.vector_for(b, sb.as_deref());
        let (Some(av), Some(bv)) = (a_vec, b_vec) else {
            return 0.0;
        };

        let s = apply_simfun(self.simfun, &av, &bv);
        if s <= self.cutoff {
            return 0.0;
        }
        if sa.is_some() || sb.is_some() {
            s * self.diffsense
        } else {
            s
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::MultiTokenConceptStrategy as Mwp;

    fn vecs(pairs: &[(&str, &[f64])]) -> EmbeddingTable {
        let mut m = HashMap::new();
        for (w, v) in pairs {
            m.insert((*w).to_string(), v.to_vec());
        }
        EmbeddingTable::new(m)
    }

    #[test]
    fn identical_strings_are_one() {
        let table = EmbeddingTable::empty();
        let engine = SimilarityEngine::new(&table, 0.5, 0.5, SimilarityFunction::Cosine, Mwp::Split);
        let mut cache = SimilarityCache::new();
        assert_eq!(engine.sim(&mut cache, "hit-01", "hit-01"), 1.0);
    }

    #[test]
    fn same_predicate_different_sense() {
        let table = EmbeddingTable::empty();
        let engine = SimilarityEngine::new(&table, 0.5, 0.5, SimilarityFunction::Cosine, Mwp::Split);
        let mut cache = SimilarityCache::new();
        assert_eq!(engine.sim(&mut cache, "hit-01", "hit-02"), 0.5);
    }

    #[test]
    fn sensed_vs_unsensed_same_lemma() {
        let table = EmbeddingTable::empty();
        let engine = SimilarityEngine::new(&table, 0.5, 0.5, SimilarityFunction::Cosine, Mwp::Split);
        let mut cache = SimilarityCache::new();
        assert_eq!(engine.sim(&mut cache, "hit-01", "hit"), 0.5);
        assert_eq!(engine.sim(&mut cache, "hit", "hit-01"), 0.5);
    }

    #[test]
    fn out_of_vocabulary_is_zero() {
        let table = EmbeddingTable::empty();
        let engine = SimilarityEngine::new(&table, 0.5, 0.5, SimilarityFunction::Cosine, Mwp::Split);
        let mut cache = SimilarityCache::new();
        assert_eq!(engine.sim(&mut cache, "foo", "bar"), 0.0);
    }

    #[test]
    fn cosine_similarity_above_cutoff_passes_through() {
        let table = vecs(&[("good", &[1.0, 0.0]), ("great", &[0.9, 0.1_f64.sqrt()])]);
        let engine = SimilarityEngine::new(&table, 0.5, 0.5, SimilarityFunction::Cosine, Mwp::Split);
        let mut cache = SimilarityCache::new();
        let s = engine.sim(&mut cache, "good", "great");
        assert!(s > 0.5 && s <= 1.0);
    }

    #[test]
    fn multi_word_split_sums_in_vocabulary_parts() {
        let table = vecs(&[("ice", &[1.0, 0.0]), ("cream", &[0.0, 1.0])]);
        let engine = SimilarityEngine::new(&table, 0.0, 0.5, SimilarityFunction::Cosine, Mwp::Split);
        let mut cache = SimilarityCache::new();
        // both "ice-cream" and "cream-ice" sum to (1,1) once split and summed
        let s = engine.sim(&mut cache, "ice-cream", "cream-ice");
        assert_eq!(s, 1.0);
    }

    #[test]
    fn cache_hits_either_ordering() {
        let table = EmbeddingTable::empty();
        let engine = SimilarityEngine::new(&table, 0.5, 0.5, SimilarityFunction::Cosine, Mwp::Split);
        let mut cache = SimilarityCache::new();
        let _ = engine.sim(&mut cache, "hit-01", "hit-02");
        assert_eq!(cache.cache.len(), 1);
        let _ = engine.sim(&mut cache, "hit-02", "hit-01");
        assert_eq!(cache.cache.len(), 1);
    }

    #[test]
    fn zero_norm_vector_yields_zero_similarity() {
        let table = vecs(&[("zero", &[0.0, 0.0]), ("other", &[1.0, 1.0])]);
        let engine = SimilarityEngine::new(&table, 0.0, 0.5, SimilarityFunction::Cosine, Mwp::Split);
        assert_eq!(cosine_sim(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        let mut cache = SimilarityCache::new();
        assert_eq!(engine.sim(&mut cache, "zero", "other"), 0.0);
    }
}
