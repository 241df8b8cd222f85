//! Candidate pool and weight-dictionary construction (§4.2).
//!
//! Builds, from two decomposed triple sets, the per-node candidate mapping
//! list and a sparse symmetric interaction table describing the score gain
//! from co-activating pairs of node alignments.

use std::collections::{BTreeSet, HashMap};

use crate::domain::models::config::WeightingScheme;
use crate::domain::models::triple::Graph;
use crate::services::similarity::{SimilarityCache, SimilarityEngine};

/// Opaque identifier for a `(node_in_g1, node_in_g2)` candidate pair,
/// assigned during pool construction (§9 "pair-id assignment is done during
/// pool construction").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairId(u32);

/// Flat, symmetric interaction table: a contiguous self-score per pair id
/// plus an adjacency list of `(other_pair_id, count)` per pair (§9 "Nested
/// mutable mappings → flat symmetric table").
#[derive(Debug, Default)]
pub struct WeightTable {
    pair_index: HashMap<(usize, usize), PairId>,
    pairs: Vec<(usize, usize)>,
    self_scores: Vec<f64>,
    relations: Vec<Vec<(PairId, u32)>>,
}

impl WeightTable {
    fn pair_id(&mut self, i: usize, j: usize) -> PairId {
        if let Some(&id) = self.pair_index.get(&(i, j)) {
            return id;
        }
        let id = PairId(self.pairs.len() as u32);
        self.pair_index.insert((i, j), id);
        self.pairs.push((i, j));
        self.self_scores.push(0.0);
        self.relations.push(Vec::new());
        id
    }

    fn add_self_score(&mut self, i: usize, j: usize, delta: f64) {
        let id = self.pair_id(i, j);
        self.self_scores[id.0 as usize] += delta;
    }

    /// Record a relation-triple co-activation between pairs `p` and `q`,
    /// storing the count symmetrically under both endpoints (§3 invariant
    /// "storage symmetry").
    fn add_relation(&mut self, p: (usize, usize), q: (usize, usize), count: u32) {
        let pid = self.pair_id(p.0, p.1);
        let qid = self.pair_id(q.0, q.1);
        add_or_accumulate(&mut self.relations[pid.0 as usize], qid, count);
        add_or_accumulate(&mut self.relations[qid.0 as usize], pid, count);
    }

    /// Existing pair id for `(i, j)`, if any candidate interaction touches it.
    #[must_use]
    pub fn pair_id_of(&self, i: usize, j: usize) -> Option<PairId> {
        self.pair_index.get(&(i, j)).copied()
    }

    /// `SelfScore` for `(i, j)`; missing pairs normalize to 0 (§9 open question).
    #[must_use]
    pub fn self_score_of(&self, i: usize, j: usize) -> f64 {
        self.pair_index
            .get(&(i, j))
            .map_or(0.0, |id| self.self_scores[id.0 as usize])
    }

    #[must_use]
    pub fn self_score(&self, id: PairId) -> f64 {
        self.self_scores[id.0 as usize]
    }

    #[must_use]
    pub fn relations_of(&self, id: PairId) -> &[(PairId, u32)] {
        &self.relations[id.0 as usize]
    }

    #[must_use]
    pub fn pair(&self, id: PairId) -> (usize, usize) {
        self.pairs[id.0 as usize]
    }

    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }
}

fn add_or_accumulate(adj: &mut Vec<(PairId, u32)>, other: PairId, count: u32) {
    if let Some(entry) = adj.iter_mut().find(|(id, _)| *id == other) {
        entry.1 += count;
    } else {
        adj.push((other, count));
    }
}

/// Build the candidate-mapping list and weight table for graph pair
/// `(g1, g2)` under the given weighting scheme (§4.2).
#[must_use]
pub fn build_pool(
    g1: &Graph,
    g2: &Graph,
    engine: &SimilarityEngine,
    weighting: WeightingScheme,
) -> (Vec<Vec<usize>>, WeightTable) {
    let mut cache = SimilarityCache::new();
    let mut candidates: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); g1.node_count()];
    let mut table = WeightTable::default();

    for &(i, ref c1) in &g1.instances {
        let c1 = c1.to_lowercase();
        for &(j, ref c2) in &g2.instances {
            let c2 = c2.to_lowercase();
            let mut s = engine.sim(&mut cache, &c1, &c2);
            s *= weighting.multiplier();
            if s > 0.0 {
                candidates[i].insert(j);
                table.add_self_score(i, j, s);
            }
        }
    }

    for (rel1, i, v1) in &g1.attributes {
        for (rel2, j, v2) in &g2.attributes {
            if !rel1.eq_ignore_ascii_case(rel2) {
                continue;
            }
            if v1.eq_ignore_ascii_case(v2) {
                candidates[*i].insert(*j);
                table.add_self_score(*i, *j, 1.0);
            } else if rel1.eq_ignore_ascii_case("top") {
                let s = engine.sim(&mut cache, &v1.to_lowercase(), &v2.to_lowercase());
                candidates[*i].insert(*j);
                table.add_self_score(*i, *j, s);
            }
        }
    }

    for (rel1, s1, t1) in &g1.relations {
        for (rel2, s2, t2) in &g2.relations {
            if !rel1.eq_ignore_ascii_case(rel2) {
                continue;
            }
            candidates[*s1].insert(*s2);
            candidates[*t1].insert(*t2);
            let p = (*s1, *s2);
            let q = (*t1, *t2);
            if p == q {
                table.add_self_score(p.0, p.1, 1.0);
            } else if p.0 <= q.0 {
                table.add_relation(p, q, 1);
            } else {
                table.add_relation(q, p, 1);
            }
        }
    }

    let candidates = candidates
        .into_iter()
        .map(|set| set.into_iter().collect())
        .collect();
    (candidates, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::config::{MultiTokenConceptStrategy, SimilarityFunction};
    use crate::services::similarity::EmbeddingTable;

    fn graph(instances: &[(usize, &str)], attrs: &[(&str, usize, &str)], rels: &[(&str, usize, usize)]) -> Graph {
        Graph {
            instances: instances.iter().map(|(i, c)| (*i, (*c).to_string())).collect(),
            attributes: attrs.iter().map(|(r, i, v)| ((*r).to_string(), *i, (*v).to_string())).collect(),
            relations: rels.iter().map(|(r, s, t)| ((*r).to_string(), *s, *t)).collect(),
        }
    }

    #[test]
    fn storage_is_symmetric() {
        let g1 = graph(&[(0, "hit"), (1, "boy")], &[("top", 0, "hit")], &[("ARG0", 0, 1)]);
        let g2 = graph(&[(0, "hit"), (1, "boy")], &[("top", 0, "hit")], &[("ARG0", 0, 1)]);
        let table = EmbeddingTable::empty();
        let engine = SimilarityEngine::new(
            &table,
            0.5,
            0.5,
            SimilarityFunction::Cosine,
            MultiTokenConceptStrategy::Split,
        );
        let (_candidates, w) = build_pool(&g1, &g2, &engine, WeightingScheme::Standard);
        let p00 = w.pair_id_of(0, 0).unwrap();
        let p11 = w.pair_id_of(1, 1).unwrap();
        let count_from_00 = w
            .relations_of(p00)
            .iter()
            .find(|(id, _)| *id == p11)
            .map(|(_, c)| *c);
        let count_from_11 = w
            .relations_of(p11)
            .iter()
            .find(|(id, _)| *id == p00)
            .map(|(_, c)| *c);
        assert_eq!(count_from_00, Some(1));
        assert_eq!(count_from_00, count_from_11);
    }

    #[test]
    fn missing_pair_normalizes_self_score_to_zero() {
        let g1 = graph(&[(0, "hit")], &[], &[]);
        let g2 = graph(&[(0, "other")], &[], &[]);
        let table = EmbeddingTable::empty();
        let engine = SimilarityEngine::new(
            &table,
            0.5,
            0.5,
            SimilarityFunction::Cosine,
            MultiTokenConceptStrategy::Split,
        );
        let (_c, w) = build_pool(&g1, &g2, &engine, WeightingScheme::Standard);
        assert_eq!(w.self_score_of(5, 5), 0.0);
    }

    #[test]
    fn concept_weighting_multiplies_instance_similarity_by_three() {
        let g1 = graph(&[(0, "hit")], &[], &[]);
        let g2 = graph(&[(0, "hit")], &[], &[]);
        let table = EmbeddingTable::empty();
        let engine = SimilarityEngine::new(
            &table,
            0.5,
            0.5,
            SimilarityFunction::Cosine,
            MultiTokenConceptStrategy::Split,
        );
        let (_c, standard) = build_pool(&g1, &g2, &engine, WeightingScheme::Standard);
        let (_c2, concept) = build_pool(&g1, &g2, &engine, WeightingScheme::Concept);
        assert_eq!(concept.self_score_of(0, 0), standard.self_score_of(0, 0) * 3.0);
    }
}
