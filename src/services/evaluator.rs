//! Match evaluator (§4.3): the from-scratch score of a full mapping, with a
//! memo table shared by every search move within one pair comparison.

use std::collections::HashMap;

use crate::domain::models::triple::Mapping;
use crate::services::pool::WeightTable;

/// Memoizes `score(M)` for every mapping encountered during a search, keyed
/// on the mapping tuple itself (§3 "Memo table").
#[derive(Debug, Default)]
pub struct MatchEvaluator {
    memo: HashMap<Mapping, f64>,
}

impl MatchEvaluator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached lookup only; does not compute.
    #[must_use]
    pub fn memoized(&self, mapping: &Mapping) -> Option<f64> {
        self.memo.get(mapping).copied()
    }

    pub fn insert(&mut self, mapping: Mapping, score: f64) {
        self.memo.insert(mapping, score);
    }

    pub fn clear(&mut self) {
        self.memo.clear();
    }

    /// Full from-scratch recomputation (or memo hit) of a mapping's score
    /// (§4.3). The upper-triangular filter `oi > i` skips the symmetric half
    /// of each relation entry to avoid double counting.
    pub fn score(&mut self, mapping: &Mapping, table: &WeightTable) -> f64 {
        if let Some(v) = self.memo.get(mapping) {
            return *v;
        }
        let mut total = 0.0;
        for (i, slot) in mapping.iter().enumerate() {
            let Some(j) = *slot else { continue };
            let Some(pid) = table.pair_id_of(i, j) else { continue };
            total += table.self_score(pid);
            for &(other, count) in table.relations_of(pid) {
                let (oi, oj) = table.pair(other);
                if oi > i && mapping.get(oi).copied().flatten() == Some(oj) {
                    total += f64::from(count);
                }
            }
        }
        self.memo.insert(mapping.clone(), total);
        total
    }
}
