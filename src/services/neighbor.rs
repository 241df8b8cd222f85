//! Incremental neighbor-gain evaluation for the MOVE and SWAP operators
//! (§4.4), computed in O(degree) instead of O(mapping size) by walking only
//! the adjacency of the pairs that changed.

use crate::domain::models::triple::Mapping;
use crate::services::evaluator::MatchEvaluator;
use crate::services::pool::WeightTable;

/// Gain of remapping node `i` from `old` (or unmapped) to `new`, relative to
/// `cur_score`. Memoizes the resulting full mapping's absolute score.
pub fn move_gain(
    evaluator: &mut MatchEvaluator,
    mapping: &Mapping,
    i: usize,
    old: Option<usize>,
    new: usize,
    table: &WeightTable,
    cur_score: f64,
) -> f64 {
    let mut new_mapping = mapping.clone();
    new_mapping[i] = Some(new);
    if let Some(v) = evaluator.memoized(&new_mapping) {
        return v - cur_score;
    }

    let mut gain = 0.0;
    if let Some(pid) = table.pair_id_of(i, new) {
        gain += table.self_score(pid);
        for &(other, count) in table.relations_of(pid) {
            let (oi, oj) = table.pair(other);
            if new_mapping.get(oi).copied().flatten() == Some(oj) {
                gain += f64::from(count);
            }
        }
    }
    if let Some(old_j) = old {
        if let Some(pid) = table.pair_id_of(i, old_j) {
            gain -= table.self_score(pid);
            for &(other, count) in table.relations_of(pid) {
                let (oi, oj) = table.pair(other);
                if mapping.get(oi).copied().flatten() == Some(oj) {
                    gain -= f64::from(count);
                }
            }
        }
    }
    evaluator.insert(new_mapping, cur_score + gain);
    gain
}

/// Gain of swapping the targets of `i` and `j`. Requires `i < j`, matching
/// the only way the hill-climber ever calls it (§4.4 "normalize so the
/// earlier-index pair is referenced first").
pub fn swap_gain(
    evaluator: &mut MatchEvaluator,
    mapping: &Mapping,
    i: usize,
    mi: usize,
    j: usize,
    mj: usize,
    table: &WeightTable,
    cur_score: f64,
) -> f64 {
    debug_assert!(i < j, "swap_gain requires the smaller node index first");

    let mut new_mapping = mapping.clone();
    new_mapping[i] = Some(mj);
    new_mapping[j] = Some(mi);
    if let Some(v) = evaluator.memoized(&new_mapping) {
        return v - cur_score;
    }

    let mut gain = 0.0;

    if let Some(pid) = table.pair_id_of(i, mj) {
        gain += table.self_score(pid);
        for &(other, count) in table.relations_of(pid) {
            let (oi, oj) = table.pair(other);
            if new_mapping.get(oi).copied().flatten() == Some(oj) {
                gain += f64::from(count);
            }
        }
    }
    if let Some(pid) = table.pair_id_of(j, mi) {
        gain += table.self_score(pid);
        for &(other, count) in table.relations_of(pid) {
            let (oi, oj) = table.pair(other);
            if oi == i {
                // already counted against the (i, mj) pair above
                continue;
            }
            if new_mapping.get(oi).copied().flatten() == Some(oj) {
                gain += f64::from(count);
            }
        }
    }
    if let Some(pid) = table.pair_id_of(i, mi) {
        gain -= table.self_score(pid);
        for &(other, count) in table.relations_of(pid) {
            let (oi, oj) = table.pair(other);
            if mapping.get(oi).copied().flatten() == Some(oj) {
                gain -= f64::from(count);
            }
        }
    }
    if let Some(pid) = table.pair_id_of(j, mj) {
        gain -= table.self_score(pid);
        for &(other, count) in table.relations_of(pid) {
            let (oi, oj) = table.pair(other);
            if oi == i {
                continue;
            }
            if mapping.get(oi).copied().flatten() == Some(oj) {
                gain -= f64::from(count);
            }
        }
    }

    evaluator.insert(new_mapping, cur_score + gain);
    gain
}
