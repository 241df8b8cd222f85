//! Precision/recall/F aggregation (§4.6) for a single pair and across a
//! corpus.

/// Precision, recall, and F1 for a match count against the test and gold
/// triple totals. All three are `0.0` when a denominator is zero or
/// `precision + recall == 0` (§4.6 edge cases).
#[must_use]
pub fn compute_f(match_num: f64, test_num: f64, gold_num: f64) -> (f64, f64, f64) {
    if test_num <= 0.0 || gold_num <= 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let precision = match_num / test_num;
    let recall = match_num / gold_num;
    if precision + recall <= 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let f = 2.0 * precision * recall / (precision + recall);
    (precision, recall, f)
}

/// Accumulates match/test/gold triple counts across a corpus. Corpus-level
/// precision/recall/F is computed from the accumulated totals, NOT as the
/// arithmetic mean of per-pair F scores (§4.6, §8 S6).
#[derive(Debug, Default, Clone, Copy)]
pub struct CorpusAccumulator {
    match_total: f64,
    test_total: f64,
    gold_total: f64,
}

impl CorpusAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pair(&mut self, match_num: f64, test_num: f64, gold_num: f64) {
        self.match_total += match_num;
        self.test_total += test_num;
        self.gold_total += gold_num;
    }

    #[must_use]
    pub fn compute_f(&self) -> (f64, f64, f64) {
        compute_f(self.match_total, self.test_total, self.gold_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_match_yields_f_of_one() {
        assert_eq!(compute_f(4.0, 4.0, 4.0), (1.0, 1.0, 1.0));
    }

    #[test]
    fn zero_gold_triples_is_all_zero() {
        assert_eq!(compute_f(0.0, 4.0, 0.0), (0.0, 0.0, 0.0));
    }

    #[test]
    fn asymmetric_precision_recall() {
        let (p, r, f) = compute_f(3.0, 4.0, 6.0);
        assert!((p - 0.75).abs() < 1e-9);
        assert!((r - 0.5).abs() < 1e-9);
        assert!((f - 0.6).abs() < 1e-9);
    }

    #[test]
    fn corpus_aggregation_is_not_the_mean_of_per_pair_f() {
        let mut acc = CorpusAccumulator::new();
        // pair A: tiny graph, perfect match (F = 1.0)
        acc.add_pair(1.0, 1.0, 1.0);
        // pair B: large graph, half match (F = 2/3)
        acc.add_pair(10.0, 20.0, 20.0);
        let (_, _, corpus_f) = acc.compute_f();
        let mean_of_per_pair = (1.0 + 2.0 / 3.0) / 2.0;
        assert!((corpus_f - mean_of_per_pair).abs() > 1e-6);
        // corpus totals: match=11, test=21, gold=21
        let expected = compute_f(11.0, 21.0, 21.0);
        assert_eq!(compute_f(11.0, 21.0, 21.0), expected);
    }
}
