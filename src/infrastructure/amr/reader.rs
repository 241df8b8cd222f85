use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::domain::error::GraphError;
use crate::domain::models::triple::Graph;

/// One aligned pair of blocks from the two input streams, or the parse
/// error for whichever side failed (§7 "report per-pair NA_WRONG_AMR, skip
/// pair, continue").
pub struct PairRecord {
    pub index: usize,
    pub gold: Result<Graph, GraphError>,
    pub test: Result<Graph, GraphError>,
}

fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        let line = line.trim_end();
        if line.trim_start().starts_with('#') {
            continue;
        }
        if line.trim().is_empty() {
            if !current.trim().is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push_str(line);
        current.push('\n');
    }
    if !current.trim().is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Read two AMR pair files in lock-step. If one stream runs out before the
/// other, log it and stop reading (§7 "Stream-length mismatch ... stop
/// reading. Counts already accumulated are still valid.").
///
/// `do_not_mark_quotes` is passed through unchanged to every block parse.
///
/// # Errors
/// Returns an error only for unreadable files; malformed individual blocks
/// are carried as `Err(GraphError)` inside each [`PairRecord`] instead.
pub fn read_pairs(gold_path: &Path, test_path: &Path, do_not_mark_quotes: bool) -> Result<Vec<PairRecord>> {
    let gold_text = std::fs::read_to_string(gold_path)
        .with_context(|| format!("failed to read {}", gold_path.display()))?;
    let test_text = std::fs::read_to_string(test_path)
        .with_context(|| format!("failed to read {}", test_path.display()))?;

    let gold_blocks = split_blocks(&gold_text);
    let test_blocks = split_blocks(&test_text);

    if gold_blocks.len() != test_blocks.len() {
        warn!(
            gold_count = gold_blocks.len(),
            test_count = test_blocks.len(),
            "input streams have different pair counts; stopping at the shorter one"
        );
    }

    let n = gold_blocks.len().min(test_blocks.len());
    let records = (0..n)
        .map(|i| PairRecord {
            index: i,
            gold: super::parser::parse_block(&gold_blocks[i], do_not_mark_quotes),
            test: super::parser::parse_block(&test_blocks[i], do_not_mark_quotes),
        })
        .collect();
    Ok(records)
}
