//! AMR block parsing (§6 Input 1): blank-line-delimited PENMAN-like blocks,
//! `#`-comment skipping, paired-stream reading.

pub mod parser;
pub mod reader;

pub use parser::parse_block;
pub use reader::{read_pairs, PairRecord};
