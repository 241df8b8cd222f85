use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::types::CompareArgs;
use crate::domain::models::config::{ReportMode, S2MatchConfig};
use crate::infrastructure::{amr, config::ConfigLoader, embeddings, logging};
use crate::services::{build_pool, compute_f, search, CorpusAccumulator};

/// Apply CLI overrides (only the flags the user actually passed) on top of
/// the figment-layered base configuration.
fn apply_overrides(mut config: S2MatchConfig, args: &CompareArgs) -> Result<S2MatchConfig> {
    if let Some(restarts) = args.restarts {
        config.restarts = restarts;
    }
    if let Some(ref s) = args.similarity_function {
        config.similarity_function = s.parse().context("invalid --similarity-function")?;
    }
    if let Some(cutoff) = args.cutoff {
        config.cutoff = cutoff;
    }
    if let Some(diffsense) = args.diffsense {
        config.diffsense = diffsense;
    }
    if let Some(ref w) = args.weighting_scheme {
        config.weighting_scheme = w.parse().context("invalid --weighting-scheme")?;
    }
    if let Some(ref m) = args.multi_token_concept_strategy {
        config.multi_token_concept_strategy = m.parse().context("invalid --multi-token-concept-strategy")?;
    }
    if args.do_not_mark_quotes {
        config.do_not_mark_quotes = true;
    }
    if let Some(ref mode) = args.mode {
        config.mode = match mode.as_str() {
            "single-document" => ReportMode::SingleDocument,
            "per-pair" => ReportMode::PerPair,
            other => anyhow::bail!("unknown --mode: {other} (expected single-document or per-pair)"),
        };
    }
    if args.report_pr {
        config.report_pr = true;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.audit {
        config.audit = true;
    }
    config.validate().context("configuration failed validation")?;
    Ok(config)
}

fn print_pair(index: usize, precision: f64, recall: f64, f: f64, report_pr: bool) {
    println!("Pair {index}: Smatch score F1 {f:.3}");
    if report_pr {
        println!("Precision: {precision:.3}");
        println!("Recall: {recall:.3}");
    }
}

fn print_corpus(precision: f64, recall: f64, f: f64, report_pr: bool) {
    println!("Document F-score: {f:.3}, {f:.4}");
    if report_pr {
        println!("Precision: {precision:.3}");
        println!("Recall: {recall:.3}");
    }
}

/// Run the `compare` subcommand end to end (§6 Output formats, §7 error policy).
pub fn run(args: CompareArgs) -> Result<()> {
    logging::init(args.json_logs).context("failed to initialize logging")?;

    let base = if let Some(ref path) = args.config {
        ConfigLoader::load_from_file(path)?
    } else {
        ConfigLoader::load()?
    };
    let config = apply_overrides(base, &args)?;

    let vectors = embeddings::load_vectors(args.vectors.as_deref())?;
    let engine = crate::services::SimilarityEngine::new(
        &vectors,
        config.cutoff,
        config.diffsense,
        config.similarity_function,
        config.multi_token_concept_strategy,
    );

    let records = amr::read_pairs(&args.gold, &args.test, config.do_not_mark_quotes)?;
    info!(pair_count = records.len(), "read AMR pair stream");

    let mut corpus = CorpusAccumulator::new();

    for record in &records {
        match (&record.gold, &record.test) {
            (Ok(gold), Ok(test)) => {
                let concepts1: Vec<String> = gold.instances.iter().map(|(_, c)| c.clone()).collect();
                let concepts2: Vec<String> = test.instances.iter().map(|(_, c)| c.clone()).collect();
                let (candidates, table) = build_pool(gold, test, &engine, config.weighting_scheme);
                let result = search(&candidates, &table, &concepts1, &concepts2, config.restarts, config.seed, config.audit)?;

                let test_num = test.triple_count() as f64;
                let gold_num = gold.triple_count() as f64;
                let (precision, recall, f) = compute_f(result.score, test_num, gold_num);
                debug!(pair = record.index, match_num = result.score, test_num, gold_num, f, "pair scored");
                corpus.add_pair(result.score, test_num, gold_num);

                if matches!(config.mode, ReportMode::PerPair) {
                    print_pair(record.index, precision, recall, f, config.report_pr);
                }
            }
            _ => {
                println!("Pair {}: Smatch score F1: NA_WRONG_AMR", record.index);
            }
        }
    }

    if matches!(config.mode, ReportMode::SingleDocument) {
        let (precision, recall, f) = corpus.compute_f();
        info!(precision, recall, f, "corpus scored");
        print_corpus(precision, recall, f, config.report_pr);
    }

    Ok(())
}
