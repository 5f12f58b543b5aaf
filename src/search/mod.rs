// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Retrieval over a loaded index: BM25 ranking and Boolean-AND.
//!
//! Both retrievers analyze queries with the exact pipeline the indexer used
//! (tokenize + stem, see `tokenize::analyze`), so a query term can only miss
//! the lexicon when it genuinely never occurred in the corpus.
//!
//! The batch runners here drive a whole TREC queries file against an index
//! directory and emit one results file per run, which is what the `bm25`
//! and `booland` subcommands call.

pub mod bm25;
pub mod boolean;

use std::path::Path;

use crate::artifacts::Artifacts;
use crate::trec::{read_queries, write_results, TrecResult};

/// Run BM25 over every topic in `queries_path`, writing
/// `<results_dir>/<run_tag>.txt` in TREC format.
pub fn run_bm25_batch(
    index_dir: &Path,
    queries_path: &Path,
    results_dir: &Path,
    params: bm25::Bm25Params,
    top_k: usize,
    run_tag: &str,
) -> Result<(), String> {
    let index = Artifacts::load(index_dir)?;
    let queries = read_queries(queries_path)?;

    let mut results = Vec::new();
    for (topic, text) in &queries {
        for (i, ranked) in bm25::rank(&index, text, params, top_k).iter().enumerate() {
            let docno = index
                .docs
                .docno_of(ranked.doc_id)
                .ok_or_else(|| format!("internal id {} has no docno", ranked.doc_id))?;
            results.push(TrecResult {
                topic: *topic,
                docno: docno.to_string(),
                rank: i + 1,
                score: ranked.score,
            });
        }
    }

    let path = results_file(results_dir, run_tag)?;
    write_results(&path, &results, run_tag)?;
    eprintln!(
        "✅ {} topics │ {} results → {}",
        queries.len(),
        results.len(),
        path.display()
    );
    Ok(())
}

/// Run Boolean-AND over every topic in `queries_path`, writing
/// `<results_dir>/<run_tag>.txt` in TREC format.
///
/// A topic whose query contains an out-of-lexicon term yields no results;
/// the missing term is reported on stderr.
pub fn run_boolean_batch(
    index_dir: &Path,
    queries_path: &Path,
    results_dir: &Path,
    run_tag: &str,
) -> Result<(), String> {
    let index = Artifacts::load(index_dir)?;
    let queries = read_queries(queries_path)?;

    let mut results = Vec::new();
    for (topic, text) in &queries {
        let matches = match boolean::intersect(&index, text) {
            boolean::BooleanOutcome::Matches(m) => m,
            boolean::BooleanOutcome::MissingTerm(term) => {
                eprintln!(
                    "⚠️  topic {}: term '{}' not found in lexicon",
                    topic, term
                );
                continue;
            }
        };
        let total = matches.len();
        for (i, doc_id) in matches.into_iter().enumerate() {
            let docno = index
                .docs
                .docno_of(doc_id)
                .ok_or_else(|| format!("internal id {} has no docno", doc_id))?;
            results.push(TrecResult {
                topic: *topic,
                docno: docno.to_string(),
                rank: i + 1,
                // descending pseudo-score keeps the TREC file rank-consistent
                score: (total - (i + 1)) as f64,
            });
        }
    }

    let path = results_file(results_dir, run_tag)?;
    write_results(&path, &results, run_tag)?;
    eprintln!(
        "✅ {} topics │ {} results → {}",
        queries.len(),
        results.len(),
        path.display()
    );
    Ok(())
}

fn results_file(results_dir: &Path, run_tag: &str) -> Result<std::path::PathBuf, String> {
    std::fs::create_dir_all(results_dir)
        .map_err(|e| format!("Failed to create {}: {}", results_dir.display(), e))?;
    Ok(results_dir.join(format!("{}.txt", run_tag)))
}
