// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Offline evaluation against relevance judgments: Average Precision,
//! Precision@k, and NDCG@k over the standard topic range 401..=450.
//!
//! Gains are binary — a document judged exactly relevant (relevance == 1)
//! counts, everything else does not. Retrieved lists are re-ranked by
//! (score descending, docno descending) before scoring, so the metrics see
//! the ordering the scores claim rather than whatever order the results
//! file happened to be written in.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::trec::{is_excluded_topic, read_qrels, read_results, RetrievedDoc};

/// First and last topic of the evaluated range.
pub const TOPIC_FIRST: u32 = 401;
pub const TOPIC_LAST: u32 = 450;

/// Average Precision: mean of precision at each relevant-document rank,
/// divided by the number of *known* relevant documents.
pub fn average_precision(relevant: &HashSet<String>, retrieved: &[String]) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }
    let mut hits = 0usize;
    let mut precision_sum = 0.0;
    for (i, docno) in retrieved.iter().enumerate() {
        if relevant.contains(docno) {
            hits += 1;
            precision_sum += hits as f64 / (i + 1) as f64;
        }
    }
    precision_sum / relevant.len() as f64
}

/// Precision@k: fraction of the first `k` results that are relevant.
pub fn precision_at_k(relevant: &HashSet<String>, retrieved: &[String], k: usize) -> f64 {
    if k == 0 || retrieved.is_empty() {
        return 0.0;
    }
    let hits = retrieved
        .iter()
        .take(k)
        .filter(|d| relevant.contains(*d))
        .count();
    hits as f64 / k as f64
}

/// NDCG@k with binary gains and a `log2(i + 2)` discount. The ideal DCG
/// sums the discount over `min(k, |relevant|)` positions.
pub fn ndcg_at_k(relevant: &HashSet<String>, retrieved: &[String], k: usize) -> f64 {
    let ideal: f64 = (0..k.min(relevant.len()))
        .map(|i| 1.0 / ((i + 2) as f64).log2())
        .sum();
    if ideal == 0.0 {
        return 0.0;
    }
    let dcg: f64 = retrieved
        .iter()
        .take(k)
        .enumerate()
        .filter(|(_, d)| relevant.contains(*d))
        .map(|(i, _)| 1.0 / ((i + 2) as f64).log2())
        .sum();
    dcg / ideal
}

#[derive(Debug, Clone, Copy, Default)]
struct TopicScores {
    ap: f64,
    p_at_k: f64,
    ndcg_at_k: f64,
    ndcg_at_1000: f64,
}

/// Evaluate a results file against qrels and write the tab-separated
/// report: one `metric\ttopic\tscore` line per metric per topic, metrics
/// grouped together.
pub fn run_eval(
    qrels_path: &Path,
    results_path: &Path,
    output_path: &Path,
    k: usize,
) -> Result<(), String> {
    let qrels = read_qrels(qrels_path)?;
    let results = read_results(results_path)?;

    let topics: Vec<u32> = (TOPIC_FIRST..=TOPIC_LAST)
        .filter(|t| !is_excluded_topic(*t))
        .collect();

    let mut scores = Vec::with_capacity(topics.len());
    for &topic in &topics {
        let relevant: HashSet<String> = qrels
            .get(&topic)
            .map(|judged| {
                judged
                    .iter()
                    .filter(|(_, &rel)| rel == 1)
                    .map(|(docno, _)| docno.clone())
                    .collect()
            })
            .unwrap_or_default();

        let retrieved = match results.get(&topic) {
            Some(list) => ranked_docnos(list),
            None => {
                eprintln!("⚠️  no results found for topic {}", topic);
                scores.push(TopicScores::default());
                continue;
            }
        };

        scores.push(TopicScores {
            ap: average_precision(&relevant, &retrieved),
            p_at_k: precision_at_k(&relevant, &retrieved, k),
            ndcg_at_k: ndcg_at_k(&relevant, &retrieved, k),
            ndcg_at_1000: ndcg_at_k(&relevant, &retrieved, 1000),
        });
    }

    let mut out = String::new();
    let groups: [(String, Vec<f64>); 4] = [
        ("ap".to_string(), scores.iter().map(|s| s.ap).collect()),
        (format!("p_at_{}", k), scores.iter().map(|s| s.p_at_k).collect()),
        (
            format!("ndcg_at_{}", k),
            scores.iter().map(|s| s.ndcg_at_k).collect(),
        ),
        (
            "ndcg_at_1000".to_string(),
            scores.iter().map(|s| s.ndcg_at_1000).collect(),
        ),
    ];
    for (label, values) in &groups {
        for (topic, value) in topics.iter().zip(values) {
            out.push_str(&format!("{}\t{}\t{:.4}\n", label, topic, value));
        }
    }
    fs::write(output_path, out)
        .map_err(|e| format!("Failed to write {}: {}", output_path.display(), e))?;

    eprintln!("✅ evaluated {} topics → {}", topics.len(), output_path.display());
    Ok(())
}

/// Re-rank by (score descending, docno descending) and keep the docnos.
fn ranked_docnos(results: &[RetrievedDoc]) -> Vec<String> {
    let mut sorted: Vec<&RetrievedDoc> = results.iter().collect();
    sorted.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.docno.cmp(&a.docno))
    });
    sorted.into_iter().map(|r| r.docno.clone()).collect()
}
