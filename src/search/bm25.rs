// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! BM25 ranking.
//!
//! Per query term with document frequency `ni` over a corpus of `N`
//! documents:
//!
//! ```text
//! idf  = ln((N - ni + 0.5) / (ni + 0.5))        (sign kept; common terms go negative)
//! K    = k1 * ((1 - b) + b * dl / avgdl)
//! s    = (tf / (K + tf)) * idf
//! ```
//!
//! summed over the query's terms *with repetition*: a term that appears
//! twice in the query contributes twice, which is how query term frequency
//! is represented.
//!
//! Ordering: score descending, ties broken by ascending internal doc id so
//! runs are reproducible byte for byte.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::artifacts::Artifacts;
use crate::tokenize::analyze;
use crate::types::DocId;

/// Default result depth for TREC runs.
pub const DEFAULT_TOP_K: usize = 1000;

/// BM25 tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Params {
    /// Term frequency saturation.
    pub k1: f64,
    /// Document length normalization.
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.2, b: 0.75 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedDoc {
    pub doc_id: DocId,
    pub score: f64,
}

/// Score `query` against the index and return the top `top_k` documents.
///
/// Query terms missing from the lexicon are skipped. An empty corpus (or
/// one whose documents all have length zero, which a well-formed build
/// cannot produce) yields an empty ranking.
pub fn rank(index: &Artifacts, query: &str, params: Bm25Params, top_k: usize) -> Vec<RankedDoc> {
    let n = index.doc_count();
    let avgdl = index.avgdl();
    if n == 0 || avgdl <= 0.0 {
        return Vec::new();
    }

    let mut scores: HashMap<DocId, f64> = HashMap::new();
    for term in analyze(query) {
        let Some(term_id) = index.lexicon.lookup(&term) else {
            continue;
        };
        let Some(postings) = index.index.postings(term_id) else {
            continue;
        };
        let ni = postings.len() as f64;
        let idf = ((n as f64 - ni + 0.5) / (ni + 0.5)).ln();

        for posting in postings {
            let dl = f64::from(index.doc_length(posting.doc_id));
            let k = params.k1 * ((1.0 - params.b) + params.b * dl / avgdl);
            let tf = f64::from(posting.tf);
            *scores.entry(posting.doc_id).or_insert(0.0) += (tf / (k + tf)) * idf;
        }
    }

    let mut ranked: Vec<RankedDoc> = scores
        .into_iter()
        .map(|(doc_id, score)| RankedDoc { doc_id, score })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });
    ranked.truncate(top_k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docstore::DocStore;
    use crate::index::InvertedIndex;
    use crate::lexicon::Lexicon;

    /// Assemble an in-memory index from (docno, text) pairs, mirroring the
    /// build pipeline without touching disk.
    fn index_from(texts: &[(&str, &str)]) -> Artifacts {
        let mut lexicon = Lexicon::new();
        let mut index = InvertedIndex::new();
        let mut docs = DocStore::new();
        for (docno, text) in texts {
            let id = docs.assign(docno).unwrap();
            let terms = analyze(text);
            docs.record_length(id, terms.len() as u32);
            let mut counts: HashMap<crate::types::TermId, u32> = HashMap::new();
            for t in &terms {
                *counts.entry(lexicon.get_or_assign(t)).or_insert(0) += 1;
            }
            let mut counts: Vec<_> = counts.into_iter().collect();
            counts.sort_by_key(|(t, _)| *t);
            for (term_id, tf) in counts {
                index.append(term_id, id, tf);
            }
        }
        Artifacts {
            lexicon,
            index,
            docs,
        }
    }

    fn two_doc_index() -> Artifacts {
        index_from(&[
            ("LA010190-0001", "The quick brown fox"),
            ("LA010290-0001", "quick foxes jump"),
        ])
    }

    #[test]
    fn ranks_specific_term_match_first() {
        let index = two_doc_index();
        let ranked = rank(&index, "quick brown", Bm25Params::default(), 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].doc_id, DocId(1));
        assert_eq!(ranked[1].doc_id, DocId(2));
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn out_of_lexicon_query_yields_empty_ranking() {
        let index = two_doc_index();
        assert!(rank(&index, "zebra quagga", Bm25Params::default(), 10).is_empty());
    }

    #[test]
    fn repeated_query_term_doubles_every_score() {
        let index = two_doc_index();
        let once = rank(&index, "quick", Bm25Params::default(), 10);
        let twice = rank(&index, "quick quick", Bm25Params::default(), 10);
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(&twice) {
            assert_eq!(a.doc_id, b.doc_id);
            assert!((b.score - 2.0 * a.score).abs() < 1e-12);
        }
    }

    #[test]
    fn higher_tf_scores_higher_for_single_term_query() {
        // "fox" in 2 of 5 docs keeps its idf positive; both matching docs
        // have length 4, so only tf separates them
        let index = index_from(&[
            ("LA010190-0001", "fox fox fox den"),
            ("LA010290-0001", "fox den den den"),
            ("LA010390-0001", "owl owl owl owl"),
            ("LA010490-0001", "elk elk elk elk"),
            ("LA010590-0001", "ram ram ram ram"),
        ]);
        let ranked = rank(&index, "fox", Bm25Params::default(), 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].doc_id, DocId(1));
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn score_saturates_toward_idf() {
        // one matching doc out of three; tf grows while idf stays fixed
        let make = |tf: usize| {
            let text = vec!["fox"; tf].join(" ");
            index_from(&[
                ("LA010190-0001", text.as_str()),
                ("LA010290-0001", "owl owl owl owl owl owl owl owl"),
                ("LA010390-0001", "elk elk elk elk elk elk elk elk"),
            ])
        };
        let idf = ((3.0 - 1.0 + 0.5) / 1.5_f64).ln();
        let mut last = 0.0;
        for tf in [1, 8, 64, 4096] {
            let index = make(tf);
            let ranked = rank(&index, "fox", Bm25Params::default(), 10);
            let score = ranked[0].score;
            assert!(score > last, "score must grow with tf");
            assert!(score < idf, "score must stay below idf");
            last = score;
        }
        assert!(idf - last < 0.01, "large tf should approach idf");
    }

    #[test]
    fn ties_break_by_ascending_doc_id() {
        // identical documents tie exactly
        let index = index_from(&[
            ("LA010190-0001", "fox den"),
            ("LA010290-0001", "fox den"),
        ]);
        let ranked = rank(&index, "fox", Bm25Params::default(), 10);
        assert_eq!(ranked[0].doc_id, DocId(1));
        assert_eq!(ranked[1].doc_id, DocId(2));
        assert_eq!(ranked[0].score, ranked[1].score);
    }

    #[test]
    fn top_k_truncates() {
        let index = index_from(&[
            ("LA010190-0001", "fox a"),
            ("LA010290-0001", "fox b"),
            ("LA010390-0001", "fox c"),
        ]);
        assert_eq!(rank(&index, "fox", Bm25Params::default(), 2).len(), 2);
    }

    #[test]
    fn empty_corpus_returns_empty() {
        let index = index_from(&[]);
        assert!(rank(&index, "fox", Bm25Params::default(), 10).is_empty());
    }
}
