// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! BM25 and Boolean retrieval over TREC-style newswire corpora.
//!
//! Gazette ingests a gzipped SGML corpus (the LA Times collection), builds
//! a persistent inverted index, and serves ranked BM25 retrieval and
//! Boolean-AND retrieval over it, with offline evaluation against
//! relevance judgments.
//!
//! # Architecture
//!
//! ```text
//! corpus.gz ─▶ sgml ─▶ build ─┬▶ lexicon     (term ⇄ term id)
//!                             ├▶ index       (term id ▶ postings)
//!                             ├▶ docstore    (docno ⇄ doc id, lengths, raw docs)
//!                             └▶ artifacts   (JSON layout on disk)
//!
//! query ─▶ tokenize ─▶ stem ─▶ search::{bm25, boolean} ─▶ trec results ─▶ eval
//! ```
//!
//! The analysis chain — lowercase ASCII tokenization followed by the
//! classical Porter stemmer — is shared between indexing and both query
//! paths, so query terms can only miss the lexicon when they never
//! occurred in the corpus.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use gazette::{build::run_build, artifacts::Artifacts, search::bm25};
//!
//! run_build(Path::new("latimes.gz"), Path::new("index"))?;
//! let index = Artifacts::load(Path::new("index"))?;
//! let top = bm25::rank(&index, "transit plan", bm25::Bm25Params::default(), 10);
//! ```

pub mod artifacts;
pub mod build;
pub mod cli;
pub mod docstore;
pub mod eval;
pub mod index;
pub mod lexicon;
pub mod search;
pub mod sgml;
pub mod snippet;
pub mod stem;
pub mod tokenize;
pub mod trec;
pub mod types;

// Re-exports for the public API
pub use artifacts::Artifacts;
pub use build::{run_build, BuildSummary};
pub use docstore::{DocMetadata, DocStore, PressDate};
pub use index::{IndexViolation, InvertedIndex};
pub use lexicon::Lexicon;
pub use search::bm25::{rank as bm25_rank, Bm25Params, RankedDoc, DEFAULT_TOP_K};
pub use search::boolean::{intersect as boolean_intersect, BooleanOutcome};
pub use sgml::{open_corpus, strip_tags, unescape_entities, Article, ArticleStream, DocParser};
pub use snippet::best_snippet;
pub use stem::stem;
pub use tokenize::{analyze, tokenize};
pub use types::{DocId, Posting, TermId};

#[cfg(test)]
mod tests {
    //! Property tests for the analysis chain and the index invariants.

    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// Run the indexing loop in memory over (docno, text) pairs.
    fn index_texts(texts: &[(String, String)]) -> (Lexicon, InvertedIndex, DocStore) {
        let mut lexicon = Lexicon::new();
        let mut index = InvertedIndex::new();
        let mut docs = DocStore::new();
        for (docno, text) in texts {
            let id = docs.assign(docno).unwrap();
            let terms = analyze(text);
            docs.record_length(id, terms.len() as u32);
            let mut counts: HashMap<TermId, u32> = HashMap::new();
            for t in &terms {
                *counts.entry(lexicon.get_or_assign(t)).or_insert(0) += 1;
            }
            let mut counts: Vec<_> = counts.into_iter().collect();
            counts.sort_by_key(|(t, _)| *t);
            for (term_id, tf) in counts {
                index.append(term_id, id, tf);
            }
        }
        (lexicon, index, docs)
    }

    fn docno_for(i: usize) -> String {
        format!("LA{:02}{:02}90-{:04}", i % 12 + 1, i % 28 + 1, i)
    }

    fn corpus_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
        let word = prop::string::string_regex("[a-z]{1,8}").unwrap();
        let text = prop::collection::vec(word, 1..12).prop_map(|w| w.join(" "));
        prop::collection::vec(text, 1..8).prop_map(|texts| {
            texts
                .into_iter()
                .enumerate()
                .map(|(i, t)| (docno_for(i), t))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn tokenize_is_deterministic_and_ascii(s in ".*") {
            let first = tokenize(&s);
            prop_assert_eq!(&first, &tokenize(&s));
            for token in &first {
                prop_assert!(!token.is_empty());
                prop_assert!(token
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_'));
            }
        }

        #[test]
        fn analyze_is_deterministic(s in ".*") {
            prop_assert_eq!(analyze(&s), analyze(&s));
        }

        #[test]
        fn stem_never_fails_or_grows_letters(word in "[a-z]{1,16}") {
            let stemmed = stem(&word);
            prop_assert!(!stemmed.is_empty());
            prop_assert!(stemmed.len() <= word.len() + 1); // hop -> hope
            prop_assert_eq!(&stem(&word), &stemmed);
        }

        #[test]
        fn lexicon_is_a_bijection(terms in prop::collection::vec("[a-z]{1,8}", 1..50)) {
            let mut lexicon = Lexicon::new();
            for term in &terms {
                let id = lexicon.get_or_assign(term);
                prop_assert_eq!(lexicon.term_of(id), Some(term.as_str()));
                prop_assert_eq!(lexicon.lookup(term), Some(id));
            }
            prop_assert!(lexicon.len() <= terms.len());
        }

        #[test]
        fn postings_stay_sorted_and_lengths_conserve(texts in corpus_strategy()) {
            let (lexicon, index, docs) = index_texts(&texts);

            for (term_id, _) in lexicon.terms() {
                let postings = index.postings(term_id).unwrap();
                prop_assert!(!postings.is_empty());
                for pair in postings.windows(2) {
                    prop_assert!(pair[0].doc_id < pair[1].doc_id);
                }
                for p in postings {
                    prop_assert!(p.tf >= 1);
                }
            }

            let total_length: u64 = docs.lengths().iter().map(|&l| u64::from(l)).sum();
            prop_assert_eq!(index.total_tf(), total_length);
            prop_assert_eq!(
                index.check_well_formed(lexicon.len(), docs.doc_count(), docs.lengths()),
                Ok(())
            );
        }

        #[test]
        fn internal_ids_are_dense_in_parse_order(texts in corpus_strategy()) {
            let (_, _, docs) = index_texts(&texts);
            for (i, (docno, _)) in texts.iter().enumerate() {
                prop_assert_eq!(docs.id_of(docno), Some(DocId(i as u32 + 1)));
            }
        }

        #[test]
        fn bm25_single_term_query_only_scores_posted_docs(texts in corpus_strategy()) {
            let (lexicon, index, docs) = index_texts(&texts);
            let artifacts = Artifacts { lexicon, index, docs };

            // query with the first term of the first document
            let query = texts[0].1.split(' ').next().unwrap_or("");
            prop_assume!(!query.is_empty());
            let ranked = bm25_rank(&artifacts, query, Bm25Params::default(), 1000);

            let stemmed = stem(query);
            if let Some(term_id) = artifacts.lexicon.lookup(&stemmed) {
                let posted = artifacts.index.postings(term_id).unwrap().len();
                prop_assert_eq!(ranked.len(), posted);
            }
        }
    }
}
