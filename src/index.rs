// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index construction.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTINGS_SORTED**: each postings list is strictly ascending by
//!    doc id. Build-time appends preserve this for free because internal
//!    ids are handed out monotonically in parse order — nothing ever sorts.
//! 2. **TF_POSITIVE**: every posting has `tf >= 1`.
//! 3. **DENSE_TERMS**: the table is indexed directly by term id; its length
//!    equals the lexicon's.
//! 4. **LENGTH_CONSERVATION**: summed tf over all postings equals the
//!    summed stemmed-token length of the corpus.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{DocId, Posting, TermId};

/// `term_id -> ordered postings list`. Serializes as the array-of-arrays
/// shape of `inverted_index.json`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    postings: Vec<Vec<Posting>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `(doc_id, tf)` to the postings list for `term`, growing the
    /// table when `term` is newly assigned. O(1) amortized.
    pub fn append(&mut self, term: TermId, doc_id: DocId, tf: u32) {
        if term.index() >= self.postings.len() {
            self.postings.resize_with(term.index() + 1, Vec::new);
        }
        let list = &mut self.postings[term.index()];
        debug_assert!(
            list.last().map_or(true, |p| p.doc_id < doc_id),
            "postings for term {} must stay ascending",
            term.0
        );
        list.push(Posting { doc_id, tf });
    }

    /// Random access by term id. `None` when the id is out of range.
    pub fn postings(&self, term: TermId) -> Option<&[Posting]> {
        self.postings.get(term.index()).map(Vec::as_slice)
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Total term frequency over all postings, for the length-conservation
    /// check against the doc-lengths vector.
    pub fn total_tf(&self) -> u64 {
        self.postings
            .iter()
            .flat_map(|list| list.iter())
            .map(|p| u64::from(p.tf))
            .sum()
    }

    /// Validate every structural invariant against the companion artifacts.
    pub fn check_well_formed(
        &self,
        lexicon_len: usize,
        doc_count: usize,
        doc_lengths: &[u32],
    ) -> Result<(), IndexViolation> {
        if self.postings.len() != lexicon_len {
            return Err(IndexViolation::TermTableMismatch {
                terms: self.postings.len(),
                lexicon: lexicon_len,
            });
        }
        for (term_id, list) in self.postings.iter().enumerate() {
            let term = TermId(term_id as u32);
            if list.is_empty() {
                return Err(IndexViolation::EmptyPostings { term });
            }
            let mut prev: Option<DocId> = None;
            for posting in list {
                if posting.tf == 0 {
                    return Err(IndexViolation::ZeroFrequency {
                        term,
                        doc_id: posting.doc_id,
                    });
                }
                if posting.doc_id.0 == 0 || posting.doc_id.0 as usize > doc_count {
                    return Err(IndexViolation::DocIdOutOfRange {
                        term,
                        doc_id: posting.doc_id,
                        doc_count,
                    });
                }
                if prev.is_some_and(|p| p >= posting.doc_id) {
                    return Err(IndexViolation::UnsortedPostings {
                        term,
                        doc_id: posting.doc_id,
                    });
                }
                prev = Some(posting.doc_id);
            }
        }
        let posted: u64 = self.total_tf();
        let measured: u64 = doc_lengths.iter().map(|&l| u64::from(l)).sum();
        if posted != measured {
            return Err(IndexViolation::LengthConservation { posted, measured });
        }
        Ok(())
    }
}

/// Structural invariant violations, surfaced when artifacts disagree with
/// each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexViolation {
    TermTableMismatch {
        terms: usize,
        lexicon: usize,
    },
    EmptyPostings {
        term: TermId,
    },
    ZeroFrequency {
        term: TermId,
        doc_id: DocId,
    },
    DocIdOutOfRange {
        term: TermId,
        doc_id: DocId,
        doc_count: usize,
    },
    UnsortedPostings {
        term: TermId,
        doc_id: DocId,
    },
    LengthConservation {
        posted: u64,
        measured: u64,
    },
}

impl fmt::Display for IndexViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexViolation::TermTableMismatch { terms, lexicon } => {
                write!(
                    f,
                    "postings table has {} terms, lexicon has {}",
                    terms, lexicon
                )
            }
            IndexViolation::EmptyPostings { term } => {
                write!(f, "term {} has an empty postings list", term.0)
            }
            IndexViolation::ZeroFrequency { term, doc_id } => {
                write!(f, "term {} posts tf=0 in doc {}", term.0, doc_id)
            }
            IndexViolation::DocIdOutOfRange {
                term,
                doc_id,
                doc_count,
            } => {
                write!(
                    f,
                    "term {} posts doc {} outside 1..={}",
                    term.0, doc_id, doc_count
                )
            }
            IndexViolation::UnsortedPostings { term, doc_id } => {
                write!(
                    f,
                    "postings for term {} not ascending at doc {}",
                    term.0, doc_id
                )
            }
            IndexViolation::LengthConservation { posted, measured } => {
                write!(
                    f,
                    "postings carry {} tokens but doc-lengths sum to {}",
                    posted, measured
                )
            }
        }
    }
}
