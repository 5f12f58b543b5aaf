// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boolean-AND retrieval: the documents containing *every* query term.
//!
//! Postings lists are strictly ascending by doc id, so the intersection is
//! a straight two-pointer merge — no sets, no sorting, and the result comes
//! out in ascending doc-id order.
//!
//! A single out-of-lexicon term short-circuits the whole conjunction to an
//! empty result; the caller gets the offending term back for its
//! diagnostic.

use crate::artifacts::Artifacts;
use crate::tokenize::analyze;
use crate::types::{DocId, Posting};

/// Outcome of a conjunctive query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BooleanOutcome {
    /// Documents containing every query term, ascending by doc id.
    /// Empty when the terms never co-occur (or the query was empty).
    Matches(Vec<DocId>),
    /// A query term that is not in the lexicon; the conjunction is
    /// trivially empty.
    MissingTerm(String),
}

/// Intersect the postings of every term in `query`.
///
/// The query is analyzed with the same tokenize + stem pipeline the index
/// was built with.
pub fn intersect(index: &Artifacts, query: &str) -> BooleanOutcome {
    let terms = analyze(query);
    if terms.is_empty() {
        return BooleanOutcome::Matches(Vec::new());
    }

    let mut lists: Vec<&[Posting]> = Vec::with_capacity(terms.len());
    for term in &terms {
        let postings = index
            .lexicon
            .lookup(term)
            .and_then(|id| index.index.postings(id));
        match postings {
            Some(p) => lists.push(p),
            None => return BooleanOutcome::MissingTerm(term.clone()),
        }
    }

    // shortest list first bounds every later intersection
    lists.sort_by_key(|l| l.len());

    let mut matches: Vec<DocId> = lists[0].iter().map(|p| p.doc_id).collect();
    for list in &lists[1..] {
        matches = intersect_sorted(&matches, list);
        if matches.is_empty() {
            break;
        }
    }
    BooleanOutcome::Matches(matches)
}

/// Merge-intersect a sorted doc-id list with a sorted postings list.
fn intersect_sorted(acc: &[DocId], postings: &[Posting]) -> Vec<DocId> {
    let mut out = Vec::with_capacity(acc.len().min(postings.len()));
    let (mut i, mut j) = (0, 0);
    while i < acc.len() && j < postings.len() {
        match acc[i].cmp(&postings[j].doc_id) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(acc[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}
