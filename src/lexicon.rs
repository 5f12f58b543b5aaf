// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The lexicon: a bijection between terms and dense term ids.
//!
//! Ids are handed out in first-seen order during indexing, so they always
//! form the set `{0, 1, .., len-1}` and double as slots into the postings
//! table. The reverse direction is therefore a plain `Vec` rather than a
//! second map.
//!
//! Retrieval only ever calls [`Lexicon::lookup`]; a missing query term is
//! *absent*, not an error.

use std::collections::HashMap;

use crate::types::TermId;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Lexicon {
    term_to_id: HashMap<String, TermId>,
    id_to_term: Vec<String>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `term`, assigning the next unused one on first
    /// sight. Indexing-time only; retrieval must use [`Self::lookup`].
    pub fn get_or_assign(&mut self, term: &str) -> TermId {
        if let Some(&id) = self.term_to_id.get(term) {
            return id;
        }
        let id = TermId(self.id_to_term.len() as u32);
        self.term_to_id.insert(term.to_string(), id);
        self.id_to_term.push(term.to_string());
        id
    }

    /// Read-only query-time lookup.
    pub fn lookup(&self, term: &str) -> Option<TermId> {
        self.term_to_id.get(term).copied()
    }

    /// Reverse lookup, used for diagnostics.
    pub fn term_of(&self, id: TermId) -> Option<&str> {
        self.id_to_term.get(id.index()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.id_to_term.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_term.is_empty()
    }

    /// Terms in id order, for serialization.
    pub fn terms(&self) -> impl Iterator<Item = (TermId, &str)> {
        self.id_to_term
            .iter()
            .enumerate()
            .map(|(i, t)| (TermId(i as u32), t.as_str()))
    }

    /// Rebuild from an id-ordered term list (artifact loading).
    ///
    /// Returns `None` if the list contains duplicate terms, which would
    /// break the bijection.
    pub fn from_terms(id_to_term: Vec<String>) -> Option<Self> {
        let mut term_to_id = HashMap::with_capacity(id_to_term.len());
        for (i, term) in id_to_term.iter().enumerate() {
            if term_to_id.insert(term.clone(), TermId(i as u32)).is_some() {
                return None;
            }
        }
        Some(Self {
            term_to_id,
            id_to_term,
        })
    }
}
