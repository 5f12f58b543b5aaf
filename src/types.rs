// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the index.
//!
//! Two id spaces exist side by side and must never be confused:
//!
//! - `TermId` — dense, 0-based, assigned in first-seen order by the lexicon.
//!   Stable within one build, not across rebuilds.
//! - `DocId` — dense, 1-based, assigned in parse order by the doc store.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Posting**: `tf >= 1`. A term that does not occur in a document has no
//!   posting there.
//! - **Postings list**: strictly ascending `doc_id`, no duplicates. This
//!   falls out of monotonic id assignment at build time and everything at
//!   query time (intersection, length lookup) leans on it.
//! - **DocId**: `1 <= id <= N`; `id.index()` is the 0-based slot into the
//!   doc-lengths vector.

use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Type-safe term identifier.
///
/// Prevents accidentally indexing the postings table with a document id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TermId(pub u32);

impl TermId {
    /// Slot into the postings table.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for TermId {
    fn from(id: u32) -> Self {
        TermId(id)
    }
}

/// Type-safe internal document identifier, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// First valid internal id.
    pub const FIRST: DocId = DocId(1);

    /// Slot into the doc-lengths vector (`id - 1`).
    #[inline]
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// The id that follows this one in parse order.
    #[inline]
    pub fn next(self) -> DocId {
        DocId(self.0 + 1)
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One `(doc_id, tf)` entry in a postings list.
///
/// Serializes as a 2-element array `[doc_id, tf]`, which is the on-disk
/// shape of `inverted_index.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub tf: u32,
}

impl Serialize for Posting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.doc_id.0, self.tf).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Posting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (doc_id, tf) = <(u32, u32)>::deserialize(deserializer)?;
        if doc_id == 0 {
            return Err(D::Error::custom("posting doc_id must be 1-based"));
        }
        Ok(Posting {
            doc_id: DocId(doc_id),
            tf,
        })
    }
}
