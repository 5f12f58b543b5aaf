// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The on-disk index layout, and the immutable loaded view of it.
//!
//! Everything under the output directory is written exactly once at the end
//! of a build and never mutated afterwards:
//!
//! ```text
//! <output_dir>/
//!   docno_to_id.json            { "LA010190-0001": 1, .. }
//!   id_to_docno.json            { "1": "LA010190-0001", .. }
//!   doc-lengths.txt             one integer per line, id order
//!   inverted_index.json         [ [[doc_id, tf], ..], .. ] by term id
//!   Lexicon/
//!     lexicon_term_to_id.json   { "quick": 0, .. }
//!     lexicon_id_to_term.json   { "0": "quick", .. }
//!   <YYYY>/<MM>/<DD>/           raw documents + metadata, see docstore
//! ```
//!
//! [`Artifacts::load`] revalidates the structural invariants on the way in,
//! so retrievers can lean on them without re-checking.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::docstore::DocStore;
use crate::index::InvertedIndex;
use crate::lexicon::Lexicon;
use crate::types::{DocId, TermId};

pub const DOCNO_TO_ID: &str = "docno_to_id.json";
pub const ID_TO_DOCNO: &str = "id_to_docno.json";
pub const DOC_LENGTHS: &str = "doc-lengths.txt";
pub const INVERTED_INDEX: &str = "inverted_index.json";
pub const LEXICON_DIR: &str = "Lexicon";
pub const LEXICON_TERM_TO_ID: &str = "lexicon_term_to_id.json";
pub const LEXICON_ID_TO_TERM: &str = "lexicon_id_to_term.json";

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let json = serde_json::to_string(value)
        .map_err(|e| format!("Failed to encode {}: {}", path.display(), e))?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))
}

/// Serialize every index artifact under `dir`. The per-document raw files
/// are already in place by this point; this writes the lookup structures.
pub fn save(
    dir: &Path,
    lexicon: &Lexicon,
    index: &InvertedIndex,
    docs: &DocStore,
) -> Result<(), String> {
    let docno_to_id: BTreeMap<&str, u32> = docs.docnos().map(|(id, d)| (d, id.0)).collect();
    write_json(&dir.join(DOCNO_TO_ID), &docno_to_id)?;

    let id_to_docno: BTreeMap<String, &str> =
        docs.docnos().map(|(id, d)| (id.0.to_string(), d)).collect();
    write_json(&dir.join(ID_TO_DOCNO), &id_to_docno)?;

    let lengths_path = dir.join(DOC_LENGTHS);
    let mut lengths_text = String::new();
    for length in docs.lengths() {
        lengths_text.push_str(&length.to_string());
        lengths_text.push('\n');
    }
    fs::write(&lengths_path, lengths_text)
        .map_err(|e| format!("Failed to write {}: {}", lengths_path.display(), e))?;

    write_json(&dir.join(INVERTED_INDEX), index)?;

    let lexicon_dir = dir.join(LEXICON_DIR);
    fs::create_dir_all(&lexicon_dir)
        .map_err(|e| format!("Failed to create {}: {}", lexicon_dir.display(), e))?;
    let term_to_id: BTreeMap<&str, u32> = lexicon.terms().map(|(id, t)| (t, id.0)).collect();
    write_json(&lexicon_dir.join(LEXICON_TERM_TO_ID), &term_to_id)?;
    let id_to_term: BTreeMap<String, &str> = lexicon
        .terms()
        .map(|(id, t)| (id.0.to_string(), t))
        .collect();
    write_json(&lexicon_dir.join(LEXICON_ID_TO_TERM), &id_to_term)?;

    Ok(())
}

/// Reassemble an id-keyed JSON object (`{"1": v, ..}`) into a dense vector,
/// checking that the keys are exactly `base..base+len`.
fn dense_from_keyed(
    map: BTreeMap<String, String>,
    base: u32,
    what: &str,
) -> Result<Vec<String>, String> {
    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        let id: u32 = key
            .parse()
            .map_err(|_| format!("{}: non-numeric id key {:?}", what, key))?;
        entries.push((id, value));
    }
    entries.sort_by_key(|(id, _)| *id);
    for (i, (id, _)) in entries.iter().enumerate() {
        if *id != base + i as u32 {
            return Err(format!("{}: ids are not dense at {}", what, id));
        }
    }
    Ok(entries.into_iter().map(|(_, v)| v).collect())
}

/// Load the docno maps and doc lengths only — enough to resolve documents
/// without paying for the postings table (the document dump utility path).
pub fn load_docstore(dir: &Path) -> Result<DocStore, String> {
    let id_to_docno: BTreeMap<String, String> = read_json(&dir.join(ID_TO_DOCNO))?;
    let docnos = dense_from_keyed(id_to_docno, 1, ID_TO_DOCNO)?;

    let lengths_path = dir.join(DOC_LENGTHS);
    let file = fs::File::open(&lengths_path)
        .map_err(|e| format!("Failed to read {}: {}", lengths_path.display(), e))?;
    let mut lengths = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| format!("Failed to read {}: {}", lengths_path.display(), e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let length: u32 = trimmed
            .parse()
            .map_err(|_| format!("{}: bad length line {:?}", DOC_LENGTHS, trimmed))?;
        lengths.push(length);
    }

    let store = DocStore::from_parts(docnos, lengths)?;

    // the forward map must agree with the reverse one
    let docno_to_id: BTreeMap<String, u32> = read_json(&dir.join(DOCNO_TO_ID))?;
    if docno_to_id.len() != store.doc_count() {
        return Err(format!(
            "{} has {} entries but {} has {}",
            DOCNO_TO_ID,
            docno_to_id.len(),
            ID_TO_DOCNO,
            store.doc_count()
        ));
    }
    for (docno, id) in docno_to_id {
        if store.id_of(&docno) != Some(DocId(id)) {
            return Err(format!("{}: {} maps to inconsistent id {}", DOCNO_TO_ID, docno, id));
        }
    }

    Ok(store)
}

/// The complete loaded index: lexicon, postings, document statistics.
/// Immutable after load; safe to share across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub lexicon: Lexicon,
    pub index: InvertedIndex,
    pub docs: DocStore,
}

impl Artifacts {
    /// Load and validate every artifact under `dir`.
    pub fn load(dir: &Path) -> Result<Self, String> {
        let lexicon_dir = dir.join(LEXICON_DIR);
        let id_to_term: BTreeMap<String, String> =
            read_json(&lexicon_dir.join(LEXICON_ID_TO_TERM))?;
        let terms = dense_from_keyed(id_to_term, 0, LEXICON_ID_TO_TERM)?;
        let lexicon = Lexicon::from_terms(terms)
            .ok_or_else(|| format!("{}: duplicate terms", LEXICON_ID_TO_TERM))?;

        let term_to_id: BTreeMap<String, u32> = read_json(&lexicon_dir.join(LEXICON_TERM_TO_ID))?;
        if term_to_id.len() != lexicon.len() {
            return Err(format!(
                "{} has {} entries but {} has {}",
                LEXICON_TERM_TO_ID,
                term_to_id.len(),
                LEXICON_ID_TO_TERM,
                lexicon.len()
            ));
        }
        for (term, id) in term_to_id {
            if lexicon.lookup(&term) != Some(TermId(id)) {
                return Err(format!(
                    "{}: {:?} maps to inconsistent id {}",
                    LEXICON_TERM_TO_ID, term, id
                ));
            }
        }

        let index: InvertedIndex = read_json(&dir.join(INVERTED_INDEX))?;
        let docs = load_docstore(dir)?;

        index
            .check_well_formed(lexicon.len(), docs.doc_count(), docs.lengths())
            .map_err(|v| format!("index artifacts are inconsistent: {}", v))?;

        Ok(Artifacts {
            lexicon,
            index,
            docs,
        })
    }

    pub fn doc_count(&self) -> usize {
        self.docs.doc_count()
    }

    /// Mean stemmed-token length over the corpus. Zero for an empty corpus.
    pub fn avgdl(&self) -> f64 {
        let n = self.docs.doc_count();
        if n == 0 {
            return 0.0;
        }
        let total: u64 = self.docs.lengths().iter().map(|&l| u64::from(l)).sum();
        total as f64 / n as f64
    }

    /// Length of `doc_id`, or 0 when the id is out of range.
    pub fn doc_length(&self, doc_id: DocId) -> u32 {
        self.docs.length_of(doc_id).unwrap_or(0)
    }
}
