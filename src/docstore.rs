// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-document bookkeeping: docno ⇄ internal id, stemmed lengths, and
//! persistence of raw article text + metadata under date partitions.
//!
//! Internal ids are 1-based and assigned strictly in parse order, which is
//! what keeps every postings list ascending without ever sorting. The
//! publication date is not stored anywhere — it is derived from the docno
//! itself (`LAmmddyy-nnnn`), both for the metadata record and for the
//! `<year>/<month>/<day>/` directory layout.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::DocId;

/// Publication date carved out of a docno. Fields keep their zero-padded
/// two-digit spelling so paths and display strings need no re-formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PressDate {
    pub year: String,
    pub month: String,
    pub day: String,
}

impl PressDate {
    /// Derive the date from a docno: characters 2..4 are the month, 4..6
    /// the day, 6..8 the two-digit year (prefixed "19").
    ///
    /// Returns `None` when the docno is too short or those positions are
    /// not digits.
    pub fn from_docno(docno: &str) -> Option<Self> {
        let bytes = docno.as_bytes();
        if bytes.len() < 8 || !bytes[2..8].iter().all(u8::is_ascii_digit) {
            return None;
        }
        Some(PressDate {
            year: format!("19{}", &docno[6..8]),
            month: docno[2..4].to_string(),
            day: docno[4..6].to_string(),
        })
    }

    /// `MM/DD/YYYY`, the metadata spelling.
    pub fn numeric(&self) -> String {
        format!("{}/{}/{}", self.month, self.day, self.year)
    }

    /// `Month D, YYYY`, for human-facing display.
    pub fn long_form(&self) -> String {
        const MONTHS: [&str; 12] = [
            "January", "February", "March", "April", "May", "June", "July",
            "August", "September", "October", "November", "December",
        ];
        let month_name = self
            .month
            .parse::<usize>()
            .ok()
            .and_then(|m| MONTHS.get(m.wrapping_sub(1)).copied())
            .unwrap_or("Unknown");
        let day = self.day.trim_start_matches('0');
        let day = if day.is_empty() { "0" } else { day };
        format!("{} {}, {}", month_name, day, self.year)
    }

    /// The partition directory for this date under `root`.
    pub fn partition(&self, root: &Path) -> PathBuf {
        root.join(&self.year).join(&self.month).join(&self.day)
    }
}

/// Metadata persisted next to each raw document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMetadata {
    pub docno: String,
    pub date: String,
    pub headline: String,
}

/// Paths of the raw text file and its metadata record for one document.
pub fn document_paths(root: &Path, date: &PressDate, id: DocId) -> (PathBuf, PathBuf) {
    let dir = date.partition(root);
    let doc = dir.join(format!("{:04}.txt", id.0));
    let meta = dir.join(format!("{:04}_metadata.json", id.0));
    (doc, meta)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocStore {
    docno_to_id: HashMap<String, DocId>,
    id_to_docno: Vec<String>,
    lengths: Vec<u32>,
}

impl DocStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next internal id for `docno`. Each docno may appear
    /// exactly once in a corpus; a repeat is a format error in the input.
    pub fn assign(&mut self, docno: &str) -> Result<DocId, String> {
        if self.docno_to_id.contains_key(docno) {
            return Err(format!("duplicate DOCNO {}", docno));
        }
        let id = DocId(self.id_to_docno.len() as u32 + 1);
        self.docno_to_id.insert(docno.to_string(), id);
        self.id_to_docno.push(docno.to_string());
        self.lengths.push(0);
        Ok(id)
    }

    pub fn docno_of(&self, id: DocId) -> Option<&str> {
        self.id_to_docno.get(id.index()).map(String::as_str)
    }

    pub fn id_of(&self, docno: &str) -> Option<DocId> {
        self.docno_to_id.get(docno).copied()
    }

    /// Record the stemmed-token length of a document.
    pub fn record_length(&mut self, id: DocId, length: u32) {
        self.lengths[id.index()] = length;
    }

    pub fn length_of(&self, id: DocId) -> Option<u32> {
        self.lengths.get(id.index()).copied()
    }

    pub fn doc_count(&self) -> usize {
        self.id_to_docno.len()
    }

    /// Doc lengths in ascending internal-id order.
    pub fn lengths(&self) -> &[u32] {
        &self.lengths
    }

    /// Docnos in ascending internal-id order.
    pub fn docnos(&self) -> impl Iterator<Item = (DocId, &str)> {
        self.id_to_docno
            .iter()
            .enumerate()
            .map(|(i, d)| (DocId(i as u32 + 1), d.as_str()))
    }

    /// Write the captured raw content and its metadata record under the
    /// date partition for `id`.
    pub fn persist_raw(
        &self,
        root: &Path,
        id: DocId,
        date: &PressDate,
        content: &str,
        headline: &str,
    ) -> Result<(), String> {
        let dir = date.partition(root);
        fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;

        let (doc_path, meta_path) = document_paths(root, date, id);
        fs::write(&doc_path, content)
            .map_err(|e| format!("Failed to write {}: {}", doc_path.display(), e))?;

        let docno = self
            .docno_of(id)
            .ok_or_else(|| format!("unknown internal id {}", id))?;
        let metadata = DocMetadata {
            docno: docno.to_string(),
            date: date.numeric(),
            headline: headline.to_string(),
        };
        let json = serde_json::to_string(&metadata)
            .map_err(|e| format!("Failed to encode metadata for {}: {}", docno, e))?;
        fs::write(&meta_path, json)
            .map_err(|e| format!("Failed to write {}: {}", meta_path.display(), e))?;

        Ok(())
    }

    /// Rebuild from loaded artifacts (id-ordered docnos + lengths).
    pub fn from_parts(id_to_docno: Vec<String>, lengths: Vec<u32>) -> Result<Self, String> {
        if id_to_docno.len() != lengths.len() {
            return Err(format!(
                "docno map has {} entries but doc-lengths has {}",
                id_to_docno.len(),
                lengths.len()
            ));
        }
        let mut docno_to_id = HashMap::with_capacity(id_to_docno.len());
        for (i, docno) in id_to_docno.iter().enumerate() {
            if docno_to_id
                .insert(docno.clone(), DocId(i as u32 + 1))
                .is_some()
            {
                return Err(format!("duplicate DOCNO {} in artifacts", docno));
            }
        }
        Ok(Self {
            docno_to_id,
            id_to_docno,
            lengths,
        })
    }
}
