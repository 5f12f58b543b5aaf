// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build pipeline: gzipped corpus in, index directory out.
//!
//! Strictly sequential by design. Internal ids are assigned in parse order,
//! which is the entire reason postings lists come out ascending without a
//! sort; parallelizing the loop would forfeit that invariant for nothing —
//! the build is I/O bound on the per-document writes anyway.
//!
//! Malformed records are skipped with a `⚠️` diagnostic and the build keeps
//! going. A pre-existing output directory aborts the build before anything
//! is written, so a half-finished index can never overwrite a good one.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use crate::artifacts;
use crate::docstore::{DocStore, PressDate};
use crate::index::InvertedIndex;
use crate::lexicon::Lexicon;
use crate::sgml::open_corpus;
use crate::tokenize::analyze;
use crate::types::TermId;

/// What a finished build produced, for the CLI summary and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub documents: usize,
    pub terms: usize,
    pub tokens: u64,
    pub skipped: usize,
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {pos} docs {msg}")
            .expect("static template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Index `corpus_path` into `output_dir`.
///
/// Fails if the output directory already exists, if the corpus cannot be
/// read, or if the finished artifacts do not satisfy their invariants.
pub fn run_build(corpus_path: &Path, output_dir: &Path) -> Result<BuildSummary, String> {
    if output_dir.exists() {
        return Err(format!(
            "output directory {} already exists",
            output_dir.display()
        ));
    }
    fs::create_dir_all(output_dir)
        .map_err(|e| format!("Failed to create {}: {}", output_dir.display(), e))?;

    let mut stream = open_corpus(corpus_path)?;
    let mut lexicon = Lexicon::new();
    let mut index = InvertedIndex::new();
    let mut docs = DocStore::new();
    let mut skipped = 0usize;

    let pb = spinner();

    while let Some(item) = stream.next() {
        for diagnostic in stream.take_diagnostics() {
            pb.suspend(|| eprintln!("⚠️  {}", diagnostic));
            skipped += 1;
        }
        let article = item?;

        let Some(date) = PressDate::from_docno(&article.docno) else {
            pb.suspend(|| eprintln!("⚠️  skipping {}: DOCNO carries no date", article.docno));
            skipped += 1;
            continue;
        };
        let id = match docs.assign(&article.docno) {
            Ok(id) => id,
            Err(e) => {
                pb.suspend(|| eprintln!("⚠️  skipping record: {}", e));
                skipped += 1;
                continue;
            }
        };

        let terms = analyze(&article.indexable_text());
        if terms.is_empty() {
            pb.suspend(|| eprintln!("⚠️  {} produced no indexable tokens", article.docno));
        }
        docs.record_length(id, terms.len() as u32);

        let mut frequencies: HashMap<TermId, u32> = HashMap::new();
        for term in &terms {
            *frequencies.entry(lexicon.get_or_assign(term)).or_insert(0) += 1;
        }
        for (term_id, tf) in frequencies {
            index.append(term_id, id, tf);
        }

        docs.persist_raw(output_dir, id, &date, &article.content, &article.headline)?;

        pb.inc(1);
        pb.set_message(article.docno);
    }
    for diagnostic in stream.take_diagnostics() {
        pb.suspend(|| eprintln!("⚠️  {}", diagnostic));
        skipped += 1;
    }
    pb.finish_and_clear();

    index
        .check_well_formed(lexicon.len(), docs.doc_count(), docs.lengths())
        .map_err(|v| format!("build produced inconsistent artifacts: {}", v))?;

    artifacts::save(output_dir, &lexicon, &index, &docs)?;

    let summary = BuildSummary {
        documents: docs.doc_count(),
        terms: lexicon.len(),
        tokens: index.total_tf(),
        skipped,
    };

    eprintln!("✅ Index build complete");
    eprintln!(
        "   {} documents │ {} terms │ {} tokens │ {} skipped",
        summary.documents, summary.terms, summary.tokens, summary.skipped
    );

    Ok(summary)
}
