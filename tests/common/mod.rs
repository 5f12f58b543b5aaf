//! Shared test fixtures: tiny gzipped corpora and built indexes.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;

use gazette::build::{run_build, BuildSummary};

/// Write a gzipped SGML corpus of `(docno, headline, text)` articles.
pub fn write_corpus(path: &Path, articles: &[(&str, &str, &str)]) {
    let mut sgml = String::new();
    for (docno, headline, text) in articles {
        sgml.push_str("<DOC>\n");
        sgml.push_str(&format!("<DOCNO> {} </DOCNO>\n", docno));
        if !headline.is_empty() {
            sgml.push_str(&format!("<HEADLINE>\n<P>\n{}\n</P>\n</HEADLINE>\n", headline));
        }
        sgml.push_str(&format!("<TEXT>\n{}\n</TEXT>\n", text));
        sgml.push_str("</DOC>\n");
    }
    write_raw_corpus(path, &sgml);
}

/// Write an arbitrary SGML string as a gzipped corpus file.
pub fn write_raw_corpus(path: &Path, sgml: &str) {
    let file = File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(sgml.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

/// Build an index from `articles` in a fresh temp directory.
/// Returns the temp dir (keep it alive), the index path, and the summary.
pub fn build_index(articles: &[(&str, &str, &str)]) -> (TempDir, PathBuf, BuildSummary) {
    let dir = TempDir::new().unwrap();
    let corpus = dir.path().join("corpus.gz");
    write_corpus(&corpus, articles);
    let index_dir = dir.path().join("index");
    let summary = run_build(&corpus, &index_dir).unwrap();
    (dir, index_dir, summary)
}

/// The two-document corpus used across retrieval tests:
/// doc 1 "The quick brown fox", doc 2 "quick foxes jump".
pub fn two_doc_corpus() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("LA010190-0001", "", "The quick brown fox"),
        ("LA010290-0001", "", "quick foxes jump"),
    ]
}
