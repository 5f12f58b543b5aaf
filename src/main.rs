// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Gazette CLI: build, query, and evaluate newswire search indexes.
//!
//! ```bash
//! # Build an index from a gzipped corpus
//! gazette index latimes.gz ./index
//!
//! # Rank a TREC queries file
//! gazette bm25 ./index queries.txt ./results
//!
//! # Score the run against relevance judgments
//! gazette eval --qrel qrels.txt --results ./results/bm25-stem.txt --output eval.txt
//!
//! # Poke around interactively
//! gazette shell ./index
//! ```

use std::fs;
use std::path::Path;

use clap::Parser;

use gazette::artifacts::load_docstore;
use gazette::build::run_build;
use gazette::cli::shell::run_shell;
use gazette::cli::{Cli, Commands, LookupKey};
use gazette::docstore::{document_paths, DocMetadata, PressDate};
use gazette::eval::run_eval;
use gazette::search::bm25::Bm25Params;
use gazette::search::{run_bm25_batch, run_boolean_batch};
use gazette::types::DocId;

fn main() {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Index { corpus, output } => {
            run_build(Path::new(&corpus), Path::new(&output)).map(|_| ())
        }
        Commands::Bm25 {
            index_dir,
            queries,
            results_dir,
            run_tag,
            top,
            k1,
            b,
        } => run_bm25_batch(
            Path::new(&index_dir),
            Path::new(&queries),
            Path::new(&results_dir),
            Bm25Params { k1, b },
            top,
            &run_tag,
        ),
        Commands::Booland {
            index_dir,
            queries,
            results_dir,
            run_tag,
        } => run_boolean_batch(
            Path::new(&index_dir),
            Path::new(&queries),
            Path::new(&results_dir),
            &run_tag,
        ),
        Commands::Eval {
            qrel,
            results,
            output,
            k,
        } => run_eval(
            Path::new(&qrel),
            Path::new(&results),
            Path::new(&output),
            k,
        ),
        Commands::Getdoc {
            index_dir,
            by,
            value,
        } => run_getdoc(Path::new(&index_dir), by, &value),
        Commands::Shell { index_dir } => run_shell(Path::new(&index_dir)),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

/// Print one document's metadata and raw text, looked up by internal id or
/// by docno.
fn run_getdoc(index_dir: &Path, by: LookupKey, value: &str) -> Result<(), String> {
    let store = load_docstore(index_dir)?;

    let (id, docno) = match by {
        LookupKey::Id => {
            let id: u32 = value
                .parse()
                .map_err(|_| "when searching by 'id', the value must be an integer".to_string())?;
            let docno = store
                .docno_of(DocId(id))
                .ok_or_else(|| format!("document with id {} not found", id))?;
            (DocId(id), docno.to_string())
        }
        LookupKey::Docno => {
            let id = store
                .id_of(value)
                .ok_or_else(|| format!("document with docno {} not found", value))?;
            (id, value.to_string())
        }
    };

    let date = PressDate::from_docno(&docno)
        .ok_or_else(|| format!("docno {} carries no date", docno))?;
    let (doc_path, meta_path) = document_paths(index_dir, &date, id);

    let meta_text = fs::read_to_string(&meta_path)
        .map_err(|e| format!("Failed to read {}: {}", meta_path.display(), e))?;
    let metadata: DocMetadata = serde_json::from_str(&meta_text)
        .map_err(|e| format!("Invalid metadata {}: {}", meta_path.display(), e))?;
    let raw = fs::read_to_string(&doc_path)
        .map_err(|e| format!("Failed to read {}: {}", doc_path.display(), e))?;

    println!("docno: {}", metadata.docno);
    println!("internal id: {}", id);
    println!("date: {}", metadata.date);
    println!("headline: {}", metadata.headline);
    println!("\nraw document:");
    println!("{}", raw);

    Ok(())
}
