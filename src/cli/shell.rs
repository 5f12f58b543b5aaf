// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Interactive query shell: BM25 top-10 with headlines and query-biased
//! snippets, plus drill-down into the full raw document by rank.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Instant;

use crate::artifacts::Artifacts;
use crate::cli::display::{styled, BOLD, DIM};
use crate::docstore::{document_paths, DocMetadata, PressDate};
use crate::search::bm25::{self, Bm25Params};
use crate::snippet::best_snippet;

const SHOWN_RESULTS: usize = 10;

/// A result prepared for display, with its raw text cached for drill-down.
struct ShownDoc {
    docno: String,
    raw: String,
}

pub fn run_shell(index_dir: &Path) -> Result<(), String> {
    let index = Artifacts::load(index_dir)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        let Some(line) = prompt(&mut input, "Enter your query (or type 'Q' to quit): ")? else {
            return Ok(());
        };
        let query = line.trim();
        if query.eq_ignore_ascii_case("q") {
            return Ok(());
        }
        if query.is_empty() {
            continue;
        }

        let start = Instant::now();
        let ranked = bm25::rank(&index, query, Bm25Params::default(), bm25::DEFAULT_TOP_K);
        let shown = display_results(&index, index_dir, &ranked, query)?;
        println!("Retrieval took {:.2} seconds.", start.elapsed().as_secs_f64());

        if shown.is_empty() {
            println!("No results.\n");
            continue;
        }

        loop {
            let Some(line) = prompt(
                &mut input,
                "Enter rank to view document, 'N' for new query, or 'Q' to quit: ",
            )?
            else {
                return Ok(());
            };
            let choice = line.trim();
            if choice.eq_ignore_ascii_case("q") {
                return Ok(());
            }
            if choice.eq_ignore_ascii_case("n") {
                break;
            }
            match choice.parse::<usize>() {
                Ok(rank) if (1..=shown.len()).contains(&rank) => {
                    let doc = &shown[rank - 1];
                    println!("{}", styled(DIM, &format!("--- {} ---", doc.docno)));
                    println!("{}", doc.raw);
                }
                _ => println!(
                    "Invalid input. Please enter a rank between 1 and {}.",
                    shown.len()
                ),
            }
        }
    }
}

/// Print the top results with headline, long-form date and snippet.
/// Returns the displayed documents for rank-based drill-down.
fn display_results(
    index: &Artifacts,
    index_dir: &Path,
    ranked: &[bm25::RankedDoc],
    query: &str,
) -> Result<Vec<ShownDoc>, String> {
    let mut shown = Vec::new();
    for (i, result) in ranked.iter().take(SHOWN_RESULTS).enumerate() {
        let docno = index
            .docs
            .docno_of(result.doc_id)
            .ok_or_else(|| format!("internal id {} has no docno", result.doc_id))?;
        let date = PressDate::from_docno(docno)
            .ok_or_else(|| format!("docno {} carries no date", docno))?;

        let (doc_path, meta_path) = document_paths(index_dir, &date, result.doc_id);
        let raw = fs::read_to_string(&doc_path)
            .map_err(|e| format!("Failed to read {}: {}", doc_path.display(), e))?;
        let meta_text = fs::read_to_string(&meta_path)
            .map_err(|e| format!("Failed to read {}: {}", meta_path.display(), e))?;
        let metadata: DocMetadata = serde_json::from_str(&meta_text)
            .map_err(|e| format!("Invalid metadata {}: {}", meta_path.display(), e))?;

        let snippet =
            best_snippet(&raw, query).unwrap_or_else(|| "No relevant snippet found.".to_string());
        let headline = if metadata.headline.is_empty() {
            // headline-less articles borrow the start of their snippet
            let prefix: String = snippet.chars().take(50).collect();
            format!("{}...", prefix)
        } else {
            metadata.headline.clone()
        };

        println!(
            "{}. {} ({})",
            i + 1,
            styled(BOLD, &headline),
            date.long_form()
        );
        println!("{} ({})\n", snippet, docno);

        shown.push(ShownDoc {
            docno: docno.to_string(),
            raw,
        });
    }
    Ok(shown)
}

/// Print a prompt and read one line. `None` on end of input.
fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>, String> {
    print!("{}", text);
    io::stdout()
        .flush()
        .map_err(|e| format!("stdout error: {}", e))?;
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| format!("stdin error: {}", e))?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
