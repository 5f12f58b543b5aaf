// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the gazette command-line interface.
//!
//! Six subcommands cover the whole lifecycle: `index` builds an index from
//! a gzipped corpus, `bm25` and `booland` run TREC query batches against
//! it, `eval` scores a results file against qrels, `getdoc` dumps a single
//! document, and `shell` opens the interactive search loop.

pub mod display;
pub mod shell;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "gazette",
    about = "BM25 and Boolean retrieval over TREC-style newswire corpora",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an index from a gzipped SGML corpus
    Index {
        /// Path to the gzipped corpus (e.g. latimes.gz)
        corpus: String,

        /// Output directory; must not already exist
        output: String,
    },

    /// Rank a TREC queries file with BM25
    Bm25 {
        /// Index directory produced by `index`
        index_dir: String,

        /// Queries file: alternating topic-id and query-text lines
        queries: String,

        /// Directory for the results file
        results_dir: String,

        /// Run tag written into the results file (also names it)
        #[arg(long, default_value = "bm25-stem")]
        run_tag: String,

        /// Results kept per topic
        #[arg(long, default_value_t = 1000)]
        top: usize,

        /// Term-frequency saturation parameter
        #[arg(long, default_value_t = 1.2)]
        k1: f64,

        /// Length-normalization parameter
        #[arg(long, default_value_t = 0.75)]
        b: f64,
    },

    /// Intersect a TREC queries file with Boolean AND
    Booland {
        /// Index directory produced by `index`
        index_dir: String,

        /// Queries file: alternating topic-id and query-text lines
        queries: String,

        /// Directory for the results file
        results_dir: String,

        /// Run tag written into the results file (also names it)
        #[arg(long, default_value = "booland-stem")]
        run_tag: String,
    },

    /// Score a results file against relevance judgments
    Eval {
        /// Path to the qrels file
        #[arg(long)]
        qrel: String,

        /// Path to the TREC results file
        #[arg(long)]
        results: String,

        /// Path for the tab-separated report
        #[arg(long)]
        output: String,

        /// Cutoff for Precision@k and NDCG@k
        #[arg(long, default_value_t = 10)]
        k: usize,
    },

    /// Print one document and its metadata
    Getdoc {
        /// Index directory produced by `index`
        index_dir: String,

        /// Look the document up by internal id or by docno
        #[arg(value_enum)]
        by: LookupKey,

        /// The id or docno to fetch
        value: String,
    },

    /// Interactive query shell over an index
    Shell {
        /// Index directory produced by `index`
        index_dir: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookupKey {
    Id,
    Docno,
}
