// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query-biased snippets for the interactive shell.
//!
//! A deliberately simple heuristic over the raw document text: split into
//! sentences, score each by how many distinct query tokens it shares
//! (minus a small penalty for appearing later in the document), and return
//! the winner. Sentences shorter than four words or written entirely in
//! capitals are skipped — in newswire text those are datelines, section
//! headers and bylines, not prose.

use std::collections::HashSet;

use crate::tokenize::tokenize;

const MIN_SENTENCE_WORDS: usize = 4;
const POSITION_PENALTY: f64 = 0.1;

/// The best sentence of `text` for `query`, or `None` when no sentence
/// shares a token with it.
pub fn best_snippet(text: &str, query: &str) -> Option<String> {
    let query_terms: HashSet<String> = tokenize(query).into_iter().collect();
    if query_terms.is_empty() {
        return None;
    }

    let mut best: Option<(f64, String)> = None;
    for (position, sentence) in split_sentences(text).into_iter().enumerate() {
        if sentence.split_whitespace().count() < MIN_SENTENCE_WORDS || is_all_caps(&sentence) {
            continue;
        }
        let words: HashSet<String> = tokenize(&sentence).into_iter().collect();
        let overlap = query_terms.intersection(&words).count();
        if overlap == 0 {
            continue;
        }
        let score = overlap as f64 - POSITION_PENALTY * position as f64;
        // strict comparison keeps the earliest sentence on equal scores
        if best.as_ref().map_or(true, |(b, _)| score > *b) {
            best = Some((score, sentence));
        }
    }
    best.map(|(_, s)| s)
}

/// Split on sentence terminators, collapsing internal whitespace so
/// snippets print on one line.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            push_sentence(&mut sentences, &current);
            current.clear();
        }
    }
    push_sentence(&mut sentences, &current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if !collapsed.is_empty() {
        sentences.push(collapsed);
    }
}

/// True when the sentence contains letters and none of them are lowercase.
fn is_all_caps(sentence: &str) -> bool {
    let mut has_alpha = false;
    for c in sentence.chars() {
        if c.is_alphabetic() {
            has_alpha = true;
            if c.is_lowercase() {
                return false;
            }
        }
    }
    has_alpha
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "METRO NEWS SPECIAL CITY EDITION.\n\
        The city council voted on the new transit plan yesterday evening. \
        Opponents of the plan said the budget was far too large. \
        Weather stays mild.";

    #[test]
    fn picks_the_sentence_sharing_most_query_tokens() {
        let snippet = best_snippet(DOC, "transit plan vote").unwrap();
        assert!(snippet.starts_with("The city council voted"));
    }

    #[test]
    fn earlier_sentence_wins_on_equal_overlap() {
        let snippet = best_snippet(DOC, "plan").unwrap();
        assert!(snippet.starts_with("The city council voted"));
    }

    #[test]
    fn skips_all_caps_and_short_sentences() {
        // the header sentence is all caps; "Weather stays mild." is under
        // four words
        assert!(best_snippet(DOC, "metro edition special").is_none());
        assert!(best_snippet(DOC, "weather mild").is_none());
    }

    #[test]
    fn no_overlap_yields_none() {
        assert!(best_snippet(DOC, "zebra").is_none());
        assert!(best_snippet(DOC, "").is_none());
    }

    #[test]
    fn collapses_internal_whitespace() {
        let text = "The plan\nspans   several\tlines of text here.";
        let snippet = best_snippet(text, "plan").unwrap();
        assert_eq!(snippet, "The plan spans several lines of text here.");
    }
}
