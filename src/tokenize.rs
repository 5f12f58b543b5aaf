// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tokenization: lowercase text, extract maximal ASCII word-character runs.
//!
//! The analysis chain is deliberately dumb: no stopwords, no dedup, no
//! positional bookkeeping. Anything outside `[a-z0-9_]` (after lowercasing)
//! is a separator, which keeps the index ASCII-only by construction.

use crate::stem::stem;

/// A token character: ASCII letter, digit, or underscore.
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split `text` into lowercase word tokens, in order of appearance.
///
/// Pure and total: the same input always produces the same tokens, and no
/// input fails. Empty input produces no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in lowered.chars() {
        if is_word_char(c) {
            current.push(c);
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// The full analysis pipeline: tokenize, then stem each token.
///
/// This single function is used at index time and at query time by both
/// retrievers, so the two sides can never drift apart.
pub fn analyze(text: &str) -> Vec<String> {
    tokenize(text).iter().map(|t| stem(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_whitespace() {
        assert_eq!(
            tokenize("Hello, world! foo_bar\tbaz-qux"),
            vec!["hello", "world", "foo_bar", "baz", "qux"]
        );
    }

    #[test]
    fn lowercases_before_extraction() {
        assert_eq!(tokenize("Quick BROWN Fox"), vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn digits_and_underscores_are_word_chars() {
        assert_eq!(tokenize("top-10 results_2a"), vec!["top", "10", "results_2a"]);
    }

    #[test]
    fn non_ascii_is_a_separator() {
        assert_eq!(tokenize("naïve café"), vec!["na", "ve", "caf"]);
    }

    #[test]
    fn keeps_repeats_in_order() {
        assert_eq!(tokenize("a b a"), vec!["a", "b", "a"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \n\t ...").is_empty());
    }

    #[test]
    fn analyze_stems_each_token() {
        assert_eq!(analyze("quick foxes jumping"), vec!["quick", "fox", "jump"]);
    }
}
