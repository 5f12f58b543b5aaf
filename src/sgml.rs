// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Streaming parser for SGML-tagged newswire corpora.
//!
//! This is a small hand-written push parser, not an HTML engine: a flag per
//! tag of interest (`DOC`, `DOCNO`, `HEADLINE`, `TEXT`, `GRAPHIC`), character
//! data routed to whichever field is open, and a record emitted every time a
//! `</DOC>` closes. Unknown tags are ignored for field purposes but both
//! they and their character data still land in the verbatim `content`
//! capture, which is what gets persisted and later shown as the raw
//! document.
//!
//! Malformed records — a `<DOC>` without a `DOCNO`, or a corpus that ends
//! mid-document — are skipped with a diagnostic; they never abort a build.
//!
//! Entity references stay as written in `content`. They are only resolved
//! by [`unescape_entities`] on the indexable concatenation, right before
//! tokenization.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

/// One `<DOC>..</DOC>` record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Article {
    /// Trimmed `DOCNO` text. Never empty for an emitted article.
    pub docno: String,
    pub headline: String,
    pub text: String,
    pub graphic: String,
    /// Everything between `<DOC>` and `</DOC>`, tags and entities as
    /// written.
    pub content: String,
}

impl Article {
    /// The concatenation that feeds the analysis chain: `TEXT`, `HEADLINE`,
    /// `GRAPHIC`, tag-stripped and entity-unescaped.
    pub fn indexable_text(&self) -> String {
        let joined = format!("{} {} {}", self.text, self.headline, self.graphic);
        unescape_entities(&strip_tags(&joined))
    }
}

#[derive(Debug, Default)]
pub struct DocParser {
    in_doc: bool,
    in_docno: bool,
    in_headline: bool,
    in_text: bool,
    in_graphic: bool,

    in_tag: bool,
    tag_buf: String,
    data_buf: String,

    current: Article,
    ready: VecDeque<Article>,
    diagnostics: Vec<String>,
}

impl DocParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of decoded corpus text. Chunk boundaries are arbitrary;
    /// tags and records may span them.
    pub fn feed(&mut self, chunk: &str) {
        for c in chunk.chars() {
            if self.in_tag {
                self.tag_buf.push(c);
                if c == '>' {
                    self.complete_tag();
                }
            } else if c == '<' {
                self.flush_data();
                self.in_tag = true;
                self.tag_buf.push('<');
            } else {
                if self.in_doc {
                    self.current.content.push(c);
                }
                self.data_buf.push(c);
                if c == '\n' {
                    self.flush_data();
                }
            }
        }
    }

    /// Signal end of input. An open `<DOC>` at this point is malformed and
    /// dropped with a diagnostic.
    pub fn finish(&mut self) {
        self.flush_data();
        if self.in_doc {
            self.diagnostics
                .push("corpus ended inside <DOC>; dropping unterminated record".to_string());
            self.reset_record();
        }
    }

    /// Pop the next completed article, if any.
    pub fn next_article(&mut self) -> Option<Article> {
        self.ready.pop_front()
    }

    /// Drain diagnostics accumulated since the last call.
    pub fn take_diagnostics(&mut self) -> Vec<String> {
        std::mem::take(&mut self.diagnostics)
    }

    fn reset_record(&mut self) {
        self.in_doc = false;
        self.in_docno = false;
        self.in_headline = false;
        self.in_text = false;
        self.in_graphic = false;
        self.current = Article::default();
    }

    fn complete_tag(&mut self) {
        let tag = std::mem::take(&mut self.tag_buf);
        self.in_tag = false;

        let inner = tag.trim_start_matches('<').trim_end_matches('>').trim();
        let (closing, name) = match inner.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, inner),
        };
        let name = name.split_whitespace().next().unwrap_or("");

        let is_doc_tag = name.eq_ignore_ascii_case("doc");
        if self.in_doc && !is_doc_tag {
            // part of the verbatim capture, exactly as written
            self.current.content.push_str(&tag);
        }

        if is_doc_tag {
            if closing {
                if self.in_doc {
                    self.emit_record();
                }
            } else {
                if self.in_doc {
                    self.diagnostics.push(
                        "new <DOC> before the previous one closed; dropping partial record"
                            .to_string(),
                    );
                    self.reset_record();
                }
                self.in_doc = true;
            }
        } else if name.eq_ignore_ascii_case("docno") {
            self.in_docno = !closing;
        } else if name.eq_ignore_ascii_case("headline") {
            self.in_headline = !closing;
        } else if name.eq_ignore_ascii_case("text") {
            self.in_text = !closing;
        } else if name.eq_ignore_ascii_case("graphic") {
            self.in_graphic = !closing;
        }
    }

    fn emit_record(&mut self) {
        let mut article = std::mem::take(&mut self.current);
        self.reset_record();

        article.docno = article.docno.trim().to_string();
        if article.docno.is_empty() {
            self.diagnostics
                .push("skipping record without DOCNO".to_string());
            return;
        }
        self.ready.push_back(article);
    }

    /// Route the pending character-data chunk into the open field.
    /// Chunks are trimmed and joined with single spaces; `DOCNO` is
    /// trimmed whole at emission.
    fn flush_data(&mut self) {
        let chunk = std::mem::take(&mut self.data_buf);
        if !self.in_doc {
            return;
        }
        let trimmed = chunk.trim();
        if trimmed.is_empty() {
            return;
        }
        let field = if self.in_docno {
            &mut self.current.docno
        } else if self.in_headline {
            &mut self.current.headline
        } else if self.in_text {
            &mut self.current.text
        } else if self.in_graphic {
            &mut self.current.graphic
        } else {
            return;
        };
        if !field.is_empty() {
            field.push(' ');
        }
        field.push_str(trimmed);
    }
}

/// A lazy stream of articles from a buffered reader.
pub struct ArticleStream<R: BufRead> {
    reader: R,
    parser: DocParser,
    eof: bool,
}

impl<R: BufRead> ArticleStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            parser: DocParser::new(),
            eof: false,
        }
    }

    /// Drain parser diagnostics (skipped records and the like).
    pub fn take_diagnostics(&mut self) -> Vec<String> {
        self.parser.take_diagnostics()
    }
}

impl<R: BufRead> Iterator for ArticleStream<R> {
    type Item = Result<Article, String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(article) = self.parser.next_article() {
                return Some(Ok(article));
            }
            if self.eof {
                return None;
            }
            let mut buf = Vec::new();
            match self.reader.read_until(b'\n', &mut buf) {
                Err(e) => {
                    self.eof = true;
                    return Some(Err(format!("corpus read error: {}", e)));
                }
                Ok(0) => {
                    self.eof = true;
                    self.parser.finish();
                }
                Ok(_) => self.parser.feed(&lenient_utf8(&buf)),
            }
        }
    }
}

/// Open a gzip-compressed corpus file as an article stream.
pub fn open_corpus(path: &Path) -> Result<ArticleStream<BufReader<GzDecoder<File>>>, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open corpus {}: {}", path.display(), e))?;
    Ok(ArticleStream::new(BufReader::new(GzDecoder::new(file))))
}

/// Lenient UTF-8: invalid byte sequences are dropped, not replaced.
fn lenient_utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|&c| c != '\u{FFFD}')
        .collect()
}

/// Remove `<...>` tag spans, keeping everything else.
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Resolve the entity references that occur in newswire text: the five
/// predefined named entities plus decimal and hex character references.
/// Anything unrecognized is kept as written.
pub fn unescape_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let resolved = tail[1..]
            .find(';')
            .and_then(|i| decode_entity(&tail[1..=i]).map(|c| (c, i + 2)));
        match resolved {
            Some((c, consumed)) => {
                out.push(c);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    let name = name.strip_suffix(';').unwrap_or(name);
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let n = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(n)
        }
    }
}
