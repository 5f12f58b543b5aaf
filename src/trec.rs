// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! TREC-style text I/O: queries files, results files, qrels.
//!
//! Results lines are the classic six whitespace-separated fields:
//!
//! ```text
//! <topic_id> Q0 <docno> <rank> <score> <run_tag>
//! ```
//!
//! with rank 1-based and ascending within a topic. Queries files alternate
//! a topic-id line with a query-text line. Topics 416, 423, 437, 444 and
//! 447 have no relevance judgments in the collection and are excluded from
//! processing everywhere.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Topics excluded from retrieval and evaluation.
pub const EXCLUDED_TOPICS: [u32; 5] = [416, 423, 437, 444, 447];

pub fn is_excluded_topic(topic: u32) -> bool {
    EXCLUDED_TOPICS.contains(&topic)
}

/// One line of a TREC results file.
#[derive(Debug, Clone, PartialEq)]
pub struct TrecResult {
    pub topic: u32,
    pub docno: String,
    pub rank: usize,
    pub score: f64,
}

/// A retrieved document as read back from a results file.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedDoc {
    pub docno: String,
    pub rank: usize,
    pub score: f64,
}

/// Read an alternating topic-id / query-text file, dropping excluded
/// topics.
pub fn read_queries(path: &Path) -> Result<Vec<(u32, String)>, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read queries {}: {}", path.display(), e))?;
    let lines: Vec<&str> = text.lines().collect();

    let mut queries = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let topic_line = lines[i].trim();
        if topic_line.is_empty() {
            i += 1;
            continue;
        }
        let topic: u32 = topic_line.parse().map_err(|_| {
            format!(
                "{}: expected a topic id on line {}, found {:?}",
                path.display(),
                i + 1,
                topic_line
            )
        })?;
        let query = lines
            .get(i + 1)
            .ok_or_else(|| format!("{}: file ends after topic {}", path.display(), topic))?;
        if !is_excluded_topic(topic) {
            queries.push((topic, query.trim().to_string()));
        }
        i += 2;
    }
    Ok(queries)
}

/// Write a results file. Results are expected grouped by topic with
/// 1-based ascending ranks, which is how the batch runners produce them.
pub fn write_results(path: &Path, results: &[TrecResult], run_tag: &str) -> Result<(), String> {
    let mut out = String::new();
    for r in results {
        out.push_str(&format!(
            "{} Q0 {} {} {} {}\n",
            r.topic, r.docno, r.rank, r.score, run_tag
        ));
    }
    fs::write(path, out).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

/// Read a results file back, grouped by topic in file order.
pub fn read_results(path: &Path) -> Result<HashMap<u32, Vec<RetrievedDoc>>, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read results {}: {}", path.display(), e))?;

    let mut by_topic: HashMap<u32, Vec<RetrievedDoc>> = HashMap::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(format!(
                "{}: line {} has {} fields, expected 6",
                path.display(),
                lineno + 1,
                fields.len()
            ));
        }
        let bad = |what: &str| {
            format!("{}: line {} has a bad {}", path.display(), lineno + 1, what)
        };
        let topic: u32 = fields[0].parse().map_err(|_| bad("topic id"))?;
        let rank: usize = fields[3].parse().map_err(|_| bad("rank"))?;
        let score: f64 = fields[4].parse().map_err(|_| bad("score"))?;
        by_topic.entry(topic).or_default().push(RetrievedDoc {
            docno: fields[2].to_string(),
            rank,
            score,
        });
    }
    Ok(by_topic)
}

/// Read a qrels file: `<topic_id> 0 <docno> <relevance>` per line.
pub fn read_qrels(path: &Path) -> Result<HashMap<u32, HashMap<String, i32>>, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read qrels {}: {}", path.display(), e))?;

    let mut by_topic: HashMap<u32, HashMap<String, i32>> = HashMap::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(format!(
                "{}: line {} has {} fields, expected 4",
                path.display(),
                lineno + 1,
                fields.len()
            ));
        }
        let topic: u32 = fields[0]
            .parse()
            .map_err(|_| format!("{}: line {} has a bad topic id", path.display(), lineno + 1))?;
        let relevance: i32 = fields[3]
            .parse()
            .map_err(|_| format!("{}: line {} has a bad relevance", path.display(), lineno + 1))?;
        by_topic
            .entry(topic)
            .or_default()
            .insert(fields[2].to_string(), relevance);
    }
    Ok(by_topic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn reads_alternating_queries() {
        let f = temp_file("401\nforeign minorities germany\n403\nosteoporosis\n");
        let queries = read_queries(f.path()).unwrap();
        assert_eq!(
            queries,
            vec![
                (401, "foreign minorities germany".to_string()),
                (403, "osteoporosis".to_string()),
            ]
        );
    }

    #[test]
    fn drops_excluded_topics() {
        let f = temp_file("416\nskipped query\n417\nkept query\n");
        let queries = read_queries(f.path()).unwrap();
        assert_eq!(queries, vec![(417, "kept query".to_string())]);
    }

    #[test]
    fn rejects_non_numeric_topic_lines() {
        let f = temp_file("not-a-topic\nquery\n");
        assert!(read_queries(f.path()).is_err());
    }

    #[test]
    fn rejects_dangling_topic() {
        let f = temp_file("401\n");
        assert!(read_queries(f.path()).is_err());
    }

    #[test]
    fn results_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.txt");
        let results = vec![
            TrecResult {
                topic: 401,
                docno: "LA010190-0001".to_string(),
                rank: 1,
                score: 2.5,
            },
            TrecResult {
                topic: 401,
                docno: "LA010290-0001".to_string(),
                rank: 2,
                score: 1.25,
            },
        ];
        write_results(&path, &results, "test-run").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "401 Q0 LA010190-0001 1 2.5 test-run\n401 Q0 LA010290-0001 2 1.25 test-run\n"
        );

        let back = read_results(&path).unwrap();
        let topic = &back[&401];
        assert_eq!(topic.len(), 2);
        assert_eq!(topic[0].docno, "LA010190-0001");
        assert_eq!(topic[1].rank, 2);
        assert!((topic[1].score - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_short_results_lines() {
        let f = temp_file("401 Q0 LA010190-0001 1\n");
        assert!(read_results(f.path()).is_err());
    }

    #[test]
    fn reads_qrels_by_topic() {
        let f = temp_file(
            "401 0 LA010190-0001 1\n401 0 LA010290-0001 0\n402 0 LA010390-0001 2\n",
        );
        let qrels = read_qrels(f.path()).unwrap();
        assert_eq!(qrels[&401]["LA010190-0001"], 1);
        assert_eq!(qrels[&401]["LA010290-0001"], 0);
        assert_eq!(qrels[&402]["LA010390-0001"], 2);
    }
}
