//! Heuristic quality score for a processed section.
//!
//! The score is a confidence signal for downstream indexing, not a
//! correctness guarantee. Weights and cut-offs are tunable placeholders:
//!
//! | Signal | Weight |
//! |---|---|
//! | length > 500 chars (else > 100 chars) | 0.4 (0.2) |
//! | has tables / has figures / has a newline | 0.1 each |
//! | more than 10 words | 0.1 |
//! | distinct-word ratio > 0.3 | 0.1 |
//! | no placeholder vocabulary | 0.1 |
//!
//! The total is capped at 1.0. Empty content always scores 0.0.

use crate::model::{FigureRecord, TableRecord};
use std::collections::HashSet;

const LONG_CONTENT_CHARS: usize = 500;
const MEDIUM_CONTENT_CHARS: usize = 100;
const MIN_WORDS: usize = 10;
const MIN_DISTINCT_RATIO: f64 = 0.3;

/// Words whose presence suggests leftover conversion artifacts.
const PLACEHOLDER_TOKENS: [&str; 5] = ["image", "figure", "table", "todo", "placeholder"];

/// Score normalized section content in [0.0, 1.0].
pub fn score(content: &str, tables: &[TableRecord], figures: &[FigureRecord]) -> f64 {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    // Accumulate in tenths so sums are exact
    let mut tenths: u32 = 0;

    let length = trimmed.chars().count();
    if length > LONG_CONTENT_CHARS {
        tenths += 4;
    } else if length > MEDIUM_CONTENT_CHARS {
        tenths += 2;
    }

    if !tables.is_empty() {
        tenths += 1;
    }
    if !figures.is_empty() {
        tenths += 1;
    }
    if content.contains('\n') {
        tenths += 1;
    }

    let words: Vec<&str> = content.split_whitespace().collect();
    if words.len() > MIN_WORDS {
        tenths += 1;
    }
    let distinct: HashSet<&str> = words.iter().copied().collect();
    if distinct.len() as f64 > words.len() as f64 * MIN_DISTINCT_RATIO {
        tenths += 1;
    }

    let lower = content.to_lowercase();
    if !PLACEHOLDER_TOKENS.iter().any(|token| lower.contains(token)) {
        tenths += 1;
    }

    f64::from(tenths.min(10)) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scores_zero() {
        assert_eq!(score("", &[], &[]), 0.0);
        assert_eq!(score("  \n\t ", &[TableRecord::markdown(0, "| a |")], &[]), 0.0);
    }

    #[test]
    fn test_short_clean_text() {
        // distinct ratio + no placeholder vocabulary
        let s = score("Scope of this clause", &[], &[]);
        assert_eq!(s, 0.2);
    }

    #[test]
    fn test_medium_text() {
        let content = "Project governance defines the framework within which decisions are made. \
                       It covers roles, accountability, and escalation across the organization.";
        let s = score(content, &[], &[]);
        // 0.2 length + 0.1 words + 0.1 diversity + 0.1 clean
        assert_eq!(s, 0.5);
    }

    #[test]
    fn test_placeholder_vocabulary_penalized() {
        let s = score("See the table", &[], &[]);
        assert_eq!(s, 0.1);
    }

    #[test]
    fn test_capped_at_one() {
        let mut content = String::new();
        for i in 0..120 {
            content.push_str(&format!("word{} ", i));
            if i % 20 == 0 {
                content.push('\n');
            }
        }
        let tables = vec![TableRecord::markdown(0, "| a |")];
        let figures = vec![FigureRecord::referenced("1", "x")];
        let s = score(&content, &tables, &figures);
        assert_eq!(s, 1.0);
    }

    #[test]
    fn test_low_diversity() {
        let content = "go ".repeat(20);
        let s = score(&content, &[], &[]);
        // 0.1 words + 0.1 clean; ratio 1/20 fails
        assert_eq!(s, 0.2);
    }
}
