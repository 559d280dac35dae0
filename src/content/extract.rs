//! Table and figure extraction from section bodies.

use crate::error::Result;
use crate::model::{FigureRecord, TableRecord};
use crate::profile::PatternMatch;
use regex::{Regex, RegexBuilder};

/// Extracts embedded tables and figures from raw section bodies.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    figure_patterns: Vec<Regex>,
}

impl ContentExtractor {
    /// Compile the figure patterns.
    ///
    /// Order matters only for the order of the resulting records: numbered
    /// "Figure N" references first, then `[IMAGE]` placeholders, then
    /// image comment markers.
    pub fn new() -> Result<Self> {
        let figure_patterns = [
            r"Figure\s+(\d+[.-]?\d*):?\s*([^\n]*)",
            r"\[IMAGE\]([^\n]*)",
            r"<!---?\s*image\s*-?-->([^\n]*)",
        ]
        .iter()
        .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
        .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { figure_patterns })
    }

    /// Contiguous runs of pipe-delimited lines, one record per run.
    pub fn tables(&self, body: &str) -> Vec<TableRecord> {
        let mut tables = Vec::new();
        let mut run: Vec<&str> = Vec::new();

        for line in body.lines() {
            if line.trim_start().starts_with('|') {
                run.push(line);
            } else if !run.is_empty() {
                tables.push(TableRecord::markdown(tables.len(), run.join("\n").trim()));
                run.clear();
            }
        }
        if !run.is_empty() {
            tables.push(TableRecord::markdown(tables.len(), run.join("\n").trim()));
        }

        tables
    }

    /// Figure references and image markers, one record per match.
    ///
    /// Every pattern contributes independently. Matches without a figure
    /// number are numbered by their position among that pattern's matches.
    pub fn figures(&self, body: &str) -> Vec<FigureRecord> {
        let mut figures = Vec::new();

        for pattern in &self.figure_patterns {
            for (i, caps) in pattern.captures_iter(body).enumerate() {
                let m = PatternMatch::from_captures(&caps);
                let record = match m.secondary {
                    Some(description) => FigureRecord::referenced(m.primary, &description),
                    None => FigureRecord::referenced(i.to_string(), &m.primary),
                };
                figures.push(record);
            }
        }

        figures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ContentExtractor {
        ContentExtractor::new().unwrap()
    }

    #[test]
    fn test_table_and_figure() {
        let body = "| A | B |\n| 1 | 2 |\n\nFigure 3: A diagram";
        let tables = extractor().tables(body);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].index, 0);
        assert_eq!(tables[0].content, "| A | B |\n| 1 | 2 |");

        let figures = extractor().figures(body);
        assert_eq!(figures.len(), 1);
        assert_eq!(figures[0].number, "3");
        assert_eq!(figures[0].description, "A diagram");
    }

    #[test]
    fn test_multiple_tables() {
        let body = "| a |\n|---|\ntext between\n  | b | c |\n| 1 | 2 |\n";
        let tables = extractor().tables(body);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].index, 1);
        assert_eq!(tables[1].content, "| b | c |\n| 1 | 2 |");
    }

    #[test]
    fn test_no_tables() {
        assert!(extractor().tables("plain text with a | pipe").is_empty());
        assert!(extractor().tables("").is_empty());
    }

    #[test]
    fn test_figure_numbers() {
        let body = "see figure 2-1 Life cycle\nFigure 4.3: Tailoring";
        let figures = extractor().figures(body);
        assert_eq!(figures.len(), 2);
        assert_eq!(figures[0].number, "2-1");
        assert_eq!(figures[0].description, "Life cycle");
        assert_eq!(figures[1].number, "4.3");
        assert_eq!(figures[1].description, "Tailoring");
    }

    #[test]
    fn test_image_markers() {
        let body = "[IMAGE] Process model\n<!-- image -->\n<!-- image --> caption";
        let figures = extractor().figures(body);
        assert_eq!(figures.len(), 3);
        assert_eq!(figures[0].number, "0");
        assert_eq!(figures[0].description, "Process model");
        assert_eq!(figures[1].number, "0");
        assert_eq!(figures[1].description, "");
        assert_eq!(figures[2].number, "1");
        assert_eq!(figures[2].description, "caption");
    }

    #[test]
    fn test_pattern_families_are_independent() {
        let body = "Figure 1: Overview\n[IMAGE]";
        let figures = extractor().figures(body);
        assert_eq!(figures.len(), 2);
        assert_eq!(figures[0].number, "1");
        assert_eq!(figures[1].number, "0");
    }
}
