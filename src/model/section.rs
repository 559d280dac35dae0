//! Section-level types.

use super::{FigureRecord, TableRecord};
use crate::profile::PatternKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural role of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Chapter,
    Section,
    Subsection,
    Appendix,
    Glossary,
    TableOfContents,
    Figure,
    Table,
}

impl SectionType {
    /// Label used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Chapter => "chapter",
            SectionType::Section => "section",
            SectionType::Subsection => "subsection",
            SectionType::Appendix => "appendix",
            SectionType::Glossary => "glossary",
            SectionType::TableOfContents => "table_of_contents",
            SectionType::Figure => "figure",
            SectionType::Table => "table",
        }
    }

    /// Whether sections of this type belong in the table of contents.
    pub fn is_outline(&self) -> bool {
        matches!(
            self,
            SectionType::Chapter | SectionType::Section | SectionType::Subsection
        )
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata derived for one segmented block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMetadata {
    /// Stable id, unique within the document
    pub section_id: String,

    /// Header text without marker characters
    pub title: String,

    /// Hierarchical level (1 = top)
    pub level: u32,

    /// Structural type
    pub section_type: SectionType,

    /// First page of the section, when known
    pub page_start: Option<u32>,

    /// Last page of the section, when known
    pub page_end: Option<u32>,

    /// Always `None`: parentage is not inferred from headers
    pub parent_section_id: Option<String>,

    /// Lexical cross-references found in the body, sorted and deduplicated
    pub cross_references: Vec<String>,

    /// Number or label captured by the matching header rule (e.g. "4.2", "Annex A")
    #[serde(default)]
    pub section_number: Option<String>,

    /// Kind of the matching header rule
    #[serde(default)]
    pub pattern_kind: Option<PatternKind>,
}

/// A fully processed section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedSection {
    pub metadata: SectionMetadata,

    /// Normalized body text
    pub content: String,

    /// Body text as segmented
    pub raw_content: String,

    pub tables: Vec<TableRecord>,

    pub figures: Vec<FigureRecord>,

    /// Heuristic confidence in [0.0, 1.0]
    pub quality_score: f64,
}

impl ProcessedSection {
    /// Check whether the section's score is above `threshold`.
    pub fn is_valid(&self, threshold: f64) -> bool {
        self.quality_score > threshold
    }
}
