//! Table and figure records extracted from section bodies.

use serde::{Deserialize, Serialize};

/// How a table was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    #[default]
    MarkdownTable,
}

/// A pipe-delimited table found in a section body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRecord {
    /// Position within the section (0-based)
    pub index: usize,

    /// The table lines, trimmed
    pub content: String,

    #[serde(rename = "type")]
    pub kind: TableKind,
}

impl TableRecord {
    /// Create a markdown table record.
    pub fn markdown(index: usize, content: impl Into<String>) -> Self {
        Self {
            index,
            content: content.into(),
            kind: TableKind::MarkdownTable,
        }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.content.lines().count()
    }
}

/// How a figure was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    #[default]
    ReferencedFigure,
}

/// A figure reference or image placeholder found in a section body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureRecord {
    /// Figure number, or the match position for unnumbered images
    pub number: String,

    /// Text following the reference, trimmed
    pub description: String,

    #[serde(rename = "type")]
    pub kind: FigureKind,
}

impl FigureRecord {
    /// Create a referenced-figure record.
    pub fn referenced(number: impl Into<String>, description: &str) -> Self {
        Self {
            number: number.into(),
            description: description.trim().to_string(),
            kind: FigureKind::ReferencedFigure,
        }
    }
}
