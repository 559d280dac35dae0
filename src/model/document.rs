//! Document-level types.

use super::{ProcessedSection, SectionMetadata};
use crate::profile::StandardType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A segmented and classified standards document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedDocument {
    /// Document metadata (standard, title, version, etc.)
    pub metadata: DocumentMetadata,

    /// Sections in source order
    pub sections: Vec<ProcessedSection>,

    /// Outline sections that passed the quality threshold
    pub table_of_contents: Vec<SectionMetadata>,

    /// Aggregate statistics
    pub processing_stats: ProcessingStats,
}

impl ProcessedDocument {
    /// Get a section by id.
    pub fn section(&self, section_id: &str) -> Option<&ProcessedSection> {
        self.sections
            .iter()
            .find(|s| s.metadata.section_id == section_id)
    }

    /// Sections whose quality score is above `threshold`.
    pub fn valid_sections(&self, threshold: f64) -> impl Iterator<Item = &ProcessedSection> {
        self.sections.iter().filter(move |s| s.is_valid(threshold))
    }

    /// Check if the document has any sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Standard the document belongs to
    pub standard_type: StandardType,

    /// Document title
    pub title: String,

    /// Version or edition string ("Unknown" if none found)
    pub version: String,

    /// Page count reported by the converter
    pub total_pages: u32,

    /// When the document was processed
    pub processing_date: DateTime<Utc>,

    /// Source file, if processed from disk
    pub file_path: Option<PathBuf>,

    /// Organizational pattern of the standard
    pub organizational_pattern: String,

    /// Heuristically derived extraction challenges
    pub extraction_challenges: Vec<String>,
}

/// Aggregate statistics over the sections of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStats {
    /// Number of sections produced
    pub total_sections: usize,

    /// Sections with a score above the threshold
    pub valid_sections: usize,

    /// Tables across all sections
    pub total_tables: usize,

    /// Figures across all sections
    pub total_figures: usize,

    /// Blocks dropped by the classifier
    pub skipped_blocks: usize,

    /// Mean quality score, rounded to 2 decimals
    pub average_quality_score: f64,

    /// Percentage of valid sections, rounded to 1 decimal
    #[serde(alias = "processing_success_rate")]
    pub success_rate: f64,
}

impl ProcessingStats {
    /// Compute statistics for `sections`. Empty input yields zeros.
    pub fn compute(sections: &[ProcessedSection], threshold: f64, skipped_blocks: usize) -> Self {
        let total_sections = sections.len();
        let valid_sections = sections.iter().filter(|s| s.is_valid(threshold)).count();
        let total_tables = sections.iter().map(|s| s.tables.len()).sum();
        let total_figures = sections.iter().map(|s| s.figures.len()).sum();

        let (average_quality_score, success_rate) = if total_sections > 0 {
            let sum: f64 = sections.iter().map(|s| s.quality_score).sum();
            let average = sum / total_sections as f64;
            let rate = valid_sections as f64 / total_sections as f64 * 100.0;
            (round_to(average, 2), round_to(rate, 1))
        } else {
            (0.0, 0.0)
        };

        Self {
            total_sections,
            valid_sections,
            total_tables,
            total_figures,
            skipped_blocks,
            average_quality_score,
            success_rate,
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
