//! JSON rendering and persistence for processed documents.

use crate::error::{Error, Result};
use crate::model::{
    FigureRecord, ProcessedDocument, ProcessedSection, SectionType, TableRecord,
};
use crate::profile::StandardType;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum title characters used in a section file name.
const FILE_TITLE_LEN: usize = 50;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert a whole document to JSON.
pub fn to_json(doc: &ProcessedDocument, format: JsonFormat) -> Result<String> {
    serialize(doc, format)
}

/// Document fields repeated in every section file.
#[derive(Debug, Serialize)]
pub struct DocumentSummary<'a> {
    pub standard_type: StandardType,
    pub title: &'a str,
    pub version: &'a str,
    pub file_path: Option<&'a Path>,
}

/// Section metadata as written to section files.
#[derive(Debug, Serialize)]
pub struct SectionSummary<'a> {
    pub section_id: &'a str,
    pub title: &'a str,
    pub level: u32,
    pub section_type: SectionType,
    pub cross_references: &'a [String],
}

/// Section body as written to section files.
#[derive(Debug, Serialize)]
pub struct SectionBody<'a> {
    pub metadata: SectionSummary<'a>,
    pub content: &'a str,
    pub tables: &'a [TableRecord],
    pub figures: &'a [FigureRecord],
    pub quality_score: f64,
}

/// Stand-alone JSON artifact for one section.
#[derive(Debug, Serialize)]
pub struct SectionExport<'a> {
    pub document_metadata: DocumentSummary<'a>,
    pub section: SectionBody<'a>,
}

impl<'a> SectionExport<'a> {
    /// Build the export record for `section` of `doc`.
    pub fn new(doc: &'a ProcessedDocument, section: &'a ProcessedSection) -> Self {
        let meta = &doc.metadata;
        Self {
            document_metadata: DocumentSummary {
                standard_type: meta.standard_type,
                title: &meta.title,
                version: &meta.version,
                file_path: meta.file_path.as_deref(),
            },
            section: SectionBody {
                metadata: SectionSummary {
                    section_id: &section.metadata.section_id,
                    title: &section.metadata.title,
                    level: section.metadata.level,
                    section_type: section.metadata.section_type,
                    cross_references: &section.metadata.cross_references,
                },
                content: &section.content,
                tables: &section.tables,
                figures: &section.figures,
                quality_score: section.quality_score,
            },
        }
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        serialize(self, format)
    }
}

/// File name for a whole document: `<standard>_<YYYYmmdd_HHMMSS>.json`.
pub fn document_file_name(doc: &ProcessedDocument) -> String {
    format!(
        "{}_{}.json",
        doc.metadata.standard_type.slug(),
        doc.metadata.processing_date.format("%Y%m%d_%H%M%S")
    )
}

/// File name for a section: `<section_id>_<clean title>.json`.
pub fn section_file_name(section: &ProcessedSection) -> String {
    let kept: String = section
        .metadata
        .title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .take(FILE_TITLE_LEN)
        .collect();
    let clean = kept.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}_{}.json", section.metadata.section_id, clean)
}

/// Write the whole document as one JSON file in `dir`.
pub fn save_document(doc: &ProcessedDocument, dir: &Path, format: JsonFormat) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(document_file_name(doc));
    fs::write(&path, to_json(doc, format)?)?;
    log::info!("Saved processed document to {}", path.display());
    Ok(path)
}

/// Write each section scoring above `threshold` to `dir/<standard>/`.
pub fn save_sections(
    doc: &ProcessedDocument,
    dir: &Path,
    threshold: f64,
    format: JsonFormat,
) -> Result<Vec<PathBuf>> {
    let doc_dir = dir.join(doc.metadata.standard_type.slug());
    fs::create_dir_all(&doc_dir)?;

    let mut saved = Vec::new();
    for section in doc.valid_sections(threshold) {
        let path = doc_dir.join(section_file_name(section));
        fs::write(&path, SectionExport::new(doc, section).to_json(format)?)?;
        saved.push(path);
    }

    log::info!(
        "Saved {} sections above {} to {}",
        saved.len(),
        threshold,
        doc_dir.display()
    );
    Ok(saved)
}
