//! Document assembly: runs classification, normalization and scoring over
//! every block and derives the table of contents and statistics.

use crate::content::{self, ContentExtractor, Normalizer};
use crate::error::{Result, SectionError};
use crate::model::{
    DocumentMetadata, ProcessedDocument, ProcessedSection, ProcessingStats, SectionMetadata,
};
use crate::parser::{Block, Classifier, ProcessOptions};
use crate::profile::{StandardProfile, StandardType};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;

/// Number of leading lines searched for the document title.
const TITLE_SEARCH_LINES: usize = 20;

/// Documents with more lines than this are flagged as large.
const LARGE_DOCUMENT_LINES: usize = 10_000;

/// Turns segmented blocks into a [`ProcessedDocument`].
#[derive(Debug, Clone)]
pub struct Assembler {
    classifier: Classifier,
    normalizer: Normalizer,
    extractor: ContentExtractor,
    toc_threshold: f64,
    parallel: bool,
}

impl Assembler {
    /// Create an assembler from processing options.
    pub fn new(options: &ProcessOptions) -> Result<Self> {
        Ok(Self {
            classifier: Classifier::new(options.header_marker),
            normalizer: Normalizer::new(options.normalize.clone())?,
            extractor: ContentExtractor::new()?,
            toc_threshold: options.toc_threshold,
            parallel: options.parallel,
        })
    }

    /// Process one block at position `index`.
    pub fn process_block(
        &self,
        index: usize,
        block: &Block<'_>,
        profile: &StandardProfile,
    ) -> std::result::Result<ProcessedSection, SectionError> {
        let metadata = self
            .classifier
            .classify(block.header, &block.body, index, profile)?;

        let content = self.normalizer.normalize(&block.body);
        let tables = self.extractor.tables(&block.body);
        let figures = self.extractor.figures(&block.body);
        let quality_score = content::score(&content, &tables, &figures);

        log::debug!(
            "block {} -> {} ({}, score {:.1})",
            index,
            metadata.section_id,
            metadata.section_type,
            quality_score
        );

        Ok(ProcessedSection {
            metadata,
            content,
            raw_content: block.body.clone(),
            tables,
            figures,
            quality_score,
        })
    }

    /// Process all blocks in order and build the document.
    ///
    /// Blocks that fail classification are logged and skipped. Section ids
    /// use the block position, so parallel and sequential runs agree.
    pub fn assemble<'t, I>(
        &self,
        metadata: DocumentMetadata,
        profile: &StandardProfile,
        blocks: I,
    ) -> ProcessedDocument
    where
        I: IntoIterator<Item = Block<'t>>,
    {
        let indexed: Vec<(usize, Block<'t>)> = blocks.into_iter().enumerate().collect();

        let results: Vec<_> = if self.parallel {
            indexed
                .par_iter()
                .map(|(index, block)| (*index, self.process_block(*index, block, profile)))
                .collect()
        } else {
            indexed
                .iter()
                .map(|(index, block)| (*index, self.process_block(*index, block, profile)))
                .collect()
        };

        let mut sections = Vec::with_capacity(results.len());
        let mut skipped = 0;
        for (index, result) in results {
            match result {
                Ok(section) => sections.push(section),
                Err(reason) => {
                    log::warn!("Failed to process section {}: {}", index, reason);
                    skipped += 1;
                }
            }
        }

        dedupe_section_ids(&mut sections);

        let table_of_contents = table_of_contents(&sections, self.toc_threshold);
        let processing_stats = ProcessingStats::compute(&sections, self.toc_threshold, skipped);

        ProcessedDocument {
            metadata,
            sections,
            table_of_contents,
            processing_stats,
        }
    }
}

/// Suffix `_<n>` onto any id already used earlier in the document.
///
/// Past block 999 the index no longer has a fixed width, so a title that
/// starts with a digit can reproduce an earlier id. Runs in section order.
fn dedupe_section_ids(sections: &mut [ProcessedSection]) {
    let mut seen: HashSet<String> = HashSet::with_capacity(sections.len());
    for section in sections.iter_mut() {
        let id = &mut section.metadata.section_id;
        if seen.insert(id.clone()) {
            continue;
        }

        let mut n = 2;
        let mut candidate = format!("{}_{}", id, n);
        while seen.contains(&candidate) {
            n += 1;
            candidate = format!("{}_{}", id, n);
        }
        log::debug!("section id {} already used, renamed to {}", id, candidate);
        seen.insert(candidate.clone());
        *id = candidate;
    }
}

/// Metadata of outline sections (chapter, section, subsection) scoring
/// above `threshold`, in document order.
pub fn table_of_contents(sections: &[ProcessedSection], threshold: f64) -> Vec<SectionMetadata> {
    sections
        .iter()
        .filter(|s| s.metadata.section_type.is_outline() && s.is_valid(threshold))
        .map(|s| s.metadata.clone())
        .collect()
}

/// Derives document-level metadata from the full converted text.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    version_patterns: Vec<Regex>,
}

impl MetadataExtractor {
    /// Compile the version patterns.
    pub fn new() -> Result<Self> {
        let version_patterns = [
            r"version\s+(\d+\.?\d*)",
            r"edition\s+(\d+\.?\d*)",
            r"v(\d+\.?\d*)",
            r"(\d{4}-\d{2})",
        ]
        .iter()
        .map(|p| Regex::new(p))
        .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { version_patterns })
    }

    /// Build the metadata record for a document.
    pub fn extract(
        &self,
        profile: &StandardProfile,
        text: &str,
        total_pages: u32,
        file_path: Option<PathBuf>,
        processing_date: DateTime<Utc>,
    ) -> DocumentMetadata {
        DocumentMetadata {
            standard_type: profile.standard,
            title: title(text, profile.standard),
            version: self.version(text),
            total_pages,
            processing_date,
            file_path,
            organizational_pattern: profile.organizational_pattern.clone(),
            extraction_challenges: extraction_challenges(text, profile.standard),
        }
    }

    /// First version-like token in the lower-cased text, or "Unknown".
    pub fn version(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        self.version_patterns
            .iter()
            .find_map(|re| re.captures(&lower))
            .and_then(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// First of the leading lines that mentions the standard, or a generic title.
pub fn title(text: &str, standard: StandardType) -> String {
    let keywords = standard.title_keywords();
    text.split('\n')
        .take(TITLE_SEARCH_LINES)
        .map(str::trim)
        .find(|line| {
            let lower = line.to_lowercase();
            keywords.iter().any(|k| lower.contains(k))
        })
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} Standard", standard))
}

/// Heuristic labels describing what makes the document hard to extract.
pub fn extraction_challenges(text: &str, standard: StandardType) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut challenges = Vec::new();

    if lower.contains("table") || text.contains('|') {
        challenges.push("Complex tables requiring structure preservation".to_string());
    }
    if lower.contains("figure") || lower.contains("image") {
        challenges.push("Figures and diagrams requiring description extraction".to_string());
    }
    if text.split('\n').count() > LARGE_DOCUMENT_LINES {
        challenges.push("Large document requiring efficient chunking strategy".to_string());
    }
    if let Some(challenge) = standard.inherent_challenge() {
        challenges.push(challenge.to_string());
    }

    challenges
}
