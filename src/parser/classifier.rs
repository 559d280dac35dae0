//! Derives section metadata from a header/body pair.

use crate::error::SectionError;
use crate::model::{SectionMetadata, SectionType};
use crate::profile::{StandardProfile, StandardType};
use std::collections::BTreeSet;

/// Maximum number of title characters kept in a section id.
const ID_TITLE_LEN: usize = 30;

/// Bodies with fewer lines than this that mention a figure are figures.
const FIGURE_MAX_LINES: usize = 5;

/// Section classifier for one header marker.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    marker: char,
}

impl Classifier {
    /// Create a classifier for headers starting with `marker`.
    pub fn new(marker: char) -> Self {
        Self { marker }
    }

    /// Classify one block.
    ///
    /// `index` is the block's position in the document and makes the
    /// section id unique even when titles repeat.
    pub fn classify(
        &self,
        header: &str,
        body: &str,
        index: usize,
        profile: &StandardProfile,
    ) -> Result<SectionMetadata, SectionError> {
        let header = header.trim();
        if !header.starts_with(self.marker) {
            return Err(SectionError::MissingMarker {
                header: header.to_string(),
                marker: self.marker,
            });
        }

        let level = header.chars().take_while(|c| *c == self.marker).count().max(1) as u32;

        let marker = self.marker;
        let title = header
            .trim_matches(|c: char| c == marker || c.is_whitespace())
            .to_string();
        if title.is_empty() {
            return Err(SectionError::EmptyTitle(header.to_string()));
        }

        let (section_number, pattern_kind) = match profile.match_header(&title) {
            Some((kind, m)) => (Some(m.primary), Some(kind)),
            None => (None, None),
        };

        Ok(SectionMetadata {
            section_id: section_id(profile.standard, index, &title),
            section_type: section_type(&title, body),
            cross_references: cross_references(body, profile),
            title,
            level,
            page_start: None,
            page_end: None,
            parent_section_id: None,
            section_number,
            pattern_kind,
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new('#')
    }
}

/// Classify one block with the default '#' marker.
pub fn classify(
    header: &str,
    body: &str,
    index: usize,
    profile: &StandardProfile,
) -> Result<SectionMetadata, SectionError> {
    Classifier::default().classify(header, body, index, profile)
}

/// Build a section id: standard slug, 3-digit index, cleaned title.
///
/// The title keeps only alphanumerics and whitespace, runs of whitespace
/// become one underscore, and the result is cut to 30 characters and
/// lower-cased.
pub fn section_id(standard: StandardType, index: usize, title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    let cleaned = kept.split_whitespace().collect::<Vec<_>>().join("_");
    let truncated: String = cleaned.chars().take(ID_TITLE_LEN).collect();

    format!("{}{:03}{}", standard.slug(), index, truncated.to_lowercase())
}

/// Structural type by fixed precedence; the first matching rule wins.
///
/// The subsection rule needs at least two periods in the title, so a
/// title such as "1.1 Background" is a plain section.
pub fn section_type(title: &str, body: &str) -> SectionType {
    let title_lower = title.to_lowercase();
    let body_lower = body.to_lowercase();

    if title_lower.contains("appendix") {
        SectionType::Appendix
    } else if title_lower.contains("glossary") || title_lower.contains("definition") {
        SectionType::Glossary
    } else if title_lower.contains("contents") {
        SectionType::TableOfContents
    } else if title_lower.contains("chapter") {
        SectionType::Chapter
    } else if body_lower.contains("figure") && body.split('\n').count() < FIGURE_MAX_LINES {
        SectionType::Figure
    } else if body_lower.contains("table") && body.contains('|') {
        SectionType::Table
    } else if title.matches('.').count() >= 2 {
        SectionType::Subsection
    } else {
        SectionType::Section
    }
}

/// Cross-references in `body` per the profile's patterns, sorted and unique.
pub fn cross_references(body: &str, profile: &StandardProfile) -> Vec<String> {
    profile
        .cross_reference_matches(body)
        .map(|m| m.primary)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
