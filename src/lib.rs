//! # pmstd
//!
//! Section-level structure extraction for project-management standards
//! (PMBOK, PRINCE2, ISO 21500/21502).
//!
//! The engine takes the markdown export of a standard, as produced by an
//! external PDF conversion tool, and rebuilds its logical structure:
//! sections with stable ids, levels, structural types, cross-references,
//! embedded tables and figures, and a per-section quality score.
//!
//! ## Quick Start
//!
//! ```
//! use pmstd::{Processor, ProcessOptions};
//!
//! fn main() -> pmstd::Result<()> {
//!     let processor = Processor::new(ProcessOptions::default())?;
//!     let text = "# 4 Governance\nProject governance covers Clause 4.2 in detail.";
//!     let doc = processor.process_text("iso21502.md", text, 1);
//!
//!     assert_eq!(doc.sections.len(), 1);
//!     assert_eq!(doc.sections[0].metadata.section_id, "iso0004_governance");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Profiles**: header rules and cross-reference patterns per standard
//! - **Deterministic ids**: derived from standard, block position and title
//! - **Heuristic scoring**: a 0.0-1.0 confidence signal per section
//! - **Parallel processing**: optional Rayon classification and batch runs
//! - **JSON artifacts**: whole-document and per-section exports

pub mod assemble;
pub mod content;
pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod profile;
pub mod render;

// Re-export commonly used types
pub use assemble::{Assembler, MetadataExtractor};
pub use content::{NormalizeOptions, Normalizer};
pub use convert::{
    CommandConverter, Converted, ConverterRegistry, DocumentConverter, MarkdownConverter,
};
pub use detect::{identify_standard, identify_standard_from_path};
pub use error::{Error, Result, SectionError};
pub use model::{
    DocumentMetadata, FigureRecord, ProcessedDocument, ProcessedSection, ProcessingStats,
    SectionMetadata, SectionType, TableRecord,
};
pub use parser::{segment, Block, ProcessOptions, Segmenter};
pub use profile::{PatternKind, PatternMatch, ProfileRegistry, StandardProfile, StandardType};
pub use render::JsonFormat;

use chrono::Utc;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Runs the whole pipeline for one document at a time.
///
/// A processor is immutable once built and can be shared across threads;
/// every call is independent of the others.
///
/// # Example
///
/// ```no_run
/// use pmstd::{ConverterRegistry, Processor, ProcessOptions};
/// use std::path::Path;
///
/// let processor = Processor::new(ProcessOptions::new().with_parallel(true))?;
/// let converters = ConverterRegistry::with_defaults();
/// let doc = processor.process_file(Path::new("data/raw/PMBOK7.pdf"), &converters)?;
/// println!("{} sections", doc.sections.len());
/// # Ok::<(), pmstd::Error>(())
/// ```
pub struct Processor {
    options: ProcessOptions,
    profiles: ProfileRegistry,
    assembler: Assembler,
    metadata: MetadataExtractor,
}

impl Processor {
    /// Create a processor with the built-in profiles.
    pub fn new(options: ProcessOptions) -> Result<Self> {
        Self::with_profiles(options, ProfileRegistry::builtin()?)
    }

    /// Create a processor with a custom profile registry.
    pub fn with_profiles(options: ProcessOptions, profiles: ProfileRegistry) -> Result<Self> {
        Ok(Self {
            assembler: Assembler::new(&options)?,
            metadata: MetadataExtractor::new()?,
            options,
            profiles,
        })
    }

    /// The options this processor was built with.
    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// The profile registry in use.
    pub fn profiles(&self) -> &ProfileRegistry {
        &self.profiles
    }

    /// Process exported text; the standard is identified from `source_name`.
    pub fn process_text(
        &self,
        source_name: &str,
        text: &str,
        page_count: u32,
    ) -> ProcessedDocument {
        let standard = identify_standard(source_name);
        self.process_converted(standard, &Converted::new(text, page_count), None)
    }

    /// Process a conversion result for a known standard.
    pub fn process_converted(
        &self,
        standard: StandardType,
        converted: &Converted,
        file_path: Option<PathBuf>,
    ) -> ProcessedDocument {
        let profile = self.profiles.profile_for(standard);
        let metadata = self.metadata.extract(
            profile,
            &converted.text,
            converted.page_count,
            file_path,
            Utc::now(),
        );

        let blocks = Segmenter::with_options(&converted.text, &self.options);
        let doc = self.assembler.assemble(metadata, profile, blocks);

        let stats = &doc.processing_stats;
        log::info!(
            "Processed {}: {} sections ({} valid, {} skipped), {} tables, {} figures, \
             avg quality {}, success {}%",
            standard,
            stats.total_sections,
            stats.valid_sections,
            stats.skipped_blocks,
            stats.total_tables,
            stats.total_figures,
            stats.average_quality_score,
            stats.success_rate
        );
        doc
    }

    /// Convert and process one file. Conversion failures are returned.
    pub fn process_file(
        &self,
        path: &Path,
        converters: &ConverterRegistry,
    ) -> Result<ProcessedDocument> {
        let converted = converters.convert(path)?;
        let standard = identify_standard_from_path(path);
        Ok(self.process_converted(standard, &converted, Some(path.to_path_buf())))
    }

    /// Process many files in parallel. A failed document does not stop
    /// the others; entries come back in input order.
    pub fn process_batch(
        &self,
        paths: &[PathBuf],
        converters: &ConverterRegistry,
    ) -> Vec<BatchEntry> {
        paths
            .par_iter()
            .map(|path| {
                let result = self.process_file(path, converters);
                if let Err(ref e) = result {
                    log::warn!("Error processing {}: {}", path.display(), e);
                }
                BatchEntry {
                    path: path.clone(),
                    result,
                }
            })
            .collect()
    }
}

/// Outcome for one document of a batch.
#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub result: Result<ProcessedDocument>,
}

impl BatchEntry {
    /// Check whether the document was processed.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregate counts over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub documents: usize,
    pub successful: usize,
    pub failed: usize,
    pub total_sections: usize,
    pub valid_sections: usize,
}

impl BatchSummary {
    /// Summarize batch entries.
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        let mut summary = Self {
            documents: entries.len(),
            ..Self::default()
        };
        for entry in entries {
            match &entry.result {
                Ok(doc) => {
                    summary.successful += 1;
                    summary.total_sections += doc.processing_stats.total_sections;
                    summary.valid_sections += doc.processing_stats.valid_sections;
                }
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// Process exported text with default options.
///
/// # Example
///
/// ```
/// let doc = pmstd::process_text("notes.md", "# Scope\nBody text.", 1)?;
/// assert_eq!(doc.metadata.standard_type, pmstd::StandardType::Unknown);
/// # Ok::<(), pmstd::Error>(())
/// ```
pub fn process_text(source_name: &str, text: &str, page_count: u32) -> Result<ProcessedDocument> {
    let processor = Processor::new(ProcessOptions::default())?;
    Ok(processor.process_text(source_name, text, page_count))
}

/// Convert and process a file with the default converters and options.
pub fn process_file<P: AsRef<Path>>(path: P) -> Result<ProcessedDocument> {
    let processor = Processor::new(ProcessOptions::default())?;
    processor.process_file(path.as_ref(), &ConverterRegistry::with_defaults())
}
