//! Data model for processed standards documents.
//!
//! Sections are flat: hierarchy is implied by `level` only. Field names
//! double as the JSON keys of the persisted artifacts.

mod document;
mod record;
mod section;

pub use document::{DocumentMetadata, ProcessedDocument, ProcessingStats};
pub use record::{FigureKind, FigureRecord, TableKind, TableRecord};
pub use section::{ProcessedSection, SectionMetadata, SectionType};
