//! Rendering processed documents to their persisted JSON artifacts.

mod json;

pub use json::{
    document_file_name, save_document, save_sections, section_file_name, to_json, DocumentSummary,
    JsonFormat, SectionBody, SectionExport, SectionSummary,
};
