//! Converter for already-exported markdown and text files.

use super::{Converted, DocumentConverter};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Reads markdown/text exports from disk.
///
/// Pages are counted from form-feed separators; an export without any
/// counts as a single page.
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    _private: (),
}

impl MarkdownConverter {
    /// Create a new markdown converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for MarkdownConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["md", "markdown", "txt"]
    }

    fn name(&self) -> &str {
        "markdown"
    }

    fn convert(&self, path: &Path) -> Result<Converted> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::conversion(path, format!("not valid UTF-8: {}", e)))?;
        Ok(Converted::from_paged_text(text))
    }
}
