//! Conversion collaborators that turn source documents into text.
//!
//! PDF decoding, OCR and table recognition live outside this crate. A
//! [`DocumentConverter`] hands the engine one text/markdown string plus a
//! page count; the [`ConverterRegistry`] dispatches on file extension.
//!
//! # Example
//!
//! ```no_run
//! use pmstd::convert::{CommandConverter, ConverterRegistry};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! fn main() -> pmstd::Result<()> {
//!     let mut registry = ConverterRegistry::with_defaults();
//!     registry.register(Arc::new(CommandConverter::parse("docling-export {input}")?));
//!
//!     let converted = registry.convert(Path::new("data/raw/iso21500.pdf"))?;
//!     println!("{} pages", converted.page_count);
//!     Ok(())
//! }
//! ```

mod command;
mod markdown;

pub use command::{CommandConverter, DEFAULT_PDF_COMMAND};
pub use markdown::MarkdownConverter;

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Page separator emitted by text exporters.
pub const PAGE_BREAK: char = '\u{000C}';

/// Output of a conversion collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Converted {
    /// Exported text/markdown for the whole document
    pub text: String,

    /// Number of pages in the source
    pub page_count: u32,
}

impl Converted {
    /// Create a conversion result.
    pub fn new(text: impl Into<String>, page_count: u32) -> Self {
        Self {
            text: text.into(),
            page_count,
        }
    }

    /// Create a result, counting pages from form-feed separators.
    pub fn from_paged_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let page_count = count_pages(&text);
        Self { text, page_count }
    }
}

/// Pages in form-feed separated text. Empty text has no pages, and a
/// trailing separator does not open a new page.
pub fn count_pages(text: &str) -> u32 {
    if text.trim().is_empty() {
        return 0;
    }
    let body = text.trim_end_matches(|c: char| c == PAGE_BREAK || c.is_whitespace());
    body.matches(PAGE_BREAK).count() as u32 + 1
}

/// A source of exported text for one kind of input file.
///
/// Implementations hand back the whole document as one string; anything
/// they cannot convert is a fatal [`Error::Conversion`] for that document.
pub trait DocumentConverter: Send + Sync {
    /// Lower-case extensions without the dot, e.g. `["pdf"]`.
    fn supported_extensions(&self) -> &[&str];

    /// Short identifier used for lookups and logging.
    fn name(&self) -> &str;

    /// Convert the file at `path`.
    fn convert(&self, path: &Path) -> Result<Converted>;

    /// Case-insensitive extension check.
    fn supports_extension(&self, ext: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Converters indexed by file extension.
///
/// Registering a converter claims all of its extensions; a later
/// registration takes over any extension claimed before.
pub struct ConverterRegistry {
    converters: Vec<Arc<dyn DocumentConverter>>,
    by_extension: HashMap<String, usize>,
}

impl ConverterRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            converters: Vec::new(),
            by_extension: HashMap::new(),
        }
    }

    /// Markdown/text exports plus the default `pdftotext` command.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MarkdownConverter::new()));
        registry.register(Arc::new(CommandConverter::pdftotext()));
        registry
    }

    /// Add a converter and point its extensions at it.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        let slot = self.converters.len();
        for ext in converter.supported_extensions() {
            self.by_extension.insert(ext.to_ascii_lowercase(), slot);
        }
        self.converters.push(converter);
    }

    /// Converter responsible for `ext`.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_extension
            .get(&ext.to_ascii_lowercase())
            .map(|&slot| Arc::clone(&self.converters[slot]))
    }

    /// Most recently registered converter called `name` (case-insensitive).
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters
            .iter()
            .rev()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Check whether some converter handles `ext`.
    pub fn supports(&self, ext: &str) -> bool {
        self.by_extension.contains_key(&ext.to_ascii_lowercase())
    }

    /// Check whether some converter handles the extension of `path`.
    pub fn supports_path(&self, path: &Path) -> bool {
        extension(path).is_some_and(|ext| self.supports(ext))
    }

    /// Handled extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.by_extension.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }

    /// Convert `path` with the converter for its extension.
    pub fn convert(&self, path: &Path) -> Result<Converted> {
        let ext = extension(path).ok_or_else(|| {
            Error::UnsupportedInput(format!("{} has no extension", path.display()))
        })?;
        let converter = self.get_by_extension(ext).ok_or_else(|| {
            Error::UnsupportedInput(format!("no converter for extension: {}", ext))
        })?;

        log::debug!("Converting {} with {}", path.display(), converter.name());
        converter.convert(path)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}
