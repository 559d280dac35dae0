//! Processing options and configuration.

use crate::content::NormalizeOptions;

/// Quality score a section must exceed to count as valid.
pub const DEFAULT_QUALITY_THRESHOLD: f64 = 0.3;

/// Options for processing a document.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Character that marks header lines
    pub header_marker: char,

    /// A header line must be longer than this after trimming
    pub min_header_len: usize,

    /// Score a section must exceed to enter the table of contents
    pub toc_threshold: f64,

    /// Score a section must exceed to be exported on its own
    pub section_export_threshold: f64,

    /// Classify blocks on the rayon pool after segmentation
    pub parallel: bool,

    /// Body text normalization
    pub normalize: NormalizeOptions,
}

impl ProcessOptions {
    /// Create new process options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header marker character.
    pub fn with_header_marker(mut self, marker: char) -> Self {
        self.header_marker = marker;
        self
    }

    /// Set the minimum header length.
    pub fn with_min_header_len(mut self, len: usize) -> Self {
        self.min_header_len = len;
        self
    }

    /// Set the table-of-contents threshold.
    pub fn with_toc_threshold(mut self, threshold: f64) -> Self {
        self.toc_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the per-section export threshold.
    pub fn with_section_export_threshold(mut self, threshold: f64) -> Self {
        self.section_export_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Enable or disable parallel block processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set normalization options.
    pub fn with_normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            header_marker: '#',
            min_header_len: 3,
            toc_threshold: DEFAULT_QUALITY_THRESHOLD,
            section_export_threshold: DEFAULT_QUALITY_THRESHOLD,
            parallel: false,
            normalize: NormalizeOptions::default(),
        }
    }
}
