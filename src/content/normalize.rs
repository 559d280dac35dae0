//! Body text cleanup for converted markdown.

use crate::error::Result;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Token that replaces image comment markers.
pub const IMAGE_PLACEHOLDER: &str = "[IMAGE]";

/// Canonical bullet prefix.
pub const BULLET: &str = "• ";

/// Options for body normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Collapse 3+ newlines (with surrounding whitespace) to one blank line
    pub collapse_blank_lines: bool,

    /// Replace `<!-- image -->` with [`IMAGE_PLACEHOLDER`]
    pub image_placeholders: bool,

    /// Remove all other `<!-- ... -->` comments
    pub strip_comments: bool,

    /// Rewrite line-leading bullet glyphs (▪, ◦, ‣, ...) to [`BULLET`]
    pub standardize_bullets: bool,

    /// Normalize Unicode to NFC form before anything else
    pub unicode_nfc: bool,
}

impl NormalizeOptions {
    /// The standard pipeline.
    pub fn standard() -> Self {
        Self {
            collapse_blank_lines: true,
            image_placeholders: true,
            strip_comments: true,
            standardize_bullets: true,
            unicode_nfc: false,
        }
    }

    /// No cleanup except trimming.
    pub fn minimal() -> Self {
        Self {
            collapse_blank_lines: false,
            image_placeholders: false,
            strip_comments: false,
            standardize_bullets: false,
            unicode_nfc: false,
        }
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_nfc(mut self, nfc: bool) -> Self {
        self.unicode_nfc = nfc;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Compiled normalization pipeline.
#[derive(Debug, Clone)]
pub struct Normalizer {
    options: NormalizeOptions,
    blank_lines: Regex,
    image_comment: Regex,
    comment: Regex,
    bullet: Regex,
}

impl Normalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Result<Self> {
        Ok(Self {
            options,
            blank_lines: Regex::new(r"\n\s*\n\s*\n")?,
            image_comment: Regex::new(r"<!--\s*image\s*-->")?,
            comment: Regex::new(r"<!--[^>]*-->")?,
            bullet: Regex::new(r"(?m)^[ \t]*[•▪▫◦‣⁃][ \t]")?,
        })
    }

    /// The options this normalizer was built with.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Clean a section body.
    pub fn normalize(&self, body: &str) -> String {
        let mut result = if self.options.unicode_nfc {
            body.nfc().collect::<String>()
        } else {
            body.to_string()
        };

        if self.options.collapse_blank_lines {
            result = self.blank_lines.replace_all(&result, "\n\n").into_owned();
        }

        if self.options.image_placeholders {
            result = self
                .image_comment
                .replace_all(&result, IMAGE_PLACEHOLDER)
                .into_owned();
        }

        if self.options.strip_comments {
            result = self.comment.replace_all(&result, "").into_owned();
        }

        if self.options.standardize_bullets {
            result = self.bullet.replace_all(&result, BULLET).into_owned();
        }

        result.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new(NormalizeOptions::standard()).unwrap()
    }

    #[test]
    fn test_collapse_blank_lines() {
        let result = normalizer().normalize("First\n\n\n\nSecond\n \n\t\nThird");
        assert_eq!(result, "First\n\nSecond\n\nThird");
    }

    #[test]
    fn test_single_blank_line_kept() {
        assert_eq!(normalizer().normalize("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_image_placeholder() {
        let result = normalizer().normalize("Before\n<!-- image -->\nAfter");
        assert_eq!(result, "Before\n[IMAGE]\nAfter");
    }

    #[test]
    fn test_strip_other_comments() {
        let result = normalizer().normalize("Text <!-- page 12 -->more<!---->");
        assert_eq!(result, "Text more");
    }

    #[test]
    fn test_bullet_standardization() {
        let result = normalizer().normalize("Items:\n▪ one\n  ◦ two\n‣ three\n• four");
        assert_eq!(result, "Items:\n• one\n• two\n• three\n• four");
    }

    #[test]
    fn test_bullet_mid_line_untouched() {
        let result = normalizer().normalize("a ▪ b");
        assert_eq!(result, "a ▪ b");
    }

    #[test]
    fn test_trim() {
        assert_eq!(normalizer().normalize("\n\n  body  \n"), "body");
        assert_eq!(normalizer().normalize("   \n\t "), "");
    }

    #[test]
    fn test_minimal_only_trims() {
        let normalizer = Normalizer::new(NormalizeOptions::minimal()).unwrap();
        assert_eq!(normalizer.normalize(" <!-- image --> "), "<!-- image -->");
    }

    #[test]
    fn test_unicode_nfc() {
        let normalizer =
            Normalizer::new(NormalizeOptions::standard().with_unicode_nfc(true)).unwrap();
        // "e" + combining acute accent
        let result = normalizer.normalize("cafe\u{0301}");
        assert_eq!(result, "caf\u{00e9}");
    }
}
