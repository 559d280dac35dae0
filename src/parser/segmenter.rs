//! Splits a flat markdown stream into (header, body) blocks.

use super::ProcessOptions;

/// A header line and the body lines that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    /// Header line, trimmed
    pub header: &'a str,

    /// Body lines joined with '\n'
    pub body: String,
}

/// Lazy iterator over the blocks of a text.
///
/// A line is a header when, after trimming, it starts with the marker and
/// is longer than `min_header_len` characters. Text before the first
/// header is discarded, as is a header with no body lines before the next
/// header.
///
/// # Example
///
/// ```
/// use pmstd::parser::Segmenter;
///
/// let text = "preamble\n# Scope\nThis clause applies.\n# Terms\nNone.";
/// let headers: Vec<_> = Segmenter::new(text).map(|b| b.header).collect();
/// assert_eq!(headers, vec!["# Scope", "# Terms"]);
/// ```
#[derive(Debug, Clone)]
pub struct Segmenter<'a> {
    lines: std::str::Split<'a, char>,
    marker: char,
    min_header_len: usize,
    header: Option<&'a str>,
    body: Vec<&'a str>,
    finished: bool,
}

impl<'a> Segmenter<'a> {
    /// Segment `text` with the default '#' marker.
    pub fn new(text: &'a str) -> Self {
        Self::with_options(text, &ProcessOptions::default())
    }

    /// Segment `text` using the marker and header length from `options`.
    pub fn with_options(text: &'a str, options: &ProcessOptions) -> Self {
        Self {
            lines: text.split('\n'),
            marker: options.header_marker,
            min_header_len: options.min_header_len,
            header: None,
            body: Vec::new(),
            finished: false,
        }
    }

    fn is_header(&self, trimmed: &str) -> bool {
        trimmed.starts_with(self.marker) && trimmed.chars().count() > self.min_header_len
    }

    /// Close the current block, returning it if it has a header and a body.
    fn take_block(&mut self, next_header: Option<&'a str>) -> Option<Block<'a>> {
        let header = std::mem::replace(&mut self.header, next_header);
        let body = std::mem::take(&mut self.body);
        match header {
            Some(header) if !body.is_empty() => Some(Block {
                header,
                body: body.join("\n"),
            }),
            _ => None,
        }
    }
}

impl<'a> Iterator for Segmenter<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while let Some(line) = self.lines.next() {
            let trimmed = line.trim();
            if self.is_header(trimmed) {
                if let Some(block) = self.take_block(Some(trimmed)) {
                    return Some(block);
                }
            } else {
                self.body.push(line);
            }
        }

        self.finished = true;
        self.take_block(None)
    }
}

/// Segment `text` with default options.
pub fn segment(text: &str) -> Segmenter<'_> {
    Segmenter::new(text)
}
