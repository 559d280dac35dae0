//! Standard identification and input format checks.

use crate::error::{Error, Result};
use crate::profile::StandardType;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Identify the standard a document belongs to from its file name.
///
/// Matching is case-insensitive on substrings: "pmbok", "prince2", then
/// "iso", "21502" or "21500". Anything else is [`StandardType::Unknown`].
///
/// # Example
/// ```
/// use pmstd::{identify_standard, StandardType};
///
/// assert_eq!(identify_standard("PMBOK_Guide_7th.pdf"), StandardType::Pmbok);
/// assert_eq!(identify_standard("iso21500.pdf"), StandardType::Iso);
/// ```
pub fn identify_standard(filename: &str) -> StandardType {
    let lower = filename.to_lowercase();
    if lower.contains("pmbok") {
        StandardType::Pmbok
    } else if lower.contains("prince2") {
        StandardType::Prince2
    } else if lower.contains("iso") || lower.contains("21502") || lower.contains("21500") {
        StandardType::Iso
    } else {
        StandardType::Unknown
    }
}

/// Identify the standard from the file name component of a path.
pub fn identify_standard_from_path<P: AsRef<Path>>(path: P) -> StandardType {
    let name = path
        .as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    identify_standard(&name)
}

/// Read the PDF version from the header of a file.
///
/// Returns `Err(Error::UnsupportedInput)` when the file is not a PDF.
pub fn pdf_version_from_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 16];
    let read = reader.read(&mut header)?;
    pdf_version_from_bytes(&header[..read])
}

/// Read the PDF version from the first bytes of a document.
pub fn pdf_version_from_bytes(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnsupportedInput("not a PDF document".into()));
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedInput(format!(
            "unsupported PDF version: {}",
            version
        )));
    }

    Ok(version)
}

fn is_valid_version(version: &str) -> bool {
    let chars: Vec<char> = version.chars().collect();
    chars.len() == 3 && chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    pdf_version_from_bytes(data).is_ok()
}
