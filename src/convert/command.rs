//! PDF conversion through an external exporter process.

use super::{Converted, DocumentConverter};
use crate::detect;
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Placeholder replaced by the input path in command arguments.
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Default exporter: poppler's pdftotext writing to stdout.
pub const DEFAULT_PDF_COMMAND: &str = "pdftotext -enc UTF-8 {input} -";

/// Runs an external command that prints the exported text on stdout.
///
/// The command must produce markdown with `#` headers for sections to be
/// found; pages are counted from form-feed separators in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    /// Create a converter. Arguments may contain `{input}`; if none does,
    /// the input path is appended.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parse a whitespace-separated command line.
    pub fn parse(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| Error::Other("empty conversion command".into()))?;
        Ok(Self::new(program, parts.collect()))
    }

    /// The default pdftotext command.
    pub fn pdftotext() -> Self {
        Self::new(
            "pdftotext",
            vec![
                "-enc".into(),
                "UTF-8".into(),
                INPUT_PLACEHOLDER.into(),
                "-".into(),
            ],
        )
    }

    /// Program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for converting `path`.
    pub fn build_args(&self, path: &Path) -> Vec<OsString> {
        let mut substituted = false;
        let mut args: Vec<OsString> = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains(INPUT_PLACEHOLDER) {
                    substituted = true;
                    let mut with_path = OsString::new();
                    let (before, after) = arg
                        .split_once(INPUT_PLACEHOLDER)
                        .unwrap_or((arg.as_str(), ""));
                    with_path.push(before);
                    with_path.push(path.as_os_str());
                    with_path.push(after);
                    with_path
                } else {
                    OsString::from(arg)
                }
            })
            .collect();

        if !substituted {
            args.push(path.as_os_str().to_os_string());
        }
        args
    }
}

impl Default for CommandConverter {
    fn default() -> Self {
        Self::pdftotext()
    }
}

impl DocumentConverter for CommandConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "command"
    }

    fn convert(&self, path: &Path) -> Result<Converted> {
        let version = detect::pdf_version_from_path(path)?;
        log::debug!("{} is PDF {}, running {}", path.display(), version, self.program);

        let output = Command::new(&self.program)
            .args(self.build_args(path))
            .output()
            .map_err(|e| {
                Error::conversion(path, format!("failed to execute {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::conversion(
                path,
                format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
            ));
        }

        let text = String::from_utf8(output.stdout)
            .map_err(|e| Error::conversion(path, format!("output is not valid UTF-8: {}", e)))?;
        Ok(Converted::from_paged_text(text))
    }
}
