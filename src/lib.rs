//! Sxmd - hide LaTeX embedded in Markdown behind HTML comments
//!
//! LaTeX commands and `\begin ... \end` blocks are wrapped in `<!-- -->` so
//! Markdown renderers skip them while the source stays intact for other
//! tooling. Inline math (`$...$`) and existing HTML comments pass through
//! unchanged; CDATA sections are removed.
//!
//! # Example
//!
//! ```
//! let out = sxmd::convert_str(r"see \cite{knuth} and $x \leq y$ here");
//! assert_eq!(out, r"see <!--\cite{knuth}--> and $x \leq y$ here");
//! ```

pub mod core;
pub mod utils;

use std::fs;
use std::path::Path;

pub use crate::core::scanner::{Recognizer, ScanContext, Scanner, DEFAULT_RECOGNIZERS};
pub use crate::utils::error::{
    ConversionError, ConversionOutput, ConversionResult, ConversionWarning, WarningKind,
};
pub use crate::utils::report::ScanReport;

/// Converts raw document bytes.
///
/// Input is decoded as UTF-8; invalid sequences become U+FFFD. Never fails.
pub fn convert(input: &[u8]) -> Vec<u8> {
    convert_str(&String::from_utf8_lossy(input)).into_bytes()
}

pub fn convert_str(input: &str) -> String {
    convert_with_report(input).content
}

/// Converts `input` and keeps the warnings and statistics of the scan.
pub fn convert_with_report(input: &str) -> ConversionOutput {
    Scanner::new(input).run()
}

/// Reads a whole file and converts it.
pub fn convert_file(path: impl AsRef<Path>) -> ConversionResult<ConversionOutput> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| ConversionError::io_at(path, e))?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(convert_with_report(&String::from_utf8_lossy(&bytes)))
}
