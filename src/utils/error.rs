//! Error handling for Sxmd conversions
//!
//! The scanner itself never fails: malformed LaTeX, unbalanced brackets and
//! missing terminators all degrade into best-effort output plus a
//! [`ConversionWarning`]. Only the boundary (reading input, writing a
//! profile) produces a [`ConversionError`].

use std::fmt;
use std::path::{Path, PathBuf};

use crate::utils::report::ScanReport;

/// Conversion error type
#[derive(Debug, Clone)]
pub enum ConversionError {
    /// IO error (for file operations)
    IoError {
        path: Option<PathBuf>,
        message: String,
    },
    /// The profiling hook could not be started or its output not written
    ProfileError { message: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::IoError { path, message } => {
                if let Some(p) = path {
                    write!(f, "IO error on {}: {}", p.display(), message)
                } else {
                    write!(f, "IO error: {}", message)
                }
            }
            ConversionError::ProfileError { message } => {
                write!(f, "Profile error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            path: None,
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

// Convenience constructors for errors
impl ConversionError {
    pub fn io_at(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        ConversionError::IoError {
            path: Some(path.as_ref().to_path_buf()),
            message: err.to_string(),
        }
    }

    pub fn profile(message: impl Into<String>) -> Self {
        ConversionError::ProfileError {
            message: message.into(),
        }
    }

    /// The file this error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConversionError::IoError { path, .. } => path.as_deref(),
            ConversionError::ProfileError { .. } => None,
        }
    }
}

// =============================================================================
// Warning System
// =============================================================================

/// Kind of warning raised while scanning malformed input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// `<!--` without a matching `-->`
    UnterminatedComment,
    /// `<![CDATA[` without a matching `]]>`
    UnterminatedCdata,
    /// `\begin` without a matching top-level `\end`
    UnterminatedBlock,
    /// Argument brackets of a command never returned to depth zero
    UnbalancedArguments,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::UnterminatedComment => write!(f, "unterminated comment"),
            WarningKind::UnterminatedCdata => write!(f, "unterminated CDATA"),
            WarningKind::UnterminatedBlock => write!(f, "unterminated block"),
            WarningKind::UnbalancedArguments => write!(f, "unbalanced arguments"),
        }
    }
}

/// Conversion warnings (non-fatal issues)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionWarning {
    pub kind: WarningKind,
    pub message: String,
    /// 1-based line of the construct that triggered the warning
    pub line: usize,
    /// Code-point offset of the construct that triggered the warning
    pub offset: usize,
}

impl ConversionWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>, line: usize, offset: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            offset,
        }
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] line {} (offset {}): {}",
            self.kind, self.line, self.offset, self.message
        )
    }
}

/// Conversion output with warnings and scan statistics
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// The converted content
    pub content: String,
    /// Any warnings generated during conversion
    pub warnings: Vec<ConversionWarning>,
    /// What the scanner saw on the way
    pub report: ScanReport,
}

impl ConversionOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
            report: ScanReport::default(),
        }
    }

    pub fn with_warnings(
        content: String,
        warnings: Vec<ConversionWarning>,
        report: ScanReport,
    ) -> Self {
        Self {
            content,
            warnings,
            report,
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.content.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_names_file() {
        let err = ConversionError::io_at(
            "notes.md",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("notes.md"));
        assert!(msg.contains("no such file"));
        assert_eq!(err.path(), Some(Path::new("notes.md")));
    }

    #[test]
    fn test_io_error_from_std() {
        let err: ConversionError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.to_string().starts_with("IO error: "));
        assert!(err.path().is_none());
    }

    #[test]
    fn test_profile_error() {
        let err = ConversionError::profile("sampler unavailable");
        assert!(err.to_string().contains("Profile error"));
        assert!(err.to_string().contains("sampler unavailable"));
    }

    #[test]
    fn test_warning_display() {
        let warn = ConversionWarning::new(
            WarningKind::UnterminatedCdata,
            "CDATA section runs to end of input",
            3,
            42,
        );
        let msg = warn.to_string();
        assert!(msg.contains("unterminated CDATA"));
        assert!(msg.contains("line 3"));
        assert!(msg.contains("offset 42"));
    }

    #[test]
    fn test_conversion_output() {
        let output = ConversionOutput::new("hello".to_string());
        assert!(!output.has_warnings());

        let output_with_warn = ConversionOutput::with_warnings(
            "hello".to_string(),
            vec![ConversionWarning::new(
                WarningKind::UnterminatedComment,
                "test warning",
                1,
                0,
            )],
            ScanReport::default(),
        );
        assert!(output_with_warn.has_warnings());
        assert_eq!(output_with_warn.into_bytes(), b"hello".to_vec());
    }
}
