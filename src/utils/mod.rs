//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error and warning types
//! - Scan statistics
//! - The `--cpuprofile` hook

pub mod error;
pub mod profile;
pub mod report;

// Re-export commonly used items
pub use error::{
    ConversionError, ConversionOutput, ConversionResult, ConversionWarning, WarningKind,
};
pub use profile::CpuProfile;
pub use report::ScanReport;
