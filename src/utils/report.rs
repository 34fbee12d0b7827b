//! Per-run scan statistics.

use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub input_code_points: usize,
    pub output_code_points: usize,
    pub html_comments: usize,
    pub cdata_sections: usize,
    pub escaped_dollars: usize,
    pub inline_math_spans: usize,
    pub latex_commands: usize,
    pub latex_blocks: usize,
    pub double_backslashes: usize,
    pub verbatim_code_points: usize,
}

impl ScanReport {
    /// Number of LaTeX constructs that were wrapped in an HTML comment.
    pub fn wrapped(&self) -> usize {
        self.latex_commands + self.latex_blocks
    }

    /// True if the scan touched nothing but plain text.
    pub fn is_passthrough(&self) -> bool {
        self.wrapped() == 0 && self.cdata_sections == 0
    }
}
