//! Single-pass scanner that comment-wraps LaTeX embedded in Markdown
//!
//! The scanner walks the input one code point at a time. At every cursor
//! position it offers the upcoming input to an ordered list of
//! [`Recognizer`]s; the first one that claims it consumes its span and emits
//! the corresponding output. Unclaimed code points are copied verbatim.
//!
//! Recognizers that enter a mode (HTML comment, CDATA, LaTeX command or
//! block) leave it again before returning, so the only state that survives
//! between dispatch iterations is the cursor, the output buffer and the
//! inline-math flag.

mod latex;
mod recognizers;

pub use latex::{rewrite_block, rewrite_command, Wrap, CLOSE_MARKER, OPEN_MARKER};
pub use recognizers::{
    Cdata, HtmlComment, InlineMathToggle, Latex, Recognizer, DEFAULT_RECOGNIZERS,
};

use crate::utils::error::{ConversionOutput, ConversionWarning, WarningKind};
use crate::utils::report::ScanReport;

/// Mutable state of one conversion run.
///
/// The input is fixed at construction. The cursor only moves forward and
/// never past the end of the input; output is append-only.
#[derive(Debug)]
pub struct ScanContext {
    input: Vec<char>,
    cursor: usize,
    output: String,
    in_inline_math: bool,
    report: ScanReport,
    warnings: Vec<ConversionWarning>,
}

impl ScanContext {
    pub fn new(input: &str) -> Self {
        let input: Vec<char> = input.chars().collect();
        ScanContext {
            output: String::with_capacity(input.len() + input.len() / 8),
            input,
            cursor: 0,
            in_inline_math: false,
            report: ScanReport::default(),
            warnings: Vec::new(),
        }
    }

    /// Checks if the cursor has reached the end of the input
    pub fn at_eof(&self) -> bool {
        self.cursor >= self.input.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// The code point under the cursor
    pub fn current(&self) -> Option<char> {
        self.peek(0)
    }

    /// The code point `n` positions after the cursor
    pub fn peek(&self, n: usize) -> Option<char> {
        self.input.get(self.cursor + n).copied()
    }

    /// The code point right before the cursor
    pub fn prev(&self) -> Option<char> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.input.get(i).copied())
    }

    /// Does the input at the cursor spell `pat`?
    pub fn starts_with(&self, pat: &str) -> bool {
        self.matches_at(self.cursor, pat)
    }

    /// Does the input right after the cursor spell `pat`?
    ///
    /// Runs off the end of the input count as a mismatch.
    pub fn lookahead_is(&self, pat: &str) -> bool {
        self.matches_at(self.cursor + 1, pat)
    }

    fn matches_at(&self, at: usize, pat: &str) -> bool {
        let mut idx = at;
        for c in pat.chars() {
            if self.input.get(idx) != Some(&c) {
                return false;
            }
            idx += 1;
        }
        true
    }

    pub fn in_inline_math(&self) -> bool {
        self.in_inline_math
    }

    pub(crate) fn set_inline_math(&mut self, on: bool) {
        self.in_inline_math = on;
    }

    /// Appends `s` to the output without moving the cursor
    pub fn emit(&mut self, s: &str) {
        self.output.push_str(s);
    }

    pub fn emit_char(&mut self, c: char) {
        self.output.push(c);
    }

    /// Moves the cursor forward by `n`, stopping at the end of the input
    pub fn advance(&mut self, n: usize) {
        self.cursor = (self.cursor + n).min(self.input.len());
    }

    /// Emits the code point under the cursor and steps over it
    pub fn copy_current(&mut self) {
        if let Some(c) = self.current() {
            self.output.push(c);
            self.cursor += 1;
        }
    }

    /// Steps over the code point under the cursor without emitting it
    pub fn skip_current(&mut self) {
        self.advance(1);
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn report(&self) -> &ScanReport {
        &self.report
    }

    pub(crate) fn report_mut(&mut self) -> &mut ScanReport {
        &mut self.report
    }

    pub fn warnings(&self) -> &[ConversionWarning] {
        &self.warnings
    }

    /// 1-based line number of a code-point offset
    pub fn line_at(&self, offset: usize) -> usize {
        let end = offset.min(self.input.len());
        self.input[..end].iter().filter(|&&c| c == '\n').count() + 1
    }

    pub(crate) fn warn(&mut self, kind: WarningKind, message: impl Into<String>, offset: usize) {
        let warning = ConversionWarning::new(kind, message, self.line_at(offset), offset);
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn into_output(mut self) -> ConversionOutput {
        self.report.input_code_points = self.input.len();
        self.report.output_code_points = self.output.chars().count();
        ConversionOutput::with_warnings(self.output, self.warnings, self.report)
    }
}

/// Drives a [`ScanContext`] through the dispatch loop.
pub struct Scanner<'r> {
    ctx: ScanContext,
    recognizers: &'r [&'r dyn Recognizer],
}

impl Scanner<'static> {
    /// A scanner using the standard recognizer order: HTML comment, CDATA,
    /// inline math, LaTeX.
    pub fn new(input: &str) -> Self {
        Scanner::with_recognizers(input, DEFAULT_RECOGNIZERS)
    }
}

impl<'r> Scanner<'r> {
    pub fn with_recognizers(input: &str, recognizers: &'r [&'r dyn Recognizer]) -> Self {
        Scanner {
            ctx: ScanContext::new(input),
            recognizers,
        }
    }

    pub fn cursor(&self) -> usize {
        self.ctx.cursor()
    }

    pub fn is_done(&self) -> bool {
        self.ctx.at_eof()
    }

    pub fn context(&self) -> &ScanContext {
        &self.ctx
    }

    /// Runs one dispatch iteration. Returns `false` once the input is
    /// exhausted.
    pub fn step(&mut self) -> bool {
        if self.ctx.at_eof() {
            return false;
        }

        let start = self.ctx.cursor();
        for recognizer in self.recognizers {
            if recognizer.attempt(&mut self.ctx) {
                log::trace!(
                    "{} claimed {}..{}",
                    recognizer.name(),
                    start,
                    self.ctx.cursor()
                );
                return true;
            }
        }

        self.ctx.copy_current();
        self.ctx.report.verbatim_code_points += 1;
        true
    }

    /// Scans to the end of the input and returns the converted document.
    pub fn run(mut self) -> ConversionOutput {
        while self.step() {}
        self.finish()
    }

    /// Consumes the scanner. Any input not yet scanned is dropped.
    pub fn finish(self) -> ConversionOutput {
        let output = self.ctx.into_output();
        log::debug!(
            "scanned {} code points: {} commands, {} blocks, {} comments, {} CDATA sections, {} warnings",
            output.report.input_code_points,
            output.report.latex_commands,
            output.report.latex_blocks,
            output.report.html_comments,
            output.report.cdata_sections,
            output.warnings.len()
        );
        output
    }
}
