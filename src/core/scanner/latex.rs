//! Rewriters for LaTeX commands and `\begin ... \end` blocks.

use super::ScanContext;
use crate::utils::error::WarningKind;

pub const OPEN_MARKER: &str = "<!--";
pub const CLOSE_MARKER: &str = "-->";

/// Whether a rewritten command gets its own comment markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    /// Surround the command with `<!--` and `-->`
    Comment,
    /// Copy the command only; the caller owns the markers
    Bare,
}

fn is_group_open(c: char) -> bool {
    c == '{' || c == '['
}

fn is_group_close(c: char) -> bool {
    c == '}' || c == ']'
}

/// Rewrites one command invocation starting at the backslash under the
/// cursor, e.g. `\foo{bar}[baz]`.
///
/// The name runs up to the first `{`, `[` or whitespace. Every bracket group
/// that follows immediately is copied too. Bracket kinds are not matched
/// against each other: any of `{[` opens, any of `}]` closes.
pub fn rewrite_command(ctx: &mut ScanContext, wrap: Wrap) {
    let start = ctx.cursor();
    if wrap == Wrap::Comment {
        ctx.emit(OPEN_MARKER);
    }

    while let Some(c) = ctx.current() {
        if is_group_open(c) || c.is_whitespace() {
            break;
        }
        ctx.copy_current();
    }

    // \foo{bar}{baz} test 123
    //               ^ depth is back to zero and no group follows
    let mut depth = 0usize;
    while let Some(c) = ctx.current() {
        if depth == 0 && !is_group_open(c) {
            break;
        }
        if is_group_open(c) {
            depth += 1;
        } else if is_group_close(c) {
            depth -= 1;
        }
        ctx.copy_current();
    }

    if depth > 0 {
        ctx.warn(
            WarningKind::UnbalancedArguments,
            format!("{} unclosed argument bracket(s) at end of input", depth),
            start,
        );
    }

    if wrap == Wrap::Comment {
        ctx.emit(CLOSE_MARKER);
        ctx.report_mut().latex_commands += 1;
    }
}

/// Rewrites a `\begin{..} ... \end{..}` span, nested blocks included, as a
/// single comment.
///
/// Environment names are not compared, so `\begin{figure} ... \end{math}`
/// is one block. The closing `\end{..}` is copied with
/// [`rewrite_command`] so its argument lands inside the comment.
pub fn rewrite_block(ctx: &mut ScanContext) {
    let start = ctx.cursor();
    ctx.emit(OPEN_MARKER);
    ctx.report_mut().latex_blocks += 1;

    let mut depth = 0usize;
    while !ctx.at_eof() {
        if ctx.starts_with("\\begin") {
            depth += 1;
        } else if ctx.starts_with("\\end") {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                rewrite_command(ctx, Wrap::Bare);
                ctx.emit(CLOSE_MARKER);
                return;
            }
        }
        ctx.copy_current();
    }

    ctx.warn(
        WarningKind::UnterminatedBlock,
        format!("{} unmatched \\begin at end of input", depth),
        start,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(input: &str, wrap: Wrap) -> ScanContext {
        let mut ctx = ScanContext::new(input);
        rewrite_command(&mut ctx, wrap);
        ctx
    }

    fn block(input: &str) -> ScanContext {
        let mut ctx = ScanContext::new(input);
        rewrite_block(&mut ctx);
        ctx
    }

    #[test]
    fn test_command_without_arguments() {
        let ctx = command("\\alpha beta", Wrap::Comment);
        assert_eq!(ctx.output(), "<!--\\alpha-->");
        assert_eq!(ctx.current(), Some(' '));
    }

    #[test]
    fn test_command_with_mixed_groups() {
        let ctx = command("\\foo{bar}[baz]{q} rest", Wrap::Comment);
        assert_eq!(ctx.output(), "<!--\\foo{bar}[baz]{q}-->");
        assert_eq!(ctx.report().latex_commands, 1);
    }

    #[test]
    fn test_command_nested_groups() {
        let ctx = command("\\frac{a{b}}{c}.", Wrap::Comment);
        assert_eq!(ctx.output(), "<!--\\frac{a{b}}{c}-->");
        assert_eq!(ctx.current(), Some('.'));
    }

    #[test]
    fn test_bracket_kinds_are_interchangeable() {
        // `{` closed by `]` still balances.
        let ctx = command("\\x{a] b", Wrap::Comment);
        assert_eq!(ctx.output(), "<!--\\x{a]-->");
    }

    #[test]
    fn test_space_ends_argument_list() {
        let ctx = command("\\x{a} {b}", Wrap::Comment);
        assert_eq!(ctx.output(), "<!--\\x{a}-->");
    }

    #[test]
    fn test_unbalanced_arguments_run_to_end() {
        let ctx = command("\\x{a{b}", Wrap::Comment);
        assert_eq!(ctx.output(), "<!--\\x{a{b}-->");
        assert!(ctx.at_eof());
        assert_eq!(ctx.warnings()[0].kind, WarningKind::UnbalancedArguments);
    }

    #[test]
    fn test_bare_command_has_no_markers() {
        let ctx = command("\\end{a}x", Wrap::Bare);
        assert_eq!(ctx.output(), "\\end{a}");
        assert_eq!(ctx.report().latex_commands, 0);
    }

    #[test]
    fn test_block_nested() {
        let ctx = block("\\begin{a}\\begin{b}body\\end{b}\\end{a} after");
        assert_eq!(ctx.output(), "<!--\\begin{a}\\begin{b}body\\end{b}\\end{a}-->");
        assert_eq!(ctx.current(), Some(' '));
    }

    #[test]
    fn test_block_names_not_checked() {
        let ctx = block("\\begin{figure}x\\end{math}");
        assert_eq!(ctx.output(), "<!--\\begin{figure}x\\end{math}-->");
        assert!(ctx.warnings().is_empty());
    }

    #[test]
    fn test_block_copies_inner_markup_verbatim() {
        let ctx = block("\\begin{a}$x$ <!-- c --> \\y{z}\\end{a}");
        assert_eq!(ctx.output(), "<!--\\begin{a}$x$ <!-- c --> \\y{z}\\end{a}-->");
    }

    #[test]
    fn test_unterminated_block() {
        let ctx = block("\\begin{a}\\begin{b}\\end{b} tail");
        assert_eq!(ctx.output(), "<!--\\begin{a}\\begin{b}\\end{b} tail");
        assert!(ctx.at_eof());
        assert_eq!(ctx.warnings()[0].kind, WarningKind::UnterminatedBlock);
        assert_eq!(ctx.warnings()[0].line, 1);
    }
}
