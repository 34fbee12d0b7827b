//! The recognizers consulted by the dispatch loop, in priority order.

use super::latex::{rewrite_block, rewrite_command, Wrap};
use super::ScanContext;
use crate::utils::error::WarningKind;

/// Something that may claim the input starting at the cursor.
///
/// `attempt` returns `true` if it consumed input and emitted the matching
/// output. A recognizer returning `false` must leave the cursor and the
/// output untouched; it may still update mode state (see
/// [`InlineMathToggle`]).
pub trait Recognizer {
    fn name(&self) -> &'static str;
    fn attempt(&self, ctx: &mut ScanContext) -> bool;
}

/// Priority order of the dispatch loop. HTML comments and CDATA go first so
/// nothing inside them is reinterpreted; the inline-math toggle precedes the
/// LaTeX recognizer so it can both claim `\$` and switch LaTeX detection off.
pub const DEFAULT_RECOGNIZERS: &[&dyn Recognizer] =
    &[&HtmlComment, &Cdata, &InlineMathToggle, &Latex];

/// `<!-- ... -->` is copied verbatim, content included.
pub struct HtmlComment;

impl Recognizer for HtmlComment {
    fn name(&self) -> &'static str {
        "html-comment"
    }

    fn attempt(&self, ctx: &mut ScanContext) -> bool {
        if ctx.current() != Some('<') || !ctx.lookahead_is("!--") {
            return false;
        }

        let start = ctx.cursor();
        while !ctx.at_eof() && !ctx.starts_with("-->") {
            ctx.copy_current();
        }

        if ctx.at_eof() {
            ctx.warn(
                WarningKind::UnterminatedComment,
                "HTML comment runs to end of input",
                start,
            );
        } else {
            ctx.emit("-->");
            ctx.advance(3);
        }

        ctx.report_mut().html_comments += 1;
        true
    }
}

/// `<![CDATA[ ... ]]>` is consumed and dropped from the output.
pub struct Cdata;

impl Recognizer for Cdata {
    fn name(&self) -> &'static str {
        "cdata"
    }

    fn attempt(&self, ctx: &mut ScanContext) -> bool {
        if ctx.current() != Some('<') || !ctx.lookahead_is("![CDATA[") {
            return false;
        }

        let start = ctx.cursor();
        while !ctx.at_eof() && !ctx.starts_with("]]>") {
            ctx.skip_current();
        }

        if ctx.at_eof() {
            ctx.warn(
                WarningKind::UnterminatedCdata,
                "CDATA section runs to end of input",
                start,
            );
        } else {
            ctx.advance(3);
        }

        ctx.report_mut().cdata_sections += 1;
        true
    }
}

/// Tracks whether the cursor is inside a `$...$` span.
///
/// A `$` opens math when it has whitespace (or the start of input) on the
/// outside and a non-space on the inside; it closes math when followed by
/// whitespace. The `$` itself is never consumed here. Only the escape `\$`
/// is claimed, whatever the current mode.
pub struct InlineMathToggle;

impl Recognizer for InlineMathToggle {
    fn name(&self) -> &'static str {
        "inline-math"
    }

    fn attempt(&self, ctx: &mut ScanContext) -> bool {
        if ctx.current() == Some('\\') && ctx.peek(1) == Some('$') {
            ctx.emit("\\$");
            ctx.advance(2);
            ctx.report_mut().escaped_dollars += 1;
            return true;
        }

        if ctx.current() != Some('$') {
            return false;
        }

        let outside_open = ctx.prev().map_or(true, char::is_whitespace);
        let next = ctx.peek(1);

        if !ctx.in_inline_math() && outside_open && next.is_some_and(|c| !c.is_whitespace()) {
            ctx.set_inline_math(true);
            ctx.report_mut().inline_math_spans += 1;
            log::trace!("inline math opened at {}", ctx.cursor());
        } else if ctx.in_inline_math() && next.is_some_and(char::is_whitespace) {
            ctx.set_inline_math(false);
            log::trace!("inline math closed at {}", ctx.cursor());
        }

        false
    }
}

/// A backslash outside inline math starts a LaTeX command or block.
///
/// `\\` is claimed as a pair and copied as is, so the second backslash never
/// starts a command. A lone backslash at the very end is left to the
/// verbatim fallback.
pub struct Latex;

impl Recognizer for Latex {
    fn name(&self) -> &'static str {
        "latex"
    }

    fn attempt(&self, ctx: &mut ScanContext) -> bool {
        if ctx.in_inline_math() || ctx.current() != Some('\\') {
            return false;
        }

        match ctx.peek(1) {
            None => return false,
            Some('\\') => {
                ctx.emit("\\\\");
                ctx.advance(2);
                ctx.report_mut().double_backslashes += 1;
                return true;
            }
            Some(_) => {}
        }

        if ctx.lookahead_is("begin") {
            rewrite_block(ctx);
        } else {
            rewrite_command(ctx, Wrap::Comment);
        }
        true
    }
}
