//! Inline rewrites: code spans, equation blocks, and the emphasis marks.
//!
//! The marks resolve in a fixed precedence order, most-nested pattern
//! first: the two combined highlight/roast forms, then plain roast, plain
//! highlight, bold, and finally the single-emphasis sarcasm span. Bold must
//! resolve before single-emphasis or `*` greedily mis-matches `**` text.
//! Every rule is a single non-recursive left-to-right pass; malformed or
//! unterminated markers stay literal text.

use crate::options::RenderOptions;
use crate::pipeline::Document;
use once_cell::sync::Lazy;
use regex::Regex;

static CODE_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid regex for code spans"));

/// `` `code` `` → inline code span. Runs after `protect-pre`, so backticks
/// inside fenced blocks are never touched.
pub(crate) fn inline_code(doc: &mut Document, _options: &RenderOptions) {
    doc.text = CODE_SPAN
        .replace_all(&doc.text, "<code class=\"inline-code\">${1}</code>")
        .into_owned();
}

static EQUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\$([^$]+)\$\$").expect("valid regex for equations"));

/// `$$…$$` → equation block.
pub(crate) fn equations(doc: &mut Document, _options: &RenderOptions) {
    doc.text = EQUATION
        .replace_all(&doc.text, "<div class=\"equation\">${1}</div>")
        .into_owned();
}

static HIGHLIGHT_OVER_ROAST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"==~~([^~]+)~~\{([^}]+)\}==").expect("valid regex for highlight-over-roast")
});

static ROAST_OVER_HIGHLIGHT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"~~==([^=]+)==~~\{([^}]+)\}").expect("valid regex for roast-over-highlight")
});

static ROAST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"~~([^~]+)~~\{([^}]+)\}").expect("valid regex for roast marks"));

static HIGHLIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"==([^=]+)==").expect("valid regex for highlight marks"));

// Non-greedy rather than [^*]+ so `**a*b*c**` resolves the outer bold
// first, leaving the inner single-emphasis to the sarcasm rule.
static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex for bold marks"));

static SARCASM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*]+)\*").expect("valid regex for sarcasm marks"));

pub(crate) fn marks(doc: &mut Document, _options: &RenderOptions) {
    let text = HIGHLIGHT_OVER_ROAST.replace_all(
        &doc.text,
        "<span class=\"joke-highlight\"><span class=\"roast-text\" data-roast=\"${2}\">${1}</span></span>",
    );
    let text = ROAST_OVER_HIGHLIGHT.replace_all(
        &text,
        "<span class=\"roast-text\" data-roast=\"${2}\"><span class=\"joke-highlight\">${1}</span></span>",
    );
    let text = ROAST.replace_all(&text, "<span class=\"roast-text\" data-roast=\"${2}\">${1}</span>");
    let text = HIGHLIGHT.replace_all(&text, "<span class=\"joke-highlight\">${1}</span>");
    let text = BOLD.replace_all(&text, "<b>${1}</b>");
    let text = SARCASM.replace_all(&text, "<span class=\"sarcasm\">${1}</span>");
    doc.text = text.into_owned();
}
