//! Line-anchored block rewrites: page breaks, block quotes, and lists.

use crate::options::RenderOptions;
use crate::pipeline::Document;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static HORIZONTAL_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^---$").expect("valid regex for horizontal rules"));

/// Convert `---` lines to page-break markers.
pub(crate) fn page_breaks(doc: &mut Document, _options: &RenderOptions) {
    doc.text = HORIZONTAL_RULE
        .replace_all(&doc.text, "<div class=\"page-break\"></div>")
        .into_owned();
}

static QUOTE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(?:^> .+$\n?)+").expect("valid regex for quote runs"));

/// Merge runs of consecutive `> ` lines into one blockquote, joined by
/// line breaks.
pub(crate) fn quotes(doc: &mut Document, _options: &RenderOptions) {
    doc.text = QUOTE_RUN
        .replace_all(&doc.text, |caps: &Captures| {
            let joined = caps[0]
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| line.strip_prefix("> ").unwrap_or(line))
                .collect::<Vec<_>>()
                .join("<br>");
            format!("<blockquote class=\"quote-block\">{joined}</blockquote>")
        })
        .into_owned();
}

// List conversion is two-phase: item lines are first rewritten to
// kind-tagged markers, then maximal runs of same-kind markers wrap into one
// container. Marking keeps unordered and ordered detection independent, so
// interleaved kinds end up in adjacent separate containers instead of one
// merged list. The markers use the same control character as the
// protected-block placeholders and cannot occur in legitimate input.
const UL_OPEN: &str = "\u{1A}ul\u{1A}";
const UL_CLOSE: &str = "\u{1A}/ul\u{1A}";
const OL_OPEN: &str = "\u{1A}ol\u{1A}";
const OL_CLOSE: &str = "\u{1A}/ol\u{1A}";

static UNORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^- (.+)$").expect("valid regex for unordered items"));

static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\d+\. (.+)$").expect("valid regex for ordered items"));

static UNORDERED_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "(?:{open}.*?{close}\n?)+",
        open = regex::escape(UL_OPEN),
        close = regex::escape(UL_CLOSE),
    ))
    .expect("valid regex for unordered runs")
});

static ORDERED_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "(?:{open}.*?{close}\n?)+",
        open = regex::escape(OL_OPEN),
        close = regex::escape(OL_CLOSE),
    ))
    .expect("valid regex for ordered runs")
});

/// Convert `- ` and `N. ` item lines into `<ul>`/`<ol>` containers.
pub(crate) fn lists(doc: &mut Document, _options: &RenderOptions) {
    let marked = UNORDERED_ITEM.replace_all(&doc.text, format!("{UL_OPEN}${{1}}{UL_CLOSE}"));
    let marked = ORDERED_ITEM.replace_all(&marked, format!("{OL_OPEN}${{1}}{OL_CLOSE}"));

    let wrapped = UNORDERED_RUN.replace_all(&marked, |caps: &Captures| {
        let items = caps[0].replace(UL_OPEN, "<li>").replace(UL_CLOSE, "</li>");
        format!("<ul>{items}</ul>")
    });
    let wrapped = ORDERED_RUN.replace_all(&wrapped, |caps: &Captures| {
        let items = caps[0].replace(OL_OPEN, "<li>").replace(OL_CLOSE, "</li>");
        format!("<ol>{items}</ol>")
    });

    doc.text = wrapped.into_owned();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(stage: fn(&mut Document, &RenderOptions), input: &str) -> String {
        let mut doc = Document::new(input);
        stage(&mut doc, &RenderOptions::default());
        doc.text
    }

    #[test]
    fn test_page_break_line() {
        assert_eq!(
            run(page_breaks, "a\n---\nb"),
            "a\n<div class=\"page-break\"></div>\nb"
        );
    }

    #[test]
    fn test_inline_dashes_untouched() {
        assert_eq!(run(page_breaks, "a --- b"), "a --- b");
    }

    #[test]
    fn test_quote_run_merges() {
        let html = run(quotes, "> one\n> two\n\nrest");
        assert!(html.contains("<blockquote class=\"quote-block\">one<br>two</blockquote>"));
    }

    #[test]
    fn test_separate_quote_runs_stay_separate() {
        let html = run(quotes, "> a\n\n> b\n");
        assert_eq!(html.matches("<blockquote").count(), 2);
    }

    #[test]
    fn test_unordered_list_wraps_run() {
        let html = run(lists, "- one\n- two\n");
        assert_eq!(html, "<ul><li>one</li>\n<li>two</li>\n</ul>");
    }

    #[test]
    fn test_ordered_list_wraps_run() {
        let html = run(lists, "1. first\n2. second\n");
        assert_eq!(html, "<ol><li>first</li>\n<li>second</li>\n</ol>");
    }

    #[test]
    fn test_adjacent_mixed_list_kinds_stay_separate() {
        let html = run(lists, "- a\n1. b\n- c\n");
        assert_eq!(html.matches("<ul>").count(), 2);
        assert_eq!(html.matches("<ol>").count(), 1);
        assert!(html.find("<ul>").expect("ul present") < html.find("<ol>").expect("ol present"));
    }

    #[test]
    fn test_blank_line_splits_lists() {
        let html = run(lists, "- a\n\n- b\n");
        assert_eq!(html.matches("<ul>").count(), 2);
    }
}
