//! Post-pass fixups on the assembled HTML: abstract wrapping, subtitle
//! promotion, and references reformatting.
//!
//! All three locate configured literal titles in the finished fragment.
//! The matchers tolerate the `id` attributes the heading stage attaches,
//! so an anchored `<h1 id="sec-ref">` still counts as the references
//! heading. A missing section, boundary, or marker is a no-op.

use crate::options::RenderOptions;
use crate::pipeline::Document;
use once_cell::sync::Lazy;
use regex::Regex;

/// Wrap the abstract section (heading through the next heading or page
/// break) in the abstract container, replacing the heading with the
/// configured label line.
pub(crate) fn wrap_abstract(doc: &mut Document, options: &RenderOptions) {
    let pattern = format!(
        r"(?s)<h1[^>]*>{}.*?</h1>",
        regex::escape(&options.abstract_heading)
    );
    let Ok(heading_re) = Regex::new(&pattern) else {
        return;
    };
    let Some(heading) = heading_re.find(&doc.text) else {
        return;
    };

    let start = heading.start();
    let content_start = heading.end();
    let rest = &doc.text[content_start..];
    // Without a terminating section the abstract has no extent; leave the
    // document alone.
    let Some(offset) = ["<h1", "<div class=\"page-break\">"]
        .iter()
        .filter_map(|boundary| rest.find(*boundary))
        .min()
    else {
        return;
    };

    let content = &rest[..offset];
    let wrapped = format!(
        "\n<div class=\"abstract\">\n<div class=\"abstract-title\">{}</div>\n{}\n</div>\n",
        options.abstract_label,
        content.trim_matches('\n'),
    );
    let end = content_start + offset;
    doc.text.replace_range(start..end, &wrapped);
}

/// Promote the first paragraph after the title block that carries the
/// subtitle marker into a subtitle div, breaking sentences onto their own
/// lines.
pub(crate) fn promote_subtitle(doc: &mut Document, options: &RenderOptions) {
    let Some(title_end) = doc.text.find("</div>") else {
        return;
    };
    let after = title_end + "</div>".len();

    let pattern = format!(
        r"^\s*<p>([^<]*{}[^<]*)</p>",
        regex::escape(&options.subtitle_marker)
    );
    let Ok(subtitle_re) = Regex::new(&pattern) else {
        return;
    };

    let rest = &doc.text[after..];
    let Some(caps) = subtitle_re.captures(rest) else {
        return;
    };
    let Some(full) = caps.get(0) else {
        return;
    };

    let start = after + full.start();
    let end = after + full.end();
    let subtitle = format!(
        "<div class=\"subtitle\">{}</div>",
        caps[1].replace(". ", ".<br>")
    );
    doc.text.replace_range(start..end, &subtitle);
}

static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<li>(.+?)</li>").expect("valid regex for list items"));

/// Reformat everything after the references heading: list items become
/// reference entries, the list containers disappear.
pub(crate) fn format_references(doc: &mut Document, options: &RenderOptions) {
    let pattern = format!(
        r"<h1[^>]*>{}[^<]*</h1>",
        regex::escape(&options.references_heading)
    );
    let Ok(heading_re) = Regex::new(&pattern) else {
        return;
    };
    let Some(heading) = heading_re.find(&doc.text) else {
        return;
    };

    let tail_start = heading.end();
    let formatted = {
        let tail = &doc.text[tail_start..];
        LIST_ITEM
            .replace_all(tail, "<div class=\"reference\">${1}</div>")
            .replace("<ul>", "")
            .replace("</ul>", "")
    };
    doc.text.truncate(tail_start);
    doc.text.push_str(&formatted);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn test_abstract_wrapped_up_to_page_break() {
        let mut doc = Document::new(
            "<h1>摘要</h1>\n<p>first</p>\n<p>second</p>\n<div class=\"page-break\"></div>\n<h1 id=\"sec-1\">1. 序</h1>",
        );
        wrap_abstract(&mut doc, &options());
        assert!(doc.text.contains("<div class=\"abstract\">"));
        assert!(doc.text.contains("<div class=\"abstract-title\">摘要 ABSTRACT</div>"));
        assert!(doc.text.contains("<p>first</p>\n<p>second</p>"));
        // The original heading is gone; the following section stays.
        assert!(!doc.text.contains("<h1>摘要</h1>"));
        assert!(doc.text.contains("<h1 id=\"sec-1\">"));
    }

    #[test]
    fn test_abstract_without_boundary_is_left_alone() {
        let input = "<h1>摘要</h1>\n<p>dangling</p>";
        let mut doc = Document::new(input);
        wrap_abstract(&mut doc, &options());
        assert_eq!(doc.text, input);
    }

    #[test]
    fn test_abstract_terminated_by_anchored_heading() {
        let mut doc = Document::new("<h1>摘要</h1>\n<p>body</p>\n<h1 id=\"sec-1\">1. 序</h1>");
        wrap_abstract(&mut doc, &options());
        assert!(doc.text.contains("<div class=\"abstract\">"));
        assert!(doc.text.contains("<h1 id=\"sec-1\">1. 序</h1>"));
    }

    #[test]
    fn test_no_abstract_is_noop() {
        let input = "<p>nothing here</p>";
        let mut doc = Document::new(input);
        wrap_abstract(&mut doc, &options());
        assert_eq!(doc.text, input);
    }

    #[test]
    fn test_subtitle_promoted_and_sentence_broken() {
        let mut doc = Document::new(
            "<div class=\"title\">T</div>\n<p>A Hyper-Interdisciplinary Study. Volume one.</p>",
        );
        promote_subtitle(&mut doc, &options());
        assert!(doc.text.contains(
            "<div class=\"subtitle\">A Hyper-Interdisciplinary Study.<br>Volume one.</div>"
        ));
        assert!(!doc.text.contains("<p>A Hyper-Interdisciplinary"));
    }

    #[test]
    fn test_subtitle_requires_marker() {
        let input = "<div class=\"title\">T</div>\n<p>An ordinary opening paragraph.</p>";
        let mut doc = Document::new(input);
        promote_subtitle(&mut doc, &options());
        assert_eq!(doc.text, input);
    }

    #[test]
    fn test_subtitle_only_directly_after_title() {
        let input = "<div class=\"title\">T</div>\n<p>gap</p>\n<p>A Hyper-Interdisciplinary x</p>";
        let mut doc = Document::new(input);
        promote_subtitle(&mut doc, &options());
        assert_eq!(doc.text, input);
    }

    #[test]
    fn test_references_items_become_divs() {
        let mut doc = Document::new(
            "<p>body</p>\n<h1 id=\"sec-ref\">參考文獻</h1>\n<ul><li>Item A</li>\n<li>Item B</li>\n</ul>",
        );
        format_references(&mut doc, &options());
        assert!(doc.text.contains("<div class=\"reference\">Item A</div>"));
        assert!(doc.text.contains("<div class=\"reference\">Item B</div>"));
        assert!(!doc.text.contains("<ul>"));
        assert!(!doc.text.contains("<li>"));
        // Content before the references heading is untouched.
        assert!(doc.text.starts_with("<p>body</p>"));
    }

    #[test]
    fn test_lists_before_references_untouched() {
        let mut doc = Document::new(
            "<ul><li>keep</li></ul>\n<h1 id=\"sec-ref\">參考文獻</h1>\n<ul><li>ref</li></ul>",
        );
        format_references(&mut doc, &options());
        assert!(doc.text.starts_with("<ul><li>keep</li></ul>"));
        assert!(doc.text.contains("<div class=\"reference\">ref</div>"));
    }

    #[test]
    fn test_no_references_heading_is_noop() {
        let input = "<ul><li>just a list</li></ul>";
        let mut doc = Document::new(input);
        format_references(&mut doc, &options());
        assert_eq!(doc.text, input);
    }
}
