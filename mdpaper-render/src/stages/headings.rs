//! Heading conversion.
//!
//! Four levels: `#` is the paper title block, `##` a section heading
//! (`<h1>`), `###` a subsection (`<h2>`), `####` a sub-subsection (`<h3>`).
//! Numbered sections derive their anchor id from the numeral; configured
//! literal titles get fixed anchors.

use crate::options::{RenderOptions, TitleRules};
use crate::pipeline::Document;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TITLE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^# (.+)$").expect("valid regex for title lines"));

static SECTION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^## (.+)$").expect("valid regex for section lines"));

static SUBSECTION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^### (.+)$").expect("valid regex for subsection lines"));

static SUBSUBSECTION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#### (.+)$").expect("valid regex for sub-subsection lines"));

static NUMBERED_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\. .+$").expect("valid regex for numbered titles"));

// Long span titles break after the 到-phrase so the title block wraps
// evenly on narrow pages.
static SPAN_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new("從(.+)到(.+)的").expect("valid regex for span titles"));

pub(crate) fn headings(doc: &mut Document, options: &RenderOptions) {
    let text = TITLE_LINE.replace_all(&doc.text, |caps: &Captures| {
        render_title(&caps[1], &options.title)
    });

    let text = SECTION_LINE.replace_all(&text, |caps: &Captures| {
        render_section(&caps[1], options)
    });

    let text = SUBSECTION_LINE.replace_all(&text, "<h2>${1}</h2>");
    let text = SUBSUBSECTION_LINE.replace_all(&text, "<h3>${1}</h3>");
    doc.text = text.into_owned();
}

/// Render the `#` paper title. Multi-segment titles (split on the
/// configured separator) break across lines, with the configured infix
/// inserted between the first segment and the rest.
fn render_title(title: &str, rules: &TitleRules) -> String {
    if !rules.separator.is_empty() && title.contains(rules.separator.as_str()) {
        if let Some(infix) = &rules.infix {
            let mut parts = title.splitn(2, rules.separator.as_str());
            let head = parts.next().unwrap_or_default();
            let rest = parts.next().unwrap_or_default();
            let rest = SPAN_BREAK.replace(rest, "從${1}到${2}的<br>");
            return format!("<div class=\"title\">{head}<br>{infix}<br>{rest}</div>");
        }
    }
    format!("<div class=\"title\">{title}</div>")
}

/// Render a `##` section heading, attaching the derived or configured
/// anchor id when one applies.
fn render_section(title: &str, options: &RenderOptions) -> String {
    if let Some(caps) = NUMBERED_TITLE.captures(title) {
        let number = &caps[1];
        return format!(
            "<h1 id=\"{}{}\">{}</h1>",
            options.numbered_anchor_prefix, number, title
        );
    }
    for section in &options.section_anchors {
        if title.starts_with(section.prefix.as_str()) {
            return format!("<h1 id=\"{}\">{}</h1>", section.anchor, title);
        }
    }
    format!("<h1>{title}</h1>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> String {
        let mut doc = Document::new(input);
        headings(&mut doc, &RenderOptions::default());
        doc.text
    }

    #[test]
    fn test_numbered_section_gets_derived_anchor() {
        assert_eq!(run("## 3. 方法"), "<h1 id=\"sec-3\">3. 方法</h1>");
    }

    #[test]
    fn test_literal_section_gets_fixed_anchor() {
        assert_eq!(run("## 參考文獻"), "<h1 id=\"sec-ref\">參考文獻</h1>");
        assert_eq!(run("## 附錄 Z：補充"), "<h1 id=\"sec-z\">附錄 Z：補充</h1>");
    }

    #[test]
    fn test_plain_section_has_no_anchor() {
        assert_eq!(run("## 摘要"), "<h1>摘要</h1>");
    }

    #[test]
    fn test_lower_levels() {
        assert_eq!(run("### 小節"), "<h2>小節</h2>");
        assert_eq!(run("#### 子標題"), "<h3>子標題</h3>");
    }

    #[test]
    fn test_plain_title_block() {
        assert_eq!(run("# 一個標題"), "<div class=\"title\">一個標題</div>");
    }

    #[test]
    fn test_segmented_title_gets_infix_and_breaks() {
        let html = run("# 樂高積木與波音747：從玩具到飛機的對話");
        assert_eq!(
            html,
            "<div class=\"title\">樂高積木與波音747<br>之跨領域整合研究：<br>\
             從玩具到飛機的<br>對話</div>"
        );
    }

    #[test]
    fn test_heading_marker_mid_line_ignored() {
        assert_eq!(run("text ## not a heading"), "text ## not a heading");
    }
}
