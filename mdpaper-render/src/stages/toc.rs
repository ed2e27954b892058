//! Table-of-contents blocks.
//!
//! ```text
//! :::toc{title="..."}
//! - [Chapter](#anchor)
//!   - [Sub-item](#anchor)
//! :::
//! ```
//!
//! Entries fold through a chapter accumulator: sub-items attach to the
//! nearest preceding chapter, each new chapter flushes the previous one,
//! and the final chapter flushes at end of input. A chapter without
//! sub-items renders as a flat link; with sub-items it becomes an
//! expandable group. Sub-items before any chapter have no parent and are
//! dropped.

use crate::options::RenderOptions;
use crate::pipeline::Document;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TOC_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s):::toc\{title="([^"]+)"\}\n(.*?):::"#).expect("valid regex for toc blocks")
});

static SUB_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s+- \[([^\]]+)\]\(#([^)]+)\)$").expect("valid regex for toc sub-entries")
});

static MAIN_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^- \[([^\]]+)\]\(#([^)]+)\)$").expect("valid regex for toc entries")
});

pub(crate) fn toc_blocks(doc: &mut Document, _options: &RenderOptions) {
    doc.text = TOC_BLOCK
        .replace_all(&doc.text, |caps: &Captures| render_block(&caps[1], &caps[2]))
        .into_owned();
}

fn render_block(title: &str, content: &str) -> String {
    let mut html = format!(
        "<details class=\"toc-details\" open><summary>{title}</summary><nav class=\"toc-nav\">"
    );

    let mut chapters = ChapterAccumulator::default();
    for line in content.trim().lines() {
        if let Some(caps) = SUB_ENTRY.captures(line) {
            chapters.push_sub(TocEntry::from_captures(&caps));
        } else if let Some(caps) = MAIN_ENTRY.captures(line) {
            chapters.start_chapter(&mut html, TocEntry::from_captures(&caps));
        }
    }
    chapters.flush(&mut html);

    html.push_str("</nav></details>");
    html
}

#[derive(Debug, Clone, PartialEq)]
struct TocEntry {
    label: String,
    anchor: String,
}

impl TocEntry {
    fn from_captures(caps: &Captures) -> Self {
        TocEntry {
            label: caps[1].to_string(),
            anchor: caps[2].to_string(),
        }
    }
}

/// Fold state for grouping sub-items under the nearest preceding chapter.
#[derive(Debug, Default)]
struct ChapterAccumulator {
    current: Option<TocEntry>,
    pending_subs: Vec<TocEntry>,
}

impl ChapterAccumulator {
    /// Record a sub-item for the current chapter. Without a current
    /// chapter the item has no parent and is discarded on the next flush.
    fn push_sub(&mut self, entry: TocEntry) {
        self.pending_subs.push(entry);
    }

    /// Flush the previous chapter and make `entry` current.
    fn start_chapter(&mut self, out: &mut String, entry: TocEntry) {
        self.flush(out);
        self.current = Some(entry);
    }

    /// Emit the current chapter: flat link without sub-items, expandable
    /// group with them. Orphan sub-items (no current chapter) are dropped.
    fn flush(&mut self, out: &mut String) {
        if let Some(chapter) = self.current.take() {
            if self.pending_subs.is_empty() {
                out.push_str(&format!(
                    "<a class=\"toc-link toc-main\" href=\"#{}\">{}</a>",
                    chapter.anchor, chapter.label
                ));
            } else {
                out.push_str("<div class=\"toc-chapter\"><div class=\"toc-chapter-header\">");
                out.push_str(&format!(
                    "<a class=\"toc-link toc-main\" href=\"#{}\">{}</a>",
                    chapter.anchor, chapter.label
                ));
                out.push_str("<button class=\"toc-toggle\" aria-label=\"展開子項目\">▼</button>");
                out.push_str("</div><div class=\"toc-subitems\">");
                for sub in &self.pending_subs {
                    out.push_str(&format!(
                        "<a class=\"toc-link toc-sub\" href=\"#{}\">{}</a>",
                        sub.anchor, sub.label
                    ));
                }
                out.push_str("</div></div>");
            }
        }
        self.pending_subs.clear();
    }
}
