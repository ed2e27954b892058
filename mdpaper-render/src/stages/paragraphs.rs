//! Paragraph assembly.
//!
//! A line-by-line scan with an accumulator of pending plain-text lines. A
//! blank line or a block-level line (one starting with a tag or a
//! protected-block placeholder) flushes the accumulator; end of input
//! forces the final flush. Flushed text that does not itself look like
//! markup is wrapped in `<p>`; block-level lines pass through untouched.

use crate::options::RenderOptions;
use crate::pipeline::Document;
use crate::stages::protect::PLACEHOLDER_CHAR;
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) fn assemble(doc: &mut Document, _options: &RenderOptions) {
    let rebuilt = {
        let mut out: Vec<String> = Vec::new();
        let mut pending: Vec<&str> = Vec::new();

        for raw in doc.text.lines() {
            let line = raw.trim();
            if line.is_empty() {
                flush(&mut out, &mut pending);
            } else if is_block_line(line) {
                flush(&mut out, &mut pending);
                out.push(line.to_string());
            } else {
                pending.push(line);
            }
        }
        flush(&mut out, &mut pending);

        out.join("\n")
    };
    doc.text = rebuilt;
}

fn is_block_line(line: &str) -> bool {
    line.starts_with('<') || line.starts_with(PLACEHOLDER_CHAR)
}

/// Emit the accumulated lines as one paragraph, single-space joined.
fn flush(out: &mut Vec<String>, pending: &mut Vec<&str>) {
    if pending.is_empty() {
        return;
    }
    let content = pending.join(" ");
    if is_block_line(&content) {
        out.push(content);
    } else {
        out.push(format!("<p>{content}</p>"));
    }
    pending.clear();
}

static EMPTY_PARAGRAPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<p>\s*</p>").expect("valid regex for empty paragraphs"));

/// Drop `<p></p>` artifacts left behind by earlier rewrites.
pub(crate) fn strip_empty(doc: &mut Document, _options: &RenderOptions) {
    doc.text = EMPTY_PARAGRAPH.replace_all(&doc.text, "").into_owned();
}
