//! Comment stripping.

use crate::options::RenderOptions;
use crate::pipeline::Document;
use once_cell::sync::Lazy;
use regex::Regex;

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex for HTML comments"));

/// Remove HTML-style comments, including multi-line ones.
pub(crate) fn strip(doc: &mut Document, _options: &RenderOptions) {
    doc.text = COMMENT.replace_all(&doc.text, "").into_owned();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> String {
        let mut doc = Document::new(input);
        strip(&mut doc, &RenderOptions::default());
        doc.text
    }

    #[test]
    fn test_strips_single_line_comment() {
        assert_eq!(run("a <!-- hidden --> b"), "a  b");
    }

    #[test]
    fn test_strips_multi_line_comment() {
        assert_eq!(run("a\n<!-- one\ntwo -->\nb"), "a\n\nb");
    }

    #[test]
    fn test_unterminated_comment_is_left_alone() {
        assert_eq!(run("a <!-- open"), "a <!-- open");
    }
}
