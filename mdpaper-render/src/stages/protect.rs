//! Verbatim block protection.
//!
//! `<pre>` regions are replaced by index-keyed placeholder tokens and
//! stored in the document's arena, shielding them from the inline and
//! paragraph stages. Restoration is a single deterministic sweep in
//! insertion order. The token is built around U+001A (SUBSTITUTE), which
//! cannot occur in legitimate document text, so it never collides with
//! real content.

use crate::options::RenderOptions;
use crate::pipeline::Document;
use once_cell::sync::Lazy;
use regex::Regex;

/// First character of every placeholder token; the paragraph assembler
/// treats lines starting with it as block-level.
pub(crate) const PLACEHOLDER_CHAR: char = '\u{1A}';

static PRE_REGION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<pre.*?</pre>").expect("valid regex for pre regions"));

fn placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_CHAR}pre:{index}{PLACEHOLDER_CHAR}")
}

/// Shelve every `<pre>…</pre>` region behind an indexed placeholder.
pub(crate) fn protect(doc: &mut Document, _options: &RenderOptions) {
    let Document { text, protected } = doc;
    *text = PRE_REGION
        .replace_all(text, |caps: &regex::Captures| {
            let token = placeholder(protected.len());
            protected.push(caps[0].to_string());
            token
        })
        .into_owned();
}

/// Restore shelved regions by index. Each token is replaced exactly once;
/// the arena is emptied so nothing leaks into a later render.
pub(crate) fn restore(doc: &mut Document, _options: &RenderOptions) {
    let Document { text, protected } = doc;
    for (index, block) in protected.iter().enumerate() {
        *text = text.replacen(placeholder(index).as_str(), block, 1);
    }
    protected.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protect_then_restore_round_trips() {
        let options = RenderOptions::default();
        let mut doc = Document::new("before\n<pre><code>a &lt; b</code></pre>\nafter");
        protect(&mut doc, &options);
        assert!(!doc.text.contains("<pre"));
        assert!(doc.text.contains(PLACEHOLDER_CHAR));
        restore(&mut doc, &options);
        assert_eq!(doc.text, "before\n<pre><code>a &lt; b</code></pre>\nafter");
        assert!(doc.protected.is_empty());
    }

    #[test]
    fn test_placeholders_are_indexed_in_order() {
        let options = RenderOptions::default();
        let mut doc = Document::new("<pre>one</pre>\nmiddle\n<pre>two</pre>");
        protect(&mut doc, &options);
        assert_eq!(doc.protected, vec!["<pre>one</pre>", "<pre>two</pre>"]);
        assert!(doc.text.contains(&placeholder(0)));
        assert!(doc.text.contains(&placeholder(1)));
    }

    #[test]
    fn test_restore_is_order_independent_of_surroundings() {
        let options = RenderOptions::default();
        let mut doc = Document::new("<pre>x</pre> and <pre>y</pre>");
        protect(&mut doc, &options);
        doc.text = format!("wrapped: {}", doc.text);
        restore(&mut doc, &options);
        assert_eq!(doc.text, "wrapped: <pre>x</pre> and <pre>y</pre>");
    }

    #[test]
    fn test_no_pre_regions_is_noop() {
        let options = RenderOptions::default();
        let mut doc = Document::new("plain text");
        protect(&mut doc, &options);
        assert_eq!(doc.text, "plain text");
        assert!(doc.protected.is_empty());
    }
}
