//! Fenced code block conversion.
//!
//! Runs before every inline rule so code content is never mistaken for
//! markup. Escaping happens exactly once per render: the converted block is
//! shelved by the protect stage before any later rewrite can see it again.

use crate::options::RenderOptions;
use crate::pipeline::Document;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(\w*)\n(.*?)```").expect("valid regex for code fences"));

/// Convert ```` ```lang ```` fences to `<pre><code>` blocks.
pub(crate) fn fences(doc: &mut Document, _options: &RenderOptions) {
    doc.text = FENCE
        .replace_all(&doc.text, |caps: &Captures| {
            let lang = &caps[1];
            let escaped = escape_code(&caps[2]);
            let escaped = escaped.trim_end();
            let class = if lang.is_empty() {
                "code-block".to_string()
            } else {
                format!("code-block language-{lang}")
            };
            format!("<pre class=\"{class}\"><code>{escaped}</code></pre>")
        })
        .into_owned();
}

/// Escape the characters that would otherwise read as markup inside `<pre>`.
fn escape_code(code: &str) -> String {
    code.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> String {
        let mut doc = Document::new(input);
        fences(&mut doc, &RenderOptions::default());
        doc.text
    }

    #[test]
    fn test_plain_fence() {
        let html = run("```\nlet x = 1;\n```");
        assert_eq!(html, "<pre class=\"code-block\"><code>let x = 1;</code></pre>");
    }

    #[test]
    fn test_language_tag_becomes_class() {
        let html = run("```rust\nfn main() {}\n```");
        assert!(html.starts_with("<pre class=\"code-block language-rust\">"));
    }

    #[test]
    fn test_escapes_each_character_once() {
        let html = run("```\na < b && c > d\n```");
        assert!(html.contains("a &lt; b &amp;&amp; c &gt; d"));
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        let html = run("```\ncode\n\n\n```");
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn test_unterminated_fence_left_alone() {
        let input = "```\nno closing fence";
        assert_eq!(run(input), input);
    }
}
