//! Image directives.
//!
//! `![alt](url)` with an optional trailing `{...}` option block. The three
//! forms are tried most-specific first: `{w=N}` fixes a pixel width,
//! `{text}` adds a caption, and the bare form emits just the figure. At
//! most one option form applies per directive.

use crate::options::RenderOptions;
use crate::pipeline::Document;
use once_cell::sync::Lazy;
use regex::Regex;

static WIDTH_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)\{w=(\d+)\}").expect("valid regex for sized images")
});

static CAPTION_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)\{([^}]+)\}").expect("valid regex for captioned images")
});

static BARE_FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("valid regex for images"));

pub(crate) fn images(doc: &mut Document, _options: &RenderOptions) {
    let text = WIDTH_FORM.replace_all(
        &doc.text,
        "<figure class=\"md-figure\">\
         <img src=\"${2}\" alt=\"${1}\" style=\"width: ${3}px; max-width: 100%;\"></figure>",
    );
    let text = CAPTION_FORM.replace_all(
        &text,
        "<figure class=\"md-figure\"><img src=\"${2}\" alt=\"${1}\">\
         <figcaption>${3}</figcaption></figure>",
    );
    let text = BARE_FORM.replace_all(
        &text,
        "<figure class=\"md-figure\"><img src=\"${2}\" alt=\"${1}\"></figure>",
    );
    doc.text = text.into_owned();
}
