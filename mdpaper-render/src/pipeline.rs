//! The ordered transform pipeline.
//!
//! The renderer is a fixed sequence of rewrite stages applied to a mutable
//! text buffer. The order is part of the contract, not an optimization:
//! code fences must convert before any inline rule can run, `<pre>` regions
//! must be shelved before inline marks and paragraph assembly, bold must
//! resolve before single-emphasis, and the post-pass fixups only make sense
//! on finished HTML. [`STAGES`] is that sequence as data, so it can be
//! documented, tested, and cut short for inspection ([`render_until`]).

use crate::options::RenderOptions;
use crate::stages;

/// The document being transformed.
///
/// Holds the text buffer plus the arena of protected verbatim blocks.
/// Blocks are keyed by insertion index; the buffer carries only index
/// placeholders between the protect and restore stages. Every placeholder
/// inserted during one render call is restored before the call returns.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub(crate) protected: Vec<String>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Document {
            text: text.into(),
            protected: Vec::new(),
        }
    }
}

/// One named rewrite step.
#[derive(Clone, Copy)]
pub struct Stage {
    name: &'static str,
    run: fn(&mut Document, &RenderOptions),
}

impl Stage {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn run(&self, doc: &mut Document, options: &RenderOptions) {
        (self.run)(doc, options);
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage").field("name", &self.name).finish()
    }
}

/// The pipeline, in execution order.
pub const STAGES: &[Stage] = &[
    Stage {
        name: "strip-comments",
        run: stages::comments::strip,
    },
    Stage {
        name: "code-blocks",
        run: stages::code::fences,
    },
    Stage {
        name: "tables",
        run: stages::table::tables,
    },
    Stage {
        name: "images",
        run: stages::image::images,
    },
    Stage {
        name: "page-breaks",
        run: stages::blocks::page_breaks,
    },
    Stage {
        name: "chat-blocks",
        run: stages::chat::chat_blocks,
    },
    Stage {
        name: "toc-blocks",
        run: stages::toc::toc_blocks,
    },
    Stage {
        name: "headings",
        run: stages::headings::headings,
    },
    Stage {
        name: "quotes",
        run: stages::blocks::quotes,
    },
    Stage {
        name: "lists",
        run: stages::blocks::lists,
    },
    Stage {
        name: "protect-pre",
        run: stages::protect::protect,
    },
    Stage {
        name: "inline-code",
        run: stages::inline::inline_code,
    },
    Stage {
        name: "equations",
        run: stages::inline::equations,
    },
    Stage {
        name: "inline-marks",
        run: stages::inline::marks,
    },
    Stage {
        name: "paragraphs",
        run: stages::paragraphs::assemble,
    },
    Stage {
        name: "restore-pre",
        run: stages::protect::restore,
    },
    Stage {
        name: "strip-empty",
        run: stages::paragraphs::strip_empty,
    },
    Stage {
        name: "abstract",
        run: stages::post::wrap_abstract,
    },
    Stage {
        name: "subtitle",
        run: stages::post::promote_subtitle,
    },
    Stage {
        name: "references",
        run: stages::post::format_references,
    },
];

/// Names of all pipeline stages, in execution order.
pub fn stage_names() -> impl Iterator<Item = &'static str> {
    STAGES.iter().map(|stage| stage.name)
}

/// Render a document with the default dialect options.
pub fn render(source: &str) -> String {
    render_with_options(source, &RenderOptions::default())
}

/// Render a document with explicit dialect options.
///
/// Pure and total: stages never fail, a pattern that matches nothing is a
/// no-op, and the output is an HTML fragment meant for injection into a
/// container element.
pub fn render_with_options(source: &str, options: &RenderOptions) -> String {
    let mut doc = Document::new(source);
    for stage in STAGES {
        stage.run(&mut doc, options);
    }
    doc.text
}

/// Run the pipeline prefix ending at the named stage (inclusive) and return
/// the intermediate document text.
///
/// Returns `None` for an unknown stage name. Note that a prefix cut between
/// `protect-pre` and `restore-pre` legitimately contains placeholder tokens.
pub fn render_until(source: &str, options: &RenderOptions, stage_name: &str) -> Option<String> {
    if !STAGES.iter().any(|stage| stage.name == stage_name) {
        return None;
    }
    let mut doc = Document::new(source);
    for stage in STAGES {
        stage.run(&mut doc, options);
        if stage.name == stage_name {
            break;
        }
    }
    Some(doc.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names_are_unique() {
        let mut names: Vec<_> = stage_names().collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), STAGES.len());
    }

    #[test]
    fn test_stage_order_contract() {
        let names: Vec<_> = stage_names().collect();
        let position = |name: &str| {
            names
                .iter()
                .position(|n| *n == name)
                .unwrap_or_else(|| panic!("missing stage {name}"))
        };

        // Code fences convert before everything that rewrites inline text.
        assert!(position("code-blocks") < position("inline-marks"));
        // Shelving happens after fence conversion, before inline and
        // paragraph stages.
        assert!(position("code-blocks") < position("protect-pre"));
        assert!(position("protect-pre") < position("inline-code"));
        assert!(position("protect-pre") < position("inline-marks"));
        assert!(position("protect-pre") < position("paragraphs"));
        assert!(position("paragraphs") < position("restore-pre"));
    }

    #[test]
    fn test_render_until_unknown_stage() {
        assert!(render_until("text", &RenderOptions::default(), "no-such-stage").is_none());
    }

    #[test]
    fn test_render_until_keeps_placeholders_before_restore() {
        let source = "```\ncode\n```\n";
        let html = render_until(source, &RenderOptions::default(), "paragraphs")
            .expect("known stage");
        assert!(html.contains('\u{1A}'));
        assert!(!html.contains("<pre"));
    }

    #[test]
    fn test_plain_paragraph_round_trip() {
        let html = render("Just a line of text.\nAnd another.\n");
        assert_eq!(html, "<p>Just a line of text. And another.</p>");
    }
}
