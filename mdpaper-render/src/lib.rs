//! Markdown-dialect-to-HTML rendering for the mdpaper toolchain
//!
//!     This crate turns a paper written in the mdpaper Markdown dialect into
//!     an HTML fragment ready for injection into a container element. It is
//!     a pure library: no I/O, no shell assumptions, one blocking call per
//!     document. The mdpaper binary in this workspace is a thin file-in /
//!     file-out shell around it.
//!
//! Architecture
//!
//!     There is no AST. The document is a single mutable text buffer pushed
//!     through a fixed, ordered list of rewrite stages (see
//!     ./pipeline.rs); each stage is a pure text-to-text function and the
//!     order itself is part of the contract. Verbatim regions are shielded
//!     from later stages by an arena of indexed placeholders carried on the
//!     document value.
//!
//!     The file structure:
//!     .
//!     ├── lib.rs
//!     ├── options.rs              # Dialect configuration (literals, chat users)
//!     ├── pipeline.rs             # Document, Stage, STAGES, render entry points
//!     └── stages                  # One rewrite concern per module
//!         ├── comments.rs
//!         ├── code.rs
//!         ├── table.rs
//!         ├── image.rs
//!         ├── blocks.rs           # page breaks, quotes, lists
//!         ├── chat.rs
//!         ├── toc.rs
//!         ├── headings.rs
//!         ├── protect.rs          # placeholder arena
//!         ├── inline.rs
//!         ├── paragraphs.rs
//!         └── post.rs             # abstract / subtitle / references fixups
//!
//! Error Philosophy
//!
//!     A local syntax mismatch never fails the document. Stages are total:
//!     a table without its separator line, a chat line outside the message
//!     grammar, or an unknown chat user id all degrade (pass through, skip,
//!     or default rendering) instead of erroring. The render entry points
//!     are therefore infallible; only the shell around the library deals in
//!     I/O errors.

pub mod options;
pub mod pipeline;
mod stages;

pub use options::{ChatDirectory, ChatUser, RenderOptions, SectionAnchor, TitleRules};
pub use pipeline::{render, render_until, render_with_options, stage_names, Document, Stage, STAGES};
