//! Chat transcript blocks.
//!
//! ```text
//! :::chat{title="..."}
//! @meta preamble line
//! @userId[time] message text
//! @userId[time]! highlighted message
//! :::
//! ```
//!
//! Leading `@meta` lines form the transcript header. Message authors are
//! resolved through the user directory; unknown ids render with the raw id
//! and the default gradient rather than failing. Lines matching neither
//! grammar are skipped. Output preserves input line order.

use crate::options::{ChatDirectory, RenderOptions};
use crate::pipeline::Document;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CHAT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s):::chat\{title="([^"]+)"\}\n(.*?):::"#).expect("valid regex for chat blocks")
});

static MESSAGE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@(\w+)\[([^\]]+)\](!?)\s*(.*)$").expect("valid regex for chat messages")
});

pub(crate) fn chat_blocks(doc: &mut Document, options: &RenderOptions) {
    doc.text = CHAT_BLOCK
        .replace_all(&doc.text, |caps: &Captures| {
            render_block(&caps[1], &caps[2], &options.chat)
        })
        .into_owned();
}

fn render_block(title: &str, content: &str, directory: &ChatDirectory) -> String {
    let mut html = format!(
        "<details class=\"chat-details\"><summary>{title}</summary>\
         <div class=\"chat-log\"><div class=\"chat-header\">"
    );
    let mut header_open = true;

    for line in content.trim().lines() {
        if let Some(meta) = line.strip_prefix("@meta ") {
            html.push_str(&format!("<div class=\"chat-meta\">{meta}</div>"));
            continue;
        }

        if header_open {
            html.push_str("</div>");
            header_open = false;
        }

        if let Some(caps) = MESSAGE_LINE.captures(line) {
            html.push_str(&render_message(&caps, directory));
        }
    }

    // A block with only meta lines still closes its header.
    if header_open {
        html.push_str("</div>");
    }

    html.push_str("</div></details>");
    html
}

fn render_message(caps: &Captures, directory: &ChatDirectory) -> String {
    let user_id = &caps[1];
    let time = &caps[2];
    let text = &caps[4];
    let user = directory.resolve(user_id);
    let highlight_class = if &caps[3] == "!" { " highlight-message" } else { "" };

    format!(
        "<div class=\"chat-message{highlight_class}\" data-user=\"{user_id}\">\n  \
         <img class=\"chat-avatar\" src=\"assets/avatars/{user_id}.png\" alt=\"{name}\" \
         onerror=\"this.style.display='none'\">\n  \
         <div class=\"chat-content\">\n    \
         <div class=\"chat-username gradient-name\" style=\"--gradient: {gradient};\">{name} \
         <span class=\"chat-time\">{time}</span></div>\n    \
         <div class=\"chat-text\">{text}</div>\n  \
         </div>\n</div>",
        name = user.name,
        gradient = user.gradient,
    )
}
