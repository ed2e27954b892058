//! Dialect configuration consumed by the transform pipeline.
//!
//! Everything the pipeline needs beyond the document text lives here: the
//! recognized literal section titles and their anchors, the title-block
//! rules, and the chat user directory. The defaults reproduce the paper the
//! dialect was written for; applications can layer their own values on top
//! (see the `mdpaper-config` crate).

use std::collections::HashMap;

/// Knobs for the whole render pipeline.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Rules for the `#` paper-title block.
    pub title: TitleRules,
    /// Anchor id prefix for numbered `## N.` sections ("sec-" gives "sec-3").
    pub numbered_anchor_prefix: String,
    /// Literal `##` titles that receive a fixed anchor id.
    pub section_anchors: Vec<SectionAnchor>,
    /// Literal `##` title opening the abstract section.
    pub abstract_heading: String,
    /// Label line rendered at the top of the wrapped abstract block.
    pub abstract_label: String,
    /// Literal `##` title opening the references section.
    pub references_heading: String,
    /// Phrase identifying the subtitle paragraph below the title block.
    pub subtitle_marker: String,
    /// User directory for chat transcript blocks.
    pub chat: ChatDirectory,
}

/// Rules for rendering the `#` main title.
///
/// A title containing `separator` is split into segments rendered on their
/// own lines; when `infix` is set it is inserted as an extra line between
/// the first segment and the rest.
#[derive(Debug, Clone)]
pub struct TitleRules {
    pub separator: String,
    pub infix: Option<String>,
}

/// A literal section title prefix mapped to a fixed anchor id.
#[derive(Debug, Clone)]
pub struct SectionAnchor {
    pub prefix: String,
    pub anchor: String,
}

/// Static user directory for chat blocks.
///
/// Lookup never fails: unknown ids degrade to the raw id as display name
/// with the default gradient.
#[derive(Debug, Clone)]
pub struct ChatDirectory {
    pub default_gradient: String,
    pub users: HashMap<String, ChatUser>,
}

/// Display data for one chat participant.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatUser {
    pub name: String,
    pub gradient: String,
}

impl ChatDirectory {
    /// Resolve a user id to its display data, falling back to the id itself.
    pub fn resolve(&self, user_id: &str) -> ChatUser {
        self.users.get(user_id).cloned().unwrap_or_else(|| ChatUser {
            name: user_id.to_string(),
            gradient: self.default_gradient.clone(),
        })
    }
}

const MEMBER_GRADIENT: &str = "linear-gradient(90deg, #ffc6d5, #ff9cbf, #ffc6d5, #ff9cbf)";

impl Default for RenderOptions {
    fn default() -> Self {
        let mut users = HashMap::new();
        users.insert(
            "maboroshi22".to_string(),
            ChatUser {
                name: "黒幻₂₂".to_string(),
                gradient: MEMBER_GRADIENT.to_string(),
            },
        );
        users.insert(
            "kaze".to_string(),
            ChatUser {
                name: "月村手まりまり".to_string(),
                gradient: MEMBER_GRADIENT.to_string(),
            },
        );
        users.insert(
            "yoyo2007".to_string(),
            ChatUser {
                name: "林秋".to_string(),
                gradient: MEMBER_GRADIENT.to_string(),
            },
        );

        RenderOptions {
            title: TitleRules {
                separator: "：".to_string(),
                infix: Some("之跨領域整合研究：".to_string()),
            },
            numbered_anchor_prefix: "sec-".to_string(),
            section_anchors: vec![
                SectionAnchor {
                    prefix: "附錄 Z".to_string(),
                    anchor: "sec-z".to_string(),
                },
                SectionAnchor {
                    prefix: "參考文獻".to_string(),
                    anchor: "sec-ref".to_string(),
                },
                SectionAnchor {
                    prefix: "結語".to_string(),
                    anchor: "sec-end".to_string(),
                },
            ],
            abstract_heading: "摘要".to_string(),
            abstract_label: "摘要 ABSTRACT".to_string(),
            references_heading: "參考文獻".to_string(),
            subtitle_marker: "A Hyper-Interdisciplinary".to_string(),
            chat: ChatDirectory {
                default_gradient: "linear-gradient(90deg, #5865f2, #7289da, #5865f2)".to_string(),
                users,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_user() {
        let options = RenderOptions::default();
        let user = options.chat.resolve("kaze");
        assert_eq!(user.name, "月村手まりまり");
    }

    #[test]
    fn test_resolve_unknown_user_degrades() {
        let options = RenderOptions::default();
        let user = options.chat.resolve("zz99");
        assert_eq!(user.name, "zz99");
        assert_eq!(user.gradient, options.chat.default_gradient);
    }
}
