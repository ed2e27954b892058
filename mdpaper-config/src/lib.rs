//! Shared configuration loader for the mdpaper toolchain.
//!
//! `defaults/mdpaper.default.toml` is embedded into every binary so that
//! docs and runtime behavior stay in sync. Applications layer user-specific
//! files on top of those defaults via [`Loader`] before deserializing into
//! [`MdpaperConfig`]; the render section converts into the library's
//! [`RenderOptions`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdpaper_render::{ChatDirectory, ChatUser, RenderOptions, SectionAnchor, TitleRules};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mdpaper.default.toml");

/// Top-level configuration consumed by mdpaper applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdpaperConfig {
    pub render: RenderConfig,
}

/// Mirrors the knobs exposed by the render library.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub numbered_anchor_prefix: String,
    pub subtitle_marker: String,
    pub title: TitleConfig,
    pub section_anchors: Vec<SectionAnchorConfig>,
    #[serde(rename = "abstract")]
    pub abstract_section: AbstractConfig,
    pub references: ReferencesConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TitleConfig {
    pub separator: String,
    pub infix: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionAnchorConfig {
    pub prefix: String,
    pub anchor: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbstractConfig {
    pub heading: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReferencesConfig {
    pub heading: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    pub default_gradient: String,
    #[serde(default)]
    pub users: HashMap<String, ChatUserConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatUserConfig {
    pub name: String,
    pub gradient: String,
}

impl From<RenderConfig> for RenderOptions {
    fn from(config: RenderConfig) -> Self {
        RenderOptions {
            title: TitleRules {
                separator: config.title.separator,
                infix: config.title.infix,
            },
            numbered_anchor_prefix: config.numbered_anchor_prefix,
            section_anchors: config
                .section_anchors
                .into_iter()
                .map(|section| SectionAnchor {
                    prefix: section.prefix,
                    anchor: section.anchor,
                })
                .collect(),
            abstract_heading: config.abstract_section.heading,
            abstract_label: config.abstract_section.label,
            references_heading: config.references.heading,
            subtitle_marker: config.subtitle_marker,
            chat: ChatDirectory {
                default_gradient: config.chat.default_gradient,
                users: config
                    .chat
                    .users
                    .into_iter()
                    .map(|(id, user)| {
                        (
                            id,
                            ChatUser {
                                name: user.name,
                                gradient: user.gradient,
                            },
                        )
                    })
                    .collect(),
            },
        }
    }
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        config.clone().into()
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdpaperConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdpaperConfig, ConfigError> {
    Loader::new().build()
}
