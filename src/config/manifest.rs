//! The build manifest: everything the external build engine consumes, in one document.

use std::path::Path;

use log::debug;
use serde::Serialize;

use super::{FontFamilies, Integration, Palette, SiteConfig};
use crate::error::ConfigError;
use crate::highlight::HighlightTheme;
use crate::typography::TypographyConfig;

/// Package name of the typography plugin the overrides are written for.
pub const TYPOGRAPHY_PLUGIN: &str = "@tailwindcss/typography";

/// Markdown settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkdownConfig {
    pub shiki_config: ShikiConfig,
}

/// Syntax highlighter settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShikiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<HighlightTheme>,
}

/// `theme.extend` in the styling framework's configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeExtend {
    pub font_family: FontFamilies,
    pub colors: Palette,
    pub typography: TypographyConfig,
}

/// `theme` in the styling framework's configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TailwindTheme {
    pub extend: ThemeExtend,
}

/// The styling framework's configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TailwindConfig {
    pub content: Vec<String>,
    pub theme: TailwindTheme,
    pub plugins: Vec<String>,
}

/// The complete document handed to the build engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildManifest {
    pub site: String,
    pub integrations: Vec<Integration>,
    pub markdown: MarkdownConfig,
    pub tailwind: TailwindConfig,
}

impl BuildManifest {
    /// Validates `config`, loads its highlight theme relative to `base_dir`,
    /// and resolves the typography overrides.
    ///
    /// Any failure aborts the whole build; there is no partial manifest.
    pub fn build(config: &SiteConfig, base_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        config.validate()?;
        let tokens = config.tokens()?;
        let typography = TypographyConfig::from_tokens(&tokens, &config.resolve_options())?;

        let theme = match &config.highlight_theme {
            Some(path) => Some(HighlightTheme::load(base_dir.as_ref().join(path))?),
            None => None,
        };

        debug!(
            "built manifest for {} with {} integrations",
            config.site,
            config.integrations.len()
        );

        Ok(Self {
            site: config.site.clone(),
            integrations: config.integrations.clone(),
            markdown: MarkdownConfig {
                shiki_config: ShikiConfig { theme },
            },
            tailwind: TailwindConfig {
                content: vec![config.content.pattern()],
                theme: TailwindTheme {
                    extend: ThemeExtend {
                        font_family: config.font_family.clone(),
                        colors: config.colors.clone(),
                        typography,
                    },
                },
                plugins: vec![TYPOGRAPHY_PLUGIN.to_string()],
            },
        })
    }
}
