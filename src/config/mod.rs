//! Site configuration: the pass-through surface handed to the external build engine.
//!
//! Besides the design tokens, nothing here carries logic of its own; values
//! are validated and then passed on unchanged.
//!
//! # Format
//!
//! ```yaml
//! site: https://example.com
//! integrations: [mdx, sitemap, tailwind]
//! highlightTheme: themes/gruvbox-material-dark.json
//! fontFamily:
//!   body: [Roboto Mono, sans-serif]
//!   heading: [Roboto Mono, sans-serif]
//! colors:
//!   text: { body: "#ebdbb2", link: "#7daea3", code: "#a9b665", selection: "#ebdbb2" }
//!   bg: { body: "#1d2021", code: "#1d2021", selection: "#d3869b" }
//!   border: { code: "#a9b665" }
//! ```
//!
//! `content` (root and extensions) and `baseColor` are optional.

mod content;
mod manifest;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{ConfigError, TokenError};
use crate::prose::ResolveOptions;
use crate::tokens::{DesignTokens, FontStack, TokenSet};

pub use content::{ContentGlob, DEFAULT_CONTENT_EXTENSIONS, DEFAULT_CONTENT_ROOT};
pub use manifest::{
    BuildManifest, MarkdownConfig, ShikiConfig, TailwindConfig, TailwindTheme, ThemeExtend,
};

/// An integration activated in the build engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Integration {
    /// Extended markdown content.
    Mdx,
    /// Sitemap generation.
    Sitemap,
    /// The utility-first styling framework.
    Tailwind,
}

impl Integration {
    /// The integration's name as written in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Integration::Mdx => "mdx",
            Integration::Sitemap => "sitemap",
            Integration::Tailwind => "tailwind",
        }
    }

    fn defaults() -> Vec<Integration> {
        vec![Integration::Mdx, Integration::Sitemap, Integration::Tailwind]
    }
}

impl fmt::Display for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font families for the two semantic roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontFamilies {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<FontStack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<FontStack>,
}

/// Text colors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextColors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Color>,
}

/// Background colors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BgColors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Color>,
}

/// Border colors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BorderColors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Color>,
}

/// The color palette, nested the way the styling framework groups it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Palette {
    #[serde(default)]
    pub text: TextColors,
    #[serde(default)]
    pub bg: BgColors,
    #[serde(default)]
    pub border: BorderColors,
}

/// The complete site configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteConfig {
    /// Base URL the site is deployed under.
    pub site: String,
    #[serde(default = "Integration::defaults")]
    pub integrations: Vec<Integration>,
    #[serde(default)]
    pub content: ContentGlob,
    #[serde(default)]
    pub font_family: FontFamilies,
    #[serde(default)]
    pub colors: Palette,
    /// Default reading color; kept apart from `colors.text.body`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_color: Option<Color>,
    /// Syntax-highlighting theme file, relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_theme: Option<PathBuf>,
}

impl SiteConfig {
    /// Parses and validates a YAML configuration.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// Fails on unreadable files, unknown extensions, parse errors and any
    /// validation error from [`SiteConfig::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        debug!("loaded site config for {} from {}", config.site, path.display());
        Ok(config)
    }

    /// A configuration for `site` using the stock palette and defaults.
    pub fn with_defaults(site: impl Into<String>) -> Self {
        let tokens = DesignTokens::gruvbox_material_dark();
        let mut config = Self {
            site: site.into(),
            integrations: Integration::defaults(),
            content: ContentGlob::default(),
            font_family: FontFamilies::default(),
            colors: Palette::default(),
            base_color: None,
            highlight_theme: None,
        };
        config.set_tokens(&tokens);
        config
    }

    /// Checks every field: the site URL, integrations, the content glob and the tokens.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_site(&self.site)?;

        let mut seen = Vec::new();
        for integration in &self.integrations {
            if seen.contains(integration) {
                return Err(ConfigError::DuplicateIntegration {
                    name: integration.to_string(),
                });
            }
            seen.push(*integration);
        }

        self.content.validate()?;
        self.tokens()?;
        Ok(())
    }

    /// The raw token set read from `fontFamily` and `colors`.
    pub fn token_set(&self) -> TokenSet {
        let text = &self.colors.text;
        let bg = &self.colors.bg;
        TokenSet {
            text_body: text.body.clone(),
            text_link: text.link.clone(),
            text_code: text.code.clone(),
            text_selection: text.selection.clone(),
            bg_body: bg.body.clone(),
            bg_code: bg.code.clone(),
            bg_selection: bg.selection.clone(),
            border_code: self.colors.border.code.clone(),
            font_body: self.font_family.body.clone(),
            font_heading: self.font_family.heading.clone(),
        }
    }

    /// The validated design tokens.
    pub fn tokens(&self) -> Result<DesignTokens, TokenError> {
        DesignTokens::try_from(self.token_set())
    }

    /// Replaces `fontFamily` and `colors` with the given tokens.
    pub fn set_tokens(&mut self, tokens: &DesignTokens) {
        let set = TokenSet::from(tokens);
        self.font_family = FontFamilies {
            body: set.font_body,
            heading: set.font_heading,
        };
        self.colors = Palette {
            text: TextColors {
                body: set.text_body,
                link: set.text_link,
                code: set.text_code,
                selection: set.text_selection,
            },
            bg: BgColors {
                body: set.bg_body,
                code: set.bg_code,
                selection: set.bg_selection,
            },
            border: BorderColors {
                code: set.border_code,
            },
        };
    }

    /// Resolve options carrying the configured base color.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            base_color: self.base_color.clone(),
        }
    }
}

fn validate_site(site: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidSite {
        site: site.to_string(),
        reason: reason.to_string(),
    };

    let rest = site
        .strip_prefix("https://")
        .or_else(|| site.strip_prefix("http://"))
        .ok_or_else(|| invalid("must start with http:// or https://"))?;
    if site.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    if host.is_empty() {
        return Err(invalid("missing host"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenName;

    const GRUVBOX_YAML: &str = r##"
site: https://example.com
integrations: [mdx, sitemap, tailwind]
fontFamily:
  body: [Roboto Mono, sans-serif]
  heading: [Roboto Mono, sans-serif]
colors:
  text: { body: "#ebdbb2", link: "#7daea3", code: "#a9b665", selection: "#ebdbb2" }
  bg: { body: "#1d2021", code: "#1d2021", selection: "#d3869b" }
  border: { code: "#a9b665" }
"##;

    #[test]
    fn test_parse_yaml() {
        let config = SiteConfig::from_yaml_str(GRUVBOX_YAML).unwrap();
        assert_eq!(config.site, "https://example.com");
        assert_eq!(config.integrations, Integration::defaults());
        assert_eq!(config.content, ContentGlob::default());
        assert_eq!(config.tokens().unwrap(), DesignTokens::gruvbox_material_dark());
    }

    #[test]
    fn test_integrations_default() {
        let yaml = GRUVBOX_YAML.replace("integrations: [mdx, sitemap, tailwind]\n", "");
        let config = SiteConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(
            config.integrations,
            vec![Integration::Mdx, Integration::Sitemap, Integration::Tailwind]
        );
    }

    #[test]
    fn test_duplicate_integration_rejected() {
        let yaml = GRUVBOX_YAML.replace("[mdx, sitemap, tailwind]", "[mdx, mdx]");
        let err = SiteConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateIntegration { ref name } if name == "mdx"));
    }

    #[test]
    fn test_unknown_integration_rejected() {
        let yaml = GRUVBOX_YAML.replace("[mdx, sitemap, tailwind]", "[mdx, react]");
        assert!(matches!(
            SiteConfig::from_yaml_str(&yaml),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_missing_token_names_slot() {
        let yaml = GRUVBOX_YAML.replace(r##"code: "#a9b665", "##, "");
        let err = SiteConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Tokens(TokenError::Missing {
                token: TokenName::TextCode
            })
        ));
    }

    #[test]
    fn test_malformed_color_is_fatal() {
        let yaml = GRUVBOX_YAML.replace("#7daea3", "#7daea");
        assert!(matches!(
            SiteConfig::from_yaml_str(&yaml),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_invalid_site() {
        for site in ["example.com", "https://", "ftp://example.com", "https://exa mple.com"] {
            let yaml = GRUVBOX_YAML.replace("https://example.com", site);
            assert!(
                matches!(
                    SiteConfig::from_yaml_str(&yaml),
                    Err(ConfigError::InvalidSite { .. })
                ),
                "{}",
                site
            );
        }
    }

    #[test]
    fn test_base_color_is_separate_slot() {
        let yaml = format!("{}baseColor: \"#fbf1c7\"\n", GRUVBOX_YAML);
        let config = SiteConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(
            config.resolve_options().base_color(),
            Color::parse("#fbf1c7").unwrap()
        );
        assert_eq!(
            config.tokens().unwrap().color(TokenName::TextBody).unwrap().as_str(),
            "#ebdbb2"
        );
    }

    #[test]
    fn test_parse_json() {
        let json = r##"{
            "site": "http://localhost:4321",
            "fontFamily": { "body": ["Inter"], "heading": ["Inter"] },
            "colors": {
                "text": { "body": "#000", "link": "#00f", "code": "#333", "selection": "#fff" },
                "bg": { "body": "#fff", "code": "#eee", "selection": "#00f" },
                "border": { "code": "#ccc" }
            }
        }"##;
        let config = SiteConfig::from_json_str(json).unwrap();
        assert_eq!(config.site, "http://localhost:4321");
    }

    #[test]
    fn test_with_defaults_round_trips_tokens() {
        let config = SiteConfig::with_defaults("https://example.com");
        assert!(config.validate().is_ok());
        assert_eq!(config.tokens().unwrap(), DesignTokens::gruvbox_material_dark());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = format!("{}theme: dark\n", GRUVBOX_YAML);
        assert!(SiteConfig::from_yaml_str(&yaml).is_err());
    }
}
