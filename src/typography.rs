//! The typography plugin envelope.
//!
//! The plugin expects its overrides keyed by variant name, each variant
//! holding a `css` tree:
//!
//! ```json
//! { "DEFAULT": { "css": { "color": "#ebdbb2", "a": { ... } } } }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::prose::{resolve, OverrideTree, ResolveOptions};
use crate::tokens::DesignTokens;

/// Name of the variant applied by the bare `prose` class.
pub const DEFAULT_VARIANT: &str = "DEFAULT";

/// One typography variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub css: OverrideTree,
}

/// Typography overrides for every variant, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypographyConfig {
    variants: IndexMap<String, Variant>,
}

impl TypographyConfig {
    /// Creates a configuration with no variants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the default prose template into the `DEFAULT` variant.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prosetheme::{DesignTokens, ResolveOptions, TypographyConfig};
    ///
    /// let config = TypographyConfig::from_tokens(
    ///     &DesignTokens::gruvbox_material_dark(),
    ///     &ResolveOptions::default(),
    /// ).unwrap();
    /// let json = serde_json::to_value(&config).unwrap();
    /// assert_eq!(json["DEFAULT"]["css"]["h1, h2, h3, h4, h5, h6"]["color"], "#ebdbb2");
    /// ```
    pub fn from_tokens(tokens: &DesignTokens, options: &ResolveOptions) -> Result<Self, ConfigError> {
        let css = resolve(tokens, options)?;
        Self::new().with_variant(DEFAULT_VARIANT, css)
    }

    /// Adds a variant, returning the updated configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicateVariant`] when the name is empty or already present.
    pub fn with_variant(mut self, name: &str, css: OverrideTree) -> Result<Self, ConfigError> {
        if name.trim().is_empty() || self.variants.contains_key(name) {
            return Err(ConfigError::DuplicateVariant {
                name: name.to_string(),
            });
        }
        self.variants.insert(name.to_string(), Variant { css });
        Ok(self)
    }

    /// Returns a variant's override tree.
    pub fn variant(&self, name: &str) -> Option<&OverrideTree> {
        self.variants.get(name).map(|v| &v.css)
    }

    /// Variant names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }
}
