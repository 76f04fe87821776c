//! # Prosetheme - Design Tokens for Static-Site Prose Styling
//!
//! `prosetheme` holds the configuration layer of a static site: the design
//! tokens (colors and font stacks), the typography overrides derived from
//! them for long-form content, and the pass-through settings handed to the
//! external build engine.
//!
//! ## Concepts
//!
//! - [`DesignTokens`]: ten named slots (`textBody`, `textLink`, …, `fontHeading`),
//!   validated once at load and immutable afterwards
//! - [`ProseTemplate`](prose::ProseTemplate): which selectors get which properties,
//!   each bound to a token, the base color, a constant, or a derived form
//! - [`resolve`]: the pure function from tokens to an [`OverrideTree`]
//! - [`TypographyConfig`]: the `{ DEFAULT: { css: ... } }` envelope the typography plugin reads
//! - [`SiteConfig`] / [`BuildManifest`]: the site settings and the document
//!   handed to the build engine
//!
//! ## Quick Start
//!
//! ```rust
//! use prosetheme::{resolve, DesignTokens, ResolveOptions};
//!
//! let tokens = DesignTokens::gruvbox_material_dark();
//! let tree = resolve(&tokens, &ResolveOptions::default()).unwrap();
//!
//! assert_eq!(tree.text_at(&["a", "&:hover", "color"]), Some("#7daea3"));
//! assert_eq!(
//!     tree.text_at(&["blockquote::before", "color"]),
//!     Some("rgb(var(--color-text-link))")
//! );
//! ```
//!
//! ## Missing Tokens
//!
//! A token set with an empty slot is rejected while it is validated, with
//! the slot named in the error. Nothing resolves to an empty or placeholder
//! value.
//!
//! ```rust
//! use prosetheme::{resolve_token_set, DesignTokens, ResolveOptions, TokenName, TokenSet};
//!
//! let set = TokenSet::from(&DesignTokens::gruvbox_material_dark()).without(TokenName::TextCode);
//! let err = resolve_token_set(set, &ResolveOptions::default()).unwrap_err();
//! assert!(err.to_string().contains("textCode"));
//! ```

pub mod color;
pub mod config;
mod error;
pub mod highlight;
pub mod prose;
pub mod tokens;
pub mod typography;

pub use color::Color;
pub use config::{BuildManifest, ContentGlob, Integration, SiteConfig};
pub use error::{ColorError, ConfigError, ResolveError, TokenError};
pub use highlight::HighlightTheme;
pub use prose::{
    resolve, resolve_partial, resolve_token_set, OverrideTree, OverrideValue, ResolveOptions,
};
pub use tokens::{DesignTokens, FontStack, TokenName, TokenSet, TokenSource, TokenValue};
pub use typography::{TypographyConfig, DEFAULT_VARIANT};
