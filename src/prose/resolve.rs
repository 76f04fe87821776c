//! Resolution of a template against a token source.
//!
//! Resolution is a pure function of the template, the tokens and the
//! options: the same inputs always produce an equal tree.

use log::debug;

use super::template::{Derivation, Entry, Leaf, ProseTemplate};
use super::tree::{OverrideTree, OverrideValue};
use crate::color::{alpha_channel, Color};
use crate::error::ResolveError;
use crate::tokens::{DesignTokens, TokenName, TokenSet, TokenSource, TokenValue};

/// The default reading color used for [`Leaf::Base`] when no base color is given.
pub const DEFAULT_BASE_COLOR: &str = "#ebdbb2";

/// Options that are not tokens.
///
/// The base color is a separate slot from `textBody` even though the stock
/// palette gives them the same value; each can be changed without the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub base_color: Option<Color>,
}

impl ResolveOptions {
    /// Options with an explicit base color.
    pub fn with_base_color(color: Color) -> Self {
        Self {
            base_color: Some(color),
        }
    }

    /// The base color in effect.
    pub fn base_color(&self) -> Color {
        match &self.base_color {
            Some(color) => color.clone(),
            None => Color::from_rgb(0xeb, 0xdb, 0xb2),
        }
    }
}

/// Resolves the default prose template against a complete token set.
///
/// # Example
///
/// ```rust
/// use prosetheme::{resolve, DesignTokens, ResolveOptions};
///
/// let tree = resolve(&DesignTokens::gruvbox_material_dark(), &ResolveOptions::default()).unwrap();
/// assert_eq!(tree.text_at(&["h1, h2, h3, h4, h5, h6", "color"]), Some("#ebdbb2"));
/// assert_eq!(
///     tree.get_path(&["strong, b", "font-weight"]).and_then(|v| v.as_number()),
///     Some(1000)
/// );
/// ```
pub fn resolve(tokens: &DesignTokens, options: &ResolveOptions) -> Result<OverrideTree, ResolveError> {
    ProseTemplate::default_prose().resolve(tokens, options)
}

/// Validates a loaded token set, then resolves the default prose template.
///
/// Every slot must be present, including ones the template does not read;
/// the first missing slot is reported. A set without `textCode` fails here
/// even though no override reads it. Use [`resolve_partial`] to resolve a
/// set that only carries the slots the template reads.
pub fn resolve_token_set(set: TokenSet, options: &ResolveOptions) -> Result<OverrideTree, ResolveError> {
    let tokens = DesignTokens::try_from(set)?;
    resolve(&tokens, options)
}

/// Resolves the default prose template against a possibly incomplete token
/// set, requiring only the slots the template actually reads (`textBody`
/// and `textLink`).
///
/// Slots the template never reads are not checked here, so a set missing
/// `textCode` resolves. Use [`resolve_token_set`] when every slot must be present.
pub fn resolve_partial(set: &TokenSet, options: &ResolveOptions) -> Result<OverrideTree, ResolveError> {
    ProseTemplate::default_prose().resolve(set, options)
}

impl ProseTemplate {
    /// Resolves every leaf of this template.
    ///
    /// # Errors
    ///
    /// [`ResolveError::UnknownToken`] when a leaf reads a slot `tokens` does
    /// not provide, and [`ResolveError::NotAColor`] when a derivation is
    /// applied to a font token. The error path names the selector chain and
    /// property, e.g. `a > &:hover > color`.
    pub fn resolve<S>(&self, tokens: &S, options: &ResolveOptions) -> Result<OverrideTree, ResolveError>
    where
        S: TokenSource + ?Sized,
    {
        let base = options.base_color();
        let ctx = Context { tokens, base: &base };
        let tree = ctx.resolve_entries(&self.entries, &mut Vec::new())?;
        debug!("resolved prose overrides with {} top-level entries", tree.len());
        Ok(tree)
    }
}

struct Context<'a, S: ?Sized> {
    tokens: &'a S,
    base: &'a Color,
}

impl<S: TokenSource + ?Sized> Context<'_, S> {
    fn resolve_entries<'e>(
        &self,
        entries: &'e [Entry],
        path: &mut Vec<&'e str>,
    ) -> Result<OverrideTree, ResolveError> {
        let mut tree = OverrideTree::new();
        for entry in entries {
            match entry {
                Entry::Property(name, leaf) => {
                    path.push(name);
                    let value = self.resolve_leaf(leaf, path);
                    path.pop();
                    tree.insert(name.clone(), value?);
                }
                Entry::Nested(rule) => {
                    path.push(&rule.selector);
                    let nested = self.resolve_entries(&rule.entries, path);
                    path.pop();
                    tree.insert(rule.selector.clone(), OverrideValue::Nested(nested?));
                }
            }
        }
        Ok(tree)
    }

    fn resolve_leaf(&self, leaf: &Leaf, path: &[&str]) -> Result<OverrideValue, ResolveError> {
        let value = match leaf {
            Leaf::Base => OverrideValue::Text(self.base.as_str().to_string()),
            Leaf::Constant(value) => OverrideValue::Text(value.clone()),
            Leaf::Number(n) => OverrideValue::Number(*n),
            Leaf::Token(name) => match self.lookup(*name, path)? {
                TokenValue::Color(color) => OverrideValue::Text(color.as_str().to_string()),
                TokenValue::Font(stack) => OverrideValue::Text(stack.to_css()),
            },
            Leaf::Derived(name, derivation) => {
                let var = self.channel_var(*name, path)?;
                OverrideValue::Text(derive(&var, derivation))
            }
        };
        Ok(value)
    }

    fn lookup(&self, name: TokenName, path: &[&str]) -> Result<TokenValue<'_>, ResolveError> {
        self.tokens
            .lookup(name)
            .ok_or_else(|| ResolveError::UnknownToken {
                path: path.join(" > "),
                token: name,
            })
    }

    fn channel_var(&self, name: TokenName, path: &[&str]) -> Result<String, ResolveError> {
        // The derived forms reference the channel variable rather than the
        // literal, but the token still has to exist for the variable to be defined.
        self.lookup(name, path)?
            .as_color()
            .and(name.css_var())
            .ok_or_else(|| ResolveError::NotAColor {
                path: path.join(" > "),
                token: name,
            })
    }
}

fn derive(var: &str, derivation: &Derivation) -> String {
    match derivation {
        Derivation::AlphaChannel { alpha } => alpha_channel(var, alpha.as_deref()),
        Derivation::Gradient { alpha } => {
            let stop = alpha_channel(var, alpha.as_deref());
            format!("linear-gradient(to right, {}, {})", stop, stop)
        }
    }
}
