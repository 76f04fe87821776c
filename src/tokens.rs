//! Design tokens: the named colors and font stacks every style rule draws from.
//!
//! Two forms exist:
//!
//! - [`TokenSet`]: the lenient, as-loaded form where every slot is optional.
//! - [`DesignTokens`]: the validated form, with every slot present.
//!
//! `DesignTokens` is built once, during configuration load, and never mutated.
//! [`DesignTokens::with`] returns a modified copy for callers that need a variant.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::TokenError;

/// One of the ten design token slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenName {
    TextBody,
    TextLink,
    TextCode,
    TextSelection,
    BgBody,
    BgCode,
    BgSelection,
    BorderCode,
    FontBody,
    FontHeading,
}

impl TokenName {
    /// Every slot, in declaration order.
    pub const ALL: [TokenName; 10] = [
        TokenName::TextBody,
        TokenName::TextLink,
        TokenName::TextCode,
        TokenName::TextSelection,
        TokenName::BgBody,
        TokenName::BgCode,
        TokenName::BgSelection,
        TokenName::BorderCode,
        TokenName::FontBody,
        TokenName::FontHeading,
    ];

    /// The camelCase token name, as used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenName::TextBody => "textBody",
            TokenName::TextLink => "textLink",
            TokenName::TextCode => "textCode",
            TokenName::TextSelection => "textSelection",
            TokenName::BgBody => "bgBody",
            TokenName::BgCode => "bgCode",
            TokenName::BgSelection => "bgSelection",
            TokenName::BorderCode => "borderCode",
            TokenName::FontBody => "fontBody",
            TokenName::FontHeading => "fontHeading",
        }
    }

    /// The `(group, role)` pair locating this token in the framework palette,
    /// e.g. `("text", "body")` for `colors.text.body`.
    pub fn palette_key(self) -> (&'static str, &'static str) {
        match self {
            TokenName::TextBody => ("text", "body"),
            TokenName::TextLink => ("text", "link"),
            TokenName::TextCode => ("text", "code"),
            TokenName::TextSelection => ("text", "selection"),
            TokenName::BgBody => ("bg", "body"),
            TokenName::BgCode => ("bg", "code"),
            TokenName::BgSelection => ("bg", "selection"),
            TokenName::BorderCode => ("border", "code"),
            TokenName::FontBody => ("fontFamily", "body"),
            TokenName::FontHeading => ("fontFamily", "heading"),
        }
    }

    /// Dotted framework path, e.g. `colors.text.link` or `fontFamily.body`.
    pub fn palette_path(self) -> String {
        let (group, role) = self.palette_key();
        if self.is_font() {
            format!("{}.{}", group, role)
        } else {
            format!("colors.{}.{}", group, role)
        }
    }

    /// CSS custom property holding this color's channels, e.g. `--color-text-link`.
    ///
    /// Returns `None` for font tokens.
    pub fn css_var(self) -> Option<String> {
        if self.is_font() {
            return None;
        }
        let (group, role) = self.palette_key();
        Some(format!("--color-{}-{}", group, role))
    }

    /// Whether this slot holds a font stack rather than a color.
    pub fn is_font(self) -> bool {
        matches!(self, TokenName::FontBody | TokenName::FontHeading)
    }
}

impl fmt::Display for TokenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "math",
    "emoji",
    "fangsong",
];

/// An ordered list of font families; the first is preferred, the rest are fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FontStack(Vec<String>);

impl FontStack {
    /// Validates and builds a font stack.
    ///
    /// Family names must be non-empty and must not contain quotes, commas,
    /// semicolons or braces; the stack itself must not be empty.
    pub fn new<I, S>(families: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let families: Vec<String> = families
            .into_iter()
            .map(|f| f.into().trim().to_string())
            .collect();
        if families.is_empty() {
            return Err("font stack is empty".to_string());
        }
        for family in &families {
            if family.is_empty() {
                return Err("font family name is empty".to_string());
            }
            if let Some(c) = family
                .chars()
                .find(|c| matches!(c, '"' | '\'' | ',' | ';' | '{' | '}'))
            {
                return Err(format!("font family '{}' contains '{}'", family, c));
            }
        }
        Ok(Self(families))
    }

    /// The preferred family.
    pub fn primary(&self) -> &str {
        &self.0[0]
    }

    /// The fallback families after the preferred one.
    pub fn fallbacks(&self) -> &[String] {
        &self.0[1..]
    }

    /// All families in order.
    pub fn families(&self) -> &[String] {
        &self.0
    }

    /// CSS `font-family` value: names with whitespace are quoted, generic families are not.
    ///
    /// ```rust
    /// use prosetheme::FontStack;
    ///
    /// let stack = FontStack::new(["Roboto Mono", "sans-serif"]).unwrap();
    /// assert_eq!(stack.to_css(), "\"Roboto Mono\", sans-serif");
    /// ```
    pub fn to_css(&self) -> String {
        self.0
            .iter()
            .map(|family| {
                let generic = GENERIC_FAMILIES
                    .iter()
                    .any(|g| g.eq_ignore_ascii_case(family));
                if !generic && family.contains(char::is_whitespace) {
                    format!("\"{}\"", family)
                } else {
                    family.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TryFrom<Vec<String>> for FontStack {
    type Error = String;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FontStack> for Vec<String> {
    fn from(stack: FontStack) -> Self {
        stack.0
    }
}

/// A borrowed token value: either a color or a font stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenValue<'a> {
    Color(&'a Color),
    Font(&'a FontStack),
}

impl<'a> TokenValue<'a> {
    /// The color, if this is a color token.
    pub fn as_color(&self) -> Option<&'a Color> {
        match *self {
            TokenValue::Color(c) => Some(c),
            TokenValue::Font(_) => None,
        }
    }

    /// The font stack, if this is a font token.
    pub fn as_font(&self) -> Option<&'a FontStack> {
        match *self {
            TokenValue::Font(f) => Some(f),
            TokenValue::Color(_) => None,
        }
    }
}

/// Anything template leaves can look tokens up in.
///
/// Implemented by both [`DesignTokens`] (always answers) and [`TokenSet`]
/// (answers only for slots that were provided).
pub trait TokenSource {
    /// Returns the value for a slot, or `None` if the slot is absent.
    fn lookup(&self, name: TokenName) -> Option<TokenValue<'_>>;
}

/// The as-loaded token set. Every slot is optional; see [`DesignTokens`] for
/// the validated form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TokenSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_body: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_link: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_code: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_selection: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_body: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_code: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_selection: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_code: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_body: Option<FontStack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_heading: Option<FontStack>,
}

impl TokenSet {
    /// Creates an empty token set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a color slot, returning the updated set for chaining.
    ///
    /// # Errors
    ///
    /// Fails if `name` is a font slot or `value` is not a valid color.
    pub fn color(mut self, name: TokenName, value: &str) -> Result<Self, TokenError> {
        let color = Color::parse(value).map_err(|source| TokenError::InvalidColor {
            token: name,
            source,
        })?;
        *self.color_slot(name)? = Some(color);
        Ok(self)
    }

    /// Sets a font slot, returning the updated set for chaining.
    ///
    /// # Errors
    ///
    /// Fails if `name` is a color slot or the stack is invalid.
    pub fn font<I, S>(mut self, name: TokenName, families: I) -> Result<Self, TokenError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stack =
            FontStack::new(families).map_err(|reason| TokenError::InvalidFont { token: name, reason })?;
        match name {
            TokenName::FontBody => self.font_body = Some(stack),
            TokenName::FontHeading => self.font_heading = Some(stack),
            other => {
                return Err(TokenError::WrongKind {
                    token: other,
                    expected: "color",
                })
            }
        }
        Ok(self)
    }

    /// Clears a slot.
    pub fn without(mut self, name: TokenName) -> Self {
        match name {
            TokenName::FontBody => self.font_body = None,
            TokenName::FontHeading => self.font_heading = None,
            color => {
                if let Ok(slot) = self.color_slot(color) {
                    *slot = None;
                }
            }
        }
        self
    }

    /// Slots that are not set, in declaration order.
    pub fn missing(&self) -> Vec<TokenName> {
        TokenName::ALL
            .into_iter()
            .filter(|name| self.lookup(*name).is_none())
            .collect()
    }

    fn color_slot(&mut self, name: TokenName) -> Result<&mut Option<Color>, TokenError> {
        Ok(match name {
            TokenName::TextBody => &mut self.text_body,
            TokenName::TextLink => &mut self.text_link,
            TokenName::TextCode => &mut self.text_code,
            TokenName::TextSelection => &mut self.text_selection,
            TokenName::BgBody => &mut self.bg_body,
            TokenName::BgCode => &mut self.bg_code,
            TokenName::BgSelection => &mut self.bg_selection,
            TokenName::BorderCode => &mut self.border_code,
            TokenName::FontBody | TokenName::FontHeading => {
                return Err(TokenError::WrongKind {
                    token: name,
                    expected: "font",
                })
            }
        })
    }
}

impl TokenSource for TokenSet {
    fn lookup(&self, name: TokenName) -> Option<TokenValue<'_>> {
        match name {
            TokenName::TextBody => color_value(&self.text_body),
            TokenName::TextLink => color_value(&self.text_link),
            TokenName::TextCode => color_value(&self.text_code),
            TokenName::TextSelection => color_value(&self.text_selection),
            TokenName::BgBody => color_value(&self.bg_body),
            TokenName::BgCode => color_value(&self.bg_code),
            TokenName::BgSelection => color_value(&self.bg_selection),
            TokenName::BorderCode => color_value(&self.border_code),
            TokenName::FontBody => self.font_body.as_ref().map(TokenValue::Font),
            TokenName::FontHeading => self.font_heading.as_ref().map(TokenValue::Font),
        }
    }
}

fn color_value(slot: &Option<Color>) -> Option<TokenValue<'_>> {
    slot.as_ref().map(TokenValue::Color)
}

/// The validated, complete design token set.
///
/// # Example
///
/// ```rust
/// use prosetheme::{DesignTokens, TokenName, TokenSet};
///
/// let set = TokenSet::new()
///     .color(TokenName::TextBody, "#ebdbb2").unwrap();
///
/// // Incomplete sets are rejected, naming the first missing slot.
/// let err = DesignTokens::try_from(set).unwrap_err();
/// assert!(err.to_string().contains("textLink"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignTokens {
    text_body: Color,
    text_link: Color,
    text_code: Color,
    text_selection: Color,
    bg_body: Color,
    bg_code: Color,
    bg_selection: Color,
    border_code: Color,
    font_body: FontStack,
    font_heading: FontStack,
}

impl DesignTokens {
    /// The Gruvbox Material dark palette with Roboto Mono for body and headings.
    pub fn gruvbox_material_dark() -> Self {
        let c = |r, g, b| Color::from_rgb(r, g, b);
        let mono = || FontStack(vec!["Roboto Mono".to_string(), "sans-serif".to_string()]);
        Self {
            text_body: c(0xeb, 0xdb, 0xb2),
            text_link: c(0x7d, 0xae, 0xa3),
            text_code: c(0xa9, 0xb6, 0x65),
            text_selection: c(0xeb, 0xdb, 0xb2),
            bg_body: c(0x1d, 0x20, 0x21),
            bg_code: c(0x1d, 0x20, 0x21),
            bg_selection: c(0xd3, 0x86, 0x9b),
            border_code: c(0xa9, 0xb6, 0x65),
            font_body: mono(),
            font_heading: mono(),
        }
    }

    /// Returns the value of a slot.
    pub fn get(&self, name: TokenName) -> TokenValue<'_> {
        match name {
            TokenName::TextBody => TokenValue::Color(&self.text_body),
            TokenName::TextLink => TokenValue::Color(&self.text_link),
            TokenName::TextCode => TokenValue::Color(&self.text_code),
            TokenName::TextSelection => TokenValue::Color(&self.text_selection),
            TokenName::BgBody => TokenValue::Color(&self.bg_body),
            TokenName::BgCode => TokenValue::Color(&self.bg_code),
            TokenName::BgSelection => TokenValue::Color(&self.bg_selection),
            TokenName::BorderCode => TokenValue::Color(&self.border_code),
            TokenName::FontBody => TokenValue::Font(&self.font_body),
            TokenName::FontHeading => TokenValue::Font(&self.font_heading),
        }
    }

    /// Returns the color in a color slot, or `None` for font slots.
    pub fn color(&self, name: TokenName) -> Option<&Color> {
        self.get(name).as_color()
    }

    /// Returns the font stack in a font slot, or `None` for color slots.
    pub fn font(&self, name: TokenName) -> Option<&FontStack> {
        self.get(name).as_font()
    }

    /// Renders the channel variables the derived overrides reference.
    ///
    /// ```rust
    /// use prosetheme::DesignTokens;
    ///
    /// let css = DesignTokens::gruvbox_material_dark().css_variables(":root");
    /// assert!(css.contains("  --color-text-link: 125 174 163;\n"));
    /// ```
    pub fn css_variables(&self, selector: &str) -> String {
        let mut out = format!("{} {{\n", selector);
        for name in TokenName::ALL {
            if let (Some(var), Some(color)) = (name.css_var(), self.color(name)) {
                out.push_str(&format!("  {}: {};\n", var, color.channels()));
            }
        }
        out.push_str("}\n");
        out
    }

    /// Returns a copy with one slot replaced.
    ///
    /// # Errors
    ///
    /// Fails with [`TokenError::WrongKind`] when the value kind does not match the slot.
    pub fn with(&self, name: TokenName, value: TokenValue<'_>) -> Result<Self, TokenError> {
        let mut set = TokenSet::from(self);
        match value {
            TokenValue::Color(color) => {
                *set.color_slot(name)? = Some(color.clone());
            }
            TokenValue::Font(stack) => match name {
                TokenName::FontBody => set.font_body = Some(stack.clone()),
                TokenName::FontHeading => set.font_heading = Some(stack.clone()),
                other => {
                    return Err(TokenError::WrongKind {
                        token: other,
                        expected: "color",
                    })
                }
            },
        }
        Self::try_from(set)
    }
}

impl TokenSource for DesignTokens {
    fn lookup(&self, name: TokenName) -> Option<TokenValue<'_>> {
        Some(self.get(name))
    }
}

impl TryFrom<TokenSet> for DesignTokens {
    type Error = TokenError;

    fn try_from(set: TokenSet) -> Result<Self, Self::Error> {
        if let Some(token) = set.missing().into_iter().next() {
            return Err(TokenError::Missing { token });
        }
        let require_color = |slot: Option<Color>, token| slot.ok_or(TokenError::Missing { token });
        let require_font = |slot: Option<FontStack>, token| slot.ok_or(TokenError::Missing { token });
        Ok(Self {
            text_body: require_color(set.text_body, TokenName::TextBody)?,
            text_link: require_color(set.text_link, TokenName::TextLink)?,
            text_code: require_color(set.text_code, TokenName::TextCode)?,
            text_selection: require_color(set.text_selection, TokenName::TextSelection)?,
            bg_body: require_color(set.bg_body, TokenName::BgBody)?,
            bg_code: require_color(set.bg_code, TokenName::BgCode)?,
            bg_selection: require_color(set.bg_selection, TokenName::BgSelection)?,
            border_code: require_color(set.border_code, TokenName::BorderCode)?,
            font_body: require_font(set.font_body, TokenName::FontBody)?,
            font_heading: require_font(set.font_heading, TokenName::FontHeading)?,
        })
    }
}

impl From<&DesignTokens> for TokenSet {
    fn from(tokens: &DesignTokens) -> Self {
        Self {
            text_body: Some(tokens.text_body.clone()),
            text_link: Some(tokens.text_link.clone()),
            text_code: Some(tokens.text_code.clone()),
            text_selection: Some(tokens.text_selection.clone()),
            bg_body: Some(tokens.bg_body.clone()),
            bg_code: Some(tokens.bg_code.clone()),
            bg_selection: Some(tokens.bg_selection.clone()),
            border_code: Some(tokens.border_code.clone()),
            font_body: Some(tokens.font_body.clone()),
            font_heading: Some(tokens.font_heading.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_set() -> TokenSet {
        TokenSet::from(&DesignTokens::gruvbox_material_dark())
    }

    #[test]
    fn test_token_names_are_camel_case() {
        assert_eq!(TokenName::TextBody.as_str(), "textBody");
        assert_eq!(TokenName::BorderCode.to_string(), "borderCode");
        assert_eq!(TokenName::FontHeading.as_str(), "fontHeading");
    }

    #[test]
    fn test_palette_paths() {
        assert_eq!(TokenName::TextLink.palette_path(), "colors.text.link");
        assert_eq!(TokenName::BgSelection.palette_path(), "colors.bg.selection");
        assert_eq!(TokenName::FontBody.palette_path(), "fontFamily.body");
    }

    #[test]
    fn test_css_var_names() {
        assert_eq!(
            TokenName::TextLink.css_var().as_deref(),
            Some("--color-text-link")
        );
        assert_eq!(
            TokenName::BorderCode.css_var().as_deref(),
            Some("--color-border-code")
        );
        assert_eq!(TokenName::FontBody.css_var(), None);
    }

    #[test]
    fn test_font_stack_order_and_css() {
        let stack = FontStack::new(["Roboto Mono", "sans-serif"]).unwrap();
        assert_eq!(stack.primary(), "Roboto Mono");
        assert_eq!(stack.fallbacks(), ["sans-serif".to_string()]);
        assert_eq!(stack.to_css(), "\"Roboto Mono\", sans-serif");
    }

    #[test]
    fn test_font_stack_rejects_bad_names() {
        assert!(FontStack::new(Vec::<String>::new()).is_err());
        assert!(FontStack::new([""]).is_err());
        assert!(FontStack::new(["Roboto, Mono"]).is_err());
        assert!(FontStack::new(["\"Quoted\""]).is_err());
    }

    #[test]
    fn test_font_stack_serde() {
        let stack: FontStack = serde_json::from_str(r#"["Inter", "serif"]"#).unwrap();
        assert_eq!(stack.families().len(), 2);
        assert!(serde_json::from_str::<FontStack>("[]").is_err());
    }

    #[test]
    fn test_complete_set_validates() {
        let tokens = DesignTokens::try_from(full_set()).unwrap();
        assert_eq!(tokens, DesignTokens::gruvbox_material_dark());
    }

    #[test]
    fn test_missing_text_code_is_named() {
        let set = full_set().without(TokenName::TextCode);
        let err = DesignTokens::try_from(set).unwrap_err();
        assert_eq!(
            err,
            TokenError::Missing {
                token: TokenName::TextCode
            }
        );
        assert!(err.to_string().contains("textCode"));
    }

    #[test]
    fn test_first_missing_slot_is_reported() {
        let set = full_set()
            .without(TokenName::FontHeading)
            .without(TokenName::BgCode);
        assert_eq!(
            DesignTokens::try_from(set).unwrap_err(),
            TokenError::Missing {
                token: TokenName::BgCode
            }
        );
    }

    #[test]
    fn test_missing_lists_all_absent_slots() {
        assert_eq!(TokenSet::new().missing().len(), 10);
        assert!(full_set().missing().is_empty());
    }

    #[test]
    fn test_builder_rejects_wrong_kind() {
        assert!(matches!(
            TokenSet::new().color(TokenName::FontBody, "#fff"),
            Err(TokenError::WrongKind { .. })
        ));
        assert!(matches!(
            TokenSet::new().font(TokenName::TextBody, ["Inter"]),
            Err(TokenError::WrongKind { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_malformed_color() {
        let err = TokenSet::new()
            .color(TokenName::TextLink, "#12")
            .unwrap_err();
        assert!(matches!(
            err,
            TokenError::InvalidColor {
                token: TokenName::TextLink,
                ..
            }
        ));
    }

    #[test]
    fn test_token_set_deserializes_camel_case() {
        let set: TokenSet = serde_json::from_str(
            r##"{ "textBody": "#ebdbb2", "fontBody": ["Roboto Mono", "sans-serif"] }"##,
        )
        .unwrap();
        assert_eq!(set.text_body.unwrap().as_str(), "#ebdbb2");
        assert_eq!(set.font_body.unwrap().primary(), "Roboto Mono");
    }

    #[test]
    fn test_token_set_rejects_unknown_fields() {
        let result: Result<TokenSet, _> = serde_json::from_str(r##"{ "textBold": "#fff" }"##);
        assert!(result.is_err());
    }

    #[test]
    fn test_with_replaces_single_slot() {
        let tokens = DesignTokens::gruvbox_material_dark();
        let red = Color::parse("#ff0000").unwrap();
        let changed = tokens
            .with(TokenName::TextBody, TokenValue::Color(&red))
            .unwrap();
        assert_eq!(changed.color(TokenName::TextBody), Some(&red));
        assert_eq!(
            changed.color(TokenName::TextLink),
            tokens.color(TokenName::TextLink)
        );
        // The original is untouched.
        assert_eq!(tokens.color(TokenName::TextBody).unwrap().as_str(), "#ebdbb2");
    }

    #[test]
    fn test_with_rejects_wrong_kind() {
        let tokens = DesignTokens::gruvbox_material_dark();
        let red = Color::parse("#ff0000").unwrap();
        assert!(tokens
            .with(TokenName::FontBody, TokenValue::Color(&red))
            .is_err());
    }

    #[test]
    fn test_css_variables_cover_every_color() {
        let css = DesignTokens::gruvbox_material_dark().css_variables(":root");
        assert!(css.starts_with(":root {\n  --color-text-body: 235 219 178;\n"));
        assert!(css.contains("  --color-bg-selection: 211 134 155;\n"));
        assert!(css.contains("  --color-border-code: 169 182 101;\n"));
        assert!(!css.contains("font"));
        assert_eq!(css.lines().count(), 10);
    }

    #[test]
    fn test_token_source_lookup() {
        let set = TokenSet::new().color(TokenName::TextLink, "#7daea3").unwrap();
        assert!(set.lookup(TokenName::TextLink).is_some());
        assert!(set.lookup(TokenName::TextBody).is_none());

        let tokens = DesignTokens::gruvbox_material_dark();
        assert!(TokenName::ALL.iter().all(|n| tokens.lookup(*n).is_some()));
    }
}
