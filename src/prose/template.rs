//! The override template: which properties exist under which selectors, and
//! where each value comes from.

use once_cell::sync::Lazy;

use crate::tokens::TokenName;

/// A transformation applied to a color token before it is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derivation {
    /// `rgb(var(--color-…)/alpha)`, or `rgb(var(--color-…))` without an alpha.
    AlphaChannel { alpha: Option<String> },
    /// A two-stop left-to-right gradient whose stops are both the
    /// alpha-channel form; used to draw link underlines as a background.
    Gradient { alpha: Option<String> },
}

/// Where a property's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    /// The base reading color supplied with the resolve options.
    Base,
    /// A token, emitted as-is.
    Token(TokenName),
    /// A token passed through a [`Derivation`].
    Derived(TokenName, Derivation),
    /// A literal string, independent of tokens.
    Constant(String),
    /// A literal number, independent of tokens.
    Number(u32),
}

impl Leaf {
    /// Shorthand for [`Leaf::Constant`].
    pub fn constant(value: impl Into<String>) -> Self {
        Leaf::Constant(value.into())
    }

    /// Shorthand for an alpha-channel derivation of `token`.
    pub fn alpha(token: TokenName, alpha: Option<&str>) -> Self {
        Leaf::Derived(
            token,
            Derivation::AlphaChannel {
                alpha: alpha.map(str::to_string),
            },
        )
    }

    /// Shorthand for a gradient derivation of `token`.
    pub fn gradient(token: TokenName, alpha: Option<&str>) -> Self {
        Leaf::Derived(
            token,
            Derivation::Gradient {
                alpha: alpha.map(str::to_string),
            },
        )
    }

    /// The token this leaf reads, if any.
    pub fn token(&self) -> Option<TokenName> {
        match self {
            Leaf::Token(name) | Leaf::Derived(name, _) => Some(*name),
            Leaf::Base | Leaf::Constant(_) | Leaf::Number(_) => None,
        }
    }
}

/// A property or a nested selector block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Property(String, Leaf),
    Nested(Rule),
}

/// A selector with its properties and nested selectors, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub(crate) selector: String,
    pub(crate) entries: Vec<Entry>,
}

impl Rule {
    /// Creates an empty rule for `selector`.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            entries: Vec::new(),
        }
    }

    /// Adds a property, returning the rule for chaining.
    pub fn prop(mut self, name: impl Into<String>, leaf: Leaf) -> Self {
        self.entries.push(Entry::Property(name.into(), leaf));
        self
    }

    /// Adds a nested rule (pseudo-class, pseudo-element or descendant).
    pub fn nest(mut self, rule: Rule) -> Self {
        self.entries.push(Entry::Nested(rule));
        self
    }

    /// The selector text.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Properties and nested rules, in declaration order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

/// A complete override template.
///
/// Top-level properties apply to the prose container itself; rules apply
/// to elements inside it.
///
/// # Example
///
/// ```rust
/// use prosetheme::prose::{Leaf, ProseTemplate, Rule};
/// use prosetheme::TokenName;
///
/// let template = ProseTemplate::new()
///     .prop("color", Leaf::Base)
///     .rule(Rule::new("a").prop("color", Leaf::Token(TokenName::TextLink)));
///
/// assert_eq!(template.referenced_tokens(), vec![TokenName::TextLink]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProseTemplate {
    pub(crate) entries: Vec<Entry>,
}

impl ProseTemplate {
    /// Creates an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level property.
    pub fn prop(mut self, name: impl Into<String>, leaf: Leaf) -> Self {
        self.entries.push(Entry::Property(name.into(), leaf));
        self
    }

    /// Adds a top-level rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.entries.push(Entry::Nested(rule));
        self
    }

    /// Top-level entries, in declaration order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Every token any leaf reads, deduplicated, in first-use order.
    pub fn referenced_tokens(&self) -> Vec<TokenName> {
        fn walk(entries: &[Entry], out: &mut Vec<TokenName>) {
            for entry in entries {
                match entry {
                    Entry::Property(_, leaf) => {
                        if let Some(token) = leaf.token() {
                            if !out.contains(&token) {
                                out.push(token);
                            }
                        }
                    }
                    Entry::Nested(rule) => walk(&rule.entries, out),
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.entries, &mut out);
        out
    }

    /// The fixed prose template used for long-form content.
    pub fn default_prose() -> &'static ProseTemplate {
        &DEFAULT_PROSE
    }
}

/// Opening curly quote, wrapped in single quotes as a CSS string.
pub const QUOTE_GLYPH: &str = "'\u{201C}'";

static DEFAULT_PROSE: Lazy<ProseTemplate> = Lazy::new(build_default_prose);

fn build_default_prose() -> ProseTemplate {
    use TokenName::{TextBody, TextLink};

    let none = || Leaf::constant("none");
    let empty = || Leaf::constant("");

    ProseTemplate::new()
        .prop("color", Leaf::Base)
        .rule(
            Rule::new("a")
                .prop("color", Leaf::Token(TextBody))
                .prop("text-decoration", none())
                .prop("background-repeat", Leaf::constant("no-repeat"))
                .prop("background-size", Leaf::constant("100% 1.5px"))
                .prop("background-position", Leaf::constant("0 100%"))
                .prop("background-image", Leaf::gradient(TextLink, Some("1")))
                .nest(Rule::new("&:hover").prop("color", Leaf::Token(TextLink))),
        )
        .rule(Rule::new("h1, h2, h3, h4, h5, h6").prop("color", Leaf::Base))
        .rule(
            Rule::new("strong, b")
                .prop("font-weight", Leaf::Number(1000))
                .prop("color", Leaf::Token(TextBody)),
        )
        .rule(Rule::new("th, blockquote").prop("color", Leaf::Token(TextBody)))
        .rule(Rule::new("code::before").prop("content", none()))
        .rule(Rule::new("code::after").prop("content", none()))
        .rule(
            Rule::new("blockquote")
                .prop("border", none())
                .prop("position", Leaf::constant("relative"))
                .prop("width", Leaf::constant("96%"))
                .prop("margin", Leaf::constant("0 auto"))
                .prop("font-size", Leaf::constant("1.0625em"))
                .prop("padding-top", Leaf::constant("1.5rem"))
                .prop("padding-bottom", Leaf::constant("0.5rem"))
                .prop("padding-left", Leaf::constant("1.5rem"))
                .prop("padding-right", Leaf::constant("1.5rem")),
        )
        .rule(
            Rule::new("blockquote::before")
                .prop("font-family", Leaf::constant("Arial"))
                .prop("content", Leaf::constant(QUOTE_GLYPH))
                .prop("font-size", Leaf::constant("4em"))
                .prop("color", Leaf::alpha(TextLink, None))
                .prop("position", Leaf::constant("absolute"))
                .prop("left", Leaf::constant("-10px"))
                .prop("top", Leaf::constant("-10px")),
        )
        .rule(Rule::new("blockquote::after").prop("content", empty()))
        .rule(Rule::new("blockquote p:first-of-type::before").prop("content", empty()))
        .rule(Rule::new("blockquote p:last-of-type::after").prop("content", empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors(template: &ProseTemplate) -> Vec<&str> {
        template
            .entries()
            .iter()
            .filter_map(|e| match e {
                Entry::Nested(rule) => Some(rule.selector()),
                Entry::Property(..) => None,
            })
            .collect()
    }

    #[test]
    fn test_default_prose_selector_order() {
        assert_eq!(
            selectors(ProseTemplate::default_prose()),
            vec![
                "a",
                "h1, h2, h3, h4, h5, h6",
                "strong, b",
                "th, blockquote",
                "code::before",
                "code::after",
                "blockquote",
                "blockquote::before",
                "blockquote::after",
                "blockquote p:first-of-type::before",
                "blockquote p:last-of-type::after",
            ]
        );
    }

    #[test]
    fn test_default_prose_starts_with_base_color() {
        let first = &ProseTemplate::default_prose().entries()[0];
        assert_eq!(first, &Entry::Property("color".to_string(), Leaf::Base));
    }

    #[test]
    fn test_default_prose_references_only_body_and_link() {
        assert_eq!(
            ProseTemplate::default_prose().referenced_tokens(),
            vec![TokenName::TextBody, TokenName::TextLink]
        );
    }

    #[test]
    fn test_default_prose_is_shared() {
        let a = ProseTemplate::default_prose() as *const ProseTemplate;
        let b = ProseTemplate::default_prose() as *const ProseTemplate;
        assert_eq!(a, b);
    }

    #[test]
    fn test_rule_builder_keeps_order() {
        let rule = Rule::new("a")
            .prop("color", Leaf::Base)
            .nest(Rule::new("&:hover"))
            .prop("border", Leaf::constant("none"));
        assert_eq!(rule.entries().len(), 3);
        assert!(matches!(rule.entries()[1], Entry::Nested(_)));
    }

    #[test]
    fn test_leaf_token() {
        assert_eq!(Leaf::Base.token(), None);
        assert_eq!(Leaf::Number(1).token(), None);
        assert_eq!(
            Leaf::alpha(TokenName::TextLink, None).token(),
            Some(TokenName::TextLink)
        );
    }
}
