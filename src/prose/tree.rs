//! The resolved override tree handed to the typography plugin.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A resolved value: a literal, a number, or a nested selector block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideValue {
    Number(u32),
    Text(String),
    Nested(OverrideTree),
}

impl OverrideValue {
    /// The string value, if this is a text leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OverrideValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric value, if this is a number leaf.
    pub fn as_number(&self) -> Option<u32> {
        match self {
            OverrideValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The nested block, if this is one.
    pub fn as_tree(&self) -> Option<&OverrideTree> {
        match self {
            OverrideValue::Nested(tree) => Some(tree),
            _ => None,
        }
    }
}

/// A nested mapping from selectors and property names to values.
///
/// Keys keep declaration order, so the serialized form matches the order
/// rules were declared in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideTree(IndexMap<String, OverrideValue>);

impl OverrideTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing any previous one under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: OverrideValue) {
        self.0.insert(key.into(), value);
    }

    /// Returns the value directly under `key`.
    pub fn get(&self, key: &str) -> Option<&OverrideValue> {
        self.0.get(key)
    }

    /// Follows a path of keys through nested blocks.
    ///
    /// ```rust
    /// use prosetheme::{resolve, DesignTokens, ResolveOptions};
    ///
    /// let tree = resolve(&DesignTokens::gruvbox_material_dark(), &ResolveOptions::default()).unwrap();
    /// let hover = tree.get_path(&["a", "&:hover", "color"]).unwrap();
    /// assert_eq!(hover.as_text(), Some("#7daea3"));
    /// ```
    pub fn get_path(&self, path: &[&str]) -> Option<&OverrideValue> {
        let (last, parents) = path.split_last()?;
        let mut tree = self;
        for key in parents {
            tree = tree.get(key)?.as_tree()?;
        }
        tree.get(last)
    }

    /// Shorthand for [`get_path`](Self::get_path) followed by [`OverrideValue::as_text`].
    pub fn text_at(&self, path: &[&str]) -> Option<&str> {
        self.get_path(path)?.as_text()
    }

    /// Iterates over entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OverrideValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Selectors whose `content` is suppressed (`none` or the empty string).
    ///
    /// Nested selectors are reported joined with `" > "`.
    pub fn suppressed_selectors(&self) -> Vec<String> {
        fn walk(tree: &OverrideTree, prefix: Option<&str>, out: &mut Vec<String>) {
            for (key, value) in tree.iter() {
                if let OverrideValue::Nested(nested) = value {
                    let path = match prefix {
                        Some(prefix) => format!("{} > {}", prefix, key),
                        None => key.to_string(),
                    };
                    if let Some(content) = nested.get("content").and_then(OverrideValue::as_text) {
                        if content.is_empty() || content == "none" {
                            out.push(path.clone());
                        }
                    }
                    walk(nested, Some(&path), out);
                }
            }
        }

        let mut out = Vec::new();
        walk(self, None, &mut out);
        out
    }

    /// Renders the tree as a stylesheet scoped under `scope` (e.g. `.prose`).
    ///
    /// Top-level properties go on the scope itself, `&` in nested selectors
    /// refers to the parent, and comma-separated selectors are scoped
    /// individually.
    pub fn to_css(&self, scope: &str) -> String {
        let mut out = String::new();
        write_block(self, &[scope.to_string()], &mut out);
        out
    }
}

fn scoped(parents: &[String], selector: &str) -> Vec<String> {
    let mut result = Vec::new();
    for parent in parents {
        for part in selector.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if part.contains('&') {
                result.push(part.replace('&', parent));
            } else {
                result.push(format!("{} {}", parent, part));
            }
        }
    }
    result
}

fn css_value(value: &OverrideValue) -> Option<String> {
    match value {
        OverrideValue::Number(n) => Some(n.to_string()),
        // An empty `content` has to be written as an empty CSS string.
        OverrideValue::Text(s) if s.is_empty() => Some("\"\"".to_string()),
        OverrideValue::Text(s) => Some(s.clone()),
        OverrideValue::Nested(_) => None,
    }
}

fn write_block(tree: &OverrideTree, selectors: &[String], out: &mut String) {
    let declarations: Vec<String> = tree
        .iter()
        .filter_map(|(key, value)| css_value(value).map(|v| format!("  {}: {};", key, v)))
        .collect();

    if !declarations.is_empty() {
        out.push_str(&selectors.join(",\n"));
        out.push_str(" {\n");
        for line in declarations {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str("}\n");
    }

    for (key, value) in tree.iter() {
        if let OverrideValue::Nested(nested) = value {
            write_block(nested, &scoped(selectors, key), out);
        }
    }
}
