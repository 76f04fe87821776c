//! Prose typography overrides derived from design tokens.
//!
//! This module provides:
//!
//! - [`ProseTemplate`]: the fixed structure of selectors and properties, with
//!   each leaf bound to a token, the base color, a constant, or a derived form
//! - [`OverrideTree`]: the resolved nested mapping handed to the typography plugin
//! - [`resolve`]: the pure function from tokens to override tree
//!
//! # Leaf Kinds
//!
//! | Leaf | Output |
//! |------|--------|
//! | `Base` | the base reading color |
//! | `Token(name)` | the token literal (or CSS font stack) |
//! | `Derived(name, AlphaChannel)` | `rgb(var(--color-…)/alpha)` |
//! | `Derived(name, Gradient)` | `linear-gradient(to right, <alpha form>, <alpha form>)` |
//! | `Constant` / `Number` | the literal |

mod resolve;
mod template;
mod tree;

pub use resolve::{resolve, resolve_partial, resolve_token_set, ResolveOptions, DEFAULT_BASE_COLOR};
pub use template::{Derivation, Entry, Leaf, ProseTemplate, Rule, QUOTE_GLYPH};
pub use tree::{OverrideTree, OverrideValue};
