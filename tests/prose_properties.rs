//! Properties of prose override resolution that must hold for any palette.

use proptest::prelude::*;
use prosetheme::{
    resolve, resolve_partial, resolve_token_set, Color, DesignTokens, OverrideTree, OverrideValue,
    ResolveOptions, TokenName, TokenSet, TokenValue,
};

/// Flattens a tree into `(path, value)` pairs, paths joined with `" > "`.
fn leaves(tree: &OverrideTree) -> Vec<(String, String)> {
    fn walk(tree: &OverrideTree, prefix: &str, out: &mut Vec<(String, String)>) {
        for (key, value) in tree.iter() {
            let path = if prefix.is_empty() {
                key.to_string()
            } else {
                format!("{} > {}", prefix, key)
            };
            match value {
                OverrideValue::Nested(nested) => walk(nested, &path, out),
                OverrideValue::Text(text) => out.push((path, text.clone())),
                OverrideValue::Number(n) => out.push((path, n.to_string())),
            }
        }
    }

    let mut out = Vec::new();
    walk(tree, "", &mut out);
    out
}

fn changed_paths(a: &OverrideTree, b: &OverrideTree) -> Vec<String> {
    leaves(a)
        .into_iter()
        .zip(leaves(b))
        .filter(|(x, y)| x.1 != y.1)
        .map(|(x, _)| x.0)
        .collect()
}

fn with_color(tokens: &DesignTokens, name: TokenName, color: &Color) -> DesignTokens {
    tokens.with(name, TokenValue::Color(color)).unwrap()
}

#[test]
fn test_end_to_end_gruvbox_example() {
    let tokens = DesignTokens::gruvbox_material_dark();
    let tree = resolve(&tokens, &ResolveOptions::default()).unwrap();

    assert_eq!(
        tree.text_at(&["h1, h2, h3, h4, h5, h6", "color"]),
        Some("#ebdbb2")
    );
    assert_eq!(
        tree.get_path(&["strong, b", "font-weight"]).and_then(OverrideValue::as_number),
        Some(1000)
    );

    let glyph = tree.text_at(&["blockquote::before", "content"]).unwrap();
    assert!(!glyph.trim_matches('\'').is_empty());
    assert_eq!(
        tree.text_at(&["blockquote::before", "color"]),
        Some("rgb(var(--color-text-link))")
    );
}

#[test]
fn test_five_token_example_resolves_partially() {
    let set = TokenSet::new()
        .color(TokenName::TextBody, "#ebdbb2")
        .unwrap()
        .color(TokenName::TextLink, "#7daea3")
        .unwrap()
        .color(TokenName::TextCode, "#a9b665")
        .unwrap()
        .color(TokenName::BgBody, "#1d2021")
        .unwrap()
        .color(TokenName::BorderCode, "#a9b665")
        .unwrap();

    let tree = resolve_partial(&set, &ResolveOptions::default()).unwrap();
    assert_eq!(
        tree.text_at(&["h1, h2, h3, h4, h5, h6", "color"]),
        Some("#ebdbb2")
    );
    assert_eq!(
        tree.get_path(&["strong, b", "font-weight"]).and_then(OverrideValue::as_number),
        Some(1000)
    );
    assert_eq!(
        tree.text_at(&["blockquote::before", "content"]),
        Some("'\u{201C}'")
    );
    assert_eq!(
        tree.text_at(&["blockquote::before", "color"]),
        Some("rgb(var(--color-text-link))")
    );

    // The strict path still wants every slot.
    let err = resolve_token_set(set, &ResolveOptions::default()).unwrap_err();
    assert!(err.to_string().contains("textSelection"), "{}", err);
}

#[test]
fn test_alpha_derivations_share_the_link_variable() {
    let tree = resolve(&DesignTokens::gruvbox_material_dark(), &ResolveOptions::default()).unwrap();
    let image = tree.text_at(&["a", "background-image"]).unwrap();
    let glyph = tree.text_at(&["blockquote::before", "color"]).unwrap();

    let var = TokenName::TextLink.css_var().unwrap();
    assert!(image.contains(&format!("var({})", var)));
    assert!(glyph.contains(&format!("var({})", var)));
}

#[test]
fn test_base_color_drives_headings_and_container() {
    let tokens = DesignTokens::gruvbox_material_dark();
    let baseline = resolve(&tokens, &ResolveOptions::default()).unwrap();
    let light = Color::parse("#fbf1c7").unwrap();
    let tree = resolve(&tokens, &ResolveOptions::with_base_color(light)).unwrap();

    assert_eq!(
        changed_paths(&baseline, &tree),
        vec!["color", "h1, h2, h3, h4, h5, h6 > color"]
    );
}

#[test]
fn test_unreferenced_tokens_do_not_affect_output() {
    let tokens = DesignTokens::gruvbox_material_dark();
    let baseline = resolve(&tokens, &ResolveOptions::default()).unwrap();
    let magenta = Color::parse("#ff00ff").unwrap();

    for name in [
        TokenName::TextCode,
        TokenName::TextSelection,
        TokenName::BgBody,
        TokenName::BgCode,
        TokenName::BgSelection,
        TokenName::BorderCode,
    ] {
        let tree = resolve(&with_color(&tokens, name, &magenta), &ResolveOptions::default()).unwrap();
        assert_eq!(tree, baseline, "{}", name);
    }
}

proptest! {
    #[test]
    fn test_resolution_is_idempotent(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let tokens = with_color(
            &DesignTokens::gruvbox_material_dark(),
            TokenName::TextLink,
            &Color::from_rgb(r, g, b),
        );
        let options = ResolveOptions::default();
        prop_assert_eq!(resolve(&tokens, &options).unwrap(), resolve(&tokens, &options).unwrap());
    }

    #[test]
    fn test_text_body_reaches_exactly_its_leaves(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let tokens = DesignTokens::gruvbox_material_dark();
        let color = Color::from_rgb(r, g, b);
        prop_assume!(color.as_str() != "#ebdbb2");

        let baseline = resolve(&tokens, &ResolveOptions::default()).unwrap();
        let tree = resolve(&with_color(&tokens, TokenName::TextBody, &color), &ResolveOptions::default()).unwrap();

        prop_assert_eq!(
            changed_paths(&baseline, &tree),
            vec!["a > color", "strong, b > color", "th, blockquote > color"]
        );
        for path in [["a", "color"], ["strong, b", "color"], ["th, blockquote", "color"]] {
            prop_assert_eq!(tree.text_at(&path), Some(color.as_str()));
        }
    }

    #[test]
    fn test_text_link_channels_never_leak_into_derived_values(
        r in any::<u8>(), g in any::<u8>(), b in any::<u8>()
    ) {
        let tokens = DesignTokens::gruvbox_material_dark();
        let color = Color::from_rgb(r, g, b);
        prop_assume!(color.as_str() != "#7daea3");

        let baseline = resolve(&tokens, &ResolveOptions::default()).unwrap();
        let changed = with_color(&tokens, TokenName::TextLink, &color);
        let tree = resolve(&changed, &ResolveOptions::default()).unwrap();

        // Derived leaves reference the variable, so only the literal hover color moves.
        prop_assert_eq!(changed_paths(&baseline, &tree), vec!["a > &:hover > color"]);
        prop_assert_eq!(tree.text_at(&["a", "&:hover", "color"]), Some(color.as_str()));

        // Both derived leaves pick the new color up through the variable.
        let vars = changed.css_variables(":root");
        let expected = format!("--color-text-link: {};", color.channels());
        prop_assert!(vars.contains(&expected));
    }
}
