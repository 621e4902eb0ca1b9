#![cfg(test)]
//! The desktop binary inlines `ui/assets/theme/main.css`; a truncated or
//! moved theme would only show up as unstyled windows at runtime.

const EMBEDDED_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

#[test]
fn embedded_css_file_exists_and_is_not_empty() {
    assert!(
        !EMBEDDED_CSS.trim().is_empty(),
        "embedded theme is empty"
    );
}

#[test]
fn embedded_css_contains_expected_tokens() {
    for token in ["--color-bg", "--color-accent", "body {", ".button--primary"] {
        assert!(
            EMBEDDED_CSS.contains(token),
            "expected token `{token}` missing from embedded CSS"
        );
    }
}
