//! Escape sequence tests

use super::helpers::simple_params;
use super::*;
use toml::toml;

#[test]
fn test_render_escape_sequences() {
    let result = render(r#"Literal: \{{title}}"#, &simple_params()).unwrap();
    assert_eq!(result, "Literal: {{title}}");
}

#[test]
fn test_render_escape_with_spaces() {
    let result = render(r#"Literal: \{{ title }}"#, &simple_params()).unwrap();
    assert_eq!(result, "Literal: {{ title }}");
}

#[test]
fn test_render_double_backslash_escape() {
    let result = render(r#"Backslash: \\{{title}}"#, &simple_params()).unwrap();
    assert_eq!(result, r#"Backslash: \My Title"#);
}

#[test]
fn test_error_escaped_placeholder_unclosed() {
    let result = render(r#"Before \{{title after"#, &simple_params());
    match result {
        Err(TemplateError::MalformedSyntax { message, .. }) => {
            assert!(message.contains("Unclosed escaped placeholder"));
        }
        other => panic!("Expected MalformedSyntax, got {:?}", other),
    }
}

#[test]
fn test_render_escaped_end_tag_inside_loop() {
    let params = toml! {
        [[items]]
        name = "Item1"
        [[items]]
        name = "Item2"
    };
    let template = r#"{{each items |item|}}{{item.name}}: \{{/each}} more
{{/each}}"#;
    let result = render(template, &params).unwrap();
    assert_eq!(result, "Item1: {{/each}} more\nItem2: {{/each}} more\n");
}

#[test]
fn test_render_triple_backslash_block() {
    let params = toml! {
        [[items]]
        name = "Item1"
    };
    let template = r#"{{each items |item|}}\\\{{capture x}}{{/each}}"#;
    assert_eq!(render(template, &params).unwrap(), r#"\{{capture x}}"#);
}
