//! Captured block tests

use super::helpers::nested_params;
use super::*;
use toml::toml;

#[test]
fn test_capture_binds_rendered_text() {
    let params = toml! { title = "Home" };
    let template = "{{capture head}}<title>{{title}}</title>{{/capture}}<html>{{head}}</html>";
    assert_eq!(
        render(template, &params).unwrap(),
        "<html><title>Home</title></html>"
    );
}

#[test]
fn test_capture_body_not_written_in_place() {
    let params = crate::template::ParameterSet::new();
    let template = "a{{capture hidden}}secret{{/capture}}b";
    assert_eq!(render(template, &params).unwrap(), "ab");
}

#[test]
fn test_capture_inside_loop_is_per_iteration() {
    let template = "{{each user.projects |p|}}{{capture label}}[{{p.name}}]{{/capture}}{{label}}{{label}}{{/each}}";
    assert_eq!(
        render(template, &nested_params()).unwrap(),
        "[Engine][Engine][Parser][Parser]"
    );
}

#[test]
fn test_capture_scope_released_at_block_end() {
    let params = toml! { items = [1] };
    let template = "{{each items |i|}}{{capture inner}}x{{/capture}}{{/each}}{{inner}}";
    assert!(matches!(
        render(template, &params),
        Err(TemplateError::UndefinedKey { ref key, .. }) if key == "inner"
    ));
}

#[test]
fn test_nested_captures_restore_stack_depth() {
    let params = toml! { who = "world" };
    let nodes = parse("{{capture a}}{{capture b}}hello {{who}}{{/capture}}<{{b}}>{{/capture}}{{a}}").unwrap();

    let mut out = OutputStack::new();
    let mut enclosing = out.scope();
    let rendered = Evaluator::new()
        .evaluate_nodes(&nodes, &params, &mut enclosing)
        .unwrap();

    assert_eq!(rendered, "<hello world>");
    assert_eq!(enclosing.depth(), 1);
    assert_eq!(enclosing.pending(), 0, "Evaluator output must not leak into the caller's scope");
}
