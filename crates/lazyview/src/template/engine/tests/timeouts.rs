//! Evaluation deadline tests

use super::*;
use std::time::Duration;
use toml::toml;

#[test]
fn test_zero_timeout_fails_before_any_output() {
    let params = toml! { title = "x" };
    let nodes = parse("{{title}}").unwrap();
    let mut out = OutputStack::new();

    let result = Evaluator::with_timeout(Duration::ZERO).evaluate_nodes(&nodes, &params, &mut out);

    match result {
        Err(TemplateError::Timeout { max_duration, .. }) => {
            assert_eq!(max_duration, Duration::ZERO);
        }
        other => panic!("Expected Timeout, got {:?}", other),
    }
    assert_eq!(out.depth(), 0);
}

#[test]
fn test_large_loop_completes_within_default_timeout() {
    let items: Vec<toml::Value> = (0..10_000).map(toml::Value::Integer).collect();
    let mut params = crate::template::ParameterSet::new();
    params.insert("items".to_string(), toml::Value::Array(items));

    let result = render("{{each items |i|}}{{i}},{{/each}}", &params).unwrap();
    assert!(result.starts_with("0,1,2,"));
    assert!(result.ends_with("9999,"));
}

#[test]
fn test_timeout_error_display() {
    let err = TemplateError::Timeout {
        max_duration: Duration::from_secs(10),
        elapsed: Duration::from_millis(10_500),
    };
    assert_eq!(
        err.to_string(),
        "View evaluation timed out after 10.50s (max: 10.00s)"
    );
}
