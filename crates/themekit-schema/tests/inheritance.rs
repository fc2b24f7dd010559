//! `$inherits` resolution, ordering, and lazy overrides.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use themekit_config::GenerateOptions;
use themekit_core::{CustomTypes, ErrorKind, GenerateError, Node};
use themekit_schema::{GeneratedProperties, generate};

fn run(theme: Value, schema: Value) -> Result<GeneratedProperties, GenerateError> {
    run_with(theme, schema, &GenerateOptions::default())
}

fn run_with(
    theme: Value,
    schema: Value,
    options: &GenerateOptions,
) -> Result<GeneratedProperties, GenerateError> {
    generate(
        &Node::from(theme),
        &Node::from(schema),
        &Node::empty_map(),
        CustomTypes::new(),
        options,
    )
}

fn run_with_mixins(
    theme: Value,
    schema: Value,
    mixins: Value,
) -> Result<GeneratedProperties, GenerateError> {
    generate(
        &Node::from(theme),
        &Node::from(schema),
        &Node::from(mixins),
        CustomTypes::new(),
        &GenerateOptions::default(),
    )
}

fn as_json(properties: &GeneratedProperties) -> Value {
    Value::Object(properties.clone().into_iter().collect())
}

#[test]
fn simple_inheritance() {
    let out = run(json!({ "a": "x" }), json!({ "a": {}, "b": { "$inherits": "a" } })).unwrap();
    assert_eq!(as_json(&out), json!({ "a": "x", "b": "x" }));
}

#[test]
fn inherits_a_whole_subtree() {
    let out = run(
        json!({ "palette": { "primary": { "main": "red", "text": "white" } } }),
        json!({
            "palette": { "primary": { "main": {}, "text": {} } },
            "button": { "$inherits": "palette.primary" }
        }),
    )
    .unwrap();
    assert_eq!(
        as_json(&out),
        json!({
            "palette__primary__main": "red",
            "palette__primary__text": "white",
            "button__main": "red",
            "button__text": "white"
        })
    );
}

#[test]
fn source_prefix_respects_segment_boundaries() {
    let out = run(
        json!({ "level-1": "one", "level-10": "ten" }),
        json!({ "level-1": {}, "level-10": {}, "copy": { "$inherits": "level-1" } }),
    )
    .unwrap();
    assert_eq!(out["copy"], json!("one"));
    assert_eq!(out.len(), 3);
}

#[test]
fn sibling_inside_nested_section() {
    let out = run(
        json!({ "theme": { "a": "x" } }),
        json!({ "theme": { "a": {}, "b": { "$inherits": "theme.a" } } }),
    )
    .unwrap();
    assert_eq!(as_json(&out), json!({ "theme__a": "x", "theme__b": "x" }));
}

#[test]
fn inherits_standardized_colors() {
    let out = run(
        json!({ "text": "#000" }),
        json!({ "text": { "$type": "color" }, "link": { "$inherits": "text" } }),
    )
    .unwrap();
    assert_eq!(out["link"], json!("0, 0, 0"));
}

#[test]
fn source_declared_later_is_not_computed() {
    let err = run(json!({ "a": "x" }), json!({ "b": { "$inherits": "a" }, "a": {} })).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
    assert_eq!(
        err.to_string(),
        "Schema error: No inheritance values have been computed for 'a'. This might be because it is defined after the inheritance definition."
    );
}

#[test]
fn theme_cannot_override_inherited_value() {
    let err = run(
        json!({ "a": "x", "b": "y" }),
        json!({ "a": {}, "b": { "$inherits": "a" } }),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Theme);
    assert_eq!(
        err.to_string(),
        "Invalid theme: Setting value of already computed inheritance value is invalid at path 'b'"
    );
}

#[test]
fn nested_schema_overrides_inherited_values() {
    let out = run(
        json!({ "a": { "x": "1" }, "b": { "x": "2" } }),
        json!({
            "a": { "x": {}, "y": { "$default": "d" } },
            "b": { "$inherits": "a", "x": {} }
        }),
    )
    .unwrap();
    assert_eq!(
        as_json(&out),
        json!({ "a__x": "1", "a__y": "d", "b__x": "2", "b__y": "d" })
    );
    let keys: Vec<_> = out.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a__x", "a__y", "b__x", "b__y"]);
}

#[test]
fn overrides_are_lazy() {
    let out = run(
        json!({ "a": { "x": "1" } }),
        json!({
            "a": { "x": {} },
            "b": { "$inherits": "a", "x": { "$required": true }, "extra": { "deep": {} } }
        }),
    )
    .unwrap();
    assert_eq!(as_json(&out), json!({ "a__x": "1", "b__x": "1" }));
}

#[test]
fn lazy_overrides_still_validate_supplied_values() {
    let err = run(
        json!({ "a": { "x": 1 }, "b": { "x": "wide" } }),
        json!({
            "a": { "x": { "$type": "number" } },
            "b": { "$inherits": "a", "x": { "$type": "number" } }
        }),
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::TypeMismatch { ref path, .. } if path == "b.x"));
}

#[test]
fn lazy_source_reference() {
    let schema = Node::from_iter([
        ("a", Node::empty_map()),
        (
            "b",
            Node::from_iter([("$inherits", Node::lazy(|| Node::from("a")))]),
        ),
    ]);
    let out = generate(
        &Node::from(json!({ "a": "x" })),
        &schema,
        &Node::empty_map(),
        CustomTypes::new(),
        &GenerateOptions::default(),
    )
    .unwrap();
    assert_eq!(out["b"], json!("x"));
}

#[test]
fn array_reference_is_rejected() {
    let err = run(json!({ "a": "x" }), json!({ "a": {}, "b": { "$inherits": ["a"] } })).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Schema error: Arrays are not allowed with $inherits at path 'b'"
    );
}

#[test]
fn combined_with_endpoint_controls_is_rejected() {
    let err = run(
        json!({ "a": "x" }),
        json!({ "a": {}, "b": { "$inherits": "a", "$default": "y" } }),
    )
    .unwrap_err();
    assert!(matches!(err, GenerateError::InheritsWithEndpoint { ref path } if path == "b"));
}

#[test]
fn custom_separator_applies_to_references() {
    let options = GenerateOptions {
        separator: "-".into(),
        ..GenerateOptions::default()
    };
    let out = run_with(
        json!({ "base": { "fg": "x" } }),
        json!({ "base": { "fg": {} }, "alt": { "$inherits": "base" } }),
        &options,
    )
    .unwrap();
    assert_eq!(as_json(&out), json!({ "base-fg": "x", "alt-fg": "x" }));
}

#[test]
fn mixins_inside_an_override_are_lazy() {
    let out = run_with_mixins(
        json!({ "a": { "x": "1" } }),
        json!({ "a": { "x": {} }, "b": { "$inherits": "a", "$mixins": "m" } }),
        json!({ "m": { "x": { "$required": true }, "y": { "z": {} } } }),
    )
    .unwrap();
    assert_eq!(as_json(&out), json!({ "a__x": "1", "b__x": "1" }));
}

#[test]
fn chained_mixin_key_inherits_from_inner_mixin_key() {
    let out = run_with_mixins(
        json!({ "a": "1", "b": "2" }),
        json!({ "$mixins": "outer" }),
        json!({
            "outer": { "a": {}, "$mixins": "inner", "c": { "$inherits": "b" } },
            "inner": { "b": {} }
        }),
    )
    .unwrap();
    assert_eq!(as_json(&out), json!({ "a": "1", "b": "2", "c": "2" }));
    let keys: Vec<_> = out.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}
