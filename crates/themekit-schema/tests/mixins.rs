//! `$mixins` expansion through the public entry point.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use themekit_config::GenerateOptions;
use themekit_core::{CustomTypes, ErrorKind, GenerateError, Node};
use themekit_schema::{GeneratedProperties, generate};

fn run(theme: Value, schema: Value, mixins: Value) -> Result<GeneratedProperties, GenerateError> {
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
fn simple_mixin() {
    let out = run(
        json!({ "level-1": { "level-2": "foo" } }),
        json!({ "level-1": { "$mixins": "mixin-1" } }),
        json!({ "mixin-1": { "level-2": {} } }),
    )
    .unwrap();
    assert_eq!(as_json(&out), json!({ "level-1__level-2": "foo" }));
}

#[test]
fn deep_level_mixin() {
    let out = run(
        json!({ "level-1": { "level-2": "foo" } }),
        json!({ "level-1": { "$mixins": "mixin-1.sub-level-1.sub-level-2" } }),
        json!({ "mixin-1": { "sub-level-1": { "sub-level-2": { "level-2": {} } } } }),
    )
    .unwrap();
    assert_eq!(as_json(&out), json!({ "level-1__level-2": "foo" }));
}

#[test]
fn mixin_at_root() {
    let out = run(
        json!({ "level-1": { "level-2": "foo" } }),
        json!({ "$mixins": "mixin-1" }),
        json!({ "mixin-1": { "level-1": { "level-2": {} } } }),
    )
    .unwrap();
    assert_eq!(as_json(&out), json!({ "level-1__level-2": "foo" }));
}

#[test]
fn empty_mixin_at_root() {
    let err = run(json!({}), json!({ "$mixins": "mixin-1" }), json!({ "mixin-1": {} })).unwrap_err();
    assert_eq!(err.to_string(), "Schema error: Schema must not be an empty object");
}

#[test]
fn endpoint_mixin_at_root() {
    let err = run(
        json!({}),
        json!({ "$mixins": "mixin-1" }),
        json!({ "mixin-1": { "$required": true } }),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Schema error: Endpoint controls at schema root are not valid"
    );
}

#[test]
fn empty_mixin_in_subsection_is_an_endpoint() {
    let out = run(
        json!({ "level-1": "foo" }),
        json!({ "level-1": { "$mixins": "mixin-1" } }),
        json!({ "mixin-1": {} }),
    )
    .unwrap();
    assert_eq!(as_json(&out), json!({ "level-1": "foo" }));
}

#[test]
fn endpoint_mixin_supplies_controls() {
    let out = run(
        json!({}),
        json!({ "accent": { "$mixins": "optional-color" } }),
        json!({ "optional-color": { "$type": "color", "$default": "white" } }),
    )
    .unwrap();
    assert_eq!(out["accent"], json!("255, 255, 255"));
}

#[test]
fn multiple_mixins() {
    let out = run(
        json!({
            "level-1a": { "level-2a": "foo", "level-2b": "bar" },
            "level-1b": "foobar"
        }),
        json!({
            "level-1a": { "$mixins": ["mixin-1", "mixin-2"] },
            "level-1b": { "$mixins": ["mixin-1.level-2a"] }
        }),
        json!({ "mixin-1": { "level-2a": {} }, "mixin-2": { "level-2b": {} } }),
    )
    .unwrap();
    assert_eq!(
        as_json(&out),
        json!({
            "level-1a__level-2a": "foo",
            "level-1a__level-2b": "bar",
            "level-1b": "foobar"
        })
    );
}

#[test]
fn mixins_with_producers() {
    let mixins = Node::lazy(|| {
        Node::from_iter([(
            "mixin-1",
            Node::lazy(|| {
                Node::from_iter([
                    ("level-1a", Node::lazy(Node::empty_map)),
                    (
                        "level-1b",
                        Node::lazy(|| Node::from_iter([("level-2", Node::lazy(Node::empty_map))])),
                    ),
                ])
            }),
        )])
    });
    let schema = Node::from(json!({
        "$mixins": "mixin-1",
        "level-1c": { "$mixins": "mixin-1.level-1b" }
    }));
    let theme = Node::from(json!({
        "level-1a": "foo",
        "level-1b": { "level-2": "bar" },
        "level-1c": { "level-2": "foobar" }
    }));

    let out = generate(
        &theme,
        &schema,
        &mixins,
        CustomTypes::new(),
        &GenerateOptions::default(),
    )
    .unwrap();
    assert_eq!(
        as_json(&out),
        json!({
            "level-1a": "foo",
            "level-1b__level-2": "bar",
            "level-1c__level-2": "foobar"
        })
    );
}

#[test]
fn splice_keeps_surrounding_key_order() {
    let out = run(
        json!({ "first": 1, "a": 2, "b": 3, "last": 4 }),
        json!({ "first": {}, "$mixins": "pair", "last": {} }),
        json!({ "pair": { "a": {}, "b": {} } }),
    )
    .unwrap();
    let keys: Vec<_> = out.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["first", "a", "b", "last"]);
}

#[test]
fn invalid_mixin_name() {
    let err = run(
        json!({ "level-1": "foo" }),
        json!({ "$mixins": "$required" }),
        json!({ "$required": { "level-1": {} } }),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Mixin error: Invalid mixin name '$required' at path ''"
    );
}

#[test]
fn invalid_syntax_inside_mixin() {
    let err = run(
        json!({ "level-1": "foo" }),
        json!({ "$mixins": "mixin-1" }),
        json!({ "mixin-1": { "level-1": { "$invalid-control": "something" } } }),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid syntax: Control '$invalid-control' does not exist"
    );
}

#[test]
fn missing_mixin() {
    let err = run(json!({}), json!({ "$mixins": "missing-mixin" }), json!({})).unwrap_err();
    assert_eq!(err.to_string(), "Schema error: Mixin 'missing-mixin' not found");
}

#[test]
fn non_object_mixin() {
    let err = run(json!({}), json!({ "a": { "$mixins": "m" } }), json!({ "m": "text" })).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
    assert!(matches!(err, GenerateError::MixinNotSection { found: "string", .. }));
}

#[test]
fn missing_theme_endpoint_from_mixin() {
    let err = run(
        json!({ "level-1": {} }),
        json!({ "$mixins": "mixin-1" }),
        json!({ "mixin-1": { "level-1": { "level-2": {} } } }),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid theme: Theme subsection is missing at path partial 'level-1.level-2'"
    );
}

#[test]
fn mixin_within_mixin() {
    let out = run(
        json!({ "level-1": { "level-2": "foo" } }),
        json!({ "$mixins": "mixin-1" }),
        json!({
            "mixin-1": { "level-1": { "$mixins": "mixin-2" } },
            "mixin-2": { "level-2": {} }
        }),
    )
    .unwrap();
    assert_eq!(as_json(&out), json!({ "level-1__level-2": "foo" }));
}

#[test]
fn circular_mixins_fail_instead_of_recursing() {
    let err = run(
        json!({}),
        json!({ "a": { "$mixins": "loop" } }),
        json!({ "loop": { "$mixins": "loop" } }),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Mixin error: Circular mixin reference 'loop' at path 'a'"
    );
}
