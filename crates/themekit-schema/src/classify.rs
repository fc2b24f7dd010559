//! Endpoint/section classification of expanded schema nodes.

use themekit_core::{GenerateError, Node, NodeMap, SchemaPath, Validator};

use crate::controls::{self, DEFAULT, INHERITS, REQUIRED, TYPE, VALIDATE};

/// Controls declared on one endpoint. Unset controls fall back to the
/// configured endpoint defaults.
#[derive(Debug, Clone, Default)]
pub struct EndpointControls {
    pub required: Option<bool>,
    pub type_name: Option<String>,
    /// Left unresolved; producers run only when the default is needed.
    pub default: Option<Node>,
    pub validate: Option<Validator>,
}

/// A schema node after mixin expansion.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    Endpoint(EndpointControls),
    Section(NodeMap),
}

/// Classify an expanded section.
///
/// An empty map is an endpoint with default controls. A map whose keys are
/// all endpoint controls is an endpoint. Anything else is a section.
///
/// # Errors
///
/// `InheritsWithEndpoint` if `$inherits` sits beside endpoint controls,
/// `MixedEndpointControls` for any other mix, `InvalidControlValue` for a
/// control holding the wrong kind of value.
pub fn classify(section: NodeMap, path: &SchemaPath) -> Result<SchemaNode, GenerateError> {
    if section.is_empty() {
        return Ok(SchemaNode::Endpoint(EndpointControls::default()));
    }

    let endpoint_keys = section
        .keys()
        .filter(|key| controls::is_endpoint_control(key))
        .count();
    if endpoint_keys == 0 {
        return Ok(SchemaNode::Section(section));
    }
    if section.contains_key(INHERITS) {
        return Err(GenerateError::InheritsWithEndpoint { path: path.dotted() });
    }
    if endpoint_keys != section.len() {
        return Err(GenerateError::MixedEndpointControls { path: path.dotted() });
    }

    parse_endpoint(&section, path).map(SchemaNode::Endpoint)
}

fn parse_endpoint(section: &NodeMap, path: &SchemaPath) -> Result<EndpointControls, GenerateError> {
    let invalid = |control: &str, expected: &'static str| GenerateError::InvalidControlValue {
        control: control.to_string(),
        expected,
        path: path.dotted(),
    };

    let mut controls = EndpointControls::default();
    for (key, value) in section {
        let value = value.resolved();
        match (key.as_str(), value.as_ref()) {
            (_, Node::Null) => {}
            (REQUIRED, Node::Bool(required)) => controls.required = Some(*required),
            (REQUIRED, _) => return Err(invalid(REQUIRED, "a boolean")),
            (TYPE, Node::String(name)) => controls.type_name = Some(name.clone()),
            (TYPE, _) => return Err(invalid(TYPE, "a type name")),
            (DEFAULT, node) => controls.default = Some(node.clone()),
            (VALIDATE, Node::Validator(validator)) => controls.validate = Some(validator.clone()),
            (VALIDATE, _) => return Err(invalid(VALIDATE, "a validator function")),
            _ => {}
        }
    }
    Ok(controls)
}
