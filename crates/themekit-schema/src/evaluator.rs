//! Co-recursive walk of a schema and a theme.
//!
//! Each call handles one schema node: it expands mixins, validates keys,
//! classifies the node, and either resolves an endpoint to a single flattened
//! entry or recurses into the section's children in declaration order.
//! Results of earlier siblings are visible to later ones through [`Scope`],
//! which is what `$inherits` reads from.

use indexmap::IndexMap;
use serde_json::Value;
use themekit_config::GenerateOptions;
use themekit_core::path::is_within;
use themekit_core::types::{self, display_value};
use themekit_core::{GenerateError, Node, NodeMap, SchemaPath, TypeRegistry, color};

use crate::classify::{self, EndpointControls, SchemaNode};
use crate::controls::{self, INHERITS};
use crate::mixins::MixinExpander;

/// Flattened key to resolved leaf value, in emission order.
pub type Evaluations = IndexMap<String, Value>;

/// Evaluations computed so far, chained from the innermost section outward.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'s> {
    entries: &'s Evaluations,
    parent: Option<&'s Scope<'s>>,
}

impl<'s> Scope<'s> {
    #[must_use]
    pub const fn root(entries: &'s Evaluations) -> Self {
        Self {
            entries,
            parent: None,
        }
    }

    #[must_use]
    pub const fn child<'c>(&'c self, entries: &'c Evaluations) -> Scope<'c> {
        Scope {
            entries,
            parent: Some(self),
        }
    }

    /// Entries whose key lies at or beneath `prefix`, outermost first.
    #[must_use]
    pub fn within(&self, prefix: &str, separator: &str) -> Vec<(&'s str, &'s Value)> {
        let mut found = self
            .parent
            .map(|parent| parent.within(prefix, separator))
            .unwrap_or_default();
        found.extend(
            self.entries
                .iter()
                .filter(|(key, _)| is_within(key, prefix, separator))
                .map(|(key, value)| (key.as_str(), value)),
        );
        found
    }
}

/// Immutable context for one `generate` call.
pub struct Evaluator<'a> {
    pub(crate) mixins: MixinExpander<'a>,
    pub(crate) registry: &'a TypeRegistry,
    pub(crate) options: &'a GenerateOptions,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub const fn new(
        mixins: &'a Node,
        registry: &'a TypeRegistry,
        options: &'a GenerateOptions,
    ) -> Self {
        Self {
            mixins: MixinExpander::new(mixins),
            registry,
            options,
        }
    }

    /// Evaluate `section` at `path` against `theme`.
    ///
    /// In lazy mode `$required` is ignored and endpoints with neither a theme
    /// value nor a default are skipped instead of failing.
    ///
    /// # Errors
    ///
    /// Any [`GenerateError`] raised by this node or a descendant.
    pub fn evaluate(
        &self,
        path: &SchemaPath,
        section: &Node,
        theme: Option<&Node>,
        scope: Scope<'_>,
        lazy: bool,
    ) -> Result<Evaluations, GenerateError> {
        let section = section.resolved();
        let theme = theme.map(Node::resolved);
        let theme = theme.as_deref().filter(|t| !t.is_null());

        let section = match section.as_ref() {
            Node::Map(map) => map,
            Node::Array(_) => return Err(GenerateError::ArrayInSchema { path: path.dotted() }),
            other => {
                return Err(GenerateError::InvalidSection {
                    found: other.kind_name(),
                    path: path.dotted(),
                });
            }
        };
        if matches!(theme, Some(Node::Array(_))) {
            return Err(GenerateError::ArrayInTheme { path: path.dotted() });
        }

        let section = self.mixins.expand(section, path)?;
        controls::validate_keys(&section, path)?;
        if path.is_root() && section.is_empty() {
            return Err(GenerateError::EmptyRoot);
        }

        match classify::classify(section, path)? {
            SchemaNode::Endpoint(_) if path.is_root() => Err(GenerateError::EndpointAtRoot),
            SchemaNode::Endpoint(endpoint) => self.evaluate_endpoint(path, &endpoint, theme, lazy),
            SchemaNode::Section(children) if children.contains_key(INHERITS) => {
                if path.is_root() {
                    return Err(GenerateError::InheritsAtRoot);
                }
                self.resolve_inheritance(path, children, theme, scope)
            }
            SchemaNode::Section(children) => self.evaluate_children(path, &children, theme, scope, lazy),
        }
    }

    pub(crate) fn evaluate_children(
        &self,
        path: &SchemaPath,
        children: &NodeMap,
        theme: Option<&Node>,
        scope: Scope<'_>,
        lazy: bool,
    ) -> Result<Evaluations, GenerateError> {
        let mut evaluations = Evaluations::new();
        for (name, child) in children {
            let child_path = path.child(name);
            let child_theme = theme.and_then(|t| t.get(name));
            let computed = self.evaluate(
                &child_path,
                child,
                child_theme,
                scope.child(&evaluations),
                lazy,
            )?;
            evaluations.extend(computed);
        }
        Ok(evaluations)
    }

    fn evaluate_endpoint(
        &self,
        path: &SchemaPath,
        endpoint: &EndpointControls,
        theme: Option<&Node>,
        lazy: bool,
    ) -> Result<Evaluations, GenerateError> {
        let theme_value = theme
            .map(|node| {
                endpoint_value(node).ok_or_else(|| GenerateError::InvalidEndpointValue {
                    found: endpoint_kind(node),
                    path: path.dotted(),
                })
            })
            .transpose()?;

        let base = &self.options.default_endpoint;
        let required = !lazy && endpoint.required.unwrap_or(base.required);
        let type_name = endpoint.type_name.as_deref().unwrap_or(&base.type_name);
        let default = || -> Result<Option<Value>, GenerateError> {
            match &endpoint.default {
                Some(node) => default_value(node, path),
                None => Ok(base.default.clone().filter(|v| !v.is_null())),
            }
        };

        if let Some(validator) = endpoint.validate.as_ref().or(base.validate.as_ref()) {
            let value = match theme_value {
                Some(value) => value,
                None => match default()? {
                    Some(value) => value,
                    None => return missing(path, required, lazy),
                },
            };
            if !validator.call(&value) {
                return Err(GenerateError::CustomValidatorRejected {
                    value: display_value(&value),
                    path: path.dotted(),
                });
            }
            return Ok(self.single(path, value));
        }

        if required {
            let value = theme_value.ok_or_else(|| GenerateError::RequiredMissing {
                path: path.dotted(),
            })?;
            return self.emit(path, type_name, value);
        }

        match (theme_value, default()?) {
            (Some(value), _) | (None, Some(value)) => self.emit(path, type_name, value),
            (None, None) => missing(path, required, lazy),
        }
    }

    /// Type-check `value` and produce its entry, standardizing colors.
    fn emit(&self, path: &SchemaPath, type_name: &str, value: Value) -> Result<Evaluations, GenerateError> {
        self.registry.check(type_name, &value, &path.dotted())?;

        if type_name != types::COLOR || !self.options.standardize_colors {
            return Ok(self.single(path, value));
        }
        let standardized = value.as_str().and_then(color::standardize);
        match standardized {
            Some(rgb) => Ok(self.single(path, Value::String(rgb))),
            None => {
                tracing::warn!(path = %path, value = %value, "color value could not be standardized; keeping it as is");
                Ok(self.single(path, value))
            }
        }
    }

    fn single(&self, path: &SchemaPath, value: Value) -> Evaluations {
        let mut entry = Evaluations::with_capacity(1);
        entry.insert(path.flatten(&self.options.separator), value);
        entry
    }
}

fn missing(path: &SchemaPath, required: bool, lazy: bool) -> Result<Evaluations, GenerateError> {
    if lazy {
        Ok(Evaluations::new())
    } else if required {
        Err(GenerateError::RequiredMissing { path: path.dotted() })
    } else {
        Err(GenerateError::MissingSubsection { path: path.dotted() })
    }
}

/// The value an endpoint may hold: a scalar, or a map without endpoint
/// controls. `None` for anything else.
fn endpoint_value(node: &Node) -> Option<Value> {
    match node {
        Node::String(_) | Node::Number(_) | Node::Bool(_) => node.to_value(),
        Node::Map(map) if !map.keys().any(|key| controls::is_endpoint_control(key)) => {
            node.to_value()
        }
        _ => None,
    }
}

const fn endpoint_kind(node: &Node) -> &'static str {
    match node {
        Node::Map(_) => "object with endpoint controls",
        other => other.kind_name(),
    }
}

fn default_value(node: &Node, path: &SchemaPath) -> Result<Option<Value>, GenerateError> {
    let node = node.resolved();
    if node.is_null() {
        return Ok(None);
    }
    endpoint_value(&node)
        .map(Some)
        .ok_or_else(|| GenerateError::InvalidDefault {
            found: endpoint_kind(&node),
            path: path.dotted(),
        })
}
