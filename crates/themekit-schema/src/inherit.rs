//! `$inherits`: reuse of values computed for an earlier subtree.

use themekit_core::path::{dotted_to_flat, rebase};
use themekit_core::{GenerateError, Node, NodeMap, SchemaPath};

use crate::controls::INHERITS;
use crate::evaluator::{Evaluations, Evaluator, Scope};

impl Evaluator<'_> {
    /// Copy every computed entry under the `$inherits` source to `path`,
    /// then layer the section's remaining schema over it in lazy mode.
    ///
    /// Only entries already present in `scope` are visible, so a source must
    /// be declared before the section that inherits from it.
    pub(crate) fn resolve_inheritance(
        &self,
        path: &SchemaPath,
        mut section: NodeMap,
        theme: Option<&Node>,
        scope: Scope<'_>,
    ) -> Result<Evaluations, GenerateError> {
        let reference = section.shift_remove(INHERITS).unwrap_or_default();
        let source = source_reference(&reference, path)?;

        let separator = self.options.separator.as_str();
        let from = dotted_to_flat(&source, separator);
        let to = path.flatten(separator);

        let mut evaluations: Evaluations = scope
            .within(&from, separator)
            .into_iter()
            .filter_map(|(key, value)| {
                rebase(key, &from, &to, separator).map(|key| (key, value.clone()))
            })
            .collect();
        if evaluations.is_empty() {
            return Err(GenerateError::InheritanceNotComputed { source_path: source });
        }

        if theme.is_some_and(|t| !matches!(t, Node::Map(_))) {
            return Err(GenerateError::InheritedOverride { path: path.dotted() });
        }

        tracing::trace!(source = %source, path = %path, inherited = evaluations.len(), "inheritance resolved");

        let ignored = ignored_theme_keys(theme, &section);
        if !ignored.is_empty() {
            tracing::warn!(
                path = %path,
                keys = ?ignored,
                "theme values under an inheriting section have no override schema; ignoring them"
            );
        }

        if !section.is_empty() {
            let overrides = self.evaluate_children(path, &section, theme, scope, true)?;
            tracing::trace!(path = %path, overrides = overrides.len(), "inherited values overridden");
            evaluations.extend(overrides);
        }
        Ok(evaluations)
    }
}

/// Theme keys at an inheriting node that the override schema never reads.
fn ignored_theme_keys<'t>(theme: Option<&'t Node>, section: &NodeMap) -> Vec<&'t str> {
    theme
        .and_then(Node::as_map)
        .map(|map| {
            map.keys()
                .filter(|key| !section.contains_key(key.as_str()))
                .map(String::as_str)
                .collect()
        })
        .unwrap_or_default()
}

fn source_reference(value: &Node, path: &SchemaPath) -> Result<String, GenerateError> {
    match value.resolved().as_ref() {
        Node::String(source) => Ok(source.clone()),
        Node::Array(_) => Err(GenerateError::InheritsArray { path: path.dotted() }),
        other => Err(GenerateError::InheritsType {
            found: other.kind_name(),
            path: path.dotted(),
        }),
    }
}
