//! Splicing of named schema fragments into sections.
//!
//! A section's `$mixins` control names one or more fragments in the mixin
//! definitions tree by dotted path. The fragments' keys replace the control
//! at its position: keys declared before `$mixins` stay before, keys after
//! stay after. A fragment that itself carries `$mixins` is expanded first,
//! so chained mixins land exactly where they would if inlined by hand.

use themekit_core::path::parse_path;
use themekit_core::{GenerateError, Node, NodeMap, SchemaPath};

use crate::controls::{MIXINS, looks_like_control};

/// Expands `$mixins` controls against one definitions tree.
#[derive(Debug, Clone, Copy)]
pub struct MixinExpander<'a> {
    definitions: &'a Node,
}

impl<'a> MixinExpander<'a> {
    #[must_use]
    pub const fn new(definitions: &'a Node) -> Self {
        Self { definitions }
    }

    /// Return `section` with its `$mixins` control replaced by the referenced
    /// fragments. Sections without the control are returned unchanged.
    ///
    /// # Errors
    ///
    /// `InvalidMixinName` for a non-string or control-like reference,
    /// `MixinNotFound` for a missing fragment, `MixinNotSection` for a
    /// fragment that is not a map, and `CircularMixin` for a fragment that
    /// includes itself.
    pub fn expand(&self, section: &NodeMap, path: &SchemaPath) -> Result<NodeMap, GenerateError> {
        self.expand_with(section, path, &mut Vec::new())
    }

    fn expand_with(
        &self,
        section: &NodeMap,
        path: &SchemaPath,
        active: &mut Vec<String>,
    ) -> Result<NodeMap, GenerateError> {
        let Some(index) = section.get_index_of(MIXINS) else {
            return Ok(section.clone());
        };
        let references = references(&section[index], path)?;

        let mut expanded: NodeMap = section
            .iter()
            .take(index)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        for name in references {
            let segments = reference_segments(&name, path)?;
            if active.contains(&name) {
                return Err(GenerateError::CircularMixin {
                    name,
                    path: path.dotted(),
                });
            }

            let fragment = match self.definitions.get_in(&segments) {
                Some(Node::Map(fragment)) => fragment,
                Some(other) => {
                    return Err(GenerateError::MixinNotSection {
                        name,
                        found: other.kind_name(),
                    });
                }
                None => return Err(GenerateError::MixinNotFound { name }),
            };

            active.push(name.clone());
            let fragment = self.expand_with(&fragment, path, active)?;
            active.pop();

            tracing::trace!(mixin = %name, path = %path, keys = fragment.len(), "mixin spliced");
            expanded.extend(fragment);
        }

        expanded.extend(
            section
                .iter()
                .skip(index + 1)
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        Ok(expanded)
    }
}

/// Mixin names held by a `$mixins` control value.
fn references(value: &Node, path: &SchemaPath) -> Result<Vec<String>, GenerateError> {
    let invalid = |node: &Node| GenerateError::InvalidMixinName {
        name: format!("<{}>", node.kind_name()),
        path: path.dotted(),
    };

    match value.resolved().as_ref() {
        Node::String(name) => Ok(vec![name.clone()]),
        Node::Array(items) => items
            .iter()
            .map(|item| match item.resolved().as_ref() {
                Node::String(name) => Ok(name.clone()),
                other => Err(invalid(other)),
            })
            .collect(),
        other => Err(invalid(other)),
    }
}

fn reference_segments(name: &str, path: &SchemaPath) -> Result<Vec<String>, GenerateError> {
    let segments = parse_path(name);
    if segments.is_empty() || segments.iter().any(|s| looks_like_control(s)) {
        return Err(GenerateError::InvalidMixinName {
            name: name.to_string(),
            path: path.dotted(),
        });
    }
    Ok(segments)
}
