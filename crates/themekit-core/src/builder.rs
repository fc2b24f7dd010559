//! Incremental construction of custom type tables.

use serde_json::Value;

use crate::error::GenerateError;
use crate::types::{CustomTypes, TypeDef, TypeRegistry};

/// Collects custom types for a `generate` call.
///
/// Unlike passing a raw [`CustomTypes`] map, the builder refuses to shadow
/// built-in types and refuses duplicate names.
#[derive(Debug, Default)]
pub struct TypeBuilder {
    types: CustomTypes,
}

impl TypeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type.
    ///
    /// # Errors
    ///
    /// `DefaultTypeName` if `name` is a built-in type, `DuplicateType` if it
    /// was already added to this builder.
    pub fn add_type<F>(&mut self, name: &str, validator: F) -> Result<&mut Self, GenerateError>
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        if TypeRegistry::is_builtin(name) {
            return Err(GenerateError::DefaultTypeName {
                name: name.to_string(),
            });
        }
        if self.types.contains_key(name) {
            return Err(GenerateError::DuplicateType {
                name: name.to_string(),
            });
        }
        self.types
            .insert(name.to_string(), TypeDef::new(name, validator));
        Ok(self)
    }

    /// The collected types, ready to pass to `generate`.
    #[must_use]
    pub fn build(self) -> CustomTypes {
        self.types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_with_empty() {
        assert!(TypeBuilder::new().build().is_empty());
    }

    #[test]
    fn build_with_two_types() {
        let mut builder = TypeBuilder::new();
        builder
            .add_type("type-1", |_| true)
            .unwrap()
            .add_type("type-2", |v| v == "x")
            .unwrap();

        let types = builder.build();
        assert_eq!(types.len(), 2);
        assert_eq!(types["type-1"].name, "type-1");
        assert!(types["type-2"].validator.call(&json!("x")));
        assert!(!types["type-2"].validator.call(&json!("y")));
    }

    #[test]
    fn add_type_with_reserved_default_name() {
        let err = TypeBuilder::new().add_type("color", |_| true).unwrap_err();
        assert_eq!(err.to_string(), "Endpoint type: Type 'color' is a default type.");
    }

    #[test]
    fn add_type_twice() {
        let mut builder = TypeBuilder::new();
        builder.add_type("type-1", |_| true).unwrap();
        let err = builder.add_type("type-1", |_| true).unwrap_err();
        assert_eq!(err.to_string(), "Endpoint type: Type 'type-1' already exists.");
    }
}
