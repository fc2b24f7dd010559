//! Endpoint type registry.
//!
//! A type is a name plus a predicate over endpoint values. The registry for
//! one `generate` call is the built-in set with caller-supplied types layered
//! on top; a custom type with a built-in name shadows it for that call only.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::Value;

use crate::color;
use crate::error::GenerateError;

pub const ANY: &str = "any";
pub const NUMBER: &str = "number";
pub const INTEGER: &str = "integer";
pub const STRING: &str = "string";
pub const BOOLEAN: &str = "boolean";
pub const COLOR: &str = "color";
pub const LENGTH: &str = "length";
pub const ROTATION: &str = "rotation";

/// Names of the built-in types.
pub const BUILTIN_TYPES: [&str; 8] = [ANY, NUMBER, INTEGER, STRING, BOOLEAN, COLOR, LENGTH, ROTATION];

static CSS_LENGTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0$|^-?(\d*\.?\d+)(rem|em|px|cm|mm|in|pt|pc|ch|vw|vh|vmin|vmax|%)$")
        .expect("length pattern is valid")
});

static CSS_ROTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0$|^-?(\d*\.?\d+)(deg|rad|grad|turn)$").expect("rotation pattern is valid")
});

/// Shared predicate over endpoint values.
#[derive(Clone)]
pub struct Validator(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Validator {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    #[must_use]
    pub fn call(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// A named endpoint type.
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub name: String,
    pub validator: Validator,
}

impl TypeDef {
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            validator: Validator::new(predicate),
        }
    }
}

/// Caller-supplied types keyed by name, as produced by [`crate::TypeBuilder`].
pub type CustomTypes = HashMap<String, TypeDef>;

/// Lookup table from type name to definition.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDef>,
}

impl TypeRegistry {
    /// Registry holding only the built-in types.
    #[must_use]
    pub fn builtin() -> Self {
        let defs = [
            TypeDef::new(ANY, |_| true),
            TypeDef::new(NUMBER, Value::is_number),
            TypeDef::new(INTEGER, is_integer),
            TypeDef::new(STRING, Value::is_string),
            TypeDef::new(BOOLEAN, Value::is_boolean),
            TypeDef::new(COLOR, |v| v.as_str().is_some_and(color::is_color)),
            TypeDef::new(LENGTH, |v| matches_unit(v, &CSS_LENGTH)),
            TypeDef::new(ROTATION, |v| matches_unit(v, &CSS_ROTATION)),
        ];
        Self {
            types: defs.into_iter().map(|def| (def.name.clone(), def)).collect(),
        }
    }

    /// Built-ins with `custom` layered on top.
    #[must_use]
    pub fn with_custom(custom: CustomTypes) -> Self {
        let mut registry = Self::builtin();
        registry.types.extend(custom);
        registry
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    #[must_use]
    pub fn is_builtin(name: &str) -> bool {
        BUILTIN_TYPES.contains(&name)
    }

    /// Validate `value` against the type registered as `name`.
    ///
    /// # Errors
    ///
    /// `UnregisteredType` when no such type exists, `TypeMismatch` when the
    /// predicate rejects the value.
    pub fn check(&self, name: &str, value: &Value, path: &str) -> Result<(), GenerateError> {
        let def = self
            .lookup(name)
            .ok_or_else(|| GenerateError::UnregisteredType {
                name: name.to_string(),
            })?;

        if def.validator.call(value) {
            Ok(())
        } else {
            Err(GenerateError::TypeMismatch {
                value: display_value(value),
                type_name: name.to_string(),
                path: path.to_string(),
            })
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Render a value for an error message; strings appear without quotes.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0),
        _ => false,
    }
}

// Numeric `0` is accepted as the unitless zero; other numbers need a unit.
fn matches_unit(value: &Value, pattern: &Regex) -> bool {
    match value {
        Value::String(s) => pattern.is_match(s),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}
