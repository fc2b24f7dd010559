//! Error taxonomy for theme generation.
//!
//! Every failure is fatal to the current `generate` call. Variants are
//! grouped by [`ErrorKind`]; the rendered message starts with the tag of
//! its kind (`Invalid syntax:`, `Schema error:`, ...).

use thiserror::Error;

/// The taxonomy bucket an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed control usage or key shape.
    Syntax,
    /// Theme shape does not match the schema.
    Theme,
    /// Referenced endpoint type is unknown or cannot be registered.
    Type,
    /// A value was rejected by a type or custom validator.
    Validation,
    /// Structural problem in the schema itself.
    Schema,
    /// Invalid mixin reference.
    Mixin,
}

/// Errors raised while resolving a schema against a theme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    // --- Syntax ---
    #[error("Invalid syntax: Arrays are not allowed in schemas at path '{path}'")]
    ArrayInSchema { path: String },

    #[error("Invalid syntax: Arrays are not allowed in themes at path '{path}'")]
    ArrayInTheme { path: String },

    #[error("Invalid syntax: Control '{control}' does not exist")]
    UnknownControl { control: String },

    #[error("Invalid syntax: Key '{key}' at path '{path}' is not a valid name")]
    InvalidKey { key: String, path: String },

    #[error("Invalid syntax: Endpoint has non-endpoint controls at path '{path}'")]
    MixedEndpointControls { path: String },

    #[error("Invalid syntax: Control '{control}' expects {expected} at path '{path}'")]
    InvalidControlValue {
        control: String,
        expected: &'static str,
        path: String,
    },

    // --- Theme ---
    #[error(
        "Invalid theme: Theme endpoint should be a string, number, boolean or plain object, found {found} at path '{path}'"
    )]
    InvalidEndpointValue { found: &'static str, path: String },

    #[error("Invalid theme: Theme subsection is missing at path partial '{path}'")]
    MissingSubsection { path: String },

    #[error(
        "Invalid theme: Setting value of already computed inheritance value is invalid at path '{path}'"
    )]
    InheritedOverride { path: String },

    // --- Type ---
    #[error("Endpoint type: Type '{name}' is not registered.")]
    UnregisteredType { name: String },

    #[error("Endpoint type: Type '{name}' is a default type.")]
    DefaultTypeName { name: String },

    #[error("Endpoint type: Type '{name}' already exists.")]
    DuplicateType { name: String },

    // --- Validation ---
    #[error("Validation error: Theme value '{value}' failed for type '{type_name}' at path '{path}'")]
    TypeMismatch {
        value: String,
        type_name: String,
        path: String,
    },

    #[error("Validation error: Theme value '{value}' failed custom validator at path '{path}'")]
    CustomValidatorRejected { value: String, path: String },

    #[error("Validation error: No theme value provided when $required=true at path '{path}'")]
    RequiredMissing { path: String },

    // --- Schema ---
    #[error("Schema error: Schema must not be an empty object")]
    EmptyRoot,

    #[error("Schema error: Endpoint controls at schema root are not valid")]
    EndpointAtRoot,

    #[error("Schema error: $inherits is not valid at schema root")]
    InheritsAtRoot,

    #[error("Schema error: Arrays are not allowed with $inherits at path '{path}'")]
    InheritsArray { path: String },

    #[error("Schema error: $inherits expects a dotted path string, found {found} at path '{path}'")]
    InheritsType { found: &'static str, path: String },

    #[error("Schema error: $inherits cannot be combined with endpoint controls at path '{path}'")]
    InheritsWithEndpoint { path: String },

    #[error(
        "Schema error: No inheritance values have been computed for '{source_path}'. This might be because it is defined after the inheritance definition."
    )]
    InheritanceNotComputed { source_path: String },

    #[error("Schema error: Mixin '{name}' not found")]
    MixinNotFound { name: String },

    #[error("Schema error: Mixin '{name}' must be an object, found {found}")]
    MixinNotSection { name: String, found: &'static str },

    #[error(
        "Schema error: $default must be a string, number, boolean or plain object, found {found} at path '{path}'"
    )]
    InvalidDefault { found: &'static str, path: String },

    #[error("Schema error: Invalid endpoint section of type '{found}' at path '{path}'")]
    InvalidSection { found: &'static str, path: String },

    #[error("Schema error: Option '{field}' {reason}")]
    InvalidOption { field: String, reason: String },

    // --- Mixin ---
    #[error("Mixin error: Invalid mixin name '{name}' at path '{path}'")]
    InvalidMixinName { name: String, path: String },

    #[error("Mixin error: Circular mixin reference '{name}' at path '{path}'")]
    CircularMixin { name: String, path: String },
}

impl GenerateError {
    /// The taxonomy bucket of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ArrayInSchema { .. }
            | Self::ArrayInTheme { .. }
            | Self::UnknownControl { .. }
            | Self::InvalidKey { .. }
            | Self::MixedEndpointControls { .. }
            | Self::InvalidControlValue { .. } => ErrorKind::Syntax,
            Self::InvalidEndpointValue { .. }
            | Self::MissingSubsection { .. }
            | Self::InheritedOverride { .. } => ErrorKind::Theme,
            Self::UnregisteredType { .. }
            | Self::DefaultTypeName { .. }
            | Self::DuplicateType { .. } => ErrorKind::Type,
            Self::TypeMismatch { .. }
            | Self::CustomValidatorRejected { .. }
            | Self::RequiredMissing { .. } => ErrorKind::Validation,
            Self::EmptyRoot
            | Self::EndpointAtRoot
            | Self::InheritsAtRoot
            | Self::InheritsArray { .. }
            | Self::InheritsType { .. }
            | Self::InheritsWithEndpoint { .. }
            | Self::InheritanceNotComputed { .. }
            | Self::MixinNotFound { .. }
            | Self::MixinNotSection { .. }
            | Self::InvalidDefault { .. }
            | Self::InvalidSection { .. }
            | Self::InvalidOption { .. } => ErrorKind::Schema,
            Self::InvalidMixinName { .. } | Self::CircularMixin { .. } => ErrorKind::Mixin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_taxonomy_tag() {
        let err = GenerateError::MissingSubsection {
            path: "level-1.level-2".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid theme: Theme subsection is missing at path partial 'level-1.level-2'"
        );
        assert_eq!(err.kind(), ErrorKind::Theme);

        let err = GenerateError::InvalidMixinName {
            name: "$required".into(),
            path: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "Mixin error: Invalid mixin name '$required' at path ''"
        );
        assert_eq!(err.kind(), ErrorKind::Mixin);
    }

    #[test]
    fn schema_errors_classify_as_schema() {
        for err in [
            GenerateError::EmptyRoot,
            GenerateError::EndpointAtRoot,
            GenerateError::InheritsAtRoot,
            GenerateError::MixinNotFound { name: "m".into() },
        ] {
            assert_eq!(err.kind(), ErrorKind::Schema, "{err}");
            assert!(err.to_string().starts_with("Schema error: "));
        }
    }
}
