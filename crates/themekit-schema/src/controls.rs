//! Reserved `$`-prefixed schema keys and key-shape validation.

use themekit_core::{GenerateError, NodeMap, SchemaPath};

pub const REQUIRED: &str = "$required";
pub const TYPE: &str = "$type";
pub const DEFAULT: &str = "$default";
pub const VALIDATE: &str = "$validate";
pub const INHERITS: &str = "$inherits";
pub const MIXINS: &str = "$mixins";

/// A recognized control key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Required,
    Type,
    Default,
    Validate,
    Inherits,
    Mixins,
}

impl Control {
    pub const ALL: [Self; 6] = [
        Self::Required,
        Self::Type,
        Self::Default,
        Self::Validate,
        Self::Inherits,
        Self::Mixins,
    ];

    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|control| control.key() == key)
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Required => REQUIRED,
            Self::Type => TYPE,
            Self::Default => DEFAULT,
            Self::Validate => VALIDATE,
            Self::Inherits => INHERITS,
            Self::Mixins => MIXINS,
        }
    }

    /// Controls that make a node an endpoint.
    #[must_use]
    pub const fn is_endpoint(self) -> bool {
        matches!(
            self,
            Self::Required | Self::Type | Self::Default | Self::Validate
        )
    }
}

/// Whether `key` is an endpoint control.
#[must_use]
pub fn is_endpoint_control(key: &str) -> bool {
    Control::parse(key).is_some_and(Control::is_endpoint)
}

/// `$` followed by at least one character.
#[must_use]
pub fn looks_like_control(key: &str) -> bool {
    key.len() > 1 && key.starts_with('$')
}

/// Non-empty run of ASCII word characters or hyphens.
#[must_use]
pub fn is_valid_name(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Check every key of a section before it is classified.
///
/// # Errors
///
/// `UnknownControl` for an unrecognized `$` key, `InvalidKey` for a name
/// that is not a word.
pub fn validate_keys(section: &NodeMap, path: &SchemaPath) -> Result<(), GenerateError> {
    for key in section.keys() {
        if looks_like_control(key) {
            if Control::parse(key).is_none() {
                return Err(GenerateError::UnknownControl {
                    control: key.clone(),
                });
            }
        } else if !is_valid_name(key) {
            return Err(GenerateError::InvalidKey {
                key: key.clone(),
                path: path.dotted(),
            });
        }
    }
    Ok(())
}
