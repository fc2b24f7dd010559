//! Base endpoint controls merged beneath every schema endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use themekit_core::Validator;
use themekit_core::types::ANY;

fn default_type() -> String {
    ANY.to_string()
}

/// Controls applied to an endpoint before its own `$required`, `$type`,
/// `$default` and `$validate` are layered on top.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointDefaults {
    #[serde(default)]
    pub required: bool,

    /// Type name looked up in the registry.
    #[serde(rename = "type", default = "default_type")]
    pub type_name: String,

    #[serde(default)]
    pub default: Option<Value>,

    /// Predicate used instead of the type when set. Not loadable from config.
    #[serde(skip)]
    pub validate: Option<Validator>,
}

impl Default for EndpointDefaults {
    fn default() -> Self {
        Self {
            required: false,
            type_name: default_type(),
            default: None,
            validate: None,
        }
    }
}
