//! Top-level entry points.

use indexmap::IndexMap;
use serde_json::Value;
use themekit_config::{ConfigError, GenerateOptions};
use themekit_core::{CustomTypes, Deferred, GenerateError, Node, SchemaPath, TypeRegistry};

use crate::evaluator::{Evaluations, Evaluator, Scope};

/// Flattened output keys, prefixed, in emission order.
pub type GeneratedProperties = IndexMap<String, Value>;

/// Resolve `schema` against `theme` and return the flattened properties.
///
/// `mixins` holds the fragments `$mixins` controls refer to; pass
/// [`Node::empty_map`] when the schema uses none. Custom types shadow
/// built-ins of the same name for this call only.
///
/// # Errors
///
/// The first [`GenerateError`] raised anywhere in the schema. No partial
/// output is returned.
pub fn generate(
    theme: &Node,
    schema: &Node,
    mixins: &Node,
    custom_types: impl Into<Deferred<CustomTypes>>,
    options: &GenerateOptions,
) -> Result<GeneratedProperties, GenerateError> {
    let registry = TypeRegistry::with_custom(custom_types.into().resolve());
    run(theme, schema, mixins, &registry, options)
}

fn run(
    theme: &Node,
    schema: &Node,
    mixins: &Node,
    registry: &TypeRegistry,
    options: &GenerateOptions,
) -> Result<GeneratedProperties, GenerateError> {
    options.validate().map_err(invalid_option)?;
    if options.condense_keys {
        tracing::warn!("condense_keys is reserved and has no effect");
    }

    let mixins = mixins.resolved();
    let evaluator = Evaluator::new(&mixins, registry, options);
    let empty = Evaluations::new();
    let evaluations = evaluator.evaluate(
        &SchemaPath::root(),
        schema,
        Some(theme),
        Scope::root(&empty),
        false,
    )?;

    let properties = with_prefix(evaluations, &options.prefix);
    tracing::debug!(properties = properties.len(), prefix = %options.prefix, "theme generated");
    Ok(properties)
}

fn invalid_option(err: ConfigError) -> GenerateError {
    match err {
        ConfigError::InvalidValue { field, reason } => GenerateError::InvalidOption { field, reason },
        other => GenerateError::InvalidOption {
            field: "options".into(),
            reason: other.to_string(),
        },
    }
}

fn with_prefix(evaluations: Evaluations, prefix: &str) -> GeneratedProperties {
    if prefix.is_empty() {
        return evaluations;
    }
    evaluations
        .into_iter()
        .map(|(key, value)| (format!("{prefix}{key}"), value))
        .collect()
}

/// Reusable schema bound to its mixins, types, and options.
///
/// ```
/// use serde_json::json;
/// use themekit_core::Node;
/// use themekit_schema::Generator;
///
/// let generator = Generator::new(Node::from(json!({ "bg": { "$type": "color" } })));
/// let properties = generator.generate(&Node::from(json!({ "bg": "#fff" }))).unwrap();
/// assert_eq!(properties["bg"], json!("255, 255, 255"));
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    schema: Node,
    mixins: Node,
    registry: TypeRegistry,
    options: GenerateOptions,
}

impl Generator {
    #[must_use]
    pub fn new(schema: Node) -> Self {
        Self {
            schema,
            mixins: Node::empty_map(),
            registry: TypeRegistry::builtin(),
            options: GenerateOptions::default(),
        }
    }

    #[must_use]
    pub fn mixins(mut self, mixins: Node) -> Self {
        self.mixins = mixins;
        self
    }

    #[must_use]
    pub fn custom_types(mut self, custom_types: impl Into<Deferred<CustomTypes>>) -> Self {
        self.registry = TypeRegistry::with_custom(custom_types.into().resolve());
        self
    }

    #[must_use]
    pub fn options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// Generate properties for one theme.
    ///
    /// # Errors
    ///
    /// See [`generate`].
    pub fn generate(&self, theme: &Node) -> Result<GeneratedProperties, GenerateError> {
        run(theme, &self.schema, &self.mixins, &self.registry, &self.options)
    }
}
