//! In-memory tree shared by themes, schemas, and mixin definitions.
//!
//! A [`Node`] is a JSON-like value that can additionally hold a producer
//! (resolved at the point of use) or a `$validate` predicate. Maps keep
//! insertion order; inheritance lookups depend on it.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::types::Validator;

/// Zero-argument producer yielding a node on demand.
pub type Producer = Arc<dyn Fn() -> Node + Send + Sync>;

/// Ordered children of a map node.
pub type NodeMap = IndexMap<String, Node>;

#[derive(Clone, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Node>),
    Map(NodeMap),
    Lazy(Producer),
    Validator(Validator),
}

impl Node {
    /// Wrap a producer that is invoked each time the node is resolved.
    pub fn lazy<F>(producer: F) -> Self
    where
        F: Fn() -> Self + Send + Sync + 'static,
    {
        Self::Lazy(Arc::new(producer))
    }

    /// Wrap a predicate for use as a `$validate` control value.
    pub fn validator<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Validator(Validator::new(predicate))
    }

    /// An empty map node.
    #[must_use]
    pub fn empty_map() -> Self {
        Self::Map(NodeMap::new())
    }

    /// Invoke producers until a concrete node is reached.
    #[must_use]
    pub fn resolved(&self) -> Cow<'_, Self> {
        let Self::Lazy(producer) = self else {
            return Cow::Borrowed(self);
        };
        let mut node = producer();
        while let Self::Lazy(next) = &node {
            let next = Arc::clone(next);
            node = next();
        }
        Cow::Owned(node)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&NodeMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Child of a map node, unresolved.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Deep lookup by path segments, resolving producers at every step.
    ///
    /// Returns `None` when any segment is missing or the target is null.
    #[must_use]
    pub fn get_in<S: AsRef<str>>(&self, segments: &[S]) -> Option<Self> {
        let mut current = self.resolved().into_owned();
        for segment in segments {
            let segment = segment.as_ref();
            let child = match &current {
                Self::Map(map) => map.get(segment)?,
                Self::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
            current = child.resolved().into_owned();
        }
        (!current.is_null()).then_some(current)
    }

    /// Human-readable name of the node's shape, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Map(_) => "object",
            Self::Lazy(_) => "function",
            Self::Validator(_) => "validator",
        }
    }

    /// Convert to a plain JSON value, resolving producers deeply.
    ///
    /// Returns `None` if a validator appears anywhere in the tree.
    #[must_use]
    pub fn to_value(&self) -> Option<Value> {
        let value = match self.resolved().as_ref() {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Array(items) => Value::Array(
                items
                    .iter()
                    .map(Self::to_value)
                    .collect::<Option<Vec<_>>>()?,
            ),
            Self::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| v.to_value().map(|v| (k.clone(), v)))
                    .collect::<Option<serde_json::Map<_, _>>>()?,
            ),
            Self::Validator(_) | Self::Lazy(_) => return None,
        };
        Some(value)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Self::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
            Self::Validator(v) => fmt::Debug::fmt(v, f),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl<K: Into<String>> FromIterator<(K, Self)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, Self)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A value supplied either directly or through a producer.
pub enum Deferred<T> {
    Ready(T),
    Producer(Box<dyn FnOnce() -> T + Send>),
}

impl<T> Deferred<T> {
    pub fn producer<F>(producer: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self::Producer(Box::new(producer))
    }

    /// Invoke the producer if there is one.
    pub fn resolve(self) -> T {
        match self {
            Self::Ready(value) => value,
            Self::Producer(producer) => producer(),
        }
    }
}

impl<T> From<T> for Deferred<T> {
    fn from(value: T) -> Self {
        Self::Ready(value)
    }
}

impl<T: Default> Default for Deferred<T> {
    fn default() -> Self {
        Self::Ready(T::default())
    }
}
