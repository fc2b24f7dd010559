//! # themekit-core
//!
//! Foundation types for themekit.
//!
//! This crate provides:
//! - `Node`: the ordered tree used for themes, schemas, and mixin definitions,
//!   with producer (lazy) and validator leaves
//! - `GenerateError`: the error taxonomy shared by every stage of generation
//! - `SchemaPath` and helpers converting dotted references to flattened keys
//! - `TypeRegistry`: built-in endpoint types plus caller-supplied ones
//! - `TypeBuilder`: checked construction of custom type tables
//! - CSS color recognition and standardization

pub mod builder;
pub mod color;
pub mod error;
pub mod node;
pub mod path;
pub mod types;

pub use builder::TypeBuilder;
pub use error::{ErrorKind, GenerateError};
pub use node::{Deferred, Node, NodeMap};
pub use path::SchemaPath;
pub use types::{CustomTypes, TypeDef, TypeRegistry, Validator};
