//! # themekit-schema
//!
//! Resolution of theme schemas into flat design-token properties.
//!
//! This crate provides:
//! - `generate`: walks a schema and a theme together and emits one entry per
//!   endpoint, keyed by the joined section names
//! - `Generator`: a schema bound to its mixins, custom types, and options
//! - `$mixins` expansion with chained fragments and cycle detection
//! - `$inherits` resolution from values computed earlier in the same call
//! - Endpoint validation against built-in and custom types, with defaults
//!   and optional color standardization
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use themekit_config::GenerateOptions;
//! use themekit_core::{CustomTypes, Node};
//! use themekit_schema::generate;
//!
//! let schema = Node::from(json!({
//!     "text": { "color": { "$type": "color", "$required": true } },
//!     "link": { "$inherits": "text" }
//! }));
//! let theme = Node::from(json!({ "text": { "color": "black" } }));
//!
//! let properties = generate(
//!     &theme,
//!     &schema,
//!     &Node::empty_map(),
//!     CustomTypes::new(),
//!     &GenerateOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(properties["link__color"], json!("0, 0, 0"));
//! ```

pub mod classify;
pub mod controls;
pub mod evaluator;
pub mod generate;
mod inherit;
pub mod mixins;

pub use evaluator::{Evaluations, Evaluator, Scope};
pub use generate::{GeneratedProperties, Generator, generate};
pub use mixins::MixinExpander;
