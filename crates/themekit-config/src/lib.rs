//! # themekit-config
//!
//! Generation options for themekit, loadable through figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`THEMEKIT_*` prefix, `__` as separator)
//! 2. Project-level `themekit.toml`
//! 3. User-level `~/.config/themekit/config.toml`
//! 4. Built-in defaults
//!
//! # Usage
//!
//! ```no_run
//! use themekit_config::GenerateOptions;
//!
//! let options = GenerateOptions::load().expect("config");
//! println!("separator: {}", options.separator);
//! ```

mod endpoint;
mod error;

pub use endpoint::EndpointDefaults;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_SEPARATOR: &str = "__";

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

const fn default_true() -> bool {
    true
}

/// Options for one `generate` call.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerateOptions {
    /// Joins schema segment names into output keys.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Prepended to every output key.
    #[serde(default)]
    pub prefix: String,

    #[serde(default)]
    pub default_endpoint: EndpointDefaults,

    /// Rewrite `color`-typed values as `"r, g, b"`.
    #[serde(default = "default_true")]
    pub standardize_colors: bool,

    /// Reserved; currently has no effect.
    #[serde(default)]
    pub condense_keys: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            prefix: String::new(),
            default_endpoint: EndpointDefaults::default(),
            standardize_colors: true,
            condense_keys: false,
        }
    }
}

impl GenerateOptions {
    /// Load options from all sources (TOML files + environment variables).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed and
    /// `ConfigError::InvalidValue` if the result fails [`Self::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let options: Self = Self::figment().extract()?;
        options.validate()?;
        Ok(options)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and hosts can layer additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from("themekit.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("THEMEKIT_").split("__"))
    }

    /// Reject option values that would make output keys ambiguous.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidValue` for an empty separator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.separator.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "separator".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("themekit").join("config.toml"))
    }
}
