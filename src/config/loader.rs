//! Configuration Loader
//!
//! Layered loading of `BatchConfig`: built-in defaults, then an optional
//! configuration file, then `TASKER_BATCH_*` environment variables. Later
//! layers win. The merged result is validated before it is handed out.

use super::error::ConfigResult;
use super::BatchConfig;
use crate::constants::env::CONFIG_PREFIX;
use ::config::{Config, Environment, File};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Builder for layered batch configuration
#[derive(Debug, Clone)]
pub struct BatchConfigLoader {
    file: Option<PathBuf>,
    file_required: bool,
    env_prefix: String,
    /// Explicit variables used instead of the process environment
    env_vars: Option<HashMap<String, String>>,
}

impl Default for BatchConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchConfigLoader {
    pub fn new() -> Self {
        Self {
            file: None,
            file_required: false,
            env_prefix: CONFIG_PREFIX.to_string(),
            env_vars: None,
        }
    }

    /// Layer a configuration file over the defaults
    ///
    /// The format is picked from the extension (`.toml`, `.yaml`, `.json`, ...).
    /// A missing file is skipped unless `required(true)` is set.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.file_required = required;
        self
    }

    /// Change the environment variable prefix (default `TASKER_BATCH`)
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Read overrides from the given variables instead of the process environment
    ///
    /// Useful for testing without modifying global environment variables.
    pub fn with_env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    /// Merge all layers, deserialize and validate
    pub fn load(&self) -> ConfigResult<BatchConfig> {
        let mut builder = Config::builder();

        if let Some(path) = &self.file {
            debug!(
                path = %path.display(),
                required = self.file_required,
                "Layering batch configuration file"
            );
            builder = builder.add_source(File::from(path.as_path()).required(self.file_required));
        }

        let environment = Environment::with_prefix(&self.env_prefix)
            .prefix_separator("_")
            .try_parsing(true)
            .source(
                self.env_vars
                    .clone()
                    .map(|vars| vars.into_iter().collect::<::config::Map<String, String>>()),
            );

        let config: BatchConfig = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        config.validate()?;

        debug!(
            batch_size = config.batch_size,
            max_concurrent = config.max_concurrent,
            strategy = %config.strategy,
            auto_overflow = %config.auto_overflow,
            "Batch configuration loaded"
        );

        Ok(config)
    }
}
