use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::options::JsonOptions;

pub const ENV_PREFIX: &str = "WIRE_MODEL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Layered configuration: built-in defaults, then an optional file, then
/// `WIRE_MODEL_*` environment variables (`__` separates nested keys).
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub json: JsonOptions,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = JsonOptions::default();
        let mut builder = Config::builder()
            .set_default("json.pretty", defaults.pretty)?
            .set_default("json.indent", defaults.indent as i64)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize().map_err(|err| {
            tracing::debug!("Configuration error: {:?}", &err);
            ConfigError::from(err)
        })?;
        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.json.pretty && self.json.indent == 0 {
            return Err(ConfigError::InvalidValue {
                key: "json.indent".to_string(),
                message: "pretty output needs an indent of at least one space".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::io::Write;

    fn clean_env() {
        for (key, _) in env::vars() {
            if key.starts_with("WIRE_MODEL_") {
                env::remove_var(&key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();

        let settings = Settings::new().unwrap();
        assert_eq!(settings.json, JsonOptions::default());
        assert!(!settings.json.pretty);
        assert_eq!(settings.json.indent, 2);
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        clean_env();
        env::set_var("WIRE_MODEL_JSON__PRETTY", "true");
        env::set_var("WIRE_MODEL_JSON__INDENT", "4");

        let settings = Settings::new().unwrap();
        assert!(settings.json.pretty);
        assert_eq!(settings.json.indent, 4);

        // Clean up
        env::remove_var("WIRE_MODEL_JSON__PRETTY");
        env::remove_var("WIRE_MODEL_JSON__INDENT");
    }

    #[test]
    #[serial]
    fn test_file_then_environment() {
        clean_env();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[json]\npretty = true\nindent = 8").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert!(settings.json.pretty);
        assert_eq!(settings.json.indent, 8);

        env::set_var("WIRE_MODEL_JSON__INDENT", "3");
        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.json.indent, 3);

        // Clean up
        env::remove_var("WIRE_MODEL_JSON__INDENT");
    }

    #[test]
    #[serial]
    fn test_zero_indent_rejected_when_pretty() {
        clean_env();
        env::set_var("WIRE_MODEL_JSON__PRETTY", "true");
        env::set_var("WIRE_MODEL_JSON__INDENT", "0");

        let err = Settings::new().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "json.indent"));

        // Clean up
        env::remove_var("WIRE_MODEL_JSON__PRETTY");
        env::remove_var("WIRE_MODEL_JSON__INDENT");
    }
}
