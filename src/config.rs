//! Client configuration.
//!
//! Loaded from an optional YAML file plus environment variable overrides.

use serde::Deserialize;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "notibus.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "NOTIBUS_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "NOTIBUS";

/// Client configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service connection configuration.
    pub service: ServiceConfig,
}

/// Service connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Registered name of the notification service.
    pub name: String,
    /// Transaction timeout in milliseconds, enforced by the transport.
    pub timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "notification.service".to_string(),
            timeout_ms: 4000,
        }
    }
}

impl ClientConfig {
    /// Load configuration from file and environment.
    ///
    /// Sources (later overrides earlier):
    /// 1. `notibus.yaml` in the current directory (if present)
    /// 2. File specified by the `path` argument (if provided)
    /// 3. File named by `NOTIBUS_CONFIG` (if set)
    /// 4. Environment variables prefixed `NOTIBUS__`
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: ClientConfig = config.try_deserialize()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.service.name, "notification.service");
        assert_eq!(config.service.timeout_ms, 4000);
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = "service:\n  name: test.notification\n  timeout_ms: 250\n";
        let config: ClientConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.service.name, "test.notification");
        assert_eq!(config.service.timeout_ms, 250);
    }
}
